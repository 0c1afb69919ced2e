use std::time::Duration;

use super::backend::{AnalysisBackend, BackendKind};
use super::{AnalysisError, AnalysisRequest};

/// Offline stand-in for the external providers: waits `delay`, then returns
/// a fixed markdown analysis addressed to the patient.
pub struct MockBackend {
    delay: Duration,
}

impl MockBackend {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl AnalysisBackend for MockBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Mock
    }

    fn analyze(&self, request: &AnalysisRequest) -> Result<String, AnalysisError> {
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
        Ok(render_mock_analysis(&request.patient_name))
    }
}

/// Deterministic demo analysis. Only the heading varies with the name.
pub fn render_mock_analysis(patient_name: &str) -> String {
    let name = match patient_name.trim() {
        "" => "Patient",
        trimmed => trimmed,
    };
    format!(
        r#"
## Ayurvedic Analysis for {name}

### Prakriti Assessment (Constitutional Analysis)
Based on the patient's profile, this appears to be a **Vata-Pitta** constitution with the following characteristics:

**Primary Dosha: Vata**
- Quick thinking and creative mind
- Variable appetite and digestion
- Tendency toward anxiety and worry
- Light, thin build with dry skin

**Secondary Dosha: Pitta**
- Strong metabolism and sharp intellect
- Leadership qualities and determination
- Sensitive to heat and spicy foods
- Medium build with warm body temperature

### Vikriti Assessment (Current Imbalance)
Current imbalances may include:
- **Vata aggravation**: Stress, irregular routine, dry skin
- **Pitta aggravation**: Work-related stress, digestive issues
- **Kapha deficiency**: Need for grounding and stability

### Dietary Recommendations

**Foods to Favor:**
- Sweet, sour, and salty tastes
- Warm, cooked foods
- Ghee, sesame oil
- Dairy products (if tolerated)
- Nuts and seeds
- Root vegetables

**Foods to Avoid:**
- Cold, dry, and bitter foods
- Raw vegetables
- Carbonated drinks
- Excessive caffeine
- Very spicy foods

**Meal Timing:**
- Regular meal times (7-8 AM, 12-1 PM, 6-7 PM)
- Light dinner before sunset
- Avoid eating when stressed

### Herbal Recommendations

**Primary Herbs:**
- **Ashwagandha**: For stress and energy
- **Brahmi**: For mental clarity
- **Shatavari**: For hormonal balance
- **Ginger**: For digestion
- **Turmeric**: For inflammation

**Formulations to Consider:**
- Chyawanprash (immunity booster)
- Triphala (digestive health)
- Brahmi tablets (mental health)

### Lifestyle Recommendations

**Daily Routine (Dinacharya):**
- Wake up before 6 AM
- Oil pulling with sesame oil
- Abhyanga (self-massage) with warm oil
- Gentle yoga and pranayama
- Regular meditation practice

**Exercise:**
- Gentle, grounding exercises
- Walking in nature
- Yoga (especially Vata-pacifying poses)

**Stress Management:**
- Regular meditation (20-30 minutes daily)
- Deep breathing exercises
- Adequate sleep (7-8 hours)
- Warm oil massage

### Therapeutic Approaches

**Panchakarma Recommendations:**
- Abhyanga (therapeutic massage)
- Shirodhara (oil pouring on forehead)
- Nasya (nasal administration of oils)

**Bodywork:**
- Warm oil massage with sesame oil
- Gentle pressure point massage
- Aromatherapy with calming oils

### Precautions
- Avoid excessive cold and wind
- Maintain regular routine
- Stay hydrated with warm water
- Avoid overexertion and stress

### Action Plan
1. **Week 1-2**: Implement daily routine and dietary changes
2. **Week 3-4**: Add herbal supplements
3. **Month 2**: Begin regular bodywork and therapies
4. **Ongoing**: Monitor progress and adjust as needed

*Note: This analysis is based on general Ayurvedic principles. For personalized recommendations, consult with a qualified Ayurvedic practitioner.*
"#
    )
}
