/// System message sent to chat-style providers.
pub const ANALYSIS_SYSTEM_PROMPT: &str = "You are an expert Ayurvedic practitioner with deep \
knowledge of doshas, herbs, and traditional healing methods. Provide detailed, practical advice.";

/// Section titles the prompt requires, in order.
pub const ANALYSIS_SECTIONS: [&str; 6] = [
    "Prakriti Assessment",
    "Vikriti Assessment",
    "Dietary Recommendations",
    "Lifestyle Recommendations",
    "Herbal Recommendations",
    "Therapeutic Approaches",
];

/// Build the user prompt around a composed patient summary.
pub fn build_analysis_prompt(patient_summary: &str) -> String {
    format!(
        r#"
Please analyze this patient from an Ayurvedic perspective:

{patient_summary}

Please provide a comprehensive Ayurvedic analysis including:

1. **Prakriti Assessment** (Constitutional Analysis):
   - Vata, Pitta, Kapha balance
   - Primary and secondary dosha identification
   - Physical and mental characteristics

2. **Vikriti Assessment** (Current Imbalance):
   - Current dosha imbalances
   - Symptoms and signs
   - Seasonal and lifestyle factors

3. **Dietary Recommendations**:
   - Foods to favor and avoid
   - Meal timing and preparation
   - Spices and herbs beneficial

4. **Lifestyle Recommendations**:
   - Daily routine (Dinacharya)
   - Exercise and yoga suggestions
   - Sleep and stress management

5. **Herbal Recommendations**:
   - Specific herbs for balance
   - Formulations to consider
   - Precautions and contraindications

6. **Therapeutic Approaches**:
   - Panchakarma recommendations
   - Massage and bodywork
   - Meditation and breathing techniques

Please provide practical, actionable advice based on Ayurvedic principles. Format the response in markdown.
"#
    )
}
