use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::Dosha;

/// Vata / Pitta / Kapha scores. Unsigned, so never negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoshaScores {
    pub vata: u32,
    pub pitta: u32,
    pub kapha: u32,
}

impl DoshaScores {
    pub fn new(vata: u32, pitta: u32, kapha: u32) -> Self {
        Self { vata, pitta, kapha }
    }

    pub fn get(&self, dosha: Dosha) -> u32 {
        match dosha {
            Dosha::Vata => self.vata,
            Dosha::Pitta => self.pitta,
            Dosha::Kapha => self.kapha,
        }
    }

    /// Apply a +/- step from an input control, clamping at zero.
    pub fn adjusted(mut self, dosha: Dosha, delta: i64) -> Self {
        let next = (i64::from(self.get(dosha)) + delta).clamp(0, i64::from(u32::MAX)) as u32;
        match dosha {
            Dosha::Vata => self.vata = next,
            Dosha::Pitta => self.pitta = next,
            Dosha::Kapha => self.kapha = next,
        }
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assessment {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub created_at: NaiveDateTime,
    pub assessor_id: Option<String>,
    pub prakriti: DoshaScores,
    pub vikriti: DoshaScores,
    /// Pulse examination.
    pub nadi_pariksha: Option<String>,
    /// Tongue examination.
    pub jihva_pariksha: Option<String>,
    /// General physical examination.
    pub akriti_pariksha: Option<String>,
    pub icd11_codes: Vec<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NewAssessment {
    pub assessor_id: Option<String>,
    pub prakriti: DoshaScores,
    pub vikriti: DoshaScores,
    pub nadi_pariksha: Option<String>,
    pub jihva_pariksha: Option<String>,
    pub akriti_pariksha: Option<String>,
    pub icd11_codes: Vec<String>,
    pub notes: Option<String>,
}

impl Assessment {
    pub fn from_new(
        new: NewAssessment,
        id: Uuid,
        patient_id: Uuid,
        created_at: NaiveDateTime,
    ) -> Self {
        Self {
            id,
            patient_id,
            created_at,
            assessor_id: new.assessor_id,
            prakriti: new.prakriti,
            vikriti: new.vikriti,
            nadi_pariksha: new.nadi_pariksha,
            jihva_pariksha: new.jihva_pariksha,
            akriti_pariksha: new.akriti_pariksha,
            icd11_codes: new.icd11_codes,
            notes: new.notes,
        }
    }
}
