pub mod analytics;
pub mod assessment;
pub mod catalog;
pub mod enums;
pub mod patient;
pub mod timeline;
pub mod treatment;

pub use analytics::*;
pub use assessment::*;
pub use catalog::*;
pub use enums::*;
pub use patient::*;
pub use timeline::*;
pub use treatment::*;

use serde::{Deserialize, Serialize};

/// Everything known about one patient, clinical lists newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientBundle {
    pub patient: Patient,
    #[serde(default)]
    pub assessments: Vec<Assessment>,
    #[serde(default)]
    pub treatments: Vec<Treatment>,
    #[serde(default)]
    pub timeline: Vec<TimelineEntry>,
}

impl PatientBundle {
    /// Bundle with demographics only.
    pub fn patient_only(patient: Patient) -> Self {
        Self {
            patient,
            assessments: Vec::new(),
            treatments: Vec::new(),
            timeline: Vec::new(),
        }
    }
}
