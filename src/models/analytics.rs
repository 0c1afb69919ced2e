use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::assessment::Assessment;
use super::enums::Dosha;

/// One page of a listing query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub has_more: bool,
}

/// Record counts for a single patient.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientStats {
    pub assessments: u64,
    pub treatments: u64,
    pub active_treatments: u64,
    pub timeline_entries: u64,
}

/// Clinic-wide counters shown on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_patients: u64,
    pub new_this_month: u64,
    pub active_treatments: u64,
}

/// Prakriti vs vikriti comparison for a patient's latest assessment.
///
/// Imbalances are signed: positive means the dosha is aggravated relative
/// to the constitutional baseline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoshaAnalysis {
    pub patient_id: Uuid,
    pub patient_name: String,
    pub prakriti_vata: u32,
    pub prakriti_pitta: u32,
    pub prakriti_kapha: u32,
    pub vikriti_vata: u32,
    pub vikriti_pitta: u32,
    pub vikriti_kapha: u32,
    pub vata_imbalance: i64,
    pub pitta_imbalance: i64,
    pub kapha_imbalance: i64,
    pub primary_imbalance: Dosha,
    pub assessment_date: NaiveDateTime,
}

impl DoshaAnalysis {
    pub fn from_assessment(patient_name: &str, assessment: &Assessment) -> Self {
        let imbalance = |dosha: Dosha| {
            i64::from(assessment.vikriti.get(dosha)) - i64::from(assessment.prakriti.get(dosha))
        };

        // Strictly-greater keeps the first dosha on ties (vata, pitta, kapha).
        let mut primary = Dosha::Vata;
        for dosha in Dosha::all() {
            if imbalance(dosha) > imbalance(primary) {
                primary = dosha;
            }
        }

        Self {
            patient_id: assessment.patient_id,
            patient_name: patient_name.to_string(),
            prakriti_vata: assessment.prakriti.vata,
            prakriti_pitta: assessment.prakriti.pitta,
            prakriti_kapha: assessment.prakriti.kapha,
            vikriti_vata: assessment.vikriti.vata,
            vikriti_pitta: assessment.vikriti.pitta,
            vikriti_kapha: assessment.vikriti.kapha,
            vata_imbalance: imbalance(Dosha::Vata),
            pitta_imbalance: imbalance(Dosha::Pitta),
            kapha_imbalance: imbalance(Dosha::Kapha),
            primary_imbalance: primary,
            assessment_date: assessment.created_at,
        }
    }
}
