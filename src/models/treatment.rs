use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::TreatmentStatus;

/// Palliative (shamana) therapy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShamanaTherapy {
    pub internal_medicines: Vec<String>,
    pub external_therapies: Vec<String>,
    pub dosage_instructions: Option<String>,
    pub duration: Option<String>,
}

/// Purification (shodhana / panchakarma) protocol.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShodhanaTherapy {
    pub vamana: Option<String>,
    pub virechana: Option<String>,
    pub basti: Option<String>,
    pub nasya: Option<String>,
    pub raktamokshana: Option<String>,
    pub preparation_phase: Option<String>,
    pub main_phase: Option<String>,
    pub post_phase: Option<String>,
}

/// Rejuvenation (rasayana) plan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RasayanaPlan {
    pub herbs: Vec<String>,
    pub duration: Option<String>,
    pub seasonal_considerations: Option<String>,
    pub contraindications: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DietPlan {
    pub foods_to_include: Vec<String>,
    pub foods_to_avoid: Vec<String>,
    pub meal_timing: Option<String>,
    pub cooking_methods: Vec<String>,
    pub special_instructions: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifestyleRecommendations {
    pub daily_routine: Option<String>,
    pub exercise: Option<String>,
    pub stress_management: Option<String>,
    pub sleep_hygiene: Option<String>,
    pub seasonal_adaptations: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FollowupSchedule {
    pub frequency: String,
    pub next_visit: Option<String>,
    pub assessments_required: Vec<String>,
    pub lab_tests: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Treatment {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub assessment_id: Option<Uuid>,
    pub created_at: NaiveDateTime,
    pub physician_id: Option<String>,
    pub primary_ayurvedic_diagnosis: Option<String>,
    pub secondary_ayurvedic_diagnoses: Vec<String>,
    pub icd11_diagnoses: Vec<String>,
    pub shamana_therapy: Option<ShamanaTherapy>,
    pub shodhana_therapy: Option<ShodhanaTherapy>,
    pub rasayana_plan: Option<RasayanaPlan>,
    pub diet_plan: Option<DietPlan>,
    pub lifestyle_recommendations: Option<LifestyleRecommendations>,
    pub followup_schedule: Option<FollowupSchedule>,
    pub status: TreatmentStatus,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NewTreatment {
    pub assessment_id: Option<Uuid>,
    pub physician_id: Option<String>,
    pub primary_ayurvedic_diagnosis: Option<String>,
    pub secondary_ayurvedic_diagnoses: Vec<String>,
    pub icd11_diagnoses: Vec<String>,
    pub shamana_therapy: Option<ShamanaTherapy>,
    pub shodhana_therapy: Option<ShodhanaTherapy>,
    pub rasayana_plan: Option<RasayanaPlan>,
    pub diet_plan: Option<DietPlan>,
    pub lifestyle_recommendations: Option<LifestyleRecommendations>,
    pub followup_schedule: Option<FollowupSchedule>,
    pub status: TreatmentStatus,
}

impl Treatment {
    pub fn from_new(
        new: NewTreatment,
        id: Uuid,
        patient_id: Uuid,
        created_at: NaiveDateTime,
    ) -> Self {
        Self {
            id,
            patient_id,
            assessment_id: new.assessment_id,
            created_at,
            physician_id: new.physician_id,
            primary_ayurvedic_diagnosis: new.primary_ayurvedic_diagnosis,
            secondary_ayurvedic_diagnoses: new.secondary_ayurvedic_diagnoses,
            icd11_diagnoses: new.icd11_diagnoses,
            shamana_therapy: new.shamana_therapy,
            shodhana_therapy: new.shodhana_therapy,
            rasayana_plan: new.rasayana_plan,
            diet_plan: new.diet_plan,
            lifestyle_recommendations: new.lifestyle_recommendations,
            followup_schedule: new.followup_schedule,
            status: new.status,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == TreatmentStatus::Active
    }
}
