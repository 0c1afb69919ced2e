//! Reference catalogs: ICD-11 to Ayurvedic disease mappings and herbs.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::assessment::DoshaScores;
use super::enums::{Dosha, HerbDoshaEffect, InteractionSeverity, Virya};

/// Chapter references in the classical texts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassicalReferences {
    pub charaka: Option<String>,
    pub sushruta: Option<String>,
    pub vagbhata: Option<String>,
    pub madhava: Option<String>,
    pub bhavaprakash: Option<String>,
    pub yogaratnakara: Option<String>,
    pub ashtanga: Option<String>,
}

/// Modern investigations that correlate with the condition, test → finding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabCorrelations {
    pub blood_tests: BTreeMap<String, String>,
    pub imaging: BTreeMap<String, String>,
    pub other_investigations: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiseaseMapping {
    pub id: Uuid,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
    pub icd11_code: String,
    pub icd11_name: String,
    pub ayurvedic_name: String,
    pub ayurvedic_synonyms: Vec<String>,
    /// Pathogenesis.
    pub samprapti: Option<String>,
    pub dosha_involvement: DoshaScores,
    pub primary_dosha: Dosha,
    pub classical_references: Option<ClassicalReferences>,
    pub severity_classification: Option<String>,
    pub modern_lab_correlations: Option<LabCorrelations>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDiseaseMapping {
    pub icd11_code: String,
    pub icd11_name: String,
    pub ayurvedic_name: String,
    pub primary_dosha: Dosha,
    #[serde(default)]
    pub ayurvedic_synonyms: Vec<String>,
    #[serde(default)]
    pub samprapti: Option<String>,
    #[serde(default)]
    pub dosha_involvement: DoshaScores,
    #[serde(default)]
    pub classical_references: Option<ClassicalReferences>,
    #[serde(default)]
    pub severity_classification: Option<String>,
    #[serde(default)]
    pub modern_lab_correlations: Option<LabCorrelations>,
}

impl DiseaseMapping {
    pub fn from_new(new: NewDiseaseMapping, id: Uuid, created_at: NaiveDateTime) -> Self {
        Self {
            id,
            created_at,
            updated_at: None,
            icd11_code: new.icd11_code.trim().to_string(),
            icd11_name: new.icd11_name,
            ayurvedic_name: new.ayurvedic_name,
            ayurvedic_synonyms: new.ayurvedic_synonyms,
            samprapti: new.samprapti,
            dosha_involvement: new.dosha_involvement,
            primary_dosha: new.primary_dosha,
            classical_references: new.classical_references,
            severity_classification: new.severity_classification,
            modern_lab_correlations: new.modern_lab_correlations,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrugInteraction {
    pub drug_class: String,
    pub effect: String,
    pub severity: InteractionSeverity,
    #[serde(default)]
    pub recommendations: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AyurvedicHerb {
    pub id: Uuid,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
    pub sanskrit_name: String,
    pub hindi_name: Option<String>,
    pub malayalam_name: Option<String>,
    pub common_name: Option<String>,
    pub latin_name: Option<String>,
    pub primary_dosha_effect: HerbDoshaEffect,
    pub secondary_effects: Option<serde_json::Value>,
    /// Tastes.
    pub rasa: Vec<String>,
    /// Potency.
    pub virya: Option<Virya>,
    /// Post-digestive effect.
    pub vipaka: Option<String>,
    pub prabhava: Option<String>,
    pub indications: Vec<String>,
    pub contraindications: Vec<String>,
    pub modern_research: Option<serde_json::Value>,
    pub standard_dosage: Option<String>,
    pub herb_drug_interactions: Vec<DrugInteraction>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAyurvedicHerb {
    pub sanskrit_name: String,
    pub primary_dosha_effect: HerbDoshaEffect,
    #[serde(default)]
    pub hindi_name: Option<String>,
    #[serde(default)]
    pub malayalam_name: Option<String>,
    #[serde(default)]
    pub common_name: Option<String>,
    #[serde(default)]
    pub latin_name: Option<String>,
    #[serde(default)]
    pub secondary_effects: Option<serde_json::Value>,
    #[serde(default)]
    pub rasa: Vec<String>,
    #[serde(default)]
    pub virya: Option<Virya>,
    #[serde(default)]
    pub vipaka: Option<String>,
    #[serde(default)]
    pub prabhava: Option<String>,
    #[serde(default)]
    pub indications: Vec<String>,
    #[serde(default)]
    pub contraindications: Vec<String>,
    #[serde(default)]
    pub modern_research: Option<serde_json::Value>,
    #[serde(default)]
    pub standard_dosage: Option<String>,
    #[serde(default)]
    pub herb_drug_interactions: Vec<DrugInteraction>,
}

impl AyurvedicHerb {
    pub fn from_new(new: NewAyurvedicHerb, id: Uuid, created_at: NaiveDateTime) -> Self {
        Self {
            id,
            created_at,
            updated_at: None,
            sanskrit_name: new.sanskrit_name.trim().to_string(),
            hindi_name: new.hindi_name,
            malayalam_name: new.malayalam_name,
            common_name: new.common_name,
            latin_name: new.latin_name,
            primary_dosha_effect: new.primary_dosha_effect,
            secondary_effects: new.secondary_effects,
            rasa: new.rasa,
            virya: new.virya,
            vipaka: new.vipaka,
            prabhava: new.prabhava,
            indications: new.indications,
            contraindications: new.contraindications,
            modern_research: new.modern_research,
            standard_dosage: new.standard_dosage,
            herb_drug_interactions: new.herb_drug_interactions,
        }
    }
}

/// Compact herb row returned by indication search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HerbSearchResult {
    pub sanskrit_name: String,
    pub hindi_name: Option<String>,
    pub malayalam_name: Option<String>,
    pub common_name: Option<String>,
    pub primary_dosha_effect: HerbDoshaEffect,
    pub indications: Vec<String>,
    pub contraindications: Vec<String>,
}

impl From<AyurvedicHerb> for HerbSearchResult {
    fn from(herb: AyurvedicHerb) -> Self {
        Self {
            sanskrit_name: herb.sanskrit_name,
            hindi_name: herb.hindi_name,
            malayalam_name: herb.malayalam_name,
            common_name: herb.common_name,
            primary_dosha_effect: herb.primary_dosha_effect,
            indications: herb.indications,
            contraindications: herb.contraindications,
        }
    }
}
