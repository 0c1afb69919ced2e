//! Reference catalogs: disease mappings and herbs.
//!
//! Listings are alphabetical. Substring searches match case-insensitively;
//! full-text searches go through the FTS5 indexes and come back by rank.
//! A blank query finds nothing.

use std::str::FromStr;

use rusqlite::{params, Connection, Row};
use uuid::Uuid;

use super::{
    escape_like, format_timestamp, from_json, from_json_list, map_write_error, now,
    parse_timestamp, parse_uuid, to_json, to_optional_json,
};
use crate::db::DatabaseError;
use crate::models::*;

/// Rows returned by catalog searches.
pub const CATALOG_SEARCH_LIMIT: u32 = 20;

const DISEASE_COLUMNS: &str = "d.id, d.created_at, d.updated_at, d.icd11_code, d.icd11_name,
     d.ayurvedic_name, d.ayurvedic_synonyms, d.samprapti, d.dosha_vata, d.dosha_pitta,
     d.dosha_kapha, d.primary_dosha, d.classical_references, d.severity_classification,
     d.modern_lab_correlations";

const HERB_COLUMNS: &str = "h.id, h.created_at, h.updated_at, h.sanskrit_name, h.hindi_name,
     h.malayalam_name, h.common_name, h.latin_name, h.primary_dosha_effect, h.secondary_effects,
     h.rasa, h.virya, h.vipaka, h.prabhava, h.indications, h.contraindications,
     h.modern_research, h.standard_dosage, h.herb_drug_interactions";

// ═══════════════════════════════════════════════════════════
// Disease mappings
// ═══════════════════════════════════════════════════════════

pub fn insert_disease_mapping(conn: &Connection, disease: &DiseaseMapping) -> Result<(), DatabaseError> {
    if disease.icd11_code.trim().is_empty() {
        return Err(DatabaseError::InvalidInput("ICD-11 code is required".into()));
    }
    if disease.icd11_name.trim().is_empty() || disease.ayurvedic_name.trim().is_empty() {
        return Err(DatabaseError::InvalidInput(
            "ICD-11 name and Ayurvedic name are required".into(),
        ));
    }
    conn.execute(
        "INSERT INTO disease_mappings (id, created_at, updated_at, icd11_code, icd11_name,
         ayurvedic_name, ayurvedic_synonyms, samprapti, dosha_vata, dosha_pitta, dosha_kapha,
         primary_dosha, classical_references, severity_classification, modern_lab_correlations)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
        params![
            disease.id.to_string(),
            format_timestamp(&disease.created_at),
            disease.updated_at.as_ref().map(format_timestamp),
            disease.icd11_code.trim(),
            disease.icd11_name.trim(),
            disease.ayurvedic_name.trim(),
            to_json(&disease.ayurvedic_synonyms)?,
            disease.samprapti,
            disease.dosha_involvement.vata,
            disease.dosha_involvement.pitta,
            disease.dosha_involvement.kapha,
            disease.primary_dosha.as_str(),
            to_optional_json(disease.classical_references.as_ref())?,
            disease.severity_classification,
            to_optional_json(disease.modern_lab_correlations.as_ref())?,
        ],
    )
    .map_err(map_write_error)?;
    Ok(())
}

/// Add a disease mapping to the catalog. A duplicate ICD-11 code is a
/// `ConstraintViolation`.
pub fn create_disease_mapping(
    conn: &Connection,
    new: NewDiseaseMapping,
) -> Result<DiseaseMapping, DatabaseError> {
    let disease = DiseaseMapping::from_new(new, Uuid::new_v4(), now());
    insert_disease_mapping(conn, &disease)?;
    tracing::info!(icd11_code = %disease.icd11_code, "Disease mapping added");
    Ok(disease)
}

/// Every mapping, ordered by ICD-11 name.
pub fn list_disease_mappings(conn: &Connection) -> Result<Vec<DiseaseMapping>, DatabaseError> {
    let sql = format!(
        "SELECT {DISEASE_COLUMNS} FROM disease_mappings d
         ORDER BY d.icd11_name COLLATE NOCASE, d.icd11_code"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], read_disease_row)?;
    collect_diseases(rows)
}

/// Substring match on the ICD-11 name or the Ayurvedic name.
pub fn search_disease_mappings(
    conn: &Connection,
    query: &str,
) -> Result<Vec<DiseaseMapping>, DatabaseError> {
    let query = query.trim();
    if query.is_empty() {
        return Ok(Vec::new());
    }
    let pattern = format!("%{}%", escape_like(query));
    let sql = format!(
        "SELECT {DISEASE_COLUMNS} FROM disease_mappings d
         WHERE d.icd11_name LIKE ?1 ESCAPE '\\' OR d.ayurvedic_name LIKE ?1 ESCAPE '\\'
         ORDER BY d.icd11_name COLLATE NOCASE LIMIT ?2"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![pattern, CATALOG_SEARCH_LIMIT], read_disease_row)?;
    collect_diseases(rows)
}

/// Exact lookup by ICD-11 code.
pub fn get_disease_by_icd11(
    conn: &Connection,
    icd11_code: &str,
) -> Result<Option<DiseaseMapping>, DatabaseError> {
    let sql = format!("SELECT {DISEASE_COLUMNS} FROM disease_mappings d WHERE d.icd11_code = ?1");
    let result = conn.query_row(&sql, params![icd11_code.trim()], read_disease_row);

    match result {
        Ok(row) => Ok(Some(disease_from_row(row)?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Ranked full-text search over names, synonyms and pathogenesis.
pub fn full_text_search_diseases(
    conn: &Connection,
    query: &str,
) -> Result<Vec<DiseaseMapping>, DatabaseError> {
    let sanitized = sanitize_fts_query(query);
    if sanitized.is_empty() {
        return Ok(Vec::new());
    }
    let sql = format!(
        "SELECT {DISEASE_COLUMNS} FROM diseases_fts
         JOIN disease_mappings d ON d.rowid = diseases_fts.rowid
         WHERE diseases_fts MATCH ?1
         ORDER BY rank LIMIT ?2"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![sanitized, CATALOG_SEARCH_LIMIT], read_disease_row)?;
    collect_diseases(rows)
}

// ═══════════════════════════════════════════════════════════
// Herbs
// ═══════════════════════════════════════════════════════════

pub fn insert_herb(conn: &Connection, herb: &AyurvedicHerb) -> Result<(), DatabaseError> {
    if herb.sanskrit_name.trim().is_empty() {
        return Err(DatabaseError::InvalidInput("Sanskrit name is required".into()));
    }
    conn.execute(
        "INSERT INTO ayurvedic_herbs (id, created_at, updated_at, sanskrit_name, hindi_name,
         malayalam_name, common_name, latin_name, primary_dosha_effect, secondary_effects,
         rasa, virya, vipaka, prabhava, indications, contraindications, modern_research,
         standard_dosage, herb_drug_interactions)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19)",
        params![
            herb.id.to_string(),
            format_timestamp(&herb.created_at),
            herb.updated_at.as_ref().map(format_timestamp),
            herb.sanskrit_name.trim(),
            herb.hindi_name,
            herb.malayalam_name,
            herb.common_name,
            herb.latin_name,
            herb.primary_dosha_effect.as_str(),
            to_optional_json(herb.secondary_effects.as_ref())?,
            to_json(&herb.rasa)?,
            herb.virya.map(|v| v.as_str()),
            herb.vipaka,
            herb.prabhava,
            to_json(&herb.indications)?,
            to_json(&herb.contraindications)?,
            to_optional_json(herb.modern_research.as_ref())?,
            herb.standard_dosage,
            to_json(&herb.herb_drug_interactions)?,
        ],
    )
    .map_err(map_write_error)?;
    Ok(())
}

/// Add a herb to the catalog. A duplicate Sanskrit name is a
/// `ConstraintViolation`.
pub fn create_herb(conn: &Connection, new: NewAyurvedicHerb) -> Result<AyurvedicHerb, DatabaseError> {
    let herb = AyurvedicHerb::from_new(new, Uuid::new_v4(), now());
    insert_herb(conn, &herb)?;
    tracing::info!(herb = %herb.sanskrit_name, "Herb added");
    Ok(herb)
}

/// Every herb, ordered by Sanskrit name.
pub fn list_herbs(conn: &Connection) -> Result<Vec<AyurvedicHerb>, DatabaseError> {
    let sql = format!(
        "SELECT {HERB_COLUMNS} FROM ayurvedic_herbs h ORDER BY h.sanskrit_name COLLATE NOCASE"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], read_herb_row)?;
    collect_herbs(rows)
}

/// Substring match on the Sanskrit, Hindi or common name.
pub fn search_herbs(conn: &Connection, query: &str) -> Result<Vec<AyurvedicHerb>, DatabaseError> {
    let query = query.trim();
    if query.is_empty() {
        return Ok(Vec::new());
    }
    let pattern = format!("%{}%", escape_like(query));
    let sql = format!(
        "SELECT {HERB_COLUMNS} FROM ayurvedic_herbs h
         WHERE h.sanskrit_name LIKE ?1 ESCAPE '\\'
            OR h.hindi_name LIKE ?1 ESCAPE '\\'
            OR h.common_name LIKE ?1 ESCAPE '\\'
         ORDER BY h.sanskrit_name COLLATE NOCASE LIMIT ?2"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![pattern, CATALOG_SEARCH_LIMIT], read_herb_row)?;
    collect_herbs(rows)
}

/// Herbs with at least one indication containing `indication`.
pub fn search_herbs_by_indication(
    conn: &Connection,
    indication: &str,
) -> Result<Vec<HerbSearchResult>, DatabaseError> {
    let indication = indication.trim();
    if indication.is_empty() {
        return Ok(Vec::new());
    }
    let pattern = format!("%{}%", escape_like(indication));
    let sql = format!(
        "SELECT {HERB_COLUMNS} FROM ayurvedic_herbs h
         WHERE EXISTS (
             SELECT 1 FROM json_each(h.indications) i WHERE i.value LIKE ?1 ESCAPE '\\'
         )
         ORDER BY h.sanskrit_name COLLATE NOCASE"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![pattern], read_herb_row)?;
    Ok(collect_herbs(rows)?
        .into_iter()
        .map(HerbSearchResult::from)
        .collect())
}

/// Herbs whose primary action is exactly `effect`, ordered by Sanskrit name.
pub fn get_herbs_by_dosha(
    conn: &Connection,
    effect: HerbDoshaEffect,
) -> Result<Vec<AyurvedicHerb>, DatabaseError> {
    let sql = format!(
        "SELECT {HERB_COLUMNS} FROM ayurvedic_herbs h
         WHERE h.primary_dosha_effect = ?1
         ORDER BY h.sanskrit_name COLLATE NOCASE"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![effect.as_str()], read_herb_row)?;
    collect_herbs(rows)
}

/// Ranked full-text search over names and indications.
pub fn full_text_search_herbs(
    conn: &Connection,
    query: &str,
) -> Result<Vec<AyurvedicHerb>, DatabaseError> {
    let sanitized = sanitize_fts_query(query);
    if sanitized.is_empty() {
        return Ok(Vec::new());
    }
    let sql = format!(
        "SELECT {HERB_COLUMNS} FROM herbs_fts
         JOIN ayurvedic_herbs h ON h.rowid = herbs_fts.rowid
         WHERE herbs_fts MATCH ?1
         ORDER BY rank LIMIT ?2"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![sanitized, CATALOG_SEARCH_LIMIT], read_herb_row)?;
    collect_herbs(rows)
}

/// Turn free text into an FTS5 query: operators stripped, each term quoted
/// and prefix-matched.
fn sanitize_fts_query(query: &str) -> String {
    let cleaned: String = query
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == '-' || *c == '\'')
        .collect();

    cleaned
        .split_whitespace()
        .map(|w| format!("\"{w}\"*"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn parse_optional_timestamp(raw: Option<String>) -> Result<Option<chrono::NaiveDateTime>, DatabaseError> {
    raw.as_deref().map(parse_timestamp).transpose()
}

// Internal row type for DiseaseMapping mapping
struct DiseaseRow {
    id: String,
    created_at: String,
    updated_at: Option<String>,
    icd11_code: String,
    icd11_name: String,
    ayurvedic_name: String,
    ayurvedic_synonyms: Option<String>,
    samprapti: Option<String>,
    dosha_vata: u32,
    dosha_pitta: u32,
    dosha_kapha: u32,
    primary_dosha: String,
    classical_references: Option<String>,
    severity_classification: Option<String>,
    modern_lab_correlations: Option<String>,
}

fn read_disease_row(row: &Row<'_>) -> rusqlite::Result<DiseaseRow> {
    Ok(DiseaseRow {
        id: row.get(0)?,
        created_at: row.get(1)?,
        updated_at: row.get(2)?,
        icd11_code: row.get(3)?,
        icd11_name: row.get(4)?,
        ayurvedic_name: row.get(5)?,
        ayurvedic_synonyms: row.get(6)?,
        samprapti: row.get(7)?,
        dosha_vata: row.get(8)?,
        dosha_pitta: row.get(9)?,
        dosha_kapha: row.get(10)?,
        primary_dosha: row.get(11)?,
        classical_references: row.get(12)?,
        severity_classification: row.get(13)?,
        modern_lab_correlations: row.get(14)?,
    })
}

fn collect_diseases(
    rows: rusqlite::MappedRows<'_, impl FnMut(&Row<'_>) -> rusqlite::Result<DiseaseRow>>,
) -> Result<Vec<DiseaseMapping>, DatabaseError> {
    let mut diseases = Vec::new();
    for row in rows {
        diseases.push(disease_from_row(row?)?);
    }
    Ok(diseases)
}

fn disease_from_row(row: DiseaseRow) -> Result<DiseaseMapping, DatabaseError> {
    Ok(DiseaseMapping {
        id: parse_uuid(&row.id)?,
        created_at: parse_timestamp(&row.created_at)?,
        updated_at: parse_optional_timestamp(row.updated_at)?,
        icd11_code: row.icd11_code,
        icd11_name: row.icd11_name,
        ayurvedic_name: row.ayurvedic_name,
        ayurvedic_synonyms: from_json_list(row.ayurvedic_synonyms)?,
        samprapti: row.samprapti,
        dosha_involvement: DoshaScores::new(row.dosha_vata, row.dosha_pitta, row.dosha_kapha),
        primary_dosha: Dosha::from_str(&row.primary_dosha)?,
        classical_references: from_json(row.classical_references)?,
        severity_classification: row.severity_classification,
        modern_lab_correlations: from_json(row.modern_lab_correlations)?,
    })
}

// Internal row type for AyurvedicHerb mapping
struct HerbRow {
    id: String,
    created_at: String,
    updated_at: Option<String>,
    sanskrit_name: String,
    hindi_name: Option<String>,
    malayalam_name: Option<String>,
    common_name: Option<String>,
    latin_name: Option<String>,
    primary_dosha_effect: String,
    secondary_effects: Option<String>,
    rasa: Option<String>,
    virya: Option<String>,
    vipaka: Option<String>,
    prabhava: Option<String>,
    indications: Option<String>,
    contraindications: Option<String>,
    modern_research: Option<String>,
    standard_dosage: Option<String>,
    herb_drug_interactions: Option<String>,
}

fn read_herb_row(row: &Row<'_>) -> rusqlite::Result<HerbRow> {
    Ok(HerbRow {
        id: row.get(0)?,
        created_at: row.get(1)?,
        updated_at: row.get(2)?,
        sanskrit_name: row.get(3)?,
        hindi_name: row.get(4)?,
        malayalam_name: row.get(5)?,
        common_name: row.get(6)?,
        latin_name: row.get(7)?,
        primary_dosha_effect: row.get(8)?,
        secondary_effects: row.get(9)?,
        rasa: row.get(10)?,
        virya: row.get(11)?,
        vipaka: row.get(12)?,
        prabhava: row.get(13)?,
        indications: row.get(14)?,
        contraindications: row.get(15)?,
        modern_research: row.get(16)?,
        standard_dosage: row.get(17)?,
        herb_drug_interactions: row.get(18)?,
    })
}

fn collect_herbs(
    rows: rusqlite::MappedRows<'_, impl FnMut(&Row<'_>) -> rusqlite::Result<HerbRow>>,
) -> Result<Vec<AyurvedicHerb>, DatabaseError> {
    let mut herbs = Vec::new();
    for row in rows {
        herbs.push(herb_from_row(row?)?);
    }
    Ok(herbs)
}

fn herb_from_row(row: HerbRow) -> Result<AyurvedicHerb, DatabaseError> {
    Ok(AyurvedicHerb {
        id: parse_uuid(&row.id)?,
        created_at: parse_timestamp(&row.created_at)?,
        updated_at: parse_optional_timestamp(row.updated_at)?,
        sanskrit_name: row.sanskrit_name,
        hindi_name: row.hindi_name,
        malayalam_name: row.malayalam_name,
        common_name: row.common_name,
        latin_name: row.latin_name,
        primary_dosha_effect: HerbDoshaEffect::from_str(&row.primary_dosha_effect)?,
        secondary_effects: from_json(row.secondary_effects)?,
        rasa: from_json_list(row.rasa)?,
        virya: row.virya.as_deref().map(Virya::from_str).transpose()?,
        vipaka: row.vipaka,
        prabhava: row.prabhava,
        indications: from_json_list(row.indications)?,
        contraindications: from_json_list(row.contraindications)?,
        modern_research: from_json(row.modern_research)?,
        standard_dosage: row.standard_dosage,
        herb_drug_interactions: from_json::<Vec<DrugInteraction>>(row.herb_drug_interactions)?
            .unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::open_memory_database;

    fn disease(code: &str, icd11_name: &str, ayurvedic_name: &str, primary: Dosha) -> NewDiseaseMapping {
        NewDiseaseMapping {
            icd11_code: code.into(),
            icd11_name: icd11_name.into(),
            ayurvedic_name: ayurvedic_name.into(),
            primary_dosha: primary,
            ayurvedic_synonyms: Vec::new(),
            samprapti: None,
            dosha_involvement: DoshaScores::default(),
            classical_references: None,
            severity_classification: None,
            modern_lab_correlations: None,
        }
    }

    fn herb(sanskrit: &str, common: &str, effect: HerbDoshaEffect, indications: &[&str]) -> NewAyurvedicHerb {
        NewAyurvedicHerb {
            sanskrit_name: sanskrit.into(),
            primary_dosha_effect: effect,
            hindi_name: None,
            malayalam_name: None,
            common_name: Some(common.into()),
            latin_name: None,
            secondary_effects: None,
            rasa: Vec::new(),
            virya: None,
            vipaka: None,
            prabhava: None,
            indications: indications.iter().map(|s| s.to_string()).collect(),
            contraindications: Vec::new(),
            modern_research: None,
            standard_dosage: None,
            herb_drug_interactions: Vec::new(),
        }
    }

    fn seed_diseases(conn: &Connection) {
        let mut amavata = disease("FA20", "Rheumatoid arthritis", "Amavata", Dosha::Vata);
        amavata.ayurvedic_synonyms = vec!["Ama vata".into()];
        amavata.samprapti = Some("Ama lodges in the joints with vitiated vata".into());
        create_disease_mapping(conn, amavata).unwrap();
        create_disease_mapping(conn, disease("5A11", "Type 2 diabetes mellitus", "Madhumeha", Dosha::Kapha))
            .unwrap();
        create_disease_mapping(conn, disease("DA63", "Gastric ulcer", "Parinama shula", Dosha::Pitta))
            .unwrap();
    }

    fn seed_herbs(conn: &Connection) {
        let mut ashwagandha = herb(
            "Ashwagandha",
            "Winter cherry",
            HerbDoshaEffect::VataKapha,
            &["Insomnia", "Fatigue", "Joint pain"],
        );
        ashwagandha.hindi_name = Some("Asgandh".into());
        ashwagandha.latin_name = Some("Withania somnifera".into());
        ashwagandha.virya = Some(Virya::Ushna);
        ashwagandha.herb_drug_interactions = vec![DrugInteraction {
            drug_class: "Sedatives".into(),
            effect: "Additive sedation".into(),
            severity: InteractionSeverity::Moderate,
            recommendations: None,
        }];
        create_herb(conn, ashwagandha).unwrap();
        create_herb(
            conn,
            herb("Guduchi", "Heart-leaved moonseed", HerbDoshaEffect::Tridoshic, &["Fever", "Gout"]),
        )
        .unwrap();
        create_herb(
            conn,
            herb("Amalaki", "Indian gooseberry", HerbDoshaEffect::Tridoshic, &["Acidity"]),
        )
        .unwrap();
    }

    #[test]
    fn disease_round_trip_preserves_nested_fields() {
        let conn = open_memory_database().unwrap();
        let mut new = disease("FA20", "Rheumatoid arthritis", "Amavata", Dosha::Vata);
        new.dosha_involvement = DoshaScores::new(3, 1, 2);
        new.classical_references = Some(ClassicalReferences {
            madhava: Some("Madhava Nidana 25".into()),
            ..Default::default()
        });
        let created = create_disease_mapping(&conn, new).unwrap();

        let fetched = get_disease_by_icd11(&conn, "FA20").unwrap().unwrap();
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.dosha_involvement, DoshaScores::new(3, 1, 2));
        assert_eq!(fetched.primary_dosha, Dosha::Vata);
        assert_eq!(
            fetched.classical_references.unwrap().madhava.as_deref(),
            Some("Madhava Nidana 25")
        );
        assert!(fetched.updated_at.is_none());
    }

    #[test]
    fn unknown_icd11_code_is_none() {
        let conn = open_memory_database().unwrap();
        seed_diseases(&conn);
        assert!(get_disease_by_icd11(&conn, "XX99").unwrap().is_none());
    }

    #[test]
    fn duplicate_icd11_code_is_constraint_violation() {
        let conn = open_memory_database().unwrap();
        seed_diseases(&conn);
        let err = create_disease_mapping(&conn, disease("FA20", "Other", "Other", Dosha::Vata))
            .unwrap_err();
        assert!(matches!(err, DatabaseError::ConstraintViolation(_)));
    }

    #[test]
    fn blank_icd11_code_is_rejected() {
        let conn = open_memory_database().unwrap();
        let err = create_disease_mapping(&conn, disease("  ", "Fever", "Jwara", Dosha::Pitta))
            .unwrap_err();
        assert!(matches!(err, DatabaseError::InvalidInput(_)));
    }

    #[test]
    fn diseases_listed_by_icd11_name() {
        let conn = open_memory_database().unwrap();
        seed_diseases(&conn);
        let names: Vec<String> = list_disease_mappings(&conn)
            .unwrap()
            .into_iter()
            .map(|d| d.icd11_name)
            .collect();
        assert_eq!(
            names,
            vec!["Gastric ulcer", "Rheumatoid arthritis", "Type 2 diabetes mellitus"]
        );
    }

    #[test]
    fn disease_search_matches_either_name() {
        let conn = open_memory_database().unwrap();
        seed_diseases(&conn);
        assert_eq!(search_disease_mappings(&conn, "arthritis").unwrap()[0].icd11_code, "FA20");
        assert_eq!(search_disease_mappings(&conn, "MADHU").unwrap()[0].icd11_code, "5A11");
        assert!(search_disease_mappings(&conn, "%").unwrap().is_empty());
        assert!(search_disease_mappings(&conn, "  ").unwrap().is_empty());
    }

    #[test]
    fn disease_search_is_capped() {
        let conn = open_memory_database().unwrap();
        for i in 0..25 {
            create_disease_mapping(
                &conn,
                disease(&format!("X{i:02}"), &format!("Fever type {i}"), "Jwara", Dosha::Pitta),
            )
            .unwrap();
        }
        assert_eq!(
            search_disease_mappings(&conn, "fever").unwrap().len(),
            CATALOG_SEARCH_LIMIT as usize
        );
        assert_eq!(
            full_text_search_diseases(&conn, "fever").unwrap().len(),
            CATALOG_SEARCH_LIMIT as usize
        );
    }

    #[test]
    fn disease_full_text_uses_synonyms_and_pathogenesis() {
        let conn = open_memory_database().unwrap();
        seed_diseases(&conn);
        assert_eq!(full_text_search_diseases(&conn, "joints").unwrap()[0].icd11_code, "FA20");
        assert_eq!(full_text_search_diseases(&conn, "diab").unwrap()[0].icd11_code, "5A11");
        assert!(full_text_search_diseases(&conn, "migraine").unwrap().is_empty());
        assert!(full_text_search_diseases(&conn, "* ()").unwrap().is_empty());
    }

    #[test]
    fn herb_round_trip_preserves_lists() {
        let conn = open_memory_database().unwrap();
        seed_herbs(&conn);
        let herbs = list_herbs(&conn).unwrap();
        let ashwagandha = herbs.iter().find(|h| h.sanskrit_name == "Ashwagandha").unwrap();
        assert_eq!(ashwagandha.primary_dosha_effect, HerbDoshaEffect::VataKapha);
        assert_eq!(ashwagandha.virya, Some(Virya::Ushna));
        assert_eq!(ashwagandha.indications.len(), 3);
        assert_eq!(
            ashwagandha.herb_drug_interactions[0].severity,
            InteractionSeverity::Moderate
        );
    }

    #[test]
    fn herbs_listed_by_sanskrit_name() {
        let conn = open_memory_database().unwrap();
        seed_herbs(&conn);
        let names: Vec<String> = list_herbs(&conn)
            .unwrap()
            .into_iter()
            .map(|h| h.sanskrit_name)
            .collect();
        assert_eq!(names, vec!["Amalaki", "Ashwagandha", "Guduchi"]);
    }

    #[test]
    fn herb_search_matches_sanskrit_hindi_and_common_names() {
        let conn = open_memory_database().unwrap();
        seed_herbs(&conn);
        assert_eq!(search_herbs(&conn, "guduchi").unwrap().len(), 1);
        assert_eq!(search_herbs(&conn, "asgandh").unwrap()[0].sanskrit_name, "Ashwagandha");
        assert_eq!(search_herbs(&conn, "gooseberry").unwrap()[0].sanskrit_name, "Amalaki");
        // Latin name is not part of the substring search
        assert!(search_herbs(&conn, "withania").unwrap().is_empty());
    }

    #[test]
    fn indication_search_looks_inside_the_list() {
        let conn = open_memory_database().unwrap();
        seed_herbs(&conn);
        let found = search_herbs_by_indication(&conn, "pain").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].sanskrit_name, "Ashwagandha");
        assert_eq!(found[0].indications, vec!["Insomnia", "Fatigue", "Joint pain"]);
        assert!(search_herbs_by_indication(&conn, "cough").unwrap().is_empty());
    }

    #[test]
    fn herbs_by_dosha_is_exact_match() {
        let conn = open_memory_database().unwrap();
        seed_herbs(&conn);
        let tridoshic = get_herbs_by_dosha(&conn, HerbDoshaEffect::Tridoshic).unwrap();
        assert_eq!(tridoshic.len(), 2);
        assert_eq!(tridoshic[0].sanskrit_name, "Amalaki");
        assert!(get_herbs_by_dosha(&conn, HerbDoshaEffect::Vata).unwrap().is_empty());
    }

    #[test]
    fn herb_full_text_matches_prefixes_and_indications() {
        let conn = open_memory_database().unwrap();
        seed_herbs(&conn);
        assert_eq!(full_text_search_herbs(&conn, "ashwa").unwrap()[0].sanskrit_name, "Ashwagandha");
        assert_eq!(full_text_search_herbs(&conn, "withania").unwrap().len(), 1);
        assert_eq!(full_text_search_herbs(&conn, "gout").unwrap()[0].sanskrit_name, "Guduchi");
        assert!(full_text_search_herbs(&conn, "").unwrap().is_empty());
    }

    #[test]
    fn duplicate_herb_is_constraint_violation() {
        let conn = open_memory_database().unwrap();
        seed_herbs(&conn);
        let err = create_herb(&conn, herb("Guduchi", "Giloy", HerbDoshaEffect::Tridoshic, &[]))
            .unwrap_err();
        assert!(matches!(err, DatabaseError::ConstraintViolation(_)));
    }

    #[test]
    fn sanitize_fts_strips_operators() {
        assert_eq!(sanitize_fts_query("joint pain"), "\"joint\"* \"pain\"*");
        assert_eq!(sanitize_fts_query("amla*  (fever)"), "\"amla\"* \"fever\"*");
        assert_eq!(sanitize_fts_query("   "), "");
    }
}
