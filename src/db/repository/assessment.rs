use rusqlite::{params, Connection, Row};
use uuid::Uuid;

use super::{
    ensure_patient_exists, format_timestamp, from_json_list, map_write_error, now,
    parse_timestamp, parse_uuid, to_json,
};
use crate::db::DatabaseError;
use crate::models::*;

const ASSESSMENT_COLUMNS: &str = "id, patient_id, created_at, assessor_id,
     prakriti_vata, prakriti_pitta, prakriti_kapha, vikriti_vata, vikriti_pitta, vikriti_kapha,
     nadi_pariksha, jihva_pariksha, akriti_pariksha, icd11_codes, notes";

pub fn insert_assessment(conn: &Connection, assessment: &Assessment) -> Result<(), DatabaseError> {
    ensure_patient_exists(conn, &assessment.patient_id)?;
    conn.execute(
        "INSERT INTO assessments (id, patient_id, created_at, assessor_id,
         prakriti_vata, prakriti_pitta, prakriti_kapha, vikriti_vata, vikriti_pitta, vikriti_kapha,
         nadi_pariksha, jihva_pariksha, akriti_pariksha, icd11_codes, notes)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
        params![
            assessment.id.to_string(),
            assessment.patient_id.to_string(),
            format_timestamp(&assessment.created_at),
            assessment.assessor_id,
            assessment.prakriti.vata,
            assessment.prakriti.pitta,
            assessment.prakriti.kapha,
            assessment.vikriti.vata,
            assessment.vikriti.pitta,
            assessment.vikriti.kapha,
            assessment.nadi_pariksha,
            assessment.jihva_pariksha,
            assessment.akriti_pariksha,
            to_json(&assessment.icd11_codes)?,
            assessment.notes,
        ],
    )
    .map_err(map_write_error)?;
    Ok(())
}

pub fn create_assessment(
    conn: &Connection,
    patient_id: &Uuid,
    new: NewAssessment,
) -> Result<Assessment, DatabaseError> {
    let assessment = Assessment::from_new(new, Uuid::new_v4(), *patient_id, now());
    insert_assessment(conn, &assessment)?;
    tracing::info!(patient_id = %patient_id, assessment_id = %assessment.id, "Assessment recorded");
    Ok(assessment)
}

/// Record several assessments, possibly for different patients, atomically.
pub fn bulk_create_assessments(
    conn: &Connection,
    batch: Vec<(Uuid, NewAssessment)>,
) -> Result<Vec<Assessment>, DatabaseError> {
    let tx = conn.unchecked_transaction()?;
    let created_at = now();
    let mut created = Vec::with_capacity(batch.len());
    for (patient_id, new) in batch {
        let assessment = Assessment::from_new(new, Uuid::new_v4(), patient_id, created_at);
        insert_assessment(&tx, &assessment)?;
        created.push(assessment);
    }
    tx.commit()?;
    tracing::info!(count = created.len(), "Bulk assessment import committed");
    Ok(created)
}

/// All assessments for a patient, newest first.
pub fn list_assessments(conn: &Connection, patient_id: &Uuid) -> Result<Vec<Assessment>, DatabaseError> {
    let sql = format!(
        "SELECT {ASSESSMENT_COLUMNS} FROM assessments
         WHERE patient_id = ?1 ORDER BY created_at DESC, rowid DESC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![patient_id.to_string()], read_assessment_row)?;

    let mut assessments = Vec::new();
    for row in rows {
        assessments.push(assessment_from_row(row?)?);
    }
    Ok(assessments)
}

/// Most recent assessment for a patient, if any.
pub fn latest_assessment(
    conn: &Connection,
    patient_id: &Uuid,
) -> Result<Option<Assessment>, DatabaseError> {
    let sql = format!(
        "SELECT {ASSESSMENT_COLUMNS} FROM assessments
         WHERE patient_id = ?1 ORDER BY created_at DESC, rowid DESC LIMIT 1"
    );
    match conn.query_row(&sql, params![patient_id.to_string()], read_assessment_row) {
        Ok(row) => Ok(Some(assessment_from_row(row)?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

// Internal row type for Assessment mapping
pub(super) struct AssessmentRow {
    id: String,
    patient_id: String,
    created_at: String,
    assessor_id: Option<String>,
    scores: [u32; 6],
    nadi_pariksha: Option<String>,
    jihva_pariksha: Option<String>,
    akriti_pariksha: Option<String>,
    icd11_codes: Option<String>,
    notes: Option<String>,
}

/// Reads the `ASSESSMENT_COLUMNS` projection starting at column `offset`.
pub(super) fn read_assessment_row_at(row: &Row<'_>, offset: usize) -> rusqlite::Result<AssessmentRow> {
    let mut scores = [0u32; 6];
    for (i, score) in scores.iter_mut().enumerate() {
        *score = row.get(offset + 4 + i)?;
    }
    Ok(AssessmentRow {
        id: row.get(offset)?,
        patient_id: row.get(offset + 1)?,
        created_at: row.get(offset + 2)?,
        assessor_id: row.get(offset + 3)?,
        scores,
        nadi_pariksha: row.get(offset + 10)?,
        jihva_pariksha: row.get(offset + 11)?,
        akriti_pariksha: row.get(offset + 12)?,
        icd11_codes: row.get(offset + 13)?,
        notes: row.get(offset + 14)?,
    })
}

fn read_assessment_row(row: &Row<'_>) -> rusqlite::Result<AssessmentRow> {
    read_assessment_row_at(row, 0)
}

pub(super) fn assessment_from_row(row: AssessmentRow) -> Result<Assessment, DatabaseError> {
    let [pv, pp, pk, vv, vp, vk] = row.scores;
    Ok(Assessment {
        id: parse_uuid(&row.id)?,
        patient_id: parse_uuid(&row.patient_id)?,
        created_at: parse_timestamp(&row.created_at)?,
        assessor_id: row.assessor_id,
        prakriti: DoshaScores::new(pv, pp, pk),
        vikriti: DoshaScores::new(vv, vp, vk),
        nadi_pariksha: row.nadi_pariksha,
        jihva_pariksha: row.jihva_pariksha,
        akriti_pariksha: row.akriti_pariksha,
        icd11_codes: from_json_list(row.icd11_codes)?,
        notes: row.notes,
    })
}
