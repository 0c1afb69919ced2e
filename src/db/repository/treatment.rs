use std::str::FromStr;

use rusqlite::{params, Connection, Row};
use uuid::Uuid;

use super::{
    ensure_patient_exists, format_timestamp, from_json, from_json_list, map_write_error, now,
    parse_optional_uuid, parse_timestamp, parse_uuid, to_json, to_optional_json,
};
use crate::db::DatabaseError;
use crate::models::*;

const TREATMENT_COLUMNS: &str = "id, patient_id, assessment_id, created_at, physician_id,
     primary_ayurvedic_diagnosis, secondary_ayurvedic_diagnoses, icd11_diagnoses,
     shamana_therapy, shodhana_therapy, rasayana_plan, diet_plan,
     lifestyle_recommendations, followup_schedule, status";

pub fn insert_treatment(conn: &Connection, treatment: &Treatment) -> Result<(), DatabaseError> {
    ensure_patient_exists(conn, &treatment.patient_id)?;
    if let Some(assessment_id) = treatment.assessment_id {
        let owner: Option<String> = match conn.query_row(
            "SELECT patient_id FROM assessments WHERE id = ?1",
            params![assessment_id.to_string()],
            |row| row.get(0),
        ) {
            Ok(owner) => Some(owner),
            Err(rusqlite::Error::QueryReturnedNoRows) => None,
            Err(e) => return Err(e.into()),
        };
        match owner {
            None => return Err(DatabaseError::not_found("Assessment", assessment_id)),
            Some(owner) if owner != treatment.patient_id.to_string() => {
                return Err(DatabaseError::InvalidInput(format!(
                    "assessment {assessment_id} belongs to another patient"
                )));
            }
            Some(_) => {}
        }
    }

    conn.execute(
        "INSERT INTO treatments (id, patient_id, assessment_id, created_at, physician_id,
         primary_ayurvedic_diagnosis, secondary_ayurvedic_diagnoses, icd11_diagnoses,
         shamana_therapy, shodhana_therapy, rasayana_plan, diet_plan,
         lifestyle_recommendations, followup_schedule, status)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
        params![
            treatment.id.to_string(),
            treatment.patient_id.to_string(),
            treatment.assessment_id.map(|id| id.to_string()),
            format_timestamp(&treatment.created_at),
            treatment.physician_id,
            treatment.primary_ayurvedic_diagnosis,
            to_json(&treatment.secondary_ayurvedic_diagnoses)?,
            to_json(&treatment.icd11_diagnoses)?,
            to_optional_json(treatment.shamana_therapy.as_ref())?,
            to_optional_json(treatment.shodhana_therapy.as_ref())?,
            to_optional_json(treatment.rasayana_plan.as_ref())?,
            to_optional_json(treatment.diet_plan.as_ref())?,
            to_optional_json(treatment.lifestyle_recommendations.as_ref())?,
            to_optional_json(treatment.followup_schedule.as_ref())?,
            treatment.status.as_str(),
        ],
    )
    .map_err(map_write_error)?;
    Ok(())
}

pub fn create_treatment(
    conn: &Connection,
    patient_id: &Uuid,
    new: NewTreatment,
) -> Result<Treatment, DatabaseError> {
    let treatment = Treatment::from_new(new, Uuid::new_v4(), *patient_id, now());
    insert_treatment(conn, &treatment)?;
    tracing::info!(
        patient_id = %patient_id,
        treatment_id = %treatment.id,
        status = treatment.status.as_str(),
        "Treatment plan recorded"
    );
    Ok(treatment)
}

pub fn get_treatment(conn: &Connection, id: &Uuid) -> Result<Option<Treatment>, DatabaseError> {
    let sql = format!("SELECT {TREATMENT_COLUMNS} FROM treatments WHERE id = ?1");
    match conn.query_row(&sql, params![id.to_string()], read_treatment_row) {
        Ok(row) => Ok(Some(treatment_from_row(row)?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// All treatment plans for a patient, newest first.
pub fn list_treatments(conn: &Connection, patient_id: &Uuid) -> Result<Vec<Treatment>, DatabaseError> {
    let sql = format!(
        "SELECT {TREATMENT_COLUMNS} FROM treatments
         WHERE patient_id = ?1 ORDER BY created_at DESC, rowid DESC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![patient_id.to_string()], read_treatment_row)?;

    let mut treatments = Vec::new();
    for row in rows {
        treatments.push(treatment_from_row(row?)?);
    }
    Ok(treatments)
}

/// Move a treatment to `status` and return the updated record.
pub fn update_treatment_status(
    conn: &Connection,
    id: &Uuid,
    status: TreatmentStatus,
) -> Result<Treatment, DatabaseError> {
    let changed = conn
        .execute(
            "UPDATE treatments SET status = ?1 WHERE id = ?2",
            params![status.as_str(), id.to_string()],
        )
        .map_err(map_write_error)?;
    if changed == 0 {
        return Err(DatabaseError::not_found("Treatment", id));
    }
    tracing::info!(treatment_id = %id, status = status.as_str(), "Treatment status updated");
    get_treatment(conn, id)?.ok_or_else(|| DatabaseError::not_found("Treatment", id))
}

// Internal row type for Treatment mapping
struct TreatmentRow {
    id: String,
    patient_id: String,
    assessment_id: Option<String>,
    created_at: String,
    physician_id: Option<String>,
    primary_ayurvedic_diagnosis: Option<String>,
    secondary_ayurvedic_diagnoses: Option<String>,
    icd11_diagnoses: Option<String>,
    shamana_therapy: Option<String>,
    shodhana_therapy: Option<String>,
    rasayana_plan: Option<String>,
    diet_plan: Option<String>,
    lifestyle_recommendations: Option<String>,
    followup_schedule: Option<String>,
    status: String,
}

fn read_treatment_row(row: &Row<'_>) -> rusqlite::Result<TreatmentRow> {
    Ok(TreatmentRow {
        id: row.get(0)?,
        patient_id: row.get(1)?,
        assessment_id: row.get(2)?,
        created_at: row.get(3)?,
        physician_id: row.get(4)?,
        primary_ayurvedic_diagnosis: row.get(5)?,
        secondary_ayurvedic_diagnoses: row.get(6)?,
        icd11_diagnoses: row.get(7)?,
        shamana_therapy: row.get(8)?,
        shodhana_therapy: row.get(9)?,
        rasayana_plan: row.get(10)?,
        diet_plan: row.get(11)?,
        lifestyle_recommendations: row.get(12)?,
        followup_schedule: row.get(13)?,
        status: row.get(14)?,
    })
}

fn treatment_from_row(row: TreatmentRow) -> Result<Treatment, DatabaseError> {
    Ok(Treatment {
        id: parse_uuid(&row.id)?,
        patient_id: parse_uuid(&row.patient_id)?,
        assessment_id: parse_optional_uuid(row.assessment_id)?,
        created_at: parse_timestamp(&row.created_at)?,
        physician_id: row.physician_id,
        primary_ayurvedic_diagnosis: row.primary_ayurvedic_diagnosis,
        secondary_ayurvedic_diagnoses: from_json_list(row.secondary_ayurvedic_diagnoses)?,
        icd11_diagnoses: from_json_list(row.icd11_diagnoses)?,
        shamana_therapy: from_json(row.shamana_therapy)?,
        shodhana_therapy: from_json(row.shodhana_therapy)?,
        rasayana_plan: from_json(row.rasayana_plan)?,
        diet_plan: from_json(row.diet_plan)?,
        lifestyle_recommendations: from_json(row.lifestyle_recommendations)?,
        followup_schedule: from_json(row.followup_schedule)?,
        status: TreatmentStatus::from_str(&row.status)?,
    })
}
