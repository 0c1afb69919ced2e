use std::str::FromStr;

use rusqlite::{params, Connection, Row};
use uuid::Uuid;

use super::{
    escape_like, format_timestamp, from_json, from_json_list, map_write_error, now, parse_date,
    parse_timestamp, parse_uuid, to_json, to_optional_json,
};
use crate::db::DatabaseError;
use crate::models::*;

/// Rows returned by `search_patients`.
pub const SEARCH_LIMIT: u32 = 20;
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

const PATIENT_COLUMNS: &str = "id, created_at, name, dob, gender, contact, mobile, email, address,
     uhid, aadhaar_number, abha_id, marital_status, occupation, occupation_type,
     insurance_status, insurance_provider, preferred_physician, emergency_contact, family_history";

pub fn insert_patient(conn: &Connection, patient: &Patient) -> Result<(), DatabaseError> {
    if patient.name.trim().is_empty() {
        return Err(DatabaseError::InvalidInput("Patient name is required".into()));
    }
    conn.execute(
        "INSERT INTO patients (id, created_at, name, dob, gender, contact, mobile, email, address,
         uhid, aadhaar_number, abha_id, marital_status, occupation, occupation_type,
         insurance_status, insurance_provider, preferred_physician, emergency_contact, family_history)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20)",
        params![
            patient.id.to_string(),
            format_timestamp(&patient.created_at),
            patient.name.trim(),
            patient.dob.map(|d| d.to_string()),
            patient.gender.map(|g| g.as_str()),
            patient.contact,
            patient.mobile,
            patient.email,
            to_optional_json(patient.address.as_ref())?,
            blank_to_none(patient.uhid.as_deref()),
            patient.aadhaar_number,
            patient.abha_id,
            patient.marital_status.map(|m| m.as_str()),
            patient.occupation,
            patient.occupation_type.map(|o| o.as_str()),
            patient.insurance_status as i32,
            patient.insurance_provider,
            patient.preferred_physician,
            to_optional_json(patient.emergency_contact.as_ref())?,
            to_json(&patient.family_history)?,
        ],
    )
    .map_err(map_write_error)?;
    Ok(())
}

/// Register a patient: assigns id and timestamp, then inserts.
pub fn create_patient(conn: &Connection, new: NewPatient) -> Result<Patient, DatabaseError> {
    let patient = Patient::from_new(new, Uuid::new_v4(), now());
    insert_patient(conn, &patient)?;
    tracing::info!(patient_id = %patient.id, "Patient registered");
    Ok(patient)
}

/// Register several patients atomically: either all are stored or none.
pub fn bulk_create_patients(
    conn: &Connection,
    batch: Vec<NewPatient>,
) -> Result<Vec<Patient>, DatabaseError> {
    let tx = conn.unchecked_transaction()?;
    let created_at = now();
    let mut created = Vec::with_capacity(batch.len());
    for new in batch {
        let patient = Patient::from_new(new, Uuid::new_v4(), created_at);
        insert_patient(&tx, &patient)?;
        created.push(patient);
    }
    tx.commit()?;
    tracing::info!(count = created.len(), "Bulk patient import committed");
    Ok(created)
}

pub fn get_patient(conn: &Connection, id: &Uuid) -> Result<Option<Patient>, DatabaseError> {
    let sql = format!("SELECT {PATIENT_COLUMNS} FROM patients WHERE id = ?1");
    let result = conn.query_row(&sql, params![id.to_string()], read_patient_row);

    match result {
        Ok(row) => Ok(Some(patient_from_row(row)?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Like `get_patient`, but a missing row is `NotFound`.
pub fn require_patient(conn: &Connection, id: &Uuid) -> Result<Patient, DatabaseError> {
    get_patient(conn, id)?.ok_or_else(|| DatabaseError::not_found("Patient", id))
}

/// Page `page` (1-based) of patients, newest registration first.
pub fn list_patients(conn: &Connection, page: u32, limit: u32) -> Result<Page<Patient>, DatabaseError> {
    let page = page.max(1);
    let limit = limit.clamp(1, MAX_PAGE_SIZE);
    let offset = u64::from(page - 1) * u64::from(limit);

    let total: i64 = conn.query_row("SELECT COUNT(*) FROM patients", [], |row| row.get(0))?;
    let total = total.max(0) as u64;

    let sql = format!(
        "SELECT {PATIENT_COLUMNS} FROM patients
         ORDER BY created_at DESC, rowid DESC LIMIT ?1 OFFSET ?2"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![i64::from(limit), offset as i64], read_patient_row)?;
    let data = collect_patients(rows)?;

    Ok(Page {
        has_more: total > offset + data.len() as u64,
        data,
        total,
        page,
        limit,
    })
}

/// Case-insensitive substring match on name, UHID or national ID.
pub fn search_patients(conn: &Connection, query: &str) -> Result<Vec<Patient>, DatabaseError> {
    let pattern = format!("%{}%", escape_like(query.trim()));
    let sql = format!(
        "SELECT {PATIENT_COLUMNS} FROM patients
         WHERE name LIKE ?1 ESCAPE '\\' OR uhid LIKE ?1 ESCAPE '\\' OR aadhaar_number LIKE ?1 ESCAPE '\\'
         ORDER BY created_at DESC LIMIT ?2"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![pattern, SEARCH_LIMIT], read_patient_row)?;
    collect_patients(rows)
}

fn blank_to_none(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

// Internal row type for Patient mapping
struct PatientRow {
    id: String,
    created_at: String,
    name: String,
    dob: Option<String>,
    gender: Option<String>,
    contact: Option<String>,
    mobile: Option<String>,
    email: Option<String>,
    address: Option<String>,
    uhid: Option<String>,
    aadhaar_number: Option<String>,
    abha_id: Option<String>,
    marital_status: Option<String>,
    occupation: Option<String>,
    occupation_type: Option<String>,
    insurance_status: i32,
    insurance_provider: Option<String>,
    preferred_physician: Option<String>,
    emergency_contact: Option<String>,
    family_history: Option<String>,
}

fn read_patient_row(row: &Row<'_>) -> rusqlite::Result<PatientRow> {
    Ok(PatientRow {
        id: row.get(0)?,
        created_at: row.get(1)?,
        name: row.get(2)?,
        dob: row.get(3)?,
        gender: row.get(4)?,
        contact: row.get(5)?,
        mobile: row.get(6)?,
        email: row.get(7)?,
        address: row.get(8)?,
        uhid: row.get(9)?,
        aadhaar_number: row.get(10)?,
        abha_id: row.get(11)?,
        marital_status: row.get(12)?,
        occupation: row.get(13)?,
        occupation_type: row.get(14)?,
        insurance_status: row.get(15)?,
        insurance_provider: row.get(16)?,
        preferred_physician: row.get(17)?,
        emergency_contact: row.get(18)?,
        family_history: row.get(19)?,
    })
}

fn collect_patients(
    rows: rusqlite::MappedRows<'_, impl FnMut(&Row<'_>) -> rusqlite::Result<PatientRow>>,
) -> Result<Vec<Patient>, DatabaseError> {
    let mut patients = Vec::new();
    for row in rows {
        patients.push(patient_from_row(row?)?);
    }
    Ok(patients)
}

fn patient_from_row(row: PatientRow) -> Result<Patient, DatabaseError> {
    Ok(Patient {
        id: parse_uuid(&row.id)?,
        created_at: parse_timestamp(&row.created_at)?,
        name: row.name,
        dob: parse_date(row.dob)?,
        gender: row.gender.as_deref().map(Gender::from_str).transpose()?,
        contact: row.contact,
        mobile: row.mobile,
        email: row.email,
        address: from_json(row.address)?,
        uhid: row.uhid,
        aadhaar_number: row.aadhaar_number,
        abha_id: row.abha_id,
        marital_status: row
            .marital_status
            .as_deref()
            .map(MaritalStatus::from_str)
            .transpose()?,
        occupation: row.occupation,
        occupation_type: row
            .occupation_type
            .as_deref()
            .map(OccupationType::from_str)
            .transpose()?,
        insurance_status: row.insurance_status != 0,
        insurance_provider: row.insurance_provider,
        preferred_physician: row.preferred_physician,
        emergency_contact: from_json(row.emergency_contact)?,
        family_history: from_json_list(row.family_history)?,
    })
}
