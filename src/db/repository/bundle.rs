use rusqlite::Connection;
use uuid::Uuid;

use super::{list_assessments, list_timeline, list_treatments, require_patient};
use crate::db::DatabaseError;
use crate::models::PatientBundle;

/// Load a patient with all clinical records, each list newest first.
pub fn load_patient_bundle(conn: &Connection, patient_id: &Uuid) -> Result<PatientBundle, DatabaseError> {
    let patient = require_patient(conn, patient_id)?;
    Ok(PatientBundle {
        patient,
        assessments: list_assessments(conn, patient_id)?,
        treatments: list_treatments(conn, patient_id)?,
        timeline: list_timeline(conn, patient_id)?,
    })
}
