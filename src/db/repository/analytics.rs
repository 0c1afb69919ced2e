use chrono::{Datelike, NaiveDate};
use rusqlite::{params, Connection};
use uuid::Uuid;

use super::assessment::{assessment_from_row, read_assessment_row_at};
use super::{format_timestamp, latest_assessment, require_patient};
use crate::db::DatabaseError;
use crate::models::*;

fn count(conn: &Connection, sql: &str, patient_id: &Uuid) -> Result<u64, DatabaseError> {
    let n: i64 = conn.query_row(sql, params![patient_id.to_string()], |row| row.get(0))?;
    Ok(n as u64)
}

/// Record counts for one patient.
pub fn get_patient_stats(conn: &Connection, patient_id: &Uuid) -> Result<PatientStats, DatabaseError> {
    require_patient(conn, patient_id)?;
    Ok(PatientStats {
        assessments: count(conn, "SELECT COUNT(*) FROM assessments WHERE patient_id = ?1", patient_id)?,
        treatments: count(conn, "SELECT COUNT(*) FROM treatments WHERE patient_id = ?1", patient_id)?,
        active_treatments: count(
            conn,
            "SELECT COUNT(*) FROM treatments WHERE patient_id = ?1 AND status = 'active'",
            patient_id,
        )?,
        timeline_entries: count(
            conn,
            "SELECT COUNT(*) FROM timeline_entries WHERE patient_id = ?1",
            patient_id,
        )?,
    })
}

/// Clinic-wide counters. "This month" starts on the first day of `today`'s month.
pub fn get_dashboard_stats(conn: &Connection, today: NaiveDate) -> Result<DashboardStats, DatabaseError> {
    let month_start = today
        .with_day(1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| DatabaseError::InvalidInput(format!("bad reference date {today}")))?;

    let (total, new_this_month, active): (i64, i64, i64) = conn.query_row(
        "SELECT
            (SELECT COUNT(*) FROM patients),
            (SELECT COUNT(*) FROM patients WHERE created_at >= ?1),
            (SELECT COUNT(*) FROM treatments WHERE status = 'active')",
        params![format_timestamp(&month_start)],
        |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
    )?;

    Ok(DashboardStats {
        total_patients: total as u64,
        new_this_month: new_this_month as u64,
        active_treatments: active as u64,
    })
}

/// Prakriti/vikriti comparison from the patient's latest assessment.
pub fn get_patient_dosha_analysis(
    conn: &Connection,
    patient_id: &Uuid,
) -> Result<Option<DoshaAnalysis>, DatabaseError> {
    let patient = require_patient(conn, patient_id)?;
    Ok(latest_assessment(conn, patient_id)?
        .map(|assessment| DoshaAnalysis::from_assessment(&patient.name, &assessment)))
}

/// Latest assessment of every assessed patient, most recently assessed first.
pub fn list_dosha_imbalances(conn: &Connection) -> Result<Vec<DoshaAnalysis>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT p.name, a.id, a.patient_id, a.created_at, a.assessor_id,
                a.prakriti_vata, a.prakriti_pitta, a.prakriti_kapha,
                a.vikriti_vata, a.vikriti_pitta, a.vikriti_kapha,
                a.nadi_pariksha, a.jihva_pariksha, a.akriti_pariksha, a.icd11_codes, a.notes
         FROM assessments a
         JOIN patients p ON p.id = a.patient_id
         WHERE a.rowid = (
             SELECT latest.rowid FROM assessments latest
             WHERE latest.patient_id = a.patient_id
             ORDER BY latest.created_at DESC, latest.rowid DESC
             LIMIT 1
         )
         ORDER BY a.created_at DESC, a.rowid DESC",
    )?;
    let rows = stmt.query_map([], |row| {
        let name: String = row.get(0)?;
        Ok((name, read_assessment_row_at(row, 1)?))
    })?;

    let mut analyses = Vec::new();
    for row in rows {
        let (name, assessment_row) = row?;
        let assessment = assessment_from_row(assessment_row)?;
        analyses.push(DoshaAnalysis::from_assessment(&name, &assessment));
    }
    Ok(analyses)
}
