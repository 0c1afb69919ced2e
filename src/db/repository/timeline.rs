use std::str::FromStr;

use rusqlite::{params, Connection, Row};
use uuid::Uuid;

use super::{
    ensure_patient_exists, format_timestamp, map_write_error, now, parse_optional_uuid,
    parse_timestamp, parse_uuid,
};
use crate::db::DatabaseError;
use crate::models::*;

pub fn insert_timeline_entry(conn: &Connection, entry: &TimelineEntry) -> Result<(), DatabaseError> {
    ensure_patient_exists(conn, &entry.patient_id)?;
    conn.execute(
        "INSERT INTO timeline_entries (id, patient_id, created_at, entry_type, title, notes,
         details, reference_id, recorded_by)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            entry.id.to_string(),
            entry.patient_id.to_string(),
            format_timestamp(&entry.created_at),
            entry.entry_type.as_str(),
            entry.title,
            entry.notes,
            entry.details,
            entry.reference_id.map(|id| id.to_string()),
            entry.recorded_by,
        ],
    )
    .map_err(map_write_error)?;
    Ok(())
}

pub fn create_timeline_entry(
    conn: &Connection,
    patient_id: &Uuid,
    new: NewTimelineEntry,
) -> Result<TimelineEntry, DatabaseError> {
    let entry = TimelineEntry::from_new(new, Uuid::new_v4(), *patient_id, now());
    insert_timeline_entry(conn, &entry)?;
    tracing::debug!(patient_id = %patient_id, entry_type = entry.entry_type.as_str(), "Timeline entry added");
    Ok(entry)
}

/// Timeline of a patient, newest first.
pub fn list_timeline(conn: &Connection, patient_id: &Uuid) -> Result<Vec<TimelineEntry>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, patient_id, created_at, entry_type, title, notes, details, reference_id,
         recorded_by
         FROM timeline_entries WHERE patient_id = ?1
         ORDER BY created_at DESC, rowid DESC",
    )?;
    let rows = stmt.query_map(params![patient_id.to_string()], |row: &Row<'_>| {
        Ok(TimelineRow {
            id: row.get(0)?,
            patient_id: row.get(1)?,
            created_at: row.get(2)?,
            entry_type: row.get(3)?,
            title: row.get(4)?,
            notes: row.get(5)?,
            details: row.get(6)?,
            reference_id: row.get(7)?,
            recorded_by: row.get(8)?,
        })
    })?;

    let mut entries = Vec::new();
    for row in rows {
        entries.push(timeline_entry_from_row(row?)?);
    }
    Ok(entries)
}

struct TimelineRow {
    id: String,
    patient_id: String,
    created_at: String,
    entry_type: String,
    title: Option<String>,
    notes: Option<String>,
    details: Option<String>,
    reference_id: Option<String>,
    recorded_by: Option<String>,
}

fn timeline_entry_from_row(row: TimelineRow) -> Result<TimelineEntry, DatabaseError> {
    Ok(TimelineEntry {
        id: parse_uuid(&row.id)?,
        patient_id: parse_uuid(&row.patient_id)?,
        created_at: parse_timestamp(&row.created_at)?,
        entry_type: TimelineEntryType::from_str(&row.entry_type)?,
        title: row.title,
        notes: row.notes,
        details: row.details,
        reference_id: parse_optional_uuid(row.reference_id)?,
        recorded_by: row.recorded_by,
    })
}
