//! Repository layer: entity-scoped database operations.
//!
//! Every function takes a borrowed `Connection`; callers own connection
//! lifetime and transactions. Lists come back newest first.

mod analytics;
mod assessment;
mod bundle;
mod catalog;
mod patient;
mod timeline;
mod treatment;

pub use analytics::*;
pub use assessment::*;
pub use bundle::*;
pub use catalog::*;
pub use patient::*;
pub use timeline::*;
pub use treatment::*;

use chrono::{Local, NaiveDate, NaiveDateTime};
use rusqlite::{params, Connection};
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use super::DatabaseError;

/// Storage format for timestamps; fixed width so text order is time order.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Current local time, as stamped on new records.
pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

pub(crate) fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

pub(crate) fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, DatabaseError> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f"))
        .map_err(|e| DatabaseError::Corrupt(format!("timestamp {raw:?}: {e}")))
}

pub(crate) fn parse_date(raw: Option<String>) -> Result<Option<NaiveDate>, DatabaseError> {
    raw.map(|d| {
        NaiveDate::parse_from_str(&d, "%Y-%m-%d")
            .map_err(|e| DatabaseError::Corrupt(format!("date {d:?}: {e}")))
    })
    .transpose()
}

pub(crate) fn parse_uuid(raw: &str) -> Result<Uuid, DatabaseError> {
    Uuid::parse_str(raw).map_err(|e| DatabaseError::Corrupt(format!("uuid {raw:?}: {e}")))
}

pub(crate) fn parse_optional_uuid(raw: Option<String>) -> Result<Option<Uuid>, DatabaseError> {
    raw.as_deref().map(parse_uuid).transpose()
}

pub(crate) fn to_json<T: Serialize>(value: &T) -> Result<String, DatabaseError> {
    serde_json::to_string(value).map_err(|e| DatabaseError::InvalidInput(e.to_string()))
}

pub(crate) fn to_optional_json<T: Serialize>(
    value: Option<&T>,
) -> Result<Option<String>, DatabaseError> {
    value.map(to_json).transpose()
}

pub(crate) fn from_json<T: DeserializeOwned>(raw: Option<String>) -> Result<Option<T>, DatabaseError> {
    match raw.as_deref().map(str::trim) {
        None | Some("") | Some("null") => Ok(None),
        Some(text) => serde_json::from_str(text)
            .map(Some)
            .map_err(|e| DatabaseError::Corrupt(format!("json: {e}"))),
    }
}

pub(crate) fn from_json_list(raw: Option<String>) -> Result<Vec<String>, DatabaseError> {
    Ok(from_json::<Vec<String>>(raw)?.unwrap_or_default())
}

/// Escape LIKE wildcards and the escape character itself.
pub(crate) fn escape_like(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Unique/CHECK failures become `ConstraintViolation`; the rest pass through.
pub(crate) fn map_write_error(e: rusqlite::Error) -> DatabaseError {
    match &e {
        rusqlite::Error::SqliteFailure(err, msg)
            if err.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            DatabaseError::ConstraintViolation(msg.clone().unwrap_or_else(|| e.to_string()))
        }
        _ => DatabaseError::Sqlite(e),
    }
}

/// `NotFound` unless a patient with `id` exists.
pub fn ensure_patient_exists(conn: &Connection, id: &Uuid) -> Result<(), DatabaseError> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM patients WHERE id = ?1)",
        params![id.to_string()],
        |row| row.get(0),
    )?;
    if exists {
        Ok(())
    } else {
        Err(DatabaseError::not_found("Patient", id))
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::models::*;

    pub fn ts(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    pub fn seed_patient(conn: &Connection, name: &str, created_at: NaiveDateTime) -> Patient {
        let patient = Patient::from_new(
            NewPatient {
                name: name.into(),
                ..Default::default()
            },
            Uuid::new_v4(),
            created_at,
        );
        insert_patient(conn, &patient).unwrap();
        patient
    }
}
