use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::TimelineEntryType;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub created_at: NaiveDateTime,
    pub entry_type: TimelineEntryType,
    pub title: Option<String>,
    pub notes: Option<String>,
    pub details: Option<String>,
    /// Id of the assessment/treatment this entry refers to, if any.
    pub reference_id: Option<Uuid>,
    pub recorded_by: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NewTimelineEntry {
    pub entry_type: TimelineEntryType,
    pub title: Option<String>,
    pub notes: Option<String>,
    pub details: Option<String>,
    pub reference_id: Option<Uuid>,
    pub recorded_by: Option<String>,
}

impl TimelineEntry {
    pub fn from_new(
        new: NewTimelineEntry,
        id: Uuid,
        patient_id: Uuid,
        created_at: NaiveDateTime,
    ) -> Self {
        Self {
            id,
            patient_id,
            created_at,
            entry_type: new.entry_type,
            title: new.title,
            notes: new.notes,
            details: new.details,
            reference_id: new.reference_id,
            recorded_by: new.recorded_by,
        }
    }
}
