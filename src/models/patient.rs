use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{Gender, MaritalStatus, OccupationType};

/// Postal address as stored by the front end: older records hold a single
/// free-text line, newer ones the structured form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Address {
    Flat(String),
    Structured(StructuredAddress),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredAddress {
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    /// Pre-rendered line; only consulted when every component is empty.
    #[serde(default)]
    pub full_address: Option<String>,
}

/// Emergency contact, flat or structured (same history as `Address`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EmergencyContact {
    Flat(String),
    Structured(StructuredContact),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredContact {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub relationship: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub id: Uuid,
    pub created_at: NaiveDateTime,
    pub name: String,
    pub dob: Option<NaiveDate>,
    pub gender: Option<Gender>,
    /// Legacy phone field, superseded by `mobile`.
    pub contact: Option<String>,
    pub mobile: Option<String>,
    pub email: Option<String>,
    pub address: Option<Address>,
    pub uhid: Option<String>,
    pub aadhaar_number: Option<String>,
    pub abha_id: Option<String>,
    pub marital_status: Option<MaritalStatus>,
    pub occupation: Option<String>,
    pub occupation_type: Option<OccupationType>,
    pub insurance_status: bool,
    pub insurance_provider: Option<String>,
    pub preferred_physician: Option<String>,
    pub emergency_contact: Option<EmergencyContact>,
    pub family_history: Vec<String>,
}

/// Registration payload. The store assigns `id` and `created_at`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NewPatient {
    pub name: String,
    pub dob: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub contact: Option<String>,
    pub mobile: Option<String>,
    pub email: Option<String>,
    pub address: Option<Address>,
    pub uhid: Option<String>,
    pub aadhaar_number: Option<String>,
    pub abha_id: Option<String>,
    pub marital_status: Option<MaritalStatus>,
    pub occupation: Option<String>,
    pub occupation_type: Option<OccupationType>,
    pub insurance_status: bool,
    pub insurance_provider: Option<String>,
    pub preferred_physician: Option<String>,
    pub emergency_contact: Option<EmergencyContact>,
    pub family_history: Vec<String>,
}

impl Patient {
    pub fn from_new(new: NewPatient, id: Uuid, created_at: NaiveDateTime) -> Self {
        Self {
            id,
            created_at,
            name: new.name,
            dob: new.dob,
            gender: new.gender,
            contact: new.contact,
            mobile: new.mobile,
            email: new.email,
            address: new.address,
            uhid: new.uhid,
            aadhaar_number: new.aadhaar_number,
            abha_id: new.abha_id,
            marital_status: new.marital_status,
            occupation: new.occupation,
            occupation_type: new.occupation_type,
            insurance_status: new.insurance_status,
            insurance_provider: new.insurance_provider,
            preferred_physician: new.preferred_physician,
            emergency_contact: new.emergency_contact,
            family_history: new.family_history,
        }
    }

    /// Best phone number on file: `mobile` first, then the legacy `contact`.
    pub fn phone(&self) -> Option<&str> {
        non_empty(self.mobile.as_deref()).or_else(|| non_empty(self.contact.as_deref()))
    }
}

pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
