//! Patient summary composer.
//!
//! Renders a `PatientBundle` into one plain-text document used both for
//! clinician review and as the payload of the AI analysis prompt. The
//! section order is fixed and every section header is always present, so
//! downstream consumers (clipboard, prompt, PDF export) see a stable shape
//! no matter how sparse the record is.
//!
//! Output depends only on the bundle and the `today` date passed in.

pub mod format;

use chrono::{Local, NaiveDate};

use crate::models::{
    Assessment, Patient, PatientBundle, TimelineEntry, Treatment, TreatmentStatus,
};
use format::{
    calculate_age, capitalize, format_address, format_age, format_date, format_dosha,
    format_emergency_contact, format_list, format_timestamp_date, truncate_chars, DisplayForm,
    AGE_UNKNOWN,
};

/// Number of timeline entries expanded in detail.
pub const TIMELINE_DETAIL_LIMIT: usize = 5;

/// Longest timeline `details` text reproduced before truncation.
const TIMELINE_DETAILS_MAX_CHARS: usize = 200;

pub const HEADER_PROFILE: &str = "== Patient Profile ==";
pub const HEADER_CONTACT: &str = "== Contact Information ==";
pub const HEADER_IDENTIFIERS: &str = "== Medical Identifiers ==";
pub const HEADER_INSURANCE: &str = "== Insurance Status ==";
pub const HEADER_FAMILY_HISTORY: &str = "== Family History ==";
pub const HEADER_CLINICAL: &str = "== Clinical Data ==";
pub const HEADER_ASSESSMENTS: &str = "-- Assessments --";
pub const HEADER_TREATMENTS: &str = "-- Treatments --";
pub const HEADER_TIMELINE: &str = "-- Timeline --";
pub const HEADER_STATISTICS: &str = "== Statistics ==";

/// Every header, in document order.
pub const SECTION_HEADERS: [&str; 10] = [
    HEADER_PROFILE,
    HEADER_CONTACT,
    HEADER_IDENTIFIERS,
    HEADER_INSURANCE,
    HEADER_FAMILY_HISTORY,
    HEADER_CLINICAL,
    HEADER_ASSESSMENTS,
    HEADER_TREATMENTS,
    HEADER_TIMELINE,
    HEADER_STATISTICS,
];

/// Compose the summary for `bundle` as of `today`.
pub fn compose_summary(bundle: &PatientBundle, today: NaiveDate) -> String {
    let patient = &bundle.patient;
    let mut out = Vec::new();

    out.push("AYURVEDIC PATIENT SUMMARY".to_string());
    out.push(format!("Patient: {}", display_name(patient)));
    out.push(format!("Generated: {}", format_date(today)));

    section(&mut out, HEADER_PROFILE, profile_lines(patient, today));
    section(&mut out, HEADER_CONTACT, contact_lines(patient));
    section(&mut out, HEADER_IDENTIFIERS, identifier_lines(patient));
    section(&mut out, HEADER_INSURANCE, insurance_lines(patient));
    section(&mut out, HEADER_FAMILY_HISTORY, family_history_lines(patient));

    out.push(String::new());
    out.push(HEADER_CLINICAL.to_string());
    section(&mut out, HEADER_ASSESSMENTS, assessment_lines(&bundle.assessments));
    section(&mut out, HEADER_TREATMENTS, treatment_lines(&bundle.treatments));
    section(&mut out, HEADER_TIMELINE, timeline_lines(&bundle.timeline));

    section(&mut out, HEADER_STATISTICS, statistics_lines(bundle));

    out.join("\n")
}

/// Compose the summary using the local calendar date.
pub fn compose_summary_today(bundle: &PatientBundle) -> String {
    compose_summary(bundle, Local::now().date_naive())
}

/// Summary of demographics alone; clinical sections carry placeholders.
pub fn compose_patient_summary(patient: &Patient, today: NaiveDate) -> String {
    compose_summary(&PatientBundle::patient_only(patient.clone()), today)
}

/// One-line card used in patient listings:
/// `Asha Rao | Female, 34 yrs | Pune, Maharashtra | ICE: Ravi (Brother)`.
pub fn patient_card_line(patient: &Patient, today: NaiveDate) -> String {
    let gender = patient
        .gender
        .map(|g| capitalize(g.as_str()))
        .unwrap_or_else(|| "N/A".to_string());
    let mut parts = vec![
        display_name(patient),
        format!("{gender}, {} yrs", format_age(patient.dob, today)),
    ];
    if let Some(addr) = format_address(patient.address.as_ref(), DisplayForm::Short) {
        parts.push(addr);
    }
    if let Some(ice) =
        format_emergency_contact(patient.emergency_contact.as_ref(), DisplayForm::Short)
    {
        parts.push(format!("ICE: {ice}"));
    }
    parts.join(" | ")
}

// ─── Sections ────────────────────────────────────────────────────────────────

fn section(out: &mut Vec<String>, header: &str, lines: Vec<String>) {
    out.push(String::new());
    out.push(header.to_string());
    out.extend(lines);
}

fn display_name(patient: &Patient) -> String {
    let name = patient.name.trim();
    if name.is_empty() {
        "Unnamed patient".to_string()
    } else {
        name.to_string()
    }
}

fn or_placeholder(value: Option<&str>, placeholder: &str) -> String {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(placeholder)
        .to_string()
}

fn profile_lines(patient: &Patient, today: NaiveDate) -> Vec<String> {
    let age = match patient.dob.and_then(|dob| calculate_age(dob, today)) {
        Some(years) => format!("{years} years"),
        None => AGE_UNKNOWN.to_string(),
    };
    let dob = patient
        .dob
        .map(format_date)
        .unwrap_or_else(|| "Not provided".to_string());
    let gender = patient
        .gender
        .map(|g| capitalize(g.as_str()))
        .unwrap_or_else(|| "Not specified".to_string());
    let marital = patient
        .marital_status
        .map(|m| capitalize(m.as_str()))
        .unwrap_or_else(|| "Not specified".to_string());
    let mut occupation = or_placeholder(patient.occupation.as_deref(), "Not specified");
    if let Some(kind) = patient.occupation_type {
        occupation.push_str(&format!(" ({} activity)", kind.as_str()));
    }

    let mut lines = vec![
        format!("Name: {}", display_name(patient)),
        format!("Age: {age}"),
        format!("Date of Birth: {dob}"),
        format!("Gender: {gender}"),
        format!("Marital Status: {marital}"),
        format!("Occupation: {occupation}"),
    ];
    if let Some(physician) = patient
        .preferred_physician
        .as_deref()
        .filter(|p| !p.trim().is_empty())
    {
        lines.push(format!("Preferred Physician: {}", physician.trim()));
    }
    lines
}

fn contact_lines(patient: &Patient) -> Vec<String> {
    vec![
        format!("Phone: {}", or_placeholder(patient.phone(), "Not provided")),
        format!("Email: {}", or_placeholder(patient.email.as_deref(), "Not provided")),
        format!(
            "Address: {}",
            format_address(patient.address.as_ref(), DisplayForm::Full)
                .unwrap_or_else(|| "Address not provided".to_string())
        ),
        format!(
            "Emergency Contact: {}",
            format_emergency_contact(patient.emergency_contact.as_ref(), DisplayForm::Full)
                .unwrap_or_else(|| "Not provided".to_string())
        ),
    ]
}

fn identifier_lines(patient: &Patient) -> Vec<String> {
    vec![
        format!("UHID: {}", or_placeholder(patient.uhid.as_deref(), "Not assigned")),
        format!(
            "National ID (Aadhaar): {}",
            or_placeholder(patient.aadhaar_number.as_deref(), "Not provided")
        ),
        format!(
            "Health Account (ABHA): {}",
            or_placeholder(patient.abha_id.as_deref(), "Not provided")
        ),
    ]
}

fn insurance_lines(patient: &Patient) -> Vec<String> {
    if patient.insurance_status {
        vec![
            "Insured: Yes".to_string(),
            format!(
                "Provider: {}",
                or_placeholder(patient.insurance_provider.as_deref(), "Not specified")
            ),
        ]
    } else {
        vec!["Insured: No".to_string()]
    }
}

fn family_history_lines(patient: &Patient) -> Vec<String> {
    let lines: Vec<String> = patient
        .family_history
        .iter()
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .map(|c| format!("- {c}"))
        .collect();
    if lines.is_empty() {
        vec!["No family history recorded".to_string()]
    } else {
        lines
    }
}

fn assessment_lines(assessments: &[Assessment]) -> Vec<String> {
    let Some(latest) = assessments.first() else {
        return vec![
            "No assessments recorded".to_string(),
            format!("Prakriti: {}", format_dosha(None)),
            format!("Vikriti: {}", format_dosha(None)),
        ];
    };

    let mut lines = vec![
        format!(
            "Latest Assessment ({}):",
            format_timestamp_date(latest.created_at)
        ),
        format!("  Prakriti: {}", format_dosha(Some(&latest.prakriti))),
        format!("  Vikriti: {}", format_dosha(Some(&latest.vikriti))),
    ];
    let findings = [
        ("Pulse (Nadi)", latest.nadi_pariksha.as_deref()),
        ("Tongue (Jihva)", latest.jihva_pariksha.as_deref()),
        ("Physical (Akriti)", latest.akriti_pariksha.as_deref()),
    ];
    for (label, value) in findings {
        if let Some(v) = value.map(str::trim).filter(|v| !v.is_empty()) {
            lines.push(format!("  {label}: {v}"));
        }
    }
    if let Some(codes) = format_list(&latest.icd11_codes) {
        lines.push(format!("  Diagnosis Codes: {codes}"));
    }
    if let Some(notes) = latest.notes.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
        lines.push(format!("  Notes: {notes}"));
    }
    if assessments.len() > 1 {
        lines.push(format!("Earlier assessments: {}", assessments.len() - 1));
    }
    lines
}

fn treatment_lines(treatments: &[Treatment]) -> Vec<String> {
    if treatments.is_empty() {
        return vec!["No treatments recorded".to_string()];
    }

    let active: Vec<&Treatment> = treatments.iter().filter(|t| t.is_active()).collect();
    if active.is_empty() {
        return vec![format!(
            "No active treatments ({} on record)",
            treatments.len()
        )];
    }

    let mut lines = Vec::new();
    for t in &active {
        lines.push(format!(
            "Active Treatment ({}):",
            format_timestamp_date(t.created_at)
        ));
        lines.extend(treatment_detail(t));
    }
    let inactive = treatments.len() - active.len();
    if inactive > 0 {
        let by_status = [
            TreatmentStatus::Draft,
            TreatmentStatus::Completed,
            TreatmentStatus::Cancelled,
        ]
        .iter()
        .filter_map(|status| {
            let n = treatments.iter().filter(|t| t.status == *status).count();
            (n > 0).then(|| format!("{}: {n}", status.as_str()))
        })
        .collect::<Vec<_>>()
        .join(", ");
        lines.push(format!("Other treatments: {inactive} ({by_status})"));
    }
    lines
}

fn treatment_detail(t: &Treatment) -> Vec<String> {
    let mut lines = Vec::new();
    let mut push = |label: &str, value: Option<String>| {
        if let Some(v) = value {
            lines.push(format!("  {label}: {v}"));
        }
    };
    let text = |value: &Option<String>| {
        value
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };

    push(
        "Primary Diagnosis",
        Some(text(&t.primary_ayurvedic_diagnosis).unwrap_or_else(|| "Not specified".to_string())),
    );
    push("Secondary Diagnoses", format_list(&t.secondary_ayurvedic_diagnoses));
    push("ICD-11 Diagnoses", format_list(&t.icd11_diagnoses));

    if let Some(shamana) = &t.shamana_therapy {
        push("Internal Medicines", format_list(&shamana.internal_medicines));
        push("External Therapies", format_list(&shamana.external_therapies));
        push("Dosage", text(&shamana.dosage_instructions));
        push("Shamana Duration", text(&shamana.duration));
    }
    if let Some(shodhana) = &t.shodhana_therapy {
        let procedures = [
            ("Vamana", &shodhana.vamana),
            ("Virechana", &shodhana.virechana),
            ("Basti", &shodhana.basti),
            ("Nasya", &shodhana.nasya),
            ("Raktamokshana", &shodhana.raktamokshana),
            ("Preparation", &shodhana.preparation_phase),
            ("Main phase", &shodhana.main_phase),
            ("Post phase", &shodhana.post_phase),
        ];
        let joined = labelled_join(&procedures);
        push("Purification (Shodhana)", joined);
    }
    if let Some(rasayana) = &t.rasayana_plan {
        push("Rasayana Herbs", format_list(&rasayana.herbs));
        push("Rasayana Duration", text(&rasayana.duration));
        push("Contraindications", format_list(&rasayana.contraindications));
    }
    if let Some(diet) = &t.diet_plan {
        push("Diet - Include", format_list(&diet.foods_to_include));
        push("Diet - Avoid", format_list(&diet.foods_to_avoid));
        push("Meal Timing", text(&diet.meal_timing));
    }
    if let Some(life) = &t.lifestyle_recommendations {
        let fields = [
            ("Daily routine", &life.daily_routine),
            ("Exercise", &life.exercise),
            ("Stress management", &life.stress_management),
            ("Sleep", &life.sleep_hygiene),
            ("Seasonal", &life.seasonal_adaptations),
        ];
        push("Lifestyle", labelled_join(&fields));
    }
    if let Some(follow) = &t.followup_schedule {
        let freq = follow.frequency.trim();
        let next = text(&follow.next_visit);
        let value = match (freq.is_empty(), next) {
            (true, None) => None,
            (false, None) => Some(freq.to_string()),
            (true, Some(n)) => Some(format!("next visit {n}")),
            (false, Some(n)) => Some(format!("{freq} (next visit {n})")),
        };
        push("Follow-up", value);
    }
    lines
}

fn labelled_join(fields: &[(&str, &Option<String>)]) -> Option<String> {
    let parts: Vec<String> = fields
        .iter()
        .filter_map(|(label, value)| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(|v| format!("{label}: {v}"))
        })
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("; "))
    }
}

fn timeline_lines(entries: &[TimelineEntry]) -> Vec<String> {
    if entries.is_empty() {
        return vec!["No timeline entries recorded".to_string()];
    }

    let shown = entries.len().min(TIMELINE_DETAIL_LIMIT);
    let mut lines = vec![format!(
        "Recent Entries (showing {shown} of {}):",
        entries.len()
    )];
    for entry in entries.iter().take(TIMELINE_DETAIL_LIMIT) {
        let title = entry
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or("Untitled");
        let mut line = format!(
            "- [{}] {}: {title}",
            format_timestamp_date(entry.created_at),
            entry.entry_type.label()
        );
        if let Some(notes) = entry.notes.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
            line.push_str(&format!(" - {notes}"));
        }
        lines.push(line);
        if let Some(details) = entry
            .details
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
        {
            lines.push(format!(
                "  Details: {}",
                truncate_chars(details, TIMELINE_DETAILS_MAX_CHARS)
            ));
        }
    }
    lines
}

fn statistics_lines(bundle: &PatientBundle) -> Vec<String> {
    let active = bundle.treatments.iter().filter(|t| t.is_active()).count();
    vec![
        format!("Assessments: {}", bundle.assessments.len()),
        format!("Treatments: {} (active: {active})", bundle.treatments.len()),
        format!("Timeline Entries: {}", bundle.timeline.len()),
        format!(
            "Family History Conditions: {}",
            bundle
                .patient
                .family_history
                .iter()
                .filter(|c| !c.trim().is_empty())
                .count()
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::*;
    use chrono::NaiveDateTime;
    use uuid::Uuid;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
    }

    fn ts(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    fn sparse_patient() -> Patient {
        Patient::from_new(
            NewPatient {
                name: "Asha Rao".into(),
                ..Default::default()
            },
            Uuid::new_v4(),
            ts(2024, 1, 2),
        )
    }

    fn full_patient() -> Patient {
        Patient::from_new(
            NewPatient {
                name: "Asha Rao".into(),
                dob: NaiveDate::from_ymd_opt(2000, 6, 15),
                gender: Some(Gender::Female),
                mobile: Some("98200 11111".into()),
                email: Some("asha@example.com".into()),
                address: Some(Address::Structured(StructuredAddress {
                    street: Some("12 Elm".into()),
                    city: Some("Pune".into()),
                    state: Some("".into()),
                    postal_code: Some("411001".into()),
                    country: Some("India".into()),
                    full_address: None,
                })),
                uhid: Some("UH-0042".into()),
                aadhaar_number: Some("1234 5678 9012".into()),
                abha_id: Some("91-1234-5678-9012".into()),
                marital_status: Some(MaritalStatus::Married),
                occupation: Some("Teacher".into()),
                occupation_type: Some(OccupationType::Sedentary),
                insurance_status: true,
                insurance_provider: Some("Star Health".into()),
                emergency_contact: Some(EmergencyContact::Structured(StructuredContact {
                    name: "Ravi".into(),
                    relationship: "Brother".into(),
                    phone: "98200 00000".into(),
                    email: None,
                })),
                family_history: vec!["Type 2 diabetes".into(), "Hypertension".into()],
                ..Default::default()
            },
            Uuid::new_v4(),
            ts(2024, 1, 2),
        )
    }

    fn assessment(patient_id: Uuid, created: NaiveDateTime, vata: u32) -> Assessment {
        Assessment::from_new(
            NewAssessment {
                prakriti: DoshaScores::new(3, 2, 1),
                vikriti: DoshaScores::new(vata, 1, 1),
                nadi_pariksha: Some("Sarpa gati".into()),
                icd11_codes: vec!["SR11".into()],
                notes: Some("Irregular sleep".into()),
                ..Default::default()
            },
            Uuid::new_v4(),
            patient_id,
            created,
        )
    }

    fn treatment(patient_id: Uuid, status: TreatmentStatus, diagnosis: &str) -> Treatment {
        Treatment::from_new(
            NewTreatment {
                primary_ayurvedic_diagnosis: Some(diagnosis.into()),
                shamana_therapy: Some(ShamanaTherapy {
                    internal_medicines: vec!["Ashwagandha churna".into()],
                    ..Default::default()
                }),
                diet_plan: Some(DietPlan {
                    foods_to_avoid: vec!["Cold drinks".into()],
                    ..Default::default()
                }),
                followup_schedule: Some(FollowupSchedule {
                    frequency: "Weekly".into(),
                    next_visit: Some("2024-06-17".into()),
                    ..Default::default()
                }),
                status,
                ..Default::default()
            },
            Uuid::new_v4(),
            patient_id,
            ts(2024, 5, 1),
        )
    }

    fn entry(patient_id: Uuid, day: u32, title: &str) -> TimelineEntry {
        TimelineEntry::from_new(
            NewTimelineEntry {
                entry_type: TimelineEntryType::Observation,
                title: Some(title.into()),
                notes: Some("stable".into()),
                ..Default::default()
            },
            Uuid::new_v4(),
            patient_id,
            ts(2024, 6, day),
        )
    }

    fn full_bundle() -> PatientBundle {
        let patient = full_patient();
        let id = patient.id;
        PatientBundle {
            patient,
            assessments: vec![
                assessment(id, ts(2024, 6, 1), 5),
                assessment(id, ts(2024, 3, 1), 4),
            ],
            treatments: vec![
                treatment(id, TreatmentStatus::Active, "Amavata"),
                treatment(id, TreatmentStatus::Completed, "Ajirna"),
            ],
            timeline: (1..=7).rev().map(|d| entry(id, d, &format!("Visit {d}"))).collect(),
        }
    }

    fn assert_headers_in_order(text: &str) {
        let mut cursor = 0;
        for header in SECTION_HEADERS {
            let pos = text[cursor..]
                .find(header)
                .unwrap_or_else(|| panic!("missing or out of order: {header}"));
            cursor += pos + header.len();
        }
    }

    #[test]
    fn sparse_record_keeps_every_header() {
        let text = compose_patient_summary(&sparse_patient(), today());
        assert_headers_in_order(&text);
        assert!(text.contains("Age: N/A"));
        assert!(text.contains("Address: Address not provided"));
        assert!(text.contains("No family history recorded"));
        assert!(text.contains("No assessments recorded"));
        assert!(text.contains("Prakriti: Not assessed"));
        assert!(text.contains("No treatments recorded"));
        assert!(text.contains("No timeline entries recorded"));
        assert!(text.contains("Insured: No"));
    }

    #[test]
    fn full_record_keeps_every_header() {
        assert_headers_in_order(&compose_summary(&full_bundle(), today()));
    }

    #[test]
    fn patient_only_summary_is_shorter() {
        let bundle = full_bundle();
        let full = compose_summary(&bundle, today());
        let short = compose_patient_summary(&bundle.patient, today());
        assert!(short.len() < full.len());
    }

    #[test]
    fn composition_is_deterministic() {
        let bundle = full_bundle();
        assert_eq!(compose_summary(&bundle, today()), compose_summary(&bundle, today()));
    }

    #[test]
    fn age_uses_birthday_correction() {
        let bundle = full_bundle();
        let before = compose_summary(&bundle, NaiveDate::from_ymd_opt(2024, 6, 10).unwrap());
        assert!(before.contains("Age: 23 years"));
        let after = compose_summary(&bundle, NaiveDate::from_ymd_opt(2024, 6, 20).unwrap());
        assert!(after.contains("Age: 24 years"));
    }

    #[test]
    fn future_birth_date_renders_unknown_age() {
        let mut bundle = full_bundle();
        bundle.patient.dob = NaiveDate::from_ymd_opt(2030, 1, 1);
        let text = compose_summary(&bundle, today());
        assert!(text.contains("Age: N/A"));
        assert!(!text.contains("Age: -"));
    }

    #[test]
    fn contact_section_uses_full_forms() {
        let text = compose_summary(&full_bundle(), today());
        assert!(text.contains("Address: 12 Elm, Pune, 411001, India"));
        assert!(text.contains("Emergency Contact: Ravi (Brother) - 98200 00000"));
        assert!(text.contains("Phone: 98200 11111"));
    }

    #[test]
    fn only_latest_assessment_is_expanded() {
        let text = compose_summary(&full_bundle(), today());
        assert!(text.contains("Latest Assessment (Jun 1, 2024):"));
        assert!(text.contains("  Vikriti: Vata: 5, Pitta: 1, Kapha: 1"));
        assert!(!text.contains("Vata: 4, Pitta: 1"));
        assert!(text.contains("Earlier assessments: 1"));
    }

    #[test]
    fn only_active_treatments_are_expanded() {
        let text = compose_summary(&full_bundle(), today());
        assert!(text.contains("Primary Diagnosis: Amavata"));
        assert!(!text.contains("Ajirna"));
        assert!(text.contains("Other treatments: 1 (completed: 1)"));
        assert!(text.contains("Follow-up: Weekly (next visit 2024-06-17)"));
    }

    #[test]
    fn inactive_only_treatments_render_placeholder() {
        let mut bundle = full_bundle();
        for t in &mut bundle.treatments {
            t.status = TreatmentStatus::Completed;
        }
        let text = compose_summary(&bundle, today());
        assert!(text.contains("No active treatments (2 on record)"));
    }

    #[test]
    fn timeline_expands_most_recent_entries_only() {
        let text = compose_summary(&full_bundle(), today());
        assert!(text.contains("Recent Entries (showing 5 of 7):"));
        assert!(text.contains("Observation: Visit 7 - stable"));
        assert!(text.contains("Visit 3"));
        assert!(!text.contains("Visit 2"));
        assert!(!text.contains("Visit 1 "));
    }

    #[test]
    fn statistics_count_all_records() {
        let text = compose_summary(&full_bundle(), today());
        assert!(text.contains("Assessments: 2"));
        assert!(text.contains("Treatments: 2 (active: 1)"));
        assert!(text.contains("Timeline Entries: 7"));
        assert!(text.contains("Family History Conditions: 2"));
    }

    #[test]
    fn card_line_uses_short_forms() {
        let line = patient_card_line(&full_patient(), today());
        assert_eq!(line, "Asha Rao | Female, 23 yrs | 12 Elm, Pune | ICE: Ravi (Brother)");
    }

    #[test]
    fn card_line_without_dob() {
        let line = patient_card_line(&sparse_patient(), today());
        assert_eq!(line, "Asha Rao | N/A, N/A yrs");
    }
}
