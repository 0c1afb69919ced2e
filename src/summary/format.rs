//! Field-level formatters shared by the summary document and the patient card.

use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::models::patient::non_empty;
use crate::models::{Address, DoshaScores, EmergencyContact};

/// Placeholder for a missing date of birth.
pub const AGE_UNKNOWN: &str = "N/A";

/// Placeholder for a missing dosha score triple.
pub const NOT_ASSESSED: &str = "Not assessed";

/// How much of a composite field to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayForm {
    /// Address: street, city, state. Contact: name and relationship.
    Short,
    /// Address adds postal code and country. Contact adds phone and email.
    Full,
}

/// Completed years between `dob` and `today`.
///
/// Calendar-year difference, minus one when this year's birthday has not
/// been reached yet. `None` for a date of birth after `today`.
pub fn calculate_age(dob: NaiveDate, today: NaiveDate) -> Option<i32> {
    if dob > today {
        return None;
    }
    let mut age = today.year() - dob.year();
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        age -= 1;
    }
    Some(age)
}

/// Age as display text. "N/A" without a usable date of birth.
pub fn format_age(dob: Option<NaiveDate>, today: NaiveDate) -> String {
    dob.and_then(|dob| calculate_age(dob, today))
        .map(|age| age.to_string())
        .unwrap_or_else(|| AGE_UNKNOWN.to_string())
}

/// `Vata: v, Pitta: p, Kapha: k`, or "Not assessed".
pub fn format_dosha(scores: Option<&DoshaScores>) -> String {
    match scores {
        Some(s) => format!("Vata: {}, Pitta: {}, Kapha: {}", s.vata, s.pitta, s.kapha),
        None => NOT_ASSESSED.to_string(),
    }
}

/// Render an address. `None` when nothing printable is on file.
///
/// Empty components are dropped so no doubled separators appear.
pub fn format_address(address: Option<&Address>, form: DisplayForm) -> Option<String> {
    match address? {
        Address::Flat(line) => non_empty(Some(line)).map(str::to_string),
        Address::Structured(a) => {
            let mut parts = vec![a.street.as_deref(), a.city.as_deref(), a.state.as_deref()];
            if form == DisplayForm::Full {
                parts.push(a.postal_code.as_deref());
                parts.push(a.country.as_deref());
            }
            let joined = join_present(&parts, ", ");
            if joined.is_empty() {
                non_empty(a.full_address.as_deref()).map(str::to_string)
            } else {
                Some(joined)
            }
        }
    }
}

/// Render an emergency contact. `None` when nothing printable is on file.
pub fn format_emergency_contact(
    contact: Option<&EmergencyContact>,
    form: DisplayForm,
) -> Option<String> {
    match contact? {
        EmergencyContact::Flat(line) => non_empty(Some(line)).map(str::to_string),
        EmergencyContact::Structured(c) => {
            let name = c.name.trim();
            if name.is_empty() && c.phone.trim().is_empty() {
                return None;
            }
            let mut text = match non_empty(Some(&c.relationship)) {
                Some(rel) => format!("{name} ({rel})"),
                None => name.to_string(),
            };
            if form == DisplayForm::Full {
                if let Some(phone) = non_empty(Some(&c.phone)) {
                    text.push_str(&format!(" - {phone}"));
                }
                if let Some(email) = non_empty(c.email.as_deref()) {
                    text.push_str(&format!(", {email}"));
                }
            }
            Some(text.trim().to_string())
        }
    }
}

/// `Mar 1, 2024`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

pub fn format_timestamp_date(ts: NaiveDateTime) -> String {
    format_date(ts.date())
}

/// Join the non-blank items of a list, or `None` for an empty list.
pub fn format_list(items: &[String]) -> Option<String> {
    let refs: Vec<Option<&str>> = items.iter().map(|s| Some(s.as_str())).collect();
    let joined = join_present(&refs, ", ");
    if joined.is_empty() {
        None
    } else {
        Some(joined)
    }
}

/// Upper-case the first character ("female" → "Female").
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Cut `text` to at most `max_chars` characters, marking the cut with "...".
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}...", cut.trim_end())
}

fn join_present(parts: &[Option<&str>], sep: &str) -> String {
    parts
        .iter()
        .filter_map(|p| non_empty(*p))
        .collect::<Vec<_>>()
        .join(sep)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{StructuredAddress, StructuredContact};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn age_before_birthday_subtracts_one() {
        assert_eq!(calculate_age(date(2000, 6, 15), date(2024, 6, 10)), Some(23));
    }

    #[test]
    fn age_after_birthday_is_year_difference() {
        assert_eq!(calculate_age(date(2000, 6, 15), date(2024, 6, 20)), Some(24));
    }

    #[test]
    fn age_on_birthday_counts_the_year() {
        assert_eq!(calculate_age(date(2000, 6, 15), date(2024, 6, 15)), Some(24));
    }

    #[test]
    fn age_earlier_month_subtracts_one() {
        assert_eq!(calculate_age(date(1990, 12, 1), date(2024, 2, 1)), Some(33));
    }

    #[test]
    fn leap_day_birthday_not_reached_on_feb_28() {
        assert_eq!(calculate_age(date(2000, 2, 29), date(2023, 2, 28)), Some(22));
        assert_eq!(calculate_age(date(2000, 2, 29), date(2023, 3, 1)), Some(23));
    }

    #[test]
    fn missing_dob_renders_na() {
        assert_eq!(format_age(None, date(2024, 1, 1)), "N/A");
    }

    #[test]
    fn future_birth_date_has_no_age() {
        assert_eq!(calculate_age(date(2025, 1, 1), date(2024, 6, 10)), None);
        assert_eq!(format_age(Some(date(2024, 6, 11)), date(2024, 6, 10)), "N/A");
        assert_eq!(calculate_age(date(2024, 6, 10), date(2024, 6, 10)), Some(0));
    }

    #[test]
    fn dosha_scores_render_fixed_format() {
        let scores = DoshaScores::new(2, 0, 5);
        assert_eq!(format_dosha(Some(&scores)), "Vata: 2, Pitta: 0, Kapha: 5");
        assert_eq!(format_dosha(None), "Not assessed");
    }

    #[test]
    fn structured_address_drops_empty_fields() {
        let addr = Address::Structured(StructuredAddress {
            street: Some("12 Elm".into()),
            city: Some("Pune".into()),
            state: Some("".into()),
            ..Default::default()
        });
        assert_eq!(
            format_address(Some(&addr), DisplayForm::Short).as_deref(),
            Some("12 Elm, Pune")
        );
        assert_eq!(
            format_address(Some(&addr), DisplayForm::Full).as_deref(),
            Some("12 Elm, Pune")
        );
    }

    #[test]
    fn full_address_adds_postal_code_and_country() {
        let addr = Address::Structured(StructuredAddress {
            street: Some("12 Elm".into()),
            city: Some("Pune".into()),
            state: Some("Maharashtra".into()),
            postal_code: Some("411001".into()),
            country: Some("India".into()),
            full_address: None,
        });
        assert_eq!(
            format_address(Some(&addr), DisplayForm::Short).as_deref(),
            Some("12 Elm, Pune, Maharashtra")
        );
        assert_eq!(
            format_address(Some(&addr), DisplayForm::Full).as_deref(),
            Some("12 Elm, Pune, Maharashtra, 411001, India")
        );
    }

    #[test]
    fn flat_address_is_verbatim() {
        let addr = Address::Flat("Flat 4, Shanti Nagar".into());
        assert_eq!(
            format_address(Some(&addr), DisplayForm::Full).as_deref(),
            Some("Flat 4, Shanti Nagar")
        );
    }

    #[test]
    fn empty_structured_address_falls_back_to_full_address_line() {
        let addr = Address::Structured(StructuredAddress {
            full_address: Some("Near the temple, Kochi".into()),
            ..Default::default()
        });
        assert_eq!(
            format_address(Some(&addr), DisplayForm::Short).as_deref(),
            Some("Near the temple, Kochi")
        );
        let blank = Address::Structured(StructuredAddress::default());
        assert_eq!(format_address(Some(&blank), DisplayForm::Full), None);
        assert_eq!(format_address(None, DisplayForm::Full), None);
    }

    #[test]
    fn emergency_contact_short_and_full_forms() {
        let contact = EmergencyContact::Structured(StructuredContact {
            name: "Ravi".into(),
            relationship: "Brother".into(),
            phone: "98200 00000".into(),
            email: Some("ravi@example.com".into()),
        });
        assert_eq!(
            format_emergency_contact(Some(&contact), DisplayForm::Short).as_deref(),
            Some("Ravi (Brother)")
        );
        assert_eq!(
            format_emergency_contact(Some(&contact), DisplayForm::Full).as_deref(),
            Some("Ravi (Brother) - 98200 00000, ravi@example.com")
        );
    }

    #[test]
    fn emergency_contact_without_email_omits_separator() {
        let contact = EmergencyContact::Structured(StructuredContact {
            name: "Meera".into(),
            relationship: "Mother".into(),
            phone: "98200 12345".into(),
            email: None,
        });
        assert_eq!(
            format_emergency_contact(Some(&contact), DisplayForm::Full).as_deref(),
            Some("Meera (Mother) - 98200 12345")
        );
    }

    #[test]
    fn flat_emergency_contact_passes_through() {
        let contact = EmergencyContact::Flat("Ravi 98200 00000".into());
        assert_eq!(
            format_emergency_contact(Some(&contact), DisplayForm::Short).as_deref(),
            Some("Ravi 98200 00000")
        );
    }

    #[test]
    fn list_skips_blank_items() {
        let items = vec!["Diabetes".to_string(), " ".to_string(), "Asthma".to_string()];
        assert_eq!(format_list(&items).as_deref(), Some("Diabetes, Asthma"));
        assert_eq!(format_list(&[]), None);
    }

    #[test]
    fn truncation_is_char_safe() {
        assert_eq!(truncate_chars("abc", 5), "abc");
        assert_eq!(truncate_chars("déjà vu", 4), "déjà...");
    }

    #[test]
    fn date_format_matches_card_style() {
        assert_eq!(format_date(date(2000, 6, 5)), "Jun 5, 2000");
    }
}
