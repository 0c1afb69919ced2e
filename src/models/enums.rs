use crate::db::DatabaseError;
use serde::{Deserialize, Serialize};

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = DatabaseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(DatabaseError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

str_enum!(Gender {
    Male => "male",
    Female => "female",
    Other => "other",
    Unknown => "unknown",
});

str_enum!(MaritalStatus {
    Single => "single",
    Married => "married",
    Divorced => "divorced",
    Widowed => "widowed",
    Separated => "separated",
});

str_enum!(OccupationType {
    Sedentary => "sedentary",
    Moderate => "moderate",
    Heavy => "heavy",
});

str_enum!(Dosha {
    Vata => "vata",
    Pitta => "pitta",
    Kapha => "kapha",
});

str_enum!(TreatmentStatus {
    Draft => "draft",
    Active => "active",
    Completed => "completed",
    Cancelled => "cancelled",
});

str_enum!(TimelineEntryType {
    Assessment => "assessment",
    Treatment => "treatment",
    Observation => "observation",
    LabResult => "lab_result",
    SymptomUpdate => "symptom_update",
    TherapySession => "therapy_session",
    Followup => "followup",
    Note => "note",
});

str_enum!(HerbDoshaEffect {
    Vata => "vata",
    Pitta => "pitta",
    Kapha => "kapha",
    VataPitta => "vata-pitta",
    PittaKapha => "pitta-kapha",
    VataKapha => "vata-kapha",
    Tridoshic => "tridoshic",
});

str_enum!(Virya {
    Ushna => "ushna",
    Shita => "shita",
    Variable => "variable",
});

str_enum!(InteractionSeverity {
    Low => "low",
    Moderate => "moderate",
    High => "high",
});

impl Dosha {
    /// Tie-break order used wherever one dosha has to be picked.
    pub fn all() -> [Dosha; 3] {
        [Self::Vata, Self::Pitta, Self::Kapha]
    }
}

impl Default for TreatmentStatus {
    fn default() -> Self {
        Self::Draft
    }
}

impl Default for TimelineEntryType {
    fn default() -> Self {
        Self::Note
    }
}

impl TimelineEntryType {
    /// Human label used in summaries ("lab_result" → "Lab Result").
    pub fn label(&self) -> &'static str {
        match self {
            Self::Assessment => "Assessment",
            Self::Treatment => "Treatment",
            Self::Observation => "Observation",
            Self::LabResult => "Lab Result",
            Self::SymptomUpdate => "Symptom Update",
            Self::TherapySession => "Therapy Session",
            Self::Followup => "Follow-up",
            Self::Note => "Note",
        }
    }
}
