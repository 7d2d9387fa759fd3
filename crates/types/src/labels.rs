// crates/types/src/labels.rs
//! Closed label sets attached to a record.
//!
//! Both enums serialize as their display label so the on-disk JSON stays
//! human readable. Parsing also accepts the Russian labels older record
//! files were written with. When reading a file, a blank or unrecognised
//! label becomes the default variant so one bad field never rejects the
//! whole file.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// A label string that does not name any variant of the target enum.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}'")]
pub struct ParseLabelError {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! label_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $( $variant:ident => $label:literal $(| $legacy:literal)* ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub enum $name {
            #[default]
            $( $variant ),+
        }

        impl $name {
            /// Every variant, in presentation order. The first one is the default.
            pub const ALL: &'static [$name] = &[$( $name::$variant ),+];

            pub fn label(self) -> &'static str {
                match self {
                    $( $name::$variant => $label ),+
                }
            }

            /// Labels older record files used for this variant.
            pub fn legacy_labels(self) -> &'static [&'static str] {
                match self {
                    $( $name::$variant => &[$( $legacy ),*] ),+
                }
            }

            fn matches_label(self, wanted: &str) -> bool {
                self.label().to_lowercase() == wanted
                    || self.legacy_labels().iter().any(|l| l.to_lowercase() == wanted)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = ParseLabelError;

            /// Case-insensitive match against the display and legacy labels.
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim().to_lowercase();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.matches_label(&wanted))
                    .ok_or_else(|| ParseLabelError {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.label())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                if raw.trim().is_empty() {
                    return Ok(Self::default());
                }
                match raw.parse() {
                    Ok(value) => Ok(value),
                    Err(e) => {
                        tracing::warn!(error = %e, "unrecognised label in record file, using default");
                        Ok(Self::default())
                    }
                }
            }
        }
    };
}

label_enum! {
    /// Where an application currently stands.
    Status, "status" {
        New => "New" | "Новая",
        PlanningToApply => "Planning to Apply" | "Планирую откликнуться",
        Applied => "Applied" | "Откликнулся",
        TestAssignment => "Test Assignment" | "Тестовое задание",
        Interview => "Interview" | "Собеседование",
        Offer => "Offer" | "Оффер",
        Rejected => "Rejected" | "Отказ",
        Archived => "Archived" | "В архиве",
    }
}

label_enum! {
    /// Experience the opening asks for.
    ExperienceLevel, "experience level" {
        Unspecified => "Unspecified" | "Не указан",
        NoExperience => "No Experience" | "Без опыта",
        UnderOneYear => "Less than 1 year" | "Менее 1 года",
        OneToThreeYears => "1-3 years" | "1-3 года",
        ThreeToSixYears => "3-6 years" | "3-6 лет",
        OverSixYears => "More than 6 years" | "Более 6 лет",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_first_variant() {
        assert_eq!(Status::default(), Status::ALL[0]);
        assert_eq!(Status::default(), Status::New);
        assert_eq!(ExperienceLevel::default(), ExperienceLevel::Unspecified);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("planning to apply".parse::<Status>().unwrap(), Status::PlanningToApply);
        assert_eq!("  OFFER ".parse::<Status>().unwrap(), Status::Offer);
        assert_eq!(
            "less THAN 1 year".parse::<ExperienceLevel>().unwrap(),
            ExperienceLevel::UnderOneYear
        );
    }

    #[test]
    fn test_parse_unknown_label() {
        let err = "Hired".parse::<Status>().unwrap_err();
        assert_eq!(err.kind, "status");
        assert_eq!(err.to_string(), "unknown status 'Hired'");
    }

    #[test]
    fn test_serde_uses_labels() {
        let json = serde_json::to_string(&Status::TestAssignment).unwrap();
        assert_eq!(json, "\"Test Assignment\"");
        let back: ExperienceLevel = serde_json::from_str("\"3-6 years\"").unwrap();
        assert_eq!(back, ExperienceLevel::ThreeToSixYears);
    }

    #[test]
    fn test_blank_label_deserializes_to_default() {
        let status: Status = serde_json::from_str("\"\"").unwrap();
        assert_eq!(status, Status::New);
    }

    #[test]
    fn test_unknown_label_deserializes_to_default() {
        let status: Status = serde_json::from_str("\"Hired\"").unwrap();
        assert_eq!(status, Status::New);
        let level: ExperienceLevel = serde_json::from_str("\"a decade\"").unwrap();
        assert_eq!(level, ExperienceLevel::Unspecified);
    }

    #[test]
    fn test_legacy_labels_parse() {
        assert_eq!("Собеседование".parse::<Status>().unwrap(), Status::Interview);
        assert_eq!("в архиве".parse::<Status>().unwrap(), Status::Archived);
        let level: ExperienceLevel = serde_json::from_str("\"3-6 лет\"").unwrap();
        assert_eq!(level, ExperienceLevel::ThreeToSixYears);
        // serialization always writes the current label
        assert_eq!(serde_json::to_string(&level).unwrap(), "\"3-6 years\"");
    }
}
