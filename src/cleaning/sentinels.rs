//! Missing-value sentinels.
//!
//! The dataset marks missing values with literal strings rather than empty
//! cells. Both the bare and the trailing-space spellings appear in the
//! source, so every check lists both.

use crate::models::RawRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a row was left out of the cleaned table.
///
/// Variants are declared in check order; the first matching check wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropReason {
    MissingTrafficDensity,
    MissingCity,
    MissingWeather,
    MissingAge,
    MissingWeatherCondition,
    MissingFestival,
    MissingMultipleDeliveries,
    /// A non-sentinel value that could not be converted (drop policy only).
    CoercionFailure,
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DropReason::MissingTrafficDensity => write!(f, "Missing traffic density"),
            DropReason::MissingCity => write!(f, "Missing city"),
            DropReason::MissingWeather => write!(f, "Missing weather"),
            DropReason::MissingAge => write!(f, "Missing courier age"),
            DropReason::MissingWeatherCondition => write!(f, "Missing weather condition"),
            DropReason::MissingFestival => write!(f, "Missing festival flag"),
            DropReason::MissingMultipleDeliveries => write!(f, "Missing multiple deliveries"),
            DropReason::CoercionFailure => write!(f, "Unconvertible value"),
        }
    }
}

/// One sentinel test: a column and the literals that mark it missing.
#[derive(Debug, Clone, Copy)]
pub struct SentinelCheck {
    pub reason: DropReason,
    pub column: &'static str,
    pub literals: &'static [&'static str],
}

impl SentinelCheck {
    /// Whether the record's value for this column is one of the literals.
    pub fn matches(&self, record: &RawRecord) -> bool {
        record
            .field(self.column)
            .is_some_and(|value| self.literals.contains(&value))
    }
}

const NAN: &[&str] = &["NaN", "NaN "];
const CONDITIONS_NAN: &[&str] = &["conditions NaN", "conditions NaN "];

/// Every sentinel check, in the order rows are tested.
pub const MISSING_SENTINELS: [SentinelCheck; 7] = [
    SentinelCheck {
        reason: DropReason::MissingTrafficDensity,
        column: "Road_traffic_density",
        literals: NAN,
    },
    SentinelCheck {
        reason: DropReason::MissingCity,
        column: "City",
        literals: NAN,
    },
    SentinelCheck {
        reason: DropReason::MissingWeather,
        column: "Weatherconditions",
        literals: NAN,
    },
    SentinelCheck {
        reason: DropReason::MissingAge,
        column: "Delivery_person_Age",
        literals: NAN,
    },
    SentinelCheck {
        reason: DropReason::MissingWeatherCondition,
        column: "Weatherconditions",
        literals: CONDITIONS_NAN,
    },
    SentinelCheck {
        reason: DropReason::MissingFestival,
        column: "Festival",
        literals: NAN,
    },
    SentinelCheck {
        reason: DropReason::MissingMultipleDeliveries,
        column: "multiple_deliveries",
        literals: NAN,
    },
];

/// The first sentinel check the record fails, if any.
pub fn first_missing(record: &RawRecord) -> Option<DropReason> {
    MISSING_SENTINELS
        .iter()
        .find(|check| check.matches(record))
        .map(|check| check.reason)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::raw_record;

    #[test]
    fn test_valid_record_has_no_missing_fields() {
        assert_eq!(first_missing(&raw_record()), None);
    }

    #[test]
    fn test_both_spellings_are_sentinels() {
        for literal in ["NaN", "NaN "] {
            let record = RawRecord {
                city: literal.to_string(),
                ..raw_record()
            };
            assert_eq!(first_missing(&record), Some(DropReason::MissingCity));
        }
    }

    #[test]
    fn test_sentinel_match_is_exact() {
        let record = RawRecord {
            city: " NaN".to_string(),
            festival: "nan".to_string(),
            ..raw_record()
        };
        assert_eq!(first_missing(&record), None);
    }

    #[test]
    fn test_check_order_reports_first_reason() {
        let record = RawRecord {
            traffic_density: "NaN ".to_string(),
            city: "NaN ".to_string(),
            multiple_deliveries: "NaN ".to_string(),
            ..raw_record()
        };
        assert_eq!(
            first_missing(&record),
            Some(DropReason::MissingTrafficDensity)
        );

        let record = RawRecord {
            courier_age: "NaN ".to_string(),
            weather: "conditions NaN".to_string(),
            ..raw_record()
        };
        assert_eq!(first_missing(&record), Some(DropReason::MissingAge));
    }

    #[test]
    fn test_weather_variants() {
        let record = RawRecord {
            weather: "NaN".to_string(),
            ..raw_record()
        };
        assert_eq!(first_missing(&record), Some(DropReason::MissingWeather));

        let record = RawRecord {
            weather: "conditions NaN ".to_string(),
            ..raw_record()
        };
        assert_eq!(
            first_missing(&record),
            Some(DropReason::MissingWeatherCondition)
        );
    }

    #[test]
    fn test_checks_follow_reason_order() {
        let reasons: Vec<_> = MISSING_SENTINELS.iter().map(|c| c.reason).collect();
        let mut sorted = reasons.clone();
        sorted.sort();
        assert_eq!(reasons, sorted);
    }
}
