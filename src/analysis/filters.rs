//! Row filters applied to the cleaned table before aggregation.

use crate::models::{dmy_date, CleanedRecord};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Traffic densities selectable by default.
pub const TRAFFIC_LEVELS: [&str; 4] = ["Low", "Medium", "High", "Jam"];

/// Weather conditions selectable by default.
pub const WEATHER_CONDITIONS: [&str; 5] = [
    "conditions Cloudy",
    "conditions Fog",
    "conditions Sandstorm",
    "conditions Sunny",
    "conditions Windy",
];

/// Which filters a view applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterScope {
    /// Date cutoff and traffic only (company view).
    DateAndTraffic,
    /// Date cutoff, traffic and weather.
    All,
}

/// Date, traffic and weather filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSet {
    /// Keep orders placed strictly before this date (`DD-MM-YYYY`).
    #[serde(
        default,
        with = "dmy_date::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub until: Option<NaiveDate>,

    /// Traffic densities to keep.
    #[serde(default = "default_traffic")]
    pub traffic: Vec<String>,

    /// Weather conditions to keep.
    #[serde(default = "default_weather")]
    pub weather: Vec<String>,
}

impl Default for FilterSet {
    fn default() -> Self {
        Self {
            until: None,
            traffic: default_traffic(),
            weather: default_weather(),
        }
    }
}

fn default_traffic() -> Vec<String> {
    TRAFFIC_LEVELS.iter().map(|s| s.to_string()).collect()
}

fn default_weather() -> Vec<String> {
    WEATHER_CONDITIONS.iter().map(|s| s.to_string()).collect()
}

impl FilterSet {
    /// Whether a record passes the filters in `scope`.
    pub fn matches(&self, record: &CleanedRecord, scope: FilterScope) -> bool {
        if let Some(until) = self.until {
            if record.order_date >= until {
                return false;
            }
        }

        if !self.traffic.contains(&record.traffic_density) {
            return false;
        }

        match scope {
            FilterScope::DateAndTraffic => true,
            FilterScope::All => self.weather.contains(&record.weather),
        }
    }

    /// Records passing the filters, in their original order.
    pub fn apply<'a>(
        &self,
        records: &'a [CleanedRecord],
        scope: FilterScope,
    ) -> Vec<&'a CleanedRecord> {
        records
            .iter()
            .filter(|record| self.matches(record, scope))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::cleaned_on;

    fn record(date: (i32, u32, u32), traffic: &str, weather: &str) -> CleanedRecord {
        CleanedRecord {
            traffic_density: traffic.to_string(),
            weather: weather.to_string(),
            ..cleaned_on(date)
        }
    }

    #[test]
    fn test_default_keeps_known_categories() {
        let filters = FilterSet::default();
        let r = record((2022, 3, 1), "Jam", "conditions Fog");
        assert!(filters.matches(&r, FilterScope::All));
    }

    #[test]
    fn test_until_is_exclusive() {
        let filters = FilterSet {
            until: NaiveDate::from_ymd_opt(2022, 3, 3),
            ..FilterSet::default()
        };
        let before = record((2022, 3, 2), "Low", "conditions Sunny");
        let on = record((2022, 3, 3), "Low", "conditions Sunny");
        assert!(filters.matches(&before, FilterScope::All));
        assert!(!filters.matches(&on, FilterScope::All));
    }

    #[test]
    fn test_weather_only_in_full_scope() {
        let filters = FilterSet {
            weather: vec!["conditions Sunny".to_string()],
            ..FilterSet::default()
        };
        let stormy = record((2022, 3, 2), "High", "conditions Stormy");
        assert!(filters.matches(&stormy, FilterScope::DateAndTraffic));
        assert!(!filters.matches(&stormy, FilterScope::All));
    }

    #[test]
    fn test_apply_preserves_order() {
        let records = vec![
            record((2022, 3, 1), "Low", "conditions Sunny"),
            record((2022, 3, 2), "Jam", "conditions Sunny"),
            record((2022, 3, 3), "Low", "conditions Windy"),
        ];
        let filters = FilterSet {
            traffic: vec!["Low".to_string()],
            ..FilterSet::default()
        };

        let kept = filters.apply(&records, FilterScope::All);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].order_date, records[0].order_date);
        assert_eq!(kept[1].order_date, records[2].order_date);
    }

    #[test]
    fn test_empty_selection_keeps_nothing() {
        let filters = FilterSet {
            traffic: Vec::new(),
            ..FilterSet::default()
        };
        let records = vec![record((2022, 3, 1), "Low", "conditions Sunny")];
        assert!(filters.apply(&records, FilterScope::All).is_empty());
    }
}
