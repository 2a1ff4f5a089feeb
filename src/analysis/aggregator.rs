//! Group-by helpers and summary statistics.
//!
//! Groups are returned in ascending key order. Statistics skip NaN values,
//! so a missing rating does not poison a group's mean.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Mean and sample standard deviation of a group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeanStd {
    pub mean: f64,
    /// `None` when the group has fewer than two values.
    pub std: Option<f64>,
}

impl MeanStd {
    /// Summarise a set of values; `None` if there are none.
    pub fn of(values: &[f64]) -> Option<Self> {
        Some(Self {
            mean: mean(values)?,
            std: std_dev(values),
        })
    }

    /// Both figures rounded to two decimals.
    pub fn rounded(self) -> Self {
        Self {
            mean: round2(self.mean),
            std: self.std.map(round2),
        }
    }
}

/// Group items by key.
pub fn group_by<'a, T, K, F>(items: &[&'a T], key: F) -> BTreeMap<K, Vec<&'a T>>
where
    K: Ord,
    F: Fn(&T) -> K,
{
    let mut grouped: BTreeMap<K, Vec<&'a T>> = BTreeMap::new();

    for item in items {
        grouped.entry(key(*item)).or_default().push(*item);
    }

    grouped
}

/// Count items per key.
pub fn count_by<T, K, F>(items: &[&T], key: F) -> BTreeMap<K, usize>
where
    K: Ord,
    F: Fn(&T) -> K,
{
    let mut counts: BTreeMap<K, usize> = BTreeMap::new();

    for item in items {
        *counts.entry(key(*item)).or_default() += 1;
    }

    counts
}

/// Number of distinct keys.
pub fn distinct_count<T, K, F>(items: &[&T], key: F) -> usize
where
    K: Ord,
    F: Fn(&T) -> K,
{
    items.iter().map(|item| key(*item)).collect::<BTreeSet<_>>().len()
}

/// Mean and standard deviation of `value` per key.
pub fn mean_std_by<T, K, F, V>(items: &[&T], key: F, value: V) -> BTreeMap<K, MeanStd>
where
    K: Ord,
    F: Fn(&T) -> K,
    V: Fn(&T) -> f64,
{
    group_by(items, key)
        .into_iter()
        .filter_map(|(k, group)| {
            let values: Vec<f64> = group.iter().map(|item| value(*item)).collect();
            MeanStd::of(&values).map(|stats| (k, stats))
        })
        .collect()
}

/// Arithmetic mean, ignoring NaN.
pub fn mean(values: &[f64]) -> Option<f64> {
    let present: Vec<f64> = present(values);
    if present.is_empty() {
        return None;
    }
    Some(present.iter().sum::<f64>() / present.len() as f64)
}

/// Sample standard deviation (n - 1 denominator), ignoring NaN.
pub fn std_dev(values: &[f64]) -> Option<f64> {
    let present: Vec<f64> = present(values);
    if present.len() < 2 {
        return None;
    }
    let mean = present.iter().sum::<f64>() / present.len() as f64;
    let variance = present.iter().map(|v| (v - mean).powi(2)).sum::<f64>()
        / (present.len() - 1) as f64;
    Some(variance.sqrt())
}

/// Median, averaging the two middle values for even counts. Ignores NaN.
pub fn median(values: &[f64]) -> Option<f64> {
    let mut sorted: Vec<f64> = present(values);
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn present(values: &[f64]) -> Vec<f64> {
    values.iter().copied().filter(|v| !v.is_nan()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Delivery {
        city: &'static str,
        minutes: f64,
    }

    fn create_test_deliveries() -> Vec<Delivery> {
        vec![
            Delivery {
                city: "Urban",
                minutes: 20.0,
            },
            Delivery {
                city: "Metropolitian",
                minutes: 30.0,
            },
            Delivery {
                city: "Urban",
                minutes: 24.0,
            },
            Delivery {
                city: "Metropolitian",
                minutes: 34.0,
            },
            Delivery {
                city: "Semi-Urban",
                minutes: 49.0,
            },
        ]
    }

    #[test]
    fn test_group_by_sorted_keys() {
        let deliveries = create_test_deliveries();
        let refs: Vec<&Delivery> = deliveries.iter().collect();

        let grouped = group_by(&refs, |d| d.city);
        let keys: Vec<_> = grouped.keys().copied().collect();

        assert_eq!(keys, vec!["Metropolitian", "Semi-Urban", "Urban"]);
        assert_eq!(grouped["Urban"].len(), 2);
        assert_eq!(grouped["Urban"][0].minutes, 20.0);
    }

    #[test]
    fn test_count_and_distinct() {
        let deliveries = create_test_deliveries();
        let refs: Vec<&Delivery> = deliveries.iter().collect();

        let counts = count_by(&refs, |d| d.city);
        assert_eq!(counts.get("Metropolitian"), Some(&2));
        assert_eq!(counts.get("Semi-Urban"), Some(&1));
        assert_eq!(distinct_count(&refs, |d| d.city), 3);
    }

    #[test]
    fn test_mean_std_by() {
        let deliveries = create_test_deliveries();
        let refs: Vec<&Delivery> = deliveries.iter().collect();

        let stats = mean_std_by(&refs, |d| d.city, |d| d.minutes);
        let urban = stats["Urban"];
        assert_eq!(urban.mean, 22.0);
        assert!((urban.std.unwrap() - 8.0_f64.sqrt()).abs() < 1e-12);
        assert_eq!(stats["Semi-Urban"].std, None);
    }

    #[test]
    fn test_sample_std_dev() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        // Population std is 2.0; sample std is sqrt(32 / 7).
        let std = std_dev(&values).unwrap();
        assert!((std - (32.0_f64 / 7.0).sqrt()).abs() < 1e-12);
        assert_eq!(std_dev(&[1.0]), None);
    }

    #[test]
    fn test_median_even_and_odd() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
        assert_eq!(median(&[]), None);
    }

    #[test]
    fn test_nan_is_skipped() {
        assert_eq!(mean(&[f64::NAN, 2.0, 4.0]), Some(3.0));
        assert_eq!(mean(&[f64::NAN]), None);
        assert_eq!(median(&[f64::NAN, 5.0]), Some(5.0));
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(26.548_9), 26.55);
        assert_eq!(round2(3.0), 3.0);
        let rounded = MeanStd {
            mean: 1.234,
            std: Some(0.126),
        }
        .rounded();
        assert_eq!(rounded.mean, 1.23);
        assert_eq!(rounded.std, Some(0.13));
    }
}
