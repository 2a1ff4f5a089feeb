//! Couriers view: age and vehicle extremes, ratings, and the fastest and
//! slowest couriers per city.

use super::aggregator::{group_by, mean, mean_std_by, MeanStd};
use crate::models::CleanedRecord;
use serde::{Deserialize, Serialize};

/// Cities ranked in the top-courier tables, in display order.
pub const RANKED_CITIES: [&str; 3] = ["Metropolitian", "Urban", "Semi-Urban"];

/// Default number of couriers listed per city.
pub const DEFAULT_TOP_N: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OverallMetrics {
    pub oldest_age: Option<i32>,
    pub youngest_age: Option<i32>,
    pub best_vehicle_condition: Option<i32>,
    pub worst_vehicle_condition: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourierRating {
    pub courier_id: String,
    pub mean_rating: f64,
}

/// Rating statistics for one traffic density or weather condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingStats {
    pub group: String,
    #[serde(flatten)]
    pub rating: MeanStd,
}

/// A courier's quickest (or slowest) delivery in a city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourierSpeed {
    pub city: String,
    pub courier_id: String,
    pub time_taken: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ranking {
    Fastest,
    Slowest,
}

/// Aggregates behind the couriers view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CouriersView {
    pub overall: OverallMetrics,
    pub ratings_by_courier: Vec<CourierRating>,
    pub ratings_by_traffic: Vec<RatingStats>,
    pub ratings_by_weather: Vec<RatingStats>,
    pub fastest: Vec<CourierSpeed>,
    pub slowest: Vec<CourierSpeed>,
}

impl CouriersView {
    pub fn compute(records: &[&CleanedRecord], top_n: usize) -> Self {
        Self {
            overall: overall_metrics(records),
            ratings_by_courier: ratings_by_courier(records),
            ratings_by_traffic: rating_stats_by(records, |r| r.traffic_density.clone()),
            ratings_by_weather: rating_stats_by(records, |r| r.weather.clone()),
            fastest: top_couriers(records, Ranking::Fastest, top_n),
            slowest: top_couriers(records, Ranking::Slowest, top_n),
        }
    }
}

pub fn overall_metrics(records: &[&CleanedRecord]) -> OverallMetrics {
    OverallMetrics {
        oldest_age: records.iter().map(|r| r.courier_age).max(),
        youngest_age: records.iter().map(|r| r.courier_age).min(),
        best_vehicle_condition: records.iter().map(|r| r.vehicle_condition).max(),
        worst_vehicle_condition: records.iter().map(|r| r.vehicle_condition).min(),
    }
}

pub fn ratings_by_courier(records: &[&CleanedRecord]) -> Vec<CourierRating> {
    group_by(records, |r| r.courier_id.clone())
        .into_iter()
        .filter_map(|(courier_id, group)| {
            let ratings: Vec<f64> = group.iter().map(|r| r.courier_rating).collect();
            Some(CourierRating {
                courier_id,
                mean_rating: mean(&ratings)?,
            })
        })
        .collect()
}

/// Mean and standard deviation of ratings per group.
pub fn rating_stats_by<F>(records: &[&CleanedRecord], key: F) -> Vec<RatingStats>
where
    F: Fn(&CleanedRecord) -> String,
{
    mean_std_by(records, key, |r| r.courier_rating)
        .into_iter()
        .map(|(group, rating)| RatingStats { group, rating })
        .collect()
}

/// The `n` fastest or slowest couriers in each ranked city.
///
/// Each courier is represented by their minimum delivery time in the city.
/// Ties are broken by courier ID.
pub fn top_couriers(records: &[&CleanedRecord], ranking: Ranking, n: usize) -> Vec<CourierSpeed> {
    let best_times = group_by(records, |r| (r.city.clone(), r.courier_id.clone()));

    let mut result = Vec::new();
    for city in RANKED_CITIES {
        let mut in_city: Vec<CourierSpeed> = best_times
            .iter()
            .filter(|((c, _), _)| c == city)
            .filter_map(|((c, courier), group)| {
                let time_taken = group.iter().map(|r| r.time_taken).min()?;
                Some(CourierSpeed {
                    city: c.clone(),
                    courier_id: courier.clone(),
                    time_taken,
                })
            })
            .collect();

        // Groups arrive sorted by courier ID; the stable sort keeps that for ties.
        match ranking {
            Ranking::Fastest => in_city.sort_by_key(|s| s.time_taken),
            Ranking::Slowest => in_city.sort_by_key(|s| std::cmp::Reverse(s.time_taken)),
        }
        in_city.truncate(n);
        result.extend(in_city);
    }

    result
}
