//! Restaurants view: delivery distances and delivery times by city,
//! order type, traffic and festival days.

use super::aggregator::{distinct_count, group_by, mean, mean_std_by, round2, MeanStd};
use crate::models::CleanedRecord;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FestivalTimes {
    /// Delivery time on festival days.
    pub festival: Option<MeanStd>,
    /// Delivery time on regular days.
    pub regular: Option<MeanStd>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityTime {
    pub city: String,
    #[serde(flatten)]
    pub time: MeanStd,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityOrderTypeTime {
    pub city: String,
    pub order_type: String,
    #[serde(flatten)]
    pub time: MeanStd,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityTrafficTime {
    pub city: String,
    pub traffic: String,
    #[serde(flatten)]
    pub time: MeanStd,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityDistance {
    pub city: String,
    pub avg_distance_km: f64,
}

/// Aggregates behind the restaurants view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RestaurantsView {
    pub distinct_couriers: usize,
    pub avg_distance_km: Option<f64>,
    pub festival_times: FestivalTimes,
    pub time_by_city: Vec<CityTime>,
    pub time_by_city_order_type: Vec<CityOrderTypeTime>,
    pub distance_by_city: Vec<CityDistance>,
    pub time_by_city_traffic: Vec<CityTrafficTime>,
}

impl RestaurantsView {
    pub fn compute(records: &[&CleanedRecord]) -> Self {
        Self {
            distinct_couriers: distinct_couriers(records),
            avg_distance_km: avg_distance_km(records),
            festival_times: festival_times(records),
            time_by_city: time_by_city(records),
            time_by_city_order_type: time_by_city_order_type(records),
            distance_by_city: distance_by_city(records),
            time_by_city_traffic: time_by_city_traffic(records),
        }
    }
}

pub fn distinct_couriers(records: &[&CleanedRecord]) -> usize {
    distinct_count(records, |r| r.courier_id.clone())
}

/// Mean restaurant-to-customer distance, rounded to two decimals.
pub fn avg_distance_km(records: &[&CleanedRecord]) -> Option<f64> {
    let distances: Vec<f64> = records.iter().map(|r| r.delivery_distance_km()).collect();
    mean(&distances).map(round2)
}

pub fn festival_times(records: &[&CleanedRecord]) -> FestivalTimes {
    let times = mean_std_by(records, |r| r.festival.clone(), |r| r.time_taken as f64);
    FestivalTimes {
        festival: times.get("Yes").map(|t| t.rounded()),
        regular: times.get("No").map(|t| t.rounded()),
    }
}

pub fn time_by_city(records: &[&CleanedRecord]) -> Vec<CityTime> {
    mean_std_by(records, |r| r.city.clone(), |r| r.time_taken as f64)
        .into_iter()
        .map(|(city, time)| CityTime { city, time })
        .collect()
}

pub fn time_by_city_order_type(records: &[&CleanedRecord]) -> Vec<CityOrderTypeTime> {
    mean_std_by(
        records,
        |r| (r.city.clone(), r.order_type.clone()),
        |r| r.time_taken as f64,
    )
    .into_iter()
    .map(|((city, order_type), time)| CityOrderTypeTime {
        city,
        order_type,
        time,
    })
    .collect()
}

pub fn time_by_city_traffic(records: &[&CleanedRecord]) -> Vec<CityTrafficTime> {
    mean_std_by(
        records,
        |r| (r.city.clone(), r.traffic_density.clone()),
        |r| r.time_taken as f64,
    )
    .into_iter()
    .map(|((city, traffic), time)| CityTrafficTime {
        city,
        traffic,
        time,
    })
    .collect()
}

pub fn distance_by_city(records: &[&CleanedRecord]) -> Vec<CityDistance> {
    group_by(records, |r| r.city.clone())
        .into_iter()
        .filter_map(|(city, group)| {
            let distances: Vec<f64> = group.iter().map(|r| r.delivery_distance_km()).collect();
            Some(CityDistance {
                city,
                avg_distance_km: round2(mean(&distances)?),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::order;

    fn on_festival(festival: &str, minutes: u32) -> CleanedRecord {
        CleanedRecord {
            festival: festival.to_string(),
            ..order("0x1", "A", "Urban", "Low", minutes)
        }
    }

    #[test]
    fn test_distinct_couriers() {
        let orders = vec![
            order("1", "A", "Urban", "Low", 20),
            order("2", "B", "Urban", "Low", 20),
            order("3", "A", "Metropolitian", "Jam", 30),
        ];
        let refs: Vec<&CleanedRecord> = orders.iter().collect();
        assert_eq!(distinct_couriers(&refs), 2);
    }

    #[test]
    fn test_avg_distance_is_rounded() {
        let orders = vec![order("1", "A", "Urban", "Low", 20)];
        let refs: Vec<&CleanedRecord> = orders.iter().collect();

        let expected = round2(orders[0].delivery_distance_km());
        assert_eq!(avg_distance_km(&refs), Some(expected));
        assert_eq!(avg_distance_km(&[]), None);
    }

    #[test]
    fn test_festival_times() {
        let orders = vec![
            on_festival("Yes", 40),
            on_festival("Yes", 45),
            on_festival("No", 20),
        ];
        let refs: Vec<&CleanedRecord> = orders.iter().collect();

        let times = festival_times(&refs);
        let festival = times.festival.unwrap();
        assert_eq!(festival.mean, 42.5);
        assert_eq!(festival.std, Some(3.54));
        assert_eq!(times.regular.unwrap().mean, 20.0);
        assert_eq!(times.regular.unwrap().std, None);
    }

    #[test]
    fn test_festival_group_absent() {
        let orders = vec![on_festival("No", 20), on_festival("No", 30)];
        let refs: Vec<&CleanedRecord> = orders.iter().collect();

        let times = festival_times(&refs);
        assert!(times.festival.is_none());
        assert_eq!(times.regular.unwrap().mean, 25.0);
    }

    #[test]
    fn test_time_by_city_groups() {
        let orders = vec![
            CleanedRecord {
                order_type: "Meal".to_string(),
                ..order("1", "A", "Urban", "Low", 20)
            },
            order("2", "B", "Urban", "Jam", 30),
            order("3", "C", "Metropolitian", "Jam", 40),
        ];
        let refs: Vec<&CleanedRecord> = orders.iter().collect();

        let by_city = time_by_city(&refs);
        assert_eq!(by_city[0].city, "Metropolitian");
        assert_eq!(by_city[1].time.mean, 25.0);

        let by_type = time_by_city_order_type(&refs);
        assert_eq!(by_type.len(), 3);
        assert_eq!(by_type[1].order_type, "Meal");
        assert_eq!(by_type[1].time.mean, 20.0);

        let by_traffic = time_by_city_traffic(&refs);
        assert_eq!(by_traffic.len(), 3);
        assert_eq!(by_traffic[0].traffic, "Jam");
        assert_eq!(by_traffic[0].time.mean, 40.0);
    }

    #[test]
    fn test_distance_by_city() {
        let far = CleanedRecord {
            delivery_latitude: 22.845049,
            delivery_longitude: 75.992471,
            ..order("1", "A", "Metropolitian", "Jam", 30)
        };
        let near = order("2", "B", "Urban", "Low", 20);
        let orders = vec![far, near];
        let refs: Vec<&CleanedRecord> = orders.iter().collect();

        let distances = distance_by_city(&refs);
        assert_eq!(distances.len(), 2);
        assert_eq!(distances[0].city, "Metropolitian");
        assert!(distances[0].avg_distance_km > distances[1].avg_distance_km);
    }
}
