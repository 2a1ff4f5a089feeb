//! Company view: order volume over time, traffic mix and central delivery
//! locations per city.

use super::aggregator::{count_by, distinct_count, group_by, median};
use crate::models::CleanedRecord;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyOrders {
    pub date: NaiveDate,
    pub orders: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficShare {
    pub traffic: String,
    pub orders: usize,
    /// Fraction of all orders, between 0 and 1.
    pub share: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityTrafficOrders {
    pub city: String,
    pub traffic: String,
    pub orders: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyOrders {
    pub week: String,
    pub orders: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyCourierLoad {
    pub week: String,
    pub orders: usize,
    pub couriers: usize,
    pub orders_per_courier: f64,
}

/// Median delivery location of a city under one traffic density.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CentralLocation {
    pub city: String,
    pub traffic: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Aggregates behind the company view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyView {
    pub orders_by_day: Vec<DailyOrders>,
    pub traffic_share: Vec<TrafficShare>,
    pub orders_by_city_traffic: Vec<CityTrafficOrders>,
    pub orders_by_week: Vec<WeeklyOrders>,
    pub orders_per_courier_by_week: Vec<WeeklyCourierLoad>,
    pub central_locations: Vec<CentralLocation>,
}

impl CompanyView {
    pub fn compute(records: &[&CleanedRecord]) -> Self {
        Self {
            orders_by_day: orders_by_day(records),
            traffic_share: traffic_share(records),
            orders_by_city_traffic: orders_by_city_traffic(records),
            orders_by_week: orders_by_week(records),
            orders_per_courier_by_week: orders_per_courier_by_week(records),
            central_locations: central_locations(records),
        }
    }
}

pub fn orders_by_day(records: &[&CleanedRecord]) -> Vec<DailyOrders> {
    count_by(records, |r| r.order_date)
        .into_iter()
        .map(|(date, orders)| DailyOrders { date, orders })
        .collect()
}

pub fn traffic_share(records: &[&CleanedRecord]) -> Vec<TrafficShare> {
    let total = records.len();
    count_by(records, |r| r.traffic_density.clone())
        .into_iter()
        .map(|(traffic, orders)| TrafficShare {
            traffic,
            orders,
            share: orders as f64 / total as f64,
        })
        .collect()
}

pub fn orders_by_city_traffic(records: &[&CleanedRecord]) -> Vec<CityTrafficOrders> {
    count_by(records, |r| (r.city.clone(), r.traffic_density.clone()))
        .into_iter()
        .map(|((city, traffic), orders)| CityTrafficOrders {
            city,
            traffic,
            orders,
        })
        .collect()
}

pub fn orders_by_week(records: &[&CleanedRecord]) -> Vec<WeeklyOrders> {
    count_by(records, CleanedRecord::week_of_year)
        .into_iter()
        .map(|(week, orders)| WeeklyOrders { week, orders })
        .collect()
}

pub fn orders_per_courier_by_week(records: &[&CleanedRecord]) -> Vec<WeeklyCourierLoad> {
    group_by(records, CleanedRecord::week_of_year)
        .into_iter()
        .map(|(week, orders)| {
            let couriers = distinct_count(&orders, |r| r.courier_id.clone());
            WeeklyCourierLoad {
                week,
                orders: orders.len(),
                couriers,
                orders_per_courier: orders.len() as f64 / couriers as f64,
            }
        })
        .collect()
}

pub fn central_locations(records: &[&CleanedRecord]) -> Vec<CentralLocation> {
    group_by(records, |r| (r.city.clone(), r.traffic_density.clone()))
        .into_iter()
        .filter_map(|((city, traffic), group)| {
            let latitudes: Vec<f64> = group.iter().map(|r| r.delivery_latitude).collect();
            let longitudes: Vec<f64> = group.iter().map(|r| r.delivery_longitude).collect();
            Some(CentralLocation {
                city,
                traffic,
                latitude: median(&latitudes)?,
                longitude: median(&longitudes)?,
            })
        })
        .collect()
}
