//! Data models for the delivery dataset.
//!
//! This module contains the row-level structures (raw and cleaned order
//! records) and the report structure handed to the report generator.

use crate::analysis::filters::FilterSet;
use crate::analysis::geo::{haversine_km, GeoPoint};
use crate::cleaning::NormalizeStats;
use crate::dashboard::ViewSet;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Column names every input file must carry, in dataset order.
pub const REQUIRED_COLUMNS: [&str; 18] = [
    "ID",
    "Delivery_person_ID",
    "Delivery_person_Age",
    "Delivery_person_Ratings",
    "Restaurant_latitude",
    "Restaurant_longitude",
    "Delivery_location_latitude",
    "Delivery_location_longitude",
    "Order_Date",
    "Weatherconditions",
    "Road_traffic_density",
    "Vehicle_condition",
    "Type_of_order",
    "Type_of_vehicle",
    "multiple_deliveries",
    "Festival",
    "City",
    "Time_taken(min)",
];

/// One order-delivery event exactly as read from the dataset.
///
/// Every field is kept as text, including incidental whitespace and the
/// `NaN` sentinels, so that cleaning decisions are made in one place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Delivery_person_ID")]
    pub courier_id: String,
    #[serde(rename = "Delivery_person_Age")]
    pub courier_age: String,
    #[serde(rename = "Delivery_person_Ratings")]
    pub courier_rating: String,
    #[serde(rename = "Restaurant_latitude")]
    pub restaurant_latitude: String,
    #[serde(rename = "Restaurant_longitude")]
    pub restaurant_longitude: String,
    #[serde(rename = "Delivery_location_latitude")]
    pub delivery_latitude: String,
    #[serde(rename = "Delivery_location_longitude")]
    pub delivery_longitude: String,
    #[serde(rename = "Order_Date")]
    pub order_date: String,
    #[serde(rename = "Weatherconditions")]
    pub weather: String,
    #[serde(rename = "Road_traffic_density")]
    pub traffic_density: String,
    #[serde(rename = "Vehicle_condition")]
    pub vehicle_condition: String,
    #[serde(rename = "Type_of_order")]
    pub order_type: String,
    #[serde(rename = "Type_of_vehicle")]
    pub vehicle_type: String,
    #[serde(rename = "multiple_deliveries")]
    pub multiple_deliveries: String,
    #[serde(rename = "Festival")]
    pub festival: String,
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "Time_taken(min)")]
    pub time_taken: String,
}

impl RawRecord {
    /// Look up a field by its dataset column name.
    pub fn field(&self, column: &str) -> Option<&str> {
        let value = match column {
            "ID" => &self.id,
            "Delivery_person_ID" => &self.courier_id,
            "Delivery_person_Age" => &self.courier_age,
            "Delivery_person_Ratings" => &self.courier_rating,
            "Restaurant_latitude" => &self.restaurant_latitude,
            "Restaurant_longitude" => &self.restaurant_longitude,
            "Delivery_location_latitude" => &self.delivery_latitude,
            "Delivery_location_longitude" => &self.delivery_longitude,
            "Order_Date" => &self.order_date,
            "Weatherconditions" => &self.weather,
            "Road_traffic_density" => &self.traffic_density,
            "Vehicle_condition" => &self.vehicle_condition,
            "Type_of_order" => &self.order_type,
            "Type_of_vehicle" => &self.vehicle_type,
            "multiple_deliveries" => &self.multiple_deliveries,
            "Festival" => &self.festival,
            "City" => &self.city,
            "Time_taken(min)" => &self.time_taken,
            _ => return None,
        };
        Some(value.as_str())
    }
}

/// A raw record together with the input line it started on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    /// 1-indexed line in the source file (the header is line 1).
    pub line: u64,
    pub record: RawRecord,
}

impl RawRow {
    pub fn new(line: u64, record: RawRecord) -> Self {
        Self { line, record }
    }
}

/// An order record after cleaning: no sentinels, typed numeric fields,
/// trimmed identifiers and categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanedRecord {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Delivery_person_ID")]
    pub courier_id: String,
    #[serde(rename = "Delivery_person_Age")]
    pub courier_age: i32,
    #[serde(rename = "Delivery_person_Ratings")]
    pub courier_rating: f64,
    #[serde(rename = "Restaurant_latitude")]
    pub restaurant_latitude: f64,
    #[serde(rename = "Restaurant_longitude")]
    pub restaurant_longitude: f64,
    #[serde(rename = "Delivery_location_latitude")]
    pub delivery_latitude: f64,
    #[serde(rename = "Delivery_location_longitude")]
    pub delivery_longitude: f64,
    #[serde(rename = "Order_Date", with = "dmy_date")]
    pub order_date: NaiveDate,
    #[serde(rename = "Weatherconditions")]
    pub weather: String,
    #[serde(rename = "Road_traffic_density")]
    pub traffic_density: String,
    #[serde(rename = "Vehicle_condition")]
    pub vehicle_condition: i32,
    #[serde(rename = "Type_of_order")]
    pub order_type: String,
    #[serde(rename = "Type_of_vehicle")]
    pub vehicle_type: String,
    #[serde(rename = "multiple_deliveries")]
    pub multiple_deliveries: i32,
    #[serde(rename = "Festival")]
    pub festival: String,
    #[serde(rename = "City")]
    pub city: String,
    /// Delivery time in whole minutes.
    #[serde(rename = "Time_taken(min)")]
    pub time_taken: u32,
}

impl CleanedRecord {
    /// Zero-padded week of the year, with weeks starting on Sunday
    /// ("00" through "53").
    pub fn week_of_year(&self) -> String {
        self.order_date.format("%U").to_string()
    }

    pub fn restaurant_location(&self) -> GeoPoint {
        GeoPoint::new(self.restaurant_latitude, self.restaurant_longitude)
    }

    pub fn delivery_location(&self) -> GeoPoint {
        GeoPoint::new(self.delivery_latitude, self.delivery_longitude)
    }

    /// Great-circle distance from the restaurant to the delivery location.
    pub fn delivery_distance_km(&self) -> f64 {
        haversine_km(self.restaurant_location(), self.delivery_location())
    }
}

/// `DD-MM-YYYY` dates, the format used by the dataset's `Order_Date` column.
pub mod dmy_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%d-%m-%Y";

    pub fn parse(value: &str) -> Result<NaiveDate, chrono::ParseError> {
        NaiveDate::parse_from_str(value.trim(), FORMAT)
    }

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let value = String::deserialize(deserializer)?;
        parse(&value).map_err(serde::de::Error::custom)
    }

    /// The same format for optional dates (config cutoffs).
    pub mod option {
        use chrono::NaiveDate;
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            date: &Option<NaiveDate>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match date {
                Some(date) => serializer.collect_str(&date.format(super::FORMAT)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<NaiveDate>, D::Error> {
            let value = Option::<String>::deserialize(deserializer)?;
            value
                .map(|v| super::parse(&v).map_err(serde::de::Error::custom))
                .transpose()
        }
    }
}

/// Metadata about a dashboard report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Path of the dataset that was analysed.
    pub dataset: String,
    /// Date and time the report was generated.
    pub generated_at: DateTime<Utc>,
    /// Filters applied before aggregation.
    pub filters: FilterSet,
    /// Rows read from the dataset.
    pub rows_read: usize,
    /// Rows that survived cleaning.
    pub rows_cleaned: usize,
    /// Duration of the run in seconds.
    pub duration_seconds: f64,
}

/// The complete dashboard report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub metadata: ReportMetadata,
    /// Cleaning statistics, omitted when disabled in the config.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cleaning: Option<NormalizeStats>,
    pub views: ViewSet,
}
