//! Shared record builders for unit tests.

use crate::models::{CleanedRecord, RawRecord, RawRow, REQUIRED_COLUMNS};
use chrono::NaiveDate;

/// A valid raw row shaped like the real dataset, whitespace included.
pub fn raw_record() -> RawRecord {
    RawRecord {
        id: "0x4607 ".to_string(),
        courier_id: "INDORES13DEL02 ".to_string(),
        courier_age: "37".to_string(),
        courier_rating: "4.9".to_string(),
        restaurant_latitude: "22.745049".to_string(),
        restaurant_longitude: "75.892471".to_string(),
        delivery_latitude: "22.765049".to_string(),
        delivery_longitude: "75.912471".to_string(),
        order_date: "19-03-2022".to_string(),
        weather: "conditions Sunny".to_string(),
        traffic_density: "High ".to_string(),
        vehicle_condition: "2".to_string(),
        order_type: "Snack ".to_string(),
        vehicle_type: "motorcycle ".to_string(),
        multiple_deliveries: "0".to_string(),
        festival: "No ".to_string(),
        city: "Urban ".to_string(),
        time_taken: "(min) 24".to_string(),
    }
}

/// Wrap records into rows numbered as if read from a file with a header.
pub fn rows(records: Vec<RawRecord>) -> Vec<RawRow> {
    records
        .into_iter()
        .enumerate()
        .map(|(i, record)| RawRow::new(i as u64 + 2, record))
        .collect()
}

/// The cleaned counterpart of [`raw_record`].
pub fn cleaned() -> CleanedRecord {
    cleaned_on((2022, 3, 19))
}

pub fn cleaned_on(date: (i32, u32, u32)) -> CleanedRecord {
    CleanedRecord {
        id: "0x4607".to_string(),
        courier_id: "INDORES13DEL02".to_string(),
        courier_age: 37,
        courier_rating: 4.9,
        restaurant_latitude: 22.745049,
        restaurant_longitude: 75.892471,
        delivery_latitude: 22.765049,
        delivery_longitude: 75.912471,
        order_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
        weather: "conditions Sunny".to_string(),
        traffic_density: "High".to_string(),
        vehicle_condition: 2,
        order_type: "Snack".to_string(),
        vehicle_type: "motorcycle".to_string(),
        multiple_deliveries: 0,
        festival: "No".to_string(),
        city: "Urban".to_string(),
        time_taken: 24,
    }
}

/// A cleaned record with the fields most views group on.
pub fn order(id: &str, courier: &str, city: &str, traffic: &str, minutes: u32) -> CleanedRecord {
    CleanedRecord {
        id: id.to_string(),
        courier_id: courier.to_string(),
        city: city.to_string(),
        traffic_density: traffic.to_string(),
        time_taken: minutes,
        ..cleaned()
    }
}

/// Render raw records as CSV text with the full dataset header.
pub fn csv_text(records: &[RawRecord]) -> String {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for record in records {
        writer.serialize(record).unwrap();
    }
    if records.is_empty() {
        writer.write_record(REQUIRED_COLUMNS).unwrap();
    }
    String::from_utf8(writer.into_inner().unwrap()).unwrap()
}
