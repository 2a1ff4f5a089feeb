//! Record normalizer: raw dataset rows into cleaned order records.
//!
//! Each row goes through three steps:
//! 1. sentinel exclusion (see [`super::sentinels`]),
//! 2. type coercion of numeric and date fields,
//! 3. whitespace trimming of identifiers and categories.
//!
//! Kept rows stay in input order.

use super::error::{FieldError, NormalizeError};
use super::sentinels::{first_missing, DropReason};
use crate::models::{dmy_date, CleanedRecord, RawRecord, RawRow};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;
use tracing::{debug, info, warn};

/// Characters stripped from both ends of `Time_taken(min)`, e.g. `(min) 24`.
const TIME_UNIT_CHARS: &[char] = &['(', 'm', 'i', 'n', ')', ' '];

/// What to do with a value that is neither a sentinel nor convertible.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum CoercionPolicy {
    /// Abort the run with a data-integrity error.
    #[default]
    Fail,
    /// Skip the row and count it as dropped.
    Drop,
}

/// Row counts collected during one normalization pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizeStats {
    pub rows_read: usize,
    pub rows_kept: usize,
    /// Dropped rows per reason, in check order.
    pub dropped: BTreeMap<DropReason, usize>,
}

impl NormalizeStats {
    pub fn rows_dropped(&self) -> usize {
        self.dropped.values().sum()
    }

    fn record_drop(&mut self, reason: DropReason) {
        *self.dropped.entry(reason).or_default() += 1;
    }
}

/// Output of [`Normalizer::normalize`].
#[derive(Debug, Clone, Default)]
pub struct Normalized {
    pub records: Vec<CleanedRecord>,
    pub stats: NormalizeStats,
}

/// Result of cleaning a single record.
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    Kept(CleanedRecord),
    Dropped(DropReason),
}

/// Applies the cleaning routine to a whole table.
#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer {
    policy: CoercionPolicy,
}

impl Normalizer {
    pub fn new(policy: CoercionPolicy) -> Self {
        Self { policy }
    }

    /// Clean every row, keeping input order.
    ///
    /// Under [`CoercionPolicy::Fail`] the first unconvertible value aborts
    /// the pass with [`NormalizeError::Coercion`].
    pub fn normalize<I>(&self, rows: I) -> Result<Normalized, NormalizeError>
    where
        I: IntoIterator<Item = RawRow>,
    {
        let mut out = Normalized::default();

        for row in rows {
            out.stats.rows_read += 1;

            match clean_record(&row.record) {
                Ok(RowOutcome::Kept(record)) => out.records.push(record),
                Ok(RowOutcome::Dropped(reason)) => {
                    debug!("Dropping line {}: {}", row.line, reason);
                    out.stats.record_drop(reason);
                }
                Err(field_error) => match self.policy {
                    CoercionPolicy::Fail => return Err(field_error.at_line(row.line)),
                    CoercionPolicy::Drop => {
                        warn!(
                            "Dropping line {}: cannot convert {} value {:?} to {}",
                            row.line, field_error.column, field_error.value, field_error.target
                        );
                        out.stats.record_drop(DropReason::CoercionFailure);
                    }
                },
            }
        }

        out.stats.rows_kept = out.records.len();
        info!(
            "Cleaned dataset: {} rows read, {} kept, {} dropped",
            out.stats.rows_read,
            out.stats.rows_kept,
            out.stats.rows_dropped()
        );

        Ok(out)
    }
}

/// Clean one record: exclude sentinels, then coerce, then trim.
pub fn clean_record(raw: &RawRecord) -> Result<RowOutcome, FieldError> {
    if let Some(reason) = first_missing(raw) {
        return Ok(RowOutcome::Dropped(reason));
    }

    let courier_rating = parse_number("Delivery_person_Ratings", &raw.courier_rating, "float")?;
    let courier_age = parse_number("Delivery_person_Age", &raw.courier_age, "integer")?;
    let multiple_deliveries =
        parse_number("multiple_deliveries", &raw.multiple_deliveries, "integer")?;
    let order_date = dmy_date::parse(&raw.order_date)
        .map_err(|_| FieldError::new("Order_Date", &raw.order_date, "date (DD-MM-YYYY)"))?;
    let time_taken = parse_number(
        "Time_taken(min)",
        strip_time_unit(&raw.time_taken),
        "integer",
    )
    .map_err(|_| FieldError::new("Time_taken(min)", &raw.time_taken, "integer"))?;

    let vehicle_condition = parse_number("Vehicle_condition", &raw.vehicle_condition, "integer")?;
    let restaurant_latitude =
        parse_number("Restaurant_latitude", &raw.restaurant_latitude, "float")?;
    let restaurant_longitude =
        parse_number("Restaurant_longitude", &raw.restaurant_longitude, "float")?;
    let delivery_latitude =
        parse_number("Delivery_location_latitude", &raw.delivery_latitude, "float")?;
    let delivery_longitude =
        parse_number("Delivery_location_longitude", &raw.delivery_longitude, "float")?;

    Ok(RowOutcome::Kept(CleanedRecord {
        id: raw.id.trim().to_string(),
        courier_id: raw.courier_id.trim().to_string(),
        courier_age,
        courier_rating,
        restaurant_latitude,
        restaurant_longitude,
        delivery_latitude,
        delivery_longitude,
        order_date,
        weather: raw.weather.clone(),
        traffic_density: raw.traffic_density.trim().to_string(),
        vehicle_condition,
        order_type: raw.order_type.trim().to_string(),
        vehicle_type: raw.vehicle_type.trim().to_string(),
        multiple_deliveries,
        festival: raw.festival.trim().to_string(),
        city: raw.city.trim().to_string(),
        time_taken,
    }))
}

/// Remove the `(min)` annotation and surrounding spaces from a duration.
pub fn strip_time_unit(value: &str) -> &str {
    value.trim_matches(TIME_UNIT_CHARS)
}

fn parse_number<T: FromStr>(
    column: &'static str,
    value: &str,
    target: &'static str,
) -> Result<T, FieldError> {
    value
        .trim()
        .parse()
        .map_err(|_| FieldError::new(column, value, target))
}
