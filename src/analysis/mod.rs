//! Analysis modules.
//!
//! Filters narrow the cleaned table, and each view computes its aggregate
//! tables from the filtered slice.

pub mod aggregator;
pub mod company;
pub mod couriers;
pub mod filters;
pub mod geo;
pub mod restaurants;

pub use company::CompanyView;
pub use couriers::CouriersView;
pub use filters::{FilterScope, FilterSet};
pub use restaurants::RestaurantsView;
