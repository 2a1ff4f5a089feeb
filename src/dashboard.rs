//! Dashboard assembly: normalize raw rows once, filter, then compute the
//! selected views.

use crate::analysis::couriers::DEFAULT_TOP_N;
use crate::analysis::{CompanyView, CouriersView, FilterScope, FilterSet, RestaurantsView};
use crate::cleaning::{CoercionPolicy, NormalizeError, NormalizeStats, Normalizer};
use crate::models::{CleanedRecord, RawRow};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Which views to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ViewSelection {
    #[default]
    All,
    Company,
    Couriers,
    Restaurants,
}

impl ViewSelection {
    fn includes(self, other: ViewSelection) -> bool {
        self == ViewSelection::All || self == other
    }
}

#[derive(Debug, Clone)]
pub struct DashboardOptions {
    pub views: ViewSelection,
    /// Couriers listed per city in the fastest/slowest tables.
    pub top_n: usize,
    pub policy: CoercionPolicy,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            views: ViewSelection::All,
            top_n: DEFAULT_TOP_N,
            policy: CoercionPolicy::default(),
        }
    }
}

/// The computed views. Views that were not selected are `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<CompanyView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub couriers: Option<CouriersView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restaurants: Option<RestaurantsView>,
}

/// Cleaned table, its statistics and the views computed from it.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub records: Vec<CleanedRecord>,
    pub stats: NormalizeStats,
    pub views: ViewSet,
}

/// Normalize `rows`, then compute the selected views under `filters`.
pub fn build(
    rows: Vec<RawRow>,
    filters: &FilterSet,
    options: &DashboardOptions,
) -> Result<Dashboard, NormalizeError> {
    let normalized = Normalizer::new(options.policy).normalize(rows)?;
    let views = compute_views(&normalized.records, filters, options);

    Ok(Dashboard {
        records: normalized.records,
        stats: normalized.stats,
        views,
    })
}

/// Compute the selected views from an already cleaned table.
pub fn compute_views(
    records: &[CleanedRecord],
    filters: &FilterSet,
    options: &DashboardOptions,
) -> ViewSet {
    let mut views = ViewSet::default();

    if options.views.includes(ViewSelection::Company) {
        let slice = filters.apply(records, FilterScope::DateAndTraffic);
        debug!("Company view over {} rows", slice.len());
        views.company = Some(CompanyView::compute(&slice));
    }

    let needs_full_scope = options.views.includes(ViewSelection::Couriers)
        || options.views.includes(ViewSelection::Restaurants);
    if needs_full_scope {
        let slice = filters.apply(records, FilterScope::All);
        debug!("Couriers/restaurants views over {} rows", slice.len());

        if options.views.includes(ViewSelection::Couriers) {
            views.couriers = Some(CouriersView::compute(&slice, options.top_n));
        }
        if options.views.includes(ViewSelection::Restaurants) {
            views.restaurants = Some(RestaurantsView::compute(&slice));
        }
    }

    info!("Computed {:?} view(s)", options.views);
    views
}
