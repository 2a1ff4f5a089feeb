//! Markdown and JSON report generation.
//!
//! This module renders the computed dashboard views as Markdown tables,
//! or serializes the whole report as JSON.

use crate::analysis::aggregator::MeanStd;
use crate::analysis::filters::FilterSet;
use crate::analysis::{CompanyView, CouriersView, RestaurantsView};
use crate::cleaning::NormalizeStats;
use crate::models::{dmy_date, Report, ReportMetadata};
use anyhow::Result;

/// Generate a complete Markdown report.
pub fn generate_markdown_report(report: &Report) -> String {
    let mut output = String::new();

    // Title
    output.push_str("# Delivery Dashboard Report\n\n");

    output.push_str(&generate_metadata_section(&report.metadata));

    if let Some(ref stats) = report.cleaning {
        output.push_str(&generate_cleaning_section(stats));
    }

    if let Some(ref company) = report.views.company {
        output.push_str(&generate_company_section(company));
    }
    if let Some(ref couriers) = report.views.couriers {
        output.push_str(&generate_couriers_section(couriers));
    }
    if let Some(ref restaurants) = report.views.restaurants {
        output.push_str(&generate_restaurants_section(restaurants));
    }

    // Footer
    output.push_str(&generate_footer());

    output
}

/// Generate the metadata section.
fn generate_metadata_section(metadata: &ReportMetadata) -> String {
    let mut section = String::new();

    section.push_str("## Metadata\n\n");
    section.push_str(&format!("- **Dataset:** `{}`\n", metadata.dataset));
    section.push_str(&format!(
        "- **Generated:** {}\n",
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!("- **Rows Read:** {}\n", metadata.rows_read));
    section.push_str(&format!("- **Rows Cleaned:** {}\n", metadata.rows_cleaned));
    section.push_str(&generate_filters_lines(&metadata.filters));
    section.push_str(&format!(
        "- **Duration:** {:.1}s\n",
        metadata.duration_seconds
    ));
    section.push('\n');

    section
}

fn generate_filters_lines(filters: &FilterSet) -> String {
    let mut lines = String::new();

    let until = match filters.until {
        Some(date) => format!("before {}", date.format(dmy_date::FORMAT)),
        None => "none".to_string(),
    };
    lines.push_str(&format!("- **Date Cutoff:** {}\n", until));
    lines.push_str(&format!("- **Traffic:** {}\n", filters.traffic.join(", ")));
    lines.push_str(&format!("- **Weather:** {}\n", filters.weather.join(", ")));

    lines
}

/// Generate the cleaning statistics section.
fn generate_cleaning_section(stats: &NormalizeStats) -> String {
    let mut section = String::new();

    section.push_str("## Cleaning\n\n");
    section.push_str(&format!(
        "{} of {} rows kept, {} dropped.\n\n",
        stats.rows_kept,
        stats.rows_read,
        stats.rows_dropped()
    ));

    if !stats.dropped.is_empty() {
        section.push_str("| Drop Reason | Rows |\n");
        section.push_str("|:---|---:|\n");
        for (reason, count) in &stats.dropped {
            section.push_str(&format!("| {} | {} |\n", reason, count));
        }
        section.push('\n');
    }

    section
}

/// Generate the company view section.
fn generate_company_section(view: &CompanyView) -> String {
    let mut section = String::new();

    section.push_str("## Company\n\n");

    section.push_str("### Orders by Day\n\n");
    section.push_str("| Date | Orders |\n|:---|---:|\n");
    for day in &view.orders_by_day {
        section.push_str(&format!(
            "| {} | {} |\n",
            day.date.format(dmy_date::FORMAT),
            day.orders
        ));
    }
    section.push('\n');

    section.push_str("### Traffic Order Share\n\n");
    section.push_str("| Traffic | Orders | Share |\n|:---|---:|---:|\n");
    for share in &view.traffic_share {
        section.push_str(&format!(
            "| {} | {} | {:.2}% |\n",
            share.traffic,
            share.orders,
            share.share * 100.0
        ));
    }
    section.push('\n');

    section.push_str("### Traffic Order by City\n\n");
    section.push_str("| City | Traffic | Orders |\n|:---|:---|---:|\n");
    for row in &view.orders_by_city_traffic {
        section.push_str(&format!(
            "| {} | {} | {} |\n",
            row.city, row.traffic, row.orders
        ));
    }
    section.push('\n');

    section.push_str("### Orders by Week\n\n");
    section.push_str("| Week | Orders |\n|:---|---:|\n");
    for week in &view.orders_by_week {
        section.push_str(&format!("| {} | {} |\n", week.week, week.orders));
    }
    section.push('\n');

    section.push_str("### Orders per Courier by Week\n\n");
    section.push_str("| Week | Orders | Couriers | Orders per Courier |\n");
    section.push_str("|:---|---:|---:|---:|\n");
    for week in &view.orders_per_courier_by_week {
        section.push_str(&format!(
            "| {} | {} | {} | {:.2} |\n",
            week.week, week.orders, week.couriers, week.orders_per_courier
        ));
    }
    section.push('\n');

    section.push_str("### Central Locations\n\n");
    section.push_str("| City | Traffic | Latitude | Longitude |\n");
    section.push_str("|:---|:---|---:|---:|\n");
    for location in &view.central_locations {
        section.push_str(&format!(
            "| {} | {} | {:.6} | {:.6} |\n",
            location.city, location.traffic, location.latitude, location.longitude
        ));
    }
    section.push('\n');

    section
}

/// Generate the couriers view section.
fn generate_couriers_section(view: &CouriersView) -> String {
    let mut section = String::new();

    section.push_str("## Couriers\n\n");

    let overall = &view.overall;
    section.push_str(&format!(
        "- **Oldest Courier:** {}\n",
        fmt_opt(overall.oldest_age)
    ));
    section.push_str(&format!(
        "- **Youngest Courier:** {}\n",
        fmt_opt(overall.youngest_age)
    ));
    section.push_str(&format!(
        "- **Best Vehicle Condition:** {}\n",
        fmt_opt(overall.best_vehicle_condition)
    ));
    section.push_str(&format!(
        "- **Worst Vehicle Condition:** {}\n\n",
        fmt_opt(overall.worst_vehicle_condition)
    ));

    section.push_str("### Mean Rating by Courier\n\n");
    section.push_str("| Courier | Rating |\n|:---|---:|\n");
    for rating in &view.ratings_by_courier {
        section.push_str(&format!(
            "| {} | {:.2} |\n",
            rating.courier_id, rating.mean_rating
        ));
    }
    section.push('\n');

    section.push_str("### Rating by Traffic\n\n");
    section.push_str(&mean_std_table(
        "Traffic",
        view.ratings_by_traffic
            .iter()
            .map(|r| (r.group.as_str(), r.rating)),
    ));

    section.push_str("### Rating by Weather\n\n");
    section.push_str(&mean_std_table(
        "Weather",
        view.ratings_by_weather
            .iter()
            .map(|r| (r.group.as_str(), r.rating)),
    ));

    for (title, rows) in [
        ("Fastest Couriers", &view.fastest),
        ("Slowest Couriers", &view.slowest),
    ] {
        section.push_str(&format!("### {}\n\n", title));
        section.push_str("| City | Courier | Minutes |\n|:---|:---|---:|\n");
        for speed in rows {
            section.push_str(&format!(
                "| {} | {} | {} |\n",
                speed.city, speed.courier_id, speed.time_taken
            ));
        }
        section.push('\n');
    }

    section
}

/// Generate the restaurants view section.
fn generate_restaurants_section(view: &RestaurantsView) -> String {
    let mut section = String::new();

    section.push_str("## Restaurants\n\n");
    section.push_str(&format!(
        "- **Distinct Couriers:** {}\n",
        view.distinct_couriers
    ));
    section.push_str(&format!(
        "- **Average Distance:** {}\n",
        view.avg_distance_km
            .map(|d| format!("{:.2} km", d))
            .unwrap_or_else(|| "n/a".to_string())
    ));
    section.push_str(&format!(
        "- **Festival Delivery Time:** {}\n",
        fmt_mean_std(view.festival_times.festival)
    ));
    section.push_str(&format!(
        "- **Regular Delivery Time:** {}\n\n",
        fmt_mean_std(view.festival_times.regular)
    ));

    section.push_str("### Delivery Time by City\n\n");
    section.push_str(&mean_std_table(
        "City",
        view.time_by_city.iter().map(|r| (r.city.as_str(), r.time)),
    ));

    section.push_str("### Delivery Time by City and Order Type\n\n");
    let labels: Vec<String> = view
        .time_by_city_order_type
        .iter()
        .map(|r| format!("{} / {}", r.city, r.order_type))
        .collect();
    section.push_str(&mean_std_table(
        "City / Order Type",
        labels
            .iter()
            .zip(&view.time_by_city_order_type)
            .map(|(label, r)| (label.as_str(), r.time)),
    ));

    section.push_str("### Delivery Time by City and Traffic\n\n");
    let labels: Vec<String> = view
        .time_by_city_traffic
        .iter()
        .map(|r| format!("{} / {}", r.city, r.traffic))
        .collect();
    section.push_str(&mean_std_table(
        "City / Traffic",
        labels
            .iter()
            .zip(&view.time_by_city_traffic)
            .map(|(label, r)| (label.as_str(), r.time)),
    ));

    section.push_str("### Average Distance by City\n\n");
    section.push_str("| City | Distance (km) |\n|:---|---:|\n");
    for row in &view.distance_by_city {
        section.push_str(&format!("| {} | {:.2} |\n", row.city, row.avg_distance_km));
    }
    section.push('\n');

    section
}

fn mean_std_table<'a, I>(label: &str, rows: I) -> String
where
    I: IntoIterator<Item = (&'a str, MeanStd)>,
{
    let mut table = String::new();

    table.push_str(&format!("| {} | Mean | Std |\n", label));
    table.push_str("|:---|---:|---:|\n");
    for (group, stats) in rows {
        table.push_str(&format!(
            "| {} | {:.2} | {} |\n",
            group,
            stats.mean,
            stats
                .std
                .map(|s| format!("{:.2}", s))
                .unwrap_or_else(|| "n/a".to_string())
        ));
    }
    table.push('\n');

    table
}

fn fmt_opt(value: Option<i32>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| "n/a".to_string())
}

fn fmt_mean_std(stats: Option<MeanStd>) -> String {
    match stats {
        Some(MeanStd { mean, std: Some(std) }) => format!("{:.2} ± {:.2} min", mean, std),
        Some(MeanStd { mean, std: None }) => format!("{:.2} min", mean),
        None => "n/a".to_string(),
    }
}

/// Generate the report footer.
fn generate_footer() -> String {
    let mut footer = String::new();

    footer.push_str("---\n\n");
    footer.push_str(&format!(
        "*Report generated by deliverydash v{}*\n",
        env!("CARGO_PKG_VERSION")
    ));

    footer
}

/// Generate a JSON report.
pub fn generate_json_report(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}
