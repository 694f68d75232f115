//! Fixed-layout plaintext snapshot of the daily statistics.
//!
//! This is the short form that goes out alongside the HTML report. The
//! layout is stable on purpose: downstream consumers copy it into posts
//! verbatim, so line order and labels must not drift run to run.

use chrono::{Duration, NaiveDate};
use jail_report_parser::lines;
use jail_report_stats::ReportStats;

/// Renders the "DAILY JAIL SNAPSHOT" text block.
///
/// Charge-mix and city lines come straight from `stats`, so they share
/// the HTML report's ordering (most common first). The top charge is
/// title-cased for readability; everywhere else keeps the report's
/// casing.
#[must_use]
pub fn render_snapshot(report_date: NaiveDate, stats: &ReportStats) -> String {
    let arrests_date = report_date - Duration::days(1);
    let top_charge = stats
        .top_charge
        .as_deref()
        .map_or_else(|| "Unknown".to_owned(), lines::title_case);

    let mut out: Vec<String> = vec![
        "UNCLASSIFIED // FOR INFORMATIONAL USE ONLY".to_owned(),
        "DAILY JAIL SNAPSHOT — TARRANT COUNTY, TX".to_owned(),
        String::new(),
        format!("Report date:  {}", report_date.format("%-m/%-d/%Y")),
        format!("Arrests date: {}", arrests_date.format("%-m/%-d/%Y")),
        format!("Total bookings (last 24h): {}", stats.total_bookings),
        String::new(),
        format!("Top charge today: {top_charge}"),
        String::new(),
        "Charge mix (share of bookings):".to_owned(),
    ];

    for entry in &stats.charge_mix {
        out.push(format!(
            "- {}: {}% ({})",
            entry.category.label(),
            entry.percent,
            entry.count
        ));
    }

    out.push(String::new());
    out.push("Arrests by city (top):".to_owned());
    for city in &stats.cities {
        out.push(format!("- {}: {}% ({})", city.city, city.percent, city.count));
    }

    out.push(String::new());
    out.push("Notes:".to_owned());
    out.push("- Stats generated from Tarrant County CJ Reports booked-in data.".to_owned());
    out.push("- Intended for daily social + visual reporting.".to_owned());

    out.join("\n")
}
