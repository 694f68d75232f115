#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Rendering of the daily jail report.
//!
//! Two outputs share one statistics bundle: a self-contained email-style
//! HTML document built from an embedded template, and a fixed-layout
//! plaintext snapshot ([`render_snapshot`]). Both are pure string
//! producers; writing files and delivering the result belong to the
//! caller.

pub mod html;
pub mod snapshot;

pub use snapshot::render_snapshot;

use chrono::{Duration, NaiveDate};
use jail_report_booking_models::BookedInReport;
use jail_report_stats::ReportStats;

use crate::html::escape_html;

/// Email template with `{{placeholder}}` tokens, compiled into the
/// binary so rendering never depends on the working directory.
const TEMPLATE: &str = include_str!("templates/daily_report.html");

/// Renders the full HTML report.
///
/// Every placeholder in the embedded template is substituted: the three
/// date forms, the totals, the top charge, and the four generated row
/// sections. The arrests date is the calendar day before the report
/// date, since the report covers the previous 24 hours.
#[must_use]
pub fn render_html(report: &BookedInReport, stats: &ReportStats) -> String {
    let report_date = report.report_date.format("%-m/%-d/%Y").to_string();
    let report_date_display = report.report_date.format("%A, %B %-d, %Y").to_string();
    let arrests_date = (report.report_date - Duration::days(1))
        .format("%-m/%-d/%Y")
        .to_string();
    let total_bookings = stats.total_bookings.to_string();
    let top_charge = escape_html(stats.top_charge.as_deref().unwrap_or("N/A"));
    let charge_mix_rows = html::charge_mix_rows(&stats.charge_mix);
    let bar_rows = html::bar_rows(&stats.charge_mix);
    let city_rows = html::city_rows(&stats.cities);
    let booking_rows = html::booking_rows(&report.records);

    let mut page = TEMPLATE.to_owned();
    for (placeholder, value) in [
        ("{{report_date}}", report_date.as_str()),
        ("{{report_date_display}}", report_date_display.as_str()),
        ("{{arrests_date}}", arrests_date.as_str()),
        ("{{total_bookings}}", total_bookings.as_str()),
        ("{{top_charge}}", top_charge.as_str()),
        ("{{charge_mix_rows}}", charge_mix_rows.as_str()),
        ("{{bar_rows}}", bar_rows.as_str()),
        ("{{city_rows}}", city_rows.as_str()),
        ("{{booking_rows}}", booking_rows.as_str()),
    ] {
        page = page.replace(placeholder, value);
    }

    log::debug!(
        "rendered HTML report for {report_date}: {} bytes",
        page.len()
    );

    page
}

/// Subject line shared by the report email and the broadcast.
#[must_use]
pub fn report_subject(report_date: NaiveDate) -> String {
    format!(
        "Tarrant County Jail Report — {}",
        report_date.format("%-m/%-d/%Y")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use jail_report_booking_models::BookingRecord;

    fn sample_report() -> BookedInReport {
        BookedInReport {
            report_date: NaiveDate::from_ymd_opt(2026, 1, 2).unwrap(),
            records: vec![
                BookingRecord {
                    name: "SMITH, JOHN".to_owned(),
                    identifier: "1234567".to_owned(),
                    book_in_date: "1/2/2026".to_owned(),
                    city: "Fort Worth".to_owned(),
                    charges: vec!["THEFT OF PROPERTY".to_owned()],
                },
                BookingRecord {
                    name: "JONES & SONS, JANE".to_owned(),
                    identifier: "7654321".to_owned(),
                    book_in_date: "1/2/2026".to_owned(),
                    city: "Arlington".to_owned(),
                    charges: vec!["DWI 1ST".to_owned()],
                },
            ],
        }
    }

    #[test]
    fn render_html_fills_every_placeholder() {
        let report = sample_report();
        let stats = jail_report_stats::analyze(&report.records, 9);
        let page = render_html(&report, &stats);

        assert!(!page.contains("{{"), "unfilled placeholder in {page}");
        assert!(page.contains("1/2/2026"));
        assert!(page.contains("Friday, January 2, 2026"));
        assert!(page.contains("1/1/2026"));
        assert!(page.contains(">2<"));
        assert!(page.contains("SMITH, JOHN"));
        assert!(page.contains("Fort Worth"));
    }

    #[test]
    fn render_html_escapes_report_text() {
        let report = sample_report();
        let stats = jail_report_stats::analyze(&report.records, 9);
        let page = render_html(&report, &stats);
        assert!(page.contains("JONES &amp; SONS, JANE"));
    }

    #[test]
    fn render_html_shows_na_without_a_top_charge() {
        let report = BookedInReport {
            report_date: NaiveDate::from_ymd_opt(2026, 1, 2).unwrap(),
            records: Vec::new(),
        };
        let stats = jail_report_stats::analyze(&report.records, 9);
        let page = render_html(&report, &stats);
        assert!(page.contains("N/A"));
    }

    #[test]
    fn report_subject_uses_the_short_date() {
        let subject = report_subject(NaiveDate::from_ymd_opt(2026, 1, 2).unwrap());
        assert_eq!(subject, "Tarrant County Jail Report — 1/2/2026");
    }
}
