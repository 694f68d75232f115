#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Daily statistics over reconstructed booking records.
//!
//! Aggregates a day's records into the numbers the report surfaces: total
//! bookings, the single most common charge, a charge-category mix, and a
//! city breakdown. Categorization is keyword-based against the taxonomy
//! in [`jail_report_booking_models::ChargeCategory`]; it is deliberately
//! coarse because the underlying charge text is reconstructed from
//! degraded extraction and only abbreviations survive reliably.

use jail_report_booking_models::{BookingRecord, ChargeCategory, UNKNOWN_CITY};
use serde::{Deserialize, Serialize};

/// Remainder bucket label for cities past the breakdown cutoff.
pub const ALL_OTHER_CITIES: &str = "All Other Cities";

/// One row of the charge-category mix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeMixEntry {
    /// Matched category.
    pub category: ChargeCategory,
    /// Number of records whose charges fell in this category.
    pub count: usize,
    /// Share of all records, rounded to a whole percent.
    pub percent: u32,
}

/// One row of the city breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityCount {
    /// City name, or [`ALL_OTHER_CITIES`] for the remainder bucket.
    pub city: String,
    /// Number of records from this city.
    pub count: usize,
    /// Share of all records, rounded to a whole percent.
    pub percent: u32,
}

/// Everything the daily report derives from one day's records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportStats {
    /// Total bookings in the report.
    pub total_bookings: usize,
    /// Most common first-listed charge, uppercase, or `None` when no
    /// record carried a charge.
    pub top_charge: Option<String>,
    /// Non-empty categories, most common first.
    pub charge_mix: Vec<ChargeMixEntry>,
    /// Top cities plus a remainder bucket, most common first.
    pub cities: Vec<CityCount>,
}

/// Computes the full statistics bundle for one day's records.
#[must_use]
pub fn analyze(records: &[BookingRecord], top_cities: usize) -> ReportStats {
    let stats = ReportStats {
        total_bookings: records.len(),
        top_charge: top_charge(records),
        charge_mix: charge_mix(records),
        cities: city_breakdown(records, top_cities),
    };

    log::debug!(
        "analyzed {} bookings into {} charge categories and {} city rows",
        stats.total_bookings,
        stats.charge_mix.len(),
        stats.cities.len(),
    );

    stats
}

/// Places a record's combined charge text in the first matching category.
///
/// Charges are joined and uppercased, then tested against each category's
/// keyword list in taxonomy order; the first hit wins. Records with no
/// charges, or charges matching nothing, land in the catch-all bucket.
#[must_use]
pub fn categorize(charges: &[String]) -> ChargeCategory {
    let text = charges.join(", ").to_uppercase();
    for category in ChargeCategory::all() {
        if category.keywords().iter().any(|k| text.contains(k)) {
            return *category;
        }
    }
    ChargeCategory::OtherUnknown
}

/// Most common first-listed charge across all records, uppercase.
///
/// Only the first charge of each record counts, on the theory that the
/// report lists the controlling offense first. Ties go to the charge seen
/// earliest in the report. `None` when no record carries a charge.
#[must_use]
pub fn top_charge(records: &[BookingRecord]) -> Option<String> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for record in records {
        let Some(first) = record.charges.first() else {
            continue;
        };
        let charge = first.to_uppercase();
        match counts.iter_mut().find(|(c, _)| *c == charge) {
            Some((_, n)) => *n += 1,
            None => counts.push((charge, 1)),
        }
    }

    let mut best: Option<(String, usize)> = None;
    for (charge, n) in counts {
        if best.as_ref().is_none_or(|(_, m)| n > *m) {
            best = Some((charge, n));
        }
    }
    best.map(|(charge, _)| charge)
}

/// Rounds `part / whole` to a whole percent; `0` when `whole` is zero.
#[must_use]
pub fn percent(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    let pct = ((part as f64 / whole as f64) * 100.0).round() as u32;
    pct
}

/// Category mix over all records, most common category first.
///
/// Categories with zero records are omitted. The sort is stable, so
/// equal counts keep taxonomy order.
#[must_use]
pub fn charge_mix(records: &[BookingRecord]) -> Vec<ChargeMixEntry> {
    let total = records.len();
    let mut entries: Vec<ChargeMixEntry> = ChargeCategory::all()
        .iter()
        .map(|category| {
            let count = records
                .iter()
                .filter(|r| categorize(&r.charges) == *category)
                .count();
            ChargeMixEntry {
                category: *category,
                count,
                percent: percent(count, total),
            }
        })
        .filter(|entry| entry.count > 0)
        .collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries
}

/// Top `top_n` cities by booking count, plus a remainder bucket.
///
/// Records with an unknown city are excluded from the rows entirely but
/// still count toward the percentage denominator, so the column reads as
/// "share of all bookings". A remainder row is appended only when named
/// cities were actually cut off. Equal counts keep report order.
#[must_use]
pub fn city_breakdown(records: &[BookingRecord], top_n: usize) -> Vec<CityCount> {
    let total = records.len();
    let mut counts: Vec<(String, usize)> = Vec::new();
    for record in records {
        if record.city == UNKNOWN_CITY {
            continue;
        }
        match counts.iter_mut().find(|(city, _)| *city == record.city) {
            Some((_, n)) => *n += 1,
            None => counts.push((record.city.clone(), 1)),
        }
    }

    let named_total: usize = counts.iter().map(|(_, n)| n).sum();
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(top_n);
    let shown: usize = counts.iter().map(|(_, n)| n).sum();

    let mut cities: Vec<CityCount> = counts
        .into_iter()
        .map(|(city, count)| CityCount {
            percent: percent(count, total),
            city,
            count,
        })
        .collect();

    let rest = named_total - shown;
    if rest > 0 {
        cities.push(CityCount {
            city: ALL_OTHER_CITIES.to_owned(),
            count: rest,
            percent: percent(rest, total),
        });
    }
    cities
}
