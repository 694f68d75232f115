#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Reconstruction of booking records from degraded booked-in report text.
//!
//! The county publishes the report as a PDF whose table structure does not
//! survive text extraction: names, identifiers, addresses, and charges
//! arrive as a flat stream of jumbled lines. This crate re-segments that
//! stream with a line-classification state machine
//! ([`assembler::RecordAssembler`]) built on a small set of lexical
//! heuristics — booking-number anchoring ([`patterns`]), junk filtering
//! ([`lines`]), charge-text cleanup ([`charge`]), and city extraction
//! ([`city`]).
//!
//! Parsing is a single synchronous pass with no I/O and no failure mode:
//! any input, including an empty document, yields a report. Malformed
//! lines degrade fields instead of raising errors.

pub mod assembler;
pub mod charge;
pub mod city;
pub mod lines;
pub mod patterns;

use chrono::{Local, NaiveDate};
use jail_report_booking_models::BookedInReport;

use crate::assembler::RecordAssembler;

/// Parses every page of a booked-in report into structured records.
///
/// All lines are fed through one assembler in document order, so a record
/// that straddles a page boundary is reassembled seamlessly. The report
/// date is the first `M/D/YYYY` on the first page; when none is found or
/// it fails to parse as a calendar date, today's date is used silently.
#[must_use]
pub fn parse_pages(pages: &[String]) -> BookedInReport {
    let report_date = pages.first().map_or_else(today, |text| report_date_from(text));

    let mut assembler = RecordAssembler::new();
    for page in pages {
        for line in page.lines() {
            assembler.feed_line(line);
        }
    }
    let records = assembler.finish();
    log::info!("parsed {} booking records", records.len());

    BookedInReport {
        report_date,
        records,
    }
}

/// First date on the page that parses as a real calendar date, else today.
fn report_date_from(text: &str) -> NaiveDate {
    patterns::first_date(text)
        .and_then(|raw| NaiveDate::parse_from_str(raw, "%m/%d/%Y").ok())
        .unwrap_or_else(today)
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
