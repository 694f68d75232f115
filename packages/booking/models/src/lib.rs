#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Booking record types and charge taxonomy for the daily jail report.
//!
//! This crate defines the canonical shape of a reconstructed booking record
//! and the fixed charge-category taxonomy used by the statistics and
//! rendering layers. The parser emits these types; everything downstream
//! consumes them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// City placeholder for records whose address lines yielded no match.
pub const UNKNOWN_CITY: &str = "Unknown";

/// One reconstructed booking, immutable once emitted by the parser.
///
/// Fields reflect the source report as extracted, not a validated identity:
/// a degraded record may carry an empty `identifier` or `book_in_date`, and
/// `city` falls back to `"Unknown"` when no address line yielded a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRecord {
    /// Inmate name as printed, `LAST, FIRST [MIDDLE]`, uppercase.
    pub name: String,
    /// County person identifier (CID), 6-7 digits. Empty when the source
    /// line was too degraded to carry one.
    pub identifier: String,
    /// Book-in date as printed, `M/D/YYYY`. Not validated as a calendar
    /// date beyond the format match.
    pub book_in_date: String,
    /// Best-effort city of residence, title-cased, or `"Unknown"`.
    pub city: String,
    /// Distinct charge descriptions in first-seen order. Never contains an
    /// empty string or report boilerplate.
    pub charges: Vec<String>,
}

impl BookingRecord {
    /// Returns the charges joined into a single display string.
    #[must_use]
    pub fn description(&self) -> String {
        self.charges.join(", ")
    }
}

/// A fully parsed booked-in report: the document-level report date plus
/// every booking reconstructed from it, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookedInReport {
    /// Date printed in the report header (first `M/D/YYYY` on page one),
    /// falling back to the run date when the header is unreadable.
    pub report_date: NaiveDate,
    /// All reconstructed bookings, in the order they appear in the report.
    pub records: Vec<BookingRecord>,
}

/// Fixed charge-category taxonomy for the daily snapshot.
///
/// Categories are matched against a record's charge text in declaration
/// order; the first category whose keyword list hits wins, so broader
/// buckets near the top shadow narrower ones below.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ChargeCategory {
    /// Driving while intoxicated and other alcohol offenses.
    DwiAlcohol,
    /// Controlled substance possession and related drug offenses.
    DrugsPossession,
    /// Assaultive offenses, including family violence.
    FamilyViolenceAssault,
    /// Theft, burglary, robbery, and fraud.
    TheftFraud,
    /// Weapons possession and unlawful carrying.
    Weapons,
    /// Evading arrest, resisting, and interference.
    EvadingResisting,
    /// Warrants, failures to appear, and bond or supervision violations.
    WarrantsCourtBond,
    /// Everything that matched no other category.
    OtherUnknown,
}

impl ChargeCategory {
    /// Human-readable label used in report sections.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::DwiAlcohol => "DWI / Alcohol",
            Self::DrugsPossession => "Drugs / Possession",
            Self::FamilyViolenceAssault => "Family Violence / Assault",
            Self::TheftFraud => "Theft / Fraud",
            Self::Weapons => "Weapons",
            Self::EvadingResisting => "Evading / Resisting",
            Self::WarrantsCourtBond => "Warrants / Court / Bond",
            Self::OtherUnknown => "Other / Unknown",
        }
    }

    /// Shortened label that fits the bar-chart gutter.
    #[must_use]
    pub const fn short_label(self) -> &'static str {
        match self {
            Self::DrugsPossession => "Drugs / Poss.",
            Self::FamilyViolenceAssault => "Fam. Violence",
            Self::EvadingResisting => "Evading",
            Self::WarrantsCourtBond => "Warrants",
            Self::OtherUnknown => "Other",
            other => other.label(),
        }
    }

    /// Bar fill color: muted gray for the catch-all bucket, gold otherwise.
    #[must_use]
    pub const fn bar_color(self) -> &'static str {
        match self {
            Self::OtherUnknown => "#a09890",
            _ => "#c8a45a",
        }
    }

    /// Uppercase substrings that place a charge in this category.
    ///
    /// Matching is plain substring containment against the record's combined
    /// charge text, so short tokens like `CS` cast a wide net on purpose:
    /// extraction damage leaves abbreviations more often than full phrases.
    /// The catch-all bucket has no keywords and matches nothing.
    #[must_use]
    pub const fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::DwiAlcohol => &[
                "DWI",
                "INTOX",
                "BAC",
                "DUI",
                "ALCOHOL",
                "DRUNK",
                "INTOXICATED",
                "PUBLIC INTOX",
                "OPEN CONT",
            ],
            Self::DrugsPossession => &[
                "POSS",
                "POSS CS",
                "CONTROLLED SUB",
                "CS",
                "DRUG",
                "NARC",
                "MARIJ",
                "METH",
                "COCAINE",
                "HEROIN",
                "PARAPH",
            ],
            Self::FamilyViolenceAssault => &[
                "FAMILY",
                "FV",
                "ASSAULT",
                "AGG ASSAULT",
                "BODILY INJURY",
                "CHOKE",
                "STRANG",
                "DOMESTIC",
            ],
            Self::TheftFraud => &[
                "THEFT", "BURGL", "ROBB", "FRAUD", "FORGERY", "IDENTITY", "STOLEN", "SHOPLIFT",
            ],
            Self::Weapons => &["WEAPON", "FIREARM", "GUN", "UCW", "UNL CARRYING"],
            Self::EvadingResisting => &["EVADING", "RESIST", "INTERFER", "OBSTRUCT", "FLEE"],
            Self::WarrantsCourtBond => {
                &["WARRANT", "FTA", "FAIL TO APPEAR", "BOND", "PAROLE", "PROBATION"]
            }
            Self::OtherUnknown => &[],
        }
    }

    /// Returns all categories in match-priority order, catch-all last.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::DwiAlcohol,
            Self::DrugsPossession,
            Self::FamilyViolenceAssault,
            Self::TheftFraud,
            Self::Weapons,
            Self::EvadingResisting,
            Self::WarrantsCourtBond,
            Self::OtherUnknown,
        ]
    }
}
