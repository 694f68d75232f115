//! The authoritative pattern library for the booked-in report.
//!
//! Every recognizer the parser relies on lives here, compiled once. The
//! report format has exactly one reliable signal, the booking-number token
//! `DD-DDDDDDD`, and a collection of weaker lexical cues (street suffixes,
//! city/state/zip shapes, header layouts). Charge extraction anchors on
//! booking numbers whenever they are present; the address heuristics only
//! decide the fate of anchor-less text.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

/// Full record header: `LAST, FIRST... <6-7 digit CID> <M/D/YYYY>`.
static NAME_CID_DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<name>[A-Z][A-Z' \-]+,\s*[A-Z0-9][A-Z0-9' \-]+)\s+(?P<cid>\d{6,7})\s+(?P<date>\d{1,2}/\d{1,2}/\d{4})$",
    )
    .expect("valid regex")
});

/// Split-header first half: a line carrying only the CID and date.
static CID_DATE_ONLY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<cid>\d{6,7})\s+(?P<date>\d{1,2}/\d{1,2}/\d{4})$").expect("valid regex"));

/// Split-header second half: a bare `LAST, FIRST...` name line.
static NAME_ONLY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][A-Z' \-]+,\s*[A-Z0-9][A-Z0-9' \-]+$").expect("valid regex"));

/// Booking-number anchor, the one fixed-format token in the report.
static BOOKING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{2}-\d{7}\b").expect("valid regex"));

/// Whole line of the form `CITY TX 76102` (optional zip+4).
pub(crate) static CITY_STATE_ZIP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<city>[A-Z][A-Z \-']+)\s+TX\s+(?P<zip>\d{5})(?:-\d{4})?$").expect("valid regex")
});

/// Whole line of the form `CITY TX`, zip optional.
pub(crate) static CITY_STATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<city>[A-Z][A-Z \-']+)\s+TX(?:\s+\d{5}(?:-\d{4})?)?$").expect("valid regex")
});

/// Street-suffix tokens that mark a line as address-like.
static STREET_SUFFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(AVE|AV|ST|DR|RD|LN|BLVD|CT|CIR|PKWY|HWY|TER|PL|WAY|TRL|LOOP|FWY|SQ|PARK|RUN|HOLW|HOLLOW|ROW|PT|PIKE|CV|COVE)\b",
    )
    .expect("valid regex")
});

/// House number at the start of a line.
static LEADING_STREET_NUM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,6}\s+").expect("valid regex"));

/// Trailing `CITY TX 76102` tail that bled into charge text.
pub(crate) static TRAILING_CITY_TX_ZIP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s+([A-Z][A-Z \-']+)\s+TX\s+\d{5}(?:-\d{4})?\s*$").expect("valid regex")
});

/// Embedded street address inside charge text. Requires a leading space so
/// a fragment that IS entirely an address is left for the address
/// heuristics, and uses a narrower suffix list than [`STREET_SUFFIX_RE`]
/// because short tokens like `PT` and `RUN` appear in legitimate charges.
pub(crate) static INLINE_STREET_ADDR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\s+\d{1,6}\s+[A-Z0-9][A-Z0-9 \-']{1,40}\s+(AVE|AV|ST|DR|RD|LN|BLVD|CT|CIR|PKWY|HWY|TER|PL|WAY|TRL|LOOP|FWY|SQ|CV|COVE)\b.*$",
    )
    .expect("valid regex")
});

/// Bare `TX 76102` fragment anywhere in a string (optional zip+4).
pub(crate) static STATE_ZIP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\s)TX\s+\d{5}(?:-\d{4})?\b").expect("valid regex"));

/// `... CITY TX 76102` at the end of a line, city not at line start.
pub(crate) static CITY_TX_ZIP_END_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Z][A-Z \-']+)\s+TX\s+\d{5}(?:-\d{4})?$").expect("valid regex"));

/// `CITY[,] TX 76102` embedded anywhere in a line.
pub(crate) static CITY_TX_ZIP_ANY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([A-Z][A-Z \-']+),?\s+TX\s+\d{5}(?:-\d{4})?\b").expect("valid regex")
});

/// First `M/D/YYYY` occurrence, used for the document-level report date.
pub(crate) static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{1,2}/\d{1,2}/\d{4}").expect("valid regex"));

/// Identity fields pulled from a full record-header line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordHeader {
    /// Name exactly as printed on the header line.
    pub name: String,
    /// County person identifier, 6-7 digits.
    pub identifier: String,
    /// Book-in date, `M/D/YYYY`.
    pub book_in_date: String,
}

/// Matches a single-line record header carrying name, identifier, and date.
#[must_use]
pub fn match_name_identifier_date(line: &str) -> Option<RecordHeader> {
    NAME_CID_DATE_RE.captures(line).map(|caps| RecordHeader {
        name: caps["name"].to_string(),
        identifier: caps["cid"].to_string(),
        book_in_date: caps["date"].to_string(),
    })
}

/// Matches the identifier+date half of a split header. Returns
/// `(identifier, book_in_date)`.
#[must_use]
pub fn match_identifier_date_only(line: &str) -> Option<(String, String)> {
    CID_DATE_ONLY_RE
        .captures(line)
        .map(|caps| (caps["cid"].to_string(), caps["date"].to_string()))
}

/// Returns `true` for a bare `LAST, FIRST...` line with no trailing
/// identifier or date, the name half of a split header.
#[must_use]
pub fn is_name_only(line: &str) -> bool {
    NAME_ONLY_RE.is_match(line)
}

/// Finds every booking-number anchor in the line, in order. Each returned
/// span bounds the start of one charge description, running to the next
/// anchor or the end of the line.
#[must_use]
pub fn booking_anchors(line: &str) -> Vec<Range<usize>> {
    BOOKING_RE.find_iter(line).map(|m| m.range()).collect()
}

/// Weak heuristic for anchor-less text: city/state/zip shape, a leading
/// house number, or a street-suffix token anywhere in the line.
#[must_use]
pub fn looks_like_address(line: &str) -> bool {
    let upper = line.trim().to_uppercase();
    if upper.is_empty() {
        return false;
    }
    CITY_STATE_ZIP_RE.is_match(&upper)
        || CITY_STATE_RE.is_match(&upper)
        || LEADING_STREET_NUM_RE.is_match(&upper)
        || STREET_SUFFIX_RE.is_match(&upper)
}

/// Returns the first `M/D/YYYY` substring in a block of text, used to pull
/// the document-level report date off the first page.
#[must_use]
pub fn first_date(text: &str) -> Option<&str> {
    DATE_RE.find(text).map(|m| m.as_str())
}
