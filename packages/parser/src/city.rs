//! Best-effort city extraction from a record's accumulated address lines.
//!
//! The report prints the inmate's address across one or more lines with no
//! delimiter, so the city is recovered by pattern priority: a clean
//! city/state/zip line is trusted most, a city/state line next, and an
//! embedded match anywhere in a line is the last resort. Within each tier
//! only the first matching line counts, so a later unrelated fragment can
//! never override an already-confident match.

use jail_report_booking_models::UNKNOWN_CITY;

use crate::lines;
use crate::patterns::{CITY_STATE_RE, CITY_STATE_ZIP_RE, CITY_TX_ZIP_ANY_RE, CITY_TX_ZIP_END_RE};

/// Extracts the most likely city from the address lines, title-cased, or
/// `"Unknown"` when nothing matches.
#[must_use]
pub fn extract_city(addr_lines: &[String]) -> String {
    for line in addr_lines {
        let upper = lines::normalize(line).to_uppercase();
        if let Some(caps) = CITY_STATE_ZIP_RE.captures(&upper) {
            return lines::normalize(&lines::title_case(&caps["city"]));
        }
    }
    for line in addr_lines {
        let upper = lines::normalize(line).to_uppercase();
        if let Some(caps) = CITY_STATE_RE.captures(&upper) {
            return lines::normalize(&lines::title_case(&caps["city"]));
        }
    }
    for line in addr_lines {
        let upper = lines::normalize(line).to_uppercase();
        if let Some(caps) = CITY_TX_ZIP_END_RE.captures(&upper) {
            return lines::normalize(&lines::title_case(&caps[1]));
        }
        if let Some(caps) = CITY_TX_ZIP_ANY_RE.captures(&upper) {
            return lines::normalize(&lines::title_case(&caps[1]));
        }
    }
    UNKNOWN_CITY.to_string()
}
