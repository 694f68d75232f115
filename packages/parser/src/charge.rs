//! Charge-text cleanup.
//!
//! Charge descriptions in the report frequently arrive with the inmate's
//! street address, city, or zip bled onto the same extracted line. The
//! cleaner strips those tails and rejects boilerplate, leaving charge-only
//! text or nothing. It cannot remove every conceivable address fragment
//! from free text; what it does guarantee is that no state+zip pattern and
//! no boilerplate substring survives in its output.

use crate::lines;
use crate::patterns::{INLINE_STREET_ADDR_RE, STATE_ZIP_RE, TRAILING_CITY_TX_ZIP_RE};

/// Cleans a raw charge fragment down to charge-only text, or empty.
///
/// One deletion pass runs repeatedly until the text stops changing. Each
/// pass only removes characters, so the loop terminates, and the fixpoint
/// makes the function idempotent: a deletion that happens to join the two
/// halves of a noise pattern is caught by the next pass.
#[must_use]
pub fn clean_charge_text(raw: &str) -> String {
    let mut text = lines::normalize(raw);
    loop {
        let cleaned = clean_pass(&text);
        if cleaned == text {
            return text;
        }
        text = cleaned;
    }
}

/// One deletion pass: boilerplate rejection, then the embedded street
/// address, then the trailing city/state/zip tail. Bare state+zip runs
/// are removed only in passes where no city-bearing tail matched;
/// stripping the zip first would strand the city name in front of it.
fn clean_pass(text: &str) -> String {
    if lines::is_junk(text) {
        return String::new();
    }
    let text = INLINE_STREET_ADDR_RE.replace_all(text, "");
    let text = if TRAILING_CITY_TX_ZIP_RE.is_match(&text) {
        TRAILING_CITY_TX_ZIP_RE.replace_all(&text, "")
    } else {
        STATE_ZIP_RE.replace_all(&text, "")
    };
    text.trim().to_string()
}
