//! The record-assembly state machine.
//!
//! Text extraction flattens the report's table into an undifferentiated
//! stream of lines: header lines, address lines, and charge lines arrive
//! interleaved with no markers. The assembler walks that stream once,
//! holding at most one record open at a time, and decides each line's fate
//! by pattern priority — full header, split-header halves, then content
//! routed between the address and charge buffers.
//!
//! The machine has three states. `Idle` between records, `Pending` after a
//! CID+date line whose name should follow on the next line, and `Open`
//! while a record accumulates content. A pending identity that is not
//! resolved by the very next line is discarded so stale identifiers can
//! never adopt unrelated content.

use jail_report_booking_models::BookingRecord;

use crate::charge::clean_charge_text;
use crate::city::extract_city;
use crate::lines;
use crate::patterns::{
    booking_anchors, is_name_only, looks_like_address, match_identifier_date_only,
    match_name_identifier_date,
};

/// Identity pair held while waiting for the name half of a split header.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingIdentity {
    identifier: String,
    book_in_date: String,
}

/// A record under construction: identity fields plus the raw accumulator
/// buffers. Fragments stay raw until finalization so wrap continuations
/// can attach to the text they visually continue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct WorkingRecord {
    name: String,
    identifier: String,
    book_in_date: String,
    addr_lines: Vec<String>,
    charge_fragments: Vec<String>,
}

/// Assembler state: between records, holding half a header, or filling one.
#[derive(Debug, Clone, PartialEq, Eq)]
enum State {
    Idle,
    Pending(PendingIdentity),
    Open(Box<WorkingRecord>),
}

/// Consumes the document's lines in order and emits finalized records.
///
/// Feed every line of every page through [`feed_line`](Self::feed_line),
/// then call [`finish`](Self::finish). The machine never fails: malformed
/// or ambiguous lines are dropped or misclassified, never errors.
#[derive(Debug)]
pub struct RecordAssembler {
    state: State,
    records: Vec<BookingRecord>,
}

impl RecordAssembler {
    /// Creates an assembler with no open record and no pending identity.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: State::Idle,
            records: Vec::new(),
        }
    }

    /// Classifies one raw line and advances the machine.
    pub fn feed_line(&mut self, raw: &str) {
        let line = lines::normalize(raw);
        if lines::is_junk(&line) {
            return;
        }

        // Full header: close out whatever was open and start fresh. Any
        // pending identity is cleared along the way.
        if let Some(header) = match_name_identifier_date(&line) {
            self.finalize_open();
            self.open_record(header.name, header.identifier, header.book_in_date);
            return;
        }

        // Identifier+date half of a split header. The name should follow
        // on the next line.
        if let Some((identifier, book_in_date)) = match_identifier_date_only(&line) {
            self.finalize_open();
            self.state = State::Pending(PendingIdentity {
                identifier,
                book_in_date,
            });
            return;
        }

        if let State::Pending(pending) = &self.state {
            if is_name_only(&line) {
                let PendingIdentity {
                    identifier,
                    book_in_date,
                } = pending.clone();
                self.open_record(line, identifier, book_in_date);
            } else {
                // The expected name never arrived. Drop the identity
                // instead of attaching unrelated content to it; the line
                // itself is dropped too, since no record is open.
                log::debug!("discarding unresolved pending identity at {line:?}");
                self.state = State::Idle;
            }
            return;
        }

        if let State::Open(record) = &mut self.state {
            route_content_line(record, &line);
        }
        // Idle with no header match: noise between records, dropped.
    }

    /// Ends the input, finalizing any open record. A pending identity
    /// whose name never arrived is dropped: it produced nothing usable.
    #[must_use]
    pub fn finish(mut self) -> Vec<BookingRecord> {
        self.finalize_open();
        self.records
    }

    /// Opens a fresh record, repairing a name that swallowed charge text.
    ///
    /// A layout bleed can put booking numbers and charges on the header
    /// line itself, where the header pattern captures them as part of the
    /// name. The name is truncated at the first booking anchor and the
    /// remainder is routed as ordinary content, so the bled charges become
    /// the new record's first fragments.
    fn open_record(&mut self, name: String, identifier: String, book_in_date: String) {
        let mut record = WorkingRecord {
            name: name.trim().to_string(),
            identifier,
            book_in_date,
            addr_lines: Vec::new(),
            charge_fragments: Vec::new(),
        };
        if let Some(first) = booking_anchors(&record.name).first() {
            let bled = record.name[first.start..].to_string();
            record.name.truncate(first.start);
            record.name.truncate(record.name.trim_end().len());
            route_content_line(&mut record, &bled);
        }
        self.state = State::Open(Box::new(record));
    }

    /// Emits the open record, if any, returning the machine to `Idle`.
    fn finalize_open(&mut self) {
        if let State::Open(record) = std::mem::replace(&mut self.state, State::Idle) {
            self.records.push(finalize(*record));
        }
    }
}

impl Default for RecordAssembler {
    fn default() -> Self {
        Self::new()
    }
}

/// Routes one content line into the record's address or charge buffers.
///
/// Booking anchors dominate: when any are present, the pre-anchor text
/// goes to the address buffer only if it reads as an address, and each
/// anchor yields exactly one raw fragment running from the anchor's end to
/// the next anchor or the end of the line. Anchor-less lines fall back to
/// the address heuristic; failing that, the line starts the charge buffer
/// or continues its last entry — a description the PDF wrapped across
/// lines.
fn route_content_line(record: &mut WorkingRecord, line: &str) {
    let anchors = booking_anchors(line);
    if !anchors.is_empty() {
        let pre = line[..anchors[0].start].trim();
        if !pre.is_empty() && looks_like_address(pre) {
            record.addr_lines.push(pre.to_string());
        }
        for (i, anchor) in anchors.iter().enumerate() {
            let end = anchors.get(i + 1).map_or(line.len(), |next| next.start);
            let fragment = line[anchor.end..end].trim_matches([' ', '-', '\t']);
            record.charge_fragments.push(fragment.to_string());
        }
        return;
    }

    if looks_like_address(line) {
        record.addr_lines.push(line.to_string());
        return;
    }

    match record.charge_fragments.last_mut() {
        None => record.charge_fragments.push(line.to_string()),
        Some(last) if last.is_empty() => line.clone_into(last),
        Some(last) => *last = format!("{last} {line}"),
    }
}

/// Converts an accumulated record into its emitted form: fragments are
/// cleaned, empties dropped, duplicates removed case-insensitively in
/// first-seen order, and the city is extracted from the junk-filtered
/// address lines. Records with degraded identity fields are still emitted.
fn finalize(record: WorkingRecord) -> BookingRecord {
    let mut charges: Vec<String> = Vec::new();
    for fragment in &record.charge_fragments {
        let cleaned = clean_charge_text(fragment);
        if cleaned.is_empty() || charges.iter().any(|c| c.eq_ignore_ascii_case(&cleaned)) {
            continue;
        }
        charges.push(cleaned);
    }

    let addr_lines: Vec<String> = record
        .addr_lines
        .iter()
        .map(|a| lines::normalize(a))
        .filter(|a| !lines::is_junk(a))
        .collect();

    BookingRecord {
        name: record.name.trim().to_string(),
        identifier: record.identifier.trim().to_string(),
        book_in_date: record.book_in_date.trim().to_string(),
        city: extract_city(&addr_lines),
        charges,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_lines(lines: &[&str]) -> Vec<BookingRecord> {
        let mut assembler = RecordAssembler::new();
        for line in lines {
            assembler.feed_line(line);
        }
        assembler.finish()
    }

    #[test]
    fn assembles_full_header_with_address_and_anchor_line() {
        let records = parse_lines(&[
            "SMITH, JOHN   1234567   1/2/2026",
            "123 MAIN ST",
            "FORT WORTH TX 76102 26-0000001 THEFT OF PROPERTY",
            "JONES, JANE   7654321   1/2/2026",
        ]);
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].name, "SMITH, JOHN");
        assert_eq!(records[0].identifier, "1234567");
        assert_eq!(records[0].book_in_date, "1/2/2026");
        assert_eq!(records[0].city, "Fort Worth");
        assert_eq!(records[0].charges, vec!["THEFT OF PROPERTY".to_string()]);

        assert_eq!(records[1].name, "JONES, JANE");
        assert_eq!(records[1].identifier, "7654321");
        assert_eq!(records[1].city, "Unknown");
        assert!(records[1].charges.is_empty());
    }

    #[test]
    fn split_header_matches_single_line_header() {
        let split = parse_lines(&[
            "1234567 1/2/2026",
            "SMITH, JOHN",
            "26-0000001 THEFT OF PROPERTY",
        ]);
        let single = parse_lines(&[
            "SMITH, JOHN 1234567 1/2/2026",
            "26-0000001 THEFT OF PROPERTY",
        ]);
        assert_eq!(split, single);
        assert_eq!(split[0].name, "SMITH, JOHN");
        assert_eq!(split[0].identifier, "1234567");
        assert_eq!(split[0].book_in_date, "1/2/2026");
    }

    #[test]
    fn two_anchors_yield_two_charges() {
        let records = parse_lines(&[
            "SMITH, JOHN 1234567 1/2/2026",
            "26-0000001 THEFT OF PROPERTY 26-0000002 EVADING ARREST",
        ]);
        assert_eq!(
            records[0].charges,
            vec!["THEFT OF PROPERTY".to_string(), "EVADING ARREST".to_string()]
        );
    }

    #[test]
    fn each_header_past_the_first_emits_one_record() {
        let records = parse_lines(&[
            "SMITH, JOHN 1234567 1/2/2026",
            "26-0000001 THEFT OF PROPERTY",
            "JONES, JANE 7654321 1/2/2026",
            "BROWN, BOB 1111111 1/3/2026",
            "GREEN, GINA 2222222 1/3/2026",
        ]);
        assert_eq!(records.len(), 4);
        let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["SMITH, JOHN", "JONES, JANE", "BROWN, BOB", "GREEN, GINA"]
        );
    }

    #[test]
    fn duplicate_charges_collapse_to_first_occurrence() {
        let records = parse_lines(&[
            "SMITH, JOHN 1234567 1/2/2026",
            "26-0000001 THEFT OF PROPERTY",
            "26-0000002 EVADING ARREST",
            "26-0000003 Theft of Property",
        ]);
        assert_eq!(
            records[0].charges,
            vec!["THEFT OF PROPERTY".to_string(), "EVADING ARREST".to_string()]
        );
    }

    #[test]
    fn wrapped_description_continues_last_fragment() {
        let records = parse_lines(&[
            "SMITH, JOHN 1234567 1/2/2026",
            "26-0000001 AGG ASSAULT W/DEADLY",
            "WEAPON FAMILY VIOLENCE",
        ]);
        assert_eq!(
            records[0].charges,
            vec!["AGG ASSAULT W/DEADLY WEAPON FAMILY VIOLENCE".to_string()]
        );
    }

    #[test]
    fn wrap_fills_empty_fragment_from_trailing_anchor() {
        // An anchor at the end of a line leaves an empty fragment that the
        // wrapped description on the next line fills in.
        let records = parse_lines(&[
            "SMITH, JOHN 1234567 1/2/2026",
            "FORT WORTH TX 76102 26-0000001",
            "THEFT OF PROPERTY",
        ]);
        assert_eq!(records[0].charges, vec!["THEFT OF PROPERTY".to_string()]);
        assert_eq!(records[0].city, "Fort Worth");
    }

    #[test]
    fn pending_identity_discarded_when_name_never_arrives() {
        let records = parse_lines(&[
            "1234567 1/2/2026",
            "THEFT OF PROPERTY",
            "SMITH, JOHN 7654321 1/3/2026",
        ]);
        // The dangling identity produced no record, and the charge line
        // that killed it was dropped rather than attached to SMITH.
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "SMITH, JOHN");
        assert_eq!(records[0].identifier, "7654321");
        assert!(records[0].charges.is_empty());
    }

    #[test]
    fn dangling_pending_identity_at_end_of_input_is_dropped() {
        let records = parse_lines(&["SMITH, JOHN 1234567 1/2/2026", "7654321 1/3/2026"]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "SMITH, JOHN");
    }

    #[test]
    fn identifier_date_line_finalizes_open_record() {
        let records = parse_lines(&[
            "SMITH, JOHN 1234567 1/2/2026",
            "26-0000001 THEFT OF PROPERTY",
            "7654321 1/3/2026",
            "JONES, JANE",
        ]);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].charges, vec!["THEFT OF PROPERTY".to_string()]);
        assert_eq!(records[1].name, "JONES, JANE");
        assert_eq!(records[1].identifier, "7654321");
        assert_eq!(records[1].book_in_date, "1/3/2026");
    }

    #[test]
    fn name_with_embedded_booking_number_is_repaired() {
        let records = parse_lines(&[
            "BROWN, YARON VICTORY 26-0261822 ASSAULT CAUSES BODILY INJURY 1234567 1/2/2026",
        ]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "BROWN, YARON VICTORY");
        assert_eq!(records[0].identifier, "1234567");
        assert_eq!(
            records[0].charges,
            vec!["ASSAULT CAUSES BODILY INJURY".to_string()]
        );
    }

    #[test]
    fn junk_lines_never_reach_the_buffers() {
        let records = parse_lines(&[
            "SMITH, JOHN 1234567 1/2/2026",
            "PAGE: 2 OF 7",
            "INMATE NAME IDENTIFIER CID BOOK IN DATE",
            "26-0000001 THEFT OF PROPERTY",
        ]);
        assert_eq!(records[0].charges, vec!["THEFT OF PROPERTY".to_string()]);
    }

    #[test]
    fn noise_before_any_header_is_dropped() {
        let records = parse_lines(&[
            "THEFT OF PROPERTY",
            "FORT WORTH TX 76102",
            "SMITH, JOHN 1234567 1/2/2026",
        ]);
        assert_eq!(records.len(), 1);
        assert!(records[0].charges.is_empty());
        assert_eq!(records[0].city, "Unknown");
    }

    #[test]
    fn empty_input_yields_no_records() {
        assert!(parse_lines(&[]).is_empty());
        assert!(parse_lines(&["", "   ", "PAGE: 1 OF 1"]).is_empty());
    }

    #[test]
    fn adjacent_anchors_add_fragments_without_empty_charges() {
        let records = parse_lines(&[
            "SMITH, JOHN 1234567 1/2/2026",
            "26-0000001 26-0000002 THEFT OF PROPERTY",
        ]);
        // The first anchor's fragment is empty and is dropped at
        // finalization; only the real charge survives.
        assert_eq!(records[0].charges, vec!["THEFT OF PROPERTY".to_string()]);
    }

    #[test]
    fn address_charge_and_wrap_interleave() {
        let records = parse_lines(&[
            "DE LA CRUZ, MARIA-ELENA 654321 12/31/2025",
            "9452 WHITE SETTLEMENT RD",
            "FORT WORTH TX 76108 26-0000010 POSS CS PG 1 LESS THAN",
            "ONE GRAM",
            "26-0000011 DRIVING W/LIC INV",
        ]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].city, "Fort Worth");
        assert_eq!(
            records[0].charges,
            vec![
                "POSS CS PG 1 LESS THAN ONE GRAM".to_string(),
                "DRIVING W/LIC INV".to_string()
            ]
        );
    }
}
