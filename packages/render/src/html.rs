//! HTML fragment builders for the daily report template.
//!
//! The template is plain email HTML (nested presentation tables, inline
//! styles), so each builder emits `<tr>` blocks ready to drop into a
//! placeholder. Everything interpolated from report data goes through
//! [`escape_html`].

use jail_report_booking_models::BookingRecord;
use jail_report_stats::{ALL_OTHER_CITIES, ChargeMixEntry, CityCount};

/// Escapes the five characters with meaning in HTML text and attributes.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Bar rows for the charge-mix section: full label, bar, percent (count).
pub(crate) fn charge_mix_rows(mix: &[ChargeMixEntry]) -> String {
    let mut rows = String::new();
    for entry in mix {
        let label = escape_html(entry.category.label());
        let color = entry.category.bar_color();
        let pct = entry.percent;
        let count = entry.count;
        rows.push_str(&format!(
            r#"<tr>
  <td style="padding:3px 0; width:140px; color:#666360; font-size:11px; vertical-align:middle;">{label}</td>
  <td style="padding:3px 8px; vertical-align:middle;">
    <table role="presentation" width="100%" cellpadding="0" cellspacing="0" border="0" style="background-color:#e8e4dc; border-radius:2px;">
      <tr><td style="width:{pct}%; background-color:{color}; height:14px; border-radius:2px; font-size:1px;">&nbsp;</td><td style="font-size:1px;">&nbsp;</td></tr>
    </table>
  </td>
  <td style="padding:3px 0; width:70px; color:#1a1a1a; font-weight:700; text-align:right; font-size:11px; vertical-align:middle;">{pct}%&nbsp;<span style="color:#999590; font-weight:400; font-size:10px;">({count})</span></td>
</tr>
"#
        ));
    }
    rows
}

/// Bar rows for the city section. The remainder bucket is styled muted
/// and italic so it reads as a footnote rather than a city.
pub(crate) fn city_rows(cities: &[CityCount]) -> String {
    let mut rows = String::new();
    for entry in cities {
        let (color, label_style) = if entry.city == ALL_OTHER_CITIES {
            ("#a09890", "color:#999590; font-style:italic;")
        } else {
            ("#c8a45a", "color:#666360;")
        };
        let label = escape_html(&entry.city);
        let pct = entry.percent;
        let count = entry.count;
        rows.push_str(&format!(
            r#"<tr>
  <td style="padding:3px 0; width:140px; {label_style} font-size:11px; vertical-align:middle;">{label}</td>
  <td style="padding:3px 8px; vertical-align:middle;">
    <table role="presentation" width="100%" cellpadding="0" cellspacing="0" border="0" style="background-color:#e8e4dc; border-radius:2px;">
      <tr><td style="width:{pct}%; background-color:{color}; height:14px; border-radius:2px; font-size:1px;">&nbsp;</td><td style="font-size:1px;">&nbsp;</td></tr>
    </table>
  </td>
  <td style="padding:3px 0; width:70px; color:#1a1a1a; font-weight:700; text-align:right; font-size:11px; vertical-align:middle;">{pct}%&nbsp;<span style="color:#999590; font-weight:400; font-size:10px;">({count})</span></td>
</tr>
"#
        ));
    }
    rows
}

/// Compact chart rows: shortened category label, bar, percent only.
pub(crate) fn bar_rows(mix: &[ChargeMixEntry]) -> String {
    let mut rows = String::new();
    for entry in mix {
        let label = escape_html(entry.category.short_label());
        let color = entry.category.bar_color();
        let pct = entry.percent;
        rows.push_str(&format!(
            r#"<tr>
  <td style="padding:3px 0; width:140px; color:#666360; font-size:11px; vertical-align:middle;">{label}</td>
  <td style="padding:3px 8px; vertical-align:middle;">
    <table role="presentation" width="100%" cellpadding="0" cellspacing="0" border="0" style="background-color:#e8e4dc; border-radius:2px;">
      <tr><td style="width:{pct}%; background-color:{color}; height:14px; border-radius:2px; font-size:1px;">&nbsp;</td><td style="font-size:1px;">&nbsp;</td></tr>
    </table>
  </td>
  <td style="padding:3px 0; width:36px; color:#1a1a1a; font-weight:700; text-align:right; font-size:11px; vertical-align:middle;">{pct}%</td>
</tr>
"#
        ));
    }
    rows
}

/// Zebra-striped table rows for every booking, sorted by inmate name.
pub(crate) fn booking_rows(records: &[BookingRecord]) -> String {
    let mut sorted: Vec<&BookingRecord> = records.iter().collect();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));

    let mut rows = String::new();
    for (i, record) in sorted.iter().enumerate() {
        let n = i + 1;
        let bg = if n % 2 == 1 { "#faf8f5" } else { "#f4f1eb" };
        let name = escape_html(&record.name);
        let date = escape_html(&record.book_in_date);
        let description = escape_html(&record.description());
        let city = escape_html(&record.city);
        rows.push_str(&format!(
            r#"<tr style="background-color:{bg};">
  <td style="padding:9px 12px; color:#999590; font-size:11px; border-bottom:1px solid #e8e4dc; vertical-align:top;">{n}</td>
  <td style="padding:9px 12px; color:#1a1a1a; font-weight:600; border-bottom:1px solid #e8e4dc; vertical-align:top; font-size:12px;">{name}</td>
  <td style="padding:9px 12px; color:#666360; border-bottom:1px solid #e8e4dc; vertical-align:top; font-size:12px;">{date}</td>
  <td style="padding:9px 12px; color:#444240; border-bottom:1px solid #e8e4dc; vertical-align:top; font-size:11px;">{description}</td>
  <td style="padding:9px 12px; color:#666360; border-bottom:1px solid #e8e4dc; vertical-align:top; font-size:12px;">{city}</td>
</tr>
"#
        ));
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use jail_report_booking_models::ChargeCategory;

    fn record(name: &str, city: &str, charges: &[&str]) -> BookingRecord {
        BookingRecord {
            name: name.to_owned(),
            identifier: "1234567".to_owned(),
            book_in_date: "1/2/2026".to_owned(),
            city: city.to_owned(),
            charges: charges.iter().map(|c| (*c).to_owned()).collect(),
        }
    }

    #[test]
    fn escape_html_replaces_the_five_entities() {
        assert_eq!(
            escape_html(r#"<b>"O'BRIEN & SONS"</b>"#),
            "&lt;b&gt;&quot;O&#x27;BRIEN &amp; SONS&quot;&lt;/b&gt;"
        );
    }

    #[test]
    fn escape_html_leaves_plain_text_alone() {
        assert_eq!(escape_html("SMITH, JOHN"), "SMITH, JOHN");
    }

    #[test]
    fn charge_mix_rows_show_label_percent_and_count() {
        let mix = vec![ChargeMixEntry {
            category: ChargeCategory::TheftFraud,
            count: 3,
            percent: 25,
        }];
        let rows = charge_mix_rows(&mix);
        assert!(rows.contains("Theft / Fraud"));
        assert!(rows.contains("width:25%"));
        assert!(rows.contains("25%&nbsp;"));
        assert!(rows.contains("(3)"));
        assert!(rows.contains("#c8a45a"));
    }

    #[test]
    fn city_rows_style_the_remainder_bucket_as_a_footnote() {
        let cities = vec![
            CityCount {
                city: "Fort Worth".to_owned(),
                count: 4,
                percent: 40,
            },
            CityCount {
                city: ALL_OTHER_CITIES.to_owned(),
                count: 2,
                percent: 20,
            },
        ];
        let rows = city_rows(&cities);
        assert!(rows.contains("Fort Worth"));
        assert!(rows.contains("font-style:italic;"));
        assert!(rows.contains("#a09890"));
    }

    #[test]
    fn bar_rows_use_short_labels_without_counts() {
        let mix = vec![ChargeMixEntry {
            category: ChargeCategory::FamilyViolenceAssault,
            count: 5,
            percent: 42,
        }];
        let rows = bar_rows(&mix);
        assert!(rows.contains("Fam. Violence"));
        assert!(rows.contains("42%"));
        assert!(!rows.contains("(5)"));
    }

    #[test]
    fn booking_rows_sort_by_name_and_alternate_stripes() {
        let records = vec![
            record("ZAPATA, LUIS", "Fort Worth", &["THEFT OF PROPERTY"]),
            record("ADAMS, KYLE", "Arlington", &["DWI 1ST"]),
        ];
        let rows = booking_rows(&records);
        let adams = rows.find("ADAMS, KYLE").unwrap();
        let zapata = rows.find("ZAPATA, LUIS").unwrap();
        assert!(adams < zapata);
        assert!(rows.contains("background-color:#faf8f5;"));
        assert!(rows.contains("background-color:#f4f1eb;"));
    }

    #[test]
    fn booking_rows_escape_report_text() {
        let records = vec![record("O'BRIEN, PAT", "Fort Worth", &["ASSAULT <FV>"])];
        let rows = booking_rows(&records);
        assert!(rows.contains("O&#x27;BRIEN, PAT"));
        assert!(rows.contains("ASSAULT &lt;FV&gt;"));
        assert!(!rows.contains("<FV>"));
    }
}
