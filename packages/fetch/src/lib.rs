#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Retrieval and text extraction for the booked-in report PDF.
//!
//! The county publishes the report at a fixed URL per day-of-month slot.
//! This crate builds that URL, downloads the PDF with retry on transient
//! failures, and extracts its text with [`pdf_extract`], one string per
//! page. It knows nothing about the report's contents; reconstruction
//! lives downstream in the parser.

pub mod download;
pub mod extract;

use std::path::Path;

/// Errors specific to report retrieval and extraction.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// An HTTP request for the report failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a status no amount of retrying will fix,
    /// or kept failing until the retry budget ran out.
    #[error("HTTP {status} from {url}")]
    Status {
        /// Final response status.
        status: reqwest::StatusCode,
        /// URL the request was sent to.
        url: String,
    },

    /// PDF text extraction failed.
    #[error("PDF extraction error: {0}")]
    Extraction(String),

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Builds the report URL for a given day-of-month slot.
///
/// The publisher overwrites a fixed set of files named `01.PDF` through
/// `31.PDF`, so `day` is passed through verbatim (zero-padded, as the
/// site expects) rather than derived from a date.
#[must_use]
pub fn booked_in_url(base_url: &str, day: &str) -> String {
    format!("{}/{}.PDF", base_url.trim_end_matches('/'), day.trim())
}

/// Downloads the report PDF at `url` and extracts its text, one string
/// per page.
///
/// # Errors
///
/// Returns [`FetchError`] if the download fails after all retries or the
/// bytes cannot be read as a PDF.
pub async fn fetch_report_pages(
    client: &reqwest::Client,
    url: &str,
) -> Result<Vec<String>, FetchError> {
    let bytes = download::download_pdf(client, url).await?;
    extract::extract_pages(&bytes)
}

/// Reads a previously downloaded report PDF from disk.
///
/// # Errors
///
/// Returns [`FetchError::Io`] if the file cannot be read.
pub fn read_pdf_file(path: &Path) -> Result<Vec<u8>, FetchError> {
    Ok(std::fs::read(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_base_and_day_slot() {
        assert_eq!(
            booked_in_url("https://example.com/Reports/JailedInmates/FinalPDF", "01"),
            "https://example.com/Reports/JailedInmates/FinalPDF/01.PDF"
        );
    }

    #[test]
    fn url_tolerates_trailing_slash_and_padding() {
        assert_eq!(
            booked_in_url("https://example.com/reports/", " 17 "),
            "https://example.com/reports/17.PDF"
        );
    }
}
