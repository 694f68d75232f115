//! PDF text extraction.
//!
//! Extraction uses [`pdf_extract`], which renders each page to plain text
//! and separates pages with form feeds. Table structure does not survive
//! this step; the parser downstream is built around that loss.

use crate::FetchError;

/// Extracts the text of every page of a PDF, in document order.
///
/// Blank pages are dropped so the first returned page is the one carrying
/// the report header.
///
/// # Errors
///
/// Returns [`FetchError::Extraction`] if the bytes cannot be read as a
/// PDF.
pub fn extract_pages(bytes: &[u8]) -> Result<Vec<String>, FetchError> {
    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| FetchError::Extraction(format!("failed to extract text from PDF: {e}")))?;

    log::debug!("extracted {} characters of text", text.len());

    Ok(split_pages(&text))
}

/// Splits extracted text on form feeds, dropping blank pages.
fn split_pages(text: &str) -> Vec<String> {
    text.split('\u{c}')
        .filter(|page| !page.trim().is_empty())
        .map(str::to_owned)
        .collect()
}
