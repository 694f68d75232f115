//! PDF download with retry on transient failures.
//!
//! The county server is flaky around its nightly publish window, so every
//! download goes through an exponential-backoff retry loop instead of a
//! bare `send()`.

use std::time::Duration;

use crate::FetchError;

/// Retry attempts allowed per download before giving up.
///
/// The backoff doubles each time (2s, 4s, 8s, 16s, 32s), so a download
/// that never succeeds ties up the run for 62 seconds at most.
const MAX_RETRIES: u32 = 5;

/// Downloads the PDF at `url` and returns its raw bytes.
///
/// Retries up to [`MAX_RETRIES`] times with exponential backoff on
/// connection errors, timeouts, HTTP 429, HTTP 5xx, and body-read
/// failures. Other 4xx statuses are permanent: the report for a missing
/// day slot is a plain 404 and retrying it is pointless.
///
/// # Errors
///
/// Returns [`FetchError`] if the request keeps failing after all retries
/// or the server answers with a non-retryable status.
pub async fn download_pdf(client: &reqwest::Client, url: &str) -> Result<Vec<u8>, FetchError> {
    for attempt in 0..=MAX_RETRIES {
        if attempt > 0 {
            let delay = Duration::from_secs(1u64 << attempt); // 2s, 4s, 8s
            log::warn!("  retry {attempt}/{MAX_RETRIES} in {delay:?}...");
            tokio::time::sleep(delay).await;
        }

        let response = match client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                if is_transient(&e) && attempt < MAX_RETRIES {
                    log::warn!("  transient error: {e}");
                    continue;
                }
                return Err(FetchError::Http(e));
            }
        };

        let status = response.status();

        // 429 and 5xx are worth another attempt; other 4xx are permanent.
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
            if attempt < MAX_RETRIES {
                log::warn!("  HTTP {status}");
                continue;
            }
            return Err(FetchError::Status {
                status,
                url: url.to_owned(),
            });
        }
        if status.is_client_error() {
            return Err(FetchError::Status {
                status,
                url: url.to_owned(),
            });
        }

        match response.bytes().await {
            Ok(bytes) => {
                log::debug!("downloaded {} bytes from {url}", bytes.len());
                return Ok(bytes.to_vec());
            }
            Err(e) => {
                if attempt < MAX_RETRIES {
                    log::warn!("  body read failed: {e}");
                    continue;
                }
                return Err(FetchError::Http(e));
            }
        }
    }

    // Every path through the loop body returns on its final attempt.
    unreachable!("download retry loop exited without returning")
}

/// Whether the error class tends to clear up on its own.
fn is_transient(e: &reqwest::Error) -> bool {
    e.is_timeout() || e.is_connect() || e.is_body() || e.is_decode() || e.is_request()
}
