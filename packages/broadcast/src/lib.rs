#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Publishes the rendered report as a Kit (ConvertKit) broadcast.
//!
//! Kit wraps broadcast content in its own document shell, so only the
//! material between the report's `<body>` tags is sent. Publishing is a
//! single POST with no retry: the broadcasts endpoint is not idempotent
//! and a duplicate send reaches every subscriber twice.

/// Kit v3 broadcasts endpoint.
pub const DEFAULT_API_URL: &str = "https://api.convertkit.com/v3/broadcasts";

/// Errors specific to broadcast publishing.
#[derive(Debug, thiserror::Error)]
pub enum BroadcastError {
    /// An HTTP request to the broadcast API failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("broadcast API returned {status}: {body}")]
    Status {
        /// Response status.
        status: reqwest::StatusCode,
        /// Response body, kept for the API's error detail.
        body: String,
    },

    /// The API response was not valid JSON.
    #[error("invalid broadcast API response: {0}")]
    Json(#[from] serde_json::Error),
}

/// Credentials and endpoint for the broadcast API.
#[derive(Debug, Clone)]
pub struct BroadcastConfig {
    api_url: String,
    api_key: String,
    api_secret: Option<String>,
}

impl BroadcastConfig {
    /// Creates a config for the default Kit endpoint.
    #[must_use]
    pub fn new(api_key: &str) -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_owned(),
            api_key: api_key.to_owned(),
            api_secret: None,
        }
    }

    /// Adds the account API secret for endpoints that require it.
    #[must_use]
    pub fn with_api_secret(mut self, api_secret: &str) -> Self {
        self.api_secret = Some(api_secret.to_owned());
        self
    }

    /// Overrides the endpoint URL.
    #[must_use]
    pub fn with_api_url(mut self, api_url: &str) -> Self {
        self.api_url = api_url.to_owned();
        self
    }
}

/// Returns the content between a document's `<body …>` and `</body>`
/// tags, degrading gracefully on malformed input: the whole document
/// when no `<body>` exists, or everything after the opening tag when the
/// close is missing. Each fallback logs a warning.
#[must_use]
pub fn extract_body_content(html: &str) -> &str {
    let Some(body_start) = html.find("<body") else {
        log::warn!("no <body> tag in report HTML, sending the full document");
        return html;
    };
    let Some(open_end) = html[body_start..].find('>') else {
        log::warn!("malformed <body> tag in report HTML, sending the full document");
        return html;
    };
    let content_start = body_start + open_end + 1;
    match html[content_start..].find("</body>") {
        Some(close) => &html[content_start..content_start + close],
        None => {
            log::warn!("no </body> tag in report HTML, sending everything after <body>");
            &html[content_start..]
        }
    }
}

/// Creates a broadcast from the rendered report.
///
/// The payload is sent non-public with immediate delivery. Returns the
/// created broadcast id when the response carries one; a response
/// without an id is still a success.
///
/// # Errors
///
/// Returns [`BroadcastError`] if the request fails, the API answers with
/// a non-success status, or the response is not valid JSON.
pub async fn publish(
    client: &reqwest::Client,
    config: &BroadcastConfig,
    subject: &str,
    html: &str,
) -> Result<Option<u64>, BroadcastError> {
    let content = extract_body_content(html).trim();

    let mut payload = serde_json::json!({
        "api_key": config.api_key,
        "subject": subject,
        "content": content,
        "description": format!("Automated jail report broadcast for {subject}"),
        "public": false,
        "published_at": null,
        "send_at": null,
        "thumbnail_url": "",
        "email_layout_template": "",
    });
    if let Some(secret) = &config.api_secret {
        payload["api_secret"] = serde_json::Value::String(secret.clone());
    }

    log::info!("creating broadcast {subject:?} ({} bytes of content)", content.len());
    let response = client.post(&config.api_url).json(&payload).send().await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        log::error!("broadcast API returned {status}: {body}");
        return Err(BroadcastError::Status { status, body });
    }

    let text = response.text().await?;
    let value: serde_json::Value = serde_json::from_str(&text)?;
    let id = value.pointer("/broadcast/id").and_then(serde_json::Value::as_u64);
    match id {
        Some(id) => log::info!("broadcast created successfully, id {id}"),
        None => log::warn!("broadcast created but the response carried no id: {text}"),
    }

    Ok(id)
}
