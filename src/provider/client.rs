//! HTTP client enforcing the provider stream-list contract

use crate::core::video_id::VideoId;
use crate::error::ProviderError;
use crate::provider::payload::{DirectDownloadPayload, StreamsPayload};
use crate::provider::spec::{ProviderSpec, PLACEHOLDER};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CACHE_CONTROL, PRAGMA};
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Diagnostic body snippets are truncated to this length
const SNIPPET_LIMIT: usize = 140;

/// Default per-request timeout. Providers are tried sequentially, so a single
/// unresponsive host must not make the whole resolution feel hung; worst-case
/// latency is this ceiling times the stack depth.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// HTTP client for provider endpoints.
///
/// Enforces the stream-list contract: the body is read as text before
/// interpretation so non-JSON error pages can still be summarized, non-2xx
/// statuses and unparseable bodies become classified [`ProviderError`]s.
pub struct ProviderClient {
    http: reqwest::Client,
}

impl ProviderClient {
    pub fn new(timeout: Duration) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json, text/plain, */*"));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .gzip(true)
            .brotli(true)
            .build()
            .expect("Failed to build HTTP client");

        Self { http }
    }

    /// Request the provider's stream list for one identifier.
    ///
    /// Returns the parsed payload together with the resolved endpoint for
    /// diagnostics.
    pub async fn request_streams(
        &self,
        provider: &ProviderSpec,
        id: &VideoId,
    ) -> Result<(StreamsPayload, String), ProviderError> {
        let endpoint = build_endpoint(&provider.template, id)?;
        debug!(provider = %provider.label, %endpoint, "requesting stream list");

        let response = self.http.get(&endpoint).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ProviderError::Http {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
                snippet: summarize_text(&body),
            });
        }

        match serde_json::from_str::<StreamsPayload>(&body) {
            Ok(payload) => Ok((payload, endpoint)),
            Err(_) => Err(ProviderError::NonJson {
                snippet: summarize_text(&body),
            }),
        }
    }

    /// Secondary lookup against the local helper's direct-download endpoint,
    /// requesting the best available single-file format.
    pub async fn request_direct_download(
        &self,
        provider: &ProviderSpec,
        id: &VideoId,
    ) -> Result<DirectDownloadPayload, ProviderError> {
        let base = helper_base(&provider.template).ok_or(ProviderError::InvalidTemplate)?;
        let endpoint = format!(
            "{}/api/v1/download/{}?quality=best&format=mp4",
            base,
            urlencoding::encode(id.as_str())
        );
        debug!(provider = %provider.label, %endpoint, "requesting direct download");

        let response = self.http.get(&endpoint).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ProviderError::Http {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
                snippet: summarize_text(&body),
            });
        }

        serde_json::from_str(&body).map_err(|_| ProviderError::NonJson {
            snippet: summarize_text(&body),
        })
    }
}

impl Default for ProviderClient {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

/// Substitute the percent-encoded identifier into the template.
///
/// The registry guarantees the placeholder is present; this re-checks
/// defensively so a hand-built [`ProviderSpec`] cannot produce a bogus
/// request.
pub fn build_endpoint(template: &str, id: &VideoId) -> Result<String, ProviderError> {
    if !template.contains(PLACEHOLDER) {
        return Err(ProviderError::InvalidTemplate);
    }
    Ok(template.replace(PLACEHOLDER, &urlencoding::encode(id.as_str())))
}

/// Base URL of the local helper, recovered from its stream-list template
fn helper_base(template: &str) -> Option<String> {
    if let Some(base) = template.strip_suffix("/api/v1/streams/{videoId}") {
        return Some(base.to_string());
    }
    let probe = template.replace(PLACEHOLDER, "probe");
    Url::parse(&probe).ok().map(|u| u.origin().ascii_serialization())
}

/// Collapse whitespace and truncate to a short diagnostic snippet
pub fn summarize_text(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.len() > SNIPPET_LIMIT {
        let cut: String = collapsed.chars().take(SNIPPET_LIMIT - 3).collect();
        format!("{}...", cut)
    } else {
        collapsed
    }
}
