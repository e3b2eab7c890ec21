//! Error types for ytdown

use thiserror::Error;

/// Main error type for ytdown operations
#[derive(Debug, Error)]
pub enum YtdError {
    #[error("Not a valid YouTube link or video id")]
    InvalidReference,

    #[error("Provider template does not contain {{videoId}}")]
    InvalidTemplate,

    #[error("All providers failed. Details: {0}")]
    AllProvidersFailed(String),

    #[error("No stream providers available")]
    NoProvidersAvailable,

    #[error("Download trigger failed: {0}")]
    DownloadTriggerFailed(String),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("URL parsing error: {0}")]
    UrlError(#[from] url::ParseError),
}

impl YtdError {
    /// Check if the error carries a per-provider diagnostic trail
    pub fn has_provider_trail(&self) -> bool {
        matches!(self, YtdError::AllProvidersFailed(_))
    }

    /// Check if the error was produced before any network call
    pub fn is_input_error(&self) -> bool {
        matches!(self, YtdError::InvalidReference | YtdError::InvalidTemplate)
    }
}

/// Failure of a single provider during resolution.
///
/// Recorded by the resolver as a diagnostic string and never surfaced on its
/// own; only exhaustion of the whole stack becomes a caller-visible
/// [`YtdError::AllProvidersFailed`].
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Template does not contain {{videoId}}")]
    InvalidTemplate,

    #[error("HTTP {status} {reason}{}", fmt_snippet(.snippet))]
    Http {
        status: u16,
        reason: String,
        snippet: String,
    },

    #[error("Response is not JSON{}", fmt_snippet(.snippet))]
    NonJson { snippet: String },

    #[error("Stream with audio unavailable from provider")]
    NoEligibleStreams,

    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
}

fn fmt_snippet(snippet: &str) -> String {
    if snippet.is_empty() {
        String::new()
    } else {
        format!(" - {}", snippet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_display() {
        let err = ProviderError::Http {
            status: 404,
            reason: "Not Found".to_string(),
            snippet: "video unavailable".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 404 Not Found - video unavailable");

        let err = ProviderError::Http {
            status: 502,
            reason: "Bad Gateway".to_string(),
            snippet: String::new(),
        };
        assert_eq!(err.to_string(), "HTTP 502 Bad Gateway");

        let err = ProviderError::NonJson {
            snippet: "<html>".to_string(),
        };
        assert_eq!(err.to_string(), "Response is not JSON - <html>");
    }

    #[test]
    fn test_ytd_error_classification() {
        assert!(YtdError::InvalidReference.is_input_error());
        assert!(YtdError::InvalidTemplate.is_input_error());
        assert!(!YtdError::NoProvidersAvailable.is_input_error());

        assert!(YtdError::AllProvidersFailed("a: b".to_string()).has_provider_trail());
        assert!(!YtdError::NoProvidersAvailable.has_provider_trail());
    }
}
