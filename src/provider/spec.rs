//! Provider templates and stack construction

/// Placeholder token substituted with the percent-encoded video identifier
pub const PLACEHOLDER: &str = "{videoId}";

/// One candidate stream provider: a display label plus an endpoint template
/// containing the [`PLACEHOLDER`] token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSpec {
    pub label: String,
    pub template: String,
}

impl ProviderSpec {
    pub fn new(label: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            template: template.into(),
        }
    }

    /// Check if this provider is the first-party local helper, which exposes
    /// the direct-download fallback endpoint.
    pub fn is_local_helper(&self) -> bool {
        self.template.contains("localhost") || self.template.contains("127.0.0.1")
    }
}

/// Built-in default providers, in priority order. The local helper comes
/// first so a running backend always wins over public instances.
pub fn default_providers() -> Vec<ProviderSpec> {
    vec![
        ProviderSpec::new(
            "localhost (yt-dlp)",
            "http://localhost:3500/api/v1/streams/{videoId}",
        ),
        ProviderSpec::new("piped.video", "https://piped.video/api/v1/streams/{videoId}"),
        ProviderSpec::new(
            "pipedapi.kavin.rocks",
            "https://pipedapi.kavin.rocks/api/v1/streams/{videoId}",
        ),
        ProviderSpec::new(
            "piped.projectsegfau.lt",
            "https://piped.projectsegfau.lt/api/v1/streams/{videoId}",
        ),
        ProviderSpec::new(
            "piped.syncpundit.io",
            "https://piped.syncpundit.io/api/v1/streams/{videoId}",
        ),
    ]
}

/// Validate and normalize a raw provider template.
///
/// A non-empty trimmed string containing the placeholder is returned
/// unchanged. With `allow_legacy`, a template missing the placeholder is
/// treated as a legacy base URL: trailing slashes are stripped and the
/// placeholder is appended as a new path segment. Anything else is rejected.
pub fn normalize_provider_template(raw: &str, allow_legacy: bool) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if trimmed.contains(PLACEHOLDER) {
        return Some(trimmed.to_string());
    }

    if allow_legacy {
        let sanitized = trimmed.trim_end_matches('/');
        return Some(format!("{}/{}", sanitized, PLACEHOLDER));
    }

    None
}

/// Build the ordered provider stack for one resolution call.
///
/// Precedence: the call-scoped override (strict normalization), then the
/// persisted override (legacy-tolerant), then the built-in candidates.
/// Duplicate templates are dropped, first occurrence wins.
pub fn build_provider_stack(
    builtins: &[ProviderSpec],
    override_template: Option<&str>,
    stored_template: Option<&str>,
) -> Vec<ProviderSpec> {
    let mut stack: Vec<ProviderSpec> = Vec::new();

    if let Some(normalized) = override_template.and_then(|t| normalize_provider_template(t, false)) {
        stack.push(ProviderSpec::new("custom (one-shot)", normalized));
    }

    if let Some(normalized) = stored_template.and_then(|t| normalize_provider_template(t, true)) {
        if !stack.iter().any(|p| p.template == normalized) {
            stack.push(ProviderSpec::new("custom", normalized));
        }
    }

    for candidate in builtins {
        if !stack.iter().any(|p| p.template == candidate.template) {
            stack.push(candidate.clone());
        }
    }

    stack
}
