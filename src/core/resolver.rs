//! Provider-fallback stream resolution engine

use crate::core::stream::{
    is_manifest_url, ProviderCheck, ResolvedStream, StreamCandidate, StreamListing,
};
use crate::core::video_id::VideoId;
use crate::error::{ProviderError, YtdError};
use crate::provider::client::{ProviderClient, DEFAULT_TIMEOUT};
use crate::provider::payload::StreamsPayload;
use crate::provider::settings::{NoSettings, ProviderSettings};
use crate::provider::spec::{
    build_provider_stack, default_providers, normalize_provider_template, ProviderSpec,
};
use crate::utils::cache::{new_async_cache, AsyncCache};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Separator joining the per-provider failure trail
const FAILURE_SEPARATOR: &str = " | ";

/// Default TTL for the resolved-payload cache, matching the local helper's
const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

/// Resolver tuning knobs
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Per-provider request timeout. Providers are tried one at a time, so
    /// worst-case resolution latency is this times the stack depth.
    pub timeout: Duration,
    /// Payload cache TTL; `None` disables caching entirely
    pub cache_ttl: Option<Duration>,
    /// Accept video-only streams with a provider-attached audio URL when no
    /// progressive stream exists (the file then needs an external merge)
    pub allow_merge: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            cache_ttl: Some(DEFAULT_CACHE_TTL),
            allow_merge: false,
        }
    }
}

/// Payload cached from a previously successful resolution
#[derive(Clone)]
struct CachedStreams {
    payload: StreamsPayload,
    provider_label: String,
}

/// The provider-fallback stream resolver.
///
/// For each provider in the configured stack, in order: request its stream
/// list, filter out non-downloadable entries, rank what remains, and either
/// return the winner or record the failure and advance. The search is
/// strictly sequential and short-circuits on the first success, so stack
/// order is preference order and at most one request per resolution is in
/// flight at any time. Each call is fully isolated; dropping the returned
/// future aborts the in-flight request.
pub struct StreamResolver {
    config: ResolverConfig,
    client: ProviderClient,
    builtins: Vec<ProviderSpec>,
    settings: Arc<dyn ProviderSettings>,
    cache: Option<AsyncCache<String, CachedStreams>>,
}

impl StreamResolver {
    /// Create a resolver with default configuration and the built-in
    /// provider candidates
    pub fn new() -> Self {
        Self::with_config(ResolverConfig::default())
    }

    pub fn with_config(config: ResolverConfig) -> Self {
        let client = ProviderClient::new(config.timeout);
        let cache = config.cache_ttl.map(new_async_cache);
        Self {
            config,
            client,
            builtins: default_providers(),
            settings: Arc::new(NoSettings),
            cache,
        }
    }

    /// Use a settings store for the persisted provider override
    pub fn with_settings(mut self, settings: impl ProviderSettings + 'static) -> Self {
        self.settings = Arc::new(settings);
        self
    }

    /// Replace the built-in provider candidates
    pub fn with_builtins(mut self, builtins: Vec<ProviderSpec>) -> Self {
        self.builtins = builtins;
        self
    }

    /// Set the per-provider request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self.client = ProviderClient::new(timeout);
        self
    }

    /// Accept merge-required streams as a secondary alternative
    pub fn with_allow_merge(mut self, allow_merge: bool) -> Self {
        self.config.allow_merge = allow_merge;
        self
    }

    /// Resolve the single best download candidate for an identifier.
    ///
    /// `override_template` puts a call-scoped custom provider at the top of
    /// the stack; it also bypasses the payload cache, since a cached payload
    /// may come from a different provider than the one being forced.
    pub async fn fetch_best_stream(
        &self,
        id: &VideoId,
        override_template: Option<&str>,
    ) -> Result<ResolvedStream, YtdError> {
        if override_template.is_none() {
            if let Some(hit) = self.cache_lookup(id).await {
                if let Some(resolved) = self.select_from_payload(&hit.payload, &hit.provider_label) {
                    debug!(id = %id, provider = %hit.provider_label, "resolved from cache");
                    return Ok(resolved);
                }
            }
        }

        let stored = self.settings.stored_template();
        let stack = build_provider_stack(&self.builtins, override_template, stored.as_deref());
        self.resolve_with_stack(id, &stack, override_template.is_none())
            .await
    }

    /// Diagnostic resolution against exactly one candidate template.
    ///
    /// The built-in stack is bypassed on purpose: a check that silently fell
    /// back to other providers could not say anything about the template
    /// under test.
    pub async fn check_provider(
        &self,
        id: &VideoId,
        template: &str,
    ) -> Result<ProviderCheck, YtdError> {
        let normalized =
            normalize_provider_template(template, false).ok_or(YtdError::InvalidTemplate)?;
        let stack = vec![ProviderSpec::new("custom (one-shot)", normalized)];
        let resolved = self.resolve_with_stack(id, &stack, false).await?;
        Ok(ProviderCheck {
            provider: resolved.provider,
            quality: resolved.quality,
        })
    }

    /// Full ranked candidate list from the first provider that returns any
    /// downloadable stream
    pub async fn list_streams(
        &self,
        id: &VideoId,
        override_template: Option<&str>,
    ) -> Result<StreamListing, YtdError> {
        if override_template.is_none() {
            if let Some(hit) = self.cache_lookup(id).await {
                if let Some(listing) = listing_from_payload(&hit.payload, &hit.provider_label) {
                    return Ok(listing);
                }
            }
        }

        let stored = self.settings.stored_template();
        let stack = build_provider_stack(&self.builtins, override_template, stored.as_deref());

        let mut failures: Vec<String> = Vec::new();
        for provider in &stack {
            match self.client.request_streams(provider, id).await {
                Ok((payload, _endpoint)) => {
                    if let Some(listing) = listing_from_payload(&payload, &provider.label) {
                        if override_template.is_none() {
                            self.cache_store(id, &payload, &provider.label).await;
                        }
                        return Ok(listing);
                    }
                    failures.push(format!("{}: {}", provider.label, ProviderError::NoEligibleStreams));
                }
                Err(error) => {
                    warn!(provider = %provider.label, %error, "provider failed");
                    failures.push(format!("{}: {}", provider.label, error));
                }
            }
        }

        exhausted(failures)
    }

    /// One pass over a provider stack: strict sequential order, short-circuit
    /// on the first success, every failure recorded.
    async fn resolve_with_stack(
        &self,
        id: &VideoId,
        stack: &[ProviderSpec],
        populate_cache: bool,
    ) -> Result<ResolvedStream, YtdError> {
        let mut failures: Vec<String> = Vec::new();

        for provider in stack {
            match self.attempt_provider(provider, id).await {
                Ok((resolved, payload)) => {
                    if populate_cache {
                        if let Some(payload) = payload {
                            self.cache_store(id, &payload, &provider.label).await;
                        }
                    }
                    info!(
                        provider = %provider.label,
                        quality = %resolved.quality,
                        "stream resolved"
                    );
                    return Ok(resolved);
                }
                Err(error) => {
                    warn!(provider = %provider.label, %error, "provider failed");
                    failures.push(format!("{}: {}", provider.label, error));
                }
            }
        }

        exhausted(failures)
    }

    /// Query one provider and select its best stream.
    ///
    /// Selection order: direct progressive streams first; for the local
    /// helper, the direct-download endpoint as a second chance at a complete
    /// file; merge-required video-only streams last, and only when enabled.
    async fn attempt_provider(
        &self,
        provider: &ProviderSpec,
        id: &VideoId,
    ) -> Result<(ResolvedStream, Option<StreamsPayload>), ProviderError> {
        let (payload, _endpoint) = self.client.request_streams(provider, id).await?;
        let candidates = payload.candidates();

        if let Some(best) = best_by_rank(candidates.iter().filter(|c| c.is_progressive_candidate()))
        {
            let resolved = resolved_from(best, payload.title.clone(), &provider.label);
            return Ok((resolved, Some(payload)));
        }

        if provider.is_local_helper() {
            debug!(provider = %provider.label, "no progressive streams, trying direct download endpoint");
            if let Some(resolved) = self.try_direct_download(provider, id).await {
                return Ok((resolved, None));
            }
        }

        if self.config.allow_merge {
            if let Some(best) = best_by_rank(candidates.iter().filter(|c| c.is_merge_candidate())) {
                let resolved = resolved_from(best, payload.title.clone(), &provider.label);
                return Ok((resolved, Some(payload)));
            }
        }

        Err(ProviderError::NoEligibleStreams)
    }

    /// Secondary direct-download lookup; any failure here just means the
    /// provider gets no second chance.
    async fn try_direct_download(
        &self,
        provider: &ProviderSpec,
        id: &VideoId,
    ) -> Option<ResolvedStream> {
        match self.client.request_direct_download(provider, id).await {
            Ok(direct) if direct.success => {
                let url = direct
                    .download_url
                    .filter(|u| !u.is_empty() && !is_manifest_url(u))?;
                Some(ResolvedStream {
                    download_url: url,
                    title: direct.title,
                    quality: direct.quality.unwrap_or_else(|| "unknown".to_string()),
                    mime_type: Some("video/mp4".to_string()),
                    provider: provider.label.clone(),
                    merge_audio_url: None,
                })
            }
            Ok(_) => None,
            Err(error) => {
                debug!(provider = %provider.label, %error, "direct download attempt failed");
                None
            }
        }
    }

    /// Re-run selection on a cached payload; a miss here falls through to
    /// the provider loop transparently.
    fn select_from_payload(&self, payload: &StreamsPayload, label: &str) -> Option<ResolvedStream> {
        let candidates = payload.candidates();
        if let Some(best) = best_by_rank(candidates.iter().filter(|c| c.is_progressive_candidate()))
        {
            return Some(resolved_from(best, payload.title.clone(), label));
        }
        if self.config.allow_merge {
            if let Some(best) = best_by_rank(candidates.iter().filter(|c| c.is_merge_candidate())) {
                return Some(resolved_from(best, payload.title.clone(), label));
            }
        }
        None
    }

    async fn cache_lookup(&self, id: &VideoId) -> Option<CachedStreams> {
        match &self.cache {
            Some(cache) => cache.get(id.as_str()).await,
            None => None,
        }
    }

    async fn cache_store(&self, id: &VideoId, payload: &StreamsPayload, label: &str) {
        if let Some(cache) = &self.cache {
            cache
                .insert(
                    id.as_str().to_string(),
                    CachedStreams {
                        payload: payload.clone(),
                        provider_label: label.to_string(),
                    },
                )
                .await;
        }
    }
}

impl Default for StreamResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Terminal outcome after the stack is exhausted
fn exhausted<T>(failures: Vec<String>) -> Result<T, YtdError> {
    if failures.is_empty() {
        Err(YtdError::NoProvidersAvailable)
    } else {
        Err(YtdError::AllProvidersFailed(failures.join(FAILURE_SEPARATOR)))
    }
}

/// Highest-ranked candidate; the earliest entry wins ties, preserving
/// provider payload order.
fn best_by_rank<'a>(
    candidates: impl Iterator<Item = &'a StreamCandidate>,
) -> Option<&'a StreamCandidate> {
    candidates.fold(None, |best, candidate| match best {
        Some(current) if candidate.rank_key() <= current.rank_key() => Some(current),
        _ => Some(candidate),
    })
}

fn resolved_from(
    candidate: &StreamCandidate,
    title: Option<String>,
    provider_label: &str,
) -> ResolvedStream {
    ResolvedStream {
        download_url: candidate.url.clone(),
        title,
        quality: candidate.quality.clone(),
        mime_type: candidate.mime_type.clone(),
        provider: provider_label.to_string(),
        merge_audio_url: candidate.merge_audio_url().map(str::to_string),
    }
}

/// Ranked listing of every downloadable candidate in a payload
fn listing_from_payload(payload: &StreamsPayload, label: &str) -> Option<StreamListing> {
    let mut streams: Vec<StreamCandidate> = payload
        .candidates()
        .into_iter()
        .filter(|c| c.is_downloadable())
        .collect();
    if streams.is_empty() {
        return None;
    }
    streams.sort_by(|a, b| b.rank_key().cmp(&a.rank_key()));
    Some(StreamListing {
        provider: label.to_string(),
        title: payload.title.clone(),
        streams,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_id() -> VideoId {
        VideoId::new("abc12345678").unwrap()
    }

    fn streams_template(server: &mockito::Server) -> String {
        format!("{}/api/v1/streams/{{videoId}}", server.url())
    }

    fn resolver_for(builtins: Vec<ProviderSpec>) -> StreamResolver {
        StreamResolver::with_config(ResolverConfig {
            cache_ttl: None,
            ..ResolverConfig::default()
        })
        .with_builtins(builtins)
    }

    const PROGRESSIVE_BODY: &str = r#"{
        "title": "Example Video",
        "videoStreams": [
            {"url": "https://cdn/v480", "quality": "480p 30fps", "mimeType": "video/mp4", "bitrate": 400000},
            {"url": "https://cdn/v1080", "quality": "1080p 60fps", "mimeType": "video/mp4", "bitrate": 2000000},
            {"url": "https://cdn/v720", "quality": "720p 60fps", "mimeType": "video/mp4", "bitrate": 900000}
        ]
    }"#;

    #[tokio::test]
    async fn test_empty_stack_fails_without_network() {
        let resolver = resolver_for(vec![]);
        let error = resolver.fetch_best_stream(&test_id(), None).await.unwrap_err();
        assert!(matches!(error, YtdError::NoProvidersAvailable));
    }

    #[tokio::test]
    async fn test_best_stream_ranking() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/v1/streams/abc12345678")
            .with_status(200)
            .with_body(PROGRESSIVE_BODY)
            .create_async()
            .await;

        let resolver = resolver_for(vec![ProviderSpec::new("test", streams_template(&server))]);
        let resolved = resolver.fetch_best_stream(&test_id(), None).await.unwrap();

        assert_eq!(resolved.download_url, "https://cdn/v1080");
        assert_eq!(resolved.quality, "1080p 60fps");
        assert_eq!(resolved.title.as_deref(), Some("Example Video"));
        assert_eq!(resolved.provider, "test");
        assert!(!resolved.merge_required());
    }

    #[tokio::test]
    async fn test_sequential_short_circuit() {
        let mut server = mockito::Server::new_async().await;
        let first = server
            .mock("GET", "/a/streams/abc12345678")
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;
        let second = server
            .mock("GET", "/b/streams/abc12345678")
            .with_status(200)
            .with_body(PROGRESSIVE_BODY)
            .create_async()
            .await;
        let third = server
            .mock("GET", "/c/streams/abc12345678")
            .expect(0)
            .create_async()
            .await;

        let base = server.url();
        let resolver = resolver_for(vec![
            ProviderSpec::new("one", format!("{}/a/streams/{{videoId}}", base)),
            ProviderSpec::new("two", format!("{}/b/streams/{{videoId}}", base)),
            ProviderSpec::new("three", format!("{}/c/streams/{{videoId}}", base)),
        ]);

        let resolved = resolver.fetch_best_stream(&test_id(), None).await.unwrap();
        assert_eq!(resolved.provider, "two");

        first.assert_async().await;
        second.assert_async().await;
        third.assert_async().await;
    }

    #[tokio::test]
    async fn test_error_aggregation_in_stack_order() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/a/streams/abc12345678")
            .with_status(404)
            .with_body("not found here")
            .create_async()
            .await;
        server
            .mock("GET", "/b/streams/abc12345678")
            .with_status(200)
            .with_body("<html>broken</html>")
            .create_async()
            .await;
        server
            .mock("GET", "/c/streams/abc12345678")
            .with_status(200)
            .with_body(r#"{"title": "t", "videoStreams": []}"#)
            .create_async()
            .await;

        let base = server.url();
        let resolver = resolver_for(vec![
            ProviderSpec::new("one", format!("{}/a/streams/{{videoId}}", base)),
            ProviderSpec::new("two", format!("{}/b/streams/{{videoId}}", base)),
            ProviderSpec::new("three", format!("{}/c/streams/{{videoId}}", base)),
        ]);

        let error = resolver.fetch_best_stream(&test_id(), None).await.unwrap_err();
        let message = error.to_string();

        assert!(message.contains("one: HTTP 404"));
        assert!(message.contains("not found here"));
        assert!(message.contains("two: Response is not JSON"));
        assert!(message.contains("three: Stream with audio unavailable from provider"));

        let one = message.find("one:").unwrap();
        let two = message.find("two:").unwrap();
        let three = message.find("three:").unwrap();
        assert!(one < two && two < three);
    }

    #[tokio::test]
    async fn test_video_only_streams_are_not_progressive() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/x/abc12345678")
            .with_status(200)
            .with_body(
                r#"{"title": "t", "videoStreams": [
                    {"url": "https://cdn/v", "quality": "1080p 30fps", "videoOnly": true}
                ]}"#,
            )
            .create_async()
            .await;

        // mockito binds to 127.0.0.1, so the direct-download second chance is
        // attempted; the unmatched download path 501s and is swallowed,
        // leaving the no-eligible-streams failure.
        let resolver = resolver_for(vec![ProviderSpec::new(
            "pub",
            format!("{}/x/{{videoId}}", server.url()),
        )]);

        let error = resolver.fetch_best_stream(&test_id(), None).await.unwrap_err();
        assert!(error
            .to_string()
            .contains("pub: Stream with audio unavailable from provider"));
    }

    #[tokio::test]
    async fn test_manifest_urls_rejected() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/x/abc12345678")
            .with_status(200)
            .with_body(
                r#"{"title": "t", "videoStreams": [
                    {"url": "https://cdn/master.m3u8", "quality": "1080p 30fps"},
                    {"url": "https://cdn/api/manifest/dash", "quality": "720p 30fps"},
                    {"url": "https://cdn/plain", "quality": "360p 30fps"}
                ]}"#,
            )
            .create_async()
            .await;

        let resolver = resolver_for(vec![ProviderSpec::new(
            "pub",
            format!("{}/x/{{videoId}}", server.url()),
        )]);

        let resolved = resolver.fetch_best_stream(&test_id(), None).await.unwrap();
        assert_eq!(resolved.download_url, "https://cdn/plain");
    }

    #[tokio::test]
    async fn test_direct_download_fallback_for_local_helper() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/v1/streams/abc12345678")
            .with_status(200)
            .with_body(r#"{"title": "t", "videoStreams": [{"url": "https://cdn/only.m3u8", "quality": "720p"}]}"#)
            .create_async()
            .await;
        let direct = server
            .mock("GET", "/api/v1/download/abc12345678?quality=best&format=mp4")
            .with_status(200)
            .with_body(r#"{"success": true, "downloadUrl": "https://cdn/direct.mp4", "title": "Direct Title", "quality": "720p"}"#)
            .create_async()
            .await;

        // mockito binds to 127.0.0.1, which the resolver recognizes as the
        // local helper
        let resolver = resolver_for(vec![ProviderSpec::new("helper", streams_template(&server))]);
        let resolved = resolver.fetch_best_stream(&test_id(), None).await.unwrap();

        direct.assert_async().await;
        assert_eq!(resolved.download_url, "https://cdn/direct.mp4");
        assert_eq!(resolved.title.as_deref(), Some("Direct Title"));
        assert_eq!(resolved.mime_type.as_deref(), Some("video/mp4"));
    }

    #[tokio::test]
    async fn test_direct_download_rejects_manifest_and_failure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/v1/streams/abc12345678")
            .with_status(200)
            .with_body(r#"{"title": "t", "videoStreams": []}"#)
            .create_async()
            .await;
        server
            .mock("GET", "/api/v1/download/abc12345678?quality=best&format=mp4")
            .with_status(200)
            .with_body(r#"{"success": true, "downloadUrl": "https://cdn/live.m3u8"}"#)
            .create_async()
            .await;

        let resolver = resolver_for(vec![ProviderSpec::new("helper", streams_template(&server))]);
        let error = resolver.fetch_best_stream(&test_id(), None).await.unwrap_err();
        assert!(error
            .to_string()
            .contains("helper: Stream with audio unavailable from provider"));
    }

    #[tokio::test]
    async fn test_merge_alternative_when_enabled() {
        let mut server = mockito::Server::new_async().await;
        let body = r#"{"title": "t", "videoStreams": [
            {"url": "https://cdn/v1080", "quality": "1080p 30fps", "videoOnly": true, "audioUrl": "https://cdn/a"},
            {"url": "https://cdn/v720", "quality": "720p 30fps", "videoOnly": true, "audioUrl": "https://cdn/a"}
        ]}"#;
        server
            .mock("GET", "/api/v1/streams/abc12345678")
            .with_status(200)
            .with_body(body)
            .create_async()
            .await;
        // Direct-download second chance declines
        server
            .mock("GET", "/api/v1/download/abc12345678?quality=best&format=mp4")
            .with_status(200)
            .with_body(r#"{"success": false}"#)
            .create_async()
            .await;

        let resolver = resolver_for(vec![ProviderSpec::new("helper", streams_template(&server))])
            .with_allow_merge(true);

        let resolved = resolver.fetch_best_stream(&test_id(), None).await.unwrap();
        assert_eq!(resolved.download_url, "https://cdn/v1080");
        assert!(resolved.merge_required());
        assert_eq!(resolved.merge_audio_url.as_deref(), Some("https://cdn/a"));
    }

    #[tokio::test]
    async fn test_override_template_takes_precedence() {
        let mut server = mockito::Server::new_async().await;
        let override_mock = server
            .mock("GET", "/override/abc12345678")
            .with_status(200)
            .with_body(PROGRESSIVE_BODY)
            .create_async()
            .await;
        let builtin_mock = server
            .mock("GET", "/builtin/abc12345678")
            .expect(0)
            .create_async()
            .await;

        let base = server.url();
        let resolver = resolver_for(vec![ProviderSpec::new(
            "builtin",
            format!("{}/builtin/{{videoId}}", base),
        )]);

        let override_template = format!("{}/override/{{videoId}}", base);
        let resolved = resolver
            .fetch_best_stream(&test_id(), Some(override_template.as_str()))
            .await
            .unwrap();

        override_mock.assert_async().await;
        builtin_mock.assert_async().await;
        assert_eq!(resolved.provider, "custom (one-shot)");
    }

    #[tokio::test]
    async fn test_check_provider_single_template() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/only/abc12345678")
            .with_status(200)
            .with_body(PROGRESSIVE_BODY)
            .create_async()
            .await;
        let builtin_mock = server
            .mock("GET", "/builtin/abc12345678")
            .expect(0)
            .create_async()
            .await;

        let base = server.url();
        let resolver = resolver_for(vec![ProviderSpec::new(
            "builtin",
            format!("{}/builtin/{{videoId}}", base),
        )]);

        let check = resolver
            .check_provider(&test_id(), &format!("{}/only/{{videoId}}", base))
            .await
            .unwrap();
        assert_eq!(check.provider, "custom (one-shot)");
        assert_eq!(check.quality, "1080p 60fps");
        builtin_mock.assert_async().await;

        // Template without the placeholder is rejected before any request
        let error = resolver
            .check_provider(&test_id(), "https://no.placeholder.example")
            .await
            .unwrap_err();
        assert!(matches!(error, YtdError::InvalidTemplate));
    }

    #[tokio::test]
    async fn test_payload_cache_hit_skips_network() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v1/streams/abc12345678")
            .with_status(200)
            .with_body(PROGRESSIVE_BODY)
            .expect(1)
            .create_async()
            .await;

        let resolver = StreamResolver::with_config(ResolverConfig::default())
            .with_builtins(vec![ProviderSpec::new("test", streams_template(&server))]);

        let first = resolver.fetch_best_stream(&test_id(), None).await.unwrap();
        let second = resolver.fetch_best_stream(&test_id(), None).await.unwrap();

        mock.assert_async().await;
        assert_eq!(first.download_url, second.download_url);
        assert_eq!(second.provider, "test");
    }

    #[tokio::test]
    async fn test_list_streams_ranked() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/v1/streams/abc12345678")
            .with_status(200)
            .with_body(
                r#"{"title": "t", "videoStreams": [
                    {"url": "https://cdn/v720", "quality": "720p 30fps"},
                    {"url": "https://cdn/v1080", "quality": "1080p 60fps", "videoOnly": true},
                    {"url": "https://cdn/bad.m3u8", "quality": "2160p 60fps"}
                ], "audioStreams": [
                    {"url": "https://cdn/a", "quality": "128kbps", "mimeType": "audio/mp4"}
                ]}"#,
            )
            .create_async()
            .await;

        let resolver = resolver_for(vec![ProviderSpec::new("test", streams_template(&server))]);
        let listing = resolver.list_streams(&test_id(), None).await.unwrap();

        assert_eq!(listing.provider, "test");
        assert_eq!(listing.streams.len(), 3);
        assert_eq!(listing.streams[0].quality, "1080p 60fps");
        assert_eq!(listing.streams[1].quality, "720p 30fps");
        assert!(listing.streams[2].kind.is_audio_only());
    }
}
