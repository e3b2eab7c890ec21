//! Result packaging: turn a resolved stream into a named download

use crate::core::resolver::StreamResolver;
use crate::core::stream::ResolvedStream;
use crate::core::video_id::{extract_video_id, VideoId};
use crate::download::trigger::{DownloadHandle, DownloadTrigger, TriggerRequest};
use crate::error::YtdError;
use crate::utils::filename::sanitize_title;
use crate::utils::mime::guess_extension;
use std::sync::Arc;
use tracing::info;

/// Options for one download request
#[derive(Debug, Clone)]
pub struct DownloadOptions {
    /// Ask the trigger to let the user pick the save location
    pub prompt_for_location: bool,
    /// Call-scoped provider template override
    pub override_template: Option<String>,
}

impl Default for DownloadOptions {
    fn default() -> Self {
        Self {
            prompt_for_location: true,
            override_template: None,
        }
    }
}

/// User-facing outcome of a completed download request
#[derive(Debug, Clone)]
pub struct DownloadOutcome {
    pub download_id: DownloadHandle,
    pub filename: String,
    pub quality: String,
    pub provider: String,
    /// Companion audio URL the user must download and merge externally,
    /// present only for merge-required wins
    pub merge_audio_url: Option<String>,
}

/// Glue between the resolver and the download trigger
pub struct Packager {
    resolver: StreamResolver,
    trigger: Arc<dyn DownloadTrigger>,
}

impl Packager {
    pub fn new(resolver: StreamResolver, trigger: Arc<dyn DownloadTrigger>) -> Self {
        Self { resolver, trigger }
    }

    /// Resolve a raw video reference and begin downloading its best stream.
    ///
    /// Invalid references fail before any network call is made.
    pub async fn handle_download_request(
        &self,
        raw_input: &str,
        options: &DownloadOptions,
    ) -> Result<DownloadOutcome, YtdError> {
        let id = extract_video_id(raw_input).ok_or(YtdError::InvalidReference)?;

        let resolved = self
            .resolver
            .fetch_best_stream(&id, options.override_template.as_deref())
            .await?;

        let filename = compose_filename(&resolved, &id);
        info!(%filename, provider = %resolved.provider, "packaging download");

        let handle = self
            .trigger
            .begin(TriggerRequest {
                url: resolved.download_url.clone(),
                filename: filename.clone(),
                prompt_for_location: options.prompt_for_location,
            })
            .await
            .map_err(|error| YtdError::DownloadTriggerFailed(error.to_string()))?;

        Ok(DownloadOutcome {
            download_id: handle,
            filename,
            quality: resolved.quality,
            provider: resolved.provider,
            merge_audio_url: resolved.merge_audio_url,
        })
    }

    pub fn resolver(&self) -> &StreamResolver {
        &self.resolver
    }
}

/// Compose the suggested filename: `"<safe-title> (<quality-or-'video'>).<ext>"`,
/// dropping the extension segment when none can be derived.
pub fn compose_filename(resolved: &ResolvedStream, id: &VideoId) -> String {
    let title = resolved
        .title
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| id.as_str());
    let safe_title = sanitize_title(title);

    let quality = if resolved.quality.is_empty() {
        "video"
    } else {
        &resolved.quality
    };

    let extension = guess_extension(resolved.mime_type.as_deref());
    if extension.is_empty() {
        format!("{} ({})", safe_title, quality)
    } else {
        format!("{} ({}).{}", safe_title, quality, extension)
    }
}
