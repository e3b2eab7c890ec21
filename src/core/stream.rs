//! Stream candidate model, quality scoring, and ranking

use regex::Regex;
use serde::Serialize;

/// How a candidate's tracks are delivered
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamKind {
    /// Single URL carrying both video and audio
    Progressive,
    /// Video track only; `merge_audio` is a provider-attached companion audio
    /// URL that an external tool can merge in
    VideoOnly { merge_audio: Option<String> },
    /// Audio track only
    AudioOnly,
}

impl StreamKind {
    /// Check if a single downloaded file is complete (no external merge)
    pub fn is_progressive(&self) -> bool {
        matches!(self, StreamKind::Progressive)
    }

    pub fn is_video_only(&self) -> bool {
        matches!(self, StreamKind::VideoOnly { .. })
    }

    pub fn is_audio_only(&self) -> bool {
        matches!(self, StreamKind::AudioOnly)
    }

    /// Check if selecting this kind requires an external merge step
    pub fn merge_required(&self) -> bool {
        self.is_video_only()
    }
}

/// One playable rendition returned by a provider.
///
/// Ephemeral - exists only for the duration of one resolution call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamCandidate {
    /// Direct media URL
    pub url: String,
    /// Quality label, e.g. "720p 30fps"
    pub quality: String,
    /// Media type, when the provider reports one
    pub mime_type: Option<String>,
    /// Encoding bitrate, when the provider reports one
    pub bitrate: Option<u64>,
    /// Track delivery kind
    pub kind: StreamKind,
}

impl StreamCandidate {
    /// Check if the candidate points at a plain downloadable file:
    /// a non-empty URL that is not a segmented adaptive manifest.
    pub fn is_downloadable(&self) -> bool {
        !self.url.is_empty() && !is_manifest_url(&self.url)
    }

    /// Eligible for the primary direct-progressive search
    pub fn is_progressive_candidate(&self) -> bool {
        self.kind.is_progressive() && self.is_downloadable()
    }

    /// Eligible for the secondary merge-required search: video-only with a
    /// usable companion audio URL attached by the provider.
    pub fn is_merge_candidate(&self) -> bool {
        match &self.kind {
            StreamKind::VideoOnly {
                merge_audio: Some(audio),
            } => self.is_downloadable() && !audio.is_empty() && !is_manifest_url(audio),
            _ => false,
        }
    }

    /// Companion audio URL, when the candidate carries one
    pub fn merge_audio_url(&self) -> Option<&str> {
        match &self.kind {
            StreamKind::VideoOnly { merge_audio } => merge_audio.as_deref(),
            _ => None,
        }
    }

    /// Composite ranking key for best-stream selection
    pub fn rank_key(&self) -> RankKey {
        RankKey {
            score: quality_score(&self.quality),
            bitrate: self.bitrate.unwrap_or(0),
            direct: !self.kind.merge_required(),
        }
    }
}

/// Ranking key, compared field by field: quality score first, bitrate as the
/// tie-break, and direct delivery preferred over merge-required last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RankKey {
    pub score: u32,
    pub bitrate: u64,
    pub direct: bool,
}

/// Derive a numeric quality score from a label.
///
/// The first 3-4 digit run is the resolution number, scaled by 10; a
/// two-digit frame-rate suffix adds on top, so "720p 60fps" scores 7260.
/// Labels with no parseable resolution (e.g. "audio only") score 0 and sort
/// last.
pub fn quality_score(label: &str) -> u32 {
    let resolution = Regex::new(r"(\d{3,4})").unwrap();
    let frame_rate = Regex::new(r"(?i)(\d{2})fps").unwrap();

    let base: u32 = resolution
        .captures(label)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0);
    let fps: u32 = frame_rate
        .captures(label)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0);

    base * 10 + fps
}

/// Check if a URL references a segmented adaptive-manifest format, which
/// cannot be handed to a plain file download.
pub fn is_manifest_url(url: &str) -> bool {
    url.contains(".m3u8") || url.contains("manifest")
}

/// The final resolution output: the single best download candidate.
///
/// Built once per successful resolution and immediately consumed by the
/// packager.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedStream {
    /// Direct media URL to download
    pub download_url: String,
    /// Video title reported by the provider
    pub title: Option<String>,
    /// Winning quality label
    pub quality: String,
    /// Media type of the winning stream
    pub mime_type: Option<String>,
    /// Display label of the provider that produced the stream
    pub provider: String,
    /// Companion audio URL when the winning stream is video-only and must be
    /// merged externally
    pub merge_audio_url: Option<String>,
}

impl ResolvedStream {
    /// Check if completing this download requires an external merge step
    pub fn merge_required(&self) -> bool {
        self.merge_audio_url.is_some()
    }
}

/// Full ranked candidate list from the first working provider
#[derive(Debug, Clone)]
pub struct StreamListing {
    pub provider: String,
    pub title: Option<String>,
    pub streams: Vec<StreamCandidate>,
}

/// Outcome of a diagnostic single-template resolution
#[derive(Debug, Clone, Serialize)]
pub struct ProviderCheck {
    pub provider: String,
    pub quality: String,
}
