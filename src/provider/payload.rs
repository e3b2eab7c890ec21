//! Wire payload shapes for the provider HTTP contracts

use crate::core::stream::{StreamCandidate, StreamKind};
use crate::utils::mime::is_audio_mime;
use serde::{Deserialize, Deserializer};

/// Stream-list payload returned by every provider
/// (`GET <template-with-identifier-substituted>`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StreamsPayload {
    pub title: Option<String>,
    pub video_streams: Vec<RawStream>,
    pub audio_streams: Vec<RawStream>,
}

impl StreamsPayload {
    /// Convert the wire shape into domain candidates: video entries first in
    /// payload order, then audio-only entries.
    pub fn candidates(&self) -> Vec<StreamCandidate> {
        let video = self.video_streams.iter().map(RawStream::to_candidate);
        let audio = self.audio_streams.iter().map(|raw| StreamCandidate {
            kind: StreamKind::AudioOnly,
            ..raw.to_candidate()
        });
        video.chain(audio).collect()
    }
}

/// One stream entry as providers serialize it. Field variance across
/// providers is absorbed here: `quality` or `format` may carry the label,
/// `bitrate` may arrive as a number or a numeric string, and the local helper
/// attaches `audioUrl` to video-only entries.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawStream {
    pub url: Option<String>,
    pub quality: Option<String>,
    pub format: Option<String>,
    pub mime_type: Option<String>,
    #[serde(deserialize_with = "lenient_u64")]
    pub bitrate: Option<u64>,
    pub video_only: bool,
    pub audio_url: Option<String>,
}

impl RawStream {
    pub fn to_candidate(&self) -> StreamCandidate {
        StreamCandidate {
            url: self.url.clone().unwrap_or_default(),
            quality: self
                .quality
                .clone()
                .or_else(|| self.format.clone())
                .unwrap_or_else(|| "unknown".to_string()),
            mime_type: self.mime_type.clone(),
            bitrate: self.bitrate,
            kind: self.kind(),
        }
    }

    fn kind(&self) -> StreamKind {
        if self.video_only {
            StreamKind::VideoOnly {
                merge_audio: self.audio_url.clone(),
            }
        } else if self.mime_type.as_deref().map(is_audio_mime).unwrap_or(false) {
            StreamKind::AudioOnly
        } else {
            StreamKind::Progressive
        }
    }
}

/// Local-helper direct-download fallback payload
/// (`GET <helper-base>/api/v1/download/<id>?quality=best&format=mp4`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DirectDownloadPayload {
    pub success: bool,
    pub download_url: Option<String>,
    pub title: Option<String>,
    pub quality: Option<String>,
}

/// Accept a bitrate serialized as a number, a numeric string, or null
fn lenient_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(coerce_u64))
}

fn coerce_u64(value: &serde_json::Value) -> Option<u64> {
    match value {
        serde_json::Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        serde_json::Value::String(s) => {
            let s = s.trim();
            s.parse::<u64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| *f >= 0.0).map(|f| f as u64))
        }
        _ => None,
    }
}
