//! Canonical video identifier extraction from user input

use std::fmt;
use url::Url;

/// Length of a canonical video identifier
const ID_LEN: usize = 11;

/// Base used to resolve relative inputs like `/watch?v=...`
const URL_BASE: &str = "https://www.youtube.com";

/// An 11-character canonical video identifier.
///
/// Construction validates the exact-length, exact-alphabet invariant
/// (`[A-Za-z0-9_-]{11}`); a `VideoId` in hand is always safe to substitute
/// into a provider template.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VideoId(String);

impl VideoId {
    /// Validate a raw string as a video identifier
    pub fn new(raw: &str) -> Option<Self> {
        if raw.len() == ID_LEN && raw.chars().all(is_id_char) {
            Some(Self(raw.to_string()))
        } else {
            None
        }
    }

    /// The identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_id_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// Extract a canonical video identifier from arbitrary user input.
///
/// Accepts a raw 11-character id, a full watch URL, a `youtu.be` short link,
/// a shorts URL, or an embed URL; relative inputs resolve against the
/// canonical site base. Returns `None` on any parse failure or unmatched
/// shape, never panics. Callers must treat `None` as an invalid reference and
/// fail before making any network call.
pub fn extract_video_id(input: &str) -> Option<VideoId> {
    let trimmed = input.trim();

    if let Some(id) = VideoId::new(trimmed) {
        return Some(id);
    }

    let base = Url::parse(URL_BASE).ok()?;
    let url = Url::options().base_url(Some(&base)).parse(trimmed).ok()?;

    if let Some((_, value)) = url.query_pairs().find(|(key, _)| key == "v") {
        return sanitize_video_id(&value);
    }

    if url.host_str() == Some("youtu.be") {
        let first = url.path().trim_start_matches('/').split('/').next()?;
        return sanitize_video_id(first);
    }

    if let Some(rest) = url.path().strip_prefix("/shorts/") {
        return sanitize_video_id(rest.split('/').next()?);
    }

    if let Some(rest) = url.path().strip_prefix("/embed/") {
        return sanitize_video_id(rest.split('/').next()?);
    }

    None
}

/// Strip everything outside the identifier alphabet, then require exactly 11
/// characters to remain.
fn sanitize_video_id(candidate: &str) -> Option<VideoId> {
    let clean: String = candidate.chars().filter(|c| is_id_char(*c)).collect();
    VideoId::new(&clean)
}
