//! Media type utilities for deriving download file extensions

/// Derive a file extension from a stream's media type.
///
/// Container hints win over exact matching because providers routinely return
/// full types with codec parameters (`video/mp4; codecs="avc1.64001f"`).
/// Unknown or absent types fall back to `mp4`, the safest container to hand a
/// plain file download.
pub fn guess_extension(mime_type: Option<&str>) -> String {
    let mime_type = match mime_type {
        Some(m) if !m.trim().is_empty() => m.trim(),
        _ => return "mp4".to_string(),
    };

    if mime_type.contains("mp4") {
        return "mp4".to_string();
    }
    if mime_type.contains("webm") {
        return "webm".to_string();
    }

    let essence = mime_type.split(';').next().unwrap_or(mime_type).trim();
    let mut parts = essence.splitn(2, '/');
    let kind = parts.next().unwrap_or("");
    let subtype = match parts.next() {
        Some(s) if !s.is_empty() => s,
        _ => return "mp4".to_string(),
    };

    match (kind, subtype) {
        ("video", "3gpp") => "3gp".to_string(),
        ("video", "quicktime") => "mov".to_string(),
        ("video", "x-flv") => "flv".to_string(),
        ("video", "x-matroska") => "mkv".to_string(),
        ("audio", "mpeg") => "mp3".to_string(),
        ("audio", "ogg") | ("video", "ogg") => "ogg".to_string(),
        _ => subtype.to_string(),
    }
}

/// Check if a media type marks an audio-only stream
pub fn is_audio_mime(mime_type: &str) -> bool {
    mime_type.starts_with("audio/")
}

/// Check if a media type marks a video stream
pub fn is_video_mime(mime_type: &str) -> bool {
    mime_type.starts_with("video/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guess_extension_container_hints() {
        assert_eq!(guess_extension(Some("video/mp4")), "mp4");
        assert_eq!(guess_extension(Some(r#"video/mp4; codecs="avc1""#)), "mp4");
        assert_eq!(guess_extension(Some("audio/mp4")), "mp4");
        assert_eq!(guess_extension(Some("video/webm")), "webm");
        assert_eq!(guess_extension(Some(r#"audio/webm; codecs="opus""#)), "webm");
    }

    #[test]
    fn test_guess_extension_subtypes() {
        assert_eq!(guess_extension(Some("video/3gpp")), "3gp");
        assert_eq!(guess_extension(Some("video/quicktime")), "mov");
        assert_eq!(guess_extension(Some("video/x-matroska")), "mkv");
        assert_eq!(guess_extension(Some("audio/mpeg")), "mp3");
        assert_eq!(guess_extension(Some("audio/ogg")), "ogg");
        assert_eq!(guess_extension(Some("audio/flac")), "flac");
    }

    #[test]
    fn test_guess_extension_fallback() {
        assert_eq!(guess_extension(None), "mp4");
        assert_eq!(guess_extension(Some("")), "mp4");
        assert_eq!(guess_extension(Some("   ")), "mp4");
        assert_eq!(guess_extension(Some("garbage")), "mp4");
    }

    #[test]
    fn test_mime_kind_checks() {
        assert!(is_audio_mime("audio/mp4"));
        assert!(!is_audio_mime("video/mp4"));
        assert!(is_video_mime("video/webm"));
        assert!(!is_video_mime("audio/webm"));
    }
}
