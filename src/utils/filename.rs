//! Safe filename generation utilities

use regex::Regex;
use std::path::Path;

/// Sanitize a video title into a filesystem-safe base name.
///
/// Path-hostile characters become spaces, runs of whitespace collapse to one
/// space. An empty result falls back to a generated, timestamped name so the
/// caller always gets something usable.
pub fn sanitize_title(title: &str) -> String {
    let hostile = Regex::new(r#"[<>:"/\\|?*]+"#).unwrap();
    let replaced = hostile.replace_all(title, " ");

    let whitespace = Regex::new(r"\s+").unwrap();
    let cleaned = whitespace.replace_all(&replaced, " ").trim().to_string();

    if cleaned.is_empty() {
        format!("youtube-video-{}", chrono::Utc::now().timestamp_millis())
    } else {
        cleaned
    }
}

/// Generate a unique filename by appending a counter if the file already exists
pub fn generate_unique_filename(base_path: &Path, filename: &str) -> std::io::Result<String> {
    let mut counter = 1;
    let mut final_filename = filename.to_string();

    while base_path.join(&final_filename).exists() {
        let path = Path::new(filename);
        let stem = path.file_stem().unwrap_or_default();
        let extension = path
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();

        final_filename = format!("{} ({}){}", stem.to_string_lossy(), counter, extension);
        counter += 1;

        if counter > 10000 {
            return Err(std::io::Error::new(
                std::io::ErrorKind::AlreadyExists,
                "Too many files with similar names",
            ));
        }
    }

    Ok(final_filename)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_title() {
        assert_eq!(sanitize_title("My: Video/Name"), "My Video Name");
        assert_eq!(sanitize_title("Plain title"), "Plain title");
        assert_eq!(sanitize_title("  padded   spaces  "), "padded spaces");
        assert_eq!(sanitize_title(r#"a<b>c:d"e/f\g|h?i*j"#), "a b c d e f g h i j");
    }

    #[test]
    fn test_sanitize_title_fallback() {
        let generated = sanitize_title("");
        assert!(generated.starts_with("youtube-video-"));
        assert!(generated.len() > "youtube-video-".len());

        let generated = sanitize_title("<>:*?");
        assert!(generated.starts_with("youtube-video-"));
    }

    #[test]
    fn test_generate_unique_filename() {
        let temp_dir = tempfile::tempdir().unwrap();

        let first = generate_unique_filename(temp_dir.path(), "clip.mp4").unwrap();
        assert_eq!(first, "clip.mp4");

        std::fs::write(temp_dir.path().join("clip.mp4"), b"x").unwrap();
        let second = generate_unique_filename(temp_dir.path(), "clip.mp4").unwrap();
        assert_eq!(second, "clip (1).mp4");

        std::fs::write(temp_dir.path().join("clip (1).mp4"), b"x").unwrap();
        let third = generate_unique_filename(temp_dir.path(), "clip.mp4").unwrap();
        assert_eq!(third, "clip (2).mp4");
    }
}
