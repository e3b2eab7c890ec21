//! Download trigger boundary: "begin download of URL with suggested filename"

use crate::utils::filename::generate_unique_filename;
use async_trait::async_trait;
use futures_util::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

/// Request handed to a download trigger
#[derive(Debug, Clone)]
pub struct TriggerRequest {
    /// Resolved media URL
    pub url: String,
    /// Suggested filename, already sanitized and extension-bearing
    pub filename: String,
    /// Let the user pick the final location. Interpreted by the trigger;
    /// the file-saving implementation maps it to collision-safe naming.
    pub prompt_for_location: bool,
}

/// Opaque handle identifying a started download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadHandle(pub String);

/// Failure of the download mechanism itself, after resolution succeeded
#[derive(Debug, Error)]
pub enum TriggerError {
    #[error("invalid download URL: {0}")]
    InvalidUrl(String),

    #[error("download request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("could not write file: {0}")]
    Io(#[from] std::io::Error),
}

/// A mechanism that can begin downloading a URL under a suggested filename.
///
/// The resolution core never depends on a concrete implementation; anything
/// that can take `{url, filename, prompt_for_location}` and return an opaque
/// handle qualifies.
#[async_trait]
pub trait DownloadTrigger: Send + Sync {
    async fn begin(&self, request: TriggerRequest) -> Result<DownloadHandle, TriggerError>;
}

/// HTTP file-saving trigger: streams the URL into the output directory.
///
/// With `prompt_for_location` set, an existing file is never overwritten; a
/// `name (1).ext` style variant is chosen instead.
pub struct HttpDownloadTrigger {
    http: reqwest::Client,
    output_dir: PathBuf,
    show_progress: bool,
}

impl HttpDownloadTrigger {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(20))
            .build()
            .expect("Failed to build HTTP client");
        Self {
            http,
            output_dir: output_dir.into(),
            show_progress: true,
        }
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    fn progress_bar(&self, total: Option<u64>) -> Option<ProgressBar> {
        if !self.show_progress {
            return None;
        }
        let bar = match total {
            Some(len) => {
                let bar = ProgressBar::new(len);
                bar.set_style(
                    ProgressStyle::default_bar()
                        .template("{spinner:.green} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
                        .unwrap()
                        .progress_chars("#>-"),
                );
                bar
            }
            None => ProgressBar::new_spinner(),
        };
        Some(bar)
    }
}

#[async_trait]
impl DownloadTrigger for HttpDownloadTrigger {
    async fn begin(&self, request: TriggerRequest) -> Result<DownloadHandle, TriggerError> {
        let url = reqwest::Url::parse(&request.url)
            .map_err(|_| TriggerError::InvalidUrl(request.url.clone()))?;

        tokio::fs::create_dir_all(&self.output_dir).await?;

        let filename = if request.prompt_for_location {
            generate_unique_filename(&self.output_dir, &request.filename)?
        } else {
            request.filename.clone()
        };
        let target = self.output_dir.join(&filename);

        debug!(url = %url, target = %target.display(), "starting download");

        let response = self.http.get(url).send().await?.error_for_status()?;
        let total = response.content_length();
        let bar = self.progress_bar(total);

        // Write to a temp name first so an interrupted transfer never leaves
        // a plausible-looking final file behind.
        let tmp_path = self.output_dir.join(format!("{}.part", filename));
        let mut file = File::create(&tmp_path).await?;

        let mut stream = response.bytes_stream();
        let mut written: u64 = 0;
        while let Some(chunk) = stream.next().await {
            let chunk = match chunk {
                Ok(chunk) => chunk,
                Err(error) => {
                    let _ = tokio::fs::remove_file(&tmp_path).await;
                    return Err(error.into());
                }
            };
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
            if let Some(bar) = &bar {
                bar.set_position(written);
            }
        }
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp_path, &target).await?;
        if let Some(bar) = &bar {
            bar.finish_and_clear();
        }

        info!(target = %target.display(), bytes = written, "download complete");
        Ok(DownloadHandle(target.display().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_saves_file() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/file.mp4")
            .with_status(200)
            .with_body(b"media bytes".to_vec())
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let trigger = HttpDownloadTrigger::new(dir.path()).with_progress(false);

        let handle = trigger
            .begin(TriggerRequest {
                url: format!("{}/file.mp4", server.url()),
                filename: "Example (720p).mp4".to_string(),
                prompt_for_location: true,
            })
            .await
            .unwrap();

        let saved = dir.path().join("Example (720p).mp4");
        assert_eq!(handle, DownloadHandle(saved.display().to_string()));
        assert_eq!(std::fs::read(&saved).unwrap(), b"media bytes");
        assert!(!dir.path().join("Example (720p).mp4.part").exists());
    }

    #[tokio::test]
    async fn test_prompt_for_location_avoids_collisions() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/file.mp4")
            .with_status(200)
            .with_body(b"new".to_vec())
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("clip.mp4"), b"old").unwrap();

        let trigger = HttpDownloadTrigger::new(dir.path()).with_progress(false);
        trigger
            .begin(TriggerRequest {
                url: format!("{}/file.mp4", server.url()),
                filename: "clip.mp4".to_string(),
                prompt_for_location: true,
            })
            .await
            .unwrap();

        assert_eq!(std::fs::read(dir.path().join("clip.mp4")).unwrap(), b"old");
        assert_eq!(std::fs::read(dir.path().join("clip (1).mp4")).unwrap(), b"new");
    }

    #[tokio::test]
    async fn test_invalid_url_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let trigger = HttpDownloadTrigger::new(dir.path()).with_progress(false);

        let error = trigger
            .begin(TriggerRequest {
                url: "not a url".to_string(),
                filename: "x.mp4".to_string(),
                prompt_for_location: false,
            })
            .await
            .unwrap_err();
        assert!(matches!(error, TriggerError::InvalidUrl(_)));
    }

    #[tokio::test]
    async fn test_http_failure_propagates() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/gone.mp4")
            .with_status(404)
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let trigger = HttpDownloadTrigger::new(dir.path()).with_progress(false);

        let error = trigger
            .begin(TriggerRequest {
                url: format!("{}/gone.mp4", server.url()),
                filename: "x.mp4".to_string(),
                prompt_for_location: false,
            })
            .await
            .unwrap_err();
        assert!(matches!(error, TriggerError::Request(_)));
    }
}
