//! # ytdown - Provider-Fallback Stream Resolver
//!
//! Resolves a direct media URL for a YouTube video by querying a prioritized
//! stack of interchangeable stream providers, ranking the playable streams
//! the first working provider returns, and handing the winner to a download
//! trigger.
//!
//! ## Features
//!
//! - Identifier extraction from watch/short/shorts/embed URLs or raw ids
//! - Ordered provider stack with one-shot and persisted overrides
//! - Strictly sequential, short-circuiting provider fallback with a full
//!   per-provider failure trail
//! - Quality-then-bitrate stream ranking
//! - Local-helper direct-download fallback
//! - TTL-cached payloads
//!
//! ## Example
//!
//! ```rust,no_run
//! use ytdown::{extract_video_id, StreamResolver};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let id = extract_video_id("https://youtu.be/dQw4w9WgXcQ")
//!         .ok_or("invalid video reference")?;
//!
//!     let resolver = StreamResolver::new();
//!     let stream = resolver.fetch_best_stream(&id, None).await?;
//!     println!("{} -> {}", stream.quality, stream.download_url);
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod core;
pub mod download;
pub mod error;
pub mod provider;
pub mod utils;

// Re-export main types
pub use core::{
    extract_video_id, quality_score, ProviderCheck, ResolvedStream, ResolverConfig,
    StreamCandidate, StreamKind, StreamListing, StreamResolver, VideoId,
};
pub use download::{
    DownloadHandle, DownloadOptions, DownloadOutcome, DownloadTrigger, HttpDownloadTrigger,
    Packager, TriggerRequest,
};
pub use error::YtdError;
pub use provider::{
    build_provider_stack, default_providers, normalize_provider_template, FileSettings,
    ProviderClient, ProviderSettings, ProviderSpec,
};

/// Result type alias for ytdown operations
pub type Result<T> = std::result::Result<T, YtdError>;
