//! Output formatting for the CLI

use crate::cli::args::VerbosityLevel;
use crate::core::stream::{StreamCandidate, StreamListing};
use crate::download::package::DownloadOutcome;
use colored::Colorize;

/// Verbosity-aware terminal output
pub struct OutputFormatter {
    verbosity: VerbosityLevel,
}

impl OutputFormatter {
    pub fn new(verbosity: VerbosityLevel) -> Self {
        Self { verbosity }
    }

    pub fn info(&self, message: &str) {
        if self.verbosity != VerbosityLevel::Quiet {
            println!("{}", message);
        }
    }

    pub fn success(&self, message: &str) {
        if self.verbosity != VerbosityLevel::Quiet {
            println!("{} {}", "✓".green().bold(), message);
        }
    }

    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red().bold(), message);
    }

    /// Print a resolution failure; the per-provider trail gets one line per
    /// provider so long stacks stay readable.
    pub fn print_failure_trail(&self, message: &str) {
        if let Some((head, trail)) = message.split_once("Details: ") {
            self.error(head.trim_end());
            for entry in trail.split(" | ") {
                eprintln!("    {} {}", "-".red(), entry);
            }
        } else {
            self.error(message);
        }
    }

    pub fn print_download_outcome(&self, outcome: &DownloadOutcome) {
        self.success(&format!(
            "Downloaded {} [{}] via {}",
            outcome.filename.bold(),
            outcome.quality,
            outcome.provider.cyan()
        ));
        if let Some(audio_url) = &outcome.merge_audio_url {
            self.info(&format!(
                "{} this stream is video-only; download the audio track and merge \
                 the two files with an external tool (e.g. ffmpeg):\n    {}",
                "note:".yellow().bold(),
                audio_url
            ));
        }
    }

    pub fn print_stream_listing(&self, listing: &StreamListing) {
        let title = listing.title.as_deref().unwrap_or("(untitled)");
        self.info(&format!(
            "{} via {}",
            title.bold(),
            listing.provider.cyan()
        ));
        for stream in &listing.streams {
            self.info(&format!("  {}", format_stream_row(stream)));
        }
    }

    pub fn is_verbose(&self) -> bool {
        self.verbosity == VerbosityLevel::Verbose
    }
}

fn format_stream_row(stream: &StreamCandidate) -> String {
    let kind = if stream.kind.is_audio_only() {
        "audio only".yellow().to_string()
    } else if stream.kind.is_video_only() {
        "video only".yellow().to_string()
    } else {
        "video+audio".green().to_string()
    };

    let mime = stream.mime_type.as_deref().unwrap_or("-");
    let bitrate = stream
        .bitrate
        .map(|b| format!("{} kbps", b / 1000))
        .unwrap_or_else(|| "-".to_string());

    format!("{:<14} {:<12} {:<24} {}", stream.quality, kind, mime, bitrate)
}
