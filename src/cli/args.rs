//! Command line argument parsing

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// YTDown - provider-fallback stream resolver and downloader
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// YouTube video URL, short link, shorts/embed URL, or raw 11-character id
    pub video: String,

    /// One-shot provider template override, e.g.
    /// 'https://my.instance/api/v1/streams/{videoId}'
    #[arg(short, long, value_name = "TEMPLATE")]
    pub provider: Option<String>,

    /// Check the --provider template against the video and exit (diagnostic;
    /// bypasses the built-in provider stack)
    #[arg(long, requires = "provider")]
    pub check_provider: bool,

    /// Print the resolved media URL and exit (no download)
    #[arg(short = 'g', long)]
    pub print_url: bool,

    /// List available streams from the first working provider and exit
    #[arg(short, long)]
    pub list: bool,

    /// Output directory for downloads
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub output: PathBuf,

    /// Overwrite an existing file instead of picking a unique name
    #[arg(long)]
    pub overwrite: bool,

    /// Accept video-only streams with a separate audio track when no
    /// progressive stream is available (requires an external merge step)
    #[arg(long)]
    pub allow_merge: bool,

    /// Per-provider request timeout (e.g. 15s, 20s)
    #[arg(long, value_name = "DURATION", default_value = "15s")]
    pub timeout: humantime::Duration,

    /// Resolved-payload cache TTL; '0s' disables the cache
    #[arg(long, value_name = "DURATION", default_value = "5m")]
    pub cache_ttl: humantime::Duration,

    /// Disable progress output
    #[arg(long)]
    pub no_progress: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Quiet output (only errors)
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Per-provider timeout as a Duration
    pub fn timeout_duration(&self) -> Duration {
        self.timeout.into()
    }

    /// Cache TTL as a Duration; zero means disabled
    pub fn cache_ttl_duration(&self) -> Option<Duration> {
        let ttl: Duration = self.cache_ttl.into();
        if ttl.is_zero() {
            None
        } else {
            Some(ttl)
        }
    }

    /// Get output verbosity level
    pub fn verbosity_level(&self) -> VerbosityLevel {
        if self.quiet {
            VerbosityLevel::Quiet
        } else if self.verbose {
            VerbosityLevel::Verbose
        } else {
            VerbosityLevel::Normal
        }
    }
}

/// Output verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerbosityLevel {
    /// Quiet (only errors)
    Quiet,
    /// Normal
    Normal,
    /// Verbose (debug info)
    Verbose,
}
