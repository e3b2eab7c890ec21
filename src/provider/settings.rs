//! Persisted provider override, read-only to the resolution path

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Read access to the externally-owned persisted provider override.
///
/// Reads must never fail outward: a missing store or malformed value means
/// "no override" and resolution proceeds with the built-in stack.
pub trait ProviderSettings: Send + Sync {
    /// The raw persisted template override, if any
    fn stored_template(&self) -> Option<String>;
}

/// No persisted settings at all
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSettings;

impl ProviderSettings for NoSettings {
    fn stored_template(&self) -> Option<String> {
        None
    }
}

/// On-disk settings shape
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsFile {
    #[serde(default)]
    pub stream_provider_template: Option<String>,
}

/// JSON-file-backed settings store.
///
/// The file is owned by whoever configures the user's provider preference;
/// this side only ever reads it.
#[derive(Debug, Clone)]
pub struct FileSettings {
    path: Option<PathBuf>,
}

impl FileSettings {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Settings file in the user config directory
    /// (`<config>/ytdown/settings.json`)
    pub fn from_default_location() -> Self {
        Self {
            path: default_settings_path(),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl ProviderSettings for FileSettings {
    fn stored_template(&self) -> Option<String> {
        let path = self.path.as_ref()?;
        let text = std::fs::read_to_string(path).ok()?;
        match serde_json::from_str::<SettingsFile>(&text) {
            Ok(settings) => settings.stream_provider_template,
            Err(error) => {
                warn!(path = %path.display(), %error, "ignoring malformed settings file");
                None
            }
        }
    }
}

fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("ytdown").join("settings.json"))
}
