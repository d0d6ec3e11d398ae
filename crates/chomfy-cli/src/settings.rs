//! Persisted CLI settings.
//!
//! Settings live in `settings.toml` in the platform configuration folder
//! (e.g. `~/.config/chomfy/` on Linux) unless `--config` names another file.
//! Every field is optional in the file; missing ones take their defaults.

use std::fs;
use std::path::{Path, PathBuf};

use chomfy_core::{ComposeRequest, DEFAULT_MAX_FILES};
use chomfy_model::{SelectionMode, SourceMode};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::logging::LogFormat;

const APP_QUALIFIER: &str = "org";
const APP_ORG: &str = "chomfy";
const APP_NAME: &str = "chomfy";
const CONFIG_FILENAME: &str = "settings.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub composer: ComposerDefaults,
    pub logging: LoggingDefaults,
}

/// Defaults for `chomfy compose` flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposerDefaults {
    pub mode: SourceMode,
    pub selection_mode: SelectionMode,
    pub directory_glob: String,
    pub max_files: i64,
    pub auto_space: bool,
    pub strip_whitespace: bool,
    pub ignore_blank_lines: bool,
    pub random_seed: i64,
}

impl Default for ComposerDefaults {
    fn default() -> Self {
        let request = ComposeRequest::default();
        Self {
            mode: request.mode,
            selection_mode: request.selection_mode,
            directory_glob: request.directory_glob,
            max_files: DEFAULT_MAX_FILES,
            auto_space: request.auto_space,
            strip_whitespace: request.strip_whitespace,
            ignore_blank_lines: request.ignore_blank_lines,
            random_seed: request.random_seed,
        }
    }
}

impl ComposerDefaults {
    /// A compose request carrying these defaults and no sources.
    pub fn request(&self) -> ComposeRequest {
        ComposeRequest {
            mode: self.mode,
            selection_mode: self.selection_mode,
            auto_space: self.auto_space,
            strip_whitespace: self.strip_whitespace,
            ignore_blank_lines: self.ignore_blank_lines,
            random_seed: self.random_seed,
            directory_glob: self.directory_glob.clone(),
            max_files: self.max_files,
            ..ComposeRequest::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingDefaults {
    pub format: LogFormat,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

/// Where the settings came from.
///
/// Settings are read before the subscriber exists, so the outcome is kept
/// and logged afterwards with [`SettingsLoad::log`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsSource {
    Loaded(PathBuf),
    Missing(PathBuf),
    Invalid { path: PathBuf, message: String },
    NoConfigDir,
}

#[derive(Debug, Clone)]
pub struct SettingsLoad {
    pub settings: Settings,
    pub source: SettingsSource,
}

impl SettingsLoad {
    pub fn log(&self) {
        match &self.source {
            SettingsSource::Loaded(path) => {
                tracing::info!(path = %path.display(), "loaded settings");
            }
            SettingsSource::Missing(path) => {
                tracing::debug!(path = %path.display(), "no settings file, using defaults");
            }
            SettingsSource::Invalid { path, message } => {
                tracing::warn!(path = %path.display(), %message, "invalid settings file, using defaults");
            }
            SettingsSource::NoConfigDir => {
                tracing::warn!("could not determine settings path, using defaults");
            }
        }
    }
}

/// Default location of the settings file.
pub fn settings_path() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

/// Loads settings from `explicit` or the default location.
///
/// Never fails: unreadable or malformed files fall back to defaults.
pub fn load_settings(explicit: Option<&Path>) -> SettingsLoad {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match settings_path() {
            Some(path) => path,
            None => {
                return SettingsLoad {
                    settings: Settings::default(),
                    source: SettingsSource::NoConfigDir,
                };
            }
        },
    };

    let (settings, source) = match fs::read_to_string(&path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => (settings, SettingsSource::Loaded(path)),
            Err(e) => (
                Settings::default(),
                SettingsSource::Invalid {
                    path,
                    message: e.to_string(),
                },
            ),
        },
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            (Settings::default(), SettingsSource::Missing(path))
        }
        Err(e) => (
            Settings::default(),
            SettingsSource::Invalid {
                path,
                message: e.to_string(),
            },
        ),
    };
    SettingsLoad { settings, source }
}

/// Writes `settings` to `path`, creating the parent directory if needed.
pub fn save_settings(settings: &Settings, path: &Path) -> anyhow::Result<()> {
    use anyhow::Context;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let content = toml::to_string_pretty(settings).context("failed to serialize settings")?;
    fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), "saved settings");
    Ok(())
}
