//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/guidebook/guidebook.toml`
//! 3. Local config: `<content_dir>/.guidebook.toml`
//! 4. Environment variables: `GUIDEBOOK_*` prefix
//!
//! A content directory given on the command line locates the local config and
//! wins over every layer.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::{ApplicationError, IoResultExt};

/// Id of the rules entry when nothing else is configured.
pub const DEFAULT_RULES_ENTRY: &str = "DefaultRuleset";

/// Unified configuration for guidebook.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Root that resource paths of entry bodies resolve against
    pub content_dir: PathBuf,
    /// Guide definition files, relative to `content_dir` unless absolute
    pub guides_dir: PathBuf,
    /// `.ftl` locale files, relative to `content_dir` unless absolute
    pub locale_dir: PathBuf,
    /// The one rules entry that gets a slot in the tree
    pub core_rules_entry: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("."),
            guides_dir: PathBuf::from("guides"),
            locale_dir: PathBuf::from("locale"),
            core_rules_entry: DEFAULT_RULES_ENTRY.to_string(),
        }
    }
}

/// Raw settings for intermediate parsing (`None` = not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub content_dir: Option<PathBuf>,
    pub guides_dir: Option<PathBuf>,
    pub locale_dir: Option<PathBuf>,
    pub core_rules_entry: Option<String>,
}

/// Get the XDG config directory for guidebook.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "guidebook").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("guidebook.toml"))
}

/// Get the path to the local config file in a content directory.
pub fn local_config_path(content_dir: &Path) -> PathBuf {
    content_dir.join(".guidebook.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).with_path_context("read config", path)?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

/// Expand `~`, `$VAR` and `${VAR}` in a path.
fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    shellexpand::full(raw.as_ref())
        .map(|s| PathBuf::from(s.into_owned()))
        .unwrap_or_else(|_| path.to_path_buf())
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

impl Settings {
    /// Directory holding guide definition files.
    pub fn guides_path(&self) -> PathBuf {
        self.content_dir.join(&self.guides_dir)
    }

    /// Directory holding locale files.
    pub fn locale_path(&self) -> PathBuf {
        self.content_dir.join(&self.locale_dir)
    }

    fn expand_paths(&mut self) {
        self.content_dir = expand_path(&self.content_dir);
        self.guides_dir = expand_path(&self.guides_dir);
        self.locale_dir = expand_path(&self.locale_dir);
    }

    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            content_dir: overlay
                .content_dir
                .clone()
                .unwrap_or_else(|| self.content_dir.clone()),
            guides_dir: overlay
                .guides_dir
                .clone()
                .unwrap_or_else(|| self.guides_dir.clone()),
            locale_dir: overlay
                .locale_dir
                .clone()
                .unwrap_or_else(|| self.locale_dir.clone()),
            core_rules_entry: overlay
                .core_rules_entry
                .clone()
                .unwrap_or_else(|| self.core_rules_entry.clone()),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `content_dir` - Content directory from the command line, if any
    pub fn load(content_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(dir) = content_dir {
            current.content_dir = dir.to_path_buf();
        }
        let local_path = local_config_path(&expand_path(&current.content_dir));
        if local_path.exists() {
            current = current.merge_with(&load_raw_settings(&local_path)?);
        }

        current = Self::apply_env_overrides(current)?;

        // The command line beats every file and variable
        if let Some(dir) = content_dir {
            current.content_dir = dir.to_path_buf();
        }

        current.expand_paths();
        Ok(current)
    }

    /// Apply GUIDEBOOK_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("GUIDEBOOK").separator("__"))
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("content_dir") {
            settings.content_dir = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("guides_dir") {
            settings.guides_dir = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("locale_dir") {
            settings.locale_dir = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("core_rules_entry") {
            settings.core_rules_entry = val;
        }

        Ok(settings)
    }

    /// Render the effective settings as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize settings: {}", e),
        })
    }
}
