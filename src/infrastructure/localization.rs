//! Localization catalog read from `.ftl` files.
//!
//! Only single-line `key = value` messages are understood; that is all guide
//! entry names use.

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::infrastructure::traits::{FileSystem, Localization};
use crate::infrastructure::{InfraError, InfraResult};

#[derive(Debug, Clone, Default)]
pub struct LocaleCatalog {
    messages: HashMap<String, String>,
}

impl LocaleCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every `*.ftl` file below `dir`. A missing directory yields an empty catalog.
    pub fn load_dir(fs: &dyn FileSystem, dir: &Path) -> InfraResult<Self> {
        let mut catalog = Self::new();
        if !fs.is_dir(dir) {
            debug!("no locale directory at {}", dir.display());
            return Ok(catalog);
        }

        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                InfraError::io(
                    format!("walk {}", dir.display()),
                    e.into_io_error()
                        .unwrap_or_else(|| std::io::Error::other("walkdir loop")),
                )
            })?;
            let path = entry.path();
            if !entry.file_type().is_file() || path.extension().map_or(true, |ext| ext != "ftl") {
                continue;
            }
            let content = fs
                .read_to_string(path)
                .map_err(|e| InfraError::io(format!("read {}", path.display()), e))?;
            catalog.extend_from_str(&content);
        }

        debug!("loaded {} localized strings", catalog.len());
        Ok(catalog)
    }

    /// Add messages from `.ftl` text. Later keys override earlier ones.
    pub fn extend_from_str(&mut self, content: &str) {
        for line in content.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            match trimmed.split_once('=') {
                Some((key, value)) if !key.trim().is_empty() => {
                    self.insert(key.trim(), value.trim());
                }
                _ => warn!("ignoring malformed locale line: {}", trimmed),
            }
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.messages.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Localization for LocaleCatalog {
    fn get_string(&self, key: &str) -> String {
        self.messages
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::traits::RealFileSystem;
    use tempfile::TempDir;

    #[test]
    fn given_ftl_text_when_resolving_then_known_keys_translate() {
        let mut catalog = LocaleCatalog::new();
        catalog.extend_from_str(
            "# guide names\nguide-entry-power = Power\n\nguide-entry-atmos = Atmospherics\n",
        );
        assert_eq!(catalog.get_string("guide-entry-power"), "Power");
        assert_eq!(catalog.get_string("guide-entry-atmos"), "Atmospherics");
        assert_eq!(catalog.get_string("guide-entry-missing"), "guide-entry-missing");
    }

    #[test]
    fn given_locale_dir_when_loading_then_reads_nested_ftl_files_only() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("en-US/guidebook");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(nested.join("guides.ftl"), "guide-entry-power = Power\n").unwrap();
        std::fs::write(nested.join("notes.txt"), "guide-entry-ignored = Nope\n").unwrap();

        let catalog = LocaleCatalog::load_dir(&RealFileSystem, temp.path()).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get_string("guide-entry-power"), "Power");
    }

    #[test]
    fn given_missing_dir_when_loading_then_empty_catalog() {
        let catalog =
            LocaleCatalog::load_dir(&RealFileSystem, Path::new("/nonexistent/locale")).unwrap();
        assert!(catalog.is_empty());
    }
}
