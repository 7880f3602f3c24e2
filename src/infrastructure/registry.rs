//! Loads guide entry definitions from TOML files.

use std::path::Path;

use tracing::{debug, instrument};
use walkdir::WalkDir;

use crate::domain::{DomainError, GuideDefinitionFile, GuideRegistry};
use crate::infrastructure::traits::FileSystem;
use crate::infrastructure::{InfraError, InfraResult};

/// Read every `*.toml` file below `dir` into one registry.
///
/// Files are visited in name order. An id defined twice is an error, as is
/// an entry without id or text.
#[instrument(level = "debug", skip(fs))]
pub fn load_registry(fs: &dyn FileSystem, dir: &Path) -> InfraResult<GuideRegistry> {
    if !fs.is_dir(dir) {
        return Err(InfraError::io(
            format!("guides directory {}", dir.display()),
            std::io::Error::new(std::io::ErrorKind::NotFound, "not a directory"),
        ));
    }

    let mut registry = GuideRegistry::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            InfraError::io(
                format!("walk {}", dir.display()),
                e.into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("walkdir loop")),
            )
        })?;
        let path = entry.path();
        if !entry.file_type().is_file() || path.extension().map_or(true, |ext| ext != "toml") {
            continue;
        }

        let content = fs
            .read_to_string(path)
            .map_err(|e| InfraError::io(format!("read {}", path.display()), e))?;
        let file: GuideDefinitionFile = toml::from_str(&content).map_err(|e| InfraError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        for guide in file.guides {
            if guide.id.as_str().trim().is_empty() {
                return Err(DomainError::InvalidEntry {
                    path: path.to_path_buf(),
                    message: "empty id".to_string(),
                }
                .into());
            }
            if guide.text.trim().is_empty() {
                return Err(DomainError::InvalidEntry {
                    path: path.to_path_buf(),
                    message: format!("entry {} has no text", guide.id),
                }
                .into());
            }
            if registry.contains_key(&guide.id) {
                return Err(DomainError::DuplicateEntry {
                    id: guide.id,
                    path: path.to_path_buf(),
                }
                .into());
            }
            registry.insert(guide.id.clone(), guide);
        }
    }

    debug!("loaded {} guide entries", registry.len());
    Ok(registry)
}
