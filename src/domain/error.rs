//! Domain-level errors (no external dependencies)

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::EntryId;

/// Domain errors represent invalid guide content.
/// The controller itself never raises them; they surface while loading definitions.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("unknown guide entry: {0}")]
    UnknownEntry(EntryId),

    #[error("duplicate guide entry {id} in {path}")]
    DuplicateEntry { id: EntryId, path: PathBuf },

    #[error("invalid guide entry definition in {path}: {message}")]
    InvalidEntry { path: PathBuf, message: String },
}
