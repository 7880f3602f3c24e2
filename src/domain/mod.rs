//! Domain layer: guide entries, the navigation tree and rendered content
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod content;
pub mod entities;
pub mod error;
pub mod tree_traits;

pub use arena::{GuideTree, ItemMetadata, TreeItem};
pub use builder::{derive_roots, sorted_roots, TreeBuilder};
pub use content::{ContentElement, ContentPane, ElementKind, Searchable};
pub use entities::*;
pub use error::DomainError;
pub use tree_traits::TreeNodeConvert;
