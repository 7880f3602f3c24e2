//! Guidebook: a tree-navigable viewer for in-game help entries.
//!
//! The [`application::GuidebookController`] owns the guide registry and the
//! navigation tree, displays entries, follows links between them and filters
//! displayed content by a search string. Its collaborators (resource reader,
//! document parser, localization, rules-entry resolver) are traits in
//! [`infrastructure::traits`].

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
