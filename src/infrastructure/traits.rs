//! Boundary traits for the guidebook's collaborators
//!
//! These traits abstract the capabilities the controller consumes, allowing
//! it to be tested with mock implementations.

use std::io;
use std::path::{Path, PathBuf};

use crate::domain::{ContentPane, EntryId};

/// Filesystem abstraction for testability.
pub trait FileSystem: Send + Sync {
    /// Read file contents to string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Check if path is a file.
    fn is_file(&self, path: &Path) -> bool;

    /// Check if path is a directory.
    fn is_dir(&self, path: &Path) -> bool;
}

/// Opens entry bodies by their logical resource path.
pub trait ResourceReader: Send + Sync {
    /// Read the whole text of a resource. Fails if the path is absent.
    fn open_text(&self, path: &str) -> io::Result<String>;
}

/// Renders stored document text into a content pane.
pub trait DocumentParser: Send + Sync {
    /// Append rendered elements of `text` to `pane`.
    ///
    /// On failure the parser renders its own error block into `pane` and
    /// returns `false`.
    fn try_add_markup(&self, pane: &mut ContentPane, text: &str) -> bool;
}

/// Resolves display strings from localization keys.
pub trait Localization: Send + Sync {
    /// Unknown keys resolve to the key itself.
    fn get_string(&self, key: &str) -> String;
}

/// Names the single entry that represents the game's rules.
pub trait RulesEntryResolver: Send + Sync {
    fn core_rule_entry(&self) -> EntryId;
}

/// Item for FZF-style selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionItem {
    /// Display text shown in selector
    pub display: String,
    /// Actual value (entry id)
    pub value: String,
}

/// Interactive FZF-style selector abstraction.
pub trait Selector: Send + Sync {
    /// Present items to user and return selected one.
    /// Returns None if user cancels (Esc/Ctrl-C).
    fn select_one(
        &self,
        items: &[SelectionItem],
        prompt: &str,
    ) -> Result<Option<SelectionItem>, String>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real filesystem implementation.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }
}

/// Resource reader rooted at the content directory.
///
/// Resource paths are always relative to the root; a leading `/` is the
/// root itself, as in `/Guides/Power.txt`.
pub struct ContentResourceReader {
    root: PathBuf,
    fs: std::sync::Arc<dyn FileSystem>,
}

impl ContentResourceReader {
    pub fn new(root: impl Into<PathBuf>, fs: std::sync::Arc<dyn FileSystem>) -> Self {
        Self {
            root: root.into(),
            fs,
        }
    }

    pub fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path.trim_start_matches('/'))
    }
}

impl ResourceReader for ContentResourceReader {
    fn open_text(&self, path: &str) -> io::Result<String> {
        let full = self.resolve(path);
        if !self.fs.is_file(&full) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("resource not found: {}", full.display()),
            ));
        }
        self.fs.read_to_string(&full)
    }
}

/// Rules resolver returning a fixed, configured entry id.
#[derive(Debug, Clone)]
pub struct ConfiguredRulesResolver {
    entry: EntryId,
}

impl ConfiguredRulesResolver {
    pub fn new(entry: impl Into<EntryId>) -> Self {
        Self {
            entry: entry.into(),
        }
    }
}

impl RulesEntryResolver for ConfiguredRulesResolver {
    fn core_rule_entry(&self) -> EntryId {
        self.entry.clone()
    }
}

/// Real selector implementation using skim (FZF-like).
#[derive(Debug, Default)]
pub struct SkimSelector;

impl Selector for SkimSelector {
    fn select_one(
        &self,
        items: &[SelectionItem],
        prompt: &str,
    ) -> Result<Option<SelectionItem>, String> {
        use skim::prelude::*;
        use std::io::Cursor;

        if items.is_empty() {
            return Ok(None);
        }

        // Build input as newline-separated display strings
        let input = items
            .iter()
            .map(|i| i.display.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        let options = SkimOptionsBuilder::default()
            .prompt(Some(prompt))
            .height(Some("50%"))
            .multi(false)
            .build()
            .map_err(|e| format!("failed to build skim options: {e}"))?;

        let item_reader = SkimItemReader::default();
        let items_arc = item_reader.of_bufread(Cursor::new(input));

        match Skim::run_with(&options, Some(items_arc)) {
            Some(out) if out.is_abort => Ok(None),
            Some(out) => Ok(out.selected_items.first().and_then(|selected| {
                let display = selected.output().to_string();
                items.iter().find(|i| i.display == display).cloned()
            })),
            None => Ok(None),
        }
    }
}
