//! Minimal guide document format.
//!
//! ```text
//! <Document>
//! # Power
//! Generators feed the grid. See [substations](guide:Substations).
//!
//! Cables carry power between machines.
//! </Document>
//! ```
//!
//! A line starting with `#` is a heading on its own. Blank lines separate
//! the remaining lines into paragraphs. `[label](guide:EntryId)` links to
//! another entry and renders as its label.

use regex::Regex;
use tracing::debug;

use crate::domain::{ContentElement, ContentPane, ElementKind, EntryId};
use crate::infrastructure::traits::DocumentParser;

const DOCUMENT_OPEN: &str = "<Document>";
const DOCUMENT_CLOSE: &str = "</Document>";

pub struct MarkupParser {
    link_regex: Regex,
}

impl Default for MarkupParser {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkupParser {
    pub fn new() -> Self {
        Self {
            link_regex: Regex::new(r"\[([^\]]+)\]\(guide:([^)\s]+)\)")
                .expect("link pattern is valid"),
        }
    }

    /// Parse a whole document into content elements.
    pub fn parse(&self, text: &str) -> Result<Vec<ContentElement>, String> {
        let body = text
            .trim()
            .strip_prefix(DOCUMENT_OPEN)
            .and_then(|rest| rest.strip_suffix(DOCUMENT_CLOSE))
            .ok_or_else(|| format!("document must be wrapped in {DOCUMENT_OPEN}"))?;

        if body.contains(DOCUMENT_OPEN) || body.contains(DOCUMENT_CLOSE) {
            return Err("nested document tags".to_string());
        }

        let mut elements = Vec::new();
        let mut block: Vec<&str> = Vec::new();
        for line in body.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                if !block.is_empty() {
                    elements.push(self.parse_block(&block.join(" ")));
                    block.clear();
                }
            }
            // Headings never span lines
            if line.starts_with('#') {
                elements.push(self.parse_block(line));
            } else if !line.is_empty() {
                block.push(line);
            }
        }
        if !block.is_empty() {
            elements.push(self.parse_block(&block.join(" ")));
        }

        Ok(elements)
    }

    fn parse_block(&self, block: &str) -> ContentElement {
        let (kind, raw) = if block.starts_with('#') {
            (ElementKind::Heading, block.trim_start_matches('#').trim())
        } else {
            (ElementKind::Paragraph, block)
        };

        let links: Vec<EntryId> = self
            .link_regex
            .captures_iter(raw)
            .map(|caps| EntryId::from(&caps[2]))
            .collect();
        let text = self.link_regex.replace_all(raw, "$1").into_owned();

        ContentElement::new(kind, text).with_links(links)
    }
}

impl DocumentParser for MarkupParser {
    fn try_add_markup(&self, pane: &mut ContentPane, text: &str) -> bool {
        match self.parse(text) {
            Ok(elements) => {
                for element in elements {
                    pane.add_child(element);
                }
                true
            }
            Err(reason) => {
                debug!("markup rejected: {}", reason);
                pane.add_child(ContentElement::error(format!(
                    "Failed to parse document: {reason}"
                )));
                false
            }
        }
    }
}
