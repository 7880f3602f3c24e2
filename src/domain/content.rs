//! Rendered document content: the elements shown in the content pane.

use crate::domain::EntryId;

/// Elements that show or hide themselves depending on a search query.
pub trait Searchable {
    /// Whether this element matches the query.
    fn matches_search(&self, query: &str) -> bool;

    /// Set visibility relative to the query: matching elements get `state`,
    /// others get its opposite.
    fn set_hidden_state(&mut self, state: bool, query: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Heading,
    Paragraph,
    /// In-place error block rendered when a document cannot be shown
    Error,
}

/// One block of rendered content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentElement {
    pub kind: ElementKind,
    /// Display text, link markup already replaced by link labels
    pub text: String,
    /// Entries this element links to, in order of appearance
    pub links: Vec<EntryId>,
    pub visible: bool,
}

impl ContentElement {
    pub fn new(kind: ElementKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            links: Vec::new(),
            visible: true,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(ElementKind::Error, message)
    }

    pub fn with_links(mut self, links: Vec<EntryId>) -> Self {
        self.links = links;
        self
    }

    /// Paragraphs take part in filtering; headings and error blocks stay put.
    pub fn is_searchable(&self) -> bool {
        self.kind == ElementKind::Paragraph
    }
}

impl Searchable for ContentElement {
    fn matches_search(&self, query: &str) -> bool {
        self.text.to_lowercase().contains(&query.to_lowercase())
    }

    fn set_hidden_state(&mut self, state: bool, query: &str) {
        self.visible = if self.matches_search(query) { state } else { !state };
    }
}

/// Container the document parser renders into.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentPane {
    elements: Vec<ContentElement>,
}

impl ContentPane {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_child(&mut self, element: ContentElement) {
        self.elements.push(element);
    }

    pub fn remove_all_children(&mut self) {
        self.elements.clear();
    }

    pub fn elements(&self) -> &[ContentElement] {
        &self.elements
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn visible_elements(&self) -> impl Iterator<Item = &ContentElement> {
        self.elements.iter().filter(|e| e.visible)
    }

    /// Elements that take part in search filtering.
    pub fn searchable_controls(&mut self) -> impl Iterator<Item = &mut ContentElement> {
        self.elements.iter_mut().filter(|e| e.is_searchable())
    }

    pub fn has_error(&self) -> bool {
        self.elements.iter().any(|e| e.kind == ElementKind::Error)
    }
}
