//! Visible state of the guidebook window.

use crate::domain::ContentPane;

/// How the split between navigation tree and content may be resized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SplitResizeMode {
    /// Fixed split, used when there is nothing to browse
    NotResizable,
    #[default]
    RespectChildrenMinSize,
}

/// Panels, search box and content pane as the user sees them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuideView {
    /// Shown while no entry is displayed
    pub placeholder_visible: bool,
    pub entry_container_visible: bool,
    pub search_container_visible: bool,
    /// Return-to-rules control
    pub return_container_visible: bool,
    /// Navigation tree panel
    pub tree_box_visible: bool,
    pub split_resize_mode: SplitResizeMode,
    pub scroll_offset: usize,
    pub search_text: String,
    pub content: ContentPane,
}

impl Default for GuideView {
    fn default() -> Self {
        Self {
            placeholder_visible: true,
            entry_container_visible: false,
            search_container_visible: false,
            return_container_visible: false,
            tree_box_visible: true,
            split_resize_mode: SplitResizeMode::default(),
            scroll_offset: 0,
            search_text: String::new(),
            content: ContentPane::new(),
        }
    }
}
