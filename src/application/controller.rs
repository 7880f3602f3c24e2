//! Guidebook controller
//!
//! Owns the guide registry and navigation tree, reacts to selection, link
//! clicks and search input, and keeps the [`GuideView`] in sync.

use std::sync::Arc;

use generational_arena::Index;
use tracing::{debug, error, instrument};

use crate::application::view::{GuideView, SplitResizeMode};
use crate::domain::{ContentElement, EntryId, GuideRegistry, GuideTree, Searchable, TreeBuilder};
use crate::infrastructure::traits::{DocumentParser, Localization, ResourceReader, RulesEntryResolver};

/// Capabilities the controller consumes.
#[derive(Clone)]
pub struct Collaborators {
    pub resources: Arc<dyn ResourceReader>,
    pub parser: Arc<dyn DocumentParser>,
    pub localization: Arc<dyn Localization>,
    pub rules: Arc<dyn RulesEntryResolver>,
}

pub struct GuidebookController {
    entries: GuideRegistry,
    tree: GuideTree,
    view: GuideView,
    /// Most recently displayed entry since the last update
    last_entry: Option<EntryId>,
    deps: Collaborators,
}

impl GuidebookController {
    pub fn new(deps: Collaborators) -> Self {
        Self {
            entries: GuideRegistry::new(),
            tree: GuideTree::new(),
            view: GuideView::default(),
            last_entry: None,
            deps,
        }
    }

    pub fn entries(&self) -> &GuideRegistry {
        &self.entries
    }

    pub fn tree(&self) -> &GuideTree {
        &self.tree
    }

    pub fn view(&self) -> &GuideView {
        &self.view
    }

    pub fn last_entry(&self) -> Option<&EntryId> {
        self.last_entry.as_ref()
    }

    /// Replace all guides, rebuild the tree and apply the initial selection.
    ///
    /// A registry with a single entry hides the navigation panel and shows
    /// that entry.
    #[instrument(level = "debug", skip(self, entries))]
    pub fn update_guides(
        &mut self,
        entries: GuideRegistry,
        root_entries: Option<&[EntryId]>,
        force_root: Option<&EntryId>,
        selected: Option<EntryId>,
    ) {
        self.entries = entries;
        self.repopulate_tree(root_entries, force_root);
        self.clear_selected_guide();
        self.last_entry = None;

        let mut selected = selected;
        if self.entries.len() == 1 {
            self.view.tree_box_visible = false;
            self.view.split_resize_mode = SplitResizeMode::NotResizable;
            selected = self.entries.keys().next().cloned();
        } else {
            self.view.tree_box_visible = true;
            self.view.split_resize_mode = SplitResizeMode::RespectChildrenMinSize;
        }

        if let Some(selected) = selected {
            let idx = self.tree.index_from_metadata(&selected);
            self.select_index(idx);
        }
    }

    fn repopulate_tree(&mut self, roots: Option<&[EntryId]>, forced_root: Option<&EntryId>) {
        let core_rule_entry = self.deps.rules.core_rule_entry();
        let localization = Arc::clone(&self.deps.localization);
        let localize = move |key: &str| localization.get_string(key);

        TreeBuilder::new(&self.entries, &core_rule_entry, &localize).repopulate(
            &mut self.tree,
            roots,
            forced_root,
        );
    }

    /// Follow a link to another entry.
    ///
    /// Entries with a tree item are selected (revealing their ancestors);
    /// entries without one are displayed directly. Unknown ids are ignored.
    #[instrument(level = "debug", skip(self))]
    pub fn handle_click(&mut self, link: &str) {
        let Some(entry) = self.entries.get(link) else {
            debug!("ignoring link to unknown guide entry: {}", link);
            return;
        };
        let id = entry.id.clone();

        match self.tree.index_from_metadata(&id) {
            Some(idx) => {
                self.tree.expand_parent_entries(idx);
                self.select_index(Some(idx));
            }
            None => self.show_guide(&id),
        }
    }

    /// Change the tree selection, as a click on a tree item does.
    pub fn select_index(&mut self, idx: Option<Index>) {
        self.tree.set_selected_index(idx);
        self.on_selection_changed();
    }

    fn on_selection_changed(&mut self) {
        let selected = self
            .tree
            .selected_item()
            .and_then(|item| item.metadata.entry_id())
            .and_then(|id| self.entries.get(id))
            .map(|entry| (entry.id.clone(), entry.rule_entry));

        match selected {
            Some((id, is_rules_entry)) => {
                self.show_guide(&id);
                self.view.return_container_visible = is_rules_entry;
            }
            None => self.clear_selected_guide(),
        }
    }

    /// Back to the placeholder: no content, no search, no return control.
    pub fn clear_selected_guide(&mut self) {
        self.view.placeholder_visible = true;
        self.view.entry_container_visible = false;
        self.view.search_container_visible = false;
        self.view.return_container_visible = false;
        self.view.content.remove_all_children();
    }

    fn show_guide(&mut self, id: &EntryId) {
        let Some(entry) = self.entries.get(id) else {
            return;
        };
        let id = entry.id.clone();
        let text = entry.text.clone();

        self.view.scroll_offset = 0;
        self.view.placeholder_visible = false;
        self.view.entry_container_visible = true;
        self.view.search_text.clear();
        self.view.content.remove_all_children();
        self.view.search_container_visible = entry.filter_enabled;

        match self.deps.resources.open_text(&text) {
            Ok(body) => {
                if !self.deps.parser.try_add_markup(&mut self.view.content, &body) {
                    // The parser has already put its error block in place
                    error!("Failed to parse contents of guide document {}.", id);
                }
            }
            Err(e) => {
                error!("Failed to read guide document {} from {}: {}", id, text, e);
                self.view
                    .content
                    .add_child(ContentElement::error(format!("Missing guide document: {text}")));
            }
        }

        self.last_entry = Some(id);
    }

    /// Return control: redisplay the entry selected in the tree.
    pub fn press_home(&mut self) {
        if !self.view.return_container_visible {
            return;
        }
        let selected = self
            .tree
            .selected_item()
            .and_then(|item| item.metadata.entry_id())
            .cloned();
        if let Some(id) = selected {
            self.show_guide(&id);
        }
    }

    /// Update the search box; filtering runs on every change.
    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.view.search_text = text.into();
        self.handle_filter();
    }

    /// Whether the search box currently filters: the entry selected in the
    /// tree must have filtering enabled.
    pub fn filter_active(&self) -> bool {
        self.tree
            .selected_item()
            .and_then(|item| item.metadata.entry_id())
            .and_then(|id| self.entries.get(id))
            .is_some_and(|entry| entry.filter_enabled)
    }

    /// Show only the searchable elements that match the search text.
    pub fn handle_filter(&mut self) {
        if !self.filter_active() {
            return;
        }

        let query = self.view.search_text.trim().to_string();
        for element in self.view.content.searchable_controls() {
            element.set_hidden_state(true, &query);
        }
    }
}
