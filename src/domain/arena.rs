use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::domain::EntryId;

/// Payload attached to a tree item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ItemMetadata {
    /// Item carries no guide entry
    #[default]
    Empty,
    /// Item represents the guide entry with this id
    Entry(EntryId),
}

impl ItemMetadata {
    pub fn entry_id(&self) -> Option<&EntryId> {
        match self {
            ItemMetadata::Entry(id) => Some(id),
            ItemMetadata::Empty => None,
        }
    }
}

/// Item in the arena-based navigation tree.
#[derive(Debug)]
pub struct TreeItem {
    pub metadata: ItemMetadata,
    /// Display label
    pub label: String,
    pub expanded: bool,
    /// Index of parent item in the arena, None for top-level items
    pub parent: Option<Index>,
    /// Indices of child items in display order
    pub children: Vec<Index>,
}

/// Expandable, selectable tree of guide items.
///
/// Unlike a single-rooted hierarchy, the navigation tree has any number of
/// top-level items. Items are addressed by generational arena indices, so an
/// index kept across a `clear()` never resolves to a newer item.
#[derive(Debug, Default)]
pub struct GuideTree {
    arena: Arena<TreeItem>,
    /// Top-level items in display order
    roots: Vec<Index>,
    selected: Option<Index>,
}

impl GuideTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove all items and the selection.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.roots.clear();
        self.selected = None;
    }

    /// Append an empty item under `parent`, or at top level.
    #[instrument(level = "trace", skip(self))]
    pub fn add_item(&mut self, parent: Option<Index>) -> Index {
        let parent = parent.filter(|idx| self.arena.contains(*idx));
        let item = TreeItem {
            metadata: ItemMetadata::Empty,
            label: String::new(),
            expanded: false,
            parent,
            children: Vec::new(),
        };
        let idx = self.arena.insert(item);

        match parent.and_then(|p| self.arena.get_mut(p)) {
            Some(parent_item) => parent_item.children.push(idx),
            None => self.roots.push(idx),
        }
        idx
    }

    pub fn get(&self, idx: Index) -> Option<&TreeItem> {
        self.arena.get(idx)
    }

    pub fn get_mut(&mut self, idx: Index) -> Option<&mut TreeItem> {
        self.arena.get_mut(idx)
    }

    pub fn roots(&self) -> &[Index] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// All items in display order (depth-first, children in order).
    pub fn items(&self) -> TreeIterator<'_> {
        TreeIterator::new(self)
    }

    pub fn set_all_expanded(&mut self, expanded: bool) {
        for (_, item) in self.arena.iter_mut() {
            item.expanded = expanded;
        }
    }

    pub fn selected(&self) -> Option<Index> {
        self.selected
    }

    pub fn selected_item(&self) -> Option<&TreeItem> {
        self.selected.and_then(|idx| self.arena.get(idx))
    }

    /// Set the selection. Stale indices select nothing.
    ///
    /// Returns the resulting selection.
    pub fn set_selected_index(&mut self, idx: Option<Index>) -> Option<Index> {
        self.selected = idx.filter(|i| self.arena.contains(*i));
        self.selected
    }

    /// Expand every ancestor of `idx` so that it becomes visible.
    #[instrument(level = "trace", skip(self))]
    pub fn expand_parent_entries(&mut self, idx: Index) {
        let mut current = self.arena.get(idx).and_then(|item| item.parent);
        while let Some(parent_idx) = current {
            match self.arena.get_mut(parent_idx) {
                Some(parent) => {
                    parent.expanded = true;
                    current = parent.parent;
                }
                None => break,
            }
        }
    }

    /// First item, in display order, that carries the given entry.
    pub fn index_from_metadata(&self, id: &EntryId) -> Option<Index> {
        self.items()
            .find(|(_, item)| item.metadata.entry_id() == Some(id))
            .map(|(idx, _)| idx)
    }

    /// Number of levels below and including the deepest top-level item.
    pub fn depth(&self) -> usize {
        self.roots
            .iter()
            .map(|&root| self.calculate_depth(root))
            .max()
            .unwrap_or(0)
    }

    fn calculate_depth(&self, idx: Index) -> usize {
        if let Some(item) = self.get(idx) {
            1 + item
                .children
                .iter()
                .map(|&child| self.calculate_depth(child))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }

    /// Entry ids of the children of `idx`, in display order.
    pub fn child_entries(&self, idx: Index) -> Vec<EntryId> {
        self.get(idx)
            .map(|item| {
                item.children
                    .iter()
                    .filter_map(|&c| self.get(c))
                    .filter_map(|c| c.metadata.entry_id().cloned())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Entry ids of the top-level items, in display order.
    pub fn root_entries(&self) -> Vec<EntryId> {
        self.roots
            .iter()
            .filter_map(|&r| self.get(r))
            .filter_map(|r| r.metadata.entry_id().cloned())
            .collect()
    }
}

/// Pre-order iterator over all top-level items and their descendants.
pub struct TreeIterator<'a> {
    tree: &'a GuideTree,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(tree: &'a GuideTree) -> Self {
        // Reverse so the first root is popped first
        let stack = tree.roots.iter().rev().copied().collect();
        Self { tree, stack }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a TreeItem);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(item) = self.tree.get(current_idx) {
                for &child in item.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, item));
            }
        }
        None
    }
}
