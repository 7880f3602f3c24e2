//! Tree builder: turns a guide registry into the navigation tree.

use std::collections::HashSet;

use generational_arena::Index;
use itertools::Itertools;
use tracing::{debug, error, instrument};

use crate::domain::arena::{GuideTree, ItemMetadata};
use crate::domain::{EntryId, GuideEntry, GuideRegistry};

/// Entries that are nobody's child, in id order.
///
/// Pure function of the registry; recomputed on every build.
pub fn derive_roots(entries: &GuideRegistry) -> Vec<EntryId> {
    let children: HashSet<&EntryId> = entries
        .values()
        .flat_map(|entry| entry.children.iter())
        .collect();

    entries
        .keys()
        .filter(|id| !children.contains(id))
        .cloned()
        .collect()
}

/// Resolve the root set and order it by ascending priority.
///
/// The sort is stable: equal priorities keep the supplied order.
/// Explicit roots missing from the registry are skipped.
pub fn sorted_roots<'a>(
    entries: &'a GuideRegistry,
    roots: Option<&[EntryId]>,
) -> Vec<&'a GuideEntry> {
    let roots = match roots {
        Some(explicit) => explicit.to_vec(),
        None => derive_roots(entries),
    };

    roots
        .iter()
        .filter_map(|id| {
            let entry = entries.get(id);
            if entry.is_none() {
                debug!("skipping unknown root entry: {}", id);
            }
            entry
        })
        .sorted_by_key(|entry| entry.priority)
        .collect()
}

/// Populates a [`GuideTree`] from a registry.
///
/// The canonical rules entry and label lookup are injected so the build
/// stays independent of any global state.
pub struct TreeBuilder<'a> {
    entries: &'a GuideRegistry,
    core_rule_entry: &'a EntryId,
    localize: &'a dyn Fn(&str) -> String,
    added_entries: HashSet<EntryId>,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(
        entries: &'a GuideRegistry,
        core_rule_entry: &'a EntryId,
        localize: &'a dyn Fn(&str) -> String,
    ) -> Self {
        Self {
            entries,
            core_rule_entry,
            localize,
            added_entries: HashSet::new(),
        }
    }

    /// Clear `tree` and rebuild it from the registry.
    ///
    /// With `forced_root`, that entry becomes the single top-level item and
    /// every root is attached below it.
    #[instrument(level = "debug", skip(self, tree))]
    pub fn repopulate(
        mut self,
        tree: &mut GuideTree,
        roots: Option<&[EntryId]>,
        forced_root: Option<&EntryId>,
    ) {
        tree.clear();
        self.added_entries.clear();

        let parent = forced_root.and_then(|id| self.add_entry(tree, id, None));
        for entry in sorted_roots(self.entries, roots) {
            self.add_entry(tree, &entry.id, parent);
        }

        tree.set_all_expanded(true);
        debug!("tree populated with {} items", tree.len());
    }

    fn add_entry(
        &mut self,
        tree: &mut GuideTree,
        id: &EntryId,
        parent: Option<Index>,
    ) -> Option<Index> {
        let entries = self.entries;
        let Some(entry) = entries.get(id) else {
            debug!("ignoring unknown guide entry: {}", id);
            return None;
        };

        if !self.added_entries.insert(id.clone()) {
            error!("Adding duplicate guide entry: {}", id);
            return None;
        }

        // Only one rules entry gets a tree slot
        if entry.rule_entry && &entry.id != self.core_rule_entry {
            return None;
        }

        let idx = tree.add_item(parent);
        if let Some(item) = tree.get_mut(idx) {
            item.metadata = ItemMetadata::Entry(entry.id.clone());
            item.label = (self.localize)(&entry.name);
        }

        for child in &entry.children {
            self.add_entry(tree, child, Some(idx));
        }

        Some(idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::registry_from;

    fn identity(key: &str) -> String {
        key.to_string()
    }

    #[test]
    fn given_cycle_only_registry_when_deriving_roots_then_empty() {
        let entries = registry_from([
            GuideEntry::new("A", "a", "/a.txt").with_children(["B"]),
            GuideEntry::new("B", "b", "/b.txt").with_children(["A"]),
        ]);
        assert!(derive_roots(&entries).is_empty());
    }

    #[test]
    fn given_unknown_explicit_root_when_sorting_then_skipped() {
        let entries = registry_from([GuideEntry::new("A", "a", "/a.txt")]);
        let roots = [EntryId::from("Missing"), EntryId::from("A")];
        let sorted = sorted_roots(&entries, Some(&roots));
        assert_eq!(sorted.len(), 1);
        assert_eq!(sorted[0].id, EntryId::from("A"));
    }

    #[test]
    fn given_self_reference_when_building_then_single_item() {
        let entries = registry_from([
            GuideEntry::new("Root", "root", "/r.txt").with_children(["A"]),
            GuideEntry::new("A", "a", "/a.txt").with_children(["A"]),
        ]);
        let rules = EntryId::from("Rules");
        let mut tree = GuideTree::new();
        TreeBuilder::new(&entries, &rules, &identity).repopulate(&mut tree, None, None);

        assert_eq!(tree.len(), 2);
        let a = tree.index_from_metadata(&EntryId::from("A")).unwrap();
        assert!(tree.get(a).unwrap().children.is_empty());
    }

    #[test]
    fn given_unknown_forced_root_when_building_then_roots_stay_top_level() {
        let entries = registry_from([
            GuideEntry::new("A", "a", "/a.txt"),
            GuideEntry::new("B", "b", "/b.txt"),
        ]);
        let rules = EntryId::from("Rules");
        let forced = EntryId::from("Nope");
        let mut tree = GuideTree::new();
        TreeBuilder::new(&entries, &rules, &identity).repopulate(&mut tree, None, Some(&forced));

        assert_eq!(tree.root_entries(), vec![EntryId::from("A"), EntryId::from("B")]);
    }
}
