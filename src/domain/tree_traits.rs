use generational_arena::Index;
use termtree::Tree;

use crate::domain::arena::GuideTree;

/// Conversion of a navigation tree into printable `termtree` form.
pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeNodeConvert for GuideTree {
    fn to_tree_string(&self) -> Tree<String> {
        fn build_tree(tree: &GuideTree, idx: Index) -> Tree<String> {
            let Some(item) = tree.get(idx) else {
                return Tree::new(String::new());
            };
            let label = match item.metadata.entry_id() {
                Some(id) => format!("{} ({})", item.label, id),
                None => item.label.clone(),
            };
            let leaves: Vec<_> = item
                .children
                .iter()
                .map(|&child| build_tree(tree, child))
                .collect();
            Tree::new(label).with_leaves(leaves)
        }

        let leaves: Vec<_> = self
            .roots()
            .iter()
            .map(|&root| build_tree(self, root))
            .collect();
        if leaves.is_empty() {
            Tree::new("Empty tree".to_string())
        } else {
            Tree::new("Guidebook".to_string()).with_leaves(leaves)
        }
    }
}
