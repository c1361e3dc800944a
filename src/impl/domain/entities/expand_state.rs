use std::collections::HashSet;

use crate::entities::{AccountForest, Metrics, NodeId};

/// Which nodes are currently expanded. Kept apart from the forest so that
/// display projection and flattening stay pure functions of (forest, state).
///
/// Everything is collapsed by default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpandState {
    expanded: HashSet<NodeId>,
}

impl ExpandState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_expanded(&self, id: NodeId) -> bool {
        self.expanded.contains(&id)
    }

    pub fn expanded_count(&self) -> usize {
        self.expanded.len()
    }

    /// Flips the node's state. Nodes without children (and unknown nodes)
    /// are left alone; the return value says whether anything changed.
    pub fn toggle<M: Metrics>(&mut self, forest: &AccountForest<M>, id: NodeId) -> bool {
        match forest.node(id) {
            Some(node) if node.has_children() => {
                if !self.expanded.remove(&id) {
                    self.expanded.insert(id);
                }
                true
            }
            _ => false,
        }
    }

    pub fn set_expanded<M: Metrics>(
        &mut self,
        forest: &AccountForest<M>,
        id: NodeId,
        expanded: bool,
    ) -> bool {
        match forest.node(id) {
            Some(node) if node.has_children() => {
                if expanded {
                    self.expanded.insert(id)
                } else {
                    self.expanded.remove(&id)
                }
            }
            _ => false,
        }
    }

    pub fn expand_all<M: Metrics>(&mut self, forest: &AccountForest<M>) {
        self.expanded = forest
            .nodes()
            .filter(|(_, n)| n.has_children())
            .map(|(id, _)| id)
            .collect();
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }

    /// Expands every ancestor of the node so that it becomes visible in the
    /// hierarchy. The node itself keeps its state.
    pub fn reveal<M: Metrics>(&mut self, forest: &AccountForest<M>, id: NodeId) {
        let mut path = forest.path_to(id);
        path.pop();
        self.expanded.extend(path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::logic::tree_builder::TreeBuilder,
        entities::{AccountId, AccountRecord, MovementMetrics},
    };

    fn forest() -> AccountForest<MovementMetrics> {
        TreeBuilder::new(vec![
            AccountRecord::new(1, "1", "Root"),
            AccountRecord::new(2, "11", "Group").with_parent(1),
            AccountRecord::new(3, "111", "Leaf").with_parent(2),
        ])
        .build()
    }

    #[test]
    fn test_toggle_leaf_is_noop() {
        let forest = forest();
        let mut state = ExpandState::new();
        let leaf = forest.node_id(AccountId(3)).unwrap();
        assert!(!state.toggle(&forest, leaf));
        assert!(!state.is_expanded(leaf));
    }

    #[test]
    fn test_toggle_flips() {
        let forest = forest();
        let mut state = ExpandState::new();
        let root = forest.node_id(AccountId(1)).unwrap();
        assert!(state.toggle(&forest, root));
        assert!(state.is_expanded(root));
        assert!(state.toggle(&forest, root));
        assert!(!state.is_expanded(root));
    }

    #[test]
    fn test_reveal_expands_ancestors_only() {
        let forest = forest();
        let mut state = ExpandState::new();
        let leaf = forest.node_id(AccountId(3)).unwrap();
        state.reveal(&forest, leaf);
        assert!(state.is_expanded(forest.node_id(AccountId(1)).unwrap()));
        assert!(state.is_expanded(forest.node_id(AccountId(2)).unwrap()));
        assert!(!state.is_expanded(leaf));
    }

    #[test]
    fn test_expand_all_and_collapse_all() {
        let forest = forest();
        let mut state = ExpandState::new();
        state.expand_all(&forest);
        assert_eq!(state.expanded_count(), 2);
        state.collapse_all();
        assert_eq!(state.expanded_count(), 0);
    }
}
