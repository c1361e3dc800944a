use std::collections::HashMap;

use crate::entities::{AccountCode, AccountId, AccountRecord, Metrics};

/// Position of a node in its forest. Only meaningful for the forest that
/// produced it; a reload invalidates all ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde_derive::Serialize)]
pub struct NodeId(pub(crate) usize);

#[derive(Debug, Clone)]
pub struct AccountNode<M: Metrics> {
    pub(crate) record: AccountRecord<M>,
    pub(crate) level: usize,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) subtree_aggregate: M,
}

/// Something about the source rows that was repaired while building the
/// tree. None of these abort a build.
#[derive(Debug, Clone, PartialEq)]
pub enum BuildNote {
    MissingId {
        code: AccountCode,
    },
    /// A later record with an id already seen. Lookups by id resolve to the
    /// first record; the duplicate is still part of the tree.
    DuplicateId {
        id: AccountId,
        code: AccountCode,
    },
    SelfReference {
        code: AccountCode,
    },
    CycleBroken {
        code: AccountCode,
    },
    OrphanParent {
        code: AccountCode,
        parent: String,
    },
}

/// Accounts arranged as a forest. Every node is either in `roots` or in
/// exactly one parent's `children`.
#[derive(Debug, Clone)]
pub struct AccountForest<M: Metrics> {
    pub(crate) nodes: Vec<AccountNode<M>>,
    pub(crate) roots: Vec<NodeId>,
    pub(crate) by_id: HashMap<AccountId, NodeId>,
    pub(crate) notes: Vec<BuildNote>,
}

// --

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl<M: Metrics> AccountNode<M> {
    pub fn id(&self) -> Option<AccountId> {
        self.record.id
    }

    pub fn code(&self) -> &AccountCode {
        &self.record.code
    }

    pub fn name(&self) -> &str {
        &self.record.name
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn is_control(&self) -> bool {
        self.record.is_control
    }

    pub fn own_metrics(&self) -> M {
        self.record.own_metrics
    }

    /// Own metrics plus rolled-up descendants, as of the last aggregation.
    pub fn subtree_aggregate(&self) -> M {
        self.subtree_aggregate
    }

    pub fn record(&self) -> &AccountRecord<M> {
        &self.record
    }
}

impl<M: Metrics> AccountForest<M> {
    pub fn empty() -> Self {
        Self {
            nodes: Vec::new(),
            roots: Vec::new(),
            by_id: HashMap::new(),
            notes: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn node(&self, id: NodeId) -> Option<&AccountNode<M>> {
        self.nodes.get(id.0)
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Option<&mut AccountNode<M>> {
        self.nodes.get_mut(id.0)
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &AccountNode<M>)> + '_ {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// Looks up a node by the account id of its record.
    pub fn node_id(&self, account_id: AccountId) -> Option<NodeId> {
        self.by_id.get(&account_id).copied()
    }

    pub fn find(&self, account_id: AccountId) -> Option<&AccountNode<M>> {
        self.node_id(account_id).and_then(|id| self.node(id))
    }

    pub fn notes(&self) -> &[BuildNote] {
        &self.notes
    }

    /// Nodes from the root down to (and including) the given node.
    pub fn path_to(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut current = self.node(id).map(|_| id);
        while let Some(n) = current {
            path.push(n);
            current = self.node(n).and_then(|node| node.parent);
        }
        path.reverse();
        path
    }

    /// Pre-order walk over the whole forest, ignoring expand state.
    pub fn pre_order(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<NodeId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            if let Some(node) = self.node(id) {
                stack.extend(node.children.iter().rev().copied());
            }
        }
        out
    }
}
