use std::collections::HashMap;

use crate::entities::{
    AccountForest, AccountId, AccountNode, AccountRecord, BuildNote, Metrics, NodeId, ParentRef,
};

use super::utils::compare_codes;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Visit {
    New,
    InPath,
    Done,
}

/// Turns a flat list of parent-linked records into an `AccountForest`.
///
/// Inactive records are dropped first. Parents are resolved by id, then by
/// code; anything that cannot be linked without creating a cycle, or whose
/// parent is unknown, becomes a root. Bad rows never fail the build, they
/// are reported as `BuildNote`s instead.
pub struct TreeBuilder<M: Metrics> {
    records: Vec<AccountRecord<M>>,
}

impl<M: Metrics> TreeBuilder<M> {
    pub fn new(records: Vec<AccountRecord<M>>) -> Self {
        Self { records }
    }

    pub fn build(self) -> AccountForest<M> {
        let records: Vec<AccountRecord<M>> =
            self.records.into_iter().filter(|r| r.is_active).collect();

        let mut notes = Vec::new();
        let mut by_id: HashMap<AccountId, NodeId> = HashMap::new();
        let mut by_code: HashMap<String, NodeId> = HashMap::new();
        for (i, record) in records.iter().enumerate() {
            match record.id {
                Some(id) => {
                    if by_id.contains_key(&id) {
                        notes.push(BuildNote::DuplicateId {
                            id,
                            code: record.code.clone(),
                        });
                    } else {
                        by_id.insert(id, NodeId(i));
                    }
                }
                None => notes.push(BuildNote::MissingId {
                    code: record.code.clone(),
                }),
            }
            by_code
                .entry(record.code.0.trim().to_string())
                .or_insert(NodeId(i));
        }

        let mut parents: Vec<Option<usize>> = records
            .iter()
            .enumerate()
            .map(|(i, record)| {
                Self::resolve_parent(i, record, &by_id, &by_code, &mut notes)
            })
            .collect();
        Self::break_cycles(&records, &mut parents, &mut notes);

        let mut nodes: Vec<AccountNode<M>> = records
            .into_iter()
            .map(|record| AccountNode {
                subtree_aggregate: record.own_metrics,
                record,
                level: 0,
                parent: None,
                children: Vec::new(),
            })
            .collect();
        let mut roots = Vec::new();
        for (i, parent) in parents.iter().enumerate() {
            match parent {
                Some(p) => {
                    nodes[i].parent = Some(NodeId(*p));
                    nodes[*p].children.push(NodeId(i));
                }
                None => roots.push(NodeId(i)),
            }
        }

        // Sort siblings by code, then assign levels top-down.
        Self::sort_by_code(&mut roots, &nodes);
        for i in 0..nodes.len() {
            let mut children = std::mem::take(&mut nodes[i].children);
            Self::sort_by_code(&mut children, &nodes);
            nodes[i].children = children;
        }
        let mut stack: Vec<(NodeId, usize)> = roots.iter().map(|r| (*r, 0)).collect();
        while let Some((id, level)) = stack.pop() {
            nodes[id.0].level = level;
            stack.extend(nodes[id.0].children.iter().map(|c| (*c, level + 1)));
        }

        for note in &notes {
            tracing::warn!(note = ?note, "repaired account row while building tree");
        }
        tracing::debug!(
            nodes = nodes.len(),
            roots = roots.len(),
            notes = notes.len(),
            "built account tree"
        );

        AccountForest {
            nodes,
            roots,
            by_id,
            notes,
        }
    }

    fn sort_by_code(ids: &mut [NodeId], nodes: &[AccountNode<M>]) {
        ids.sort_by(|a, b| compare_codes(&nodes[a.0].record.code, &nodes[b.0].record.code));
    }

    fn resolve_parent(
        index: usize,
        record: &AccountRecord<M>,
        by_id: &HashMap<AccountId, NodeId>,
        by_code: &HashMap<String, NodeId>,
        notes: &mut Vec<BuildNote>,
    ) -> Option<usize> {
        let ParentRef::Ref(raw) = &record.parent else {
            return None;
        };
        // Rows without an id are already reported as `MissingId` and stay at
        // the top level. Others can still hang under them by code.
        if record.id.is_none() {
            return None;
        }
        let resolved = record
            .parent
            .as_id()
            .and_then(|id| by_id.get(&id))
            .or_else(|| record.parent.as_code().and_then(|c| by_code.get(c)))
            .map(|n| n.0);
        match resolved {
            Some(p) if p == index => {
                notes.push(BuildNote::SelfReference {
                    code: record.code.clone(),
                });
                None
            }
            Some(p) => Some(p),
            None => {
                notes.push(BuildNote::OrphanParent {
                    code: record.code.clone(),
                    parent: raw.clone(),
                });
                None
            }
        }
    }

    /// Detaches every node that sits on a parent cycle (A -> B -> A). Nodes
    /// merely hanging off a cycle keep their parent.
    fn break_cycles(
        records: &[AccountRecord<M>],
        parents: &mut [Option<usize>],
        notes: &mut Vec<BuildNote>,
    ) {
        let mut state = vec![Visit::New; parents.len()];
        for start in 0..parents.len() {
            let mut path: Vec<usize> = Vec::new();
            let mut current = Some(start);
            while let Some(c) = current {
                match state[c] {
                    Visit::Done => break,
                    Visit::InPath => {
                        if let Some(pos) = path.iter().position(|&p| p == c) {
                            for &member in &path[pos..] {
                                parents[member] = None;
                                notes.push(BuildNote::CycleBroken {
                                    code: records[member].code.clone(),
                                });
                            }
                        }
                        break;
                    }
                    Visit::New => {
                        state[c] = Visit::InPath;
                        path.push(c);
                        current = parents[c];
                    }
                }
            }
            for p in path {
                state[p] = Visit::Done;
            }
        }
    }
}
