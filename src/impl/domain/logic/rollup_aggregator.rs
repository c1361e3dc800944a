use crate::entities::{AccountForest, Metrics, NodeId};

/// Computes `subtree_aggregate` for every node of a forest.
///
/// A node's aggregate is its own metrics plus, for each child, either the
/// child's own metrics (control account) or the child's full aggregate
/// (anything else). Control accounts already summarize their sub-ledger, so
/// the rollup stops at them.
///
/// Aggregates are always rebuilt from own metrics, so running this any
/// number of times yields the same values.
pub struct RollupAggregator<'a, M: Metrics> {
    forest: &'a mut AccountForest<M>,
}

impl<'a, M: Metrics> RollupAggregator<'a, M> {
    pub fn new(forest: &'a mut AccountForest<M>) -> Self {
        Self { forest }
    }

    pub fn process(self) {
        // Walking a top-down order backwards visits every child before its
        // parent.
        let mut order: Vec<NodeId> = Vec::with_capacity(self.forest.nodes.len());
        let mut stack: Vec<NodeId> = self.forest.roots.clone();
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.forest.nodes[id.0].children.iter().copied());
        }

        for id in order.into_iter().rev() {
            let node = &self.forest.nodes[id.0];
            let total = node.children.iter().fold(node.record.own_metrics, |acc, child| {
                let child = &self.forest.nodes[child.0];
                acc + if child.record.is_control {
                    child.record.own_metrics
                } else {
                    child.subtree_aggregate
                }
            });
            self.forest.nodes[id.0].subtree_aggregate = total;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::logic::tree_builder::TreeBuilder,
        entities::{opening_closing, AccountId, AccountRecord, OpeningClosingMetrics},
    };

    type Record = AccountRecord<OpeningClosingMetrics>;

    fn od(v: f64) -> OpeningClosingMetrics {
        opening_closing(v, 0.0, 0.0, 0.0)
    }

    fn aggregated(records: Vec<Record>) -> AccountForest<OpeningClosingMetrics> {
        let mut forest = TreeBuilder::new(records).build();
        RollupAggregator::new(&mut forest).process();
        forest
    }

    #[test]
    fn test_leaf_aggregate_equals_own() {
        let forest = aggregated(vec![Record::new(1, "1", "Leaf").with_metrics(od(42.0))]);
        assert_eq!(forest.find(AccountId(1)).unwrap().subtree_aggregate(), od(42.0));
    }

    #[test]
    fn test_additive_without_control_accounts() {
        let forest = aggregated(vec![
            Record::new(1, "1", "Root").with_metrics(opening_closing(1.0, 2.0, 3.0, 4.0)),
            Record::new(2, "11", "A").with_parent(1).with_metrics(opening_closing(10.0, 0.0, 5.0, 0.0)),
            Record::new(3, "111", "A1").with_parent(2).with_metrics(opening_closing(100.0, 1.0, 0.0, 0.5)),
            Record::new(4, "112", "A2").with_parent(2).with_metrics(opening_closing(0.0, 8.0, 2.0, 0.0)),
            Record::new(5, "12", "B").with_parent(1).with_metrics(opening_closing(0.0, 0.0, 0.0, 16.0)),
        ]);

        let sum = forest
            .nodes()
            .map(|(_, n)| n.own_metrics())
            .fold(OpeningClosingMetrics::default(), |acc, m| acc + m);
        assert_eq!(forest.find(AccountId(1)).unwrap().subtree_aggregate(), sum);
        assert_eq!(
            forest.find(AccountId(2)).unwrap().subtree_aggregate(),
            opening_closing(110.0, 9.0, 7.0, 0.5)
        );
    }

    #[test]
    fn test_control_child_descendants_contribute_nothing_to_parent() {
        let forest = aggregated(vec![
            Record::new(1, "1000", "Current Assets").with_metrics(od(1.0)),
            Record::new(2, "1100", "Accounts Receivable")
                .with_parent(1)
                .with_metrics(od(500.0))
                .control(),
            Record::new(3, "1101", "Customer A").with_parent(2).with_metrics(od(200.0)),
            Record::new(4, "1102", "Customer B").with_parent(2).with_metrics(od(300.0)),
            Record::new(5, "1200", "Inventory").with_parent(1).with_metrics(od(20.0)),
            Record::new(6, "1201", "Raw").with_parent(5).with_metrics(od(7.0)),
        ]);

        // parent own + control own + other child's full subtree.
        assert_eq!(
            forest.find(AccountId(1)).unwrap().subtree_aggregate(),
            od(1.0 + 500.0 + 20.0 + 7.0)
        );
        // The control account itself still rolls up its own detail.
        assert_eq!(
            forest.find(AccountId(2)).unwrap().subtree_aggregate(),
            od(1000.0)
        );
    }

    #[test]
    fn test_control_boundary_applies_at_every_depth() {
        let forest = aggregated(vec![
            Record::new(1, "1", "Root"),
            Record::new(2, "11", "Group").with_parent(1).with_metrics(od(1.0)),
            Record::new(3, "111", "AP").with_parent(2).with_metrics(od(50.0)).control(),
            Record::new(4, "1111", "Supplier").with_parent(3).with_metrics(od(50.0)),
        ]);
        assert_eq!(forest.find(AccountId(2)).unwrap().subtree_aggregate(), od(51.0));
        assert_eq!(forest.find(AccountId(1)).unwrap().subtree_aggregate(), od(51.0));
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let mut forest = aggregated(vec![
            Record::new(1, "1", "Root").with_metrics(od(0.1)),
            Record::new(2, "11", "A").with_parent(1).with_metrics(od(0.2)),
            Record::new(3, "12", "B").with_parent(1).with_metrics(od(0.3)).control(),
            Record::new(4, "121", "B1").with_parent(3).with_metrics(od(0.7)),
        ]);
        let first: Vec<_> = forest.nodes().map(|(_, n)| n.subtree_aggregate()).collect();
        RollupAggregator::new(&mut forest).process();
        RollupAggregator::new(&mut forest).process();
        let again: Vec<_> = forest.nodes().map(|(_, n)| n.subtree_aggregate()).collect();
        assert_eq!(first, again);
    }

    #[test]
    fn test_deep_chain() {
        let depth = 100_000;
        let records = (1..=depth)
            .map(|i| {
                let record = Record::new(i, format!("{i}"), "Level").with_metrics(od(1.0));
                if i == 1 {
                    record
                } else {
                    record.with_parent(i - 1)
                }
            })
            .collect();
        let forest = aggregated(records);
        assert_eq!(
            forest.find(AccountId(1)).unwrap().subtree_aggregate(),
            od(depth as f64)
        );
        assert_eq!(forest.find(AccountId(depth)).unwrap().level(), depth as usize - 1);
    }
}
