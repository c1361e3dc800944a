use crate::entities::{AccountForest, DisplayProjection, ExpandState, Metrics};

/// The value shown on a node's row, given its kind and expand state.
///
/// | node                 | collapsed  | expanded |
/// |----------------------|------------|----------|
/// | leaf                 | own        | own      |
/// | group (non-control)  | aggregate  | own      |
/// | control with detail  | own        | zero     |
///
/// An expanded node's children are visible as rows of their own, so the
/// parent row must not repeat their amounts. A control account's own row
/// already is the summary of its sub-ledger, so it never shows the rollup.
pub fn display_value<M: Metrics>(
    has_children: bool,
    is_control: bool,
    expanded: bool,
    own: M,
    aggregate: M,
) -> M {
    match (has_children, is_control, expanded) {
        (false, _, _) => own,
        (true, false, false) => aggregate,
        (true, false, true) => own,
        (true, true, false) => own,
        (true, true, true) => M::zero(),
    }
}

/// Applies `display_value` to every node of an aggregated forest.
pub struct DisplayProjector<'a, M: Metrics> {
    forest: &'a AccountForest<M>,
    expand_state: &'a ExpandState,
}

impl<'a, M: Metrics> DisplayProjector<'a, M> {
    pub fn new(forest: &'a AccountForest<M>, expand_state: &'a ExpandState) -> Self {
        Self {
            forest,
            expand_state,
        }
    }

    pub fn process(self) -> DisplayProjection<M> {
        let values = self
            .forest
            .nodes()
            .map(|(id, node)| {
                display_value(
                    node.has_children(),
                    node.is_control(),
                    self.expand_state.is_expanded(id),
                    node.own_metrics(),
                    node.subtree_aggregate(),
                )
            })
            .collect();
        DisplayProjection { values }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::logic::{rollup_aggregator::RollupAggregator, tree_builder::TreeBuilder},
        entities::{movement, AccountId, AccountRecord, MovementMetrics},
    };

    fn own() -> MovementMetrics {
        movement(1.0, 2.0, 3.0, 4.0)
    }

    fn aggregate() -> MovementMetrics {
        movement(10.0, 20.0, 30.0, 40.0)
    }

    #[test]
    fn test_leaf_always_shows_own() {
        for is_control in [false, true] {
            for expanded in [false, true] {
                assert_eq!(display_value(false, is_control, expanded, own(), aggregate()), own());
            }
        }
    }

    #[test]
    fn test_collapsed_group_shows_aggregate() {
        assert_eq!(display_value(true, false, false, own(), aggregate()), aggregate());
    }

    #[test]
    fn test_expanded_group_shows_own() {
        assert_eq!(display_value(true, false, true, own(), aggregate()), own());
    }

    #[test]
    fn test_collapsed_control_shows_own() {
        assert_eq!(display_value(true, true, false, own(), aggregate()), own());
    }

    #[test]
    fn test_expanded_control_shows_zero() {
        assert_eq!(
            display_value(true, true, true, own(), aggregate()),
            MovementMetrics::default()
        );
    }

    #[test]
    fn test_projection_over_forest() {
        let mut forest = TreeBuilder::new(vec![
            AccountRecord::<MovementMetrics>::new(1, "1", "Root").with_metrics(movement(1.0, 0.0, 0.0, 0.0)),
            AccountRecord::new(2, "11", "AR")
                .with_parent(1)
                .with_metrics(movement(30.0, 0.0, 0.0, 0.0))
                .control(),
            AccountRecord::new(3, "111", "Customer")
                .with_parent(2)
                .with_metrics(movement(30.0, 0.0, 0.0, 0.0)),
        ])
        .build();
        RollupAggregator::new(&mut forest).process();

        let root = forest.node_id(AccountId(1)).unwrap();
        let ar = forest.node_id(AccountId(2)).unwrap();
        let customer = forest.node_id(AccountId(3)).unwrap();

        let mut state = ExpandState::new();
        let collapsed = DisplayProjector::new(&forest, &state).process();
        assert_eq!(collapsed.get(root), Some(movement(31.0, 0.0, 0.0, 0.0)));
        assert_eq!(collapsed.get(ar), Some(movement(30.0, 0.0, 0.0, 0.0)));

        state.toggle(&forest, root);
        state.toggle(&forest, ar);
        let expanded = DisplayProjector::new(&forest, &state).process();
        assert_eq!(expanded.get(root), Some(movement(1.0, 0.0, 0.0, 0.0)));
        assert_eq!(expanded.get(ar), Some(MovementMetrics::default()));
        assert_eq!(expanded.get(customer), Some(movement(30.0, 0.0, 0.0, 0.0)));

        // Same inputs, same output.
        assert_eq!(expanded, DisplayProjector::new(&forest, &state).process());
    }
}
