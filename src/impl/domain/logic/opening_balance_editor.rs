use fractic_server_error::ServerError;

use crate::{
    entities::{AccountForest, Metrics, NodeId, OpeningBalanceEdit, OpeningBalanceUpdate},
    errors::{
        EditEmpty, EditFieldNotEditable, EditInvalidValue, EditTargetHasNoId, EditTargetNotFound,
        EditTargetNotLeaf,
    },
};

/// An opening balance edit that has been checked against the forest and
/// applied in memory. Keeps the previous values so the caller can revert if
/// persisting fails.
#[derive(Debug)]
pub(crate) struct AppliedEdit<M: Metrics> {
    pub(crate) node: NodeId,
    pub(crate) previous: M,
    pub(crate) update: OpeningBalanceUpdate,
}

pub(crate) struct OpeningBalanceEditor<'a, M: Metrics> {
    forest: &'a mut AccountForest<M>,
}

impl<'a, M: Metrics> OpeningBalanceEditor<'a, M> {
    pub(crate) fn new(forest: &'a mut AccountForest<M>) -> Self {
        Self { forest }
    }

    /// Validates the edit and, only if it is valid, writes the new values
    /// into the node's own metrics. Aggregates are not touched.
    pub(crate) fn apply(
        self,
        node: NodeId,
        edit: &OpeningBalanceEdit,
    ) -> Result<AppliedEdit<M>, ServerError> {
        let target = self
            .forest
            .node_mut(node)
            .ok_or_else(|| EditTargetNotFound::new(&node))?;
        let code = target.record.code.0.clone();
        if target.has_children() {
            return Err(EditTargetNotLeaf::new(&code));
        }
        let account_id = target.record.id.ok_or_else(|| EditTargetHasNoId::new(&code))?;
        if edit.values.is_empty() {
            return Err(EditEmpty::new());
        }
        for (field, value) in &edit.values {
            if !M::EDITABLE.contains(field) {
                return Err(EditFieldNotEditable::new(field));
            }
            if !value.is_finite() || *value < 0.0 {
                return Err(EditInvalidValue::new(field, *value));
            }
        }

        let previous = target.record.own_metrics;
        let mut updated = previous;
        for (field, value) in &edit.values {
            updated.set(*field, *value);
        }
        target.record.own_metrics = updated;

        Ok(AppliedEdit {
            node,
            previous,
            update: OpeningBalanceUpdate {
                account_id,
                values: edit.values.clone(),
            },
        })
    }

    pub(crate) fn revert(self, applied: &AppliedEdit<M>) {
        if let Some(target) = self.forest.node_mut(applied.node) {
            target.record.own_metrics = applied.previous;
        }
    }
}
