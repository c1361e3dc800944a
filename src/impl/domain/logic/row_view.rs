use crate::entities::{
    AccountForest, DisplayProjection, ExpandState, Metrics, NodeId, ReportPage, ReportRow,
    ReportTotals, ViewMode, ViewQuery,
};

use super::utils::{compare_codes, contains_lowercase};

/// Produces the rows to render: either the visible part of the hierarchy or
/// a flat search result, then cut to the requested page.
pub struct RowView<'a, M: Metrics> {
    forest: &'a AccountForest<M>,
    projection: &'a DisplayProjection<M>,
    expand_state: &'a ExpandState,
}

impl<'a, M: Metrics> RowView<'a, M> {
    pub fn new(
        forest: &'a AccountForest<M>,
        projection: &'a DisplayProjection<M>,
        expand_state: &'a ExpandState,
    ) -> Self {
        Self {
            forest,
            projection,
            expand_state,
        }
    }

    /// Pre-order walk from the roots, descending only into expanded nodes.
    pub fn visible_nodes(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.forest.roots().iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            if self.expand_state.is_expanded(id) {
                if let Some(node) = self.forest.node(id) {
                    stack.extend(node.children().iter().rev().copied());
                }
            }
        }
        out
    }

    /// Every node whose code or name contains the (lowercase) term, sorted by
    /// code. Depth and expand state play no role.
    pub fn search_nodes(&self, term: &str) -> Vec<NodeId> {
        let mut matches: Vec<NodeId> = self
            .forest
            .nodes()
            .filter(|(_, n)| {
                contains_lowercase(n.code().as_str(), term) || contains_lowercase(n.name(), term)
            })
            .map(|(id, _)| id)
            .collect();
        matches.sort_by(|a, b| {
            // Both ids come from the forest, so lookups cannot fail.
            match (self.forest.node(*a), self.forest.node(*b)) {
                (Some(x), Some(y)) => compare_codes(x.code(), y.code()),
                _ => a.cmp(b),
            }
        });
        matches
    }

    pub fn page(&self, query: &ViewQuery) -> ReportPage<M> {
        let (mode, ids) = match query.normalized_search() {
            Some(term) => (ViewMode::Search, self.search_nodes(&term)),
            None => (ViewMode::Hierarchy, self.visible_nodes()),
        };
        let rows: Vec<ReportRow<M>> = ids.into_iter().filter_map(|id| self.row(id)).collect();

        let displayed = rows
            .iter()
            .fold(M::zero(), |acc, row| acc + row.display_metrics);
        let totals = ReportTotals {
            displayed,
            leaves: self.leaf_totals(),
        };

        let total_rows = rows.len();
        let page_size = query.page_size.max(1);
        let page_count = total_rows.div_ceil(page_size);
        let page = query.page.clamp(1, page_count.max(1));
        let rows = rows
            .into_iter()
            .skip((page - 1) * page_size)
            .take(page_size)
            .collect();

        ReportPage {
            mode,
            rows,
            page,
            page_count,
            total_rows,
            totals,
        }
    }

    fn row(&self, id: NodeId) -> Option<ReportRow<M>> {
        let node = self.forest.node(id)?;
        Some(ReportRow {
            node: id,
            account_id: node.id(),
            code: node.code().clone(),
            name: node.name().to_string(),
            level: node.level(),
            has_children: node.has_children(),
            expanded: node.has_children() && self.expand_state.is_expanded(id),
            is_control: node.is_control(),
            display_metrics: self.projection.get(id).unwrap_or_else(M::zero),
        })
    }

    fn leaf_totals(&self) -> M {
        self.forest
            .nodes()
            .filter(|(_, n)| !n.has_children())
            .fold(M::zero(), |acc, (_, n)| acc + n.own_metrics())
    }
}
