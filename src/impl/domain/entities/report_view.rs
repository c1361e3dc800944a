use crate::entities::{AccountCode, AccountId, Metrics, NodeId};

/// Display metrics for every node of a forest, indexed by `NodeId`.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayProjection<M: Metrics> {
    pub(crate) values: Vec<M>,
}

impl<M: Metrics> DisplayProjection<M> {
    pub fn get(&self, id: NodeId) -> Option<M> {
        self.values.get(id.0).copied()
    }
}

/// What the rendering layer asks for: an optional search term and a page.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewQuery {
    pub search: Option<String>,
    /// 1-based.
    pub page: usize,
    pub page_size: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde_derive::Serialize)]
pub enum ViewMode {
    /// Pre-order walk, children only under expanded nodes.
    Hierarchy,
    /// Every matching node, sorted by code, hierarchy ignored.
    Search,
}

#[derive(Debug, Clone, PartialEq, serde_derive::Serialize)]
pub struct ReportRow<M: Metrics> {
    pub node: NodeId,
    pub account_id: Option<AccountId>,
    pub code: AccountCode,
    pub name: String,
    pub level: usize,
    pub has_children: bool,
    pub expanded: bool,
    pub is_control: bool,
    pub display_metrics: M,
}

#[derive(Debug, Clone, PartialEq, serde_derive::Serialize)]
pub struct ReportTotals<M: Metrics> {
    /// Sum of display metrics over every row of the view, across all pages.
    pub displayed: M,
    /// Sum of own metrics over every leaf of the tree.
    pub leaves: M,
}

#[derive(Debug, Clone, PartialEq, serde_derive::Serialize)]
pub struct ReportPage<M: Metrics> {
    pub mode: ViewMode,
    pub rows: Vec<ReportRow<M>>,
    /// 1-based; 1 for an empty view.
    pub page: usize,
    pub page_count: usize,
    pub total_rows: usize,
    pub totals: ReportTotals<M>,
}

// --

impl Default for ViewQuery {
    fn default() -> Self {
        Self {
            search: None,
            page: 1,
            page_size: 50,
        }
    }
}

impl ViewQuery {
    /// The search term to apply, if any. Blank terms mean no search.
    pub(crate) fn normalized_search(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }
}

impl<M: Metrics> ReportPage<M> {
    pub fn empty(mode: ViewMode) -> Self {
        Self {
            mode,
            rows: Vec::new(),
            page: 1,
            page_count: 0,
            total_rows: 0,
            totals: ReportTotals {
                displayed: M::zero(),
                leaves: M::zero(),
            },
        }
    }
}
