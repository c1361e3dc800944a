use fractic_server_error::ServerError;
use tracing::instrument;

use crate::{
    data::repositories::account_rows_repository_impl::AccountRowsRepositoryImpl,
    domain::{
        logic::{
            display_projector::DisplayProjector, opening_balance_editor::OpeningBalanceEditor,
            rollup_aggregator::RollupAggregator, row_view::RowView, tree_builder::TreeBuilder,
        },
        repositories::{
            account_rows_repository::AccountRowsRepository,
            opening_balance_repository::OpeningBalanceRepository,
        },
    },
    entities::{
        AccountForest, AccountRecord, DisplayProjection, ExpandState, Metrics, NodeId,
        OpeningBalanceEdit, ReportConfig, ReportPage, ViewQuery,
    },
    errors::OpeningBalancePersistFailed,
    ext::in_memory::InMemoryOpeningBalances,
};

/// Identifies one load request. Later requests get larger tickets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    /// A newer request had already been applied; this response was dropped.
    Stale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    NotLoaded,
    Loaded,
    /// The last applied load failed. There is no tree until the next
    /// successful load.
    Failed,
}

/// State of one report screen: the account tree, what is expanded, the
/// search term and the current page.
///
/// All tree work is synchronous; only loading rows and saving opening
/// balances go through the (async) collaborators.
pub struct ReportSession<
    M,
    R1 = AccountRowsRepositoryImpl<M>, // Default.
    R2 = InMemoryOpeningBalances,      // Default.
> where
    M: Metrics,
    R1: AccountRowsRepository<M>,
    R2: OpeningBalanceRepository,
{
    rows_repository: R1,
    opening_balance_repository: R2,
    config: ReportConfig,
    forest: AccountForest<M>,
    expand_state: ExpandState,
    projection: DisplayProjection<M>,
    search: Option<String>,
    page: usize,
    state: LoadState,
    issued: u64,
    applied: Option<LoadTicket>,
}

impl<M, R1, R2> ReportSession<M, R1, R2>
where
    M: Metrics,
    R1: AccountRowsRepository<M>,
    R2: OpeningBalanceRepository,
{
    pub fn new(rows_repository: R1, opening_balance_repository: R2, config: ReportConfig) -> Self {
        Self {
            rows_repository,
            opening_balance_repository,
            config,
            forest: AccountForest::empty(),
            expand_state: ExpandState::new(),
            projection: DisplayProjection { values: Vec::new() },
            search: None,
            page: 1,
            state: LoadState::NotLoaded,
            issued: 0,
            applied: None,
        }
    }

    // Loading.
    // ---

    #[instrument(name = "ledger_rollup.report_session.reload", skip_all)]
    pub async fn reload(&mut self) -> Result<LoadOutcome, ServerError> {
        let ticket = self.begin_reload();
        let result = self.rows_repository.load_account_rows().await;
        self.finish_reload(ticket, result)
    }

    /// Starts a load whose rows will be fetched by the caller (for example
    /// through `rows_repository()`), possibly overlapping other loads.
    pub fn begin_reload(&mut self) -> LoadTicket {
        self.issued += 1;
        LoadTicket(self.issued)
    }

    /// Applies the outcome of a load started with `begin_reload`. Responses
    /// older than the last applied one are ignored, whether they succeeded
    /// or not.
    pub fn finish_reload(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<AccountRecord<M>>, ServerError>,
    ) -> Result<LoadOutcome, ServerError> {
        if self.applied.is_some_and(|applied| ticket <= applied) {
            tracing::debug!(ticket = ticket.0, "ignoring stale account rows response");
            return Ok(LoadOutcome::Stale);
        }
        self.applied = Some(ticket);
        self.expand_state.collapse_all();
        self.page = 1;

        match result {
            Ok(records) => {
                let row_count = records.len();
                self.forest = TreeBuilder::new(records).build();
                self.state = LoadState::Loaded;
                self.recompute();
                tracing::info!(
                    rows = row_count,
                    nodes = self.forest.len(),
                    roots = self.forest.roots().len(),
                    repaired = self.forest.notes().len(),
                    "loaded account tree"
                );
                Ok(LoadOutcome::Applied)
            }
            Err(e) => {
                self.forest = AccountForest::empty();
                self.state = LoadState::Failed;
                self.reproject();
                tracing::warn!("failed to load account rows");
                Err(e)
            }
        }
    }

    // Interaction.
    // ---

    /// Flips a node between expanded and collapsed. No-op for leaves.
    pub fn toggle(&mut self, node: NodeId) -> bool {
        let changed = self.expand_state.toggle(&self.forest, node);
        if changed {
            tracing::debug!(node = %node, "toggled node");
            self.page = 1;
            self.reproject();
        }
        changed
    }

    pub fn set_expanded(&mut self, node: NodeId, expanded: bool) -> bool {
        let changed = self.expand_state.set_expanded(&self.forest, node, expanded);
        if changed {
            self.page = 1;
            self.reproject();
        }
        changed
    }

    pub fn expand_all(&mut self) {
        self.expand_state.expand_all(&self.forest);
        self.page = 1;
        self.reproject();
    }

    pub fn collapse_all(&mut self) {
        self.expand_state.collapse_all();
        self.page = 1;
        self.reproject();
    }

    /// Expands all ancestors of a node so it shows up in the hierarchy.
    pub fn reveal(&mut self, node: NodeId) {
        self.expand_state.reveal(&self.forest, node);
        self.page = 1;
        self.reproject();
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        let term = Some(term.into()).filter(|t| !t.trim().is_empty());
        if term != self.search {
            tracing::debug!(term = ?term, "search changed");
            self.search = term;
            self.page = 1;
        }
    }

    pub fn clear_search(&mut self) {
        self.set_search("");
    }

    /// 1-based. Pages past the end show the last page.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.config.page_size = page_size.max(1);
        self.page = 1;
    }

    // Opening balances.
    // ---

    /// Changes a leaf account's opening balance, persists it, and refreshes
    /// all rollups. If persisting fails the previous value is restored and
    /// the error returned; invalid edits are rejected before anything
    /// changes.
    #[instrument(name = "ledger_rollup.report_session.edit_opening_balance", skip_all, fields(node = %node))]
    pub async fn edit_opening_balance(
        &mut self,
        node: NodeId,
        edit: OpeningBalanceEdit,
    ) -> Result<(), ServerError> {
        let applied = OpeningBalanceEditor::new(&mut self.forest).apply(node, &edit)?;
        match self
            .opening_balance_repository
            .save_opening_balance(&applied.update)
            .await
        {
            Ok(()) => {
                self.recompute();
                tracing::info!(account_id = %applied.update.account_id, "saved opening balance");
                Ok(())
            }
            Err(e) => {
                OpeningBalanceEditor::new(&mut self.forest).revert(&applied);
                let code = self
                    .forest
                    .node(node)
                    .map(|n| n.code().to_string())
                    .unwrap_or_default();
                tracing::warn!(account_id = %applied.update.account_id, "failed to save opening balance, reverted");
                Err(OpeningBalancePersistFailed::with_debug(&code, &e))
            }
        }
    }

    // Output.
    // ---

    pub fn page(&self) -> ReportPage<M> {
        RowView::new(&self.forest, &self.projection, &self.expand_state).page(&ViewQuery {
            search: self.search.clone(),
            page: self.page,
            page_size: self.config.page_size,
        })
    }

    pub fn forest(&self) -> &AccountForest<M> {
        &self.forest
    }

    pub fn expand_state(&self) -> &ExpandState {
        &self.expand_state
    }

    pub fn projection(&self) -> &DisplayProjection<M> {
        &self.projection
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    pub fn rows_repository(&self) -> &R1 {
        &self.rows_repository
    }

    fn recompute(&mut self) {
        RollupAggregator::new(&mut self.forest).process();
        self.reproject();
    }

    fn reproject(&mut self) {
        self.projection = DisplayProjector::new(&self.forest, &self.expand_state).process();
    }
}
