use fractic_server_error::ServerError;

use crate::{
    domain::logic::{
        display_projector::DisplayProjector, rollup_aggregator::RollupAggregator,
        row_view::RowView, tree_builder::TreeBuilder,
    },
    entities::{
        AccountForest, AccountRecord, ExpandState, Metrics, ReportConfig, ReportPage, ViewQuery,
    },
    presentation::report_printer::ReportPrinter,
    repositories::{
        AccountRowsRepository, AccountRowsRepositoryImpl, AccountRowsSource,
        OpeningBalanceRepository,
    },
    usecases::ReportSession,
};

pub type RenderedPage = String;

pub struct LedgerRollupUtil<M: Metrics> {
    config: ReportConfig,
    printer: ReportPrinter,
    _phantom: std::marker::PhantomData<M>,
}

impl<M: Metrics> LedgerRollupUtil<M> {
    pub fn new(config: ReportConfig) -> Self {
        Self {
            printer: ReportPrinter::new(&config),
            config,
            _phantom: std::marker::PhantomData,
        }
    }

    /// Builds the tree and computes all rollups.
    pub fn build(&self, records: Vec<AccountRecord<M>>) -> AccountForest<M> {
        let mut forest = TreeBuilder::new(records).build();
        RollupAggregator::new(&mut forest).process();
        forest
    }

    pub async fn from_source(
        &self,
        source: AccountRowsSource,
    ) -> Result<AccountForest<M>, ServerError> {
        let records = AccountRowsRepositoryImpl::new(source)
            .load_account_rows()
            .await?;
        Ok(self.build(records))
    }

    /// Page of rows for the given expand state and search, along with its
    /// text rendering. The query's page size is taken from the config.
    pub fn render(
        &self,
        forest: &AccountForest<M>,
        expand_state: &ExpandState,
        search: Option<&str>,
        page: usize,
    ) -> (ReportPage<M>, RenderedPage) {
        let projection = DisplayProjector::new(forest, expand_state).process();
        let page = RowView::new(forest, &projection, expand_state).page(&ViewQuery {
            search: search.map(str::to_string),
            page,
            page_size: self.config.page_size,
        });
        let rendered = self.printer.print_page(&page);
        (page, rendered)
    }

    /// Interactive session backed by the given collaborators.
    pub fn session<R1, R2>(
        &self,
        rows_repository: R1,
        opening_balance_repository: R2,
    ) -> ReportSession<M, R1, R2>
    where
        R1: AccountRowsRepository<M>,
        R2: OpeningBalanceRepository,
    {
        ReportSession::new(
            rows_repository,
            opening_balance_repository,
            self.config.clone(),
        )
    }
}
