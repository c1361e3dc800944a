use crate::{
    entities::{MetricField, Metrics, MovementMetrics, OpeningClosingMetrics, ReportConfig},
    usecases::ReportSession,
};

pub type ChartOfAccountsSession<R1, R2> = ReportSession<OpeningClosingMetrics, R1, R2>;
pub type TrialBalanceSession<R1, R2> = ReportSession<OpeningClosingMetrics, R1, R2>;
pub type GeneralLedgerSession<R1, R2> = ReportSession<MovementMetrics, R1, R2>;

/// The report screens built on the rollup engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportScreen {
    ChartOfAccounts,
    GeneralLedger,
    TrialBalance,
}

impl ReportScreen {
    pub fn title(&self) -> &'static str {
        match self {
            ReportScreen::ChartOfAccounts => "Chart of Accounts",
            ReportScreen::GeneralLedger => "General Ledger",
            ReportScreen::TrialBalance => "Trial Balance",
        }
    }

    /// Metric columns of the screen, in display order.
    pub fn fields(&self) -> &'static [MetricField] {
        match self {
            ReportScreen::ChartOfAccounts | ReportScreen::TrialBalance => {
                OpeningClosingMetrics::FIELDS
            }
            ReportScreen::GeneralLedger => MovementMetrics::FIELDS,
        }
    }

    pub fn default_config(&self) -> ReportConfig {
        match self {
            ReportScreen::ChartOfAccounts => ReportConfig::default(),
            // Ledgers are long; show more per page.
            ReportScreen::GeneralLedger => ReportConfig {
                page_size: 100,
                ..ReportConfig::default()
            },
            ReportScreen::TrialBalance => ReportConfig::default(),
        }
    }
}
