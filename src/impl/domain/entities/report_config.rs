use iso_currency::Currency;

pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Per-screen settings of a report.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportConfig {
    /// Rows per page; always at least 1.
    pub page_size: usize,
    /// Used for amount formatting only. Without a currency, amounts are
    /// printed with two decimal places.
    pub currency: Option<Currency>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            currency: None,
        }
    }
}
