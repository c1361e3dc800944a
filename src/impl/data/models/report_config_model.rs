use std::str::FromStr;

use fractic_server_error::ServerError;
use iso_currency::Currency;

use crate::{
    entities::{ReportConfig, DEFAULT_PAGE_SIZE},
    errors::{InvalidIsoCurrencyCode, InvalidReportConfig, InvalidRon},
};

/// RON form of `ReportConfig`, e.g. `(page_size: 25, currency: Some("USD"))`.
/// Every field is optional.
#[derive(Debug, Default, serde_derive::Deserialize)]
#[serde(default)]
pub(crate) struct ReportConfigModel {
    page_size: Option<usize>,
    currency: Option<String>,
}

impl FromStr for ReportConfigModel {
    type Err = ServerError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ron::from_str(s).map_err(|e| InvalidRon::with_debug("ReportConfig", &e))
    }
}

impl TryFrom<ReportConfigModel> for ReportConfig {
    type Error = ServerError;
    fn try_from(model: ReportConfigModel) -> Result<Self, Self::Error> {
        let page_size = model.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        if page_size == 0 {
            return Err(InvalidReportConfig::new("page_size must be at least 1"));
        }
        let currency = model
            .currency
            .map(|code| {
                Currency::from_code(code.trim()).ok_or_else(|| InvalidIsoCurrencyCode::new(&code))
            })
            .transpose()?;
        Ok(ReportConfig {
            page_size,
            currency,
        })
    }
}

impl ReportConfig {
    pub fn from_ron(s: &str) -> Result<Self, ServerError> {
        ReportConfigModel::from_str(s)?.try_into()
    }
}
