use std::path::PathBuf;

use async_trait::async_trait;
use fractic_server_error::ServerError;

use crate::{
    data::datasources::{
        account_rows_csv_datasource::{AccountRowsCsvDatasource, AccountRowsCsvDatasourceImpl},
        account_rows_json_datasource::{AccountRowsJsonDatasource, AccountRowsJsonDatasourceImpl},
    },
    domain::repositories::account_rows_repository::AccountRowsRepository,
    entities::{AccountRecord, Metrics},
    errors::AccountRowsLoadFailed,
};

/// Where a report's flat rows come from.
#[derive(Debug, Clone)]
pub enum AccountRowsSource {
    CsvString(String),
    CsvFile(PathBuf),
    JsonString(String),
    JsonFile(PathBuf),
}

impl AccountRowsSource {
    fn describe(&self) -> String {
        match self {
            AccountRowsSource::CsvString(_) => "CSV string".to_string(),
            AccountRowsSource::CsvFile(p) => format!("CSV file '{}'", p.display()),
            AccountRowsSource::JsonString(_) => "JSON string".to_string(),
            AccountRowsSource::JsonFile(p) => format!("JSON file '{}'", p.display()),
        }
    }
}

pub struct AccountRowsRepositoryImpl<M: Metrics> {
    source: AccountRowsSource,
    csv_datasource: AccountRowsCsvDatasourceImpl<M>,
    json_datasource: AccountRowsJsonDatasourceImpl<M>,
}

impl<M: Metrics> AccountRowsRepositoryImpl<M> {
    pub fn new(source: AccountRowsSource) -> Self {
        Self {
            source,
            csv_datasource: AccountRowsCsvDatasourceImpl::new(),
            json_datasource: AccountRowsJsonDatasourceImpl::new(),
        }
    }
}

#[async_trait]
impl<M: Metrics> AccountRowsRepository<M> for AccountRowsRepositoryImpl<M> {
    async fn load_account_rows(&self) -> Result<Vec<AccountRecord<M>>, ServerError> {
        let result = match &self.source {
            AccountRowsSource::CsvString(s) => self.csv_datasource.from_string(s),
            AccountRowsSource::CsvFile(p) => self.csv_datasource.from_file(p).await,
            AccountRowsSource::JsonString(s) => self.json_datasource.from_string(s),
            AccountRowsSource::JsonFile(p) => self.json_datasource.from_file(p).await,
        };
        result.map_err(|e| AccountRowsLoadFailed::with_debug(&self.source.describe(), &e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::OpeningClosingMetrics;

    #[tokio::test]
    async fn test_loads_from_csv_string() {
        let repo = AccountRowsRepositoryImpl::<OpeningClosingMetrics>::new(
            AccountRowsSource::CsvString("id,code,name\n1,1000,Cash\n".into()),
        );
        let rows = repo.load_account_rows().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Cash");
    }

    #[tokio::test]
    async fn test_missing_file_is_a_load_error() {
        let repo = AccountRowsRepositoryImpl::<OpeningClosingMetrics>::new(
            AccountRowsSource::JsonFile("/nonexistent/rows.json".into()),
        );
        assert!(repo.load_account_rows().await.is_err());
    }
}
