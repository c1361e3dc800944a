use async_trait::async_trait;
use fractic_server_error::ServerError;

use crate::{
    data::models::raw_account_row_model::{RawAccountRowModel, RawValue},
    entities::{AccountRecord, Metrics},
    errors::{InvalidCsv, ReadError},
};

#[async_trait]
pub(crate) trait AccountRowsCsvDatasource<M: Metrics>: Send + Sync {
    fn from_string(&self, s: &str) -> Result<Vec<AccountRecord<M>>, ServerError>;

    async fn from_file<P>(&self, path: P) -> Result<Vec<AccountRecord<M>>, ServerError>
    where
        P: AsRef<std::path::Path> + Send;
}

pub(crate) struct AccountRowsCsvDatasourceImpl<M: Metrics> {
    _phantom: std::marker::PhantomData<M>,
}

impl<M: Metrics> AccountRowsCsvDatasourceImpl<M> {
    pub(crate) fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

#[async_trait]
impl<M: Metrics> AccountRowsCsvDatasource<M> for AccountRowsCsvDatasourceImpl<M> {
    fn from_string(&self, s: &str) -> Result<Vec<AccountRecord<M>>, ServerError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(s.as_bytes());
        let headers = reader
            .headers()
            .map_err(|e| InvalidCsv::with_debug(&e))?
            .clone();
        reader
            .records()
            .map(|r| {
                r.map_err(|e| InvalidCsv::with_debug(&e)).and_then(|r| {
                    let mut row = RawAccountRowModel::new();
                    for (header, cell) in headers.iter().zip(r.iter()) {
                        row.insert(header, RawValue::Text(cell.to_string()));
                    }
                    row.into_record()
                })
            })
            .collect()
    }

    async fn from_file<P>(&self, path: P) -> Result<Vec<AccountRecord<M>>, ServerError>
    where
        P: AsRef<std::path::Path> + Send,
    {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ReadError::with_debug(&e))?;
        self.from_string(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{opening_closing, AccountId, OpeningClosingMetrics, ParentRef};

    #[test]
    fn test_reads_rows_with_any_header_casing() {
        let csv = "\
HeadId,HeadCode,HeadName,ParentHead,IsControl,Opening Debit,Opening Credit,Closing Debit,Closing Credit
1,1000,Assets,0,false,,,,
2,1100,Receivables,1,true,\"1,500.00\",0,1500,0
3,1101,Customer A,2,false,1500,0,1500,0
";
        let records = AccountRowsCsvDatasourceImpl::<OpeningClosingMetrics>::new()
            .from_string(csv)
            .unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].parent, ParentRef::Root);
        assert_eq!(records[1].id, Some(AccountId(2)));
        assert!(records[1].is_control);
        assert_eq!(
            records[1].own_metrics,
            opening_closing(1500.0, 0.0, 1500.0, 0.0)
        );
        assert_eq!(records[2].name, "Customer A");
    }

    #[test]
    fn test_bad_amount_fails_whole_load() {
        let csv = "id,code,openingDebit\n1,1000,abc\n";
        let result =
            AccountRowsCsvDatasourceImpl::<OpeningClosingMetrics>::new().from_string(csv);
        assert!(result.is_err());
    }
}
