use async_trait::async_trait;
use fractic_server_error::ServerError;

use crate::entities::{AccountRecord, Metrics};

/// Source of the flat account rows a report is built from.
#[async_trait]
pub trait AccountRowsRepository<M: Metrics>: Send + Sync {
    async fn load_account_rows(&self) -> Result<Vec<AccountRecord<M>>, ServerError>;
}
