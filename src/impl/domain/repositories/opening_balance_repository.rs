use async_trait::async_trait;
use fractic_server_error::ServerError;

use crate::entities::OpeningBalanceUpdate;

/// Persists edited opening balances. Implemented by the client, typically
/// as a call to the report service.
#[async_trait]
pub trait OpeningBalanceRepository: Send + Sync {
    async fn save_opening_balance(&self, update: &OpeningBalanceUpdate) -> Result<(), ServerError>;
}
