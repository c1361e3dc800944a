use std::sync::{
    atomic::{AtomicBool, Ordering},
    Mutex,
};

use async_trait::async_trait;
use fractic_server_error::{CriticalError, ServerError};

use crate::{
    entities::OpeningBalanceUpdate, errors::OpeningBalancePersistFailed,
    repositories::OpeningBalanceRepository,
};

/// Records saved opening balances in memory.
#[derive(Default)]
pub struct InMemoryOpeningBalances {
    saved: Mutex<Vec<OpeningBalanceUpdate>>,
    fail: AtomicBool,
}

impl InMemoryOpeningBalances {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every update saved so far, oldest first.
    pub fn saved(&self) -> Vec<OpeningBalanceUpdate> {
        self.saved
            .lock()
            .map(|saved| saved.clone())
            .unwrap_or_default()
    }

    pub fn fail_next_saves(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl OpeningBalanceRepository for InMemoryOpeningBalances {
    async fn save_opening_balance(&self, update: &OpeningBalanceUpdate) -> Result<(), ServerError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(OpeningBalancePersistFailed::new(
                &update.account_id.to_string(),
            ));
        }
        self.saved
            .lock()
            .map(|mut saved| saved.push(update.clone()))
            .map_err(|e| CriticalError::with_debug("opening balance lock poisoned", &e))
    }
}
