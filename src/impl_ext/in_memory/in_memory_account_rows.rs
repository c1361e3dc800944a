use std::sync::{
    atomic::{AtomicBool, Ordering},
    Mutex,
};

use async_trait::async_trait;
use fractic_server_error::{CriticalError, ServerError};

use crate::{
    entities::{AccountRecord, Metrics},
    errors::AccountRowsLoadFailed,
    repositories::AccountRowsRepository,
};

/// Serves a fixed set of rows. Useful for tests and for screens whose rows
/// were fetched elsewhere.
pub struct InMemoryAccountRows<M: Metrics> {
    records: Mutex<Vec<AccountRecord<M>>>,
    fail: AtomicBool,
}

impl<M: Metrics> InMemoryAccountRows<M> {
    pub fn new(records: Vec<AccountRecord<M>>) -> Self {
        Self {
            records: Mutex::new(records),
            fail: AtomicBool::new(false),
        }
    }

    /// Rows served by subsequent loads.
    pub fn replace(&self, records: Vec<AccountRecord<M>>) {
        if let Ok(mut current) = self.records.lock() {
            *current = records;
        }
    }

    pub fn fail_next_loads(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl<M: Metrics> AccountRowsRepository<M> for InMemoryAccountRows<M> {
    async fn load_account_rows(&self) -> Result<Vec<AccountRecord<M>>, ServerError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(AccountRowsLoadFailed::new("in-memory source set to fail"));
        }
        self.records
            .lock()
            .map(|records| records.clone())
            .map_err(|e| CriticalError::with_debug("account rows lock poisoned", &e))
    }
}
