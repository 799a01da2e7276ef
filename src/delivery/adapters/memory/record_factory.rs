//! In-memory record factory.

use crate::delivery::{
    domain::{PersistedRecord, RecordFields},
    ports::{RecordFactory, RecordFactoryError, RecordFactoryResult},
};
use mockable::{Clock, DefaultClock};
use std::fmt;
use std::sync::{Arc, RwLock};

/// Thread-safe in-memory record factory.
///
/// Records are kept in creation order. Clones share the same storage.
pub struct InMemoryRecordFactory<C = DefaultClock> {
    records: Arc<RwLock<Vec<PersistedRecord>>>,
    clock: Arc<C>,
}

impl InMemoryRecordFactory<DefaultClock> {
    /// Creates an empty factory stamping records with the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }
}

impl Default for InMemoryRecordFactory<DefaultClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> InMemoryRecordFactory<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty factory using `clock` for creation timestamps.
    #[must_use]
    pub fn with_clock(clock: Arc<C>) -> Self {
        Self {
            records: Arc::new(RwLock::new(Vec::new())),
            clock,
        }
    }

    /// Returns a snapshot of every stored record in creation order.
    ///
    /// # Errors
    ///
    /// Returns [`RecordFactoryError::Persistence`] when lock acquisition
    /// fails.
    pub fn records(&self) -> RecordFactoryResult<Vec<PersistedRecord>> {
        let records = self.records.read().map_err(|err| {
            RecordFactoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(records.clone())
    }
}

impl<C> Clone for InMemoryRecordFactory<C> {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<C> fmt::Debug for InMemoryRecordFactory<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryRecordFactory")
            .field("records", &self.records)
            .finish_non_exhaustive()
    }
}

impl<C> RecordFactory for InMemoryRecordFactory<C>
where
    C: Clock + Send + Sync,
{
    fn create(&self, fields: &RecordFields) -> RecordFactoryResult<PersistedRecord> {
        let record = PersistedRecord::new(fields.clone(), &*self.clock);
        let mut records = self.records.write().map_err(|err| {
            RecordFactoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        records.push(record.clone());
        Ok(record)
    }
}
