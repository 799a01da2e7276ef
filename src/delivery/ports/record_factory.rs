//! Record factory port for persisting delivered mail.

use crate::delivery::domain::{PersistedRecord, RecordFields};
use std::sync::Arc;
use thiserror::Error;

/// Result type for record factory operations.
pub type RecordFactoryResult<T> = Result<T, RecordFactoryError>;

/// Persistence contract for mail records.
///
/// Implementations must be safe to call from concurrent deliveries.
pub trait RecordFactory: Send + Sync {
    /// Stores one record for a (sender, recipient) pair.
    ///
    /// # Errors
    ///
    /// Returns [`RecordFactoryError::InvalidRecord`] when the backend rejects
    /// the fields, or [`RecordFactoryError::Persistence`] when storage fails.
    fn create(&self, fields: &RecordFields) -> RecordFactoryResult<PersistedRecord>;
}

/// Errors returned by record factory implementations.
#[derive(Debug, Clone, Error)]
pub enum RecordFactoryError {
    /// The backend refused the record fields.
    #[error("invalid record: {0}")]
    InvalidRecord(String),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl RecordFactoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
