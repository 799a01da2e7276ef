//! Delivery method port used for chained delivery.

use crate::delivery::domain::MailMessage;
use std::sync::Arc;
use thiserror::Error;

/// Result type for delivery method operations.
pub type DeliveryMethodResult<T> = Result<T, DeliveryMethodError>;

/// A mechanism that takes an outbound message the rest of the way, such as
/// an SMTP transport, a file drop or a test mailbox.
///
/// Each implementation carries its own settings; callers only hand over the
/// message.
pub trait DeliveryMethod: Send + Sync {
    /// Delivers the message.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryMethodError`] when the message could not be
    /// delivered.
    fn deliver(&self, message: &MailMessage) -> DeliveryMethodResult<()>;
}

/// Errors returned by delivery method implementations.
#[derive(Debug, Clone, Error)]
pub enum DeliveryMethodError {
    /// The method is not able to accept messages right now.
    #[error("delivery method unavailable: {0}")]
    Unavailable(String),

    /// The method tried and failed to deliver the message.
    #[error("delivery rejected: {0}")]
    Rejected(Arc<dyn std::error::Error + Send + Sync>),
}

impl DeliveryMethodError {
    /// Wraps the error that caused delivery to fail.
    pub fn rejected(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Rejected(Arc::new(err))
    }
}
