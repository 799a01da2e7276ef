//! In-memory delivery method that collects delivered messages.

use crate::delivery::{
    domain::MailMessage,
    ports::{DeliveryMethod, DeliveryMethodError, DeliveryMethodResult},
};
use std::sync::{Arc, RwLock};

/// Delivery method that keeps every delivered message in memory.
///
/// Useful as the chained target in tests, where the collected messages
/// stand in for what a real transport would have sent.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMailbox {
    deliveries: Arc<RwLock<Vec<MailMessage>>>,
}

impl InMemoryMailbox {
    /// Creates an empty mailbox.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of delivered messages in delivery order.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryMethodError::Unavailable`] when lock acquisition
    /// fails.
    pub fn deliveries(&self) -> DeliveryMethodResult<Vec<MailMessage>> {
        let deliveries = self
            .deliveries
            .read()
            .map_err(|err| DeliveryMethodError::Unavailable(err.to_string()))?;
        Ok(deliveries.clone())
    }

    /// Discards all delivered messages.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryMethodError::Unavailable`] when lock acquisition
    /// fails.
    pub fn clear(&self) -> DeliveryMethodResult<()> {
        self.deliveries
            .write()
            .map_err(|err| DeliveryMethodError::Unavailable(err.to_string()))?
            .clear();
        Ok(())
    }
}

impl DeliveryMethod for InMemoryMailbox {
    fn deliver(&self, message: &MailMessage) -> DeliveryMethodResult<()> {
        let mut deliveries = self
            .deliveries
            .write()
            .map_err(|err| DeliveryMethodError::Unavailable(err.to_string()))?;
        deliveries.push(message.clone());
        Ok(())
    }
}
