//! Host-side entry point applying the error propagation policy.

use super::registry::{DeliveryMethodRegistry, RegistryError};
use crate::delivery::{
    domain::{DeliveryMethodName, MailMessage},
    ports::{DeliveryMethod, DeliveryMethodResult},
};
use std::fmt;
use std::sync::Arc;
use tracing::warn;

/// Sends messages through the selected delivery method.
///
/// Delivery methods always report failures; whether those reach the
/// caller is decided here by `raise_delivery_errors`, which defaults to
/// `true`.
#[derive(Clone)]
pub struct Mailer {
    method_name: Option<DeliveryMethodName>,
    method: Arc<dyn DeliveryMethod>,
    raise_delivery_errors: bool,
}

impl Mailer {
    /// Creates a mailer for an explicit delivery method.
    #[must_use]
    pub fn new(method: Arc<dyn DeliveryMethod>) -> Self {
        Self {
            method_name: None,
            method,
            raise_delivery_errors: true,
        }
    }

    /// Creates a mailer for the method registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownDeliveryMethod`] when nothing is
    /// registered under the name.
    pub fn from_registry(
        methods: &DeliveryMethodRegistry,
        name: &DeliveryMethodName,
    ) -> Result<Self, RegistryError> {
        let method = methods.resolve(name)?;
        Ok(Self {
            method_name: Some(name.clone()),
            ..Self::new(method)
        })
    }

    /// Sets whether delivery failures are returned to the caller.
    #[must_use]
    pub const fn raise_delivery_errors(mut self, raise: bool) -> Self {
        self.raise_delivery_errors = raise;
        self
    }

    /// Delivers `message`.
    ///
    /// # Errors
    ///
    /// Returns the delivery method's error when `raise_delivery_errors` is
    /// set; otherwise failures are logged and `Ok(())` is returned.
    pub fn deliver(&self, message: &MailMessage) -> DeliveryMethodResult<()> {
        match self.method.deliver(message) {
            Err(err) if !self.raise_delivery_errors => {
                warn!(
                    error = %err,
                    method = self.method_name.as_ref().map(DeliveryMethodName::as_str),
                    message_id = message.message_id(),
                    "delivery failed, error suppressed"
                );
                Ok(())
            }
            result => result,
        }
    }
}

impl fmt::Debug for Mailer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mailer")
            .field("method_name", &self.method_name)
            .field("raise_delivery_errors", &self.raise_delivery_errors)
            .finish_non_exhaustive()
    }
}
