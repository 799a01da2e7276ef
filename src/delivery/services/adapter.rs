//! Delivery method that persists messages through a record factory.
//!
//! Provides [`DeliveryAdapter`], which validates a message, resolves the
//! configured factory, stores one record per sender and recipient pair and
//! optionally chains the message to a second delivery method.

use super::{
    config::DeliveryConfig,
    registry::{DeliveryMethodRegistry, InvalidFactoryReason, RecordFactoryRegistry, RegistryError},
};
use crate::delivery::{
    domain::{AddressField, DeliveryMethodName, FactoryReference, MailMessage, RecordFields},
    ports::{
        DeliveryMethod, DeliveryMethodError, DeliveryMethodResult, RecordFactory,
        RecordFactoryError,
    },
};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info_span, warn};

/// Errors returned by [`DeliveryAdapter::deliver`].
#[derive(Debug, Clone, Error)]
pub enum DeliveryError {
    /// A required address header is absent or empty.
    #[error("'{0}' address is required")]
    MissingField(AddressField),

    /// An address header failed upstream syntax validation.
    #[error("invalid address in '{field}': {detail}")]
    InvalidAddress {
        /// The offending header.
        field: AddressField,
        /// Parser detail, or a generic message when none was attached.
        detail: String,
    },

    /// The configured factory cannot be used for persistence.
    #[error("configured factory '{reference}' is not valid: {reason}")]
    InvalidFactory {
        /// The configured reference.
        reference: FactoryReference,
        /// Why resolution failed.
        reason: InvalidFactoryReason,
    },

    /// The record factory failed; passed through unchanged.
    #[error(transparent)]
    Persistence(#[from] RecordFactoryError),

    /// The chained delivery method failed; passed through unchanged.
    #[error(transparent)]
    Chained(#[from] DeliveryMethodError),
}

/// Result type for delivery operations.
pub type DeliveryResult<T> = Result<T, DeliveryError>;

/// Chained delivery method resolved when the adapter is built.
#[derive(Clone)]
struct ChainTarget {
    name: DeliveryMethodName,
    method: Arc<dyn DeliveryMethod>,
}

/// Persisting delivery method.
///
/// Holds no mutable state: concurrent deliveries of different messages
/// share nothing but the read-only configuration and registry.
#[derive(Clone)]
pub struct DeliveryAdapter {
    config: DeliveryConfig,
    factories: Arc<RecordFactoryRegistry>,
    chain: Option<ChainTarget>,
}

impl DeliveryAdapter {
    /// Creates an adapter, resolving the chained delivery method once.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownDeliveryMethod`] when the configured
    /// chain method is not registered.
    pub fn new(
        config: DeliveryConfig,
        factories: Arc<RecordFactoryRegistry>,
        methods: &DeliveryMethodRegistry,
    ) -> Result<Self, RegistryError> {
        let chain = config
            .chain_delivery_method()
            .map(|name| {
                methods.resolve(name).map(|method| ChainTarget {
                    name: name.clone(),
                    method,
                })
            })
            .transpose()?;

        Ok(Self {
            config,
            factories,
            chain,
        })
    }

    /// Returns the adapter configuration.
    #[must_use]
    pub const fn config(&self) -> &DeliveryConfig {
        &self.config
    }

    /// Persists `message` and chains it when configured and accepted.
    ///
    /// Records already created stay in place when a later pair fails.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryError::MissingField`] or
    /// [`DeliveryError::InvalidAddress`] when validation fails,
    /// [`DeliveryError::InvalidFactory`] when the factory does not resolve,
    /// and passes factory or chained delivery failures through as
    /// [`DeliveryError::Persistence`] and [`DeliveryError::Chained`].
    pub fn deliver(&self, message: &MailMessage) -> DeliveryResult<()> {
        let span = info_span!(
            "deliver",
            factory = %self.config.factory(),
            message_id = message.message_id(),
            senders = message.senders().len(),
            recipients = message.recipients().len(),
        );
        let _entered = span.enter();

        let recipients = check_delivery_params(message).inspect_err(|err| {
            warn!(error = %err, "rejecting message");
        })?;
        let factory = self.resolve_factory().inspect_err(|err| {
            warn!(error = %err, "record factory unavailable");
        })?;

        persist(factory.as_ref(), message, &recipients)?;
        self.chain_delivery(message)
    }

    fn resolve_factory(&self) -> DeliveryResult<Arc<dyn RecordFactory>> {
        let reference = self.config.factory();
        self.factories
            .resolve(reference)
            .map_err(|reason| DeliveryError::InvalidFactory {
                reference: reference.clone(),
                reason,
            })
    }

    fn chain_delivery(&self, message: &MailMessage) -> DeliveryResult<()> {
        let Some(target) = &self.chain else {
            return Ok(());
        };

        if !self.config.chain_filter().accepts(message) {
            debug!(method = %target.name, "chain filter declined message");
            return Ok(());
        }

        debug!(method = %target.name, "chaining delivery");
        target.method.deliver(message)?;
        Ok(())
    }
}

impl DeliveryMethod for DeliveryAdapter {
    fn deliver(&self, message: &MailMessage) -> DeliveryMethodResult<()> {
        Self::deliver(self, message).map_err(|err| match err {
            DeliveryError::Chained(inner) => inner,
            other => DeliveryMethodError::rejected(other),
        })
    }
}

impl fmt::Debug for DeliveryAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeliveryAdapter")
            .field("config", &self.config)
            .field("chain", &self.chain.as_ref().map(|target| &target.name))
            .finish_non_exhaustive()
    }
}

/// Validates the envelope and returns the recipients to fan out over.
///
/// A Cc/Bcc-only message yields a single empty recipient.
fn check_delivery_params(message: &MailMessage) -> DeliveryResult<Vec<&str>> {
    check_field(message, AddressField::From)?;
    if message.field(AddressField::From).is_blank() {
        return Err(DeliveryError::MissingField(AddressField::From));
    }

    check_field(message, AddressField::To)?;
    if message.field(AddressField::To).is_blank() {
        let has_copies = !message.field(AddressField::Cc).is_blank()
            || !message.field(AddressField::Bcc).is_blank();
        if !has_copies {
            return Err(DeliveryError::MissingField(AddressField::To));
        }
        return Ok(vec![""]);
    }

    Ok(message.recipients().iter().map(String::as_str).collect())
}

fn check_field(message: &MailMessage, field: AddressField) -> DeliveryResult<()> {
    message.field_error(field).map_or(Ok(()), |error| {
        Err(DeliveryError::InvalidAddress {
            field,
            detail: error.detail_or_generic(field),
        })
    })
}

/// Creates one record per sender and recipient, senders outermost.
fn persist(
    factory: &dyn RecordFactory,
    message: &MailMessage,
    recipients: &[&str],
) -> DeliveryResult<()> {
    let bcc = message.field(AddressField::Bcc).joined();

    for sender in message.senders() {
        for recipient in recipients {
            let fields = RecordFields {
                from: sender.clone(),
                to: (*recipient).to_owned(),
                subject: message.subject().to_owned(),
                content: message.encoded().to_owned(),
                bcc: bcc.clone(),
            };
            let record = factory.create(&fields)?;
            debug!(
                record_id = %record.id(),
                from = %sender,
                to = %recipient,
                "persisted mail record"
            );
        }
    }
    Ok(())
}
