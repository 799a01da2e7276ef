//! Delivery configuration and the settings it is built from.

use crate::delivery::domain::{
    DB_DELIVERY_METHOD, DeliveryMethodName, FactoryReference, MailDomainError, MailMessage,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Raw delivery settings as supplied by host configuration.
///
/// # Examples
///
/// ```
/// use postbox::delivery::services::DeliverySettings;
///
/// let settings = DeliverySettings::from_json(
///     r#"{ "factory": "outbox", "chain_delivery_method": "smtp" }"#,
/// )
/// .expect("valid settings");
/// assert_eq!(settings.factory.as_deref(), Some("outbox"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeliverySettings {
    /// Reference of the record factory used for persistence. Required.
    #[serde(default)]
    pub factory: Option<String>,
    /// Delivery method to chain to after persisting.
    #[serde(default)]
    pub chain_delivery_method: Option<String>,
}

impl DeliverySettings {
    /// Returns the default option set: no factory and no chaining.
    #[must_use]
    pub fn default_options() -> Self {
        Self::default()
    }

    /// Parses settings from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryConfigError::Parse`] when the document is not valid
    /// JSON or contains unknown keys.
    pub fn from_json(json: &str) -> Result<Self, DeliveryConfigError> {
        serde_json::from_str(json).map_err(|err| DeliveryConfigError::Parse(Arc::new(err)))
    }
}

/// Errors returned while building a [`DeliveryConfig`].
#[derive(Debug, Clone, Error)]
pub enum DeliveryConfigError {
    /// No factory reference was configured.
    #[error("a record factory must be configured")]
    MissingFactory,

    /// A configured name failed validation.
    #[error(transparent)]
    InvalidName(#[from] MailDomainError),

    /// The chain target is the persisting delivery method itself.
    #[error("cannot chain delivery to '{0}'")]
    SelfChain(DeliveryMethodName),

    /// The settings document could not be parsed.
    #[error("invalid delivery settings: {0}")]
    Parse(Arc<serde_json::Error>),
}

/// Predicate deciding whether a persisted message is also chained.
#[derive(Clone)]
pub struct ChainFilter(Arc<dyn Fn(&MailMessage) -> bool + Send + Sync>);

impl ChainFilter {
    /// Creates a filter from a predicate.
    #[must_use]
    pub fn new(predicate: impl Fn(&MailMessage) -> bool + Send + Sync + 'static) -> Self {
        Self(Arc::new(predicate))
    }

    /// Returns a filter that accepts every message.
    #[must_use]
    pub fn always() -> Self {
        Self::new(|_| true)
    }

    /// Evaluates the filter for `message`.
    #[must_use]
    pub fn accepts(&self, message: &MailMessage) -> bool {
        (self.0)(message)
    }
}

impl Default for ChainFilter {
    fn default() -> Self {
        Self::always()
    }
}

impl fmt::Debug for ChainFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ChainFilter(..)")
    }
}

/// Validated configuration for a [`super::DeliveryAdapter`].
///
/// Built once at startup and read-only afterwards.
#[derive(Debug, Clone)]
pub struct DeliveryConfig {
    factory: FactoryReference,
    chain_delivery_method: Option<DeliveryMethodName>,
    chain_filter: ChainFilter,
}

impl DeliveryConfig {
    /// Creates a configuration persisting through `factory` with no chaining.
    #[must_use]
    pub fn new(factory: FactoryReference) -> Self {
        Self {
            factory,
            chain_delivery_method: None,
            chain_filter: ChainFilter::always(),
        }
    }

    /// Builds a configuration from raw settings.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryConfigError::MissingFactory`] when no factory is
    /// set, [`DeliveryConfigError::InvalidName`] when a name fails
    /// validation, or [`DeliveryConfigError::SelfChain`] when chaining to
    /// the persisting method itself.
    pub fn from_settings(settings: DeliverySettings) -> Result<Self, DeliveryConfigError> {
        let DeliverySettings {
            factory,
            chain_delivery_method,
        } = settings;

        let reference = factory
            .filter(|raw| !raw.trim().is_empty())
            .ok_or(DeliveryConfigError::MissingFactory)?;
        let config = Self::new(FactoryReference::new(reference)?);

        match chain_delivery_method {
            Some(raw) => config.with_chain_delivery_method(DeliveryMethodName::new(raw)?),
            None => Ok(config),
        }
    }

    /// Sets the delivery method messages are chained to.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryConfigError::SelfChain`] when `method` names the
    /// persisting delivery method.
    pub fn with_chain_delivery_method(
        mut self,
        method: DeliveryMethodName,
    ) -> Result<Self, DeliveryConfigError> {
        if method.as_str() == DB_DELIVERY_METHOD {
            return Err(DeliveryConfigError::SelfChain(method));
        }
        self.chain_delivery_method = Some(method);
        Ok(self)
    }

    /// Sets the chain filter.
    #[must_use]
    pub fn with_chain_filter(mut self, filter: ChainFilter) -> Self {
        self.chain_filter = filter;
        self
    }

    /// Returns the factory reference.
    #[must_use]
    pub const fn factory(&self) -> &FactoryReference {
        &self.factory
    }

    /// Returns the chained delivery method, if any.
    #[must_use]
    pub const fn chain_delivery_method(&self) -> Option<&DeliveryMethodName> {
        self.chain_delivery_method.as_ref()
    }

    /// Returns the chain filter.
    #[must_use]
    pub const fn chain_filter(&self) -> &ChainFilter {
        &self.chain_filter
    }
}
