//! Validated registry names for record factories and delivery methods.

use super::MailDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Name under which the persisting delivery method is conventionally
/// registered.
pub const DB_DELIVERY_METHOD: &str = "db";

/// Maximum length for a registry name, matching the `VARCHAR(100)` limit
/// used for stored identifiers.
const MAX_NAME_LENGTH: usize = 100;

fn validate_name(kind: &'static str, raw: String) -> Result<String, MailDomainError> {
    let normalized = raw.trim();

    if normalized.is_empty() {
        return Err(MailDomainError::EmptyName { kind });
    }

    if normalized.len() > MAX_NAME_LENGTH {
        return Err(MailDomainError::NameTooLong { kind, value: raw });
    }

    let is_valid = normalized
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | ':' | '.' | '-'));

    if !is_valid {
        return Err(MailDomainError::InvalidName { kind, value: raw });
    }

    Ok(normalized.to_owned())
}

/// Identifier under which a record factory is registered, e.g.
/// `"Notifications::Email"` or `"outbox"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FactoryReference(String);

impl FactoryReference {
    /// Creates a validated factory reference.
    ///
    /// The input is trimmed. Only characters in `[A-Za-z0-9_:.-]` are
    /// accepted; case is preserved.
    ///
    /// # Errors
    ///
    /// Returns [`MailDomainError::EmptyName`],
    /// [`MailDomainError::InvalidName`] or [`MailDomainError::NameTooLong`].
    pub fn new(value: impl Into<String>) -> Result<Self, MailDomainError> {
        validate_name("factory", value.into()).map(Self)
    }

    /// Returns the reference as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for FactoryReference {
    type Error = MailDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FactoryReference> for String {
    fn from(value: FactoryReference) -> Self {
        value.0
    }
}

impl fmt::Display for FactoryReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Name under which a delivery method is registered, e.g. `"smtp"` or `"db"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DeliveryMethodName(String);

impl DeliveryMethodName {
    /// Creates a validated, lowercased delivery method name.
    ///
    /// # Errors
    ///
    /// Returns [`MailDomainError::EmptyName`],
    /// [`MailDomainError::InvalidName`] or [`MailDomainError::NameTooLong`].
    pub fn new(value: impl Into<String>) -> Result<Self, MailDomainError> {
        validate_name("delivery method", value.into()).map(|name| Self(name.to_ascii_lowercase()))
    }

    /// Returns the name of the persisting delivery method.
    #[must_use]
    pub fn db() -> Self {
        Self(DB_DELIVERY_METHOD.to_owned())
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for DeliveryMethodName {
    type Error = MailDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DeliveryMethodName> for String {
    fn from(value: DeliveryMethodName) -> Self {
        value.0
    }
}

impl fmt::Display for DeliveryMethodName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
