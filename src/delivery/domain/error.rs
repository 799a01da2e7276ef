//! Error types for mail delivery domain validation and parsing.

use super::AddressField;
use thiserror::Error;

/// Errors returned while constructing mail delivery domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MailDomainError {
    /// A registry name is empty after trimming.
    #[error("{kind} name must not be empty")]
    EmptyName {
        /// Which kind of name was being constructed.
        kind: &'static str,
    },

    /// A registry name contains characters outside `[A-Za-z0-9_:.-]`.
    #[error("{kind} name '{value}' contains invalid characters")]
    InvalidName {
        /// Which kind of name was being constructed.
        kind: &'static str,
        /// The rejected raw value.
        value: String,
    },

    /// A registry name exceeds the 100-character limit.
    #[error("{kind} name exceeds 100 character limit: {value}")]
    NameTooLong {
        /// Which kind of name was being constructed.
        kind: &'static str,
        /// The rejected raw value.
        value: String,
    },
}

/// Classification of an address validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressErrorKind {
    /// The header value could not be parsed as an address list.
    Syntax,
    /// The header parsed but an address is not a usable mailbox.
    Malformed,
}

impl AddressErrorKind {
    /// Returns a short label for the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Syntax => "syntax",
            Self::Malformed => "malformed",
        }
    }
}

/// Validation error attached to an address field by the address parser.
///
/// The error travels with the message instead of failing message
/// construction, so the delivery step decides whether it matters.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{} error: {}", .kind.as_str(), .detail.as_deref().unwrap_or("no detail"))]
pub struct AddressError {
    kind: AddressErrorKind,
    detail: Option<String>,
}

impl AddressError {
    /// Creates an address error with a detail message.
    #[must_use]
    pub fn new(kind: AddressErrorKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: Some(detail.into()),
        }
    }

    /// Creates an address error without any detail.
    #[must_use]
    pub const fn bare(kind: AddressErrorKind) -> Self {
        Self { kind, detail: None }
    }

    /// Returns the error kind.
    #[must_use]
    pub const fn kind(&self) -> AddressErrorKind {
        self.kind
    }

    /// Returns the detail message, if the parser supplied one.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    /// Returns the detail message or the generic message for `field`.
    #[must_use]
    pub fn detail_or_generic(&self, field: AddressField) -> String {
        self.detail
            .clone()
            .unwrap_or_else(|| format!("invalid value in field '{field}'"))
    }
}
