//! Record fields handed to factories and the records they persist.

use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a persisted mail record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(Uuid);

impl RecordId {
    /// Creates a new random record identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a record identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Field mapping for one (sender, recipient) pair of a delivered message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFields {
    /// Sender address.
    pub from: String,
    /// Recipient address; empty for Cc/Bcc-only messages.
    pub to: String,
    /// Message subject.
    pub subject: String,
    /// Fully encoded message text.
    pub content: String,
    /// Bcc addresses joined with `", "`, absent when the message has none.
    pub bcc: Option<String>,
}

/// A stored mail record as returned by a record factory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedRecord {
    id: RecordId,
    fields: RecordFields,
    created_at: DateTime<Utc>,
}

impl PersistedRecord {
    /// Creates a record with a fresh identifier stamped by `clock`.
    #[must_use]
    pub fn new(fields: RecordFields, clock: &impl Clock) -> Self {
        Self {
            id: RecordId::new(),
            fields,
            created_at: clock.utc(),
        }
    }

    /// Reconstructs a record from stored values.
    #[must_use]
    pub const fn from_persisted(
        id: RecordId,
        fields: RecordFields,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            fields,
            created_at,
        }
    }

    /// Returns the record identifier.
    #[must_use]
    pub const fn id(&self) -> RecordId {
        self.id
    }

    /// Returns the stored fields.
    #[must_use]
    pub const fn fields(&self) -> &RecordFields {
        &self.fields
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
