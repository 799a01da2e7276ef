//! Diesel row models for mail record persistence.

use super::schema::mail_records;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for mail records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = mail_records)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MailRecordRow {
    /// Internal record identifier.
    pub id: uuid::Uuid,
    /// Sender address.
    pub from_address: String,
    /// Recipient address.
    pub to_address: String,
    /// Message subject.
    pub subject: String,
    /// Encoded message.
    pub content: String,
    /// Comma-joined Bcc addresses.
    pub bcc: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for mail records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = mail_records)]
pub struct NewMailRecordRow {
    /// Internal record identifier.
    pub id: uuid::Uuid,
    /// Sender address.
    pub from_address: String,
    /// Recipient address.
    pub to_address: String,
    /// Message subject.
    pub subject: String,
    /// Encoded message.
    pub content: String,
    /// Comma-joined Bcc addresses.
    pub bcc: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
