//! Diesel schema for mail record persistence.

diesel::table! {
    /// Persisted mail records, one per sender and recipient pair.
    mail_records (id) {
        /// Internal record identifier.
        id -> Uuid,
        /// Sender address.
        #[max_length = 320]
        from_address -> Varchar,
        /// Recipient address, empty for Cc/Bcc-only messages.
        #[max_length = 320]
        to_address -> Varchar,
        /// Message subject.
        subject -> Text,
        /// Encoded message.
        content -> Text,
        /// Comma-joined Bcc addresses.
        bcc -> Nullable<Text>,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}
