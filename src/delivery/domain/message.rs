//! Outbound mail message consumed by delivery methods.

use super::{AddressError, AddressField, AddressList};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::borrow::Cow;
use uuid::Uuid;

/// Domain used for generated `Message-ID` values.
const MESSAGE_ID_DOMAIN: &str = "postbox.local";

/// An outbound email, immutable once built.
///
/// The encoded form is rendered once at build time so every consumer sees
/// byte-identical content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    message_id: String,
    date: DateTime<Utc>,
    from: AddressList,
    to: AddressList,
    cc: AddressList,
    bcc: AddressList,
    subject: String,
    body: String,
    encoded: String,
}

impl MailMessage {
    /// Starts building a message.
    #[must_use]
    pub fn builder() -> MailMessageBuilder {
        MailMessageBuilder::default()
    }

    /// Returns the `Message-ID` header value, including angle brackets.
    #[must_use]
    pub fn message_id(&self) -> &str {
        &self.message_id
    }

    /// Returns the message date.
    #[must_use]
    pub const fn date(&self) -> DateTime<Utc> {
        self.date
    }

    /// Returns the sender addresses in header order.
    #[must_use]
    pub fn senders(&self) -> &[String] {
        self.from.addresses()
    }

    /// Returns the `To` addresses in header order.
    #[must_use]
    pub fn recipients(&self) -> &[String] {
        self.to.addresses()
    }

    /// Returns the `Cc` addresses.
    #[must_use]
    pub fn cc(&self) -> &[String] {
        self.cc.addresses()
    }

    /// Returns the `Bcc` addresses.
    #[must_use]
    pub fn bcc(&self) -> &[String] {
        self.bcc.addresses()
    }

    /// Returns the full address list for a header, including any error.
    #[must_use]
    pub const fn field(&self, field: AddressField) -> &AddressList {
        match field {
            AddressField::From => &self.from,
            AddressField::To => &self.to,
            AddressField::Cc => &self.cc,
            AddressField::Bcc => &self.bcc,
        }
    }

    /// Returns the validation error attached to a header, if any.
    #[must_use]
    pub const fn field_error(&self, field: AddressField) -> Option<&AddressError> {
        self.field(field).error()
    }

    /// Returns the subject line.
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Returns the plain text body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns the encoded message as it would be transmitted.
    #[must_use]
    pub fn encoded(&self) -> &str {
        &self.encoded
    }
}

/// Builder for [`MailMessage`].
///
/// Address setters accept raw header values and may be called repeatedly;
/// each call appends to the header. Quoted local parts such as
/// `"john doe"@example.com` are not understood by the header parser and
/// come back with an attached error.
///
/// A non-ASCII subject is rendered as RFC 2047 `Q` encoded words. The body
/// is rendered as UTF-8 without transfer encoding.
///
/// # Examples
///
/// ```
/// use mockable::DefaultClock;
/// use postbox::delivery::domain::MailMessage;
///
/// let message = MailMessage::builder()
///     .from("Someone <someone@somewhere.com>")
///     .to("foo@bar.com")
///     .subject("hey")
///     .build(&DefaultClock);
///
/// assert_eq!(message.senders(), ["someone@somewhere.com"]);
/// assert!(message.encoded().contains("Subject: hey\r\n"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MailMessageBuilder {
    message_id: Option<String>,
    from: AddressList,
    to: AddressList,
    cc: AddressList,
    bcc: AddressList,
    subject: String,
    body: String,
}

impl MailMessageBuilder {
    /// Appends senders parsed from a raw `From` value.
    #[must_use]
    pub fn from(self, raw: &str) -> Self {
        self.field(AddressField::From, AddressList::parse(raw))
    }

    /// Appends recipients parsed from a raw `To` value.
    #[must_use]
    pub fn to(self, raw: &str) -> Self {
        self.field(AddressField::To, AddressList::parse(raw))
    }

    /// Appends addresses parsed from a raw `Cc` value.
    #[must_use]
    pub fn cc(self, raw: &str) -> Self {
        self.field(AddressField::Cc, AddressList::parse(raw))
    }

    /// Appends addresses parsed from a raw `Bcc` value.
    #[must_use]
    pub fn bcc(self, raw: &str) -> Self {
        self.field(AddressField::Bcc, AddressList::parse(raw))
    }

    /// Appends an already-parsed address list to a header.
    ///
    /// The first attached error on a header wins.
    #[must_use]
    pub fn field(mut self, field: AddressField, list: AddressList) -> Self {
        let target = match field {
            AddressField::From => &mut self.from,
            AddressField::To => &mut self.to,
            AddressField::Cc => &mut self.cc,
            AddressField::Bcc => &mut self.bcc,
        };
        *target = target.merged_with(&list);
        self
    }

    /// Sets the subject line.
    #[must_use]
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    /// Sets the plain text body.
    #[must_use]
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Overrides the generated `Message-ID`.
    ///
    /// Angle brackets are added when missing.
    #[must_use]
    pub fn message_id(mut self, id: impl Into<String>) -> Self {
        let raw = id.into();
        let trimmed = raw.trim().trim_start_matches('<').trim_end_matches('>');
        self.message_id = Some(format!("<{trimmed}>"));
        self
    }

    /// Builds the message, rendering its encoded form.
    #[must_use]
    pub fn build(self, clock: &impl Clock) -> MailMessage {
        let Self {
            message_id: explicit_id,
            from,
            to,
            cc,
            bcc,
            subject,
            body,
        } = self;

        let message_id =
            explicit_id.unwrap_or_else(|| format!("<{}@{MESSAGE_ID_DOMAIN}>", Uuid::new_v4()));
        let date = clock.utc();
        let encoded = encode(&message_id, date, [&from, &to, &cc], &subject, &body);

        MailMessage {
            message_id,
            date,
            from,
            to,
            cc,
            bcc,
            subject,
            body,
            encoded,
        }
    }
}

/// Renders headers and body. Bcc is never rendered.
fn encode(
    message_id: &str,
    date: DateTime<Utc>,
    [from, to, cc]: [&AddressList; 3],
    subject: &str,
    body: &str,
) -> String {
    let mut out = String::new();
    push_header(&mut out, "Date", &date.to_rfc2822());
    for (field, list) in [
        (AddressField::From, from),
        (AddressField::To, to),
        (AddressField::Cc, cc),
    ] {
        if let Some(joined) = list.joined() {
            push_header(&mut out, field.header_name(), &joined);
        }
    }
    push_header(&mut out, "Message-ID", message_id);
    push_header(&mut out, "Subject", &encode_word(subject));
    push_header(&mut out, "MIME-Version", "1.0");
    push_header(&mut out, "Content-Type", "text/plain; charset=UTF-8");
    out.push_str("\r\n");
    for line in body.lines() {
        out.push_str(line);
        out.push_str("\r\n");
    }
    out
}

/// Longest encoded word allowed by RFC 2047.
const ENCODED_WORD_LIMIT: usize = 75;
const ENCODED_WORD_PREFIX: &str = "=?UTF-8?Q?";
const ENCODED_WORD_SUFFIX: &str = "?=";

/// Q-encodes non-ASCII text into one or more RFC 2047 encoded words.
fn encode_word(value: &str) -> Cow<'_, str> {
    if value.is_ascii() {
        return Cow::Borrowed(value);
    }

    let budget = ENCODED_WORD_LIMIT - ENCODED_WORD_PREFIX.len() - ENCODED_WORD_SUFFIX.len();
    let mut words = Vec::new();
    let mut payload = String::new();
    let mut buf = [0_u8; 4];
    for ch in value.chars() {
        let piece: String = ch
            .encode_utf8(&mut buf)
            .bytes()
            .map(|byte| match byte {
                b' ' => "_".to_owned(),
                b'!' | b'*' | b'+' | b'-' | b'/' => char::from(byte).to_string(),
                _ if byte.is_ascii_alphanumeric() => char::from(byte).to_string(),
                _ => format!("={byte:02X}"),
            })
            .collect();
        if payload.len() + piece.len() > budget {
            words.push(std::mem::take(&mut payload));
        }
        payload.push_str(&piece);
    }
    words.push(payload);

    Cow::Owned(
        words
            .iter()
            .map(|word| format!("{ENCODED_WORD_PREFIX}{word}{ENCODED_WORD_SUFFIX}"))
            .collect::<Vec<_>>()
            .join(" "),
    )
}

fn push_header(out: &mut String, name: &str, value: &str) {
    out.push_str(name);
    out.push_str(": ");
    out.push_str(&value.replace(['\r', '\n'], " "));
    out.push_str("\r\n");
}
