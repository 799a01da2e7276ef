//! Address fields and parsed address lists.

use super::{AddressError, AddressErrorKind};
use mailparse::{MailAddr, SingleInfo};
use std::fmt;

/// Address header of a mail message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressField {
    /// The `From` header (senders).
    From,
    /// The `To` header (primary recipients).
    To,
    /// The `Cc` header.
    Cc,
    /// The `Bcc` header.
    Bcc,
}

impl AddressField {
    /// Returns the lowercase field name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::From => "from",
            Self::To => "to",
            Self::Cc => "cc",
            Self::Bcc => "bcc",
        }
    }

    /// Returns the header name as rendered in encoded messages.
    #[must_use]
    pub const fn header_name(self) -> &'static str {
        match self {
            Self::From => "From",
            Self::To => "To",
            Self::Cc => "Cc",
            Self::Bcc => "Bcc",
        }
    }
}

impl fmt::Display for AddressField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered list of addr-specs for one header, plus any parse error.
///
/// Parsing never fails outright. A malformed header keeps whatever
/// addresses could be read and carries an [`AddressError`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressList {
    addresses: Vec<String>,
    error: Option<AddressError>,
}

impl AddressList {
    /// Creates an empty address list.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            addresses: Vec::new(),
            error: None,
        }
    }

    /// Parses a raw header value such as `"Jane <jane@example.com>, bob@example.com"`.
    ///
    /// Display names are dropped and groups are flattened in order. Empty
    /// list elements, as in `"a@x, , b@x"`, are skipped.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let cleaned = without_empty_elements(raw);
        if cleaned.is_empty() {
            return Self::empty();
        }

        let parsed = match mailparse::addrparse(&cleaned) {
            Ok(parsed) => parsed,
            Err(err) => {
                return Self {
                    addresses: Vec::new(),
                    error: Some(AddressError::new(AddressErrorKind::Syntax, err.to_string())),
                };
            }
        };

        let mut addresses = Vec::new();
        for entry in parsed.iter() {
            match entry {
                MailAddr::Single(info) => addresses.push(addr_spec(info)),
                MailAddr::Group(group) => addresses.extend(group.addrs.iter().map(addr_spec)),
            }
        }

        let error = first_malformed(&addresses);
        Self { addresses, error }
    }

    /// Creates a list from already-extracted addresses.
    ///
    /// Each address is checked the same way [`AddressList::parse`] checks
    /// parsed entries.
    #[must_use]
    pub fn from_addresses<I, S>(addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let collected: Vec<String> = addresses.into_iter().map(Into::into).collect();
        Self {
            error: first_malformed(&collected),
            addresses: collected,
        }
    }

    /// Attaches an upstream validation error, replacing any existing one.
    #[must_use]
    pub fn with_error(mut self, error: AddressError) -> Self {
        self.error = Some(error);
        self
    }

    /// Returns the addresses in header order.
    #[must_use]
    pub fn addresses(&self) -> &[String] {
        &self.addresses
    }

    /// Returns the attached validation error, if any.
    #[must_use]
    pub const fn error(&self) -> Option<&AddressError> {
        self.error.as_ref()
    }

    /// Returns `true` when the list holds no non-blank address.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.addresses.iter().all(|address| address.trim().is_empty())
    }

    /// Returns the number of addresses.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.addresses.len()
    }

    /// Returns `true` when the list has no addresses.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    /// Joins the addresses with `", "`, or returns `None` for an empty list.
    #[must_use]
    pub fn joined(&self) -> Option<String> {
        if self.addresses.is_empty() {
            None
        } else {
            Some(self.addresses.join(", "))
        }
    }

    /// Appends `other`, keeping the first attached error.
    pub(crate) fn merged_with(&self, other: &Self) -> Self {
        let addresses: Vec<String> = self
            .addresses
            .iter()
            .chain(&other.addresses)
            .cloned()
            .collect();
        let error = self
            .error
            .as_ref()
            .or(other.error.as_ref())
            .cloned()
            .or_else(|| first_malformed(&addresses));
        Self { addresses, error }
    }
}

/// Splits on top-level commas and drops blank elements.
///
/// Commas inside quoted strings, comments and angle brackets are kept.
fn without_empty_elements(raw: &str) -> String {
    let mut elements = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut escaped = false;
    let mut nesting = 0_usize;

    for ch in raw.chars() {
        match ch {
            _ if escaped => escaped = false,
            '\\' if quoted => escaped = true,
            '"' => quoted = !quoted,
            '<' | '(' if !quoted => nesting = nesting.saturating_add(1),
            '>' | ')' if !quoted => nesting = nesting.saturating_sub(1),
            ',' if !quoted && nesting == 0 => {
                elements.push(std::mem::take(&mut current));
                continue;
            }
            _ => {}
        }
        current.push(ch);
    }
    elements.push(current);

    elements
        .iter()
        .map(|element| element.trim())
        .filter(|element| !element.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

fn addr_spec(info: &SingleInfo) -> String {
    info.addr.trim().to_owned()
}

fn first_malformed(addresses: &[String]) -> Option<AddressError> {
    addresses
        .iter()
        .find(|address| !is_well_formed(address))
        .map(|address| {
            AddressError::new(
                AddressErrorKind::Malformed,
                format!("'{address}' is not a valid mailbox address"),
            )
        })
}

/// Checks the minimal mailbox shape: `local@domain` with no whitespace.
fn is_well_formed(address: &str) -> bool {
    let Some((local, domain)) = address.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && !address
            .chars()
            .any(|c| c.is_whitespace() || c.is_control() || c == '<' || c == '>')
}
