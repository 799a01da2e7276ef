//! Domain model for persisting mail delivery.
//!
//! Messages, their address headers, the field mapping handed to record
//! factories and the validated names used by the registries. All
//! infrastructure concerns are kept outside the domain boundary.

mod address;
mod error;
mod message;
mod names;
mod record;

pub use address::{AddressField, AddressList};
pub use error::{AddressError, AddressErrorKind, MailDomainError};
pub use message::{MailMessage, MailMessageBuilder};
pub use names::{DB_DELIVERY_METHOD, DeliveryMethodName, FactoryReference};
pub use record::{PersistedRecord, RecordFields, RecordId};
