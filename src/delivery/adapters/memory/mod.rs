//! In-memory adapters for tests and local development.

mod mailbox;
mod record_factory;

pub use mailbox::InMemoryMailbox;
pub use record_factory::InMemoryRecordFactory;
