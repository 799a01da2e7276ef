//! `PostgreSQL` adapter for mail record persistence.

mod factory;
mod models;
mod schema;

pub use factory::{MailRecordPgPool, PostgresRecordFactory};
