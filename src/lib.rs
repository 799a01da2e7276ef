//! Postbox: persisting delivery method for outgoing mail.
//!
//! Instead of (or before) handing a message to a transport, Postbox stores
//! one record per sender and recipient pair through a pluggable record
//! factory and can then chain the message to another delivery method.
//!
//! # Architecture
//!
//! Postbox follows hexagonal architecture principles:
//!
//! - **Domain**: Messages, address lists and record fields
//! - **Ports**: Record factory and delivery method traits
//! - **Adapters**: In-memory and `PostgreSQL` implementations of the ports
//!
//! # Modules
//!
//! - [`delivery`]: Message validation, fan-out persistence and chaining

pub mod delivery;
