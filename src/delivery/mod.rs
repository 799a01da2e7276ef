//! Persisting mail delivery.
//!
//! Outbound messages are stored as one record per sender and recipient
//! pair through a pluggable record factory, and optionally chained to a
//! second delivery method. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Delivery and registry services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
