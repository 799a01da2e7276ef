//! Port contracts for mail persistence and delivery methods.
//!
//! Ports define infrastructure-agnostic interfaces used by the delivery
//! adapter service.

pub mod delivery_method;
pub mod record_factory;

pub use delivery_method::{DeliveryMethod, DeliveryMethodError, DeliveryMethodResult};
pub use record_factory::{RecordFactory, RecordFactoryError, RecordFactoryResult};
