//! Application services for persisting mail delivery.

mod adapter;
mod config;
mod mailer;
mod registry;

pub use adapter::{DeliveryAdapter, DeliveryError, DeliveryResult};
pub use config::{ChainFilter, DeliveryConfig, DeliveryConfigError, DeliverySettings};
pub use mailer::Mailer;
pub use registry::{
    DeliveryMethodRegistry, InvalidFactoryReason, RecordFactoryRegistry, RegistryError,
};
