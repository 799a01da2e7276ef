//! Shared test helpers for in-memory delivery integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use postbox::delivery::{
    adapters::memory::{InMemoryMailbox, InMemoryRecordFactory},
    domain::{DeliveryMethodName, FactoryReference, MailMessage},
    services::{
        DeliveryAdapter, DeliveryConfig, DeliveryMethodRegistry, DeliverySettings,
        RecordFactoryRegistry,
    },
};
use rstest::fixture;

/// Factory reference used by the wired host.
pub const FACTORY: &str = "Notifications::Email";

/// Chain target name used by the wired host.
pub const CHAIN: &str = "test";

/// In-memory backends wired into registries the way a host boots them.
pub struct Host {
    /// Record storage behind [`FACTORY`].
    pub records: InMemoryRecordFactory,
    /// Mailbox registered under [`CHAIN`].
    pub mailbox: InMemoryMailbox,
    /// Factory registry shared by adapters.
    pub factories: Arc<RecordFactoryRegistry>,
    /// Delivery method registry.
    pub methods: DeliveryMethodRegistry,
}

impl Host {
    /// Builds an adapter from raw settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings are invalid or the chain method is
    /// unknown.
    pub fn adapter(
        &self,
        settings: DeliverySettings,
    ) -> Result<DeliveryAdapter, Box<dyn std::error::Error + Send + Sync>> {
        let config = DeliveryConfig::from_settings(settings)?;
        Ok(DeliveryAdapter::new(
            config,
            Arc::clone(&self.factories),
            &self.methods,
        )?)
    }

    /// Returns `(from, to)` for every persisted record in creation order.
    #[must_use]
    pub fn persisted_pairs(&self) -> Vec<(String, String)> {
        self.records
            .records()
            .expect("records readable")
            .into_iter()
            .map(|record| (record.fields().from.clone(), record.fields().to.clone()))
            .collect()
    }

    /// Returns how many messages reached the chained mailbox.
    #[must_use]
    pub fn chained_count(&self) -> usize {
        self.mailbox.deliveries().expect("mailbox readable").len()
    }
}

/// Provides a freshly wired host for each test.
#[fixture]
pub fn host() -> Host {
    let records = InMemoryRecordFactory::new();
    let mailbox = InMemoryMailbox::new();

    let mut factories = RecordFactoryRegistry::new();
    factories
        .register(
            FactoryReference::new(FACTORY).expect("valid reference"),
            Arc::new(records.clone()),
        )
        .expect("register factory");
    let mut methods = DeliveryMethodRegistry::new();
    methods
        .register(
            DeliveryMethodName::new(CHAIN).expect("valid name"),
            Arc::new(mailbox.clone()),
        )
        .expect("register mailbox");

    Host {
        records,
        mailbox,
        factories: Arc::new(factories),
        methods,
    }
}

/// Builds settings for the wired factory with an optional chain target.
#[must_use]
pub fn settings(chain: Option<&str>) -> DeliverySettings {
    DeliverySettings {
        factory: Some(FACTORY.to_owned()),
        chain_delivery_method: chain.map(str::to_owned),
    }
}

/// Builds the message used throughout the suite.
#[must_use]
pub fn mail() -> MailMessage {
    MailMessage::builder()
        .from("someone@somewhere.com")
        .to("foo@bar.com")
        .subject("hey")
        .body("")
        .build(&DefaultClock)
}
