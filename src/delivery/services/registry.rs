//! Startup registries resolving configured names to concrete backends.
//!
//! Both registries are filled while the host boots and then shared
//! read-only, so lookups need no locking.

use crate::delivery::{
    domain::{DeliveryMethodName, FactoryReference},
    ports::{DeliveryMethod, RecordFactory},
};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Errors returned while populating or querying the registries.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// A factory with the same reference is already registered.
    #[error("duplicate record factory: {0}")]
    DuplicateFactory(FactoryReference),

    /// A delivery method with the same name is already registered.
    #[error("duplicate delivery method: {0}")]
    DuplicateDeliveryMethod(DeliveryMethodName),

    /// No delivery method is registered under the name.
    #[error("unknown delivery method: {0}")]
    UnknownDeliveryMethod(DeliveryMethodName),
}

/// Why a factory reference could not be used for persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidFactoryReason {
    /// Nothing is registered under the reference.
    Unknown,
    /// The reference names a backend that cannot create records.
    MissingCreateCapability,
}

impl fmt::Display for InvalidFactoryReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => f.write_str("not a registered record factory"),
            Self::MissingCreateCapability => f.write_str("backend cannot create records"),
        }
    }
}

#[derive(Clone)]
enum FactoryEntry {
    Creatable(Arc<dyn RecordFactory>),
    ReadOnly,
}

/// Registry of record factories keyed by reference.
#[derive(Clone, Default)]
pub struct RecordFactoryRegistry {
    entries: HashMap<FactoryReference, FactoryEntry>,
}

impl RecordFactoryRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a factory under `reference`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateFactory`] when the reference is
    /// taken.
    pub fn register(
        &mut self,
        reference: FactoryReference,
        factory: Arc<dyn RecordFactory>,
    ) -> Result<(), RegistryError> {
        self.insert(reference, FactoryEntry::Creatable(factory))
    }

    /// Registers a known backend that only supports reads, such as an
    /// archive or replica. Resolving it for persistence fails.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateFactory`] when the reference is
    /// taken.
    pub fn register_read_only(
        &mut self,
        reference: FactoryReference,
    ) -> Result<(), RegistryError> {
        self.insert(reference, FactoryEntry::ReadOnly)
    }

    fn insert(
        &mut self,
        reference: FactoryReference,
        entry: FactoryEntry,
    ) -> Result<(), RegistryError> {
        if self.entries.contains_key(&reference) {
            return Err(RegistryError::DuplicateFactory(reference));
        }
        self.entries.insert(reference, entry);
        Ok(())
    }

    /// Resolves a reference to a factory able to create records.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidFactoryReason::Unknown`] when nothing is registered
    /// under the reference, or
    /// [`InvalidFactoryReason::MissingCreateCapability`] for read-only
    /// backends.
    pub fn resolve(
        &self,
        reference: &FactoryReference,
    ) -> Result<Arc<dyn RecordFactory>, InvalidFactoryReason> {
        match self.entries.get(reference) {
            Some(FactoryEntry::Creatable(factory)) => Ok(Arc::clone(factory)),
            Some(FactoryEntry::ReadOnly) => Err(InvalidFactoryReason::MissingCreateCapability),
            None => Err(InvalidFactoryReason::Unknown),
        }
    }

    /// Returns `true` when anything is registered under `reference`.
    #[must_use]
    pub fn contains(&self, reference: &FactoryReference) -> bool {
        self.entries.contains_key(reference)
    }
}

impl fmt::Debug for RecordFactoryRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.entries.keys()).finish()
    }
}

/// Registry of delivery methods keyed by name.
#[derive(Clone, Default)]
pub struct DeliveryMethodRegistry {
    methods: HashMap<DeliveryMethodName, Arc<dyn DeliveryMethod>>,
}

impl DeliveryMethodRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a delivery method under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateDeliveryMethod`] when the name is
    /// taken.
    pub fn register(
        &mut self,
        name: DeliveryMethodName,
        method: Arc<dyn DeliveryMethod>,
    ) -> Result<(), RegistryError> {
        if self.methods.contains_key(&name) {
            return Err(RegistryError::DuplicateDeliveryMethod(name));
        }
        self.methods.insert(name, method);
        Ok(())
    }

    /// Resolves a delivery method by name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownDeliveryMethod`] when nothing is
    /// registered under the name.
    pub fn resolve(
        &self,
        name: &DeliveryMethodName,
    ) -> Result<Arc<dyn DeliveryMethod>, RegistryError> {
        self.methods
            .get(name)
            .cloned()
            .ok_or_else(|| RegistryError::UnknownDeliveryMethod(name.clone()))
    }

    /// Returns the registered names in no particular order.
    #[must_use]
    pub fn names(&self) -> Vec<&DeliveryMethodName> {
        self.methods.keys().collect()
    }
}

impl fmt::Debug for DeliveryMethodRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.methods.keys()).finish()
    }
}
