//! BackendRegistry - channel name to delivery backend mapping
//!
//! Written during startup registration, read continuously by every worker.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use contracts::DeliveryBackend;
use tracing::debug;

use crate::error::DispatcherError;

/// Concurrency-safe registry of delivery backends keyed by name
#[derive(Default)]
pub struct BackendRegistry {
    backends: RwLock<HashMap<String, Arc<dyn DeliveryBackend>>>,
}

impl BackendRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a backend under its own name
    ///
    /// # Errors
    /// `DuplicateBackend` if the name is taken; the existing backend is kept.
    pub fn register(&self, backend: Arc<dyn DeliveryBackend>) -> Result<(), DispatcherError> {
        let mut backends = self
            .backends
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        match backends.entry(backend.name().to_string()) {
            Entry::Occupied(entry) => Err(DispatcherError::DuplicateBackend {
                name: entry.key().clone(),
            }),
            Entry::Vacant(entry) => {
                debug!(backend = %entry.key(), "Registered delivery backend");
                entry.insert(backend);
                Ok(())
            }
        }
    }

    /// Look up the backend for a channel
    ///
    /// # Errors
    /// `BackendNotFound` if nothing is registered under `name`.
    pub fn resolve(&self, name: &str) -> Result<Arc<dyn DeliveryBackend>, DispatcherError> {
        self.backends
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
            .ok_or_else(|| DispatcherError::BackendNotFound {
                channel: name.to_string(),
            })
    }

    /// Registered backend names, in no particular order
    pub fn names(&self) -> Vec<String> {
        self.backends
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.backends
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
