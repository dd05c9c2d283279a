//! The item service: what the host's request handlers call.
//!
//! [`ItemService`] forwards to a [`Store`] engine and logs every outcome
//! with `tracing`. It adds no semantics of its own; ownership checks and
//! expiry belong to the host.

use std::collections::HashMap;
use std::sync::Arc;

use bucket_store::Store;
use bucket_store_core::{ErrorKind, Key, Operation, OwnableItem, SanitizedError};

use crate::config::{provide_store, StoreConfig};
use crate::error::Result;

/// Instrumented access to an item store.
pub struct ItemService<S: Store<OwnableItem> + ?Sized> {
    store: Arc<S>,
}

/// An [`ItemService`] over whichever engine the config selected.
pub type DynItemService = ItemService<dyn Store<OwnableItem>>;

impl DynItemService {
    /// Build a service over a fresh engine chosen by `config`.
    pub fn from_config(config: &StoreConfig) -> Result<Self> {
        Ok(Self::new(provide_store(config)?))
    }
}

impl<S: Store<OwnableItem> + ?Sized> ItemService<S> {
    /// Wrap an existing engine.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Get the store reference.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Insert or replace the item under `key`.
    pub fn push(&self, key: &Key, item: OwnableItem) -> Result<()> {
        self.store
            .push(key, item)
            .map_err(|e| log_failure(Operation::Push, key, e))?;
        tracing::debug!(%key, "item pushed");
        Ok(())
    }

    /// Get the item under `key`.
    pub fn get(&self, key: &Key) -> Result<OwnableItem> {
        let item = self
            .store
            .get(key)
            .map_err(|e| log_failure(Operation::Get, key, e))?;
        tracing::debug!(%key, owner = %item.owner, "item fetched");
        Ok(item)
    }

    /// Get every item in `bucket`.
    pub fn get_all(&self, bucket: &str) -> Result<HashMap<String, OwnableItem>> {
        let items = self
            .store
            .get_all(bucket)
            .map_err(|e| log_failure(Operation::GetAll, bucket, e))?;
        tracing::debug!(bucket, count = items.len(), "bucket listed");
        Ok(items)
    }

    /// Remove and return the item under `key`.
    pub fn delete(&self, key: &Key) -> Result<OwnableItem> {
        let item = self
            .store
            .delete(key)
            .map_err(|e| log_failure(Operation::Delete, key, e))?;
        tracing::debug!(%key, "item deleted");
        Ok(item)
    }
}

impl<S: Store<OwnableItem> + ?Sized> Clone for ItemService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

fn log_failure(
    operation: Operation,
    addressed: &(impl std::fmt::Display + ?Sized),
    err: SanitizedError,
) -> crate::error::ServiceError {
    match err.kind() {
        ErrorKind::NotFound => {
            tracing::debug!(%operation, %addressed, cause = ?err.cause(), "not found");
        }
        ErrorKind::OperationFailed => {
            tracing::warn!(%operation, %addressed, error = %err.inner(), "store operation failed");
        }
    }
    err.into()
}
