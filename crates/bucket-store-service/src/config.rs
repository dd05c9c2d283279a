//! Store configuration and engine construction.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use bucket_store::{InMemStore, ShardedInMemStore, Store, DEFAULT_SHARDS};
use bucket_store_core::OwnableItem;

use crate::error::{Result, ServiceError};

/// Which in-memory engine backs the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Backend {
    /// A single reader/writer lock over all buckets.
    InMemory,
    /// Buckets hashed across `shards` independent locks.
    Sharded {
        #[serde(default = "default_shards")]
        shards: usize,
    },
}

fn default_shards() -> usize {
    DEFAULT_SHARDS
}

/// Configuration for the store, embeddable in the host's own config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: Backend,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: Backend::InMemory,
        }
    }
}

impl StoreConfig {
    /// Reject settings no engine can run with.
    pub fn validate(&self) -> Result<()> {
        match self.backend {
            Backend::Sharded { shards: 0 } => Err(ServiceError::InvalidConfig(
                "sharded backend needs at least one shard".into(),
            )),
            _ => Ok(()),
        }
    }
}

/// Build a fresh, empty store for `config`.
///
/// Every call returns an independent instance.
pub fn provide_store(config: &StoreConfig) -> Result<Arc<dyn Store<OwnableItem>>> {
    config.validate()?;

    let store: Arc<dyn Store<OwnableItem>> = match config.backend {
        Backend::InMemory => Arc::new(InMemStore::<OwnableItem>::new()),
        Backend::Sharded { shards } => {
            Arc::new(ShardedInMemStore::<OwnableItem>::with_shards(shards))
        }
    };
    tracing::debug!(backend = ?config.backend, "store provided");
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bucket_store_core::{Item, Key};

    #[test]
    fn default_config() {
        let c = StoreConfig::default();
        assert_eq!(c.backend, Backend::InMemory);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn empty_json_uses_defaults() {
        let c: StoreConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(c, StoreConfig::default());
    }

    #[test]
    fn sharded_json() {
        let c: StoreConfig =
            serde_json::from_str(r#"{"backend": {"type": "sharded", "shards": 4}}"#).unwrap();
        assert_eq!(c.backend, Backend::Sharded { shards: 4 });

        let c: StoreConfig =
            serde_json::from_str(r#"{"backend": {"type": "sharded"}}"#).unwrap();
        assert_eq!(
            c.backend,
            Backend::Sharded {
                shards: DEFAULT_SHARDS
            }
        );
    }

    #[test]
    fn zero_shards_rejected() {
        let c = StoreConfig {
            backend: Backend::Sharded { shards: 0 },
        };
        assert!(matches!(c.validate(), Err(ServiceError::InvalidConfig(_))));
        assert!(provide_store(&c).is_err());
    }

    #[test]
    fn provided_stores_are_independent() {
        let config = StoreConfig::default();
        let a = provide_store(&config).unwrap();
        let b = provide_store(&config).unwrap();

        let key = Key::new("b", "x");
        a.push(&key, OwnableItem::new(Item::new("x"), "alice"))
            .unwrap();

        assert_eq!(a.get(&key).unwrap().owner, "alice");
        assert!(b.get(&key).unwrap_err().is_not_found());
    }
}
