//! # Bucket Store Service
//!
//! Host-facing wiring for the bucket store: engine selection from
//! configuration, and an instrumented [`ItemService`] for request handlers.
//!
//! ## Usage
//!
//! ```rust
//! use bucket_store_service::{DynItemService, StoreConfig};
//! use bucket_store_service::core::{Item, Key, OwnableItem};
//!
//! let service = DynItemService::from_config(&StoreConfig::default()).unwrap();
//! let key = Key::new("devices", "abc");
//!
//! service
//!     .push(&key, OwnableItem::new(Item::new("abc"), "alice"))
//!     .unwrap();
//! assert_eq!(service.get(&key).unwrap().owner, "alice");
//!
//! let err = service.get(&Key::new("devices", "nope")).unwrap_err();
//! assert_eq!(err.status_code(), 404);
//! ```
//!
//! ## Re-exports
//!
//! - `bucket_store_service::core` - Model and error types
//! - `bucket_store_service::store` - The `Store` trait and engines

pub mod config;
pub mod error;
pub mod service;

pub use bucket_store as store;
pub use bucket_store_core as core;

pub use config::{provide_store, Backend, StoreConfig};
pub use error::{Result, ServiceError};
pub use service::{DynItemService, ItemService};
