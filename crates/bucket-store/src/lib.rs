//! # Bucket Store
//!
//! Storage abstraction for two-level `(bucket, id)` addressed items, with
//! in-memory engines.
//!
//! ## Overview
//!
//! The [`Store`] trait is the contract the host service programs against.
//! Any backing engine that satisfies it is interchangeable. This crate
//! ships two engines that keep state only for the lifetime of the instance:
//!
//! - [`InMemStore`] - One reader/writer lock over the whole map
//! - [`ShardedInMemStore`] - Buckets hashed across several locks
//!
//! ## Usage
//!
//! ```rust
//! use bucket_store::{InMemStore, Store};
//! use bucket_store::core::{Cause, Key};
//!
//! let store = InMemStore::new();
//! let key = Key::new("devices", "abc");
//!
//! store.push(&key, "payload".to_string()).unwrap();
//! assert_eq!(store.get(&key).unwrap(), "payload");
//!
//! let err = store.get(&Key::new("devices", "nope")).unwrap_err();
//! assert_eq!(err.cause(), Some(Cause::ItemNotFound));
//! ```
//!
//! ## Design Notes
//!
//! - **Upsert**: `push` always inserts or replaces
//! - **Implicit buckets**: created by the first push, never removed by deletes
//! - **Classified errors**: every failure is `BucketNotFound` or `ItemNotFound`,
//!   wrapped with its operation and sanitized before it is returned

pub mod memory;
pub mod sharded;
pub mod traits;

pub use bucket_store_core as core;

pub use memory::InMemStore;
pub use sharded::{ShardedInMemStore, DEFAULT_SHARDS};
pub use traits::{Store, StoreExt};
