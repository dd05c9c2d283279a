//! # Bucket Store Testkit
//!
//! Testing utilities for the bucket store.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Contract suite**: the behaviour every `Store` engine must show, as
//!   plain functions that panic on violation
//! - **Generators**: Proptest strategies for keys, items, and operation sequences
//! - **Fixtures**: Helper structs for setting up test scenarios
//!
//! ## Contract Suite
//!
//! Point the suite at a constructor for the engine under test:
//!
//! ```rust
//! use bucket_store::{InMemStore, ShardedInMemStore};
//! use bucket_store::core::OwnableItem;
//! use bucket_store_testkit::contract::run_all;
//!
//! run_all(InMemStore::<OwnableItem>::new);
//! run_all(|| ShardedInMemStore::<OwnableItem>::with_shards(4));
//! ```
//!
//! ## Property Testing
//!
//! Use the generators with proptest:
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use bucket_store::InMemStore;
//! use bucket_store::core::OwnableItem;
//! use bucket_store_testkit::{contract::check_against_model, generators::op};
//!
//! proptest! {
//!     #[test]
//!     fn store_matches_model(ops in prop::collection::vec(op(), 0..64)) {
//!         check_against_model(&InMemStore::<OwnableItem>::new(), &ops);
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use bucket_store_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::new();
//! let keys = fixture.seed_bucket("devices", 3);
//! assert_eq!(keys.len(), 3);
//! ```

pub mod contract;
pub mod fixtures;
pub mod generators;

pub use contract::{check_against_model, run_all};
pub use fixtures::{make_item, TestFixture};
pub use generators::{key, keyed_item, op, ownable_item, Op};
