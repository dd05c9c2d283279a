//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use bucket_store::{InMemStore, Store};
use bucket_store_core::{Item, Key, OwnableItem};
use serde_json::json;

/// A test fixture with an owner tag and an in-memory store.
pub struct TestFixture {
    pub owner: String,
    pub store: InMemStore<OwnableItem>,
}

impl TestFixture {
    /// Create a fixture with the default owner.
    pub fn new() -> Self {
        Self::with_owner("test-owner")
    }

    /// Create a fixture whose items are tagged with `owner`.
    pub fn with_owner(owner: &str) -> Self {
        Self {
            owner: owner.to_string(),
            store: InMemStore::new(),
        }
    }

    /// Build an item owned by this fixture.
    pub fn make_item(&self, id: &str, value: i64) -> OwnableItem {
        make_item(id, &self.owner, value)
    }

    /// Push `count` items into `bucket`, with ids `item-0`, `item-1`, ...
    ///
    /// Returns the keys in insertion order.
    pub fn seed_bucket(&self, bucket: &str, count: usize) -> Vec<Key> {
        (0..count)
            .map(|i| {
                let id = format!("item-{i}");
                let key = Key::new(bucket, id.as_str());
                self.store
                    .push(&key, self.make_item(&id, i as i64))
                    .expect("in-memory push cannot fail");
                key
            })
            .collect()
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Build an item with a single `value` field.
pub fn make_item(id: &str, owner: &str, value: i64) -> OwnableItem {
    OwnableItem::new(Item::new(id).with_field("value", json!(value)), owner)
}
