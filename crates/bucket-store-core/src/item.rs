//! Item payloads handed to the store by the host service.
//!
//! The store never looks inside these. They exist so the host and the
//! engines agree on one concrete payload type, [`OwnableItem`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A user-supplied item: an id, arbitrary JSON data, and an optional TTL.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// The item id. Usually matches the id half of the key it is stored under.
    pub id: String,

    /// Arbitrary content.
    #[serde(default)]
    pub data: BTreeMap<String, serde_json::Value>,

    /// Time to live in seconds, if any. Expiry is enforced elsewhere.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<i64>,
}

impl Item {
    /// Create an item with no data and no TTL.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            data: BTreeMap::new(),
            ttl: None,
        }
    }

    /// Set a data field.
    pub fn with_field(mut self, name: impl Into<String>, value: serde_json::Value) -> Self {
        self.data.insert(name.into(), value);
        self
    }

    /// Set the TTL.
    pub fn with_ttl(mut self, ttl: i64) -> Self {
        self.ttl = Some(ttl);
        self
    }
}

/// An [`Item`] tagged with the owner that wrote it.
///
/// Ownership is a host-service concern; the store only carries the tag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OwnableItem {
    #[serde(flatten)]
    pub item: Item,

    /// Owner tag. Empty means unowned.
    #[serde(default)]
    pub owner: String,
}

impl OwnableItem {
    /// Wrap an item with an owner tag.
    pub fn new(item: Item, owner: impl Into<String>) -> Self {
        Self {
            item,
            owner: owner.into(),
        }
    }

    /// The wrapped item's id.
    pub fn id(&self) -> &str {
        &self.item.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ownable_item_flattens_item() {
        let item = OwnableItem::new(
            Item::new("abc").with_field("color", json!("red")).with_ttl(60),
            "alice",
        );
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(
            value,
            json!({"id": "abc", "data": {"color": "red"}, "ttl": 60, "owner": "alice"})
        );
    }

    #[test]
    fn test_ownable_item_missing_fields_default() {
        let item: OwnableItem = serde_json::from_value(json!({"id": "abc"})).unwrap();
        assert_eq!(item.id(), "abc");
        assert!(item.item.data.is_empty());
        assert_eq!(item.item.ttl, None);
        assert_eq!(item.owner, "");
    }
}
