//! Proptest generators for property-based testing.

use proptest::prelude::*;

use bucket_store_core::{Item, Key, OwnableItem};

/// Generate a bucket name.
pub fn bucket_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{0,15}".prop_map(String::from)
}

/// Generate an item id.
pub fn item_id() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9]{1,12}".prop_map(String::from)
}

/// Generate a key.
pub fn key() -> impl Strategy<Value = Key> {
    (bucket_name(), item_id()).prop_map(|(bucket, id)| Key::new(bucket, id))
}

/// Generate an owner tag, possibly empty.
pub fn owner() -> impl Strategy<Value = String> {
    "[a-z]{0,8}".prop_map(String::from)
}

/// Generate a small JSON value.
pub fn json_value() -> impl Strategy<Value = serde_json::Value> {
    prop_oneof![
        Just(serde_json::Value::Null),
        any::<bool>().prop_map(serde_json::Value::from),
        any::<i64>().prop_map(serde_json::Value::from),
        "[ -~]{0,16}".prop_map(serde_json::Value::from),
    ]
}

/// Generate an item with the given id.
pub fn item_with_id(id: String) -> impl Strategy<Value = Item> {
    (
        prop::collection::btree_map("[a-z]{1,8}", json_value(), 0..4),
        any::<Option<i64>>(),
    )
        .prop_map(move |(data, ttl)| Item {
            id: id.clone(),
            data,
            ttl,
        })
}

/// Generate an ownable item with the given id.
pub fn ownable_item_with_id(id: String) -> impl Strategy<Value = OwnableItem> {
    (item_with_id(id), owner()).prop_map(|(item, owner)| OwnableItem { item, owner })
}

/// Generate an ownable item with an arbitrary id.
pub fn ownable_item() -> impl Strategy<Value = OwnableItem> {
    item_id().prop_flat_map(ownable_item_with_id)
}

/// Generate a key together with a matching ownable item.
pub fn keyed_item() -> impl Strategy<Value = (Key, OwnableItem)> {
    key().prop_flat_map(|key| {
        let id = key.id.clone();
        (Just(key), ownable_item_with_id(id))
    })
}

/// A sequence of store operations, for model-based tests.
#[derive(Debug, Clone)]
pub enum Op {
    Push(Key, OwnableItem),
    Get(Key),
    GetAll(String),
    Delete(Key),
}

/// Generate an operation over a small key space so operations collide.
pub fn op() -> impl Strategy<Value = Op> {
    let bucket = prop_oneof![Just("a".to_string()), Just("b".to_string()), Just("c".to_string())];
    let id = prop_oneof![Just("x".to_string()), Just("y".to_string())];
    (bucket, id).prop_flat_map(|(bucket, id)| {
        let key = Key::new(bucket.clone(), id.clone());
        prop_oneof![
            ownable_item_with_id(id).prop_map({
                let key = key.clone();
                move |item| Op::Push(key.clone(), item)
            }),
            Just(Op::Get(key.clone())),
            Just(Op::GetAll(bucket)),
            Just(Op::Delete(key)),
        ]
    })
}
