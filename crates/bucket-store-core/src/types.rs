//! Addressing types for the store.
//!
//! Every stored item is addressed by a two-level [`Key`]: the bucket it
//! belongs to, and its id within that bucket.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The two-part address of an item: `(bucket, id)`.
///
/// Both parts are opaque to the store. No format is enforced here; the host
/// service decides what a valid bucket or id looks like.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Key {
    /// The partition of the key space.
    pub bucket: String,
    /// The item id, unique within its bucket.
    pub id: String,
}

impl Key {
    /// Create a key from a bucket name and an item id.
    pub fn new(bucket: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            id: id.into(),
        }
    }

    /// The bucket half of the key.
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// The id half of the key.
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Key({}/{})", self.bucket, self.id)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.bucket, self.id)
    }
}

impl<B: Into<String>, I: Into<String>> From<(B, I)> for Key {
    fn from((bucket, id): (B, I)) -> Self {
        Self::new(bucket, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_key_display() {
        let key = Key::new("devices", "abc");
        assert_eq!(format!("{}", key), "devices/abc");
    }

    #[test]
    fn test_key_debug() {
        let key = Key::new("devices", "abc");
        let debug = format!("{:?}", key);
        assert_eq!(debug, "Key(devices/abc)");
    }

    #[test]
    fn test_key_from_tuple() {
        let key: Key = ("b", "i").into();
        assert_eq!(key.bucket(), "b");
        assert_eq!(key.id(), "i");
    }

    #[test]
    fn test_key_accepts_any_shape() {
        // Empty and slash-containing parts are the caller's business.
        let key = Key::new("", "a/b");
        assert_eq!(key.bucket(), "");
        assert_eq!(key.id(), "a/b");
    }

    #[test]
    fn test_key_json_shape() {
        let key = Key::new("b", "i");
        let json = serde_json::to_value(&key).unwrap();
        assert_eq!(json, serde_json::json!({"bucket": "b", "id": "i"}));
    }

    proptest! {
        #[test]
        fn test_key_json_roundtrip(bucket in ".{0,24}", id in ".{0,24}") {
            let key = Key::new(bucket.as_str(), id.as_str());
            let json = serde_json::to_string(&key).unwrap();
            let recovered: Key = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(recovered, key);
        }

        #[test]
        fn test_key_display_joins_parts(bucket in "[a-z0-9-]{0,16}", id in "[a-z0-9-]{0,16}") {
            let key = Key::new(bucket.as_str(), id.as_str());
            prop_assert_eq!(key.to_string(), format!("{bucket}/{id}"));
        }
    }
}
