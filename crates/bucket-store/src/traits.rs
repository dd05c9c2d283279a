//! Store trait: the abstract interface every backing engine satisfies.
//!
//! The host service only talks to [`Store`]. In-memory engines live in this
//! crate; persistent engines can implement the same trait elsewhere.

use std::collections::HashMap;

use bucket_store_core::{Key, Result};

/// The store contract: two-level `(bucket, id)` addressing over an opaque
/// payload `T`.
///
/// Every error returned has already been sanitized.
///
/// # Design Notes
///
/// - **Upsert only**: `push` always inserts or replaces.
/// - **Buckets are implicit**: a bucket exists once something has been
///   pushed into it, and stays around after its last item is deleted.
/// - **Snapshots**: `get_all` returns a copy, not a live view.
pub trait Store<T>: Send + Sync {
    /// Insert or replace the item stored under `key`.
    ///
    /// In-memory engines never fail. Fallible backends report through the
    /// `Result`, so callers must still handle it.
    fn push(&self, key: &Key, item: T) -> Result<()>;

    /// Get the item stored under `key`.
    ///
    /// Fails with `BucketNotFound` if the bucket was never written, or
    /// `ItemNotFound` if the bucket exists but the id does not.
    fn get(&self, key: &Key) -> Result<T>;

    /// Get every item in `bucket`, keyed by id.
    ///
    /// Fails with `BucketNotFound` if the bucket was never written. An
    /// emptied bucket returns an empty map.
    fn get_all(&self, bucket: &str) -> Result<HashMap<String, T>>;

    /// Remove the item stored under `key` and return it.
    ///
    /// Fails like [`Store::get`]; on failure nothing is changed.
    fn delete(&self, key: &Key) -> Result<T>;
}

/// Extension trait for common store patterns.
pub trait StoreExt<T>: Store<T> {
    /// Look up `key`, mapping a not-found into `None`.
    ///
    /// Backend failures are still returned as errors.
    fn get_or_none(&self, key: &Key) -> Result<Option<T>> {
        match self.get(key) {
            Ok(item) => Ok(Some(item)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Whether an item is stored under `key`.
    fn contains(&self, key: &Key) -> Result<bool> {
        Ok(self.get_or_none(key)?.is_some())
    }
}

impl<T, S: Store<T> + ?Sized> StoreExt<T> for S {}
