//! In-memory implementation of the Store trait.
//!
//! Everything lives in one two-level map behind a single `RwLock`. Pushes
//! and deletes take the write lock; lookups and enumeration take the read
//! lock. Contention is global, which is fine for plain map operations.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use bucket_store_core::{sanitize, Cause, Key, Operation, Result, StoreError};

use crate::traits::Store;

/// Bucket name -> (item id -> item).
pub(crate) type Buckets<T> = HashMap<String, HashMap<String, T>>;

/// In-memory store implementation.
///
/// All data is lost when the store is dropped. Each instance owns its own
/// state, so independent stores can coexist in one process.
pub struct InMemStore<T> {
    data: RwLock<Buckets<T>>,
}

impl<T> InMemStore<T> {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            data: RwLock::new(HashMap::new()),
        }
    }

    // Every mutation is a single map call, so a writer that panicked cannot
    // have left a half-applied change behind. Poisoning is ignored.
    fn read(&self) -> RwLockReadGuard<'_, Buckets<T>> {
        self.data.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Buckets<T>> {
        self.data.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T> Default for InMemStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for InMemStore<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemStore")
            .field("buckets", &self.read().len())
            .finish()
    }
}

impl<T: Clone + Send + Sync> Store<T> for InMemStore<T> {
    fn push(&self, key: &Key, item: T) -> Result<()> {
        push_into(&mut self.write(), key, item);
        Ok(())
    }

    fn get(&self, key: &Key) -> Result<T> {
        get_from(&self.read(), key)
    }

    fn get_all(&self, bucket: &str) -> Result<HashMap<String, T>> {
        get_all_from(&self.read(), bucket)
    }

    fn delete(&self, key: &Key) -> Result<T> {
        delete_from(&mut self.write(), key)
    }
}

// The helpers below operate on an already-locked map so the sharded engine
// can reuse them per shard.

pub(crate) fn push_into<T>(data: &mut Buckets<T>, key: &Key, item: T) {
    data.entry(key.bucket.clone())
        .or_default()
        .insert(key.id.clone(), item);
}

pub(crate) fn get_from<T: Clone>(data: &Buckets<T>, key: &Key) -> Result<T> {
    let bucket = data
        .get(&key.bucket)
        .ok_or_else(|| sanitize(StoreError::item(Cause::BucketNotFound, key, Operation::Get)))?;
    bucket
        .get(&key.id)
        .cloned()
        .ok_or_else(|| sanitize(StoreError::item(Cause::ItemNotFound, key, Operation::Get)))
}

pub(crate) fn get_all_from<T: Clone>(
    data: &Buckets<T>,
    bucket: &str,
) -> Result<HashMap<String, T>> {
    data.get(bucket)
        .cloned()
        .ok_or_else(|| sanitize(StoreError::get_all(Cause::BucketNotFound, bucket)))
}

pub(crate) fn delete_from<T>(data: &mut Buckets<T>, key: &Key) -> Result<T> {
    // An emptied bucket keeps its inner map.
    let bucket = data.get_mut(&key.bucket).ok_or_else(|| {
        sanitize(StoreError::item(Cause::BucketNotFound, key, Operation::Delete))
    })?;
    bucket
        .remove(&key.id)
        .ok_or_else(|| sanitize(StoreError::item(Cause::ItemNotFound, key, Operation::Delete)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bucket_store_core::{ErrorKind, StoreError};
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_push_then_get() {
        let store = InMemStore::new();
        let key = Key::new("b", "x");

        store.push(&key, 7u32).unwrap();
        assert_eq!(store.get(&key).unwrap(), 7);
    }

    #[test]
    fn test_push_overwrites() {
        let store = InMemStore::new();
        let key = Key::new("b", "x");

        store.push(&key, "v1".to_string()).unwrap();
        store.push(&key, "v2".to_string()).unwrap();
        assert_eq!(store.get(&key).unwrap(), "v2");
        assert_eq!(store.get_all("b").unwrap().len(), 1);
    }

    #[test]
    fn test_get_missing_bucket() {
        let store: InMemStore<u32> = InMemStore::new();
        let key = Key::new("nope", "x");

        let err = store.get(&key).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.cause(), Some(Cause::BucketNotFound));
        assert_eq!(
            err.inner(),
            &StoreError::item(Cause::BucketNotFound, &key, Operation::Get)
        );
    }

    #[test]
    fn test_get_missing_item() {
        let store = InMemStore::new();
        store.push(&Key::new("b", "a"), 1u32).unwrap();

        let key = Key::new("b", "b");
        let err = store.get(&key).unwrap_err();
        assert_eq!(
            err.inner(),
            &StoreError::item(Cause::ItemNotFound, &key, Operation::Get)
        );
    }

    #[test]
    fn test_get_all_missing_bucket() {
        let store: InMemStore<u32> = InMemStore::new();

        let err = store.get_all("nope").unwrap_err();
        assert_eq!(err.cause(), Some(Cause::BucketNotFound));
        assert_eq!(
            err.inner(),
            &StoreError::get_all(Cause::BucketNotFound, "nope")
        );
    }

    #[test]
    fn test_delete_returns_item_and_keeps_bucket() {
        let store = InMemStore::new();
        let key = Key::new("b", "x");
        store.push(&key, 42u32).unwrap();

        assert_eq!(store.delete(&key).unwrap(), 42);
        assert_eq!(
            store.get(&key).unwrap_err().cause(),
            Some(Cause::ItemNotFound)
        );
        assert!(store.get_all("b").unwrap().is_empty());
    }

    #[test]
    fn test_delete_failures_use_delete_operation() {
        let store = InMemStore::<u32>::new();
        let missing_bucket = Key::new("nope", "x");
        let err = store.delete(&missing_bucket).unwrap_err();
        assert_eq!(
            err.inner(),
            &StoreError::item(Cause::BucketNotFound, &missing_bucket, Operation::Delete)
        );

        store.push(&Key::new("b", "a"), 1u32).unwrap();
        let missing_item = Key::new("b", "x");
        let err = store.delete(&missing_item).unwrap_err();
        assert_eq!(
            err.inner(),
            &StoreError::item(Cause::ItemNotFound, &missing_item, Operation::Delete)
        );

        // Failed deletes change nothing.
        assert_eq!(store.get(&Key::new("b", "a")).unwrap(), 1);
    }

    #[test]
    fn test_get_all_is_a_snapshot() {
        let store = InMemStore::new();
        store.push(&Key::new("b", "a"), 1u32).unwrap();

        let snapshot = store.get_all("b").unwrap();
        store.push(&Key::new("b", "c"), 2u32).unwrap();

        assert_eq!(snapshot.len(), 1);
        assert_eq!(store.get_all("b").unwrap().len(), 2);
    }

    #[test]
    fn test_instances_are_independent() {
        let a = InMemStore::new();
        let b: InMemStore<u32> = InMemStore::new();
        a.push(&Key::new("b", "x"), 1u32).unwrap();

        assert!(b.get_all("b").is_err());
    }

    #[test]
    fn test_survives_poisoned_lock() {
        let store = Arc::new(InMemStore::new());
        store.push(&Key::new("b", "x"), 1u32).unwrap();

        let poisoner = Arc::clone(&store);
        let _ = thread::spawn(move || {
            let _guard = poisoner.data.write().unwrap();
            panic!("poison the lock");
        })
        .join();

        assert!(store.data.is_poisoned());
        assert_eq!(store.get(&Key::new("b", "x")).unwrap(), 1);
        store.push(&Key::new("b", "y"), 2u32).unwrap();
        assert_eq!(store.get_all("b").unwrap().len(), 2);
    }

    #[test]
    fn test_concurrent_pushes() {
        let store = Arc::new(InMemStore::<u32>::new());
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for i in 0..100 {
                        let key = Key::new(format!("bucket-{}", t % 2), format!("{t}-{i}"));
                        store.push(&key, i).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let total: usize = (0..2)
            .map(|b| store.get_all(&format!("bucket-{b}")).unwrap().len())
            .sum();
        assert_eq!(total, 800);
        assert_eq!(store.get(&Key::new("bucket-1", "7-99")).unwrap(), 99);
    }
}
