//! Sharded in-memory store.
//!
//! Same contract as [`InMemStore`](crate::InMemStore), but buckets are
//! spread over several independently locked shards. A bucket name always
//! hashes to the same shard, so all of a bucket's items share one lock and
//! per-key ordering is unchanged. Only contention between unrelated buckets
//! goes away.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use bucket_store_core::{Key, Result};

use crate::memory::{delete_from, get_all_from, get_from, push_into, Buckets};
use crate::traits::Store;

/// Shard count used by [`ShardedInMemStore::new`].
pub const DEFAULT_SHARDS: usize = 16;

/// In-memory store with one `RwLock` per shard.
pub struct ShardedInMemStore<T> {
    shards: Vec<RwLock<Buckets<T>>>,
}

impl<T> ShardedInMemStore<T> {
    /// Create a store with [`DEFAULT_SHARDS`] shards.
    pub fn new() -> Self {
        Self::with_shards(DEFAULT_SHARDS)
    }

    /// Create a store with `count` shards. Zero is treated as one.
    pub fn with_shards(count: usize) -> Self {
        let count = count.max(1);
        tracing::debug!(shards = count, "creating sharded in-memory store");
        Self {
            shards: (0..count).map(|_| RwLock::new(HashMap::new())).collect(),
        }
    }

    /// Number of shards.
    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    /// The shard index a bucket lives in.
    pub fn shard_for(&self, bucket: &str) -> usize {
        let hash = blake3::hash(bucket.as_bytes());
        let mut prefix = [0u8; 8];
        prefix.copy_from_slice(&hash.as_bytes()[..8]);
        (u64::from_le_bytes(prefix) % self.shards.len() as u64) as usize
    }

    fn read(&self, bucket: &str) -> RwLockReadGuard<'_, Buckets<T>> {
        self.shards[self.shard_for(bucket)]
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self, bucket: &str) -> RwLockWriteGuard<'_, Buckets<T>> {
        self.shards[self.shard_for(bucket)]
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T> Default for ShardedInMemStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for ShardedInMemStore<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShardedInMemStore")
            .field("shards", &self.shards.len())
            .finish()
    }
}

impl<T: Clone + Send + Sync> Store<T> for ShardedInMemStore<T> {
    fn push(&self, key: &Key, item: T) -> Result<()> {
        push_into(&mut self.write(&key.bucket), key, item);
        Ok(())
    }

    fn get(&self, key: &Key) -> Result<T> {
        get_from(&self.read(&key.bucket), key)
    }

    fn get_all(&self, bucket: &str) -> Result<HashMap<String, T>> {
        get_all_from(&self.read(bucket), bucket)
    }

    fn delete(&self, key: &Key) -> Result<T> {
        delete_from(&mut self.write(&key.bucket), key)
    }
}
