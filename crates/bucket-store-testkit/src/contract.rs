//! The store contract as a reusable suite.
//!
//! Any [`Store`] implementation can be checked by handing a constructor to
//! [`run_all`]. Each check gets a fresh, empty store and panics on the first
//! violation, so the suite slots straight into a `#[test]`.

use std::collections::HashMap;
use std::thread;

use bucket_store::Store;
use bucket_store_core::{Cause, Key, Operation, OwnableItem, StoreError};

use crate::fixtures::make_item;
use crate::generators::Op;

/// Run every contract check against stores built by `make`.
pub fn run_all<S: Store<OwnableItem>>(make: impl Fn() -> S) {
    push_then_get(&make());
    last_write_wins(&make());
    missing_bucket(&make());
    missing_item_in_existing_bucket(&make());
    delete_removes_and_returns(&make());
    get_all_reflects_current_items(&make());
    get_all_is_a_snapshot(&make());
    failed_delete_changes_nothing(&make());
    concurrent_pushes(&make(), 8, 200);
    concurrent_readers_and_writers(&make());
}

/// A pushed item comes back unchanged.
pub fn push_then_get<S: Store<OwnableItem> + ?Sized>(store: &S) {
    let key = Key::new("b", "x");
    let item = make_item("x", "alice", 1);

    store.push(&key, item.clone()).expect("push");
    assert_eq!(store.get(&key).expect("get"), item);
}

/// A second push to the same key replaces the first.
pub fn last_write_wins<S: Store<OwnableItem> + ?Sized>(store: &S) {
    let key = Key::new("b", "x");

    store.push(&key, make_item("x", "alice", 1)).expect("push v1");
    store.push(&key, make_item("x", "alice", 2)).expect("push v2");

    assert_eq!(store.get(&key).expect("get"), make_item("x", "alice", 2));
    assert_eq!(store.get_all("b").expect("get_all").len(), 1);
}

/// A never-written bucket is `BucketNotFound` for both lookup flavours.
pub fn missing_bucket<S: Store<OwnableItem> + ?Sized>(store: &S) {
    let key = Key::new("never", "x");

    let err = store.get(&key).expect_err("get on missing bucket");
    assert!(err.is_not_found());
    assert_eq!(
        err.inner(),
        &StoreError::item(Cause::BucketNotFound, &key, Operation::Get)
    );

    let err = store.get_all("never").expect_err("get_all on missing bucket");
    assert!(err.is_not_found());
    assert_eq!(
        err.inner(),
        &StoreError::get_all(Cause::BucketNotFound, "never")
    );
}

/// An existing bucket without the id is `ItemNotFound`, not `BucketNotFound`.
pub fn missing_item_in_existing_bucket<S: Store<OwnableItem> + ?Sized>(store: &S) {
    store
        .push(&Key::new("b", "a"), make_item("a", "alice", 1))
        .expect("push");

    let key = Key::new("b", "b");
    let err = store.get(&key).expect_err("get on missing item");
    assert_eq!(err.cause(), Some(Cause::ItemNotFound));
    assert_eq!(
        err.inner(),
        &StoreError::item(Cause::ItemNotFound, &key, Operation::Get)
    );
}

/// Delete hands back the item; the emptied bucket still exists.
pub fn delete_removes_and_returns<S: Store<OwnableItem> + ?Sized>(store: &S) {
    let key = Key::new("b", "x");
    let item = make_item("x", "alice", 1);
    store.push(&key, item.clone()).expect("push");

    assert_eq!(store.delete(&key).expect("delete"), item);
    assert_eq!(
        store.get(&key).expect_err("get after delete").cause(),
        Some(Cause::ItemNotFound)
    );
    assert!(store.get_all("b").expect("get_all after delete").is_empty());

    // Deleting again is an item-level miss, not a bucket-level one.
    let err = store.delete(&key).expect_err("second delete");
    assert_eq!(
        err.inner(),
        &StoreError::item(Cause::ItemNotFound, &key, Operation::Delete)
    );
}

/// Enumeration returns exactly the current items, after overwrites and deletes.
pub fn get_all_reflects_current_items<S: Store<OwnableItem> + ?Sized>(store: &S) {
    for (id, value) in [("a", 1), ("b", 2), ("c", 3)] {
        store
            .push(&Key::new("bucket", id), make_item(id, "alice", value))
            .expect("push");
    }
    store
        .push(&Key::new("other", "a"), make_item("a", "bob", 9))
        .expect("push other");

    let items = store.get_all("bucket").expect("get_all");
    let mut ids: Vec<_> = items.keys().cloned().collect();
    ids.sort();
    assert_eq!(ids, ["a", "b", "c"]);
    assert_eq!(items["b"], make_item("b", "alice", 2));

    store
        .push(&Key::new("bucket", "b"), make_item("b", "alice", 20))
        .expect("overwrite");
    store.delete(&Key::new("bucket", "c")).expect("delete");

    let items = store.get_all("bucket").expect("get_all after changes");
    assert_eq!(items.len(), 2);
    assert_eq!(items["a"], make_item("a", "alice", 1));
    assert_eq!(items["b"], make_item("b", "alice", 20));
}

/// A returned enumeration does not follow later writes.
pub fn get_all_is_a_snapshot<S: Store<OwnableItem> + ?Sized>(store: &S) {
    store
        .push(&Key::new("b", "a"), make_item("a", "alice", 1))
        .expect("push");
    let snapshot = store.get_all("b").expect("get_all");

    store
        .push(&Key::new("b", "z"), make_item("z", "alice", 2))
        .expect("push after snapshot");

    assert_eq!(snapshot.len(), 1);
    assert_eq!(store.get_all("b").expect("get_all again").len(), 2);
}

/// Failed deletes leave state untouched.
pub fn failed_delete_changes_nothing<S: Store<OwnableItem> + ?Sized>(store: &S) {
    assert!(store.delete(&Key::new("never", "x")).is_err());
    assert!(store.get_all("never").is_err());

    store
        .push(&Key::new("b", "a"), make_item("a", "alice", 1))
        .expect("push");
    assert!(store.delete(&Key::new("b", "x")).is_err());
    assert_eq!(store.get_all("b").expect("get_all").len(), 1);
}

/// Many threads pushing distinct keys; every key is retrievable afterwards.
pub fn concurrent_pushes<S: Store<OwnableItem> + ?Sized>(
    store: &S,
    threads: usize,
    per_thread: usize,
) {
    thread::scope(|scope| {
        for t in 0..threads {
            scope.spawn(move || {
                for i in 0..per_thread {
                    let id = format!("{t}-{i}");
                    let key = Key::new(format!("bucket-{}", t % 3), id.as_str());
                    store
                        .push(&key, make_item(&id, "writer", i as i64))
                        .expect("push");
                }
            });
        }
    });

    let mut seen = 0;
    for b in 0..threads.min(3) {
        seen += store
            .get_all(&format!("bucket-{b}"))
            .expect("get_all")
            .len();
    }
    assert_eq!(seen, threads * per_thread);

    for t in 0..threads {
        for i in 0..per_thread {
            let id = format!("{t}-{i}");
            let key = Key::new(format!("bucket-{}", t % 3), id.as_str());
            assert_eq!(
                store.get(&key).expect("get"),
                make_item(&id, "writer", i as i64)
            );
        }
    }
}

/// Readers running alongside a writer never see a torn item.
pub fn concurrent_readers_and_writers<S: Store<OwnableItem> + ?Sized>(store: &S) {
    let key = Key::new("hot", "x");
    store.push(&key, make_item("x", "writer", 0)).expect("push");

    thread::scope(|scope| {
        scope.spawn(|| {
            for v in 1..=500 {
                store
                    .push(&key, make_item("x", "writer", v))
                    .expect("push");
            }
        });
        for _ in 0..4 {
            scope.spawn(|| {
                let mut last = 0;
                for _ in 0..500 {
                    let item = store.get(&key).expect("get");
                    let value = item.item.data["value"].as_i64().expect("value field");
                    assert_eq!(item, make_item("x", "writer", value));
                    // A single writer only moves forward.
                    assert!(value >= last);
                    last = value;
                }
            });
        }
    });

    assert_eq!(store.get(&key).expect("get"), make_item("x", "writer", 500));
}

/// Apply `ops` to `store` and to a plain `HashMap` model, asserting that
/// every result matches.
pub fn check_against_model<S: Store<OwnableItem> + ?Sized>(store: &S, ops: &[Op]) {
    let mut model: HashMap<String, HashMap<String, OwnableItem>> = HashMap::new();

    for op in ops {
        match op {
            Op::Push(key, item) => {
                store.push(key, item.clone()).expect("push");
                model
                    .entry(key.bucket.clone())
                    .or_default()
                    .insert(key.id.clone(), item.clone());
            }
            Op::Get(key) => {
                let expected = match model.get(&key.bucket) {
                    None => Err(Cause::BucketNotFound),
                    Some(bucket) => bucket.get(&key.id).cloned().ok_or(Cause::ItemNotFound),
                };
                let actual = store.get(key).map_err(|e| e.cause().expect("not-found cause"));
                assert_eq!(actual, expected, "get {key}");
            }
            Op::GetAll(bucket) => {
                let expected = model.get(bucket).cloned().ok_or(Cause::BucketNotFound);
                let actual = store
                    .get_all(bucket)
                    .map_err(|e| e.cause().expect("not-found cause"));
                assert_eq!(actual, expected, "getAll {bucket}");
            }
            Op::Delete(key) => {
                let expected = match model.get_mut(&key.bucket) {
                    None => Err(Cause::BucketNotFound),
                    Some(bucket) => bucket.remove(&key.id).ok_or(Cause::ItemNotFound),
                };
                let actual = store
                    .delete(key)
                    .map_err(|e| e.cause().expect("not-found cause"));
                assert_eq!(actual, expected, "delete {key}");
            }
        }
    }
}
