//! # Bucket Store Core
//!
//! Pure model types for the bucket store: keys, item payloads, and the
//! error taxonomy shared by every store engine.
//!
//! This crate contains no locking and no I/O.
//!
//! ## Key Types
//!
//! - [`Key`] - Two-level `(bucket, id)` address
//! - [`OwnableItem`] - The default payload: an [`Item`] plus an owner tag
//! - [`Cause`] - Root cause of a failure (`BucketNotFound`, `ItemNotFound`)
//! - [`StoreError`] - A cause wrapped with its operation and key or bucket
//! - [`SanitizedError`] - The stable error the host service sees
//!
//! ## Errors
//!
//! Engines build a [`StoreError`] and pass it through [`sanitize`] before
//! returning it. Callers match on [`SanitizedError::kind`] or
//! [`SanitizedError::cause`], never on message text.

pub mod error;
pub mod item;
pub mod types;

pub use error::{sanitize, Cause, ErrorKind, Operation, Result, SanitizedError, StoreError};
pub use item::{Item, OwnableItem};
pub use types::Key;
