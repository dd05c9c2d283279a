//! Error types for store operations.
//!
//! Failures are classified in two layers. A [`Cause`] says what was missing.
//! A [`StoreError`] wraps the cause with the operation and the key or bucket
//! it was addressing. Before an error leaves a store engine it goes through
//! [`sanitize`], which produces the stable, host-facing [`SanitizedError`].

use std::fmt;

use thiserror::Error;

use crate::types::Key;

/// The root cause of a lookup failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum Cause {
    /// The bucket has never received an item.
    #[error("bucket not found")]
    BucketNotFound,

    /// The bucket exists but has no item under the requested id.
    #[error("item not found")]
    ItemNotFound,
}

/// The store operation an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Insert or replace an item.
    Push,
    /// Look up a single item.
    Get,
    /// Enumerate a bucket.
    GetAll,
    /// Remove a single item.
    Delete,
}

impl Operation {
    /// The operation's wire name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Operation::Push => "push",
            Operation::Get => "get",
            Operation::GetAll => "getAll",
            Operation::Delete => "delete",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An internal store error: a cause plus the context it happened in.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A single-item operation (`get`, `delete`) failed.
    #[error("{operation} {key}: {cause}")]
    ItemOperation {
        #[source]
        cause: Cause,
        key: Key,
        operation: Operation,
    },

    /// Enumerating a bucket failed.
    #[error("getAll {bucket}: {cause}")]
    GetAllItems {
        #[source]
        cause: Cause,
        bucket: String,
    },

    /// The backing implementation itself failed. In-memory engines never
    /// produce this.
    #[error("{operation} failed: {message}")]
    Backend { operation: Operation, message: String },
}

impl StoreError {
    /// Wrap a cause for a single-item operation.
    pub fn item(cause: Cause, key: &Key, operation: Operation) -> Self {
        StoreError::ItemOperation {
            cause,
            key: key.clone(),
            operation,
        }
    }

    /// Wrap a cause for a bucket enumeration.
    pub fn get_all(cause: Cause, bucket: &str) -> Self {
        StoreError::GetAllItems {
            cause,
            bucket: bucket.to_string(),
        }
    }

    /// The root cause, if this is a not-found error.
    pub fn cause(&self) -> Option<Cause> {
        match self {
            StoreError::ItemOperation { cause, .. } | StoreError::GetAllItems { cause, .. } => {
                Some(*cause)
            }
            StoreError::Backend { .. } => None,
        }
    }

    /// The operation that failed.
    pub fn operation(&self) -> Operation {
        match self {
            StoreError::ItemOperation { operation, .. } | StoreError::Backend { operation, .. } => {
                *operation
            }
            StoreError::GetAllItems { .. } => Operation::GetAll,
        }
    }
}

/// The public classification of a sanitized error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The addressed bucket or item does not exist.
    NotFound,
    /// The store could not complete the operation.
    OperationFailed,
}

impl ErrorKind {
    /// HTTP status code the host should answer with.
    pub const fn status_code(self) -> u16 {
        match self {
            ErrorKind::NotFound => 404,
            ErrorKind::OperationFailed => 500,
        }
    }
}

/// The error contract exposed to the host service.
///
/// The display message is stable and never leaks the key or backend detail.
/// The internal [`StoreError`] is kept as the error source for logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedError {
    kind: ErrorKind,
    inner: StoreError,
}

impl SanitizedError {
    /// The public classification.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The root cause, when the error is a not-found.
    pub fn cause(&self) -> Option<Cause> {
        self.inner.cause()
    }

    /// The HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        self.kind.status_code()
    }

    /// Whether the addressed bucket or item was missing.
    pub fn is_not_found(&self) -> bool {
        self.kind == ErrorKind::NotFound
    }

    /// The internal error this was built from.
    pub fn inner(&self) -> &StoreError {
        &self.inner
    }

    /// Consume and return the internal error.
    pub fn into_inner(self) -> StoreError {
        self.inner
    }
}

impl fmt::Display for SanitizedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.kind, self.cause()) {
            (ErrorKind::NotFound, Some(cause)) => write!(f, "{cause}"),
            _ => f.write_str("storage operation failed"),
        }
    }
}

impl std::error::Error for SanitizedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.inner)
    }
}

impl From<StoreError> for SanitizedError {
    fn from(e: StoreError) -> Self {
        sanitize(e)
    }
}

/// Map an internal error onto the public error contract.
pub fn sanitize(err: StoreError) -> SanitizedError {
    let kind = match err.cause() {
        Some(Cause::BucketNotFound | Cause::ItemNotFound) => ErrorKind::NotFound,
        None => ErrorKind::OperationFailed,
    };
    SanitizedError { kind, inner: err }
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, SanitizedError>;
