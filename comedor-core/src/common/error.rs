//! Unified error handling
//!
//! All failures surface as user-facing messages at the payment orchestrator
//! boundary; nothing is silently swallowed and nothing is retried
//! automatically.
//!
//! # Taxonomy
//!
//! | Variant | Class | Handling |
//! |---------|-------|----------|
//! | `MalformedDate` | input contract violation | fatal to the operation, not retried |
//! | `Validation` | rejected before any external call | user corrects input |
//! | `Conflict` | prior paid order covers a pending line | user removes the selection |
//! | `Service` | transient collaborator failure | user may retry the whole attempt |
//! | `Storage` | session mirror failure | surfaced; selections stay in memory |

use thiserror::Error;

/// Core errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Selection date failed to parse (`YYYY-MM-DD` expected)
    #[error("Malformed date: {0}")]
    MalformedDate(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    /// A previously paid order already covers part of this submission
    #[error("Already paid: {0}")]
    Conflict(String),

    /// External collaborator failure (order or menu service)
    #[error("Service error: {0}")]
    Service(String),

    /// Local persistence failure (session continuity mirror)
    #[error("Storage error: {0}")]
    Storage(String),
}

impl CoreError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn service(msg: impl Into<String>) -> Self {
        Self::Service(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}

pub type CoreResult<T> = Result<T, CoreError>;

// redb surfaces several error types; they all fold into `Storage`.
impl From<redb::DatabaseError> for CoreError {
    fn from(e: redb::DatabaseError) -> Self {
        Self::Storage(e.to_string())
    }
}

impl From<redb::TransactionError> for CoreError {
    fn from(e: redb::TransactionError) -> Self {
        Self::Storage(e.to_string())
    }
}

impl From<redb::TableError> for CoreError {
    fn from(e: redb::TableError) -> Self {
        Self::Storage(e.to_string())
    }
}

impl From<redb::StorageError> for CoreError {
    fn from(e: redb::StorageError) -> Self {
        Self::Storage(e.to_string())
    }
}

impl From<redb::CommitError> for CoreError {
    fn from(e: redb::CommitError) -> Self {
        Self::Storage(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        Self::Storage(format!("Serialization error: {}", e))
    }
}
