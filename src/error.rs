//! Error taxonomy for store operations.
//!
//! Every variant is recoverable at the call site: a rejected operation leaves
//! the store exactly as it was.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    /// Input failed a constraint; nothing was written.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Delete refused because other rows still reference the target.
    #[error("Cannot delete {entity} {id}: still has {dependents}")]
    Guard {
        entity: &'static str,
        id: String,
        dependents: String,
    },

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl LedgerError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_guard(&self) -> bool {
        matches!(self, Self::Guard { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

pub type LedgerResult<T> = Result<T, LedgerError>;
