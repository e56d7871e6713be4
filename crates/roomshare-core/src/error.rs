//! Error types for batch loading.

use thiserror::Error;

use crate::types::StudentId;

/// Result type alias for batch loading.
pub type LoadResult<T> = Result<T, LoadError>;

/// Reasons a batch is rejected. Any one of them rejects the whole batch.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read batch: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed batch: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("student id must be positive, got {0}")]
    InvalidId(i64),

    #[error("duplicate student id {0}")]
    DuplicateId(StudentId),

    #[error("student {id}: unknown gender {value:?}")]
    InvalidGender { id: StudentId, value: String },

    #[error("student {id}: age must be a non-negative integer, got {age}")]
    InvalidAge { id: StudentId, age: i64 },

    #[error("student {0} lists itself as a relation")]
    SelfRelation(StudentId),

    #[error("student {id} lists invalid id {relation}")]
    InvalidRelation { id: StudentId, relation: i64 },

    #[error("student {id} lists unknown student {relation}")]
    UnknownRelation { id: StudentId, relation: StudentId },

    #[error("student {id} lists student {relation} more than once")]
    DuplicateRelation { id: StudentId, relation: StudentId },
}

/// An engine policy the assignment run cannot honor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    #[error("room capacity must be at least {min}, got {capacity}")]
    CapacityTooSmall { capacity: usize, min: usize },
}
