use std::fmt;
use thiserror::Error;

/// Failures raised by a storage backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    #[error("database error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("store lock poisoned")]
    Poisoned,
}

/// Which kind of document a lookup was after.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Mentor,
    Student,
    PreviousMentor,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Mentor => write!(f, "Mentor"),
            Entity::Student => write!(f, "Student"),
            Entity::PreviousMentor => write!(f, "Previous Mentor"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0} not found")]
    NotFound(Entity),

    #[error("{0}")]
    InvalidInput(String),

    #[error(transparent)]
    Storage(#[from] StoreError),
}

pub type StoreResult<T> = Result<T, StoreError>;
pub type ServiceResult<T> = Result<T, ServiceError>;
