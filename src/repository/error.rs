//! Errors raised by repository implementations.

use thiserror::Error;

use crate::core::ActorId;

/// Persistence failures. Separate from rule failures: these mean the
/// store itself misbehaved.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("combat repository lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("no combat state stored for {0}")]
    ActorMissing(ActorId),
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
