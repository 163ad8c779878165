//! Per-actor mutual exclusion.

use std::sync::{Arc, Mutex};

use rustc_hash::FxHashMap;

use crate::core::ActorId;
use crate::repository::{RepositoryError, Result};

/// One lock per actor, created on first use.
///
/// Holding an actor's lock serializes its load-compute-save sequence.
/// Different actors never share a lock.
#[derive(Debug, Default)]
pub struct ActorLocks {
    locks: Mutex<FxHashMap<ActorId, Arc<Mutex<()>>>>,
}

impl ActorLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// The lock for `actor`. Lock it and hold the guard for the whole
    /// read-modify-write sequence.
    pub fn get(&self, actor: ActorId) -> Result<Arc<Mutex<()>>> {
        let mut locks = self.locks.lock().map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(Arc::clone(locks.entry(actor).or_default()))
    }

    pub fn len(&self) -> usize {
        self.locks.lock().map(|locks| locks.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
