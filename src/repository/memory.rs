//! In-memory repository for tests and local runs.

use std::sync::RwLock;

use rustc_hash::FxHashMap;

use crate::core::{ActorId, CombatState};

use super::error::{RepositoryError, Result};
use super::traits::CombatRepository;

/// Keeps each actor's state as a bincode snapshot.
///
/// Storing bytes rather than live values means every `load` hands out an
/// independent copy, the same as a real store would.
#[derive(Default)]
pub struct InMemoryRepository {
    states: RwLock<FxHashMap<ActorId, Vec<u8>>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the repository with initial states.
    pub fn with_states(states: impl IntoIterator<Item = CombatState>) -> Result<Self> {
        let repo = Self::new();
        for state in states {
            repo.save(&state)?;
        }
        Ok(repo)
    }

    pub fn len(&self) -> usize {
        self.states.read().map(|states| states.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CombatRepository for InMemoryRepository {
    fn load(&self, actor: ActorId) -> Result<Option<CombatState>> {
        let states = self.states.read().map_err(|_| RepositoryError::LockPoisoned)?;
        states
            .get(&actor)
            .map(|bytes| bincode::deserialize(bytes).map_err(|e| RepositoryError::Serialization(e.to_string())))
            .transpose()
    }

    fn save(&self, state: &CombatState) -> Result<()> {
        let bytes = bincode::serialize(state).map_err(|e| RepositoryError::Serialization(e.to_string()))?;
        let mut states = self.states.write().map_err(|_| RepositoryError::LockPoisoned)?;
        states.insert(state.actor, bytes);
        Ok(())
    }

    fn exists(&self, actor: ActorId) -> bool {
        self.states
            .read()
            .map(|states| states.contains_key(&actor))
            .unwrap_or(false)
    }

    fn actor_ids(&self) -> Result<Vec<ActorId>> {
        let states = self.states.read().map_err(|_| RepositoryError::LockPoisoned)?;
        let mut ids: Vec<ActorId> = states.keys().copied().collect();
        ids.sort_unstable();
        Ok(ids)
    }
}
