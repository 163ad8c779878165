//! Repository contract for per-actor combat state.

use crate::core::{ActorId, CombatState};

use super::error::{RepositoryError, Result};

/// Authoritative store of every actor's [`CombatState`].
///
/// The engine loads a state, computes the next one, and saves it exactly
/// once per logical operation.
pub trait CombatRepository: Send + Sync {
    /// Load an actor's state, if one is stored.
    fn load(&self, actor: ActorId) -> Result<Option<CombatState>>;

    /// Store an actor's state, replacing any previous one.
    fn save(&self, state: &CombatState) -> Result<()>;

    /// Check if a state is stored for the actor.
    fn exists(&self, actor: ActorId) -> bool;

    /// All actors with stored state, ascending.
    fn actor_ids(&self) -> Result<Vec<ActorId>>;

    /// Load a state that must exist.
    fn require(&self, actor: ActorId) -> Result<CombatState> {
        self.load(actor)?.ok_or(RepositoryError::ActorMissing(actor))
    }
}
