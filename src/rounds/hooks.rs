//! Host collaborators invoked during round and turn processing.
//!
//! Conditions, utilities, and death saves are owned by the host. The
//! scheduler calls these hooks at the right points; every method defaults
//! to doing nothing.

use crate::core::{ActorId, CombatState};

pub trait CombatHooks {
    /// Tick condition durations at round start.
    fn tick_conditions(&mut self, _actor: ActorId, _state: &mut CombatState) {}

    /// Tick utility-power durations at round start.
    fn tick_utilities(&mut self, _actor: ActorId, _state: &mut CombatState) {}

    /// Whether the actor is down and must make a death save.
    fn is_incapacitated(&self, _actor: ActorId, _state: &CombatState) -> bool {
        false
    }

    /// Run the host's death-save procedure.
    fn death_save(&mut self, _actor: ActorId, _state: &mut CombatState) {}
}

/// Hooks that do nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoHooks;

impl CombatHooks for NoHooks {}
