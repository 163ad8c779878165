//! Round and turn scheduling.
//!
//! [`Combat`] tracks the round counter and turn order. The scheduler runs
//! each actor's round-start and turn-start ticks, calling out to
//! [`CombatHooks`] for the pieces the host owns.

mod combat;
mod hooks;
mod scheduler;

pub use combat::{Combat, Combatant};
pub use hooks::{CombatHooks, NoHooks};
pub use scheduler::{round_start_tick, turn_start_tick, RoundScheduler, RoundStart, RoundTick, TurnTick};
