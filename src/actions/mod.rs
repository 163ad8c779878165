//! Action economy: attack, movement, and reaction pools.
//!
//! Each round a combatant gets `base` actions of each type. Attack actions
//! can be converted into movement or reaction actions, at most
//! `mastery_rank` times per round, as long as one attack action remains.
//! Reactions gained this way lapse when the owner's next turn starts.

mod economy;
mod pool;

pub use pool::{ActionPool, ActionPools, ActionType, ConversionTarget, Conversions};
