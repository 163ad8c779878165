//! Core types: actor identity, per-actor state, RNG, configuration, errors.
//!
//! Every other module builds on these. Rule components take a
//! [`CombatState`] (or one of its parts) by `&mut` and report refusals as
//! [`RuleError`].

pub mod entity;
pub mod rng;
pub mod config;
pub mod error;
pub mod state;

pub use entity::{ActorId, ActorKind};
pub use rng::DiceRng;
pub use config::{ConfigError, EngineConfig, ShopPrices};
pub use error::{RuleError, RuleResult};
pub use state::{ActorProfile, CombatState};
