//! # mastery-engine
//!
//! Combat resource and resolution rules for a tabletop RPG: action economy,
//! Stones, Vitality and Stress, Mastery Charges, timed buffs, Roll & Keep
//! dice, initiative, and round scheduling.
//!
//! ## Design Principles
//!
//! 1. **Check, then mutate**: every rule operation validates before it
//!    writes, so a refused operation leaves state untouched.
//!
//! 2. **Refusals are values**: rule failures are [`RuleError`]s returned in
//!    a `Result` (or an [`Outcome`] at the engine level), never panics.
//!
//! 3. **Explicit state**: every per-actor flag lives in a typed field of
//!    [`CombatState`] with a documented reset point.
//!
//! 4. **Reproducible dice**: all randomness flows through a
//!    [`FaceSource`], seeded or scripted.
//!
//! ## Modules
//!
//! - `core`: actor identity, `CombatState`, RNG, configuration, errors
//! - `dice`: exploding dice, keep-highest, raises
//! - `actions`: attack/movement/reaction pools and conversions
//! - `resources`: Stones, power usage cost, Vitality and Stress bars
//! - `mastery`: Mastery Charges and the charged-power gate
//! - `buffs`: type-exclusive timed buffs
//! - `initiative`: initiative rolls and the initiative shop
//! - `rounds`: combat tracker, round/turn ticks, host hooks
//! - `repository`: persistence of per-actor state
//! - `engine`: repository-backed facade with per-actor serialization

pub mod core;
pub mod dice;
pub mod actions;
pub mod resources;
pub mod mastery;
pub mod buffs;
pub mod initiative;
pub mod rounds;
pub mod repository;
pub mod engine;

// Re-export commonly used types
pub use crate::core::{
    ActorId, ActorKind, ActorProfile, CombatState,
    DiceRng,
    EngineConfig, ShopPrices, ConfigError,
    RuleError, RuleResult,
};

pub use crate::dice::{DiceResolver, FaceSource, MasteryRollRequest, MasteryRollResult, ScriptedFaces};

pub use crate::actions::{ActionPool, ActionPools, ActionType, ConversionTarget};

pub use crate::resources::{calculate_stone_cost, Bar, BarTrack, StonePool, VitalityTrack};

pub use crate::mastery::{ChargedActivation, MasteryCharges};

pub use crate::buffs::{Buff, BuffEffect, BuffId, BuffRegistry, BuffSpec, BuffType};

pub use crate::initiative::{InitiativeResolution, InitiativeResolver, ShopPurchases, ShopSession};

pub use crate::rounds::{Combat, CombatHooks, NoHooks, RoundScheduler};

pub use crate::repository::{CombatRepository, InMemoryRepository, JsonDirRepository, RepositoryError};

pub use crate::engine::{CombatEngine, Notice, NoticeLevel, Outcome};
