//! Engine facade: repository-backed, per-actor serialized operations.
//!
//! [`CombatEngine`] wraps the rule components for a host. Each call loads
//! one actor's state, applies a rule, and saves the result once. Calls for
//! the same actor are serialized by [`ActorLocks`]; calls for different
//! actors run independently.
//!
//! ```
//! use mastery_engine::core::{ActorId, ActorKind, ActorProfile, CombatState, EngineConfig};
//! use mastery_engine::engine::CombatEngine;
//! use mastery_engine::repository::InMemoryRepository;
//!
//! let engine = CombatEngine::new(InMemoryRepository::new(), EngineConfig::default()).unwrap();
//! let actor = ActorId::new(1);
//! let profile = ActorProfile::new("Iria", ActorKind::Pc, 2).with_stones(2, 1);
//! engine.register(CombatState::new(actor, profile)).unwrap();
//!
//! let outcome = engine.spend_stones(actor, 3).unwrap();
//! assert!(!outcome.ok());
//! assert_eq!(outcome.message().as_deref(), Some("Not enough Stones (have 2, need 3)"));
//! ```

mod combat_engine;
mod locks;
mod outcome;

pub use combat_engine::CombatEngine;
pub use locks::ActorLocks;
pub use outcome::{LogEntry, Notice, NoticeLevel, Outcome};
