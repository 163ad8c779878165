//! Actor identification.
//!
//! Every combatant refers to an actor record owned by the host. The engine
//! only needs a stable key to load and save that actor's combat state.
//!
//! ```
//! use mastery_engine::core::ActorId;
//!
//! let hero = ActorId::new(7);
//! assert_eq!(hero.raw(), 7);
//! assert_eq!(format!("{}", hero), "Actor(7)");
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for an actor taking part in combat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ActorId(pub u32);

impl ActorId {
    /// Create a new actor ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ActorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Actor({})", self.0)
    }
}

/// Whether an actor is player-controlled.
///
/// Player characters get an initiative shop step; NPCs apply their
/// initiative directly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActorKind {
    #[default]
    Pc,
    Npc,
}

impl ActorKind {
    /// Check if this is an NPC.
    #[must_use]
    pub const fn is_npc(self) -> bool {
        matches!(self, ActorKind::Npc)
    }
}
