//! Action pool data.

use serde::{Deserialize, Serialize};

/// The three action types a combatant spends during a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionType {
    Attack,
    Movement,
    Reaction,
}

impl ActionType {
    /// All action types in display order.
    pub const ALL: [ActionType; 3] = [ActionType::Attack, ActionType::Movement, ActionType::Reaction];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ActionType::Attack => "Attack",
            ActionType::Movement => "Movement",
            ActionType::Reaction => "Reaction",
        }
    }
}

impl std::fmt::Display for ActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// What an attack action can be traded for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConversionTarget {
    Movement,
    Reaction,
}

impl ConversionTarget {
    /// The pool that receives the converted action.
    #[must_use]
    pub const fn action_type(self) -> ActionType {
        match self {
            ConversionTarget::Movement => ActionType::Movement,
            ConversionTarget::Reaction => ActionType::Reaction,
        }
    }
}

impl std::fmt::Display for ConversionTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.action_type().name())
    }
}

/// One action pool.
///
/// `max = base + bonus` right after a round reset; conversions and shop
/// purchases raise `max` during the round. `used <= max` always holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionPool {
    pub base: u32,
    pub bonus: u32,
    pub max: u32,
    pub used: u32,
}

impl Default for ActionPool {
    fn default() -> Self {
        Self::with_base(1)
    }
}

impl ActionPool {
    /// A fresh pool with `base` actions and nothing used.
    #[must_use]
    pub const fn with_base(base: u32) -> Self {
        Self {
            base,
            bonus: 0,
            max: base,
            used: 0,
        }
    }

    /// Actions still available this round.
    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.max.saturating_sub(self.used)
    }
}

/// Attack actions traded away this round, by destination.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversions {
    pub attack_to_movement: u32,
    pub attack_to_reaction: u32,
}

impl Conversions {
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.attack_to_movement + self.attack_to_reaction
    }

    /// Counter for one destination.
    #[must_use]
    pub const fn get(&self, target: ConversionTarget) -> u32 {
        match target {
            ConversionTarget::Movement => self.attack_to_movement,
            ConversionTarget::Reaction => self.attack_to_reaction,
        }
    }

    pub(crate) fn get_mut(&mut self, target: ConversionTarget) -> &mut u32 {
        match target {
            ConversionTarget::Movement => &mut self.attack_to_movement,
            ConversionTarget::Reaction => &mut self.attack_to_reaction,
        }
    }
}

/// All of a combatant's action pools for the current round.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionPools {
    pub attack: ActionPool,
    pub movement: ActionPool,
    pub reaction: ActionPool,
    pub conversions: Conversions,

    /// Reactions gained by conversion this round. These lapse when the
    /// owner's next turn starts.
    pub reaction_converted_this_round: u32,
}

impl ActionPools {
    /// Get one pool.
    #[must_use]
    pub fn pool(&self, kind: ActionType) -> &ActionPool {
        match kind {
            ActionType::Attack => &self.attack,
            ActionType::Movement => &self.movement,
            ActionType::Reaction => &self.reaction,
        }
    }

    /// Get one pool mutably.
    pub fn pool_mut(&mut self, kind: ActionType) -> &mut ActionPool {
        match kind {
            ActionType::Attack => &mut self.attack,
            ActionType::Movement => &mut self.movement,
            ActionType::Reaction => &mut self.reaction,
        }
    }

    /// Total conversions made this round.
    #[must_use]
    pub fn conversions_total(&self) -> u32 {
        self.conversions.total()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pool() {
        let pool = ActionPool::default();
        assert_eq!(pool, ActionPool { base: 1, bonus: 0, max: 1, used: 0 });
        assert_eq!(pool.remaining(), 1);
    }

    #[test]
    fn test_remaining_never_underflows() {
        let pool = ActionPool { base: 1, bonus: 0, max: 1, used: 3 };
        assert_eq!(pool.remaining(), 0);
    }

    #[test]
    fn test_conversions_lookup() {
        let mut conv = Conversions::default();
        *conv.get_mut(ConversionTarget::Reaction) += 2;
        assert_eq!(conv.get(ConversionTarget::Reaction), 2);
        assert_eq!(conv.get(ConversionTarget::Movement), 0);
        assert_eq!(conv.total(), 2);
    }

    #[test]
    fn test_pool_accessors() {
        let mut pools = ActionPools::default();
        pools.pool_mut(ActionType::Movement).used = 1;
        assert_eq!(pools.pool(ActionType::Movement).used, 1);
        assert_eq!(pools.movement.used, 1);
        assert_eq!(format!("{}", ActionType::Reaction), "Reaction");
        assert_eq!(ConversionTarget::Movement.action_type(), ActionType::Movement);
    }
}
