//! Initiative: attributes plus exploding dice, with an optional shop step
//! for player characters.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{ActorId, ActorProfile, ShopPrices};
use crate::dice::{DiceResolver, DiceRoll, FaceSource};

use super::shop::ShopSession;

/// `agility + wits + combat_reflexes`.
#[must_use]
pub fn calculate_base_initiative(profile: &ActorProfile) -> i64 {
    profile.agility + profile.wits + profile.combat_reflexes
}

/// Dice thrown for initiative. Every die counts; nothing is dropped.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitiativeRoll {
    pub dice: DiceRoll,
    pub total: i64,
}

/// How an actor's initiative resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InitiativeResolution {
    /// Final value, applied immediately (NPCs).
    Final { actor: ActorId, initiative: i64 },
    /// Raw value awaiting the player's shop decision.
    Shop(ShopSession),
}

impl InitiativeResolution {
    #[must_use]
    pub fn actor(&self) -> ActorId {
        match self {
            InitiativeResolution::Final { actor, .. } => *actor,
            InitiativeResolution::Shop(session) => session.actor,
        }
    }

    #[must_use]
    pub fn final_value(&self) -> Option<i64> {
        match self {
            InitiativeResolution::Final { initiative, .. } => Some(*initiative),
            InitiativeResolution::Shop(_) => None,
        }
    }
}

/// Rolls and resolves initiative.
#[derive(Clone, Debug, Default)]
pub struct InitiativeResolver {
    dice: DiceResolver,
    prices: ShopPrices,
}

impl InitiativeResolver {
    #[must_use]
    pub fn new(dice: DiceResolver, prices: ShopPrices) -> Self {
        Self { dice, prices }
    }

    /// Roll `mastery_rank` dice, plus `bonus_count` when `with_bonus`, and
    /// sum all of them.
    pub fn roll_initiative_dice(
        &self,
        profile: &ActorProfile,
        with_bonus: bool,
        bonus_count: u32,
        source: &mut impl FaceSource,
    ) -> InitiativeRoll {
        let count = profile.mastery_rank + if with_bonus { bonus_count } else { 0 };
        let dice = self.dice.roll_dice(count, source);
        let total = dice.sum();
        InitiativeRoll { dice, total }
    }

    /// Resolve initiative for one actor.
    ///
    /// NPCs get `max(0, base + dice)` directly. Player characters get a
    /// [`ShopSession`] holding `base + dice` as the raw value.
    pub fn resolve(&self, actor: ActorId, profile: &ActorProfile, source: &mut impl FaceSource) -> InitiativeResolution {
        let base = calculate_base_initiative(profile);
        let roll = self.roll_initiative_dice(profile, false, 0, source);
        let raw = base + roll.total;
        debug!(%actor, base, dice = roll.total, raw, "initiative rolled");

        if profile.kind.is_npc() {
            InitiativeResolution::Final {
                actor,
                initiative: raw.max(0),
            }
        } else {
            InitiativeResolution::Shop(ShopSession::new(actor, raw, self.prices.clone()))
        }
    }
}
