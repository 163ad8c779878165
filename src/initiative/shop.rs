//! Initiative shop: trading raw initiative for tactical bonuses.
//!
//! A player character may spend initiative points before their value is
//! final. The shop is a pure cost function plus a session that is either
//! confirmed (points spent, bonuses granted) or cancelled (raw value kept).
//! Closing the shop is recorded in the actor's state, so it can only happen
//! once per round.

use serde::{Deserialize, Serialize};

use crate::actions::ActionType;
use crate::core::{ActorId, CombatState, RuleError, RuleResult, ShopPrices};

/// What a player asks to buy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopPurchases {
    pub extra_movement_meters: u32,
    pub swap: bool,
    pub extra_attack: bool,
}

impl ShopPurchases {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Movement steps bought. Partial steps are not charged or granted.
    #[must_use]
    pub fn movement_steps(&self, prices: &ShopPrices) -> u32 {
        self.extra_movement_meters / prices.movement_step_meters.max(1)
    }

    /// Point cost of these purchases.
    #[must_use]
    pub fn cost(&self, prices: &ShopPrices) -> i64 {
        let movement = i64::from(self.movement_steps(prices)) * i64::from(prices.movement_cost_per_step);
        let swap = if self.swap { i64::from(prices.swap_cost) } else { 0 };
        let attack = if self.extra_attack { i64::from(prices.extra_attack_cost) } else { 0 };
        movement + swap + attack
    }

    /// Refuse purchases that cost more than the raw initiative.
    pub fn validate(&self, raw: i64, prices: &ShopPrices) -> RuleResult<i64> {
        let cost = self.cost(prices);
        if cost > raw {
            return Err(RuleError::insufficient(format!(
                "Not enough initiative (have {}, need {})",
                raw, cost
            )));
        }
        Ok(cost)
    }
}

/// Shop purchases in effect for the current round.
///
/// Cleared at every round start.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopScratch {
    pub extra_movement_meters: u32,
    pub movement_steps: u32,
    pub swap_available: bool,
    pub extra_attack: bool,
    /// Set once this round's shop was confirmed or cancelled.
    pub closed: bool,
}

impl ShopScratch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Refuse when the shop was already closed this round.
    pub fn ensure_open(&self) -> RuleResult<()> {
        if self.closed {
            return Err(RuleError::invariant("Initiative shop already closed this round"));
        }
        Ok(())
    }
}

/// Result of closing a shop session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopReceipt {
    pub actor: ActorId,
    pub raw_initiative: i64,
    pub final_initiative: i64,
    pub spent: i64,
    pub purchases: ShopPurchases,
    /// Whole movement steps bought.
    pub movement_steps: u32,
}

impl ShopReceipt {
    /// Grant the purchased bonuses to the actor's state and close its shop
    /// for the round. Refused if the shop is already closed.
    pub fn apply_to(&self, state: &mut CombatState) -> RuleResult<()> {
        state.shop_scratch.ensure_open()?;
        let steps = self.movement_steps;
        if steps > 0 {
            state.actions.grant_bonus(ActionType::Movement, steps);
        }
        if self.purchases.extra_attack {
            state.actions.grant_bonus(ActionType::Attack, 1);
        }
        state.shop_scratch = ShopScratch {
            extra_movement_meters: self.purchases.extra_movement_meters,
            movement_steps: steps,
            swap_available: self.purchases.swap,
            extra_attack: self.purchases.extra_attack,
            closed: true,
        };
        Ok(())
    }
}

/// A player's pending shop step.
///
/// Holding a session blocks only this actor's initiative. Dropping it
/// without confirming is the same as [`ShopSession::cancel`]. Both
/// `confirm` and `cancel` consume the session; clone it first to retry a
/// refused basket.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopSession {
    pub actor: ActorId,
    pub raw_initiative: i64,
    pub prices: ShopPrices,
}

impl ShopSession {
    #[must_use]
    pub fn new(actor: ActorId, raw_initiative: i64, prices: ShopPrices) -> Self {
        Self {
            actor,
            raw_initiative,
            prices,
        }
    }

    /// Spend points. Fails if they cost more than the raw initiative.
    pub fn confirm(self, purchases: ShopPurchases) -> RuleResult<ShopReceipt> {
        let spent = purchases.validate(self.raw_initiative, &self.prices)?;
        Ok(self.receipt(purchases, spent))
    }

    /// Skip the shop: the raw value becomes final, nothing is spent.
    #[must_use]
    pub fn cancel(self) -> ShopReceipt {
        self.receipt(ShopPurchases::default(), 0)
    }

    fn receipt(&self, purchases: ShopPurchases, spent: i64) -> ShopReceipt {
        ShopReceipt {
            actor: self.actor,
            raw_initiative: self.raw_initiative,
            final_initiative: self.raw_initiative - spent,
            spent,
            movement_steps: purchases.movement_steps(&self.prices),
            purchases,
        }
    }
}
