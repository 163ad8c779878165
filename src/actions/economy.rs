//! Action economy rules: spending, undoing, converting, and resetting pools.
//!
//! All checks run before any field is written, so an `Err` leaves the
//! pools exactly as they were.

use tracing::debug;

use crate::core::{RuleError, RuleResult};

use super::pool::{ActionPools, ActionType, ConversionTarget};

impl ActionPools {
    /// Round-start reset.
    ///
    /// Every pool goes back to `used = 0, bonus = 0, max = base`, and all
    /// conversion counters are cleared. Idempotent.
    pub fn reset_for_round(&mut self) {
        for kind in ActionType::ALL {
            let pool = self.pool_mut(kind);
            pool.used = 0;
            pool.bonus = 0;
            pool.max = pool.base;
        }
        self.conversions = Default::default();
        self.reaction_converted_this_round = 0;
    }

    /// Turn-start reset for the owning actor.
    ///
    /// Reactions granted by conversion this round expire once the owner's
    /// turn begins. The reaction pool never drops below its base, and
    /// reactions already spent count against the lowered maximum.
    pub fn reset_for_turn(&mut self) {
        let converted = self.reaction_converted_this_round;
        if converted > 0 {
            let reaction = &mut self.reaction;
            reaction.max = reaction.base.max(reaction.max.saturating_sub(converted));
            reaction.used = reaction.used.min(reaction.max);
            self.reaction_converted_this_round = 0;
            debug!(expired = converted, max = self.reaction.max, "converted reactions expired");
        }
    }

    /// Spend `amount` actions of one type.
    pub fn use_action(&mut self, kind: ActionType, amount: u32) -> RuleResult<u32> {
        let pool = self.pool_mut(kind);
        if pool.used.saturating_add(amount) > pool.max {
            return Err(RuleError::insufficient(format!(
                "No {} actions remaining (used {}/{}, need {})",
                kind, pool.used, pool.max, amount
            )));
        }
        pool.used += amount;
        Ok(pool.remaining())
    }

    /// Give back `amount` spent actions. Always succeeds; `used` floors at 0.
    pub fn unuse_action(&mut self, kind: ActionType, amount: u32) -> u32 {
        let pool = self.pool_mut(kind);
        pool.used = pool.used.saturating_sub(amount);
        pool.remaining()
    }

    /// Trade one attack action for a movement or reaction action.
    ///
    /// Capped at `mastery_rank` conversions per round, and never allowed to
    /// leave the combatant with no attack action.
    pub fn convert_attack_action(&mut self, target: ConversionTarget, mastery_rank: u32) -> RuleResult<()> {
        let total = self.conversions.total();
        if total >= mastery_rank {
            return Err(RuleError::invariant(format!(
                "Conversion limit reached ({}/{})",
                total, mastery_rank
            )));
        }
        if self.attack.remaining() < 2 {
            return Err(RuleError::invariant(
                "Cannot convert: at least 1 Attack action must remain",
            ));
        }

        *self.conversions.get_mut(target) += 1;
        self.pool_mut(target.action_type()).max += 1;
        self.attack.used += 1;
        if target == ConversionTarget::Reaction {
            self.reaction_converted_this_round += 1;
        }
        Ok(())
    }

    /// Reverse one conversion into `target`.
    ///
    /// Stricter than a plain "a conversion exists" check. Also refused when
    /// the granted action has already been spent (removing it would leave
    /// `used > max`), or when a converted reaction has expired at the
    /// owner's turn start.
    pub fn undo_conversion(&mut self, target: ConversionTarget) -> RuleResult<()> {
        if self.conversions.get(target) == 0 {
            return Err(RuleError::invariant(format!(
                "No Attack to {} conversion to undo",
                target
            )));
        }
        if target == ConversionTarget::Reaction && self.reaction_converted_this_round == 0 {
            return Err(RuleError::invariant(
                "Cannot undo: the converted Reaction action has expired",
            ));
        }
        let pool = self.pool(target.action_type());
        if pool.used >= pool.max {
            return Err(RuleError::invariant(format!(
                "Cannot undo: the converted {} action was already used",
                target
            )));
        }

        *self.conversions.get_mut(target) -= 1;
        let pool = self.pool_mut(target.action_type());
        pool.max = pool.max.saturating_sub(1);
        self.attack.used = self.attack.used.saturating_sub(1);
        if target == ConversionTarget::Reaction {
            self.reaction_converted_this_round = self.reaction_converted_this_round.saturating_sub(1);
        }
        Ok(())
    }

    /// Raise a pool's bonus and maximum for the rest of the round.
    pub fn grant_bonus(&mut self, kind: ActionType, amount: u32) {
        let pool = self.pool_mut(kind);
        pool.bonus += amount;
        pool.max += amount;
    }
}
