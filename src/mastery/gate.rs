//! Once-per-round gate for charged powers.

use tracing::{debug, info};

use crate::core::{CombatState, RuleError, RuleResult};

/// A charged power that fired.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChargedActivation {
    pub power: String,
    pub charges_remaining: u32,
}

impl CombatState {
    #[must_use]
    pub fn can_use_charged_power_this_round(&self) -> bool {
        !self.charged_power_used_this_round
    }

    pub fn mark_charged_power_used(&mut self) {
        self.charged_power_used_this_round = true;
    }

    pub fn reset_charged_power_flag(&mut self) {
        self.charged_power_used_this_round = false;
    }

    /// Fire a charged power: gate check, then charge spend, then mark.
    ///
    /// Stops at the first failure with nothing changed.
    pub fn activate_charged_power(&mut self, power: &str) -> RuleResult<ChargedActivation> {
        if !self.can_use_charged_power_this_round() {
            return Err(RuleError::invariant(
                "A charged power was already used this round",
            ));
        }
        let charges_remaining = self.charges.spend()?;
        self.mark_charged_power_used();
        info!(actor = %self.actor, power, charges_remaining, "charged power activated");
        Ok(ChargedActivation {
            power: power.to_string(),
            charges_remaining,
        })
    }

    /// Spend one Mastery Charge outside the charged-power gate.
    pub fn spend_charge(&mut self) -> RuleResult<u32> {
        self.charges.spend()
    }

    /// Burn a Stone for two temporary charges.
    pub fn burn_stone_for_charges(&mut self) -> RuleResult<u32> {
        self.charges.burn_stone(&mut self.stones)
    }

    /// Full charge restore from this actor's Mastery Rank.
    pub fn restore_charges(&mut self) {
        self.charges.restore(self.profile.mastery_rank);
        debug!(actor = %self.actor, charges = self.charges.current, "charges restored");
    }
}

#[cfg(test)]
mod tests {
    use crate::core::{ActorId, ActorKind, ActorProfile, CombatState, RuleError};
    use crate::mastery::MasteryCharges;

    fn state(rank: u32) -> CombatState {
        CombatState::new(
            ActorId::new(1),
            ActorProfile::new("Kael", ActorKind::Pc, rank).with_stones(3, 1),
        )
    }

    #[test]
    fn test_activate_once_per_round() {
        let mut s = state(2);
        let first = s.activate_charged_power("Thunder Step").unwrap();
        assert_eq!(first.charges_remaining, 1);
        assert!(!s.can_use_charged_power_this_round());

        let err = s.activate_charged_power("Thunder Step").unwrap_err();
        assert!(matches!(err, RuleError::InvariantViolation(_)));
        assert_eq!(s.charges.current, 1);

        s.reset_charged_power_flag();
        assert!(s.activate_charged_power("Thunder Step").is_ok());
        assert_eq!(s.charges.available(), 0);
    }

    #[test]
    fn test_activate_without_charges_leaves_gate_open() {
        let mut s = state(1);
        s.charges = MasteryCharges { current: 0, max: 1, temporary: 0 };

        assert!(matches!(
            s.activate_charged_power("Thunder Step"),
            Err(RuleError::InsufficientResource(_))
        ));
        assert!(s.can_use_charged_power_this_round());
    }

    #[test]
    fn test_burn_then_restore() {
        let mut s = state(2);
        s.stones.current = 1;
        s.charges = MasteryCharges { current: 1, max: 2, temporary: 0 };

        assert_eq!(s.burn_stone_for_charges(), Ok(3));
        assert_eq!(s.stones.current, 0);
        assert_eq!(s.charges.temporary, 2);

        s.restore_charges();
        assert_eq!(s.charges, MasteryCharges::for_rank(2));
    }
}
