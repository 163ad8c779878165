//! Stones: the spendable resource that fuels powers.
//!
//! Re-using the same power within a round doubles its Stone cost each time:
//! 1, 2, 4, 8, ...

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::{RuleError, RuleResult};

/// Stone cost of the `usage_count`-th use of a power in one round.
///
/// `usage_count` is 1-based; a count of 0 is treated as the first use.
///
/// ```
/// use mastery_engine::resources::calculate_stone_cost;
///
/// let costs: Vec<u32> = (1..=6).map(calculate_stone_cost).collect();
/// assert_eq!(costs, vec![1, 2, 4, 8, 16, 32]);
/// ```
#[must_use]
pub fn calculate_stone_cost(usage_count: u32) -> u32 {
    let exponent = usage_count.saturating_sub(1);
    1u32.checked_shl(exponent).unwrap_or(u32::MAX)
}

/// A combatant's Stone pool. `0 <= current <= max` always holds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StonePool {
    pub current: u32,
    pub max: u32,
    pub regeneration_per_round: u32,
    pub spent_this_round: u32,
}

impl StonePool {
    /// A full pool.
    #[must_use]
    pub const fn new(max: u32, regeneration_per_round: u32) -> Self {
        Self {
            current: max,
            max,
            regeneration_per_round,
            spent_this_round: 0,
        }
    }

    /// Spend Stones. Fails without touching the pool if there are too few.
    pub fn spend(&mut self, amount: u32) -> RuleResult<u32> {
        if self.current < amount {
            return Err(RuleError::insufficient(format!(
                "Not enough Stones (have {}, need {})",
                self.current, amount
            )));
        }
        self.current -= amount;
        self.spent_this_round += amount;
        info!(amount, remaining = self.current, "stones spent");
        Ok(self.current)
    }

    /// Round-start regeneration. Returns the new current value.
    pub fn regenerate(&mut self, regen: u32) -> u32 {
        self.current = self.max.min(self.current.saturating_add(regen));
        self.spent_this_round = 0;
        self.current
    }

    /// Regenerate by this pool's own per-round rate.
    pub fn regenerate_per_round(&mut self) -> u32 {
        self.regenerate(self.regeneration_per_round)
    }

    /// Full restore on rest.
    pub fn restore_all(&mut self) {
        self.current = self.max;
        self.spent_this_round = 0;
    }
}

/// Per-round usage count for each power, driving the doubling Stone cost.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerUsage {
    uses: FxHashMap<String, u32>,
}

impl PowerUsage {
    /// Times `power` was used this round.
    #[must_use]
    pub fn uses(&self, power: &str) -> u32 {
        self.uses.get(power).copied().unwrap_or(0)
    }

    /// Cost of the next use of `power`.
    #[must_use]
    pub fn next_cost(&self, power: &str) -> u32 {
        calculate_stone_cost(self.uses(power) + 1)
    }

    /// Pay for the next use of `power` from `stones` and record it.
    pub fn spend_for_power(&mut self, power: &str, stones: &mut StonePool) -> RuleResult<u32> {
        let cost = self.next_cost(power);
        stones.spend(cost)?;
        *self.uses.entry(power.to_string()).or_insert(0) += 1;
        Ok(cost)
    }

    pub fn clear(&mut self) {
        self.uses.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.uses.is_empty()
    }
}
