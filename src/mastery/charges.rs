//! Mastery Charges: the daily budget for charged powers.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::{RuleError, RuleResult};
use crate::resources::StonePool;

/// Temporary charges gained per Stone burned.
pub const CHARGES_PER_BURNED_STONE: u32 = 2;

/// Charge budget. `current + temporary` is what can be spent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasteryCharges {
    pub current: u32,
    pub max: u32,
    pub temporary: u32,
}

impl MasteryCharges {
    /// A full budget for an actor of the given Mastery Rank.
    #[must_use]
    pub const fn for_rank(mastery_rank: u32) -> Self {
        Self {
            current: mastery_rank,
            max: mastery_rank,
            temporary: 0,
        }
    }

    /// Charges available to spend.
    #[must_use]
    pub const fn available(&self) -> u32 {
        self.current + self.temporary
    }

    /// Spend one charge, drawing on temporary charges first.
    pub fn spend(&mut self) -> RuleResult<u32> {
        if self.available() == 0 {
            return Err(RuleError::insufficient("No Mastery Charges remaining"));
        }
        if self.temporary > 0 {
            self.temporary -= 1;
        } else {
            self.current -= 1;
        }
        Ok(self.available())
    }

    /// Full restore at dawn or rest. Temporary charges are always lost.
    pub fn restore(&mut self, mastery_rank: u32) {
        *self = Self::for_rank(mastery_rank);
    }

    /// Burn one Stone for temporary charges.
    ///
    /// Meant for use outside combat; the caller enforces that.
    pub fn burn_stone(&mut self, stones: &mut StonePool) -> RuleResult<u32> {
        if stones.current == 0 {
            return Err(RuleError::insufficient("No Stones to burn"));
        }
        stones.current -= 1;
        self.temporary += CHARGES_PER_BURNED_STONE;
        info!(temporary = self.temporary, stones = stones.current, "stone burned for charges");
        Ok(self.available())
    }
}
