//! Buff registry.
//!
//! Stores an actor's active buffs, enforces type exclusivity, ticks
//! durations at round start, and answers derived-stat queries.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{RuleError, RuleResult};

use super::buff::{Buff, BuffEffect, BuffId, BuffSpec, BuffType};

/// Summed effects of every active buff.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BuffTotals {
    pub flat: FxHashMap<String, i64>,
    pub dice: FxHashMap<String, i64>,
    pub flags: FxHashSet<String>,
}

impl BuffTotals {
    #[must_use]
    pub fn flat(&self, target: &str) -> i64 {
        self.flat.get(target).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn dice(&self, target: &str) -> i64 {
        self.dice.get(target).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn has_flag(&self, name: &str) -> bool {
        self.flags.contains(name)
    }
}

/// Active buffs on one actor.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuffRegistry {
    active: Vec<Buff>,
    next_id: u64,
}

impl BuffRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Active buffs in application order.
    #[must_use]
    pub fn active(&self) -> &[Buff] {
        &self.active
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.active.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: BuffId) -> Option<&Buff> {
        self.active.iter().find(|b| b.id == id)
    }

    /// The active buff of a type, if any.
    #[must_use]
    pub fn of_type(&self, buff_type: BuffType) -> Option<&Buff> {
        self.active.iter().find(|b| b.buff_type == buff_type)
    }

    /// Apply a buff. Refused if a buff of the same type is already active.
    pub fn apply_buff(&mut self, spec: BuffSpec, current_round: u32) -> RuleResult<&Buff> {
        if let Some(existing) = self.of_type(spec.buff_type) {
            return Err(RuleError::invariant(format!(
                "Buff type '{}' is already active ({})",
                spec.buff_type, existing.name
            )));
        }

        self.next_id += 1;
        let buff = Buff::from_spec(BuffId(self.next_id), spec, current_round);
        debug!(id = %buff.id, name = %buff.name, duration = buff.duration, "buff applied");
        self.active.push(buff);
        Ok(&self.active[self.active.len() - 1])
    }

    /// Remove a buff by ID. Unknown IDs are logged and ignored.
    pub fn remove_buff(&mut self, id: BuffId) -> Option<Buff> {
        match self.active.iter().position(|b| b.id == id) {
            Some(pos) => Some(self.active.remove(pos)),
            None => {
                warn!(%id, "remove_buff: no active buff with this id");
                None
            }
        }
    }

    /// Round-start tick: every buff loses one round; any at 0 or below is
    /// removed and returned.
    ///
    /// Run exactly once per round. A second call ticks again.
    pub fn update_buff_durations(&mut self) -> Vec<Buff> {
        for buff in &mut self.active {
            buff.duration -= 1;
        }
        let (expired, kept): (Vec<Buff>, Vec<Buff>) =
            self.active.drain(..).partition(|b| b.duration <= 0);
        self.active = kept;
        expired
    }

    /// Drop every buff (end of combat).
    pub fn clear_all_buffs(&mut self) -> usize {
        let count = self.active.len();
        self.active.clear();
        count
    }

    /// Sum all effect entries across active buffs.
    #[must_use]
    pub fn get_active_buff_effects(&self) -> BuffTotals {
        let mut totals = BuffTotals::default();
        for effect in self.active.iter().flat_map(|b| b.effects.iter()) {
            match effect {
                BuffEffect::Flat { target, value } => {
                    *totals.flat.entry(target.clone()).or_insert(0) += value;
                }
                BuffEffect::Dice { target, count } => {
                    *totals.dice.entry(target.clone()).or_insert(0) += count;
                }
                BuffEffect::Flag { name } => {
                    totals.flags.insert(name.clone());
                }
            }
        }
        totals
    }

    /// `base` plus every flat bonus aimed at `target`.
    #[must_use]
    pub fn apply_buff_effects(&self, target: &str, base: i64) -> i64 {
        base + self.sum_where(|e| match e {
            BuffEffect::Flat { target: t, value } if t == target => Some(*value),
            _ => None,
        })
    }

    /// Extra dice granted to rolls for `target`.
    #[must_use]
    pub fn get_buff_dice_bonus(&self, target: &str) -> i64 {
        self.sum_where(|e| match e {
            BuffEffect::Dice { target: t, count } if t == target => Some(*count),
            _ => None,
        })
    }

    /// Whether any active buff sets the flag `name`.
    #[must_use]
    pub fn has_buff_flag(&self, name: &str) -> bool {
        self.active
            .iter()
            .flat_map(|b| b.effects.iter())
            .any(|e| matches!(e, BuffEffect::Flag { name: n } if n == name))
    }

    fn sum_where(&self, pick: impl Fn(&BuffEffect) -> Option<i64>) -> i64 {
        self.active
            .iter()
            .flat_map(|b| b.effects.iter())
            .filter_map(pick)
            .sum()
    }
}
