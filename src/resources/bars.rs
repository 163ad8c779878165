//! Vitality and Stress bars.
//!
//! Both tracks are an ordered list of bars plus the index of the bar
//! currently taking changes. Which bar is current is decided by the host's
//! actor preparation; this engine only mutates the current bar.

use serde::{Deserialize, Serialize};

use crate::core::{RuleError, RuleResult};

/// One bar of a track. `0 <= current <= max`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bar {
    pub max: u32,
    pub current: u32,
    /// Roll penalty while this bar is the current one.
    pub penalty: i32,
}

impl Bar {
    /// A full bar.
    #[must_use]
    pub const fn full(max: u32, penalty: i32) -> Self {
        Self { max, current: max, penalty }
    }

    /// An empty bar.
    #[must_use]
    pub const fn empty(max: u32, penalty: i32) -> Self {
        Self { max, current: 0, penalty }
    }
}

/// An ordered set of bars with a cursor.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarTrack {
    pub bars: Vec<Bar>,
    pub current_bar_index: usize,
}

impl BarTrack {
    #[must_use]
    pub fn new(bars: Vec<Bar>) -> Self {
        Self { bars, current_bar_index: 0 }
    }

    /// The bar changes apply to, if the index points at one.
    #[must_use]
    pub fn current_bar(&self) -> Option<&Bar> {
        self.bars.get(self.current_bar_index)
    }

    fn current_bar_mut(&mut self, track: &str) -> RuleResult<&mut Bar> {
        let index = self.current_bar_index;
        self.bars
            .get_mut(index)
            .ok_or_else(|| RuleError::not_found(format!("{} has no bar at index {}", track, index)))
    }

    /// Penalty of the current bar (0 when there is none).
    #[must_use]
    pub fn current_penalty(&self) -> i32 {
        self.current_bar().map_or(0, |bar| bar.penalty)
    }

    /// Whether the cursor sits on the last bar.
    #[must_use]
    pub fn on_final_bar(&self) -> bool {
        !self.bars.is_empty() && self.current_bar_index + 1 == self.bars.len()
    }

    /// Lower the current bar, flooring at 0. Returns the new value.
    pub(crate) fn lower(&mut self, track: &str, amount: u32) -> RuleResult<u32> {
        let bar = self.current_bar_mut(track)?;
        bar.current = bar.current.saturating_sub(amount);
        Ok(bar.current)
    }

    /// Raise the current bar, capping at its max. Returns the new value.
    pub(crate) fn raise(&mut self, track: &str, amount: u32) -> RuleResult<u32> {
        let bar = self.current_bar_mut(track)?;
        bar.current = bar.max.min(bar.current.saturating_add(amount));
        Ok(bar.current)
    }
}

/// Vitality: a bar track plus temporary hit points.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VitalityTrack {
    pub track: BarTrack,
    pub temp_hp: u32,
}

impl VitalityTrack {
    #[must_use]
    pub fn new(bars: Vec<Bar>) -> Self {
        Self { track: BarTrack::new(bars), temp_hp: 0 }
    }

    /// Apply damage to the current bar. Temporary HP is left untouched.
    pub fn apply_damage(&mut self, amount: u32) -> RuleResult<u32> {
        require_positive("Damage", amount)?;
        self.track.lower("Vitality", amount)
    }

    /// Heal the current bar up to its max.
    pub fn heal(&mut self, amount: u32) -> RuleResult<u32> {
        require_positive("Healing", amount)?;
        self.track.raise("Vitality", amount)
    }

    /// Grant temporary HP. Grants do not stack; the larger value is kept.
    pub fn grant_temp_hp(&mut self, amount: u32) -> u32 {
        self.temp_hp = self.temp_hp.max(amount);
        self.temp_hp
    }
}

/// Result of adding Stress.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StressReport {
    pub current: u32,
    pub max: u32,

    /// The current bar is full; the host must run a mind save.
    pub mind_save_required: bool,

    /// The full bar is the last one on the track.
    pub on_final_bar: bool,
}

/// Stress uses the same bar shape as Vitality, without temporary HP.
pub type StressTrack = BarTrack;

impl BarTrack {
    /// Add Stress to the current bar, capping at its max.
    ///
    /// Filling the bar only signals that a mind save is due; it never
    /// blocks the change.
    pub fn add_stress(&mut self, amount: u32) -> RuleResult<StressReport> {
        require_positive("Stress", amount)?;
        let current = self.raise("Stress", amount)?;
        let max = self.current_bar().map_or(0, |bar| bar.max);
        Ok(StressReport {
            current,
            max,
            mind_save_required: current >= max,
            on_final_bar: self.on_final_bar(),
        })
    }

    /// Remove Stress from the current bar, flooring at 0.
    pub fn reduce_stress(&mut self, amount: u32) -> RuleResult<u32> {
        require_positive("Stress reduction", amount)?;
        self.lower("Stress", amount)
    }
}

fn require_positive(what: &str, amount: u32) -> RuleResult<()> {
    if amount == 0 {
        return Err(RuleError::invariant(format!("{} amount must be positive", what)));
    }
    Ok(())
}
