//! Roll & Keep resolution with exploding dice.
//!
//! ## Explosion
//!
//! A die keeps rolling while its running total is an exact multiple of the
//! number of sides: roll 8 on a d8, add another face, and check the new
//! total again. The check is on the accumulated value, not on the last face.
//!
//! ## Keep and raises
//!
//! A mastery roll throws `num_dice`, keeps the `keep_dice` highest, and adds
//! the skill. Every full `raise_step` points over the target number is one
//! raise.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::EngineConfig;

use super::source::FaceSource;

/// Default points per raise.
pub const RAISE_STEP: i64 = 4;

/// One exploding die.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DieResult {
    pub value: u32,
    pub exploded: bool,
}

/// A set of independently rolled exploding dice.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceRoll {
    /// Final value of each die, in roll order.
    pub values: SmallVec<[u32; 8]>,
    /// Indices of dice that exploded at least once.
    pub exploded: SmallVec<[usize; 4]>,
}

impl DiceRoll {
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Sum of every die.
    #[must_use]
    pub fn sum(&self) -> i64 {
        self.values.iter().map(|&v| i64::from(v)).sum()
    }
}

/// Indices of the `keep` highest dice, returned in ascending index order.
///
/// Ties keep the earlier die.
#[must_use]
pub fn select_highest_dice(dice: &[u32], keep: usize) -> SmallVec<[usize; 8]> {
    let mut order: SmallVec<[usize; 8]> = (0..dice.len()).collect();
    // Stable sort keeps roll order among equal values.
    order.sort_by(|&a, &b| dice[b].cmp(&dice[a]));
    order.truncate(keep);
    order.sort_unstable();
    order
}

/// Sum of the dice at `kept` indices. Out-of-range indices are ignored.
#[must_use]
pub fn calculate_total(dice: &[u32], kept: &[usize]) -> i64 {
    kept.iter()
        .filter_map(|&i| dice.get(i))
        .map(|&v| i64::from(v))
        .sum()
}

/// Raises earned by `total` against `tn` at the default step of 4.
///
/// ```
/// use mastery_engine::dice::calculate_raises;
///
/// assert_eq!(calculate_raises(16, 16), 0);
/// assert_eq!(calculate_raises(20, 16), 1);
/// assert_eq!(calculate_raises(23, 16), 1);
/// assert_eq!(calculate_raises(24, 16), 2);
/// ```
#[must_use]
pub fn calculate_raises(total: i64, tn: i64) -> u32 {
    calculate_raises_with_step(total, tn, RAISE_STEP)
}

/// Raises earned by `total` against `tn` with a custom step.
#[must_use]
pub fn calculate_raises_with_step(total: i64, tn: i64, step: i64) -> u32 {
    if total < tn || step <= 0 {
        return 0;
    }
    u32::try_from((total - tn) / step).unwrap_or(u32::MAX)
}

/// Parameters of a mastery roll.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasteryRollRequest {
    pub num_dice: u32,
    pub keep_dice: u32,
    pub skill: i64,
    /// Target number. `0` means an open roll with no success check.
    pub tn: i64,
}

impl MasteryRollRequest {
    #[must_use]
    pub const fn new(num_dice: u32, keep_dice: u32, skill: i64) -> Self {
        Self {
            num_dice,
            keep_dice,
            skill,
            tn: 0,
        }
    }

    /// Set the target number (builder pattern).
    #[must_use]
    pub const fn against(mut self, tn: i64) -> Self {
        self.tn = tn;
        self
    }
}

/// Outcome of a mastery roll.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasteryRollResult {
    pub dice: DiceRoll,
    /// Kept dice indices, ascending.
    pub kept: SmallVec<[usize; 8]>,
    /// Kept dice plus skill.
    pub total: i64,
    pub success: bool,
    pub raises: u32,
}

/// Stateless dice resolver configured with die size and raise step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DiceResolver {
    sides: u32,
    raise_step: i64,
}

impl Default for DiceResolver {
    fn default() -> Self {
        Self {
            sides: 8,
            raise_step: RAISE_STEP,
        }
    }
}

impl DiceResolver {
    #[must_use]
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            sides: config.die_sides,
            raise_step: i64::from(config.raise_step),
        }
    }

    #[must_use]
    pub fn sides(&self) -> u32 {
        self.sides
    }

    /// Roll one exploding die.
    pub fn roll_exploding_die(&self, source: &mut impl FaceSource) -> DieResult {
        let mut value = source.roll_face(self.sides);
        let mut exploded = false;
        while value % self.sides == 0 {
            value += source.roll_face(self.sides);
            exploded = true;
        }
        DieResult { value, exploded }
    }

    /// Roll `n` independent exploding dice.
    pub fn roll_dice(&self, n: u32, source: &mut impl FaceSource) -> DiceRoll {
        let mut roll = DiceRoll::default();
        for i in 0..n as usize {
            let die = self.roll_exploding_die(source);
            roll.values.push(die.value);
            if die.exploded {
                roll.exploded.push(i);
            }
        }
        roll
    }

    /// Roll `num_dice`, keep the highest `keep_dice`, add skill, and compare
    /// against the target number.
    pub fn mastery_roll(&self, request: MasteryRollRequest, source: &mut impl FaceSource) -> MasteryRollResult {
        let dice = self.roll_dice(request.num_dice, source);
        let kept = select_highest_dice(&dice.values, request.keep_dice as usize);
        let total = calculate_total(&dice.values, &kept) + request.skill;

        let (success, raises) = if request.tn > 0 {
            (
                total >= request.tn,
                calculate_raises_with_step(total, request.tn, self.raise_step),
            )
        } else {
            (true, 0)
        };

        MasteryRollResult {
            dice,
            kept,
            total,
            success,
            raises,
        }
    }
}
