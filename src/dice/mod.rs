//! Dice resolution ("Roll & Keep").
//!
//! Leaf module: no combat state, only a [`FaceSource`] and the rules for
//! exploding dice, keeping the highest, and counting raises.
//!
//! ```
//! use mastery_engine::dice::{DiceResolver, MasteryRollRequest, ScriptedFaces};
//!
//! let resolver = DiceResolver::default();
//! let mut faces = ScriptedFaces::new([8, 4, 3, 6]);
//!
//! // 8 explodes into 12; keep 12 and 6, add skill 2.
//! let result = resolver.mastery_roll(MasteryRollRequest::new(3, 2, 2).against(16), &mut faces);
//! assert_eq!(result.total, 20);
//! assert_eq!(result.raises, 1);
//! ```

mod resolver;
mod source;

pub use resolver::{
    calculate_raises, calculate_raises_with_step, calculate_total, select_highest_dice, DiceResolver, DiceRoll,
    DieResult, MasteryRollRequest, MasteryRollResult, RAISE_STEP,
};
pub use source::{FaceSource, ScriptedFaces};
