//! Where die faces come from.

use std::collections::VecDeque;

use tracing::warn;

use crate::core::DiceRng;

/// Anything that can produce one die face in `[1, sides]`.
pub trait FaceSource {
    fn roll_face(&mut self, sides: u32) -> u32;
}

impl FaceSource for DiceRng {
    fn roll_face(&mut self, sides: u32) -> u32 {
        DiceRng::roll_face(self, sides)
    }
}

impl<S: FaceSource + ?Sized> FaceSource for &mut S {
    fn roll_face(&mut self, sides: u32) -> u32 {
        (**self).roll_face(sides)
    }
}

/// A fixed sequence of faces, for replaying a recorded roll.
///
/// Once the script runs out, faces come from a seeded [`DiceRng`]. A
/// scripted face that does not fit on the die is clamped into `[1, sides]`.
///
/// ```
/// use mastery_engine::dice::{FaceSource, ScriptedFaces};
///
/// let mut faces = ScriptedFaces::new([8, 3]);
/// assert_eq!(faces.roll_face(8), 8);
/// assert_eq!(faces.roll_face(8), 3);
/// assert!(faces.is_exhausted());
/// ```
#[derive(Clone, Debug)]
pub struct ScriptedFaces {
    faces: VecDeque<u32>,
    fallback: DiceRng,
}

impl ScriptedFaces {
    pub fn new(faces: impl IntoIterator<Item = u32>) -> Self {
        Self {
            faces: faces.into_iter().collect(),
            fallback: DiceRng::new(0),
        }
    }

    /// Draw from `fallback` after the script ends.
    #[must_use]
    pub fn with_fallback(mut self, fallback: DiceRng) -> Self {
        self.fallback = fallback;
        self
    }

    /// Faces not yet drawn.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.faces.len()
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.faces.is_empty()
    }
}

impl Default for ScriptedFaces {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl FaceSource for ScriptedFaces {
    fn roll_face(&mut self, sides: u32) -> u32 {
        let Some(face) = self.faces.pop_front() else {
            warn!(seed = self.fallback.seed(), "scripted faces exhausted, rolling");
            return self.fallback.roll_face(sides);
        };
        let top = sides.max(1);
        if !(1..=top).contains(&face) {
            warn!(face, sides, "scripted face clamped onto the die");
        }
        face.clamp(1, top)
    }
}
