//! Mastery Charges and charged powers.
//!
//! An actor starts each day with `mastery_rank` charges. Burning a Stone
//! outside combat grants two temporary charges, which are spent first and
//! lost on the next full restore. At most one charged power fires per round.

mod charges;
mod gate;

pub use charges::{MasteryCharges, CHARGES_PER_BURNED_STONE};
pub use gate::ChargedActivation;
