//! Resource pools: Stones, Vitality, and Stress.
//!
//! - [`StonePool`]: spent on powers, regenerates each round, restored on rest
//! - [`PowerUsage`]: per-round use counts behind the doubling Stone cost
//! - [`VitalityTrack`]: damage and healing against the current bar
//! - [`StressTrack`]: stress gain and relief, signalling mind saves

mod bars;
mod stones;

pub use bars::{Bar, BarTrack, StressReport, StressTrack, VitalityTrack};
pub use stones::{calculate_stone_cost, PowerUsage, StonePool};
