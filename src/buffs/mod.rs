//! Timed, type-exclusive buffs.
//!
//! Buffs belong to one exclusivity category ([`BuffType`]); an actor holds
//! at most one active buff per category. Durations are counted in rounds
//! and tick down once at every round start.
//!
//! ```
//! use mastery_engine::buffs::{BuffEffect, BuffRegistry, BuffSpec, BuffType};
//!
//! let mut buffs = BuffRegistry::new();
//! buffs
//!     .apply_buff(
//!         BuffSpec::new("Battle Focus", BuffType::Attack, 2).with_effect(BuffEffect::flat("attack", 2)),
//!         1,
//!     )
//!     .unwrap();
//!
//! assert_eq!(buffs.apply_buff_effects("attack", 5), 7);
//! assert!(buffs.apply_buff(BuffSpec::new("Rage", BuffType::Attack, 1), 1).is_err());
//! ```

mod buff;
mod registry;

pub use buff::{Buff, BuffEffect, BuffId, BuffSpec, BuffType};
pub use registry::{BuffRegistry, BuffTotals};
