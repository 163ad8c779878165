//! Initiative resolution and the initiative shop.
//!
//! Initiative is `agility + wits + combat_reflexes` plus `mastery_rank`
//! exploding dice, all summed. NPCs take the value as-is (floored at 0).
//! Player characters first get a [`ShopSession`] where they may trade
//! points for extra movement, a turn-order swap, or an extra attack.

mod resolver;
mod shop;

pub use resolver::{calculate_base_initiative, InitiativeResolution, InitiativeResolver, InitiativeRoll};
pub use shop::{ShopPurchases, ShopReceipt, ShopScratch, ShopSession};
