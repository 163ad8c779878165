//! Per-actor combat state.
//!
//! ## ActorProfile
//!
//! Read-only character data owned by the host's character sheet:
//! - Mastery Rank, attributes, Combat Reflexes skill
//! - Stone maximum and regeneration
//!
//! ## CombatState
//!
//! Everything the engine mutates for one actor:
//! - Action pools and conversions
//! - Stones and per-power usage
//! - Vitality and Stress tracks (optional, not every actor has them)
//! - Mastery Charges and the charged-power gate
//! - Active buffs
//! - Initiative shop scratch
//!
//! All defaults are applied once, in [`CombatState::new`]. Nothing downstream
//! substitutes defaults at read time.

use serde::{Deserialize, Serialize};

use super::entity::{ActorId, ActorKind};
use crate::actions::ActionPools;
use crate::buffs::BuffRegistry;
use crate::initiative::ShopScratch;
use crate::mastery::MasteryCharges;
use crate::resources::{BarTrack, PowerUsage, StonePool, VitalityTrack};

/// Character data the engine reads but never changes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorProfile {
    pub name: String,
    pub kind: ActorKind,

    /// Drives dice kept, charge budget, and conversion cap. Always >= 1.
    pub mastery_rank: u32,

    pub agility: i64,
    pub wits: i64,
    pub combat_reflexes: i64,

    pub stone_max: u32,
    pub stone_regen: u32,
}

impl ActorProfile {
    /// Create a profile. Mastery Rank is clamped to at least 1.
    pub fn new(name: impl Into<String>, kind: ActorKind, mastery_rank: u32) -> Self {
        Self {
            name: name.into(),
            kind,
            mastery_rank: mastery_rank.max(1),
            agility: 0,
            wits: 0,
            combat_reflexes: 0,
            stone_max: 0,
            stone_regen: 0,
        }
    }

    /// Set the initiative attributes (builder pattern).
    #[must_use]
    pub fn with_attributes(mut self, agility: i64, wits: i64, combat_reflexes: i64) -> Self {
        self.agility = agility;
        self.wits = wits;
        self.combat_reflexes = combat_reflexes;
        self
    }

    /// Set the Stone pool size and regeneration (builder pattern).
    #[must_use]
    pub fn with_stones(mut self, max: u32, regen: u32) -> Self {
        self.stone_max = max;
        self.stone_regen = regen;
        self
    }
}

/// Complete combat state for one actor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatState {
    pub actor: ActorId,
    pub profile: ActorProfile,

    pub actions: ActionPools,
    pub stones: StonePool,
    pub power_usage: PowerUsage,
    pub vitality: Option<VitalityTrack>,
    pub stress: Option<BarTrack>,
    pub charges: MasteryCharges,
    pub buffs: BuffRegistry,

    /// Set when a charged power fires; cleared at every round start.
    pub charged_power_used_this_round: bool,

    /// Initiative shop purchases for this round; cleared at round start.
    pub shop_scratch: ShopScratch,
}

impl CombatState {
    /// Build a fresh state with every default applied.
    ///
    /// ## Defaults
    ///
    /// - Action pools: `{base: 1, bonus: 0, max: 1, used: 0}` each
    /// - Stones: full, from the profile
    /// - Mastery Charges: `current = max = mastery_rank`, no temporary
    /// - No Vitality or Stress tracks, no buffs
    #[must_use]
    pub fn new(actor: ActorId, profile: ActorProfile) -> Self {
        Self {
            actor,
            stones: StonePool::new(profile.stone_max, profile.stone_regen),
            charges: MasteryCharges::for_rank(profile.mastery_rank),
            profile,
            actions: ActionPools::default(),
            power_usage: PowerUsage::default(),
            vitality: None,
            stress: None,
            buffs: BuffRegistry::new(),
            charged_power_used_this_round: false,
            shop_scratch: ShopScratch::default(),
        }
    }

    /// Attach a Vitality track (builder pattern).
    #[must_use]
    pub fn with_vitality(mut self, vitality: VitalityTrack) -> Self {
        self.vitality = Some(vitality);
        self
    }

    /// Attach a Stress track (builder pattern).
    #[must_use]
    pub fn with_stress(mut self, stress: BarTrack) -> Self {
        self.stress = Some(stress);
        self
    }

    /// Replace the action pools (builder pattern).
    #[must_use]
    pub fn with_actions(mut self, actions: ActionPools) -> Self {
        self.actions = actions;
        self
    }

    #[must_use]
    pub fn mastery_rank(&self) -> u32 {
        self.profile.mastery_rank
    }

    #[must_use]
    pub fn is_npc(&self) -> bool {
        self.profile.kind.is_npc()
    }

    /// Rest: Stones and Mastery Charges fully restored.
    pub fn rest(&mut self) {
        self.stones.restore_all();
        self.restore_charges();
    }

    /// Dawn: Mastery Charges restored, temporary charges lost.
    pub fn dawn(&mut self) {
        self.restore_charges();
    }

    /// End of combat: every buff and all per-round scratch is dropped.
    /// Returns the number of buffs cleared.
    pub fn end_combat(&mut self) -> usize {
        let cleared = self.buffs.clear_all_buffs();
        self.actions.reset_for_round();
        self.power_usage.clear();
        self.reset_charged_power_flag();
        self.shop_scratch = ShopScratch::default();
        cleared
    }
}
