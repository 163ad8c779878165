//! Round-start and turn-start processing.
//!
//! ## Round start
//!
//! From round 2 on, initiative is re-resolved for every combatant first.
//! Then each actor, independently of the others, runs:
//!
//! 1. action pools reset (and per-power Stone usage cleared)
//! 2. Stone regeneration
//! 3. condition tick (host hook)
//! 4. buff duration tick
//! 5. utility tick (host hook)
//! 6. charged-power gate reset
//! 7. initiative shop scratch cleared
//!
//! ## Turn start
//!
//! Incapacitated actors make a death save (host hook), then reactions
//! gained by conversion this round expire.

use tracing::{debug, info, warn};

use crate::buffs::Buff;
use crate::core::{ActorId, CombatState};
use crate::dice::FaceSource;
use crate::initiative::{InitiativeResolution, InitiativeResolver, ShopScratch, ShopSession};

use super::combat::Combat;
use super::hooks::CombatHooks;

/// What happened to one actor at round start.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundTick {
    pub actor: ActorId,
    pub round: u32,
    /// Stones after regeneration.
    pub stones: u32,
    pub expired_buffs: Vec<Buff>,
}

/// What happened to one actor at turn start.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TurnTick {
    pub actor: ActorId,
    pub death_save: bool,
    /// Converted reactions that expired.
    pub reactions_expired: u32,
}

/// Run the round-start sequence for one actor.
pub fn round_start_tick(state: &mut CombatState, round: u32, hooks: &mut impl CombatHooks) -> RoundTick {
    let actor = state.actor;

    state.actions.reset_for_round();
    state.power_usage.clear();
    let stones = state.stones.regenerate_per_round();
    hooks.tick_conditions(actor, state);
    let expired_buffs = state.buffs.update_buff_durations();
    hooks.tick_utilities(actor, state);
    state.reset_charged_power_flag();
    state.shop_scratch = ShopScratch::default();

    for buff in &expired_buffs {
        info!(%actor, buff = %buff.name, "buff expired");
    }
    debug!(%actor, round, stones, "round start tick");

    RoundTick {
        actor,
        round,
        stones,
        expired_buffs,
    }
}

/// Run the turn-start sequence for one actor.
pub fn turn_start_tick(state: &mut CombatState, hooks: &mut impl CombatHooks) -> TurnTick {
    let actor = state.actor;

    let death_save = hooks.is_incapacitated(actor, state);
    if death_save {
        info!(%actor, "incapacitated; death save");
        hooks.death_save(actor, state);
    }

    let reactions_expired = state.actions.reaction_converted_this_round;
    state.actions.reset_for_turn();

    TurnTick {
        actor,
        death_save,
        reactions_expired,
    }
}

/// Everything produced by one round start.
#[derive(Clone, Debug, Default)]
pub struct RoundStart {
    pub round: u32,
    /// Initiative outcomes (empty in round 1). Player entries carry an
    /// open shop session.
    pub initiative: Vec<InitiativeResolution>,
    pub ticks: Vec<RoundTick>,
}

impl RoundStart {
    /// Player shop sessions still waiting for a decision.
    pub fn pending_shops(&self) -> impl Iterator<Item = &ShopSession> {
        self.initiative.iter().filter_map(|r| match r {
            InitiativeResolution::Shop(session) => Some(session),
            InitiativeResolution::Final { .. } => None,
        })
    }
}

/// Drives round and turn processing over in-memory states.
#[derive(Clone, Debug, Default)]
pub struct RoundScheduler {
    initiative: InitiativeResolver,
}

impl RoundScheduler {
    #[must_use]
    pub fn new(initiative: InitiativeResolver) -> Self {
        Self { initiative }
    }

    #[must_use]
    pub fn initiative(&self) -> &InitiativeResolver {
        &self.initiative
    }

    /// Roll initiative for one combatant and record final values on the
    /// tracker. Player values stay pending until their shop closes.
    pub fn resolve_initiative_for(
        &self,
        combat: &mut Combat,
        state: &CombatState,
        source: &mut impl FaceSource,
    ) -> InitiativeResolution {
        let resolution = self.initiative.resolve(state.actor, &state.profile, source);
        let value = resolution.final_value();
        if let Some(c) = combat.get_mut(state.actor) {
            c.initiative = value;
        }
        resolution
    }

    /// Round start across every live combatant in `states`.
    ///
    /// Defeated combatants and combatants with no matching state are
    /// skipped.
    pub fn on_round_start(
        &self,
        combat: &mut Combat,
        states: &mut [CombatState],
        hooks: &mut impl CombatHooks,
        source: &mut impl FaceSource,
    ) -> RoundStart {
        let round = combat.round;
        let mut report = RoundStart {
            round,
            ..Default::default()
        };

        let actors = combat.live_actors();

        if round > 1 {
            for &actor in &actors {
                match states.iter().find(|s| s.actor == actor) {
                    Some(state) => report
                        .initiative
                        .push(self.resolve_initiative_for(combat, state, source)),
                    None => warn!(%actor, "no combat state; initiative skipped"),
                }
            }
        }

        for &actor in &actors {
            if let Some(state) = states.iter_mut().find(|s| s.actor == actor) {
                report.ticks.push(round_start_tick(state, round, hooks));
            }
        }

        info!(round, combatants = actors.len(), "round started");
        report
    }

    /// Turn start for the acting combatant.
    pub fn on_turn_start(&self, state: &mut CombatState, hooks: &mut impl CombatHooks) -> TurnTick {
        turn_start_tick(state, hooks)
    }
}
