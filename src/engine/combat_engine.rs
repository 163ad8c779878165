//! The combat engine facade.
//!
//! Every mutating method follows the same sequence for one actor:
//!
//! 1. take the actor's lock
//! 2. load the state from the repository
//! 3. apply the rule operation
//! 4. on success, save once and attach an info notice plus a log entry
//! 5. on refusal, save nothing and attach a warning notice
//!
//! Rule refusals come back inside [`Outcome`]. Only repository failures
//! surface as `Err`.

use tracing::{info, warn};

use crate::actions::{ActionType, ConversionTarget};
use crate::buffs::{Buff, BuffId, BuffSpec};
use crate::core::{ActorId, CombatState, ConfigError, EngineConfig, RuleError, RuleResult};
use crate::dice::{DiceResolver, FaceSource, MasteryRollRequest, MasteryRollResult};
use crate::initiative::{InitiativeResolver, ShopPurchases, ShopReceipt, ShopSession};
use crate::mastery::ChargedActivation;
use crate::repository::{CombatRepository, RepositoryError, Result};
use crate::resources::StressReport;
use crate::rounds::{round_start_tick, turn_start_tick, Combat, CombatHooks, RoundScheduler, RoundStart, TurnTick};

use super::locks::ActorLocks;
use super::outcome::{LogEntry, Notice, Outcome};

/// Serialized access to every actor's combat state.
pub struct CombatEngine<R: CombatRepository> {
    repo: R,
    config: EngineConfig,
    dice: DiceResolver,
    scheduler: RoundScheduler,
    locks: ActorLocks,
}

impl<R: CombatRepository> CombatEngine<R> {
    /// Build an engine over `repo`. The configuration is validated first.
    pub fn new(repo: R, config: EngineConfig) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        let dice = DiceResolver::new(&config);
        let scheduler = RoundScheduler::new(InitiativeResolver::new(dice, config.shop.clone()));
        Ok(Self {
            repo,
            config,
            dice,
            scheduler,
            locks: ActorLocks::new(),
        })
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn dice(&self) -> &DiceResolver {
        &self.dice
    }

    /// Store a fresh state for an actor, replacing any previous one.
    pub fn register(&self, state: CombatState) -> Result<()> {
        let lock = self.locks.get(state.actor)?;
        let _guard = lock.lock().map_err(|_| RepositoryError::LockPoisoned)?;
        self.repo.save(&state)?;
        info!(actor = %state.actor, "combat state registered");
        Ok(())
    }

    /// Current state of an actor.
    pub fn state(&self, actor: ActorId) -> Result<CombatState> {
        self.repo.require(actor)
    }

    fn mutate<T>(
        &self,
        actor: ActorId,
        op: &'static str,
        apply: impl FnOnce(&mut CombatState) -> RuleResult<T>,
        describe: impl FnOnce(&T) -> String,
    ) -> Result<Outcome<T>> {
        let lock = self.locks.get(actor)?;
        let _guard = lock.lock().map_err(|_| RepositoryError::LockPoisoned)?;

        let mut state = self.repo.require(actor)?;
        match apply(&mut state) {
            Ok(value) => {
                self.repo.save(&state)?;
                let summary = describe(&value);
                info!(%actor, op, %summary, "applied");
                Ok(Outcome::success(value)
                    .with_notice(Notice::info(format!("{}: {}", actor, summary)))
                    .with_log(actor, summary))
            }
            Err(error) => {
                warn!(%actor, op, kind = error.kind(), %error, "refused");
                Ok(Outcome::failure(error))
            }
        }
    }

    // === Action economy ===

    pub fn use_action(&self, actor: ActorId, kind: ActionType, amount: u32) -> Result<Outcome<u32>> {
        self.mutate(
            actor,
            "use_action",
            |s| s.actions.use_action(kind, amount),
            |left| format!("used {} {} action(s), {} left", amount, kind, left),
        )
    }

    pub fn unuse_action(&self, actor: ActorId, kind: ActionType, amount: u32) -> Result<Outcome<u32>> {
        self.mutate(
            actor,
            "unuse_action",
            |s| Ok(s.actions.unuse_action(kind, amount)),
            |left| format!("restored {} {} action(s), {} left", amount, kind, left),
        )
    }

    pub fn convert_attack_action(&self, actor: ActorId, target: ConversionTarget) -> Result<Outcome<()>> {
        self.mutate(
            actor,
            "convert_attack_action",
            |s| {
                let rank = s.mastery_rank();
                s.actions.convert_attack_action(target, rank)
            },
            |_| format!("converted an attack action to {}", target),
        )
    }

    pub fn undo_conversion(&self, actor: ActorId, target: ConversionTarget) -> Result<Outcome<()>> {
        self.mutate(
            actor,
            "undo_conversion",
            |s| s.actions.undo_conversion(target),
            |_| format!("undid an attack-to-{} conversion", target),
        )
    }

    // === Stones ===

    pub fn spend_stones(&self, actor: ActorId, amount: u32) -> Result<Outcome<u32>> {
        self.mutate(
            actor,
            "spend_stones",
            |s| s.stones.spend(amount),
            |left| format!("spent {} Stone(s), {} left", amount, left),
        )
    }

    /// Pay the escalating Stone cost for one use of `power`.
    pub fn spend_for_power(&self, actor: ActorId, power: &str) -> Result<Outcome<u32>> {
        self.mutate(
            actor,
            "spend_for_power",
            |s| s.power_usage.spend_for_power(power, &mut s.stones),
            |cost| format!("spent {} Stone(s) on {}", cost, power),
        )
    }

    pub fn regenerate_stones(&self, actor: ActorId, regen: u32) -> Result<Outcome<u32>> {
        self.mutate(
            actor,
            "regenerate_stones",
            |s| Ok(s.stones.regenerate(regen)),
            |now| format!("regenerated Stones to {}", now),
        )
    }

    pub fn restore_all_stones(&self, actor: ActorId) -> Result<Outcome<u32>> {
        self.mutate(
            actor,
            "restore_all_stones",
            |s| {
                s.stones.restore_all();
                Ok(s.stones.current)
            },
            |now| format!("Stones fully restored ({})", now),
        )
    }

    // === Vitality and Stress ===

    pub fn apply_vitality_damage(&self, actor: ActorId, amount: u32) -> Result<Outcome<u32>> {
        self.mutate(
            actor,
            "apply_vitality_damage",
            |s| vitality(s)?.apply_damage(amount),
            |now| format!("took {} damage, Vitality {}", amount, now),
        )
    }

    pub fn heal_vitality(&self, actor: ActorId, amount: u32) -> Result<Outcome<u32>> {
        self.mutate(
            actor,
            "heal_vitality",
            |s| vitality(s)?.heal(amount),
            |now| format!("healed {}, Vitality {}", amount, now),
        )
    }

    pub fn grant_temp_hp(&self, actor: ActorId, amount: u32) -> Result<Outcome<u32>> {
        self.mutate(
            actor,
            "grant_temp_hp",
            |s| Ok(vitality(s)?.grant_temp_hp(amount)),
            |now| format!("temporary HP now {}", now),
        )
    }

    /// Add Stress. A filled bar adds a notice asking for a mind save.
    pub fn add_stress(&self, actor: ActorId, amount: u32) -> Result<Outcome<StressReport>> {
        let outcome = self.mutate(
            actor,
            "add_stress",
            |s| stress(s)?.add_stress(amount),
            |r| format!("gained {} Stress, {}/{}", amount, r.current, r.max),
        )?;
        let save = outcome.value().filter(|r| r.mind_save_required).copied();
        Ok(match save {
            Some(report) if report.on_final_bar => {
                outcome.with_notice(Notice::error(format!("{} must make a mind save (final Stress bar)", actor)))
            }
            Some(_) => outcome.with_notice(Notice::warn(format!("{} must make a mind save", actor))),
            None => outcome,
        })
    }

    pub fn reduce_stress(&self, actor: ActorId, amount: u32) -> Result<Outcome<u32>> {
        self.mutate(
            actor,
            "reduce_stress",
            |s| stress(s)?.reduce_stress(amount),
            |now| format!("recovered {} Stress, now {}", amount, now),
        )
    }

    // === Mastery Charges ===

    pub fn spend_charge(&self, actor: ActorId) -> Result<Outcome<u32>> {
        self.mutate(
            actor,
            "spend_charge",
            CombatState::spend_charge,
            |left| format!("spent a Mastery Charge, {} left", left),
        )
    }

    pub fn activate_charged_power(&self, actor: ActorId, power: &str) -> Result<Outcome<ChargedActivation>> {
        self.mutate(
            actor,
            "activate_charged_power",
            |s| s.activate_charged_power(power),
            |a| format!("activated {}, {} charge(s) left", a.power, a.charges_remaining),
        )
    }

    pub fn burn_stone_for_charges(&self, actor: ActorId) -> Result<Outcome<u32>> {
        self.mutate(
            actor,
            "burn_stone_for_charges",
            CombatState::burn_stone_for_charges,
            |available| format!("burned a Stone, {} charge(s) available", available),
        )
    }

    pub fn restore_charges(&self, actor: ActorId) -> Result<Outcome<u32>> {
        self.mutate(
            actor,
            "restore_charges",
            |s| {
                s.restore_charges();
                Ok(s.charges.available())
            },
            |now| format!("Mastery Charges restored ({})", now),
        )
    }

    // === Buffs ===

    pub fn apply_buff(&self, actor: ActorId, spec: BuffSpec, current_round: u32) -> Result<Outcome<Buff>> {
        self.mutate(
            actor,
            "apply_buff",
            |s| s.buffs.apply_buff(spec, current_round).cloned(),
            |b| format!("gained {} ({} rounds)", b.name, b.duration),
        )
    }

    /// Remove a buff. An unknown id is refused as `NotFound` and changes
    /// nothing.
    pub fn remove_buff(&self, actor: ActorId, id: BuffId) -> Result<Outcome<Buff>> {
        self.mutate(
            actor,
            "remove_buff",
            |s| {
                s.buffs
                    .remove_buff(id)
                    .ok_or_else(|| RuleError::not_found(format!("No active buff {}", id)))
            },
            |b| format!("lost {}", b.name),
        )
    }

    pub fn clear_all_buffs(&self, actor: ActorId) -> Result<Outcome<usize>> {
        self.mutate(
            actor,
            "clear_all_buffs",
            |s| Ok(s.buffs.clear_all_buffs()),
            |n| format!("cleared {} buff(s)", n),
        )
    }

    // === Rest and combat lifecycle ===

    pub fn rest(&self, actor: ActorId) -> Result<Outcome<()>> {
        self.mutate(
            actor,
            "rest",
            |s| {
                s.rest();
                Ok(())
            },
            |_| "rested: Stones and Mastery Charges restored".to_string(),
        )
    }

    pub fn dawn(&self, actor: ActorId) -> Result<Outcome<()>> {
        self.mutate(
            actor,
            "dawn",
            |s| {
                s.dawn();
                Ok(())
            },
            |_| "dawn: Mastery Charges restored".to_string(),
        )
    }

    pub fn end_combat(&self, actor: ActorId) -> Result<Outcome<usize>> {
        self.mutate(
            actor,
            "end_combat",
            |s| Ok(s.end_combat()),
            |n| format!("combat ended, {} buff(s) cleared", n),
        )
    }

    // === Rounds and initiative ===

    /// Round start for every combatant.
    ///
    /// From round 2 on, initiative is re-rolled first. NPC values go
    /// straight onto the tracker; player characters come back as pending
    /// shop sessions to close with [`CombatEngine::finalize_initiative`].
    /// Each actor is then ticked and saved under its own lock. Defeated
    /// combatants and combatants with no stored state are skipped.
    pub fn start_round(
        &self,
        combat: &mut Combat,
        hooks: &mut impl CombatHooks,
        source: &mut impl FaceSource,
    ) -> Result<Outcome<RoundStart>> {
        let round = combat.round;
        let actors = combat.live_actors();
        let mut report = RoundStart {
            round,
            ..Default::default()
        };
        let mut notices = Vec::new();
        let mut log = Vec::new();

        if round > 1 {
            for &actor in &actors {
                match self.repo.load(actor)? {
                    Some(state) => {
                        let resolution = self.scheduler.resolve_initiative_for(combat, &state, source);
                        if let Some(value) = resolution.final_value() {
                            log.push(LogEntry {
                                actor,
                                summary: format!("initiative {}", value),
                            });
                        }
                        report.initiative.push(resolution);
                    }
                    None => warn!(%actor, "no combat state; initiative skipped"),
                }
            }
        }

        for &actor in &actors {
            let lock = self.locks.get(actor)?;
            let _guard = lock.lock().map_err(|_| RepositoryError::LockPoisoned)?;

            let mut state = match self.repo.load(actor)? {
                Some(state) => state,
                None => continue,
            };
            let tick = round_start_tick(&mut state, round, hooks);
            self.repo.save(&state)?;

            notices.push(Notice::info(format!(
                "{} regenerated Stones ({}/{})",
                actor, tick.stones, state.stones.max
            )));
            for buff in &tick.expired_buffs {
                notices.push(Notice::info(format!("{} expired on {}", buff.name, actor)));
                log.push(LogEntry {
                    actor,
                    summary: format!("{} expired", buff.name),
                });
            }
            report.ticks.push(tick);
        }

        for session in report.pending_shops() {
            notices.push(Notice::info(format!(
                "{} may spend initiative ({} available)",
                session.actor, session.raw_initiative
            )));
        }

        info!(round, combatants = actors.len(), "round started");
        let mut outcome = Outcome::success(report);
        outcome.notices = notices;
        outcome.log = log;
        Ok(outcome)
    }

    /// Turn start for one combatant.
    pub fn start_turn(&self, combat: &Combat, actor: ActorId, hooks: &mut impl CombatHooks) -> Result<Outcome<TurnTick>> {
        match combat.get(actor) {
            None => {
                return Ok(Outcome::failure(RuleError::not_found(format!("{} is not in this combat", actor))));
            }
            Some(c) if c.defeated => {
                return Ok(Outcome::failure(RuleError::invariant(format!("{} is defeated", actor))));
            }
            Some(_) => {}
        }

        let outcome = self.mutate(
            actor,
            "start_turn",
            |s| Ok(turn_start_tick(s, hooks)),
            |t| match t.reactions_expired {
                0 => "turn started".to_string(),
                n => format!("turn started, {} converted reaction(s) expired", n),
            },
        )?;

        let death_save = outcome.value().map_or(false, |t| t.death_save);
        Ok(if death_save {
            outcome.with_notice(Notice::warn(format!("{} must make a death save", actor)))
        } else {
            outcome
        })
    }

    /// Close a player's initiative shop.
    ///
    /// `Some(purchases)` confirms: if they cost more than the raw value the
    /// outcome is refused and nothing is granted. `None` cancels and keeps
    /// the raw value. The final value is written to the tracker.
    ///
    /// The session is consumed. Each actor's shop closes once per round;
    /// any later finalize in the same round is refused with
    /// [`RuleError::InvariantViolation`] and leaves state and tracker alone.
    pub fn finalize_initiative(
        &self,
        combat: &mut Combat,
        session: ShopSession,
        purchases: Option<ShopPurchases>,
    ) -> Result<Outcome<ShopReceipt>> {
        let actor = session.actor;
        let outcome = self.mutate(
            actor,
            "finalize_initiative",
            |s| {
                s.shop_scratch.ensure_open()?;
                let receipt = match purchases {
                    Some(purchases) => session.confirm(purchases)?,
                    None => session.cancel(),
                };
                receipt.apply_to(s)?;
                Ok(receipt)
            },
            |r| format!("initiative {} (spent {})", r.final_initiative, r.spent),
        )?;

        if let Some(receipt) = outcome.value() {
            combat.set_initiative(receipt.actor, receipt.final_initiative);
        }
        Ok(outcome)
    }

    // === Dice ===

    /// Roll and keep for an actor. Touches no state.
    pub fn mastery_roll(
        &self,
        actor: ActorId,
        request: MasteryRollRequest,
        source: &mut impl FaceSource,
    ) -> Outcome<MasteryRollResult> {
        let result = self.dice.mastery_roll(request, source);
        let summary = if request.tn > 0 {
            format!(
                "rolled {}k{} vs TN {}: {} ({}, {} raise(s))",
                request.num_dice,
                request.keep_dice,
                request.tn,
                result.total,
                if result.success { "success" } else { "failure" },
                result.raises
            )
        } else {
            format!("rolled {}k{}: {}", request.num_dice, request.keep_dice, result.total)
        };
        Outcome::success(result).with_log(actor, summary)
    }
}

fn vitality(state: &mut CombatState) -> RuleResult<&mut crate::resources::VitalityTrack> {
    state
        .vitality
        .as_mut()
        .ok_or_else(|| RuleError::not_found("No Vitality track"))
}

fn stress(state: &mut CombatState) -> RuleResult<&mut crate::resources::StressTrack> {
    state
        .stress
        .as_mut()
        .ok_or_else(|| RuleError::not_found("No Stress track"))
}
