//! Multi-round combat driven through the engine, persisted to disk.

mod common;

use common::{engine_with, init_tracing, npc, pc};
use mastery_engine::actions::{ActionType, ConversionTarget};
use mastery_engine::buffs::{BuffSpec, BuffType};
use mastery_engine::core::{ActorId, CombatState, RuleError};
use mastery_engine::dice::ScriptedFaces;
use mastery_engine::initiative::{InitiativeResolution, ShopPurchases};
use mastery_engine::repository::{CombatRepository, JsonDirRepository};
use mastery_engine::rounds::{Combat, CombatHooks};

const IRIA: ActorId = ActorId(1);
const BANDIT: ActorId = ActorId(2);

/// Host hooks that record calls and mark one actor as down.
#[derive(Default)]
struct TableHooks {
    condition_ticks: u32,
    utility_ticks: u32,
    down: Option<ActorId>,
    death_saves: Vec<ActorId>,
}

impl CombatHooks for TableHooks {
    fn tick_conditions(&mut self, _actor: ActorId, _state: &mut CombatState) {
        self.condition_ticks += 1;
    }

    fn tick_utilities(&mut self, _actor: ActorId, _state: &mut CombatState) {
        self.utility_ticks += 1;
    }

    fn is_incapacitated(&self, actor: ActorId, _state: &CombatState) -> bool {
        self.down == Some(actor)
    }

    fn death_save(&mut self, actor: ActorId, _state: &mut CombatState) {
        self.death_saves.push(actor);
    }
}

#[test]
fn test_two_round_combat() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let mut iria = pc(1, 2);
    iria.actions.attack.base = 2;
    iria.actions.reset_for_round();
    let engine = engine_with(JsonDirRepository::new(dir.path()).unwrap(), vec![iria, npc(2, 1)]);
    let mut hooks = TableHooks::default();

    let mut combat = Combat::new().with_combatant(IRIA).with_combatant(BANDIT);
    combat.set_initiative(IRIA, 12);
    combat.set_initiative(BANDIT, 9);

    // Round 1: no initiative re-roll.
    let round1 = engine
        .start_round(&mut combat, &mut hooks, &mut ScriptedFaces::new(Vec::new()))
        .unwrap();
    assert!(round1.value().unwrap().initiative.is_empty());
    assert_eq!(hooks.condition_ticks, 2);
    assert_eq!(hooks.utility_ticks, 2);

    assert_eq!(combat.current_actor(), Some(IRIA));
    engine.start_turn(&combat, IRIA, &mut hooks).unwrap();
    engine
        .convert_attack_action(IRIA, ConversionTarget::Reaction)
        .unwrap();
    engine.use_action(IRIA, ActionType::Movement, 1).unwrap();
    engine.spend_for_power(IRIA, "Blink").unwrap();
    engine
        .apply_buff(IRIA, BuffSpec::new("Quickstep", BuffType::Movement, 2), combat.round)
        .unwrap();

    assert_eq!(combat.advance_turn(), Some(BANDIT));
    engine.start_turn(&combat, BANDIT, &mut hooks).unwrap();
    engine.use_action(BANDIT, ActionType::Attack, 1).unwrap();
    // Iria reacts on the Bandit's turn with the converted reaction.
    engine.use_action(IRIA, ActionType::Reaction, 2).unwrap();

    let mid = engine.state(IRIA).unwrap();
    assert_eq!(mid.actions.reaction.used, 2);
    assert_eq!(mid.stones.current, 4);

    // Round 2: Iria rolls 2 dice, the Bandit 1.
    assert_eq!(combat.advance_turn(), None);
    combat.advance_round();
    let round2 = engine
        .start_round(&mut combat, &mut hooks, &mut ScriptedFaces::new([3, 5, 6]))
        .unwrap();
    let report = round2.value().unwrap();
    assert_eq!(report.round, 2);

    // Bandit: 6 + 6, final at once.
    assert!(report
        .initiative
        .iter()
        .any(|r| *r == InitiativeResolution::Final { actor: BANDIT, initiative: 12 }));
    assert_eq!(combat.get(BANDIT).unwrap().initiative, Some(12));

    let session = report.pending_shops().next().unwrap().clone();
    // Iria: 6 + 3 + 5.
    assert_eq!(session.raw_initiative, 14);
    let receipt = engine
        .finalize_initiative(
            &mut combat,
            session,
            Some(ShopPurchases {
                extra_movement_meters: 4,
                swap: false,
                extra_attack: false,
            }),
        )
        .unwrap();
    assert_eq!(receipt.value().unwrap().final_initiative, 12);
    // Equal initiative keeps tracker order.
    assert_eq!(combat.turn_order(), vec![IRIA, BANDIT]);

    let after = engine.state(IRIA).unwrap();
    assert_eq!(after.actions.reaction.used, 0);
    assert_eq!(after.actions.conversions.total(), 0);
    assert_eq!(after.actions.movement.max, 3);
    assert_eq!(after.stones.current, 5);
    assert!(after.power_usage.is_empty());
    assert_eq!(after.buffs.active()[0].duration, 1);
    assert_eq!(hooks.condition_ticks, 4);

    // Everything went through the file store.
    assert_eq!(engine.repository().actor_ids().unwrap(), vec![IRIA, BANDIT]);
}

#[test]
fn test_turn_start_expires_converted_reactions() {
    let mut iria = pc(1, 2);
    iria.actions.attack.base = 3;
    iria.actions.reset_for_round();
    let dir = tempfile::tempdir().unwrap();
    let engine = engine_with(JsonDirRepository::new(dir.path()).unwrap(), vec![iria]);
    let combat = Combat::new().with_combatant(IRIA);

    engine.convert_attack_action(IRIA, ConversionTarget::Reaction).unwrap();
    engine.convert_attack_action(IRIA, ConversionTarget::Reaction).unwrap();
    assert_eq!(engine.state(IRIA).unwrap().actions.reaction.max, 3);

    let tick = engine.start_turn(&combat, IRIA, &mut TableHooks::default()).unwrap();
    assert_eq!(tick.value().unwrap().reactions_expired, 2);
    assert_eq!(tick.log[0].summary, "turn started, 2 converted reaction(s) expired");
    assert_eq!(engine.state(IRIA).unwrap().actions.reaction.max, 1);
}

#[test]
fn test_incapacitated_actor_death_save() {
    let dir = tempfile::tempdir().unwrap();
    let engine = engine_with(JsonDirRepository::new(dir.path()).unwrap(), vec![pc(1, 1)]);
    let combat = Combat::new().with_combatant(IRIA);
    let mut hooks = TableHooks {
        down: Some(IRIA),
        ..Default::default()
    };

    let outcome = engine.start_turn(&combat, IRIA, &mut hooks).unwrap();

    assert!(outcome.value().unwrap().death_save);
    assert_eq!(hooks.death_saves, vec![IRIA]);
    assert!(outcome.notices.iter().any(|n| n.text.contains("death save")));
}

#[test]
fn test_cancelled_shop_keeps_raw_value() {
    let dir = tempfile::tempdir().unwrap();
    let engine = engine_with(JsonDirRepository::new(dir.path()).unwrap(), vec![pc(1, 1)]);
    let mut combat = Combat::new().with_combatant(IRIA);
    combat.advance_round();

    let started = engine
        .start_round(&mut combat, &mut TableHooks::default(), &mut ScriptedFaces::new([7]))
        .unwrap();
    let session = started.value().unwrap().pending_shops().next().unwrap().clone();
    let before = engine.state(IRIA).unwrap();

    let outcome = engine.finalize_initiative(&mut combat, session, None).unwrap();

    assert_eq!(outcome.value().unwrap().final_initiative, 13);
    assert_eq!(combat.get(IRIA).unwrap().initiative, Some(13));
    let after = engine.state(IRIA).unwrap();
    assert_eq!(after.actions, before.actions);
    assert!(after.shop_scratch.closed);
    assert!(!after.shop_scratch.extra_attack);
}

#[test]
fn test_shop_cannot_be_reopened_in_same_round() {
    let dir = tempfile::tempdir().unwrap();
    let engine = engine_with(JsonDirRepository::new(dir.path()).unwrap(), vec![pc(1, 1)]);
    let mut combat = Combat::new().with_combatant(IRIA);
    combat.advance_round();

    let started = engine
        .start_round(&mut combat, &mut TableHooks::default(), &mut ScriptedFaces::new([7]))
        .unwrap();
    let session = started.value().unwrap().pending_shops().next().unwrap().clone();
    let attack = ShopPurchases { extra_attack: true, ..Default::default() };

    let first = engine.finalize_initiative(&mut combat, session.clone(), Some(attack)).unwrap();
    assert_eq!(first.value().unwrap().final_initiative, 8);

    let second = engine.finalize_initiative(&mut combat, session.clone(), Some(attack)).unwrap();
    let cancel = engine.finalize_initiative(&mut combat, session, None).unwrap();
    assert!(matches!(second.error(), Some(RuleError::InvariantViolation(_))));
    assert!(matches!(cancel.error(), Some(RuleError::InvariantViolation(_))));

    let state = engine.state(IRIA).unwrap();
    assert_eq!(state.actions.attack.max, 2);
    assert!(state.shop_scratch.extra_attack);
    assert_eq!(combat.get(IRIA).unwrap().initiative, Some(8));
}

#[test]
fn test_reaction_spent_before_turn_start_stays_consistent() {
    let mut iria = pc(1, 2);
    iria.actions.attack.base = 2;
    iria.actions.reset_for_round();
    let dir = tempfile::tempdir().unwrap();
    let engine = engine_with(JsonDirRepository::new(dir.path()).unwrap(), vec![iria]);
    let combat = Combat::new().with_combatant(IRIA);

    engine.convert_attack_action(IRIA, ConversionTarget::Reaction).unwrap();
    engine.use_action(IRIA, ActionType::Reaction, 2).unwrap();
    engine.start_turn(&combat, IRIA, &mut TableHooks::default()).unwrap();

    let state = engine.state(IRIA).unwrap();
    assert_eq!(state.actions.reaction.max, 1);
    assert_eq!(state.actions.reaction.used, 1);

    let undo = engine.undo_conversion(IRIA, ConversionTarget::Reaction).unwrap();
    assert!(matches!(undo.error(), Some(RuleError::InvariantViolation(_))));
    assert_eq!(engine.state(IRIA).unwrap(), state);
}
