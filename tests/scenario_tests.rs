//! Rule scenarios run through the engine facade.
//!
//! Each scenario checks both the returned outcome and the persisted state.

mod common;

use common::{engine_with, init_tracing, npc, pc};
use mastery_engine::actions::{ActionType, ConversionTarget};
use mastery_engine::buffs::{BuffEffect, BuffSpec, BuffType};
use mastery_engine::core::{ActorId, RuleError};
use mastery_engine::engine::{NoticeLevel, Outcome};
use mastery_engine::mastery::MasteryCharges;
use mastery_engine::repository::InMemoryRepository;
use mastery_engine::rounds::{Combat, NoHooks};
use mastery_engine::dice::ScriptedFaces;

const IRIA: ActorId = ActorId(1);

fn assert_refused<T: std::fmt::Debug>(outcome: &Outcome<T>, text: &str) {
    assert!(!outcome.ok(), "expected refusal, got {:?}", outcome.value());
    let message = outcome.message().unwrap();
    assert!(message.contains(text), "message {:?} should mention {:?}", message, text);
    assert_eq!(outcome.notices[0].level, NoticeLevel::Warn);
    assert!(outcome.log.is_empty());
}

#[test]
fn test_insufficient_stones() {
    init_tracing();
    let mut state = pc(1, 2);
    state.stones.current = 2;
    let engine = engine_with(InMemoryRepository::new(), vec![state.clone()]);

    let outcome = engine.spend_stones(IRIA, 3).unwrap();

    assert_refused(&outcome, "have 2, need 3");
    assert!(matches!(outcome.error(), Some(RuleError::InsufficientResource(_))));
    assert_eq!(engine.state(IRIA).unwrap(), state);
}

#[test]
fn test_last_attack_guard() {
    init_tracing();
    let state = pc(1, 2);
    assert_eq!(state.actions.attack.max, 1);
    let engine = engine_with(InMemoryRepository::new(), vec![state.clone()]);

    let outcome = engine.convert_attack_action(IRIA, ConversionTarget::Movement).unwrap();

    assert_refused(&outcome, "at least 1 Attack action must remain");
    assert!(matches!(outcome.error(), Some(RuleError::InvariantViolation(_))));
    assert_eq!(engine.state(IRIA).unwrap(), state);
}

#[test]
fn test_charge_burn() {
    init_tracing();
    let mut state = pc(1, 2);
    state.stones.current = 1;
    state.charges = MasteryCharges { current: 1, max: 2, temporary: 0 };
    let engine = engine_with(InMemoryRepository::new(), vec![state]);

    let outcome = engine.burn_stone_for_charges(IRIA).unwrap();

    assert_eq!(outcome.value(), Some(&3));
    let after = engine.state(IRIA).unwrap();
    assert_eq!(after.stones.current, 0);
    assert_eq!(after.charges.temporary, 2);
    assert_eq!(after.charges.available(), 3);

    // Nothing left to burn.
    let again = engine.burn_stone_for_charges(IRIA).unwrap();
    assert_refused(&again, "No Stones to burn");
}

#[test]
fn test_buff_expiry_at_round_start() {
    init_tracing();
    let engine = engine_with(InMemoryRepository::new(), vec![pc(1, 2)]);
    engine
        .apply_buff(IRIA, BuffSpec::new("Quickstep", BuffType::Movement, 1), 1)
        .unwrap();
    engine
        .apply_buff(
            IRIA,
            BuffSpec::new("Iron Hide", BuffType::Defense, 3).with_effect(BuffEffect::flat("defense", 2)),
            1,
        )
        .unwrap();

    let mut combat = Combat::new().with_combatant(IRIA);
    let started = engine
        .start_round(&mut combat, &mut NoHooks, &mut ScriptedFaces::new(Vec::new()))
        .unwrap();

    let ticks = &started.value().unwrap().ticks;
    assert_eq!(ticks[0].expired_buffs.len(), 1);
    assert_eq!(ticks[0].expired_buffs[0].name, "Quickstep");
    assert!(started.notices.iter().any(|n| n.text.contains("Quickstep expired")));

    let after = engine.state(IRIA).unwrap();
    assert_eq!(after.buffs.len(), 1);
    assert_eq!(after.buffs.active()[0].duration, 2);
    assert_eq!(after.buffs.apply_buff_effects("defense", 10), 12);
}

#[test]
fn test_buff_type_exclusive() {
    let engine = engine_with(InMemoryRepository::new(), vec![pc(1, 2)]);
    assert!(engine
        .apply_buff(IRIA, BuffSpec::new("Battle Focus", BuffType::Attack, 2), 1)
        .unwrap()
        .ok());

    let second = engine
        .apply_buff(IRIA, BuffSpec::new("Rage", BuffType::Attack, 2), 1)
        .unwrap();
    assert_refused(&second, "already active");
    assert_eq!(engine.state(IRIA).unwrap().buffs.len(), 1);
}

#[test]
fn test_power_cost_doubles_within_round() {
    let engine = engine_with(InMemoryRepository::new(), vec![pc(1, 2)]);

    assert_eq!(engine.spend_for_power(IRIA, "Blink").unwrap().value(), Some(&1));
    assert_eq!(engine.spend_for_power(IRIA, "Blink").unwrap().value(), Some(&2));
    // A different power starts at 1 again.
    assert_eq!(engine.spend_for_power(IRIA, "Ward").unwrap().value(), Some(&1));
    assert_eq!(engine.state(IRIA).unwrap().stones.current, 1);

    // Blink would now cost 4.
    let refused = engine.spend_for_power(IRIA, "Blink").unwrap();
    assert_refused(&refused, "have 1, need 4");

    let mut combat = Combat::new().with_combatant(IRIA);
    engine
        .start_round(&mut combat, &mut NoHooks, &mut ScriptedFaces::new(Vec::new()))
        .unwrap();
    assert_eq!(engine.spend_for_power(IRIA, "Blink").unwrap().value(), Some(&1));
}

#[test]
fn test_charged_power_once_per_round() {
    let engine = engine_with(InMemoryRepository::new(), vec![pc(1, 3)]);

    let first = engine.activate_charged_power(IRIA, "Meteor").unwrap();
    assert_eq!(first.value().unwrap().charges_remaining, 2);

    let second = engine.activate_charged_power(IRIA, "Meteor").unwrap();
    assert_refused(&second, "already used this round");
    assert_eq!(engine.state(IRIA).unwrap().charges.current, 2);

    let mut combat = Combat::new().with_combatant(IRIA);
    engine
        .start_round(&mut combat, &mut NoHooks, &mut ScriptedFaces::new(Vec::new()))
        .unwrap();
    assert!(engine.activate_charged_power(IRIA, "Meteor").unwrap().ok());
}

#[test]
fn test_action_spend_and_conversion() {
    let mut state = pc(1, 1);
    state.actions.attack.base = 2;
    state.actions.reset_for_round();
    let engine = engine_with(InMemoryRepository::new(), vec![state]);

    assert!(engine
        .convert_attack_action(IRIA, ConversionTarget::Reaction)
        .unwrap()
        .ok());
    // Rank 1 allows a single conversion per round.
    let capped = engine.convert_attack_action(IRIA, ConversionTarget::Movement).unwrap();
    assert_refused(&capped, "Conversion limit reached (1/1)");

    let after = engine.state(IRIA).unwrap();
    assert_eq!(after.actions.reaction.max, 2);
    assert_eq!(after.actions.attack.used, 1);

    // The remaining attack can still be used, then nothing is left.
    assert_eq!(engine.use_action(IRIA, ActionType::Attack, 1).unwrap().value(), Some(&0));
    let none = engine.use_action(IRIA, ActionType::Attack, 1).unwrap();
    assert_refused(&none, "No Attack actions remaining");

    assert_eq!(engine.unuse_action(IRIA, ActionType::Attack, 1).unwrap().value(), Some(&1));
}

#[test]
fn test_vitality_and_stress() {
    let engine = engine_with(InMemoryRepository::new(), vec![pc(1, 2)]);

    assert_eq!(engine.apply_vitality_damage(IRIA, 4).unwrap().value(), Some(&6));
    assert_eq!(engine.heal_vitality(IRIA, 10).unwrap().value(), Some(&10));
    assert_eq!(engine.grant_temp_hp(IRIA, 5).unwrap().value(), Some(&5));
    assert_eq!(engine.grant_temp_hp(IRIA, 3).unwrap().value(), Some(&5));

    let zero = engine.apply_vitality_damage(IRIA, 0).unwrap();
    assert!(matches!(zero.error(), Some(RuleError::InvariantViolation(_))));

    let stress = engine.add_stress(IRIA, 2).unwrap();
    assert!(!stress.value().unwrap().mind_save_required);
    assert!(stress.notices.iter().all(|n| n.level == NoticeLevel::Info));

    let full = engine.add_stress(IRIA, 2).unwrap();
    let report = *full.value().unwrap();
    assert!(report.mind_save_required);
    assert!(!report.on_final_bar);
    assert!(full
        .notices
        .iter()
        .any(|n| n.level == NoticeLevel::Warn && n.text.contains("mind save")));

    assert_eq!(engine.reduce_stress(IRIA, 3).unwrap().value(), Some(&1));
}

fn assert_info<T>(outcome: &Outcome<T>) {
    assert!(outcome.ok());
    assert_eq!(outcome.notices.len(), 1);
    assert_eq!(outcome.notices[0].level, NoticeLevel::Info);
    assert_eq!(outcome.notices[0].text, outcome.log[0].to_string());
}

#[test]
fn test_resource_changes_notify() {
    init_tracing();
    let engine = engine_with(InMemoryRepository::new(), vec![pc(1, 2)]);

    assert_info(&engine.spend_stones(IRIA, 2).unwrap());
    assert_info(&engine.burn_stone_for_charges(IRIA).unwrap());
    assert_info(&engine.spend_charge(IRIA).unwrap());
    assert_info(&engine.spend_for_power(IRIA, "Blink").unwrap());
    assert_info(
        &engine
            .apply_buff(IRIA, BuffSpec::new("Ward", BuffType::Defense, 2), 1)
            .unwrap(),
    );

    // 5 - 2 - 1 - 1 = 1, +1 regen
    let mut combat = Combat::new().with_combatant(IRIA);
    let started = engine
        .start_round(&mut combat, &mut NoHooks, &mut ScriptedFaces::default())
        .unwrap();
    assert!(started
        .notices
        .iter()
        .any(|n| n.level == NoticeLevel::Info && n.text == "Actor(1) regenerated Stones (2/5)"));
}

#[test]
fn test_npc_without_tracks() {
    let engine = engine_with(InMemoryRepository::new(), vec![npc(2, 1)]);
    let outcome = engine.add_stress(ActorId::new(2), 1).unwrap();
    assert!(matches!(outcome.error(), Some(RuleError::NotFound(_))));
}

#[test]
fn test_rest_dawn_and_end_of_combat() {
    let engine = engine_with(InMemoryRepository::new(), vec![pc(1, 2)]);
    engine.spend_stones(IRIA, 4).unwrap();
    engine.spend_charge(IRIA).unwrap();
    engine
        .apply_buff(IRIA, BuffSpec::new("Ward", BuffType::Defense, 5), 1)
        .unwrap();

    engine.dawn(IRIA).unwrap();
    let after_dawn = engine.state(IRIA).unwrap();
    assert_eq!(after_dawn.stones.current, 1);
    assert_eq!(after_dawn.charges.current, 2);

    engine.rest(IRIA).unwrap();
    assert_eq!(engine.state(IRIA).unwrap().stones.current, 5);

    let ended = engine.end_combat(IRIA).unwrap();
    assert_eq!(ended.value(), Some(&1));
    assert!(engine.state(IRIA).unwrap().buffs.is_empty());
}
