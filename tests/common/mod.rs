//! Shared fixtures for integration tests.

#![allow(dead_code)]

use mastery_engine::core::{ActorId, ActorKind, ActorProfile, CombatState, EngineConfig};
use mastery_engine::engine::CombatEngine;
use mastery_engine::repository::CombatRepository;
use mastery_engine::resources::{Bar, BarTrack, VitalityTrack};

/// Install a test subscriber once. Set `RUST_LOG=debug` to see engine logs.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn pc_profile(rank: u32) -> ActorProfile {
    ActorProfile::new("Iria", ActorKind::Pc, rank)
        .with_attributes(3, 2, 1)
        .with_stones(5, 1)
}

pub fn npc_profile(rank: u32) -> ActorProfile {
    ActorProfile::new("Bandit", ActorKind::Npc, rank)
        .with_attributes(2, 2, 2)
        .with_stones(3, 1)
}

/// A player character with Vitality and Stress tracks.
pub fn pc(id: u32, rank: u32) -> CombatState {
    CombatState::new(ActorId::new(id), pc_profile(rank))
        .with_vitality(VitalityTrack::new(vec![Bar::full(10, 0), Bar::full(8, -1)]))
        .with_stress(BarTrack::new(vec![Bar::empty(4, 0), Bar::empty(4, -1)]))
}

pub fn npc(id: u32, rank: u32) -> CombatState {
    CombatState::new(ActorId::new(id), npc_profile(rank))
}

pub fn engine_with<R: CombatRepository>(repo: R, states: Vec<CombatState>) -> CombatEngine<R> {
    let engine = CombatEngine::new(repo, EngineConfig::default().with_seed(42)).unwrap();
    for state in states {
        engine.register(state).unwrap();
    }
    engine
}
