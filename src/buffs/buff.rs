//! Buff definitions.

use serde::{Deserialize, Serialize};

/// Unique identifier for an applied buff, scoped to one actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BuffId(pub u64);

impl BuffId {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for BuffId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Buff({})", self.0)
    }
}

/// Exclusivity category. An actor holds at most one active buff per type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuffType {
    Attack,
    Defense,
    Damage,
    Movement,
    Resistance,
    Utility,
}

impl BuffType {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            BuffType::Attack => "attack",
            BuffType::Defense => "defense",
            BuffType::Damage => "damage",
            BuffType::Movement => "movement",
            BuffType::Resistance => "resistance",
            BuffType::Utility => "utility",
        }
    }
}

impl std::fmt::Display for BuffType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One mechanical effect of a buff.
///
/// `target` names the stat or roll the effect applies to (for example
/// `"attack"`, `"defense"`, `"damage"`). The engine does not interpret it
/// beyond matching keys.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuffEffect {
    /// Add a flat value to a stat.
    Flat { target: String, value: i64 },
    /// Add dice to a roll.
    Dice { target: String, count: i64 },
    /// Set a named boolean flag.
    Flag { name: String },
}

impl BuffEffect {
    pub fn flat(target: impl Into<String>, value: i64) -> Self {
        BuffEffect::Flat { target: target.into(), value }
    }

    pub fn dice(target: impl Into<String>, count: i64) -> Self {
        BuffEffect::Dice { target: target.into(), count }
    }

    pub fn flag(name: impl Into<String>) -> Self {
        BuffEffect::Flag { name: name.into() }
    }
}

/// What a caller supplies to apply a buff.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuffSpec {
    pub name: String,
    pub buff_type: BuffType,
    /// Rounds the buff lasts.
    pub max_duration: i32,
    /// Player-facing description.
    pub description: String,
    pub effects: Vec<BuffEffect>,
}

impl BuffSpec {
    pub fn new(name: impl Into<String>, buff_type: BuffType, max_duration: i32) -> Self {
        Self {
            name: name.into(),
            buff_type,
            max_duration,
            description: String::new(),
            effects: Vec::new(),
        }
    }

    /// Set the description (builder pattern).
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Add an effect (builder pattern).
    #[must_use]
    pub fn with_effect(mut self, effect: BuffEffect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// A buff active on an actor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Buff {
    pub id: BuffId,
    pub name: String,
    pub buff_type: BuffType,
    /// Rounds left. Removed once this reaches 0.
    pub duration: i32,
    pub max_duration: i32,
    pub description: String,
    pub effects: Vec<BuffEffect>,
    /// Combat round the buff was applied in.
    pub applied_round: u32,
}

impl Buff {
    pub(crate) fn from_spec(id: BuffId, spec: BuffSpec, applied_round: u32) -> Self {
        Self {
            id,
            name: spec.name,
            buff_type: spec.buff_type,
            duration: spec.max_duration,
            max_duration: spec.max_duration,
            description: spec.description,
            effects: spec.effects,
            applied_round,
        }
    }
}
