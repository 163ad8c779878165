//! Combat tracker: round counter and turn order.

use serde::{Deserialize, Serialize};

use crate::core::ActorId;

/// One entry in the combat tracker.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combatant {
    pub actor: ActorId,
    /// `None` until initiative is final (a shop step may be pending).
    pub initiative: Option<i64>,
    /// Defeated combatants stay on the tracker but no longer act or tick.
    pub defeated: bool,
}

impl Combatant {
    #[must_use]
    pub fn new(actor: ActorId) -> Self {
        Self {
            actor,
            initiative: None,
            defeated: false,
        }
    }
}

/// An encounter's combatants and progress.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combat {
    /// Round number (starts at 1).
    pub round: u32,
    /// Index into [`Combat::turn_order`] of the acting combatant.
    pub turn: usize,
    pub combatants: Vec<Combatant>,
}

impl Default for Combat {
    fn default() -> Self {
        Self::new()
    }
}

impl Combat {
    #[must_use]
    pub fn new() -> Self {
        Self {
            round: 1,
            turn: 0,
            combatants: Vec::new(),
        }
    }

    /// Add a combatant (builder pattern).
    #[must_use]
    pub fn with_combatant(mut self, actor: ActorId) -> Self {
        self.add(actor);
        self
    }

    /// Add a combatant. Duplicates are ignored.
    pub fn add(&mut self, actor: ActorId) {
        if self.get(actor).is_none() {
            self.combatants.push(Combatant::new(actor));
        }
    }

    #[must_use]
    pub fn get(&self, actor: ActorId) -> Option<&Combatant> {
        self.combatants.iter().find(|c| c.actor == actor)
    }

    pub fn get_mut(&mut self, actor: ActorId) -> Option<&mut Combatant> {
        self.combatants.iter_mut().find(|c| c.actor == actor)
    }

    /// Record a final initiative value. Returns false for unknown actors.
    pub fn set_initiative(&mut self, actor: ActorId, value: i64) -> bool {
        match self.get_mut(actor) {
            Some(c) => {
                c.initiative = Some(value);
                true
            }
            None => false,
        }
    }

    /// Mark a combatant defeated (or back in the fight). Returns false for
    /// unknown actors.
    pub fn set_defeated(&mut self, actor: ActorId, defeated: bool) -> bool {
        match self.get_mut(actor) {
            Some(c) => {
                c.defeated = defeated;
                true
            }
            None => false,
        }
    }

    /// Combatants still in the fight, in tracker order.
    #[must_use]
    pub fn live_actors(&self) -> Vec<ActorId> {
        self.combatants.iter().filter(|c| !c.defeated).map(|c| c.actor).collect()
    }

    /// Live actors ordered by initiative, highest first. Combatants without
    /// a final value go last; ties keep tracker order.
    #[must_use]
    pub fn turn_order(&self) -> Vec<ActorId> {
        let mut order: Vec<&Combatant> = self.combatants.iter().filter(|c| !c.defeated).collect();
        order.sort_by_key(|c| std::cmp::Reverse(c.initiative.unwrap_or(i64::MIN)));
        order.into_iter().map(|c| c.actor).collect()
    }

    /// The actor whose turn it is.
    #[must_use]
    pub fn current_actor(&self) -> Option<ActorId> {
        self.turn_order().get(self.turn).copied()
    }

    /// Move to the next round: bump the counter, reset the turn cursor.
    pub fn advance_round(&mut self) -> u32 {
        self.round += 1;
        self.turn = 0;
        self.round
    }

    /// Move to the next turn. Returns the new acting actor, or `None` when
    /// the round is over.
    pub fn advance_turn(&mut self) -> Option<ActorId> {
        self.turn += 1;
        self.current_actor()
    }
}
