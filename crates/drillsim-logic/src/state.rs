//! Live session state and the immutable terminal record.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::hazard::HazardType;
use crate::scenario::Scenario;

/// Session lifecycle status. `Ongoing` moves to exactly one terminal value
/// and never moves again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    Ongoing,
    Victory,
    Defeat,
}

impl SessionStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, SessionStatus::Ongoing)
    }
}

/// Mutable state of one running drill session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub scenario_id: String,
    /// Current situation narration.
    pub situation: String,
    pub time_remaining_s: u32,
    /// Clamped to 0..=100.
    pub health: i32,
    /// Multiset: duplicates matter, consumption removes one instance.
    pub resources: Vec<String>,
    pub completed_objectives: BTreeSet<String>,
    /// May go negative mid-session.
    pub score: i32,
    pub status: SessionStatus,
}

impl GameState {
    /// Fresh state for a session over `scenario`.
    pub fn at_start(scenario: &Scenario) -> Self {
        Self {
            scenario_id: scenario.id.clone(),
            situation: scenario.initial_situation.clone(),
            time_remaining_s: scenario.time_budget_s,
            health: 100,
            resources: scenario.resources.clone(),
            completed_objectives: BTreeSet::new(),
            score: 0,
            status: SessionStatus::Ongoing,
        }
    }

    /// Remove one instance of `resource`, if any is held. Consuming a
    /// resource the player does not hold is a silent no-op.
    pub fn consume_resource(&mut self, resource: &str) {
        if let Some(pos) = self.resources.iter().position(|r| r == resource) {
            self.resources.remove(pos);
        }
    }

    /// How many instances of `resource` are held.
    pub fn resource_count(&self, resource: &str) -> usize {
        self.resources.iter().filter(|r| *r == resource).count()
    }
}

/// Immutable record of one finished (or aborted) session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub scenario_id: String,
    pub hazard: HazardType,
    pub scenario_title: String,
    pub score: i32,
    pub victory: bool,
    pub time_spent_s: u32,
    pub actions_taken: u32,
    pub health_remaining: i32,
    pub objectives_completed: u32,
    pub objectives_total: u32,
    pub difficulty: u8,
    /// Unix seconds at completion.
    pub completed_at: u64,
}
