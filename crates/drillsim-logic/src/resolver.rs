//! Probabilistic action resolution.
//!
//! One uniform roll decides success, the success flag picks a consequence
//! branch, and the branch is applied to produce the next state.
//! [`resolve_with_roll`] is a pure function of its inputs so tests can pin
//! exact rolls; [`evaluate_action`] layers the RNG draw on top.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::action::{Action, Consequence};
use crate::scenario::Scenario;
use crate::state::{GameState, SessionStatus};

/// Score awarded for a successful action.
pub const SUCCESS_SCORE: i32 = 10;
/// Score change for a failed action.
pub const FAILURE_SCORE: i32 = -5;
/// Bonus awarded once every objective is complete.
pub const VICTORY_BONUS: i32 = 100;

/// Weight at or above which a branch counts as a success outcome.
const SUCCESS_WEIGHT_FLOOR: f64 = 0.7;
/// Weight at or below which a branch counts as a failure outcome.
const FAILURE_WEIGHT_CEILING: f64 = 0.3;

/// Outcome of resolving one action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub success: bool,
    /// The branch that was applied.
    pub consequence: Consequence,
    /// State after the branch. May be terminal.
    pub state: GameState,
}

/// Scaling applied to an action's base success probability. Difficulty 1
/// keeps 90% of the base chance, difficulty 5 keeps 50%. Never negative.
pub fn difficulty_multiplier(difficulty: u8) -> f64 {
    (1.0 - 0.1 * f64::from(difficulty)).max(0.0)
}

/// Pick the consequence branch for a resolved action.
///
/// Success takes the first branch weighted at or above 0.7, falling back
/// to the first branch; failure takes the first branch weighted at or
/// below 0.3, falling back to the last. Selection is positional, not
/// weighted sampling, so authors control exactly which branch fires.
pub fn pick_consequence(consequences: &[Consequence], success: bool) -> Option<&Consequence> {
    if success {
        consequences
            .iter()
            .find(|c| c.weight >= SUCCESS_WEIGHT_FLOOR)
            .or_else(|| consequences.first())
    } else {
        consequences
            .iter()
            .find(|c| c.weight <= FAILURE_WEIGHT_CEILING)
            .or_else(|| consequences.last())
    }
}

/// Resolve `action` against `state` with an explicit roll from [0, 1).
///
/// Success means `roll <= base probability * difficulty multiplier`.
/// Identical `(scenario, action, state, roll)` inputs always produce
/// identical evaluations.
pub fn resolve_with_roll(
    scenario: &Scenario,
    action: &Action,
    state: &GameState,
    roll: f64,
) -> Evaluation {
    let threshold = action.success_probability * difficulty_multiplier(scenario.difficulty);
    let success = roll <= threshold;

    // Validated scenarios always carry at least one branch per action.
    let consequence = pick_consequence(&action.consequences, success)
        .cloned()
        .unwrap_or_default();

    let mut next = state.clone();
    next.time_remaining_s = next.time_remaining_s.saturating_sub(action.time_cost);
    // Deltas come from pack data and are not bounded by validation, so
    // the arithmetic saturates before the clamp.
    next.health = next
        .health
        .saturating_add(consequence.health_change)
        .clamp(0, 100);
    for cost in &action.resource_cost {
        next.consume_resource(cost);
    }
    next.resources.extend(consequence.resource_change.iter().cloned());
    if let Some(situation) = &consequence.situation_change {
        next.situation = situation.clone();
    }
    if let Some(objective) = &consequence.advances_objective {
        next.completed_objectives.insert(objective.clone());
    }
    next.score = next
        .score
        .saturating_add(if success { SUCCESS_SCORE } else { FAILURE_SCORE });

    check_terminal(scenario, &mut next);

    Evaluation {
        success,
        consequence,
        state: next,
    }
}

/// Apply the terminal rules in their fixed order: exhaustion defeats are
/// checked before full-objective victory, so a state that is both out of
/// health and fully complete is a defeat. Already-terminal states are
/// left untouched.
pub fn check_terminal(scenario: &Scenario, state: &mut GameState) {
    if state.status.is_terminal() {
        return;
    }
    if state.health <= 0 || state.time_remaining_s == 0 {
        state.status = SessionStatus::Defeat;
    } else if scenario
        .objectives
        .iter()
        .all(|o| state.completed_objectives.contains(&o.id))
    {
        state.status = SessionStatus::Victory;
        state.score = state.score.saturating_add(VICTORY_BONUS);
    }
}

/// Resolve `action` with a fresh uniform roll from `rng`.
pub fn evaluate_action<R: Rng>(
    scenario: &Scenario,
    action: &Action,
    state: &GameState,
    rng: &mut R,
) -> Evaluation {
    resolve_with_roll(scenario, action, state, rng.gen::<f64>())
}
