//! Player actions and the consequences they can trigger.

use serde::{Deserialize, Serialize};

/// What kind of move an action represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Move,
    Use,
    Communicate,
    Wait,
    Evacuate,
}

impl ActionKind {
    pub fn label(&self) -> &'static str {
        match self {
            ActionKind::Move => "Move",
            ActionKind::Use => "Use",
            ActionKind::Communicate => "Communicate",
            ActionKind::Wait => "Wait",
            ActionKind::Evacuate => "Evacuate",
        }
    }
}

/// One action a player can attempt during an action stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub id: String,
    pub description: String,
    pub kind: ActionKind,
    /// Resources consumed by the attempt. Each entry removes one instance
    /// from the session's resource multiset; absent entries cost nothing.
    #[serde(default)]
    pub resource_cost: Vec<String>,
    /// Seconds the attempt charges against the session clock.
    pub time_cost: u32,
    /// Base chance of success before difficulty scaling, in [0, 1].
    pub success_probability: f64,
    /// Outcome branches. Validated scenarios never leave this empty.
    pub consequences: Vec<Consequence>,
}

/// One outcome branch of an action.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Consequence {
    pub description: String,
    /// Probability weight. High weights are treated as success outcomes,
    /// low weights as failure outcomes (see the resolver's selection rule).
    pub weight: f64,
    #[serde(default)]
    pub health_change: i32,
    /// Resources granted, appended to the session's resource multiset.
    #[serde(default)]
    pub resource_change: Vec<String>,
    /// Replacement situation narration, when the outcome changes the scene.
    #[serde(default)]
    pub situation_change: Option<String>,
    /// Objective this outcome completes, if any.
    #[serde(default)]
    pub advances_objective: Option<String>,
}
