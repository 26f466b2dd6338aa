//! Drill scenario definitions and construction-time validation.
//!
//! A scenario is immutable once loaded. Validation runs before a session
//! is allowed to start; anything that fails here never reaches a player.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::hazard::HazardType;

/// One training objective within a scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Objective {
    pub id: String,
    pub description: String,
}

/// Where a resolved choice sends the session next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StageExit {
    /// Jump to the stage at this index.
    Stage(usize),
    /// End the session as a victory.
    Victory,
    /// End the session as a defeat.
    Defeat,
}

/// One pre-tagged option in a choice stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub label: String,
    /// Whether drill doctrine considers this the right call.
    pub correct: bool,
    pub score_delta: i32,
    pub exit: StageExit,
}

/// A stage resolved deterministically from a tagged choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceStage {
    pub prompt: String,
    /// 2 or 3 options, each with a fixed transition.
    pub choices: Vec<Choice>,
}

/// A stage whose actions go through the probabilistic resolver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionStage {
    pub prompt: String,
    pub actions: Vec<Action>,
}

/// One decision point in a scenario's stage script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Stage {
    Choice(ChoiceStage),
    Actions(ActionStage),
}

/// A complete drill definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub id: String,
    pub hazard: HazardType,
    pub title: String,
    pub description: String,
    /// Narration shown when the session starts.
    pub initial_situation: String,
    /// Where the drill takes place.
    pub environment: String,
    /// Session time budget in seconds. Must be positive.
    pub time_budget_s: u32,
    /// 1 (training wheels) to 5 (expert).
    pub difficulty: u8,
    pub objectives: Vec<Objective>,
    /// Active dangers, for display alongside the situation text.
    #[serde(default)]
    pub hazards: Vec<String>,
    /// Starting resources. Duplicates are meaningful: the session treats
    /// this as a multiset.
    #[serde(default)]
    pub resources: Vec<String>,
    /// Ordered decision script driving the session.
    pub stages: Vec<Stage>,
}

impl Scenario {
    /// Check every structural rule a running session relies on.
    pub fn validate(&self) -> Result<(), ScenarioError> {
        if self.time_budget_s == 0 {
            return Err(ScenarioError::ZeroTimeBudget);
        }
        if !(1..=5).contains(&self.difficulty) {
            return Err(ScenarioError::BadDifficulty(self.difficulty));
        }
        if self.stages.is_empty() {
            return Err(ScenarioError::EmptyScript);
        }
        for (index, stage) in self.stages.iter().enumerate() {
            match stage {
                Stage::Choice(stage) => self.validate_choices(index, stage)?,
                Stage::Actions(stage) => self.validate_actions(index, stage)?,
            }
        }
        Ok(())
    }

    fn validate_choices(&self, index: usize, stage: &ChoiceStage) -> Result<(), ScenarioError> {
        if !(2..=3).contains(&stage.choices.len()) {
            return Err(ScenarioError::BadChoiceCount {
                stage: index,
                count: stage.choices.len(),
            });
        }
        for choice in &stage.choices {
            if let StageExit::Stage(target) = choice.exit {
                if target >= self.stages.len() {
                    return Err(ScenarioError::BadStageExit {
                        stage: index,
                        target,
                    });
                }
            }
        }
        Ok(())
    }

    fn validate_actions(&self, index: usize, stage: &ActionStage) -> Result<(), ScenarioError> {
        if stage.actions.is_empty() {
            return Err(ScenarioError::EmptyActionStage { stage: index });
        }
        for action in &stage.actions {
            if !(0.0..=1.0).contains(&action.success_probability) {
                return Err(ScenarioError::BadProbability {
                    action: action.id.clone(),
                    value: action.success_probability,
                });
            }
            if action.consequences.is_empty() {
                return Err(ScenarioError::MissingConsequences {
                    stage: index,
                    action: action.id.clone(),
                });
            }
            for consequence in &action.consequences {
                if let Some(objective) = &consequence.advances_objective {
                    if !self.objectives.iter().any(|o| &o.id == objective) {
                        return Err(ScenarioError::UnknownObjective {
                            action: action.id.clone(),
                            objective: objective.clone(),
                        });
                    }
                }
            }
        }
        Ok(())
    }

    /// True when `id` names one of this scenario's objectives.
    pub fn has_objective(&self, id: &str) -> bool {
        self.objectives.iter().any(|o| o.id == id)
    }
}

/// Structural problems in scenario data. All fatal: a scenario that fails
/// validation never becomes a session.
#[derive(Debug, Clone, PartialEq)]
pub enum ScenarioError {
    ZeroTimeBudget,
    BadDifficulty(u8),
    EmptyScript,
    BadChoiceCount { stage: usize, count: usize },
    BadStageExit { stage: usize, target: usize },
    EmptyActionStage { stage: usize },
    MissingConsequences { stage: usize, action: String },
    BadProbability { action: String, value: f64 },
    UnknownObjective { action: String, objective: String },
}

impl fmt::Display for ScenarioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScenarioError::ZeroTimeBudget => write!(f, "time budget must be positive"),
            ScenarioError::BadDifficulty(d) => write!(f, "difficulty {} outside 1-5", d),
            ScenarioError::EmptyScript => write!(f, "scenario has no stages"),
            ScenarioError::BadChoiceCount { stage, count } => {
                write!(f, "stage {} has {} choices, expected 2-3", stage, count)
            }
            ScenarioError::BadStageExit { stage, target } => {
                write!(f, "stage {} exits to missing stage {}", stage, target)
            }
            ScenarioError::EmptyActionStage { stage } => {
                write!(f, "stage {} offers no actions", stage)
            }
            ScenarioError::MissingConsequences { stage, action } => {
                write!(f, "action '{}' in stage {} has no consequences", action, stage)
            }
            ScenarioError::BadProbability { action, value } => {
                write!(f, "action '{}' probability {} outside [0, 1]", action, value)
            }
            ScenarioError::UnknownObjective { action, objective } => {
                write!(f, "action '{}' advances unknown objective '{}'", action, objective)
            }
        }
    }
}

impl std::error::Error for ScenarioError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{ActionKind, Consequence};

    fn consequence(weight: f64) -> Consequence {
        Consequence {
            description: "outcome".into(),
            weight,
            ..Consequence::default()
        }
    }

    fn action(id: &str, probability: f64) -> Action {
        Action {
            id: id.into(),
            description: "do the thing".into(),
            kind: ActionKind::Use,
            resource_cost: vec![],
            time_cost: 10,
            success_probability: probability,
            consequences: vec![consequence(0.8), consequence(0.2)],
        }
    }

    fn scenario() -> Scenario {
        Scenario {
            id: "test_drill".into(),
            hazard: HazardType::Fire,
            title: "Test Drill".into(),
            description: "A drill for tests".into(),
            initial_situation: "Smoke in the hallway".into(),
            environment: "Office".into(),
            time_budget_s: 120,
            difficulty: 2,
            objectives: vec![Objective {
                id: "get_out".into(),
                description: "Reach the assembly point".into(),
            }],
            hazards: vec!["smoke".into()],
            resources: vec!["extinguisher".into()],
            stages: vec![
                Stage::Choice(ChoiceStage {
                    prompt: "Alarm sounds. What first?".into(),
                    choices: vec![
                        Choice {
                            label: "Head for the stairs".into(),
                            correct: true,
                            score_delta: 10,
                            exit: StageExit::Stage(1),
                        },
                        Choice {
                            label: "Take the elevator".into(),
                            correct: false,
                            score_delta: -10,
                            exit: StageExit::Defeat,
                        },
                    ],
                }),
                Stage::Actions(ActionStage {
                    prompt: "The stairwell is filling with smoke".into(),
                    actions: vec![action("crawl_low", 0.7)],
                }),
            ],
        }
    }

    #[test]
    fn valid_scenario_passes() {
        assert_eq!(scenario().validate(), Ok(()));
    }

    #[test]
    fn rejects_zero_time_budget() {
        let mut s = scenario();
        s.time_budget_s = 0;
        assert_eq!(s.validate(), Err(ScenarioError::ZeroTimeBudget));
    }

    #[test]
    fn rejects_out_of_range_difficulty() {
        let mut s = scenario();
        s.difficulty = 0;
        assert_eq!(s.validate(), Err(ScenarioError::BadDifficulty(0)));
        s.difficulty = 6;
        assert_eq!(s.validate(), Err(ScenarioError::BadDifficulty(6)));
    }

    #[test]
    fn rejects_empty_script() {
        let mut s = scenario();
        s.stages.clear();
        assert_eq!(s.validate(), Err(ScenarioError::EmptyScript));
    }

    #[test]
    fn rejects_single_choice_stage() {
        let mut s = scenario();
        if let Stage::Choice(stage) = &mut s.stages[0] {
            stage.choices.truncate(1);
        }
        assert_eq!(
            s.validate(),
            Err(ScenarioError::BadChoiceCount { stage: 0, count: 1 })
        );
    }

    #[test]
    fn rejects_exit_past_script_end() {
        let mut s = scenario();
        if let Stage::Choice(stage) = &mut s.stages[0] {
            stage.choices[0].exit = StageExit::Stage(9);
        }
        assert_eq!(
            s.validate(),
            Err(ScenarioError::BadStageExit { stage: 0, target: 9 })
        );
    }

    #[test]
    fn rejects_action_without_consequences() {
        let mut s = scenario();
        if let Stage::Actions(stage) = &mut s.stages[1] {
            stage.actions[0].consequences.clear();
        }
        assert_eq!(
            s.validate(),
            Err(ScenarioError::MissingConsequences {
                stage: 1,
                action: "crawl_low".into(),
            })
        );
    }

    #[test]
    fn rejects_probability_outside_unit_interval() {
        let mut s = scenario();
        if let Stage::Actions(stage) = &mut s.stages[1] {
            stage.actions[0].success_probability = 1.2;
        }
        assert!(matches!(
            s.validate(),
            Err(ScenarioError::BadProbability { .. })
        ));
    }

    #[test]
    fn rejects_nan_probability() {
        let mut s = scenario();
        if let Stage::Actions(stage) = &mut s.stages[1] {
            stage.actions[0].success_probability = f64::NAN;
        }
        assert!(matches!(
            s.validate(),
            Err(ScenarioError::BadProbability { .. })
        ));
    }

    #[test]
    fn rejects_unknown_objective_reference() {
        let mut s = scenario();
        if let Stage::Actions(stage) = &mut s.stages[1] {
            stage.actions[0].consequences[0].advances_objective = Some("nope".into());
        }
        assert_eq!(
            s.validate(),
            Err(ScenarioError::UnknownObjective {
                action: "crawl_low".into(),
                objective: "nope".into(),
            })
        );
    }

    #[test]
    fn rejects_empty_action_stage() {
        let mut s = scenario();
        if let Stage::Actions(stage) = &mut s.stages[1] {
            stage.actions.clear();
        }
        assert_eq!(s.validate(), Err(ScenarioError::EmptyActionStage { stage: 1 }));
    }
}
