//! The drill session state machine.
//!
//! A session owns one validated scenario, the live state, the countdown
//! clock, and a seeded RNG. Sessions are strictly sequential per player:
//! constructing a new session supersedes the previous one, whose clock
//! drops with it. All mutation happens inside `tick` and `choose`, which
//! the embedding caller invokes one at a time.
//!
//! A session produces at most one [`GameResult`]. The first terminal
//! transition wins; ticks and choices arriving after it are silently
//! ignored so double-termination can never double-report.

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use drillsim_logic::action::Action;
use drillsim_logic::resolver;
use drillsim_logic::scenario::{Choice, Scenario, ScenarioError, Stage, StageExit};
use drillsim_logic::state::{GameResult, GameState, SessionStatus};

use crate::clock::CountdownClock;

/// Where the session currently sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Constructed, briefing shown, clock not yet running.
    Intro,
    /// Playing the stage at this index.
    Stage(usize),
    /// Finished. The result is available.
    Over,
}

/// Per-session construction options.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionConfig {
    /// Seed for the session RNG. `None` seeds from entropy.
    pub seed: Option<u64>,
}

/// Runtime API misuse. Late ticks and choices after the session ends are
/// not errors; they are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// `choose` called before `start`.
    NotStarted,
    /// Choice or action index out of range for the current stage.
    InvalidChoice { stage: usize, index: usize },
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::NotStarted => write!(f, "session has not been started"),
            SessionError::InvalidChoice { stage, index } => {
                write!(f, "no choice {} in stage {}", index, stage)
            }
        }
    }
}

impl std::error::Error for SessionError {}

/// One running drill session.
pub struct Session {
    scenario: Scenario,
    state: GameState,
    phase: Phase,
    clock: CountdownClock,
    rng: ChaCha8Rng,
    actions_taken: u32,
    result: Option<GameResult>,
}

impl Session {
    /// Validate `scenario` and build a session over it. The clock starts
    /// stopped; call [`start`](Self::start) to leave the briefing.
    pub fn new(scenario: Scenario, config: SessionConfig) -> Result<Self, ScenarioError> {
        scenario.validate()?;
        let state = GameState::at_start(&scenario);
        let clock = CountdownClock::new(scenario.time_budget_s);
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Ok(Self {
            scenario,
            state,
            phase: Phase::Intro,
            clock,
            rng,
            actions_taken: 0,
            result: None,
        })
    }

    /// Leave the briefing and start the countdown. Only meaningful once;
    /// later calls change nothing.
    pub fn start(&mut self) {
        if matches!(self.phase, Phase::Intro) {
            self.phase = Phase::Stage(0);
            self.clock.start();
            log::info!(
                "Session {} started ({}s budget, difficulty {})",
                self.scenario.id,
                self.scenario.time_budget_s,
                self.scenario.difficulty
            );
        }
    }

    /// One cooperative second. No-op before `start` and after the session
    /// ends. Returns the status after the tick.
    pub fn tick(&mut self) -> SessionStatus {
        if self.is_over() || !self.clock.is_running() {
            return self.state.status;
        }
        let remaining = self.clock.tick();
        self.state.time_remaining_s = remaining;
        if remaining == 0 {
            log::info!("Session {} ran out of time", self.scenario.id);
            self.finalize(SessionStatus::Defeat);
        }
        self.state.status
    }

    /// Apply the player's pick for the current stage: choice stages resolve
    /// deterministically from the tagged option, action stages go through
    /// the probabilistic resolver with this session's RNG.
    pub fn choose(&mut self, index: usize) -> Result<SessionStatus, SessionError> {
        let stage_index = match self.phase {
            Phase::Intro => return Err(SessionError::NotStarted),
            Phase::Over => {
                log::warn!("Session {} is over, input ignored", self.scenario.id);
                return Ok(self.state.status);
            }
            Phase::Stage(i) => i,
        };
        match self.scenario.stages.get(stage_index) {
            Some(Stage::Choice(stage)) => {
                let choice = match stage.choices.get(index) {
                    Some(choice) => choice.clone(),
                    None => return Err(SessionError::InvalidChoice { stage: stage_index, index }),
                };
                Ok(self.apply_choice(index, &choice))
            }
            Some(Stage::Actions(stage)) => {
                let action = match stage.actions.get(index) {
                    Some(action) => action.clone(),
                    None => return Err(SessionError::InvalidChoice { stage: stage_index, index }),
                };
                Ok(self.apply_action(stage_index, &action))
            }
            None => Err(SessionError::InvalidChoice { stage: stage_index, index }),
        }
    }

    /// External cancellation. Finalizes immediately as a defeat; fields
    /// never established stay at their defaults.
    pub fn quit(&mut self) {
        if self.is_over() {
            return;
        }
        log::info!("Session {} quit", self.scenario.id);
        self.finalize(SessionStatus::Defeat);
    }

    fn apply_choice(&mut self, index: usize, choice: &Choice) -> SessionStatus {
        // Score deltas are pack data; saturate rather than overflow.
        self.state.score = self.state.score.saturating_add(choice.score_delta);
        self.actions_taken += 1;
        log::debug!(
            "Choice {} ('{}') was {}: {:+} points",
            index,
            choice.label,
            if choice.correct { "correct" } else { "incorrect" },
            choice.score_delta
        );
        match choice.exit {
            StageExit::Stage(next) => self.phase = Phase::Stage(next),
            StageExit::Victory => self.finalize(SessionStatus::Victory),
            StageExit::Defeat => self.finalize(SessionStatus::Defeat),
        }
        self.state.status
    }

    fn apply_action(&mut self, stage_index: usize, action: &Action) -> SessionStatus {
        let roll = self.rng.gen::<f64>();
        let evaluation = resolver::resolve_with_roll(&self.scenario, action, &self.state, roll);
        log::debug!(
            "Action '{}' {} (roll {:.3})",
            action.id,
            if evaluation.success { "succeeded" } else { "failed" },
            roll
        );
        self.state = evaluation.state;
        self.actions_taken += 1;
        self.clock.set_remaining(self.state.time_remaining_s);
        if self.state.status.is_terminal() {
            self.finalize(self.state.status);
        } else {
            self.advance_stage(stage_index);
        }
        self.state.status
    }

    /// Action stages advance linearly; the final stage keeps offering its
    /// actions until a terminal condition fires.
    fn advance_stage(&mut self, current: usize) {
        if current + 1 < self.scenario.stages.len() {
            self.phase = Phase::Stage(current + 1);
        }
    }

    /// Complete the session exactly once. Later calls are no-ops.
    fn finalize(&mut self, status: SessionStatus) {
        if self.is_over() {
            return;
        }
        if !self.state.status.is_terminal() {
            self.state.status = status;
        }
        self.clock.cancel();
        self.phase = Phase::Over;
        self.result = Some(self.build_result());
        log::info!(
            "Session {} over: {:?} with score {}",
            self.scenario.id,
            self.state.status,
            self.state.score
        );
    }

    fn build_result(&self) -> GameResult {
        GameResult {
            scenario_id: self.scenario.id.clone(),
            hazard: self.scenario.hazard,
            scenario_title: self.scenario.title.clone(),
            score: self.state.score,
            victory: self.state.status == SessionStatus::Victory,
            time_spent_s: self.scenario.time_budget_s.saturating_sub(self.state.time_remaining_s),
            actions_taken: self.actions_taken,
            health_remaining: self.state.health,
            objectives_completed: self.state.completed_objectives.len() as u32,
            objectives_total: self.scenario.objectives.len() as u32,
            difficulty: self.scenario.difficulty,
            completed_at: unix_now(),
        }
    }

    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn status(&self) -> SessionStatus {
        self.state.status
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, Phase::Over)
    }

    /// The stage the player is currently deciding, if any.
    pub fn current_stage(&self) -> Option<&Stage> {
        match self.phase {
            Phase::Stage(i) => self.scenario.stages.get(i),
            _ => None,
        }
    }

    /// The terminal record, once the session is over.
    pub fn result(&self) -> Option<&GameResult> {
        self.result.as_ref()
    }

    /// Move the terminal record out of the session. At most one caller
    /// ever receives it.
    pub fn take_result(&mut self) -> Option<GameResult> {
        self.result.take()
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
