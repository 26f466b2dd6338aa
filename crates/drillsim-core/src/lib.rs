//! DrillSim Core - Disaster Drill Session Runtime
//!
//! The stateful layer of DrillSim: a catalog of validated scenarios, a
//! countdown-clocked session state machine, and an append-only store of
//! finished-session results. All rules live in `drillsim-logic`; this
//! crate owns the clock, the RNG, and the lifecycle.
//!
//! # Architecture
//!
//! - **Catalog**: immutable scenario library, builtin or loaded from JSON
//! - **Session**: one active drill at a time, driven by `tick` and `choose`
//! - **Store**: append-only results with derived stats and leaderboards
//!
//! # Example
//!
//! ```rust,no_run
//! use drillsim_core::prelude::*;
//!
//! let catalog = ScenarioCatalog::builtin();
//! let mut rng = rand::thread_rng();
//! let scenario = catalog.random(&mut rng).unwrap().clone();
//!
//! let mut session = Session::new(scenario, SessionConfig::default()).unwrap();
//! session.start();
//!
//! // Drive one cooperative tick per wall-clock second.
//! loop {
//!     if session.tick().is_terminal() {
//!         break;
//!     }
//! }
//!
//! let mut store = ResultStore::new();
//! if let Some(result) = session.take_result() {
//!     store.append(result);
//! }
//! ```

pub mod catalog;
pub mod clock;
pub mod session;
pub mod store;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::catalog::ScenarioCatalog;
    pub use crate::clock::CountdownClock;
    pub use crate::session::{Session, SessionConfig};
    pub use crate::store::ResultStore;
    pub use drillsim_logic::hazard::HazardType;
    pub use drillsim_logic::scenario::Scenario;
    pub use drillsim_logic::state::{GameResult, SessionStatus};
}
