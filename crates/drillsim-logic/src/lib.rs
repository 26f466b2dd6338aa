//! Pure drill rules for DrillSim.
//!
//! This crate contains all simulation rules that are independent of any
//! storage, clock, or runtime. Functions take plain data and return
//! results, making them unit-testable and portable between the session
//! runtime, headless test harnesses, and any future frontend.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`action`] | Player actions, action kinds, and consequence branches |
//! | [`badge`] | Achievement badges recomputed from progress snapshots |
//! | [`hazard`] | Hazard taxonomy (earthquake, fire, flood, ...) |
//! | [`resolver`] | Roll-based action resolution and terminal rules |
//! | [`scenario`] | Scenario definitions, stage scripts, validation |
//! | [`state`] | Live session state and the finished-session record |
//! | [`stats`] | Aggregate statistics and leaderboard ordering |

pub mod action;
pub mod badge;
pub mod hazard;
pub mod resolver;
pub mod scenario;
pub mod state;
pub mod stats;
