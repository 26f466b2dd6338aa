//! Append-only result log with derived statistics and save/load.
//!
//! Appending is the only mutation besides `clear_all`. Everything else is
//! derived: listings, leaderboards, and aggregates are recomputed from the
//! log on demand. A failed save never corrupts the in-memory log, and the
//! caller is responsible for completing a save before the next session
//! starts so no result is lost.

use std::fmt;
use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use drillsim_logic::state::GameResult;
use drillsim_logic::stats::{self, AggregateStats};

/// Save format version. Bump when `SaveData` changes shape.
const SAVE_VERSION: u32 = 1;

/// Append-only log of finished sessions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResultStore {
    results: Vec<GameResult>,
}

#[derive(Serialize, Deserialize)]
struct SaveData {
    version: u32,
    results: Vec<GameResult>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one finished session. Existing entries are never touched.
    pub fn append(&mut self, result: GameResult) {
        log::debug!(
            "Recorded {} ({}, score {})",
            result.scenario_id,
            if result.victory { "victory" } else { "defeat" },
            result.score
        );
        self.results.push(result);
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Every recorded result, most recent first.
    pub fn list(&self) -> Vec<&GameResult> {
        self.results.iter().rev().collect()
    }

    /// Top `n` by score, ties broken by earlier completion.
    pub fn high_scores(&self, n: usize) -> Vec<GameResult> {
        stats::high_scores(&self.results, n)
    }

    /// Aggregate statistics, recomputed from the full log.
    pub fn stats(&self) -> AggregateStats {
        stats::aggregate(&self.results)
    }

    /// Irreversibly empty the log.
    pub fn clear_all(&mut self) {
        log::info!("Cleared {} recorded results", self.results.len());
        self.results.clear();
    }

    /// Serialize the whole log to `writer`.
    pub fn save<W: Write>(&self, writer: W) -> Result<(), StoreError> {
        let data = SaveData {
            version: SAVE_VERSION,
            results: self.results.clone(),
        };
        bincode::serialize_into(writer, &data)?;
        Ok(())
    }

    /// Load a log previously written by [`save`](Self::save).
    pub fn load<R: Read>(reader: R) -> Result<Self, StoreError> {
        let data: SaveData = bincode::deserialize_from(reader)?;
        if data.version != SAVE_VERSION {
            return Err(StoreError::VersionMismatch {
                expected: SAVE_VERSION,
                found: data.version,
            });
        }
        Ok(Self {
            results: data.results,
        })
    }
}

/// Save/load failures.
#[derive(Debug)]
pub enum StoreError {
    /// Serialization or deserialization failed.
    Bincode(bincode::Error),
    /// The save was written by an incompatible version.
    VersionMismatch { expected: u32, found: u32 },
}

impl From<bincode::Error> for StoreError {
    fn from(e: bincode::Error) -> Self {
        StoreError::Bincode(e)
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Bincode(e) => write!(f, "serialization error: {}", e),
            StoreError::VersionMismatch { expected, found } => {
                write!(f, "save version {} does not match expected {}", found, expected)
            }
        }
    }
}

impl std::error::Error for StoreError {}
