//! Per-session countdown clock.
//!
//! The clock is owned by its session and driven cooperatively by the
//! embedding caller at one tick per second. It is the authoritative time
//! source: the session copies the remaining seconds into its state after
//! every tick. Every session exit path cancels the clock, and a session
//! that replaces another simply drops the old clock with it.

/// Cooperative countdown. Never underflows.
#[derive(Debug, Clone)]
pub struct CountdownClock {
    remaining_s: u32,
    running: bool,
}

impl CountdownClock {
    /// A stopped clock holding the full budget.
    pub fn new(budget_s: u32) -> Self {
        Self {
            remaining_s: budget_s,
            running: false,
        }
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    /// Stop counting. Idempotent.
    pub fn cancel(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn remaining(&self) -> u32 {
        self.remaining_s
    }

    pub fn expired(&self) -> bool {
        self.remaining_s == 0
    }

    /// One cooperative second. Ticks on a stopped clock are no-ops.
    /// Returns the remaining seconds after the tick.
    pub fn tick(&mut self) -> u32 {
        if self.running {
            self.remaining_s = self.remaining_s.saturating_sub(1);
        }
        self.remaining_s
    }

    /// Resynchronize after an action charged time against the session.
    pub fn set_remaining(&mut self, remaining_s: u32) {
        self.remaining_s = remaining_s;
    }
}
