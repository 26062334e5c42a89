use std::fmt;
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TimerError {
    #[error("timer duration must be > 0 seconds")]
    InvalidDuration,
}

//
// ─── STATE MACHINE ─────────────────────────────────────────────────────────────
//

/// Lifecycle phase of a countdown timer.
///
/// `Expired` is terminal: only `reset` leaves it. That guarantee is what
/// lets a driver fire its completion observer exactly once per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerPhase {
    Idle,
    Running,
    Paused,
    Expired,
}

/// Outcome of advancing the countdown by one second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Countdown advanced and the timer is still running.
    Advanced { remaining: u32 },
    /// This tick reached zero; the timer is now expired.
    Expired,
    /// The timer was not running; nothing changed.
    Skipped,
}

/// Countdown state machine for per-game time limits.
///
/// Pure state: the one-second cadence that drives `tick` lives in the
/// session layer, so the machine itself stays deterministic and testable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timer {
    duration_secs: u32,
    remaining_secs: u32,
    phase: TimerPhase,
}

impl Timer {
    /// Creates an idle timer with `remaining == duration`.
    ///
    /// # Errors
    ///
    /// Returns `TimerError::InvalidDuration` if `duration_secs` is zero.
    pub fn new(duration_secs: u32) -> Result<Self, TimerError> {
        if duration_secs == 0 {
            return Err(TimerError::InvalidDuration);
        }
        Ok(Self {
            duration_secs,
            remaining_secs: duration_secs,
            phase: TimerPhase::Idle,
        })
    }

    #[must_use]
    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    #[must_use]
    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    #[must_use]
    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.phase == TimerPhase::Running
    }

    /// Begins (or resumes) the countdown.
    ///
    /// No-op while already running, and no-op when expired: an expired run
    /// can only be revived through `reset`.
    pub fn start(&mut self) {
        match self.phase {
            TimerPhase::Idle | TimerPhase::Paused => self.phase = TimerPhase::Running,
            TimerPhase::Running | TimerPhase::Expired => {}
        }
    }

    /// Advances the countdown by one second.
    ///
    /// Only a running timer advances; reaching zero transitions to
    /// `Expired` and the tick reports it so the driver can stop the cadence
    /// and fire completion.
    pub fn tick(&mut self) -> Tick {
        if self.phase != TimerPhase::Running {
            return Tick::Skipped;
        }

        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.phase = TimerPhase::Expired;
            Tick::Expired
        } else {
            Tick::Advanced {
                remaining: self.remaining_secs,
            }
        }
    }

    /// Halts the countdown without touching the remaining time.
    ///
    /// Idempotent; an expired timer stays expired.
    pub fn pause(&mut self) {
        if self.phase == TimerPhase::Running {
            self.phase = TimerPhase::Paused;
        }
    }

    /// Returns to `Idle` with the full duration restored. Idempotent.
    pub fn reset(&mut self) {
        self.phase = TimerPhase::Idle;
        self.remaining_secs = self.duration_secs;
    }

    /// Renders the remaining time as `m:ss`.
    #[must_use]
    pub fn format_time(&self) -> String {
        let minutes = self.remaining_secs / 60;
        let seconds = self.remaining_secs % 60;
        format!("{minutes}:{seconds:02}")
    }
}

impl fmt::Display for Timer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_time())
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
