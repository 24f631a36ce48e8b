//! Process model.
//!
//! A process is a unit of CPU work: it becomes eligible at its arrival
//! tick and needs `burst` ticks of processor time to finish.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5

use serde::{Deserialize, Serialize};

use crate::validation::{ValidationError, ValidationErrorKind};

/// Simulated time unit. Ticks are abstract integers, not wall-clock time.
pub type Tick = u64;

/// Display colors assigned to processes in registry order.
pub const PALETTE: [&str; 8] = [
    "#007bff", "#28a745", "#ffc107", "#dc3545", "#6f42c1", "#17a2b8", "#fd7e14", "#20c997",
];

/// A process to be scheduled.
///
/// Immutable input to a simulation run. Run-time fields (remaining time,
/// start and completion ticks) live on [`ProcessState`], a per-run working
/// copy, so the caller's process list is never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    /// Unique process identifier (e.g. "P1").
    pub id: String,
    /// Tick at which the process becomes eligible to run.
    pub arrival: Tick,
    /// Total CPU ticks required. Must be positive.
    pub burst: Tick,
    /// Scheduling priority (lower = more important). Only the priority
    /// policy reads it.
    pub priority: i32,
    /// Display color for trace rendering.
    pub color: String,
}

impl Process {
    /// Creates a process with priority 0 and the first palette color.
    pub fn new(id: impl Into<String>, arrival: Tick, burst: Tick) -> Self {
        Self {
            id: id.into(),
            arrival,
            burst,
            priority: 0,
            color: PALETTE[0].to_string(),
        }
    }

    /// Sets the scheduling priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the display color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }
}

/// Per-run working copy of a [`Process`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessState {
    /// The process this state tracks.
    pub process: Process,
    /// Burst ticks not yet executed. `0 <= remaining <= burst`.
    pub remaining: Tick,
    /// First tick the process occupied the CPU.
    pub start_time: Option<Tick>,
    /// Tick immediately after the last execution tick.
    pub completion_time: Option<Tick>,
}

impl ProcessState {
    /// Creates a fresh working copy with `remaining = burst`.
    pub fn new(process: &Process) -> Self {
        Self {
            process: process.clone(),
            remaining: process.burst,
            start_time: None,
            completion_time: None,
        }
    }

    /// Whether the process has executed its whole burst.
    #[inline]
    pub fn is_completed(&self) -> bool {
        self.remaining == 0
    }

    /// Records the first dispatch. Later calls are no-ops.
    pub fn mark_started(&mut self, now: Tick) {
        if self.start_time.is_none() {
            self.start_time = Some(now);
        }
    }

    /// Executes one tick. Returns `true` when this tick finished the burst.
    pub fn run_tick(&mut self, now: Tick) -> bool {
        debug_assert!(self.remaining > 0, "{} ran past its burst", self.process.id);
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.completion_time = Some(now + 1);
            true
        } else {
            false
        }
    }

    /// Freezes a finished working copy into a [`CompletedProcess`].
    ///
    /// Returns `None` while the process is still outstanding.
    pub fn to_completed(&self) -> Option<CompletedProcess> {
        match (self.start_time, self.completion_time) {
            (Some(start_time), Some(completion_time)) if self.is_completed() => {
                Some(CompletedProcess {
                    process: self.process.clone(),
                    start_time,
                    completion_time,
                })
            }
            _ => None,
        }
    }
}

/// A process that ran to completion, with its first-dispatch and
/// completion ticks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedProcess {
    /// The process as supplied to the run.
    pub process: Process,
    /// First tick on the CPU.
    pub start_time: Tick,
    /// Tick after the last execution tick.
    pub completion_time: Tick,
}

impl CompletedProcess {
    /// Creates a completed record from externally supplied ticks.
    ///
    /// # Errors
    /// `InconsistentRecord` if the process starts before it arrives or
    /// completes before `start_time + burst`.
    pub fn new(
        process: Process,
        start_time: Tick,
        completion_time: Tick,
    ) -> Result<Self, ValidationError> {
        if start_time < process.arrival {
            return Err(ValidationError::new(
                ValidationErrorKind::InconsistentRecord,
                format!(
                    "Process '{}' starts at {} before its arrival at {}",
                    process.id, start_time, process.arrival
                ),
            ));
        }
        if completion_time < start_time.saturating_add(process.burst) {
            return Err(ValidationError::new(
                ValidationErrorKind::InconsistentRecord,
                format!(
                    "Process '{}' completes at {} but needs {} ticks from {}",
                    process.id, completion_time, process.burst, start_time
                ),
            ));
        }
        Ok(Self {
            process,
            start_time,
            completion_time,
        })
    }

    /// Process identifier.
    #[inline]
    pub fn id(&self) -> &str {
        &self.process.id
    }

    /// `completion - arrival`.
    ///
    /// Metrics saturate at 0 for deserialized records that bypassed
    /// [`CompletedProcess::new`].
    #[inline]
    pub fn turnaround(&self) -> Tick {
        self.completion_time.saturating_sub(self.process.arrival)
    }

    /// `turnaround - burst`.
    #[inline]
    pub fn waiting(&self) -> Tick {
        self.turnaround().saturating_sub(self.process.burst)
    }

    /// `start - arrival`.
    #[inline]
    pub fn response(&self) -> Tick {
        self.start_time.saturating_sub(self.process.arrival)
    }
}
