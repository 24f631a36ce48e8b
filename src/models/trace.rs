//! Execution trace model and compression.
//!
//! The engine emits one [`TickRecord`] per simulated tick. [`compress`]
//! run-length encodes the raw trace into [`Interval`]s for Gantt-style
//! display; [`expand`] restores the raw trace exactly.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::Tick;

/// Display color of idle ticks.
pub const IDLE_COLOR: &str = "#555";

/// Display label of idle ticks.
pub const IDLE_LABEL: &str = "Idle";

/// What occupied the CPU during one tick.
///
/// Busy labels are shared, so cloning a record never copies its strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum TickRecord {
    /// A process executed during this tick.
    Busy {
        /// Process identifier.
        id: Arc<str>,
        /// Process display color.
        color: Arc<str>,
    },
    /// No process was ready.
    Idle,
}

impl TickRecord {
    /// Creates a busy record.
    pub fn busy(id: impl Into<Arc<str>>, color: impl Into<Arc<str>>) -> Self {
        Self::Busy {
            id: id.into(),
            color: color.into(),
        }
    }

    /// Process id, or `None` for idle ticks.
    pub fn process_id(&self) -> Option<&str> {
        match self {
            Self::Busy { id, .. } => Some(&**id),
            Self::Idle => None,
        }
    }

    /// Display label ("Idle" for idle ticks).
    pub fn label(&self) -> &str {
        self.process_id().unwrap_or(IDLE_LABEL)
    }

    /// Display color.
    pub fn color(&self) -> &str {
        match self {
            Self::Busy { color, .. } => &**color,
            Self::Idle => IDLE_COLOR,
        }
    }

    /// Whether the CPU was idle.
    #[inline]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

/// A run of consecutive identical tick records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    /// The repeated record.
    pub record: TickRecord,
    /// First tick of the run.
    pub start: Tick,
    /// Number of ticks in the run (always > 0).
    pub duration: Tick,
}

impl Interval {
    /// Tick after the last tick of the run.
    #[inline]
    pub fn end(&self) -> Tick {
        self.start + self.duration
    }

    /// Display label.
    pub fn label(&self) -> &str {
        self.record.label()
    }
}

/// Merges consecutive identical records (same id and color) into intervals.
///
/// Lossless: `expand(&compress(trace)) == trace`, and the durations sum to
/// `trace.len()`. An empty trace yields no intervals.
///
/// # Example
/// ```
/// use u_cpusim::models::{compress, TickRecord};
///
/// let trace = vec![
///     TickRecord::busy("P1", "#007bff"),
///     TickRecord::busy("P1", "#007bff"),
///     TickRecord::Idle,
/// ];
/// let intervals = compress(&trace);
/// assert_eq!(intervals.len(), 2);
/// assert_eq!(intervals[0].duration, 2);
/// assert_eq!(intervals[1].start, 2);
/// ```
pub fn compress(trace: &[TickRecord]) -> Vec<Interval> {
    let mut intervals: Vec<Interval> = Vec::new();

    for (tick, record) in trace.iter().enumerate() {
        if let Some(last) = intervals.last_mut() {
            if last.record == *record {
                last.duration += 1;
                continue;
            }
        }
        intervals.push(Interval {
            record: record.clone(),
            start: tick as Tick,
            duration: 1,
        });
    }

    intervals
}

/// Re-expands intervals into a raw per-tick trace.
pub fn expand(intervals: &[Interval]) -> Vec<TickRecord> {
    let total: Tick = intervals.iter().map(|i| i.duration).sum();
    let mut trace = Vec::with_capacity(total as usize);
    for interval in intervals {
        trace.extend((0..interval.duration).map(|_| interval.record.clone()));
    }
    trace
}
