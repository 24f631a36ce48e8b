//! Simulation outcomes.

use serde::{Deserialize, Serialize};

use super::kpi::SimulationKpi;
use crate::dispatching::Policy;
use crate::models::{compress, CompletedProcess, Interval, SchedEvent, Tick, TickRecord};

/// Result of a simulation run that passed validation.
///
/// Callers distinguish a finished run from one cut off by the tick limit
/// by matching on the variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum SimulationOutcome {
    /// Every process ran to completion.
    Completed(SimulationRun),
    /// The tick limit was reached first.
    TimedOut(SimulationTimeout),
}

/// A complete run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRun {
    /// Policy the run used.
    pub policy: Policy,
    /// Processes in completion order.
    pub completed: Vec<CompletedProcess>,
    /// One record per simulated tick.
    pub trace: Vec<TickRecord>,
    /// Dispatch, preemption and completion events in tick order.
    pub events: Vec<SchedEvent>,
    /// Ticks during which some process executed.
    pub busy_ticks: Tick,
    /// Total simulated ticks (`trace.len()`).
    pub elapsed_ticks: Tick,
}

/// A run stopped at the tick limit, with whatever it produced so far.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationTimeout {
    /// Policy the run used.
    pub policy: Policy,
    /// Processes that finished before the limit, in completion order.
    pub completed: Vec<CompletedProcess>,
    /// IDs of processes still outstanding, in registry order.
    pub pending: Vec<String>,
    /// Trace up to the limit; its length equals `elapsed_at_timeout`.
    pub partial_trace: Vec<TickRecord>,
    /// Events up to the limit.
    pub events: Vec<SchedEvent>,
    /// Busy ticks up to the limit.
    pub busy_ticks: Tick,
    /// The tick limit that was hit.
    pub elapsed_at_timeout: Tick,
}

impl SimulationRun {
    /// Per-process and aggregate metrics.
    pub fn summarize(&self) -> SimulationKpi {
        SimulationKpi::calculate(&self.completed, self.busy_ticks, self.elapsed_ticks)
    }

    /// Trace compressed into intervals.
    pub fn intervals(&self) -> Vec<Interval> {
        compress(&self.trace)
    }
}

impl SimulationTimeout {
    /// Metrics over the processes that finished before the limit.
    pub fn summarize(&self) -> SimulationKpi {
        SimulationKpi::calculate(&self.completed, self.busy_ticks, self.elapsed_at_timeout)
    }

    /// Partial trace compressed into intervals.
    pub fn intervals(&self) -> Vec<Interval> {
        compress(&self.partial_trace)
    }
}

impl SimulationOutcome {
    /// Whether all processes completed.
    pub fn is_completed(&self) -> bool {
        matches!(self, SimulationOutcome::Completed(_))
    }

    /// The complete run, or `None` on timeout.
    pub fn into_run(self) -> Option<SimulationRun> {
        match self {
            SimulationOutcome::Completed(run) => Some(run),
            SimulationOutcome::TimedOut(_) => None,
        }
    }

    /// Trace produced (complete or partial).
    pub fn trace(&self) -> &[TickRecord] {
        match self {
            SimulationOutcome::Completed(run) => &run.trace,
            SimulationOutcome::TimedOut(t) => &t.partial_trace,
        }
    }

    /// Processes that completed.
    pub fn completed_processes(&self) -> &[CompletedProcess] {
        match self {
            SimulationOutcome::Completed(run) => &run.completed,
            SimulationOutcome::TimedOut(t) => &t.completed,
        }
    }

    /// Simulated ticks.
    pub fn elapsed_ticks(&self) -> Tick {
        match self {
            SimulationOutcome::Completed(run) => run.elapsed_ticks,
            SimulationOutcome::TimedOut(t) => t.elapsed_at_timeout,
        }
    }

    /// Metrics over the completed processes.
    pub fn summarize(&self) -> SimulationKpi {
        match self {
            SimulationOutcome::Completed(run) => run.summarize(),
            SimulationOutcome::TimedOut(t) => t.summarize(),
        }
    }
}
