//! Scheduling engine and KPI evaluation.
//!
//! Runs a discrete-time, single-CPU simulation under one of the six
//! policies and derives performance metrics from the result.
//!
//! # Algorithm
//!
//! `Simulator` advances an explicit per-run state one tick at a time:
//! admission, preemption check, selection, execution. Each run clones the
//! input processes, so runs are reproducible and independent.
//!
//! # KPI
//!
//! `SimulationKpi` computes waiting, turnaround and response time per
//! process, their averages, and CPU utilization.
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", Ch. 2.4

mod config;
mod engine;
mod kpi;
mod outcome;

pub use config::{SimulationConfig, TickLimit, DEFAULT_TICK_LIMIT};
pub use engine::Simulator;
pub use kpi::{Averages, ProcessMetrics, SimulationKpi};
pub use outcome::{SimulationOutcome, SimulationRun, SimulationTimeout};

use thiserror::Error;

use crate::dispatching::Policy;
use crate::models::{CompletedProcess, Process, Tick};
use crate::validation::ValidationError;

/// Errors that prevent a simulation from starting.
///
/// Reaching the tick limit is not an error; see
/// [`SimulationOutcome::TimedOut`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    /// The process list, policy or configuration failed validation.
    #[error("invalid simulation input: {}", join_messages(.0))]
    InvalidInput(Vec<ValidationError>),
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Runs a simulation with the default configuration.
///
/// # Example
/// ```
/// use u_cpusim::dispatching::Policy;
/// use u_cpusim::models::Process;
/// use u_cpusim::scheduler::simulate;
///
/// let processes = vec![Process::new("P1", 0, 8), Process::new("P2", 1, 4)];
/// let run = simulate(&processes, Policy::Srtf).unwrap().into_run().unwrap();
/// assert_eq!(run.completed[0].id(), "P2");
/// assert_eq!(run.completed[0].completion_time, 5);
/// ```
pub fn simulate(processes: &[Process], policy: Policy) -> Result<SimulationOutcome, SimulationError> {
    Simulator::new().simulate(processes, policy)
}

/// Computes per-process metrics, averages and CPU utilization.
pub fn summarize(completed: &[CompletedProcess], busy_ticks: Tick, elapsed_ticks: Tick) -> SimulationKpi {
    SimulationKpi::calculate(completed, busy_ticks, elapsed_ticks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = simulate(&[], Policy::RoundRobin { quantum: 0 }).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid simulation input: At least one process is required; \
             Round Robin quantum must be greater than 0"
        );
    }

    #[test]
    fn test_outcome_json() {
        let processes = vec![Process::new("P1", 1, 2)];
        let outcome = simulate(&processes, Policy::RoundRobin { quantum: 1 }).unwrap();

        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["outcome"], "completed");
        assert_eq!(json["policy"]["policy"], "rr");
        assert_eq!(json["elapsed_ticks"], 3);
        assert_eq!(json["trace"][0]["state"], "idle");

        let back: SimulationOutcome = serde_json::from_value(json).unwrap();
        assert_eq!(back, outcome);
    }

    #[test]
    fn test_summarize_run() {
        let processes = vec![
            Process::new("P1", 0, 5),
            Process::new("P2", 1, 3),
            Process::new("P3", 2, 8),
        ];
        let run = simulate(&processes, Policy::Fcfs)
            .unwrap()
            .into_run()
            .unwrap();
        let kpi = summarize(&run.completed, run.busy_ticks, run.elapsed_ticks);
        assert_eq!(kpi, run.summarize());
        assert_eq!(kpi.process("P3").unwrap().waiting, 6);
        assert_eq!(run.intervals().len(), 3);
    }

    #[test]
    fn test_summarize_inconsistent_record() {
        let json = r##"[{"process":{"id":"P1","arrival":5,"burst":3,"priority":0,"color":"#fff"},
                         "start_time":0,"completion_time":2}]"##;
        let completed: Vec<CompletedProcess> = serde_json::from_str(json).unwrap();

        let kpi = summarize(&completed, 2, 2);
        let m = kpi.process("P1").unwrap();
        assert_eq!((m.turnaround, m.waiting, m.response), (0, 0, 0));
        assert_eq!(kpi.averages.waiting, 0.0);
    }
}
