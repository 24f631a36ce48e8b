//! Simulation quality metrics (KPIs).
//!
//! Computes per-process timing metrics and aggregate indicators from the
//! completed processes of a run.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Turnaround | completion - arrival |
//! | Waiting | turnaround - burst |
//! | Response | first dispatch - arrival |
//! | CPU Utilization | busy ticks / max(elapsed, 1) × 100 |
//! | Makespan | Latest completion time |
//! | Throughput | Completed processes per elapsed tick |
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.2: Scheduling Criteria

use serde::{Deserialize, Serialize};

use crate::models::{CompletedProcess, Tick};

/// Timing metrics of one completed process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessMetrics {
    /// Process identifier.
    pub id: String,
    /// Arrival tick.
    pub arrival: Tick,
    /// Burst length.
    pub burst: Tick,
    /// Scheduling priority.
    pub priority: i32,
    /// First dispatch tick.
    pub start_time: Tick,
    /// Completion tick.
    pub completion_time: Tick,
    /// completion - arrival.
    pub turnaround: Tick,
    /// turnaround - burst.
    pub waiting: Tick,
    /// start - arrival.
    pub response: Tick,
}

impl From<&CompletedProcess> for ProcessMetrics {
    fn from(done: &CompletedProcess) -> Self {
        Self {
            id: done.process.id.clone(),
            arrival: done.process.arrival,
            burst: done.process.burst,
            priority: done.process.priority,
            start_time: done.start_time,
            completion_time: done.completion_time,
            turnaround: done.turnaround(),
            waiting: done.waiting(),
            response: done.response(),
        }
    }
}

/// Mean timing metrics across completed processes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Averages {
    /// Mean waiting time.
    pub waiting: f64,
    /// Mean turnaround time.
    pub turnaround: f64,
    /// Mean response time.
    pub response: f64,
}

/// Simulation performance indicators.
///
/// All time values are in ticks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationKpi {
    /// Per-process metrics, ordered by id.
    pub per_process: Vec<ProcessMetrics>,
    /// Mean waiting, turnaround and response time (0 when nothing completed).
    pub averages: Averages,
    /// Busy share of elapsed ticks, in percent.
    pub cpu_utilization_percent: f64,
    /// Latest completion tick (0 when nothing completed).
    pub makespan: Tick,
    /// Completed processes per elapsed tick (0 when no tick elapsed).
    pub throughput: f64,
}

impl SimulationKpi {
    /// Computes KPIs from completed processes and tick counters.
    ///
    /// # Arguments
    /// * `completed` - Processes that ran to completion, in any order.
    /// * `busy_ticks` - Ticks during which some process executed.
    /// * `elapsed_ticks` - Total simulated ticks.
    pub fn calculate(completed: &[CompletedProcess], busy_ticks: Tick, elapsed_ticks: Tick) -> Self {
        let mut per_process: Vec<ProcessMetrics> =
            completed.iter().map(ProcessMetrics::from).collect();
        // Lexical id order, independent of completion order.
        per_process.sort_by(|a, b| a.id.cmp(&b.id));

        let n = per_process.len();
        let averages = if n == 0 {
            Averages::default()
        } else {
            let mut total_wait = 0.0;
            let mut total_turnaround = 0.0;
            let mut total_response = 0.0;
            for m in &per_process {
                total_wait += m.waiting as f64;
                total_turnaround += m.turnaround as f64;
                total_response += m.response as f64;
            }
            Averages {
                waiting: total_wait / n as f64,
                turnaround: total_turnaround / n as f64,
                response: total_response / n as f64,
            }
        };

        let effective_elapsed = elapsed_ticks.max(1);
        let cpu_utilization_percent = busy_ticks as f64 / effective_elapsed as f64 * 100.0;

        let makespan = per_process
            .iter()
            .map(|m| m.completion_time)
            .max()
            .unwrap_or(0);

        let throughput = if elapsed_ticks == 0 {
            0.0
        } else {
            n as f64 / elapsed_ticks as f64
        };

        Self {
            per_process,
            averages,
            cpu_utilization_percent,
            makespan,
            throughput,
        }
    }

    /// Metrics of one process by id.
    pub fn process(&self, id: &str) -> Option<&ProcessMetrics> {
        self.per_process.iter().find(|m| m.id == id)
    }
}
