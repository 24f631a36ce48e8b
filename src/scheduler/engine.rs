//! Tick-driven scheduling engine.
//!
//! # Algorithm
//!
//! Each tick runs four phases in a fixed order:
//!
//! 1. **Admission**: processes arriving at `now` join the ready queue tail.
//! 2. **Preemption**: SRTF yields to a strictly shorter waiting process;
//!    Round Robin yields when the quantum is used up.
//! 3. **Selection**: if the CPU is idle, the queue is stably sorted by the
//!    policy and its head is dispatched.
//! 4. **Execution**: the running process consumes one tick, or the tick is
//!    recorded as idle.
//!
//! Admission precedes the preemption check, so a process arriving at tick
//! `t` takes part in SRTF's comparison at `t`.
//!
//! # Complexity
//! O(T · n log n) where T = simulated ticks, n = processes.

use tracing::{debug, instrument, trace, warn};

use super::outcome::{SimulationOutcome, SimulationRun, SimulationTimeout};
use super::{SimulationConfig, SimulationError};
use crate::dispatching::{Policy, ReadyQueue};
use crate::models::{CompletedProcess, Process, ProcessState, SchedEvent, Tick, TickRecord};
use crate::validation::validate_input;

/// Single-CPU scheduling simulator.
///
/// Holds only configuration; every call to [`Simulator::simulate`] works on
/// its own copy of the input, so one simulator can serve any number of runs.
///
/// # Example
///
/// ```
/// use u_cpusim::dispatching::Policy;
/// use u_cpusim::models::Process;
/// use u_cpusim::scheduler::Simulator;
///
/// let processes = vec![Process::new("P1", 0, 5), Process::new("P2", 1, 3)];
/// let outcome = Simulator::new().simulate(&processes, Policy::Fcfs).unwrap();
/// let run = outcome.into_run().unwrap();
/// assert_eq!(run.elapsed_ticks, 8);
/// assert_eq!(run.completed[1].completion_time, 8);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    config: SimulationConfig,
}

impl Simulator {
    /// Creates a simulator with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the configuration.
    pub fn with_config(mut self, config: SimulationConfig) -> Self {
        self.config = config;
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Runs a complete simulation from t=0.
    ///
    /// Returns `Err` if the input fails validation; the run never starts.
    /// Otherwise returns either a complete run or, if the tick limit is
    /// reached first, a timeout with the partial results.
    #[instrument(skip_all, fields(policy = %policy, processes = processes.len()))]
    pub fn simulate(
        &self,
        processes: &[Process],
        policy: Policy,
    ) -> Result<SimulationOutcome, SimulationError> {
        if let Err(errors) = validate_input(processes, &policy, &self.config) {
            debug!(errors = errors.len(), "rejected simulation input");
            return Err(SimulationError::InvalidInput(errors));
        }

        let limit = self.config.tick_limit.resolve(processes);
        let mut state = SimulationState::new(processes, policy);

        while !state.all_completed() {
            if state.now >= limit {
                warn!(limit, pending = state.pending_count(), "tick limit reached");
                return Ok(SimulationOutcome::TimedOut(state.into_timeout()));
            }
            state.step();
        }

        debug!(
            elapsed = state.now,
            busy = state.busy_ticks,
            "simulation completed"
        );
        Ok(SimulationOutcome::Completed(state.into_run()))
    }
}

/// Mutable state of one run, threaded through the tick loop.
#[derive(Debug)]
struct SimulationState {
    policy: Policy,
    now: Tick,
    arena: Vec<ProcessState>,
    ready: ReadyQueue,
    running: Option<usize>,
    /// Busy record of each arena slot, built once per run.
    busy_records: Vec<TickRecord>,
    slice_used: Tick,
    busy_ticks: Tick,
    /// Arena indices in completion order.
    finished: Vec<usize>,
    trace: Vec<TickRecord>,
    events: Vec<SchedEvent>,
}

impl SimulationState {
    fn new(processes: &[Process], policy: Policy) -> Self {
        Self {
            policy,
            now: 0,
            arena: processes.iter().map(ProcessState::new).collect(),
            ready: ReadyQueue::new(),
            running: None,
            busy_records: processes
                .iter()
                .map(|p| TickRecord::busy(p.id.as_str(), p.color.as_str()))
                .collect(),
            slice_used: 0,
            busy_ticks: 0,
            finished: Vec::new(),
            trace: Vec::new(),
            events: Vec::new(),
        }
    }

    fn all_completed(&self) -> bool {
        self.finished.len() == self.arena.len()
    }

    fn pending_count(&self) -> usize {
        self.arena.len() - self.finished.len()
    }

    fn step(&mut self) {
        self.admit();
        self.check_preemption();
        self.select();
        self.execute();
        self.now += 1;
    }

    fn admit(&mut self) {
        let now = self.now;
        for (idx, p) in self.arena.iter().enumerate() {
            if !p.is_completed() && p.process.arrival == now {
                trace!(id = %p.process.id, now, "arrived");
                self.ready.push_back(idx);
            }
        }
    }

    fn check_preemption(&mut self) {
        let Some(idx) = self.running else {
            return;
        };

        let shortest_waiting = self.ready.min_remaining(&self.arena);
        if self
            .policy
            .should_preempt(&self.arena[idx], self.slice_used, shortest_waiting)
        {
            let id = self.arena[idx].process.id.clone();
            trace!(id = %id, now = self.now, "preempted");
            self.events.push(SchedEvent::Preempted { id, at: self.now });
            self.ready.push_back(idx);
            self.running = None;
            self.slice_used = 0;
        }
    }

    fn select(&mut self) {
        if self.running.is_some() || self.ready.is_empty() {
            return;
        }

        self.ready.reorder(&self.policy, &self.arena);
        let Some(idx) = self.ready.pop_front() else {
            return;
        };

        let p = &mut self.arena[idx];
        p.mark_started(self.now);
        trace!(id = %p.process.id, now = self.now, remaining = p.remaining, "dispatched");
        self.events.push(SchedEvent::Dispatched {
            id: p.process.id.clone(),
            at: self.now,
        });
        self.running = Some(idx);
        self.slice_used = 0;
    }

    fn execute(&mut self) {
        let Some(idx) = self.running else {
            self.trace.push(TickRecord::Idle);
            return;
        };

        self.trace.push(self.busy_records[idx].clone());
        let p = &mut self.arena[idx];
        self.slice_used += 1;
        self.busy_ticks += 1;

        if p.run_tick(self.now) {
            let at = self.now + 1;
            trace!(id = %p.process.id, at, "completed");
            self.events.push(SchedEvent::Completed {
                id: p.process.id.clone(),
                at,
            });
            self.finished.push(idx);
            self.running = None;
            self.slice_used = 0;
        }
    }

    fn completed(&self) -> Vec<CompletedProcess> {
        self.finished
            .iter()
            .filter_map(|&idx| self.arena[idx].to_completed())
            .collect()
    }

    fn into_run(self) -> SimulationRun {
        SimulationRun {
            policy: self.policy,
            completed: self.completed(),
            busy_ticks: self.busy_ticks,
            elapsed_ticks: self.now,
            trace: self.trace,
            events: self.events,
        }
    }

    fn into_timeout(self) -> SimulationTimeout {
        let pending = self
            .arena
            .iter()
            .filter(|p| !p.is_completed())
            .map(|p| p.process.id.clone())
            .collect();
        SimulationTimeout {
            policy: self.policy,
            completed: self.completed(),
            pending,
            busy_ticks: self.busy_ticks,
            elapsed_at_timeout: self.now,
            partial_trace: self.trace,
            events: self.events,
        }
    }
}
