//! Process registry.
//!
//! The ordered input set for a simulation. Registry order is arrival
//! (insertion) order, which is the tie-break order for every policy.

use serde::{Deserialize, Serialize};

use super::{Process, Tick, PALETTE};
use crate::validation::{ValidationError, ValidationErrorKind};

/// An ordered collection of processes with generated ids and colors.
///
/// # Example
/// ```
/// use u_cpusim::models::ProcessRegistry;
///
/// let mut registry = ProcessRegistry::new();
/// let p1 = registry.add(0, 5, 0).unwrap().id.clone();
/// assert_eq!(p1, "P1");
/// assert!(registry.add(1, 0, 0).is_err()); // zero burst rejected
/// assert_eq!(registry.len(), 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessRegistry {
    processes: Vec<Process>,
    next_pid: u32,
}

impl ProcessRegistry {
    /// Creates an empty registry. The first generated id is "P1".
    pub fn new() -> Self {
        Self {
            processes: Vec::new(),
            next_pid: 1,
        }
    }

    /// Adds a process with a generated id (`P{n}`) and palette color.
    ///
    /// Rejects a zero burst before anything is stored; the pid counter only
    /// advances on success.
    pub fn add(
        &mut self,
        arrival: Tick,
        burst: Tick,
        priority: i32,
    ) -> Result<&Process, ValidationError> {
        if burst == 0 {
            return Err(ValidationError::new(
                ValidationErrorKind::NonPositiveBurst,
                "Burst time must be greater than 0",
            ));
        }

        let pid = self.next_pid;
        let process = Process::new(format!("P{pid}"), arrival, burst)
            .with_priority(priority)
            .with_color(palette_color(pid));
        self.next_pid += 1;
        self.push(process)
    }

    /// Adds a caller-built process, keeping its id and color.
    pub fn insert(&mut self, process: Process) -> Result<&Process, ValidationError> {
        if process.burst == 0 {
            return Err(ValidationError::new(
                ValidationErrorKind::NonPositiveBurst,
                format!("Process '{}' has a zero burst", process.id),
            ));
        }
        self.push(process)
    }

    fn push(&mut self, process: Process) -> Result<&Process, ValidationError> {
        if self.get(&process.id).is_some() {
            return Err(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate process ID: {}", process.id),
            ));
        }
        self.processes.push(process);
        let last = self.processes.len() - 1;
        Ok(&self.processes[last])
    }

    /// Removes a process by id.
    pub fn remove(&mut self, id: &str) -> Option<Process> {
        let idx = self.processes.iter().position(|p| p.id == id)?;
        Some(self.processes.remove(idx))
    }

    /// Clears all processes and restarts id numbering at "P1".
    pub fn reset(&mut self) {
        self.processes.clear();
        self.next_pid = 1;
    }

    /// Looks up a process by id.
    pub fn get(&self, id: &str) -> Option<&Process> {
        self.processes.iter().find(|p| p.id == id)
    }

    /// Processes in registry order.
    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    /// Number of registered processes.
    pub fn len(&self) -> usize {
        self.processes.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }
}

impl Default for ProcessRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Palette color for the n-th generated process (1-based).
pub(crate) fn palette_color(pid: u32) -> &'static str {
    PALETTE[(pid.saturating_sub(1) as usize) % PALETTE.len()]
}
