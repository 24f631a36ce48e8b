//! The six CPU scheduling policies.
//!
//! # Ordering Convention
//! [`Policy::compare`] returns `Less` for the process that should run
//! first. Queues are sorted stably, so `Equal` keeps insertion order and
//! insertion order is the tie-break for every policy.
//!
//! # References
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.3
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", Ch. 2.4

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::{ProcessState, Tick};
use crate::validation::{ValidationError, ValidationErrorKind};

/// A CPU scheduling policy.
///
/// Only Round Robin carries a parameter; Priority reads the `priority`
/// field already present on each process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "policy")]
pub enum Policy {
    /// First-Come, First-Served. Non-preemptive.
    Fcfs,
    /// Shortest Job First (by burst). Non-preemptive.
    Sjf,
    /// Largest Job First (by burst). Non-preemptive.
    Ljf,
    /// Lowest priority number first. Non-preemptive.
    Priority,
    /// Shortest Remaining Time First. Preemptive SJF.
    Srtf,
    /// Round Robin with a fixed time quantum.
    #[serde(rename = "rr")]
    RoundRobin {
        /// Ticks a process may run per dispatch. Must be positive.
        quantum: Tick,
    },
}

impl Policy {
    /// All parameterless policies plus Round Robin with the given quantum.
    pub fn all(quantum: Tick) -> [Policy; 6] {
        [
            Policy::Fcfs,
            Policy::Sjf,
            Policy::Ljf,
            Policy::Priority,
            Policy::Srtf,
            Policy::RoundRobin { quantum },
        ]
    }

    /// Builds a policy from an identifier and an optional quantum.
    ///
    /// The quantum is required (and must be positive) for `"rr"` and
    /// ignored otherwise.
    pub fn from_parts(name: &str, quantum: Option<Tick>) -> Result<Self, ValidationError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "fcfs" => Ok(Policy::Fcfs),
            "sjf" => Ok(Policy::Sjf),
            "ljf" => Ok(Policy::Ljf),
            "priority" => Ok(Policy::Priority),
            "srtf" => Ok(Policy::Srtf),
            "rr" => match quantum {
                Some(q) if q > 0 => Ok(Policy::RoundRobin { quantum: q }),
                Some(_) => Err(ValidationError::new(
                    ValidationErrorKind::InvalidQuantum,
                    "Round Robin quantum must be greater than 0",
                )),
                None => Err(ValidationError::new(
                    ValidationErrorKind::InvalidQuantum,
                    "Round Robin requires a quantum",
                )),
            },
            other => Err(ValidationError::new(
                ValidationErrorKind::UnknownPolicy,
                format!("Unknown scheduling policy: '{other}'"),
            )),
        }
    }

    /// Short identifier ("fcfs", "sjf", "ljf", "priority", "srtf", "rr").
    pub fn name(&self) -> &'static str {
        match self {
            Policy::Fcfs => "fcfs",
            Policy::Sjf => "sjf",
            Policy::Ljf => "ljf",
            Policy::Priority => "priority",
            Policy::Srtf => "srtf",
            Policy::RoundRobin { .. } => "rr",
        }
    }

    /// Policy description.
    pub fn description(&self) -> &'static str {
        match self {
            Policy::Fcfs => {
                "First-Come, First-Served is a non-preemptive algorithm. Processes are executed \
                 in the exact order they arrive in the ready queue. It is simple but can lead to \
                 the \"convoy effect\"."
            }
            Policy::Sjf => {
                "Shortest Job First is a non-preemptive algorithm that selects the waiting \
                 process with the smallest burst time to run next. It is optimal for average \
                 waiting time but can starve long jobs."
            }
            Policy::Ljf => {
                "Largest Job First is a non-preemptive algorithm that selects the waiting \
                 process with the largest burst time to run next. It is the opposite of SJF and \
                 generally results in poor average waiting time."
            }
            Policy::Priority => {
                "Priority Scheduling is a non-preemptive algorithm where each process has a \
                 priority. The process with the highest priority (lowest number) in the ready \
                 queue is chosen to run next. Can cause starvation."
            }
            Policy::Srtf => {
                "Shortest Remaining Time First is the preemptive version of SJF. The scheduler \
                 always chooses the process with the shortest remaining time. It can preempt a \
                 running process if a new, shorter job arrives."
            }
            Policy::RoundRobin { .. } => {
                "Round Robin is a preemptive algorithm where each process gets a small unit of \
                 CPU time (time quantum). If not finished, it is moved to the end of the ready \
                 queue. It is designed for time-sharing systems."
            }
        }
    }

    /// Whether a running process can be taken off the CPU before it finishes.
    pub fn is_preemptive(&self) -> bool {
        matches!(self, Policy::Srtf | Policy::RoundRobin { .. })
    }

    /// Round Robin quantum, if any.
    pub fn quantum(&self) -> Option<Tick> {
        match self {
            Policy::RoundRobin { quantum } => Some(*quantum),
            _ => None,
        }
    }

    /// Whether selection reorders the ready queue.
    ///
    /// FCFS and Round Robin dispatch in queue order.
    pub fn reorders(&self) -> bool {
        !matches!(self, Policy::Fcfs | Policy::RoundRobin { .. })
    }

    /// Selection order of two waiting processes (`Less` = `a` runs first).
    pub fn compare(&self, a: &ProcessState, b: &ProcessState) -> Ordering {
        match self {
            Policy::Fcfs | Policy::RoundRobin { .. } => Ordering::Equal,
            Policy::Sjf => a.process.burst.cmp(&b.process.burst),
            Policy::Ljf => b.process.burst.cmp(&a.process.burst),
            Policy::Priority => a.process.priority.cmp(&b.process.priority),
            Policy::Srtf => a.remaining.cmp(&b.remaining),
        }
    }

    /// Whether the running process must yield the CPU this tick.
    ///
    /// # Arguments
    /// * `running` - The process on the CPU.
    /// * `slice_used` - Ticks it has run since its last dispatch.
    /// * `shortest_waiting` - Minimum remaining time in the ready queue.
    pub fn should_preempt(
        &self,
        running: &ProcessState,
        slice_used: Tick,
        shortest_waiting: Option<Tick>,
    ) -> bool {
        match self {
            Policy::Srtf => shortest_waiting.is_some_and(|r| r < running.remaining),
            Policy::RoundRobin { quantum } => slice_used >= *quantum,
            Policy::Fcfs | Policy::Sjf | Policy::Ljf | Policy::Priority => false,
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Policy::RoundRobin { quantum } => write!(f, "rr:{quantum}"),
            other => f.write_str(other.name()),
        }
    }
}

/// Parses `fcfs`, `sjf`, `ljf`, `priority`, `srtf` or `rr:<quantum>`.
impl FromStr for Policy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((name, q)) => {
                let quantum = q.trim().parse::<Tick>().map_err(|_| {
                    ValidationError::new(
                        ValidationErrorKind::InvalidQuantum,
                        format!("Invalid quantum: '{q}'"),
                    )
                })?;
                Policy::from_parts(name, Some(quantum))
            }
            None => Policy::from_parts(s, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Process;

    fn state(id: &str, burst: Tick, priority: i32, remaining: Tick) -> ProcessState {
        let mut s = ProcessState::new(&Process::new(id, 0, burst).with_priority(priority));
        s.remaining = remaining;
        s
    }

    #[test]
    fn test_from_parts() {
        assert_eq!(Policy::from_parts("FCFS", None).unwrap(), Policy::Fcfs);
        assert_eq!(Policy::from_parts("priority", Some(9)).unwrap(), Policy::Priority);
        assert_eq!(
            Policy::from_parts("rr", Some(3)).unwrap(),
            Policy::RoundRobin { quantum: 3 }
        );

        let err = Policy::from_parts("rr", None).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::InvalidQuantum);
        let err = Policy::from_parts("rr", Some(0)).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::InvalidQuantum);
        let err = Policy::from_parts("lottery", None).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::UnknownPolicy);
    }

    #[test]
    fn test_display_parse() {
        for policy in Policy::all(4) {
            let text = policy.to_string();
            assert_eq!(text.parse::<Policy>().unwrap(), policy);
        }
        assert_eq!(Policy::RoundRobin { quantum: 2 }.to_string(), "rr:2");
        assert!("rr:x".parse::<Policy>().is_err());
        assert!("rr".parse::<Policy>().is_err());
    }

    #[test]
    fn test_compare() {
        let short = state("A", 2, 5, 2);
        let long = state("B", 9, 1, 1);

        assert_eq!(Policy::Fcfs.compare(&short, &long), Ordering::Equal);
        assert_eq!(Policy::Sjf.compare(&short, &long), Ordering::Less);
        assert_eq!(Policy::Ljf.compare(&short, &long), Ordering::Greater);
        assert_eq!(Policy::Priority.compare(&short, &long), Ordering::Greater);
        // SRTF looks at remaining, not burst.
        assert_eq!(Policy::Srtf.compare(&short, &long), Ordering::Greater);
    }

    #[test]
    fn test_should_preempt() {
        let running = state("A", 8, 0, 7);

        assert!(Policy::Srtf.should_preempt(&running, 1, Some(4)));
        assert!(!Policy::Srtf.should_preempt(&running, 1, Some(7))); // strict
        assert!(!Policy::Srtf.should_preempt(&running, 1, None));

        let rr = Policy::RoundRobin { quantum: 2 };
        assert!(!rr.should_preempt(&running, 1, Some(1)));
        assert!(rr.should_preempt(&running, 2, None));

        for policy in [Policy::Fcfs, Policy::Sjf, Policy::Ljf, Policy::Priority] {
            assert!(!policy.should_preempt(&running, 100, Some(0)));
            assert!(!policy.is_preemptive());
        }
    }

    #[test]
    fn test_serde_tags() {
        let json = serde_json::to_string(&Policy::RoundRobin { quantum: 2 }).unwrap();
        assert_eq!(json, r#"{"policy":"rr","quantum":2}"#);
        let policy: Policy = serde_json::from_str(r#"{"policy":"srtf"}"#).unwrap();
        assert_eq!(policy, Policy::Srtf);
    }

    #[test]
    fn test_descriptions() {
        for policy in Policy::all(1) {
            assert!(!policy.description().is_empty());
        }
        assert!(Policy::Fcfs.description().contains("convoy effect"));
    }
}
