//! Dispatch events emitted by the engine.

use serde::{Deserialize, Serialize};

use super::Tick;

/// A state change of a process on the CPU, in tick order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "event")]
pub enum SchedEvent {
    /// The process was selected from the ready queue at tick `at`.
    Dispatched { id: String, at: Tick },
    /// The process was taken off the CPU at the start of tick `at`
    /// and returned to the tail of the ready queue.
    Preempted { id: String, at: Tick },
    /// The process finished; `at` is its completion time.
    Completed { id: String, at: Tick },
}

impl SchedEvent {
    /// Process the event refers to.
    pub fn process_id(&self) -> &str {
        match self {
            Self::Dispatched { id, .. } | Self::Preempted { id, .. } | Self::Completed { id, .. } => {
                id
            }
        }
    }

    /// Tick of the event.
    pub fn at(&self) -> Tick {
        match self {
            Self::Dispatched { at, .. } | Self::Preempted { at, .. } | Self::Completed { at, .. } => {
                *at
            }
        }
    }
}
