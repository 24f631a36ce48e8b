//! CPU scheduling domain models.
//!
//! Provides the input data (processes and the registry that numbers them),
//! the per-run working copy mutated by the engine, and the trace types
//! produced by a simulation.
//!
//! # Types
//!
//! | Type | Role |
//! |------|------|
//! | `Process` | Immutable input: arrival, burst, priority, color |
//! | `ProcessRegistry` | Ordered input set with generated ids |
//! | `ProcessState` | Per-run working copy (remaining, start, completion) |
//! | `CompletedProcess` | Finished process with derived times |
//! | `TickRecord` / `Interval` | Raw and compressed execution trace |
//! | `SchedEvent` | Dispatch, preemption and completion events |

mod event;
mod process;
mod registry;
mod trace;

pub use event::SchedEvent;
pub use process::{CompletedProcess, Process, ProcessState, Tick, PALETTE};
pub use registry::ProcessRegistry;
pub(crate) use registry::palette_color;
pub use trace::{compress, expand, Interval, TickRecord, IDLE_COLOR, IDLE_LABEL};
