//! Dispatching policies and the ready queue.
//!
//! A [`Policy`] decides two things each tick: whether the running process
//! must yield (preemption) and which waiting process runs next (selection).
//! The [`ReadyQueue`] holds waiting processes in insertion order and is
//! re-sorted stably on selection.
//!
//! # Usage
//!
//! ```
//! use u_cpusim::dispatching::Policy;
//!
//! let policy: Policy = "rr:2".parse().unwrap();
//! assert_eq!(policy, Policy::RoundRobin { quantum: 2 });
//! assert!(policy.is_preemptive());
//! ```

mod policy;
mod queue;

pub use policy::Policy;
pub use queue::ReadyQueue;
