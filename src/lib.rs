//! Discrete-time CPU scheduling simulator.
//!
//! Given a set of processes (arrival, burst, priority) and a scheduling
//! policy, produces a tick-by-tick execution trace and the classic
//! performance metrics: waiting, turnaround and response time, and CPU
//! utilization.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Process`, `ProcessRegistry`, `TickRecord`,
//!   `Interval`, `SchedEvent`, plus trace compression
//! - **`dispatching`**: The six policies (FCFS, SJF, LJF, Priority, SRTF,
//!   Round Robin) and the ready queue
//! - **`scheduler`**: The tick-driven `Simulator` and `SimulationKpi`
//! - **`validation`**: Input integrity checks (empty lists, zero bursts,
//!   duplicate IDs, quanta, tick limits)
//! - **`workload`**: Seeded synthetic workloads
//!
//! # Example
//!
//! ```
//! use u_cpusim::dispatching::Policy;
//! use u_cpusim::models::ProcessRegistry;
//! use u_cpusim::scheduler::simulate;
//!
//! let mut registry = ProcessRegistry::new();
//! registry.add(0, 5, 0).unwrap();
//! registry.add(1, 3, 0).unwrap();
//! registry.add(2, 8, 0).unwrap();
//!
//! let run = simulate(registry.processes(), Policy::Fcfs)
//!     .unwrap()
//!     .into_run()
//!     .unwrap();
//! let kpi = run.summarize();
//! assert_eq!(kpi.per_process[2].completion_time, 16);
//! assert!((kpi.cpu_utilization_percent - 100.0).abs() < 1e-9);
//! ```
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", Ch. 2.4

pub mod dispatching;
pub mod models;
pub mod scheduler;
pub mod validation;
pub mod workload;
