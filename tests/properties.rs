//! Laws that hold for every policy and every valid workload.

use std::collections::HashMap;

use proptest::prelude::*;

use u_cpusim::dispatching::Policy;
use u_cpusim::models::{compress, expand, Process, SchedEvent, Tick};
use u_cpusim::scheduler::{simulate, SimulationRun};
use u_cpusim::workload::WorkloadGenerator;

fn arb_processes() -> impl Strategy<Value = Vec<Process>> {
    prop::collection::vec((0u64..20, 1u64..10, 0i32..4), 1..8).prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (arrival, burst, priority))| {
                Process::new(format!("P{}", i + 1), arrival, burst).with_priority(priority)
            })
            .collect()
    })
}

fn arb_policy() -> impl Strategy<Value = Policy> {
    (0usize..6, 1u64..5).prop_map(|(i, quantum)| Policy::all(quantum)[i])
}

fn run(processes: &[Process], policy: Policy) -> SimulationRun {
    simulate(processes, policy)
        .expect("valid input")
        .into_run()
        .expect("small workloads finish well before the tick limit")
}

proptest! {
    #[test]
    fn compressed_trace_round_trips(processes in arb_processes(), policy in arb_policy()) {
        let r = run(&processes, policy);
        let intervals = compress(&r.trace);

        let total: Tick = intervals.iter().map(|i| i.duration).sum();
        prop_assert_eq!(total, r.elapsed_ticks);
        prop_assert_eq!(expand(&intervals), r.trace.clone());
        for pair in intervals.windows(2) {
            prop_assert_eq!(pair[0].end(), pair[1].start);
            prop_assert_ne!(pair[0].label(), pair[1].label());
        }
    }

    #[test]
    fn metrics_are_consistent(processes in arb_processes(), policy in arb_policy()) {
        let r = run(&processes, policy);
        prop_assert_eq!(r.completed.len(), processes.len());

        let kpi = r.summarize();
        for m in &kpi.per_process {
            prop_assert_eq!(m.turnaround, m.waiting + m.burst);
            prop_assert!(m.response <= m.waiting);
            prop_assert!(m.start_time >= m.arrival);
        }
        prop_assert!(kpi.cpu_utilization_percent <= 100.0);

        let total_burst: Tick = processes.iter().map(|p| p.burst).sum();
        prop_assert_eq!(r.busy_ticks, total_burst);
    }

    #[test]
    fn each_process_runs_exactly_its_burst(processes in arb_processes(), policy in arb_policy()) {
        let r = run(&processes, policy);

        let mut executed: HashMap<&str, Tick> = HashMap::new();
        for (tick, record) in r.trace.iter().enumerate() {
            if let Some(id) = record.process_id() {
                *executed.entry(id).or_default() += 1;
                let p = processes.iter().find(|p| p.id == id).unwrap();
                prop_assert!(tick as Tick >= p.arrival);
            }
        }
        for p in &processes {
            prop_assert_eq!(executed.get(p.id.as_str()).copied(), Some(p.burst));
        }
    }

    #[test]
    fn round_robin_slices_respect_quantum(processes in arb_processes(), quantum in 1u64..5) {
        let r = run(&processes, Policy::RoundRobin { quantum });

        let mut dispatched_at: Option<Tick> = None;
        for event in &r.events {
            match event {
                SchedEvent::Dispatched { at, .. } => dispatched_at = Some(*at),
                SchedEvent::Preempted { at, .. } => {
                    let start = dispatched_at.take().unwrap();
                    prop_assert_eq!(at - start, quantum);
                }
                SchedEvent::Completed { at, .. } => {
                    let start = dispatched_at.take().unwrap();
                    prop_assert!(at - start <= quantum);
                }
            }
        }
    }

    #[test]
    fn non_preemptive_policies_run_to_completion(processes in arb_processes(), i in 0usize..4) {
        let policy = [Policy::Fcfs, Policy::Sjf, Policy::Ljf, Policy::Priority][i];
        let r = run(&processes, policy);

        let preempted = r
            .events
            .iter()
            .any(|e| matches!(e, SchedEvent::Preempted { .. }));
        prop_assert!(!preempted);
        // One interval per process plus idle gaps.
        let busy_intervals = compress(&r.trace).iter().filter(|i| !i.record.is_idle()).count();
        prop_assert_eq!(busy_intervals, processes.len());
    }

    #[test]
    fn runs_are_reproducible(processes in arb_processes(), policy in arb_policy()) {
        let before = processes.clone();
        let first = run(&processes, policy);
        let second = run(&processes, policy);
        prop_assert_eq!(&processes, &before);
        prop_assert_eq!(first, second);
    }
}

#[test]
fn generated_workloads_complete_under_every_policy() {
    let processes = WorkloadGenerator::new(300)
        .with_max_priority(4)
        .with_seed(11)
        .generate()
        .unwrap();

    for policy in Policy::all(3) {
        let r = run(&processes, policy);
        assert_eq!(r.completed.len(), processes.len());
        let total_burst: Tick = processes.iter().map(|p| p.burst).sum();
        assert_eq!(r.busy_ticks, total_burst);
    }
}

#[test]
fn sjf_never_loses_to_fcfs_on_average_wait_when_all_arrive_together() {
    let processes: Vec<Process> = [7, 3, 9, 1, 4]
        .iter()
        .enumerate()
        .map(|(i, &burst)| Process::new(format!("P{}", i + 1), 0, burst))
        .collect();

    let fcfs = run(&processes, Policy::Fcfs).summarize();
    let sjf = run(&processes, Policy::Sjf).summarize();
    let ljf = run(&processes, Policy::Ljf).summarize();

    assert!(sjf.averages.waiting <= fcfs.averages.waiting);
    assert!(fcfs.averages.waiting <= ljf.averages.waiting);
}
