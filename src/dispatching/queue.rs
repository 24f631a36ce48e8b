//! Ready queue of arrived, waiting processes.

use std::collections::VecDeque;

use super::Policy;
use crate::models::{ProcessState, Tick};

/// FIFO of indices into the run's process arena.
///
/// Reordering is a stable sort, so processes with equal keys keep their
/// insertion order.
#[derive(Debug, Clone, Default)]
pub struct ReadyQueue {
    slots: VecDeque<usize>,
}

impl ReadyQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a process at the tail.
    pub fn push_back(&mut self, idx: usize) {
        self.slots.push_back(idx);
    }

    /// Removes the head.
    pub fn pop_front(&mut self) -> Option<usize> {
        self.slots.pop_front()
    }

    /// Number of waiting processes.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no process is waiting.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Arena indices in queue order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots.iter().copied()
    }

    /// Sorts the queue by the policy's selection order.
    pub fn reorder(&mut self, policy: &Policy, arena: &[ProcessState]) {
        if !policy.reorders() {
            return;
        }
        self.slots
            .make_contiguous()
            .sort_by(|&a, &b| policy.compare(&arena[a], &arena[b]));
    }

    /// Smallest remaining time among waiting processes.
    pub fn min_remaining(&self, arena: &[ProcessState]) -> Option<Tick> {
        self.slots.iter().map(|&i| arena[i].remaining).min()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Process;

    fn arena() -> Vec<ProcessState> {
        [
            Process::new("A", 0, 5).with_priority(2),
            Process::new("B", 0, 3).with_priority(1),
            Process::new("C", 0, 5).with_priority(1),
            Process::new("D", 0, 3).with_priority(2),
        ]
        .iter()
        .map(ProcessState::new)
        .collect()
    }

    fn order(queue: &ReadyQueue, arena: &[ProcessState]) -> Vec<String> {
        queue.iter().map(|i| arena[i].process.id.clone()).collect()
    }

    fn filled() -> ReadyQueue {
        let mut queue = ReadyQueue::new();
        for i in 0..4 {
            queue.push_back(i);
        }
        queue
    }

    #[test]
    fn test_fcfs_keeps_order() {
        let arena = arena();
        let mut queue = filled();
        queue.reorder(&Policy::Fcfs, &arena);
        assert_eq!(order(&queue, &arena), ["A", "B", "C", "D"]);
        queue.reorder(&Policy::RoundRobin { quantum: 1 }, &arena);
        assert_eq!(order(&queue, &arena), ["A", "B", "C", "D"]);
    }

    #[test]
    fn test_stable_sorts() {
        let arena = arena();

        let mut queue = filled();
        queue.reorder(&Policy::Sjf, &arena);
        assert_eq!(order(&queue, &arena), ["B", "D", "A", "C"]);

        let mut queue = filled();
        queue.reorder(&Policy::Ljf, &arena);
        assert_eq!(order(&queue, &arena), ["A", "C", "B", "D"]);

        let mut queue = filled();
        queue.reorder(&Policy::Priority, &arena);
        assert_eq!(order(&queue, &arena), ["B", "C", "A", "D"]);
    }

    #[test]
    fn test_min_remaining() {
        let mut arena = arena();
        let mut queue = ReadyQueue::new();
        assert_eq!(queue.min_remaining(&arena), None);

        queue.push_back(0);
        queue.push_back(2);
        arena[2].remaining = 1;
        assert_eq!(queue.min_remaining(&arena), Some(1));

        queue.reorder(&Policy::Srtf, &arena);
        assert_eq!(queue.pop_front(), Some(2));
        assert_eq!(queue.len(), 1);
    }
}
