//! Synthetic workload generation.
//!
//! Produces reproducible process lists for experiments and tests using
//! Bernoulli arrivals: at every tick of the horizon a process arrives with
//! probability `p_arrival`, and is short with probability `p_short`.
//!
//! # Usage
//!
//! ```
//! use u_cpusim::workload::WorkloadGenerator;
//!
//! let generator = WorkloadGenerator::new(100).with_seed(7);
//! let a = generator.generate().unwrap();
//! let b = generator.generate().unwrap();
//! assert_eq!(a, b);
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::models::{palette_color, Process, Tick};
use crate::validation::{ValidationError, ValidationErrorKind};

/// Parameters of a Bernoulli-arrival workload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkloadGenerator {
    /// Ticks during which arrivals may happen.
    pub horizon: Tick,
    /// Per-tick arrival probability (0.0..=1.0).
    pub p_arrival: f64,
    /// Probability that an arrival is a short job (0.0..=1.0).
    pub p_short: f64,
    /// Burst of a short job.
    pub short_burst: Tick,
    /// Burst of a long job.
    pub long_burst: Tick,
    /// Priorities are drawn uniformly from `0..=max_priority`.
    pub max_priority: i32,
    /// RNG seed.
    pub seed: u64,
}

impl WorkloadGenerator {
    /// Creates a generator over `horizon` ticks with default parameters
    /// (30% arrival rate, 30% short jobs of 2 ticks, long jobs of 6 ticks).
    pub fn new(horizon: Tick) -> Self {
        Self {
            horizon,
            p_arrival: 0.3,
            p_short: 0.3,
            short_burst: 2,
            long_burst: 6,
            max_priority: 0,
            seed: 0,
        }
    }

    /// Sets the per-tick arrival probability.
    pub fn with_arrival_rate(mut self, p_arrival: f64) -> Self {
        self.p_arrival = p_arrival;
        self
    }

    /// Sets the short-job mix.
    pub fn with_bursts(mut self, p_short: f64, short_burst: Tick, long_burst: Tick) -> Self {
        self.p_short = p_short;
        self.short_burst = short_burst;
        self.long_burst = long_burst;
        self
    }

    /// Sets the largest priority number drawn.
    pub fn with_max_priority(mut self, max_priority: i32) -> Self {
        self.max_priority = max_priority;
        self
    }

    /// Sets the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Generates the process list, numbered `P1, P2, ...` in arrival order.
    pub fn generate(&self) -> Result<Vec<Process>, Vec<ValidationError>> {
        self.validate()?;

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut processes = Vec::new();

        for t in 0..self.horizon {
            if rng.random::<f64>() < self.p_arrival {
                let burst = if rng.random::<f64>() < self.p_short {
                    self.short_burst
                } else {
                    self.long_burst
                };
                let priority = rng.random_range(0..=self.max_priority);

                let pid = processes.len() as u32 + 1;
                processes.push(
                    Process::new(format!("P{pid}"), t, burst)
                        .with_priority(priority)
                        .with_color(palette_color(pid)),
                );
            }
        }

        Ok(processes)
    }

    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        for (name, p) in [("p_arrival", self.p_arrival), ("p_short", self.p_short)] {
            if !(0.0..=1.0).contains(&p) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidWorkload,
                    format!("{name} must be within [0, 1], got {p}"),
                ));
            }
        }
        if self.short_burst == 0 || self.long_burst == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveBurst,
                "Workload bursts must be greater than 0",
            ));
        }
        if self.max_priority < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidWorkload,
                format!("max_priority must not be negative, got {}", self.max_priority),
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
