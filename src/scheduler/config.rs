//! Simulation configuration.

use serde::{Deserialize, Serialize};

use crate::models::{Process, Tick};

/// Default hard ceiling on simulated ticks.
pub const DEFAULT_TICK_LIMIT: Tick = 10_000;

/// Upper bound on the number of ticks a run may simulate.
///
/// When the bound is reached with processes still outstanding, the run
/// ends with a timeout outcome instead of looping forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TickLimit {
    /// A fixed number of ticks.
    Fixed(Tick),
    /// `k × total burst` ticks, saturating.
    ///
    /// Arrival times do not raise the ceiling, so a far-future arrival ends
    /// in a timeout rather than a trace of idle ticks up to that arrival.
    /// Workloads with idle gaps need `k` large enough to cover them.
    BurstMultiple(u64),
}

impl TickLimit {
    /// Resolves the limit for a concrete process list.
    pub fn resolve(&self, processes: &[Process]) -> Tick {
        match *self {
            TickLimit::Fixed(ticks) => ticks,
            TickLimit::BurstMultiple(k) => processes
                .iter()
                .fold(0, |acc: Tick, p| acc.saturating_add(p.burst))
                .saturating_mul(k),
        }
    }
}

impl Default for TickLimit {
    fn default() -> Self {
        TickLimit::Fixed(DEFAULT_TICK_LIMIT)
    }
}

/// Simulation run settings.
///
/// # Example
/// ```
/// use u_cpusim::scheduler::{SimulationConfig, TickLimit};
///
/// let config = SimulationConfig::new().with_tick_limit(TickLimit::BurstMultiple(2));
/// assert_eq!(config.tick_limit, TickLimit::BurstMultiple(2));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Ceiling on simulated ticks.
    #[serde(default)]
    pub tick_limit: TickLimit,
}

impl SimulationConfig {
    /// Creates the default configuration (10,000-tick ceiling).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the tick limit.
    pub fn with_tick_limit(mut self, tick_limit: TickLimit) -> Self {
        self.tick_limit = tick_limit;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limit() {
        assert_eq!(
            SimulationConfig::default().tick_limit.resolve(&[]),
            DEFAULT_TICK_LIMIT
        );
    }

    #[test]
    fn test_burst_multiple() {
        let processes = vec![Process::new("P1", 0, 5), Process::new("P2", 10, 3)];
        assert_eq!(TickLimit::BurstMultiple(2).resolve(&processes), 16);
        assert_eq!(
            TickLimit::BurstMultiple(u64::MAX).resolve(&processes),
            Tick::MAX
        );
    }

    #[test]
    fn test_burst_multiple_ignores_arrival() {
        let processes = vec![Process::new("P1", 1_000_000_000_000, 1)];
        assert_eq!(TickLimit::BurstMultiple(2).resolve(&processes), 2);
    }

    #[test]
    fn test_config_from_json() {
        let config: SimulationConfig =
            serde_json::from_str(r#"{"tick_limit":{"burst_multiple":3}}"#).unwrap();
        assert_eq!(config.tick_limit, TickLimit::BurstMultiple(3));

        let config: SimulationConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, SimulationConfig::default());
    }
}
