//! Input validation for simulation runs.
//!
//! Checks the process list, policy parameters and tick limit before a run
//! starts. Detects:
//! - Empty process lists
//! - Zero bursts
//! - Duplicate process IDs
//! - Zero Round Robin quanta
//! - Zero tick limits
//!
//! All issues are collected rather than stopping at the first one.

use std::collections::HashSet;

use thiserror::Error;

use crate::dispatching::Policy;
use crate::models::Process;
use crate::scheduler::{SimulationConfig, TickLimit};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// No processes were supplied.
    EmptyProcessList,
    /// A process has a zero burst.
    NonPositiveBurst,
    /// Two processes share the same ID.
    DuplicateId,
    /// Round Robin quantum is missing, zero or malformed.
    InvalidQuantum,
    /// The policy identifier is not one of the six policies.
    UnknownPolicy,
    /// The tick limit cannot admit a single tick.
    InvalidTickLimit,
    /// Workload generator parameters are out of range.
    InvalidWorkload,
    /// A completed-process record has start or completion ticks that its
    /// arrival and burst cannot produce.
    InconsistentRecord,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the inputs of a simulation run.
///
/// Checks:
/// 1. At least one process
/// 2. Every burst is positive
/// 3. No duplicate process IDs
/// 4. Round Robin quantum is positive
/// 5. The tick limit is positive
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(
    processes: &[Process],
    policy: &Policy,
    config: &SimulationConfig,
) -> ValidationResult {
    let mut errors = Vec::new();

    if processes.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyProcessList,
            "At least one process is required",
        ));
    }

    let mut ids = HashSet::new();
    for p in processes {
        if !ids.insert(p.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate process ID: {}", p.id),
            ));
        }
        if p.burst == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveBurst,
                format!("Process '{}' has a zero burst", p.id),
            ));
        }
    }

    if policy.quantum() == Some(0) {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidQuantum,
            "Round Robin quantum must be greater than 0",
        ));
    }

    match config.tick_limit {
        TickLimit::Fixed(0) => errors.push(ValidationError::new(
            ValidationErrorKind::InvalidTickLimit,
            "Fixed tick limit must be greater than 0",
        )),
        TickLimit::BurstMultiple(0) => errors.push(ValidationError::new(
            ValidationErrorKind::InvalidTickLimit,
            "Burst multiple must be greater than 0",
        )),
        _ => {}
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
