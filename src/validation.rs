//! Input and outcome validation.
//!
//! Three checks, each collecting every problem it finds:
//!
//! - [`validate_input`]: structural integrity of employees and tasks before
//!   formulation (duplicate IDs, impossible parameters, oversized curves).
//! - [`validate_completion`]: flexible tasks reached their effort target in
//!   a scored schedule.
//! - [`validate_demand`]: fixed tasks are staffed at exactly their demand
//!   curve in a grid.

use std::collections::HashSet;

use crate::models::{Employee, ScheduleGrid, Task, Workload, TOTAL_BLOCKS};
use crate::scoring::ScheduleMetrics;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two employees or two tasks share an ID.
    DuplicateId,
    /// Effort is negative, NaN, or infinite.
    InvalidEffort,
    /// Demand curve has more entries than the day has blocks.
    DemandCurveTooLong,
    /// Priority is zero.
    InvalidPriority,
    /// Speed, fatigue, or switch cost out of range.
    InvalidEmployeeParameter,
    /// Shift is empty, reversed, or past the end of the day.
    InvalidShift,
    /// A flexible task did not reach its effort target.
    IncompleteTask,
    /// A fixed task is over- or under-staffed at a block.
    DemandMismatch,
}

impl ValidationError {
    /// Creates a validation error.
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

fn finish(errors: Vec<ValidationError>) -> ValidationResult {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates employees and tasks before formulation.
///
/// Checks:
/// 1. No duplicate employee IDs
/// 2. No duplicate task IDs
/// 3. `base_speed > 0`, `fatigue_rate >= 0`, `switch_cost >= 0`, all finite
/// 4. Every shift satisfies `start < end <= TOTAL_BLOCKS`
/// 5. Priorities start at 1
/// 6. Flexible effort is finite and non-negative
/// 7. Demand curves fit in the day
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(employees: &[Employee], tasks: &[Task]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut employee_ids = HashSet::new();
    for e in employees {
        if !employee_ids.insert(e.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate employee ID: {}", e.id),
            ));
        }

        if !(e.base_speed.is_finite() && e.base_speed > 0.0) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidEmployeeParameter,
                format!("Employee '{}' has non-positive base speed {}", e.id, e.base_speed),
            ));
        }
        for (label, value) in [("fatigue rate", e.fatigue_rate), ("switch cost", e.switch_cost)] {
            if !(value.is_finite() && value >= 0.0) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidEmployeeParameter,
                    format!("Employee '{}' has invalid {label} {value}", e.id),
                ));
            }
        }

        for s in &e.shifts {
            if s.start_block >= s.end_block || s.end_block > TOTAL_BLOCKS {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidShift,
                    format!(
                        "Employee '{}' has invalid shift [{}, {})",
                        e.id, s.start_block, s.end_block
                    ),
                ));
            }
        }
    }

    let mut task_ids = HashSet::new();
    for t in tasks {
        if !task_ids.insert(t.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate task ID: {}", t.id),
            ));
        }

        if t.priority == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidPriority,
                format!("Task '{}' has priority 0; priorities start at 1", t.id),
            ));
        }

        match &t.workload {
            Workload::Flexible { effort_required } => {
                if !(effort_required.is_finite() && *effort_required >= 0.0) {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::InvalidEffort,
                        format!("Task '{}' has invalid effort {}", t.id, effort_required),
                    ));
                }
            }
            Workload::Fixed { demand_curve } => {
                if demand_curve.len() > TOTAL_BLOCKS {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::DemandCurveTooLong,
                        format!(
                            "Task '{}' demand curve has {} entries; the day has {} blocks",
                            t.id,
                            demand_curve.len(),
                            TOTAL_BLOCKS
                        ),
                    ));
                }
            }
        }
    }

    finish(errors)
}

/// Checks that every flexible task reached its effort target.
///
/// Fixed tasks are skipped; see [`validate_demand`].
pub fn validate_completion(tasks: &[Task], metrics: &ScheduleMetrics) -> ValidationResult {
    let errors = tasks
        .iter()
        .filter_map(|t| {
            let required = t.effort_required()?;
            let progress = metrics.progress(&t.id);
            (progress < required).then(|| {
                ValidationError::new(
                    ValidationErrorKind::IncompleteTask,
                    format!(
                        "Task '{}' incomplete: {:.2}/{} units",
                        t.id, progress, required
                    ),
                )
            })
        })
        .collect();

    finish(errors)
}

/// Checks that every fixed task is staffed at exactly its demand.
pub fn validate_demand(grid: &ScheduleGrid, tasks: &[Task]) -> ValidationResult {
    let mut errors = Vec::new();

    for t in tasks.iter().filter(|t| t.is_fixed()) {
        for block in 0..TOTAL_BLOCKS {
            let staffed = grid.workers_on(&t.id, block);
            let needed = t.demand_at(block) as usize;
            if staffed != needed {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DemandMismatch,
                    format!(
                        "Task '{}' has {} worker(s) at block {} but needs {}",
                        t.id, staffed, block, needed
                    ),
                ));
            }
        }
    }

    finish(errors)
}
