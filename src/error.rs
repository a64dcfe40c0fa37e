//! Error taxonomy.
//!
//! Every failure is a named, recoverable outcome:
//!
//! | Error | Raised by | Meaning |
//! |-------|-----------|---------|
//! | [`OutOfRangeError`] | time arithmetic, shifts, grid reads | value outside the day window |
//! | [`ScheduleConflictError`] | [`ScheduleGrid::assign`](crate::models::ScheduleGrid::assign) | a grid invariant would break |
//! | [`FormulationError`] | [`cp`](crate::cp) builder and decoder | malformed input or solution shape |
//! | [`NoSolutionError`] | [`cp`](crate::cp) solve | the solver found no assignment |
//!
//! [`PlannerError`] wraps all four for callers that do not care which.

use thiserror::Error;

use crate::cp::SolverStatus;
use crate::validation::ValidationError;

/// A block index or wall-clock time outside the scheduling window.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OutOfRangeError {
    /// Wall-clock time that does not map into the window.
    #[error("time {hour:02}:{minute:02} is outside the scheduling window")]
    Time { hour: u32, minute: u32 },

    /// Block index at or past the end of the day.
    #[error("block {block} is outside 0..{total}")]
    Block { block: usize, total: usize },

    /// Shift bounds that are empty, reversed, or past the window.
    #[error("shift [{start}, {end}) is not a valid interval within 0..{total}")]
    Shift { start: usize, end: usize, total: usize },
}

/// An assignment rejected by the schedule grid.
///
/// The variant names the invariant that would have been broken. The grid is
/// left untouched when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleConflictError {
    /// Block index is outside the day.
    #[error(transparent)]
    OutOfRange(#[from] OutOfRangeError),

    /// Employee has no shift covering the block.
    #[error("employee '{employee_id}' is not on shift at {time}")]
    EmployeeOffShift {
        employee_id: String,
        block: usize,
        time: String,
    },

    /// Employee already holds a task at the block.
    #[error("employee '{employee_id}' is already assigned to '{current_task_id}' at {time}")]
    EmployeeDoubleBooked {
        employee_id: String,
        current_task_id: String,
        block: usize,
        time: String,
    },

    /// Task is already worked by another employee at the block.
    #[error("task '{task_id}' is already worked by '{worked_by}' at {time}")]
    TaskDoubleBooked {
        task_id: String,
        worked_by: String,
        block: usize,
        time: String,
    },
}

impl ScheduleConflictError {
    /// Block the conflict was detected at, if it names one.
    pub fn block(&self) -> Option<usize> {
        match self {
            Self::OutOfRange(OutOfRangeError::Block { block, .. }) => Some(*block),
            Self::OutOfRange(_) => None,
            Self::EmployeeOffShift { block, .. }
            | Self::EmployeeDoubleBooked { block, .. }
            | Self::TaskDoubleBooked { block, .. } => Some(*block),
        }
    }
}

/// Malformed data reaching the constraint formulation layer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormulationError {
    /// Employees or tasks failed input validation.
    #[error("invalid scheduling input: {}", summarize(.0))]
    InvalidInput(Vec<ValidationError>),

    /// Solver returned a value vector that does not match the model.
    #[error("solution has {actual} values but the model has {expected} variables")]
    SolutionShape { expected: usize, actual: usize },

    /// A decoded grid does not span the full day.
    #[error("grid has {actual} blocks, expected {expected}")]
    GridShape { expected: usize, actual: usize },

    /// Objective weights are negative, non-finite, or too large.
    #[error("invalid objective weights: {0}")]
    InvalidWeights(String),
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// The solver finished without a usable assignment.
///
/// This is an expected outcome, distinct from malformed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no schedule found (solver status: {status})")]
pub struct NoSolutionError {
    /// Status reported by the solver (`Infeasible` or `TimeoutNoSolution`).
    pub status: SolverStatus,
}

/// Any planner failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlannerError {
    #[error(transparent)]
    OutOfRange(#[from] OutOfRangeError),

    #[error(transparent)]
    Conflict(#[from] ScheduleConflictError),

    #[error(transparent)]
    Formulation(#[from] FormulationError),

    #[error(transparent)]
    NoSolution(#[from] NoSolutionError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_out_of_range_messages() {
        let e = OutOfRangeError::Time { hour: 3, minute: 5 };
        assert_eq!(e.to_string(), "time 03:05 is outside the scheduling window");

        let e = OutOfRangeError::Block { block: 90, total: 80 };
        assert_eq!(e.to_string(), "block 90 is outside 0..80");
    }

    #[test]
    fn test_conflict_block() {
        let e = ScheduleConflictError::EmployeeDoubleBooked {
            employee_id: "E1".into(),
            current_task_id: "T1".into(),
            block: 12,
            time: "09:00".into(),
        };
        assert_eq!(e.block(), Some(12));
        assert!(e.to_string().contains("already assigned to 'T1'"));
    }

    #[test]
    fn test_formulation_summary() {
        let e = FormulationError::InvalidInput(vec![
            ValidationError::new(ValidationErrorKind::DuplicateId, "Duplicate task ID: T1"),
            ValidationError::new(ValidationErrorKind::InvalidEffort, "bad effort"),
        ]);
        assert_eq!(
            e.to_string(),
            "invalid scheduling input: Duplicate task ID: T1; bad effort"
        );
    }

    #[test]
    fn test_planner_error_from() {
        let err: PlannerError = NoSolutionError {
            status: SolverStatus::Infeasible,
        }
        .into();
        assert!(matches!(err, PlannerError::NoSolution(_)));
        assert_eq!(err.to_string(), "no schedule found (solver status: infeasible)");
    }
}
