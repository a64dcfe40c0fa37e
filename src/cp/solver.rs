//! Solver capability.
//!
//! The crate does not solve models itself. Any engine (CP-SAT, a MIP
//! solver, a local search, a test double) plugs in by implementing
//! [`CpSolver`]. Closures with the matching signature implement it too.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::model::{CpModel, VarId};

/// Outcome class reported by a solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolverStatus {
    /// Proven optimal assignment.
    Optimal,
    /// Feasible assignment, optimality not proven (e.g. time budget hit).
    Feasible,
    /// Proven that no assignment exists.
    Infeasible,
    /// Budget exhausted before any assignment was found.
    TimeoutNoSolution,
}

impl SolverStatus {
    /// Whether the status comes with an assignment.
    pub fn is_solution_found(self) -> bool {
        matches!(self, SolverStatus::Optimal | SolverStatus::Feasible)
    }
}

impl fmt::Display for SolverStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SolverStatus::Optimal => "optimal",
            SolverStatus::Feasible => "feasible",
            SolverStatus::Infeasible => "infeasible",
            SolverStatus::TimeoutNoSolution => "timeout_no_solution",
        };
        f.write_str(s)
    }
}

/// Search budget handed to the solver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Wall-clock limit in seconds. `None` = until proven.
    pub time_limit_seconds: Option<u64>,
    /// Parallel search workers.
    pub num_workers: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            time_limit_seconds: None,
            num_workers: 1,
        }
    }
}

impl SolverConfig {
    /// Sets the time limit.
    pub fn with_time_limit_seconds(mut self, seconds: u64) -> Self {
        self.time_limit_seconds = Some(seconds);
        self
    }

    /// Sets the worker count.
    pub fn with_workers(mut self, num_workers: usize) -> Self {
        self.num_workers = num_workers;
        self
    }

    /// Time limit as a duration.
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_seconds.map(Duration::from_secs)
    }
}

/// What a solver returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CpSolution {
    /// Outcome class.
    pub status: SolverStatus,
    /// One value per model variable when a solution was found, else empty.
    pub values: Vec<bool>,
    /// Solver-side objective value, if reported.
    pub objective_value: Option<i64>,
}

impl CpSolution {
    /// A solution with values.
    pub fn found(status: SolverStatus, values: Vec<bool>, objective_value: Option<i64>) -> Self {
        Self {
            status,
            values,
            objective_value,
        }
    }

    /// A solution-less outcome (`Infeasible` or `TimeoutNoSolution`).
    pub fn without_solution(status: SolverStatus) -> Self {
        Self {
            status,
            values: Vec::new(),
            objective_value: None,
        }
    }

    /// Whether values are available.
    pub fn is_solution_found(&self) -> bool {
        self.status.is_solution_found()
    }

    /// Value of `var` (false if absent).
    pub fn value(&self, var: VarId) -> bool {
        self.values.get(var.0).copied().unwrap_or(false)
    }
}

/// A 0/1 linear solver.
pub trait CpSolver {
    /// Solves `model` within the budget in `config`.
    fn solve(&self, model: &CpModel, config: &SolverConfig) -> CpSolution;
}

impl<F> CpSolver for F
where
    F: Fn(&CpModel, &SolverConfig) -> CpSolution,
{
    fn solve(&self, model: &CpModel, config: &SolverConfig) -> CpSolution {
        self(model, config)
    }
}
