//! Behavioral schedule metrics.
//!
//! Replays a [`ScheduleGrid`] block by block for every employee and
//! accumulates cost and task progress. The replay is path dependent: two
//! grids with the same per-task block counts can score differently
//! because fatigue and switch costs depend on the order of assignments.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Total cost | Sum of all employee costs |
//! | Employee cost | Idle + switch + preference costs for one employee |
//! | Task progress | Effort delivered, at fatigue-adjusted speed |
//! | Employee stats | Worked, idle, and switch counts |

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::sweep::{step, SweepState};
use crate::models::time::describe_block;
use crate::models::{Cell, Employee, ScheduleGrid, Task, TOTAL_BLOCKS};

/// Per-employee activity counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeStats {
    /// On-shift blocks with a task.
    pub worked_blocks: usize,
    /// On-shift blocks without a task.
    pub idle_blocks: usize,
    /// Switch costs charged.
    pub switches: usize,
}

/// Result of replaying a schedule.
///
/// Every known task and employee has an entry, zero if untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleMetrics {
    /// Sum of all costs.
    pub total_cost: f64,
    /// Effort delivered per task ID.
    pub task_progress: BTreeMap<String, f64>,
    /// Cost accumulated per employee ID.
    pub employee_costs: BTreeMap<String, f64>,
    /// Activity counters per employee ID.
    pub employee_stats: BTreeMap<String, EmployeeStats>,
    /// Anomalies found while replaying, in sweep order.
    pub warnings: Vec<String>,
}

impl ScheduleMetrics {
    /// Replays `grid` for `employees`, crediting progress to `tasks`.
    ///
    /// # Algorithm
    /// For each employee, fold [`step`] over blocks `0..TOTAL_BLOCKS` in order.
    /// Assignments found at off-shift blocks are ignored with a warning;
    /// assignments to unknown task IDs are charged but credit no progress.
    pub fn calculate(grid: &ScheduleGrid, employees: &[Employee], tasks: &[Task]) -> Self {
        let mut metrics = Self {
            task_progress: tasks.iter().map(|t| (t.id.clone(), 0.0)).collect(),
            employee_costs: employees.iter().map(|e| (e.id.clone(), 0.0)).collect(),
            employee_stats: employees
                .iter()
                .map(|e| (e.id.clone(), EmployeeStats::default()))
                .collect(),
            ..Self::default()
        };

        for employee in employees {
            metrics.sweep_employee(grid, employee);
        }

        debug!(
            total_cost = metrics.total_cost,
            employees = employees.len(),
            tasks = tasks.len(),
            warnings = metrics.warnings.len(),
            "schedule metrics calculated"
        );
        metrics
    }

    fn sweep_employee(&mut self, grid: &ScheduleGrid, employee: &Employee) {
        let mut state = SweepState::default();
        let mut cost = 0.0;
        let mut stats = EmployeeStats::default();

        for block in 0..TOTAL_BLOCKS {
            let on_shift = employee.is_available(block);
            let assigned = grid.task_at(&employee.id, block);
            let cell = match (on_shift, assigned) {
                (false, Some(task_id)) => {
                    self.warnings.push(format!(
                        "{} is assigned to {} at {} while off shift; ignored",
                        employee.id,
                        task_id,
                        describe_block(block)
                    ));
                    Cell::OffShift
                }
                (false, None) => Cell::OffShift,
                (true, Some(task_id)) => Cell::Working(task_id),
                (true, None) => Cell::Idle,
            };

            let (next, outcome) = step(state, employee, cell);
            state = next;

            if let Some(task_id) = outcome.task {
                stats.worked_blocks += 1;
                match self.task_progress.get_mut(task_id) {
                    Some(progress) => *progress += outcome.progress,
                    None => self.warnings.push(format!(
                        "{} works unknown task {} at {}; no progress recorded",
                        employee.id,
                        task_id,
                        describe_block(block)
                    )),
                }
            }
            if outcome.idle {
                stats.idle_blocks += 1;
            }
            if outcome.switched {
                stats.switches += 1;
            }
            cost += outcome.cost;
            self.total_cost += outcome.cost;
        }

        *self.employee_costs.entry(employee.id.clone()).or_insert(0.0) += cost;
        *self.employee_stats.entry(employee.id.clone()).or_default() = stats;
    }

    /// Effort delivered to `task_id` (0.0 if unknown).
    pub fn progress(&self, task_id: &str) -> f64 {
        self.task_progress.get(task_id).copied().unwrap_or(0.0)
    }

    /// Cost accumulated by `employee_id` (0.0 if unknown).
    pub fn employee_cost(&self, employee_id: &str) -> f64 {
        self.employee_costs.get(employee_id).copied().unwrap_or(0.0)
    }
}

/// Replays `grid` and returns fresh metrics. See [`ScheduleMetrics::calculate`].
pub fn calculate_metrics(
    grid: &ScheduleGrid,
    employees: &[Employee],
    tasks: &[Task],
) -> ScheduleMetrics {
    ScheduleMetrics::calculate(grid, employees, tasks)
}
