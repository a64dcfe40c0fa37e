//! CP-based shift formulation.
//!
//! Encodes the staffing problem as a 0/1 linear model over
//! `x[employee, task, block]` ("employee works task at block"), hands it
//! to any [`CpSolver`], and decodes the answer into a [`ScheduleGrid`].
//!
//! # Hard Constraints
//!
//! | Family | Form |
//! |--------|------|
//! | Skill eligibility | `x[e,t,s] = 0` for every `s` if `e` lacks `t`'s skill |
//! | Availability | `x[e,t,s] = 0` at every off-shift `s` |
//! | Employee exclusivity | `Σ_t x[e,t,s] ≤ 1` |
//! | Fixed demand | `Σ_e x[e,t,s] = demand_curve[s]` (0 past the curve) |
//! | Flexible effort | `Σ_e Σ_s x[e,t,s] = round(effort_required)` |
//! | Single worker | `Σ_e x[e,t,s] ≤ 1` for flagged flexible tasks |
//!
//! # Objective (minimize)
//!
//! - Preference: `preference_penalty` per block outside a non-empty ideal set.
//! - Continuity: one segment-start variable per on-shift `(e,t,s ≥ 1)` with
//!   `start ≥ x[s] − x[s−1]`, weighted `round(switch_cost × switch_cost_scale)`.
//! - Earliness (flexible only): `s × earliness_weight × 12 / priority`.
//!
//! The model assumes one effort unit per block. Speed and fatigue are
//! scored afterwards by [`crate::scoring`], which is the figure to report;
//! the solver objective is only a search guide.
//!
//! # Reference
//! - Ernst et al. (2004), "Staff scheduling and rostering: A review of
//!   applications, methods and models"
//! - Van den Bergh et al. (2013), "Personnel scheduling: A literature review"

mod model;
#[cfg(test)]
mod search;
mod solver;

pub use model::{BoolVar, CpModel, LinearConstraint, Relation, VarId};
pub use solver::{CpSolution, CpSolver, SolverConfig, SolverStatus};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::error::{FormulationError, NoSolutionError, PlannerError};
use crate::models::{Employee, ScheduleGrid, Task, Workload, TOTAL_BLOCKS};
use crate::scoring::{calculate_metrics, ScheduleMetrics};
use crate::validation::validate_input;

/// Numerator of the earliness term. Divisible by priorities 1 to 4.
const EARLINESS_SCALE: i64 = 12;

/// Upper bound on each objective weight and on every scaled switch cost.
pub const MAX_WEIGHT: i64 = 1_000_000;

/// Integer weights of the objective terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectiveWeights {
    /// Per block on a task outside the employee's ideal set.
    pub preference_penalty: i64,
    /// Multiplier turning `Employee::switch_cost` into an integer weight.
    pub switch_cost_scale: f64,
    /// Per block index on flexible tasks, divided by priority.
    pub earliness_weight: i64,
}

impl Default for ObjectiveWeights {
    fn default() -> Self {
        Self {
            preference_penalty: 5,
            switch_cost_scale: 100.0,
            earliness_weight: 1,
        }
    }
}

impl ObjectiveWeights {
    /// Checks that every weight lies in `[0, MAX_WEIGHT]`.
    ///
    /// # Errors
    /// `FormulationError::InvalidWeights` naming the first bad field.
    pub fn validate(&self) -> Result<(), FormulationError> {
        let in_range = |v: i64| (0..=MAX_WEIGHT).contains(&v);
        if !in_range(self.preference_penalty) {
            return Err(FormulationError::InvalidWeights(format!(
                "preference_penalty must be in 0..={MAX_WEIGHT}, got {}",
                self.preference_penalty
            )));
        }
        if !(self.switch_cost_scale.is_finite()
            && (0.0..=MAX_WEIGHT as f64).contains(&self.switch_cost_scale))
        {
            return Err(FormulationError::InvalidWeights(format!(
                "switch_cost_scale must be finite and in 0..={MAX_WEIGHT}, got {}",
                self.switch_cost_scale
            )));
        }
        if !in_range(self.earliness_weight) {
            return Err(FormulationError::InvalidWeights(format!(
                "earliness_weight must be in 0..={MAX_WEIGHT}, got {}",
                self.earliness_weight
            )));
        }
        Ok(())
    }
}

/// Builds a CP model from employees and tasks.
///
/// # Example
/// ```
/// use shift_planner::cp::{CpModel, CpSolution, ScheduleCpBuilder, SolverConfig, SolverStatus};
/// use shift_planner::models::{Employee, Shift, Task};
///
/// let employees = vec![Employee::new("E1").with_shift(Shift::new(0, 4).unwrap())];
/// let tasks = vec![Task::fixed("CASH", vec![1, 1, 1, 1])];
///
/// // Any solver works; this one staffs every free variable.
/// let solver = |model: &CpModel, _: &SolverConfig| {
///     let values = (0..model.variable_count()).map(|i| i < 4).collect();
///     CpSolution::found(SolverStatus::Feasible, values, None)
/// };
///
/// let outcome = ScheduleCpBuilder::new(&employees, &tasks)
///     .solve(&solver, &SolverConfig::default())
///     .unwrap();
/// assert_eq!(outcome.grid.task_at("E1", 3), Some("CASH"));
/// ```
pub struct ScheduleCpBuilder<'a> {
    employees: &'a [Employee],
    tasks: &'a [Task],
    weights: ObjectiveWeights,
}

impl<'a> ScheduleCpBuilder<'a> {
    /// Creates a new CP builder with default weights.
    pub fn new(employees: &'a [Employee], tasks: &'a [Task]) -> Self {
        Self {
            employees,
            tasks,
            weights: ObjectiveWeights::default(),
        }
    }

    /// Sets the objective weights.
    pub fn with_weights(mut self, weights: ObjectiveWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Validates the input and builds the model.
    ///
    /// Creates, in order:
    /// - One assignment variable per `(employee, task, block)`
    /// - Skill and availability fixings
    /// - Exclusivity and demand constraints
    /// - Objective terms and segment-start variables
    ///
    /// # Errors
    /// - `FormulationError::InvalidWeights` if the weights fail [`ObjectiveWeights::validate`]
    /// - `FormulationError::InvalidInput` with every problem `validate_input` found
    pub fn build(&self) -> Result<ScheduleFormulation, FormulationError> {
        self.weights.validate()?;
        validate_input(self.employees, self.tasks).map_err(FormulationError::InvalidInput)?;

        let mut model = CpModel::new("shift_planning");
        for e in self.employees {
            for t in self.tasks {
                for s in 0..TOTAL_BLOCKS {
                    model.new_bool_var(format!("x[{},{},{}]", e.id, t.id, s));
                }
            }
        }

        let mut formulation = ScheduleFormulation {
            model,
            employee_ids: self.employees.iter().map(|e| e.id.clone()).collect(),
            task_ids: self.tasks.iter().map(|t| t.id.clone()).collect(),
        };

        self.add_eligibility(&mut formulation);
        self.add_exclusivity(&mut formulation);
        self.add_demand(&mut formulation);
        self.add_objective(&mut formulation);

        info!(
            employees = self.employees.len(),
            tasks = self.tasks.len(),
            variables = formulation.model.variable_count(),
            constraints = formulation.model.constraint_count(),
            objective_terms = formulation.model.objective().len(),
            "built shift model"
        );
        Ok(formulation)
    }

    /// Builds, solves, and decodes.
    ///
    /// `Optimal` and `Feasible` go through the same decode path; the status
    /// is kept on the outcome.
    ///
    /// # Errors
    /// - `PlannerError::Formulation` for bad input or a malformed solution
    /// - `PlannerError::NoSolution` if the solver is infeasible or timed out
    pub fn solve<S: CpSolver + ?Sized>(
        &self,
        solver: &S,
        config: &SolverConfig,
    ) -> Result<SolveOutcome, PlannerError> {
        let formulation = self.build()?;
        let solution = solver.solve(formulation.model(), config);
        info!(
            status = %solution.status,
            objective = ?solution.objective_value,
            "solver finished"
        );

        let grid = formulation.decode(&solution)?;
        Ok(SolveOutcome {
            grid,
            status: solution.status,
            objective_value: solution.objective_value,
        })
    }

    fn add_eligibility(&self, f: &mut ScheduleFormulation) {
        let mut fixed = 0usize;
        for (ei, e) in self.employees.iter().enumerate() {
            for (ti, t) in self.tasks.iter().enumerate() {
                let eligible = t.is_eligible(e);
                for s in 0..TOTAL_BLOCKS {
                    let var = f.var(ei, ti, s);
                    if !eligible {
                        f.model
                            .add_fixed(format!("skill[{},{},{}]", e.id, t.id, s), var, false);
                    } else if !e.is_available(s) {
                        f.model
                            .add_fixed(format!("off_shift[{},{},{}]", e.id, t.id, s), var, false);
                    } else {
                        continue;
                    }
                    fixed += 1;
                }
            }
        }
        debug!(fixed, "skill and availability fixings");
    }

    fn add_exclusivity(&self, f: &mut ScheduleFormulation) {
        for (ei, e) in self.employees.iter().enumerate() {
            for s in 0..TOTAL_BLOCKS {
                let vars = f.tasks_of(ei, s);
                f.model
                    .add_sum_le(format!("one_task[{},{}]", e.id, s), &vars, 1);
            }
        }
        debug!(
            count = self.employees.len() * TOTAL_BLOCKS,
            "employee exclusivity constraints"
        );
    }

    fn add_demand(&self, f: &mut ScheduleFormulation) {
        for (ti, t) in self.tasks.iter().enumerate() {
            match &t.workload {
                Workload::Fixed { .. } => {
                    for s in 0..TOTAL_BLOCKS {
                        let vars = f.workers_on(ti, s);
                        f.model.add_sum_eq(
                            format!("demand[{},{}]", t.id, s),
                            &vars,
                            i64::from(t.demand_at(s)),
                        );
                    }
                }
                Workload::Flexible { effort_required } => {
                    // One effort unit per block; speed is scored later.
                    let blocks = effort_required.round() as i64;
                    let vars: Vec<VarId> = (0..TOTAL_BLOCKS).flat_map(|s| f.workers_on(ti, s)).collect();
                    f.model.add_sum_eq(format!("effort[{}]", t.id), &vars, blocks);

                    if t.single_worker {
                        for s in 0..TOTAL_BLOCKS {
                            let vars = f.workers_on(ti, s);
                            f.model
                                .add_sum_le(format!("single_worker[{},{}]", t.id, s), &vars, 1);
                        }
                    }
                    debug!(task = %t.id, blocks, single_worker = t.single_worker, "effort target");
                }
            }
        }
    }

    fn add_objective(&self, f: &mut ScheduleFormulation) {
        let w = &self.weights;
        let mut starts = 0usize;

        for (ei, e) in self.employees.iter().enumerate() {
            let switch_weight = (e.switch_cost * w.switch_cost_scale)
                .round()
                .min(MAX_WEIGHT as f64) as i64;

            for (ti, t) in self.tasks.iter().enumerate() {
                if !t.is_eligible(e) {
                    continue;
                }
                for s in (0..TOTAL_BLOCKS).filter(|&s| e.is_available(s)) {
                    let var = f.var(ei, ti, s);

                    let mut weight = 0;
                    if !e.prefers(&t.id) {
                        weight += w.preference_penalty;
                    }
                    if !t.is_fixed() {
                        weight +=
                            s as i64 * w.earliness_weight * EARLINESS_SCALE / i64::from(t.priority);
                    }
                    f.model.add_objective_term(var, weight);

                    if switch_weight > 0 && s >= 1 {
                        let start = f
                            .model
                            .new_bool_var(format!("start[{},{},{}]", e.id, t.id, s));
                        // start - x[s] + x[s-1] >= 0
                        f.model.add_linear(
                            format!("segment_start[{},{},{}]", e.id, t.id, s),
                            vec![(start, 1), (var, -1), (f.var(ei, ti, s - 1), 1)],
                            Relation::Ge,
                            0,
                        );
                        f.model.add_objective_term(start, switch_weight);
                        starts += 1;
                    }
                }
            }
        }
        debug!(starts, "segment-start variables");
    }
}

/// A built model plus what is needed to read its solutions.
#[derive(Debug, Clone)]
pub struct ScheduleFormulation {
    model: CpModel,
    employee_ids: Vec<String>,
    task_ids: Vec<String>,
}

impl ScheduleFormulation {
    /// The problem description to hand to a solver.
    pub fn model(&self) -> &CpModel {
        &self.model
    }

    /// Variable for "employee `e` works task `t` at `block`" (input order indices).
    ///
    /// Returns `None` if any index is out of range.
    pub fn assign_var(&self, employee: usize, task: usize, block: usize) -> Option<VarId> {
        (employee < self.employee_ids.len() && task < self.task_ids.len() && block < TOTAL_BLOCKS)
            .then(|| self.var(employee, task, block))
    }

    fn var(&self, e: usize, t: usize, s: usize) -> VarId {
        VarId((e * self.task_ids.len() + t) * TOTAL_BLOCKS + s)
    }

    fn tasks_of(&self, e: usize, s: usize) -> Vec<VarId> {
        (0..self.task_ids.len()).map(|t| self.var(e, t, s)).collect()
    }

    fn workers_on(&self, t: usize, s: usize) -> Vec<VarId> {
        (0..self.employee_ids.len()).map(|e| self.var(e, t, s)).collect()
    }

    /// Reads a solver assignment back into a grid.
    ///
    /// Grid invariants are not re-checked; the model's constraints
    /// already enforce them.
    ///
    /// # Errors
    /// - `NoSolution` if the solution carries no assignment
    /// - `Formulation(SolutionShape)` if the value count does not match
    pub fn decode(&self, solution: &CpSolution) -> Result<ScheduleGrid, PlannerError> {
        if !solution.is_solution_found() {
            return Err(NoSolutionError {
                status: solution.status,
            }
            .into());
        }
        if solution.values.len() != self.model.variable_count() {
            return Err(FormulationError::SolutionShape {
                expected: self.model.variable_count(),
                actual: solution.values.len(),
            }
            .into());
        }

        let mut blocks = vec![BTreeMap::new(); TOTAL_BLOCKS];
        for (ei, employee_id) in self.employee_ids.iter().enumerate() {
            for (ti, task_id) in self.task_ids.iter().enumerate() {
                for (s, slot) in blocks.iter_mut().enumerate() {
                    if solution.value(self.var(ei, ti, s)) {
                        trace!(block = s, employee = %employee_id, task = %task_id, "decoded");
                        slot.insert(employee_id.clone(), task_id.clone());
                    }
                }
            }
        }

        Ok(ScheduleGrid::from_blocks(blocks)?)
    }
}

/// A decoded schedule and the solver's verdict.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveOutcome {
    /// Decoded assignments.
    pub grid: ScheduleGrid,
    /// `Optimal` or `Feasible`.
    pub status: SolverStatus,
    /// Solver-side objective; not comparable to metric costs.
    pub objective_value: Option<i64>,
}

impl SolveOutcome {
    /// Scores the decoded grid. This is the authoritative cost.
    pub fn evaluate(&self, employees: &[Employee], tasks: &[Task]) -> ScheduleMetrics {
        let metrics = calculate_metrics(&self.grid, employees, tasks);
        debug!(
            total_cost = metrics.total_cost,
            solver_objective = ?self.objective_value,
            "re-scored solver schedule"
        );
        metrics
    }
}
