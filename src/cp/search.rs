//! Depth-first 0/1 search with bounds propagation.
//!
//! Small enough to drive formulation tests end to end: propagate every
//! linear constraint to a fixpoint, branch on the lowest unfixed variable
//! (`false` first), backtrack on conflict. Returns the first feasible
//! assignment; it does not optimize.

use std::time::Instant;

use super::model::{CpModel, LinearConstraint, Relation};
use super::solver::{CpSolution, CpSolver, SolverConfig, SolverStatus};

/// Propagating depth-first search over boolean variables.
#[derive(Debug, Clone)]
pub(crate) struct PropagatingSearch {
    node_limit: usize,
}

impl Default for PropagatingSearch {
    fn default() -> Self {
        Self { node_limit: 100_000 }
    }
}

enum Outcome {
    Found(Vec<bool>),
    Exhausted,
    OutOfBudget,
}

struct Budget {
    nodes: usize,
    node_limit: usize,
    deadline: Option<Instant>,
}

impl Budget {
    fn spend(&mut self) -> bool {
        self.nodes += 1;
        self.nodes <= self.node_limit && self.deadline.map_or(true, |d| Instant::now() < d)
    }
}

impl PropagatingSearch {
    /// Caps the number of search nodes.
    pub(crate) fn with_node_limit(mut self, node_limit: usize) -> Self {
        self.node_limit = node_limit;
        self
    }

    fn dfs(&self, model: &CpModel, mut domains: Vec<Option<bool>>, budget: &mut Budget) -> Outcome {
        if !budget.spend() {
            return Outcome::OutOfBudget;
        }
        if !propagate(model, &mut domains) {
            return Outcome::Exhausted;
        }
        let Some(var) = domains.iter().position(Option::is_none) else {
            return Outcome::Found(domains.into_iter().map(|d| d == Some(true)).collect());
        };

        for value in [false, true] {
            let mut child = domains.clone();
            child[var] = Some(value);
            match self.dfs(model, child, budget) {
                Outcome::Exhausted => continue,
                other => return other,
            }
        }
        Outcome::Exhausted
    }
}

impl CpSolver for PropagatingSearch {
    fn solve(&self, model: &CpModel, config: &SolverConfig) -> CpSolution {
        let mut budget = Budget {
            nodes: 0,
            node_limit: self.node_limit,
            deadline: config.time_limit().map(|limit| Instant::now() + limit),
        };
        match self.dfs(model, vec![None; model.variable_count()], &mut budget) {
            Outcome::Found(values) => {
                let objective = model.objective_value(&values);
                CpSolution::found(SolverStatus::Feasible, values, Some(objective))
            }
            Outcome::Exhausted => CpSolution::without_solution(SolverStatus::Infeasible),
            Outcome::OutOfBudget => CpSolution::without_solution(SolverStatus::TimeoutNoSolution),
        }
    }
}

/// Tightens domains until nothing changes. `false` on conflict.
fn propagate(model: &CpModel, domains: &mut [Option<bool>]) -> bool {
    loop {
        let mut changed = false;
        for constraint in model.constraints() {
            match tighten(constraint, domains) {
                Some(c) => changed |= c,
                None => return false,
            }
        }
        if !changed {
            return true;
        }
    }
}

/// One bounds pass over a constraint. `None` on conflict, else whether a
/// domain was fixed.
fn tighten(constraint: &LinearConstraint, domains: &mut [Option<bool>]) -> Option<bool> {
    let (mut lo, mut hi) = (0i64, 0i64);
    for &(var, coef) in &constraint.terms {
        match domains[var.0] {
            Some(true) => {
                lo += coef;
                hi += coef;
            }
            Some(false) => {}
            None if coef < 0 => lo += coef,
            None => hi += coef,
        }
    }

    let upper = matches!(constraint.relation, Relation::Le | Relation::Eq);
    let lower = matches!(constraint.relation, Relation::Ge | Relation::Eq);
    if (upper && lo > constraint.rhs) || (lower && hi < constraint.rhs) {
        return None;
    }

    // Stale bounds after a fix only miss deductions; the fixpoint loop
    // picks them up.
    let mut changed = false;
    for &(var, coef) in &constraint.terms {
        if domains[var.0].is_some() || coef == 0 {
            continue;
        }
        let forced = if upper && lo + coef.abs() > constraint.rhs {
            Some(coef < 0)
        } else if lower && hi - coef.abs() < constraint.rhs {
            Some(coef > 0)
        } else {
            None
        };
        if forced.is_some() {
            domains[var.0] = forced;
            changed = true;
        }
    }
    Some(changed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finds_feasible_assignment() {
        let mut m = CpModel::new("toy");
        let a = m.new_bool_var("a");
        let b = m.new_bool_var("b");
        let c = m.new_bool_var("c");
        m.add_sum_eq("two", &[a, b, c], 2);
        m.add_fixed("pin", a, false);

        let sol = PropagatingSearch::default().solve(&m, &SolverConfig::default());
        assert_eq!(sol.status, SolverStatus::Feasible);
        assert_eq!(sol.values, vec![false, true, true]);
        assert!(m.is_feasible(&sol.values));
    }

    #[test]
    fn test_proves_infeasible() {
        let mut m = CpModel::new("toy");
        let a = m.new_bool_var("a");
        let b = m.new_bool_var("b");
        m.add_sum_le("at_most_one", &[a, b], 1);
        m.add_sum_eq("both", &[a, b], 2);

        let sol = PropagatingSearch::default().solve(&m, &SolverConfig::default());
        assert_eq!(sol.status, SolverStatus::Infeasible);
        assert!(sol.values.is_empty());
    }

    #[test]
    fn test_negative_coefficients() {
        // start >= x1 - x0 with x1 pinned on and x0 off forces start.
        let mut m = CpModel::new("toy");
        let x0 = m.new_bool_var("x0");
        let x1 = m.new_bool_var("x1");
        let start = m.new_bool_var("start");
        m.add_linear("seg", vec![(start, 1), (x1, -1), (x0, 1)], Relation::Ge, 0);
        m.add_fixed("x0", x0, false);
        m.add_fixed("x1", x1, true);

        let sol = PropagatingSearch::default().solve(&m, &SolverConfig::default());
        assert!(sol.value(start));
    }

    #[test]
    fn test_node_limit() {
        let mut m = CpModel::new("toy");
        let vars: Vec<_> = (0..6).map(|i| m.new_bool_var(format!("v{i}"))).collect();
        m.add_sum_eq("three", &vars, 3);

        let sol = PropagatingSearch::default()
            .with_node_limit(1)
            .solve(&m, &SolverConfig::default());
        assert_eq!(sol.status, SolverStatus::TimeoutNoSolution);
    }
}
