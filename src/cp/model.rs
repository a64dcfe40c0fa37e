//! Declarative 0/1 problem description.
//!
//! A [`CpModel`] is what the formulation hands to a solver: boolean
//! variables, linear (in)equalities over them with integer coefficients,
//! and an integer-weighted linear objective to minimize. It carries no
//! solving logic and serializes cleanly for out-of-process engines.

use serde::{Deserialize, Serialize};

/// Index of a boolean decision variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VarId(pub usize);

/// A boolean decision variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoolVar {
    /// Descriptive name (for diagnostics and solver logs).
    pub name: String,
}

/// Comparison between a linear expression and its right-hand side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    /// `Σ ≤ rhs`
    Le,
    /// `Σ = rhs`
    Eq,
    /// `Σ ≥ rhs`
    Ge,
}

/// `Σ coef·var  (≤ | = | ≥)  rhs` over 0/1 variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinearConstraint {
    /// Constraint name (family and indices).
    pub name: String,
    /// `(variable, coefficient)` terms.
    pub terms: Vec<(VarId, i64)>,
    /// Comparison.
    pub relation: Relation,
    /// Right-hand side.
    pub rhs: i64,
}

impl LinearConstraint {
    /// Left-hand side value under a full assignment.
    pub fn activity(&self, values: &[bool]) -> i64 {
        self.terms
            .iter()
            .filter(|(v, _)| values.get(v.0).copied().unwrap_or(false))
            .map(|(_, coef)| coef)
            .sum()
    }

    /// Whether a full assignment satisfies this constraint.
    pub fn is_satisfied(&self, values: &[bool]) -> bool {
        let lhs = self.activity(values);
        match self.relation {
            Relation::Le => lhs <= self.rhs,
            Relation::Eq => lhs == self.rhs,
            Relation::Ge => lhs >= self.rhs,
        }
    }
}

/// A 0/1 linear minimization problem.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CpModel {
    /// Model name.
    pub name: String,
    variables: Vec<BoolVar>,
    constraints: Vec<LinearConstraint>,
    objective: Vec<(VarId, i64)>,
}

impl CpModel {
    /// Creates an empty model.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Adds a boolean variable.
    pub fn new_bool_var(&mut self, name: impl Into<String>) -> VarId {
        self.variables.push(BoolVar { name: name.into() });
        VarId(self.variables.len() - 1)
    }

    /// Adds a linear constraint.
    pub fn add_linear(
        &mut self,
        name: impl Into<String>,
        terms: Vec<(VarId, i64)>,
        relation: Relation,
        rhs: i64,
    ) {
        self.constraints.push(LinearConstraint {
            name: name.into(),
            terms,
            relation,
            rhs,
        });
    }

    /// Adds `Σ vars ≤ rhs`.
    pub fn add_sum_le(&mut self, name: impl Into<String>, vars: &[VarId], rhs: i64) {
        self.add_linear(name, unit_terms(vars), Relation::Le, rhs);
    }

    /// Adds `Σ vars = rhs`.
    pub fn add_sum_eq(&mut self, name: impl Into<String>, vars: &[VarId], rhs: i64) {
        self.add_linear(name, unit_terms(vars), Relation::Eq, rhs);
    }

    /// Pins a variable to a value.
    pub fn add_fixed(&mut self, name: impl Into<String>, var: VarId, value: bool) {
        self.add_linear(name, vec![(var, 1)], Relation::Eq, i64::from(value));
    }

    /// Adds `weight·var` to the objective. Zero weights are dropped.
    pub fn add_objective_term(&mut self, var: VarId, weight: i64) {
        if weight != 0 {
            self.objective.push((var, weight));
        }
    }

    /// Number of variables.
    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    /// Number of constraints.
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// Variables, indexed by [`VarId`].
    pub fn variables(&self) -> &[BoolVar] {
        &self.variables
    }

    /// Constraints in insertion order.
    pub fn constraints(&self) -> &[LinearConstraint] {
        &self.constraints
    }

    /// Objective terms to minimize.
    pub fn objective(&self) -> &[(VarId, i64)] {
        &self.objective
    }

    /// Total objective weight on `var`.
    pub fn objective_weight(&self, var: VarId) -> i64 {
        self.objective
            .iter()
            .filter(|(v, _)| *v == var)
            .map(|(_, w)| w)
            .sum()
    }

    /// Objective value under a full assignment.
    pub fn objective_value(&self, values: &[bool]) -> i64 {
        self.objective
            .iter()
            .filter(|(v, _)| values.get(v.0).copied().unwrap_or(false))
            .map(|(_, w)| w)
            .sum()
    }

    /// Constraints a full assignment violates.
    pub fn violated_constraints<'a>(
        &'a self,
        values: &'a [bool],
    ) -> impl Iterator<Item = &'a LinearConstraint> + 'a {
        self.constraints.iter().filter(move |c| !c.is_satisfied(values))
    }

    /// Whether `values` assigns every variable and satisfies every constraint.
    pub fn is_feasible(&self, values: &[bool]) -> bool {
        values.len() == self.variables.len() && self.violated_constraints(values).next().is_none()
    }
}

fn unit_terms(vars: &[VarId]) -> Vec<(VarId, i64)> {
    vars.iter().map(|v| (*v, 1)).collect()
}
