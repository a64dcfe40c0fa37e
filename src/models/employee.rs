//! Employee model.
//!
//! An employee is a worker with one or more shifts and a small set of
//! behavioral parameters that drive the cost simulation: how fast they
//! work, how quickly they tire, and how much a task change costs them.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::Shift;

/// A worker available for assignment.
///
/// Constructed once per scheduling run and treated as immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique employee identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Availability windows. Overlap is allowed and harmless.
    pub shifts: Vec<Shift>,
    /// Work rate multiplier (1.0 = one effort unit per block).
    pub base_speed: f64,
    /// Fractional speed loss per consecutive worked block.
    pub fatigue_rate: f64,
    /// Cost charged each time the employee changes task.
    pub switch_cost: f64,
    /// Skills held.
    pub skills: BTreeSet<String>,
    /// Preferred task IDs. Empty = no preference, never penalized.
    pub ideal_tasks: BTreeSet<String>,
}

/// Behavioral presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkProfile {
    /// Fast and comfortable hopping between tasks.
    Sprinter,
    /// Normal pace, dislikes interruptions.
    Steady,
}

impl WorkProfile {
    /// `(base_speed, switch_cost)` for this profile.
    pub fn parameters(self) -> (f64, f64) {
        match self {
            WorkProfile::Sprinter => (1.1, 0.5),
            WorkProfile::Steady => (1.0, 2.0),
        }
    }
}

impl Employee {
    /// Creates an employee with neutral parameters and no shifts.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            shifts: Vec::new(),
            base_speed: 1.0,
            fatigue_rate: 0.0,
            switch_cost: 0.0,
            skills: BTreeSet::new(),
            ideal_tasks: BTreeSet::new(),
        }
    }

    /// Sets the employee name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds a shift.
    pub fn with_shift(mut self, shift: Shift) -> Self {
        self.shifts.push(shift);
        self
    }

    /// Sets the base speed.
    pub fn with_base_speed(mut self, base_speed: f64) -> Self {
        self.base_speed = base_speed;
        self
    }

    /// Sets the fatigue rate.
    pub fn with_fatigue_rate(mut self, fatigue_rate: f64) -> Self {
        self.fatigue_rate = fatigue_rate;
        self
    }

    /// Sets the task switch cost.
    pub fn with_switch_cost(mut self, switch_cost: f64) -> Self {
        self.switch_cost = switch_cost;
        self
    }

    /// Adds a skill.
    pub fn with_skill(mut self, skill: impl Into<String>) -> Self {
        self.skills.insert(skill.into());
        self
    }

    /// Adds a preferred task.
    pub fn with_ideal_task(mut self, task_id: impl Into<String>) -> Self {
        self.ideal_tasks.insert(task_id.into());
        self
    }

    /// Applies a behavioral preset (speed and switch cost).
    pub fn with_profile(mut self, profile: WorkProfile) -> Self {
        let (base_speed, switch_cost) = profile.parameters();
        self.base_speed = base_speed;
        self.switch_cost = switch_cost;
        self
    }

    /// Whether any shift covers `block`.
    pub fn is_available(&self, block: usize) -> bool {
        self.shifts.iter().any(|s| s.contains(block))
    }

    /// Whether the employee holds `skill`.
    pub fn has_skill(&self, skill: &str) -> bool {
        self.skills.contains(skill)
    }

    /// Whether working `task_id` carries no preference penalty.
    pub fn prefers(&self, task_id: &str) -> bool {
        self.ideal_tasks.is_empty() || self.ideal_tasks.contains(task_id)
    }

    /// Blocks covered by at least one shift, ascending, without duplicates.
    pub fn available_blocks(&self) -> Vec<usize> {
        let set: BTreeSet<usize> = self.shifts.iter().flat_map(|s| s.blocks()).collect();
        set.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split_shift_employee() -> Employee {
        Employee::new("E1")
            .with_name("Ana")
            .with_shift(Shift::new(8, 24).unwrap())
            .with_shift(Shift::new(28, 44).unwrap())
    }

    #[test]
    fn test_employee_builder() {
        let e = split_shift_employee()
            .with_base_speed(1.2)
            .with_fatigue_rate(0.01)
            .with_switch_cost(0.5)
            .with_skill("cashier")
            .with_ideal_task("T1");

        assert_eq!(e.id, "E1");
        assert_eq!(e.name, "Ana");
        assert_eq!(e.shifts.len(), 2);
        assert!((e.base_speed - 1.2).abs() < 1e-10);
        assert!((e.fatigue_rate - 0.01).abs() < 1e-10);
        assert!((e.switch_cost - 0.5).abs() < 1e-10);
        assert!(e.has_skill("cashier"));
        assert!(!e.has_skill("butcher"));
    }

    #[test]
    fn test_availability_split_shift() {
        let e = split_shift_employee();
        assert!(!e.is_available(7));
        assert!(e.is_available(8));
        assert!(!e.is_available(24));
        assert!(e.is_available(30));
        assert_eq!(e.available_blocks().len(), 32);
    }

    #[test]
    fn test_overlapping_shifts_harmless() {
        let e = Employee::new("E1")
            .with_shift(Shift::new(0, 10).unwrap())
            .with_shift(Shift::new(5, 12).unwrap());
        assert!(e.is_available(9));
        assert_eq!(e.available_blocks(), (0..12).collect::<Vec<_>>());
    }

    #[test]
    fn test_prefers() {
        let open = Employee::new("E1");
        assert!(open.prefers("anything"));

        let picky = Employee::new("E2").with_ideal_task("T_HARD");
        assert!(picky.prefers("T_HARD"));
        assert!(!picky.prefers("T_EASY"));
    }

    #[test]
    fn test_profiles() {
        let s = Employee::new("E1").with_profile(WorkProfile::Sprinter);
        assert!((s.base_speed - 1.1).abs() < 1e-10);
        assert!((s.switch_cost - 0.5).abs() < 1e-10);

        let c = Employee::new("E2").with_profile(WorkProfile::Steady);
        assert!((c.base_speed - 1.0).abs() < 1e-10);
        assert!((c.switch_cost - 2.0).abs() < 1e-10);
    }
}
