//! Task model.
//!
//! A task is either **fixed** (a per-block staffing headcount, e.g. the
//! checkout line) or **flexible** (a total amount of work, e.g. unloading
//! pallets, that any mix of blocks and workers may complete).
//!
//! # Effort Units
//! One effort unit is what a worker with `base_speed = 1.0` and no fatigue
//! completes in one block.

use serde::{Deserialize, Serialize};

use super::time::{MINUTES_PER_BLOCK, TOTAL_BLOCKS};
use super::{Employee, Shift};

/// What a task needs in order to be done.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Workload {
    /// Total work target, consumed at each worker's effective speed.
    Flexible { effort_required: f64 },
    /// Headcount per block. Blocks past the end of the curve need nobody.
    Fixed { demand_curve: Vec<u32> },
}

/// A task to be staffed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique task identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Scheduling priority (1 = highest).
    pub priority: u32,
    /// Skill a worker must hold. `None` = anyone may work it.
    pub skill_needed: Option<String>,
    /// Fixed demand or flexible effort.
    pub workload: Workload,
    /// At most one worker per block (flexible tasks only; fixed tasks
    /// are governed by their demand curve).
    pub single_worker: bool,
}

impl Task {
    fn new(id: impl Into<String>, workload: Workload) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            priority: 1,
            skill_needed: None,
            workload,
            single_worker: false,
        }
    }

    /// Creates a flexible task with a total effort target.
    pub fn flexible(id: impl Into<String>, effort_required: f64) -> Self {
        Self::new(id, Workload::Flexible { effort_required })
    }

    /// Creates a fixed task with a per-block demand curve.
    pub fn fixed(id: impl Into<String>, demand_curve: Vec<u32>) -> Self {
        Self::new(id, Workload::Fixed { demand_curve })
    }

    /// Sets the task name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the priority (1 = highest).
    pub fn with_priority(mut self, priority: u32) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the required skill.
    pub fn with_skill(mut self, skill: impl Into<String>) -> Self {
        self.skill_needed = Some(skill.into());
        self
    }

    /// Restricts the task to one worker per block.
    pub fn with_single_worker(mut self, single_worker: bool) -> Self {
        self.single_worker = single_worker;
        self
    }

    /// Whether the task carries a demand curve.
    #[inline]
    pub fn is_fixed(&self) -> bool {
        matches!(self.workload, Workload::Fixed { .. })
    }

    /// Effort target for flexible tasks.
    pub fn effort_required(&self) -> Option<f64> {
        match self.workload {
            Workload::Flexible { effort_required } => Some(effort_required),
            Workload::Fixed { .. } => None,
        }
    }

    /// Required headcount at `block`. Zero for flexible tasks and past the curve.
    pub fn demand_at(&self, block: usize) -> u32 {
        match &self.workload {
            Workload::Fixed { demand_curve } => demand_curve.get(block).copied().unwrap_or(0),
            Workload::Flexible { .. } => 0,
        }
    }

    /// Total person-blocks a fixed task needs.
    pub fn total_demand(&self) -> u32 {
        match &self.workload {
            Workload::Fixed { demand_curve } => demand_curve.iter().sum(),
            Workload::Flexible { .. } => 0,
        }
    }

    /// Whether `employee` holds the skill this task needs.
    pub fn is_eligible(&self, employee: &Employee) -> bool {
        self.skill_needed
            .as_deref()
            .map_or(true, |skill| employee.has_skill(skill))
    }
}

/// Builds a full-day demand curve from staffed windows.
///
/// Later windows overwrite earlier ones where they overlap.
pub fn demand_curve_from_windows(windows: &[(Shift, u32)]) -> Vec<u32> {
    let mut curve = vec![0; TOTAL_BLOCKS];
    for (window, headcount) in windows {
        for block in window.blocks().filter(|b| *b < TOTAL_BLOCKS) {
            curve[block] = *headcount;
        }
    }
    curve
}

/// Converts a volume of work into effort units.
///
/// `units × minutes_per_unit` minutes of work, one effort unit per block.
pub fn effort_from_load(units: f64, minutes_per_unit: f64) -> f64 {
    units * minutes_per_unit / MINUTES_PER_BLOCK as f64
}
