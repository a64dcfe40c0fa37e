//! Schedule grid model.
//!
//! The grid is the canonical "who does what, when": one mapping
//! `employee → task` per block of the day. Manual assignment goes through
//! [`ScheduleGrid::assign`], which enforces the exclusivity and
//! availability invariants; bulk construction from a solver solution goes
//! through [`ScheduleGrid::from_blocks`], which only checks the shape.
//!
//! # Invariants (checked by `assign`)
//! 1. Block index in range.
//! 2. Employee on shift at the block.
//! 3. At most one task per employee per block.
//! 4. At most one employee per task per block, unless the caller asks
//!    for [`Occupancy::Shared`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::time::{check_block, describe_block, TOTAL_BLOCKS};
use super::{Employee, Task};
use crate::error::{FormulationError, OutOfRangeError, ScheduleConflictError};

/// Whether a task accepts concurrent workers at the same block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Occupancy {
    /// One worker per block (the conservative default).
    #[default]
    Exclusive,
    /// Any number of workers per block.
    Shared,
}

/// What an employee is doing at a block, for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell<'a> {
    /// No shift covers the block.
    OffShift,
    /// On shift, nothing assigned.
    Idle,
    /// On shift, working the given task ID.
    Working(&'a str),
}

/// Block-indexed assignment table for one scheduling day.
///
/// Deserialization goes through [`ScheduleGrid::from_blocks`], so a grid
/// read from disk always spans `TOTAL_BLOCKS`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GridRepr")]
pub struct ScheduleGrid {
    blocks: Vec<BTreeMap<String, String>>,
}

#[derive(Deserialize)]
struct GridRepr {
    blocks: Vec<BTreeMap<String, String>>,
}

impl TryFrom<GridRepr> for ScheduleGrid {
    type Error = FormulationError;

    fn try_from(repr: GridRepr) -> Result<Self, Self::Error> {
        Self::from_blocks(repr.blocks)
    }
}

impl Default for ScheduleGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl ScheduleGrid {
    /// Creates an empty grid spanning the whole day.
    pub fn new() -> Self {
        Self {
            blocks: vec![BTreeMap::new(); TOTAL_BLOCKS],
        }
    }

    /// Builds a grid from per-block `employee → task` maps without
    /// re-checking invariants.
    ///
    /// # Errors
    /// `FormulationError::GridShape` unless exactly `TOTAL_BLOCKS` maps are given.
    pub fn from_blocks(blocks: Vec<BTreeMap<String, String>>) -> Result<Self, FormulationError> {
        if blocks.len() != TOTAL_BLOCKS {
            return Err(FormulationError::GridShape {
                expected: TOTAL_BLOCKS,
                actual: blocks.len(),
            });
        }
        Ok(Self { blocks })
    }

    /// Assigns `task` to `employee` at `block`, single worker per task.
    ///
    /// # Errors
    /// The [`ScheduleConflictError`] variant for the first broken invariant.
    /// The grid is unchanged on error.
    pub fn assign(
        &mut self,
        block: usize,
        employee: &Employee,
        task: &Task,
    ) -> Result<(), ScheduleConflictError> {
        self.assign_with(block, employee, task, Occupancy::Exclusive)
    }

    /// Assigns `task` to `employee` at `block` under the given occupancy policy.
    pub fn assign_with(
        &mut self,
        block: usize,
        employee: &Employee,
        task: &Task,
        occupancy: Occupancy,
    ) -> Result<(), ScheduleConflictError> {
        if let Err(err) = self.check_assignment(block, employee, task, occupancy) {
            debug!(block, employee = %employee.id, task = %task.id, %err, "assignment rejected");
            return Err(err);
        }
        self.blocks[block].insert(employee.id.clone(), task.id.clone());
        Ok(())
    }

    fn check_assignment(
        &self,
        block: usize,
        employee: &Employee,
        task: &Task,
        occupancy: Occupancy,
    ) -> Result<(), ScheduleConflictError> {
        check_block(block)?;

        if !employee.is_available(block) {
            return Err(ScheduleConflictError::EmployeeOffShift {
                employee_id: employee.id.clone(),
                block,
                time: describe_block(block),
            });
        }

        let slot = &self.blocks[block];
        if let Some(current) = slot.get(&employee.id) {
            return Err(ScheduleConflictError::EmployeeDoubleBooked {
                employee_id: employee.id.clone(),
                current_task_id: current.clone(),
                block,
                time: describe_block(block),
            });
        }

        if occupancy == Occupancy::Exclusive {
            if let Some((worker, _)) = slot.iter().find(|(_, t)| **t == task.id) {
                return Err(ScheduleConflictError::TaskDoubleBooked {
                    task_id: task.id.clone(),
                    worked_by: worker.clone(),
                    block,
                    time: describe_block(block),
                });
            }
        }

        Ok(())
    }

    /// Clears whatever `employee_id` does at `block`, returning the task ID.
    pub fn unassign(
        &mut self,
        block: usize,
        employee_id: &str,
    ) -> Result<Option<String>, OutOfRangeError> {
        check_block(block)?;
        Ok(self.blocks[block].remove(employee_id))
    }

    /// Task the employee works at `block`, if any. Out-of-range blocks are empty.
    pub fn task_at(&self, employee_id: &str, block: usize) -> Option<&str> {
        self.blocks
            .get(block)
            .and_then(|slot| slot.get(employee_id))
            .map(String::as_str)
    }

    /// Whether anyone works `task_id` at `block`.
    pub fn is_occupied(&self, task_id: &str, block: usize) -> bool {
        self.workers_on(task_id, block) > 0
    }

    /// Number of employees working `task_id` at `block`.
    pub fn workers_on(&self, task_id: &str, block: usize) -> usize {
        self.blocks
            .get(block)
            .map(|slot| slot.values().filter(|t| *t == task_id).count())
            .unwrap_or(0)
    }

    /// `(employee_id, task_id)` pairs at `block`, ordered by employee ID.
    pub fn assignments_at(&self, block: usize) -> impl Iterator<Item = (&str, &str)> {
        self.blocks
            .get(block)
            .into_iter()
            .flat_map(|slot| slot.iter().map(|(e, t)| (e.as_str(), t.as_str())))
    }

    /// Reporting view of one employee at one block.
    ///
    /// # Errors
    /// `OutOfRangeError::Block` for `block >= TOTAL_BLOCKS`.
    pub fn cell<'a>(
        &'a self,
        employee: &Employee,
        block: usize,
    ) -> Result<Cell<'a>, OutOfRangeError> {
        check_block(block)?;
        Ok(if !employee.is_available(block) {
            Cell::OffShift
        } else {
            match self.task_at(&employee.id, block) {
                Some(task_id) => Cell::Working(task_id),
                None => Cell::Idle,
            }
        })
    }

    /// Number of blocks the employee has a task.
    pub fn blocks_worked(&self, employee_id: &str) -> usize {
        self.blocks
            .iter()
            .filter(|slot| slot.contains_key(employee_id))
            .count()
    }

    /// Total number of `(block, employee)` assignments.
    pub fn assignment_count(&self) -> usize {
        self.blocks.iter().map(BTreeMap::len).sum()
    }

    /// Number of blocks (always `TOTAL_BLOCKS`).
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Whether no assignment has been made.
    pub fn is_empty(&self) -> bool {
        self.assignment_count() == 0
    }
}
