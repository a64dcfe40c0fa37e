//! Per-employee behavioral sweep.
//!
//! One employee's day is a left fold over blocks in increasing order.
//! The fold carries two pieces of state: how many blocks the employee has
//! worked without a break, and which task they worked in the previous
//! block. Both reset whenever the employee is off shift or idle.
//!
//! # Cost Model
//!
//! | Event | Cost | Progress |
//! |-------|------|----------|
//! | Off shift | 0 | 0 |
//! | Idle on shift | `IDLE_COST` | 0 |
//! | Task change within a run | `switch_cost` | |
//! | Task outside a non-empty ideal set | `PREFERENCE_PENALTY` | |
//! | Worked block | | `base_speed × fatigue_factor` |
//!
//! `fatigue_factor = max(FATIGUE_FLOOR, 1 − fatigue_rate × n)` where `n` is
//! the number of blocks already worked in the current run, so the first
//! block of a run is done at full speed.

use crate::models::{Cell, Employee};

/// Cost of one idle on-shift block.
pub const IDLE_COST: f64 = 0.2;
/// Cost of one block spent on a task outside the employee's ideal set.
pub const PREFERENCE_PENALTY: f64 = 0.5;
/// Lowest fraction of base speed fatigue can reduce a worker to.
pub const FATIGUE_FLOOR: f64 = 0.1;

/// Running state of one employee's sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepState<'a> {
    /// Contiguous worked blocks since the last reset.
    pub consecutive_blocks: u32,
    /// Task worked in the previous block, if it was worked.
    pub last_task: Option<&'a str>,
}

/// Effect of a single block on the metrics.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BlockOutcome<'a> {
    /// Task worked, if any.
    pub task: Option<&'a str>,
    /// Effort contributed to `task`.
    pub progress: f64,
    /// Cost charged to the employee.
    pub cost: f64,
    /// Whether the block was idle on shift.
    pub idle: bool,
    /// Whether a task switch was charged.
    pub switched: bool,
}

/// Speed multiplier after `blocks_worked` blocks without a break.
#[inline]
pub fn fatigue_factor(fatigue_rate: f64, blocks_worked: u32) -> f64 {
    (1.0 - fatigue_rate * f64::from(blocks_worked)).max(FATIGUE_FLOOR)
}

/// Advances the sweep by one block.
///
/// `cell` must describe the block immediately after the one that produced
/// `state`; feeding blocks out of order breaks fatigue and switch accounting.
pub fn step<'a>(
    state: SweepState<'a>,
    employee: &Employee,
    cell: Cell<'a>,
) -> (SweepState<'a>, BlockOutcome<'a>) {
    match cell {
        Cell::OffShift => (SweepState::default(), BlockOutcome::default()),
        Cell::Idle => (
            SweepState::default(),
            BlockOutcome {
                cost: IDLE_COST,
                idle: true,
                ..BlockOutcome::default()
            },
        ),
        Cell::Working(task_id) => {
            let switched = state.last_task.is_some_and(|last| last != task_id);
            let mut cost = 0.0;
            if switched {
                cost += employee.switch_cost;
            }

            let speed =
                employee.base_speed * fatigue_factor(employee.fatigue_rate, state.consecutive_blocks);

            if !employee.prefers(task_id) {
                cost += PREFERENCE_PENALTY;
            }

            (
                SweepState {
                    consecutive_blocks: state.consecutive_blocks + 1,
                    last_task: Some(task_id),
                },
                BlockOutcome {
                    task: Some(task_id),
                    progress: speed,
                    cost,
                    idle: false,
                    switched,
                },
            )
        }
    }
}
