//! Behavioral cost scoring.
//!
//! Simulates how a schedule plays out for real people: workers slow down
//! as they tire, pay a cost when they change tasks, cost money while idle
//! on shift, and are less happy outside their preferred tasks.
//!
//! # Usage
//!
//! ```
//! use shift_planner::models::{Employee, ScheduleGrid, Shift, Task};
//! use shift_planner::scoring::calculate_metrics;
//!
//! let e = Employee::new("E1")
//!     .with_shift(Shift::new(8, 13).unwrap())
//!     .with_base_speed(0.9);
//! let t = Task::flexible("T1", 4.0);
//!
//! let mut grid = ScheduleGrid::new();
//! for b in 8..13 {
//!     grid.assign(b, &e, &t).unwrap();
//! }
//!
//! let metrics = calculate_metrics(&grid, &[e], &[t]);
//! assert!((metrics.progress("T1") - 4.5).abs() < 1e-9);
//! assert_eq!(metrics.total_cost, 0.0);
//! ```

mod metrics;
mod sweep;

pub use metrics::{calculate_metrics, EmployeeStats, ScheduleMetrics};
pub use sweep::{
    fatigue_factor, step, BlockOutcome, SweepState, FATIGUE_FLOOR, IDLE_COST, PREFERENCE_PENALTY,
};
