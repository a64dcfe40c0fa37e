//! Workforce planning domain models.
//!
//! Provides the data types for a single scheduling day: the block-based
//! time frame, worker shifts, employees, tasks, and the schedule grid
//! that records who works what at each block.
//!
//! # Domain Mappings
//!
//! | shift-planner | Retail | Warehouse | Hospital |
//! |---------------|--------|-----------|----------|
//! | Employee | Store associate | Picker | Nurse |
//! | Fixed task | Checkout line | Dock door | Ward coverage |
//! | Flexible task | Shelf restock | Pallet unload | Inventory count |
//! | ScheduleGrid | Daily rota | Shift plan | Duty roster |

mod employee;
mod schedule;
mod shift;
mod task;
pub mod time;

pub use employee::{Employee, WorkProfile};
pub use schedule::{Cell, Occupancy, ScheduleGrid};
pub use shift::Shift;
pub use task::{demand_curve_from_windows, effort_from_load, Task, Workload};
pub use time::{block_to_time, time_to_block, time_to_boundary, ClockTime, TOTAL_BLOCKS};
