//! Workforce shift planning on a 15-minute block grid.
//!
//! Models one operating day (06:00 to 02:00 next day) as 80 blocks,
//! staffs it from employees and tasks, and scores the result the way
//! it would actually play out: fatigue, task switches, idle time, and
//! preference mismatches.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Employee`, `Shift`, `Task`, `ScheduleGrid`,
//!   and the clock/block arithmetic in `models::time`
//! - **`scoring`**: Path-dependent cost simulation (`calculate_metrics`)
//! - **`cp`**: 0/1 linear formulation, the `CpSolver` capability, and decoding
//! - **`validation`**: Input integrity, effort completion, demand coverage
//! - **`config`**: TOML-loadable objective weights and solver budget
//! - **`error`**: Error taxonomy
//!
//! # Architecture
//!
//! The crate defines the problem and reads answers back; it does not ship
//! a production solver. Plug one in through [`cp::CpSolver`]. Schedules
//! from any source, solver or manual, are scored by the same metrics
//! engine, and that score is the authoritative cost.
//!
//! # References
//!
//! - Ernst et al. (2004), "Staff scheduling and rostering: A review of
//!   applications, methods and models"
//! - Van den Bergh et al. (2013), "Personnel scheduling: A literature review"

pub mod config;
pub mod cp;
pub mod error;
pub mod models;
pub mod scoring;
pub mod validation;

pub use error::{
    FormulationError, NoSolutionError, OutOfRangeError, PlannerError, ScheduleConflictError,
};
