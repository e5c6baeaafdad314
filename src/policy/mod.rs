//! Policy value schedule and CSV loading

mod data;
pub mod loader;

pub use data::{PolicySchedule, PolicyYearRow};
pub use loader::{load_default_schedule, load_schedule, load_schedule_from_reader, ScheduleError};
