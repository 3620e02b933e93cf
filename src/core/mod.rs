//! Scheduling core and the glue that feeds it.

pub mod ages;
pub mod carry_over;
pub mod credstore;
pub mod day_buckets;
pub mod error;
pub mod metadata;
pub mod occupancy_heap;
pub mod paths;
pub mod scheduler;
pub mod target_day;

pub use error::ScheduleError;
pub use scheduler::{schedule, Scheduler};
pub use target_day::target_day;
