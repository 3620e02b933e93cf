//! Data structures shared by the scheduler core and the CLI.

pub mod credential;
pub mod rotation_config;
pub mod schedule;
pub mod schedule_settings;
