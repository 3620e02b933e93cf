//! CLI routing and command dispatch.

use crate::core::ages::{self, CollectedAges};
use crate::core::metadata;
use crate::core::paths::RotationPaths;
use crate::core::scheduler;
use crate::models::rotation_config::RotationFile;
use crate::models::schedule::Schedule;
use crate::models::schedule_settings::ScheduleSection;
use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use tracing::warn;

pub mod check;
pub mod due;
pub mod init;
pub mod plan;

/// Shared context passed to all command handlers.
pub struct CliContext {
    pub paths: RotationPaths,
    pub config: RotationFile,
    pub config_load_warning: Option<String>,
    pub settings: ScheduleSection,
    pub as_of: NaiveDate,
    pub input: Option<PathBuf>,
}

impl CliContext {
    pub fn collect_ages(&self) -> Result<CollectedAges> {
        ages::collect(&self.paths, &self.config, self.as_of, self.input.as_deref())
    }

    /// Gather ages and run the scheduler with the effective settings.
    pub fn compute_schedule(&self) -> Result<(Schedule, CollectedAges)> {
        self.settings.validate()?;
        let collected = self.collect_ages()?;
        let schedule = scheduler::schedule(&collected.credentials, &self.settings)
            .context("compute rotation schedule")?;
        Ok((schedule, collected))
    }

    /// Calendar date of a day offset.
    pub fn date_of(&self, day: usize) -> NaiveDate {
        self.as_of + chrono::Duration::days(day as i64)
    }

    /// Context on `root` with default settings and no config file loaded.
    #[cfg(test)]
    pub(crate) fn for_root(root: PathBuf) -> Self {
        let config = RotationFile::default();
        Self {
            paths: RotationPaths::from_root(root),
            settings: config.schedule,
            config,
            config_load_warning: None,
            as_of: Utc::now().date_naive(),
            input: None,
        }
    }
}

fn parse_as_of(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("expected YYYY-MM-DD: {}", e))
}

/// Output formats shared by the reporting commands.
pub(crate) fn check_format(format: &str) -> Result<()> {
    if !matches!(format, "table" | "json" | "text") {
        bail!("invalid format: {} (use table|json|text)", format);
    }
    Ok(())
}

#[derive(Parser, Debug)]
#[command(
    name = "rotation-schedule",
    version,
    about = "Plan password rotations under a daily change limit"
)]
pub struct Cli {
    /// Rotation root containing rotation.toml and credstore/
    #[arg(long, global = true, value_name = "PATH")]
    pub root: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Compute ages relative to this date instead of today (YYYY-MM-DD)
    #[arg(long, global = true, value_parser = parse_as_of, value_name = "DATE")]
    pub as_of: Option<NaiveDate>,

    /// Override the reset period in days
    #[arg(long, global = true, value_parser = clap::value_parser!(u32).range(1..))]
    pub reset_period: Option<u32>,

    /// Override the maximum number of changes per day
    #[arg(long, global = true, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_per_day: Option<u32>,

    /// Read '<age-days> <identifier>' lines from PATH ('-' for stdin)
    #[arg(long, global = true, value_name = "PATH")]
    pub input: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let paths = RotationPaths::resolve(self.root)?;

        // `check` reports a broken config and `init --force` replaces it.
        let mut config_load_warning: Option<String> = None;
        let config = match metadata::load(&paths.config) {
            Ok(config) => config,
            Err(e) => {
                let msg = format!("cannot read {}: {:#}", paths.config.display(), e);
                if !matches!(self.command, Commands::Check(_) | Commands::Init(_)) {
                    bail!(msg);
                }
                warn!("{}", msg);
                config_load_warning = Some(msg);
                RotationFile::default()
            }
        };

        let settings = config
            .schedule
            .with_overrides(self.reset_period, self.max_per_day);

        let ctx = CliContext {
            paths,
            config,
            config_load_warning,
            settings,
            as_of: self.as_of.unwrap_or_else(|| Utc::now().date_naive()),
            input: self.input,
        };

        match self.command {
            Commands::Init(args) => init::run(&ctx, args),
            Commands::Plan(args) => plan::run(&ctx, args),
            Commands::Due(args) => due::run(&ctx, args),
            Commands::Check(args) => check::run(&ctx, args),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the rotation root and a default rotation.toml
    Init(init::InitArgs),
    /// Show the full rotation schedule
    Plan(plan::PlanArgs),
    /// Show credentials due for rotation today
    Due(due::DueArgs),
    /// Validate configuration and feasibility (read-only)
    Check(check::CheckArgs),
}
