use crate::cli::CliContext;
use crate::constants;
use crate::core::metadata;
use crate::models::rotation_config::RotationFile;
use crate::util::fs as rotation_fs;
use anyhow::Result;
use clap::Args;
use tracing::info;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing rotation.toml with defaults
    #[arg(long)]
    pub force: bool,
}

pub fn run(ctx: &CliContext, args: InitArgs) -> Result<()> {
    let paths = &ctx.paths;
    rotation_fs::ensure_dir(&paths.root, constants::ROOT_DIR_MODE)?;

    if paths.config.exists() && !args.force {
        println!("{} already exists (use --force to reset)", paths.config.display());
        return Ok(());
    }

    let config = RotationFile {
        schedule: ctx.settings,
        credentials: Vec::new(),
    };
    metadata::save(&paths.config, &config)?;
    info!(path = %paths.config.display(), "wrote rotation config");

    println!("rotation config initialized at {}", paths.config.display());
    println!(
        "  reset_period: {} days, max_changes_per_day: {}",
        config.schedule.reset_period, config.schedule.max_changes_per_day
    );
    Ok(())
}
