use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = rotation_schedule::cli::Cli::parse();
    rotation_schedule::logging::init(cli.verbose);
    cli.run()
}
