//! Read-only validation of configuration, inputs, and feasibility.

use crate::cli::CliContext;
use crate::constants;
use crate::core::scheduler;
use crate::models::credential::CredentialAge;
use crate::util::fs as rotation_fs;
use anyhow::Result;
use clap::Args;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// List every expired credential instead of a count
    #[arg(long)]
    pub details: bool,
}

#[derive(Debug, Default)]
struct Tally {
    pass: u32,
    warn: u32,
    fail: u32,
}

impl Tally {
    fn pass(&mut self, msg: impl AsRef<str>) {
        println!("  [PASS] {}", msg.as_ref());
        self.pass += 1;
    }

    fn warn(&mut self, msg: impl AsRef<str>) {
        println!("  [WARN] {}", msg.as_ref());
        self.warn += 1;
    }

    fn fail(&mut self, msg: impl AsRef<str>) {
        println!("  [FAIL] {}", msg.as_ref());
        self.fail += 1;
    }
}

pub fn run(ctx: &CliContext, args: CheckArgs) -> Result<()> {
    let tally = evaluate(ctx, &args);
    println!();
    println!(
        "Check summary: {} pass, {} warn, {} fail",
        tally.pass, tally.warn, tally.fail
    );
    if tally.fail > 0 {
        std::process::exit(1);
    }
    Ok(())
}

fn evaluate(ctx: &CliContext, args: &CheckArgs) -> Tally {
    let paths = &ctx.paths;
    let settings = &ctx.settings;
    let mut tally = Tally::default();

    println!("Check: {} (as of {})", paths, ctx.as_of);

    // 1. Config file
    if let Some(w) = &ctx.config_load_warning {
        tally.fail(w);
    } else if paths.config.is_file() {
        tally.pass(format!("config readable: {}", paths.config.display()));
        if let Some(mode) = rotation_fs::mode_of(&paths.config) {
            if mode & 0o002 != 0 {
                tally.warn(format!(
                    "config is world-writable: {:04o} (expected {:04o})",
                    mode,
                    constants::CONFIG_FILE_MODE
                ));
            }
        }
    } else {
        tally.warn(format!(
            "config missing: {} (using defaults)",
            paths.config.display()
        ));
    }

    // 2. Parameters
    match settings.validate() {
        Ok(()) => tally.pass(format!(
            "reset_period {} days, max_changes_per_day {}",
            settings.reset_period, settings.max_changes_per_day
        )),
        Err(e) => {
            tally.fail(format!("invalid schedule settings: {}", e));
            return tally;
        }
    }

    // 3. Inputs
    let collected = match ctx.collect_ages() {
        Ok(c) => c,
        Err(e) => {
            tally.fail(format!("cannot collect credential ages: {:#}", e));
            return tally;
        }
    };
    println!("  [INFO] {} credential(s) with known age", collected.credentials.len());
    for name in &collected.unknown {
        tally.warn(format!("'{}' has no known change date; not scheduled", name));
    }

    let future: Vec<&CredentialAge> = collected
        .credentials
        .iter()
        .filter(|c| c.age_days < 0)
        .collect();
    for cred in &future {
        tally.fail(format!(
            "'{}' was last changed {} day(s) in the future",
            cred.id, -cred.age_days
        ));
    }

    // 4. Feasibility
    let count = collected.credentials.len() as u64;
    let capacity = settings.capacity();
    if count <= capacity {
        tally.pass(format!("capacity {} covers {} credential(s)", capacity, count));
    } else {
        tally.fail(format!(
            "{} credential(s) exceed capacity {}; raise max_changes_per_day to at least {}",
            count,
            capacity,
            count.div_ceil(u64::from(settings.reset_period))
        ));
    }

    // 5. Expired credentials
    let reset = i64::from(settings.reset_period);
    let expired: Vec<&CredentialAge> = collected
        .credentials
        .iter()
        .filter(|c| c.age_days >= reset)
        .collect();
    if expired.is_empty() {
        tally.pass("no credential has exceeded the reset period");
    } else {
        tally.warn(format!(
            "{} credential(s) older than {} days",
            expired.len(),
            reset
        ));
        if args.details {
            for cred in &expired {
                println!("         - {} ({} days)", cred.id, cred.age_days);
            }
        }
    }

    // 6. Dry run
    if future.is_empty() && count <= capacity {
        match scheduler::schedule(&collected.credentials, settings) {
            Ok(schedule) => {
                tally.pass(format!(
                    "schedule computed: peak {}/day, {} due today",
                    schedule.peak(),
                    schedule.due_today().len()
                ));
                if expired.len() > settings.max_changes_per_day as usize {
                    tally.warn(format!(
                        "{} expired credential(s) cannot all be changed today",
                        expired.len()
                    ));
                }
            }
            Err(e) => tally.fail(format!("scheduling failed: {}", e)),
        }
    }

    tally
}
