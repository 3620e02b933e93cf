//! Full rotation schedule.

use crate::cli::{check_format, CliContext};
use crate::models::schedule::Schedule;
use anyhow::Result;
use clap::Args;
use comfy_table::{presets::UTF8_FULL, Attribute, Cell, Table};

#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Output format (table|json|text)
    #[arg(long, default_value = "table")]
    pub format: String,

    /// Show the calendar date of each day offset
    #[arg(long)]
    pub dates: bool,
}

pub fn run(ctx: &CliContext, args: PlanArgs) -> Result<()> {
    check_format(&args.format)?;
    let (schedule, collected) = ctx.compute_schedule()?;

    match args.format.as_str() {
        "json" => {
            let days: Vec<_> = schedule
                .days
                .iter()
                .map(|b| {
                    serde_json::json!({
                        "day": b.day,
                        "date": ctx.date_of(b.day).to_string(),
                        "credentials": b.credentials,
                    })
                })
                .collect();
            let out = serde_json::json!({
                "as_of": ctx.as_of.to_string(),
                "reset_period": schedule.reset_period,
                "max_changes_per_day": schedule.max_changes_per_day,
                "total": schedule.total(),
                "peak": schedule.peak(),
                "unknown_age": collected.unknown,
                "days": days,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        "text" => print!("{}", render_text(&schedule)),
        _ => {
            if schedule.is_empty() {
                println!("No credentials to schedule.");
                return Ok(());
            }
            println!("{}", render_table(ctx, &schedule, args.dates));
            println!(
                "\n{} credentials over {} days (peak {}/day, limit {}).",
                schedule.total(),
                schedule.days.len(),
                schedule.peak(),
                schedule.max_changes_per_day
            );
        }
    }

    if !collected.unknown.is_empty() && args.format != "json" {
        eprintln!(
            "warning: {} credential(s) without a change date were not scheduled: {}",
            collected.unknown.len(),
            collected.unknown.join(", ")
        );
    }
    Ok(())
}

/// One block per day: the offset, then each identifier on its own line.
pub fn render_text(schedule: &Schedule) -> String {
    let mut out = String::new();
    for block in &schedule.days {
        out.push_str(&format!("{}\n", block.day));
        for id in &block.credentials {
            out.push_str(&format!("  {}\n", id));
        }
    }
    out
}

fn render_table(ctx: &CliContext, schedule: &Schedule, dates: bool) -> Table {
    let mut header = vec![Cell::new("Day").add_attribute(Attribute::Bold)];
    if dates {
        header.push(Cell::new("Date").add_attribute(Attribute::Bold));
    }
    header.push(Cell::new("Count").add_attribute(Attribute::Bold));
    header.push(Cell::new("Credentials").add_attribute(Attribute::Bold));

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(header);
    for block in &schedule.days {
        let mut row = vec![block.day.to_string()];
        if dates {
            row.push(ctx.date_of(block.day).to_string());
        }
        row.push(block.credentials.len().to_string());
        row.push(block.credentials.join("\n"));
        table.add_row(row);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::credential::CredentialMeta;
    use crate::models::schedule::DayBlock;
    use chrono::{NaiveDate, TimeZone, Utc};
    use tempfile::TempDir;

    fn context(dir: &TempDir, names: &[&str]) -> CliContext {
        let mut ctx = CliContext::for_root(dir.path().to_path_buf());
        ctx.as_of = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        ctx.config.credentials = names
            .iter()
            .map(|name| CredentialMeta {
                name: (*name).into(),
                rotated_at: Some(Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap()),
                ..Default::default()
            })
            .collect();
        ctx
    }

    fn args(format: &str) -> PlanArgs {
        PlanArgs {
            format: format.into(),
            dates: true,
        }
    }

    #[test]
    fn test_plan_runs_in_every_format() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir, &["db", "cache", "api"]);
        for format in ["table", "json", "text"] {
            run(&ctx, args(format)).unwrap();
        }
    }

    #[test]
    fn test_plan_rejects_unknown_format() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir, &["db"]);
        let err = run(&ctx, args("csv")).unwrap_err();
        assert!(err.to_string().contains("invalid format"));
    }

    #[test]
    fn test_plan_reports_infeasible_settings() {
        let dir = TempDir::new().unwrap();
        let mut ctx = context(&dir, &["db", "cache", "api"]);
        ctx.settings.reset_period = 1;
        ctx.settings.max_changes_per_day = 2;
        let err = run(&ctx, args("table")).unwrap_err();
        assert!(format!("{:#}", err).contains("compute rotation schedule"));
    }

    #[test]
    fn test_render_text_blocks() {
        let schedule = Schedule {
            reset_period: 10,
            max_changes_per_day: 2,
            days: vec![
                DayBlock {
                    day: 0,
                    credentials: vec!["a".into(), "b".into()],
                },
                DayBlock {
                    day: 7,
                    credentials: vec!["c".into()],
                },
            ],
        };
        assert_eq!(render_text(&schedule), "0\n  a\n  b\n7\n  c\n");
    }

    #[test]
    fn test_render_text_empty() {
        let schedule = Schedule {
            reset_period: 10,
            max_changes_per_day: 2,
            days: Vec::new(),
        };
        assert_eq!(render_text(&schedule), "");
    }
}
