use crate::cli::{check_format, CliContext};
use anyhow::Result;
use clap::Args;
use comfy_table::{presets::UTF8_FULL, Attribute, Cell, Table};
use std::collections::HashMap;

#[derive(Args, Debug)]
pub struct DueArgs {
    /// Output format (table|json|text)
    #[arg(long, default_value = "table")]
    pub format: String,
}

pub fn run(ctx: &CliContext, args: DueArgs) -> Result<()> {
    check_format(&args.format)?;
    let (schedule, collected) = ctx.compute_schedule()?;
    let due = schedule.due_today();
    let ages: HashMap<&str, i64> = collected
        .credentials
        .iter()
        .map(|c| (c.id.as_str(), c.age_days))
        .collect();

    match args.format.as_str() {
        "json" => {
            let items: Vec<_> = due
                .iter()
                .map(|id| {
                    serde_json::json!({
                        "credential": id,
                        "age_days": ages.get(id.as_str()),
                    })
                })
                .collect();
            let out = serde_json::json!({
                "date": ctx.as_of.to_string(),
                "due": items,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        "text" => {
            for id in due {
                println!("{}", id);
            }
        }
        _ => {
            if due.is_empty() {
                println!("No credentials due today ({}).", ctx.as_of);
                return Ok(());
            }
            let mut table = Table::new();
            table.load_preset(UTF8_FULL);
            table.set_header(vec![
                Cell::new("Credential").add_attribute(Attribute::Bold),
                Cell::new("Age (days)").add_attribute(Attribute::Bold),
                Cell::new("Overdue").add_attribute(Attribute::Bold),
            ]);
            for id in due {
                let age = ages.get(id.as_str()).copied();
                let overdue = match age {
                    Some(a) if a >= i64::from(schedule.reset_period) => {
                        format!("{} days", a - i64::from(schedule.reset_period))
                    }
                    Some(_) => "-".to_string(),
                    None => "?".to_string(),
                };
                table.add_row(vec![
                    id.clone(),
                    age.map(|a| a.to_string()).unwrap_or_else(|| "?".into()),
                    overdue,
                ]);
            }
            println!("{}", table);
            println!("\n{} credential(s) due on {}.", due.len(), ctx.as_of);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::credential::CredentialMeta;
    use chrono::{NaiveDate, TimeZone, Utc};
    use tempfile::TempDir;

    fn rotated(name: &str, y: i32, m: u32, d: u32) -> CredentialMeta {
        CredentialMeta {
            name: name.into(),
            rotated_at: Some(Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()),
            ..Default::default()
        }
    }

    fn context(dir: &TempDir) -> CliContext {
        let mut ctx = CliContext::for_root(dir.path().to_path_buf());
        ctx.as_of = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        ctx.config.credentials = vec![
            rotated("fresh", 2026, 10, 1),
            rotated("stale", 2025, 1, 1),
        ];
        ctx
    }

    #[test]
    fn test_expired_credential_is_due_today() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir);
        let (schedule, collected) = ctx.compute_schedule().unwrap();
        assert_eq!(collected.credentials.len(), 2);
        assert_eq!(schedule.due_today(), ["stale".to_string()]);
        assert_eq!(schedule.day_of("fresh"), Some(365 - 18));
    }

    #[test]
    fn test_due_runs_in_every_format() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir);
        for format in ["table", "json", "text"] {
            let args = DueArgs {
                format: format.into(),
            };
            run(&ctx, args).unwrap();
        }
    }

    #[test]
    fn test_due_rejects_unknown_format() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir);
        let err = run(
            &ctx,
            DueArgs {
                format: "yaml".into(),
            },
        )
        .unwrap_err();
        assert!(err.to_string().contains("invalid format"));
    }
}
