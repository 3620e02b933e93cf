//! Age providers: turn inventory entries, credstore files, or an age list
//! into `(identifier, days since last change)` records.

use crate::core::credstore::{self, CredEntry};
use crate::core::paths::RotationPaths;
use crate::models::credential::{CredentialAge, CredentialMeta};
use crate::models::rotation_config::RotationFile;
use anyhow::{bail, Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::HashSet;
use std::fs;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

/// Records gathered for one scheduling run.
#[derive(Debug, Clone, Default)]
pub struct CollectedAges {
    pub credentials: Vec<CredentialAge>,
    /// Credentials with no usable change date: inventory entries without a
    /// timestamp, or credstore files whose modification time is unavailable.
    pub unknown: Vec<String>,
}

/// Whole days between the last change and `as_of`.
pub fn age_in_days(last_changed: DateTime<Utc>, as_of: NaiveDate) -> i64 {
    (as_of - last_changed.date_naive()).num_days()
}

pub fn from_inventory(credentials: &[CredentialMeta], as_of: NaiveDate) -> CollectedAges {
    let mut out = CollectedAges::default();
    for meta in credentials {
        match meta.last_changed() {
            Some(changed) => out
                .credentials
                .push(CredentialAge::new(meta.name.clone(), age_in_days(changed, as_of))),
            None => out.unknown.push(meta.name.clone()),
        }
    }
    out
}

pub fn from_credstore(entries: &[CredEntry], as_of: NaiveDate) -> CollectedAges {
    let mut out = CollectedAges::default();
    for entry in entries {
        match entry.modified {
            Some(modified) => {
                let modified: DateTime<Utc> = modified.into();
                out.credentials
                    .push(CredentialAge::new(entry.name.clone(), age_in_days(modified, as_of)));
            }
            None => out.unknown.push(entry.name.clone()),
        }
    }
    out
}

/// Reject an inventory that lists the same credential twice.
fn ensure_unique_names(credentials: &[CredentialMeta]) -> Result<()> {
    let mut seen = HashSet::new();
    for (idx, meta) in credentials.iter().enumerate() {
        if !seen.insert(meta.name.as_str()) {
            bail!(
                "[[credentials]] entry {}: duplicate identifier '{}'",
                idx + 1,
                meta.name
            );
        }
    }
    Ok(())
}

/// Parse `<age-days> <identifier>` lines. Blank lines and `#` comments are
/// skipped; the identifier is the rest of the line and may contain spaces.
pub fn parse_age_list(content: &str) -> Result<Vec<CredentialAge>> {
    let mut out = Vec::new();
    let mut seen = HashSet::new();
    for (idx, raw_line) in content.lines().enumerate() {
        let line_num = idx + 1;
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (age, id) = match line.split_once(char::is_whitespace) {
            Some((age, id)) => (age, id.trim()),
            None => bail!("line {}: expected '<age-days> <identifier>'", line_num),
        };
        let age_days: i64 = age
            .parse()
            .with_context(|| format!("line {}: invalid age '{}'", line_num, age))?;
        if age_days < 0 {
            bail!("line {}: age must not be negative ({})", line_num, age_days);
        }
        if !seen.insert(id.to_string()) {
            bail!("line {}: duplicate identifier '{}'", line_num, id);
        }
        out.push(CredentialAge::new(id, age_days));
    }
    Ok(out)
}

/// Read an age list from `path`, or from stdin when `path` is `-`.
pub fn read_age_list(path: &Path) -> Result<Vec<CredentialAge>> {
    let content = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("read age list from stdin")?;
        buf
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("read age list {}", path.display()))?
    };
    parse_age_list(&content)
}

/// Add records from `secondary` whose identifier is not already in `primary`.
pub fn merge(mut primary: Vec<CredentialAge>, secondary: Vec<CredentialAge>) -> Vec<CredentialAge> {
    let known: HashSet<String> = primary.iter().map(|c| c.id.clone()).collect();
    primary.extend(secondary.into_iter().filter(|c| !known.contains(&c.id)));
    primary
}

/// Gather ages for a run.
///
/// An explicit age list replaces the other sources. Otherwise the inventory
/// in rotation.toml is used, topped up with credstore files it does not list.
pub fn collect(
    paths: &RotationPaths,
    config: &RotationFile,
    as_of: NaiveDate,
    input: Option<&Path>,
) -> Result<CollectedAges> {
    if let Some(input) = input {
        let credentials = read_age_list(input)?;
        info!(source = %input.display(), count = credentials.len(), "loaded age list");
        return Ok(CollectedAges {
            credentials,
            unknown: Vec::new(),
        });
    }

    ensure_unique_names(&config.credentials)?;
    let mut collected = from_inventory(&config.credentials, as_of);
    info!(
        count = collected.credentials.len(),
        config = %paths.config.display(),
        "loaded inventory"
    );
    for name in &collected.unknown {
        warn!(credential = %name, "no rotated_at or created_at; skipping");
    }

    if paths.credstore.is_dir() {
        let entries = credstore::list_credentials(&paths.credstore)?;
        let listed: HashSet<&str> = config.credentials.iter().map(|c| c.name.as_str()).collect();
        let extra: Vec<CredEntry> = entries
            .into_iter()
            .filter(|e| !listed.contains(e.name.as_str()))
            .collect();
        let scanned = from_credstore(&extra, as_of);
        info!(
            count = scanned.credentials.len(),
            credstore = %paths.credstore.display(),
            "scanned credstore"
        );
        for name in &scanned.unknown {
            warn!(credential = %name, "credstore file has no modification time; skipping");
        }
        collected.credentials = merge(collected.credentials, scanned.credentials);
        collected.unknown.extend(scanned.unknown);
    }

    Ok(collected)
}
