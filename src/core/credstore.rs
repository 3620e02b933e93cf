use crate::constants;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

#[derive(Debug, Clone)]
pub struct CredEntry {
    pub name: String,
    pub path: PathBuf,
    pub modified: Option<SystemTime>,
}

pub fn list_credentials(cred_dir: &Path) -> Result<Vec<CredEntry>> {
    let mut entries = Vec::new();
    let dir = fs::read_dir(cred_dir)
        .with_context(|| format!("open credstore directory {}", cred_dir.display()))?;
    for entry in dir {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let file_name = match path.file_name().and_then(|s| s.to_str()) {
            Some(name) => name,
            None => continue,
        };
        let name = match file_name.strip_suffix(constants::CRED_EXTENSION) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => continue,
        };
        let meta = fs::metadata(&path)
            .with_context(|| format!("stat credential {}", path.display()))?;
        entries.push(CredEntry {
            name,
            path,
            modified: meta.modified().ok(),
        });
    }
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}
