use crate::constants;
use crate::models::rotation_config::RotationFile;
use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::debug;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

const HEADER: &str = "# rotation-schedule configuration\n\
# reset_period: maximum password age in days\n\
# max_changes_per_day: most password changes planned for a single day\n\n";

/// Read rotation.toml, or the built-in defaults when the file is absent.
///
/// A file whose `[schedule]` section cannot drive the scheduler is rejected
/// here so every command sees the same error.
pub fn load(path: &Path) -> Result<RotationFile> {
    if !path.exists() {
        return Ok(RotationFile::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("read rotation config {}", path.display()))?;
    let config: RotationFile = toml::from_str(&content)
        .with_context(|| format!("parse rotation config {}", path.display()))?;
    config
        .schedule
        .validate()
        .with_context(|| format!("invalid [schedule] in {}", path.display()))?;
    debug!(
        path = %path.display(),
        credentials = config.credentials.len(),
        capacity = config.schedule.capacity(),
        "loaded rotation config"
    );
    Ok(config)
}

/// Atomically replace rotation.toml with `config`.
pub fn save(path: &Path, config: &RotationFile) -> Result<()> {
    config
        .schedule
        .validate()
        .context("refusing to write invalid [schedule] section")?;
    let body = toml::to_string_pretty(config).context("serialize rotation config")?;
    let content = format!("{}{}", HEADER, body);

    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir).with_context(|| format!("create dir {}", dir.display()))?;
    let mut tmp = tempfile::NamedTempFile::new_in(dir).context("create temp rotation config")?;
    tmp.write_all(content.as_bytes())
        .context("write rotation config")?;

    #[cfg(unix)]
    tmp.as_file()
        .set_permissions(fs::Permissions::from_mode(constants::CONFIG_FILE_MODE))
        .context("set permissions on temp rotation config")?;

    tmp.as_file()
        .sync_all()
        .context("sync rotation config")?;
    tmp.persist(path)
        .map_err(|err| anyhow::anyhow!("persist rotation config {}: {}", path.display(), err))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::credential::CredentialMeta;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = load(&dir.path().join("rotation.toml")).unwrap();
        assert_eq!(config.schedule.reset_period, 365);
        assert!(config.credentials.is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("rotation.toml");
        let mut config = RotationFile::default();
        config.schedule.max_changes_per_day = 3;
        config.credentials.push(CredentialMeta {
            name: "db_password".into(),
            tags: vec!["db".into()],
            ..Default::default()
        });
        save(&path, &config).unwrap();

        let loaded = load(&path).unwrap();
        assert_eq!(loaded.schedule.max_changes_per_day, 3);
        assert_eq!(loaded.credentials[0].name, "db_password");
    }

    #[test]
    fn test_load_rejects_malformed_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rotation.toml");
        fs::write(&path, "[schedule\nreset_period = ").unwrap();
        let err = load(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("parse rotation config"));
    }

    #[test]
    fn test_load_rejects_zero_limit() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rotation.toml");
        fs::write(&path, "[schedule]\nmax_changes_per_day = 0\n").unwrap();
        let err = load(&path).unwrap_err();
        let msg = format!("{:#}", err);
        assert!(msg.contains("invalid [schedule]"), "{}", msg);
        assert!(msg.contains("max_changes_per_day"), "{}", msg);
    }

    #[test]
    fn test_save_rejects_invalid_section_and_keeps_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rotation.toml");
        save(&path, &RotationFile::default()).unwrap();
        let before = fs::read_to_string(&path).unwrap();

        let mut config = RotationFile::default();
        config.schedule.reset_period = 0;
        assert!(save(&path, &config).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), before);
    }

    #[test]
    fn test_saved_file_starts_with_header() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rotation.toml");
        save(&path, &RotationFile::default()).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("# rotation-schedule configuration"));
        assert!(content.contains("[schedule]"));
    }

    #[cfg(unix)]
    #[test]
    fn test_save_sets_mode() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rotation.toml");
        save(&path, &RotationFile::default()).unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, constants::CONFIG_FILE_MODE);
    }
}
