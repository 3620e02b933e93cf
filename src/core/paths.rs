//! Rotation root resolution and directory structure.

use crate::constants;
use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct RotationPaths {
    pub root: PathBuf,
    pub credstore: PathBuf,
    pub config: PathBuf,
}

impl RotationPaths {
    /// Resolve the root from CLI arg, env var, or auto-detection.
    pub fn resolve(root_arg: Option<PathBuf>) -> Result<Self> {
        if let Some(root) = root_arg {
            return Ok(Self::from_root(root));
        }
        if let Ok(root) = env::var(constants::ROOT_ENV_VAR) {
            return Ok(Self::from_root(PathBuf::from(root)));
        }
        if let Some(found) = find_config_root()? {
            return Ok(Self::from_root(found));
        }
        Ok(Self::from_root(PathBuf::from(constants::DEFAULT_ROTATION_ROOT)))
    }

    pub fn from_root(root: PathBuf) -> Self {
        let credstore = root.join(constants::CREDSTORE_DIR_NAME);
        let config = root.join(constants::CONFIG_FILE_NAME);
        Self {
            root,
            credstore,
            config,
        }
    }
}

fn find_config_root() -> Result<Option<PathBuf>> {
    let cwd = env::current_dir().context("resolve current directory")?;
    Ok(find_config_root_from(&cwd))
}

fn find_config_root_from(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|ancestor| ancestor.join(constants::CONFIG_FILE_NAME).is_file())
        .map(Path::to_path_buf)
}

impl std::fmt::Display for RotationPaths {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rotation@{}", self.root.display())
    }
}
