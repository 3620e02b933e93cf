//! Centralized constants for defaults, paths, and file names.

/// Default rotation root directory.
pub const DEFAULT_ROTATION_ROOT: &str = "/var/lib/rotation-schedule";

/// Environment variable overriding the rotation root.
pub const ROOT_ENV_VAR: &str = "ROTATION_SCHEDULE_ROOT";

/// Configuration file name under the rotation root.
pub const CONFIG_FILE_NAME: &str = "rotation.toml";

/// Credential store directory name under the rotation root.
pub const CREDSTORE_DIR_NAME: &str = "credstore";

/// Maximum allowed password age in days.
pub const DEFAULT_RESET_PERIOD: u32 = 365;

/// Maximum number of password changes scheduled on a single day.
pub const DEFAULT_MAX_CHANGES_PER_DAY: u32 = 5;

/// Permission mode for the rotation root directory.
pub const ROOT_DIR_MODE: u32 = 0o750;

/// Permission mode for rotation.toml.
pub const CONFIG_FILE_MODE: u32 = 0o640;

/// File extension for encrypted credential files.
pub const CRED_EXTENSION: &str = ".cred";
