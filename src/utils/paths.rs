use dirs::home_dir;
use std::{
    env,
    path::{Path, PathBuf},
};

const DEFAULT_DIR_NAME: &str = ".catatan";
const HOME_ENV: &str = "CATATAN_HOME";
const ENTRIES_FILE: &str = "entries.json";
const SESSION_FILE: &str = "session.json";
const BACKUP_DIR: &str = "backups";
const CONFIG_DIR: &str = "config";
const CONFIG_FILE: &str = "config.json";

/// Returns the application data directory, defaulting to `~/.catatan`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

pub fn entries_file_in(root: &Path) -> PathBuf {
    root.join(ENTRIES_FILE)
}

pub fn backups_dir_in(root: &Path) -> PathBuf {
    root.join(BACKUP_DIR)
}

/// File holding the persisted logged-in flag.
pub fn session_file_in(root: &Path) -> PathBuf {
    root.join(SESSION_FILE)
}

pub fn config_file_in(root: &Path) -> PathBuf {
    root.join(CONFIG_DIR).join(CONFIG_FILE)
}
