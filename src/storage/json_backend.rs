use std::{
    cmp::Reverse,
    fs,
    path::{Path, PathBuf},
};

use chrono::Local;
use tracing::{debug, info, warn};

use crate::domain::Entry;
use crate::errors::{LedgerError, Result};
use crate::utils::fs::{ensure_dir, write_atomic};
use crate::utils::paths;

use super::{BackupInfo, EntryStore};

const BACKUP_EXTENSION: &str = "json";
const BACKUP_PREFIX: &str = "entries_";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S%3f";
pub const DEFAULT_RETENTION: usize = 5;

/// File-backed store writing the collection as a pretty-printed JSON array.
///
/// Before an existing file is replaced, a timestamped copy is placed in the
/// backups directory and copies beyond the retention count are pruned.
#[derive(Debug, Clone)]
pub struct JsonEntryStore {
    path: PathBuf,
    backups_dir: PathBuf,
    retention: usize,
}

impl JsonEntryStore {
    pub fn new(path: PathBuf, backups_dir: PathBuf) -> Result<Self> {
        Self::with_retention(path, backups_dir, DEFAULT_RETENTION)
    }

    pub fn with_retention(path: PathBuf, backups_dir: PathBuf, retention: usize) -> Result<Self> {
        if let Some(parent) = path.parent() {
            ensure_dir(parent)?;
        }
        ensure_dir(&backups_dir)?;
        Ok(Self {
            path,
            backups_dir,
            retention: retention.max(1),
        })
    }

    /// Store rooted in an application data directory.
    pub fn in_dir(root: &Path, retention: usize) -> Result<Self> {
        Self::with_retention(
            paths::entries_file_in(root),
            paths::backups_dir_in(root),
            retention,
        )
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn backups_dir(&self) -> &Path {
        &self.backups_dir
    }

    fn backup_existing_file(&self) -> Result<()> {
        if !self.path.exists() {
            return Ok(());
        }
        ensure_dir(&self.backups_dir)?;
        let timestamp = Local::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let mut name = format!("{BACKUP_PREFIX}{timestamp}.{BACKUP_EXTENSION}");
        // Two saves within one millisecond must not overwrite each other.
        let mut attempt = 1;
        while self.backups_dir.join(&name).exists() {
            name = format!("{BACKUP_PREFIX}{timestamp}_{attempt}.{BACKUP_EXTENSION}");
            attempt += 1;
        }
        let target = self.backups_dir.join(&name);
        fs::copy(&self.path, &target)?;
        debug!(backup = %name, "backed up entries file");
        self.prune_backups()
    }

    fn prune_backups(&self) -> Result<()> {
        let backups = self.list_backups()?;
        for stale in backups.into_iter().skip(self.retention) {
            if let Err(err) = fs::remove_file(&stale.path) {
                warn!(backup = %stale.name, error = %err, "failed to prune backup");
            }
        }
        Ok(())
    }
}

impl EntryStore for JsonEntryStore {
    fn load(&self) -> Result<Vec<Entry>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no entries file yet");
            return Ok(Vec::new());
        }
        let data = fs::read_to_string(&self.path)?;
        match serde_json::from_str::<Vec<Entry>>(&data) {
            Ok(entries) => {
                info!(count = entries.len(), "loaded entries");
                Ok(entries)
            }
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    error = %err,
                    "entries file is unreadable; starting with an empty ledger"
                );
                Ok(Vec::new())
            }
        }
    }

    fn save(&self, entries: &[Entry]) -> Result<()> {
        self.backup_existing_file()?;
        let json = serde_json::to_string_pretty(entries)?;
        write_atomic(&self.path, &json)?;
        debug!(count = entries.len(), path = %self.path.display(), "saved entries");
        Ok(())
    }

    fn list_backups(&self) -> Result<Vec<BackupInfo>> {
        if !self.backups_dir.exists() {
            return Ok(Vec::new());
        }
        let mut backups = Vec::new();
        for item in fs::read_dir(&self.backups_dir)? {
            let path = item?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(BACKUP_EXTENSION) {
                continue;
            }
            let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
                continue;
            };
            if !name.starts_with(BACKUP_PREFIX) {
                continue;
            }
            let size_bytes = fs::metadata(&path).map(|meta| meta.len()).unwrap_or(0);
            backups.push(BackupInfo {
                name: name.to_string(),
                path: path.clone(),
                size_bytes,
            });
        }
        // Fixed-width timestamps sort chronologically by name.
        backups.sort_by_key(|info| Reverse(info.name.clone()));
        Ok(backups)
    }

    fn restore_backup(&self, name: &str) -> Result<Vec<Entry>> {
        let source = self.backups_dir.join(name);
        if name.contains(['/', '\\']) || !source.exists() {
            return Err(LedgerError::Storage(format!("backup `{name}` not found")));
        }
        let data = fs::read_to_string(&source)?;
        let entries: Vec<Entry> = serde_json::from_str(&data)?;
        self.backup_existing_file()?;
        write_atomic(&self.path, &data)?;
        info!(backup = %name, count = entries.len(), "restored entries from backup");
        Ok(entries)
    }
}
