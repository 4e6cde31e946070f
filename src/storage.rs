use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::model::Task;

/// Persistence collaborator for the task store. The store stays agnostic
/// to the transport; the file-backed implementation below is the only
/// production one.
pub trait Storage {
    /// Reads the persisted collection. Absent or malformed data yields an
    /// empty collection; corruption is never surfaced to the user.
    fn read(&self) -> Vec<Task>;

    /// Replaces the persisted collection.
    fn write(&self, tasks: &[Task]) -> Result<()>;
}

/// Stores the collection as a single JSON document on disk.
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Storage for JsonFileStorage {
    fn read(&self) -> Vec<Task> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(_) => return Vec::new(),
        };
        match serde_json::from_str(&data) {
            Ok(tasks) => tasks,
            Err(e) => {
                log::warn!(
                    "ignoring malformed task file {}: {e}",
                    self.path.display()
                );
                Vec::new()
            }
        }
    }

    fn write(&self, tasks: &[Task]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create directory {}", parent.display())
                })?;
            }
        }
        let json = serde_json::to_string_pretty(tasks)?;
        // Write-then-rename so a concurrent reader never sees a torn file.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)
            .with_context(|| format!("failed to write {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("failed to replace {}", self.path.display()))?;
        Ok(())
    }
}

/// In-memory storage for tests.
#[cfg(test)]
pub struct MemoryStorage(pub std::cell::RefCell<Vec<Task>>);

#[cfg(test)]
impl MemoryStorage {
    pub fn new() -> Self {
        Self(std::cell::RefCell::new(Vec::new()))
    }
}

#[cfg(test)]
impl Storage for MemoryStorage {
    fn read(&self) -> Vec<Task> {
        self.0.borrow().clone()
    }

    fn write(&self, tasks: &[Task]) -> Result<()> {
        *self.0.borrow_mut() = tasks.to_vec();
        Ok(())
    }
}
