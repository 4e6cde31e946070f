use anyhow::Result;
use chrono::Utc;

use crate::model::{Task, TaskPatch};
use crate::storage::Storage;

/// The in-memory task collection plus its persistence collaborator.
/// Every mutation persists synchronously before returning, so storage and
/// memory never diverge observably. List order is insertion order; display
/// order is computed by the projection, never stored.
pub struct TaskStore {
    tasks: Vec<Task>,
    storage: Box<dyn Storage>,
}

impl TaskStore {
    /// Loads the persisted collection, or starts empty when nothing usable
    /// is persisted.
    pub fn load(storage: Box<dyn Storage>) -> Self {
        let tasks = storage.read();
        log::debug!("loaded {} task(s)", tasks.len());
        Self { tasks, storage }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Appends a task and persists.
    pub fn add(&mut self, task: Task) -> Result<()> {
        self.tasks.push(task);
        self.persist()
    }

    /// Replaces the fields of the matching task and stamps `updated_at`.
    /// Silent no-op if the id is absent.
    pub fn update(&mut self, id: &str, patch: TaskPatch) -> Result<()> {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(());
        };
        task.title = patch.title;
        task.description = patch.description;
        task.due = patch.due;
        task.priority = patch.priority;
        task.updated_at = Some(Utc::now());
        self.persist()
    }

    /// Removes the matching task. Silent no-op if the id is absent.
    pub fn delete(&mut self, id: &str) -> Result<()> {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() == before {
            return Ok(());
        }
        self.persist()
    }

    /// Empties the collection.
    pub fn clear(&mut self) -> Result<()> {
        self.tasks.clear();
        self.persist()
    }

    /// Re-reads the persisted collection. Called when another session
    /// changed the backing file; the loaded snapshot wins outright.
    pub fn reload(&mut self) {
        self.tasks = self.storage.read();
        log::debug!("reloaded {} task(s) after external change", self.tasks.len());
    }

    fn persist(&self) -> Result<()> {
        self.storage.write(&self.tasks)
    }
}
