// taskdeck/src/store.rs

use anyhow::{Context, Result};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, sync::Arc};

/// A single to-do entry. The wire shape is exactly `{"id": .., "text": ..}`;
/// the data file and the HTTP bodies both reuse it.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub id: u64,
    pub text: String,
}

/// Ordered task collection. IDs stay dense: `1..=N` in list order,
/// renumbered after every removal.
#[derive(Default, Clone, Debug)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

/// Handle shared between the menu thread and the HTTP handlers. The lock is
/// held only for the in-memory operation itself, never across file, network
/// or stdin I/O: callers snapshot with a clone and do I/O after releasing it.
pub type SharedStore = Arc<Mutex<TaskStore>>;

impl TaskStore {
    /// Appends a new task with the next dense ID and returns it.
    pub fn add(&mut self, text: impl Into<String>) -> &Task {
        let task = Task {
            id: self.tasks.len() as u64 + 1,
            text: text.into(),
        };
        self.tasks.push(task);
        self.tasks.last().unwrap()
    }

    /// Appends a fully formed task without touching its ID. The HTTP add
    /// path stores whatever the client sent, ID included; only the menu
    /// path assigns dense IDs.
    pub fn push_raw(&mut self, task: Task) {
        self.tasks.push(task);
    }

    pub fn list(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Removes the first task whose ID matches, then renumbers the rest so
    /// IDs run 1..=N again. Returns false, leaving the list alone, when no
    /// task matches.
    pub fn remove_by_id(&mut self, id: u64) -> bool {
        let Some(index) = self.tasks.iter().position(|t| t.id == id) else {
            return false;
        };
        self.tasks.remove(index);
        self.renumber();
        true
    }

    fn renumber(&mut self) {
        for (i, task) in self.tasks.iter_mut().enumerate() {
            task.id = i as u64 + 1;
        }
    }

    /// Reads the whole store from a JSON array file. A missing file yields
    /// an empty store; a file that exists but does not parse is an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let data =
            fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        let tasks: Vec<Task> = serde_json::from_str(&data)
            .with_context(|| format!("parse task file {}", path.display()))?;
        Ok(Self { tasks })
    }

    /// Overwrites the file with the whole store as a JSON array.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(path, serde_json::to_string_pretty(&self.tasks)?)
            .with_context(|| format!("write {}", path.display()))?;
        Ok(())
    }

    pub fn shared(self) -> SharedStore {
        Arc::new(Mutex::new(self))
    }
}
