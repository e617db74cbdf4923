//! The task store: an owned, ordered task list mirrored to a JSON file.
//!
//! Every mutation rewrites the whole file — the list is small, human-scale
//! data and wholesale rewrite keeps the on-disk form trivially inspectable.

use crate::error::StoreError;
use crate::model::{Status, Task};
use std::fs;
use std::path::{Path, PathBuf};

/// Owner of the ordered task list and its persistence.
///
/// Tasks are addressed by index. The store is single-threaded and every
/// operation runs to completion before the next begins; there is no locking
/// against other processes.
#[derive(Debug)]
pub struct TaskStore {
    path: PathBuf,
    tasks: Vec<Task>,
    recovered: bool,
}

impl TaskStore {
    /// Open a store backed by `path`, loading any previously saved tasks.
    ///
    /// A missing file yields an empty list. Malformed or unreadable content
    /// also yields an empty list — the file is program-owned state and the
    /// next save rewrites it wholesale. [`Self::recovered`] reports whether
    /// that happened so the caller can tell the user.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let (tasks, recovered) = load_tasks(&path);
        Self {
            path,
            tasks,
            recovered,
        }
    }

    /// Rewrite the task file from the in-memory list, creating parent
    /// directories as needed.
    pub fn save(&self) -> Result<(), StoreError> {
        let body = serde_json::to_string_pretty(&self.tasks)?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| StoreError::WriteFailed {
                    path: self.path.clone(),
                    source,
                })?;
            }
        }
        fs::write(&self.path, body).map_err(|source| StoreError::WriteFailed {
            path: self.path.clone(),
            source,
        })
    }

    /// Append a new pending task and persist. Returns the new task's index.
    ///
    /// The description is trimmed; one that trims to empty is rejected and
    /// the list is left untouched.
    pub fn add(&mut self, description: &str) -> Result<usize, StoreError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(StoreError::EmptyDescription);
        }
        self.tasks.push(Task::new(description));
        self.save()?;
        Ok(self.tasks.len() - 1)
    }

    /// Replace the description of the task at `index` and persist.
    pub fn update(&mut self, index: usize, description: &str) -> Result<(), StoreError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(StoreError::EmptyDescription);
        }
        let task = self.task_mut(index)?;
        task.description = description.to_string();
        self.save()
    }

    /// Set the task at `index` to [`Status::Completed`] and persist.
    ///
    /// Completing an already-completed task is a harmless rewrite.
    pub fn mark_complete(&mut self, index: usize) -> Result<(), StoreError> {
        self.task_mut(index)?.status = Status::Completed;
        self.save()
    }

    /// Remove the task at `index` and persist; returns the removed task.
    ///
    /// Callers are expected to have confirmed the removal with the user.
    pub fn delete(&mut self, index: usize) -> Result<Task, StoreError> {
        if index >= self.tasks.len() {
            return Err(StoreError::IndexOutOfRange {
                index,
                len: self.tasks.len(),
            });
        }
        let task = self.tasks.remove(index);
        self.save()?;
        Ok(task)
    }

    /// Remove every task and persist; returns how many were removed.
    ///
    /// Callers are expected to have confirmed with the user.
    pub fn clear_all(&mut self) -> Result<usize, StoreError> {
        let removed = self.tasks.len();
        self.tasks.clear();
        self.save()?;
        Ok(removed)
    }

    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True if [`Self::open`] found an unreadable or malformed task file and
    /// reset to an empty list.
    #[must_use]
    pub const fn recovered(&self) -> bool {
        self.recovered
    }

    fn task_mut(&mut self, index: usize) -> Result<&mut Task, StoreError> {
        let len = self.tasks.len();
        self.tasks
            .get_mut(index)
            .ok_or(StoreError::IndexOutOfRange { index, len })
    }
}

fn load_tasks(path: &Path) -> (Vec<Task>, bool) {
    if !path.exists() {
        return (Vec::new(), false);
    }
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) => {
            tracing::warn!("task file {} is unreadable, starting empty: {err}", path.display());
            return (Vec::new(), true);
        }
    };
    match serde_json::from_str::<Vec<Task>>(&raw) {
        Ok(tasks) => (tasks, false),
        Err(err) => {
            tracing::warn!("task file {} is malformed, starting empty: {err}", path.display());
            (Vec::new(), true)
        }
    }
}
