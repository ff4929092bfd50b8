//! Database operations for the task list.
//!
//! This module provides the `Database` struct holding the ordered task sequence,
//! its JSON persistence, the positional operations the menu handlers build on,
//! and the numbered listing renderer.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::fields::Filter;
use crate::task::Task;

/// Placeholder shown when the list has no tasks at all.
pub const EMPTY_LIST: &str = "  📭 No tasks yet. Add one!";
/// Placeholder shown when tasks exist but none pass the filter.
pub const NO_MATCHES: &str = "  (no tasks match this filter)";

/// Failures reading or writing the storage file.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid task #{position} in {path}: {reason}")]
    Invalid {
        path: PathBuf,
        position: usize,
        reason: String,
    },
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not serialize tasks: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Rejected user input. The list is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaskError {
    #[error("Task title cannot be empty.")]
    EmptyTitle,
    #[error("Please enter a valid number.")]
    NotANumber(String),
    #[error("Invalid number.")]
    OutOfRange { index: i64, len: usize },
}

/// In-memory task list. Serialized as a bare JSON array.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Database {
    pub tasks: Vec<Task>,
}

impl Database {
    /// Load the task list from a JSON file. A missing file yields an empty list.
    pub fn load(path: &Path) -> Result<Self, DbError> {
        if !path.exists() {
            debug!(path = %path.display(), "no storage file, starting empty");
            return Ok(Database::default());
        }
        let mut buf = String::new();
        File::open(path)
            .and_then(|mut f| f.read_to_string(&mut buf))
            .map_err(|source| DbError::Read { path: path.to_path_buf(), source })?;
        let db: Database = serde_json::from_str(&buf)
            .map_err(|source| DbError::Parse { path: path.to_path_buf(), source })?;
        db.validate(path)?;
        debug!(path = %path.display(), count = db.tasks.len(), "loaded tasks");
        Ok(db)
    }

    fn validate(&self, path: &Path) -> Result<(), DbError> {
        for (i, task) in self.tasks.iter().enumerate() {
            if task.title.trim().is_empty() {
                return Err(DbError::Invalid {
                    path: path.to_path_buf(),
                    position: i + 1,
                    reason: "title is empty".into(),
                });
            }
        }
        Ok(())
    }

    /// Save the whole list as pretty JSON, writing a temp file and renaming it over `path`.
    pub fn save(&self, path: &Path) -> Result<(), DbError> {
        let data = serde_json::to_string_pretty(self).map_err(DbError::Serialize)?;
        let tmp = temp_path(path);
        let written = File::create(&tmp)
            .and_then(|mut f| {
                f.write_all(data.as_bytes())?;
                f.flush()
            })
            .and_then(|_| fs::rename(&tmp, path));
        if let Err(source) = written {
            let _ = fs::remove_file(&tmp);
            return Err(DbError::Write { path: path.to_path_buf(), source });
        }
        debug!(path = %path.display(), count = self.tasks.len(), "saved tasks");
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Get a task by 1-based position.
    #[cfg(test)]
    pub fn get(&self, position: usize) -> Option<&Task> {
        position.checked_sub(1).and_then(|i| self.tasks.get(i))
    }

    /// Append a new pending task. The title is trimmed and must not be empty.
    pub fn add(&mut self, title: &str) -> Result<&Task, TaskError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(TaskError::EmptyTitle);
        }
        self.tasks.push(Task::new(title));
        Ok(&self.tasks[self.tasks.len() - 1])
    }

    /// Parse user input as a 1-based position into the current list.
    pub fn resolve_position(&self, input: &str) -> Result<usize, TaskError> {
        let input = input.trim();
        let index: i64 = input
            .parse()
            .map_err(|_| TaskError::NotANumber(input.to_string()))?;
        let len = self.tasks.len();
        if index < 1 || index as u64 > len as u64 {
            return Err(TaskError::OutOfRange { index, len });
        }
        Ok(index as usize)
    }

    fn check_position(&self, position: usize) -> Result<usize, TaskError> {
        let len = self.tasks.len();
        if position == 0 || position > len {
            return Err(TaskError::OutOfRange { index: position as i64, len });
        }
        Ok(position - 1)
    }

    /// Mark the task at a 1-based position as done.
    pub fn complete(&mut self, position: usize) -> Result<&Task, TaskError> {
        let i = self.check_position(position)?;
        self.tasks[i].done = true;
        Ok(&self.tasks[i])
    }

    /// Remove and return the task at a 1-based position. Later positions shift down.
    pub fn delete(&mut self, position: usize) -> Result<Task, TaskError> {
        let i = self.check_position(position)?;
        Ok(self.tasks.remove(i))
    }

    /// Drop every done task and return how many were removed.
    pub fn clear_completed(&mut self) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|t| !t.done);
        before - self.tasks.len()
    }

    /// Numbered listing of the tasks passing `filter`, one line per task.
    ///
    /// Numbers are positions in the full list, so a filtered view can still be
    /// used to pick the index for complete or delete.
    pub fn render(&self, filter: Filter) -> String {
        if self.tasks.is_empty() {
            return format!("{EMPTY_LIST}\n");
        }
        let mut out = String::new();
        for (i, t) in self.tasks.iter().enumerate() {
            if !filter.matches(t.done) {
                continue;
            }
            out.push_str(&format!(
                "  {:>2}. {} {:<35} {}\n",
                i + 1,
                t.mark(),
                t.title,
                t.created
            ));
        }
        if out.is_empty() {
            out.push_str(NO_MATCHES);
            out.push('\n');
        }
        out
    }
}

/// Sibling temp file used for the write-then-rename in [`Database::save`].
fn temp_path(path: &Path) -> PathBuf {
    match path.file_name() {
        Some(name) => {
            let mut name = name.to_os_string();
            name.push(".tmp");
            path.with_file_name(name)
        }
        None => path.with_extension("tmp"),
    }
}
