//! Task data structure and related functionality.
//!
//! This module defines the core `Task` struct that represents a single work
//! item, its on-disk JSON shape, and the creation boundary that validates
//! user input before a task ever reaches the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::fields::Priority;

/// A single trackable work item.
///
/// Only `completed` changes after creation; every other field is fixed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub project: String,
    pub priority: Priority,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Build a new task from form input, assigning a fresh id and timestamp.
    ///
    /// # Errors
    /// Returns [`Error::Validation`] when the title or project is blank.
    pub fn new(title: &str, project: &str, priority: Priority) -> Result<Self> {
        if title.trim().is_empty() {
            return Err(Error::Validation("Task name required".into()));
        }
        if project.trim().is_empty() {
            return Err(Error::Validation("Project required".into()));
        }
        Ok(Task {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            project: project.to_string(),
            priority,
            completed: false,
            created_at: Utc::now(),
        })
    }
}

/// The fixed two-item data set used on first run or after a failed load.
pub fn seed_tasks() -> Vec<Task> {
    let now = Utc::now();
    vec![
        Task {
            id: "1".into(),
            title: "Create project plan".into(),
            project: "Work".into(),
            priority: Priority::High,
            completed: false,
            created_at: now,
        },
        Task {
            id: "2".into(),
            title: "Buy groceries".into(),
            project: "Personal".into(),
            priority: Priority::Medium,
            completed: false,
            created_at: now,
        },
    ]
}
