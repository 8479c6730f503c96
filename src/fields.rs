//! Enumerations and field types for task management.
//!
//! This module defines the small closed sets used to categorise and select
//! tasks: priority levels, completion views and the project filter.

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Priority classification for task importance.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Wire and CLI spelling of the priority.
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Completion-status view over the task list.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum View {
    /// Every task.
    #[default]
    All,
    /// Tasks not yet completed.
    Active,
    /// Completed tasks only.
    Completed,
}

impl View {
    /// Whether a task with the given completion flag is visible in this view.
    pub fn admits(self, completed: bool) -> bool {
        match self {
            View::All => true,
            View::Active => !completed,
            View::Completed => completed,
        }
    }
}

/// Project selector for list filtering.
///
/// Parsing maps the sentinel `"all"` to [`ProjectFilter::All`]; any other
/// string is taken as an exact project name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ProjectFilter {
    #[default]
    All,
    Named(String),
}

impl ProjectFilter {
    pub const ALL_SENTINEL: &'static str = "all";

    /// Whether a task tagged with `project` passes this filter.
    pub fn admits(&self, project: &str) -> bool {
        match self {
            ProjectFilter::All => true,
            ProjectFilter::Named(name) => name == project,
        }
    }
}

impl From<&str> for ProjectFilter {
    fn from(value: &str) -> Self {
        if value == Self::ALL_SENTINEL {
            ProjectFilter::All
        } else {
            ProjectFilter::Named(value.to_string())
        }
    }
}

impl FromStr for ProjectFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ProjectFilter::from(s))
    }
}

impl fmt::Display for ProjectFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectFilter::All => f.pad(Self::ALL_SENTINEL),
            ProjectFilter::Named(name) => f.pad(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Priority::High).unwrap(), "\"high\"");
        let p: Priority = serde_json::from_str("\"low\"").unwrap();
        assert_eq!(p, Priority::Low);
        assert!(serde_json::from_str::<Priority>("\"urgent\"").is_err());
    }

    #[test]
    fn view_admits_by_completion() {
        assert!(View::All.admits(true) && View::All.admits(false));
        assert!(View::Active.admits(false) && !View::Active.admits(true));
        assert!(View::Completed.admits(true) && !View::Completed.admits(false));
    }

    #[test]
    fn project_filter_parses_sentinel() {
        assert_eq!("all".parse::<ProjectFilter>().unwrap(), ProjectFilter::All);
        assert_eq!(
            "Work".parse::<ProjectFilter>().unwrap(),
            ProjectFilter::Named("Work".into())
        );
        // exact, case-sensitive match
        assert!(!ProjectFilter::from("work").admits("Work"));
    }
}
