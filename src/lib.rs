//! # TaskFlow
//!
//! A small local task tracker. Tasks carry a title, a project and a priority,
//! can be marked complete, and are kept newest-first. Projects are labels;
//! `Personal` and `Work` always exist, and other projects can only be removed
//! once no task uses them.
//!
//! State lives in a [`Tracker`], which owns the [`TaskStore`] and the
//! [`ProjectRegistry`] and writes every change straight through to a
//! [`KeyValueStore`] as JSON. The `tf` binary is a thin CLI over it.
//!
//! ```
//! use taskflow::{MemoryStore, Priority, ProjectFilter, Tracker, View};
//!
//! let mut tracker = Tracker::open(MemoryStore::new());
//! let id = tracker.create_task("Water plants", "Personal", Priority::Low)?;
//! tracker.toggle_complete(&id)?;
//!
//! let done = tracker.filter_tasks(View::Completed, &ProjectFilter::All);
//! assert_eq!(done[0].title, "Water plants");
//! # Ok::<(), taskflow::Error>(())
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod error;
pub mod fields;
pub mod project;
pub mod storage;
pub mod store;
pub mod task;
pub mod tracker;

pub use error::{Error, Result};
pub use fields::{Priority, ProjectFilter, View};
pub use project::{ProjectRegistry, RESERVED_PROJECTS};
pub use storage::{FileStore, KeyValueStore, MemoryStore, Persistence};
pub use store::{LoadOutcome, TaskStats, TaskStore};
pub use task::Task;
pub use tracker::{Tracker, TrackerEvent};
