//! The task store: authoritative in-memory task list with write-through
//! persistence.
//!
//! Tasks are kept newest-first. Every mutation writes the full list back to
//! the durable store before returning.

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::fields::{ProjectFilter, View};
use crate::storage::{KeyValueStore, Persistence};
use crate::task::{seed_tasks, Task};

/// How [`TaskStore::load_or_seed`] obtained its initial tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A persisted snapshot was adopted as-is.
    Restored(usize),
    /// Nothing was stored; the seed set was installed.
    SeededFresh,
    /// The stored snapshot was unreadable; the seed set was installed.
    SeededAfterError(String),
}

/// Summary counts for the task list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    /// Completed share in whole percent, 0 when there are no tasks.
    pub completion_rate: u8,
}

/// Ordered task collection backed by a [`Persistence`] adapter.
#[derive(Debug)]
pub struct TaskStore<S: KeyValueStore> {
    tasks: Vec<Task>,
    persistence: Persistence<S>,
}

impl<S: KeyValueStore> TaskStore<S> {
    /// Create an empty store over `persistence`. Call [`TaskStore::load_or_seed`]
    /// to populate it.
    pub fn new(persistence: Persistence<S>) -> Self {
        TaskStore {
            tasks: Vec::new(),
            persistence,
        }
    }

    pub fn persistence(&self) -> &Persistence<S> {
        &self.persistence
    }

    pub(crate) fn persistence_mut(&mut self) -> &mut Persistence<S> {
        &mut self.persistence
    }

    /// Adopt the persisted snapshot, or fall back to the seed set.
    ///
    /// A missing or unreadable snapshot never fails this call; unreadable
    /// data is logged and reported through the returned outcome. The seed set
    /// is written through so the next start restores it.
    pub fn load_or_seed(&mut self) -> LoadOutcome {
        let outcome = match self.persistence.load() {
            Ok(Some(tasks)) => {
                info!(count = tasks.len(), "restored saved tasks");
                self.tasks = tasks;
                return LoadOutcome::Restored(self.tasks.len());
            }
            Ok(None) => {
                info!("no saved tasks, installing defaults");
                LoadOutcome::SeededFresh
            }
            Err(e) => {
                warn!(error = %e, "failed to load saved tasks, installing defaults");
                LoadOutcome::SeededAfterError(e.to_string())
            }
        };
        self.tasks = seed_tasks();
        if let Err(e) = self.persistence.save(&self.tasks) {
            warn!(error = %e, "failed to persist default tasks");
        }
        outcome
    }

    /// All tasks, newest first.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Insert a fully formed task at the front of the list.
    ///
    /// In-memory state only changes once the write-through succeeds.
    pub fn add_task(&mut self, task: Task) -> Result<()> {
        debug!(id = %task.id, project = %task.project, "add task");
        let mut next = Vec::with_capacity(self.tasks.len() + 1);
        next.push(task);
        next.extend(self.tasks.iter().cloned());
        self.commit(next)
    }

    /// Flip the completion flag of `id`. Unknown ids are ignored.
    ///
    /// Returns the new flag when the task exists.
    pub fn toggle_complete(&mut self, id: &str) -> Result<Option<bool>> {
        let mut next = self.tasks.clone();
        let toggled = next.iter_mut().find(|t| t.id == id).map(|t| {
            t.completed = !t.completed;
            t.completed
        });
        debug!(id, ?toggled, "toggle task");
        self.commit(next)?;
        Ok(toggled)
    }

    /// Remove the task `id`. Unknown ids are ignored.
    ///
    /// Returns the removed task when there was one.
    pub fn delete_task(&mut self, id: &str) -> Result<Option<Task>> {
        let mut next = self.tasks.clone();
        let removed = next
            .iter()
            .position(|t| t.id == id)
            .map(|idx| next.remove(idx));
        debug!(id, removed = removed.is_some(), "delete task");
        self.commit(next)?;
        Ok(removed)
    }

    /// Persist `next` and adopt it. On a failed save the current list is kept.
    fn commit(&mut self, next: Vec<Task>) -> Result<()> {
        self.persistence.save(&next)?;
        self.tasks = next;
        Ok(())
    }

    /// Tasks passing both the completion view and the project filter, in
    /// store order.
    pub fn filter_tasks(&self, view: View, project: &ProjectFilter) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| view.admits(t.completed) && project.admits(&t.project))
            .collect()
    }

    /// Distinct project names referenced by at least one task, in order of
    /// first appearance.
    pub fn projects_in_use(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for t in &self.tasks {
            if !seen.iter().any(|p| p == &t.project) {
                seen.push(t.project.clone());
            }
        }
        seen
    }

    /// Number of tasks tagged with `project`.
    pub fn count_in_project(&self, project: &str) -> usize {
        self.tasks.iter().filter(|t| t.project == project).count()
    }

    pub fn stats(&self) -> TaskStats {
        let total = self.tasks.len();
        let completed = self.tasks.iter().filter(|t| t.completed).count();
        let completion_rate = if total > 0 {
            ((completed as f64 / total as f64) * 100.0).round() as u8
        } else {
            0
        };
        TaskStats {
            total,
            completed,
            pending: total - completed,
            completion_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::Priority;
    use crate::storage::{MemoryStore, TASKS_KEY};

    fn seeded() -> TaskStore<MemoryStore> {
        let mut store = TaskStore::new(Persistence::new(MemoryStore::new()));
        assert_eq!(store.load_or_seed(), LoadOutcome::SeededFresh);
        store
    }

    #[test]
    fn first_run_seeds_two_tasks() {
        let store = seeded();
        let tasks = store.tasks();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].title, "Create project plan");
        assert_eq!(tasks[0].project, "Work");
        assert_eq!(tasks[0].priority, Priority::High);
        assert_eq!(tasks[1].title, "Buy groceries");
        assert_eq!(tasks[1].project, "Personal");
        assert_eq!(tasks[1].priority, Priority::Medium);
        assert!(tasks.iter().all(|t| !t.completed));
        // seed is written through
        assert!(store.persistence().load().unwrap().is_some());
    }

    #[test]
    fn corrupt_snapshot_falls_back_to_seed() {
        let mut kv = MemoryStore::new();
        kv.set(TASKS_KEY, "this is not json").unwrap();
        let mut store = TaskStore::new(Persistence::new(kv));
        assert!(matches!(store.load_or_seed(), LoadOutcome::SeededAfterError(_)));
        assert_eq!(store.tasks().len(), 2);
    }

    #[test]
    fn saved_snapshot_is_adopted_as_is() {
        let mut kv = MemoryStore::new();
        kv.set(TASKS_KEY, "[]").unwrap();
        let mut store = TaskStore::new(Persistence::new(kv));
        assert_eq!(store.load_or_seed(), LoadOutcome::Restored(0));
        assert!(store.tasks().is_empty());
    }

    #[test]
    fn add_puts_task_first_and_persists() {
        let mut store = seeded();
        let task = Task::new("X", "Personal", Priority::Low).unwrap();
        let id = task.id.clone();
        store.add_task(task).unwrap();

        assert_eq!(store.tasks().len(), 3);
        assert_eq!(store.tasks()[0].id, id);
        let saved = store.persistence().load().unwrap().unwrap();
        assert_eq!(saved[0].id, id);
    }

    #[test]
    fn toggle_twice_restores_flag() {
        let mut store = seeded();
        assert_eq!(store.toggle_complete("1").unwrap(), Some(true));
        assert!(store.get("1").unwrap().completed);
        assert_eq!(store.toggle_complete("1").unwrap(), Some(false));
        assert!(!store.get("1").unwrap().completed);
    }

    #[test]
    fn unknown_ids_are_no_ops() {
        let mut store = seeded();
        let before = store.tasks().to_vec();
        assert_eq!(store.toggle_complete("nope").unwrap(), None);
        assert_eq!(store.delete_task("nope").unwrap(), None);
        assert_eq!(store.tasks(), &before[..]);
    }

    #[test]
    fn delete_removes_matching_task() {
        let mut store = seeded();
        let removed = store.delete_task("2").unwrap().unwrap();
        assert_eq!(removed.title, "Buy groceries");
        assert_eq!(store.tasks().len(), 1);
        assert!(store.get("2").is_none());
    }

    #[test]
    fn active_and_completed_partition_all() {
        let mut store = seeded();
        store
            .add_task(Task::new("third", "Work", Priority::Low).unwrap())
            .unwrap();
        store.toggle_complete("2").unwrap();

        let all = store.filter_tasks(View::All, &ProjectFilter::All);
        let active = store.filter_tasks(View::Active, &ProjectFilter::All);
        let done = store.filter_tasks(View::Completed, &ProjectFilter::All);
        assert_eq!(all.len(), 3);
        assert_eq!(active.len() + done.len(), all.len());
        assert!(active.iter().all(|t| !t.completed));
        assert!(done.iter().all(|t| t.completed));
        assert_eq!(done[0].id, "2");
    }

    #[test]
    fn filters_combine_and_keep_order() {
        let mut store = seeded();
        store
            .add_task(Task::new("newest work", "Work", Priority::Low).unwrap())
            .unwrap();
        let work = store.filter_tasks(View::Active, &ProjectFilter::from("Work"));
        let titles: Vec<_> = work.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["newest work", "Create project plan"]);
        assert!(store
            .filter_tasks(View::Completed, &ProjectFilter::from("Work"))
            .is_empty());
    }

    #[test]
    fn projects_in_use_in_first_seen_order() {
        let mut store = seeded();
        store
            .add_task(Task::new("a", "Errands", Priority::Low).unwrap())
            .unwrap();
        store
            .add_task(Task::new("b", "Work", Priority::Low).unwrap())
            .unwrap();
        assert_eq!(store.projects_in_use(), ["Work", "Errands", "Personal"]);
    }

    #[test]
    fn stats_round_completion_rate() {
        let mut store = seeded();
        assert_eq!(
            store.stats(),
            TaskStats { total: 2, completed: 0, pending: 2, completion_rate: 0 }
        );
        store
            .add_task(Task::new("c", "Work", Priority::Low).unwrap())
            .unwrap();
        store.toggle_complete("1").unwrap();
        let stats = store.stats();
        assert_eq!((stats.completed, stats.pending), (1, 2));
        assert_eq!(stats.completion_rate, 33);
    }
}
