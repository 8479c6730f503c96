//! Application state: the task store and project registry together.
//!
//! A [`Tracker`] is the single owned object a front end holds for its whole
//! lifetime. It routes every mutation through the store or the registry,
//! persists the result, and then tells subscribed listeners what changed.

use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::fields::{Priority, ProjectFilter, View};
use crate::project::ProjectRegistry;
use crate::storage::{KeyValueStore, Persistence};
use crate::store::{LoadOutcome, TaskStats, TaskStore};
use crate::task::Task;

/// State change pushed to listeners after a successful mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackerEvent {
    Loaded(LoadOutcome),
    TaskAdded { id: String },
    TaskToggled { id: String, completed: bool },
    TaskDeleted { id: String },
    ProjectAdded { name: String },
    ProjectDeleted { name: String },
}

type Listener = Box<dyn FnMut(&TrackerEvent)>;

/// Owned task/project state with write-through persistence.
pub struct Tracker<S: KeyValueStore> {
    store: TaskStore<S>,
    projects: ProjectRegistry,
    listeners: Vec<Listener>,
}

impl<S: KeyValueStore> Tracker<S> {
    /// Open a tracker over `kv`, loading saved state or installing defaults.
    pub fn open(kv: S) -> Self {
        let mut tracker = Tracker {
            store: TaskStore::new(Persistence::new(kv)),
            projects: ProjectRegistry::new(),
            listeners: Vec::new(),
        };
        tracker.reload();
        tracker
    }

    /// Discard in-memory state and load it again from the durable store.
    pub fn reload(&mut self) -> LoadOutcome {
        self.projects = ProjectRegistry::new();
        let outcome = self.store.load_or_seed();
        match self.store.persistence().load_projects() {
            Ok(Some(names)) => self.projects.restore(names),
            Ok(None) => {}
            Err(e) => warn!(error = %e, "failed to load saved projects, using defaults"),
        }
        let adopted = self.projects.adopt_in_use(self.store.tasks());
        if !adopted.is_empty() {
            info!(?adopted, "registered projects referenced by saved tasks");
        }
        self.notify(TrackerEvent::Loaded(outcome.clone()));
        outcome
    }

    /// Register a listener called after every state change.
    pub fn subscribe(&mut self, listener: impl FnMut(&TrackerEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    fn notify(&mut self, event: TrackerEvent) {
        for listener in self.listeners.iter_mut() {
            listener(&event);
        }
    }

    pub fn tasks(&self) -> &[Task] {
        self.store.tasks()
    }

    pub fn task_store(&self) -> &TaskStore<S> {
        &self.store
    }

    pub fn projects(&self) -> &ProjectRegistry {
        &self.projects
    }

    /// Create a task from form input and add it at the front.
    ///
    /// The project must already be registered. Returns the new task's id.
    pub fn create_task(&mut self, title: &str, project: &str, priority: Priority) -> Result<String> {
        if !self.projects.contains(project) {
            return Err(Error::Validation(format!("Unknown project '{project}'")));
        }
        let task = Task::new(title, project, priority)?;
        let id = task.id.clone();
        self.add_task(task)?;
        Ok(id)
    }

    /// Add a fully formed task without validation.
    pub fn add_task(&mut self, task: Task) -> Result<()> {
        let id = task.id.clone();
        self.store.add_task(task)?;
        self.notify(TrackerEvent::TaskAdded { id });
        Ok(())
    }

    /// Flip completion of `id`; unknown ids change nothing.
    pub fn toggle_complete(&mut self, id: &str) -> Result<Option<bool>> {
        let toggled = self.store.toggle_complete(id)?;
        if let Some(completed) = toggled {
            self.notify(TrackerEvent::TaskToggled {
                id: id.to_string(),
                completed,
            });
        }
        Ok(toggled)
    }

    /// Delete `id`; unknown ids change nothing.
    pub fn delete_task(&mut self, id: &str) -> Result<Option<Task>> {
        let removed = self.store.delete_task(id)?;
        if removed.is_some() {
            self.notify(TrackerEvent::TaskDeleted { id: id.to_string() });
        }
        Ok(removed)
    }

    pub fn filter_tasks(&self, view: View, project: &ProjectFilter) -> Vec<&Task> {
        self.store.filter_tasks(view, project)
    }

    pub fn projects_in_use(&self) -> Vec<String> {
        self.store.projects_in_use()
    }

    pub fn stats(&self) -> TaskStats {
        self.store.stats()
    }

    /// Register a project. The registry only changes once it is saved.
    pub fn add_project(&mut self, name: &str) -> Result<()> {
        let mut next = self.projects.clone();
        next.add_project(name)?;
        self.commit_projects(next)?;
        self.notify(TrackerEvent::ProjectAdded {
            name: name.to_string(),
        });
        Ok(())
    }

    /// Remove a project no task uses. The registry only changes once it is saved.
    pub fn delete_project(&mut self, name: &str) -> Result<()> {
        let mut next = self.projects.clone();
        next.delete_project(name, self.store.tasks())?;
        self.commit_projects(next)?;
        self.notify(TrackerEvent::ProjectDeleted {
            name: name.to_string(),
        });
        Ok(())
    }

    fn commit_projects(&mut self, next: ProjectRegistry) -> Result<()> {
        self.store.persistence_mut().save_projects(next.names())?;
        self.projects = next;
        Ok(())
    }
}
