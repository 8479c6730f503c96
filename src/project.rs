//! Project registry: the ordered list of project names.
//!
//! Projects are plain labels. Two of them, `Personal` and `Work`, are always
//! present and can never be removed; any other project can only be removed
//! once no task refers to it.

use tracing::debug;

use crate::error::{Error, Result};
use crate::task::Task;

/// Project names seeded into every registry and protected from deletion.
pub const RESERVED_PROJECTS: [&str; 2] = ["Personal", "Work"];

/// Whether `name` is one of the reserved default projects.
pub fn is_reserved(name: &str) -> bool {
    RESERVED_PROJECTS.contains(&name)
}

/// Ordered, duplicate-free collection of project names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRegistry {
    names: Vec<String>,
}

impl Default for ProjectRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectRegistry {
    /// A registry holding exactly the reserved defaults.
    pub fn new() -> Self {
        ProjectRegistry {
            names: RESERVED_PROJECTS.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Register a new project.
    ///
    /// # Errors
    /// [`Error::Validation`] when `name` is blank or already registered
    /// (exact, case-sensitive match).
    pub fn add_project(&mut self, name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(Error::Validation("Project name required".into()));
        }
        if self.contains(name) {
            return Err(Error::Validation(format!("Project '{name}' already exists")));
        }
        self.names.push(name.to_string());
        debug!(project = name, "added project");
        Ok(())
    }

    /// Remove a project that no task references.
    ///
    /// # Errors
    /// - [`Error::Protected`] for a reserved project.
    /// - [`Error::InUse`] with the number of tasks still tagged with `name`.
    /// - [`Error::NotFound`] when `name` is not registered.
    pub fn delete_project(&mut self, name: &str, tasks: &[Task]) -> Result<()> {
        if is_reserved(name) {
            return Err(Error::Protected(name.to_string()));
        }
        let count = tasks.iter().filter(|t| t.project == name).count();
        if count > 0 {
            return Err(Error::InUse {
                project: name.to_string(),
                count,
            });
        }
        let Some(idx) = self.names.iter().position(|n| n == name) else {
            return Err(Error::NotFound(format!("project '{name}'")));
        };
        self.names.remove(idx);
        debug!(project = name, "deleted project");
        Ok(())
    }

    /// Append previously saved names that are not yet registered, keeping
    /// their order. Blank names are skipped.
    pub fn restore<I, N>(&mut self, names: I)
    where
        I: IntoIterator<Item = N>,
        N: AsRef<str>,
    {
        for name in names {
            let name = name.as_ref();
            if !name.trim().is_empty() && !self.contains(name) {
                self.names.push(name.to_string());
            }
        }
    }

    /// Register any project referenced by `tasks` that is missing, so every
    /// task stays reachable through a project filter. Returns the names added.
    pub fn adopt_in_use(&mut self, tasks: &[Task]) -> Vec<String> {
        let mut adopted = Vec::new();
        for t in tasks {
            if !t.project.trim().is_empty() && !self.contains(&t.project) {
                self.names.push(t.project.clone());
                adopted.push(t.project.clone());
            }
        }
        adopted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::Priority;

    fn task_in(project: &str) -> Task {
        Task::new("t", project, Priority::Medium).unwrap()
    }

    #[test]
    fn starts_with_defaults() {
        assert_eq!(ProjectRegistry::new().names(), ["Personal", "Work"]);
    }

    #[test]
    fn add_rejects_blank_and_duplicate() {
        let mut reg = ProjectRegistry::new();
        assert!(matches!(reg.add_project("   "), Err(Error::Validation(_))));
        assert!(matches!(reg.add_project("Work"), Err(Error::Validation(_))));
        reg.add_project("work").unwrap();
        reg.add_project("Errands").unwrap();
        assert_eq!(reg.names(), ["Personal", "Work", "work", "Errands"]);
    }

    #[test]
    fn reserved_projects_cannot_be_deleted() {
        let mut reg = ProjectRegistry::new();
        assert!(matches!(
            reg.delete_project("Personal", &[]),
            Err(Error::Protected(_))
        ));
        assert!(matches!(
            reg.delete_project("Work", &[task_in("Work")]),
            Err(Error::Protected(_))
        ));
        assert_eq!(reg.names().len(), 2);
    }

    #[test]
    fn delete_blocked_while_tasks_reference_project() {
        let mut reg = ProjectRegistry::new();
        reg.add_project("Errands").unwrap();
        let tasks = vec![task_in("Errands"), task_in("Work"), task_in("Errands")];
        match reg.delete_project("Errands", &tasks) {
            Err(Error::InUse { project, count }) => {
                assert_eq!(project, "Errands");
                assert_eq!(count, 2);
            }
            other => panic!("expected InUse, got {other:?}"),
        }
        assert!(reg.contains("Errands"));

        reg.delete_project("Errands", &tasks[1..2]).unwrap();
        assert!(!reg.contains("Errands"));
    }

    #[test]
    fn delete_unknown_is_not_found() {
        let mut reg = ProjectRegistry::new();
        assert!(matches!(
            reg.delete_project("Ghost", &[]),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn restore_and_adopt_skip_known_names() {
        let mut reg = ProjectRegistry::new();
        reg.restore(["Work", "Errands", "", "Errands"]);
        assert_eq!(reg.names(), ["Personal", "Work", "Errands"]);

        let adopted = reg.adopt_in_use(&[task_in("Garden"), task_in("Work")]);
        assert_eq!(adopted, ["Garden"]);
        assert_eq!(reg.names(), ["Personal", "Work", "Errands", "Garden"]);
    }
}
