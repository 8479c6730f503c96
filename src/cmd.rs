//! Command implementations for the CLI interface.
//!
//! Each handler validates its input at the form boundary, calls into the
//! [`Tracker`], and prints the outcome.

use clap::{Subcommand, ValueEnum};
use clap_complete::{generate, Shell};

use chrono::Local;

use crate::error::{Error, Result};
use crate::fields::{Priority, ProjectFilter, View};
use crate::project::is_reserved;
use crate::storage::KeyValueStore;
use crate::task::Task;
use crate::tracker::Tracker;

/// Width of the id column; ids are shown as prefixes.
const ID_WIDTH: usize = 8;

#[derive(Subcommand)]
pub enum Commands {
    /// Add a new task.
    Add {
        /// Short title for the task.
        title: String,
        /// Project name. Defaults to the first registered project.
        #[arg(long, short)]
        project: Option<String>,
        /// Priority: low | medium | high.
        #[arg(long, value_enum, default_value_t = Priority::Medium)]
        priority: Priority,
    },

    /// List tasks, optionally filtered.
    List {
        /// Completion view: all | active | completed.
        #[arg(long, value_enum, default_value_t = View::All)]
        view: View,
        /// Project name, or "all".
        #[arg(long, default_value = "all")]
        project: ProjectFilter,
    },

    /// Toggle a task between done and not done.
    Toggle {
        /// Task ID, title, or ID prefix.
        id: String,
    },

    /// Delete a task.
    Delete {
        /// Task ID, title, or ID prefix.
        id: String,
    },

    /// Manage projects.
    Project {
        #[command(subcommand)]
        action: ProjectAction,
    },

    /// Show totals and completion rate.
    Stats,

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ProjectAction {
    /// List registered projects with task counts.
    List {
        /// Only projects that tasks currently use.
        #[arg(long)]
        in_use: bool,
    },
    /// Register a new project.
    Add {
        name: String,
    },
    /// Remove a project that has no tasks.
    Rm {
        name: String,
    },
}

/// Add a task built from CLI input.
pub fn cmd_add<S: KeyValueStore>(
    tracker: &mut Tracker<S>,
    title: String,
    project: Option<String>,
    priority: Priority,
) -> Result<()> {
    let project = match project {
        Some(p) => p,
        None => tracker
            .projects()
            .names()
            .first()
            .cloned()
            .unwrap_or_else(|| "Personal".to_string()),
    };
    let id = tracker.create_task(&title, &project, priority)?;
    println!("Added task {} to {}", short_id(&id), project);
    Ok(())
}

/// Print tasks passing the view and project filters.
pub fn cmd_list<S: KeyValueStore>(tracker: &Tracker<S>, view: View, project: ProjectFilter) {
    let tasks = tracker.filter_tasks(view, &project);
    if tasks.is_empty() {
        let total = tracker.tasks().len();
        if total == 0 {
            println!("No tasks yet. Add one with `tf add`.");
        } else {
            println!(
                "No tasks match view '{}' and project '{}'.",
                view_name(view),
                project
            );
        }
        return;
    }
    print_table(&tasks);
}

/// Toggle completion of the task named by `identifier`.
pub fn cmd_toggle<S: KeyValueStore>(tracker: &mut Tracker<S>, identifier: String) -> Result<()> {
    let Some(id) = resolve_task_identifier(&identifier, tracker.tasks())? else {
        println!("No task matches '{identifier}'; nothing changed.");
        return Ok(());
    };
    match tracker.toggle_complete(&id)? {
        Some(true) => println!("Marked {} done.", short_id(&id)),
        Some(false) => println!("Reopened {}.", short_id(&id)),
        None => println!("No task matches '{identifier}'; nothing changed."),
    }
    Ok(())
}

/// Delete the task named by `identifier`.
pub fn cmd_delete<S: KeyValueStore>(tracker: &mut Tracker<S>, identifier: String) -> Result<()> {
    let Some(id) = resolve_task_identifier(&identifier, tracker.tasks())? else {
        println!("No task matches '{identifier}'; nothing changed.");
        return Ok(());
    };
    if let Some(task) = tracker.delete_task(&id)? {
        println!("Task deleted: {}", task.title);
    }
    Ok(())
}

/// Handle `tf project ...`.
pub fn cmd_project<S: KeyValueStore>(tracker: &mut Tracker<S>, action: ProjectAction) -> Result<()> {
    match action {
        ProjectAction::List { in_use } => {
            let names = if in_use {
                tracker.projects_in_use()
            } else {
                tracker.projects().names().to_vec()
            };
            println!("{:<20} {:>5}", "Project", "Tasks");
            for name in names {
                let marker = if is_reserved(&name) { " *" } else { "" };
                println!(
                    "{:<20} {:>5}{}",
                    truncate(&name, 20),
                    tracker.task_store().count_in_project(&name),
                    marker
                );
            }
        }
        ProjectAction::Add { name } => {
            if name == ProjectFilter::ALL_SENTINEL {
                return Err(Error::Validation(format!(
                    "'{name}' is reserved for the project filter"
                )));
            }
            tracker.add_project(&name)?;
            println!("Project \"{name}\" has been added successfully");
        }
        ProjectAction::Rm { name } => {
            tracker.delete_project(&name)?;
            println!("Project \"{name}\" has been removed");
        }
    }
    Ok(())
}

/// Print summary statistics.
pub fn cmd_stats<S: KeyValueStore>(tracker: &Tracker<S>) {
    let stats = tracker.stats();
    println!("Total tasks:     {}", stats.total);
    println!("Completed:       {}", stats.completed);
    println!("Pending:         {}", stats.pending);
    println!("Completion rate: {}%", stats.completion_rate);
}

/// Generate shell completion scripts.
pub fn cmd_completions(shell: Shell) {
    use crate::cli::Cli;
    use clap::CommandFactory;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut std::io::stdout());
}

/// Resolve a task identifier (full ID, title, or unique ID prefix) to a task ID.
///
/// Lookups are tried in that order, so an exact title always beats an id
/// prefix. Returns `Ok(None)` when nothing matches, and an error listing the
/// candidates when a title or prefix is ambiguous.
pub fn resolve_task_identifier(identifier: &str, tasks: &[Task]) -> Result<Option<String>> {
    if identifier.trim().is_empty() {
        return Err(Error::Validation("Task ID or name required".into()));
    }
    if let Some(t) = tasks.iter().find(|t| t.id == identifier) {
        return Ok(Some(t.id.clone()));
    }

    let wanted = identifier.to_lowercase();
    let by_title: Vec<&Task> = tasks
        .iter()
        .filter(|t| t.title.to_lowercase() == wanted)
        .collect();
    let matches: Vec<&Task> = if by_title.is_empty() {
        tasks
            .iter()
            .filter(|t| t.id.starts_with(identifier))
            .collect()
    } else {
        by_title
    };

    match matches.len() {
        0 => Ok(None),
        1 => Ok(Some(matches[0].id.clone())),
        _ => {
            let mut msg = format!("Multiple tasks match '{identifier}':\n");
            for task in matches {
                msg.push_str(&format!("  {}: {} [{}]\n", task.id, task.title, task.project));
            }
            msg.push_str("Please use the full ID instead.");
            Err(Error::Validation(msg))
        }
    }
}

/// Print tasks in a formatted table.
pub fn print_table(tasks: &[&Task]) {
    println!(
        "{:<8} {:<4} {:<6} {:<14} {:<16} {}",
        "ID", "Done", "Pri", "Project", "Created", "Title"
    );
    for t in tasks {
        let created = t.created_at.with_timezone(&Local).format("%Y-%m-%d %H:%M");
        println!(
            "{:<8} {:<4} {:<6} {:<14} {:<16} {}",
            short_id(&t.id),
            if t.completed { "[x]" } else { "[ ]" },
            t.priority,
            truncate(&t.project, 14),
            created.to_string(),
            t.title
        );
    }
}

fn short_id(id: &str) -> &str {
    match id.char_indices().nth(ID_WIDTH) {
        Some((idx, _)) => &id[..idx],
        None => id,
    }
}

fn view_name(view: View) -> String {
    view.to_possible_value()
        .map(|v| v.get_name().to_string())
        .unwrap_or_default()
}

/// Truncate a string to a maximum width, adding ellipsis if needed.
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out = String::new();
        for (i, ch) in s.chars().enumerate() {
            if i + 1 >= width {
                out.push('…');
                break;
            }
            out.push(ch);
        }
        out
    }
}
