//! Library-level error type.

/// Errors reported by the task store, project registry and persistence layer.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Rejected input: empty or duplicate project name, empty task title.
    #[error("{0}")]
    Validation(String),

    /// Attempt to delete one of the reserved default projects.
    #[error("Project '{0}' is a default project and cannot be deleted")]
    Protected(String),

    /// Attempt to delete a project that tasks still reference.
    #[error(
        "There are {count} tasks assigned to project '{project}'. Please reassign or delete them first."
    )]
    InUse { project: String, count: usize },

    /// Persisted snapshot could not be parsed.
    #[error("Failed to parse saved {key}: {source}")]
    Deserialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for TaskFlow operations.
pub type Result<T> = std::result::Result<T, Error>;
