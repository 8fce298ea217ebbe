//! Error types for the store, the registry, and command routing.

use std::path::PathBuf;

/// Failures raised by the SQLite-backed store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("database not found at {}", .0.display())]
    Missing(PathBuf),
    #[error("database already exists at {}", .0.display())]
    AlreadyExists(PathBuf),
}

/// Typed outcomes of registry operations. Absence is reported through `Option`.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("warp '{0}' already exists")]
    DuplicateName(String),
    #[error("warp name cannot be empty")]
    EmptyName,
    #[error("storage failure: {0}")]
    Storage(#[from] StoreError),
}

/// Everything that can stop a `/warp` invocation. Each variant renders as the
/// message shown to the caller.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    Usage(String),
    #[error("You do not have permission to use this command.")]
    PermissionDenied,
    #[error("This command can only be used by players.")]
    RequiresPlayer,
    #[error("A warp named '{0}' already exists.")]
    DuplicateName(String),
    #[error("No warp found with name '{0}'.")]
    NotFound(String),
    #[error("Coordinates must be valid numbers.")]
    InvalidCoordinate(String),
    #[error("Warp '{name}' references an unknown world '{world}'.")]
    UnknownWorld { name: String, world: String },
    #[error("Failed to {action} warp: {source}")]
    Storage {
        action: &'static str,
        #[source]
        source: RegistryError,
    },
}
