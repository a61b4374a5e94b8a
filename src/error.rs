use thiserror::Error;

/// Error type for repository operations
///
/// Wraps the database driver's error unchanged so callers keep the
/// driver's error semantics (connectivity failures, constraint
/// violations, decode errors).
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The underlying database driver reported a failure
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}
