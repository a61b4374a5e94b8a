//! Embedded schema for the member/team store.

use sqlx::SqlitePool;

use crate::error::RepositoryError;

const DDL: &str = "\
CREATE TABLE IF NOT EXISTS team (
    id   INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS member (
    id       INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT,
    age      INTEGER NOT NULL,
    team_id  INTEGER REFERENCES team (id)
);
CREATE INDEX IF NOT EXISTS idx_member_team ON member (team_id);
";

/// Creates the member and team tables when they do not exist yet
///
/// Idempotent; safe to run on every startup.
pub async fn apply(pool: &SqlitePool) -> Result<(), RepositoryError> {
    for statement in DDL.split(';').map(str::trim).filter(|s| !s.is_empty()) {
        sqlx::query(statement).execute(pool).await?;
    }
    tracing::debug!("schema applied");
    Ok(())
}
