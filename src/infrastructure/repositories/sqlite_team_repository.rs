use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::domain::member::Member;
use crate::domain::repositories::TeamRepository;
use crate::domain::team::Team;
use crate::error::RepositoryError;

/// SQLite implementation of TeamRepository
pub struct SqliteTeamRepository {
    pool: SqlitePool,
}

impl SqliteTeamRepository {
    /// Creates a new SqliteTeamRepository borrowing the given pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TeamRepository for SqliteTeamRepository {
    async fn save(&self, team: &Team) -> Result<i64, RepositoryError> {
        if team.id == 0 {
            let (id,): (i64,) = sqlx::query_as(
                r#"
                INSERT INTO team (name)
                VALUES (?)
                RETURNING id
                "#,
            )
            .bind(&team.name)
            .fetch_one(&self.pool)
            .await?;

            Ok(id)
        } else {
            sqlx::query(
                r#"
                INSERT INTO team (id, name)
                VALUES (?, ?)
                ON CONFLICT (id) DO UPDATE SET name = excluded.name
                "#,
            )
            .bind(team.id)
            .bind(&team.name)
            .execute(&self.pool)
            .await?;

            Ok(team.id)
        }
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Team>, RepositoryError> {
        let team = sqlx::query_as::<_, Team>(
            r#"
            SELECT id, name
            FROM team
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(team)
    }

    async fn members_of(&self, team_id: i64) -> Result<Vec<Member>, RepositoryError> {
        let members = sqlx::query_as::<_, Member>(
            r#"
            SELECT id, username, age, team_id
            FROM member
            WHERE team_id = ?
            ORDER BY id
            "#,
        )
        .bind(team_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(members)
    }
}
