use async_trait::async_trait;
use sqlx::{QueryBuilder, SqlitePool};

use crate::domain::member::Member;
use crate::domain::page::{Page, PageRequest};
use crate::domain::projections::{
    AgeBracketRow, AverageAgeRow, MemberAggregate, MemberDto, MemberTeamDto, TeamAgeStats, UserDto,
};
use crate::domain::repositories::MemberRepository;
use crate::error::RepositoryError;
use crate::query::Filter;

/// Base of the search projection: member rows with the joined team.
///
/// Filters rendered by [`Filter::push_where`] rely on the `m` and `t`
/// aliases introduced here.
const SEARCH_SELECT: &str = "\
    SELECT m.id AS member_id, m.username, m.age, m.team_id, t.name AS team_name \
    FROM member m \
    LEFT JOIN team t ON t.id = m.team_id";

/// SQLite implementation of MemberRepository
///
/// Static queries go through `sqlx::query_as`; the dynamic search is
/// assembled with `sqlx::QueryBuilder` so absent criteria never appear
/// in the generated SQL.
pub struct SqliteMemberRepository {
    pool: SqlitePool,
}

impl SqliteMemberRepository {
    /// Creates a new SqliteMemberRepository borrowing the given pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemberRepository for SqliteMemberRepository {
    async fn save(&self, member: &Member) -> Result<i64, RepositoryError> {
        if member.id == 0 {
            let (id,): (i64,) = sqlx::query_as(
                r#"
                INSERT INTO member (username, age, team_id)
                VALUES (?, ?, ?)
                RETURNING id
                "#,
            )
            .bind(member.username.as_deref())
            .bind(member.age)
            .bind(member.team_id)
            .fetch_one(&self.pool)
            .await?;

            Ok(id)
        } else {
            sqlx::query(
                r#"
                INSERT INTO member (id, username, age, team_id)
                VALUES (?, ?, ?, ?)
                ON CONFLICT (id) DO UPDATE SET
                    username = excluded.username,
                    age = excluded.age,
                    team_id = excluded.team_id
                "#,
            )
            .bind(member.id)
            .bind(member.username.as_deref())
            .bind(member.age)
            .bind(member.team_id)
            .execute(&self.pool)
            .await?;

            Ok(member.id)
        }
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Member>, RepositoryError> {
        let member = sqlx::query_as::<_, Member>(
            r#"
            SELECT id, username, age, team_id
            FROM member
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(member)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Member>, RepositoryError> {
        let member = sqlx::query_as::<_, Member>(
            r#"
            SELECT id, username, age, team_id
            FROM member
            WHERE username = ?
            LIMIT 1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(member)
    }

    async fn find_all(&self) -> Result<Vec<Member>, RepositoryError> {
        let members = sqlx::query_as::<_, Member>(
            r#"
            SELECT id, username, age, team_id
            FROM member
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(members)
    }

    async fn search(&self, filter: &Filter) -> Result<Vec<MemberTeamDto>, RepositoryError> {
        tracing::debug!(constraints = filter.len(), "searching members");

        let mut builder = QueryBuilder::new(SEARCH_SELECT);
        filter.push_where(&mut builder);
        builder.push(" ORDER BY m.id");

        let rows = builder
            .build_query_as::<MemberTeamDto>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    async fn list_by_age(&self, age: i64) -> Result<Vec<Member>, RepositoryError> {
        let members = sqlx::query_as::<_, Member>(
            r#"
            SELECT id, username, age, team_id
            FROM member
            WHERE age = ?
            ORDER BY age DESC, username ASC NULLS LAST
            "#,
        )
        .bind(age)
        .fetch_all(&self.pool)
        .await?;

        Ok(members)
    }

    async fn page(&self, request: &PageRequest) -> Result<Page<Member>, RepositoryError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM member")
            .fetch_one(&self.pool)
            .await?;

        let items = sqlx::query_as::<_, Member>(
            r#"
            SELECT id, username, age, team_id
            FROM member
            ORDER BY username DESC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(request.limit)
        .bind(request.offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(Page {
            items,
            total,
            offset: request.offset,
            limit: request.limit,
        })
    }

    async fn aggregate(&self) -> Result<MemberAggregate, RepositoryError> {
        let aggregate = sqlx::query_as::<_, MemberAggregate>(
            r#"
            SELECT COUNT(*)  AS count,
                   SUM(age)  AS age_sum,
                   AVG(age)  AS age_avg,
                   MAX(age)  AS age_max,
                   MIN(age)  AS age_min
            FROM member
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(aggregate)
    }

    async fn team_average_age(&self) -> Result<Vec<TeamAgeStats>, RepositoryError> {
        let stats = sqlx::query_as::<_, TeamAgeStats>(
            r#"
            SELECT t.name AS team_name, AVG(m.age) AS average_age
            FROM member m
            JOIN team t ON t.id = m.team_id
            GROUP BY t.name
            ORDER BY t.name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(stats)
    }

    async fn members_with_team_named(
        &self,
        team_name: &str,
    ) -> Result<Vec<MemberTeamDto>, RepositoryError> {
        let rows = sqlx::query_as::<_, MemberTeamDto>(
            r#"
            SELECT m.id AS member_id, m.username, m.age, m.team_id, t.name AS team_name
            FROM member m
            LEFT JOIN team t ON t.id = m.team_id AND t.name = ?
            ORDER BY m.id
            "#,
        )
        .bind(team_name)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn oldest(&self) -> Result<Vec<Member>, RepositoryError> {
        let members = sqlx::query_as::<_, Member>(
            r#"
            SELECT id, username, age, team_id
            FROM member
            WHERE age = (SELECT MAX(age) FROM member)
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(members)
    }

    async fn older_than_average(&self) -> Result<Vec<Member>, RepositoryError> {
        let members = sqlx::query_as::<_, Member>(
            r#"
            SELECT id, username, age, team_id
            FROM member
            WHERE age >= (SELECT AVG(age) FROM member)
            ORDER BY age
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(members)
    }

    async fn age_brackets(&self) -> Result<Vec<AgeBracketRow>, RepositoryError> {
        let rows = sqlx::query_as::<_, AgeBracketRow>(
            r#"
            SELECT username,
                   CASE
                       WHEN age BETWEEN 0 AND 20 THEN '0-20'
                       WHEN age BETWEEN 21 AND 30 THEN '21-30'
                       ELSE 'other'
                   END AS bracket
            FROM member
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn usernames_with_average_age(&self) -> Result<Vec<AverageAgeRow>, RepositoryError> {
        let rows = sqlx::query_as::<_, AverageAgeRow>(
            r#"
            SELECT username,
                   (SELECT AVG(age) FROM member) AS average_age
            FROM member
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn usernames_tagged(&self) -> Result<Vec<String>, RepositoryError> {
        let tags = sqlx::query_scalar::<_, String>(
            r#"
            SELECT username || '_' || CAST(age AS TEXT)
            FROM member
            WHERE username IS NOT NULL
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(tags)
    }

    async fn member_dtos(&self) -> Result<Vec<MemberDto>, RepositoryError> {
        let dtos = sqlx::query_as::<_, MemberDto>(
            r#"
            SELECT username, age
            FROM member
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(dtos)
    }

    async fn user_dtos(&self) -> Result<Vec<UserDto>, RepositoryError> {
        let dtos = sqlx::query_as::<_, UserDto>(
            r#"
            SELECT username AS name, age
            FROM member
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(dtos)
    }

    async fn rename_below_age(&self, username: &str, age: i64) -> Result<u64, RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE member
            SET username = ?
            WHERE age < ?
            "#,
        )
        .bind(username)
        .bind(age)
        .execute(&self.pool)
        .await?;

        tracing::debug!(affected = result.rows_affected(), "bulk rename");
        Ok(result.rows_affected())
    }

    async fn add_age(&self, delta: i64) -> Result<u64, RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE member
            SET age = age + ?
            "#,
        )
        .bind(delta)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn delete_older_than(&self, age: i64) -> Result<u64, RepositoryError> {
        let result = sqlx::query(
            r#"
            DELETE FROM member
            WHERE age > ?
            "#,
        )
        .bind(age)
        .execute(&self.pool)
        .await?;

        tracing::debug!(affected = result.rows_affected(), "bulk delete");
        Ok(result.rows_affected())
    }
}
