use serde::Serialize;

/// Flat member projection (username and age only)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct MemberDto {
    pub username: Option<String>,
    pub age: i64,
}

/// Same shape as [`MemberDto`] with the username exposed as `name`
///
/// Kept as a separate projection because its consumers expect the
/// renamed field; the repository aliases the column when selecting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct UserDto {
    pub name: Option<String>,
    pub age: i64,
}

/// Search result row: member fields plus the joined team, when any
///
/// `team_name` is absent for members without a team, and for rows whose
/// team was excluded by an ON-clause join filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct MemberTeamDto {
    pub member_id: i64,
    pub username: Option<String>,
    pub age: i64,
    pub team_id: Option<i64>,
    pub team_name: Option<String>,
}

/// Aggregate figures over the whole member set
///
/// The age fields are absent when the member set is empty; `count` is
/// always present.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct MemberAggregate {
    pub count: i64,
    pub age_sum: Option<i64>,
    pub age_avg: Option<f64>,
    pub age_max: Option<i64>,
    pub age_min: Option<i64>,
}

/// Per-team average age, produced by the grouped report
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct TeamAgeStats {
    pub team_name: String,
    pub average_age: f64,
}

/// Member username with the age bracket it falls into
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct AgeBracketRow {
    pub username: Option<String>,
    pub bracket: String,
}

/// Member username paired with the roster-wide average age
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct AverageAgeRow {
    pub username: Option<String>,
    pub average_age: f64,
}
