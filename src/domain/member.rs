use serde::Serialize;

/// Member entity
///
/// A member optionally belongs to a single team (many-to-one via
/// `team_id`). The identifier is assigned by the store on first save and
/// is immutable afterwards; `id` 0 marks a member that has not been
/// persisted yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Member {
    pub id: i64,
    pub username: Option<String>,
    pub age: i64,
    pub team_id: Option<i64>,
}

impl Member {
    /// Creates a member that has not been persisted yet
    ///
    /// # Arguments
    /// * `username` - Display name, may be absent
    /// * `age` - Age in years
    /// * `team_id` - Owning team, if any
    pub fn new(username: Option<&str>, age: i64, team_id: Option<i64>) -> Self {
        Self {
            id: 0,
            username: username.map(str::to_owned),
            age,
            team_id,
        }
    }
}
