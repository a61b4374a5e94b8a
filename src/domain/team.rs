use serde::Serialize;

/// Team entity
///
/// Members reference their team via `Member::team_id`; the reverse
/// navigation is a repository operation and the team does not own the
/// members' lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Team {
    pub id: i64,
    pub name: String,
}

impl Team {
    /// Creates a team that has not been persisted yet (`id` 0 until the
    /// store assigns one)
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
        }
    }
}
