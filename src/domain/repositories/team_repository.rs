use async_trait::async_trait;

use crate::domain::member::Member;
use crate::domain::team::Team;
use crate::error::RepositoryError;

/// Repository trait for the Team entity
///
/// Defines the contract for persisting and retrieving teams and for
/// navigating from a team to its members.
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Save a team (insert or update), returning the store-assigned id
    async fn save(&self, team: &Team) -> Result<i64, RepositoryError>;

    /// Find a team by its id
    async fn find_by_id(&self, id: i64) -> Result<Option<Team>, RepositoryError>;

    /// List the members of a team, ordered by id
    async fn members_of(&self, team_id: i64) -> Result<Vec<Member>, RepositoryError>;
}
