use async_trait::async_trait;

use crate::domain::member::Member;
use crate::domain::page::{Page, PageRequest};
use crate::domain::projections::{
    AgeBracketRow, AverageAgeRow, MemberAggregate, MemberDto, MemberTeamDto, TeamAgeStats, UserDto,
};
use crate::error::RepositoryError;
use crate::query::Filter;

/// Repository trait for the Member entity
///
/// Defines the contract for persisting, searching and projecting
/// members. Implementations handle the database-specific details; the
/// search operation consumes a composed [`Filter`] unchanged.
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Save a member (insert or update), returning the store-assigned id
    async fn save(&self, member: &Member) -> Result<i64, RepositoryError>;

    /// Find a member by its id
    async fn find_by_id(&self, id: i64) -> Result<Option<Member>, RepositoryError>;

    /// Find a member by exact username
    async fn find_by_username(&self, username: &str) -> Result<Option<Member>, RepositoryError>;

    /// List all members ordered by id
    async fn find_all(&self) -> Result<Vec<Member>, RepositoryError>;

    /// Search members with a composed filter over member and its team
    ///
    /// An empty filter matches every member. Rows carry the joined team
    /// name when the member has a team.
    async fn search(&self, filter: &Filter) -> Result<Vec<MemberTeamDto>, RepositoryError>;

    /// List members of the given age, oldest first, then by username
    /// ascending with absent usernames last
    async fn list_by_age(&self, age: i64) -> Result<Vec<Member>, RepositoryError>;

    /// Fetch one page of members ordered by username descending,
    /// together with the total member count
    async fn page(&self, request: &PageRequest) -> Result<Page<Member>, RepositoryError>;

    /// Compute count/sum/avg/max/min over all member ages
    async fn aggregate(&self) -> Result<MemberAggregate, RepositoryError>;

    /// Average member age per team, ordered by team name
    async fn team_average_age(&self) -> Result<Vec<TeamAgeStats>, RepositoryError>;

    /// List every member, attaching the team only when its name matches
    ///
    /// The name constraint lives in the join's ON clause, so members of
    /// other teams are still returned, just without a team.
    async fn members_with_team_named(
        &self,
        team_name: &str,
    ) -> Result<Vec<MemberTeamDto>, RepositoryError>;

    /// Members whose age equals the maximum age
    async fn oldest(&self) -> Result<Vec<Member>, RepositoryError>;

    /// Members whose age is at least the average age
    async fn older_than_average(&self) -> Result<Vec<Member>, RepositoryError>;

    /// Username of each member with the age bracket it falls into
    /// (0-20, 21-30, or "other")
    async fn age_brackets(&self) -> Result<Vec<AgeBracketRow>, RepositoryError>;

    /// Username of each member alongside the average age of all members
    async fn usernames_with_average_age(&self) -> Result<Vec<AverageAgeRow>, RepositoryError>;

    /// `username_age` tags for every named member, in id order
    async fn usernames_tagged(&self) -> Result<Vec<String>, RepositoryError>;

    /// Project all members as [`MemberDto`] rows
    async fn member_dtos(&self) -> Result<Vec<MemberDto>, RepositoryError>;

    /// Project all members as [`UserDto`] rows (username aliased to name)
    async fn user_dtos(&self) -> Result<Vec<UserDto>, RepositoryError>;

    /// Bulk-rename every member younger than `age`, returning the number
    /// of affected rows
    async fn rename_below_age(&self, username: &str, age: i64) -> Result<u64, RepositoryError>;

    /// Bulk-add `delta` to every member's age (negative subtracts),
    /// returning the number of affected rows
    async fn add_age(&self, delta: i64) -> Result<u64, RepositoryError>;

    /// Bulk-delete every member older than `age`, returning the number
    /// of affected rows
    async fn delete_older_than(&self, age: i64) -> Result<u64, RepositoryError>;
}
