//! Integration tests for repository query operations
//!
//! Covers sorting, paging, aggregation, grouping, joins, subqueries,
//! projections and bulk writes against an in-memory SQLite store.

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use roster_api::domain::member::Member;
use roster_api::domain::page::PageRequest;
use roster_api::domain::repositories::{MemberRepository, TeamRepository};
use roster_api::domain::team::Team;
use roster_api::infrastructure::repositories::{SqliteMemberRepository, SqliteTeamRepository};
use roster_api::infrastructure::schema;

/// Set up an in-memory test database with the schema applied
async fn setup_test_db() -> SqlitePool {
    // A single connection: every SQLite in-memory database is private to
    // the connection that opened it.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");

    schema::apply(&pool).await.expect("Failed to apply schema");
    pool
}

/// Seed teamA/teamB and member1..member4 with ages 10/20/30/40
async fn seed_roster(pool: &SqlitePool) -> (i64, i64) {
    let teams = SqliteTeamRepository::new(pool.clone());
    let members = SqliteMemberRepository::new(pool.clone());

    let team_a = teams.save(&Team::new("teamA")).await.expect("save teamA");
    let team_b = teams.save(&Team::new("teamB")).await.expect("save teamB");

    for (username, age, team_id) in [
        ("member1", 10, team_a),
        ("member2", 20, team_a),
        ("member3", 30, team_b),
        ("member4", 40, team_b),
    ] {
        members
            .save(&Member::new(Some(username), age, Some(team_id)))
            .await
            .expect("save member");
    }

    (team_a, team_b)
}

#[tokio::test]
async fn save_assigns_id_and_updates_in_place() {
    let pool = setup_test_db().await;
    let members = SqliteMemberRepository::new(pool);

    let id = members
        .save(&Member::new(Some("member1"), 10, None))
        .await
        .expect("insert");
    assert!(id > 0);

    let mut stored = members
        .find_by_id(id)
        .await
        .expect("find")
        .expect("member exists");
    stored.age = 11;
    let same_id = members.save(&stored).await.expect("update");
    assert_eq!(same_id, id);

    let reread = members
        .find_by_id(id)
        .await
        .expect("find")
        .expect("member exists");
    assert_eq!(reread.age, 11);
}

#[tokio::test]
async fn list_by_age_sorts_usernames_with_absent_last() {
    let pool = setup_test_db().await;
    seed_roster(&pool).await;
    let members = SqliteMemberRepository::new(pool);

    members
        .save(&Member::new(None, 100, None))
        .await
        .expect("save unnamed member");
    members
        .save(&Member::new(Some("member5"), 100, None))
        .await
        .expect("save member5");
    members
        .save(&Member::new(Some("member6"), 100, None))
        .await
        .expect("save member6");

    let result = members.list_by_age(100).await.expect("list by age");

    assert_eq!(result.len(), 3);
    assert_eq!(result[0].username.as_deref(), Some("member5"));
    assert_eq!(result[1].username.as_deref(), Some("member6"));
    assert_eq!(result[2].username, None);
}

#[tokio::test]
async fn page_returns_window_and_total() {
    let pool = setup_test_db().await;
    seed_roster(&pool).await;
    let members = SqliteMemberRepository::new(pool);

    let page = members
        .page(&PageRequest {
            offset: 1,
            limit: 2,
        })
        .await
        .expect("page");

    assert_eq!(page.total, 4);
    assert_eq!(page.limit, 2);
    assert_eq!(page.offset, 1);
    // Username descending: member4, member3, member2, member1.
    let usernames: Vec<_> = page.items.iter().map(|m| m.username.as_deref()).collect();
    assert_eq!(usernames, vec![Some("member3"), Some("member2")]);
}

#[tokio::test]
async fn aggregate_covers_count_sum_avg_max_min() {
    let pool = setup_test_db().await;
    seed_roster(&pool).await;
    let members = SqliteMemberRepository::new(pool);

    let aggregate = members.aggregate().await.expect("aggregate");

    assert_eq!(aggregate.count, 4);
    assert_eq!(aggregate.age_sum, Some(100));
    assert_eq!(aggregate.age_avg, Some(25.0));
    assert_eq!(aggregate.age_max, Some(40));
    assert_eq!(aggregate.age_min, Some(10));
}

#[tokio::test]
async fn aggregate_on_empty_store_has_no_age_figures() {
    let pool = setup_test_db().await;
    let members = SqliteMemberRepository::new(pool);

    let aggregate = members.aggregate().await.expect("aggregate");

    assert_eq!(aggregate.count, 0);
    assert_eq!(aggregate.age_sum, None);
    assert_eq!(aggregate.age_avg, None);
    assert_eq!(aggregate.age_max, None);
    assert_eq!(aggregate.age_min, None);
}

#[tokio::test]
async fn team_average_age_groups_by_team() {
    let pool = setup_test_db().await;
    seed_roster(&pool).await;
    let members = SqliteMemberRepository::new(pool);

    let stats = members.team_average_age().await.expect("team averages");

    assert_eq!(stats.len(), 2);
    assert_eq!(stats[0].team_name, "teamA");
    assert_eq!(stats[0].average_age, 15.0);
    assert_eq!(stats[1].team_name, "teamB");
    assert_eq!(stats[1].average_age, 35.0);
}

#[tokio::test]
async fn on_clause_join_filter_keeps_all_members() {
    let pool = setup_test_db().await;
    seed_roster(&pool).await;
    let members = SqliteMemberRepository::new(pool);

    let rows = members
        .members_with_team_named("teamA")
        .await
        .expect("left join with on filter");

    // Every member survives; only teamA rows carry a team name.
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0].team_name.as_deref(), Some("teamA"));
    assert_eq!(rows[1].team_name.as_deref(), Some("teamA"));
    assert_eq!(rows[2].team_name, None);
    assert_eq!(rows[3].team_name, None);
}

#[tokio::test]
async fn oldest_uses_max_age_subquery() {
    let pool = setup_test_db().await;
    seed_roster(&pool).await;
    let members = SqliteMemberRepository::new(pool);

    let oldest = members.oldest().await.expect("oldest");

    assert_eq!(oldest.len(), 1);
    assert_eq!(oldest[0].username.as_deref(), Some("member4"));
    assert_eq!(oldest[0].age, 40);
}

#[tokio::test]
async fn older_than_average_uses_avg_subquery() {
    let pool = setup_test_db().await;
    seed_roster(&pool).await;
    let members = SqliteMemberRepository::new(pool);

    let result = members.older_than_average().await.expect("older than avg");

    let ages: Vec<_> = result.iter().map(|m| m.age).collect();
    assert_eq!(ages, vec![30, 40]);
}

#[tokio::test]
async fn age_brackets_follow_case_expression() {
    let pool = setup_test_db().await;
    seed_roster(&pool).await;
    let members = SqliteMemberRepository::new(pool);

    let rows = members.age_brackets().await.expect("age brackets");

    let brackets: Vec<_> = rows.iter().map(|r| r.bracket.as_str()).collect();
    assert_eq!(brackets, vec!["0-20", "0-20", "21-30", "other"]);
}

#[tokio::test]
async fn usernames_with_average_age_repeats_roster_average() {
    let pool = setup_test_db().await;
    seed_roster(&pool).await;
    let members = SqliteMemberRepository::new(pool);

    let rows = members
        .usernames_with_average_age()
        .await
        .expect("usernames with average age");

    assert_eq!(rows.len(), 4);
    for (row, username) in rows.iter().zip(["member1", "member2", "member3", "member4"]) {
        assert_eq!(row.username.as_deref(), Some(username));
        assert_eq!(row.average_age, 25.0);
    }
}

#[tokio::test]
async fn usernames_tagged_concatenates_name_and_age() {
    let pool = setup_test_db().await;
    seed_roster(&pool).await;
    let members = SqliteMemberRepository::new(pool.clone());

    // Unnamed members have nothing to tag and are skipped.
    members
        .save(&Member::new(None, 100, None))
        .await
        .expect("save unnamed member");

    let tags = members.usernames_tagged().await.expect("tags");

    assert_eq!(
        tags,
        vec!["member1_10", "member2_20", "member3_30", "member4_40"]
    );
}

#[tokio::test]
async fn member_dtos_project_username_and_age() {
    let pool = setup_test_db().await;
    seed_roster(&pool).await;
    let members = SqliteMemberRepository::new(pool);

    let dtos = members.member_dtos().await.expect("member dtos");

    assert_eq!(dtos.len(), 4);
    assert_eq!(dtos[0].username.as_deref(), Some("member1"));
    assert_eq!(dtos[0].age, 10);
}

#[tokio::test]
async fn user_dtos_alias_username_as_name() {
    let pool = setup_test_db().await;
    seed_roster(&pool).await;
    let members = SqliteMemberRepository::new(pool);

    let dtos = members.user_dtos().await.expect("user dtos");

    assert_eq!(dtos.len(), 4);
    assert_eq!(dtos[3].name.as_deref(), Some("member4"));
    assert_eq!(dtos[3].age, 40);
}

#[tokio::test]
async fn bulk_rename_affects_only_younger_members() {
    let pool = setup_test_db().await;
    seed_roster(&pool).await;
    let members = SqliteMemberRepository::new(pool);

    let affected = members
        .rename_below_age("nonmember", 28)
        .await
        .expect("bulk rename");
    assert_eq!(affected, 2);

    // Re-read from the store; bulk writes bypass any rows already read.
    let all = members.find_all().await.expect("find all");
    let usernames: Vec<_> = all.iter().map(|m| m.username.as_deref()).collect();
    assert_eq!(
        usernames,
        vec![
            Some("nonmember"),
            Some("nonmember"),
            Some("member3"),
            Some("member4"),
        ]
    );
}

#[tokio::test]
async fn bulk_add_age_shifts_every_member() {
    let pool = setup_test_db().await;
    seed_roster(&pool).await;
    let members = SqliteMemberRepository::new(pool);

    let affected = members.add_age(1).await.expect("bulk add");
    assert_eq!(affected, 4);

    let ages: Vec<_> = members
        .find_all()
        .await
        .expect("find all")
        .iter()
        .map(|m| m.age)
        .collect();
    assert_eq!(ages, vec![11, 21, 31, 41]);

    // A negative delta subtracts.
    members.add_age(-1).await.expect("bulk subtract");
    let ages: Vec<_> = members
        .find_all()
        .await
        .expect("find all")
        .iter()
        .map(|m| m.age)
        .collect();
    assert_eq!(ages, vec![10, 20, 30, 40]);
}

#[tokio::test]
async fn bulk_delete_removes_older_members() {
    let pool = setup_test_db().await;
    seed_roster(&pool).await;
    let members = SqliteMemberRepository::new(pool);

    let affected = members.delete_older_than(18).await.expect("bulk delete");
    assert_eq!(affected, 3);

    let remaining = members.find_all().await.expect("find all");
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].username.as_deref(), Some("member1"));
}

#[tokio::test]
async fn team_navigation_lists_its_members() {
    let pool = setup_test_db().await;
    let (team_a, team_b) = seed_roster(&pool).await;
    let teams = SqliteTeamRepository::new(pool);

    let team = teams
        .find_by_id(team_a)
        .await
        .expect("find team")
        .expect("teamA exists");
    assert_eq!(team.name, "teamA");

    let members_a = teams.members_of(team_a).await.expect("members of teamA");
    let usernames: Vec<_> = members_a.iter().map(|m| m.username.as_deref()).collect();
    assert_eq!(usernames, vec![Some("member1"), Some("member2")]);

    let members_b = teams.members_of(team_b).await.expect("members of teamB");
    assert_eq!(members_b.len(), 2);
}

#[tokio::test]
async fn team_save_updates_name_in_place() {
    let pool = setup_test_db().await;
    let (team_a, _) = seed_roster(&pool).await;
    let teams = SqliteTeamRepository::new(pool);

    let mut team = teams
        .find_by_id(team_a)
        .await
        .expect("find team")
        .expect("teamA exists");
    team.name = "teamC".to_string();
    let same_id = teams.save(&team).await.expect("update team");
    assert_eq!(same_id, team_a);

    let reread = teams
        .find_by_id(team_a)
        .await
        .expect("find team")
        .expect("team exists");
    assert_eq!(reread.name, "teamC");
}
