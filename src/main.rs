use sqlx::sqlite::SqlitePoolOptions;

use roster_api::domain::member::Member;
use roster_api::domain::repositories::{MemberRepository, TeamRepository};
use roster_api::domain::search::SearchCondition;
use roster_api::domain::team::Team;
use roster_api::infrastructure::repositories::{SqliteMemberRepository, SqliteTeamRepository};
use roster_api::infrastructure::schema;
use roster_api::query::compose_filter;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load environment variables
    dotenv::dotenv().ok();

    let database_url = std::env::var("DATABASE_URL").unwrap_or_else(|_| {
        tracing::warn!("DATABASE_URL not set, using in-memory database");
        "sqlite::memory:".to_string()
    });

    tracing::info!("Connecting to database...");
    // A single connection: every SQLite in-memory database is private to
    // the connection that opened it.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(&database_url)
        .await
        .expect("Failed to connect to database");

    schema::apply(&pool).await.expect("Failed to apply schema");
    tracing::info!("Database ready");

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

    let condition = SearchCondition {
        team_name: Some("teamA".to_string()),
        age_goe: Some(15),
        ..SearchCondition::default()
    };
    let results = members
        .search(&compose_filter(&condition))
        .await
        .expect("search members");

    tracing::info!(
        results = %serde_json::to_string(&results).expect("serialize results"),
        "search finished"
    );

    let stats = members.team_average_age().await.expect("average ages");
    for entry in stats {
        tracing::info!(team = %entry.team_name, average_age = entry.average_age, "team average");
    }
}
