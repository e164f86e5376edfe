#![allow(dead_code)]
use chrono::{DateTime, Days, NaiveDate, TimeZone, Utc};
use log::*;
use match_tracker_engine::{
    db_types::{ExternalMatchStatus, Match},
    traits::{Fixture, NotifierError, ProviderError, ScheduledTask, SchedulerError},
    AliasApi,
    MatchFlowApi,
    PollSchedule,
    SqliteDatabase,
};
use mockall::mock;
use sqlx::{migrate::MigrateDatabase, Sqlite};

pub const MAN_UTD: i64 = 33;
pub const CHELSEA: i64 = 49;
pub const ARSENAL: i64 = 42;

mock! {
    pub Provider {}
    impl match_tracker_engine::traits::FixtureProvider for Provider {
        async fn matches_for_date(&self, date: NaiveDate) -> Result<Vec<Fixture>, ProviderError>;
    }
}

mock! {
    pub Scheduler {}
    impl match_tracker_engine::traits::TaskScheduler for Scheduler {
        async fn schedule_check_result(&self, match_id: i64, attempt: i32, execute_at: DateTime<Utc>) -> Result<ScheduledTask, SchedulerError>;
        async fn fetch_check_result_task(&self, match_id: i64, attempt: i32) -> Result<ScheduledTask, SchedulerError>;
        async fn schedule_subscriber_notification(&self, subscription_id: i64) -> Result<(), SchedulerError>;
        async fn delete_task(&self, name: &str) -> Result<(), SchedulerError>;
    }
}

mock! {
    pub Notifier {}
    impl match_tracker_engine::traits::WebhookNotifier for Notifier {
        async fn notify(&self, url: &str, key: &str, home_score: Option<i32>, away_score: Option<i32>) -> Result<(), NotifierError>;
    }
}

/// Creates a migrated database in the temp directory, seeded with a handful of teams.
pub async fn prepare_db() -> SqliteDatabase {
    dotenvy::from_filename(".env.test").ok();
    let _ = env_logger::try_init();
    let path = std::env::temp_dir().join(format!("match_tracker_engine_{}.db", rand::random::<u64>()));
    let url = format!("sqlite://{}", path.display());
    if let Err(e) = Sqlite::drop_database(&url).await {
        trace!("Nothing to drop at {url}: {e}");
    }
    Sqlite::create_database(&url).await.expect("Error creating database");
    let db = SqliteDatabase::new_with_url(&url, 5).await.expect("Error creating connection to database");
    db.run_migrations().await.expect("Error running DB migrations");
    seed_teams(&db).await;
    debug!("🚀️ Test database ready at {url}");
    db
}

async fn seed_teams(db: &SqliteDatabase) {
    let api = AliasApi::new(db.clone());
    api.register_team("Manchester United", &["Man Utd".to_string(), "Man United".to_string()], Some(MAN_UTD))
        .await
        .expect("Error seeding team");
    api.register_team("Chelsea", &["Chelsea FC".to_string()], Some(CHELSEA)).await.expect("Error seeding team");
    api.register_team("Arsenal", &[], Some(ARSENAL)).await.expect("Error seeding team");
    api.register_team("Wrexham", &["Wrexham AFC".to_string()], None).await.expect("Error seeding team");
}

pub fn tomorrow_at(hour: u32, minute: u32) -> DateTime<Utc> {
    let day = Utc::now().date_naive() + Days::new(1);
    Utc.from_utc_datetime(&day.and_hms_opt(hour, minute, 0).expect("valid time"))
}

pub fn fixture(provider_match_id: i64, home: i64, away: i64, starts_at: DateTime<Utc>) -> Fixture {
    Fixture {
        provider_match_id,
        home_team_id: home,
        away_team_id: away,
        home_team_name: team_name(home),
        away_team_name: team_name(away),
        starts_at,
        status: ExternalMatchStatus::NotStarted,
        home_score: None,
        away_score: None,
    }
}

pub fn with_status(mut fixture: Fixture, status: ExternalMatchStatus, score: Option<(i32, i32)>) -> Fixture {
    fixture.status = status;
    fixture.home_score = score.map(|s| s.0);
    fixture.away_score = score.map(|s| s.1);
    fixture
}

fn team_name(provider_team_id: i64) -> String {
    match provider_team_id {
        MAN_UTD => "Manchester United",
        CHELSEA => "Chelsea",
        ARSENAL => "Arsenal",
        _ => "Unknown",
    }
    .to_string()
}

pub fn check_task_name(match_id: i64, attempt: i32) -> String {
    format!("check-result-{match_id}-{attempt}")
}

/// A provider that always returns the given fixtures.
pub fn provider_returning(fixtures: Vec<Fixture>) -> MockProvider {
    let mut provider = MockProvider::new();
    provider.expect_matches_for_date().returning(move |_| Ok(fixtures.clone()));
    provider
}

/// A scheduler that accepts every check task.
pub fn accepting_scheduler() -> MockScheduler {
    let mut scheduler = MockScheduler::new();
    scheduler
        .expect_schedule_check_result()
        .returning(|id, attempt, at| Ok(ScheduledTask::new(check_task_name(id, attempt), at)));
    scheduler
}

/// Registers Man Utd v Chelsea, tomorrow at 18:00, as provider match 1001.
pub async fn register_match(db: &SqliteDatabase) -> Match {
    let kickoff = tomorrow_at(18, 0);
    let provider = provider_returning(vec![fixture(1001, MAN_UTD, CHELSEA, kickoff)]);
    let api = MatchFlowApi::new(db.clone(), provider, accepting_scheduler(), PollSchedule::default());
    api.create_match(kickoff, "Man Utd", "Chelsea").await.expect("Error registering match")
}
