use actix_web::{http::StatusCode, test, test::TestRequest, web, App};
use chrono::{DateTime, Days, TimeZone, Utc};
use log::debug;
use match_tracker_engine::{
    db_types::{ExternalMatchStatus, Match},
    test_utils::prepare_env::{prepare_test_env, random_db_path},
    traits::{Fixture, ScheduledTask},
    AliasApi,
    MatchFlowApi,
    NotificationApi,
    PollSchedule,
    ResultCheckApi,
    SqliteDatabase,
    SubscriptionApi,
};

use super::mocks::{MockNotifier, MockProvider, MockScheduler};
use crate::server::configure_routes;

pub const MAN_UTD: i64 = 33;
pub const CHELSEA: i64 = 49;
pub const PROVIDER_MATCH_ID: i64 = 868_213;

/// The engine APIs, wired to a real database and mock collaborators. Mocks without expectations fail the test if
/// they are called.
pub struct TestApis {
    pub matches: MatchFlowApi<SqliteDatabase, MockProvider, MockScheduler>,
    pub checks: ResultCheckApi<SqliteDatabase, MockProvider, MockScheduler>,
    pub subscriptions: SubscriptionApi<SqliteDatabase, MockScheduler>,
    pub notifications: NotificationApi<SqliteDatabase, MockNotifier>,
    db: SqliteDatabase,
}

impl TestApis {
    pub fn new(db: &SqliteDatabase) -> Self {
        let schedule = PollSchedule::default();
        Self {
            matches: MatchFlowApi::new(db.clone(), MockProvider::new(), MockScheduler::new(), schedule),
            checks: ResultCheckApi::new(db.clone(), MockProvider::new(), MockScheduler::new(), schedule),
            subscriptions: SubscriptionApi::new(db.clone(), MockScheduler::new()),
            notifications: NotificationApi::new(db.clone(), MockNotifier::new()),
            db: db.clone(),
        }
    }

    pub fn with_match_flow(mut self, provider: MockProvider, scheduler: MockScheduler) -> Self {
        self.matches = MatchFlowApi::new(self.db.clone(), provider, scheduler, PollSchedule::default());
        self
    }

    pub fn with_result_checks(mut self, provider: MockProvider, scheduler: MockScheduler) -> Self {
        self.checks = ResultCheckApi::new(self.db.clone(), provider, scheduler, PollSchedule::default());
        self
    }

    pub fn with_subscriptions(mut self, scheduler: MockScheduler) -> Self {
        self.subscriptions = SubscriptionApi::new(self.db.clone(), scheduler);
        self
    }

    pub fn with_notifier(mut self, notifier: MockNotifier) -> Self {
        self.notifications = NotificationApi::new(self.db.clone(), notifier);
        self
    }
}

/// Creates a migrated throwaway database with Manchester United and Chelsea linked to the provider, and Wrexham
/// without a provider link.
pub async fn prepare_db() -> SqliteDatabase {
    let url = random_db_path();
    prepare_test_env(&url).await;
    let db = SqliteDatabase::new_with_url(&url, 5).await.expect("Error connecting to test database");
    let aliases = AliasApi::new(db.clone());
    aliases.register_team("Manchester United", &["Man Utd".to_string()], Some(MAN_UTD)).await.unwrap();
    aliases.register_team("Chelsea", &["Chelsea FC".to_string()], Some(CHELSEA)).await.unwrap();
    aliases.register_team("Wrexham", &[], None).await.unwrap();
    db
}

/// Sends the request through a fresh app instance and returns the status and body.
pub async fn send(apis: TestApis, req: TestRequest) -> (StatusCode, String) {
    let app = App::new()
        .app_data(web::Data::new(apis.matches))
        .app_data(web::Data::new(apis.checks))
        .app_data(web::Data::new(apis.subscriptions))
        .app_data(web::Data::new(apis.notifications))
        .configure(configure_routes::<SqliteDatabase, MockProvider, MockScheduler, MockNotifier>);
    let service = test::init_service(app).await;
    let res = test::call_service(&service, req.to_request()).await;
    let status = res.status();
    let body = test::read_body(res).await;
    let body = String::from_utf8_lossy(&body).into_owned();
    debug!("Response: {status} {body}");
    (status, body)
}

pub fn tomorrow_at(hour: u32, minute: u32) -> DateTime<Utc> {
    let day = Utc::now().date_naive() + Days::new(1);
    Utc.from_utc_datetime(&day.and_hms_opt(hour, minute, 0).unwrap())
}

pub fn fixture(starts_at: DateTime<Utc>, status: ExternalMatchStatus, score: Option<(i32, i32)>) -> Fixture {
    Fixture {
        provider_match_id: PROVIDER_MATCH_ID,
        home_team_id: MAN_UTD,
        away_team_id: CHELSEA,
        home_team_name: "Manchester United".into(),
        away_team_name: "Chelsea".into(),
        starts_at,
        status,
        home_score: score.map(|s| s.0),
        away_score: score.map(|s| s.1),
    }
}

pub fn provider_returning(fixtures: Vec<Fixture>) -> MockProvider {
    let mut provider = MockProvider::new();
    provider.expect_matches_for_date().returning(move |_| Ok(fixtures.clone()));
    provider
}

pub fn accepting_scheduler() -> MockScheduler {
    let mut scheduler = MockScheduler::new();
    scheduler
        .expect_schedule_check_result()
        .returning(|id, attempt, at| Ok(ScheduledTask::new(format!("check-result-{id}-{attempt}"), at)));
    scheduler
}

/// Registers Man Utd v Chelsea for tomorrow at 15:00 directly through the engine.
pub async fn register_match(db: &SqliteDatabase) -> Match {
    let kickoff = tomorrow_at(15, 0);
    let provider = provider_returning(vec![fixture(kickoff, ExternalMatchStatus::NotStarted, None)]);
    let api = MatchFlowApi::new(db.clone(), provider, accepting_scheduler(), PollSchedule::default());
    api.create_match(kickoff, "Man Utd", "Chelsea").await.expect("Error registering match")
}
