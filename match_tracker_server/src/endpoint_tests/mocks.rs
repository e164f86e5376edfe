use chrono::{DateTime, NaiveDate, Utc};
use match_tracker_engine::traits::{
    Fixture,
    FixtureProvider,
    NotifierError,
    ProviderError,
    ScheduledTask,
    SchedulerError,
    TaskScheduler,
    WebhookNotifier,
};
use mockall::mock;

mock! {
    pub Provider {}
    impl FixtureProvider for Provider {
        async fn matches_for_date(&self, date: NaiveDate) -> Result<Vec<Fixture>, ProviderError>;
    }
}

mock! {
    pub Scheduler {}
    impl TaskScheduler for Scheduler {
        async fn schedule_check_result(&self, match_id: i64, attempt: i32, execute_at: DateTime<Utc>) -> Result<ScheduledTask, SchedulerError>;
        async fn fetch_check_result_task(&self, match_id: i64, attempt: i32) -> Result<ScheduledTask, SchedulerError>;
        async fn schedule_subscriber_notification(&self, subscription_id: i64) -> Result<(), SchedulerError>;
        async fn delete_task(&self, name: &str) -> Result<(), SchedulerError>;
    }
}

mock! {
    pub Notifier {}
    impl WebhookNotifier for Notifier {
        async fn notify(&self, url: &str, key: &str, home_score: Option<i32>, away_score: Option<i32>) -> Result<(), NotifierError>;
    }
}
