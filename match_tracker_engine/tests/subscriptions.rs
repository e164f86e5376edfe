mod support;

use chrono::Utc;
use match_tracker_engine::{
    db_types::{MatchResultStatus, SubscriptionStatus, SubscriptionUpdate},
    traits::{MatchManagement, SchedulerError, SubscriptionManagement},
    ResultTrackerError,
    SqliteDatabase,
    SubscriptionApi,
    SubscriptionDeleted,
};
use support::*;

const HOOK_URL: &str = "https://hooks.example.com/results/man-utd-chelsea";

fn api(db: &SqliteDatabase, scheduler: MockScheduler) -> SubscriptionApi<SqliteDatabase, MockScheduler> {
    SubscriptionApi::new(db.clone(), scheduler)
}

#[tokio::test]
async fn subscribing_twice_returns_the_same_subscription() {
    let db = prepare_db().await;
    let registered = register_match(&db).await;
    let api = api(&db, MockScheduler::new());

    let (first, created) = api.create_subscription(registered.id, HOOK_URL, "s3cret").await.unwrap();
    assert!(created);
    assert_eq!(first.status, SubscriptionStatus::Pending);
    assert_eq!(first.match_id, registered.id);

    let (second, created) = api.create_subscription(registered.id, HOOK_URL, "s3cret").await.unwrap();
    assert!(!created);
    assert_eq!(second.id, first.id);

    let (other, created) = api.create_subscription(registered.id, HOOK_URL, "another-key").await.unwrap();
    assert!(created);
    assert_ne!(other.id, first.id);
}

#[tokio::test]
async fn only_scheduled_matches_accept_subscriptions() {
    let db = prepare_db().await;
    let registered = register_match(&db).await;
    db.update_match_status(registered.id, MatchResultStatus::Received).await.unwrap();
    let api = api(&db, MockScheduler::new());

    let err = api.create_subscription(registered.id, HOOK_URL, "s3cret").await.unwrap_err();
    assert!(matches!(err, ResultTrackerError::UnprocessableContent(_)));

    let err = api.create_subscription(registered.id + 1, HOOK_URL, "s3cret").await.unwrap_err();
    assert!(matches!(err, ResultTrackerError::NotFound(_)));
}

#[tokio::test]
async fn deleting_the_last_subscription_removes_the_match() {
    let db = prepare_db().await;
    let registered = register_match(&db).await;
    let task_name = check_task_name(registered.id, 1);
    let mut scheduler = MockScheduler::new();
    scheduler
        .expect_delete_task()
        .withf(move |name| name.to_string() == task_name)
        .times(1)
        .returning(|_| Ok(()));
    let api = api(&db, scheduler);
    let (sub, _) = api.create_subscription(registered.id, HOOK_URL, "s3cret").await.unwrap();

    let deleted = api
        .delete_subscription(registered.starts_at, "Man Utd", "Chelsea", "https://hooks.example.com/", "s3cret")
        .await
        .expect("delete_subscription failed");
    assert_eq!(deleted, SubscriptionDeleted { subscription_id: sub.id, match_id: registered.id, match_deleted: true });
    assert!(db.fetch_match(registered.id).await.unwrap().is_none());
    assert!(db.fetch_subscription(sub.id).await.unwrap().is_none());
}

#[tokio::test]
async fn deleting_one_of_several_subscriptions_keeps_the_match() {
    let db = prepare_db().await;
    let registered = register_match(&db).await;
    let mut scheduler = MockScheduler::new();
    scheduler.expect_delete_task().times(0);
    let api = api(&db, scheduler);
    let (first, _) = api.create_subscription(registered.id, HOOK_URL, "s3cret").await.unwrap();
    let (second, _) = api.create_subscription(registered.id, "https://other.example.org/cb", "k2").await.unwrap();

    let deleted =
        api.delete_subscription(registered.starts_at, "Man Utd", "Chelsea", HOOK_URL, "s3cret").await.unwrap();
    assert_eq!(deleted.subscription_id, first.id);
    assert!(!deleted.match_deleted);
    let stored = db.fetch_match(registered.id).await.unwrap().unwrap();
    assert_eq!(stored.result_status, MatchResultStatus::Scheduled);
    assert!(db.fetch_subscription(second.id).await.unwrap().is_some());
}

#[tokio::test]
async fn notified_subscriptions_cannot_be_deleted() {
    let db = prepare_db().await;
    let registered = register_match(&db).await;
    let api = api(&db, MockScheduler::new());
    let (sub, _) = api.create_subscription(registered.id, HOOK_URL, "s3cret").await.unwrap();
    db.update_subscription(sub.id, SubscriptionUpdate::successful(Utc::now())).await.unwrap();

    let err = api.delete_subscription(registered.starts_at, "Man Utd", "Chelsea", HOOK_URL, "s3cret").await.unwrap_err();
    assert!(matches!(err, ResultTrackerError::UnprocessableContent(_)));
    assert!(db.fetch_subscription(sub.id).await.unwrap().is_some());
}

#[tokio::test]
async fn failed_subscriptions_can_be_deleted() {
    let db = prepare_db().await;
    let registered = register_match(&db).await;
    let mut scheduler = MockScheduler::new();
    scheduler.expect_delete_task().times(1).returning(|_| Ok(()));
    let api = api(&db, scheduler);
    let (sub, _) = api.create_subscription(registered.id, HOOK_URL, "s3cret").await.unwrap();
    let update = SubscriptionUpdate::failed(SubscriptionStatus::SubscriberError, "HTTP 500");
    db.update_subscription(sub.id, update).await.unwrap();

    let deleted = api.delete_subscription(registered.starts_at, "Man Utd", "Chelsea", HOOK_URL, "s3cret").await;
    assert!(deleted.unwrap().match_deleted);
}

#[tokio::test]
async fn cleanup_failures_do_not_fail_the_deletion() {
    let db = prepare_db().await;
    let registered = register_match(&db).await;
    let mut scheduler = MockScheduler::new();
    scheduler
        .expect_delete_task()
        .times(1)
        .returning(|_| Err(SchedulerError::Transport("queue unavailable".into())));
    let api = api(&db, scheduler);
    api.create_subscription(registered.id, HOOK_URL, "s3cret").await.unwrap();

    let deleted = api.delete_subscription(registered.starts_at, "Man Utd", "Chelsea", HOOK_URL, "s3cret").await;
    assert!(deleted.expect("Cleanup errors must not surface").match_deleted);
}

#[tokio::test]
async fn subscriptions_are_found_by_key_and_url_prefix() {
    let db = prepare_db().await;
    let registered = register_match(&db).await;
    let api = api(&db, MockScheduler::new());
    api.create_subscription(registered.id, HOOK_URL, "s3cret").await.unwrap();

    let err = api
        .delete_subscription(registered.starts_at, "Man Utd", "Chelsea", "https://hooks.example.com", "wrong")
        .await
        .unwrap_err();
    assert!(matches!(err, ResultTrackerError::NotFound(_)));

    let err = api
        .delete_subscription(registered.starts_at, "Man Utd", "Chelsea", "https://HOOKS.example.com", "s3cret")
        .await
        .unwrap_err();
    assert!(matches!(err, ResultTrackerError::NotFound(_)));

    let err =
        api.delete_subscription(registered.starts_at, "Arsenal", "Chelsea", HOOK_URL, "s3cret").await.unwrap_err();
    assert!(matches!(err, ResultTrackerError::NotFound(_)));
}
