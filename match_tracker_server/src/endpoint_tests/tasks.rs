use actix_web::{http::StatusCode, test::TestRequest};
use chrono::Duration;
use match_tracker_engine::{
    db_types::{ExternalMatchStatus, MatchResultStatus, NewSubscription, SubscriptionStatus},
    traits::{MatchManagement, NotifierError, ProviderError, SubscriptionManagement},
    CheckResultOutcome,
    NotificationOutcome,
    SqliteDatabase,
};
use serde_json::json;

use super::{
    helpers::*,
    mocks::{MockNotifier, MockProvider, MockScheduler},
};

fn check_result_request(match_id: i64) -> TestRequest {
    TestRequest::post().uri("/tasks/check-result").set_json(json!({ "match_id": match_id }))
}

fn notify_request(subscription_id: i64) -> TestRequest {
    TestRequest::post().uri("/tasks/notify-subscriber").set_json(json!({ "subscription_id": subscription_id }))
}

#[actix_web::test]
async fn in_progress_matches_are_checked_again() {
    let db = prepare_db().await;
    let registered = register_match(&db).await;
    let live = fixture(registered.starts_at, ExternalMatchStatus::InProgress, Some((0, 0)));
    let apis = TestApis::new(&db).with_result_checks(provider_returning(vec![live]), accepting_scheduler());

    let (status, body) = send(apis, check_result_request(registered.id)).await;
    assert_eq!(status, StatusCode::OK);
    let outcome: CheckResultOutcome = serde_json::from_str(&body).unwrap();
    let expected_at = registered.starts_at + Duration::minutes(115 + 15);
    assert_eq!(outcome, CheckResultOutcome::Rescheduled { attempt: 2, execute_at: expected_at });
    assert!(body.contains(r#""outcome":"rescheduled""#), "{body}");
}

#[actix_web::test]
async fn finished_matches_notify_pending_subscribers() {
    let db = prepare_db().await;
    let registered = register_match(&db).await;
    let sub = NewSubscription::new(registered.id, "https://hooks.example.com/cb", "k-1");
    let sub = db.insert_subscription(sub).await.unwrap();
    let full_time = fixture(registered.starts_at, ExternalMatchStatus::Finished, Some((3, 1)));
    let mut scheduler = MockScheduler::new();
    let sub_id = sub.id;
    scheduler.expect_schedule_subscriber_notification().withf(move |id| *id == sub_id).times(1).returning(|_| Ok(()));
    let apis = TestApis::new(&db).with_result_checks(provider_returning(vec![full_time]), scheduler);

    let (status, body) = send(apis, check_result_request(registered.id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_str::<CheckResultOutcome>(&body).unwrap(), CheckResultOutcome::Received {
        notifications: 1
    });
    let stored = db.fetch_match(registered.id).await.unwrap().unwrap();
    assert_eq!(stored.result_status, MatchResultStatus::Received);

    // A late redelivery of the same check is ignored
    let (status, body) = send(TestApis::new(&db), check_result_request(registered.id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_str::<CheckResultOutcome>(&body).unwrap(), CheckResultOutcome::Skipped {
        status: MatchResultStatus::Received
    });
}

#[actix_web::test]
async fn provider_failures_are_returned_to_the_queue() {
    let db = prepare_db().await;
    let registered = register_match(&db).await;
    let mut provider = MockProvider::new();
    provider.expect_matches_for_date().returning(|_| Err(ProviderError::Rejected("quota exceeded".into())));
    let apis = TestApis::new(&db).with_result_checks(provider, MockScheduler::new());

    let (status, body) = send(apis, check_result_request(registered.id)).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body.contains("quota exceeded"), "{body}");
    let stored = db.fetch_match(registered.id).await.unwrap().unwrap();
    assert_eq!(stored.result_status, MatchResultStatus::ApiError);
}

#[actix_web::test]
async fn checking_an_unknown_match() {
    let db = prepare_db().await;
    let (status, _) = send(TestApis::new(&db), check_result_request(404)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

/// Registers a match, subscribes to it and runs a result check that finds the final score.
async fn finished_match_with_subscriber(db: &SqliteDatabase) -> i64 {
    let registered = register_match(db).await;
    let sub = NewSubscription::new(registered.id, "https://hooks.example.com/cb", "k-1");
    let sub = db.insert_subscription(sub).await.unwrap();
    let full_time = fixture(registered.starts_at, ExternalMatchStatus::Finished, Some((2, 2)));
    let mut scheduler = MockScheduler::new();
    scheduler.expect_schedule_subscriber_notification().returning(|_| Ok(()));
    let apis = TestApis::new(db).with_result_checks(provider_returning(vec![full_time]), scheduler);
    let (status, _) = send(apis, check_result_request(registered.id)).await;
    assert_eq!(status, StatusCode::OK);
    sub.id
}

#[actix_web::test]
async fn subscribers_are_notified_once() {
    let db = prepare_db().await;
    let sub_id = finished_match_with_subscriber(&db).await;
    let mut notifier = MockNotifier::new();
    notifier
        .expect_notify()
        .withf(|url, key, home, away| {
            url.to_string() == "https://hooks.example.com/cb"
                && key.to_string() == "k-1"
                && *home == Some(2)
                && *away == Some(2)
        })
        .times(1)
        .returning(|_, _, _, _| Ok(()));
    let (status, body) = send(TestApis::new(&db).with_notifier(notifier), notify_request(sub_id)).await;
    assert_eq!(status, StatusCode::OK);
    let outcome: NotificationOutcome = serde_json::from_str(&body).unwrap();
    assert!(matches!(outcome, NotificationOutcome::Delivered { .. }));

    // Redelivery: the webhook is not called a second time
    let (status, body) = send(TestApis::new(&db), notify_request(sub_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_str::<NotificationOutcome>(&body).unwrap(), NotificationOutcome::AlreadyNotified);
}

#[actix_web::test]
async fn rejected_webhooks_mark_the_subscription() {
    let db = prepare_db().await;
    let sub_id = finished_match_with_subscriber(&db).await;
    let mut notifier = MockNotifier::new();
    notifier
        .expect_notify()
        .returning(|_, _, _, _| Err(NotifierError::Rejected { status: 410, body: "gone".into() }));
    let (status, _) = send(TestApis::new(&db).with_notifier(notifier), notify_request(sub_id)).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    let stored = db.fetch_subscription(sub_id).await.unwrap().unwrap();
    assert_eq!(stored.status, SubscriptionStatus::SubscriberError);
    assert!(stored.error.unwrap().contains("410"));
}

#[actix_web::test]
async fn notifying_an_unknown_subscription() {
    let db = prepare_db().await;
    let (status, _) = send(TestApis::new(&db), notify_request(77)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
