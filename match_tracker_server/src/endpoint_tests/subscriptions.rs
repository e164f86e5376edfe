use actix_web::{http::StatusCode, test::TestRequest};
use chrono::{SecondsFormat, Utc};
use match_tracker_engine::{
    db_types::{ExternalMatchStatus, Match, NewSubscription, SubscriptionStatus, SubscriptionUpdate},
    traits::{MatchManagement, SubscriptionManagement},
    SubscriptionDeleted,
};
use serde_json::json;

use super::{helpers::*, mocks::MockScheduler};
use crate::data_objects::SubscriptionCreated;

fn subscribe_request(starts_at: &str, url: &str, key: &str) -> TestRequest {
    TestRequest::post().uri("/api/subscriptions").set_json(json!({
        "starts_at": starts_at,
        "home": "Man Utd",
        "away": "Chelsea",
        "url": url,
        "key": key,
    }))
}

fn unsubscribe_request(registered: &Match, url_prefix: &str, key: &str) -> TestRequest {
    let starts_at = registered.starts_at.to_rfc3339_opts(SecondsFormat::Secs, true);
    let uri = format!("/api/subscriptions?starts_at={starts_at}&home=Man%20Utd&away=Chelsea&url={url_prefix}&key={key}");
    TestRequest::delete().uri(&uri)
}

#[actix_web::test]
async fn subscribe_registers_the_match() {
    let db = prepare_db().await;
    let kickoff = tomorrow_at(20, 0);
    let provider = provider_returning(vec![fixture(kickoff, ExternalMatchStatus::NotStarted, None)]);
    let apis = TestApis::new(&db).with_match_flow(provider, accepting_scheduler());
    let starts_at = kickoff.to_rfc3339();
    let (status, body) = send(apis, subscribe_request(&starts_at, "https://hooks.example.com/results", "k-1")).await;
    assert_eq!(status, StatusCode::CREATED);
    let created: SubscriptionCreated = serde_json::from_str(&body).unwrap();
    assert_eq!(created.status, SubscriptionStatus::Pending);
    assert!(!body.contains("k-1"));

    // Same url and key: the existing subscription comes back
    let (status, body) =
        send(TestApis::new(&db), subscribe_request(&starts_at, "https://hooks.example.com/results", "k-1")).await;
    assert_eq!(status, StatusCode::OK);
    let repeated: SubscriptionCreated = serde_json::from_str(&body).unwrap();
    assert_eq!(repeated.subscription_id, created.subscription_id);
    assert_eq!(repeated.match_id, created.match_id);
}

#[actix_web::test]
async fn subscribe_rejects_invalid_webhooks() {
    let db = prepare_db().await;
    let starts_at = tomorrow_at(20, 0).to_rfc3339();
    let (status, body) = send(TestApis::new(&db), subscribe_request(&starts_at, "hooks.example.com", "k")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("is not an http(s) URL"), "{body}");
    let (status, _) = send(TestApis::new(&db), subscribe_request(&starts_at, "https://hooks.example.com", "")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn unsubscribing_the_last_subscriber_removes_the_match() {
    let db = prepare_db().await;
    let registered = register_match(&db).await;
    let new_sub = NewSubscription::new(registered.id, "https://hooks.example.com/results/42", "k-1");
    let sub = db.insert_subscription(new_sub).await.unwrap();
    let mut scheduler = MockScheduler::new();
    let task_name = format!("check-result-{}-1", registered.id);
    scheduler.expect_delete_task().withf(move |name| name.to_string() == task_name).times(1).returning(|_| Ok(()));
    let apis = TestApis::new(&db).with_subscriptions(scheduler);

    let (status, body) = send(apis, unsubscribe_request(&registered, "https://hooks.example.com/results", "k-1")).await;
    assert_eq!(status, StatusCode::OK);
    let deleted: SubscriptionDeleted = serde_json::from_str(&body).unwrap();
    assert_eq!(deleted, SubscriptionDeleted { subscription_id: sub.id, match_id: registered.id, match_deleted: true });
    assert!(db.fetch_match(registered.id).await.unwrap().is_none());
}

#[actix_web::test]
async fn unsubscribing_one_of_many_keeps_the_match() {
    let db = prepare_db().await;
    let registered = register_match(&db).await;
    db.insert_subscription(NewSubscription::new(registered.id, "https://a.example.com/cb", "k-a")).await.unwrap();
    db.insert_subscription(NewSubscription::new(registered.id, "https://b.example.com/cb", "k-b")).await.unwrap();

    let (status, body) = send(TestApis::new(&db), unsubscribe_request(&registered, "https://b.example.com", "k-b")).await;
    assert_eq!(status, StatusCode::OK);
    let deleted: SubscriptionDeleted = serde_json::from_str(&body).unwrap();
    assert!(!deleted.match_deleted);
    assert!(db.fetch_match(registered.id).await.unwrap().is_some());
}

#[actix_web::test]
async fn notified_subscriptions_cannot_be_removed() {
    let db = prepare_db().await;
    let registered = register_match(&db).await;
    let sub = NewSubscription::new(registered.id, "https://hooks.example.com/cb", "k-1");
    let sub = db.insert_subscription(sub).await.unwrap();
    db.update_subscription(sub.id, SubscriptionUpdate::successful(Utc::now())).await.unwrap();

    let (status, body) =
        send(TestApis::new(&db), unsubscribe_request(&registered, "https://hooks.example.com", "k-1")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body.contains("already been notified"), "{body}");
    assert!(db.fetch_subscription(sub.id).await.unwrap().is_some());
}

#[actix_web::test]
async fn unsubscribing_with_the_wrong_key() {
    let db = prepare_db().await;
    let registered = register_match(&db).await;
    db.insert_subscription(NewSubscription::new(registered.id, "https://hooks.example.com/cb", "k-1")).await.unwrap();
    let (status, _) =
        send(TestApis::new(&db), unsubscribe_request(&registered, "https://hooks.example.com", "other")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn unsubscribe_requires_all_parameters() {
    let db = prepare_db().await;
    let req = TestRequest::delete().uri("/api/subscriptions?home=Man%20Utd&away=Chelsea");
    let (status, body) = send(TestApis::new(&db), req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("Could not read request query"), "{body}");
}
