use actix_web::{http::StatusCode, test::TestRequest};
use chrono::{Duration, Utc};
use match_tracker_engine::{
    db_types::{ExternalMatchStatus, MatchResultStatus},
    traits::{MatchManagement, ProviderError},
    MatchSnapshot,
};
use serde_json::{json, Value};

use super::{helpers, helpers::*, mocks::MockProvider};

#[actix_web::test]
async fn health_check() {
    let db = prepare_db().await;
    let (status, body) = send(TestApis::new(&db), TestRequest::get().uri("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "👍️\n");
}

#[actix_web::test]
async fn register_match() {
    let db = prepare_db().await;
    let kickoff = tomorrow_at(18, 0);
    let provider = provider_returning(vec![fixture(kickoff, ExternalMatchStatus::NotStarted, None)]);
    let apis = TestApis::new(&db).with_match_flow(provider, accepting_scheduler());
    let req = TestRequest::post().uri("/api/matches").set_json(json!({
        "starts_at": kickoff,
        "home": "man utd",
        "away": "Chelsea FC",
    }));
    let (status, body) = send(apis, req).await;
    assert_eq!(status, StatusCode::OK);
    let match_id = serde_json::from_str::<Value>(&body).unwrap()["match_id"].as_i64().unwrap();

    let (status, body) = send(TestApis::new(&db), TestRequest::get().uri(&format!("/api/matches/{match_id}"))).await;
    assert_eq!(status, StatusCode::OK);
    let snapshot: MatchSnapshot = serde_json::from_str(&body).unwrap();
    assert_eq!(snapshot.match_record.result_status, MatchResultStatus::Scheduled);
    assert_eq!(snapshot.external_match.unwrap().provider_match_id, PROVIDER_MATCH_ID);
    let task = snapshot.check_task.unwrap();
    assert_eq!(task.attempt_number, 1);
    assert_eq!(task.execute_at, kickoff + Duration::minutes(115));
}

#[actix_web::test]
async fn registering_twice_returns_the_same_match() {
    let db = prepare_db().await;
    let registered = helpers::register_match(&db).await;
    // The match is already scheduled, so neither the provider nor the scheduler are consulted again
    let req = TestRequest::post().uri("/api/matches").set_json(json!({
        "starts_at": registered.starts_at,
        "home": "Manchester United",
        "away": "Chelsea",
    }));
    let (status, body) = send(TestApis::new(&db), req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_str::<Value>(&body).unwrap(), json!({ "match_id": registered.id }));
}

#[actix_web::test]
async fn unknown_alias() {
    let db = prepare_db().await;
    let req = TestRequest::post().uri("/api/matches").set_json(json!({
        "starts_at": tomorrow_at(18, 0),
        "home": "Man Utd",
        "away": "Spurs",
    }));
    let (status, body) = send(TestApis::new(&db), req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("away team alias 'Spurs'"), "{body}");
}

#[actix_web::test]
async fn unlinked_team() {
    let db = prepare_db().await;
    let req = TestRequest::post().uri("/api/matches").set_json(json!({
        "starts_at": tomorrow_at(18, 0),
        "home": "Wrexham",
        "away": "Chelsea",
    }));
    let (status, body) = send(TestApis::new(&db), req).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body.contains("home team 'Wrexham'"), "{body}");
}

#[actix_web::test]
async fn kickoff_in_the_past() {
    let db = prepare_db().await;
    let req = TestRequest::post().uri("/api/matches").set_json(json!({
        "starts_at": Utc::now() - Duration::hours(1),
        "home": "Man Utd",
        "away": "Chelsea",
    }));
    let (status, _) = send(TestApis::new(&db), req).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[actix_web::test]
async fn malformed_body() {
    let db = prepare_db().await;
    let req = TestRequest::post().uri("/api/matches").set_json(json!({ "home": "Man Utd", "away": "Chelsea" }));
    let (status, body) = send(TestApis::new(&db), req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.starts_with(r#"{"error":"Could not read request body"#), "{body}");
}

#[actix_web::test]
async fn fixture_missing_from_provider() {
    let db = prepare_db().await;
    let apis = TestApis::new(&db).with_match_flow(provider_returning(vec![]), accepting_scheduler());
    let kickoff = tomorrow_at(18, 0);
    let req = TestRequest::post().uri("/api/matches").set_json(json!({
        "starts_at": kickoff,
        "home": "Man Utd",
        "away": "Chelsea",
    }));
    let (status, _) = send(apis, req).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let stored = db.fetch_match_for_teams_on_day(1, 2, kickoff.date_naive()).await.unwrap();
    assert!(stored.is_none());
}

#[actix_web::test]
async fn provider_outage() {
    let db = prepare_db().await;
    let mut provider = MockProvider::new();
    provider.expect_matches_for_date().returning(|_| Err(ProviderError::Transport("connection reset".into())));
    let apis = TestApis::new(&db).with_match_flow(provider, accepting_scheduler());
    let req = TestRequest::post().uri("/api/matches").set_json(json!({
        "starts_at": tomorrow_at(18, 0),
        "home": "Man Utd",
        "away": "Chelsea",
    }));
    let (status, body) = send(apis, req).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body.contains("connection reset"), "{body}");
}

#[actix_web::test]
async fn unknown_match() {
    let db = prepare_db().await;
    let (status, _) = send(TestApis::new(&db), TestRequest::get().uri("/api/matches/9999")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
