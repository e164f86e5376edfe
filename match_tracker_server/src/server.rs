use std::time::Duration;

use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use fixture_tools::{FootballApi, TaskQueueClient, WebhookClient};
use log::*;
use match_tracker_engine::{
    traits::{FixtureProvider, ResultTrackerDatabase, TaskScheduler, WebhookNotifier},
    MatchFlowApi,
    NotificationApi,
    ResultCheckApi,
    SqliteDatabase,
    SubscriptionApi,
};

use crate::{
    config::ServerConfig,
    errors::ServerError,
    integrations::{FootballProvider, HttpWebhookNotifier, QueueTaskScheduler},
    routes::{
        health,
        CheckResultRoute,
        CreateMatchRoute,
        MatchByIdRoute,
        NotifySubscriberRoute,
        SubscribeRoute,
        UnsubscribeRoute,
    },
};

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let db = SqliteDatabase::new_with_url(&config.database_url, 25)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    db.run_migrations().await.map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let srv = create_server_instance(config, db)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

pub fn create_server_instance(config: ServerConfig, db: SqliteDatabase) -> Result<Server, ServerError> {
    let football = FootballApi::new(config.football.clone()).map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let task_queue =
        TaskQueueClient::new(config.task_queue.clone()).map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let webhooks = WebhookClient::new(config.webhook.clone()).map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let provider = FootballProvider::new(football);
    let scheduler = QueueTaskScheduler::new(task_queue);
    let notifier = HttpWebhookNotifier::new(webhooks);
    let schedule = config.poll_schedule;
    info!(
        "🕰️ First result check {} mins after kickoff, then every {} mins",
        schedule.first_attempt_delay.num_minutes(),
        schedule.interval.num_minutes()
    );
    let access_log_format =
        if config.use_x_forwarded_for { "%t (%D ms) %s %{r}a %{Host}i %U" } else { "%t (%D ms) %s %a %{Host}i %U" };
    let srv = HttpServer::new(move || {
        let matches_api = MatchFlowApi::new(db.clone(), provider.clone(), scheduler.clone(), schedule);
        let checks_api = ResultCheckApi::new(db.clone(), provider.clone(), scheduler.clone(), schedule);
        let subscriptions_api = SubscriptionApi::new(db.clone(), scheduler.clone());
        let notifications_api = NotificationApi::new(db.clone(), notifier.clone());
        App::new()
            .wrap(Logger::new(access_log_format).log_target("mtr::access_log"))
            .app_data(web::Data::new(matches_api))
            .app_data(web::Data::new(checks_api))
            .app_data(web::Data::new(subscriptions_api))
            .app_data(web::Data::new(notifications_api))
            .configure(configure_routes::<SqliteDatabase, FootballProvider, QueueTaskScheduler, HttpWebhookNotifier>)
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}

/// Registers every route, plus extractor configuration that reports malformed requests as JSON errors.
///
/// The engine APIs the routes need must be registered as app data by the caller.
pub fn configure_routes<B, P, S, N>(cfg: &mut web::ServiceConfig)
where
    B: ResultTrackerDatabase + 'static,
    P: FixtureProvider + 'static,
    S: TaskScheduler + 'static,
    N: WebhookNotifier + 'static,
{
    let json_config = web::JsonConfig::default()
        .error_handler(|err, _req| ServerError::InvalidRequestBody(err.to_string()).into());
    let query_config = web::QueryConfig::default()
        .error_handler(|err, _req| ServerError::InvalidRequestQuery(err.to_string()).into());
    let api_scope = web::scope("/api")
        .service(CreateMatchRoute::<B, P, S>::new())
        .service(MatchByIdRoute::<B, P, S>::new())
        .service(SubscribeRoute::<B, P, S>::new())
        .service(UnsubscribeRoute::<B, S>::new());
    let task_scope = web::scope("/tasks")
        .service(CheckResultRoute::<B, P, S>::new())
        .service(NotifySubscriberRoute::<B, N>::new());
    cfg.app_data(json_config).app_data(query_config).service(health).service(api_scope).service(task_scope);
}
