//! Request handler definitions
//!
//! Handlers stay thin: they validate the request, call the relevant engine API and map the result onto a response.
//!
//! Two groups of routes are exposed:
//! * `/api/...` routes serve clients that register matches and subscriptions.
//! * `/tasks/...` routes are the callbacks the push task queue invokes. They answer with a non-2xx status on failure
//!   so that the queue redelivers the task.
//!
//! Handlers run on the worker's event loop, so all I/O must be awaited rather than blocking the thread.
use actix_web::{get, web, HttpResponse, Responder};
use log::*;
use match_tracker_engine::{
    traits::{FixtureProvider, ResultTrackerDatabase, TaskScheduler, WebhookNotifier},
    MatchFlowApi,
    NotificationApi,
    ResultCheckApi,
    SubscriptionApi,
};

use crate::{
    data_objects::{
        CheckResultRequest,
        DeleteSubscriptionParams,
        MatchCreated,
        NewMatchRequest,
        NewSubscriptionRequest,
        NotifySubscriberRequest,
        SubscriptionCreated,
    },
    errors::ServerError,
};

// Actix cannot register generic handlers directly, so each route gets a small service factory from the `route!` macro
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+) => {
        paste::paste! { pub struct [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ >( $( core::marker::PhantomData<fn() -> [< T $bounds:camel> ] >,)+ );}
        paste::paste! { impl< $( [< T $bounds:camel> ],)+ > [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ > {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self($( core::marker::PhantomData::<fn() -> [< T $bounds:camel> ] >,)+)
            }
        }}
        paste::paste! { impl<$( [< T $bounds:camel >] , )+> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<$([<T $bounds:camel>],)+>
        where
            $([<T $bounds:camel>]: $bounds + 'static,)+
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::< $( [< T $bounds:camel >], )+>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

// ----------------------------------------------   Matches  ---------------------------------------------------
route!(create_match => Post "/matches" impl ResultTrackerDatabase, FixtureProvider, TaskScheduler);
/// Registers a fixture for result tracking. Repeating the request for a match that is already being tracked returns
/// the same match id.
pub async fn create_match<B, P, S>(
    body: web::Json<NewMatchRequest>,
    api: web::Data<MatchFlowApi<B, P, S>>,
) -> Result<HttpResponse, ServerError>
where
    B: ResultTrackerDatabase,
    P: FixtureProvider,
    S: TaskScheduler,
{
    let req = body.into_inner();
    debug!("💻️ POST create_match {} v {} at {}", req.home, req.away, req.starts_at);
    req.validate()?;
    let fixture_match = api.create_match(req.starts_at, &req.home, &req.away).await.map_err(|e| {
        info!("💻️ Could not register {} v {}. {e}", req.home, req.away);
        ServerError::from(e)
    })?;
    Ok(HttpResponse::Ok().json(MatchCreated { match_id: fixture_match.id }))
}

route!(match_by_id => Get "/matches/{match_id}" impl ResultTrackerDatabase, FixtureProvider, TaskScheduler);
pub async fn match_by_id<B, P, S>(
    path: web::Path<i64>,
    api: web::Data<MatchFlowApi<B, P, S>>,
) -> Result<HttpResponse, ServerError>
where
    B: ResultTrackerDatabase,
    P: FixtureProvider,
    S: TaskScheduler,
{
    let match_id = path.into_inner();
    debug!("💻️ GET match_by_id({match_id})");
    let snapshot = api.fetch_match_snapshot(match_id).await?;
    Ok(HttpResponse::Ok().json(snapshot))
}

// ---------------------------------------------   Subscriptions  ----------------------------------------------
route!(subscribe => Post "/subscriptions" impl ResultTrackerDatabase, FixtureProvider, TaskScheduler);
/// Registers the match (if necessary) and subscribes the webhook to its result.
///
/// Responds with `201 Created` for a new subscription and `200 OK` if the same url and key were already subscribed.
pub async fn subscribe<B, P, S>(
    body: web::Json<NewSubscriptionRequest>,
    matches_api: web::Data<MatchFlowApi<B, P, S>>,
    subscriptions_api: web::Data<SubscriptionApi<B, S>>,
) -> Result<HttpResponse, ServerError>
where
    B: ResultTrackerDatabase,
    P: FixtureProvider,
    S: TaskScheduler,
{
    let req = body.into_inner();
    debug!("💻️ POST subscribe {} to {} v {} at {}", req.url, req.home, req.away, req.starts_at);
    req.validate()?;
    let fixture_match = matches_api.create_match(req.starts_at, &req.home, &req.away).await?;
    let (subscription, created) =
        subscriptions_api.create_subscription(fixture_match.id, &req.url, req.key.reveal()).await?;
    let body = SubscriptionCreated::from(&subscription);
    if created {
        info!("💻️ New subscription #{} for match #{}", subscription.id, fixture_match.id);
        Ok(HttpResponse::Created().json(body))
    } else {
        Ok(HttpResponse::Ok().json(body))
    }
}

route!(unsubscribe => Delete "/subscriptions" impl ResultTrackerDatabase, TaskScheduler);
/// Removes a pending subscription. `url` may be a prefix of the subscribed webhook URL.
pub async fn unsubscribe<B, S>(
    query: web::Query<DeleteSubscriptionParams>,
    api: web::Data<SubscriptionApi<B, S>>,
) -> Result<HttpResponse, ServerError>
where
    B: ResultTrackerDatabase,
    S: TaskScheduler,
{
    let params = query.into_inner();
    debug!("💻️ DELETE unsubscribe {} from {} v {} at {}", params.url, params.home, params.away, params.starts_at);
    params.validate()?;
    let deleted = api
        .delete_subscription(params.starts_at, &params.home, &params.away, &params.url, params.key.reveal())
        .await?;
    Ok(HttpResponse::Ok().json(deleted))
}

// ---------------------------------------------   Task callbacks  ---------------------------------------------
route!(check_result => Post "/check-result" impl ResultTrackerDatabase, FixtureProvider, TaskScheduler);
pub async fn check_result<B, P, S>(
    body: web::Json<CheckResultRequest>,
    api: web::Data<ResultCheckApi<B, P, S>>,
) -> Result<HttpResponse, ServerError>
where
    B: ResultTrackerDatabase,
    P: FixtureProvider,
    S: TaskScheduler,
{
    let match_id = body.match_id;
    debug!("💻️ POST check_result({match_id})");
    let outcome = api.check_result(match_id).await.map_err(|e| {
        warn!("💻️ Result check for match #{match_id} failed. The task queue will retry. {e}");
        ServerError::from(e)
    })?;
    Ok(HttpResponse::Ok().json(outcome))
}

route!(notify_subscriber => Post "/notify-subscriber" impl ResultTrackerDatabase, WebhookNotifier);
pub async fn notify_subscriber<B, N>(
    body: web::Json<NotifySubscriberRequest>,
    api: web::Data<NotificationApi<B, N>>,
) -> Result<HttpResponse, ServerError>
where
    B: ResultTrackerDatabase,
    N: WebhookNotifier,
{
    let subscription_id = body.subscription_id;
    debug!("💻️ POST notify_subscriber({subscription_id})");
    let outcome = api.notify_subscriber(subscription_id).await.map_err(|e| {
        warn!("💻️ Could not notify subscriber #{subscription_id}. {e}");
        ServerError::from(e)
    })?;
    Ok(HttpResponse::Ok().json(outcome))
}
