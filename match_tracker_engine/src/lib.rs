//! Match Tracker Engine
//!
//! The Match Tracker Engine follows a sports fixture from "registered for result polling" to "result received and
//! subscribers notified". It is provider-agnostic: the fixture data source, the push task scheduler and the webhook
//! transport are all injected through the traits in [`traits`].
//!
//! The library is divided into two main sections:
//! 1. Persistence ([`traits`] and, with the `sqlite` feature, [`SqliteDatabase`]). Backends implement the
//!    management traits and [`ResultTrackerDatabase`]. The data types stored by the backends live in [`db_types`].
//! 2. The public lifecycle API ([`tracker_api`]). Each entry point is independently idempotent, since the push
//!    scheduler may deliver a task more than once, late, or out of order.
pub mod db_types;
pub mod traits;
pub mod tracker_api;

#[cfg(feature = "sqlite")]
mod sqlite;

#[cfg(feature = "test_utils")]
pub mod test_utils;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteDatabase;
pub use tracker_api::{
    alias_api::{AliasApi, ResolvedAlias},
    errors::{AliasError, ResultTrackerError, TeamRole},
    match_flow_api::{MatchFlowApi, MatchSnapshot},
    notification_api::{NotificationApi, NotificationOutcome},
    poll_schedule::PollSchedule,
    result_check_api::{CheckResultOutcome, ResultCheckApi},
    subscription_api::{SubscriptionApi, SubscriptionDeleted},
    team_link_api::{BackfillReport, LinkedTeam, TeamLinkApi},
};
