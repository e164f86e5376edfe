//! # Backend and collaborator contracts
//!
//! Persistence is split per entity, the way the lifecycle APIs consume it:
//!
//! * [`AliasManagement`] resolves human-entered team names and maintains the provider links.
//! * [`MatchManagement`] stores matches, keyed by (home, away, match day).
//! * [`ExternalMatchManagement`] caches the provider's latest view of a fixture.
//! * [`CheckTaskManagement`] keeps the single outstanding result-check task per match.
//! * [`SubscriptionManagement`] stores webhook subscriptions.
//!
//! [`ResultTrackerDatabase`] bundles all of the above into a single backend.
//!
//! The three outbound collaborators are [`FixtureProvider`], [`TaskScheduler`] and [`WebhookNotifier`].
mod alias_management;
mod check_task_management;
mod database_error;
mod external_match_management;
mod fixture_provider;
mod match_management;
mod result_tracker_database;
mod subscription_management;
mod task_scheduler;
mod webhook_notifier;

mod data_objects;

pub use alias_management::AliasManagement;
pub use check_task_management::CheckTaskManagement;
pub use data_objects::{Fixture, ScheduledTask, SubscriptionQueryFilter};
pub use database_error::DatabaseError;
pub use external_match_management::ExternalMatchManagement;
pub use fixture_provider::{FixtureProvider, ProviderError};
pub use match_management::MatchManagement;
pub use result_tracker_database::ResultTrackerDatabase;
pub use subscription_management::SubscriptionManagement;
pub use task_scheduler::{SchedulerError, TaskScheduler};
pub use webhook_notifier::{NotifierError, WebhookNotifier};
