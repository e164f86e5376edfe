use std::fmt::Debug;

use chrono::{DateTime, Utc};
use log::*;
use serde::{Deserialize, Serialize};

use crate::{
    db_types::{MatchResultStatus, NewSubscription, Subscription, SubscriptionStatus},
    traits::{DatabaseError, ResultTrackerDatabase, SchedulerError, SubscriptionQueryFilter, TaskScheduler},
    tracker_api::{alias_api::AliasApi, errors::ResultTrackerError},
};

/// The result of removing a subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionDeleted {
    pub subscription_id: i64,
    pub match_id: i64,
    /// True if this was the last subscription, and the match was removed along with it.
    pub match_deleted: bool,
}

/// `SubscriptionApi` registers and removes webhook subscriptions for match results.
pub struct SubscriptionApi<B, S> {
    db: B,
    aliases: AliasApi<B>,
    scheduler: S,
}

impl<B, S> Debug for SubscriptionApi<B, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SubscriptionApi")
    }
}

impl<B: Clone, S> SubscriptionApi<B, S> {
    pub fn new(db: B, scheduler: S) -> Self {
        let aliases = AliasApi::new(db.clone());
        Self { db, aliases, scheduler }
    }
}

impl<B, S> SubscriptionApi<B, S>
where
    B: ResultTrackerDatabase,
    S: TaskScheduler,
{
    /// Subscribes `url` to the result of the match. The match must be `scheduled`.
    ///
    /// A (url, key) pair can only be registered once. Registering it again succeeds and returns the existing
    /// subscription. The second element of the result is `true` if a new subscription was created.
    pub async fn create_subscription(
        &self,
        match_id: i64,
        url: &str,
        key: &str,
    ) -> Result<(Subscription, bool), ResultTrackerError> {
        let fixture_match = self
            .db
            .fetch_match(match_id)
            .await?
            .ok_or_else(|| ResultTrackerError::NotFound(format!("Match #{match_id}")))?;
        if fixture_match.result_status != MatchResultStatus::Scheduled {
            return Err(ResultTrackerError::UnprocessableContent(format!(
                "Match #{match_id} has status {}. Only scheduled matches accept subscriptions",
                fixture_match.result_status
            )));
        }
        match self.db.insert_subscription(NewSubscription::new(match_id, url, key)).await {
            Ok(subscription) => {
                info!("📬️ Subscription #{} registered for match #{match_id}", subscription.id);
                Ok((subscription, true))
            },
            Err(DatabaseError::AlreadyExists(_)) => {
                let existing = self.db.fetch_subscription_by_url_and_key(url, key).await?.ok_or_else(|| {
                    ResultTrackerError::DataIntegrity(format!("Subscription for {url} exists but cannot be fetched"))
                })?;
                debug!("📬️ Subscription #{} for {url} is already registered", existing.id);
                Ok((existing, false))
            },
            Err(e) => Err(e.into()),
        }
    }

    /// Removes the subscription to the match between `home` and `away` on the day of `starts_at`, identified by its
    /// key and a URL prefix.
    ///
    /// Subscriptions that have already been notified cannot be removed. When the last subscription for a match is
    /// removed, the match and its outstanding result check are removed as well. Failures during that cleanup are
    /// logged and do not fail the call.
    pub async fn delete_subscription(
        &self,
        starts_at: DateTime<Utc>,
        home: &str,
        away: &str,
        base_url: &str,
        key: &str,
    ) -> Result<SubscriptionDeleted, ResultTrackerError> {
        let (home_team, away_team) = self.aliases.find_pair(home, away).await?;
        let day = starts_at.date_naive();
        let fixture_match = self
            .db
            .fetch_match_for_teams_on_day(home_team.team_id, away_team.team_id, day)
            .await?
            .ok_or_else(|| ResultTrackerError::NotFound(format!("Match between {home} and {away} on {day}")))?;
        let match_id = fixture_match.id;
        let query = SubscriptionQueryFilter::default().with_match_id(match_id).with_key(key).with_url_prefix(base_url);
        let subscription = self
            .db
            .search_subscriptions(query)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| ResultTrackerError::NotFound(format!("Subscription for {base_url} to match #{match_id}")))?;
        if subscription.status == SubscriptionStatus::Successful {
            return Err(ResultTrackerError::UnprocessableContent(format!(
                "Subscription #{} has already been notified and cannot be removed",
                subscription.id
            )));
        }
        self.db.delete_subscription(subscription.id).await?;
        info!("📬️ Subscription #{} to match #{match_id} removed", subscription.id);

        let remaining = self.db.search_subscriptions(SubscriptionQueryFilter::default().with_match_id(match_id)).await?;
        let match_deleted = if remaining.is_empty() { self.remove_match(match_id).await } else { false };
        Ok(SubscriptionDeleted { subscription_id: subscription.id, match_id, match_deleted })
    }

    /// Removes a match nobody is subscribed to, along with its scheduled result check.
    async fn remove_match(&self, match_id: i64) -> bool {
        let task = match self.db.fetch_check_task_for_match(match_id).await {
            Ok(task) => task,
            Err(e) => {
                warn!("📬️ Could not fetch the check task for match #{match_id}. {e}");
                None
            },
        };
        let deleted = match self.db.delete_match(match_id).await {
            Ok(()) => {
                info!("📬️ Match #{match_id} has no subscribers left and has been removed");
                true
            },
            Err(e) => {
                error!("📬️ Could not remove match #{match_id}. {e}");
                false
            },
        };
        if let Some(task) = task {
            match self.scheduler.delete_task(&task.name).await {
                Ok(()) => debug!("📬️ Check task {} removed from the scheduler", task.name),
                Err(SchedulerError::NotFound(name)) => debug!("📬️ Check task {name} had already gone"),
                Err(e) => warn!("📬️ Could not remove check task {} from the scheduler. {e}", task.name),
            }
        }
        deleted
    }
}
