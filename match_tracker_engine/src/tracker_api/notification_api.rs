use std::fmt::Debug;

use chrono::{DateTime, Utc};
use log::*;
use serde::{Deserialize, Serialize};

use crate::{
    db_types::{SubscriptionStatus, SubscriptionUpdate},
    traits::{ResultTrackerDatabase, WebhookNotifier},
    tracker_api::errors::ResultTrackerError,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum NotificationOutcome {
    /// The subscriber had already received the result. No webhook was called.
    AlreadyNotified,
    Delivered { notified_at: DateTime<Utc> },
}

/// `NotificationApi` delivers match results to subscribers.
pub struct NotificationApi<B, N> {
    db: B,
    notifier: N,
}

impl<B, N> Debug for NotificationApi<B, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "NotificationApi")
    }
}

impl<B, N> NotificationApi<B, N> {
    pub fn new(db: B, notifier: N) -> Self {
        Self { db, notifier }
    }
}

impl<B, N> NotificationApi<B, N>
where
    B: ResultTrackerDatabase,
    N: WebhookNotifier,
{
    /// Sends the match result to the subscriber's webhook.
    ///
    /// A subscriber that has already been notified is not called again. A failed delivery marks the subscription as
    /// `subscriber_error` and returns the error, leaving any retry to the scheduler.
    pub async fn notify_subscriber(&self, subscription_id: i64) -> Result<NotificationOutcome, ResultTrackerError> {
        let subscription = self
            .db
            .fetch_subscription(subscription_id)
            .await?
            .ok_or_else(|| ResultTrackerError::NotFound(format!("Subscription #{subscription_id}")))?;
        if subscription.status == SubscriptionStatus::Successful {
            info!("📣️ Subscription #{subscription_id} has already been notified. Skipping");
            return Ok(NotificationOutcome::AlreadyNotified);
        }
        let match_id = subscription.match_id;
        let fixture_match = self
            .db
            .fetch_match(match_id)
            .await?
            .ok_or_else(|| ResultTrackerError::NotFound(format!("Match #{match_id}")))?;
        let external = self.db.fetch_external_match_for_match(fixture_match.id).await?.ok_or_else(|| {
            ResultTrackerError::DataIntegrity(format!("Match #{match_id} has no external match record"))
        })?;

        let result =
            self.notifier.notify(&subscription.url, &subscription.key, external.home_score, external.away_score).await;
        if let Err(e) = result {
            warn!("📣️ Could not notify subscription #{subscription_id} at {}. {e}", subscription.url);
            let update = SubscriptionUpdate::failed(SubscriptionStatus::SubscriberError, &e);
            if let Err(db_err) = self.db.update_subscription(subscription_id, update).await {
                error!("📣️ Could not record the failed notification for subscription #{subscription_id}. {db_err}");
            }
            return Err(e.into());
        }
        let notified_at = Utc::now();
        self.db.update_subscription(subscription_id, SubscriptionUpdate::successful(notified_at)).await?;
        info!("📣️ Subscription #{subscription_id} notified of the result of match #{match_id}");
        Ok(NotificationOutcome::Delivered { notified_at })
    }
}
