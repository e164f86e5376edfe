use std::fmt::Debug;

use chrono::{DateTime, Utc};
use log::*;
use serde::{Deserialize, Serialize};

use crate::{
    db_types::{
        ExternalMatchStatus,
        Match,
        MatchResultStatus,
        NewCheckResultTask,
        SubscriptionStatus,
        SubscriptionUpdate,
    },
    traits::{FixtureProvider, ResultTrackerDatabase, SchedulerError, SubscriptionQueryFilter, TaskScheduler},
    tracker_api::{errors::ResultTrackerError, poll_schedule::PollSchedule, schedule_or_fetch_check},
};

/// What a result check did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CheckResultOutcome {
    /// The match was not `scheduled`, so nothing was done.
    Skipped { status: MatchResultStatus },
    /// The match is still in progress. Another check has been scheduled.
    Rescheduled { attempt: i32, execute_at: DateTime<Utc> },
    /// The result is in, and a notification has been scheduled for every pending subscriber.
    Received { notifications: usize },
    /// The provider reports that the match will not produce a result.
    Cancelled { external_status: ExternalMatchStatus },
}

/// `ResultCheckApi` handles the scheduled result checks for registered matches.
pub struct ResultCheckApi<B, P, S> {
    db: B,
    provider: P,
    scheduler: S,
    schedule: PollSchedule,
}

impl<B, P, S> Debug for ResultCheckApi<B, P, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ResultCheckApi ({:?})", self.schedule)
    }
}

impl<B, P, S> ResultCheckApi<B, P, S> {
    pub fn new(db: B, provider: P, scheduler: S, schedule: PollSchedule) -> Self {
        Self { db, provider, scheduler, schedule }
    }
}

impl<B, P, S> ResultCheckApi<B, P, S>
where
    B: ResultTrackerDatabase,
    P: FixtureProvider,
    S: TaskScheduler,
{
    /// Runs one result check for the match.
    ///
    /// Checks for matches that are not `scheduled` are stale or duplicate deliveries and return
    /// [`CheckResultOutcome::Skipped`]. Otherwise the provider is queried again and, depending on the fixture status:
    /// * in progress: the next check is scheduled and the match stays `scheduled`;
    /// * finished: every `pending` subscriber gets a notification task and the match becomes `received`;
    /// * anything else: the match becomes `cancelled`.
    ///
    /// Errors are returned to the caller so that the scheduler can redeliver the check.
    pub async fn check_result(&self, match_id: i64) -> Result<CheckResultOutcome, ResultTrackerError> {
        let fixture_match = self
            .db
            .fetch_match(match_id)
            .await?
            .ok_or_else(|| ResultTrackerError::NotFound(format!("Match #{match_id}")))?;
        if fixture_match.result_status != MatchResultStatus::Scheduled {
            info!(
                "🔍️ Match #{match_id} has status {}. Ignoring the result check",
                fixture_match.result_status
            );
            return Ok(CheckResultOutcome::Skipped { status: fixture_match.result_status });
        }
        let external = self.db.fetch_external_match_for_match(match_id).await?.ok_or_else(|| {
            ResultTrackerError::DataIntegrity(format!("Scheduled match #{match_id} has no external match record"))
        })?;

        let day = fixture_match.starts_at.date_naive();
        let fixtures = match self.provider.matches_for_date(day).await {
            Ok(fixtures) => fixtures,
            Err(e) => {
                warn!("🔍️ Could not fetch fixtures for {day} while checking match #{match_id}. {e}");
                self.set_status_best_effort(match_id, MatchResultStatus::ApiError).await;
                return Err(e.into());
            },
        };
        let fixture =
            fixtures.into_iter().find(|f| f.provider_match_id == external.provider_match_id).ok_or_else(|| {
                ResultTrackerError::Upstream(format!(
                    "Provider match {} is missing from the fixtures for {day}",
                    external.provider_match_id
                ))
            })?;
        let external = self.db.upsert_external_match(fixture.to_external_match(match_id)).await?;
        debug!(
            "🔍️ Match #{match_id} is {} ({:?}-{:?})",
            external.status, external.home_score, external.away_score
        );

        match external.status {
            ExternalMatchStatus::InProgress => self.reschedule(&fixture_match).await,
            ExternalMatchStatus::Finished => self.schedule_notifications(&fixture_match).await,
            status => {
                self.db.update_match_status(match_id, MatchResultStatus::Cancelled).await?;
                info!("🔍️ Match #{match_id} has been cancelled. The provider reports it as {status}");
                Ok(CheckResultOutcome::Cancelled { external_status: status })
            },
        }
    }

    /// Schedules the check after the one recorded for the match. A check task that the scheduler already holds for
    /// that attempt is reused, so concurrent deliveries of the same check converge on one follow-up.
    ///
    /// A check request carries only the match id. A stale delivery of an earlier attempt therefore advances from the
    /// latest recorded attempt and queues a second poll chain next to the one already pending. The status guard in
    /// [`Self::check_result`] ends both chains once the match leaves `scheduled`.
    async fn reschedule(&self, fixture_match: &Match) -> Result<CheckResultOutcome, ResultTrackerError> {
        let match_id = fixture_match.id;
        let current = self.db.fetch_check_task_for_match(match_id).await?.ok_or_else(|| {
            ResultTrackerError::DataIntegrity(format!("Scheduled match #{match_id} has no check task record"))
        })?;
        let attempt = current.attempt_number + 1;
        let execute_at = self.schedule.next_attempt_at(fixture_match.starts_at, current.attempt_number);
        let task = match schedule_or_fetch_check(&self.scheduler, match_id, attempt, execute_at).await {
            Ok(task) => task,
            Err(e) => {
                error!("🔍️ Could not schedule check {attempt} for match #{match_id}. {e}");
                self.set_status_best_effort(match_id, MatchResultStatus::SchedulingError).await;
                return Err(e.into());
            },
        };
        let task = NewCheckResultTask { match_id, name: task.name, attempt_number: attempt, execute_at: task.execute_at };
        let task = self.db.upsert_check_task(task).await?;
        info!("🔍️ Match #{match_id} is still in progress. Check {attempt} runs at {}", task.execute_at);
        Ok(CheckResultOutcome::Rescheduled { attempt, execute_at: task.execute_at })
    }

    async fn schedule_notifications(&self, fixture_match: &Match) -> Result<CheckResultOutcome, ResultTrackerError> {
        let match_id = fixture_match.id;
        let query = SubscriptionQueryFilter::default().with_match_id(match_id).with_status(SubscriptionStatus::Pending);
        let pending = self.db.search_subscriptions(query).await?;
        if pending.is_empty() {
            warn!("🔍️ Match #{match_id} has finished, but nobody is waiting for the result");
        }
        for subscription in &pending {
            match self.scheduler.schedule_subscriber_notification(subscription.id).await {
                Ok(()) => trace!("🔍️ Notification for subscription #{} scheduled", subscription.id),
                Err(SchedulerError::AlreadyExists(name)) => {
                    debug!("🔍️ Notification task {name} for subscription #{} already exists", subscription.id)
                },
                Err(e) => {
                    error!("🔍️ Could not schedule the notification for subscription #{}. {e}", subscription.id);
                    let update = SubscriptionUpdate::failed(SubscriptionStatus::SchedulingError, &e);
                    if let Err(db_err) = self.db.update_subscription(subscription.id, update).await {
                        error!("🔍️ Could not mark subscription #{} as failed. {db_err}", subscription.id);
                    }
                    return Err(e.into());
                },
            }
        }
        self.db.update_match_status(match_id, MatchResultStatus::Received).await?;
        info!("🔍️ Result received for match #{match_id}. {} subscribers will be notified", pending.len());
        Ok(CheckResultOutcome::Received { notifications: pending.len() })
    }

    async fn set_status_best_effort(&self, match_id: i64, status: MatchResultStatus) {
        if let Err(e) = self.db.update_match_status(match_id, status).await {
            error!("🔍️ Could not set the status of match #{match_id} to {status}. {e}");
        }
    }
}
