use std::fmt::Debug;

use chrono::{DateTime, Utc};
use log::*;
use serde::{Deserialize, Serialize};

use crate::{
    db_types::{CheckResultTask, ExternalMatch, Match, MatchResultStatus, NewCheckResultTask, NewMatch},
    traits::{FixtureProvider, ResultTrackerDatabase, TaskScheduler},
    tracker_api::{
        alias_api::AliasApi,
        errors::ResultTrackerError,
        poll_schedule::PollSchedule,
        schedule_or_fetch_check,
    },
};

/// A match, together with the cached provider snapshot and the outstanding result check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchSnapshot {
    #[serde(rename = "match")]
    pub match_record: Match,
    pub external_match: Option<ExternalMatch>,
    pub check_task: Option<CheckResultTask>,
}

/// `MatchFlowApi` registers fixtures for result tracking.
pub struct MatchFlowApi<B, P, S> {
    db: B,
    aliases: AliasApi<B>,
    provider: P,
    scheduler: S,
    schedule: PollSchedule,
}

impl<B, P, S> Debug for MatchFlowApi<B, P, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MatchFlowApi ({:?})", self.schedule)
    }
}

impl<B: Clone, P, S> MatchFlowApi<B, P, S> {
    pub fn new(db: B, provider: P, scheduler: S, schedule: PollSchedule) -> Self {
        let aliases = AliasApi::new(db.clone());
        Self { db, aliases, provider, scheduler, schedule }
    }
}

impl<B, P, S> MatchFlowApi<B, P, S>
where
    B: ResultTrackerDatabase,
    P: FixtureProvider,
    S: TaskScheduler,
{
    /// Registers the fixture between `home` and `away` (team aliases) kicking off at `starts_at` for result tracking.
    ///
    /// The call is idempotent: while a match is `scheduled`, repeating the request returns the same match. A match
    /// that is still `not_scheduled` (a previous attempt failed part-way) is picked up and completed. Any other
    /// status is final and the request is rejected.
    ///
    /// The provider's kickoff time replaces `starts_at` when the match is stored, and the first result check is
    /// scheduled relative to it.
    pub async fn create_match(
        &self,
        starts_at: DateTime<Utc>,
        home: &str,
        away: &str,
    ) -> Result<Match, ResultTrackerError> {
        if starts_at <= Utc::now() {
            return Err(ResultTrackerError::UnprocessableContent(format!(
                "The match start time must be in the future, but {starts_at} has already passed"
            )));
        }
        let (home_team, away_team) = self.aliases.find_pair(home, away).await?;
        let day = starts_at.date_naive();
        let existing = self.db.fetch_match_for_teams_on_day(home_team.team_id, away_team.team_id, day).await?;
        let existing_id = match existing {
            Some(m) if m.result_status == MatchResultStatus::Scheduled => {
                debug!("⚽️ Match #{} ({home} v {away} on {day}) is already scheduled", m.id);
                return Ok(m);
            },
            Some(m) if m.result_status != MatchResultStatus::NotScheduled => {
                return Err(ResultTrackerError::UnprocessableContent(format!(
                    "Match #{} between {home} and {away} on {day} already exists with status {}",
                    m.id, m.result_status
                )));
            },
            Some(m) => {
                debug!("⚽️ Match #{} exists but was never scheduled. Resuming registration", m.id);
                Some(m.id)
            },
            None => None,
        };

        let fixtures = self.provider.matches_for_date(day).await?;
        trace!("⚽️ The provider returned {} fixtures for {day}", fixtures.len());
        let fixture = fixtures
            .into_iter()
            .find(|f| f.is_between(home_team.external_team_id, away_team.external_team_id))
            .ok_or_else(|| {
                ResultTrackerError::UnprocessableContent(format!(
                    "The fixture provider has no match between {home} and {away} on {day}"
                ))
            })?;
        if !fixture.status.is_schedulable() {
            return Err(ResultTrackerError::UnprocessableContent(format!(
                "The fixture between {home} and {away} on {day} cannot be tracked. Its status is {}",
                fixture.status
            )));
        }

        let new_match = NewMatch::new(home_team.team_id, away_team.team_id, fixture.starts_at).with_id(existing_id);
        let saved = self.db.upsert_match(new_match).await?;
        let external = self.db.upsert_external_match(fixture.to_external_match(saved.id)).await?;
        debug!("⚽️ Match #{} is provider match {}", saved.id, external.provider_match_id);

        let first_check = self.schedule.first_attempt_at(saved.starts_at);
        let task = schedule_or_fetch_check(&self.scheduler, saved.id, 1, first_check).await?;
        let task =
            NewCheckResultTask { match_id: saved.id, name: task.name, attempt_number: 1, execute_at: task.execute_at };
        let task = self.db.upsert_check_task(task).await?;

        let scheduled = self.db.update_match_status(saved.id, MatchResultStatus::Scheduled).await?;
        info!(
            "⚽️ Match #{} ({home} v {away}) is scheduled. The first result check ({}) runs at {}",
            scheduled.id, task.name, task.execute_at
        );
        Ok(scheduled)
    }

    /// Fetches the match with its provider snapshot and current check task.
    pub async fn fetch_match_snapshot(&self, match_id: i64) -> Result<MatchSnapshot, ResultTrackerError> {
        let match_record = self
            .db
            .fetch_match(match_id)
            .await?
            .ok_or_else(|| ResultTrackerError::NotFound(format!("Match #{match_id}")))?;
        let external_match = self.db.fetch_external_match_for_match(match_id).await?;
        let check_task = self.db.fetch_check_task_for_match(match_id).await?;
        Ok(MatchSnapshot { match_record, external_match, check_task })
    }
}
