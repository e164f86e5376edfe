use std::{
    collections::{HashMap, HashSet},
    fmt::Debug,
};

use chrono::NaiveDate;
use futures_util::{stream, StreamExt};
use log::*;
use serde::{Deserialize, Serialize};

use crate::{
    traits::{AliasManagement, FixtureProvider},
    tracker_api::errors::ResultTrackerError,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkedTeam {
    pub team_id: i64,
    pub team_name: String,
    pub alias: String,
    pub provider_team_id: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackfillReport {
    pub dates_fetched: usize,
    pub dates_failed: Vec<NaiveDate>,
    pub linked: Vec<LinkedTeam>,
}

/// `TeamLinkApi` links teams to the fixture provider by matching their aliases against provider team names.
pub struct TeamLinkApi<B, P> {
    db: B,
    provider: P,
}

impl<B, P> Debug for TeamLinkApi<B, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TeamLinkApi")
    }
}

impl<B, P> TeamLinkApi<B, P> {
    pub fn new(db: B, provider: P) -> Self {
        Self { db, provider }
    }
}

impl<B, P> TeamLinkApi<B, P>
where
    B: AliasManagement,
    P: FixtureProvider,
{
    /// Fetches the fixtures for every date, at most `concurrency` at a time, and links each unlinked team that has an
    /// alias equal (ignoring case) to a provider team name.
    ///
    /// Dates that cannot be fetched are logged and reported, and do not stop the backfill.
    pub async fn backfill_external_teams(
        &self,
        dates: Vec<NaiveDate>,
        concurrency: usize,
    ) -> Result<BackfillReport, ResultTrackerError> {
        let mut report = BackfillReport::default();
        let provider = &self.provider;
        let mut fetches = stream::iter(dates)
            .map(|date| async move { (date, provider.matches_for_date(date).await) })
            .buffer_unordered(concurrency.max(1));
        let mut provider_teams = HashMap::new();
        while let Some((date, result)) = fetches.next().await {
            match result {
                Ok(fixtures) => {
                    trace!("🔗️ {} fixtures fetched for {date}", fixtures.len());
                    report.dates_fetched += 1;
                    for fixture in fixtures {
                        provider_teams.entry(fixture.home_team_name.to_lowercase()).or_insert(fixture.home_team_id);
                        provider_teams.entry(fixture.away_team_name.to_lowercase()).or_insert(fixture.away_team_id);
                    }
                },
                Err(e) => {
                    warn!("🔗️ Could not fetch fixtures for {date}. {e}");
                    report.dates_failed.push(date);
                },
            }
        }
        report.dates_failed.sort();
        debug!("🔗️ {} provider teams found in {} days of fixtures", provider_teams.len(), report.dates_fetched);

        let unlinked = self.db.fetch_unlinked_aliases().await?;
        let mut linked_teams = HashSet::new();
        for record in unlinked {
            if linked_teams.contains(&record.team_id) {
                continue;
            }
            let Some(&provider_team_id) = provider_teams.get(&record.alias.to_lowercase()) else {
                continue;
            };
            self.db.link_external_team(record.team_id, provider_team_id).await?;
            info!("🔗️ Team #{} ({}) linked to provider team {provider_team_id}", record.team_id, record.team_name);
            linked_teams.insert(record.team_id);
            report.linked.push(LinkedTeam {
                team_id: record.team_id,
                team_name: record.team_name,
                alias: record.alias,
                provider_team_id,
            });
        }
        Ok(report)
    }
}
