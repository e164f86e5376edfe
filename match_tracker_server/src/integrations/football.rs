use chrono::NaiveDate;
use fixture_tools::{
    data_objects::{ApiFixture, FixtureStatus},
    FixtureToolsError,
    FootballApi,
};
use log::*;
use match_tracker_engine::{
    db_types::ExternalMatchStatus,
    traits::{Fixture, FixtureProvider, ProviderError},
};

/// [`FixtureProvider`] backed by the football data API.
#[derive(Clone)]
pub struct FootballProvider {
    api: FootballApi,
}

impl FootballProvider {
    pub fn new(api: FootballApi) -> Self {
        Self { api }
    }
}

impl FixtureProvider for FootballProvider {
    async fn matches_for_date(&self, date: NaiveDate) -> Result<Vec<Fixture>, ProviderError> {
        let fixtures = self.api.fixtures_for_date(date).await.map_err(|e| {
            warn!("⚽️ Could not fetch fixtures for {date}. {e}");
            provider_error(e)
        })?;
        trace!("⚽️ {} fixtures on {date}", fixtures.len());
        Ok(fixtures.into_iter().map(fixture_from_api).collect())
    }
}

pub fn fixture_from_api(f: ApiFixture) -> Fixture {
    let status = match f.status() {
        FixtureStatus::NotStarted => ExternalMatchStatus::NotStarted,
        FixtureStatus::InProgress => ExternalMatchStatus::InProgress,
        FixtureStatus::Finished => ExternalMatchStatus::Finished,
        FixtureStatus::Cancelled => ExternalMatchStatus::Cancelled,
        FixtureStatus::Unknown => ExternalMatchStatus::Unknown,
    };
    Fixture {
        provider_match_id: f.fixture.id,
        home_team_id: f.teams.home.id,
        away_team_id: f.teams.away.id,
        home_team_name: f.teams.home.name,
        away_team_name: f.teams.away.name,
        starts_at: f.fixture.date,
        status,
        home_score: f.goals.home,
        away_score: f.goals.away,
    }
}

fn provider_error(e: FixtureToolsError) -> ProviderError {
    match e {
        FixtureToolsError::RequestError(s) | FixtureToolsError::Initialization(s) => ProviderError::Transport(s),
        FixtureToolsError::JsonError(s) => ProviderError::InvalidResponse(s),
        e => ProviderError::Rejected(e.to_string()),
    }
}
