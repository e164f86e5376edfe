use anyhow::{bail, Context, Result};
use chrono::{Days, NaiveDate};
use fixture_tools::{FootballApi, FootballApiConfig};
use log::*;
use match_tracker_engine::{SqliteDatabase, TeamLinkApi};
use match_tracker_server::integrations::FootballProvider;

use crate::BackfillParams;

pub async fn run_backfill(db: SqliteDatabase, params: BackfillParams) -> Result<()> {
    let dates = date_range(params.from, params.to)?;
    let api = FootballApi::new(FootballApiConfig::new_from_env_or_default()).context("Could not create API client")?;
    let links = TeamLinkApi::new(db, FootballProvider::new(api));
    info!("🔗️ Fetching fixtures for {} dates, {} at a time", dates.len(), params.concurrency);
    let report = links.backfill_external_teams(dates, params.concurrency).await?;
    println!("Dates fetched: {}", report.dates_fetched);
    if !report.dates_failed.is_empty() {
        let failed = report.dates_failed.iter().map(|d| d.to_string()).collect::<Vec<_>>().join(", ");
        println!("Dates that could not be fetched: {failed}");
    }
    if report.linked.is_empty() {
        println!("No teams were linked");
    }
    for team in &report.linked {
        println!(
            "Linked team #{} ({}) to provider team {} via alias '{}'",
            team.team_id, team.team_name, team.provider_team_id, team.alias
        );
    }
    Ok(())
}

fn date_range(from: NaiveDate, to: NaiveDate) -> Result<Vec<NaiveDate>> {
    if to < from {
        bail!("The end date ({to}) is before the start date ({from})");
    }
    let mut dates = Vec::new();
    let mut date = from;
    while date <= to {
        dates.push(date);
        date = date.checked_add_days(Days::new(1)).context("Date out of range")?;
    }
    Ok(dates)
}
