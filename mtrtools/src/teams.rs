use anyhow::{Context, Result};
use log::*;
use match_tracker_engine::{AliasApi, AliasError, SqliteDatabase};

pub async fn open_database(url: &str) -> Result<SqliteDatabase> {
    let db = SqliteDatabase::new_with_url(url, 4).await.with_context(|| format!("Could not open database {url}"))?;
    db.run_migrations().await.context("Could not bring the database schema up to date")?;
    debug!("Using database {url}");
    Ok(db)
}

pub async fn add_team(db: SqliteDatabase, name: &str, aliases: &[String], external_id: Option<i64>) -> Result<()> {
    let api = AliasApi::new(db);
    let team = api.register_team(name, aliases, external_id).await.with_context(|| format!("Could not add {name}"))?;
    println!("Team #{} ({}) created", team.id, team.name);
    match external_id {
        Some(id) => println!("Linked to provider team {id}"),
        None => println!("Not linked to the fixture provider. Run `mtrtools backfill` or add it with --external-id"),
    }
    Ok(())
}

pub async fn find_team(db: SqliteDatabase, alias: &str) -> Result<()> {
    let api = AliasApi::new(db);
    match api.find(alias).await {
        Ok(team) => {
            println!("'{alias}' is team #{} ({}), provider team {}", team.team_id, team.team_name, team.external_team_id);
            Ok(())
        },
        Err(AliasError::MissingExternalLink(_)) => {
            println!("'{alias}' is a known team, but it is not linked to the fixture provider");
            Ok(())
        },
        Err(e) => Err(e).context("Alias lookup failed"),
    }
}
