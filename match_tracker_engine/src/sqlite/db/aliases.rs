use log::debug;
use sqlx::SqliteConnection;

use crate::db_types::{Alias, AliasRecord, ExternalTeam, Team};

const ALIAS_RECORD_SELECT: &str = r#"
    SELECT
        aliases.alias,
        aliases.team_id,
        teams.name AS team_name,
        external_teams.provider_team_id
    FROM aliases
    JOIN teams ON teams.id = aliases.team_id
    LEFT JOIN external_teams ON external_teams.team_id = aliases.team_id
"#;

/// Looks up an alias. The `alias` column is declared `COLLATE NOCASE`, so the comparison ignores case.
pub async fn fetch_alias_record(alias: &str, conn: &mut SqliteConnection) -> Result<Option<AliasRecord>, sqlx::Error> {
    let query = format!("{ALIAS_RECORD_SELECT} WHERE aliases.alias = $1");
    let record = sqlx::query_as(&query).bind(alias.trim()).fetch_optional(conn).await?;
    Ok(record)
}

pub async fn fetch_unlinked_aliases(conn: &mut SqliteConnection) -> Result<Vec<AliasRecord>, sqlx::Error> {
    let query = format!("{ALIAS_RECORD_SELECT} WHERE external_teams.id IS NULL ORDER BY aliases.team_id, aliases.id");
    let records = sqlx::query_as(&query).fetch_all(conn).await?;
    Ok(records)
}

pub async fn insert_team(name: &str, conn: &mut SqliteConnection) -> Result<Team, sqlx::Error> {
    let team: Team =
        sqlx::query_as("INSERT INTO teams (name) VALUES ($1) RETURNING *").bind(name.trim()).fetch_one(conn).await?;
    debug!("🗃️ Team {} created with id {}", team.name, team.id);
    Ok(team)
}

pub async fn insert_alias(team_id: i64, alias: &str, conn: &mut SqliteConnection) -> Result<Alias, sqlx::Error> {
    let alias: Alias = sqlx::query_as("INSERT INTO aliases (alias, team_id) VALUES ($1, $2) RETURNING *")
        .bind(alias.trim())
        .bind(team_id)
        .fetch_one(conn)
        .await?;
    debug!("🗃️ Alias '{}' added for team {team_id}", alias.alias);
    Ok(alias)
}

pub async fn upsert_external_team(
    team_id: i64,
    provider_team_id: i64,
    conn: &mut SqliteConnection,
) -> Result<ExternalTeam, sqlx::Error> {
    let link: ExternalTeam = sqlx::query_as(
        r#"
            INSERT INTO external_teams (team_id, provider_team_id) VALUES ($1, $2)
            ON CONFLICT(team_id) DO UPDATE SET provider_team_id = excluded.provider_team_id
            RETURNING *;
        "#,
    )
    .bind(team_id)
    .bind(provider_team_id)
    .fetch_one(conn)
    .await?;
    debug!("🗃️ Team {team_id} linked to provider team {provider_team_id}");
    Ok(link)
}
