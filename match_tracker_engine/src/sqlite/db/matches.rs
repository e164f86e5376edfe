use chrono::NaiveDate;
use log::debug;
use sqlx::SqliteConnection;

use crate::db_types::{Match, MatchResultStatus, NewMatch};

pub async fn fetch_match(id: i64, conn: &mut SqliteConnection) -> Result<Option<Match>, sqlx::Error> {
    let result = sqlx::query_as("SELECT * FROM matches WHERE id = $1").bind(id).fetch_optional(conn).await?;
    Ok(result)
}

pub async fn fetch_match_for_teams_on_day(
    home_team_id: i64,
    away_team_id: i64,
    day: NaiveDate,
    conn: &mut SqliteConnection,
) -> Result<Option<Match>, sqlx::Error> {
    let result =
        sqlx::query_as("SELECT * FROM matches WHERE home_team_id = $1 AND away_team_id = $2 AND match_day = $3")
            .bind(home_team_id)
            .bind(away_team_id)
            .bind(day)
            .fetch_optional(conn)
            .await?;
    Ok(result)
}

/// Inserts or updates a match. With an explicit id, the row with that id is overwritten. Without one, the
/// (home, away, match_day) unique key picks the row to update.
pub async fn upsert_match(new_match: NewMatch, conn: &mut SqliteConnection) -> Result<Match, sqlx::Error> {
    let match_day = new_match.starts_at.date_naive();
    let result: Match = match new_match.id {
        Some(id) => {
            sqlx::query_as(
                r#"
                INSERT INTO matches (id, home_team_id, away_team_id, starts_at, match_day, result_status)
                VALUES ($1, $2, $3, $4, $5, $6)
                ON CONFLICT(id) DO UPDATE SET
                    home_team_id = excluded.home_team_id,
                    away_team_id = excluded.away_team_id,
                    starts_at = excluded.starts_at,
                    match_day = excluded.match_day,
                    result_status = excluded.result_status,
                    updated_at = CURRENT_TIMESTAMP
                RETURNING *;
            "#,
            )
            .bind(id)
            .bind(new_match.home_team_id)
            .bind(new_match.away_team_id)
            .bind(new_match.starts_at)
            .bind(match_day)
            .bind(new_match.result_status.to_string())
            .fetch_one(conn)
            .await?
        },
        None => {
            sqlx::query_as(
                r#"
                INSERT INTO matches (home_team_id, away_team_id, starts_at, match_day, result_status)
                VALUES ($1, $2, $3, $4, $5)
                ON CONFLICT(home_team_id, away_team_id, match_day) DO UPDATE SET
                    starts_at = excluded.starts_at,
                    result_status = excluded.result_status,
                    updated_at = CURRENT_TIMESTAMP
                RETURNING *;
            "#,
            )
            .bind(new_match.home_team_id)
            .bind(new_match.away_team_id)
            .bind(new_match.starts_at)
            .bind(match_day)
            .bind(new_match.result_status.to_string())
            .fetch_one(conn)
            .await?
        },
    };
    debug!("🗃️ Match {} saved with status {}", result.id, result.result_status);
    Ok(result)
}

/// Returns `sqlx::Error::RowNotFound` if there is no match with the given id.
pub async fn update_match_status(
    id: i64,
    status: MatchResultStatus,
    conn: &mut SqliteConnection,
) -> Result<Match, sqlx::Error> {
    let result: Match = sqlx::query_as(
        "UPDATE matches SET result_status = $1, updated_at = CURRENT_TIMESTAMP WHERE id = $2 RETURNING *",
    )
    .bind(status.to_string())
    .bind(id)
    .fetch_one(conn)
    .await?;
    debug!("🗃️ Match {id} status set to {status}");
    Ok(result)
}

/// Deletes the match. External matches, check tasks and subscriptions are removed by the foreign key cascade.
pub async fn delete_match(id: i64, conn: &mut SqliteConnection) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM matches WHERE id = $1").bind(id).execute(conn).await?;
    Ok(result.rows_affected())
}
