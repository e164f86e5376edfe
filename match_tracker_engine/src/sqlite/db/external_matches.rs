use log::trace;
use sqlx::SqliteConnection;

use crate::db_types::{ExternalMatch, NewExternalMatch};

pub async fn fetch_for_match(match_id: i64, conn: &mut SqliteConnection) -> Result<Option<ExternalMatch>, sqlx::Error> {
    let result = sqlx::query_as("SELECT * FROM external_matches WHERE match_id = $1")
        .bind(match_id)
        .fetch_optional(conn)
        .await?;
    Ok(result)
}

pub async fn upsert_external_match(
    external: NewExternalMatch,
    conn: &mut SqliteConnection,
) -> Result<ExternalMatch, sqlx::Error> {
    let result: ExternalMatch = sqlx::query_as(
        r#"
            INSERT INTO external_matches (match_id, provider_match_id, home_score, away_score, status)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT(provider_match_id) DO UPDATE SET
                match_id = excluded.match_id,
                home_score = excluded.home_score,
                away_score = excluded.away_score,
                status = excluded.status,
                updated_at = CURRENT_TIMESTAMP
            RETURNING *;
        "#,
    )
    .bind(external.match_id)
    .bind(external.provider_match_id)
    .bind(external.home_score)
    .bind(external.away_score)
    .bind(external.status.to_string())
    .fetch_one(conn)
    .await?;
    trace!(
        "🗃️ External match {} for match {} is {} ({:?}-{:?})",
        result.provider_match_id,
        result.match_id,
        result.status,
        result.home_score,
        result.away_score
    );
    Ok(result)
}
