use log::trace;
use sqlx::SqliteConnection;

use crate::db_types::{CheckResultTask, NewCheckResultTask};

pub async fn fetch_for_match(
    match_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Option<CheckResultTask>, sqlx::Error> {
    let result = sqlx::query_as("SELECT * FROM check_result_tasks WHERE match_id = $1")
        .bind(match_id)
        .fetch_optional(conn)
        .await?;
    Ok(result)
}

/// Records the latest scheduled check for the match, replacing the previous attempt.
pub async fn upsert_check_task(
    task: NewCheckResultTask,
    conn: &mut SqliteConnection,
) -> Result<CheckResultTask, sqlx::Error> {
    let result: CheckResultTask = sqlx::query_as(
        r#"
            INSERT INTO check_result_tasks (match_id, name, attempt_number, execute_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT(match_id) DO UPDATE SET
                name = excluded.name,
                attempt_number = excluded.attempt_number,
                execute_at = excluded.execute_at,
                updated_at = CURRENT_TIMESTAMP
            RETURNING *;
        "#,
    )
    .bind(task.match_id)
    .bind(task.name)
    .bind(task.attempt_number)
    .bind(task.execute_at)
    .fetch_one(conn)
    .await?;
    trace!("🗃️ Check task {} is attempt {} for match {}", result.name, result.attempt_number, result.match_id);
    Ok(result)
}
