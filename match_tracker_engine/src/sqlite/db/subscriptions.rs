use log::debug;
use sqlx::{QueryBuilder, SqliteConnection};

use crate::{
    db_types::{NewSubscription, Subscription, SubscriptionUpdate},
    traits::SubscriptionQueryFilter,
};

pub async fn fetch_subscription(id: i64, conn: &mut SqliteConnection) -> Result<Option<Subscription>, sqlx::Error> {
    let result = sqlx::query_as("SELECT * FROM subscriptions WHERE id = $1").bind(id).fetch_optional(conn).await?;
    Ok(result)
}

pub async fn fetch_by_url_and_key(
    url: &str,
    key: &str,
    conn: &mut SqliteConnection,
) -> Result<Option<Subscription>, sqlx::Error> {
    let result = sqlx::query_as("SELECT * FROM subscriptions WHERE url = $1 AND key = $2")
        .bind(url)
        .bind(key)
        .fetch_optional(conn)
        .await?;
    Ok(result)
}

pub async fn insert_subscription(
    subscription: NewSubscription,
    conn: &mut SqliteConnection,
) -> Result<Subscription, sqlx::Error> {
    let result: Subscription =
        sqlx::query_as("INSERT INTO subscriptions (match_id, url, key) VALUES ($1, $2, $3) RETURNING *")
            .bind(subscription.match_id)
            .bind(subscription.url)
            .bind(subscription.key)
            .fetch_one(conn)
            .await?;
    debug!("🗃️ Subscription {} to match {} created for {}", result.id, result.match_id, result.url);
    Ok(result)
}

/// Fetches subscriptions according to criteria specified in the `SubscriptionQueryFilter`
///
/// Results are ordered by `id` in ascending order
pub async fn search_subscriptions(
    query: SubscriptionQueryFilter,
    conn: &mut SqliteConnection,
) -> Result<Vec<Subscription>, sqlx::Error> {
    let mut builder = QueryBuilder::new("SELECT * FROM subscriptions ");
    if !query.is_empty() {
        builder.push("WHERE ");
    }
    let mut where_clause = builder.separated(" AND ");
    if let Some(match_id) = query.match_id {
        where_clause.push("match_id = ");
        where_clause.push_bind_unseparated(match_id);
    }
    if let Some(status) = query.status {
        where_clause.push("status = ");
        where_clause.push_bind_unseparated(status.to_string());
    }
    if let Some(key) = query.key {
        where_clause.push("key = ");
        where_clause.push_bind_unseparated(key);
    }
    if let Some(prefix) = query.url_prefix {
        // exact, case-sensitive prefix match
        where_clause.push("substr(url, 1, length(");
        where_clause.push_bind_unseparated(prefix.clone());
        where_clause.push_unseparated(")) = ");
        where_clause.push_bind_unseparated(prefix);
    }
    builder.push(" ORDER BY id ASC");
    let subscriptions = builder.build_query_as::<Subscription>().fetch_all(conn).await?;
    Ok(subscriptions)
}

/// Returns `sqlx::Error::RowNotFound` if there is no subscription with the given id.
pub async fn update_subscription(
    id: i64,
    update: SubscriptionUpdate,
    conn: &mut SqliteConnection,
) -> Result<Subscription, sqlx::Error> {
    let result: Subscription = sqlx::query_as(
        r#"
            UPDATE subscriptions SET
                status = $1,
                error = $2,
                notified_at = $3,
                updated_at = CURRENT_TIMESTAMP
            WHERE id = $4
            RETURNING *;
        "#,
    )
    .bind(update.status.to_string())
    .bind(update.error)
    .bind(update.notified_at)
    .bind(id)
    .fetch_one(conn)
    .await?;
    debug!("🗃️ Subscription {id} is now {}", result.status);
    Ok(result)
}

pub async fn delete_subscription(id: i64, conn: &mut SqliteConnection) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM subscriptions WHERE id = $1").bind(id).execute(conn).await?;
    Ok(result.rows_affected())
}
