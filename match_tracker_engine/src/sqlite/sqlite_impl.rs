//! `SqliteDatabase` is the SQLite implementation of a match tracker backend.
//!
//! It implements every trait in the [`crate::traits`] module by delegating to the free functions in [`super::db`].
use std::fmt::Debug;

use chrono::NaiveDate;
use log::*;
use sqlx::SqlitePool;

use super::db::{aliases, check_tasks, db_url, external_matches, matches, new_pool, subscriptions};
use crate::{
    db_types::{
        Alias,
        AliasRecord,
        CheckResultTask,
        ExternalMatch,
        ExternalTeam,
        Match,
        MatchResultStatus,
        NewCheckResultTask,
        NewExternalMatch,
        NewMatch,
        NewSubscription,
        Subscription,
        SubscriptionUpdate,
        Team,
    },
    traits::{
        AliasManagement,
        CheckTaskManagement,
        DatabaseError,
        ExternalMatchManagement,
        MatchManagement,
        ResultTrackerDatabase,
        SubscriptionManagement,
        SubscriptionQueryFilter,
    },
};

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

impl AliasManagement for SqliteDatabase {
    async fn fetch_alias_record(&self, alias: &str) -> Result<Option<AliasRecord>, DatabaseError> {
        let mut conn = self.pool.acquire().await?;
        let record = aliases::fetch_alias_record(alias, &mut conn).await?;
        Ok(record)
    }

    async fn fetch_unlinked_aliases(&self) -> Result<Vec<AliasRecord>, DatabaseError> {
        let mut conn = self.pool.acquire().await?;
        let records = aliases::fetch_unlinked_aliases(&mut conn).await?;
        Ok(records)
    }

    async fn create_team(&self, name: &str) -> Result<Team, DatabaseError> {
        let mut conn = self.pool.acquire().await?;
        let team = aliases::insert_team(name, &mut conn).await?;
        Ok(team)
    }

    async fn add_alias(&self, team_id: i64, alias: &str) -> Result<Alias, DatabaseError> {
        let mut conn = self.pool.acquire().await?;
        let alias = aliases::insert_alias(team_id, alias, &mut conn).await?;
        Ok(alias)
    }

    async fn link_external_team(&self, team_id: i64, provider_team_id: i64) -> Result<ExternalTeam, DatabaseError> {
        let mut conn = self.pool.acquire().await?;
        let link = aliases::upsert_external_team(team_id, provider_team_id, &mut conn).await?;
        Ok(link)
    }
}

impl MatchManagement for SqliteDatabase {
    async fn fetch_match(&self, id: i64) -> Result<Option<Match>, DatabaseError> {
        let mut conn = self.pool.acquire().await?;
        let result = matches::fetch_match(id, &mut conn).await?;
        Ok(result)
    }

    async fn fetch_match_for_teams_on_day(
        &self,
        home_team_id: i64,
        away_team_id: i64,
        day: NaiveDate,
    ) -> Result<Option<Match>, DatabaseError> {
        let mut conn = self.pool.acquire().await?;
        let result = matches::fetch_match_for_teams_on_day(home_team_id, away_team_id, day, &mut conn).await?;
        Ok(result)
    }

    async fn upsert_match(&self, new_match: NewMatch) -> Result<Match, DatabaseError> {
        let mut conn = self.pool.acquire().await?;
        let result = matches::upsert_match(new_match, &mut conn).await?;
        Ok(result)
    }

    async fn update_match_status(&self, id: i64, status: MatchResultStatus) -> Result<Match, DatabaseError> {
        let mut conn = self.pool.acquire().await?;
        let result = matches::update_match_status(id, status, &mut conn).await?;
        Ok(result)
    }

    async fn delete_match(&self, id: i64) -> Result<(), DatabaseError> {
        let mut conn = self.pool.acquire().await?;
        match matches::delete_match(id, &mut conn).await? {
            0 => Err(DatabaseError::NotFound),
            _ => {
                debug!("🗃️ Match {id} and its dependent records have been deleted");
                Ok(())
            },
        }
    }
}

impl ExternalMatchManagement for SqliteDatabase {
    async fn fetch_external_match_for_match(&self, match_id: i64) -> Result<Option<ExternalMatch>, DatabaseError> {
        let mut conn = self.pool.acquire().await?;
        let result = external_matches::fetch_for_match(match_id, &mut conn).await?;
        Ok(result)
    }

    async fn upsert_external_match(&self, external: NewExternalMatch) -> Result<ExternalMatch, DatabaseError> {
        let mut conn = self.pool.acquire().await?;
        let result = external_matches::upsert_external_match(external, &mut conn).await?;
        Ok(result)
    }
}

impl CheckTaskManagement for SqliteDatabase {
    async fn fetch_check_task_for_match(&self, match_id: i64) -> Result<Option<CheckResultTask>, DatabaseError> {
        let mut conn = self.pool.acquire().await?;
        let result = check_tasks::fetch_for_match(match_id, &mut conn).await?;
        Ok(result)
    }

    async fn upsert_check_task(&self, task: NewCheckResultTask) -> Result<CheckResultTask, DatabaseError> {
        let mut conn = self.pool.acquire().await?;
        let result = check_tasks::upsert_check_task(task, &mut conn).await?;
        Ok(result)
    }
}

impl SubscriptionManagement for SqliteDatabase {
    async fn fetch_subscription(&self, id: i64) -> Result<Option<Subscription>, DatabaseError> {
        let mut conn = self.pool.acquire().await?;
        let result = subscriptions::fetch_subscription(id, &mut conn).await?;
        Ok(result)
    }

    async fn fetch_subscription_by_url_and_key(
        &self,
        url: &str,
        key: &str,
    ) -> Result<Option<Subscription>, DatabaseError> {
        let mut conn = self.pool.acquire().await?;
        let result = subscriptions::fetch_by_url_and_key(url, key, &mut conn).await?;
        Ok(result)
    }

    async fn insert_subscription(&self, subscription: NewSubscription) -> Result<Subscription, DatabaseError> {
        let mut conn = self.pool.acquire().await?;
        let result = subscriptions::insert_subscription(subscription, &mut conn).await?;
        Ok(result)
    }

    async fn search_subscriptions(&self, query: SubscriptionQueryFilter) -> Result<Vec<Subscription>, DatabaseError> {
        let mut conn = self.pool.acquire().await?;
        let result = subscriptions::search_subscriptions(query, &mut conn).await?;
        Ok(result)
    }

    async fn update_subscription(&self, id: i64, update: SubscriptionUpdate) -> Result<Subscription, DatabaseError> {
        let mut conn = self.pool.acquire().await?;
        let result = subscriptions::update_subscription(id, update, &mut conn).await?;
        Ok(result)
    }

    async fn delete_subscription(&self, id: i64) -> Result<(), DatabaseError> {
        let mut conn = self.pool.acquire().await?;
        match subscriptions::delete_subscription(id, &mut conn).await? {
            0 => Err(DatabaseError::NotFound),
            _ => Ok(()),
        }
    }
}

impl ResultTrackerDatabase for SqliteDatabase {
    fn url(&self) -> &str {
        self.url.as_str()
    }

    async fn close(&mut self) -> Result<(), DatabaseError> {
        self.pool.close().await;
        info!("🗃️ Database connections to {} closed", self.url);
        Ok(())
    }
}

impl SqliteDatabase {
    /// Creates a new database API object, using the URL in `MTR_DATABASE_URL`
    pub async fn new(max_connections: u32) -> Result<Self, sqlx::Error> {
        let url = db_url();
        SqliteDatabase::new_with_url(url.as_str(), max_connections).await
    }

    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        trace!("Creating new database connection pool with url {url}");
        let pool = new_pool(url, max_connections).await?;
        let url = url.to_string();
        Ok(Self { url, pool })
    }

    /// Brings the schema up to date. Migrations that have already been applied are skipped.
    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./src/sqlite/migrations").run(&self.pool).await?;
        info!("🗃️ Database migrations for {} are up to date", self.url);
        Ok(())
    }

    /// Returns a reference to the database connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
