use chrono::NaiveDate;

use crate::{
    db_types::{Match, MatchResultStatus, NewMatch},
    traits::DatabaseError,
};

#[allow(async_fn_in_trait)]
pub trait MatchManagement {
    async fn fetch_match(&self, id: i64) -> Result<Option<Match>, DatabaseError>;

    /// Fetches the match between the two teams that kicks off on the given (UTC) calendar day.
    async fn fetch_match_for_teams_on_day(
        &self,
        home_team_id: i64,
        away_team_id: i64,
        day: NaiveDate,
    ) -> Result<Option<Match>, DatabaseError>;

    /// Inserts the match, or updates the existing row. The row is identified by `id` when it is given, and by
    /// (home, away, match day) otherwise.
    async fn upsert_match(&self, new_match: NewMatch) -> Result<Match, DatabaseError>;

    /// Sets the result status of the match. Returns [`DatabaseError::NotFound`] if the match does not exist.
    async fn update_match_status(&self, id: i64, status: MatchResultStatus) -> Result<Match, DatabaseError>;

    /// Deletes the match together with its external match, check task and subscriptions.
    async fn delete_match(&self, id: i64) -> Result<(), DatabaseError>;
}
