use crate::{
    db_types::{CheckResultTask, NewCheckResultTask},
    traits::DatabaseError,
};

/// There is at most one check-result task record per match. A new attempt overwrites the previous record.
#[allow(async_fn_in_trait)]
pub trait CheckTaskManagement {
    async fn fetch_check_task_for_match(&self, match_id: i64) -> Result<Option<CheckResultTask>, DatabaseError>;

    async fn upsert_check_task(&self, task: NewCheckResultTask) -> Result<CheckResultTask, DatabaseError>;
}
