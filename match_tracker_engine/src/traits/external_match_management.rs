use crate::{
    db_types::{ExternalMatch, NewExternalMatch},
    traits::DatabaseError,
};

#[allow(async_fn_in_trait)]
pub trait ExternalMatchManagement {
    async fn fetch_external_match_for_match(&self, match_id: i64) -> Result<Option<ExternalMatch>, DatabaseError>;

    /// Stores the provider snapshot, keyed by the provider's match id.
    async fn upsert_external_match(&self, external: NewExternalMatch) -> Result<ExternalMatch, DatabaseError>;
}
