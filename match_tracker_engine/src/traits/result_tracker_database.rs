use crate::traits::{
    AliasManagement,
    CheckTaskManagement,
    ExternalMatchManagement,
    MatchManagement,
    SubscriptionManagement,
};

/// The complete persistence backend for the match tracker.
#[allow(async_fn_in_trait)]
pub trait ResultTrackerDatabase:
    Clone + AliasManagement + MatchManagement + ExternalMatchManagement + CheckTaskManagement + SubscriptionManagement
{
    /// The URL of the database
    fn url(&self) -> &str;

    /// Closes the underlying connections.
    async fn close(&mut self) -> Result<(), crate::traits::DatabaseError>;
}
