use chrono::NaiveDate;
use thiserror::Error;

use crate::traits::Fixture;

#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("Could not reach the fixture provider. {0}")]
    Transport(String),
    #[error("The fixture provider rejected the request. {0}")]
    Rejected(String),
    #[error("The fixture provider sent an unexpected response. {0}")]
    InvalidResponse(String),
}

/// A source of fixture data, queried one calendar day at a time.
#[allow(async_fn_in_trait)]
pub trait FixtureProvider {
    /// Returns every fixture the provider knows about on the given (UTC) date.
    async fn matches_for_date(&self, date: NaiveDate) -> Result<Vec<Fixture>, ProviderError>;
}
