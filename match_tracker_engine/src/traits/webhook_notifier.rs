use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum NotifierError {
    #[error("Could not deliver the webhook. {0}")]
    Transport(String),
    #[error("The subscriber responded with status {status}. {body}")]
    Rejected { status: u16, body: String },
}

/// Delivers a match result to one subscriber. Any 2xx response is a success.
#[allow(async_fn_in_trait)]
pub trait WebhookNotifier {
    async fn notify(
        &self,
        url: &str,
        key: &str,
        home_score: Option<i32>,
        away_score: Option<i32>,
    ) -> Result<(), NotifierError>;
}
