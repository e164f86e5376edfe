use fixture_tools::{data_objects::ResultPayload, FixtureToolsError, WebhookClient};
use match_tracker_engine::traits::{NotifierError, WebhookNotifier};

/// [`WebhookNotifier`] that POSTs signed JSON results.
#[derive(Clone)]
pub struct HttpWebhookNotifier {
    client: WebhookClient,
}

impl HttpWebhookNotifier {
    pub fn new(client: WebhookClient) -> Self {
        Self { client }
    }
}

impl WebhookNotifier for HttpWebhookNotifier {
    async fn notify(
        &self,
        url: &str,
        key: &str,
        home_score: Option<i32>,
        away_score: Option<i32>,
    ) -> Result<(), NotifierError> {
        let payload = ResultPayload { home_score, away_score };
        self.client.deliver(url, key, &payload).await.map_err(|e| match e {
            FixtureToolsError::QueryError { status, message } => NotifierError::Rejected { status, body: message },
            e => NotifierError::Transport(e.to_string()),
        })
    }
}
