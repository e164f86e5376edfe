use std::sync::Arc;

use hmac::{Hmac, Mac};
use log::*;
use reqwest::Client;
use sha2::Sha256;

use crate::{config::WebhookConfig, data_objects::ResultPayload, FixtureToolsError};

/// Carries the base64-encoded HMAC-SHA256 of the request body, keyed with the subscription's secret.
pub const SIGNATURE_HEADER: &str = "X-Match-Tracker-Signature";

pub fn calculate_hmac(key: &str, data: &[u8]) -> Result<String, FixtureToolsError> {
    let mut mac =
        Hmac::<Sha256>::new_from_slice(key.as_bytes()).map_err(|e| FixtureToolsError::Initialization(e.to_string()))?;
    mac.update(data);
    Ok(base64::encode(mac.finalize().into_bytes()))
}

#[derive(Clone)]
pub struct WebhookClient {
    client: Arc<Client>,
}

impl WebhookClient {
    pub fn new(config: WebhookConfig) -> Result<Self, FixtureToolsError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| FixtureToolsError::Initialization(e.to_string()))?;
        Ok(Self { client: Arc::new(client) })
    }

    /// POSTs the signed result to the subscriber. Any 2xx response is a success.
    pub async fn deliver(&self, url: &str, key: &str, payload: &ResultPayload) -> Result<(), FixtureToolsError> {
        let body = serde_json::to_vec(payload).map_err(|e| FixtureToolsError::JsonError(e.to_string()))?;
        let signature = calculate_hmac(key, &body)?;
        trace!("Delivering result to {url}");
        let response = self
            .client
            .post(url)
            .header("Content-Type", "application/json")
            .header(SIGNATURE_HEADER, signature)
            .body(body)
            .send()
            .await
            .map_err(|e| FixtureToolsError::RequestError(e.to_string()))?;
        let status = response.status();
        if status.is_success() {
            debug!("Result delivered to {url}. {status}");
            Ok(())
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(FixtureToolsError::QueryError { status: status.as_u16(), message })
        }
    }
}
