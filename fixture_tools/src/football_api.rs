use std::sync::Arc;

use chrono::NaiveDate;
use log::*;
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Client,
};
use serde::de::DeserializeOwned;

use crate::{
    config::FootballApiConfig,
    data_objects::{ApiFixture, ApiResponse},
    FixtureToolsError,
};

#[derive(Clone)]
pub struct FootballApi {
    config: FootballApiConfig,
    client: Arc<Client>,
}

impl FootballApi {
    pub fn new(config: FootballApiConfig) -> Result<Self, FixtureToolsError> {
        let mut headers = HeaderMap::with_capacity(2);
        let val = HeaderValue::from_str(config.api_key.reveal().as_str())
            .map_err(|e| FixtureToolsError::Initialization(e.to_string()))?;
        headers.insert("x-apisports-key", val);
        headers.insert("Accept", HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| FixtureToolsError::Initialization(e.to_string()))?;
        Ok(Self { config, client: Arc::new(client) })
    }

    pub async fn rest_query<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<ApiResponse<T>, FixtureToolsError> {
        let url = self.url(path);
        trace!("Sending REST query: {url}");
        let mut req = self.client.get(url);
        if !params.is_empty() {
            req = req.query(params);
        }
        let response = req.send().await.map_err(|e| FixtureToolsError::RequestError(e.to_string()))?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.map_err(|e| FixtureToolsError::RequestError(e.to_string()))?;
            return Err(FixtureToolsError::QueryError { status, message });
        }
        trace!("REST query successful. {}", response.status());
        let result = response
            .json::<ApiResponse<T>>()
            .await
            .map_err(|e| FixtureToolsError::JsonError(e.to_string()))?;
        if result.has_errors() {
            return Err(FixtureToolsError::ProviderErrors(result.errors.to_string()));
        }
        Ok(result)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url.trim_end_matches('/'))
    }

    /// Fetches every fixture on the given date, limited to the configured league and season if they are set.
    pub async fn fixtures_for_date(&self, date: NaiveDate) -> Result<Vec<ApiFixture>, FixtureToolsError> {
        let mut params = vec![("date", date.format("%Y-%m-%d").to_string())];
        if let Some(league) = self.config.league {
            params.push(("league", league.to_string()));
        }
        if let Some(season) = self.config.season {
            params.push(("season", season.to_string()));
        }
        debug!("Fetching fixtures for {date}");
        let result = self.rest_query::<ApiFixture>("/fixtures", &params).await?;
        info!("Fetched {} fixtures for {date}", result.response.len());
        Ok(result.response)
    }
}
