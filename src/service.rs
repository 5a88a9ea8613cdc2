use reqwest::Client;
use std::sync::Arc;

use crate::constants::{PREDICTION_SERVICE_BASE, PREDICT_ROUTE_PATH, USER_AGENT};
use crate::error::Result;
use crate::models::{FormState, PredictionResult, ServiceStatus};

/// HTTP client for the route prediction service
#[derive(Clone)]
pub struct PredictionClient {
    client: Arc<Client>,
    base_url: String,
}

impl PredictionClient {
    /// Creates a client bound to the local prediction service
    pub fn new() -> Result<Self> {
        Self::with_base_url(PREDICTION_SERVICE_BASE)
    }

    /// Creates a client bound to another service address
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            client: Arc::new(client),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Posts the itinerary and decodes whatever JSON comes back. A `null`
    /// body decodes to `None`.
    ///
    /// The status code is not checked: the service reports rejected
    /// itineraries as a JSON body with an `error` field.
    pub async fn predict_route(&self, form: &FormState) -> Result<Option<PredictionResult>> {
        let url = format!("{}{}", self.base_url, PREDICT_ROUTE_PATH);
        tracing::debug!("Posting itinerary to {}: {:?}", url, form);

        let response = self.client.post(&url).json(form).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Prediction service answered with status: {}", status);
        }

        let body = response.bytes().await?;
        PredictionResult::from_slice(&body)
    }

    /// Queries the service root for its health status
    pub async fn status(&self) -> Result<ServiceStatus> {
        let url = format!("{}/", self.base_url);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            tracing::warn!("Status check answered with status: {}", response.status());
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
