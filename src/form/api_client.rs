use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time;

const REQUEST_TIMEOUT: time::Duration = time::Duration::from_secs(15);

/// Body sent by the form to the lead endpoint.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct LeadPayload {
    pub vorname: String,
    pub nachname: String,
    pub email: String,
    pub telefon: String,
    pub projekt: String,
}

#[derive(thiserror::Error, Debug)]
pub enum SubmitError {
    #[error("The lead endpoint answered with status {0}.")]
    Status(StatusCode),
    #[error("Failed to reach the lead endpoint.")]
    Request(#[from] reqwest::Error),
}

/// Whatever delivers a lead on behalf of the form.
#[async_trait]
pub trait LeadSubmitter: Send + Sync {
    async fn submit_lead(&self, payload: &LeadPayload) -> Result<(), SubmitError>;
}

pub struct LeadApiClient {
    http_client: Client,
    base_url: String,
}

impl LeadApiClient {
    pub fn new(
        base_url: String,
        timeout: Option<time::Duration>,
    ) -> Result<LeadApiClient, reqwest::Error> {
        let http_client = Client::builder()
            .timeout(timeout.unwrap_or(REQUEST_TIMEOUT))
            .build()?;

        Ok(LeadApiClient {
            http_client,
            base_url,
        })
    }
}

#[async_trait]
impl LeadSubmitter for LeadApiClient {
    #[tracing::instrument(name = "Posting a lead to the lead endpoint", skip(self, payload))]
    async fn submit_lead(&self, payload: &LeadPayload) -> Result<(), SubmitError> {
        let url = format!("{}/api/lead", self.base_url);
        let response = self.http_client.post(&url).json(payload).send().await?;
        let status = response.status();

        // The body is ignored: every failure looks the same to the visitor
        if !status.is_success() {
            return Err(SubmitError::Status(status));
        }

        Ok(())
    }
}
