use reqwest::{redirect, Client, StatusCode};
use secrecy::{ExposeSecret, Secret};
use std::time;

use crate::domain::new_lead::NewLead;

const REQUEST_TIMEOUT: time::Duration = time::Duration::from_secs(10);
// Apps Script deployments answer with 302 -> 200, a few hops are plenty
const MAX_REDIRECTS: usize = 10;

/// Client of the external form-intake service where leads are actually stored.
pub struct UpstreamClient {
    http_client: Client,
    url: Secret<String>,
}

#[derive(serde::Serialize)]
struct ForwardLeadBody<'a> {
    vorname: &'a str,
    nachname: &'a str,
    email: &'a str,
    telefon: &'a str,
}

#[derive(thiserror::Error)]
pub enum UpstreamError {
    #[error("The lead intake service answered with status {status}.")]
    Rejected { status: StatusCode, body: String },
    #[error("Failed to reach the lead intake service.")]
    Request(#[source] reqwest::Error),
}

impl From<reqwest::Error> for UpstreamError {
    // reqwest errors print the request URL, which carries the deployment id
    fn from(err: reqwest::Error) -> Self {
        UpstreamError::Request(err.without_url())
    }
}

impl std::fmt::Debug for UpstreamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UpstreamError::Rejected { .. } => write!(f, "{}", self),
            UpstreamError::Request(err) => write!(f, "{}\nCaused by:\n\t{:?}", self, err),
        }
    }
}

impl UpstreamClient {
    pub fn new(
        url: Secret<String>,
        timeout: Option<time::Duration>,
    ) -> Result<UpstreamClient, reqwest::Error> {
        let http_client = Client::builder()
            .timeout(timeout.unwrap_or(REQUEST_TIMEOUT))
            .redirect(redirect::Policy::limited(MAX_REDIRECTS))
            .build()?;

        Ok(UpstreamClient { http_client, url })
    }

    /// Sends exactly the four contact fields of `lead`. The project label stays local.
    #[tracing::instrument(name = "Forwarding a lead to the intake service", skip(self, lead))]
    pub async fn forward(&self, lead: &NewLead) -> Result<(), UpstreamError> {
        let body = ForwardLeadBody {
            vorname: lead.vorname.as_ref(),
            nachname: lead.nachname.as_ref(),
            email: lead.email.as_ref(),
            telefon: lead.telefon.as_ref(),
        };

        let response = self
            .http_client
            .post(self.url.expose_secret())
            .json(&body)
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            // The body is only a hint for operators, losing it must not hide the status
            let body = response.text().await.unwrap_or_default();

            return Err(UpstreamError::Rejected { status, body });
        }

        tracing::debug!("Intake service accepted the lead with status {}", status);

        Ok(())
    }
}
