use actix_web::{http::StatusCode, web, HttpResponse, ResponseError};
use serde_json::json;

use crate::{
    domain::new_lead::{LeadBody, NewLead},
    upstream_client::{UpstreamClient, UpstreamError},
};

// Contact details are personal data: the span only carries the campaign label
#[tracing::instrument(
    name = "Submitting a new lead handler",
    skip(payload, upstream_client),
    fields(projekt = tracing::field::Empty)
)]
pub async fn handle_submit_lead(
    payload: web::Bytes,
    upstream_client: web::Data<UpstreamClient>,
) -> Result<HttpResponse, LeadError> {
    let body = LeadBody::parse(&payload).map_err(LeadError::MalformedPayload)?;

    if let Some(projekt) = &body.projekt {
        tracing::Span::current().record("projekt", projekt.as_str());
    }

    let new_lead: NewLead = body.try_into().map_err(LeadError::Validation)?;

    upstream_client.forward(&new_lead).await?;

    tracing::info!("Lead forwarded to the intake service");

    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}

#[derive(thiserror::Error)]
pub enum LeadError {
    #[error("Missing required fields: {0}")]
    Validation(String),
    #[error("The lead intake service rejected the lead with status {status}.")]
    Upstream { status: StatusCode, body: String },
    #[error("Failed to parse the lead payload.")]
    MalformedPayload(#[source] serde_json::Error),
    #[error("Failed to forward the lead to the intake service.")]
    Transport(#[source] reqwest::Error),
}

impl From<UpstreamError> for LeadError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::Rejected { status, body } => LeadError::Upstream { status, body },
            UpstreamError::Request(err) => LeadError::Transport(err),
        }
    }
}

impl std::fmt::Debug for LeadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;

        let mut source = std::error::Error::source(self);

        while let Some(cause) = source {
            write!(f, "\nCaused by:\n\t{}", cause)?;
            source = cause.source();
        }

        Ok(())
    }
}

impl ResponseError for LeadError {
    fn status_code(&self) -> StatusCode {
        match self {
            LeadError::Validation(_) => StatusCode::BAD_REQUEST,
            LeadError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            LeadError::MalformedPayload(_) => StatusCode::INTERNAL_SERVER_ERROR,
            LeadError::Transport(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    // Only the taxonomy-level message leaves the server, the cause stays in the logs
    fn error_response(&self) -> HttpResponse {
        match self {
            LeadError::Validation(_) => tracing::warn!("Lead rejected: {:?}", self),
            _ => tracing::error!("Lead submission failed: {:?}", self),
        }

        let body = match self {
            LeadError::Validation(_) => json!({ "error": "Missing required fields" }),
            LeadError::Upstream { body, .. } => json!({
                "error": "Upstream error",
                "details": body,
            }),
            LeadError::MalformedPayload(_) | LeadError::Transport(_) => {
                json!({ "error": "Unexpected server error" })
            }
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}
