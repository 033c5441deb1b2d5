//! Client side of the lead capture: the form controller and the client of `POST /api/lead`.

mod api_client;
mod lead_form;

pub use api_client::{LeadApiClient, LeadPayload, LeadSubmitter, SubmitError};
pub use lead_form::{
    FieldName, FormView, LeadFields, LeadForm, SubmitOutcome, PROJECT_LABEL,
    SUBMIT_ERROR_MESSAGE, SUBMITTING_LABEL, SUBMIT_LABEL, THANK_YOU_DETAIL, THANK_YOU_HEADLINE,
};
