mod health_check;
mod lead;

pub use health_check::health_check;
pub use lead::{handle_submit_lead, LeadError};
