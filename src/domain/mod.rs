pub mod lead_field;
pub mod new_lead;
