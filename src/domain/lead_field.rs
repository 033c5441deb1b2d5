/// A required text field of a lead (first name, last name, email, phone).
///
/// The only rule is presence. Names must contain something other than whitespace,
/// contact details only have to be non-empty. The original text is kept as it was
/// typed, it is never trimmed nor normalised.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct LeadField(String);

impl LeadField {
    /// First and last name: blank values are rejected.
    pub fn parse_name(field_name: &str, value: Option<String>) -> Result<LeadField, String> {
        LeadField::parse(field_name, value, |value| value.trim().is_empty())
    }

    /// Email and phone: only the empty string is rejected, the format is up to upstream.
    pub fn parse_contact(field_name: &str, value: Option<String>) -> Result<LeadField, String> {
        LeadField::parse(field_name, value, str::is_empty)
    }

    fn parse(
        field_name: &str,
        value: Option<String>,
        is_empty: impl Fn(&str) -> bool,
    ) -> Result<LeadField, String> {
        match value {
            Some(value) if !is_empty(&value) => Ok(Self(value)),
            Some(_) => Err(format!("{} cannot be empty", field_name)),
            None => Err(format!("{} is missing", field_name)),
        }
    }
}

impl AsRef<str> for LeadField {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
