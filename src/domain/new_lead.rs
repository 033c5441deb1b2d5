use serde::Deserialize;

use crate::domain::lead_field::LeadField;

/// A lead that passed validation and can be forwarded to the intake service.
#[derive(Debug, Clone)]
pub struct NewLead {
    pub vorname: LeadField,
    pub nachname: LeadField,
    pub email: LeadField,
    pub telefon: LeadField,
    pub projekt: Option<String>,
}

/// Payload accepted by `POST /api/lead`. Unknown keys are ignored.
#[derive(Deserialize, Debug, Default)]
pub struct LeadBody {
    pub vorname: Option<String>,
    pub nachname: Option<String>,
    pub email: Option<String>,
    pub telefon: Option<String>,
    pub projekt: Option<String>,
}

impl LeadBody {
    /// Only invalid JSON, or a field of the wrong type, is an error. Any other JSON value
    /// (`null`, arrays, strings...) carries no field at all and yields an empty body.
    pub fn parse(payload: &[u8]) -> Result<LeadBody, serde_json::Error> {
        match serde_json::from_slice(payload)? {
            object @ serde_json::Value::Object(_) => serde_json::from_value(object),
            _ => Ok(LeadBody::default()),
        }
    }
}

impl TryFrom<LeadBody> for NewLead {
    type Error = String;

    fn try_from(body: LeadBody) -> Result<Self, Self::Error> {
        let vorname = LeadField::parse_name("vorname", body.vorname)?;
        let nachname = LeadField::parse_name("nachname", body.nachname)?;
        let email = LeadField::parse_contact("email", body.email)?;
        let telefon = LeadField::parse_contact("telefon", body.telefon)?;

        Ok(NewLead {
            vorname,
            nachname,
            email,
            telefon,
            projekt: body.projekt,
        })
    }
}
