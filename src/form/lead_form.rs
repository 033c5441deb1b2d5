use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::form::api_client::{LeadPayload, LeadSubmitter};

/// Campaign the form collects leads for.
pub const PROJECT_LABEL: &str = "Wohnen in der Lohe – Schmidgaden";
pub const SUBMIT_ERROR_MESSAGE: &str =
    "Leider ist ein Fehler aufgetreten. Bitte versuchen Sie es erneut.";
pub const THANK_YOU_HEADLINE: &str = "Danke! Wir haben Ihre Anfrage erhalten.";
pub const THANK_YOU_DETAIL: &str =
    "Wir melden uns zeitnah mit allen Unterlagen und Terminvorschlägen zur Besichtigung.";
pub const SUBMIT_LABEL: &str = "Gratis Exposé anfordern";
pub const SUBMITTING_LABEL: &str = "Wird gesendet…";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldName {
    Vorname,
    Nachname,
    Email,
    Telefon,
}

impl FieldName {
    pub const ALL: [FieldName; 4] = [
        FieldName::Vorname,
        FieldName::Nachname,
        FieldName::Email,
        FieldName::Telefon,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldName::Vorname => "vorname",
            FieldName::Nachname => "nachname",
            FieldName::Email => "email",
            FieldName::Telefon => "telefon",
        }
    }
}

impl FromStr for FieldName {
    type Err = String;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "vorname" => Ok(FieldName::Vorname),
            "nachname" => Ok(FieldName::Nachname),
            "email" => Ok(FieldName::Email),
            "telefon" => Ok(FieldName::Telefon),
            unknown => Err(format!("{} is not a field of the lead form", unknown)),
        }
    }
}

/// Working copy of what the visitor typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadFields {
    pub vorname: String,
    pub nachname: String,
    pub email: String,
    pub telefon: String,
}

impl LeadFields {
    pub fn get(&self, name: FieldName) -> &str {
        match name {
            FieldName::Vorname => &self.vorname,
            FieldName::Nachname => &self.nachname,
            FieldName::Email => &self.email,
            FieldName::Telefon => &self.telefon,
        }
    }

    fn get_mut(&mut self, name: FieldName) -> &mut String {
        match name {
            FieldName::Vorname => &mut self.vorname,
            FieldName::Nachname => &mut self.nachname,
            FieldName::Email => &mut self.email,
            FieldName::Telefon => &mut self.telefon,
        }
    }

    /// Fields the endpoint would reject: blank names, empty email or phone.
    pub fn missing(&self) -> Vec<FieldName> {
        FieldName::ALL
            .into_iter()
            .filter(|name| {
                let value = self.get(*name);

                match name {
                    FieldName::Vorname | FieldName::Nachname => value.trim().is_empty(),
                    FieldName::Email | FieldName::Telefon => value.is_empty(),
                }
            })
            .collect()
    }

    fn to_payload(&self, projekt: &str) -> LeadPayload {
        LeadPayload {
            vorname: self.vorname.clone(),
            nachname: self.nachname.clone(),
            email: self.email.clone(),
            telefon: self.telefon.clone(),
            projekt: String::from(projekt),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Submitted,
    Failed,
    Incomplete(Vec<FieldName>),
    /// Another submission of this form is still in flight, nothing was sent.
    InProgress,
    AlreadySubmitted,
}

/// What the page should render for the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormView {
    Editing { error: Option<&'static str> },
    Submitting,
    Submitted {
        headline: &'static str,
        detail: &'static str,
    },
}

impl FormView {
    pub fn submit_label(&self) -> Option<&'static str> {
        match self {
            FormView::Editing { .. } => Some(SUBMIT_LABEL),
            FormView::Submitting => Some(SUBMITTING_LABEL),
            FormView::Submitted { .. } => None,
        }
    }

    pub fn is_submit_enabled(&self) -> bool {
        matches!(self, FormView::Editing { .. })
    }
}

/// Controller of one lead form on one page load.
///
/// It can be shared between the tasks rendering and submitting the form: at most one
/// submission is in flight at any time and, once a lead went through, the form stays
/// in the submitted state.
#[derive(Debug, Default)]
pub struct LeadForm {
    fields: Mutex<LeadFields>,
    error: Mutex<Option<&'static str>>,
    submitting: AtomicBool,
    submitted: AtomicBool,
}

/// Holds the submitting flag of a form and releases it when dropped, also when the
/// submission future is cancelled half way.
struct SubmittingGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> SubmittingGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<SubmittingGuard<'a>> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SubmittingGuard { flag })
    }
}

impl Drop for SubmittingGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

// A panic while holding one of these locks cannot leave the plain data half written
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl LeadForm {
    pub fn new() -> LeadForm {
        LeadForm::default()
    }

    /// Updates one field and leaves the others untouched. Ignored once submitted.
    pub fn set_field(&self, name: FieldName, value: impl Into<String>) {
        if self.is_submitted() {
            return;
        }

        *lock(&self.fields).get_mut(name) = value.into();
    }

    pub fn fields(&self) -> LeadFields {
        lock(&self.fields).clone()
    }

    pub fn error(&self) -> Option<&'static str> {
        *lock(&self.error)
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted.load(Ordering::Acquire)
    }

    pub fn view(&self) -> FormView {
        if self.is_submitted() {
            FormView::Submitted {
                headline: THANK_YOU_HEADLINE,
                detail: THANK_YOU_DETAIL,
            }
        } else if self.is_submitting() {
            FormView::Submitting
        } else {
            FormView::Editing {
                error: self.error(),
            }
        }
    }

    #[tracing::instrument(name = "Submitting the lead form", skip(self, submitter))]
    pub async fn submit<S>(&self, submitter: &S) -> SubmitOutcome
    where
        S: LeadSubmitter + ?Sized,
    {
        if self.is_submitted() {
            return SubmitOutcome::AlreadySubmitted;
        }

        let missing = lock(&self.fields).missing();

        if !missing.is_empty() {
            return SubmitOutcome::Incomplete(missing);
        }

        let _submitting = match SubmittingGuard::acquire(&self.submitting) {
            Some(guard) => guard,
            None => return SubmitOutcome::InProgress,
        };

        // The previous holder of the flag may have completed the form meanwhile
        if self.is_submitted() {
            return SubmitOutcome::AlreadySubmitted;
        }

        *lock(&self.error) = None;

        let payload = lock(&self.fields).to_payload(PROJECT_LABEL);

        match submitter.submit_lead(&payload).await {
            Ok(()) => {
                self.submitted.store(true, Ordering::Release);
                *lock(&self.fields) = LeadFields::default();

                SubmitOutcome::Submitted
            }
            Err(err) => {
                tracing::warn!("Lead submission failed: {}", err);
                *lock(&self.error) = Some(SUBMIT_ERROR_MESSAGE);

                SubmitOutcome::Failed
            }
        }
    }
}
