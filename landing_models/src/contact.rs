//! Contact submissions and the rules a submission must satisfy before it
//! may be dispatched.

use std::fmt;

use nutype::nutype;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{email::EmailReceipt, email_address::EmailAddress};

/// A validated contact submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    pub first_name: ContactFirstName,
    pub last_name: ContactLastName,
    pub email: ContactEmail,
    pub subject: ContactSubject,
    pub message: ContactMessage,
}

/// The raw field values of a contact submission, exactly as entered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmissionDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// The receipts of the two emails sent for one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDispatchReceipt {
    /// Notification sent to the owner of the site
    pub owner: EmailReceipt,
    /// Acknowledgment sent to the author of the submission
    pub client: EmailReceipt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContactField {
    FirstName,
    LastName,
    Email,
    Subject,
    Message,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactFieldError {
    pub field: ContactField,
    pub message: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid contact submission")]
pub struct ContactValidationError(pub Vec<ContactFieldError>);

#[nutype(
    sanitize(trim),
    validate(len_char_min = 2, len_char_max = 50),
    derive(Debug, Clone, PartialEq, Eq, AsRef, Deref, TryFrom, Serialize)
)]
pub struct ContactFirstName(String);

#[nutype(
    sanitize(trim),
    validate(len_char_min = 2, len_char_max = 50),
    derive(Debug, Clone, PartialEq, Eq, AsRef, Deref, TryFrom, Serialize)
)]
pub struct ContactLastName(String);

#[nutype(
    sanitize(trim),
    validate(len_char_min = 3, len_char_max = 100),
    derive(Debug, Clone, PartialEq, Eq, AsRef, Deref, TryFrom, Serialize)
)]
pub struct ContactSubject(String);

#[nutype(
    sanitize(trim),
    validate(len_char_min = 10, len_char_max = 1000),
    derive(Debug, Clone, PartialEq, Eq, AsRef, Deref, TryFrom, Serialize)
)]
pub struct ContactMessage(String);

/// Email address of the author of a submission.
///
/// The address has to be parseable as a mailbox address, so it can never
/// smuggle additional header content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactEmail(EmailAddress);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContactEmailError {
    #[error("Invalid email address")]
    Invalid,
    #[error("Email address too long")]
    TooLong,
}

impl ContactEmail {
    pub const MAX_LEN: usize = 100;

    pub fn try_new(value: impl AsRef<str>) -> Result<Self, ContactEmailError> {
        let value = value.as_ref().trim();
        let address = value
            .parse::<EmailAddress>()
            .map_err(|_| ContactEmailError::Invalid)?;
        if !is_deliverable(&address.0) {
            return Err(ContactEmailError::Invalid);
        }
        if value.chars().count() > Self::MAX_LEN {
            return Err(ContactEmailError::TooLong);
        }
        Ok(Self(address))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn address(&self) -> &EmailAddress {
        &self.0
    }

    pub fn into_address(self) -> EmailAddress {
        self.0
    }
}

/// Rejects addresses lettre accepts but a public mailbox never has: quoted
/// local parts, address literals, dotless domains and non-alphabetic TLDs.
fn is_deliverable(address: &lettre::Address) -> bool {
    let user = address.user();
    let domain = address.domain();
    if user.contains(|c: char| c == '"' || c.is_whitespace()) {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => {
            !host.is_empty()
                && !domain.starts_with('[')
                && tld.len() >= 2
                && tld.chars().all(|c| c.is_ascii_alphabetic())
        }
        None => false,
    }
}

impl TryFrom<&str> for ContactEmail {
    type Error = ContactEmailError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl fmt::Display for ContactEmail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl ContactField {
    pub const ALL: [Self; 5] = [
        Self::FirstName,
        Self::LastName,
        Self::Email,
        Self::Subject,
        Self::Message,
    ];

    /// Name of the field in the JSON payload.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Email => "email",
            Self::Subject => "subject",
            Self::Message => "message",
        }
    }

    /// Validates a single candidate value for this field and returns the
    /// normalized value or the message to display next to the input.
    pub fn validate(self, value: &str) -> Result<String, &'static str> {
        match self {
            Self::FirstName => ContactFirstName::try_new(value)
                .map(ContactFirstName::into_inner)
                .map_err(first_name_message),
            Self::LastName => ContactLastName::try_new(value)
                .map(ContactLastName::into_inner)
                .map_err(last_name_message),
            Self::Email => ContactEmail::try_new(value)
                .map(|email| email.as_str().to_owned())
                .map_err(email_message),
            Self::Subject => ContactSubject::try_new(value)
                .map(ContactSubject::into_inner)
                .map_err(subject_message),
            Self::Message => ContactMessage::try_new(value)
                .map(ContactMessage::into_inner)
                .map_err(message_message),
        }
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ContactSubmissionDraft {
    pub fn get(&self, field: ContactField) -> &str {
        match field {
            ContactField::FirstName => &self.first_name,
            ContactField::LastName => &self.last_name,
            ContactField::Email => &self.email,
            ContactField::Subject => &self.subject,
            ContactField::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: ContactField, value: String) {
        let slot = match field {
            ContactField::FirstName => &mut self.first_name,
            ContactField::LastName => &mut self.last_name,
            ContactField::Email => &mut self.email,
            ContactField::Subject => &mut self.subject,
            ContactField::Message => &mut self.message,
        };
        *slot = value;
    }
}

impl TryFrom<&ContactSubmissionDraft> for ContactSubmission {
    type Error = ContactValidationError;

    fn try_from(draft: &ContactSubmissionDraft) -> Result<Self, Self::Error> {
        let mut errors = Vec::new();

        let first_name = check(
            &mut errors,
            ContactField::FirstName,
            ContactFirstName::try_new(&*draft.first_name).map_err(first_name_message),
        );
        let last_name = check(
            &mut errors,
            ContactField::LastName,
            ContactLastName::try_new(&*draft.last_name).map_err(last_name_message),
        );
        let email = check(
            &mut errors,
            ContactField::Email,
            ContactEmail::try_new(&draft.email).map_err(email_message),
        );
        let subject = check(
            &mut errors,
            ContactField::Subject,
            ContactSubject::try_new(&*draft.subject).map_err(subject_message),
        );
        let message = check(
            &mut errors,
            ContactField::Message,
            ContactMessage::try_new(&*draft.message).map_err(message_message),
        );

        match (first_name, last_name, email, subject, message) {
            (Some(first_name), Some(last_name), Some(email), Some(subject), Some(message)) => {
                Ok(Self {
                    first_name,
                    last_name,
                    email,
                    subject,
                    message,
                })
            }
            _ => Err(ContactValidationError(errors)),
        }
    }
}

impl TryFrom<ContactSubmissionDraft> for ContactSubmission {
    type Error = ContactValidationError;

    fn try_from(draft: ContactSubmissionDraft) -> Result<Self, Self::Error> {
        (&draft).try_into()
    }
}

impl From<ContactSubmission> for ContactSubmissionDraft {
    fn from(value: ContactSubmission) -> Self {
        Self {
            first_name: value.first_name.into_inner(),
            last_name: value.last_name.into_inner(),
            email: value.email.as_str().into(),
            subject: value.subject.into_inner(),
            message: value.message.into_inner(),
        }
    }
}

fn check<T>(
    errors: &mut Vec<ContactFieldError>,
    field: ContactField,
    result: Result<T, &'static str>,
) -> Option<T> {
    result
        .map_err(|message| errors.push(ContactFieldError { field, message }))
        .ok()
}

fn first_name_message(err: ContactFirstNameError) -> &'static str {
    match err {
        ContactFirstNameError::LenCharMinViolated => "Nome deve ter pelo menos 2 caracteres",
        ContactFirstNameError::LenCharMaxViolated => "Nome deve ter no máximo 50 caracteres",
    }
}

fn last_name_message(err: ContactLastNameError) -> &'static str {
    match err {
        ContactLastNameError::LenCharMinViolated => "Sobrenome deve ter pelo menos 2 caracteres",
        ContactLastNameError::LenCharMaxViolated => "Sobrenome deve ter no máximo 50 caracteres",
    }
}

fn email_message(err: ContactEmailError) -> &'static str {
    match err {
        ContactEmailError::Invalid => "Email inválido",
        ContactEmailError::TooLong => "Email muito longo",
    }
}

fn subject_message(err: ContactSubjectError) -> &'static str {
    match err {
        ContactSubjectError::LenCharMinViolated => "Assunto deve ter pelo menos 3 caracteres",
        ContactSubjectError::LenCharMaxViolated => "Assunto muito longo",
    }
}

fn message_message(err: ContactMessageError) -> &'static str {
    match err {
        ContactMessageError::LenCharMinViolated => "Mensagem deve ter pelo menos 10 caracteres",
        ContactMessageError::LenCharMaxViolated => "Mensagem muito longa (máximo 1000 caracteres)",
    }
}
