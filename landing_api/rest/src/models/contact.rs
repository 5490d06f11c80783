use landing_models::{
    contact::{ContactDispatchReceipt, ContactFieldError, ContactSubmissionDraft},
    email::EmailReceipt,
};
use serde::{Deserialize, Serialize};

/// Missing fields are treated as empty, so they are reported by the
/// validation instead of failing deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiContactSubmission {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl From<ApiContactSubmission> for ContactSubmissionDraft {
    fn from(value: ApiContactSubmission) -> Self {
        Self {
            first_name: value.first_name,
            last_name: value.last_name,
            email: value.email,
            subject: value.subject,
            message: value.message,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSendContactEmailResponse {
    pub success: bool,
    pub owner_email_response: ApiEmailReceipt,
    pub client_email_response: ApiEmailReceipt,
}

#[derive(Debug, Serialize)]
pub struct ApiEmailReceipt {
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct ApiContactValidationError {
    pub error: String,
    pub fields: Vec<ContactFieldError>,
}

impl From<ContactDispatchReceipt> for ApiSendContactEmailResponse {
    fn from(value: ContactDispatchReceipt) -> Self {
        Self {
            success: true,
            owner_email_response: value.owner.into(),
            client_email_response: value.client.into(),
        }
    }
}

impl From<EmailReceipt> for ApiEmailReceipt {
    fn from(value: EmailReceipt) -> Self {
        Self { id: value.id }
    }
}
