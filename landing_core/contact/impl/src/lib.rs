use std::sync::Arc;

use landing_core_contact_contracts::{ContactFeatureService, ContactSendMessageError};
use landing_email_contracts::template::TemplateEmailService;
use landing_models::{
    contact::{ContactDispatchReceipt, ContactSubmission},
    email_address::EmailAddressWithName,
};
use landing_templates_contracts::{ContactAcknowledgmentTemplate, ContactNotificationTemplate};
use tracing::{error, info};

#[derive(Debug, Clone)]
pub struct ContactFeatureServiceImpl<TemplateEmail> {
    template_email: TemplateEmail,
    config: ContactFeatureConfig,
}

#[derive(Debug, Clone)]
pub struct ContactFeatureConfig {
    /// Receives a notification for every submission
    pub owner: Arc<EmailAddressWithName>,
}

impl<TemplateEmail> ContactFeatureServiceImpl<TemplateEmail> {
    pub fn new(template_email: TemplateEmail, config: ContactFeatureConfig) -> Self {
        Self {
            template_email,
            config,
        }
    }
}

impl<TemplateEmail> ContactFeatureService for ContactFeatureServiceImpl<TemplateEmail>
where
    TemplateEmail: TemplateEmailService,
{
    async fn send_message(
        &self,
        submission: ContactSubmission,
    ) -> Result<ContactDispatchReceipt, ContactSendMessageError> {
        let author = submission
            .email
            .address()
            .clone()
            .with_name(display_name(&submission.first_name, &submission.last_name));

        let owner = self
            .template_email
            .send_contact_notification_email(
                (*self.config.owner).clone(),
                author.clone(),
                &ContactNotificationTemplate {
                    first_name: submission.first_name.to_string(),
                    last_name: submission.last_name.to_string(),
                    email: submission.email.to_string(),
                    subject: submission.subject.to_string(),
                    message: submission.message.to_string(),
                },
            )
            .await
            .inspect_err(|err| error!("Failed to send contact notification: {err:#}"))
            .map_err(ContactSendMessageError::OwnerNotification)?;
        info!(id = %owner.id, "Sent contact notification");

        let client = self
            .template_email
            .send_contact_acknowledgment_email(
                author,
                &ContactAcknowledgmentTemplate {
                    first_name: submission.first_name.into_inner(),
                    subject: submission.subject.into_inner(),
                    message: submission.message.into_inner(),
                },
            )
            .await
            .inspect_err(|err| error!("Failed to send contact acknowledgment: {err:#}"))
            .map_err(ContactSendMessageError::Acknowledgment)?;
        info!(id = %client.id, "Sent contact acknowledgment");

        Ok(ContactDispatchReceipt { owner, client })
    }
}

/// Mailbox display name without control characters, which lettre cannot
/// encode in a header.
fn display_name(first_name: &str, last_name: &str) -> String {
    format!("{first_name} {last_name}")
        .split(|c: char| c.is_whitespace() || c.is_control())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
