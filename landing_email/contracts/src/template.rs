use std::future::Future;

use landing_models::{email::EmailReceipt, email_address::EmailAddressWithName};
use landing_templates_contracts::{ContactAcknowledgmentTemplate, ContactNotificationTemplate};

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait TemplateEmailService: Send + Sync + 'static {
    /// Notify the owner of the site about a new contact submission. Replies
    /// go to `reply_to`.
    fn send_contact_notification_email(
        &self,
        recipient: EmailAddressWithName,
        reply_to: EmailAddressWithName,
        data: &ContactNotificationTemplate,
    ) -> impl Future<Output = anyhow::Result<EmailReceipt>> + Send;

    fn send_contact_acknowledgment_email(
        &self,
        recipient: EmailAddressWithName,
        data: &ContactAcknowledgmentTemplate,
    ) -> impl Future<Output = anyhow::Result<EmailReceipt>> + Send;
}

#[cfg(feature = "mock")]
impl MockTemplateEmailService {
    pub fn with_send_contact_notification_email(
        mut self,
        recipient: EmailAddressWithName,
        reply_to: EmailAddressWithName,
        data: ContactNotificationTemplate,
        result: Result<EmailReceipt, String>,
    ) -> Self {
        self.expect_send_contact_notification_email()
            .once()
            .with(
                mockall::predicate::eq(recipient),
                mockall::predicate::eq(reply_to),
                mockall::predicate::eq(data),
            )
            .return_once(move |_, _, _| {
                Box::pin(std::future::ready(result.map_err(anyhow::Error::msg)))
            });
        self
    }

    pub fn with_send_contact_acknowledgment_email(
        mut self,
        recipient: EmailAddressWithName,
        data: ContactAcknowledgmentTemplate,
        result: Result<EmailReceipt, String>,
    ) -> Self {
        self.expect_send_contact_acknowledgment_email()
            .once()
            .with(
                mockall::predicate::eq(recipient),
                mockall::predicate::eq(data),
            )
            .return_once(move |_, _| {
                Box::pin(std::future::ready(result.map_err(anyhow::Error::msg)))
            });
        self
    }
}
