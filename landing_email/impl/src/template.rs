use landing_email_contracts::{template::TemplateEmailService, ContentType, Email, EmailService};
use landing_models::{email::EmailReceipt, email_address::EmailAddressWithName};
use landing_templates_contracts::{
    ContactAcknowledgmentTemplate, ContactNotificationTemplate, Template, TemplateService,
};

pub const ACKNOWLEDGMENT_SUBJECT: &str = "Recebemos sua mensagem!";

#[derive(Debug, Clone)]
pub struct TemplateEmailServiceImpl<Email, Template> {
    email: Email,
    template: Template,
}

impl<Email, Template> TemplateEmailServiceImpl<Email, Template> {
    pub fn new(email: Email, template: Template) -> Self {
        Self { email, template }
    }
}

pub fn notification_subject(subject: &str) -> String {
    format!("Novo Contato: {subject}")
}

impl<EmailS, Template> TemplateEmailService for TemplateEmailServiceImpl<EmailS, Template>
where
    EmailS: EmailService,
    Template: TemplateService,
{
    async fn send_contact_notification_email(
        &self,
        recipient: EmailAddressWithName,
        reply_to: EmailAddressWithName,
        data: &ContactNotificationTemplate,
    ) -> anyhow::Result<EmailReceipt> {
        self.send_email(
            recipient,
            Some(reply_to),
            data,
            notification_subject(&data.subject),
        )
        .await
    }

    async fn send_contact_acknowledgment_email(
        &self,
        recipient: EmailAddressWithName,
        data: &ContactAcknowledgmentTemplate,
    ) -> anyhow::Result<EmailReceipt> {
        self.send_email(recipient, None, data, ACKNOWLEDGMENT_SUBJECT)
            .await
    }
}

impl<EmailS, TemplateS> TemplateEmailServiceImpl<EmailS, TemplateS>
where
    EmailS: EmailService,
    TemplateS: TemplateService,
{
    async fn send_email<T: Template + 'static>(
        &self,
        recipient: EmailAddressWithName,
        reply_to: Option<EmailAddressWithName>,
        data: &T,
        subject: impl Into<String>,
    ) -> anyhow::Result<EmailReceipt> {
        self.email
            .send(Email {
                recipient,
                subject: subject.into(),
                body: self.template.render(data)?,
                content_type: ContentType::Html,
                reply_to,
            })
            .await
    }
}
