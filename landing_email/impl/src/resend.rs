use anyhow::anyhow;
use landing_email_contracts::{ContentType, Email, EmailService};
use landing_extern_contracts::resend::{ResendApiService, ResendEmail, ResendEmailBody};
use landing_models::{email::EmailReceipt, email_address::EmailAddressWithName};

/// Delivers emails through the Resend HTTP API.
#[derive(Debug, Clone)]
pub struct ResendEmailService<Api> {
    from: EmailAddressWithName,
    api: Api,
}

impl<Api> ResendEmailService<Api> {
    pub fn new(api: Api, from: EmailAddressWithName) -> Self {
        Self { from, api }
    }
}

impl<Api: ResendApiService> EmailService for ResendEmailService<Api> {
    async fn send(&self, email: Email) -> anyhow::Result<EmailReceipt> {
        let body = match email.content_type {
            ContentType::Text => ResendEmailBody::Text(email.body),
            ContentType::Html => ResendEmailBody::Html(email.body),
        };

        let reply_to = email.reply_to.as_ref().map(mailbox).transpose()?;

        self.api
            .send_email(ResendEmail {
                from: mailbox(&self.from)?,
                to: vec![mailbox(&email.recipient)?],
                subject: email.subject,
                body,
                reply_to,
            })
            .await
            .map(EmailReceipt::new)
    }

    async fn ping(&self) -> anyhow::Result<()> {
        self.api.ping().await
    }
}

fn mailbox(mailbox: &EmailAddressWithName) -> anyhow::Result<String> {
    mailbox
        .try_to_string()
        .map_err(|_| anyhow!("Cannot encode mailbox of {}", mailbox.email()))
}
