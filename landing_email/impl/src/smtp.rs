use anyhow::{anyhow, ensure};
use landing_email_contracts::{ContentType, Email, EmailService};
use landing_models::{email::EmailReceipt, email_address::EmailAddressWithName};
use landing_utils::Apply;
use lettre::{
    message::{header, MessageBuilder},
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

#[derive(Debug, Clone)]
pub struct SmtpEmailService {
    from: EmailAddressWithName,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpEmailService {
    pub fn new(url: &str, from: EmailAddressWithName) -> anyhow::Result<Self> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::from_url(url)?.build();

        Ok(Self { from, transport })
    }
}

impl EmailService for SmtpEmailService {
    async fn send(&self, email: Email) -> anyhow::Result<EmailReceipt> {
        let message = build_message(self.from.clone(), email)?;

        let response = self.transport.send(message).await?;
        ensure!(
            response.is_positive(),
            "SMTP server rejected the email: {}",
            response.code()
        );

        let id = std::iter::once(response.code().to_string())
            .chain(response.message().map(str::to_owned))
            .collect::<Vec<_>>()
            .join(" ");
        Ok(EmailReceipt::new(id))
    }

    async fn ping(&self) -> anyhow::Result<()> {
        self.transport
            .test_connection()
            .await?
            .then_some(())
            .ok_or_else(|| anyhow!("Failed to ping smtp server"))
    }
}

fn build_message(from: EmailAddressWithName, email: Email) -> anyhow::Result<Message> {
    Message::builder()
        .from(from.0)
        .to(email.recipient.0)
        .apply_map(email.reply_to.map(|x| x.0), MessageBuilder::reply_to)
        .subject(email.subject)
        .header(match email.content_type {
            ContentType::Text => header::ContentType::TEXT_PLAIN,
            ContentType::Html => header::ContentType::TEXT_HTML,
        })
        .body(email.body)
        .map_err(Into::into)
}
