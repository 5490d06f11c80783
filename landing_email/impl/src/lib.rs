use landing_email_contracts::{Email, EmailService};
use landing_extern_impl::resend::ResendApiServiceImpl;
use landing_models::{email::EmailReceipt, email_address::EmailAddressWithName};

pub use crate::{resend::ResendEmailService, smtp::SmtpEmailService};

pub mod resend;
pub mod smtp;
pub mod template;

/// Email transport selected at startup.
#[derive(Debug, Clone)]
pub enum EmailServiceImpl {
    Smtp(SmtpEmailService),
    Resend(ResendEmailService<ResendApiServiceImpl>),
}

impl EmailServiceImpl {
    pub fn smtp(url: &str, from: EmailAddressWithName) -> anyhow::Result<Self> {
        SmtpEmailService::new(url, from).map(Self::Smtp)
    }

    pub fn resend(api: ResendApiServiceImpl, from: EmailAddressWithName) -> Self {
        Self::Resend(ResendEmailService::new(api, from))
    }
}

impl EmailService for EmailServiceImpl {
    async fn send(&self, email: Email) -> anyhow::Result<EmailReceipt> {
        match self {
            Self::Smtp(smtp) => smtp.send(email).await,
            Self::Resend(resend) => resend.send(email).await,
        }
    }

    async fn ping(&self) -> anyhow::Result<()> {
        match self {
            Self::Smtp(smtp) => smtp.ping().await,
            Self::Resend(resend) => resend.ping().await,
        }
    }
}
