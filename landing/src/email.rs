use anyhow::Context;
use landing_config::{EmailConfig, EmailTransportConfig};
use landing_email_impl::EmailServiceImpl;
use landing_extern_impl::resend::{ResendApiServiceConfig, ResendApiServiceImpl};

/// Build the email transport selected in the config
pub fn connect(config: &EmailConfig) -> anyhow::Result<EmailServiceImpl> {
    match &config.transport {
        EmailTransportConfig::Smtp { url } => EmailServiceImpl::smtp(url, config.from.clone())
            .context("Failed to connect to SMTP server"),
        EmailTransportConfig::Resend {
            api_key,
            endpoint_override,
        } => {
            let api = ResendApiServiceImpl::new(ResendApiServiceConfig::new(
                api_key.as_str(),
                endpoint_override.clone(),
            ))
            .context("Failed to create resend api client")?;
            Ok(EmailServiceImpl::resend(api, config.from.clone()))
        }
    }
}
