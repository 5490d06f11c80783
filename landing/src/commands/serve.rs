use landing_config::Config;
use landing_email_contracts::EmailService;
use landing_email_impl::EmailServiceImpl;
use tracing::{info, warn};

use crate::{
    email,
    environment::{ConfigProvider, Provider},
};

pub async fn serve(config: Config) -> anyhow::Result<()> {
    info!("Connecting to email transport");
    let email = email::connect(&config.email)?;
    if let Err(err) = email.ping().await {
        match email {
            EmailServiceImpl::Smtp(_) => return Err(err.context("Failed to ping smtp server")),
            // the api base url may not answer even if sending works
            EmailServiceImpl::Resend(_) => warn!("Failed to reach resend api: {err:#}"),
        }
    }

    let provider = Provider::new(ConfigProvider::new(&config), email);
    let server = provider.rest_server()?;
    info!(
        "Starting http server on {}:{}",
        config.http.host, config.http.port
    );
    server.serve(config.http.host, config.http.port).await
}
