use std::sync::Arc;

use anyhow::{bail, Context};
use landing_extern_contracts::resend::{ResendApiService, ResendEmail, ResendEmailBody};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::http::HttpClient;

const API_ENDPOINT: &str = "https://api.resend.com/";

#[derive(Debug, Clone)]
pub struct ResendApiServiceImpl {
    config: ResendApiServiceConfig,
    client: HttpClient,
}

#[derive(Debug, Clone)]
pub struct ResendApiServiceConfig {
    endpoint: Arc<Url>,
    api_key: Arc<str>,
}

impl ResendApiServiceConfig {
    /// `endpoint_override` replaces the base url of the api and must end with
    /// a slash.
    pub fn new(api_key: impl Into<Arc<str>>, endpoint_override: Option<Url>) -> Self {
        Self {
            endpoint: endpoint_override
                .unwrap_or_else(|| API_ENDPOINT.parse().unwrap())
                .into(),
            api_key: api_key.into(),
        }
    }
}

impl ResendApiServiceImpl {
    pub fn new(config: ResendApiServiceConfig) -> anyhow::Result<Self> {
        Ok(Self {
            config,
            client: HttpClient::new()?,
        })
    }
}

impl ResendApiService for ResendApiServiceImpl {
    async fn send_email(&self, email: ResendEmail) -> anyhow::Result<String> {
        let (html, text) = match &email.body {
            ResendEmailBody::Html(html) => (Some(html.as_str()), None),
            ResendEmailBody::Text(text) => (None, Some(text.as_str())),
        };

        let response = self
            .client
            .post(self.config.endpoint.join("emails")?)
            .bearer_auth(&*self.config.api_key)
            .json(&SendEmailRequest {
                from: &email.from,
                to: &email.to,
                subject: &email.subject,
                html,
                text,
                reply_to: email.reply_to.as_deref(),
            })
            .send()
            .await
            .context("Failed to reach resend api")?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorResponse>()
                .await
                .map(|response| response.message)
                .unwrap_or_default();
            bail!("Resend rejected the email ({status}): {message}");
        }

        response
            .json::<SendEmailResponse>()
            .await
            .map(|response| response.id)
            .context("Failed to parse resend api response")
    }

    async fn ping(&self) -> anyhow::Result<()> {
        self.client
            .get((*self.config.endpoint).clone())
            .send()
            .await
            .map(|_| ())
            .context("Failed to reach resend api")
    }
}

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a [String],
    subject: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    html: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a str>,
}

#[derive(Deserialize)]
struct SendEmailResponse {
    id: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    message: String,
}
