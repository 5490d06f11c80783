use std::sync::Arc;

use anyhow::{bail, ensure, Context};
use landing_extern_contracts::contact::ContactApiService;
use landing_models::{
    contact::{ContactDispatchReceipt, ContactSubmission},
    email::EmailReceipt,
};
use serde::Deserialize;
use url::Url;

use crate::http::HttpClient;

#[derive(Debug, Clone)]
pub struct ContactApiServiceImpl {
    config: ContactApiServiceConfig,
    client: HttpClient,
}

#[derive(Debug, Clone)]
pub struct ContactApiServiceConfig {
    /// Full url of the contact dispatch endpoint
    pub endpoint: Arc<Url>,
}

impl ContactApiServiceImpl {
    pub fn new(config: ContactApiServiceConfig) -> anyhow::Result<Self> {
        Ok(Self {
            config,
            client: HttpClient::new()?,
        })
    }
}

impl ContactApiService for ContactApiServiceImpl {
    async fn send_contact_email(
        &self,
        submission: ContactSubmission,
    ) -> anyhow::Result<ContactDispatchReceipt> {
        let response = self
            .client
            .post((*self.config.endpoint).clone())
            .json(&submission)
            .send()
            .await
            .context("Failed to reach contact endpoint")?;

        let status = response.status();
        if !status.is_success() {
            let error = response
                .json::<ErrorResponse>()
                .await
                .map(|response| response.error)
                .unwrap_or_default();
            bail!("Contact endpoint responded with {status}: {error}");
        }

        let response = response
            .json::<SendContactEmailResponse>()
            .await
            .context("Failed to parse contact endpoint response")?;
        ensure!(response.success, "Contact endpoint did not report success");

        Ok(ContactDispatchReceipt {
            owner: response.owner_email_response,
            client: response.client_email_response,
        })
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SendContactEmailResponse {
    success: bool,
    owner_email_response: EmailReceipt,
    client_email_response: EmailReceipt,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: String,
}
