use std::future::Future;

/// Client of the Resend transactional email API.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ResendApiService: Send + Sync + 'static {
    /// Send an email and return the id assigned by Resend.
    fn send_email(
        &self,
        email: ResendEmail,
    ) -> impl Future<Output = anyhow::Result<String>> + Send;

    /// Check that the API is reachable.
    fn ping(&self) -> impl Future<Output = anyhow::Result<()>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResendEmail {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub body: ResendEmailBody,
    pub reply_to: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResendEmailBody {
    Text(String),
    Html(String),
}

#[cfg(feature = "mock")]
impl MockResendApiService {
    pub fn with_send_email(mut self, email: ResendEmail, result: Result<String, String>) -> Self {
        self.expect_send_email()
            .once()
            .with(mockall::predicate::eq(email))
            .return_once(move |_| {
                Box::pin(std::future::ready(result.map_err(anyhow::Error::msg)))
            });
        self
    }

    pub fn with_ping(mut self, result: bool) -> Self {
        self.expect_ping().once().return_once(move || {
            Box::pin(std::future::ready(if result {
                Ok(())
            } else {
                Err(anyhow::anyhow!("resend api unreachable"))
            }))
        });
        self
    }
}
