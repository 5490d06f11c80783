use std::future::Future;

use landing_models::contact::{ContactDispatchReceipt, ContactSubmission};

/// Client of the contact dispatch endpoint.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactApiService: Send + Sync + 'static {
    /// Submit a validated contact submission. Fails if the endpoint is
    /// unreachable or does not report success.
    fn send_contact_email(
        &self,
        submission: ContactSubmission,
    ) -> impl Future<Output = anyhow::Result<ContactDispatchReceipt>> + Send;
}

#[cfg(feature = "mock")]
impl MockContactApiService {
    pub fn with_send_contact_email(
        mut self,
        submission: ContactSubmission,
        result: Result<ContactDispatchReceipt, String>,
    ) -> Self {
        self.expect_send_contact_email()
            .once()
            .with(mockall::predicate::eq(submission))
            .return_once(move |_| {
                Box::pin(std::future::ready(result.map_err(anyhow::Error::msg)))
            });
        self
    }
}
