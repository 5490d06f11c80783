use std::future::Future;

use landing_models::contact::{ContactDispatchReceipt, ContactSubmission};
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactFeatureService: Send + Sync + 'static {
    /// Notify the owner about the submission, then send an acknowledgment
    /// to its author.
    fn send_message(
        &self,
        submission: ContactSubmission,
    ) -> impl Future<Output = Result<ContactDispatchReceipt, ContactSendMessageError>> + Send;
}

#[derive(Debug, Error)]
pub enum ContactSendMessageError {
    #[error("Failed to send contact notification")]
    OwnerNotification(#[source] anyhow::Error),
    #[error("Failed to send contact acknowledgment")]
    Acknowledgment(#[source] anyhow::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockContactFeatureService {
    pub fn with_send_message(
        mut self,
        submission: ContactSubmission,
        result: Result<ContactDispatchReceipt, ContactSendMessageError>,
    ) -> Self {
        self.expect_send_message()
            .once()
            .with(mockall::predicate::eq(submission))
            .return_once(|_| Box::pin(std::future::ready(result)));
        self
    }
}
