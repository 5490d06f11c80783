//! The contact form: holds the raw input, validates it, and dispatches it to
//! the contact endpoint while allowing only one submission at a time.

use std::{
    collections::BTreeMap,
    sync::{Mutex, MutexGuard, PoisonError},
};

use landing_extern_contracts::contact::ContactApiService;
use landing_models::contact::{
    ContactDispatchReceipt, ContactField, ContactFieldError, ContactSubmission,
    ContactSubmissionDraft, ContactValidationError,
};
use tracing::{debug, warn};

use crate::notification::{Notification, Notifier};

pub mod notification;

pub const SUBMIT_LABEL: &str = "Enviar Mensagem";
pub const SUBMITTING_LABEL: &str = "Enviando...";

#[derive(Debug)]
pub struct ContactForm<Api, Notify> {
    api: Api,
    notifier: Notify,
    inner: Mutex<FormInner>,
}

#[derive(Debug, Default)]
struct FormInner {
    state: FormState,
    values: ContactSubmissionDraft,
    errors: BTreeMap<ContactField, &'static str>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormState {
    #[default]
    Idle,
    /// A submission is in flight and the inputs are disabled.
    Submitting,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// At least one field failed validation. Nothing was sent.
    Invalid(Vec<ContactFieldError>),
    Sent(ContactDispatchReceipt),
    Failed,
    /// Another submission is still in flight.
    Busy,
}

impl<Api, Notify> ContactForm<Api, Notify> {
    pub fn new(api: Api, notifier: Notify) -> Self {
        Self {
            api,
            notifier,
            inner: Default::default(),
        }
    }

    /// Store the raw input of a field and clear its error. Returns `false`
    /// without changing anything while a submission is in flight.
    pub fn update_field(&self, field: ContactField, value: impl Into<String>) -> bool {
        let mut inner = self.lock();
        if inner.state == FormState::Submitting {
            return false;
        }
        inner.values.set(field, value.into());
        inner.errors.remove(&field);
        true
    }

    pub fn values(&self) -> ContactSubmissionDraft {
        self.lock().values.clone()
    }

    pub fn value(&self, field: ContactField) -> String {
        self.lock().values.get(field).to_owned()
    }

    pub fn error(&self, field: ContactField) -> Option<&'static str> {
        self.lock().errors.get(&field).copied()
    }

    pub fn errors(&self) -> Vec<ContactFieldError> {
        self.lock()
            .errors
            .iter()
            .map(|(&field, &message)| ContactFieldError { field, message })
            .collect()
    }

    pub fn state(&self) -> FormState {
        self.lock().state
    }

    pub fn submit_label(&self) -> &'static str {
        match self.state() {
            FormState::Idle => SUBMIT_LABEL,
            FormState::Submitting => SUBMITTING_LABEL,
        }
    }

    fn lock(&self) -> MutexGuard<'_, FormInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<Api, Notify> ContactForm<Api, Notify>
where
    Api: ContactApiService,
    Notify: Notifier,
{
    pub async fn submit(&self) -> SubmitOutcome {
        let submission = {
            let mut inner = self.lock();
            if inner.state == FormState::Submitting {
                return SubmitOutcome::Busy;
            }

            match ContactSubmission::try_from(&inner.values) {
                Ok(submission) => {
                    inner.errors.clear();
                    inner.state = FormState::Submitting;
                    submission
                }
                Err(ContactValidationError(errors)) => {
                    debug!(count = errors.len(), "contact form is invalid");
                    inner.errors = errors.iter().map(|e| (e.field, e.message)).collect();
                    return SubmitOutcome::Invalid(errors);
                }
            }
        };

        let guard = SubmittingGuard(&self.inner);
        let result = self.api.send_contact_email(submission).await;

        match result {
            Ok(receipt) => {
                self.lock().values = ContactSubmissionDraft::default();
                drop(guard);
                self.notifier.notify(Notification::sent());
                SubmitOutcome::Sent(receipt)
            }
            Err(err) => {
                warn!("Failed to send contact message: {err:#}");
                drop(guard);
                self.notifier.notify(Notification::failed());
                SubmitOutcome::Failed
            }
        }
    }
}

/// Returns the form to [`FormState::Idle`] when dropped, even if the submit
/// future is cancelled.
struct SubmittingGuard<'a>(&'a Mutex<FormInner>);

impl Drop for SubmittingGuard<'_> {
    fn drop(&mut self) {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).state = FormState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use std::{future::Future, sync::Arc};

    use landing_extern_contracts::contact::MockContactApiService;
    use landing_models::email::EmailReceipt;
    use landing_utils::assert_matches;
    use pretty_assertions::assert_eq;
    use tokio::sync::oneshot;

    use super::*;
    use crate::notification::MockNotifier;

    #[tokio::test]
    async fn sent() {
        // Arrange
        let api = MockContactApiService::new()
            .with_send_contact_email(submission(), Ok(receipt()));
        let notifier = MockNotifier::new().with_notify(Notification::sent());
        let sut = ContactForm::new(api, notifier);
        fill(&sut);

        // Act
        let result = sut.submit().await;

        // Assert
        assert_eq!(result, SubmitOutcome::Sent(receipt()));
        assert_eq!(sut.values(), ContactSubmissionDraft::default());
        assert_eq!(sut.state(), FormState::Idle);
        assert_eq!(sut.submit_label(), SUBMIT_LABEL);
    }

    #[tokio::test]
    async fn failed() {
        // Arrange
        let api = MockContactApiService::new()
            .with_send_contact_email(submission(), Err("connection refused".into()));
        let notifier = MockNotifier::new().with_notify(Notification::failed());
        let sut = ContactForm::new(api, notifier);
        fill(&sut);

        // Act
        let result = sut.submit().await;

        // Assert
        assert_eq!(result, SubmitOutcome::Failed);
        assert_eq!(sut.values(), draft());
        assert_eq!(sut.state(), FormState::Idle);
    }

    #[tokio::test]
    async fn invalid() {
        // Arrange
        let sut = ContactForm::new(MockContactApiService::new(), MockNotifier::new());
        fill(&sut);
        sut.update_field(ContactField::FirstName, "A");
        sut.update_field(ContactField::Email, "not-an-email");

        // Act
        let result = sut.submit().await;

        // Assert
        let expected = vec![
            ContactFieldError {
                field: ContactField::FirstName,
                message: "Nome deve ter pelo menos 2 caracteres",
            },
            ContactFieldError {
                field: ContactField::Email,
                message: "Email inválido",
            },
        ];
        assert_eq!(result, SubmitOutcome::Invalid(expected.clone()));
        assert_eq!(sut.errors(), expected);
        assert_eq!(
            sut.error(ContactField::FirstName),
            Some("Nome deve ter pelo menos 2 caracteres")
        );
        assert_eq!(sut.error(ContactField::LastName), None);
        assert_eq!(sut.state(), FormState::Idle);
    }

    #[tokio::test]
    async fn update_clears_error() {
        // Arrange
        let sut = ContactForm::new(MockContactApiService::new(), MockNotifier::new());
        sut.submit().await;
        assert_eq!(sut.errors().len(), ContactField::ALL.len());

        // Act
        let updated = sut.update_field(ContactField::Subject, "Orçamento");

        // Assert
        assert!(updated);
        assert_eq!(sut.error(ContactField::Subject), None);
        assert_eq!(sut.value(ContactField::Subject), "Orçamento");
        assert_eq!(sut.errors().len(), ContactField::ALL.len() - 1);
    }

    #[tokio::test]
    async fn busy_while_submitting() {
        // Arrange
        let (tx, rx) = oneshot::channel::<()>();
        let api = blocking_api(rx);
        let notifier = MockNotifier::new().with_notify(Notification::sent());
        let sut = Arc::new(ContactForm::new(api, notifier));
        fill(sut.as_ref());

        let first = tokio::spawn({
            let sut = Arc::clone(&sut);
            async move { sut.submit().await }
        });
        while sut.state() != FormState::Submitting {
            tokio::task::yield_now().await;
        }

        // Act
        let second = sut.submit().await;
        let updated = sut.update_field(ContactField::Message, "changed while sending");
        let label = sut.submit_label();
        tx.send(()).unwrap();
        let first = first.await.unwrap();

        // Assert
        assert_eq!(second, SubmitOutcome::Busy);
        assert!(!updated);
        assert_eq!(label, SUBMITTING_LABEL);
        assert_eq!(first, SubmitOutcome::Sent(receipt()));
        assert_eq!(sut.state(), FormState::Idle);
    }

    #[tokio::test]
    async fn cancelled_submit_returns_to_idle() {
        // Arrange
        let (_tx, rx) = oneshot::channel::<()>();
        let api = blocking_api(rx);
        let sut = ContactForm::new(api, MockNotifier::new());
        fill(&sut);

        // Act
        let mut submit = Box::pin(sut.submit());
        let poll = poll_once(submit.as_mut()).await;
        let state_during = sut.state();
        drop(submit);

        // Assert
        assert_matches!(poll, None);
        assert_eq!(state_during, FormState::Submitting);
        assert_eq!(sut.state(), FormState::Idle);
        assert_eq!(sut.values(), draft());
    }

    async fn poll_once<F: Future + Unpin>(future: F) -> Option<F::Output> {
        tokio::select! {
            biased;
            output = future => Some(output),
            _ = std::future::ready(()) => None,
        }
    }

    fn blocking_api(rx: oneshot::Receiver<()>) -> MockContactApiService {
        let mut api = MockContactApiService::new();
        api.expect_send_contact_email()
            .once()
            .with(mockall::predicate::eq(submission()))
            .return_once(move |_| {
                Box::pin(async move {
                    rx.await.ok();
                    Ok::<_, anyhow::Error>(receipt())
                })
            });
        api
    }

    fn fill<Api, Notify>(form: &ContactForm<Api, Notify>) {
        let draft = draft();
        for field in ContactField::ALL {
            assert!(form.update_field(field, draft.get(field)));
        }
    }

    fn draft() -> ContactSubmissionDraft {
        ContactSubmissionDraft {
            first_name: "Ana".into(),
            last_name: "Silva".into(),
            email: "ana@example.com".into(),
            subject: "Orçamento".into(),
            message: "Gostaria de um orçamento para um site.".into(),
        }
    }

    fn submission() -> ContactSubmission {
        draft().try_into().unwrap()
    }

    fn receipt() -> ContactDispatchReceipt {
        ContactDispatchReceipt {
            owner: EmailReceipt::new("owner-id"),
            client: EmailReceipt::new("client-id"),
        }
    }
}
