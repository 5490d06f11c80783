//! Transient feedback about the outcome of a submission.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: &'static str,
    pub description: &'static str,
    pub variant: NotificationVariant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationVariant {
    Default,
    Destructive,
}

impl Notification {
    pub const fn sent() -> Self {
        Self {
            title: "Mensagem enviada!",
            description: "Obrigado pelo contato. Responderemos em breve!",
            variant: NotificationVariant::Default,
        }
    }

    pub const fn failed() -> Self {
        Self {
            title: "Erro ao enviar",
            description: "Não foi possível enviar sua mensagem. Tente novamente.",
            variant: NotificationVariant::Destructive,
        }
    }
}

/// Presents notifications to the user.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait Notifier: Send + Sync + 'static {
    fn notify(&self, notification: Notification);
}

#[cfg(any(test, feature = "mock"))]
impl MockNotifier {
    pub fn with_notify(mut self, notification: Notification) -> Self {
        self.expect_notify()
            .once()
            .with(mockall::predicate::eq(notification))
            .return_const(());
        self
    }
}
