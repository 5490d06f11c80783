use serde::{Deserialize, Serialize};

/// Confirmation returned by an email transport for one accepted message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailReceipt {
    pub id: String,
}

impl EmailReceipt {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}
