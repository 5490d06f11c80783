use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailAddress(pub lettre::Address);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailAddressWithName(pub lettre::message::Mailbox);

impl EmailAddress {
    pub fn as_str(&self) -> &str {
        self.0.as_ref()
    }

    pub fn with_name(self, name: String) -> EmailAddressWithName {
        EmailAddressWithName(lettre::message::Mailbox {
            name: Some(name),
            email: self.0,
        })
    }
}

impl EmailAddressWithName {
    pub fn email(&self) -> &str {
        self.0.email.as_ref()
    }

    pub fn into_email_address(self) -> EmailAddress {
        EmailAddress(self.0.email)
    }

    /// Formats the mailbox as a header value. Fails for names lettre cannot
    /// encode, where `to_string` would panic.
    pub fn try_to_string(&self) -> Result<String, fmt::Error> {
        use fmt::Write;

        let mut out = String::new();
        write!(out, "{}", self.0)?;
        Ok(out)
    }
}

impl From<EmailAddress> for EmailAddressWithName {
    fn from(value: EmailAddress) -> Self {
        Self(lettre::message::Mailbox {
            name: None,
            email: value.0,
        })
    }
}

impl FromStr for EmailAddress {
    type Err = <lettre::Address as FromStr>::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

impl FromStr for EmailAddressWithName {
    type Err = <lettre::message::Mailbox as FromStr>::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

impl TryFrom<&str> for EmailAddress {
    type Error = <Self as FromStr>::Err;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Display for EmailAddressWithName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mailbox_display() {
        let mailbox = "ana@example.com"
            .parse::<EmailAddress>()
            .unwrap()
            .with_name("Ana".into());
        assert_eq!(mailbox.to_string(), "Ana <ana@example.com>");
        assert_eq!(mailbox.email(), "ana@example.com");
    }

    #[test]
    fn mailbox_with_control_characters() {
        let mailbox = "ana@example.com"
            .parse::<EmailAddress>()
            .unwrap()
            .with_name("Ana\nMaria".into());
        mailbox.try_to_string().unwrap_err();

        let mailbox = "ana@example.com"
            .parse::<EmailAddress>()
            .unwrap()
            .with_name("Ana Maria".into());
        assert_eq!(mailbox.try_to_string().unwrap(), "Ana Maria <ana@example.com>");
    }

    #[test]
    fn plain_mailbox_display() {
        let mailbox = EmailAddressWithName::from("ana@example.com".parse::<EmailAddress>().unwrap());
        assert_eq!(mailbox.to_string(), "ana@example.com");
    }
}
