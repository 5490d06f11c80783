use std::sync::Arc;

use anyhow::{anyhow, bail, Context};
use clap::Subcommand;
use landing_config::Config;
use landing_extern_impl::contact::{ContactApiServiceConfig, ContactApiServiceImpl};
use landing_form::{
    notification::{Notification, NotificationVariant, Notifier},
    ContactForm, SubmitOutcome,
};
use landing_models::contact::ContactField;

#[derive(Debug, Subcommand)]
pub enum ContactCommand {
    /// Submit a message through the contact form
    Send {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        subject: String,
        #[arg(long)]
        message: String,
    },
}

impl ContactCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        match self {
            ContactCommand::Send {
                first_name,
                last_name,
                email,
                subject,
                message,
            } => {
                send(
                    config,
                    [
                        (ContactField::FirstName, first_name),
                        (ContactField::LastName, last_name),
                        (ContactField::Email, email),
                        (ContactField::Subject, subject),
                        (ContactField::Message, message),
                    ],
                )
                .await
            }
        }
    }
}

async fn send(config: Config, fields: [(ContactField, String); 5]) -> anyhow::Result<()> {
    let api = ContactApiServiceImpl::new(ContactApiServiceConfig {
        endpoint: Arc::new(config.form.endpoint),
    })
    .context("Failed to create contact api client")?;
    let form = ContactForm::new(api, TerminalNotifier);

    for (field, value) in fields {
        form.update_field(field, value);
    }

    match form.submit().await {
        SubmitOutcome::Sent(receipt) => {
            println!("Owner notification: {}", receipt.owner.id);
            println!("Acknowledgment: {}", receipt.client.id);
            Ok(())
        }
        SubmitOutcome::Invalid(errors) => {
            for error in &errors {
                eprintln!("{}: {}", error.field, error.message);
            }
            Err(anyhow!("Invalid contact submission"))
        }
        SubmitOutcome::Failed => bail!("Failed to send contact message"),
        SubmitOutcome::Busy => bail!("Another submission is in progress"),
    }
}

/// Prints notifications to the terminal.
#[derive(Debug, Clone, Copy)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, notification: Notification) {
        let Notification {
            title,
            description,
            variant,
        } = notification;
        match variant {
            NotificationVariant::Default => println!("{title}\n{description}"),
            NotificationVariant::Destructive => eprintln!("{title}\n{description}"),
        }
    }
}
