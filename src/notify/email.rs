use anyhow::{Context, Result};
use lettre::message::{header::ContentType, Mailbox};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

use crate::common::config::EmailSettings;

/// Delivers the run report
pub trait Notifier {
    fn send(&self, subject: &str, body: &str) -> Result<()>;
}

/// Sends the report over SMTP with implicit TLS
#[derive(Debug, Clone)]
pub struct EmailNotifier {
    settings: EmailSettings,
}

impl EmailNotifier {
    pub fn new(settings: EmailSettings) -> Self {
        Self { settings }
    }

    /// Build the plain-text message without sending it
    pub fn build_message(&self, subject: &str, body: &str) -> Result<Message> {
        let from: Mailbox = self
            .settings
            .from
            .parse()
            .with_context(|| format!("Invalid sender address: {}", self.settings.from))?;
        let to: Mailbox = self
            .settings
            .to
            .parse()
            .with_context(|| format!("Invalid recipient address: {}", self.settings.to))?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .context("Failed to build report email")
    }
}

impl Notifier for EmailNotifier {
    fn send(&self, subject: &str, body: &str) -> Result<()> {
        let message = self.build_message(subject, body)?;

        let mailer = SmtpTransport::relay(&self.settings.smtp_host)
            .with_context(|| format!("Failed to set up SMTP relay {}", self.settings.smtp_host))?
            .port(self.settings.smtp_port)
            .credentials(Credentials::new(
                self.settings.from.clone(),
                self.settings.password.clone(),
            ))
            .build();

        mailer.send(&message).with_context(|| {
            format!(
                "Failed to send report through {}:{}",
                self.settings.smtp_host, self.settings.smtp_port
            )
        })?;

        tracing::info!(to = %self.settings.to, "report sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(from: &str) -> EmailSettings {
        EmailSettings {
            from: from.to_string(),
            to: "dba@example.com".to_string(),
            password: "secret".to_string(),
            smtp_host: "smtp.example.com".to_string(),
            smtp_port: 465,
        }
    }

    #[test]
    fn test_build_message_plain_text() {
        let notifier = EmailNotifier::new(settings("ops@example.com"));
        let message = notifier
            .build_message("Weekly backup routine | (26/02/2024)", "All good")
            .unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();

        assert!(raw.contains("From: ops@example.com"));
        assert!(raw.contains("To: dba@example.com"));
        assert!(raw.contains("Subject: Weekly backup routine | (26/02/2024)"));
        assert!(raw.contains("Content-Type: text/plain"));
        assert!(raw.contains("All good"));
    }

    #[test]
    fn test_invalid_sender_rejected() {
        let notifier = EmailNotifier::new(settings("not an address"));
        let err = notifier.build_message("s", "b").unwrap_err();
        assert!(err.to_string().contains("Invalid sender address"));
    }
}
