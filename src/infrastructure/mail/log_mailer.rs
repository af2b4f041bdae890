//! Mailer that only logs, used when no relay is configured.

use async_trait::async_trait;
use tracing::{debug, info};

use super::service::{MailResult, Mailer, OutgoingMail};

/// A mailer that records the message in the log and reports success.
pub struct LogMailer;

impl LogMailer {
    pub fn new() -> Self {
        debug!("Using LogMailer (mail delivery disabled)");
        Self
    }
}

impl Default for LogMailer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, mail: &OutgoingMail) -> MailResult<()> {
        info!(
            to = %mail.to,
            subject = %mail.subject,
            attachment = %mail.attachment.file_name,
            bytes = mail.attachment.bytes.len(),
            "Mail delivery disabled, message logged only"
        );
        Ok(())
    }
}
