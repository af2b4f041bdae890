//! Mailer trait, message model and error type.

use async_trait::async_trait;

/// Errors returned when a message cannot be delivered.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("Mail request failed: {0}")]
    Request(String),

    #[error("Mail relay rejected message with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// Result type for mail operations.
pub type MailResult<T> = Result<T, MailError>;

/// Binary file attached to an outgoing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// A message with one attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub to: String,
    pub subject: String,
    pub body: String,
    pub attachment: Attachment,
}

/// External notification channel with attachment support.
///
/// # Implementations
///
/// - [`crate::infrastructure::mail::HttpMailer`] - HTTP mail relay
/// - [`crate::infrastructure::mail::LogMailer`] - Logs instead of sending
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Sends a message, completing once the channel accepted or refused it.
    async fn send(&self, mail: &OutgoingMail) -> MailResult<()>;
}
