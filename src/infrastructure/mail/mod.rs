//! Outbound notification channel.
//!
//! Provides a [`Mailer`] trait with two implementations:
//! - [`HttpMailer`] - Production HTTP mail relay
//! - [`LogMailer`] - No-op implementation for disabled delivery

mod http_mailer;
mod log_mailer;
mod service;

pub use http_mailer::HttpMailer;
pub use log_mailer::LogMailer;
pub use service::{Attachment, MailError, MailResult, Mailer, OutgoingMail};

#[cfg(test)]
pub use service::MockMailer;
