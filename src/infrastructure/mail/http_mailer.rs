//! Mailer posting messages to an HTTP mail relay.

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

use super::service::{MailError, MailResult, Mailer, OutgoingMail};

#[derive(Debug, Serialize)]
struct RelayMessage<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    text: &'a str,
    attachments: [RelayAttachment<'a>; 1],
}

#[derive(Debug, Serialize)]
struct RelayAttachment<'a> {
    filename: &'a str,
    /// Base64-encoded file content.
    content: String,
}

/// Sends mail through a JSON relay API.
///
/// The relay receives `{from, to, subject, text, attachments: [{filename, content}]}`
/// with the attachment base64-encoded, authenticated by an optional bearer token.
pub struct HttpMailer {
    http_client: reqwest::Client,
    endpoint: String,
    api_token: Option<String>,
    from: String,
}

impl HttpMailer {
    /// # Errors
    ///
    /// Returns [`MailError::Request`] if the HTTP client cannot be constructed.
    pub fn new(
        endpoint: impl Into<String>,
        api_token: Option<String>,
        from: impl Into<String>,
        timeout: Duration,
    ) -> MailResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MailError::Request(e.to_string()))?;

        Ok(Self {
            http_client,
            endpoint: endpoint.into(),
            api_token,
            from: from.into(),
        })
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, mail: &OutgoingMail) -> MailResult<()> {
        let payload = RelayMessage {
            from: &self.from,
            to: [mail.to.as_str()],
            subject: &mail.subject,
            text: &mail.body,
            attachments: [RelayAttachment {
                filename: &mail.attachment.file_name,
                content: STANDARD.encode(&mail.attachment.bytes),
            }],
        };

        let mut request = self.http_client.post(&self.endpoint).json(&payload);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| MailError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MailError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        debug!(to = %mail.to, "Mail accepted by relay");
        Ok(())
    }
}
