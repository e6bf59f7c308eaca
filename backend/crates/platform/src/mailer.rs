//! Outgoing email through the Resend HTTP API

use serde::Serialize;
use thiserror::Error;

pub const RESEND_API_URL: &str = "https://api.resend.com/emails";

pub const DEFAULT_FROM: &str = "Diseño con Alas <onboarding@resend.dev>";

#[derive(Debug, Error)]
pub enum MailError {
    #[error("mail provider is not configured")]
    NotConfigured,

    #[error("mail request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("mail provider responded with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub html: String,
}

#[trait_variant::make(Mailer: Send)]
pub trait LocalMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError>;
}

#[derive(Serialize)]
struct ResendPayload<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
}

#[derive(Debug, Clone)]
pub struct ResendMailer {
    client: reqwest::Client,
    api_key: Option<String>,
    from: String,
    endpoint: String,
}

impl ResendMailer {
    pub fn new(client: reqwest::Client, api_key: Option<String>, from: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            from: from.into(),
            endpoint: RESEND_API_URL.to_string(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

impl Mailer for ResendMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        let api_key = self.api_key.as_deref().ok_or(MailError::NotConfigured)?;

        let payload = ResendPayload {
            from: &self.from,
            to: [&email.to],
            subject: &email.subject,
            html: &email.html,
        };
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MailError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        tracing::info!(subject = %email.subject, "Email sent");
        Ok(())
    }
}

/// Escape text for interpolation into an HTML body.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email() -> OutgoingEmail {
        OutgoingEmail {
            to: "duena@example.com".into(),
            subject: "Nueva consulta".into(),
            html: "<p>hola</p>".into(),
        }
    }

    #[tokio::test]
    async fn test_missing_key_is_not_configured() {
        let mailer = ResendMailer::new(reqwest::Client::new(), None, DEFAULT_FROM);
        let err = Mailer::send(&mailer, &email()).await.unwrap_err();
        assert!(matches!(err, MailError::NotConfigured));
    }

    #[tokio::test]
    async fn test_unreachable_provider_is_request_error() {
        let mailer = ResendMailer::new(reqwest::Client::new(), Some("re_123".into()), DEFAULT_FROM)
            .with_endpoint("http://127.0.0.1:9/emails");
        let err = Mailer::send(&mailer, &email()).await.unwrap_err();
        assert!(matches!(err, MailError::Request(_)));
    }

    #[test]
    fn test_payload_shape() {
        let payload = ResendPayload {
            from: DEFAULT_FROM,
            to: ["a@b.com"],
            subject: "s",
            html: "h",
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["to"], serde_json::json!(["a@b.com"]));
        assert_eq!(value["from"], DEFAULT_FROM);
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<script>"x" & 'y'</script>"#),
            "&lt;script&gt;&quot;x&quot; &amp; &#39;y&#39;&lt;/script&gt;"
        );
        assert_eq!(escape_html("Peña"), "Peña");
    }
}
