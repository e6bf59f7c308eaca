//! Owner notification for new submissions

use std::sync::Arc;

use platform::mailer::{Mailer, OutgoingEmail, escape_html};

use crate::application::config::NotificationConfig;
use crate::domain::entity::NewContact;

pub struct ContactNotifier<M>
where
    M: Mailer,
{
    mailer: Arc<M>,
    config: NotificationConfig,
}

impl<M> Clone for ContactNotifier<M>
where
    M: Mailer,
{
    fn clone(&self) -> Self {
        Self {
            mailer: Arc::clone(&self.mailer),
            config: self.config.clone(),
        }
    }
}

impl<M> ContactNotifier<M>
where
    M: Mailer,
{
    pub fn new(mailer: Arc<M>, config: NotificationConfig) -> Self {
        Self { mailer, config }
    }

    /// Send the owner an email about `contact`. Failures are logged only.
    pub async fn notify(&self, contact: &NewContact) {
        let Some(recipient) = self.config.recipient.as_deref() else {
            tracing::debug!("NOTIFICATION_EMAIL not set, skipping contact notification");
            return;
        };

        let email = build_email(recipient, contact);
        if let Err(e) = self.mailer.send(&email).await {
            tracing::error!(error = %e, "Failed to send contact notification");
        }
    }
}

/// Notification for one submission. User text is HTML-escaped.
pub fn build_email(recipient: &str, contact: &NewContact) -> OutgoingEmail {
    let mut html = format!(
        "<h2>Nueva consulta desde el sitio web</h2>\
         <p><strong>Nombre:</strong> {}</p>\
         <p><strong>Email:</strong> {}</p>\
         <p><strong>Teléfono:</strong> {}</p>",
        escape_html(&contact.nombre),
        escape_html(&contact.email),
        escape_html(&contact.telefono),
    );
    if let Some(mensaje) = contact.mensaje.as_deref().filter(|m| !m.is_empty()) {
        html.push_str(&format!("<p><strong>Mensaje:</strong></p><p>{}</p>", escape_html(mensaje)));
    }

    OutgoingEmail {
        to: recipient.to_string(),
        subject: format!("Nueva consulta de {}", contact.nombre),
        html,
    }
}
