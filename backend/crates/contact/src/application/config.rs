//! Notification configuration

/// Where new-submission emails go. No recipient disables them.
#[derive(Debug, Clone, Default)]
pub struct NotificationConfig {
    pub recipient: Option<String>,
}

impl NotificationConfig {
    pub fn new(recipient: Option<String>) -> Self {
        Self {
            recipient: recipient.filter(|r| !r.trim().is_empty()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.recipient.is_some()
    }
}
