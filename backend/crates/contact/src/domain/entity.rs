//! Contact message entity and inbox filter

use chrono::{DateTime, Months, Utc};
use kernel::id::ContactId;
use serde::Serialize;

/// A stored contact form submission.
///
/// `respondido_at` is set exactly when `respondido` is true.
#[derive(Debug, Clone, Serialize)]
pub struct ContactMessage {
    pub id: ContactId,
    pub nombre: String,
    pub email: String,
    pub telefono: String,
    pub mensaje: Option<String>,
    pub respondido: bool,
    pub respondido_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// A validated submission, before it is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContact {
    pub nombre: String,
    pub email: String,
    pub telefono: String,
    pub mensaje: Option<String>,
}

/// Inbox filter as applied to the query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFilter {
    pub respondido: Option<bool>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl ContactFilter {
    /// How far back the default inbox view reaches.
    pub const DEFAULT_WINDOW_MONTHS: u32 = 6;

    /// Apply the caller's filters. With none of them set the inbox shows
    /// unanswered messages from the last six months.
    pub fn resolve(
        respondido: Option<bool>,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Self {
        if respondido.is_none() && start.is_none() && end.is_none() {
            return Self {
                respondido: Some(false),
                start: now.checked_sub_months(Months::new(Self::DEFAULT_WINDOW_MONTHS)),
                end: None,
            };
        }
        Self {
            respondido,
            start,
            end,
        }
    }

    pub fn matches(&self, message: &ContactMessage) -> bool {
        self.respondido.is_none_or(|r| message.respondido == r)
            && self.start.is_none_or(|s| message.created_at >= s)
            && self.end.is_none_or(|e| message.created_at <= e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 8, 31, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_default_inbox_is_unanswered_last_six_months() {
        let filter = ContactFilter::resolve(None, None, None, now());
        assert_eq!(filter.respondido, Some(false));
        assert_eq!(filter.start, Some(Utc.with_ymd_and_hms(2024, 2, 29, 12, 0, 0).unwrap()));
        assert_eq!(filter.end, None);
    }

    #[test]
    fn test_any_explicit_filter_disables_defaults() {
        let filter = ContactFilter::resolve(Some(true), None, None, now());
        assert_eq!(filter, ContactFilter { respondido: Some(true), start: None, end: None });

        let end = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let filter = ContactFilter::resolve(None, None, Some(end), now());
        assert_eq!(filter.respondido, None);
        assert_eq!(filter.start, None);
        assert_eq!(filter.end, Some(end));
    }
}
