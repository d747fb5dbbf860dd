//! Unread-mail state driven by notification-source titles.

use crate::host::MailStatus;

/// Tracks whether unread mail is present, from source add/remove
/// events. `has_unread` is a flag, not a counter: simultaneous sources
/// with the same title are not counted separately, and removing any
/// matching source clears the flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailStateTracker {
    client: Option<String>,
    has_unread: bool,
}

impl MailStateTracker {
    /// A tracker for the resolved client's display name. With no
    /// client, the tracker never matches.
    pub fn new(client: Option<String>) -> Self {
        Self {
            client,
            has_unread: false,
        }
    }

    pub fn client(&self) -> Option<&str> {
        self.client.as_deref()
    }

    pub fn has_unread(&self) -> bool {
        self.has_unread
    }

    pub fn status(&self) -> MailStatus {
        if self.has_unread {
            MailStatus::Unread
        } else {
            MailStatus::Read
        }
    }

    // Exact equality: substring containment false-positives on titles
    // that merely contain the client name.
    fn matches(&self, title: &str) -> bool {
        self.client.as_deref() == Some(title)
    }

    /// Returns the status to render when the title matches; `None` for
    /// a non-matching title (no-op, nothing to render).
    pub fn on_source_added(&mut self, title: &str) -> Option<MailStatus> {
        if !self.matches(title) {
            return None;
        }
        self.has_unread = true;
        Some(MailStatus::Unread)
    }

    /// Symmetric to [`Self::on_source_added`].
    pub fn on_source_removed(&mut self, title: &str) -> Option<MailStatus> {
        if !self.matches(title) {
            return None;
        }
        self.has_unread = false;
        Some(MailStatus::Read)
    }

    /// Clear the flag (the client window was presented) and return the
    /// status to render.
    pub fn clear(&mut self) -> MailStatus {
        self.has_unread = false;
        MailStatus::Read
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn thunderbird_tracker() -> MailStateTracker {
        MailStateTracker::new(Some("Thunderbird".to_string()))
    }

    #[test]
    fn add_then_remove_round_trips_to_read() {
        let mut tracker = thunderbird_tracker();
        assert_eq!(
            tracker.on_source_added("Thunderbird"),
            Some(MailStatus::Unread)
        );
        assert!(tracker.has_unread());
        assert_eq!(
            tracker.on_source_removed("Thunderbird"),
            Some(MailStatus::Read)
        );
        assert!(!tracker.has_unread());
    }

    #[test]
    fn other_titles_never_change_state() {
        let mut tracker = thunderbird_tracker();
        assert_eq!(tracker.on_source_added("SomeOtherApp"), None);
        assert!(!tracker.has_unread());

        tracker.on_source_added("Thunderbird");
        assert_eq!(tracker.on_source_removed("SomeOtherApp"), None);
        assert!(tracker.has_unread());
    }

    #[test]
    fn repeated_adds_are_an_idempotent_set() {
        let mut tracker = thunderbird_tracker();
        for _ in 0..3 {
            assert_eq!(
                tracker.on_source_added("Thunderbird"),
                Some(MailStatus::Unread)
            );
        }
        assert!(tracker.has_unread());
        // One removal clears the flag regardless of how many adds came in.
        tracker.on_source_removed("Thunderbird");
        assert!(!tracker.has_unread());
    }

    #[test]
    fn matching_is_exact_not_substring() {
        let mut tracker = thunderbird_tracker();
        assert_eq!(tracker.on_source_added("Thunderbird Daily"), None);
        assert_eq!(tracker.on_source_added("My Thunderbird"), None);
        assert_eq!(tracker.on_source_added("thunderbird"), None);
        assert!(!tracker.has_unread());
    }

    #[test]
    fn absent_client_never_matches() {
        let mut tracker = MailStateTracker::new(None);
        assert_eq!(tracker.on_source_added("Thunderbird"), None);
        assert_eq!(tracker.on_source_removed("Thunderbird"), None);
        assert!(!tracker.has_unread());
    }

    #[test]
    fn clear_resets_the_flag() {
        let mut tracker = thunderbird_tracker();
        tracker.on_source_added("Thunderbird");
        assert_eq!(tracker.clear(), MailStatus::Read);
        assert!(!tracker.has_unread());
    }

    #[test]
    fn initial_status_is_read() {
        assert_eq!(thunderbird_tracker().status(), MailStatus::Read);
    }
}
