//! Mail client registry and default-handler resolution.
//!
//! Maps the desktop-entry filename reported by the OS default-handler
//! query for `mailto` links to a supported client's display name and
//! launch command. Matching is exact and case-sensitive; the first
//! matching entry wins. Anything else resolves to no client.

use serde::{Deserialize, Serialize};

/// One registry row: the desktop-entry filenames a client registers
/// under, plus its launch data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientEntry {
    pub desktop_ids: Vec<String>,
    pub display_name: String,
    pub launch_command: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_launch_command: Option<String>,
}

/// The default mail client resolved from a handler id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedClient {
    pub display_name: String,
    pub launch_command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_launch_command: Option<String>,
}

/// Immutable lookup table of supported clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientRegistry {
    entries: Vec<ClientEntry>,
}

fn entry(
    desktop_ids: &[&str],
    display_name: &str,
    launch_command: &str,
    fallback_launch_command: Option<&str>,
) -> ClientEntry {
    ClientEntry {
        desktop_ids: desktop_ids.iter().map(|id| (*id).to_string()).collect(),
        display_name: display_name.to_string(),
        launch_command: launch_command.to_string(),
        fallback_launch_command: fallback_launch_command.map(str::to_string),
    }
}

/// The builtin client table. Desktop ids cover the filenames the
/// supported clients register under across packaging variants (distro
/// package, snap, daily channel).
pub fn builtin_entries() -> Vec<ClientEntry> {
    vec![
        entry(
            &[
                "thunderbird.desktop",
                "mozilla-thunderbird.desktop",
                "thunderbird_thunderbird.desktop",
                "daily.desktop",
            ],
            "Thunderbird",
            "thunderbird",
            None,
        ),
        entry(
            &["org.gnome.Evolution.desktop"],
            "Evolution",
            "evolution -c mail",
            None,
        ),
        entry(
            &["org.gnome.Geary.desktop"],
            "Geary",
            "geary",
            Some("flatpak run org.gnome.Geary"),
        ),
        entry(
            &["mailspring_mailspring.desktop"],
            "Mailspring",
            "mailspring",
            None,
        ),
    ]
}

impl Default for ClientRegistry {
    fn default() -> Self {
        Self {
            entries: builtin_entries(),
        }
    }
}

impl ClientRegistry {
    pub fn new(entries: Vec<ClientEntry>) -> Self {
        Self { entries }
    }

    /// Builtin table with extra entries appended. Builtin rows keep
    /// priority: an extra entry cannot shadow a builtin desktop id.
    pub fn with_extra_entries(extra: Vec<ClientEntry>) -> Self {
        let mut entries = builtin_entries();
        entries.extend(extra);
        Self { entries }
    }

    pub fn entries(&self) -> &[ClientEntry] {
        &self.entries
    }

    /// Resolve a default-handler identifier to a supported client.
    ///
    /// The identifier is trimmed first; the OS query appends a
    /// trailing newline. An empty or unknown identifier resolves to
    /// `None`; callers treat that as advisory, not fatal.
    pub fn resolve(&self, handler_id: &str) -> Option<ResolvedClient> {
        let handler_id = handler_id.trim();
        if handler_id.is_empty() {
            return None;
        }
        self.entries
            .iter()
            .find(|e| e.desktop_ids.iter().any(|id| id == handler_id))
            .map(|e| ResolvedClient {
                display_name: e.display_name.clone(),
                launch_command: e.launch_command.clone(),
                fallback_launch_command: e.fallback_launch_command.clone(),
            })
    }
}
