//! Host collaborator seams.
//!
//! The desktop shell owns the panel widget, the notification tray and
//! the window manager. The indicator reaches them only through these
//! traits, and the host delivers tray events back through
//! [`crate::indicator::MailIndicator::handle_source_event`]. Seam
//! methods report failures as plain strings; the indicator normalizes
//! them into [`crate::error::IndicatorError`].

use serde::Serialize;

/// Signals the indicator subscribes to on the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostSignal {
    SourceAdded,
    SourceRemoved,
    Activated,
}

impl HostSignal {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SourceAdded => "source-added",
            Self::SourceRemoved => "source-removed",
            Self::Activated => "activated",
        }
    }
}

impl std::fmt::Display for HostSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque subscription handle returned by [`MailHost::connect`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SignalId(pub u64);

/// Host-reported state of the resolved client's window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSnapshot {
    pub focused: bool,
}

/// Rendered unread state of the panel icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MailStatus {
    Read,
    Unread,
}

impl MailStatus {
    /// Icon the host renders for this status.
    pub fn icon_name(self) -> &'static str {
        match self {
            Self::Read => "mail-read-symbolic",
            Self::Unread => "mail-unread-symbolic",
        }
    }
}

impl std::fmt::Display for MailStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read => f.write_str("read"),
            Self::Unread => f.write_str("unread"),
        }
    }
}

/// Direction of a notification-source event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceEventKind {
    Added,
    Removed,
}

/// A notification-source event delivered by the host tray.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEvent {
    pub kind: SourceEventKind,
    /// `None` when the host payload carried no title. Such events are
    /// ignored.
    pub title: Option<String>,
}

/// The host interface.
///
/// One implementation per hosting environment; [`crate::mock::MockHost`]
/// backs the tests. All calls are synchronous and delivered on the
/// host's single event loop.
pub trait MailHost: Send + Sync {
    /// Identifier of the application registered for `mailto:` links,
    /// as reported by the OS default-handler query.
    fn default_mailto_handler(&self) -> Result<String, String>;

    /// Subscribe to a host signal.
    fn connect(&self, signal: HostSignal) -> Result<SignalId, String>;

    /// Release a subscription. Must tolerate ids that were already
    /// released.
    fn disconnect(&self, id: SignalId);

    /// Current window of the named client, `None` when it has no open
    /// window.
    fn client_window(&self, display_name: &str) -> Option<WindowSnapshot>;

    /// Minimize the named client's window.
    fn minimize_window(&self, display_name: &str) -> Result<(), String>;

    /// Un-minimize the named client's window and give it focus.
    fn present_window(&self, display_name: &str) -> Result<(), String>;

    /// Spawn an external command without waiting for it.
    fn spawn_command(&self, command: &str) -> Result<(), String>;

    /// Show a one-shot, non-blocking user-visible notice.
    fn notify(&self, message: &str);
}

/// Host-owned icon rendering (icon swap plus accent color).
pub trait StatusRenderer: Send + Sync {
    fn render(&self, status: MailStatus);
}
