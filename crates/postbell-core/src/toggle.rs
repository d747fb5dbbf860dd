//! Activation decision table for the indicator toggle.

use serde::Serialize;

use crate::host::WindowSnapshot;

/// What an activation should do given the client window state and the
/// unread flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleAction {
    /// No open window: launch the client.
    Launch,
    /// Focused window, nothing unread: minimize it.
    Minimize,
    /// Unfocused window, or unread mail: un-minimize, clear the flag
    /// and focus.
    Present,
}

impl ToggleAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Launch => "launch",
            Self::Minimize => "minimize",
            Self::Present => "present",
        }
    }
}

impl std::fmt::Display for ToggleAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reported result of an activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToggleOutcome {
    /// No resolved client; activation is a no-op.
    Disabled,
    Launched,
    LaunchedFallback,
    Minimized,
    Presented,
}

impl ToggleOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Disabled => "disabled",
            Self::Launched => "launched",
            Self::LaunchedFallback => "launched_fallback",
            Self::Minimized => "minimized",
            Self::Presented => "presented",
        }
    }
}

impl std::fmt::Display for ToggleOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decide the toggle action. Unread overrides focus: a focused window
/// with unread mail is presented (and the flag cleared) rather than
/// minimized.
pub fn toggle_action(window: Option<WindowSnapshot>, has_unread: bool) -> ToggleAction {
    match window {
        None => ToggleAction::Launch,
        Some(w) if w.focused && !has_unread => ToggleAction::Minimize,
        Some(_) => ToggleAction::Present,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn window(focused: bool) -> Option<WindowSnapshot> {
        Some(WindowSnapshot { focused })
    }

    #[test]
    fn no_window_launches_regardless_of_unread() {
        assert_eq!(toggle_action(None, false), ToggleAction::Launch);
        assert_eq!(toggle_action(None, true), ToggleAction::Launch);
    }

    #[test]
    fn focused_read_window_minimizes() {
        assert_eq!(toggle_action(window(true), false), ToggleAction::Minimize);
    }

    #[test]
    fn unread_overrides_focus_minimize() {
        assert_eq!(toggle_action(window(true), true), ToggleAction::Present);
    }

    #[test]
    fn unfocused_window_presents() {
        assert_eq!(toggle_action(window(false), false), ToggleAction::Present);
        assert_eq!(toggle_action(window(false), true), ToggleAction::Present);
    }

    #[test]
    fn action_display() {
        assert_eq!(ToggleAction::Launch.to_string(), "launch");
        assert_eq!(ToggleAction::Minimize.to_string(), "minimize");
        assert_eq!(ToggleAction::Present.to_string(), "present");
    }

    #[test]
    fn outcome_display() {
        assert_eq!(ToggleOutcome::Disabled.to_string(), "disabled");
        assert_eq!(ToggleOutcome::Launched.to_string(), "launched");
        assert_eq!(
            ToggleOutcome::LaunchedFallback.to_string(),
            "launched_fallback"
        );
        assert_eq!(ToggleOutcome::Minimized.to_string(), "minimized");
        assert_eq!(ToggleOutcome::Presented.to_string(), "presented");
    }
}
