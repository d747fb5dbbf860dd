//! Normalized error types for indicator operations.
//!
//! Host-seam failures arrive as plain strings and are wrapped here with
//! the operation that produced them.

use std::fmt;

/// Normalized error for indicator operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndicatorError {
    /// The default handler id did not match any registry entry.
    UnknownHandler { handler_id: String },

    /// An operation that needs a resolved client ran without one.
    NoClient,

    /// Launching the client failed, including the fallback command when
    /// one was registered. Terminal for the triggering activation.
    Launch { command: String, message: String },

    /// The host refused or failed a call at the seam.
    Host { operation: String, message: String },
}

impl fmt::Display for IndicatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownHandler { handler_id } => {
                write!(f, "no known email client for handler {handler_id:?}")
            }
            Self::NoClient => f.write_str("no known email client is configured"),
            Self::Launch { command, message } => write!(f, "launch {command:?}: {message}"),
            Self::Host { operation, message } => write!(f, "host {operation}: {message}"),
        }
    }
}

impl std::error::Error for IndicatorError {}

impl IndicatorError {
    /// Whether the indicator keeps running (inert) after this error.
    /// Advisory errors surface a notice; they never tear the
    /// indicator down.
    pub fn is_advisory(&self) -> bool {
        matches!(self, Self::UnknownHandler { .. } | Self::NoClient)
    }
}
