//! OS-level adapters: the default-handler query, detached launch and
//! PATH lookup.
//!
//! These are the pieces of the host contract this crate can own
//! directly; window control and tray signals stay with the hosting
//! environment.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// MIME type queried for the default mail client.
pub const MAILTO_HANDLER_MIME: &str = "x-scheme-handler/mailto";

/// Binary used to query MIME handler registrations.
pub const QUERY_TOOL: &str = "xdg-mime";

#[derive(Debug, thiserror::Error)]
pub enum SystemError {
    #[error("empty command")]
    EmptyCommand,
    #[error("query default handler: {0}")]
    Query(String),
    #[error("spawn {command:?}: {message}")]
    Spawn { command: String, message: String },
}

/// Ask the OS which desktop application handles `mailto:` links.
///
/// One-shot synchronous query, run once at startup. Output is trimmed
/// of the trailing newline. Callers treat a failure the same as an
/// unknown handler.
pub fn query_default_handler() -> Result<String, SystemError> {
    let output = Command::new(QUERY_TOOL)
        .args(["query", "default", MAILTO_HANDLER_MIME])
        .output()
        .map_err(|err| SystemError::Query(err.to_string()))?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(SystemError::Query(stderr.trim().to_string()));
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Spawn a command line without waiting for it to exit.
///
/// The command is split on whitespace; the first token is the program.
pub fn spawn_detached(command: &str) -> Result<(), SystemError> {
    let mut parts = command.split_whitespace();
    let Some(program) = parts.next() else {
        return Err(SystemError::EmptyCommand);
    };
    Command::new(program)
        .args(parts)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|_| ())
        .map_err(|err| SystemError::Spawn {
            command: command.to_string(),
            message: err.to_string(),
        })
}

/// Locate a launch command's executable.
///
/// The command's first token is the program, so commands with
/// arguments ("evolution -c mail") resolve too. An explicit path is
/// checked directly; a bare name is searched on `path` (or `$PATH`
/// when `path` is `None`).
pub fn find_in_path(command: &str, path: Option<&OsStr>) -> Option<PathBuf> {
    let program = command.split_whitespace().next()?;
    if program.contains('/') {
        let candidate = PathBuf::from(program);
        return candidate.is_file().then_some(candidate);
    }
    let search = path
        .map(|p| p.to_os_string())
        .or_else(|| std::env::var_os("PATH"))?;
    std::env::split_paths(&search)
        .map(|dir| dir.join(program))
        .find(|candidate| candidate.is_file())
}
