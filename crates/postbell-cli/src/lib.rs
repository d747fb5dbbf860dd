//! postbell-cli: command-line surface for the postbell mail-indicator
//! core.
//!
//! Commands resolve the default mail client, launch it with the
//! fallback-retry semantics of the indicator, and diagnose the setup.
//! All commands run against a [`PostbellBackend`] so tests never touch
//! the real system.

use std::path::Path;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use postbell_core::config::IndicatorConfig;
use postbell_core::registry::ResolvedClient;
use postbell_core::system;

pub mod doctor;
pub mod launch;
pub mod status;

pub(crate) mod tests_common;

/// Stable crate label used by bootstrap smoke tests.
pub fn crate_label() -> &'static str {
    "postbell-cli"
}

static VERSION: OnceLock<String> = OnceLock::new();

/// Set the version string for `--version` output.
pub fn set_version(version: &str) {
    let _ = VERSION.set(version.to_string());
}

fn get_version() -> &'static str {
    VERSION.get().map(|s| s.as_str()).unwrap_or("dev")
}

fn help_text() -> String {
    "\
postbell shows new-mail status for the default mail client.

Usage:
  postbell [command]

Available Commands:
  doctor      Diagnose the default mail client setup
  help        Help about any command
  launch      Launch the default mail client
  status      Show the resolved default mail client

Flags:
  -h, --help      help for postbell
  -v, --version   version for postbell

Use \"postbell [command] --help\" for more information about a command.\n"
        .to_string()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

/// Environment seam for the CLI commands.
pub trait PostbellBackend {
    /// Default `mailto` handler id, or an error when the query fails.
    fn default_mailto_handler(&self) -> Result<String, String>;
    /// Spawn a launch command without waiting for it.
    fn spawn_command(&self, command: &str) -> Result<(), String>;
    /// Whether a launch command's executable can be found.
    fn command_available(&self, command: &str) -> bool;
    /// Whether the handler query tool itself is on PATH.
    fn query_tool_available(&self) -> bool;
    fn now_utc(&self) -> DateTime<Utc>;
}

/// Backend running against the real system.
pub struct SystemBackend;

impl PostbellBackend for SystemBackend {
    fn default_mailto_handler(&self) -> Result<String, String> {
        system::query_default_handler().map_err(|err| err.to_string())
    }

    fn spawn_command(&self, command: &str) -> Result<(), String> {
        system::spawn_detached(command).map_err(|err| err.to_string())
    }

    fn command_available(&self, command: &str) -> bool {
        system::find_in_path(command, None).is_some()
    }

    fn query_tool_available(&self) -> bool {
        system::find_in_path(system::QUERY_TOOL, None).is_some()
    }

    fn now_utc(&self) -> DateTime<Utc> {
        chrono::Utc::now()
    }
}

/// Query the handler and resolve it against the configured registry.
/// Returns the trimmed handler id alongside the resolution, so callers
/// can report both.
pub fn resolve_default_client(
    backend: &dyn PostbellBackend,
    config: &IndicatorConfig,
) -> (String, Option<ResolvedClient>) {
    let handler_id = backend.default_mailto_handler().unwrap_or_default();
    let client = config.registry().resolve(&handler_id);
    (handler_id.trim().to_string(), client)
}

pub(crate) fn load_config(path: Option<&Path>) -> Result<IndicatorConfig, String> {
    match path {
        Some(path) => IndicatorConfig::load(path),
        None => Ok(IndicatorConfig::default()),
    }
}

pub fn run_cli_for_test(args: &[&str], backend: &dyn PostbellBackend) -> CommandOutput {
    let mut out = CommandOutput {
        stdout: String::new(),
        stderr: String::new(),
        exit_code: 0,
    };

    let Some((cmd, rest)) = args.split_first() else {
        // No args: show help (exit 0).
        out.stdout = help_text();
        return out;
    };

    match *cmd {
        "--help" | "-h" | "help" => {
            out.stdout = help_text();
            out
        }
        "--version" | "-v" => {
            out.stdout = format!("postbell version {}\n", get_version());
            out
        }
        "doctor" => doctor::run_doctor_for_test(rest, backend),
        "launch" => launch::run_launch_for_test(rest, backend),
        "status" => status::run_status_for_test(rest, backend),
        _ => {
            out.stderr = format!("Error: unknown command \"{cmd}\" for \"postbell\"\n");
            out.exit_code = 1;
            out
        }
    }
}

pub fn run_cli(args: &[String], backend: &dyn PostbellBackend) -> CommandOutput {
    let refs: Vec<&str> = args.iter().map(|s| s.as_str()).collect();
    run_cli_for_test(&refs, backend)
}
