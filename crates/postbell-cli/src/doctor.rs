//! postbell doctor command: diagnose the default mail client setup.

use std::io::Write;
use std::path::PathBuf;

use postbell_core::config::IndicatorConfig;
use serde::Serialize;
use tabwriter::TabWriter;

use crate::{load_config, resolve_default_client, CommandOutput, PostbellBackend};

const USAGE: &str = "\
Diagnose the default mail client setup.

Usage:
  postbell doctor [flags]

Flags:
      --config FILE   load indicator config from FILE
      --json          output as JSON
  -h, --help          help for doctor
";

/// Status of a single diagnostic check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Pass,
    Fail,
    Skip,
}

impl CheckStatus {
    fn icon(self) -> &'static str {
        match self {
            Self::Pass => "\u{2713}", // ✓
            Self::Fail => "\u{2717}", // ✗
            Self::Skip => "-",
        }
    }
}

/// A single diagnostic check result.
#[derive(Debug, Clone, Serialize)]
pub struct DoctorCheck {
    pub name: String,
    pub status: CheckStatus,
    pub details: String,
}

fn check(name: &str, status: CheckStatus, details: impl Into<String>) -> DoctorCheck {
    DoctorCheck {
        name: name.to_string(),
        status,
        details: details.into(),
    }
}

/// Summary of all diagnostic results.
#[derive(Debug, Clone, Serialize)]
pub struct DoctorSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
}

/// Full diagnostic report.
#[derive(Debug, Clone, Serialize)]
pub struct DoctorReport {
    pub checked_at: String,
    pub checks: Vec<DoctorCheck>,
    pub summary: DoctorSummary,
}

struct DoctorArgs {
    json: bool,
    config: Option<PathBuf>,
}

fn parse_doctor_args(args: &[&str]) -> Result<DoctorArgs, (i32, String)> {
    let mut parsed = DoctorArgs {
        json: false,
        config: None,
    };
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match *arg {
            "--json" => parsed.json = true,
            "--config" => {
                let Some(path) = iter.next() else {
                    return Err((1, "--config requires a path".to_string()));
                };
                parsed.config = Some(PathBuf::from(path));
            }
            other => return Err((1, format!("unknown flag: {other}"))),
        }
    }
    Ok(parsed)
}

/// Run the doctor command from test arguments.
pub fn run_doctor_for_test(args: &[&str], backend: &dyn PostbellBackend) -> CommandOutput {
    if args.contains(&"-h") || args.contains(&"--help") {
        return CommandOutput {
            stdout: USAGE.to_string(),
            stderr: String::new(),
            exit_code: 0,
        };
    }
    match execute_doctor(args, backend) {
        Ok(output) => output,
        Err((exit_code, message)) => CommandOutput {
            stdout: String::new(),
            stderr: format!("Error: {message}\n"),
            exit_code,
        },
    }
}

fn execute_doctor(
    args: &[&str],
    backend: &dyn PostbellBackend,
) -> Result<CommandOutput, (i32, String)> {
    let parsed = parse_doctor_args(args)?;
    let config = load_config(parsed.config.as_deref()).map_err(|message| (1, message))?;
    let report = build_report(backend, &config);

    let stdout = if parsed.json {
        let rendered =
            serde_json::to_string_pretty(&report).map_err(|err| (1, format!("json: {err}")))?;
        format!("{rendered}\n")
    } else {
        render_table(&report).map_err(|message| (1, message))?
    };

    Ok(CommandOutput {
        stdout,
        stderr: String::new(),
        exit_code: i32::from(report.summary.failed > 0),
    })
}

fn build_report(backend: &dyn PostbellBackend, config: &IndicatorConfig) -> DoctorReport {
    let mut checks = Vec::new();

    let query_tool = backend.query_tool_available();
    checks.push(if query_tool {
        check("query tool", CheckStatus::Pass, "xdg-mime found on PATH")
    } else {
        check("query tool", CheckStatus::Fail, "xdg-mime not found on PATH")
    });

    let handler = backend.default_mailto_handler();
    checks.push(match &handler {
        Ok(id) if !id.trim().is_empty() => check(
            "mailto handler",
            CheckStatus::Pass,
            format!("registered: {}", id.trim()),
        ),
        Ok(_) => check(
            "mailto handler",
            CheckStatus::Fail,
            "no handler registered for x-scheme-handler/mailto",
        ),
        Err(message) => check("mailto handler", CheckStatus::Fail, message.clone()),
    });

    let (handler_id, client) = resolve_default_client(backend, config);
    checks.push(match (&handler_id[..], &client) {
        ("", _) => check("known client", CheckStatus::Skip, "no handler to match"),
        (_, Some(client)) => check(
            "known client",
            CheckStatus::Pass,
            client.display_name.clone(),
        ),
        (_, None) => check(
            "known client",
            CheckStatus::Fail,
            format!("handler {handler_id:?} is not in the client registry"),
        ),
    });

    match &client {
        Some(client) => {
            checks.push(if backend.command_available(&client.launch_command) {
                check(
                    "launch command",
                    CheckStatus::Pass,
                    client.launch_command.clone(),
                )
            } else {
                check(
                    "launch command",
                    CheckStatus::Fail,
                    format!("{} not found on PATH", client.launch_command),
                )
            });

            checks.push(match &client.fallback_launch_command {
                Some(fallback) if backend.command_available(fallback) => {
                    check("fallback command", CheckStatus::Pass, fallback.clone())
                }
                Some(fallback) => check(
                    "fallback command",
                    CheckStatus::Fail,
                    format!("{fallback} not found on PATH"),
                ),
                None => check("fallback command", CheckStatus::Skip, "none registered"),
            });
        }
        None => {
            checks.push(check("launch command", CheckStatus::Skip, "no resolved client"));
            checks.push(check("fallback command", CheckStatus::Skip, "no resolved client"));
        }
    }

    let summary = DoctorSummary {
        total: checks.len(),
        passed: checks.iter().filter(|c| c.status == CheckStatus::Pass).count(),
        failed: checks.iter().filter(|c| c.status == CheckStatus::Fail).count(),
        skipped: checks.iter().filter(|c| c.status == CheckStatus::Skip).count(),
    };

    DoctorReport {
        checked_at: backend.now_utc().to_rfc3339(),
        checks,
        summary,
    }
}

fn render_table(report: &DoctorReport) -> Result<String, String> {
    let mut tw = TabWriter::new(Vec::new());
    for check in &report.checks {
        writeln!(tw, "{}\t{}\t{}", check.status.icon(), check.name, check.details)
            .map_err(|err| format!("render: {err}"))?;
    }
    tw.flush().map_err(|err| format!("render: {err}"))?;
    let bytes = tw
        .into_inner()
        .map_err(|err| format!("render: {err}"))?;
    let mut out = String::from_utf8(bytes).map_err(|err| format!("render: {err}"))?;
    out.push_str(&format!(
        "\n{} checks, {} passed, {} failed, {} skipped\n",
        report.summary.total,
        report.summary.passed,
        report.summary.failed,
        report.summary.skipped
    ));
    Ok(out)
}
