#![allow(clippy::expect_used, clippy::unwrap_used)]

use chrono::{DateTime, Utc};
use postbell_cli::{run_cli_for_test, PostbellBackend};

struct DoctorBackend {
    handler: Result<String, String>,
    available: Vec<String>,
    query_tool: bool,
}

impl DoctorBackend {
    fn new(handler: &str) -> Self {
        Self {
            handler: Ok(handler.to_string()),
            available: Vec::new(),
            query_tool: true,
        }
    }

    fn with_available(mut self, command: &str) -> Self {
        self.available.push(command.to_string());
        self
    }

    fn without_query_tool(mut self) -> Self {
        self.query_tool = false;
        self
    }
}

impl PostbellBackend for DoctorBackend {
    fn default_mailto_handler(&self) -> Result<String, String> {
        self.handler.clone()
    }

    fn spawn_command(&self, _command: &str) -> Result<(), String> {
        Ok(())
    }

    fn command_available(&self, command: &str) -> bool {
        self.available.iter().any(|c| c == command)
    }

    fn query_tool_available(&self) -> bool {
        self.query_tool
    }

    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[test]
fn doctor_all_checks_pass_for_healthy_setup() {
    let backend = DoctorBackend::new("org.gnome.Geary.desktop")
        .with_available("geary")
        .with_available("flatpak run org.gnome.Geary");
    let out = run_cli_for_test(&["doctor"], &backend);
    assert_eq!(out.exit_code, 0);
    assert!(out.stdout.contains("5 checks, 5 passed, 0 failed, 0 skipped"));
    assert!(out.stdout.contains("Geary"));
}

#[test]
fn doctor_skips_fallback_when_none_registered() {
    let backend = DoctorBackend::new("thunderbird.desktop").with_available("thunderbird");
    let out = run_cli_for_test(&["doctor"], &backend);
    assert_eq!(out.exit_code, 0);
    assert!(out.stdout.contains("none registered"));
    assert!(out.stdout.contains("5 checks, 4 passed, 0 failed, 1 skipped"));
}

#[test]
fn doctor_fails_when_launch_command_missing() {
    let backend = DoctorBackend::new("thunderbird.desktop");
    let out = run_cli_for_test(&["doctor"], &backend);
    assert_eq!(out.exit_code, 1);
    assert!(out.stdout.contains("thunderbird not found on PATH"));
}

#[test]
fn doctor_unknown_handler_fails_known_client_check() {
    let backend = DoctorBackend::new("org.kde.kmail2.desktop");
    let out = run_cli_for_test(&["doctor"], &backend);
    assert_eq!(out.exit_code, 1);
    assert!(out
        .stdout
        .contains("handler \"org.kde.kmail2.desktop\" is not in the client registry"));
    // Downstream checks are skipped, not failed.
    assert!(out.stdout.contains("no resolved client"));
}

#[test]
fn doctor_no_handler_skips_matching() {
    let backend = DoctorBackend::new("");
    let out = run_cli_for_test(&["doctor"], &backend);
    assert_eq!(out.exit_code, 1);
    assert!(out
        .stdout
        .contains("no handler registered for x-scheme-handler/mailto"));
    assert!(out.stdout.contains("no handler to match"));
}

#[test]
fn doctor_reports_missing_query_tool() {
    let backend = DoctorBackend::new("thunderbird.desktop")
        .with_available("thunderbird")
        .without_query_tool();
    let out = run_cli_for_test(&["doctor"], &backend);
    assert_eq!(out.exit_code, 1);
    assert!(out.stdout.contains("xdg-mime not found on PATH"));
}

#[test]
fn doctor_json_output() {
    let backend = DoctorBackend::new("org.gnome.Geary.desktop")
        .with_available("geary")
        .with_available("flatpak run org.gnome.Geary");
    let out = run_cli_for_test(&["doctor", "--json"], &backend);
    assert_eq!(out.exit_code, 0);

    let value: serde_json::Value = serde_json::from_str(&out.stdout).expect("json");
    let checks = value["checks"].as_array().expect("checks array");
    assert_eq!(checks.len(), 5);
    assert_eq!(checks[0]["name"], "query tool");
    assert_eq!(checks[0]["status"], "pass");
    assert_eq!(value["summary"]["passed"], 5);
    assert_eq!(value["summary"]["failed"], 0);
    assert!(value["checked_at"].is_string());
}

#[test]
fn doctor_unknown_flag_errors() {
    let backend = DoctorBackend::new("");
    let out = run_cli_for_test(&["doctor", "--verbose"], &backend);
    assert_eq!(out.exit_code, 1);
    assert_eq!(out.stderr, "Error: unknown flag: --verbose\n");
}
