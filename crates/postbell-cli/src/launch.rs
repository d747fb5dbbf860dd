//! postbell launch command: start the default mail client.
//!
//! Same semantics as indicator activation in the no-window state:
//! primary command first, one fallback retry, terminal on failure.

use std::path::PathBuf;

use crate::{load_config, resolve_default_client, CommandOutput, PostbellBackend};

const USAGE: &str = "\
Launch the default mail client.

Usage:
  postbell launch [flags]

Flags:
      --config FILE   load indicator config from FILE
  -h, --help          help for launch
";

fn parse_launch_args(args: &[&str]) -> Result<Option<PathBuf>, (i32, String)> {
    let mut config = None;
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match *arg {
            "--config" => {
                let Some(path) = iter.next() else {
                    return Err((1, "--config requires a path".to_string()));
                };
                config = Some(PathBuf::from(path));
            }
            other => return Err((1, format!("unknown flag: {other}"))),
        }
    }
    Ok(config)
}

/// Run the launch command from test arguments.
pub fn run_launch_for_test(args: &[&str], backend: &dyn PostbellBackend) -> CommandOutput {
    if args.contains(&"-h") || args.contains(&"--help") {
        return CommandOutput {
            stdout: USAGE.to_string(),
            stderr: String::new(),
            exit_code: 0,
        };
    }
    match execute_launch(args, backend) {
        Ok(output) => output,
        Err((exit_code, message)) => CommandOutput {
            stdout: String::new(),
            stderr: format!("Error: {message}\n"),
            exit_code,
        },
    }
}

fn execute_launch(
    args: &[&str],
    backend: &dyn PostbellBackend,
) -> Result<CommandOutput, (i32, String)> {
    let config_path = parse_launch_args(args)?;
    let config = load_config(config_path.as_deref()).map_err(|message| (1, message))?;
    let (_, client) = resolve_default_client(backend, &config);

    let Some(client) = client else {
        return Err((1, "no known email client found".to_string()));
    };

    let primary_failure = match backend.spawn_command(&client.launch_command) {
        Ok(()) => {
            return Ok(CommandOutput {
                stdout: format!("Launched {}\n", client.display_name),
                stderr: String::new(),
                exit_code: 0,
            })
        }
        Err(message) => message,
    };

    if let Some(fallback) = &client.fallback_launch_command {
        if backend.spawn_command(fallback).is_ok() {
            return Ok(CommandOutput {
                stdout: format!("Launched {} (fallback)\n", client.display_name),
                stderr: String::new(),
                exit_code: 0,
            });
        }
    }

    Err((
        1,
        format!(
            "could not launch {}: {primary_failure}",
            client.display_name
        ),
    ))
}
