//! postbell status command: report the resolved default mail client.

use std::path::PathBuf;

use crate::{load_config, resolve_default_client, CommandOutput, PostbellBackend};

const USAGE: &str = "\
Show the resolved default mail client.

Usage:
  postbell status [flags]

Flags:
      --config FILE   load indicator config from FILE
      --json          output as JSON
  -h, --help          help for status
";

struct StatusArgs {
    json: bool,
    config: Option<PathBuf>,
}

fn parse_status_args(args: &[&str]) -> Result<StatusArgs, (i32, String)> {
    let mut parsed = StatusArgs {
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

/// Run the status command from test arguments.
pub fn run_status_for_test(args: &[&str], backend: &dyn PostbellBackend) -> CommandOutput {
    if args.contains(&"-h") || args.contains(&"--help") {
        return CommandOutput {
            stdout: USAGE.to_string(),
            stderr: String::new(),
            exit_code: 0,
        };
    }
    match execute_status(args, backend) {
        Ok(output) => output,
        Err((exit_code, message)) => CommandOutput {
            stdout: String::new(),
            stderr: format!("Error: {message}\n"),
            exit_code,
        },
    }
}

fn execute_status(
    args: &[&str],
    backend: &dyn PostbellBackend,
) -> Result<CommandOutput, (i32, String)> {
    let parsed = parse_status_args(args)?;
    let config = load_config(parsed.config.as_deref()).map_err(|message| (1, message))?;
    let (handler, client) = resolve_default_client(backend, &config);

    if parsed.json {
        let absent = client.is_none();
        let payload = serde_json::json!({
            "handler": handler,
            "client": client,
        });
        let rendered =
            serde_json::to_string_pretty(&payload).map_err(|err| (1, format!("json: {err}")))?;
        return Ok(CommandOutput {
            stdout: format!("{rendered}\n"),
            stderr: String::new(),
            exit_code: i32::from(absent),
        });
    }

    match client {
        Some(client) => {
            let mut out = format!(
                "Default mail client: {}\nHandler: {}\nLaunch command: {}\n",
                client.display_name, handler, client.launch_command
            );
            if let Some(fallback) = &client.fallback_launch_command {
                out.push_str(&format!("Fallback command: {fallback}\n"));
            }
            Ok(CommandOutput {
                stdout: out,
                stderr: String::new(),
                exit_code: 0,
            })
        }
        None => {
            let detail = if handler.is_empty() {
                "no handler registered".to_string()
            } else {
                format!("handler {handler:?}")
            };
            Ok(CommandOutput {
                stdout: format!("No known email client found ({detail}).\n"),
                stderr: String::new(),
                exit_code: 1,
            })
        }
    }
}
