//! gcloud CLI command execution.
//!
//! Runs the external CLI as a subprocess with an explicit argument list and
//! returns its stdout.

use crate::config::MAX_OUTPUT_BYTES;
use colored::Colorize;
use std::error::Error;
use std::process::Command;

/// Run `program` with `args` and return its stdout.
///
/// # Arguments
/// * `program` - The executable, e.g. `gcloud`
/// * `args` - Arguments passed as-is, no shell splitting or quoting
///
/// # Returns
/// * `Ok(String)` - The stdout output on success
/// * `Err` - If the process cannot start, exits non-zero, or produces too much output
pub fn run(program: &str, args: &[String]) -> Result<String, Box<dyn Error>> {
    let cmd = command_line(program, args);
    log::debug!("run({cmd})", cmd = cmd.on_blue());

    let output = Command::new(program).args(args).output().map_err(|e| {
        log::error!("Command execution failed: {}", e);
        format!("Failed to execute {program}: {e}")
    })?;

    if output.status.success() {
        log::debug!("Success cmd: {cmd}");
        log::debug!("Success output.stdout.len(): {}", output.stdout.len());

        if output.stdout.len() > MAX_OUTPUT_BYTES {
            return Err(format!(
                "Response too large: {} bytes for command: {cmd}",
                output.stdout.len()
            )
            .into());
        }
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        log::trace!(
            "code={code:?}, status={status}\n┎######\nstderr=\n{stderr}\n┖######",
            code = output.status.code(),
            status = output.status,
            stderr = stderr.red()
        );
        log::warn!(
            "{failed} to run {cmd}",
            failed = "failed".on_red(),
            cmd = cmd.on_blue()
        );
        return Err(format!("ERROR running: {}", stderr.trim()).into());
    }

    let stdout = String::from_utf8(output.stdout).map_err(|e| format!("Invalid UTF-8: {}", e))?;

    Ok(stdout)
}

/// Printable form of a command for logs, arguments with spaces are quoted.
fn command_line(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .map(|part| {
            if part.contains(char::is_whitespace) {
                format!("'{part}'")
            } else {
                part.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
