//! Utility functions for the executor.

use std::process::{Command, Stdio};

use super::error::ExecuteError;
use crate::core::output;

/// How external commands are run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecOptions {
    /// If true, log commands without executing them
    pub dry_run: bool,
    /// If true, print commands and stream their output
    pub verbose: bool,
}

/// Shell-quote a value for display.
pub fn shell_quote(s: impl std::fmt::Display) -> String {
    let s = s.to_string();
    if !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | '/' | '=' | ':'))
    {
        s
    } else {
        format!("'{}'", s.replace('\'', "'\"'\"'"))
    }
}

/// Render a command as a copy-pasteable shell line.
pub fn command_line(cmd: &Command) -> String {
    let mut line = shell_quote(cmd.get_program().to_string_lossy());
    for arg in cmd.get_args() {
        line.push(' ');
        line.push_str(&shell_quote(arg.to_string_lossy()));
    }
    line
}

/// Lines of captured stdout kept in a failure report.
const STDOUT_TAIL_LINES: usize = 40;

/// Run a command to completion.
///
/// In verbose mode the tool's output is streamed to stderr; otherwise it is
/// captured behind a spinner and attached to the error on failure. Stdout of
/// the tool never reaches our stdout.
pub fn run(cmd: &mut Command, label: &str, opts: ExecOptions) -> Result<(), ExecuteError> {
    let line = command_line(cmd);

    if opts.verbose || opts.dry_run {
        eprintln!("[{}] {}", if opts.dry_run { "dry-run" } else { "exec" }, line);
    }

    if opts.dry_run {
        return Ok(());
    }

    if opts.verbose {
        let status = cmd
            .stdin(Stdio::null())
            .stdout(std::io::stderr())
            .status()
            .map_err(|source| ExecuteError::Spawn {
                cmd: line.clone(),
                source,
            })?;
        if !status.success() {
            return Err(ExecuteError::CommandFailed {
                cmd: line,
                code: status.code(),
            });
        }
        return Ok(());
    }

    let pb = output::build_spinner(label);
    let result = cmd.stdin(Stdio::null()).output();
    output::progress_done(pb);

    let out = result.map_err(|source| ExecuteError::Spawn {
        cmd: line.clone(),
        source,
    })?;

    if !out.status.success() {
        let output = failure_output(&out.stdout, &out.stderr);
        if output.is_empty() {
            return Err(ExecuteError::CommandFailed {
                cmd: line,
                code: out.status.code(),
            });
        }
        return Err(ExecuteError::CommandFailedWithOutput {
            cmd: line,
            code: out.status.code(),
            output,
        });
    }

    Ok(())
}

/// Tail of stdout followed by stderr. Build drivers such as ninja report
/// `FAILED:` and compiler diagnostics on stdout.
fn failure_output(stdout: &[u8], stderr: &[u8]) -> String {
    let stdout = String::from_utf8_lossy(stdout);
    let lines: Vec<&str> = stdout.trim_end().lines().collect();
    let tail = lines[lines.len().saturating_sub(STDOUT_TAIL_LINES)..].join("\n");
    let stderr = String::from_utf8_lossy(stderr);

    [tail.trim(), stderr.trim()]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
