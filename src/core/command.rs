// SymDrop - core/command.rs
//
// Subprocess execution with full-stream capture.
//
// Contract: this function never fails for control-flow purposes. A launch
// failure, a non-zero exit, or an undecodable stream all degrade to absent
// Options plus a tracing diagnostic; callers decide what an absent stream
// means for them. Exit status is carried for diagnostics only.

use crate::util::error::InvokeError;
use std::path::Path;
use std::process::Command;

/// Captured result of a finished subprocess.
///
/// Both streams are best-effort UTF-8: bytes that do not decode surface as
/// `None` for that stream, never as a lossy replacement, so a caller can
/// distinguish "no output" from "output we could not represent".
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Captured standard output, if the stream decoded as UTF-8.
    pub stdout: Option<String>,

    /// Captured standard error, if the stream decoded as UTF-8.
    pub stderr: Option<String>,

    /// Exit code of the subprocess. `None` when the launch itself failed or
    /// the process was terminated by a signal.
    pub status: Option<i32>,
}

impl CommandResult {
    /// Result representing a subprocess that never launched.
    fn launch_failed() -> Self {
        Self {
            stdout: None,
            stderr: None,
            status: None,
        }
    }
}

/// Run `program` with `args` and the given environment overrides, blocking
/// until it exits, and capture both output streams to completion.
///
/// `envs` entries are added on top of the inherited environment (the helper
/// needs PATH et al., so the environment is extended, not replaced).
pub fn run_command<P, A, S>(program: P, args: A, envs: &[(String, String)]) -> CommandResult
where
    P: AsRef<Path>,
    A: IntoIterator<Item = S>,
    S: AsRef<std::ffi::OsStr>,
{
    let program = program.as_ref();

    let mut command = Command::new(program);
    command.args(args);
    for (key, value) in envs {
        command.env(key, value);
    }

    // `output()` waits for exit and drains both pipes to EOF, so the
    // exactly-once completion the caller delivers can never race a
    // still-writing child.
    let output = match command.output() {
        Ok(output) => output,
        Err(source) => {
            let err = InvokeError::Launch {
                program: program.to_path_buf(),
                source,
            };
            tracing::warn!(error = %err, "Subprocess launch failed");
            return CommandResult::launch_failed();
        }
    };

    let stdout = decode_stream(output.stdout, "stdout");
    let stderr = decode_stream(output.stderr, "stderr");
    let status = output.status.code();

    if !output.status.success() {
        let err = InvokeError::NonZeroExit { code: status };
        tracing::warn!(program = %program.display(), error = %err, "Subprocess exit status");
    }

    CommandResult {
        stdout,
        stderr,
        status,
    }
}

/// Decode captured bytes as UTF-8, logging and returning `None` on failure.
fn decode_stream(bytes: Vec<u8>, stream: &'static str) -> Option<String> {
    match String::from_utf8(bytes) {
        Ok(text) => Some(text),
        Err(_) => {
            let err = InvokeError::OutputDecode { stream };
            tracing::warn!(error = %err, "Stream decode failed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(unix)]
    fn test_captures_stdout() {
        let result = run_command("/bin/echo", ["hello"], &[]);
        assert_eq!(result.stdout.as_deref(), Some("hello\n"));
        assert_eq!(result.status, Some(0));
    }

    #[test]
    #[cfg(unix)]
    fn test_env_override_is_visible_to_child() {
        let result = run_command(
            "/bin/sh",
            ["-c", "printf '%s' \"$SYMDROP_TEST_VAR\""],
            &[("SYMDROP_TEST_VAR".to_string(), "x1".to_string())],
        );
        assert_eq!(result.stdout.as_deref(), Some("x1"));
    }

    #[test]
    #[cfg(unix)]
    fn test_nonzero_exit_still_captures_streams() {
        let result = run_command("/bin/sh", ["-c", "echo out; echo err 1>&2; exit 3"], &[]);
        assert_eq!(result.stdout.as_deref(), Some("out\n"));
        assert_eq!(result.stderr.as_deref(), Some("err\n"));
        assert_eq!(result.status, Some(3));
    }

    #[test]
    fn test_launch_failure_yields_absent_streams() {
        let result = run_command("/nonexistent/symdrop-test-binary", ["x"], &[]);
        assert!(result.stdout.is_none());
        assert!(result.stderr.is_none());
        assert!(result.status.is_none());
    }

    #[test]
    #[cfg(unix)]
    fn test_undecodable_stdout_is_absent() {
        // \xff\xfe is not valid UTF-8.
        let result = run_command("/bin/sh", ["-c", "printf '\\377\\376'"], &[]);
        assert!(result.stdout.is_none());
        assert_eq!(result.status, Some(0));
    }
}
