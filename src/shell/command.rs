//! External program execution.
//!
//! Fact providers shell out to host tools (`netstat`, `net session`, the
//! companion tool itself). Every invocation here is non-interactive: stdin is
//! closed, output is captured, no console window is created on Windows, and
//! the wait is bounded by [`CommandOptions::timeout`].

use crate::error::{PreinstallError, Result};
use std::io::Read;
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

/// Interval between exit polls while waiting on a child.
const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Result of executing an external program.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether command succeeded (exit code 0).
    pub success: bool,
}

impl CommandResult {
    /// Create a success result.
    pub fn success(stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            exit_code: Some(0),
            stdout,
            stderr,
            duration,
            success: true,
        }
    }

    /// Create a failure result.
    pub fn failure(
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
        duration: Duration,
    ) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            duration,
            success: false,
        }
    }
}

/// Options for program execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Timeout (None = wait for exit).
    pub timeout: Option<Duration>,
}

impl CommandOptions {
    /// Options with only a timeout set.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
        }
    }
}

/// Run `program` with `args` directly (no shell), capturing its output.
///
/// Returns `CommandFailed` when the program cannot be started and
/// `CommandTimedOut` when it outlives `options.timeout`; in the latter case
/// the child is killed before returning.
pub fn run_program(program: &str, args: &[&str], options: &CommandOptions) -> Result<CommandResult> {
    let shown = display_command(program, args);
    let start = Instant::now();

    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    hide_window(&mut cmd);

    tracing::debug!("Running: {}", shown);

    let mut child = cmd.spawn().map_err(|e| {
        tracing::debug!("Failed to start {}: {}", program, e);
        PreinstallError::CommandFailed {
            command: shown.clone(),
            code: None,
        }
    })?;

    // Drain pipes on their own threads so a chatty child cannot block on a
    // full pipe while we poll for exit.
    let stdout_handle = spawn_reader(child.stdout.take());
    let stderr_handle = spawn_reader(child.stderr.take());

    let status = match wait_with_deadline(&mut child, options.timeout, start)? {
        Some(status) => status,
        None => {
            let _ = child.kill();
            let _ = child.wait();
            let timeout = options.timeout.unwrap_or_default();
            tracing::warn!("{} timed out after {:?}", shown, timeout);
            return Err(PreinstallError::CommandTimedOut {
                command: shown,
                timeout,
            });
        }
    };

    let stdout = stdout_handle.join().unwrap_or_default();
    let stderr = stderr_handle.join().unwrap_or_default();
    let duration = start.elapsed();

    if status.success() {
        Ok(CommandResult::success(stdout, stderr, duration))
    } else {
        Ok(CommandResult::failure(status.code(), stdout, stderr, duration))
    }
}

fn wait_with_deadline(
    child: &mut Child,
    timeout: Option<Duration>,
    start: Instant,
) -> Result<Option<std::process::ExitStatus>> {
    let Some(timeout) = timeout else {
        return Ok(Some(child.wait()?));
    };

    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if start.elapsed() >= timeout {
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL);
    }
}

fn spawn_reader<R>(pipe: Option<R>) -> thread::JoinHandle<String>
where
    R: Read + Send + 'static,
{
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buf);
        }
        String::from_utf8_lossy(&buf).to_string()
    })
}

fn display_command(program: &str, args: &[&str]) -> String {
    if args.is_empty() {
        program.to_string()
    } else {
        format!("{} {}", program, args.join(" "))
    }
}

#[cfg(windows)]
fn hide_window(cmd: &mut Command) {
    use std::os::windows::process::CommandExt;
    const CREATE_NO_WINDOW: u32 = 0x0800_0000;
    cmd.creation_flags(CREATE_NO_WINDOW);
}

#[cfg(not(windows))]
fn hide_window(_cmd: &mut Command) {}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn run_program_captures_stdout() {
        let result = run_program("echo", &["hello"], &CommandOptions::default()).unwrap();

        assert!(result.success);
        assert_eq!(result.exit_code, Some(0));
        assert!(result.stdout.contains("hello"));
    }

    #[test]
    fn run_program_reports_failure_exit_code() {
        let result = run_program("sh", &["-c", "exit 3"], &CommandOptions::default()).unwrap();

        assert!(!result.success);
        assert_eq!(result.exit_code, Some(3));
    }

    #[test]
    fn run_program_captures_stderr() {
        let result =
            run_program("sh", &["-c", "echo oops >&2"], &CommandOptions::default()).unwrap();

        assert!(result.stderr.contains("oops"));
    }

    #[test]
    fn run_program_missing_binary_is_command_failed() {
        let err = run_program(
            "definitely-not-a-real-binary-7f3a",
            &["--version"],
            &CommandOptions::default(),
        )
        .unwrap_err();

        assert!(matches!(err, PreinstallError::CommandFailed { code: None, .. }));
    }

    #[test]
    fn run_program_times_out_and_kills_child() {
        let options = CommandOptions::with_timeout(Duration::from_millis(200));
        let start = Instant::now();

        let err = run_program("sleep", &["10"], &options).unwrap_err();

        assert!(matches!(err, PreinstallError::CommandTimedOut { .. }));
        assert!(err.to_string().contains("200ms"));
        assert!(start.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn command_result_tracks_duration() {
        let result = run_program("echo", &["fast"], &CommandOptions::default()).unwrap();
        assert!(result.duration.as_millis() < 5000);
    }

    #[test]
    fn display_command_joins_args() {
        assert_eq!(display_command("netstat", &["-an", "-p", "TCP"]), "netstat -an -p TCP");
        assert_eq!(display_command("whoami", &[]), "whoami");
    }
}
