//! Child process execution with bounded waits.
//!
//! Processes are started through `duct` with stdout and stderr redirected
//! into `os_pipe` pipes. Each pipe is drained by its own reader thread that
//! forwards chunks over a channel, so a chatty child can never block on a
//! full pipe buffer. Polling only reaps the direct child and never joins the
//! readers: a background process that inherits the pipes and outlives the
//! child costs at most [`DRAIN_GRACE`] before the output read so far is
//! returned.
//!
//! The wait loop does not observe cancellation. Callers that need to cancel
//! drive [`RunningProcess::try_finish`] themselves and call
//! [`RunningProcess::kill`]. Dropping a [`RunningProcess`] kills a child that
//! is still alive, so every exit path tears the process down.

// Standard library
use std::ffi::{OsStr, OsString};
use std::io::{self, Read};
use std::mem;
use std::path::Path;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::{Duration, Instant};

// External crates
use cw_messages::{msg, MESSAGES};
use duct::{cmd, Handle};
use tracing::{debug, warn};

// Internal imports
use crate::error::{CwError, Result};

/// Flags whose following argument is a secret and must not be logged.
const SENSITIVE_FLAGS: &[&str] = &["--password", "--accesstoken"];

/// How long output is still collected once the child has exited.
pub const DRAIN_GRACE: Duration = Duration::from_millis(500);

const READ_CHUNK: usize = 8 * 1024;

/// Polling interval and iteration budget for one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitPolicy {
    pub interval: Duration,
    pub max_iterations: u32,
}

impl WaitPolicy {
    /// Status queries and other commands that should answer quickly.
    pub const QUICK: WaitPolicy = WaitPolicy::new(Duration::from_millis(250), 120);
    /// Connection, template and registry management.
    pub const STANDARD: WaitPolicy = WaitPolicy::new(Duration::from_millis(500), 240);
    /// Install, start and project creation, which may pull images or build.
    pub const LONG: WaitPolicy = WaitPolicy::new(Duration::from_secs(1), 600);

    pub const fn new(interval: Duration, max_iterations: u32) -> Self {
        Self {
            interval,
            max_iterations,
        }
    }

    /// Total time the policy allows before giving up.
    pub fn budget(&self) -> Duration {
        self.interval.saturating_mul(self.max_iterations)
    }
}

/// Captured outcome of a finished process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessResult {
    /// Exit code, or -1 when the process was ended by a signal
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessResult {
    pub fn new(exit_code: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            exit_code,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Best available description of a failure: stderr, then stdout, then
    /// a generic "exited with code N".
    pub fn error_message(&self) -> String {
        let stderr = self.stderr.trim();
        if !stderr.is_empty() {
            return stderr.to_string();
        }
        let stdout = self.stdout.trim();
        if !stdout.is_empty() {
            return stdout.to_string();
        }
        msg!(MESSAGES.cli.exited_with_code, code = self.exit_code.to_string())
    }
}

/// Render a command line for logs and error messages, masking secrets.
pub fn display_command<A: AsRef<OsStr>>(program: &Path, args: &[A]) -> String {
    let mut parts = vec![program.display().to_string()];
    let mut mask_next = false;
    for arg in args {
        let arg = arg.as_ref().to_string_lossy();
        if mask_next {
            parts.push("********".to_string());
            mask_next = false;
            continue;
        }
        mask_next = SENSITIVE_FLAGS.contains(&arg.as_ref());
        parts.push(arg.into_owned());
    }
    parts.join(" ")
}

#[derive(Debug, Clone, Copy)]
enum Stream {
    Stdout,
    Stderr,
}

enum Chunk {
    Data(Stream, Vec<u8>),
    Closed,
}

fn spawn_reader(
    stream: Stream,
    mut reader: os_pipe::PipeReader,
    sender: Sender<Chunk>,
) -> io::Result<()> {
    thread::Builder::new()
        .name(format!("cwctl-{stream:?}").to_lowercase())
        .spawn(move || {
            let mut buf = vec![0u8; READ_CHUNK];
            loop {
                match reader.read(&mut buf) {
                    Ok(0) => break,
                    Ok(n) => {
                        if sender.send(Chunk::Data(stream, buf[..n].to_vec())).is_err() {
                            return;
                        }
                    }
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                    Err(_) => break,
                }
            }
            let _ = sender.send(Chunk::Closed);
        })?;
    Ok(())
}

fn spawn_error(command_line: &str, err: io::Error) -> CwError {
    let message = msg!(
        MESSAGES.cli.spawn_failed,
        command = command_line,
        error = err.to_string()
    );
    warn!("{}", message);
    CwError::Spawn(message)
}

/// Start `program` with `args`, inheriting the parent environment plus `env`.
pub fn start<A: AsRef<OsStr>>(
    program: &Path,
    args: &[A],
    env: &[(OsString, OsString)],
) -> Result<RunningProcess> {
    let command_line = display_command(program, args);
    debug!(command = %command_line, "starting process");

    let (stdout_reader, stdout_writer) =
        os_pipe::pipe().map_err(|e| spawn_error(&command_line, e))?;
    let (stderr_reader, stderr_writer) =
        os_pipe::pipe().map_err(|e| spawn_error(&command_line, e))?;

    let (sender, output) = mpsc::channel();
    spawn_reader(Stream::Stdout, stdout_reader, sender.clone())
        .and_then(|()| spawn_reader(Stream::Stderr, stderr_reader, sender))
        .map_err(|e| spawn_error(&command_line, e))?;

    let argv: Vec<OsString> = args.iter().map(|a| a.as_ref().to_os_string()).collect();
    let mut expression = cmd(program.as_os_str(), argv);
    for (key, value) in env {
        expression = expression.env(key, value);
    }

    // The write ends live only in this expression chain and close when it
    // is dropped, leaving the child as their sole holder.
    let handle = expression
        .stdin_null()
        .stdout_file(stdout_writer)
        .stderr_file(stderr_writer)
        .unchecked()
        .start()
        .map_err(|e| spawn_error(&command_line, e))?;
    debug!(command = %command_line, pids = ?handle.pids(), "process started");

    Ok(RunningProcess {
        handle: Some(handle),
        output,
        open_streams: 2,
        stdout: Vec::new(),
        stderr: Vec::new(),
        command_line,
    })
}

/// Start a process and wait for it under `policy`.
pub fn run<A: AsRef<OsStr>>(
    program: &Path,
    args: &[A],
    env: &[(OsString, OsString)],
    policy: WaitPolicy,
) -> Result<ProcessResult> {
    start(program, args, env)?.wait(policy)
}

/// A child process owned by exactly one invocation.
pub struct RunningProcess {
    handle: Option<Handle>,
    output: Receiver<Chunk>,
    open_streams: usize,
    stdout: Vec<u8>,
    stderr: Vec<u8>,
    command_line: String,
}

impl RunningProcess {
    /// The (secret-masked) command line this process was started with.
    pub fn command_line(&self) -> &str {
        &self.command_line
    }

    /// Check once whether the process has exited. Returns the result if so.
    ///
    /// Blocks for at most [`DRAIN_GRACE`], and only after the child has
    /// exited while something else still holds its output open.
    pub fn try_finish(&mut self) -> Result<Option<ProcessResult>> {
        self.collect_available();

        let Some(handle) = self.handle.as_ref() else {
            return Err(CwError::Internal(format!(
                "process already reaped: {}",
                self.command_line
            )));
        };

        let exit_code = match handle.try_wait() {
            Ok(Some(output)) => output.status.code().unwrap_or(-1),
            Ok(None) => return Ok(None),
            Err(e) => {
                let message = msg!(
                    MESSAGES.cli.wait_failed,
                    command = self.command_line.as_str(),
                    error = e.to_string()
                );
                warn!("{}", message);
                return Err(CwError::Spawn(message));
            }
        };
        self.handle = None;

        self.collect_until(Instant::now() + DRAIN_GRACE);
        if self.open_streams > 0 {
            warn!(
                command = %self.command_line,
                "output still held open after exit, returning what was read"
            );
        }

        let result = ProcessResult {
            exit_code,
            stdout: String::from_utf8_lossy(&mem::take(&mut self.stdout)).into_owned(),
            stderr: String::from_utf8_lossy(&mem::take(&mut self.stderr)).into_owned(),
        };
        debug!(
            command = %self.command_line,
            exit_code = result.exit_code,
            "process finished"
        );
        Ok(Some(result))
    }

    /// Poll every `policy.interval` for at most `policy.max_iterations`
    /// rounds. On timeout the process is killed and `CwError::Timeout`
    /// is returned.
    pub fn wait(mut self, policy: WaitPolicy) -> Result<ProcessResult> {
        for _ in 0..policy.max_iterations {
            if let Some(result) = self.try_finish()? {
                return Ok(result);
            }
            thread::sleep(policy.interval);
        }

        // One last look so a process that exited during the final sleep
        // is not reported as timed out.
        if let Some(result) = self.try_finish()? {
            return Ok(result);
        }

        let budget = policy.budget();
        let message = msg!(
            MESSAGES.cli.timed_out,
            budget = format!("{budget:?}"),
            command = self.command_line.as_str()
        );
        warn!("{}", message);
        if let Err(e) = self.kill() {
            warn!(command = %self.command_line, error = %e, "failed to kill timed out process");
        }
        Err(CwError::Timeout { budget, message })
    }

    /// Forcibly terminate the process. A no-op once it has been reaped.
    pub fn kill(&mut self) -> Result<()> {
        if let Some(handle) = self.handle.take() {
            debug!(command = %self.command_line, "killing process");
            handle.kill()?;
        }
        Ok(())
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_none()
    }

    fn collect(&mut self, chunk: Chunk) {
        match chunk {
            Chunk::Data(Stream::Stdout, bytes) => self.stdout.extend_from_slice(&bytes),
            Chunk::Data(Stream::Stderr, bytes) => self.stderr.extend_from_slice(&bytes),
            Chunk::Closed => self.open_streams = self.open_streams.saturating_sub(1),
        }
    }

    fn collect_available(&mut self) {
        while let Ok(chunk) = self.output.try_recv() {
            self.collect(chunk);
        }
    }

    fn collect_until(&mut self, deadline: Instant) {
        while self.open_streams > 0 {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.output.recv_timeout(remaining) {
                Ok(chunk) => self.collect(chunk),
                Err(_) => break,
            }
        }
    }
}

impl Drop for RunningProcess {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            if matches!(handle.try_wait(), Ok(None)) {
                let _ = handle.kill();
            }
        }
    }
}
