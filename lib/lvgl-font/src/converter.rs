//! Construction and bounded execution of `lv_font_conv` invocations.

use std::{
    error,
    ffi::OsString,
    fmt, io,
    io::Read,
    path::PathBuf,
    process::{Command, Output, Stdio},
    sync::mpsc,
    thread,
    time::{Duration, Instant},
};

use crate::config::Bpp;

/// The wall-clock limit applied to a single converter invocation.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// The interval at which a running child is polled for completion.
const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Runs a [`Command`], capturing its output and killing it if it runs longer than `timeout`.
///
/// # Errors
///
/// - [`RunCommandError::ProcessError`]: Returned if an error occurred while launching or waiting
///   on the command.
/// - [`RunCommandError::CommandFailed`]: Returned if the command exited with a non-zero exit value.
/// - [`RunCommandError::TimedOut`]: Returned if the command did not exit, or its output was not
///   closed, within `timeout`.
pub fn run_cmd(mut cmd: Command, timeout: Duration) -> Result<Output, RunCommandError> {
    log::debug!("Running command: {cmd:?}");

    let mut child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    // Both pipes are drained concurrently so a chatty child cannot block on a full pipe.
    let (sender, receiver) = mpsc::channel();
    let mut pending = 0;
    if let Some(pipe) = child.stdout.take() {
        drain(pipe, Pipe::Stdout, sender.clone());
        pending += 1;
    }
    if let Some(pipe) = child.stderr.take() {
        drain(pipe, Pipe::Stderr, sender.clone());
        pending += 1;
    }
    drop(sender);

    let deadline = Instant::now() + timeout;
    let status = loop {
        if let Some(status) = child.try_wait()? {
            break status;
        }

        if Instant::now() >= deadline {
            // The child may exit between the poll and the kill.
            let _ = child.kill();
            let _ = child.wait();
            return Err(RunCommandError::TimedOut { timeout });
        }

        thread::sleep(POLL_INTERVAL);
    };

    // Processes spawned by the child inherit the pipes and can hold them open past its exit.
    let (stdout, stderr) = collect(&receiver, pending, deadline)?
        .ok_or(RunCommandError::TimedOut { timeout })?;
    if !status.success() {
        return Err(RunCommandError::CommandFailed {
            code: status.code(),
            stdout: String::from_utf8_lossy(&stdout).into_owned(),
            stderr: String::from_utf8_lossy(&stderr).into_owned(),
        });
    }

    Ok(Output {
        status,
        stdout,
        stderr,
    })
}

/// The output streams of a child process.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Pipe {
    /// Standard output.
    Stdout,
    /// Standard error.
    Stderr,
}

/// Reads `pipe` to completion on a helper thread, sending the result through `sender`.
fn drain<R: Read + Send + 'static>(
    mut pipe: R,
    kind: Pipe,
    sender: mpsc::Sender<(Pipe, io::Result<Vec<u8>>)>,
) {
    thread::spawn(move || {
        let mut buffer = Vec::new();
        let result = pipe.read_to_end(&mut buffer).map(|_| buffer);
        // The receiver is gone once the command has timed out.
        let _ = sender.send((kind, result));
    });
}

/// Waits until `pending` [`drain`] threads have reported or `deadline` passes.
///
/// Returns [`None`] if the deadline passed first, otherwise the standard output and standard
/// error contents. A pipe that was never drained is treated as empty.
fn collect(
    receiver: &mpsc::Receiver<(Pipe, io::Result<Vec<u8>>)>,
    pending: usize,
    deadline: Instant,
) -> io::Result<Option<(Vec<u8>, Vec<u8>)>> {
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();

    for _ in 0..pending {
        let remaining = deadline.saturating_duration_since(Instant::now());
        let (kind, result) = match receiver.recv_timeout(remaining) {
            Ok(message) => message,
            Err(mpsc::RecvTimeoutError::Timeout) => return Ok(None),
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                return Err(io::Error::other("output reader thread panicked"));
            }
        };

        match kind {
            Pipe::Stdout => stdout = result?,
            Pipe::Stderr => stderr = result?,
        }
    }

    Ok(Some((stdout, stderr)))
}

/// Various errors that can occur while running a command.
#[derive(Debug)]
pub enum RunCommandError {
    /// An error occurred while launching or waiting on the command.
    ProcessError(io::Error),
    /// The command exited with a non-zero exit code.
    CommandFailed {
        /// The exit code of the command.
        code: Option<i32>,
        /// Everything the command wrote to standard output.
        stdout: String,
        /// Everything the command wrote to standard error.
        stderr: String,
    },
    /// The command was killed after exceeding its time limit.
    TimedOut {
        /// The limit that was exceeded.
        timeout: Duration,
    },
}

impl From<io::Error> for RunCommandError {
    fn from(value: io::Error) -> Self {
        Self::ProcessError(value)
    }
}

impl fmt::Display for RunCommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ProcessError(error) => write!(f, "error launching command: {error}"),
            Self::CommandFailed {
                code: Some(code),
                stderr,
                ..
            } => write!(f, "command failed with exit status {code}: {}", stderr.trim()),
            Self::CommandFailed {
                code: None, stderr, ..
            } => write!(f, "command terminated by signal: {}", stderr.trim()),
            Self::TimedOut { timeout } => {
                write!(f, "command timed out after {} seconds", timeout.as_secs())
            }
        }
    }
}

impl error::Error for RunCommandError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::ProcessError(error) => Some(error),
            _ => None,
        }
    }
}

/// The `lv_font_conv` executable and the limits applied to running it.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct Converter {
    /// The program to launch.
    pub program: PathBuf,
    /// The wall-clock limit for a single conversion.
    pub timeout: Duration,
}

impl Converter {
    /// Creates a [`Converter`] launching `program` with the [`DEFAULT_TIMEOUT`].
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Replaces the limit applied to each conversion.
    #[must_use]
    pub fn with_timeout(self, timeout: Duration) -> Self {
        Self { timeout, ..self }
    }

    /// Builds the [`Command`] that performs `job`.
    pub fn command(&self, job: &ConversionJob) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(job.arguments());
        cmd
    }

    /// Runs the conversion described by `job`.
    ///
    /// # Errors
    ///
    /// Returns errors when `lv_font_conv` cannot be launched, exits unsuccessfully, or exceeds
    /// [`Converter::timeout`].
    pub fn convert(&self, job: &ConversionJob) -> Result<(), RunCommandError> {
        let output = run_cmd(self.command(job), self.timeout)?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        for line in stdout.lines().filter(|line| !line.trim().is_empty()) {
            log::debug!("lv_font_conv: {line}");
        }

        Ok(())
    }
}

/// The arguments of a single `lv_font_conv` run.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct ConversionJob {
    /// The TrueType font to rasterize.
    pub font_path: PathBuf,
    /// Pixel size of the font.
    pub size: u32,
    /// Bits per pixel of the glyph bitmaps.
    pub bpp: Bpp,
    /// Where the generated C source is written.
    pub output_path: PathBuf,
    /// The `-r` argument values, each a range (`0x20-0x7F`) or a list of code points.
    pub ranges: Vec<String>,
    /// Whether to pass `--no-compress`.
    pub no_compress: bool,
}

impl ConversionJob {
    /// Returns the command line arguments, excluding the program itself.
    pub fn arguments(&self) -> Vec<OsString> {
        let mut args = Vec::with_capacity(12 + 2 * self.ranges.len());

        args.push("--font".into());
        args.push(self.font_path.clone().into_os_string());
        args.push("--size".into());
        args.push(self.size.to_string().into());
        args.push("--bpp".into());
        args.push(self.bpp.as_str().into());
        args.push("--format".into());
        args.push("lvgl".into());
        args.push("--output".into());
        args.push(self.output_path.clone().into_os_string());

        for range in &self.ranges {
            args.push("-r".into());
            args.push(range.into());
        }

        if self.no_compress {
            args.push("--no-compress".into());
        }

        args
    }
}
