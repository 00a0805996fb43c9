//! Running external programs with captured output and an optional deadline

use std::io::Read;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::error::{Result, RiggerError};

const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Captured result of a finished process
#[derive(Debug)]
pub struct Output {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl Output {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// stdout followed by stderr, as shown to the user on failure
    pub fn combined_log(&self) -> String {
        let mut log = self.stdout.trim_end().to_string();
        let stderr = self.stderr.trim_end();
        if !stderr.is_empty() {
            if !log.is_empty() {
                log.push('\n');
            }
            log.push_str(stderr);
        }
        log
    }
}

/// Human-readable rendering of a command for diagnostics
pub fn describe(cmd: &Command) -> String {
    let mut parts = vec![cmd.get_program().to_string_lossy().into_owned()];
    parts.extend(cmd.get_args().map(|a| a.to_string_lossy().into_owned()));
    parts.join(" ")
}

/// Run `cmd` to completion, capturing stdout and stderr.
///
/// With `timeout` set the child is killed once the deadline passes and
/// [`RiggerError::Timeout`] is returned. Spawn failures are returned as the
/// raw `io::Error` so callers can tell "no such program" apart.
pub fn run(cmd: &mut Command, timeout: Option<Duration>) -> std::io::Result<Result<Output>> {
    let mut child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    let stdout = drain(child.stdout.take());
    let stderr = drain(child.stderr.take());

    let status = match timeout {
        None => child.wait()?,
        Some(limit) => match wait_until(&mut child, Instant::now() + limit)? {
            Some(status) => status,
            None => {
                let _ = child.kill();
                let _ = child.wait();
                return Ok(Err(RiggerError::Timeout {
                    command: describe(cmd),
                    seconds: limit.as_secs(),
                }));
            }
        },
    };

    Ok(Ok(Output {
        status,
        stdout: join(stdout),
        stderr: join(stderr),
    }))
}

fn wait_until(child: &mut Child, deadline: Instant) -> std::io::Result<Option<ExitStatus>> {
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if Instant::now() >= deadline {
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL);
    }
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Option<JoinHandle<String>> {
    pipe.map(|mut pipe| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = pipe.read_to_end(&mut buf);
            String::from_utf8_lossy(&buf).into_owned()
        })
    })
}

fn join(handle: Option<JoinHandle<String>>) -> String {
    handle
        .and_then(|h| h.join().ok())
        .unwrap_or_default()
}
