//! Lifecycle of the external companion process.
//!
//! The companion is a separate executable serving the two HTTP endpoints
//! the fetcher targets. The supervisor guarantees a single instance:
//! launch is idempotent, liveness is probed with `try_wait`, and shutdown
//! requests termination, waits a bounded 10 s, then force-kills. The
//! child's output is drained by background tasks and re-logged line by
//! line for diagnostics.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::{Child, Command};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::errors::NowPlayingError;

/// Bounded wait for the companion to exit after a termination request.
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(10);

/// Supervisor owning the (at most one) companion process instance.
///
/// When no executable is configured the supervisor is unmanaged: the
/// endpoint is assumed to be provided externally, liveness checks pass,
/// and launch/stop are no-ops.
#[derive(Debug)]
pub struct CompanionSupervisor {
    executable: Option<PathBuf>,
    child: Mutex<Option<Child>>,
}

impl CompanionSupervisor {
    pub fn new(executable: Option<PathBuf>) -> Self {
        CompanionSupervisor {
            executable,
            child: Mutex::new(None),
        }
    }

    /// True when a companion executable is configured at all.
    pub fn is_managed(&self) -> bool {
        self.executable.is_some()
    }

    /// True when the companion process is currently running.
    ///
    /// An unmanaged supervisor always reports alive. A child that exited
    /// is reaped here and its handle cleared.
    pub async fn is_alive(&self) -> bool {
        if !self.is_managed() {
            return true;
        }

        let mut guard = self.child.lock().await;
        match guard.as_mut() {
            None => false,
            Some(child) => match child.try_wait() {
                Ok(None) => true,
                Ok(Some(status)) => {
                    warn!("Companion process exited with {status}");
                    *guard = None;
                    false
                }
                Err(error) => {
                    warn!("Cannot probe companion process: {error}");
                    *guard = None;
                    false
                }
            },
        }
    }

    /// Launch the companion if it is not already running.
    ///
    /// Idempotent: a live child makes this a no-op. The executable is
    /// launched with no arguments, from its own directory.
    pub async fn launch(&self) -> Result<(), NowPlayingError> {
        let Some(executable) = self.executable.as_ref() else {
            return Err(NowPlayingError::CompanionNotConfigured);
        };

        let mut guard = self.child.lock().await;
        if let Some(child) = guard.as_mut()
            && matches!(child.try_wait(), Ok(None))
        {
            return Ok(());
        }

        if !executable.is_file() {
            return Err(NowPlayingError::CompanionNotFound(executable.clone()));
        }

        let mut command = Command::new(executable);
        if let Some(parent) = executable.parent() {
            command.current_dir(parent);
        }
        command
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = command
            .spawn()
            .map_err(|error| NowPlayingError::CompanionLaunch(error.to_string()))?;

        if let Some(stdout) = child.stdout.take() {
            spawn_log_reader(stdout, "stdout");
        }
        if let Some(stderr) = child.stderr.take() {
            spawn_log_reader(stderr, "stderr");
        }

        match child.id() {
            Some(pid) => info!("Companion process launched (pid {pid})"),
            None => info!("Companion process launched"),
        }
        *guard = Some(child);
        Ok(())
    }

    /// Stop the companion: request termination, wait up to 10 s, then
    /// force-kill. The handle is always cleared, so the call is idempotent
    /// and safe to repeat.
    pub async fn stop(&self) {
        let Some(mut child) = self.child.lock().await.take() else {
            return;
        };

        if let Err(error) = child.start_kill() {
            debug!("Companion termination request failed: {error}");
        }

        match tokio::time::timeout(SHUTDOWN_TIMEOUT, child.wait()).await {
            Ok(Ok(status)) => info!("Companion process stopped ({status})"),
            Ok(Err(error)) => warn!("Error while waiting for companion exit: {error}"),
            Err(_) => {
                warn!("Companion did not exit within 10s, force-killing");
                if let Err(error) = child.kill().await {
                    warn!("Force-kill failed: {error}");
                }
            }
        }
    }
}

/// Re-log every line the companion writes, until the stream closes.
fn spawn_log_reader<R>(stream: R, label: &'static str)
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut lines = BufReader::new(stream).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => info!(target: "companion", "[{label}] {line}"),
                Ok(None) => break,
                Err(error) => {
                    debug!("Companion {label} stream closed: {error}");
                    break;
                }
            }
        }
    });
}
