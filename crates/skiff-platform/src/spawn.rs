//! Detached process spawning and child reaping.
//!
//! Helpers (prompt, download, new windows) run as children of this
//! process but in their own process group, so terminal signals aimed
//! at the shell do not reach them. A background reaper collects their
//! exit statuses as they arrive instead of leaving zombies behind.

use skiff_common::PlatformError;
use tracing::{debug, warn};

/// Launch `argv` detached from the shell's controlling flow.
///
/// The child gets a null stdin and its own process group; stdout and
/// stderr are inherited so helper diagnostics stay visible. The shell
/// never waits on the child directly, the reaper collects it.
pub fn spawn(argv: &[String]) -> Result<(), PlatformError> {
    let (program, args) = argv
        .split_first()
        .ok_or_else(|| PlatformError::Spawn("empty command".into()))?;

    let mut command = std::process::Command::new(program);
    command.args(args).stdin(std::process::Stdio::null());

    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        command.process_group(0);
    }

    let child = command
        .spawn()
        .map_err(|e| PlatformError::Spawn(format!("failed to spawn {program}: {e}")))?;
    debug!("spawned {program} (pid {})", child.id());
    Ok(())
}

#[cfg(unix)]
pub use unix::ChildReaper;

#[cfg(unix)]
mod unix {
    use super::*;

    use signal_hook::consts::SIGCHLD;
    use signal_hook::iterator::Signals;

    /// Reaps terminated children off a dedicated SIGCHLD thread.
    ///
    /// Dropping the reaper closes the signal handle and joins the
    /// thread. Children still running at that point are abandoned to
    /// init, which is fine at process exit.
    pub struct ChildReaper {
        handle: signal_hook::iterator::Handle,
        thread: Option<std::thread::JoinHandle<()>>,
    }

    impl ChildReaper {
        pub fn install() -> Result<Self, PlatformError> {
            let mut signals = Signals::new([SIGCHLD])
                .map_err(|e| PlatformError::Reaper(format!("cannot register SIGCHLD: {e}")))?;
            let handle = signals.handle();

            let thread = std::thread::Builder::new()
                .name("child-reaper".into())
                .spawn(move || {
                    for _ in signals.forever() {
                        reap_exited();
                    }
                })
                .map_err(|e| PlatformError::Reaper(format!("cannot start reaper: {e}")))?;

            Ok(Self {
                handle,
                thread: Some(thread),
            })
        }
    }

    impl Drop for ChildReaper {
        fn drop(&mut self) {
            self.handle.close();
            if let Some(thread) = self.thread.take() {
                if thread.join().is_err() {
                    warn!("reaper thread panicked");
                }
            }
        }
    }

    /// Collect every child that has exited. One SIGCHLD can stand for
    /// several terminations, so loop until the queue is drained.
    fn reap_exited() {
        use nix::sys::wait::{waitpid, WaitPidFlag, WaitStatus};

        loop {
            match waitpid(None, Some(WaitPidFlag::WNOHANG)) {
                Ok(WaitStatus::Exited(pid, status)) => {
                    debug!("child {pid} exited with status {status}");
                }
                Ok(WaitStatus::Signaled(pid, signal, _)) => {
                    debug!("child {pid} killed by {signal:?}");
                }
                Ok(WaitStatus::StillAlive) | Err(_) => break,
                Ok(_) => {}
            }
        }
    }
}

#[cfg(not(unix))]
pub struct ChildReaper;

#[cfg(not(unix))]
impl ChildReaper {
    /// Non-unix targets have no zombie semantics; nothing to do.
    pub fn install() -> Result<Self, PlatformError> {
        Ok(Self)
    }
}
