//! Process runner abstraction and the real implementation.

use std::process::{Command, Stdio};
use std::sync::Arc;

use tracing::trace;

use super::{CommandLine, ProcessStatus, StreamPolicy};

/// Runs external commands synchronously.
///
/// Implementations must be thread-safe so that encoders holding an
/// `Arc<dyn ProcessRunner>` can be shared between worker threads.
///
/// # Implementors
///
/// - [`SystemRunner`] - spawns real processes
/// - test doubles returning scripted statuses
pub trait ProcessRunner: Send + Sync {
    /// Run `command` to completion with the given stream policy.
    ///
    /// Failures to start or abnormal termination are reported through the
    /// returned status, never as a panic.
    fn run(&self, command: &CommandLine, streams: StreamPolicy) -> ProcessStatus;

    /// Run a quick availability check with all output discarded.
    fn probe(&self, command: &CommandLine) -> ProcessStatus {
        self.run(command, StreamPolicy::SILENT)
    }
}

impl<T: ProcessRunner + ?Sized> ProcessRunner for Arc<T> {
    fn run(&self, command: &CommandLine, streams: StreamPolicy) -> ProcessStatus {
        (**self).run(command, streams)
    }

    fn probe(&self, command: &CommandLine) -> ProcessStatus {
        (**self).probe(command)
    }
}

/// Spawns real processes through `std::process::Command`.
///
/// The program is looked up through `PATH` when it is a bare name. No
/// shell is involved, so paths with spaces need no quoting. Stdin is
/// always closed.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessRunner for SystemRunner {
    fn run(&self, command: &CommandLine, streams: StreamPolicy) -> ProcessStatus {
        let stdout = if streams.suppress_stdout {
            Stdio::null()
        } else {
            Stdio::inherit()
        };
        let stderr = if streams.suppress_stderr {
            Stdio::null()
        } else {
            Stdio::inherit()
        };

        trace!(command = %command, ?streams, "Spawning process");

        let result = Command::new(command.program())
            .args(command.get_args())
            .stdin(Stdio::null())
            .stdout(stdout)
            .stderr(stderr)
            .status();

        match result {
            Ok(status) => match status.code() {
                Some(code) => ProcessStatus::Exited(code),
                None => ProcessStatus::Terminated,
            },
            Err(e) => ProcessStatus::SpawnFailed(e.to_string()),
        }
    }
}
