//! Encoder availability probe.

use tracing::{debug, info};

use super::Backend;
use crate::config::ToolConfig;
use crate::process::{CommandLine, ProcessRunner};

/// Build the version query for `backend`.
pub fn version_command(backend: Backend, tool: &ToolConfig) -> CommandLine {
    CommandLine::new(tool.resolve(backend.tool_name())).arg(backend.version_flag())
}

/// Check whether an encoder can be run.
///
/// Runs the tool's version query with all output discarded and reports
/// whether it exited with status 0. A missing executable is simply
/// `false`; nothing is escalated.
pub fn is_encoder_available(
    backend: Backend,
    tool: &ToolConfig,
    runner: &dyn ProcessRunner,
    verbose: bool,
) -> bool {
    let command = version_command(backend, tool);
    let status = runner.probe(&command);

    if verbose {
        info!("{} => {}", command, status);
    } else {
        debug!(command = %command, status = %status, "Probed encoder");
    }

    status.success()
}
