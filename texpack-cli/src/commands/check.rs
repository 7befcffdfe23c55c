//! `texpack check`: report which encoders can be run.

use console::style;
use texpack::config::ConfigFile;
use texpack::encoder::Backend;

use super::common::{build_encoder, BackendArg};
use crate::error::CliError;

/// Probe `backend`, or every backend when none is given.
///
/// Fails with the first unavailable backend when one was requested
/// explicitly; otherwise only reports.
pub fn run(backend: Option<BackendArg>, config: &ConfigFile, verbose: bool) -> Result<(), CliError> {
    let backends: Vec<Backend> = match backend {
        Some(arg) => vec![arg.into()],
        None => Backend::ALL.to_vec(),
    };

    let mut missing = None;
    for backend in backends {
        let encoder = build_encoder(backend, config, verbose);
        let tool = config.resolve_tool(backend);
        let program = tool.resolve(backend.tool_name());

        if encoder.is_available() {
            println!("{} {} ({})", style("✓").green(), encoder.name(), program);
        } else {
            println!("{} {} ({})", style("✗").red(), encoder.name(), program);
            missing.get_or_insert(backend);
        }
    }

    match (backend, missing) {
        (Some(_), Some(backend)) => Err(CliError::EncoderUnavailable(backend)),
        _ => Ok(()),
    }
}
