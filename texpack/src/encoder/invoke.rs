//! Shared temp-file / process / read-back sequence for all backends.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use super::{Backend, EncodeError, EncodeJob, EncodeResult};
use crate::config::ToolConfig;
use crate::mime::extension_from_mime_type;
use crate::process::{CommandLine, ProcessRunner};
use crate::temp_file::ScopedTempFile;

/// Runs one backend's executable against scoped temporary files.
#[derive(Clone)]
pub(crate) struct ToolInvoker {
    backend: Backend,
    runner: Arc<dyn ProcessRunner>,
    tool: ToolConfig,
    temp_dir: Option<PathBuf>,
    verbose: bool,
}

impl ToolInvoker {
    pub(crate) fn new(backend: Backend, runner: Arc<dyn ProcessRunner>) -> Self {
        Self {
            backend,
            runner,
            tool: ToolConfig::default(),
            temp_dir: None,
            verbose: false,
        }
    }

    pub(crate) fn set_tool(&mut self, tool: ToolConfig) {
        self.tool = tool;
    }

    pub(crate) fn set_temp_dir(&mut self, dir: PathBuf) {
        self.temp_dir = Some(dir);
    }

    pub(crate) fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    pub(crate) fn tool(&self) -> &ToolConfig {
        &self.tool
    }

    /// Executable to run, after applying the override.
    pub(crate) fn program(&self) -> &str {
        self.tool.resolve(self.backend.tool_name())
    }

    pub(crate) fn is_available(&self) -> bool {
        super::is_encoder_available(self.backend, &self.tool, self.runner.as_ref(), self.verbose)
    }

    /// Encode `job` with the command produced by `build`.
    ///
    /// `build` receives the input and output temp file paths. Both files
    /// are removed before this returns, whatever the outcome.
    pub(crate) fn invoke<F>(&self, job: &EncodeJob<'_>, build: F) -> EncodeResult<Vec<u8>>
    where
        F: FnOnce(&Path, &Path) -> CommandLine,
    {
        let input = self.temp_file(extension_from_mime_type(job.mime_type()))?;
        let output = self.temp_file(&format!(".{}", self.backend.extension()))?;
        self.run_with_files(job, &input, &output, build)
    }

    /// Write, run and read back through already acquired temp files.
    fn run_with_files<F>(
        &self,
        job: &EncodeJob<'_>,
        input: &ScopedTempFile,
        output: &ScopedTempFile,
        build: F,
    ) -> EncodeResult<Vec<u8>>
    where
        F: FnOnce(&Path, &Path) -> CommandLine,
    {
        fs::write(input.path(), job.data()).map_err(|source| EncodeError::WriteInput {
            path: input.to_path_buf(),
            source,
        })?;

        let command = build(input.path(), output.path());
        let status = self.runner.run(&command, self.backend.stream_policy());

        if self.verbose {
            info!("{} => {}", command, status);
        } else {
            debug!(command = %command, status = %status, "Ran encoder");
        }

        if !status.success() {
            return Err(EncodeError::ProcessFailed {
                command: command.to_string(),
                status,
            });
        }

        fs::read(output.path()).map_err(|source| EncodeError::ReadOutput {
            path: output.to_path_buf(),
            source,
        })
    }

    fn temp_file(&self, extension: &str) -> EncodeResult<ScopedTempFile> {
        let file = match &self.temp_dir {
            Some(dir) => ScopedTempFile::new_in(dir, extension),
            None => ScopedTempFile::new(extension),
        };
        file.map_err(EncodeError::TempFile)
    }
}

impl std::fmt::Debug for ToolInvoker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolInvoker")
            .field("backend", &self.backend)
            .field("tool", &self.tool)
            .field("temp_dir", &self.temp_dir)
            .field("verbose", &self.verbose)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::{ProcessStatus, StreamPolicy};
    use std::sync::Mutex;
    use tempfile::TempDir;

    #[derive(Default)]
    struct RecordingRunner {
        calls: Mutex<Vec<CommandLine>>,
    }

    impl ProcessRunner for RecordingRunner {
        fn run(&self, command: &CommandLine, _streams: StreamPolicy) -> ProcessStatus {
            self.calls.lock().unwrap().push(command.clone());
            ProcessStatus::Exited(0)
        }
    }

    #[test]
    fn test_input_write_failure_spawns_nothing() {
        let dir = TempDir::new().unwrap();
        let runner = Arc::new(RecordingRunner::default());
        let invoker = ToolInvoker::new(Backend::Basisu, runner.clone());

        let input = ScopedTempFile::new_in(dir.path(), ".png").unwrap();
        let output = ScopedTempFile::new_in(dir.path(), ".basis").unwrap();
        // A directory at the input path makes the write fail.
        fs::remove_file(input.path()).unwrap();
        fs::create_dir(input.path()).unwrap();

        let job = EncodeJob::new(b"png", "image/png");
        let err = invoker
            .run_with_files(&job, &input, &output, |i, o| {
                CommandLine::new("basisu").path_arg(i).path_arg(o)
            })
            .unwrap_err();

        assert!(matches!(err, EncodeError::WriteInput { .. }));
        assert!(!err.process_started());
        assert!(runner.calls.lock().unwrap().is_empty());

        fs::remove_dir(input.path()).unwrap();
    }

    #[test]
    fn test_run_with_files_reads_back_output() {
        let dir = TempDir::new().unwrap();
        let runner = Arc::new(RecordingRunner::default());
        let invoker = ToolInvoker::new(Backend::Toktx, runner.clone());

        let input = ScopedTempFile::new_in(dir.path(), ".png").unwrap();
        let output = ScopedTempFile::new_in(dir.path(), ".ktx2").unwrap();
        fs::write(output.path(), b"KTX2").unwrap();

        let job = EncodeJob::new(b"png", "image/png");
        let encoded = invoker
            .run_with_files(&job, &input, &output, |i, o| {
                CommandLine::new("toktx").path_arg(o).path_arg(i)
            })
            .unwrap();

        assert_eq!(encoded, b"KTX2");
        assert_eq!(fs::read(input.path()).unwrap(), b"png");
        assert_eq!(runner.calls.lock().unwrap().len(), 1);
    }
}
