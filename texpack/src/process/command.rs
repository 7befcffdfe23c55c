//! Command lines, stream policies and exit statuses.

use std::fmt;
use std::path::Path;

/// A program and its arguments, executed without a shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    program: String,
    args: Vec<String>,
}

impl CommandLine {
    /// Start a command line for `program`.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append a path argument.
    pub fn path_arg(self, path: &Path) -> Self {
        self.arg(path.to_string_lossy())
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// Value following `flag` in the argument list, if any.
    pub fn value_of(&self, flag: &str) -> Option<&str> {
        self.args
            .iter()
            .position(|arg| arg == flag)
            .and_then(|i| self.args.get(i + 1))
            .map(String::as_str)
    }

    /// True if `flag` appears as an argument.
    pub fn has_arg(&self, flag: &str) -> bool {
        self.args.iter().any(|arg| arg == flag)
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Which standard streams of the child are discarded.
///
/// Streams that are not suppressed are inherited from this process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamPolicy {
    pub suppress_stdout: bool,
    pub suppress_stderr: bool,
}

impl StreamPolicy {
    /// Discard both streams.
    pub const SILENT: Self = Self {
        suppress_stdout: true,
        suppress_stderr: true,
    };

    /// Discard stdout, keep tool errors visible.
    pub const ERRORS_ONLY: Self = Self {
        suppress_stdout: true,
        suppress_stderr: false,
    };

    /// Inherit both streams.
    pub const INHERIT: Self = Self {
        suppress_stdout: false,
        suppress_stderr: false,
    };
}

/// Outcome of running an external process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessStatus {
    /// The process ran to completion with this exit code.
    Exited(i32),
    /// The process was terminated without an exit code (e.g. by a signal).
    Terminated,
    /// The process could not be started.
    SpawnFailed(String),
}

impl ProcessStatus {
    /// True only for a zero exit code.
    pub fn success(&self) -> bool {
        matches!(self, ProcessStatus::Exited(0))
    }
}

impl fmt::Display for ProcessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessStatus::Exited(code) => write!(f, "{}", code),
            ProcessStatus::Terminated => write!(f, "terminated"),
            ProcessStatus::SpawnFailed(reason) => write!(f, "failed to start: {}", reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_display_joins_program_and_args() {
        let cmd = CommandLine::new("basisu").args(["-q", "128"]).arg("-mipmap");
        assert_eq!(cmd.to_string(), "basisu -q 128 -mipmap");
    }

    #[test]
    fn test_display_without_args() {
        assert_eq!(CommandLine::new("toktx").to_string(), "toktx");
    }

    #[test]
    fn test_path_arg() {
        let path = PathBuf::from("/tmp/in.png");
        let cmd = CommandLine::new("tool").path_arg(&path);
        assert_eq!(cmd.get_args(), &["/tmp/in.png".to_string()]);
    }

    #[test]
    fn test_value_of() {
        let cmd = CommandLine::new("basisu").args(["-file", "a.png", "-output_file", "a.basis"]);
        assert_eq!(cmd.value_of("-file"), Some("a.png"));
        assert_eq!(cmd.value_of("-output_file"), Some("a.basis"));
        assert_eq!(cmd.value_of("-q"), None);
    }

    #[test]
    fn test_value_of_trailing_flag() {
        let cmd = CommandLine::new("t").arg("-x");
        assert_eq!(cmd.value_of("-x"), None);
        assert!(cmd.has_arg("-x"));
    }

    #[test]
    fn test_status_success() {
        assert!(ProcessStatus::Exited(0).success());
        assert!(!ProcessStatus::Exited(1).success());
        assert!(!ProcessStatus::Terminated.success());
        assert!(!ProcessStatus::SpawnFailed("not found".into()).success());
    }

    #[test]
    fn test_status_display() {
        assert_eq!(ProcessStatus::Exited(2).to_string(), "2");
        assert_eq!(ProcessStatus::Terminated.to_string(), "terminated");
        assert_eq!(
            ProcessStatus::SpawnFailed("No such file".into()).to_string(),
            "failed to start: No such file"
        );
    }
}
