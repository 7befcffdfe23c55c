//! Executable resolution for external encoders.

use std::env;

/// Where to find an encoder executable.
///
/// `override_path` replaces the bare tool name verbatim. When it is unset
/// the tool name is resolved through `PATH` at spawn time.
///
/// The override names one executable. It is not run through a shell or
/// split on whitespace, so a wrapper command such as `wine basisu.exe` is
/// looked up as a single program name and fails to start; point the
/// override at a wrapper script instead.
///
/// # Example
///
/// ```
/// use texpack::config::ToolConfig;
///
/// let default = ToolConfig::default();
/// assert_eq!(default.resolve("toktx"), "toktx");
///
/// let pinned = ToolConfig::with_override_path("/opt/ktx/bin/toktx");
/// assert_eq!(pinned.resolve("toktx"), "/opt/ktx/bin/toktx");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolConfig {
    pub override_path: Option<String>,
}

impl ToolConfig {
    /// Tool config pinned to an explicit executable.
    pub fn with_override_path(path: impl Into<String>) -> Self {
        Self {
            override_path: Some(path.into()),
        }
    }

    /// Read the override from an environment variable.
    ///
    /// An unset or empty variable means no override.
    pub fn from_env(var: &str) -> Self {
        Self {
            override_path: env::var(var).ok().filter(|value| !value.is_empty()),
        }
    }

    /// Use `fallback`'s override when this config has none.
    pub fn or(self, fallback: ToolConfig) -> Self {
        Self {
            override_path: self.override_path.or(fallback.override_path),
        }
    }

    /// The program to execute for `tool_name`.
    pub fn resolve<'a>(&'a self, tool_name: &'a str) -> &'a str {
        self.override_path.as_deref().unwrap_or(tool_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::{version_command, Backend};

    #[test]
    fn test_override_is_one_program_not_a_command_string() {
        let tool = ToolConfig::with_override_path("wine basisu.exe");
        let cmd = version_command(Backend::Basisu, &tool);

        assert_eq!(cmd.program(), "wine basisu.exe");
        assert_eq!(cmd.get_args(), ["-version"]);
    }

    #[test]
    fn test_resolve_bare_name() {
        let tool = ToolConfig::default();
        assert_eq!(tool.resolve("basisu"), "basisu");
    }

    #[test]
    fn test_resolve_override_verbatim() {
        let tool = ToolConfig::with_override_path("/usr/local/bin/basisu-1.16");
        assert_eq!(tool.resolve("basisu"), "/usr/local/bin/basisu-1.16");
    }

    #[test]
    fn test_from_env_unset() {
        let tool = ToolConfig::from_env("TEXPACK_TEST_SURELY_UNSET_VARIABLE");
        assert_eq!(tool.override_path, None);
    }

    #[test]
    fn test_from_env_set() {
        // unique name, no other test touches it
        env::set_var("TEXPACK_TEST_TOOL_CONFIG_FROM_ENV", "/opt/toktx");
        let tool = ToolConfig::from_env("TEXPACK_TEST_TOOL_CONFIG_FROM_ENV");
        assert_eq!(tool.override_path.as_deref(), Some("/opt/toktx"));
        env::remove_var("TEXPACK_TEST_TOOL_CONFIG_FROM_ENV");
    }

    #[test]
    fn test_from_env_empty_is_unset() {
        env::set_var("TEXPACK_TEST_TOOL_CONFIG_EMPTY", "");
        let tool = ToolConfig::from_env("TEXPACK_TEST_TOOL_CONFIG_EMPTY");
        assert_eq!(tool.override_path, None);
        env::remove_var("TEXPACK_TEST_TOOL_CONFIG_EMPTY");
    }

    #[test]
    fn test_or_precedence() {
        let env = ToolConfig::with_override_path("/env/basisu");
        let file = ToolConfig::with_override_path("/file/basisu");

        assert_eq!(env.clone().or(file.clone()), env);
        assert_eq!(ToolConfig::default().or(file.clone()), file);
        assert_eq!(
            ToolConfig::default().or(ToolConfig::default()),
            ToolConfig::default()
        );
    }
}
