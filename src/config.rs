use std::env;
use std::path::PathBuf;

use crate::manifest::DEFAULT_MANIFEST_TOOL;

/// Environment variable names
pub const ENV_OVERLAY_ROOT: &str = "OVERLAY_ROOT";
pub const ENV_MANIFEST_TOOL: &str = "EBUILD_RENAME_MANIFEST_TOOL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub overlay_root: Option<PathBuf>,
    pub manifest_tool: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            overlay_root: None,
            manifest_tool: DEFAULT_MANIFEST_TOOL.to_string(),
        }
    }
}

impl Config {
    /// Prefer an explicit overlay path (from the command line) over the environment
    pub fn with_overlay_override(mut self, overlay: Option<PathBuf>) -> Self {
        if let Some(path) = overlay {
            self.overlay_root = Some(path);
        }
        self
    }
}

/// Load configuration from environment variables
///
/// - `OVERLAY_ROOT`: path to the overlay being edited
/// - `EBUILD_RENAME_MANIFEST_TOOL`: manifest program (default `pkgdev`)
///
/// These can be set in a `.env` file in the working directory.
pub fn config_from_env() -> Config {
    let overlay_root = env::var_os(ENV_OVERLAY_ROOT)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from);

    let manifest_tool = env::var(ENV_MANIFEST_TOOL)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_MANIFEST_TOOL.to_string());

    Config {
        overlay_root,
        manifest_tool,
    }
}
