//! Manifest regeneration through an external tool.

use std::collections::HashSet;
use std::path::Path;
use std::process::Command;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::progress::Progress;
use crate::rename::{ManifestUpdate, RenameMatch};

/// Default manifest program
pub const DEFAULT_MANIFEST_TOOL: &str = "pkgdev";

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Failed to run {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} failed ({status}): {stderr}")]
    Failed {
        tool: String,
        status: String,
        stderr: String,
    },
}

/// An external program that regenerates a package's Manifest
pub trait ManifestTool {
    fn name(&self) -> &str;

    /// Whether the program can be found at all
    fn is_available(&self) -> bool;

    /// Regenerate the Manifest in `package_dir`, downloading into `scratch_dir`
    fn regenerate(&self, package_dir: &Path, scratch_dir: &Path) -> Result<(), ManifestError>;
}

/// `pkgdev manifest`, run inside the package directory
#[derive(Debug, Clone)]
pub struct PkgdevManifest {
    program: String,
}

impl PkgdevManifest {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for PkgdevManifest {
    fn default() -> Self {
        Self::new(DEFAULT_MANIFEST_TOOL)
    }
}

impl ManifestTool for PkgdevManifest {
    fn name(&self) -> &str {
        &self.program
    }

    fn is_available(&self) -> bool {
        which::which(&self.program).is_ok()
    }

    fn regenerate(&self, package_dir: &Path, scratch_dir: &Path) -> Result<(), ManifestError> {
        debug!(program = %self.program, dir = ?package_dir, "Running manifest tool");

        let output = Command::new(&self.program)
            .arg("manifest")
            .arg("--distdir")
            .arg(scratch_dir)
            .current_dir(package_dir)
            .output()
            .map_err(|source| ManifestError::Spawn {
                tool: self.program.clone(),
                source,
            })?;

        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let stderr = if stderr.is_empty() {
            "no error output".to_string()
        } else {
            stderr
        };

        Err(ManifestError::Failed {
            tool: self.program.clone(),
            status: output.status.to_string(),
            stderr,
        })
    }
}

/// Regenerate the Manifest of every package touched by `renamed`.
///
/// Each package is processed once, in order. One shared scratch directory
/// serves every invocation and is removed before returning.
pub fn update_manifests<T: ManifestTool + ?Sized>(
    tool: &T,
    renamed: &[RenameMatch],
    progress: &mut Progress,
) -> Vec<ManifestUpdate> {
    let mut seen = HashSet::new();
    let packages: Vec<&RenameMatch> = renamed
        .iter()
        .filter(|m| seen.insert(m.package_key()))
        .collect();

    if packages.is_empty() {
        return Vec::new();
    }

    if !tool.is_available() {
        warn!(tool = %tool.name(), "Manifest tool not found, skipping manifest updates");
        let message = format!("{} not found in PATH", tool.name());
        return packages
            .iter()
            .map(|m| ManifestUpdate::failed(&m.category, &m.package, message.clone()))
            .collect();
    }

    let scratch = match tempfile::Builder::new()
        .prefix("ebuild-rename-distfiles-")
        .tempdir()
    {
        Ok(dir) => dir,
        Err(e) => {
            warn!(error = %e, "Cannot create scratch directory for manifest tool");
            let message = format!("failed to create scratch directory: {}", e);
            return packages
                .iter()
                .map(|m| ManifestUpdate::failed(&m.category, &m.package, message.clone()))
                .collect();
        }
    };

    let total = packages.len();
    let mut updates = Vec::with_capacity(total);

    for (i, m) in packages.iter().enumerate() {
        let atom = m.atom();
        progress.manifest_progress(i + 1, total, &atom);

        let outcome = match m.package_dir() {
            Some(dir) => tool.regenerate(dir, scratch.path()).map_err(|e| e.to_string()),
            None => Err("package directory unknown".to_string()),
        };

        match outcome {
            Ok(()) => {
                info!(package = %atom, "Manifest updated");
                updates.push(ManifestUpdate::succeeded(&m.category, &m.package));
            }
            Err(message) => {
                warn!(package = %atom, error = %message, "Manifest update failed");
                progress.warn(&format!("Manifest update failed for {}: {}", atom, message));
                updates.push(ManifestUpdate::failed(&m.category, &m.package, message));
            }
        }
    }

    if let Err(e) = scratch.close() {
        warn!(error = %e, "Failed to remove scratch directory");
    }

    updates
}
