use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::detector::{detect_version_files, should_block_for_version_files};
use crate::manifest::{update_manifests, ManifestTool};
use crate::matcher::{EbuildMatcher, MatchError};
use crate::progress::Progress;
use crate::scanner::ScannerError;
use crate::validator::{validate_pattern, PatternError};

use super::types::{Conflict, RenameFailure, RenameOptions, RenameResult, RenameSpec, VersionFile};

/// Errors that stop a rename run before anything is modified
#[derive(Error, Debug)]
pub enum RenameError {
    #[error("Overlay root is not configured")]
    NotConfigured,

    #[error(transparent)]
    InvalidPattern(#[from] PatternError),

    #[error("Invalid {name} '{value}': {reason}")]
    InvalidArgument {
        name: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    #[error("Failed to scan category '{category}': {source}")]
    Scan {
        category: String,
        #[source]
        source: ScannerError,
    },

    #[error("Found {} version-specific file(s) that would not be renamed", files.len())]
    VersionFilesBlocked {
        files: Vec<VersionFile>,
        result: Box<RenameResult>,
    },

    #[error("Found {} destination conflict(s)", conflicts.len())]
    ConflictsFound {
        conflicts: Vec<Conflict>,
        result: Box<RenameResult>,
    },
}

impl RenameError {
    /// The result computed before a blocking error, for preview output
    pub fn partial_result(&self) -> Option<&RenameResult> {
        match self {
            RenameError::VersionFilesBlocked { result, .. }
            | RenameError::ConflictsFound { result, .. } => Some(result),
            _ => None,
        }
    }
}

impl From<MatchError> for RenameError {
    fn from(err: MatchError) -> Self {
        match err {
            MatchError::CategoryNotFound(category) => RenameError::CategoryNotFound(category),
            MatchError::Scan { category, source } => RenameError::Scan { category, source },
        }
    }
}

/// Runs rename specs against one overlay
pub struct Renamer<T: ManifestTool> {
    overlay_root: Option<PathBuf>,
    manifest_tool: T,
}

impl<T: ManifestTool> Renamer<T> {
    pub fn new(overlay_root: Option<PathBuf>, manifest_tool: T) -> Self {
        let overlay_root = overlay_root.filter(|p| !p.as_os_str().is_empty());
        Self {
            overlay_root,
            manifest_tool,
        }
    }

    /// Locate matches and hazards without touching the filesystem
    pub fn preview(&self, spec: &RenameSpec) -> Result<RenameResult, RenameError> {
        self.plan(spec, false)
    }

    /// Run the full rename: plan, apply the blocking policy, rename, update manifests
    pub fn execute(
        &self,
        spec: &RenameSpec,
        options: &RenameOptions,
        progress: &mut Progress,
    ) -> Result<RenameResult, RenameError> {
        let mut result = self.plan(spec, options.force)?;

        if options.dry_run || result.is_empty() {
            debug!(dry_run = options.dry_run, "Nothing to execute");
            return Ok(result);
        }

        let total = result.matches.len();
        info!("Renaming {} ebuilds", total);

        for (i, m) in result.matches.iter().enumerate() {
            progress.rename_progress(i + 1, total, &m.old_filename, &m.new_filename);

            match fs::rename(&m.old_path, &m.new_path) {
                Ok(()) => {
                    info!("Renamed: {} -> {}", m.old_filename, m.new_filename);
                    result.renamed.push(m.clone());
                }
                Err(e) => {
                    warn!(file = %m.old_filename, error = %e, "Rename failed");
                    progress.warn(&format!("Failed to rename {}: {}", m.old_filename, e));
                    result.failed.push(RenameFailure {
                        rename_match: m.clone(),
                        message: e.to_string(),
                    });
                }
            }
        }

        progress.rename_complete(result.renamed.len(), result.failed.len());

        if options.no_manifest {
            debug!("Manifest updates disabled");
        } else {
            result.manifest_updates =
                update_manifests(&self.manifest_tool, &result.renamed, progress);
        }

        Ok(result)
    }

    /// Validation, matching, detection and the blocking policy
    fn plan(&self, spec: &RenameSpec, force: bool) -> Result<RenameResult, RenameError> {
        let overlay_root = self.overlay_root.as_ref().ok_or(RenameError::NotConfigured)?;

        validate_pattern(&spec.package_pattern)?;
        check_path_component("new version", &spec.new_version)?;
        if !spec.is_global_search() {
            check_path_component("category", &spec.category)?;
        }

        let matcher = EbuildMatcher::new(overlay_root);
        let mut result = RenameResult::new();
        result.matches = matcher.find_matches(spec)?;

        if result.is_empty() {
            info!(
                category = %spec.category,
                pattern = %spec.package_pattern,
                version = %spec.old_version,
                "No matching ebuilds"
            );
            return Ok(result);
        }

        result.version_files = detect_version_files(&result.matches, &spec.old_version);

        if should_block_for_version_files(&result.version_files, force) {
            warn!(count = result.version_files.len(), "Blocked by version-specific files");
            return Err(RenameError::VersionFilesBlocked {
                files: result.version_files.clone(),
                result: Box::new(result),
            });
        }

        result.conflicts = find_conflicts(&result);

        if !result.conflicts.is_empty() && !force {
            warn!(count = result.conflicts.len(), "Blocked by destination conflicts");
            return Err(RenameError::ConflictsFound {
                conflicts: result.conflicts.clone(),
                result: Box::new(result),
            });
        }

        Ok(result)
    }
}

/// Values joined into overlay paths must stay a single path component
fn check_path_component(name: &'static str, value: &str) -> Result<(), RenameError> {
    let reason = if value.is_empty() {
        "must not be empty"
    } else if value.contains('/') || value.contains('\0') {
        "must not contain a path separator"
    } else if value == "." || value == ".." {
        "must not be a relative path component"
    } else {
        return Ok(());
    };

    Err(RenameError::InvalidArgument {
        name,
        value: value.to_string(),
        reason,
    })
}

/// Destinations that exist on disk or are claimed twice within the batch
fn find_conflicts(result: &RenameResult) -> Vec<Conflict> {
    let mut conflicts = Vec::new();
    let mut claimed: HashMap<&Path, &Path> = HashMap::new();

    for m in &result.matches {
        // Renaming onto itself is a no-op
        if m.new_path == m.old_path {
            claimed.entry(m.new_path.as_path()).or_insert(m.old_path.as_path());
            continue;
        }

        if m.new_path.exists() {
            conflicts.push(Conflict {
                rename_match: m.clone(),
                existing_path: m.new_path.clone(),
            });
        } else if let Some(first_source) = claimed.get(m.new_path.as_path()) {
            conflicts.push(Conflict {
                rename_match: m.clone(),
                existing_path: first_source.to_path_buf(),
            });
        }

        claimed
            .entry(m.new_path.as_path())
            .or_insert(m.old_path.as_path());
    }

    conflicts
}
