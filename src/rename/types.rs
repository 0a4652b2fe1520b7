use serde::Serialize;
use std::path::PathBuf;

/// Category token that widens the search to every category in the overlay
pub const ALL_CATEGORIES: &str = "*";

/// What to rename: one exact version of every package matching a pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenameSpec {
    pub category: String,
    pub package_pattern: String,
    /// Exact version to match, without revision suffix
    pub old_version: String,
    pub new_version: String,
}

impl RenameSpec {
    pub fn new(
        category: impl Into<String>,
        package_pattern: impl Into<String>,
        old_version: impl Into<String>,
        new_version: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            package_pattern: package_pattern.into(),
            old_version: old_version.into(),
            new_version: new_version.into(),
        }
    }

    pub fn is_global_search(&self) -> bool {
        self.category == ALL_CATEGORIES
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenameOptions {
    /// Stop after detection; never touch the filesystem
    pub dry_run: bool,
    /// Confirmation is handled by the caller; carried for completeness
    pub skip_prompt: bool,
    pub no_manifest: bool,
    /// Proceed despite version-specific files and destination conflicts
    pub force: bool,
}

/// A single ebuild located for renaming
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenameMatch {
    pub category: String,
    pub package: String,
    pub old_filename: String,
    pub new_filename: String,
    pub old_path: PathBuf,
    pub new_path: PathBuf,
    /// The old filename carried a `-rN` suffix (always dropped)
    pub has_revision: bool,
}

impl RenameMatch {
    /// `category/package` atom for display and grouping
    pub fn atom(&self) -> String {
        format!("{}/{}", self.category, self.package)
    }

    pub fn package_key(&self) -> (&str, &str) {
        (&self.category, &self.package)
    }

    pub fn package_dir(&self) -> Option<&std::path::Path> {
        self.old_path.parent()
    }
}

/// An auxiliary file under `files/` whose name embeds the old version
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionFile {
    pub category: String,
    pub package: String,
    pub path: PathBuf,
    pub filename: String,
}

/// A match whose destination is already taken
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conflict {
    pub rename_match: RenameMatch,
    pub existing_path: PathBuf,
}

/// Outcome of regenerating one package's Manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestUpdate {
    pub category: String,
    pub package: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ManifestUpdate {
    pub fn succeeded(category: &str, package: &str) -> Self {
        Self {
            category: category.to_string(),
            package: package.to_string(),
            success: true,
            error: None,
        }
    }

    pub fn failed(category: &str, package: &str, error: impl Into<String>) -> Self {
        Self {
            category: category.to_string(),
            package: package.to_string(),
            success: false,
            error: Some(error.into()),
        }
    }

    pub fn atom(&self) -> String {
        format!("{}/{}", self.category, self.package)
    }
}

/// A rename attempt that failed at the filesystem level
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenameFailure {
    pub rename_match: RenameMatch,
    pub message: String,
}

/// Everything a rename run found and did
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenameResult {
    pub matches: Vec<RenameMatch>,
    pub renamed: Vec<RenameMatch>,
    pub failed: Vec<RenameFailure>,
    pub version_files: Vec<VersionFile>,
    pub conflicts: Vec<Conflict>,
    pub manifest_updates: Vec<ManifestUpdate>,
}

impl RenameResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn revision_count(&self) -> usize {
        self.matches.iter().filter(|m| m.has_revision).count()
    }

    pub fn manifest_success_count(&self) -> usize {
        self.manifest_updates.iter().filter(|u| u.success).count()
    }

    pub fn manifest_failures(&self) -> impl Iterator<Item = &ManifestUpdate> {
        self.manifest_updates.iter().filter(|u| !u.success)
    }

    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}
