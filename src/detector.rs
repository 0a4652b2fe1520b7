//! Flags auxiliary files that embed the old version in their name.
//!
//! Files under a package's `files/` directory (patches, config snippets) are
//! never renamed automatically; they are only reported.

use std::collections::HashSet;
use tracing::{debug, warn};

use crate::rename::{RenameMatch, VersionFile};
use crate::scanner::{scan_files, ScannerError};

/// Name of the per-package auxiliary files directory
pub const FILES_DIR: &str = "files";

/// Scan each matched package's `files/` directory once for version-specific files
pub fn detect_version_files(matches: &[RenameMatch], old_version: &str) -> Vec<VersionFile> {
    let mut seen: HashSet<(&str, &str)> = HashSet::new();
    let mut found = Vec::new();

    for m in matches {
        if !seen.insert(m.package_key()) {
            continue;
        }

        let Some(package_dir) = m.package_dir() else {
            continue;
        };
        let files_dir = package_dir.join(FILES_DIR);

        let entries = match scan_files(&files_dir) {
            Ok(entries) => entries,
            Err(ScannerError::PathNotFound(_)) | Err(ScannerError::NotADirectory(_)) => {
                debug!(package = %m.atom(), "No files directory");
                continue;
            }
            Err(e) => {
                warn!(package = %m.atom(), error = %e, "Cannot list files directory");
                continue;
            }
        };

        for entry in entries {
            if entry.name.contains(old_version) {
                debug!(package = %m.atom(), file = %entry.name, "Version-specific file");
                found.push(VersionFile {
                    category: m.category.clone(),
                    package: m.package.clone(),
                    path: entry.path,
                    filename: entry.name,
                });
            }
        }
    }

    found.sort_by(|a, b| {
        (&a.category, &a.package, &a.filename).cmp(&(&b.category, &b.package, &b.filename))
    });

    found
}

/// Version-specific files block a rename unless forced
pub fn should_block_for_version_files(files: &[VersionFile], force: bool) -> bool {
    !files.is_empty() && !force
}
