//! Locates the ebuilds a rename applies to.
//!
//! The matcher walks `<overlay>/<category>/<package>/` and turns every
//! `<package>-<old_version>[-rN].ebuild` it finds into a [`RenameMatch`].

use glob::Pattern;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::parser::{build_ebuild_filename, parse_ebuild_filename};
use crate::rename::{RenameMatch, RenameSpec};
use crate::scanner::{scan_categories, scan_files, scan_subdirectories, ScannerError};
use crate::validator::has_wildcard;

#[derive(Error, Debug)]
pub enum MatchError {
    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    #[error("Failed to scan category '{category}': {source}")]
    Scan {
        category: String,
        #[source]
        source: ScannerError,
    },
}

/// Package directory filter: exact name or glob
enum PackageFilter {
    Exact(String),
    Glob(Option<Pattern>),
}

impl PackageFilter {
    fn new(pattern: &str) -> Self {
        if !has_wildcard(pattern) {
            return PackageFilter::Exact(pattern.to_string());
        }

        match Pattern::new(pattern) {
            Ok(p) => PackageFilter::Glob(Some(p)),
            Err(e) => {
                debug!(pattern = %pattern, error = %e, "Malformed glob matches nothing");
                PackageFilter::Glob(None)
            }
        }
    }

    fn matches(&self, name: &str) -> bool {
        match self {
            PackageFilter::Exact(exact) => exact == name,
            PackageFilter::Glob(Some(pattern)) => pattern.matches(name),
            PackageFilter::Glob(None) => false,
        }
    }
}

/// Finds ebuilds under one overlay root
#[derive(Debug, Clone)]
pub struct EbuildMatcher {
    overlay_root: PathBuf,
}

impl EbuildMatcher {
    pub fn new(overlay_root: impl Into<PathBuf>) -> Self {
        Self {
            overlay_root: overlay_root.into(),
        }
    }

    /// Find every ebuild in scope whose package matches the pattern and whose
    /// revision-stripped version equals `old_version`.
    ///
    /// The pattern is assumed to be validated already. Results are sorted by
    /// category, package and filename.
    pub fn find_matches(&self, spec: &RenameSpec) -> Result<Vec<RenameMatch>, MatchError> {
        let filter = PackageFilter::new(&spec.package_pattern);
        let mut matches = Vec::new();

        if spec.is_global_search() {
            let categories = scan_categories(&self.overlay_root).map_err(|source| {
                MatchError::Scan {
                    category: spec.category.clone(),
                    source,
                }
            })?;

            debug!(count = categories.len(), "Searching all categories");

            for category in categories {
                match self.scan_category(&category.name, &category.path, &filter, spec) {
                    Ok(found) => matches.extend(found),
                    Err(e) => {
                        warn!(category = %category.name, error = %e, "Skipping unreadable category");
                    }
                }
            }
        } else {
            let category_dir = self.overlay_root.join(&spec.category);
            if !category_dir.is_dir() {
                return Err(MatchError::CategoryNotFound(spec.category.clone()));
            }

            matches = self
                .scan_category(&spec.category, &category_dir, &filter, spec)
                .map_err(|source| MatchError::Scan {
                    category: spec.category.clone(),
                    source,
                })?;
        }

        matches.sort_by(|a, b| {
            (&a.category, &a.package, &a.old_filename).cmp(&(
                &b.category,
                &b.package,
                &b.old_filename,
            ))
        });

        debug!(count = matches.len(), "Matching complete");

        Ok(matches)
    }

    fn scan_category(
        &self,
        category: &str,
        category_dir: &Path,
        filter: &PackageFilter,
        spec: &RenameSpec,
    ) -> Result<Vec<RenameMatch>, ScannerError> {
        let mut matches = Vec::new();

        for package in scan_subdirectories(category_dir)? {
            if !filter.matches(&package.name) {
                continue;
            }

            trace!(category = %category, package = %package.name, "Package matches pattern");

            let files = match scan_files(&package.path) {
                Ok(files) => files,
                Err(e) => {
                    warn!(package = %package.name, error = %e, "Cannot list package directory");
                    continue;
                }
            };

            for file in files {
                let Some(ebuild) = parse_ebuild_filename(&package.name, &file.name) else {
                    continue;
                };

                if ebuild.version != spec.old_version {
                    continue;
                }

                let new_filename = build_ebuild_filename(&package.name, &spec.new_version);

                debug!(
                    category = %category,
                    file = %file.name,
                    new = %new_filename,
                    "Found matching ebuild"
                );

                matches.push(RenameMatch {
                    category: category.to_string(),
                    package: package.name.clone(),
                    new_path: package.path.join(&new_filename),
                    old_path: file.path,
                    old_filename: file.name,
                    new_filename,
                    has_revision: ebuild.has_revision(),
                });
            }
        }

        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "EAPI=8\n").unwrap();
    }

    fn spec(category: &str, pattern: &str, old: &str, new: &str) -> RenameSpec {
        RenameSpec::new(category, pattern, old, new)
    }

    #[test]
    fn test_exact_match_in_category() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "app-misc/hello/hello-1.0.0.ebuild");
        touch(dir.path(), "app-misc/hello/hello-1.1.0.ebuild");
        touch(dir.path(), "app-misc/hello/metadata.xml");

        let matcher = EbuildMatcher::new(dir.path());
        let matches = matcher
            .find_matches(&spec("app-misc", "hello", "1.0.0", "2.0.0"))
            .unwrap();

        assert_eq!(matches.len(), 1);
        let m = &matches[0];
        assert_eq!(m.category, "app-misc");
        assert_eq!(m.package, "hello");
        assert_eq!(m.old_filename, "hello-1.0.0.ebuild");
        assert_eq!(m.new_filename, "hello-2.0.0.ebuild");
        assert_eq!(m.old_path, dir.path().join("app-misc/hello/hello-1.0.0.ebuild"));
        assert_eq!(m.new_path, dir.path().join("app-misc/hello/hello-2.0.0.ebuild"));
        assert!(!m.has_revision);
    }

    #[test]
    fn test_revision_is_dropped() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "dev-libs/mypackage/mypackage-1.0.0-r3.ebuild");

        let matches = EbuildMatcher::new(dir.path())
            .find_matches(&spec("dev-libs", "mypackage", "1.0.0", "2.0.0"))
            .unwrap();

        assert_eq!(matches.len(), 1);
        assert!(matches[0].has_revision);
        assert_eq!(matches[0].new_filename, "mypackage-2.0.0.ebuild");
    }

    #[test]
    fn test_category_not_found() {
        let dir = tempdir().unwrap();
        let result =
            EbuildMatcher::new(dir.path()).find_matches(&spec("no-such", "hello", "1", "2"));
        assert!(matches!(result, Err(MatchError::CategoryNotFound(c)) if c == "no-such"));
    }

    #[test]
    fn test_scope_isolation() {
        let dir = tempdir().unwrap();
        for category in ["app-misc", "dev-util", "net-misc"] {
            touch(dir.path(), &format!("{}/tool/tool-3.1.ebuild", category));
        }

        let matcher = EbuildMatcher::new(dir.path());

        let local = matcher
            .find_matches(&spec("dev-util", "tool", "3.1", "3.2"))
            .unwrap();
        assert_eq!(local.len(), 1);
        assert_eq!(local[0].category, "dev-util");

        let global = matcher.find_matches(&spec("*", "tool", "3.1", "3.2")).unwrap();
        let categories: Vec<&str> = global.iter().map(|m| m.category.as_str()).collect();
        assert_eq!(categories, vec!["app-misc", "dev-util", "net-misc"]);
    }

    #[test]
    fn test_global_search_skips_structural_dirs() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "app-misc/tool/tool-1.0.ebuild");
        touch(dir.path(), "profiles/tool/tool-1.0.ebuild");
        touch(dir.path(), ".hidden/tool/tool-1.0.ebuild");

        let matches = EbuildMatcher::new(dir.path())
            .find_matches(&spec("*", "tool", "1.0", "1.1"))
            .unwrap();

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].category, "app-misc");
    }

    #[test]
    fn test_glob_pattern_matching() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "dev-python/pyfoo/pyfoo-1.0.ebuild");
        touch(dir.path(), "dev-python/pybar/pybar-1.0.ebuild");
        touch(dir.path(), "dev-python/other/other-1.0.ebuild");

        let matches = EbuildMatcher::new(dir.path())
            .find_matches(&spec("dev-python", "py*", "1.0", "1.1"))
            .unwrap();

        let packages: Vec<&str> = matches.iter().map(|m| m.package.as_str()).collect();
        assert_eq!(packages, vec!["pybar", "pyfoo"]);
    }

    #[test]
    fn test_malformed_glob_matches_nothing() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "dev-python/pyfoo/pyfoo-1.0.ebuild");

        let matches = EbuildMatcher::new(dir.path())
            .find_matches(&spec("dev-python", "pyf[", "1.0", "1.1"))
            .unwrap();

        assert!(matches.is_empty());
    }

    #[test]
    fn test_version_must_match_exactly() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "app-misc/hello/hello-1.0.ebuild");
        touch(dir.path(), "app-misc/hello/hello-1.0.1.ebuild");
        touch(dir.path(), "app-misc/hello/hello-11.0.ebuild");

        let matches = EbuildMatcher::new(dir.path())
            .find_matches(&spec("app-misc", "hello", "1.0", "2.0"))
            .unwrap();

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].old_filename, "hello-1.0.ebuild");
    }

    #[test]
    fn test_stray_files_ignored() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "app-misc/hello/goodbye-1.0.ebuild");

        let matches = EbuildMatcher::new(dir.path())
            .find_matches(&spec("app-misc", "hello", "1.0", "2.0"))
            .unwrap();

        assert!(matches.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_category_skipped_globally_fatal_locally() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        touch(dir.path(), "app-misc/tool/tool-1.0.ebuild");
        touch(dir.path(), "dev-util/tool/tool-1.0.ebuild");
        touch(dir.path(), "net-misc/tool/tool-1.0.ebuild");

        let locked = dir.path().join("dev-util");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Permission bits do not apply to root
        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let matcher = EbuildMatcher::new(dir.path());
        let global = matcher.find_matches(&spec("*", "tool", "1.0", "1.1"));
        let local = matcher.find_matches(&spec("dev-util", "tool", "1.0", "1.1"));

        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        let categories: Vec<String> = global.unwrap().into_iter().map(|m| m.category).collect();
        assert_eq!(categories, vec!["app-misc", "net-misc"]);

        match local {
            Err(MatchError::Scan { category, source }) => {
                assert_eq!(category, "dev-util");
                assert!(matches!(source, ScannerError::PermissionDenied(_)));
            }
            other => panic!("expected scan error, got {:?}", other),
        }
    }

    #[test]
    fn test_no_matches_is_empty_not_error() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("app-misc")).unwrap();

        let matches = EbuildMatcher::new(dir.path())
            .find_matches(&spec("app-misc", "hello", "1.0", "2.0"))
            .unwrap();

        assert!(matches.is_empty());
    }
}
