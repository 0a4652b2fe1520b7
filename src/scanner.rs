use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, trace};

/// Top-level overlay directories that never hold packages
pub const NON_CATEGORY_DIRS: [&str; 7] = [
    "profiles",
    "metadata",
    "eclass",
    "licenses",
    "scripts",
    "distfiles",
    "packages",
];

#[derive(Error, Debug)]
pub enum ScannerError {
    #[error("Path does not exist: {0}")]
    PathNotFound(PathBuf),

    #[error("Path is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    #[error("Failed to read directory: {0}")]
    IoError(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub name: String,
    pub path: PathBuf,
}

impl DirectoryEntry {
    pub fn new(name: String, path: PathBuf) -> Self {
        Self { name, path }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryKind {
    Directory,
    File,
}

pub fn is_category_name(name: &str) -> bool {
    !name.starts_with('.') && !NON_CATEGORY_DIRS.contains(&name)
}

/// List the category directories of an overlay
pub fn scan_categories(overlay_root: &Path) -> Result<Vec<DirectoryEntry>, ScannerError> {
    let entries = list_entries(overlay_root, EntryKind::Directory)?;

    Ok(entries
        .into_iter()
        .filter(|entry| {
            let keep = is_category_name(&entry.name);
            if !keep {
                trace!(name = %entry.name, "Skipping non-category directory");
            }
            keep
        })
        .collect())
}

/// List the visible subdirectories of a directory
pub fn scan_subdirectories(dir: &Path) -> Result<Vec<DirectoryEntry>, ScannerError> {
    list_entries(dir, EntryKind::Directory)
}

/// List the regular files directly inside a directory (no recursion)
pub fn scan_files(dir: &Path) -> Result<Vec<DirectoryEntry>, ScannerError> {
    list_entries(dir, EntryKind::File)
}

fn list_entries(target: &Path, kind: EntryKind) -> Result<Vec<DirectoryEntry>, ScannerError> {
    debug!(path = ?target, ?kind, "Scanning directory");

    if !target.exists() {
        return Err(ScannerError::PathNotFound(target.to_path_buf()));
    }

    if !target.is_dir() {
        return Err(ScannerError::NotADirectory(target.to_path_buf()));
    }

    let mut entries = Vec::new();

    let read_dir = fs::read_dir(target).map_err(|e| {
        if e.kind() == std::io::ErrorKind::PermissionDenied {
            ScannerError::PermissionDenied(target.to_path_buf())
        } else {
            ScannerError::IoError(e)
        }
    })?;

    for entry in read_dir {
        let entry = entry?;
        let path = entry.path();

        let matches_kind = match kind {
            EntryKind::Directory => path.is_dir(),
            EntryKind::File => path.is_file(),
        };

        if !matches_kind {
            trace!(path = ?path, "Skipping entry of other kind");
            continue;
        }

        let name = match path.file_name() {
            Some(n) => n.to_string_lossy().to_string(),
            None => continue,
        };

        if kind == EntryKind::Directory && name.starts_with('.') {
            trace!(name = %name, "Skipping hidden directory");
            continue;
        }

        entries.push(DirectoryEntry::new(name, path));
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));

    debug!(count = entries.len(), "Scan complete");

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_scan_empty_directory() {
        let dir = tempdir().unwrap();
        assert!(scan_subdirectories(dir.path()).unwrap().is_empty());
        assert!(scan_files(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_scan_categories_skips_structural_dirs() {
        let dir = tempdir().unwrap();
        for name in NON_CATEGORY_DIRS {
            fs::create_dir(dir.path().join(name)).unwrap();
        }
        fs::create_dir(dir.path().join(".git")).unwrap();
        fs::create_dir(dir.path().join("app-misc")).unwrap();
        fs::create_dir(dir.path().join("dev-libs")).unwrap();
        fs::write(dir.path().join("README"), "readme").unwrap();

        let result = scan_categories(dir.path()).unwrap();
        let names: Vec<&str> = result.iter().map(|e| e.name.as_str()).collect();

        assert_eq!(names, vec!["app-misc", "dev-libs"]);
    }

    #[test]
    fn test_scan_subdirectories_ignores_files_and_hidden() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".hidden")).unwrap();
        fs::create_dir(dir.path().join("zebra")).unwrap();
        fs::create_dir(dir.path().join("alpha")).unwrap();
        fs::write(dir.path().join("file.txt"), "content").unwrap();

        let result = scan_subdirectories(dir.path()).unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].name, "alpha");
        assert_eq!(result[1].name, "zebra");
    }

    #[test]
    fn test_scan_files_does_not_recurse() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.patch"), "").unwrap();
        fs::write(dir.path().join("a.conf"), "").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("c.patch"), "").unwrap();

        let result = scan_files(dir.path()).unwrap();
        let names: Vec<&str> = result.iter().map(|e| e.name.as_str()).collect();

        assert_eq!(names, vec!["a.conf", "b.patch"]);
    }

    #[test]
    fn test_path_not_found() {
        let result = scan_subdirectories(Path::new("/nonexistent/path"));
        assert!(matches!(result, Err(ScannerError::PathNotFound(_))));
    }

    #[test]
    fn test_not_a_directory() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("file.txt");
        fs::write(&file_path, "content").unwrap();

        let result = scan_files(&file_path);
        assert!(matches!(result, Err(ScannerError::NotADirectory(_))));
    }

    #[test]
    fn test_is_category_name() {
        assert!(is_category_name("sys-apps"));
        assert!(!is_category_name("eclass"));
        assert!(!is_category_name(".github"));
    }
}
