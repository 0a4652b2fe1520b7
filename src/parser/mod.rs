mod types;

pub use types::*;

use once_cell::sync::Lazy;
use regex::Regex;

// Trailing revision marker: "1.0.0-r3" -> ("1.0.0", "3")
static REVISION_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(.+)-r(\d+)$").unwrap());

/// Split a version string into its base version and optional revision digits.
///
/// The digits are not range-checked.
pub fn strip_revision(version: &str) -> (&str, Option<&str>) {
    if let Some(captures) = REVISION_REGEX.captures(version) {
        if let (Some(base), Some(rev)) = (captures.get(1), captures.get(2)) {
            return (base.as_str(), Some(rev.as_str()));
        }
    }

    (version, None)
}

/// Parse `<package>-<version>[-rN].ebuild` for a known package name.
///
/// Returns `None` for files that belong to a different package or are not
/// ebuilds at all.
pub fn parse_ebuild_filename(package: &str, filename: &str) -> Option<EbuildFile> {
    let stem = filename.strip_suffix(EBUILD_SUFFIX)?;
    let version = stem.strip_prefix(package)?.strip_prefix('-')?;

    if version.is_empty() {
        return None;
    }

    let (base, revision) = strip_revision(version);

    Some(EbuildFile {
        package: package.to_string(),
        version: base.to_string(),
        revision: revision.map(str::to_string),
    })
}

/// Build the filename for a package at the given version (never revisioned)
pub fn build_ebuild_filename(package: &str, version: &str) -> String {
    format!("{}-{}{}", package, version, EBUILD_SUFFIX)
}
