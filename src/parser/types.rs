/// Suffix shared by every package-version file
pub const EBUILD_SUFFIX: &str = ".ebuild";

/// A package-version filename split into its parts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EbuildFile {
    pub package: String,
    /// Version with any `-rN` suffix removed
    pub version: String,
    /// Revision digits, if the filename carried a `-rN` suffix
    pub revision: Option<String>,
}

impl EbuildFile {
    pub fn has_revision(&self) -> bool {
        self.revision.is_some()
    }
}
