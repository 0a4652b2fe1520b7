mod orchestrator;
mod types;

pub use orchestrator::{RenameError, Renamer};
pub use types::{
    Conflict, ManifestUpdate, RenameFailure, RenameMatch, RenameOptions, RenameResult, RenameSpec,
    VersionFile, ALL_CATEGORIES,
};
