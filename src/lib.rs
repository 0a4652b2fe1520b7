pub mod cli;
pub mod config;
pub mod detector;
pub mod error;
pub mod logging;
pub mod manifest;
pub mod matcher;
pub mod output;
pub mod parser;
pub mod progress;
pub mod prompt;
pub mod rename;
pub mod scanner;
pub mod validator;

pub use config::{config_from_env, Config};
pub use detector::{detect_version_files, should_block_for_version_files};
pub use error::{AppError, ExitCode};
pub use manifest::{ManifestError, ManifestTool, PkgdevManifest};
pub use matcher::{EbuildMatcher, MatchError};
pub use output::{format_result, FormatContext};
pub use progress::Progress;
pub use rename::{
    Conflict, ManifestUpdate, RenameError, RenameFailure, RenameMatch, RenameOptions,
    RenameResult, RenameSpec, Renamer, VersionFile,
};
pub use validator::{validate_pattern, PatternError, PatternValidator};
