mod codes;

pub use codes::ExitCode;

use crate::config::ENV_OVERLAY_ROOT;
use crate::rename::{Conflict, RenameError, RenameFailure, VersionFile};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Overlay root is not configured")]
    NotConfigured,

    #[error("Invalid package pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Invalid {name} '{value}': {reason}")]
    InvalidArgument {
        name: String,
        value: String,
        reason: String,
    },

    #[error("Category not found: {category}")]
    CategoryNotFound { category: String },

    #[error("Failed to scan category '{category}': {message}")]
    ScanError { category: String, message: String },

    #[error("Version-specific files found")]
    VersionFilesBlocked { files: Vec<VersionFile> },

    #[error("Destination conflicts found")]
    ConflictsFound { conflicts: Vec<Conflict> },

    #[error("{} of {total} renames failed", failed.len())]
    PartialFailure {
        failed: Vec<RenameFailure>,
        total: usize,
    },

    #[error("Aborted by user")]
    Aborted,

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl AppError {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            AppError::NotConfigured => ExitCode::NotConfigured,
            AppError::InvalidPattern { .. } => ExitCode::InvalidPattern,
            AppError::InvalidArgument { .. } => ExitCode::InvalidArguments,
            AppError::CategoryNotFound { .. } => ExitCode::CategoryNotFound,
            AppError::ScanError { .. } => ExitCode::GeneralError,
            AppError::VersionFilesBlocked { .. } => ExitCode::VersionFilesBlocked,
            AppError::ConflictsFound { .. } => ExitCode::ConflictsFound,
            AppError::PartialFailure { .. } => ExitCode::PartialFailure,
            AppError::Aborted => ExitCode::Aborted,
            AppError::Output(_) => ExitCode::GeneralError,
        }
    }

    pub fn detailed_message(&self) -> String {
        match self {
            AppError::NotConfigured => {
                format!(
                    "No overlay root is configured.\n\n\
                     Pass --overlay <DIR>, set {} in the environment,\n\
                     or add it to a .env file in the working directory.",
                    ENV_OVERLAY_ROOT
                )
            }

            AppError::InvalidPattern { pattern, reason } => {
                format!(
                    "The package pattern '{}' was rejected:\n  {}\n\n\
                     Patterns need at least 3 literal characters before the first\n\
                     wildcard, e.g. 'python-*' rather than 'p*'.",
                    pattern, reason
                )
            }

            AppError::InvalidArgument {
                name,
                value,
                reason,
            } => {
                format!(
                    "The {} '{}' {}.\n\n\
                     Categories and versions must be plain names such as\n\
                     'app-misc' or '2.0.1'.",
                    name, value, reason
                )
            }

            AppError::CategoryNotFound { category } => {
                format!(
                    "The category '{}' does not exist in the overlay.\n\n\
                     Check the spelling, or use '*' to search every category.",
                    category
                )
            }

            AppError::ScanError { category, message } => {
                format!(
                    "Failed to scan category '{}':\n  {}\n\n\
                     Check directory permissions and try again.",
                    category, message
                )
            }

            AppError::VersionFilesBlocked { files } => {
                let mut msg = String::from(
                    "The following files embed the old version and will NOT be renamed:\n",
                );
                for file in files.iter().take(10) {
                    msg.push_str(&format!(
                        "  - {}/{}: files/{}\n",
                        file.category, file.package, file.filename
                    ));
                }
                if files.len() > 10 {
                    msg.push_str(&format!("  ... and {} more\n", files.len() - 10));
                }
                msg.push_str(
                    "\nReview whether the renamed ebuilds still reference them.\n\
                     Rerun with --force to rename anyway.",
                );
                msg
            }

            AppError::ConflictsFound { conflicts } => {
                let mut msg = String::from("The following destinations are already taken:\n");
                for conflict in conflicts.iter().take(10) {
                    msg.push_str(&format!(
                        "  - {}: {}\n",
                        conflict.rename_match.atom(),
                        conflict.rename_match.new_filename
                    ));
                }
                if conflicts.len() > 10 {
                    msg.push_str(&format!("  ... and {} more\n", conflicts.len() - 10));
                }
                msg.push_str("\nRerun with --force to overwrite them.");
                msg
            }

            AppError::PartialFailure { failed, total } => {
                let mut msg = format!("{} of {} renames failed:\n", failed.len(), total);
                for failure in failed {
                    msg.push_str(&format!(
                        "  - {}: {}\n",
                        failure.rename_match.old_path.display(),
                        failure.message
                    ));
                }
                msg.push_str(
                    "\nSuccessful renames were kept.\n\
                     Check file permissions and rerun for the remaining ebuilds.",
                );
                msg
            }

            AppError::Aborted => String::from("Aborted. No files were changed."),

            AppError::Output(e) => format!("Failed to write output: {}", e),
        }
    }
}

impl From<RenameError> for AppError {
    fn from(err: RenameError) -> Self {
        match err {
            RenameError::NotConfigured => AppError::NotConfigured,
            RenameError::InvalidPattern(e) => AppError::InvalidPattern {
                pattern: e.pattern().to_string(),
                reason: e.reason().to_string(),
            },
            RenameError::InvalidArgument {
                name,
                value,
                reason,
            } => AppError::InvalidArgument {
                name: name.to_string(),
                value: value.to_string(),
                reason: reason.to_string(),
            },
            RenameError::CategoryNotFound(category) => AppError::CategoryNotFound { category },
            RenameError::Scan { category, source } => AppError::ScanError {
                category,
                message: source.to_string(),
            },
            RenameError::VersionFilesBlocked { files, .. } => {
                AppError::VersionFilesBlocked { files }
            }
            RenameError::ConflictsFound { conflicts, .. } => AppError::ConflictsFound { conflicts },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::PatternError;
    use std::path::PathBuf;

    #[test]
    fn test_exit_codes() {
        assert_eq!(AppError::NotConfigured.exit_code(), ExitCode::NotConfigured);
        assert_eq!(
            AppError::CategoryNotFound {
                category: "x".to_string()
            }
            .exit_code(),
            ExitCode::CategoryNotFound
        );
        assert_eq!(
            AppError::ConflictsFound { conflicts: vec![] }.exit_code(),
            ExitCode::ConflictsFound
        );
        assert_eq!(AppError::Aborted.exit_code(), ExitCode::Aborted);
    }

    #[test]
    fn test_pattern_error_conversion() {
        let err: AppError =
            RenameError::InvalidPattern(PatternError::invalid("g*", "too short")).into();
        assert_eq!(err.exit_code(), ExitCode::InvalidPattern);

        let msg = err.detailed_message();
        assert!(msg.contains("'g*'"));
        assert!(msg.contains("too short"));
    }

    #[test]
    fn test_version_files_message_lists_files() {
        let err = AppError::VersionFilesBlocked {
            files: vec![VersionFile {
                category: "app-misc".to_string(),
                package: "hello".to_string(),
                path: PathBuf::from("/o/app-misc/hello/files/hello-1.0.patch"),
                filename: "hello-1.0.patch".to_string(),
            }],
        };

        let msg = err.detailed_message();
        assert!(msg.contains("app-misc/hello: files/hello-1.0.patch"));
        assert!(msg.contains("--force"));
    }

    #[test]
    fn test_not_configured_mentions_env_var() {
        assert!(AppError::NotConfigured
            .detailed_message()
            .contains("OVERLAY_ROOT"));
    }
}
