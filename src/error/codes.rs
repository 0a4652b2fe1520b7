#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success = 0,
    GeneralError = 1,
    InvalidArguments = 2,
    NotConfigured = 3,
    InvalidPattern = 4,
    CategoryNotFound = 5,
    VersionFilesBlocked = 6,
    ConflictsFound = 7,
    PartialFailure = 8,
    Aborted = 9,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}
