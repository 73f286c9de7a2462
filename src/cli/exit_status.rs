use std::process::ExitCode;

/// Process exit status of a locsync run.
///
/// - `Success` (0): nothing reported and nothing left to do
/// - `Failure` (1): `check` reported issues, a dry-run found pending changes,
///   or a source file could not be read
/// - `Error` (2): the command could not run (bad config, failed write)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
