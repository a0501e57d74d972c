use std::{fmt, io::Write, process::ExitCode};
use tracing::error;

/// Fatal error reported once by `main` before exiting.
#[derive(Debug)]
pub struct AppError(anyhow::Error);

impl AppError {
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::FAILURE
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error: {:#}", self.0)
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

/// Maps the outcome of a session to the process exit code, writing the
/// one-line error report to `stderr` on failure.
pub fn report(result: anyhow::Result<()>, stderr: &mut impl Write) -> ExitCode {
    match result.map_err(AppError::from) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Session aborted");
            // Nothing left to report to if stderr itself is gone.
            let _ = writeln!(stderr, "{e}");
            e.exit_code()
        }
    }
}
