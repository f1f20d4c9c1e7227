use glutin::{ContextError, CreationError};

use std::error;
use std::fmt;

/// Exit status for a clean shutdown (window closed or Escape pressed).
pub const EXIT_SUCCESS: i32 = 0;
/// Exit status for any fatal startup or presentation failure.
pub const EXIT_FAILURE: i32 = -1;

/// Fatal failures. Shader compile and link problems are deliberately absent: those put the
/// program in degraded mode instead, see [`ProgramReport`][crate::shader::ProgramReport].
#[derive(Debug)]
pub enum Error {
    /// The windowing library could not be initialised.
    EventLoop(String),
    WindowCreation(CreationError),
    MakeCurrent(ContextError),
    /// OpenGL entry points that did not resolve against the current context.
    FunctionLoader { missing: Vec<&'static str> },
    /// OpenGL handed back object name 0 for the named resource.
    ResourceAllocation(&'static str),
    /// Swapping buffers failed while the frame loop was running.
    Present(ContextError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::EventLoop(reason) => write!(f, "Failed to initialize the windowing library: {}", reason),
            Error::WindowCreation(err) => write!(f, "Failed to create window: {}", err),
            Error::MakeCurrent(err) => write!(f, "Failed to make the OpenGL context current: {}", err),
            Error::FunctionLoader { missing } => write!(
                f,
                "Failed to load OpenGL functions, missing: {}",
                missing.join(", ")
            ),
            Error::ResourceAllocation(what) => write!(f, "OpenGL could not allocate a {}", what),
            Error::Present(err) => write!(f, "Failed to swap buffers: {}", err),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::WindowCreation(err) => Some(err),
            Error::MakeCurrent(err) | Error::Present(err) => Some(err),
            _ => None,
        }
    }
}

impl From<CreationError> for Error {
    fn from(err: CreationError) -> Self {
        Error::WindowCreation(err)
    }
}

/// Process exit status for the outcome of [`run`][crate::run].
pub fn exit_code(result: &Result<(), Error>) -> i32 {
    match result {
        Ok(()) => EXIT_SUCCESS,
        Err(_) => EXIT_FAILURE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn clean_exit_is_zero() {
        assert_eq!(exit_code(&Ok(())), 0);
    }

    #[test]
    fn every_startup_failure_exits_with_minus_one() {
        let failures = vec![
            Error::EventLoop("no display".to_string()),
            Error::WindowCreation(CreationError::OpenGlVersionNotSupported),
            Error::MakeCurrent(ContextError::ContextLost),
            Error::FunctionLoader { missing: vec!["glClear"] },
            Error::ResourceAllocation("vertex array"),
        ];
        for failure in failures {
            assert_eq!(exit_code(&Err(failure)), -1);
        }
    }

    #[test]
    fn loader_error_names_missing_functions() {
        let err = Error::FunctionLoader { missing: vec!["glClear", "glDrawArrays"] };
        assert_eq!(
            err.to_string(),
            "Failed to load OpenGL functions, missing: glClear, glDrawArrays"
        );
    }

    #[test]
    fn geometry_allocation_failure_is_fatal() {
        let err = Error::ResourceAllocation("vertex buffer");
        assert_eq!(err.to_string(), "OpenGL could not allocate a vertex buffer");
        assert_eq!(exit_code(&Err(err)), EXIT_FAILURE);
    }

    #[test]
    fn glutin_errors_are_kept_as_source() {
        let err: Error = CreationError::OpenGlVersionNotSupported.into();
        assert!(matches!(err, Error::WindowCreation(_)));
        assert!(err.source().is_some());
        assert!(Error::EventLoop("x".to_string()).source().is_none());
    }
}
