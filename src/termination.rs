//! Process exit status.

use std::process::{self, ExitCode};

use crate::webcam::DeviceUnavailable;

/// How the application ended.
///
/// Returned from `main`; each variant maps to a distinct process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    /// The user pressed the exit key.
    Success,
    /// The capture device could not be opened.
    DeviceUnavailable,
    /// Any other error.
    Failure,
}

impl Exit {
    pub fn code(self) -> u8 {
        match self {
            Exit::Success => 0,
            Exit::Failure => 1,
            Exit::DeviceUnavailable => 2,
        }
    }

    pub fn is_success(self) -> bool {
        self == Exit::Success
    }

    /// Classifies the result of running the application, logging the error if there is one.
    pub fn from_result(result: anyhow::Result<()>) -> Self {
        match result {
            Ok(()) => Exit::Success,
            Err(e) => {
                log::error!("{e:#}");
                if e.downcast_ref::<DeviceUnavailable>().is_some() {
                    Exit::DeviceUnavailable
                } else {
                    Exit::Failure
                }
            }
        }
    }
}

impl process::Termination for Exit {
    fn report(self) -> ExitCode {
        ExitCode::from(self.code())
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Context;

    use super::*;

    #[test]
    fn codes_are_distinct() {
        assert_eq!(Exit::Success.code(), 0);
        assert_ne!(Exit::DeviceUnavailable.code(), 0);
        assert_ne!(Exit::Failure.code(), 0);
        assert_ne!(Exit::DeviceUnavailable.code(), Exit::Failure.code());
        assert!(Exit::Success.is_success());
        assert!(!Exit::Failure.is_success());
    }

    #[test]
    fn classify() {
        assert_eq!(Exit::from_result(Ok(())), Exit::Success);
        assert_eq!(
            Exit::from_result(Err(anyhow::anyhow!("window went away"))),
            Exit::Failure
        );

        let err = Err::<(), _>(DeviceUnavailable { index: 0 }).context("startup failed");
        assert_eq!(Exit::from_result(err), Exit::DeviceUnavailable);
    }
}
