//! Exit code contract for the ovh binary
//!
//! The contract is deliberately coarse so scripts only have to distinguish
//! success from failure: 0 means a 2xx response was received and its body
//! printed, 1 covers every other HTTP status as well as payload, setup, and
//! transport failures.

/// Exit codes for the ovh binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// A 2xx response was received and its body printed
    Success = 0,

    /// Any other HTTP status, or a setup, input, or transport failure
    Failure = 1,
}

impl ExitCode {
    /// Convert exit code to i32 for use with std::process::exit
    #[inline]
    pub const fn as_i32(self) -> i32 {
        self as i32
    }

    /// Select the exit code for an HTTP status.
    ///
    /// The whole 2xx range counts as success, so a 202 Accepted from an
    /// asynchronous route is not reported as a failure.
    pub const fn from_status(status: u16) -> Self {
        if status >= 200 && status < 300 {
            Self::Success
        } else {
            Self::Failure
        }
    }
}
