//! Failure model of the resource clients.

use thiserror::Error;

/// Status code reported when no HTTP response was received at all.
pub const NO_RESPONSE_STATUS: u16 = 500;

/// Why a REST call did not produce a usable result.
///
/// View models branch on [`ApiError::code`] to pick a localized message; the
/// variants keep enough detail for logging.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never got a response (connection refused, DNS, timeout).
    #[error("no response received")]
    NoResponse,

    /// The service answered with a non-2xx status.
    #[error("HTTP error status {0}")]
    Status(u16),

    /// The service answered 2xx but the body did not decode.
    #[error("could not decode response (status {status}): {message}")]
    Decode { status: u16, message: String },
}

impl ApiError {
    /// Integer the view models branch on.
    ///
    /// [`NO_RESPONSE_STATUS`] stands in for a missing response; a decode failure
    /// reports the status the body arrived with.
    #[must_use]
    pub const fn code(&self) -> u16 {
        match self {
            Self::NoResponse => NO_RESPONSE_STATUS,
            Self::Status(status) => *status,
            Self::Decode { status, .. } => *status,
        }
    }
}

/// Result of a single resource-client call.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_follow_failure_kind() {
        assert_eq!(ApiError::NoResponse.code(), 500);
        assert_eq!(ApiError::Status(404).code(), 404);
        let decode = ApiError::Decode {
            status: 200,
            message: "expected value".to_string(),
        };
        assert_eq!(decode.code(), 200);
    }
}
