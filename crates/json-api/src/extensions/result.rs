//! Result helper extensions for HTTP handlers.

use std::fmt::Display;

use salvo::prelude::StatusError;
use tracing::error;

/// Map handler-side failures onto HTTP errors.
pub(crate) trait ResultExt<T> {
    /// Reject the request as malformed, describing the problem to the caller.
    fn or_400(self, brief: &str) -> Result<T, StatusError>;

    /// Log the failure and answer with an opaque internal server error.
    fn or_500(self, context: &str) -> Result<T, StatusError>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Display,
{
    fn or_400(self, brief: &str) -> Result<T, StatusError> {
        self.map_err(|error| StatusError::bad_request().brief(format!("{brief}: {error}")))
    }

    fn or_500(self, context: &str) -> Result<T, StatusError> {
        self.map_err(|error| {
            error!("{context}: {error}");

            StatusError::internal_server_error()
        })
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn test_or_400_keeps_the_cause_in_the_brief() {
        let error = Err::<(), _>("bad sort").or_400("invalid query").err();

        assert_eq!(error.as_ref().map(|e| e.code), Some(StatusCode::BAD_REQUEST));
        assert_eq!(
            error.map(|e| e.brief),
            Some("invalid query: bad sort".to_owned())
        );
    }

    #[test]
    fn test_or_500_hides_the_cause() {
        let error = Err::<(), _>("connection refused").or_500("listing").err();

        assert_eq!(
            error.map(|e| e.code),
            Some(StatusCode::INTERNAL_SERVER_ERROR)
        );
    }
}
