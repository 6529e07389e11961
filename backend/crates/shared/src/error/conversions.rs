//! Error conversions - From implementations for common error types
//!
//! Provides automatic conversion from common error types to [`DomainError`],
//! and the transport adapters that read the code pair back out of it.

use super::domain_error::DomainError;
use super::kind::ErrorKind;

// ============================================================================
// Standard library conversions
// ============================================================================

impl From<std::io::Error> for DomainError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => ErrorKind::Forbidden,
            std::io::ErrorKind::TimedOut => ErrorKind::Timeout,
            std::io::ErrorKind::AlreadyExists => ErrorKind::AlreadyExist,
            _ => ErrorKind::Internal,
        };
        DomainError::new(kind, "I/O operation failed").with_source(err)
    }
}

impl From<std::fmt::Error> for DomainError {
    #[track_caller]
    fn from(err: std::fmt::Error) -> Self {
        DomainError::internal("Formatting error").with_source(err)
    }
}

impl From<std::string::FromUtf8Error> for DomainError {
    #[track_caller]
    fn from(err: std::string::FromUtf8Error) -> Self {
        DomainError::bad_request("Invalid UTF-8 string").with_source(err)
    }
}

impl From<std::num::ParseIntError> for DomainError {
    #[track_caller]
    fn from(err: std::num::ParseIntError) -> Self {
        DomainError::bad_request("Invalid integer format").with_source(err)
    }
}

impl From<std::num::ParseFloatError> for DomainError {
    #[track_caller]
    fn from(err: std::num::ParseFloatError) -> Self {
        DomainError::bad_request("Invalid float format").with_source(err)
    }
}

// ============================================================================
// serde_json conversions
// ============================================================================

impl From<serde_json::Error> for DomainError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        if err.is_syntax() || err.is_data() || err.is_eof() {
            DomainError::bad_request(format!("JSON parse error: {}", err)).with_source(err)
        } else {
            DomainError::internal("JSON serialization error").with_source(err)
        }
    }
}

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for DomainError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        self.log();

        let status =
            StatusCode::from_u16(self.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // RFC 7807 Problem Details for HTTP APIs
        let body = serde_json::json!({
            "type": format!("https://httpstatuses.io/{}", self.http_status()),
            "title": self.kind().as_str(),
            "status": self.http_status(),
            "detail": self.message(),
            "code": self.rpc_code(),
        });

        (status, Json(body)).into_response()
    }
}

// ============================================================================
// Tonic conversions (feature-gated)
// ============================================================================

#[cfg(feature = "tonic")]
impl From<DomainError> for tonic::Status {
    fn from(err: DomainError) -> Self {
        err.log();
        tonic::Status::new(tonic::Code::from_i32(err.rpc_code()), err.message().to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: DomainError = io_err.into();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err: DomainError = io_err.into();
        assert_eq!(err.kind(), ErrorKind::Forbidden);

        let io_err = std::io::Error::new(std::io::ErrorKind::TimedOut, "slow disk");
        let err: DomainError = io_err.into();
        assert_eq!(err.codes(), (408, 4));

        let io_err = std::io::Error::new(std::io::ErrorKind::AlreadyExists, "exists");
        let err: DomainError = io_err.into();
        assert_eq!(err.kind(), ErrorKind::AlreadyExist);
    }

    #[test]
    fn test_parse_int_error_conversion() {
        let parse_err: Result<i32, _> = "abc".parse();
        let err: DomainError = parse_err.unwrap_err().into();
        assert_eq!(err.kind(), ErrorKind::BadRequest);
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: DomainError = json_err.into();
        assert_eq!(err.kind(), ErrorKind::BadRequest);
        assert!(err.message().starts_with("JSON parse error"));
    }

    #[cfg(feature = "axum")]
    #[test]
    fn test_into_response_uses_http_status() {
        use axum::response::IntoResponse;

        let response = DomainError::invalid_argument("bad age").into_response();
        assert_eq!(response.status().as_u16(), 422);

        let response = DomainError::precondition_failed("stale etag").into_response();
        assert_eq!(response.status().as_u16(), 412);
    }

    #[cfg(feature = "tonic")]
    #[test]
    fn test_into_status_uses_rpc_code() {
        let status: tonic::Status = DomainError::unauthorised("no token").into();
        assert_eq!(status.code(), tonic::Code::Unauthenticated);
        assert_eq!(status.message(), "no token");

        let status: tonic::Status = DomainError::bad_request("missing").into();
        assert_eq!(status.code(), tonic::Code::FailedPrecondition);
    }
}
