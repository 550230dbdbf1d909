//! Local error type.
//!
//! Remote failures that the schema models (400/401/409/500 bodies) are not
//! errors at this level: they come back as variants of
//! [`ApiResponse`](crate::api::ApiResponse). `Error` covers everything that
//! prevented a call from producing a classified response.

use thiserror::Error;

use crate::api::Operation;
use crate::models::ErrorResponse;

#[derive(Debug, Error)]
pub enum Error {
    /// The transport could not complete the exchange (connect, TLS, signing, ...).
    #[error("transport error: {0}")]
    Transport(String),

    #[error("failed to encode {operation} request: {source}")]
    Encode {
        operation: Operation,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to decode {operation} response (status {status}): {source}")]
    Decode {
        operation: Operation,
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    /// A request body that does not parse as the operation's request type.
    #[error("invalid {operation} request: {source}")]
    InvalidRequest {
        operation: Operation,
        #[source]
        source: serde_json::Error,
    },

    /// A modeled error response turned into an error by
    /// [`ApiResponse::into_result`](crate::api::ApiResponse::into_result).
    #[error("request failed with status {status}: {}", .errors.summary())]
    Api { status: u16, errors: ErrorResponse },

    #[error("unexpected status {status}")]
    UnexpectedStatus { status: u16, body: String },

    /// The `OapiClient` implementation does not provide this operation.
    #[error("{0} is not supported by this client")]
    Unsupported(Operation),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("unknown operation: {0}")]
    UnknownOperation(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    pub fn transport(err: impl std::fmt::Display) -> Self {
        Self::Transport(err.to_string())
    }

    /// The HTTP status the service answered with, when there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Decode { status, .. }
            | Self::Api { status, .. }
            | Self::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Errors;

    #[test]
    fn api_error_message_includes_summary() {
        let err = Error::Api {
            status: 409,
            errors: ErrorResponse {
                errors: vec![Errors {
                    code: "9011".to_string(),
                    details: "keypair already exists".to_string(),
                    r#type: "ResourceConflict".to_string(),
                }],
                ..Default::default()
            },
        };

        assert_eq!(
            err.to_string(),
            "request failed with status 409: ResourceConflict (9011): keypair already exists"
        );
        assert_eq!(err.status(), Some(409));
    }

    #[test]
    fn local_errors_have_no_status() {
        assert_eq!(Error::transport("connection refused").status(), None);
        assert_eq!(
            Error::Unsupported(Operation::ReadVms).to_string(),
            "ReadVms is not supported by this client"
        );
    }
}
