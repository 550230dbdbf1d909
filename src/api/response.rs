//! Response classification.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::api::Operation;
use crate::error::{Error, Result};
use crate::models::ErrorResponse;

/// Error statuses the schema can model for an operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ErrorStatus {
    BadRequest,
    Unauthorized,
    Conflict,
    InternalError,
}

impl ErrorStatus {
    pub const fn code(self) -> u16 {
        match self {
            Self::BadRequest => 400,
            Self::Unauthorized => 401,
            Self::Conflict => 409,
            Self::InternalError => 500,
        }
    }

    pub const fn from_code(code: u16) -> Option<Self> {
        match code {
            400 => Some(Self::BadRequest),
            401 => Some(Self::Unauthorized),
            409 => Some(Self::Conflict),
            500 => Some(Self::InternalError),
            _ => None,
        }
    }
}

impl fmt::Display for ErrorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?}", self.code(), self)
    }
}

/// Outcome of one call that reached the service.
///
/// Exactly one variant describes a given response. Error variants are only
/// produced for the statuses the operation models (see
/// [`Operation::error_statuses`]); anything else lands in `Unmodeled` with the
/// raw body.
#[derive(Clone, Debug, PartialEq)]
pub enum ApiResponse<T> {
    Success(T),
    BadRequest(ErrorResponse),
    Unauthorized(ErrorResponse),
    Conflict(ErrorResponse),
    InternalError(ErrorResponse),
    Unmodeled { status: u16, body: String },
}

impl<T: DeserializeOwned + Default> ApiResponse<T> {
    /// Classify a raw response for `operation`.
    ///
    /// Any 2xx status decodes the success payload; an empty body decodes as
    /// the default payload. Payloads that do not match the expected shape are
    /// a local [`Error::Decode`].
    pub fn decode(operation: Operation, status: u16, body: &[u8]) -> Result<Self> {
        if (200..300).contains(&status) {
            return decode_body(operation, status, body).map(Self::Success);
        }

        let modeled = ErrorStatus::from_code(status)
            .filter(|s| operation.error_statuses().contains(s));

        let Some(error_status) = modeled else {
            return Ok(Self::Unmodeled {
                status,
                body: String::from_utf8_lossy(body).into_owned(),
            });
        };

        let errors: ErrorResponse = decode_body(operation, status, body)?;
        Ok(Self::from_error(error_status, errors))
    }
}

impl<T> ApiResponse<T> {
    pub fn from_error(status: ErrorStatus, errors: ErrorResponse) -> Self {
        match status {
            ErrorStatus::BadRequest => Self::BadRequest(errors),
            ErrorStatus::Unauthorized => Self::Unauthorized(errors),
            ErrorStatus::Conflict => Self::Conflict(errors),
            ErrorStatus::InternalError => Self::InternalError(errors),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// HTTP status this variant stands for. `Success` reports 200.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Success(_) => 200,
            Self::Unmodeled { status, .. } => *status,
            _ => self.error_status().map_or(0, ErrorStatus::code),
        }
    }

    pub fn error_status(&self) -> Option<ErrorStatus> {
        match self {
            Self::BadRequest(_) => Some(ErrorStatus::BadRequest),
            Self::Unauthorized(_) => Some(ErrorStatus::Unauthorized),
            Self::Conflict(_) => Some(ErrorStatus::Conflict),
            Self::InternalError(_) => Some(ErrorStatus::InternalError),
            Self::Success(_) | Self::Unmodeled { .. } => None,
        }
    }

    pub fn variant_name(&self) -> &'static str {
        match self {
            Self::Success(_) => "Success",
            Self::BadRequest(_) => "BadRequest",
            Self::Unauthorized(_) => "Unauthorized",
            Self::Conflict(_) => "Conflict",
            Self::InternalError(_) => "InternalError",
            Self::Unmodeled { .. } => "Unmodeled",
        }
    }

    pub fn success(&self) -> Option<&T> {
        match self {
            Self::Success(payload) => Some(payload),
            _ => None,
        }
    }

    pub fn into_success(self) -> Option<T> {
        match self {
            Self::Success(payload) => Some(payload),
            _ => None,
        }
    }

    pub fn error_response(&self) -> Option<&ErrorResponse> {
        match self {
            Self::BadRequest(e) | Self::Unauthorized(e) | Self::Conflict(e) | Self::InternalError(e) => {
                Some(e)
            }
            Self::Success(_) | Self::Unmodeled { .. } => None,
        }
    }

    /// Request id of an error payload, if the service sent one.
    pub fn request_id(&self) -> Option<&str> {
        self.error_response()
            .map(|e| e.response_context.request_id.as_str())
            .filter(|id| !id.is_empty())
    }

    /// Collapse into a `Result`, turning every non-success variant into an error.
    pub fn into_result(self) -> Result<T> {
        let status = self.status_code();
        match self {
            Self::Success(payload) => Ok(payload),
            Self::Unmodeled { status, body } => Err(Error::UnexpectedStatus { status, body }),
            Self::BadRequest(errors)
            | Self::Unauthorized(errors)
            | Self::Conflict(errors)
            | Self::InternalError(errors) => Err(Error::Api { status, errors }),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        match self.try_map(|payload| Ok::<_, std::convert::Infallible>(f(payload))) {
            Ok(mapped) => mapped,
            Err(never) => match never {},
        }
    }

    pub fn try_map<U, E>(self, f: impl FnOnce(T) -> Result<U, E>) -> Result<ApiResponse<U>, E> {
        Ok(match self {
            Self::Success(payload) => ApiResponse::Success(f(payload)?),
            Self::BadRequest(e) => ApiResponse::BadRequest(e),
            Self::Unauthorized(e) => ApiResponse::Unauthorized(e),
            Self::Conflict(e) => ApiResponse::Conflict(e),
            Self::InternalError(e) => ApiResponse::InternalError(e),
            Self::Unmodeled { status, body } => ApiResponse::Unmodeled { status, body },
        })
    }
}

impl<T: Serialize> ApiResponse<T> {
    /// Status and JSON body a server would answer with for this outcome.
    pub fn to_wire(&self) -> serde_json::Result<(u16, Vec<u8>)> {
        let body = match self {
            Self::Success(payload) => serde_json::to_vec(payload)?,
            Self::Unmodeled { body, .. } => body.clone().into_bytes(),
            _ => match self.error_response() {
                Some(errors) => serde_json::to_vec(errors)?,
                None => Vec::new(),
            },
        };
        Ok((self.status_code(), body))
    }
}

fn decode_body<T: DeserializeOwned + Default>(
    operation: Operation,
    status: u16,
    body: &[u8],
) -> Result<T> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }

    serde_json::from_slice(body).map_err(|source| Error::Decode {
        operation,
        status,
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CreateKeypairResponse, ReadVmsResponse};
    use serde_json::json;

    fn body(value: serde_json::Value) -> Vec<u8> {
        serde_json::to_vec(&value).unwrap()
    }

    #[test]
    fn ok_body_populates_success_only() {
        let raw = body(json!({
            "ResponseContext": { "RequestId": "req-1" },
            "Vms": [{ "VmId": "i-1" }]
        }));

        let response = ApiResponse::<ReadVmsResponse>::decode(Operation::ReadVms, 200, &raw).unwrap();
        assert!(response.is_success());
        assert!(response.error_response().is_none());
        assert_eq!(response.success().unwrap().vms[0].vm_id, "i-1");
        assert_eq!(response.status_code(), 200);
    }

    #[test]
    fn modeled_statuses_select_their_variant() {
        let raw = body(json!({
            "Errors": [{ "Code": "4000", "Details": "bad", "Type": "InvalidParameterValue" }],
            "ResponseContext": { "RequestId": "req-2" }
        }));

        for (status, name) in [
            (400, "BadRequest"),
            (401, "Unauthorized"),
            (409, "Conflict"),
            (500, "InternalError"),
        ] {
            let response =
                ApiResponse::<CreateKeypairResponse>::decode(Operation::CreateKeypair, status, &raw)
                    .unwrap();
            assert_eq!(response.variant_name(), name);
            assert_eq!(response.status_code(), status);
            assert!(response.success().is_none());
            assert_eq!(response.request_id(), Some("req-2"));
            assert_eq!(response.error_response().unwrap().errors[0].code, "4000");
        }
    }

    #[test]
    fn conflict_is_unmodeled_where_schema_omits_it() {
        assert!(!Operation::ReadVms.error_statuses().contains(&ErrorStatus::Conflict));

        let raw = br#"{"Errors":[]}"#;
        let response = ApiResponse::<ReadVmsResponse>::decode(Operation::ReadVms, 409, raw).unwrap();
        assert_eq!(
            response,
            ApiResponse::Unmodeled {
                status: 409,
                body: r#"{"Errors":[]}"#.to_string(),
            }
        );
    }

    #[test]
    fn operations_without_error_variants_never_decode_errors() {
        assert!(Operation::CreateAccount.error_statuses().is_empty());

        let response = ApiResponse::<crate::models::CreateAccountResponse>::decode(
            Operation::CreateAccount,
            400,
            b"not json",
        )
        .unwrap();
        assert_eq!(response.status_code(), 400);
        assert_eq!(response.variant_name(), "Unmodeled");
    }

    #[test]
    fn empty_success_body_is_default_payload() {
        let response = ApiResponse::<ReadVmsResponse>::decode(Operation::ReadVms, 200, b"").unwrap();
        assert_eq!(response, ApiResponse::Success(ReadVmsResponse::default()));
    }

    #[test]
    fn null_fields_still_decode_as_success() {
        let raw = br#"{"Vms":[{"VmId":"i-1","Tags":null,"Placement":null}],"ResponseContext":null}"#;

        let response = ApiResponse::<ReadVmsResponse>::decode(Operation::ReadVms, 200, raw).unwrap();
        let vm = &response.success().unwrap().vms[0];
        assert_eq!(vm.vm_id, "i-1");
        assert!(vm.tags.is_empty());
        assert!(vm.placement.subregion_name.is_empty());
    }

    #[test]
    fn malformed_success_body_is_local_error() {
        let err = ApiResponse::<ReadVmsResponse>::decode(Operation::ReadVms, 200, b"{\"Vms\": 3}")
            .unwrap_err();
        assert!(matches!(err, Error::Decode { status: 200, .. }));
    }

    #[test]
    fn into_result_surfaces_error_payloads() {
        let response: ApiResponse<ReadVmsResponse> =
            ApiResponse::from_error(ErrorStatus::Unauthorized, ErrorResponse::default());
        match response.into_result() {
            Err(Error::Api { status, .. }) => assert_eq!(status, 401),
            other => panic!("unexpected {other:?}"),
        }

        let response: ApiResponse<ReadVmsResponse> = ApiResponse::Unmodeled {
            status: 503,
            body: "busy".to_string(),
        };
        assert_eq!(response.into_result().unwrap_err().status(), Some(503));
    }

    #[test]
    fn to_wire_mirrors_decode() {
        let original: ApiResponse<ReadVmsResponse> = ApiResponse::from_error(
            ErrorStatus::BadRequest,
            ErrorResponse {
                response_context: crate::models::ResponseContext {
                    request_id: "req-3".to_string(),
                },
                ..Default::default()
            },
        );

        let (status, raw) = original.to_wire().unwrap();
        let decoded = ApiResponse::<ReadVmsResponse>::decode(Operation::ReadVms, status, &raw).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn error_status_codes_round_trip() {
        for status in [
            ErrorStatus::BadRequest,
            ErrorStatus::Unauthorized,
            ErrorStatus::Conflict,
            ErrorStatus::InternalError,
        ] {
            assert_eq!(ErrorStatus::from_code(status.code()), Some(status));
        }
        assert_eq!(ErrorStatus::from_code(404), None);
    }
}
