//! Envelopes shared by every operation: request correlation and error payloads.

use serde::{Deserialize, Serialize};
use super::{is_default, null_as_default};

/// Correlation data attached to every response, successful or not.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ResponseContext {
    /// Identifier to quote when contacting support about this call.
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub request_id: String,
}

/// Body returned with every modeled error status.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ErrorResponse {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<Errors>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub response_context: ResponseContext,
}

/// One structured error entry. The code vocabulary belongs to the remote
/// service.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Errors {
    /// Numeric code as a string.
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub code: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub details: String,
    /// Classifier such as `InvalidParameterValue` or `AccessDenied`.
    #[serde(
        rename = "Type",
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub r#type: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Attribute {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub key: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub value: String,
}

/// Name/values filter used by the operations that predate typed filters.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct FiltersOldFormat {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
}
