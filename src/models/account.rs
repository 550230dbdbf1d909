//! Accounts, API keys, users, user groups, policies and API call logs.

use serde::{Deserialize, Serialize};
use super::{is_default, is_false, is_zero, null_as_default, ResourceTag, ResponseContext};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Account {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub account_id: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub city: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub company_name: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub country: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub customer_id: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub first_name: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub job_title: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub last_name: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub mobile: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub phone: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub state_province: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub vat_number: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub zip_code: String,
}

/// An access key pair. `SecretKey` is only returned on creation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ApiKey {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub account_id: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub api_key_id: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub secret_key: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub state: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<ResourceTag>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub user_name: String,
}

/// One API call record as returned by `ReadApiLogs`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Log {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_zero")]
    pub call_duration: i64,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub query_access_key: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub query_api_name: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub query_api_version: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub query_call_name: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub query_date: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub query_ip_address: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub query_raw: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_zero")]
    pub query_size: i64,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub query_user_agent: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub response_id: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_zero")]
    pub response_size: i64,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_zero")]
    pub response_status_code: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Policy {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub is_linkable: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub path: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub policy_default_version_id: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub policy_id: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub policy_name: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_zero")]
    pub resources_count: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct User {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub path: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub user_id: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub user_name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct UserGroup {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub path: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub user_group_id: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub user_group_name: String,
}

/// Selects the fields `ReadApiLogs` includes in each `Log`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct With {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub call_duration: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub query_access_key: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub query_api_name: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub query_api_version: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub query_call_name: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub query_date: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub query_ip_address: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub query_raw: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub query_size: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub query_user_agent: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub response_id: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub response_size: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub response_status_code: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct FiltersApiLog {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub query_access_keys: Vec<String>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub query_api_names: Vec<String>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub query_call_names: Vec<String>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub query_date_after: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub query_date_before: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub query_ip_addresses: Vec<String>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub query_user_agents: Vec<String>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub response_ids: Vec<String>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub response_status_codes: Vec<i64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct FiltersUserGroup {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub paths: Vec<String>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub user_names: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct AuthenticateAccountRequest {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub dry_run: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub login: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub password: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct AuthenticateAccountResponse {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub response_context: ResponseContext,
}

/// Checks a request signature computed by a third party against an
/// API key of the account.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct CheckSignatureRequest {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub api_key_id: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub dry_run: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub region_name: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub request_date: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub service: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub signature: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub signed_content: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct CheckSignatureResponse {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub response_context: ResponseContext,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct CopyAccountRequest {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub destination_region_name: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub dry_run: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub quota_profile: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct CopyAccountResponse {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub response_context: ResponseContext,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct CreateAccountRequest {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub account_id: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub api_keys: Vec<ApiKey>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub city: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub company_name: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub country: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub customer_id: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub dry_run: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub first_name: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub job_title: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub last_name: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub mobile: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub password: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub phone: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub quota_profile: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub state_province: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub vat_number: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub zip_code: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct CreateAccountResponse {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub account: Account,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub response_context: ResponseContext,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct CreateApiKeyRequest {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub api_key_id: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub dry_run: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub secret_key: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<ResourceTag>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub user_name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct CreateApiKeyResponse {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub api_key: ApiKey,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub response_context: ResponseContext,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct CreatePolicyRequest {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub document: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub dry_run: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub path: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub policy_name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct CreatePolicyResponse {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub policy: Policy,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub response_context: ResponseContext,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct CreateUserRequest {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub dry_run: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub path: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub user_name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct CreateUserResponse {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub response_context: ResponseContext,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub user: User,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct CreateUserGroupRequest {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub dry_run: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub path: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub user_group_name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct CreateUserGroupResponse {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub response_context: ResponseContext,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub user_group: UserGroup,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct DeleteApiKeyRequest {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub api_key_id: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub dry_run: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct DeleteApiKeyResponse {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub response_context: ResponseContext,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct DeletePolicyRequest {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub dry_run: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub policy_id: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct DeletePolicyResponse {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub response_context: ResponseContext,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct DeleteUserRequest {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub dry_run: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub user_name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct DeleteUserResponse {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub response_context: ResponseContext,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct DeleteUserGroupRequest {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub dry_run: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub user_group_name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct DeleteUserGroupResponse {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub response_context: ResponseContext,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct DeregisterUserInUserGroupRequest {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub dry_run: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub user_group_name: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub user_name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct DeregisterUserInUserGroupResponse {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub response_context: ResponseContext,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct LinkPolicyRequest {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub dry_run: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub policy_id: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub user_group_name: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub user_name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct LinkPolicyResponse {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub response_context: ResponseContext,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ReadAccountRequest {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub dry_run: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ReadAccountResponse {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub account: Account,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub response_context: ResponseContext,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ReadApiKeysRequest {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub dry_run: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<ResourceTag>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub user_name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ReadApiKeysResponse {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub api_keys: Vec<ApiKey>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub response_context: ResponseContext,
}

/// Reads the log of API calls made by the account.
///
/// Results are paged with `NextPageToken` and `ResultsPerPage`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ReadApiLogsRequest {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub dry_run: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub filters: FiltersApiLog,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub with: With,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ReadApiLogsResponse {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub logs: Vec<Log>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub response_context: ResponseContext,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ReadPoliciesRequest {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub dry_run: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub is_linked: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub path: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub user_group_name: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub user_name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ReadPoliciesResponse {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub policies: Vec<Policy>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub response_context: ResponseContext,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ReadUserGroupsRequest {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub dry_run: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub filters: FiltersUserGroup,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ReadUserGroupsResponse {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub response_context: ResponseContext,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub user_groups: Vec<UserGroup>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ReadUsersRequest {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub dry_run: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub path: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ReadUsersResponse {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub response_context: ResponseContext,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub users: Vec<User>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct RegisterUserInUserGroupRequest {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub dry_run: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub user_group_name: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub user_name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct RegisterUserInUserGroupResponse {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub response_context: ResponseContext,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ResetAccountPasswordRequest {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub dry_run: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub password: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub password_token: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ResetAccountPasswordResponse {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub response_context: ResponseContext,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct SendResetPasswordEmailRequest {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub dry_run: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub email: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct SendResetPasswordEmailResponse {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub response_context: ResponseContext,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct UnlinkPolicyRequest {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub dry_run: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub policy_id: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub user_group_name: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub user_name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct UnlinkPolicyResponse {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub response_context: ResponseContext,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct UpdateAccountRequest {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub city: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub company_name: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub country: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub dry_run: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub first_name: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub job_title: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub last_name: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub mobile: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub password: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub phone: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub state_province: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub vat_number: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub zip_code: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct UpdateAccountResponse {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub response_context: ResponseContext,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct UpdateApiKeyRequest {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub api_key_id: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub dry_run: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub state: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct UpdateApiKeyResponse {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub response_context: ResponseContext,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct UpdateUserRequest {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub dry_run: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub new_path: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub new_user_name: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub user_name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct UpdateUserResponse {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub response_context: ResponseContext,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct UpdateUserGroupRequest {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub dry_run: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub new_path: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub new_user_group_name: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub user_group_name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct UpdateUserGroupResponse {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub response_context: ResponseContext,
}
