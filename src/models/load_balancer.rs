//! Load balancers, listeners, listener rules, health checks and server
//! certificates.

use serde::{Deserialize, Serialize};
use super::{is_default, is_false, is_zero, null_as_default, ResourceTag, ResponseContext};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct AccessLog {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub is_enabled: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub osu_bucket_name: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub osu_bucket_prefix: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_zero")]
    pub publication_interval: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ApplicationStickyCookiePolicy {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub cookie_name: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub policy_name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct BackendVmsHealth {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub state: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub state_reason: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub vm_id: String,
}

/// Health check configuration of a load balancer's backend VMs.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct HealthCheck {
    /// Seconds between two checks.
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_zero")]
    pub check_interval: i64,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_zero")]
    pub healthy_threshold: i64,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub path: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_zero")]
    pub port: i64,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub protocol: String,
    /// Seconds before a check is considered failed.
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_zero")]
    pub timeout: i64,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_zero")]
    pub unhealthy_threshold: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Listener {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_zero")]
    pub backend_port: i64,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub backend_protocol: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_zero")]
    pub load_balancer_port: i64,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub load_balancer_protocol: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub policy_names: Vec<String>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub server_certificate_id: String,
}

/// Listener to create with `CreateLoadBalancer` or
/// `CreateLoadBalancerListeners`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ListenerForCreation {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_zero")]
    pub backend_port: i64,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub backend_protocol: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_zero")]
    pub load_balancer_port: i64,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub load_balancer_protocol: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub server_certificate_id: String,
}

/// A routing rule attached to a listener.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ListenerRule {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub action: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub host_name_pattern: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub listener_rule_id: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub listener_rule_name: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub path_pattern: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_zero")]
    pub priority: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ListenerRules {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub listener_id: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub listener_rule: ListenerRule,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub vm_ids: Vec<String>,
}

/// A load balancer.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct LoadBalancer {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub access_log: AccessLog,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub application_sticky_cookie_policies: Vec<ApplicationStickyCookiePolicy>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub backend_vms_ids: Vec<String>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub dns_name: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub health_check: HealthCheck,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub listeners: Vec<Listener>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub load_balancer_name: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub load_balancer_sticky_cookie_policies: Vec<LoadBalancerStickyCookiePolicy>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub load_balancer_type: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub net_id: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub security_groups: Vec<String>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub source_security_group: SourceSecurityGroup,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub subnets: Vec<String>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub subregion_names: Vec<String>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<ResourceTag>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct LoadBalancerLight {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub load_balancer_name: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_zero")]
    pub load_balancer_port: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct LoadBalancerStickyCookiePolicy {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub policy_name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ServerCertificate {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub path: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub server_certificate_id: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub server_certificate_name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct SourceSecurityGroup {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub security_group_account_id: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub security_group_name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct FiltersLoadBalancer {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub load_balancer_names: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct CreateListenerRuleRequest {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub dry_run: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub listener: LoadBalancerLight,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub listener_rule: ListenerRule,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub vm_ids: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct CreateListenerRuleResponse {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub listener_id: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub listener_rule: ListenerRule,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub response_context: ResponseContext,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub vm_ids: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct CreateLoadBalancerRequest {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub dry_run: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub listeners: Vec<ListenerForCreation>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub load_balancer_name: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub load_balancer_type: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub security_groups: Vec<String>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub subnets: Vec<String>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub subregion_names: Vec<String>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<ResourceTag>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct CreateLoadBalancerResponse {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub load_balancer: LoadBalancer,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub response_context: ResponseContext,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct CreateLoadBalancerListenersRequest {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub dry_run: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub listeners: Vec<ListenerForCreation>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub load_balancer_name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct CreateLoadBalancerListenersResponse {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub response_context: ResponseContext,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct CreateLoadBalancerPolicyRequest {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub cookie_name: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub dry_run: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub load_balancer_name: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub policy_name: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub policy_type: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct CreateLoadBalancerPolicyResponse {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub response_context: ResponseContext,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct CreateServerCertificateRequest {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub dry_run: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub private_key: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub server_certificate_body: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub server_certificate_chain: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub server_certificate_name: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub server_certificate_path: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct CreateServerCertificateResponse {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub response_context: ResponseContext,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub server_certificate: ServerCertificate,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct DeleteListenerRuleRequest {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub dry_run: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub listener_rule_name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct DeleteListenerRuleResponse {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub response_context: ResponseContext,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct DeleteLoadBalancerRequest {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub dry_run: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub load_balancer_name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct DeleteLoadBalancerResponse {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub response_context: ResponseContext,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct DeleteLoadBalancerListenersRequest {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub dry_run: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub load_balancer_name: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub load_balancer_ports: Vec<i64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct DeleteLoadBalancerListenersResponse {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub response_context: ResponseContext,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct DeleteLoadBalancerPolicyRequest {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub dry_run: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub load_balancer_name: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub policy_name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct DeleteLoadBalancerPolicyResponse {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub response_context: ResponseContext,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct DeleteServerCertificateRequest {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub dry_run: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub server_certificate_name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct DeleteServerCertificateResponse {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub response_context: ResponseContext,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct DeregisterVmsInLoadBalancerRequest {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub backend_vms_ids: Vec<String>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub dry_run: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub load_balancer_name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct DeregisterVmsInLoadBalancerResponse {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub backend_vms_ids: Vec<String>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub response_context: ResponseContext,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ReadListenerRulesRequest {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub dry_run: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub listener_rule_names: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ReadListenerRulesResponse {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub listener_rules: Vec<ListenerRules>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub response_context: ResponseContext,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ReadLoadBalancersRequest {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub dry_run: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub filters: FiltersLoadBalancer,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ReadLoadBalancersResponse {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub load_balancers: Vec<LoadBalancer>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub response_context: ResponseContext,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ReadServerCertificatesRequest {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub dry_run: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub path: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ReadServerCertificatesResponse {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub response_context: ResponseContext,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub server_certificates: Vec<ServerCertificate>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ReadVmsHealthRequest {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub backend_vms_ids: Vec<String>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub dry_run: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub load_balancer_name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ReadVmsHealthResponse {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub backend_vms_health: Vec<BackendVmsHealth>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub response_context: ResponseContext,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct RegisterVmsInLoadBalancerRequest {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub backend_vms_ids: Vec<String>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub dry_run: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub load_balancer_name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct RegisterVmsInLoadBalancerResponse {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub backend_vms_ids: Vec<String>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub response_context: ResponseContext,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct UpdateHealthCheckRequest {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub dry_run: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub health_check: HealthCheck,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub load_balancer_name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct UpdateHealthCheckResponse {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub health_check: HealthCheck,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub response_context: ResponseContext,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct UpdateListenerRuleRequest {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub attribute: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub dry_run: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub listener_rule_name: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub value: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct UpdateListenerRuleResponse {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub response_context: ResponseContext,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct UpdateLoadBalancerRequest {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub access_log: AccessLog,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub dry_run: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub load_balancer_name: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_zero")]
    pub load_balancer_port: i64,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub policy_names: Vec<String>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub server_certificate_id: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct UpdateLoadBalancerResponse {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub response_context: ResponseContext,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct UpdateServerCertificateRequest {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub dry_run: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub new_path: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub new_server_certificate_name: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub server_certificate_name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct UpdateServerCertificateResponse {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub response_context: ResponseContext,
}
