//! The operation catalog.
//!
//! Every OAPI operation is a `POST` of one request record to
//! `<service-url>/<OperationName>`, answered by one response record or by an
//! [`ErrorResponse`](crate::models::ErrorResponse) under one of the statuses
//! the schema models for it. The table at the bottom of this file is the
//! single source for [`Operation`], the [`OapiClient`] trait, its
//! implementation on [`Client`] and the untyped JSON entry points.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;

use crate::api::{ApiResponse, Client, ErrorStatus, RawResponse, Transport};
use crate::error::{Error, Result};
use crate::models::*;

macro_rules! operations {
    ($(
        $op:ident => $method:ident($req:ident) -> $resp:ident [$($status:ident),*];
    )+) => {
        /// One remote operation.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Operation {
            $($op,)+
        }

        impl Operation {
            /// Every operation, in catalog order.
            pub const ALL: &'static [Operation] = &[$(Operation::$op,)+];

            pub const fn name(self) -> &'static str {
                match self {
                    $(Operation::$op => stringify!($op),)+
                }
            }

            /// Path appended to the service URL, e.g. `/ReadVms`.
            pub const fn path(self) -> &'static str {
                match self {
                    $(Operation::$op => concat!("/", stringify!($op)),)+
                }
            }

            /// Error statuses the schema declares for this operation. Other
            /// statuses decode as [`ApiResponse::Unmodeled`].
            pub const fn error_statuses(self) -> &'static [ErrorStatus] {
                match self {
                    $(Operation::$op => &[$(ErrorStatus::$status),*],)+
                }
            }

            /// Parse `body` as this operation's request and re-encode it in
            /// canonical wire form, dropping zero values.
            pub fn normalize_request(self, body: &[u8]) -> Result<serde_json::Value> {
                match self {
                    $(Operation::$op => {
                        let request: $req = decode_request(self, body)?;
                        encode_value(self, &request)
                    })+
                }
            }

            /// Classify a response body, returning the typed payload as JSON.
            pub fn decode_response(
                self,
                status: u16,
                body: &[u8],
            ) -> Result<ApiResponse<serde_json::Value>> {
                match self {
                    $(Operation::$op => {
                        ApiResponse::<$resp>::decode(self, status, body)?
                            .try_map(|payload| encode_value(self, &payload))
                    })+
                }
            }
        }

        /// The capability contract: one async method per operation.
        ///
        /// Each method performs exactly one call. A response the service
        /// produced, successful or not, is an `Ok(ApiResponse)`; `Err` means no
        /// classified response exists (transport failure, undecodable body).
        ///
        /// [`Client`] implements every method. Other implementations, such as
        /// in-process backends served through [`crate::service`], may
        /// implement a subset: the provided methods return
        /// [`Error::Unsupported`].
        #[async_trait]
        pub trait OapiClient: Send + Sync {
            $(
                async fn $method(&self, request: $req) -> Result<ApiResponse<$resp>> {
                    let _ = request;
                    Err(Error::Unsupported(Operation::$op))
                }
            )+
        }

        #[async_trait]
        impl<T: Transport> OapiClient for Client<T> {
            $(
                async fn $method(&self, request: $req) -> Result<ApiResponse<$resp>> {
                    self.call(Operation::$op, &request).await
                }
            )+
        }

        /// Decode `body` as the request of `operation`, invoke the matching
        /// method on `client` and encode the outcome as status and body.
        pub(crate) async fn invoke<C: OapiClient + ?Sized>(
            client: &C,
            operation: Operation,
            body: &[u8],
        ) -> Result<RawResponse> {
            let (status, body) = match operation {
                $(Operation::$op => {
                    let request: $req = decode_request(operation, body)?;
                    client
                        .$method(request)
                        .await?
                        .to_wire()
                        .map_err(|source| Error::Encode { operation, source })?
                })+
            };
            Ok(RawResponse { status, body })
        }
    };
}

fn decode_request<T: serde::de::DeserializeOwned + Default>(
    operation: Operation,
    body: &[u8],
) -> Result<T> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }

    serde_json::from_slice(body).map_err(|source| Error::InvalidRequest { operation, source })
}

fn encode_value<T: serde::Serialize>(operation: Operation, value: &T) -> Result<serde_json::Value> {
    serde_json::to_value(value).map_err(|source| Error::Encode { operation, source })
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = Error;

    /// Accepts `ReadVms`, `/ReadVms` and `POST_ReadVms`.
    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim();
        let name = name.strip_prefix("POST_").unwrap_or(name);
        let name = name.strip_prefix('/').unwrap_or(name);

        Operation::ALL
            .iter()
            .copied()
            .find(|op| op.name() == name)
            .ok_or_else(|| Error::UnknownOperation(s.to_string()))
    }
}

operations! {
    AcceptNetPeering => accept_net_peering(AcceptNetPeeringRequest) -> AcceptNetPeeringResponse [BadRequest, Unauthorized, Conflict, InternalError];
    AuthenticateAccount => authenticate_account(AuthenticateAccountRequest) -> AuthenticateAccountResponse [];
    CheckSignature => check_signature(CheckSignatureRequest) -> CheckSignatureResponse [];
    CopyAccount => copy_account(CopyAccountRequest) -> CopyAccountResponse [];
    CreateAccount => create_account(CreateAccountRequest) -> CreateAccountResponse [];
    CreateApiKey => create_api_key(CreateApiKeyRequest) -> CreateApiKeyResponse [];
    CreateClientGateway => create_client_gateway(CreateClientGatewayRequest) -> CreateClientGatewayResponse [];
    CreateDhcpOptions => create_dhcp_options(CreateDhcpOptionsRequest) -> CreateDhcpOptionsResponse [];
    CreateDirectLink => create_direct_link(CreateDirectLinkRequest) -> CreateDirectLinkResponse [];
    CreateDirectLinkInterface => create_direct_link_interface(CreateDirectLinkInterfaceRequest) -> CreateDirectLinkInterfaceResponse [];
    CreateImage => create_image(CreateImageRequest) -> CreateImageResponse [BadRequest, Unauthorized, InternalError];
    CreateImageExportTask => create_image_export_task(CreateImageExportTaskRequest) -> CreateImageExportTaskResponse [];
    CreateInternetService => create_internet_service(CreateInternetServiceRequest) -> CreateInternetServiceResponse [BadRequest, Unauthorized, InternalError];
    CreateKeypair => create_keypair(CreateKeypairRequest) -> CreateKeypairResponse [BadRequest, Unauthorized, Conflict, InternalError];
    CreateListenerRule => create_listener_rule(CreateListenerRuleRequest) -> CreateListenerRuleResponse [];
    CreateLoadBalancer => create_load_balancer(CreateLoadBalancerRequest) -> CreateLoadBalancerResponse [];
    CreateLoadBalancerListeners => create_load_balancer_listeners(CreateLoadBalancerListenersRequest) -> CreateLoadBalancerListenersResponse [];
    CreateLoadBalancerPolicy => create_load_balancer_policy(CreateLoadBalancerPolicyRequest) -> CreateLoadBalancerPolicyResponse [];
    CreateNatService => create_nat_service(CreateNatServiceRequest) -> CreateNatServiceResponse [BadRequest, Unauthorized, InternalError];
    CreateNet => create_net(CreateNetRequest) -> CreateNetResponse [BadRequest, Unauthorized, Conflict, InternalError];
    CreateNetAccessPoint => create_net_access_point(CreateNetAccessPointRequest) -> CreateNetAccessPointResponse [];
    CreateNetPeering => create_net_peering(CreateNetPeeringRequest) -> CreateNetPeeringResponse [BadRequest, Unauthorized, InternalError];
    CreateNic => create_nic(CreateNicRequest) -> CreateNicResponse [BadRequest, Unauthorized, InternalError];
    CreatePolicy => create_policy(CreatePolicyRequest) -> CreatePolicyResponse [];
    CreatePublicIp => create_public_ip(CreatePublicIpRequest) -> CreatePublicIpResponse [BadRequest, Unauthorized, InternalError];
    CreateRoute => create_route(CreateRouteRequest) -> CreateRouteResponse [BadRequest, Unauthorized, InternalError];
    CreateRouteTable => create_route_table(CreateRouteTableRequest) -> CreateRouteTableResponse [BadRequest, Unauthorized, InternalError];
    CreateSecurityGroup => create_security_group(CreateSecurityGroupRequest) -> CreateSecurityGroupResponse [BadRequest, Unauthorized, InternalError];
    CreateSecurityGroupRule => create_security_group_rule(CreateSecurityGroupRuleRequest) -> CreateSecurityGroupRuleResponse [BadRequest, Unauthorized, InternalError];
    CreateServerCertificate => create_server_certificate(CreateServerCertificateRequest) -> CreateServerCertificateResponse [];
    CreateSnapshot => create_snapshot(CreateSnapshotRequest) -> CreateSnapshotResponse [BadRequest, Unauthorized, InternalError];
    CreateSnapshotExportTask => create_snapshot_export_task(CreateSnapshotExportTaskRequest) -> CreateSnapshotExportTaskResponse [];
    CreateSubnet => create_subnet(CreateSubnetRequest) -> CreateSubnetResponse [BadRequest, Unauthorized, Conflict, InternalError];
    CreateTags => create_tags(CreateTagsRequest) -> CreateTagsResponse [BadRequest, Unauthorized, InternalError];
    CreateUser => create_user(CreateUserRequest) -> CreateUserResponse [];
    CreateUserGroup => create_user_group(CreateUserGroupRequest) -> CreateUserGroupResponse [];
    CreateVirtualGateway => create_virtual_gateway(CreateVirtualGatewayRequest) -> CreateVirtualGatewayResponse [];
    CreateVms => create_vms(CreateVmsRequest) -> CreateVmsResponse [BadRequest, Unauthorized, InternalError];
    CreateVolume => create_volume(CreateVolumeRequest) -> CreateVolumeResponse [BadRequest, Unauthorized, InternalError];
    CreateVpnConnection => create_vpn_connection(CreateVpnConnectionRequest) -> CreateVpnConnectionResponse [];
    CreateVpnConnectionRoute => create_vpn_connection_route(CreateVpnConnectionRouteRequest) -> CreateVpnConnectionRouteResponse [];
    DeleteApiKey => delete_api_key(DeleteApiKeyRequest) -> DeleteApiKeyResponse [];
    DeleteClientGateway => delete_client_gateway(DeleteClientGatewayRequest) -> DeleteClientGatewayResponse [];
    DeleteDhcpOptions => delete_dhcp_options(DeleteDhcpOptionsRequest) -> DeleteDhcpOptionsResponse [];
    DeleteDirectLink => delete_direct_link(DeleteDirectLinkRequest) -> DeleteDirectLinkResponse [];
    DeleteDirectLinkInterface => delete_direct_link_interface(DeleteDirectLinkInterfaceRequest) -> DeleteDirectLinkInterfaceResponse [];
    DeleteExportTask => delete_export_task(DeleteExportTaskRequest) -> DeleteExportTaskResponse [];
    DeleteImage => delete_image(DeleteImageRequest) -> DeleteImageResponse [BadRequest, Unauthorized, InternalError];
    DeleteInternetService => delete_internet_service(DeleteInternetServiceRequest) -> DeleteInternetServiceResponse [BadRequest, Unauthorized, InternalError];
    DeleteKeypair => delete_keypair(DeleteKeypairRequest) -> DeleteKeypairResponse [BadRequest, Unauthorized, InternalError];
    DeleteListenerRule => delete_listener_rule(DeleteListenerRuleRequest) -> DeleteListenerRuleResponse [];
    DeleteLoadBalancer => delete_load_balancer(DeleteLoadBalancerRequest) -> DeleteLoadBalancerResponse [];
    DeleteLoadBalancerListeners => delete_load_balancer_listeners(DeleteLoadBalancerListenersRequest) -> DeleteLoadBalancerListenersResponse [];
    DeleteLoadBalancerPolicy => delete_load_balancer_policy(DeleteLoadBalancerPolicyRequest) -> DeleteLoadBalancerPolicyResponse [];
    DeleteNatService => delete_nat_service(DeleteNatServiceRequest) -> DeleteNatServiceResponse [BadRequest, Unauthorized, InternalError];
    DeleteNet => delete_net(DeleteNetRequest) -> DeleteNetResponse [BadRequest, Unauthorized, InternalError];
    DeleteNetAccessPoints => delete_net_access_points(DeleteNetAccessPointsRequest) -> DeleteNetAccessPointsResponse [];
    DeleteNetPeering => delete_net_peering(DeleteNetPeeringRequest) -> DeleteNetPeeringResponse [BadRequest, Unauthorized, Conflict, InternalError];
    DeleteNic => delete_nic(DeleteNicRequest) -> DeleteNicResponse [BadRequest, Unauthorized, InternalError];
    DeletePolicy => delete_policy(DeletePolicyRequest) -> DeletePolicyResponse [];
    DeletePublicIp => delete_public_ip(DeletePublicIpRequest) -> DeletePublicIpResponse [BadRequest, Unauthorized, InternalError];
    DeleteRoute => delete_route(DeleteRouteRequest) -> DeleteRouteResponse [BadRequest, Unauthorized, InternalError];
    DeleteRouteTable => delete_route_table(DeleteRouteTableRequest) -> DeleteRouteTableResponse [BadRequest, Unauthorized, InternalError];
    DeleteSecurityGroup => delete_security_group(DeleteSecurityGroupRequest) -> DeleteSecurityGroupResponse [BadRequest, Unauthorized, InternalError];
    DeleteSecurityGroupRule => delete_security_group_rule(DeleteSecurityGroupRuleRequest) -> DeleteSecurityGroupRuleResponse [BadRequest, Unauthorized, InternalError];
    DeleteServerCertificate => delete_server_certificate(DeleteServerCertificateRequest) -> DeleteServerCertificateResponse [];
    DeleteSnapshot => delete_snapshot(DeleteSnapshotRequest) -> DeleteSnapshotResponse [BadRequest, Unauthorized, InternalError];
    DeleteSubnet => delete_subnet(DeleteSubnetRequest) -> DeleteSubnetResponse [BadRequest, Unauthorized, InternalError];
    DeleteTags => delete_tags(DeleteTagsRequest) -> DeleteTagsResponse [BadRequest, Unauthorized, InternalError];
    DeleteUser => delete_user(DeleteUserRequest) -> DeleteUserResponse [];
    DeleteUserGroup => delete_user_group(DeleteUserGroupRequest) -> DeleteUserGroupResponse [];
    DeleteVirtualGateway => delete_virtual_gateway(DeleteVirtualGatewayRequest) -> DeleteVirtualGatewayResponse [];
    DeleteVms => delete_vms(DeleteVmsRequest) -> DeleteVmsResponse [BadRequest, Unauthorized, InternalError];
    DeleteVolume => delete_volume(DeleteVolumeRequest) -> DeleteVolumeResponse [BadRequest, Unauthorized, InternalError];
    DeleteVpnConnection => delete_vpn_connection(DeleteVpnConnectionRequest) -> DeleteVpnConnectionResponse [];
    DeleteVpnConnectionRoute => delete_vpn_connection_route(DeleteVpnConnectionRouteRequest) -> DeleteVpnConnectionRouteResponse [];
    DeregisterUserInUserGroup => deregister_user_in_user_group(DeregisterUserInUserGroupRequest) -> DeregisterUserInUserGroupResponse [];
    DeregisterVmsInLoadBalancer => deregister_vms_in_load_balancer(DeregisterVmsInLoadBalancerRequest) -> DeregisterVmsInLoadBalancerResponse [];
    LinkInternetService => link_internet_service(LinkInternetServiceRequest) -> LinkInternetServiceResponse [BadRequest, Unauthorized, InternalError];
    LinkNic => link_nic(LinkNicRequest) -> LinkNicResponse [BadRequest, Unauthorized, InternalError];
    LinkPolicy => link_policy(LinkPolicyRequest) -> LinkPolicyResponse [];
    LinkPrivateIps => link_private_ips(LinkPrivateIpsRequest) -> LinkPrivateIpsResponse [BadRequest, Unauthorized, InternalError];
    LinkPublicIp => link_public_ip(LinkPublicIpRequest) -> LinkPublicIpResponse [BadRequest, Unauthorized, InternalError];
    LinkRouteTable => link_route_table(LinkRouteTableRequest) -> LinkRouteTableResponse [BadRequest, Unauthorized, InternalError];
    LinkVirtualGateway => link_virtual_gateway(LinkVirtualGatewayRequest) -> LinkVirtualGatewayResponse [];
    LinkVolume => link_volume(LinkVolumeRequest) -> LinkVolumeResponse [BadRequest, Unauthorized, InternalError];
    PurchaseReservedVmsOffer => purchase_reserved_vms_offer(PurchaseReservedVmsOfferRequest) -> PurchaseReservedVmsOfferResponse [];
    ReadAccount => read_account(ReadAccountRequest) -> ReadAccountResponse [];
    ReadAccountConsumption => read_account_consumption(ReadAccountConsumptionRequest) -> ReadAccountConsumptionResponse [];
    ReadAdminPassword => read_admin_password(ReadAdminPasswordRequest) -> ReadAdminPasswordResponse [BadRequest, Unauthorized, InternalError];
    ReadApiKeys => read_api_keys(ReadApiKeysRequest) -> ReadApiKeysResponse [];
    ReadApiLogs => read_api_logs(ReadApiLogsRequest) -> ReadApiLogsResponse [];
    ReadBillableDigest => read_billable_digest(ReadBillableDigestRequest) -> ReadBillableDigestResponse [];
    ReadCatalog => read_catalog(ReadCatalogRequest) -> ReadCatalogResponse [];
    ReadClientGateways => read_client_gateways(ReadClientGatewaysRequest) -> ReadClientGatewaysResponse [];
    ReadConsoleOutput => read_console_output(ReadConsoleOutputRequest) -> ReadConsoleOutputResponse [BadRequest, Unauthorized, InternalError];
    ReadDhcpOptions => read_dhcp_options(ReadDhcpOptionsRequest) -> ReadDhcpOptionsResponse [];
    ReadDirectLinkInterfaces => read_direct_link_interfaces(ReadDirectLinkInterfacesRequest) -> ReadDirectLinkInterfacesResponse [];
    ReadDirectLinks => read_direct_links(ReadDirectLinksRequest) -> ReadDirectLinksResponse [];
    ReadImageExportTasks => read_image_export_tasks(ReadImageExportTasksRequest) -> ReadImageExportTasksResponse [];
    ReadImages => read_images(ReadImagesRequest) -> ReadImagesResponse [BadRequest, Unauthorized, InternalError];
    ReadInternetServices => read_internet_services(ReadInternetServicesRequest) -> ReadInternetServicesResponse [BadRequest, Unauthorized, InternalError];
    ReadKeypairs => read_keypairs(ReadKeypairsRequest) -> ReadKeypairsResponse [BadRequest, Unauthorized, InternalError];
    ReadListenerRules => read_listener_rules(ReadListenerRulesRequest) -> ReadListenerRulesResponse [];
    ReadLoadBalancers => read_load_balancers(ReadLoadBalancersRequest) -> ReadLoadBalancersResponse [];
    ReadLocations => read_locations(ReadLocationsRequest) -> ReadLocationsResponse [];
    ReadNatServices => read_nat_services(ReadNatServicesRequest) -> ReadNatServicesResponse [BadRequest, Unauthorized, InternalError];
    ReadNetAccessPointServices => read_net_access_point_services(ReadNetAccessPointServicesRequest) -> ReadNetAccessPointServicesResponse [];
    ReadNetAccessPoints => read_net_access_points(ReadNetAccessPointsRequest) -> ReadNetAccessPointsResponse [];
    ReadNetPeerings => read_net_peerings(ReadNetPeeringsRequest) -> ReadNetPeeringsResponse [BadRequest, Unauthorized, InternalError];
    ReadNets => read_nets(ReadNetsRequest) -> ReadNetsResponse [BadRequest, Unauthorized, InternalError];
    ReadNics => read_nics(ReadNicsRequest) -> ReadNicsResponse [BadRequest, Unauthorized, InternalError];
    ReadPolicies => read_policies(ReadPoliciesRequest) -> ReadPoliciesResponse [];
    ReadPrefixLists => read_prefix_lists(ReadPrefixListsRequest) -> ReadPrefixListsResponse [];
    ReadProductTypes => read_product_types(ReadProductTypesRequest) -> ReadProductTypesResponse [];
    ReadPublicCatalog => read_public_catalog(ReadPublicCatalogRequest) -> ReadPublicCatalogResponse [];
    ReadPublicIpRanges => read_public_ip_ranges(ReadPublicIpRangesRequest) -> ReadPublicIpRangesResponse [];
    ReadPublicIps => read_public_ips(ReadPublicIpsRequest) -> ReadPublicIpsResponse [BadRequest, Unauthorized, InternalError];
    ReadQuotas => read_quotas(ReadQuotasRequest) -> ReadQuotasResponse [];
    ReadRegionConfig => read_region_config(ReadRegionConfigRequest) -> ReadRegionConfigResponse [];
    ReadRegions => read_regions(ReadRegionsRequest) -> ReadRegionsResponse [];
    ReadReservedVmOffers => read_reserved_vm_offers(ReadReservedVmOffersRequest) -> ReadReservedVmOffersResponse [];
    ReadReservedVms => read_reserved_vms(ReadReservedVmsRequest) -> ReadReservedVmsResponse [];
    ReadRouteTables => read_route_tables(ReadRouteTablesRequest) -> ReadRouteTablesResponse [BadRequest, Unauthorized, InternalError];
    ReadSecurityGroups => read_security_groups(ReadSecurityGroupsRequest) -> ReadSecurityGroupsResponse [BadRequest, Unauthorized, InternalError];
    ReadServerCertificates => read_server_certificates(ReadServerCertificatesRequest) -> ReadServerCertificatesResponse [];
    ReadSnapshotExportTasks => read_snapshot_export_tasks(ReadSnapshotExportTasksRequest) -> ReadSnapshotExportTasksResponse [];
    ReadSnapshots => read_snapshots(ReadSnapshotsRequest) -> ReadSnapshotsResponse [BadRequest, Unauthorized, InternalError];
    ReadSubnets => read_subnets(ReadSubnetsRequest) -> ReadSubnetsResponse [BadRequest, Unauthorized, InternalError];
    ReadSubregions => read_subregions(ReadSubregionsRequest) -> ReadSubregionsResponse [];
    ReadTags => read_tags(ReadTagsRequest) -> ReadTagsResponse [BadRequest, Unauthorized, InternalError];
    ReadUserGroups => read_user_groups(ReadUserGroupsRequest) -> ReadUserGroupsResponse [];
    ReadUsers => read_users(ReadUsersRequest) -> ReadUsersResponse [];
    ReadVirtualGateways => read_virtual_gateways(ReadVirtualGatewaysRequest) -> ReadVirtualGatewaysResponse [];
    ReadVmTypes => read_vm_types(ReadVmTypesRequest) -> ReadVmTypesResponse [];
    ReadVms => read_vms(ReadVmsRequest) -> ReadVmsResponse [BadRequest, Unauthorized, InternalError];
    ReadVmsHealth => read_vms_health(ReadVmsHealthRequest) -> ReadVmsHealthResponse [];
    ReadVmsState => read_vms_state(ReadVmsStateRequest) -> ReadVmsStateResponse [BadRequest, Unauthorized, InternalError];
    ReadVolumes => read_volumes(ReadVolumesRequest) -> ReadVolumesResponse [BadRequest, Unauthorized, InternalError];
    ReadVpnConnections => read_vpn_connections(ReadVpnConnectionsRequest) -> ReadVpnConnectionsResponse [];
    RebootVms => reboot_vms(RebootVmsRequest) -> RebootVmsResponse [BadRequest, Unauthorized, InternalError];
    RegisterUserInUserGroup => register_user_in_user_group(RegisterUserInUserGroupRequest) -> RegisterUserInUserGroupResponse [];
    RegisterVmsInLoadBalancer => register_vms_in_load_balancer(RegisterVmsInLoadBalancerRequest) -> RegisterVmsInLoadBalancerResponse [];
    RejectNetPeering => reject_net_peering(RejectNetPeeringRequest) -> RejectNetPeeringResponse [BadRequest, Unauthorized, Conflict, InternalError];
    ResetAccountPassword => reset_account_password(ResetAccountPasswordRequest) -> ResetAccountPasswordResponse [];
    SendResetPasswordEmail => send_reset_password_email(SendResetPasswordEmailRequest) -> SendResetPasswordEmailResponse [];
    StartVms => start_vms(StartVmsRequest) -> StartVmsResponse [BadRequest, Unauthorized, InternalError];
    StopVms => stop_vms(StopVmsRequest) -> StopVmsResponse [BadRequest, Unauthorized, InternalError];
    UnlinkInternetService => unlink_internet_service(UnlinkInternetServiceRequest) -> UnlinkInternetServiceResponse [BadRequest, Unauthorized, InternalError];
    UnlinkNic => unlink_nic(UnlinkNicRequest) -> UnlinkNicResponse [BadRequest, Unauthorized, InternalError];
    UnlinkPolicy => unlink_policy(UnlinkPolicyRequest) -> UnlinkPolicyResponse [];
    UnlinkPrivateIps => unlink_private_ips(UnlinkPrivateIpsRequest) -> UnlinkPrivateIpsResponse [BadRequest, Unauthorized, InternalError];
    UnlinkPublicIp => unlink_public_ip(UnlinkPublicIpRequest) -> UnlinkPublicIpResponse [BadRequest, Unauthorized, InternalError];
    UnlinkRouteTable => unlink_route_table(UnlinkRouteTableRequest) -> UnlinkRouteTableResponse [BadRequest, Unauthorized, InternalError];
    UnlinkVirtualGateway => unlink_virtual_gateway(UnlinkVirtualGatewayRequest) -> UnlinkVirtualGatewayResponse [];
    UnlinkVolume => unlink_volume(UnlinkVolumeRequest) -> UnlinkVolumeResponse [BadRequest, Unauthorized, InternalError];
    UpdateAccount => update_account(UpdateAccountRequest) -> UpdateAccountResponse [];
    UpdateApiKey => update_api_key(UpdateApiKeyRequest) -> UpdateApiKeyResponse [];
    UpdateHealthCheck => update_health_check(UpdateHealthCheckRequest) -> UpdateHealthCheckResponse [];
    UpdateImage => update_image(UpdateImageRequest) -> UpdateImageResponse [BadRequest, Unauthorized, InternalError];
    UpdateKeypair => update_keypair(UpdateKeypairRequest) -> UpdateKeypairResponse [];
    UpdateListenerRule => update_listener_rule(UpdateListenerRuleRequest) -> UpdateListenerRuleResponse [];
    UpdateLoadBalancer => update_load_balancer(UpdateLoadBalancerRequest) -> UpdateLoadBalancerResponse [];
    UpdateNet => update_net(UpdateNetRequest) -> UpdateNetResponse [BadRequest, Unauthorized, InternalError];
    UpdateNetAccessPoint => update_net_access_point(UpdateNetAccessPointRequest) -> UpdateNetAccessPointResponse [];
    UpdateNic => update_nic(UpdateNicRequest) -> UpdateNicResponse [BadRequest, Unauthorized, InternalError];
    UpdateRoute => update_route(UpdateRouteRequest) -> UpdateRouteResponse [BadRequest, Unauthorized, InternalError];
    UpdateRoutePropagation => update_route_propagation(UpdateRoutePropagationRequest) -> UpdateRoutePropagationResponse [];
    UpdateServerCertificate => update_server_certificate(UpdateServerCertificateRequest) -> UpdateServerCertificateResponse [];
    UpdateSnapshot => update_snapshot(UpdateSnapshotRequest) -> UpdateSnapshotResponse [BadRequest, Unauthorized, InternalError];
    UpdateUser => update_user(UpdateUserRequest) -> UpdateUserResponse [];
    UpdateUserGroup => update_user_group(UpdateUserGroupRequest) -> UpdateUserGroupResponse [];
    UpdateVm => update_vm(UpdateVmRequest) -> UpdateVmResponse [BadRequest, Unauthorized, InternalError];
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_names_are_unique_and_parse_back() {
        let names: HashSet<_> = Operation::ALL.iter().map(|op| op.name()).collect();
        assert_eq!(names.len(), Operation::ALL.len());
        assert_eq!(Operation::ALL.len(), 173);

        for op in Operation::ALL {
            assert_eq!(op.name().parse::<Operation>().unwrap(), *op);
            assert_eq!(op.path().parse::<Operation>().unwrap(), *op);
            assert_eq!(format!("POST_{op}").parse::<Operation>().unwrap(), *op);
            assert_eq!(op.path(), format!("/{}", op.name()));
        }
    }

    #[test]
    fn unknown_names_are_rejected() {
        assert!(matches!(
            "ReadUnicorns".parse::<Operation>(),
            Err(Error::UnknownOperation(name)) if name == "ReadUnicorns"
        ));
        // Names are case-sensitive, like the wire paths.
        assert!("readvms".parse::<Operation>().is_err());
    }

    #[test]
    fn modeled_status_sets_follow_the_schema() {
        use ErrorStatus::*;

        assert_eq!(
            Operation::AcceptNetPeering.error_statuses(),
            &[BadRequest, Unauthorized, Conflict, InternalError]
        );
        assert_eq!(
            Operation::ReadVms.error_statuses(),
            &[BadRequest, Unauthorized, InternalError]
        );
        assert!(Operation::ReadCatalog.error_statuses().is_empty());

        for op in Operation::ALL {
            let statuses = op.error_statuses();
            assert!(
                statuses.is_empty()
                    || statuses == [BadRequest, Unauthorized, InternalError]
                    || statuses == [BadRequest, Unauthorized, Conflict, InternalError],
                "{op} has an unexpected status set {statuses:?}"
            );
        }
    }

    #[test]
    fn normalize_drops_zero_values() {
        let body = br#"{"DryRun": false, "VolumeId": "vol-1", "Unknown": 1}"#;
        let normalized = Operation::DeleteVolume.normalize_request(body).unwrap();
        assert_eq!(normalized, serde_json::json!({ "VolumeId": "vol-1" }));

        let err = Operation::DeleteVolume
            .normalize_request(br#"{"VolumeId": 12}"#)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidRequest { operation: Operation::DeleteVolume, .. }));
    }

    #[test]
    fn every_operation_has_empty_request_and_default_response() {
        for op in Operation::ALL {
            assert_eq!(
                op.normalize_request(b"{}").unwrap(),
                serde_json::json!({}),
                "{op} request"
            );
            assert_eq!(op.normalize_request(b"").unwrap(), serde_json::json!({}), "{op} request");

            let decoded = op.decode_response(200, b"{}").unwrap();
            assert!(decoded.is_success(), "{op} response");
            assert_eq!(decoded.success().unwrap(), &serde_json::json!({}), "{op} response");
        }
    }

    #[test]
    fn decode_response_reports_variant() {
        let decoded = Operation::ReadVolumes
            .decode_response(200, br#"{"Volumes":[{"VolumeId":"vol-1","Size":10}]}"#)
            .unwrap();
        assert_eq!(
            decoded.success().unwrap(),
            &serde_json::json!({ "Volumes": [{ "VolumeId": "vol-1", "Size": 10 }] })
        );

        let decoded = Operation::ReadVolumes
            .decode_response(401, br#"{"Errors":[{"Type":"AccessDenied"}]}"#)
            .unwrap();
        assert_eq!(decoded.variant_name(), "Unauthorized");
    }
}
