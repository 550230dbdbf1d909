//! Data models for the OAPI wire format.
//!
//! Every record is a flat value type: fields map one-to-one onto the
//! PascalCase keys of the JSON schema, absent keys and `null` decode to the
//! zero value, and zero values (empty strings, `false`, `0`, empty lists, default
//! sub-records) are left out when encoding. The two cannot be told apart on
//! the wire, so `DryRun: false` and `DryRun` omitted are the same request.
//! Only the schema's tri-state booleans are `Option<bool>`.
//!
//! Nearly every mutating request carries `dry_run`, which asks the service to
//! validate the call without executing it.
//!
//! Types are grouped by resource family but re-exported flat from here.

use serde::{Deserialize, Deserializer};

mod account;
mod billing;
mod common;
mod image;
mod load_balancer;
mod net;
mod nic;
mod region;
mod security_group;
mod storage;
mod tag;
mod vm;
mod vpn;

pub use self::{
    account::*, billing::*, common::*, image::*, load_balancer::*, net::*, nic::*, region::*,
    security_group::*, storage::*, tag::*, vm::*, vpn::*,
};

pub(crate) fn is_false(value: &bool) -> bool {
    !*value
}

pub(crate) fn is_zero(value: &i64) -> bool {
    *value == 0
}

pub(crate) fn is_default<T: Default + PartialEq>(value: &T) -> bool {
    *value == T::default()
}

pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl ErrorResponse {
    /// One `Type (Code): Details` line per error entry.
    pub fn summary(&self) -> String {
        if self.errors.is_empty() {
            return "no error details".to_string();
        }

        self.errors
            .iter()
            .map(|e| {
                let kind = if e.r#type.is_empty() { "Error" } else { e.r#type.as_str() };
                match (e.code.is_empty(), e.details.is_empty()) {
                    (true, true) => kind.to_string(),
                    (true, false) => format!("{}: {}", kind, e.details),
                    (false, true) => format!("{} ({})", kind, e.code),
                    (false, false) => format!("{} ({}): {}", kind, e.code, e.details),
                }
            })
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Indented JSON rendering of the whole payload.
    pub fn pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| self.summary())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_request_serializes_to_empty_object() {
        let value = serde_json::to_value(ReadVmsRequest::default()).unwrap();
        assert_eq!(value, json!({}));

        let value = serde_json::to_value(CreateVmsRequest::default()).unwrap();
        assert_eq!(value, json!({}));
    }

    #[test]
    fn single_identifier_produces_single_key() {
        let request = DeleteVolumeRequest {
            volume_id: "vol-12345678".to_string(),
            ..Default::default()
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value, json!({ "VolumeId": "vol-12345678" }));
    }

    #[test]
    fn dry_run_false_is_indistinguishable_from_unset() {
        let explicit = AcceptNetPeeringRequest {
            dry_run: false,
            net_peering_id: "pcx-1".to_string(),
        };
        let implicit = AcceptNetPeeringRequest {
            net_peering_id: "pcx-1".to_string(),
            ..Default::default()
        };

        assert_eq!(
            serde_json::to_string(&explicit).unwrap(),
            serde_json::to_string(&implicit).unwrap()
        );

        let dry = AcceptNetPeeringRequest { dry_run: true, ..implicit };
        assert_eq!(
            serde_json::to_value(&dry).unwrap(),
            json!({ "DryRun": true, "NetPeeringId": "pcx-1" })
        );
    }

    #[test]
    fn tri_state_boolean_keeps_explicit_false() {
        let bsu = BsuToCreate {
            delete_on_vm_deletion: Some(false),
            volume_size: 10,
            ..Default::default()
        };

        let value = serde_json::to_value(&bsu).unwrap();
        assert_eq!(value, json!({ "DeleteOnVmDeletion": false, "VolumeSize": 10 }));

        let unset = serde_json::to_value(BsuToCreate::default()).unwrap();
        assert_eq!(unset, json!({}));
    }

    #[test]
    fn nested_default_records_are_omitted() {
        let request = CreateVmsRequest {
            image_id: "ami-1".to_string(),
            placement: Placement::default(),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&request).unwrap(), json!({ "ImageId": "ami-1" }));

        let request = CreateVmsRequest {
            image_id: "ami-1".to_string(),
            placement: Placement {
                subregion_name: "eu-west-2a".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "ImageId": "ami-1", "Placement": { "SubregionName": "eu-west-2a" } })
        );
    }

    #[test]
    fn response_decodes_nested_resources() {
        let body = json!({
            "ResponseContext": { "RequestId": "0475ca1e-d0c5-441d-712a-da55a4175157" },
            "Vms": [{
                "VmId": "i-12345678",
                "State": "running",
                "LaunchNumber": 0,
                "Placement": { "SubregionName": "eu-west-2a", "Tenancy": "default" },
                "BlockDeviceMappings": [{
                    "DeviceName": "/dev/sda1",
                    "Bsu": { "VolumeId": "vol-1", "DeleteOnVmDeletion": true, "State": "attached" }
                }],
                "Tags": [{ "Key": "Name", "Value": "web" }],
                "SomeFutureField": { "ignored": true }
            }]
        });

        let response: ReadVmsResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.response_context.request_id, "0475ca1e-d0c5-441d-712a-da55a4175157");
        assert_eq!(response.vms.len(), 1);

        let vm = &response.vms[0];
        assert_eq!(vm.vm_id, "i-12345678");
        assert_eq!(vm.state, "running");
        assert_eq!(vm.placement.subregion_name, "eu-west-2a");
        assert_eq!(vm.block_device_mappings[0].bsu.delete_on_vm_deletion, Some(true));
        assert_eq!(vm.tags[0].key, "Name");
        assert!(vm.nics.is_empty());
    }

    #[test]
    fn null_decodes_as_zero_value() {
        let body = json!({
            "Vms": [{
                "VmId": "i-1",
                "Tags": null,
                "Placement": null,
                "State": null,
                "LaunchNumber": null,
                "IsSourceDestChecked": null,
                "BlockDeviceMappings": [{
                    "DeviceName": "/dev/sda1",
                    "Bsu": { "DeleteOnVmDeletion": null }
                }]
            }],
            "ResponseContext": null
        });

        let response: ReadVmsResponse = serde_json::from_value(body).unwrap();
        let vm = &response.vms[0];
        assert_eq!(vm.vm_id, "i-1");
        assert!(vm.tags.is_empty());
        assert_eq!(vm.placement, Placement::default());
        assert_eq!(vm.state, "");
        assert_eq!(vm.launch_number, 0);
        assert!(!vm.is_source_dest_checked);
        assert_eq!(vm.block_device_mappings[0].bsu.delete_on_vm_deletion, None);
        assert_eq!(response.response_context, ResponseContext::default());

        let empty: ReadVmsResponse = serde_json::from_value(json!({ "Vms": null })).unwrap();
        assert_eq!(empty, ReadVmsResponse::default());
    }

    #[test]
    fn round_trip_preserves_populated_fields() {
        let rule = SecurityGroupRule {
            from_port_range: 22,
            to_port_range: 22,
            ip_protocol: "tcp".to_string(),
            ip_ranges: vec!["10.0.0.0/16".to_string()],
            security_groups_members: vec![SecurityGroupsMember {
                security_group_id: "sg-1".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };

        let encoded = serde_json::to_string(&rule).unwrap();
        let decoded: SecurityGroupRule = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, rule);
    }

    #[test]
    fn keyword_field_uses_schema_name() {
        let error = Errors {
            code: "4045".to_string(),
            details: String::new(),
            r#type: "InvalidParameterValue".to_string(),
        };

        let value = serde_json::to_value(&error).unwrap();
        assert_eq!(value, json!({ "Code": "4045", "Type": "InvalidParameterValue" }));
    }

    #[test]
    fn error_summary_lists_every_entry() {
        let response = ErrorResponse {
            errors: vec![
                Errors {
                    code: "4045".to_string(),
                    details: "bad VmId".to_string(),
                    r#type: "InvalidParameterValue".to_string(),
                },
                Errors {
                    r#type: "AccessDenied".to_string(),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };

        assert_eq!(
            response.summary(),
            "InvalidParameterValue (4045): bad VmId; AccessDenied"
        );
        assert_eq!(ErrorResponse::default().summary(), "no error details");
    }
}
