//! `Client` against canned responses.

use std::sync::Mutex;

use async_trait::async_trait;
use osc_oapi::api::OutgoingRequest;
use osc_oapi::models::*;
use osc_oapi::{ApiResponse, Client, Config, Error, ErrorStatus, OapiClient, RawResponse, Transport};

/// Replays one response (or one failure) for every request.
struct Canned {
    reply: Result<RawResponse, String>,
    seen: Mutex<Vec<OutgoingRequest>>,
}

impl Canned {
    fn status(status: u16, body: &str) -> Self {
        Self {
            reply: Ok(RawResponse {
                status,
                body: body.as_bytes().to_vec(),
            }),
            seen: Mutex::new(Vec::new()),
        }
    }

    fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            seen: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl Transport for Canned {
    async fn send(&self, request: OutgoingRequest) -> osc_oapi::Result<RawResponse> {
        self.seen.lock().unwrap().push(request);
        self.reply.clone().map_err(Error::transport)
    }
}

fn client(transport: Canned) -> Client<Canned> {
    Client::new(Config::new("AK", "SK", "us-east-2"), transport).unwrap()
}

#[tokio::test]
async fn read_vms_success_decodes_nested_records() {
    let client = client(Canned::status(
        200,
        r#"{
            "ResponseContext": {"RequestId": "0475ca1e"},
            "Vms": [{
                "VmId": "i-12345678",
                "State": "running",
                "BlockDeviceMappings": [{"DeviceName": "/dev/sda1", "Bsu": {"VolumeId": "vol-1", "DeleteOnVmDeletion": true}}],
                "Tags": [{"Key": "env", "Value": "prod"}]
            }]
        }"#,
    ));

    let vms = client
        .read_vms(ReadVmsRequest::default())
        .await
        .unwrap()
        .into_result()
        .unwrap();

    let vm = &vms.vms[0];
    assert_eq!(vm.vm_id, "i-12345678");
    assert_eq!(vm.state, "running");
    assert_eq!(vm.block_device_mappings[0].bsu.volume_id, "vol-1");
    assert_eq!(vm.block_device_mappings[0].bsu.delete_on_vm_deletion, Some(true));
    assert_eq!(vm.tags[0].value, "prod");
    assert_eq!(vms.response_context.request_id, "0475ca1e");

    let seen = client.transport().seen.lock().unwrap();
    assert_eq!(seen[0].url, "https://api.us-east-2.outscale.com/ReadVms");
}

#[tokio::test]
async fn unauthorized_is_a_response_not_an_error() {
    let client = client(Canned::status(
        401,
        r#"{"Errors":[{"Code":"1","Type":"AccessDenied","Details":"bad signature"}],"ResponseContext":{"RequestId":"r-401"}}"#,
    ));

    let response = client.read_volumes(ReadVolumesRequest::default()).await.unwrap();
    assert_eq!(response.error_status(), Some(ErrorStatus::Unauthorized));
    assert_eq!(response.request_id(), Some("r-401"));

    let err = response.into_result().unwrap_err();
    assert_eq!(
        err.to_string(),
        "request failed with status 401: AccessDenied (1): bad signature"
    );
}

#[tokio::test]
async fn status_outside_the_schema_is_unmodeled() {
    // CreateAccount declares no error statuses.
    let client = client(Canned::status(400, r#"{"Errors":[]}"#));

    let response = client
        .create_account(CreateAccountRequest::default())
        .await
        .unwrap();
    assert_eq!(response.variant_name(), "Unmodeled");
    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn transport_failure_is_an_error() {
    let client = client(Canned::failing("connection refused"));

    let err = client
        .delete_snapshot(DeleteSnapshotRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Transport(ref msg) if msg == "connection refused"));
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn garbage_success_body_is_a_decode_error() {
    let client = client(Canned::status(200, "<html>"));

    let err = client
        .read_subnets(ReadSubnetsRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Decode { status: 200, .. }));
}

#[tokio::test]
async fn empty_success_body_is_default_payload() {
    let client = client(Canned::status(200, ""));

    let response = client
        .delete_tags(DeleteTagsRequest::default())
        .await
        .unwrap();
    assert_eq!(response, ApiResponse::Success(DeleteTagsResponse::default()));
}
