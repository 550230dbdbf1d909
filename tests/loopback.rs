//! A `Client` talking to an in-process backend through `service::route`.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use osc_oapi::models::*;
use osc_oapi::service::route_path;
use osc_oapi::{
    ApiResponse, Client, Config, Error, ErrorStatus, OapiClient, RawResponse, Transport,
};

/// Keeps keypairs in memory. Creating a name twice is a conflict.
#[derive(Default)]
struct Backend {
    keypairs: Mutex<HashMap<String, Keypair>>,
}

fn conflict(details: &str) -> ErrorResponse {
    ErrorResponse {
        errors: vec![Errors {
            code: "9011".to_string(),
            details: details.to_string(),
            r#type: "ResourceConflict".to_string(),
        }],
        response_context: ResponseContext {
            request_id: "req-conflict".to_string(),
        },
    }
}

#[async_trait]
impl OapiClient for Backend {
    async fn create_keypair(
        &self,
        request: CreateKeypairRequest,
    ) -> osc_oapi::Result<ApiResponse<CreateKeypairResponse>> {
        let mut keypairs = self.keypairs.lock().unwrap();
        if keypairs.contains_key(&request.keypair_name) {
            return Ok(ApiResponse::Conflict(conflict("keypair already exists")));
        }
        if request.dry_run {
            return Ok(ApiResponse::Success(CreateKeypairResponse::default()));
        }

        let keypair = Keypair {
            keypair_name: request.keypair_name.clone(),
            keypair_fingerprint: "aa:bb".to_string(),
        };
        keypairs.insert(request.keypair_name.clone(), keypair);

        Ok(ApiResponse::Success(CreateKeypairResponse {
            keypair: KeypairCreated {
                keypair_name: request.keypair_name,
                keypair_fingerprint: "aa:bb".to_string(),
                ..Default::default()
            },
            ..Default::default()
        }))
    }

    async fn read_keypairs(
        &self,
        request: ReadKeypairsRequest,
    ) -> osc_oapi::Result<ApiResponse<ReadKeypairsResponse>> {
        let keypairs = self.keypairs.lock().unwrap();
        let names = &request.filters.keypair_names;

        let mut found: Vec<Keypair> = keypairs
            .values()
            .filter(|k| names.is_empty() || names.contains(&k.keypair_name))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.keypair_name.cmp(&b.keypair_name));

        Ok(ApiResponse::Success(ReadKeypairsResponse {
            keypairs: found,
            ..Default::default()
        }))
    }

    async fn read_vms(
        &self,
        _request: ReadVmsRequest,
    ) -> osc_oapi::Result<ApiResponse<ReadVmsResponse>> {
        Ok(ApiResponse::Unmodeled {
            status: 503,
            body: "maintenance".to_string(),
        })
    }
}

/// Transport that hands each request to `route_path` on the backend.
struct Loopback(Backend);

#[async_trait]
impl Transport for Loopback {
    async fn send(&self, request: osc_oapi::api::OutgoingRequest) -> osc_oapi::Result<RawResponse> {
        let path = request
            .url
            .rsplit_once('/')
            .map(|(_, op)| op)
            .ok_or_else(|| Error::transport("no path"))?;
        Ok(route_path(&self.0, path, &request.body).await)
    }
}

fn client() -> Client<Loopback> {
    Client::new(
        Config::new("AK", "SK", "eu-west-2"),
        Loopback(Backend::default()),
    )
    .unwrap()
}

fn create(name: &str) -> CreateKeypairRequest {
    CreateKeypairRequest {
        keypair_name: name.to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn create_then_read_round_trips() {
    let client = client();

    let created = client.create_keypair(create("deploy")).await.unwrap();
    assert_eq!(created.success().unwrap().keypair.keypair_name, "deploy");

    let read = client
        .read_keypairs(ReadKeypairsRequest {
            filters: FiltersKeypair {
                keypair_names: vec!["deploy".to_string()],
                ..Default::default()
            },
            ..Default::default()
        })
        .await
        .unwrap()
        .into_result()
        .unwrap();

    assert_eq!(read.keypairs.len(), 1);
    assert_eq!(read.keypairs[0].keypair_fingerprint, "aa:bb");
}

#[tokio::test]
async fn conflict_arrives_as_conflict_variant() {
    let client = client();
    client.create_keypair(create("deploy")).await.unwrap();

    let again = client.create_keypair(create("deploy")).await.unwrap();
    assert_eq!(again.error_status(), Some(ErrorStatus::Conflict));
    assert!(again.success().is_none());
    assert_eq!(again.request_id(), Some("req-conflict"));
    assert_eq!(again.error_response(), Some(&conflict("keypair already exists")));
}

#[tokio::test]
async fn dry_run_does_not_persist() {
    let client = client();

    let mut request = create("probe");
    request.dry_run = true;
    assert!(client.create_keypair(request).await.unwrap().is_success());

    let read = client
        .read_keypairs(ReadKeypairsRequest::default())
        .await
        .unwrap();
    assert!(read.success().unwrap().keypairs.is_empty());
}

#[tokio::test]
async fn unmodeled_status_keeps_raw_body() {
    let client = client();

    let response = client.read_vms(ReadVmsRequest::default()).await.unwrap();
    assert_eq!(
        response,
        ApiResponse::Unmodeled {
            status: 503,
            body: "maintenance".to_string(),
        }
    );
}

#[tokio::test]
async fn unimplemented_operation_answers_501() {
    let client = client();

    let response = client.read_volumes(ReadVolumesRequest::default()).await.unwrap();
    match response {
        ApiResponse::Unmodeled { status, body } => {
            assert_eq!(status, 501);
            assert!(body.contains("ReadVolumes is not supported"));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[tokio::test]
async fn unknown_path_answers_404() {
    let backend = Backend::default();
    let response = route_path(&backend, "/ReadUnicorns", b"{}").await;
    assert_eq!(response.status, 404);
}

#[tokio::test]
async fn direct_backend_calls_skip_the_wire() {
    let backend = Backend::default();
    let err = backend
        .delete_volume(DeleteVolumeRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Unsupported(op) if op.name() == "DeleteVolume"));
}
