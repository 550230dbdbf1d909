//! OAPI client over a pluggable transport.

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::api::{ApiResponse, Operation};
use crate::config::Config;
use crate::error::{Error, Result};

pub const CONTENT_TYPE: &str = "application/json";

/// A fully built call, ready to be signed and sent.
#[derive(Debug, Clone)]
pub struct OutgoingRequest {
    pub operation: Operation,
    pub url: String,
    pub content_type: &'static str,
    pub user_agent: String,
    pub body: Vec<u8>,
}

/// What came back: the HTTP status and the raw body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Moves requests to the service and back.
///
/// Implementations own connection handling, request signing (the service
/// expects AWS SigV4-style signatures for service `oapi`), TLS, timeouts and
/// retries. Returning `Err` means no response was obtained.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: OutgoingRequest) -> Result<RawResponse>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn send(&self, request: OutgoingRequest) -> Result<RawResponse> {
        (**self).send(request).await
    }
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Box<T> {
    async fn send(&self, request: OutgoingRequest) -> Result<RawResponse> {
        (**self).send(request).await
    }
}

/// OAPI client. Implements [`OapiClient`](crate::api::OapiClient) for every
/// operation.
pub struct Client<T> {
    transport: T,
    config: Config,
    service_url: String,
}

impl<T: Transport> Client<T> {
    /// Create a new client. Fails if the config does not yield a valid
    /// service URL.
    pub fn new(config: Config, transport: T) -> Result<Self> {
        let service_url = config.service_url()?;

        Ok(Self {
            transport,
            config,
            service_url,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn service_url(&self) -> &str {
        &self.service_url
    }

    /// Send one request and classify the response.
    pub async fn call<Req, Resp>(&self, operation: Operation, request: &Req) -> Result<ApiResponse<Resp>>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned + Default,
    {
        let body = serde_json::to_vec(request).map_err(|source| Error::Encode { operation, source })?;
        let url = format!("{}{}", self.service_url, operation.path());

        tracing::debug!(%operation, %url, bytes = body.len(), "sending request");

        let request = OutgoingRequest {
            operation,
            url,
            content_type: CONTENT_TYPE,
            user_agent: self.config.user_agent.clone(),
            body,
        };

        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!(%operation, error = %e, "no response");
                return Err(e);
            }
        };

        tracing::debug!(
            %operation,
            status = response.status,
            bytes = response.body.len(),
            "received response"
        );

        let outcome = ApiResponse::decode(operation, response.status, &response.body)?;
        if let ApiResponse::Unmodeled { status, .. } = &outcome {
            tracing::warn!(%operation, status, "status not modeled for this operation");
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::OapiClient;
    use crate::models::{DeleteVolumeRequest, ReadVmsRequest};
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        sent: Mutex<Vec<OutgoingRequest>>,
    }

    #[async_trait]
    impl Transport for Recorder {
        async fn send(&self, request: OutgoingRequest) -> Result<RawResponse> {
            self.sent.lock().unwrap().push(request);
            Ok(RawResponse {
                status: 200,
                body: br#"{"ResponseContext":{"RequestId":"r"}}"#.to_vec(),
            })
        }
    }

    fn config() -> Config {
        Config::new("AK", "SK", "eu-west-2")
    }

    #[tokio::test]
    async fn builds_url_headers_and_body() {
        let client = Client::new(config(), Recorder::default()).unwrap();

        let request = DeleteVolumeRequest {
            volume_id: "vol-1".to_string(),
            ..Default::default()
        };
        let response = client.delete_volume(request).await.unwrap();
        assert!(response.is_success());

        let sent = client.transport().sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].operation, Operation::DeleteVolume);
        assert_eq!(sent[0].url, "https://api.eu-west-2.outscale.com/DeleteVolume");
        assert_eq!(sent[0].content_type, "application/json");
        assert_eq!(sent[0].user_agent, client.config().user_agent);
        assert_eq!(sent[0].body, br#"{"VolumeId":"vol-1"}"#);
    }

    #[tokio::test]
    async fn empty_request_sends_empty_object() {
        let client = Client::new(config(), Recorder::default()).unwrap();
        client.read_vms(ReadVmsRequest::default()).await.unwrap();

        let sent = client.transport().sent.lock().unwrap();
        assert_eq!(sent[0].body, b"{}");
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = config();
        config.region = String::new();
        assert!(matches!(
            Client::new(config, Recorder::default()),
            Err(Error::Config(_))
        ));
    }
}
