//! Untyped JSON entry point over any [`OapiClient`].
//!
//! `route` is the server half of the binding: it takes an operation and a raw
//! request body, calls the typed method and answers with the status and body
//! the service would send. Driving a [`Client`](crate::api::Client) through a
//! transport that calls `route` is lossless.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use tokio::runtime::Runtime;

use crate::api::{self, OapiClient, Operation, RawResponse};
use crate::error::Error;
use crate::models::{ErrorResponse, Errors};

/// Call `operation` on `client` with a JSON request body.
///
/// Local failures are mapped to the status a server would use: an
/// unparseable body is a 400, an operation the backend does not implement a
/// 501, anything else a 500. Each carries an `ErrorResponse` body.
pub async fn route<C: OapiClient + ?Sized>(
    client: &C,
    operation: Operation,
    body: &[u8],
) -> RawResponse {
    match api::invoke(client, operation, body).await {
        Ok(response) => response,
        Err(e) => {
            let (status, kind) = match &e {
                Error::InvalidRequest { .. } => (400, "InvalidParameter"),
                Error::Unsupported(_) => (501, "NotImplemented"),
                _ => (500, "InternalError"),
            };
            tracing::warn!(%operation, status, error = %e, "request failed locally");
            error_response(status, kind, &e.to_string())
        }
    }
}

/// Like [`route`], resolving the operation from a request path such as
/// `/ReadVms`. Unknown paths answer 404.
pub async fn route_path<C: OapiClient + ?Sized>(
    client: &C,
    path: &str,
    body: &[u8],
) -> RawResponse {
    match path.parse::<Operation>() {
        Ok(operation) => route(client, operation, body).await,
        Err(e) => error_response(404, "UnknownOperation", &e.to_string()),
    }
}

fn error_response(status: u16, kind: &str, details: &str) -> RawResponse {
    let errors = ErrorResponse {
        errors: vec![Errors {
            details: details.to_string(),
            r#type: kind.to_string(),
            ..Default::default()
        }],
        ..Default::default()
    };

    RawResponse {
        status,
        body: serde_json::to_vec(&errors).unwrap_or_default(),
    }
}

/// Description of one dispatchable method.
#[derive(Debug, Clone, Serialize)]
pub struct MethodInfo {
    pub name: String,
    pub description: String,
    pub path: String,
    pub error_statuses: Vec<u16>,
}

/// Synchronous dispatcher for an [`OapiClient`].
pub struct OapiService<C> {
    client: Arc<C>,
    runtime: Runtime,
}

impl<C: OapiClient + 'static> OapiService<C> {
    /// Create a new service around `client`.
    pub fn new(client: C) -> Result<Self> {
        Self::with_shared(Arc::new(client))
    }

    pub fn with_shared(client: Arc<C>) -> Result<Self> {
        let runtime = Runtime::new().context("Failed to start tokio runtime")?;
        Ok(Self { client, runtime })
    }

    pub fn client(&self) -> &Arc<C> {
        &self.client
    }

    pub fn name(&self) -> &str {
        "oapi"
    }

    pub fn version(&self) -> &str {
        env!("CARGO_PKG_VERSION")
    }

    /// Dispatch a method call.
    ///
    /// `method` is an operation name in any form `Operation` parses, or
    /// `health`/`methods`. `params` is the request record; operations return
    /// `{"Status": <code>, "Body": <json>}`.
    pub fn dispatch(&self, method: &str, params: HashMap<String, Value>) -> Result<Value> {
        match method {
            "health" => return Ok(self.health()),
            "methods" => return Ok(serde_json::to_value(self.method_list())?),
            _ => {}
        }

        let operation: Operation = method
            .parse()
            .map_err(|_| anyhow::anyhow!("Unknown method: {}", method))?;

        let body = serde_json::to_vec(&params).context("Failed to encode params")?;
        tracing::debug!(%operation, params = params.len(), "dispatching");

        let client = self.client.clone();
        let response = self
            .runtime
            .block_on(async move { route(&*client, operation, &body).await });

        let body = if response.body.is_empty() {
            Value::Null
        } else {
            match serde_json::from_slice(&response.body) {
                Ok(json) => json,
                Err(_) => Value::String(String::from_utf8_lossy(&response.body).into_owned()),
            }
        };

        Ok(serde_json::json!({
            "Status": response.status,
            "Body": body,
        }))
    }

    pub fn method_list(&self) -> Vec<MethodInfo> {
        Operation::ALL
            .iter()
            .map(|op| MethodInfo {
                name: op.name().into(),
                description: format!("POST {} with a {}Request body", op.path(), op.name()),
                path: op.path().into(),
                error_statuses: op.error_statuses().iter().map(|s| s.code()).collect(),
            })
            .collect()
    }

    /// Log the catalog size. Call once before serving.
    pub fn on_start(&self) {
        tracing::info!(
            service = self.name(),
            operations = Operation::ALL.len(),
            "OapiService starting"
        );
    }

    fn health(&self) -> Value {
        serde_json::json!({
            "status": "healthy",
            "operations": Operation::ALL.len(),
            "version": self.version(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiResponse;
    use crate::models::{Keypair, ReadKeypairsRequest, ReadKeypairsResponse};
    use async_trait::async_trait;
    use serde_json::json;

    fn params(value: Value) -> HashMap<String, Value> {
        serde_json::from_value(value).unwrap()
    }

    struct Keypairs;

    #[async_trait]
    impl OapiClient for Keypairs {
        async fn read_keypairs(
            &self,
            request: ReadKeypairsRequest,
        ) -> crate::Result<ApiResponse<ReadKeypairsResponse>> {
            let names = request.filters.keypair_names;
            Ok(ApiResponse::Success(ReadKeypairsResponse {
                keypairs: names
                    .into_iter()
                    .map(|keypair_name| Keypair {
                        keypair_name,
                        ..Default::default()
                    })
                    .collect(),
                ..Default::default()
            }))
        }
    }

    #[test]
    fn dispatch_calls_typed_method() {
        let service = OapiService::new(Keypairs).unwrap();

        let result = service
            .dispatch(
                "ReadKeypairs",
                params(json!({ "Filters": { "KeypairNames": ["deploy"] } })),
            )
            .unwrap();

        assert_eq!(
            result,
            json!({ "Status": 200, "Body": { "Keypairs": [{ "KeypairName": "deploy" }] } })
        );
    }

    #[test]
    fn dispatch_reports_unsupported_and_invalid() {
        let service = OapiService::new(Keypairs).unwrap();

        let result = service.dispatch("POST_ReadVms", HashMap::new()).unwrap();
        assert_eq!(result["Status"], 501);
        assert_eq!(result["Body"]["Errors"][0]["Type"], "NotImplemented");

        let result = service
            .dispatch("ReadKeypairs", params(json!({ "Filters": "nope" })))
            .unwrap();
        assert_eq!(result["Status"], 400);
        assert_eq!(result["Body"]["Errors"][0]["Type"], "InvalidParameter");

        assert!(service.dispatch("ReadUnicorns", HashMap::new()).is_err());
    }

    #[test]
    fn methods_cover_catalog() {
        let service = OapiService::new(Keypairs).unwrap();
        let methods = service.method_list();
        assert_eq!(methods.len(), Operation::ALL.len());

        let accept = methods.iter().find(|m| m.name == "AcceptNetPeering").unwrap();
        assert_eq!(accept.path, "/AcceptNetPeering");
        assert_eq!(accept.error_statuses, vec![400, 401, 409, 500]);

        let health = service.dispatch("health", HashMap::new()).unwrap();
        assert_eq!(health["operations"], 173);
    }
}
