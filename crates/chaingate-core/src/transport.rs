//! The `RpcTransport` and `TransportFactory` traits.

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::endpoint::Endpoint;
use crate::error::TransportError;
use crate::request::{JsonRpcRequest, JsonRpcResponse};

/// An open handle to a single JSON-RPC endpoint.
///
/// # Object Safety
/// The trait is object-safe and is held by the connector as
/// `Arc<dyn RpcTransport>`.
#[async_trait]
pub trait RpcTransport: Send + Sync + 'static {
    /// Send a single JSON-RPC request and return the response.
    async fn send(&self, req: JsonRpcRequest) -> Result<JsonRpcResponse, TransportError>;

    /// Return the transport's identifier (URL or name).
    fn url(&self) -> &str;
}

/// Opens transport handles for endpoints from the failover list.
///
/// Opening must not perform network I/O; the connector runs the liveness
/// check itself.
pub trait TransportFactory: Send + Sync {
    fn open(&self, endpoint: &Endpoint) -> Result<Arc<dyn RpcTransport>, TransportError>;
}

/// Call `method` on `transport` and deserialize the result.
pub async fn call<T: DeserializeOwned>(
    transport: &dyn RpcTransport,
    id: u64,
    method: &str,
    params: Vec<Value>,
) -> Result<T, TransportError> {
    let req = JsonRpcRequest::new(id, method, params);
    let resp = transport.send(req).await?;
    let result = resp.into_result().map_err(TransportError::Rpc)?;
    serde_json::from_value(result).map_err(TransportError::Deserialization)
}
