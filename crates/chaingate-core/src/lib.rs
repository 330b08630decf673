//! chaingate-core — RPC connector with ordered endpoint failover.
//!
//! # Overview
//!
//! The core crate defines:
//!
//! - [`RpcConnector`] — picks the first working endpoint from a failover
//!   list and serves typed read queries against it
//! - [`RpcTransport`] / [`TransportFactory`] — the seam between the
//!   connector and the wire (HTTP in `chaingate-http`, fakes in tests)
//! - [`JsonRpcRequest`] / [`JsonRpcResponse`] — wire types
//! - [`QueryError`] / [`ErrorKind`] — tagged query failures
//! - [`units`] — exact wei → ether / gwei scaling
//!
//! # Example
//! ```rust,ignore
//! let endpoints = chaingate_core::default_endpoints();
//! let connector = RpcConnector::connect(&endpoints, &factory, ConnectorConfig::default()).await;
//! let head = connector.block_number().await?;
//! ```

pub mod address;
pub mod connector;
pub mod endpoint;
pub mod error;
pub mod query;
pub mod request;
pub mod transport;
pub mod units;

pub use connector::{ConnectorConfig, RpcConnector};
pub use endpoint::{default_endpoints, resolve_endpoints, Endpoint};
pub use error::{ErrorKind, QueryError, TransportError};
pub use query::{Balance, BlockNumber, ChainId, ConnectionStatus, GasPrice};
pub use request::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, RpcId};
pub use transport::{RpcTransport, TransportFactory};
