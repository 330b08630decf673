//! chaingate-http — HTTP JSON-RPC transport for the chaingate connector.

pub mod client;
pub mod factory;

pub use client::{HttpClientConfig, HttpRpcClient};
pub use factory::HttpTransportFactory;
