//! `TransportFactory` that opens one `HttpRpcClient` per endpoint.

use std::sync::Arc;

use chaingate_core::endpoint::Endpoint;
use chaingate_core::error::TransportError;
use chaingate_core::transport::{RpcTransport, TransportFactory};

use crate::client::{HttpClientConfig, HttpRpcClient};

#[derive(Debug, Clone, Default)]
pub struct HttpTransportFactory {
    config: HttpClientConfig,
}

impl HttpTransportFactory {
    pub fn new(config: HttpClientConfig) -> Self {
        Self { config }
    }
}

impl TransportFactory for HttpTransportFactory {
    fn open(&self, endpoint: &Endpoint) -> Result<Arc<dyn RpcTransport>, TransportError> {
        let url = reqwest::Url::parse(&endpoint.url).map_err(|e| {
            TransportError::Other(format!("invalid URL for {}: {e}", endpoint.name))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(TransportError::Other(format!(
                "unsupported URL scheme for {}: {}",
                endpoint.name, endpoint.url
            )));
        }
        let client = HttpRpcClient::new(endpoint.url.clone(), self.config.clone())?;
        Ok(Arc::new(client))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opens_http_endpoints() {
        let factory = HttpTransportFactory::default();
        let t = factory
            .open(&Endpoint::new("Cloudflare", "https://cloudflare-eth.com"))
            .unwrap();
        assert_eq!(t.url(), "https://cloudflare-eth.com");
    }

    #[test]
    fn scheme_is_case_insensitive() {
        let factory = HttpTransportFactory::default();
        assert!(factory
            .open(&Endpoint::new("upper", "HTTPS://cloudflare-eth.com"))
            .is_ok());
    }

    #[test]
    fn rejects_unparseable_urls() {
        let factory = HttpTransportFactory::default();
        let err = factory
            .open(&Endpoint::new("junk", "not a url"))
            .err()
            .unwrap();
        assert!(err.to_string().contains("invalid URL for junk"));
    }

    #[test]
    fn rejects_websocket_urls() {
        let factory = HttpTransportFactory::default();
        let err = factory
            .open(&Endpoint::new("ws", "wss://node.example"))
            .err()
            .unwrap();
        assert!(err.to_string().contains("unsupported URL scheme"));
    }
}
