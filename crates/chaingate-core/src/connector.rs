//! RPC connector with ordered endpoint failover.
//!
//! [`RpcConnector::connect`] walks the failover list once, keeps the first
//! endpoint that answers `eth_chainId`, and serves every later query from
//! that single handle. There is no reconnection: a connector that found no
//! working endpoint stays disconnected and answers every query with
//! [`QueryError::NotConnected`] without touching the network.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::address::parse_address;
use crate::endpoint::Endpoint;
use crate::error::{QueryError, TransportError};
use crate::query::{Balance, BlockNumber, ChainId, ConnectionStatus, GasPrice};
use crate::transport::{call, RpcTransport, TransportFactory};
use crate::units::{format_units, parse_quantity, parse_quantity_u64, ETHER_DECIMALS, GWEI_DECIMALS};

/// Configuration for [`RpcConnector`].
#[derive(Debug, Clone)]
pub struct ConnectorConfig {
    /// Upper bound for the liveness check and for each query.
    pub request_timeout: Duration,
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(10),
        }
    }
}

/// The endpoint that passed its liveness check.
struct Connection {
    endpoint: Endpoint,
    transport: Arc<dyn RpcTransport>,
    chain_id: u64,
}

/// Holds at most one upstream connection and serves typed read queries.
pub struct RpcConnector {
    connection: Option<Connection>,
    config: ConnectorConfig,
    next_id: AtomicU64,
}

impl RpcConnector {
    /// Try `endpoints` in order and keep the first one that answers
    /// `eth_chainId` within the configured timeout.
    ///
    /// Candidates after the first working one are never opened. Individual
    /// failures are logged and skipped.
    pub async fn connect(
        endpoints: &[Endpoint],
        factory: &dyn TransportFactory,
        config: ConnectorConfig,
    ) -> Self {
        let mut connector = Self {
            connection: None,
            config,
            next_id: AtomicU64::new(1),
        };

        for endpoint in endpoints {
            tracing::info!(endpoint = %endpoint.name, url = %endpoint.url, "trying RPC endpoint");

            let transport = match factory.open(endpoint) {
                Ok(t) => t,
                Err(e) => {
                    tracing::warn!(endpoint = %endpoint.name, error = %e, "failed to open transport");
                    continue;
                }
            };

            match connector.liveness_check(transport.as_ref()).await {
                Ok(chain_id) => {
                    tracing::info!(endpoint = %endpoint.name, chain_id, "connected to Ethereum network");
                    connector.connection = Some(Connection {
                        endpoint: endpoint.clone(),
                        transport,
                        chain_id,
                    });
                    return connector;
                }
                Err(e) => {
                    tracing::warn!(
                        endpoint = %endpoint.name,
                        url = %endpoint.url,
                        error = %e,
                        "liveness check failed, trying next endpoint"
                    );
                }
            }
        }

        tracing::error!(candidates = endpoints.len(), "all RPC endpoints failed");
        connector
    }

    async fn liveness_check(&self, transport: &dyn RpcTransport) -> Result<u64, QueryError> {
        let hex: String = self.timed(call(transport, self.request_id(), "eth_chainId", vec![])).await?;
        Ok(parse_quantity_u64(&hex)?)
    }

    /// Returns `true` if some endpoint passed its liveness check.
    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    /// The endpoint currently in use, if any.
    pub fn endpoint(&self) -> Option<&Endpoint> {
        self.connection.as_ref().map(|c| &c.endpoint)
    }

    pub fn status(&self) -> ConnectionStatus {
        match &self.connection {
            Some(c) => ConnectionStatus {
                connected: true,
                provider: Some(c.endpoint.name.clone()),
                url: Some(c.endpoint.url.clone()),
                chain_id: Some(c.chain_id),
            },
            None => ConnectionStatus {
                connected: false,
                provider: None,
                url: None,
                chain_id: None,
            },
        }
    }

    /// Current block height (`eth_blockNumber`).
    pub async fn block_number(&self) -> Result<BlockNumber, QueryError> {
        let hex: String = self.request("eth_blockNumber", vec![]).await?;
        Ok(BlockNumber {
            block_number: parse_quantity_u64(&hex)?,
        })
    }

    /// Native balance of `address` at the latest block (`eth_getBalance`).
    ///
    /// The address is validated before any request is sent.
    pub async fn balance(&self, address: &str) -> Result<Balance, QueryError> {
        self.transport()?;
        let address = parse_address(address)?.to_checksum(None);

        let hex: String = self
            .request("eth_getBalance", vec![json!(address), json!("latest")])
            .await?;
        let wei = parse_quantity(&hex)?;
        Ok(Balance {
            address,
            balance_wei: wei.to_string(),
            balance_eth: format_units(wei, ETHER_DECIMALS),
        })
    }

    /// Chain identifier (`eth_chainId`).
    pub async fn chain_id(&self) -> Result<ChainId, QueryError> {
        let hex: String = self.request("eth_chainId", vec![]).await?;
        Ok(ChainId {
            chain_id: parse_quantity_u64(&hex)?,
        })
    }

    /// Current gas price (`eth_gasPrice`).
    pub async fn gas_price(&self) -> Result<GasPrice, QueryError> {
        let hex: String = self.request("eth_gasPrice", vec![]).await?;
        let wei = parse_quantity(&hex)?;
        Ok(GasPrice {
            gas_price_wei: wei.to_string(),
            gas_price_gwei: format_units(wei, GWEI_DECIMALS),
        })
    }

    fn transport(&self) -> Result<&dyn RpcTransport, QueryError> {
        self.connection
            .as_ref()
            .map(|c| c.transport.as_ref())
            .ok_or(QueryError::NotConnected)
    }

    fn request_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Vec<Value>,
    ) -> Result<T, QueryError> {
        let transport = self.transport()?;
        let result = self.timed(call(transport, self.request_id(), method, params)).await;
        if let Err(e) = &result {
            tracing::debug!(method, error = %e, "query failed");
        }
        result
    }

    async fn timed<T>(
        &self,
        fut: impl Future<Output = Result<T, TransportError>>,
    ) -> Result<T, QueryError> {
        let timeout = self.config.request_timeout;
        tokio::time::timeout(timeout, fut)
            .await
            .map_err(|_| TransportError::timeout(timeout))?
            .map_err(QueryError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::error::ErrorKind;
    use crate::request::{JsonRpcRequest, JsonRpcResponse};

    /// Answers every method with a fixed hex string.
    struct Fixed(&'static str);

    #[async_trait]
    impl RpcTransport for Fixed {
        async fn send(&self, req: JsonRpcRequest) -> Result<JsonRpcResponse, TransportError> {
            Ok(JsonRpcResponse::success(req.id, Value::String(self.0.into())))
        }
        fn url(&self) -> &str {
            "fixed"
        }
    }

    struct FixedFactory(&'static str);

    impl TransportFactory for FixedFactory {
        fn open(&self, _endpoint: &Endpoint) -> Result<Arc<dyn RpcTransport>, TransportError> {
            Ok(Arc::new(Fixed(self.0)))
        }
    }

    async fn connected(answer: &'static str) -> RpcConnector {
        RpcConnector::connect(
            &[Endpoint::new("fixed", "http://fixed")],
            &FixedFactory(answer),
            ConnectorConfig::default(),
        )
        .await
    }

    #[tokio::test]
    async fn status_reports_endpoint_and_chain() {
        let c = connected("0x1").await;
        let status = c.status();
        assert!(status.connected);
        assert_eq!(status.provider.as_deref(), Some("fixed"));
        assert_eq!(status.chain_id, Some(1));
    }

    #[tokio::test]
    async fn balance_scales_to_ether() {
        let c = connected("0x14d1120d7b160000").await; // 1.5 ETH
        let b = c
            .balance("0xd8da6bf26964af9d7eed9e03e53415d37aa96045")
            .await
            .unwrap();
        assert_eq!(b.address, "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045");
        assert_eq!(b.balance_wei, "1500000000000000000");
        assert_eq!(b.balance_eth, "1.5");
    }

    #[tokio::test]
    async fn gas_price_scales_to_gwei() {
        let c = connected("0x3b9aca00").await;
        let g = c.gas_price().await.unwrap();
        assert_eq!(g.gas_price_wei, "1000000000");
        assert_eq!(g.gas_price_gwei, "1");
    }

    #[tokio::test]
    async fn malformed_quantity_is_protocol_error() {
        // built by hand: "latest" would never pass the liveness check
        let broken = RpcConnector {
            connection: Some(Connection {
                endpoint: Endpoint::new("broken", "http://broken"),
                transport: Arc::new(Fixed("latest")),
                chain_id: 1,
            }),
            config: ConnectorConfig::default(),
            next_id: AtomicU64::new(1),
        };
        let err = broken.block_number().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Protocol);
    }

    #[tokio::test]
    async fn digit_separators_fail_the_liveness_check() {
        let c = connected("0x1_0").await;
        assert!(!c.is_connected());
    }

    #[tokio::test]
    async fn empty_list_is_disconnected() {
        let c = RpcConnector::connect(&[], &FixedFactory("0x1"), ConnectorConfig::default()).await;
        assert!(!c.is_connected());
        assert!(c.endpoint().is_none());
        assert_eq!(c.chain_id().await.unwrap_err().kind(), ErrorKind::NotConnected);
    }
}
