//! Success payloads returned by the connector's read operations.

use serde::Serialize;

/// Current chain head.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockNumber {
    pub block_number: u64,
}

impl BlockNumber {
    pub fn message(&self) -> String {
        format!("current block number: {}", self.block_number)
    }
}

/// Native balance of an account, in wei and in ether.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Balance {
    /// EIP-55 checksummed form of the queried address.
    pub address: String,
    pub balance_wei: String,
    pub balance_eth: String,
}

impl Balance {
    pub fn message(&self) -> String {
        format!("balance of {}: {} ETH", self.address, self.balance_eth)
    }
}

/// Chain identifier reported by the node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChainId {
    pub chain_id: u64,
}

impl ChainId {
    pub fn message(&self) -> String {
        format!("current chain id: {}", self.chain_id)
    }
}

/// Current gas price, in wei and in gwei.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GasPrice {
    pub gas_price_wei: String,
    pub gas_price_gwei: String,
}

impl GasPrice {
    pub fn message(&self) -> String {
        format!("current gas price: {} Gwei", self.gas_price_gwei)
    }
}

/// Snapshot of the connector's connection state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionStatus {
    pub connected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<u64>,
}

impl ConnectionStatus {
    pub fn message(&self) -> String {
        match &self.provider {
            Some(name) if self.connected => format!("connected to Ethereum network via {name}"),
            _ => "not connected to an Ethereum node".to_string(),
        }
    }
}
