//! Command-line / environment configuration.
//!
//! Every flag has an environment fallback so the service can be configured
//! from a container spec without arguments.

use std::time::Duration;

use clap::Args;

use chaingate_core::{resolve_endpoints, ConnectorConfig, Endpoint};
use chaingate_http::HttpClientConfig;

use crate::telemetry::LogConfig;

/// Where to find upstream nodes and how long to wait for them.
#[derive(Debug, Clone, Args)]
pub struct UpstreamConfig {
    /// RPC endpoint, `name=url` or bare URL; repeat to build a failover list
    /// (default: Ankr, PublicNode, Cloudflare)
    #[arg(long = "rpc-url", env = "CHAINGATE_RPC_URLS", value_delimiter = ',')]
    pub rpc_urls: Vec<String>,

    /// Per-request timeout in seconds, for the liveness check and every query
    #[arg(long, env = "CHAINGATE_TIMEOUT_SECS", default_value_t = 10)]
    pub timeout_secs: u64,
}

impl UpstreamConfig {
    /// The effective failover list.
    pub fn endpoints(&self) -> Vec<Endpoint> {
        resolve_endpoints(self.rpc_urls.as_slice())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connector_config(&self) -> ConnectorConfig {
        ConnectorConfig {
            request_timeout: self.request_timeout(),
        }
    }

    pub fn http_config(&self) -> HttpClientConfig {
        HttpClientConfig {
            request_timeout: self.request_timeout(),
        }
    }
}

/// Logging flags.
#[derive(Debug, Clone, Args)]
pub struct LogArgs {
    /// Log filter, e.g. `info` or `info,chaingate_core=debug`
    #[arg(long = "log-level", env = "CHAINGATE_LOG", default_value = "info")]
    pub level: String,

    /// Emit JSON structured logs
    #[arg(long = "log-json", env = "CHAINGATE_LOG_JSON")]
    pub json: bool,
}

impl LogArgs {
    pub fn log_config(&self) -> LogConfig {
        LogConfig {
            level: self.level.clone(),
            json: self.json,
        }
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, Args)]
pub struct ServerConfig {
    /// Address to bind
    #[arg(long, env = "CHAINGATE_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to bind
    #[arg(long, env = "CHAINGATE_PORT", default_value_t = 8000)]
    pub port: u16,

    /// Prefix for the API routes
    #[arg(long, env = "CHAINGATE_API_PREFIX", default_value = "/api/v1")]
    pub api_prefix: String,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        server: ServerConfig,
        #[command(flatten)]
        upstream: UpstreamConfig,
        #[command(flatten)]
        log: LogArgs,
    }

    #[test]
    fn defaults() {
        let cli = TestCli::try_parse_from(["chaingate"]).unwrap();
        assert_eq!(cli.server.bind_addr(), "0.0.0.0:8000");
        assert_eq!(cli.server.api_prefix, "/api/v1");
        assert_eq!(cli.upstream.request_timeout(), Duration::from_secs(10));
        assert_eq!(cli.upstream.endpoints(), chaingate_core::default_endpoints());
        assert_eq!(cli.log.log_config().level, "info");
        assert!(!cli.log.log_config().json);
    }

    #[test]
    fn rpc_url_overrides_defaults() {
        let cli = TestCli::try_parse_from([
            "chaingate",
            "--rpc-url",
            "local=http://127.0.0.1:8545,https://eth.llamarpc.com",
            "--rpc-url",
            "https://cloudflare-eth.com",
            "--timeout-secs",
            "3",
        ])
        .unwrap();
        let endpoints = cli.upstream.endpoints();
        let names: Vec<_> = endpoints.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["local", "custom-2", "custom-3"]);
        assert_eq!(cli.upstream.connector_config().request_timeout, Duration::from_secs(3));
        assert_eq!(cli.upstream.http_config().request_timeout, Duration::from_secs(3));
    }

    #[test]
    fn log_level_carries_full_directives() {
        let cli = TestCli::try_parse_from([
            "chaingate",
            "--log-level",
            "info,chaingate_core=debug",
            "--log-json",
        ])
        .unwrap();
        let log = cli.log.log_config();
        assert_eq!(log.level, "info,chaingate_core=debug");
        assert!(log.json);
    }
}
