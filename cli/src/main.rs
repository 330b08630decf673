//! chaingate CLI — run the gateway or probe the failover list.
//!
//! Usage:
//! ```bash
//! # Serve the HTTP API on :8000 using the built-in failover list
//! chaingate serve
//!
//! # Serve against a local node first, Cloudflare second
//! chaingate serve --rpc-url local=http://127.0.0.1:8545 --rpc-url https://cloudflare-eth.com
//!
//! # Connect once and print every query
//! chaingate probe --address 0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045
//!
//! # Show the effective failover list
//! chaingate endpoints
//! ```

use std::process;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::{json, Value};

use chaingate_core::{QueryError, RpcConnector};
use chaingate_http::HttpTransportFactory;
use chaingate_server::{init_tracing, LogArgs, ServerConfig, UpstreamConfig};

#[derive(Parser)]
#[command(
    name = "chaingate",
    about = "Read-only Ethereum HTTP gateway with ordered RPC failover",
    version
)]
struct Cli {
    #[command(flatten)]
    log: LogArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Connect to the first working endpoint and serve the HTTP API
    Serve {
        #[command(flatten)]
        server: ServerConfig,
        #[command(flatten)]
        upstream: UpstreamConfig,
    },

    /// Connect once and print status plus every read query as JSON
    Probe {
        #[command(flatten)]
        upstream: UpstreamConfig,
        /// Also query the balance of this address
        #[arg(long)]
        address: Option<String>,
    },

    /// Print the effective failover list
    Endpoints {
        #[command(flatten)]
        upstream: UpstreamConfig,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(&cli.log.log_config()) {
        eprintln!("Warning: could not install log subscriber: {e}");
    }

    let result = match cli.command {
        Commands::Serve { server, upstream } => cmd_serve(server, upstream).await,
        Commands::Probe { upstream, address } => cmd_probe(upstream, address).await,
        Commands::Endpoints { upstream } => {
            cmd_endpoints(&upstream);
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

async fn connect(upstream: &UpstreamConfig) -> RpcConnector {
    let factory = HttpTransportFactory::new(upstream.http_config());
    RpcConnector::connect(&upstream.endpoints(), &factory, upstream.connector_config()).await
}

async fn cmd_serve(server: ServerConfig, upstream: UpstreamConfig) -> Result<()> {
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "chaingate starting");

    let connector = Arc::new(connect(&upstream).await);
    if !connector.is_connected() {
        tracing::warn!("serving without an upstream connection; queries will return 503");
    }

    let app = chaingate_server::router(connector, &server.api_prefix);
    let addr = server.bind_addr();
    chaingate_server::serve(&addr, app)
        .await
        .with_context(|| format!("server on {addr} failed"))
}

async fn cmd_probe(upstream: UpstreamConfig, address: Option<String>) -> Result<()> {
    let connector = connect(&upstream).await;
    let status = connector.status();

    let mut report = json!({
        "status": status,
        "block_number": outcome(connector.block_number().await),
        "chain_id": outcome(connector.chain_id().await),
        "gas_price": outcome(connector.gas_price().await),
    });
    if let Some(address) = address {
        report["balance"] = outcome(connector.balance(&address).await);
    }

    println!("{}", serde_json::to_string_pretty(&report)?);

    if status.connected {
        Ok(())
    } else {
        Err(anyhow!("no RPC endpoint passed the liveness check"))
    }
}

fn outcome<T: serde::Serialize>(result: Result<T, QueryError>) -> Value {
    match result {
        Ok(data) => serde_json::to_value(data).unwrap_or(Value::Null),
        Err(e) => json!({ "error": e.to_string(), "kind": e.kind() }),
    }
}

fn cmd_endpoints(upstream: &UpstreamConfig) {
    println!("Failover order:\n");
    for (i, endpoint) in upstream.endpoints().iter().enumerate() {
        println!("  {}. {:<12} {}", i + 1, endpoint.name, endpoint.url);
    }
}
