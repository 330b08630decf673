//! Endpoint descriptors and the built-in failover list.
//!
//! The default list holds free, no-API-key Ethereum mainnet gateways, tried
//! in the order given here.

use std::fmt;

/// A named JSON-RPC endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub name: String,
    pub url: String,
}

impl Endpoint {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    /// Parse a user-supplied endpoint spec.
    ///
    /// Accepts either `name=url` or a bare URL. Bare URLs are named
    /// `custom-<position>` (1-based).
    pub fn parse(spec: &str, position: usize) -> Self {
        let spec = spec.trim();
        match spec.split_once('=') {
            Some((name, url)) if !name.is_empty() && !name.contains('/') => {
                Self::new(name.trim(), url.trim())
            }
            _ => Self::new(format!("custom-{position}"), spec),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.url)
    }
}

/// Ankr public RPC (Ethereum mainnet).
pub const ANKR_MAINNET: &str = "https://rpc.ankr.com/eth";
/// PublicNode (Ethereum mainnet).
pub const PUBLICNODE_MAINNET: &str = "https://ethereum.publicnode.com";
/// Cloudflare Ethereum gateway (Ethereum mainnet only).
pub const CLOUDFLARE_MAINNET: &str = "https://cloudflare-eth.com";

/// The built-in failover list, highest priority first.
pub fn default_endpoints() -> Vec<Endpoint> {
    vec![
        Endpoint::new("Ankr", ANKR_MAINNET),
        Endpoint::new("PublicNode", PUBLICNODE_MAINNET),
        Endpoint::new("Cloudflare", CLOUDFLARE_MAINNET),
    ]
}

/// Build the failover list from override specs, falling back to the
/// built-in list when none are given.
pub fn resolve_endpoints<S: AsRef<str>>(overrides: &[S]) -> Vec<Endpoint> {
    let parsed: Vec<Endpoint> = overrides
        .iter()
        .filter_map(|s| {
            let s: &str = s.as_ref();
            let s = s.trim();
            (!s.is_empty()).then_some(s)
        })
        .enumerate()
        .map(|(i, s)| Endpoint::parse(s, i + 1))
        .collect();
    if parsed.is_empty() {
        default_endpoints()
    } else {
        parsed
    }
}
