use alloy::primitives::Address;

#[derive(Debug, Clone)]
pub struct OfferAdapterConfig {
    /// JSON-RPC endpoint of an unlocked node or wallet proxy. Without one the
    /// wallet runs in deterministic in-memory mode.
    pub rpc_url: Option<String>,
    pub from_address: Option<Address>,
    pub rpc_timeout_ms: u64,
    pub receipt_poll_interval_ms: u64,
    pub receipt_max_polls: u32,
    /// Chain reported by the deterministic wallet.
    pub deterministic_chain_id: u64,
}

impl Default for OfferAdapterConfig {
    fn default() -> Self {
        Self {
            rpc_url: None,
            from_address: None,
            rpc_timeout_ms: 15_000,
            receipt_poll_interval_ms: 1_000,
            receipt_max_polls: 120,
            deterministic_chain_id: 1,
        }
    }
}

impl OfferAdapterConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.rpc_url = std::env::var("RAIR_RPC_URL")
            .ok()
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty());
        config.from_address = std::env::var("RAIR_FROM_ADDRESS")
            .ok()
            .and_then(|v| match v.trim().parse::<Address>() {
                Ok(addr) => Some(addr),
                Err(e) => {
                    tracing::warn!(error = %e, "ignoring invalid RAIR_FROM_ADDRESS");
                    None
                }
            });
        if let Some(v) = env_number("RAIR_RPC_TIMEOUT_MS") {
            config.rpc_timeout_ms = v;
        }
        if let Some(v) = env_number("RAIR_RECEIPT_POLL_INTERVAL_MS") {
            config.receipt_poll_interval_ms = v;
        }
        if let Some(v) = env_number("RAIR_RECEIPT_MAX_POLLS") {
            config.receipt_max_polls = u32::try_from(v).unwrap_or(u32::MAX);
        }
        if let Some(v) = env_number("RAIR_CHAIN_ID") {
            config.deterministic_chain_id = v;
        }
        config
    }
}

fn env_number(key: &str) -> Option<u64> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse::<u64>() {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::warn!(key, error = %e, "ignoring non-numeric setting");
            None
        }
    }
}
