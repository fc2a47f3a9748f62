//! Chain metadata table keyed by the hex chain key stored with each collection.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainInfo {
    pub key: &'static str,
    pub chain_id: u64,
    pub name: &'static str,
    pub symbol: &'static str,
}

pub const SUPPORTED_CHAINS: &[ChainInfo] = &[
    ChainInfo {
        key: "0x1",
        chain_id: 1,
        name: "Ethereum Mainnet",
        symbol: "ETH",
    },
    ChainInfo {
        key: "0x5",
        chain_id: 5,
        name: "Ethereum Goerli",
        symbol: "ETH",
    },
    ChainInfo {
        key: "0xaa36a7",
        chain_id: 11_155_111,
        name: "Ethereum Sepolia",
        symbol: "ETH",
    },
    ChainInfo {
        key: "0x38",
        chain_id: 56,
        name: "Binance Mainnet",
        symbol: "BNB",
    },
    ChainInfo {
        key: "0x61",
        chain_id: 97,
        name: "Binance Testnet",
        symbol: "BNB",
    },
    ChainInfo {
        key: "0x89",
        chain_id: 137,
        name: "Matic Mainnet",
        symbol: "MATIC",
    },
    ChainInfo {
        key: "0x13881",
        chain_id: 80_001,
        name: "Matic Mumbai",
        symbol: "MATIC",
    },
    ChainInfo {
        key: "0x250",
        chain_id: 592,
        name: "Astar Mainnet",
        symbol: "ASTR",
    },
];

/// Look up a chain by its key. Keys are matched case-insensitively.
pub fn chain_info(key: &str) -> Option<&'static ChainInfo> {
    let key = key.trim();
    SUPPORTED_CHAINS
        .iter()
        .find(|c| c.key.eq_ignore_ascii_case(key))
}

pub fn chain_info_by_id(chain_id: u64) -> Option<&'static ChainInfo> {
    SUPPORTED_CHAINS.iter().find(|c| c.chain_id == chain_id)
}

/// Whether the wallet sits on the chain a collection was deployed to.
///
/// Unknown keys and a wallet without a chain never match.
pub fn is_on_chain(blockchain: &str, wallet_chain_id: Option<u64>) -> bool {
    match (chain_info(blockchain), wallet_chain_id) {
        (Some(info), Some(current)) => info.chain_id == current,
        _ => false,
    }
}
