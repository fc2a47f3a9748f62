use alloy::primitives::{Address, Bytes, B256, U256};
use serde::{Deserialize, Serialize};

/// Hard cap on offers a single product can hold.
pub const MAX_OFFERS: usize = 12;

/// Inclusive token-index interval owned by one offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[u64; 2]", into = "[u64; 2]")]
pub struct TokenRange {
    pub start: u64,
    pub end: u64,
}

impl TokenRange {
    pub fn new(start: u64, end: u64) -> Self {
        Self { start, end }
    }

    /// Single-token range used for freshly added offers.
    pub fn single(token: u64) -> Self {
        Self::new(token, token)
    }

    pub fn len(&self) -> u64 {
        self.end.saturating_sub(self.start).saturating_add(1)
    }

    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }
}

impl From<[u64; 2]> for TokenRange {
    fn from(value: [u64; 2]) -> Self {
        Self::new(value[0], value[1])
    }
}

impl From<TokenRange> for [u64; 2] {
    fn from(value: TokenRange) -> Self {
        [value.start, value.end]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    pub offer_name: String,
    pub range: TokenRange,
    /// Price per token in wei.
    pub price: U256,
    pub tokens_allowed: u64,
    pub locked_tokens: u64,
    /// Already committed on-chain.
    #[serde(default)]
    pub fixed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offer_pool: Option<U256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starts: Option<u64>,
}

impl Offer {
    /// Blank draft covering a single token.
    pub fn draft(starting_token: u64) -> Self {
        Self {
            offer_name: String::new(),
            range: TokenRange::single(starting_token),
            price: U256::ZERO,
            tokens_allowed: 0,
            locked_tokens: 0,
            fixed: false,
            offer_pool: None,
            starts: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default)]
    pub name: String,
    pub copies: u64,
    #[serde(default)]
    pub sold_copies: u64,
    #[serde(default)]
    pub first_token_index: u64,
    #[serde(default)]
    pub offers: Vec<Offer>,
}

impl Product {
    /// Highest range end an offer may reach, `None` for a product with no copies.
    pub fn max_range_end(&self) -> Option<u64> {
        self.copies.checked_sub(1)
    }

    pub fn summary(&self) -> ProductSummary {
        ProductSummary {
            first_token: self.first_token_index,
            last_token: self
                .first_token_index
                .saturating_add(self.copies)
                .saturating_sub(1),
            mintable_left: self.copies.saturating_sub(self.sold_copies),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductSummary {
    pub first_token: u64,
    pub last_token: u64,
    pub mintable_left: u64,
}

/// Collection state handed to the step by the workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractData {
    /// Chain key into the chain metadata table, e.g. `0x89`.
    pub blockchain: String,
    pub contract_address: Address,
    pub product: Product,
}

/// One entry of a `createRangeBatch` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeBatchEntry {
    pub range_start: u64,
    pub range_end: u64,
    pub tokens_allowed: u64,
    pub locked_tokens: u64,
    pub price: U256,
    pub name: String,
}

impl From<&Offer> for RangeBatchEntry {
    fn from(offer: &Offer) -> Self {
        Self {
            range_start: offer.range.start,
            range_end: offer.range.end,
            tokens_allowed: offer.tokens_allowed,
            locked_tokens: offer.locked_tokens,
            price: offer.price,
            name: offer.offer_name.clone(),
        }
    }
}

/// Parallel arrays of an `appendOfferRangeBatch` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppendBatch {
    pub offer_pool: U256,
    pub starts: Vec<u64>,
    pub ends: Vec<u64>,
    pub prices: Vec<U256>,
    pub names: Vec<String>,
}

/// Encoded contract call ready for the wallet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractCall {
    pub to: Address,
    pub data: Bytes,
    pub method: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxReceipt {
    pub tx_hash: B256,
    pub block_number: Option<u64>,
    pub success: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub level: NotificationLevel,
    /// Blocking "please wait" notices carry no confirm button.
    pub dismissable: bool,
}

impl Notification {
    pub fn pending(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: "Please wait...".to_owned(),
            level: NotificationLevel::Info,
            dismissable: false,
        }
    }

    pub fn success(body: impl Into<String>) -> Self {
        Self {
            title: "Success!".to_owned(),
            body: body.into(),
            level: NotificationLevel::Success,
            dismissable: true,
        }
    }

    pub fn error(body: impl Into<String>) -> Self {
        Self {
            title: "Error".to_owned(),
            body: body.into(),
            level: NotificationLevel::Error,
            dismissable: true,
        }
    }
}

/// One step of the creator workflow, as listed in the wizard header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowStep {
    pub path: String,
    pub label: String,
}

/// Inputs the workflow supplies to the offers step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkflowContext {
    pub contract_data: Option<ContractData>,
    pub collection_index: U256,
    pub steps: Vec<WorkflowStep>,
    pub step_number: usize,
    pub simple_mode: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_range_serializes_as_pair() {
        let json = serde_json::to_string(&TokenRange::new(3, 9)).expect("serialize");
        assert_eq!(json, "[3,9]");
        let back: TokenRange = serde_json::from_str("[4,4]").expect("deserialize");
        assert_eq!(back, TokenRange::single(4));
    }

    #[test]
    fn product_summary_matches_token_window() {
        let product = Product {
            name: "Genesis".to_owned(),
            copies: 10,
            sold_copies: 3,
            first_token_index: 100,
            offers: Vec::new(),
        };
        let summary = product.summary();
        assert_eq!(summary.first_token, 100);
        assert_eq!(summary.last_token, 109);
        assert_eq!(summary.mintable_left, 7);
    }

    #[test]
    fn product_summary_clamps_at_top_of_token_space() {
        let product = Product {
            name: "Edge".to_owned(),
            copies: 2,
            sold_copies: 0,
            first_token_index: u64::MAX,
            offers: Vec::new(),
        };
        let summary = product.summary();
        assert_eq!(summary.first_token, u64::MAX);
        assert_eq!(summary.last_token, u64::MAX - 1);
        assert_eq!(summary.mintable_left, 2);
    }

    #[test]
    fn offer_without_fixed_flag_defaults_to_draft() {
        let offer: Offer = serde_json::from_value(serde_json::json!({
            "offerName": "Early",
            "range": [0, 4],
            "price": "0x3e8",
            "tokensAllowed": 5,
            "lockedTokens": 0
        }))
        .expect("offer json");
        assert!(!offer.fixed);
        assert_eq!(offer.price, U256::from(1000u64));
        assert_eq!(offer.range.len(), 5);
    }
}
