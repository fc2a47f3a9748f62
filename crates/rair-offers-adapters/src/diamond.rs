//! ABI encoding of the diamond's offer-range facet.

use alloy::primitives::{Address, Bytes, U256};
use alloy::sol;
use alloy::sol_types::SolCall;

use rair_offers_core::{AppendBatch, ChainError, ContractCall, DiamondPort, RangeBatchEntry};

sol! {
    struct RangeData {
        uint256 rangeStart;
        uint256 rangeEnd;
        uint256 tokensAllowed;
        uint256 lockedTokens;
        uint256 price;
        string name;
    }

    function createRangeBatch(uint256 collectionId, RangeData[] data) external;

    function appendOfferRangeBatch(
        uint256 offerPoolIndex,
        uint256[] startTokens,
        uint256[] endTokens,
        uint256[] prices,
        string[] names
    ) external;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DiamondAbiAdapter;

impl DiamondPort for DiamondAbiAdapter {
    fn create_range_batch(
        &self,
        contract: Address,
        collection_index: U256,
        entries: &[RangeBatchEntry],
    ) -> Result<ContractCall, ChainError> {
        if entries.is_empty() {
            return Err(ChainError::Encoding("createRangeBatch needs at least one range".to_owned()));
        }
        let call = createRangeBatchCall {
            collectionId: collection_index,
            data: entries.iter().map(range_data).collect(),
        };
        Ok(ContractCall {
            to: contract,
            data: Bytes::from(call.abi_encode()),
            method: createRangeBatchCall::SIGNATURE,
        })
    }

    fn append_offer_range_batch(
        &self,
        contract: Address,
        batch: &AppendBatch,
    ) -> Result<ContractCall, ChainError> {
        let len = batch.ends.len();
        if batch.starts.len() != len || batch.prices.len() != len || batch.names.len() != len {
            return Err(ChainError::Encoding(format!(
                "appendOfferRangeBatch arrays differ in length: starts {}, ends {}, prices {}, names {}",
                batch.starts.len(),
                len,
                batch.prices.len(),
                batch.names.len()
            )));
        }
        let call = appendOfferRangeBatchCall {
            offerPoolIndex: batch.offer_pool,
            startTokens: batch.starts.iter().map(|v| U256::from(*v)).collect(),
            endTokens: batch.ends.iter().map(|v| U256::from(*v)).collect(),
            prices: batch.prices.clone(),
            names: batch.names.clone(),
        };
        Ok(ContractCall {
            to: contract,
            data: Bytes::from(call.abi_encode()),
            method: appendOfferRangeBatchCall::SIGNATURE,
        })
    }
}

fn range_data(entry: &RangeBatchEntry) -> RangeData {
    RangeData {
        rangeStart: U256::from(entry.range_start),
        rangeEnd: U256::from(entry.range_end),
        tokensAllowed: U256::from(entry.tokens_allowed),
        lockedTokens: U256::from(entry.locked_tokens),
        price: entry.price,
        name: entry.name.clone(),
    }
}
