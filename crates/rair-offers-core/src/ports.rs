use alloy::primitives::{Address, B256, U256};
use thiserror::Error;

use crate::chains::ChainInfo;
use crate::domain::{AppendBatch, ContractCall, Notification, RangeBatchEntry, TxReceipt};

/// Shown when a failure carries no provider message.
pub const GENERIC_ERROR_MESSAGE: &str = "An error has occurred";

#[derive(Debug, Error)]
pub enum ChainError {
    #[error("wallet disabled: {0}")]
    Disabled(String),
    #[error("request rejected by user")]
    Rejected,
    #[error("rpc error {code}: {message}")]
    Rpc { code: i64, message: String },
    #[error("transaction {tx_hash} reverted")]
    Reverted { tx_hash: B256 },
    #[error("transport error: {0}")]
    Transport(String),
    #[error("encoding error: {0}")]
    Encoding(String),
    #[error("timed out waiting for receipt of {0}")]
    ReceiptTimeout(B256),
}

impl ChainError {
    /// Message surfaced to the user: the provider's own text when it sent one.
    pub fn user_message(&self) -> String {
        match self {
            ChainError::Rpc { message, .. } if !message.trim().is_empty() => message.clone(),
            _ => GENERIC_ERROR_MESSAGE.to_owned(),
        }
    }
}

/// Encodes calls against the collection's diamond contract.
pub trait DiamondPort {
    fn create_range_batch(
        &self,
        contract: Address,
        collection_index: U256,
        entries: &[RangeBatchEntry],
    ) -> Result<ContractCall, ChainError>;

    fn append_offer_range_batch(
        &self,
        contract: Address,
        batch: &AppendBatch,
    ) -> Result<ContractCall, ChainError>;
}

/// Wallet-mediated signing and submission.
pub trait WalletPort {
    fn chain_id(&self) -> Result<Option<u64>, ChainError>;
    fn send_transaction(&self, call: &ContractCall) -> Result<B256, ChainError>;
    fn wait_for_receipt(&self, tx_hash: B256) -> Result<TxReceipt, ChainError>;

    /// Send and block until the transaction is mined successfully.
    fn send_and_confirm(&self, call: &ContractCall) -> Result<TxReceipt, ChainError> {
        let tx_hash = self.send_transaction(call)?;
        let receipt = self.wait_for_receipt(tx_hash)?;
        if !receipt.success {
            return Err(ChainError::Reverted { tx_hash });
        }
        Ok(receipt)
    }
}

pub trait NotifierPort {
    fn notify(&self, notification: Notification);
}

/// Navigation callbacks owned by the surrounding wizard.
pub trait WorkflowPort {
    fn goto_next_step(&self);
    fn switch_blockchain(&self, chain: &ChainInfo);
    fn set_step_number(&self, step_number: usize);
}
