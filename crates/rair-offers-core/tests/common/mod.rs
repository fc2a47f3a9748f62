#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use alloy::primitives::{Address, Bytes, B256, U256};

use rair_offers_core::{
    AppendBatch, ChainError, ChainInfo, ContractCall, ContractData, DiamondPort, Notification,
    NotifierPort, Offer, OfferOrchestrator, Product, RangeBatchEntry, TokenRange, TxReceipt,
    WalletPort, WorkflowPort,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiamondCall {
    Create {
        collection_index: U256,
        entries: Vec<RangeBatchEntry>,
    },
    Append(AppendBatch),
}

#[derive(Debug, Default)]
pub struct RecordingDiamond {
    pub calls: Mutex<Vec<DiamondCall>>,
}

impl RecordingDiamond {
    pub fn calls(&self) -> Vec<DiamondCall> {
        self.calls.lock().expect("diamond lock").clone()
    }
}

impl DiamondPort for RecordingDiamond {
    fn create_range_batch(
        &self,
        contract: Address,
        collection_index: U256,
        entries: &[RangeBatchEntry],
    ) -> Result<ContractCall, ChainError> {
        self.calls.lock().expect("diamond lock").push(DiamondCall::Create {
            collection_index,
            entries: entries.to_vec(),
        });
        Ok(ContractCall {
            to: contract,
            data: Bytes::from_static(b"create"),
            method: "createRangeBatch",
        })
    }

    fn append_offer_range_batch(
        &self,
        contract: Address,
        batch: &AppendBatch,
    ) -> Result<ContractCall, ChainError> {
        self.calls
            .lock()
            .expect("diamond lock")
            .push(DiamondCall::Append(batch.clone()));
        Ok(ContractCall {
            to: contract,
            data: Bytes::from_static(b"append"),
            method: "appendOfferRangeBatch",
        })
    }
}

#[derive(Debug)]
pub struct FakeWallet {
    pub chain_id: Mutex<Option<u64>>,
    pub fail_with: Mutex<Option<ChainError>>,
    pub sent: AtomicUsize,
}

impl FakeWallet {
    pub fn on_chain(chain_id: u64) -> Self {
        Self {
            chain_id: Mutex::new(Some(chain_id)),
            fail_with: Mutex::new(None),
            sent: AtomicUsize::new(0),
        }
    }

    pub fn failing(chain_id: u64, err: ChainError) -> Self {
        let wallet = Self::on_chain(chain_id);
        *wallet.fail_with.lock().expect("wallet lock") = Some(err);
        wallet
    }

    /// Simulate the user switching networks in the wallet.
    pub fn move_to(&self, chain_id: u64) {
        *self.chain_id.lock().expect("wallet lock") = Some(chain_id);
    }

    pub fn sent(&self) -> usize {
        self.sent.load(Ordering::SeqCst)
    }
}

impl WalletPort for FakeWallet {
    fn chain_id(&self) -> Result<Option<u64>, ChainError> {
        Ok(*self.chain_id.lock().expect("wallet lock"))
    }

    fn send_transaction(&self, _call: &ContractCall) -> Result<B256, ChainError> {
        if let Some(err) = self.fail_with.lock().expect("wallet lock").take() {
            return Err(err);
        }
        let n = self.sent.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(B256::with_last_byte(n as u8))
    }

    fn wait_for_receipt(&self, tx_hash: B256) -> Result<TxReceipt, ChainError> {
        Ok(TxReceipt {
            tx_hash,
            block_number: Some(1),
            success: true,
        })
    }
}

#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pub seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn seen(&self) -> Vec<Notification> {
        self.seen.lock().expect("notifier lock").clone()
    }
}

impl NotifierPort for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.seen.lock().expect("notifier lock").push(notification);
    }
}

#[derive(Debug, Default)]
pub struct RecordingWorkflow {
    pub next_steps: AtomicUsize,
    pub switches: Mutex<Vec<u64>>,
    pub step_number: AtomicUsize,
}

impl RecordingWorkflow {
    pub fn next_steps(&self) -> usize {
        self.next_steps.load(Ordering::SeqCst)
    }
}

impl WorkflowPort for RecordingWorkflow {
    fn goto_next_step(&self) {
        self.next_steps.fetch_add(1, Ordering::SeqCst);
    }

    fn switch_blockchain(&self, chain: &ChainInfo) {
        self.switches
            .lock()
            .expect("workflow lock")
            .push(chain.chain_id);
    }

    fn set_step_number(&self, step_number: usize) {
        self.step_number.store(step_number, Ordering::SeqCst);
    }
}

pub type TestOrchestrator =
    OfferOrchestrator<RecordingDiamond, FakeWallet, RecordingNotifier, RecordingWorkflow>;

pub fn new_orchestrator(wallet: FakeWallet) -> TestOrchestrator {
    OfferOrchestrator::new(
        RecordingDiamond::default(),
        wallet,
        RecordingNotifier::default(),
        RecordingWorkflow::default(),
    )
}

pub const POLYGON: u64 = 137;

pub fn contract_address() -> Address {
    "0x000000000000000000000000000000000000D1A0"
        .parse()
        .expect("valid diamond address")
}

pub fn contract_data(copies: u64, offers: Vec<Offer>) -> ContractData {
    ContractData {
        blockchain: "0x89".to_owned(),
        contract_address: contract_address(),
        product: Product {
            name: "Genesis".to_owned(),
            copies,
            sold_copies: 0,
            first_token_index: 0,
            offers,
        },
    }
}

pub fn fixed_offer(name: &str, start: u64, end: u64, pool: u64) -> Offer {
    let mut offer = draft(name, start, end);
    offer.fixed = true;
    offer.offer_pool = Some(U256::from(pool));
    offer
}

pub fn draft(name: &str, start: u64, end: u64) -> Offer {
    let mut offer = Offer::draft(start);
    offer.offer_name = name.to_owned();
    offer.range = TokenRange::new(start, end);
    offer.price = U256::from(1_000u64);
    offer
}
