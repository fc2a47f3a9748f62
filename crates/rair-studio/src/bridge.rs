//! Bridge between the egui shell and the offer workspace crates.
//! The only shell-facing boundary for wallet and contract operations.

use std::sync::Arc;

use alloy::primitives::U256;

use rair_offers_adapters::{DiamondAbiAdapter, OfferAdapterConfig, WalletAdapter};
use rair_offers_core::{
    ChainError, ChainInfo, ForwardPlan, OfferListEditor, OfferOrchestrator, PreparedSubmission,
    StateTransition, SubmissionMode, SubmitError, SubmitOutcome, WorkflowPort,
};

use crate::notify::ModalNotifier;
use crate::workflow::WorkflowSignals;

type StudioOrchestrator =
    OfferOrchestrator<DiamondAbiAdapter, WalletAdapter, ModalNotifier, WorkflowSignals>;

#[derive(Clone)]
pub struct OfferBridge {
    orchestrator: Arc<StudioOrchestrator>,
}

impl OfferBridge {
    pub fn new(config: OfferAdapterConfig, notifier: ModalNotifier, workflow: WorkflowSignals) -> Self {
        Self {
            orchestrator: Arc::new(StudioOrchestrator::new(
                DiamondAbiAdapter,
                WalletAdapter::with_config(config),
                notifier,
                workflow,
            )),
        }
    }

    pub fn wallet_chain_id(&self) -> Option<u64> {
        self.orchestrator.wallet_chain_id()
    }

    pub fn switch_chain(&self, chain: &ChainInfo) -> Result<(), ChainError> {
        self.orchestrator.wallet.request_chain_switch(chain.chain_id)
    }

    /// Resolve the forward press against the wallet's chain as it is now.
    pub fn begin_forward(
        &self,
        editor: &mut OfferListEditor,
        collection_index: U256,
    ) -> Result<ForwardPlan, SubmitError> {
        self.orchestrator.begin_forward(editor, collection_index)
    }

    /// Blocks on the wallet. Call from a worker thread.
    pub fn execute(&self, prepared: &PreparedSubmission) -> Result<SubmitOutcome, SubmitError> {
        self.orchestrator.execute(prepared)
    }

    pub fn settle(
        &self,
        editor: &mut OfferListEditor,
        mode: SubmissionMode,
        result: &Result<SubmitOutcome, SubmitError>,
    ) -> Vec<StateTransition> {
        self.orchestrator.settle(editor, mode, result)
    }

    pub fn set_step_number(&self, step_number: usize) {
        self.orchestrator.workflow.set_step_number(step_number);
    }
}
