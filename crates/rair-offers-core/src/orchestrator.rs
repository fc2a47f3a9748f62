use alloy::primitives::U256;
use thiserror::Error;

use crate::chains::ChainInfo;
use crate::domain::{ContractCall, Notification, TxReceipt};
use crate::editor::{EditorError, ForwardAction, OfferListEditor, SubmissionMode};
use crate::ports::{ChainError, DiamondPort, NotifierPort, WalletPort, WorkflowPort};
use crate::state_machine::{EditorAction, StateTransition};

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Editor(#[from] EditorError),
    #[error(transparent)]
    Chain(#[from] ChainError),
    #[error("blockchain {0} is not supported")]
    UnsupportedChain(String),
}

impl SubmitError {
    pub fn user_message(&self) -> String {
        match self {
            SubmitError::Editor(e) => e.to_string(),
            SubmitError::UnsupportedChain(_) => self.to_string(),
            SubmitError::Chain(e) => e.user_message(),
        }
    }
}

/// A submission frozen from the editor, ready to hand to the wallet.
///
/// Holds a snapshot: edits made to the list while the call is in flight do not
/// reach the chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreparedSubmission {
    Continue,
    Create { call: ContractCall, offers: usize },
    Append { call: ContractCall, offers: usize },
}

impl PreparedSubmission {
    pub fn mode(&self) -> SubmissionMode {
        match self {
            PreparedSubmission::Continue => SubmissionMode::Continue,
            PreparedSubmission::Create { .. } => SubmissionMode::Create,
            PreparedSubmission::Append { .. } => SubmissionMode::Append,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub mode: SubmissionMode,
    pub receipt: Option<TxReceipt>,
    pub advanced: bool,
}

/// Result of pressing the step's forward button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForwardResult {
    SwitchRequested,
    Submitted(SubmitOutcome),
}

/// First half of a forward press: the switch was requested, or the list is
/// prepared and waiting for [`OfferOrchestrator::execute`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForwardPlan {
    SwitchChain(&'static ChainInfo),
    Submit(PreparedSubmission),
}

pub struct OfferOrchestrator<D, W, N, F>
where
    D: DiamondPort,
    W: WalletPort,
    N: NotifierPort,
    F: WorkflowPort,
{
    pub diamond: D,
    pub wallet: W,
    pub notifier: N,
    pub workflow: F,
}

impl<D, W, N, F> OfferOrchestrator<D, W, N, F>
where
    D: DiamondPort,
    W: WalletPort,
    N: NotifierPort,
    F: WorkflowPort,
{
    pub fn new(diamond: D, wallet: W, notifier: N, workflow: F) -> Self {
        Self {
            diamond,
            wallet,
            notifier,
            workflow,
        }
    }

    /// Current wallet chain, `None` when the wallet cannot tell.
    pub fn wallet_chain_id(&self) -> Option<u64> {
        match self.wallet.chain_id() {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read wallet chain id");
                None
            }
        }
    }

    /// Resolve the forward button against the wallet's current chain.
    ///
    /// Submissions stop at `prepare`, so the caller decides where the blocking
    /// `execute` runs.
    pub fn begin_forward(
        &self,
        editor: &mut OfferListEditor,
        collection_index: U256,
    ) -> Result<ForwardPlan, SubmitError> {
        let button = editor
            .forward_button(self.wallet_chain_id())
            .ok_or(EditorError::NoContractData)?;
        if button.disabled {
            return Err(EditorError::Incomplete.into());
        }
        match button.action {
            ForwardAction::SwitchChain { chain: Some(chain) } => {
                tracing::info!(chain = chain.name, "requesting wallet chain switch");
                self.workflow.switch_blockchain(chain);
                Ok(ForwardPlan::SwitchChain(chain))
            }
            ForwardAction::SwitchChain { chain: None } => {
                let key = editor
                    .contract_data()
                    .map(|d| d.blockchain.clone())
                    .unwrap_or_default();
                Err(self.report(SubmitError::UnsupportedChain(key)))
            }
            ForwardAction::Submit(_) => self
                .prepare(editor, collection_index)
                .map(ForwardPlan::Submit),
        }
    }

    /// Run the forward action on the calling thread.
    pub fn forward(
        &self,
        editor: &mut OfferListEditor,
        collection_index: U256,
    ) -> Result<ForwardResult, SubmitError> {
        match self.begin_forward(editor, collection_index)? {
            ForwardPlan::SwitchChain(_) => Ok(ForwardResult::SwitchRequested),
            ForwardPlan::Submit(prepared) => self
                .finish(editor, &prepared)
                .map(ForwardResult::Submitted),
        }
    }

    /// Prepare, execute and settle a submission on the calling thread.
    pub fn submit(
        &self,
        editor: &mut OfferListEditor,
        collection_index: U256,
    ) -> Result<SubmitOutcome, SubmitError> {
        let prepared = self.prepare(editor, collection_index)?;
        self.finish(editor, &prepared)
    }

    /// Snapshot the list into an encoded call and mark the editor as submitting.
    pub fn prepare(
        &self,
        editor: &mut OfferListEditor,
        collection_index: U256,
    ) -> Result<PreparedSubmission, SubmitError> {
        let prepared = self
            .encode(editor, collection_index)
            .map_err(|e| self.report(e))?;
        if prepared != PreparedSubmission::Continue {
            editor.apply(EditorAction::SubmitStart)?;
        }
        Ok(prepared)
    }

    /// Hand the prepared call to the wallet and wait for it to be mined.
    ///
    /// Safe to run off the UI thread; it touches no editor state.
    pub fn execute(&self, prepared: &PreparedSubmission) -> Result<SubmitOutcome, SubmitError> {
        match prepared {
            PreparedSubmission::Continue => {
                self.workflow.goto_next_step();
                Ok(SubmitOutcome {
                    mode: SubmissionMode::Continue,
                    receipt: None,
                    advanced: true,
                })
            }
            PreparedSubmission::Create { call, offers } => {
                self.notifier
                    .notify(Notification::pending("Creating offer..."));
                let receipt = self.send(call)?;
                tracing::info!(tx = %receipt.tx_hash, offers, "offer ranges created");
                self.notifier
                    .notify(Notification::success("The offer(s) have been created!"));
                self.workflow.goto_next_step();
                Ok(SubmitOutcome {
                    mode: SubmissionMode::Create,
                    receipt: Some(receipt),
                    advanced: true,
                })
            }
            PreparedSubmission::Append { call, offers } => {
                self.notifier
                    .notify(Notification::pending("Appending offers..."));
                let receipt = self.send(call)?;
                tracing::info!(tx = %receipt.tx_hash, offers, "offer ranges appended");
                self.notifier
                    .notify(Notification::success("The offers have been appended!"));
                Ok(SubmitOutcome {
                    mode: SubmissionMode::Append,
                    receipt: Some(receipt),
                    advanced: false,
                })
            }
        }
    }

    /// Move the editor out of `Submitting` once the outcome is known.
    /// Failures land back in `Editing` with the list untouched.
    pub fn settle(
        &self,
        editor: &mut OfferListEditor,
        mode: SubmissionMode,
        result: &Result<SubmitOutcome, SubmitError>,
    ) -> Vec<StateTransition> {
        if mode == SubmissionMode::Continue {
            return Vec::new();
        }
        let actions: &[EditorAction] = match result {
            Ok(_) => &[EditorAction::SubmitSuccess],
            Err(_) => &[EditorAction::SubmitFailure, EditorAction::Resume],
        };
        let mut transitions = Vec::with_capacity(actions.len());
        for action in actions {
            match editor.apply(*action) {
                Ok(t) => transitions.push(t),
                Err(e) => {
                    tracing::warn!(error = %e, "editor left submitting state early");
                    break;
                }
            }
        }
        transitions
    }

    fn finish(
        &self,
        editor: &mut OfferListEditor,
        prepared: &PreparedSubmission,
    ) -> Result<SubmitOutcome, SubmitError> {
        let result = self.execute(prepared);
        self.settle(editor, prepared.mode(), &result);
        result
    }

    fn encode(
        &self,
        editor: &OfferListEditor,
        collection_index: U256,
    ) -> Result<PreparedSubmission, SubmitError> {
        let data = editor.contract_data().ok_or(EditorError::NoContractData)?;
        if editor.forward_disabled() {
            return Err(EditorError::Incomplete.into());
        }
        let prepared = match editor.submission_mode() {
            SubmissionMode::Continue => PreparedSubmission::Continue,
            SubmissionMode::Create => {
                let entries = editor.create_entries();
                let call = self.diamond.create_range_batch(
                    data.contract_address,
                    collection_index,
                    &entries,
                )?;
                PreparedSubmission::Create {
                    call,
                    offers: entries.len(),
                }
            }
            SubmissionMode::Append => {
                let batch = editor.append_batch()?;
                let call = self
                    .diamond
                    .append_offer_range_batch(data.contract_address, &batch)?;
                PreparedSubmission::Append {
                    call,
                    offers: batch.ends.len(),
                }
            }
        };
        Ok(prepared)
    }

    fn send(&self, call: &ContractCall) -> Result<TxReceipt, SubmitError> {
        tracing::debug!(method = call.method, to = %call.to, "sending contract call");
        self.wallet
            .send_and_confirm(call)
            .map_err(|e| self.report(SubmitError::Chain(e)))
    }

    fn report(&self, err: SubmitError) -> SubmitError {
        tracing::error!(error = %err, "offer submission failed");
        self.notifier.notify(Notification::error(err.user_message()));
        err
    }
}
