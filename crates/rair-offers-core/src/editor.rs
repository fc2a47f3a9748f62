//! Ordered list of draft offers for one product.
//!
//! The editor owns the capacity rules (how many offers, how far ranges may
//! reach) and derives everything the step needs to render its forward action.
//! It never talks to the chain; see [`crate::orchestrator`] for submission.

use alloy::primitives::U256;
use thiserror::Error;

use crate::chains::{self, ChainInfo};
use crate::domain::{AppendBatch, ContractData, Offer, RangeBatchEntry, MAX_OFFERS};
use crate::state_machine::{
    editor_transition, EditorAction, EditorStatus, StateTransition, TransitionError,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditorError {
    #[error("contract data not loaded")]
    NoContractData,
    #[error("offer limit of {} reached", MAX_OFFERS)]
    OfferLimitReached,
    #[error("all {copies} copies are already covered by offers")]
    RangeExhausted { copies: u64 },
    #[error("offer index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("offer {0} is already on-chain and cannot be edited")]
    FixedOffer(usize),
    #[error("range end {end} precedes range start {start}")]
    InvertedRange { start: u64, end: u64 },
    #[error("no offer pool recorded for the on-chain offers")]
    MissingOfferPool,
    #[error("offers are unnamed or exceed the product copies")]
    Incomplete,
    #[error(transparent)]
    Transition(#[from] TransitionError),
}

/// How the forward action commits the list, chosen once from the list itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionMode {
    /// Nothing on-chain yet: one `createRangeBatch` with every draft.
    Create,
    /// Offers exist on-chain and drafts were added: `appendOfferRangeBatch`.
    Append,
    /// Offers exist on-chain and nothing new was drafted.
    Continue,
}

impl SubmissionMode {
    pub fn select(offers: &[Offer]) -> Self {
        match offers.first() {
            Some(first) if first.fixed => {
                if offers.iter().all(|o| o.fixed) {
                    SubmissionMode::Continue
                } else {
                    SubmissionMode::Append
                }
            }
            _ => SubmissionMode::Create,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SubmissionMode::Create => "Create Ranges",
            SubmissionMode::Append => "Append Ranges",
            SubmissionMode::Continue => "Continue",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForwardAction {
    SwitchChain { chain: Option<&'static ChainInfo> },
    Submit(SubmissionMode),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardButton {
    pub action: ForwardAction,
    pub label: String,
    pub disabled: bool,
}

/// A single field change coming from an offer row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OfferEdit {
    Name(String),
    RangeEnd(u64),
    Price(U256),
    TokensAllowed(u64),
    LockedTokens(u64),
}

/// Legacy fix-up applied before an offer is removed.
///
/// When the list holds more than one offer and `deleted` is not the last
/// index, the offer at position 1 gets `starts = Some(0)`. Position 1 is
/// touched no matter which offer is deleted, and no range is changed.
pub fn repair_after_delete(offers: &mut [Offer], deleted: usize) {
    if offers.len() > 1 && deleted != offers.len() - 1 {
        offers[1].starts = Some(0);
    }
}

/// Start tokens sent with an append: 0 for the first offer, otherwise the
/// range start of the offer before it.
pub fn append_starts(offers: &[Offer]) -> Vec<u64> {
    offers
        .iter()
        .enumerate()
        .map(|(idx, _)| if idx == 0 { 0 } else { offers[idx - 1].range.start })
        .collect()
}

#[derive(Debug, Clone)]
pub struct OfferListEditor {
    contract_data: Option<ContractData>,
    offers: Vec<Offer>,
    status: EditorStatus,
}

impl Default for OfferListEditor {
    fn default() -> Self {
        Self {
            contract_data: None,
            offers: Vec::new(),
            status: EditorStatus::Empty,
        }
    }
}

impl OfferListEditor {
    pub fn new(contract_data: Option<ContractData>) -> Self {
        let mut editor = Self::default();
        // A fresh editor is never mid-submission, so loading cannot fail.
        let _ = editor.load(contract_data);
        editor
    }

    pub fn offers(&self) -> &[Offer] {
        &self.offers
    }

    pub fn contract_data(&self) -> Option<&ContractData> {
        self.contract_data.as_ref()
    }

    pub fn status(&self) -> EditorStatus {
        self.status
    }

    /// Replace the list with the offers stored on the product.
    pub fn load(
        &mut self,
        contract_data: Option<ContractData>,
    ) -> Result<StateTransition, EditorError> {
        let offers = contract_data
            .as_ref()
            .map(|data| data.product.offers.clone())
            .unwrap_or_default();
        let transition = self.apply(EditorAction::Load {
            count: offers.len(),
        })?;
        self.contract_data = contract_data;
        self.offers = offers;
        Ok(transition)
    }

    /// An empty list is always addable once data is loaded; the limit and the
    /// copy count only bind from the last offer onwards.
    pub fn can_add(&self) -> Result<(), EditorError> {
        let data = self
            .contract_data
            .as_ref()
            .ok_or(EditorError::NoContractData)?;
        if self.offers.len() >= MAX_OFFERS {
            return Err(EditorError::OfferLimitReached);
        }
        let Some(last) = self.offers.last() else {
            return Ok(());
        };
        // With no copies every existing range is already past the end.
        let exhausted = data
            .product
            .max_range_end()
            .map_or(true, |max_end| last.range.end >= max_end);
        if exhausted {
            return Err(EditorError::RangeExhausted {
                copies: data.product.copies,
            });
        }
        Ok(())
    }

    /// Append a blank offer right after the last range. Returns its index.
    pub fn add_offer(&mut self) -> Result<usize, EditorError> {
        self.can_add()?;
        let starting_token = self
            .offers
            .last()
            .map_or(0, |o| o.range.end.saturating_add(1));
        self.apply(EditorAction::Add)?;
        self.offers.push(Offer::draft(starting_token));
        Ok(self.offers.len() - 1)
    }

    pub fn delete_offer(&mut self, index: usize) -> Result<Offer, EditorError> {
        self.check_index(index)?;
        self.apply(EditorAction::Remove {
            remaining: self.offers.len() - 1,
        })?;
        repair_after_delete(&mut self.offers, index);
        Ok(self.offers.remove(index))
    }

    pub fn update_offer(&mut self, index: usize, edit: OfferEdit) -> Result<(), EditorError> {
        self.check_index(index)?;
        if self.offers[index].fixed {
            return Err(EditorError::FixedOffer(index));
        }
        if let OfferEdit::RangeEnd(end) = edit {
            let start = self.offers[index].range.start;
            if end < start {
                return Err(EditorError::InvertedRange { start, end });
            }
        }
        self.apply(EditorAction::Edit)?;

        let offer = &mut self.offers[index];
        match edit {
            OfferEdit::Name(name) => offer.offer_name = name,
            OfferEdit::Price(price) => offer.price = price,
            OfferEdit::TokensAllowed(n) => offer.tokens_allowed = n,
            OfferEdit::LockedTokens(n) => offer.locked_tokens = n,
            OfferEdit::RangeEnd(end) => {
                offer.range.end = end;
                self.rechain_from(index);
            }
        }
        Ok(())
    }

    pub fn submission_mode(&self) -> SubmissionMode {
        SubmissionMode::select(&self.offers)
    }

    /// Entries for `createRangeBatch`: every offer not yet on-chain.
    pub fn create_entries(&self) -> Vec<RangeBatchEntry> {
        self.offers
            .iter()
            .filter(|o| !o.fixed)
            .map(RangeBatchEntry::from)
            .collect()
    }

    /// Parallel arrays for `appendOfferRangeBatch`, covering the whole list.
    pub fn append_batch(&self) -> Result<AppendBatch, EditorError> {
        let offer_pool = self
            .contract_data
            .as_ref()
            .and_then(|d| d.product.offers.first())
            .or_else(|| self.offers.first())
            .and_then(|o| o.offer_pool)
            .ok_or(EditorError::MissingOfferPool)?;
        Ok(AppendBatch {
            offer_pool,
            starts: append_starts(&self.offers),
            ends: self.offers.iter().map(|o| o.range.end).collect(),
            prices: self.offers.iter().map(|o| o.price).collect(),
            names: self.offers.iter().map(|o| o.offer_name.clone()).collect(),
        })
    }

    /// Whether the wallet sits on the collection's chain.
    pub fn on_collection_chain(&self, wallet_chain_id: Option<u64>) -> bool {
        self.contract_data
            .as_ref()
            .is_some_and(|d| chains::is_on_chain(&d.blockchain, wallet_chain_id))
    }

    pub fn forward_disabled(&self) -> bool {
        let Some(last) = self.offers.last() else {
            return true;
        };
        let exceeds = match self.contract_data.as_ref() {
            Some(data) => data
                .product
                .max_range_end()
                .map_or(true, |max_end| last.range.end > max_end),
            None => true,
        };
        exceeds || self.offers.iter().any(|o| o.offer_name.is_empty())
    }

    /// Forward navigation for the step, `None` until contract data arrives.
    pub fn forward_button(&self, wallet_chain_id: Option<u64>) -> Option<ForwardButton> {
        let data = self.contract_data.as_ref()?;
        let disabled = self.forward_disabled();
        if !self.on_collection_chain(wallet_chain_id) {
            let chain = chains::chain_info(&data.blockchain);
            let name = chain.map_or(data.blockchain.as_str(), |c| c.name);
            return Some(ForwardButton {
                action: ForwardAction::SwitchChain { chain },
                label: format!("Switch to {name}"),
                disabled,
            });
        }
        let mode = self.submission_mode();
        Some(ForwardButton {
            action: ForwardAction::Submit(mode),
            label: mode.label().to_owned(),
            disabled,
        })
    }

    pub(crate) fn apply(&mut self, action: EditorAction) -> Result<StateTransition, EditorError> {
        let (to, transition) = editor_transition(self.status, action)?;
        tracing::debug!(from = ?transition.from, to = ?to, reason = transition.reason, "offer editor transition");
        self.status = to;
        Ok(transition)
    }

    fn check_index(&self, index: usize) -> Result<(), EditorError> {
        if index >= self.offers.len() {
            return Err(EditorError::IndexOutOfRange {
                index,
                len: self.offers.len(),
            });
        }
        Ok(())
    }

    /// Keep draft ranges contiguous after `index` moved its end.
    fn rechain_from(&mut self, index: usize) {
        for idx in index + 1..self.offers.len() {
            let Some(next_start) = self.offers[idx - 1].range.end.checked_add(1) else {
                break;
            };
            let offer = &mut self.offers[idx];
            if offer.fixed {
                break;
            }
            offer.range.start = next_start;
            offer.range.end = offer.range.end.max(next_start);
        }
    }
}
