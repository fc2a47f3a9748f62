pub mod chains;
pub mod domain;
pub mod editor;
pub mod orchestrator;
pub mod ports;
pub mod state_machine;

pub use chains::{chain_info, chain_info_by_id, is_on_chain, ChainInfo, SUPPORTED_CHAINS};
pub use domain::{
    AppendBatch, ContractCall, ContractData, Notification, NotificationLevel, Offer, Product,
    ProductSummary, RangeBatchEntry, TokenRange, TxReceipt, WorkflowContext, WorkflowStep,
    MAX_OFFERS,
};
pub use editor::{
    append_starts, repair_after_delete, EditorError, ForwardAction, ForwardButton, OfferEdit,
    OfferListEditor, SubmissionMode,
};
pub use orchestrator::{
    ForwardPlan, ForwardResult, OfferOrchestrator, PreparedSubmission, SubmitError,
    SubmitOutcome,
};
pub use ports::{
    ChainError, DiamondPort, NotifierPort, WalletPort, WorkflowPort, GENERIC_ERROR_MESSAGE,
};
pub use state_machine::{
    editor_transition, EditorAction, EditorStatus, StateTransition, TransitionError,
};
