mod common;

use alloy::primitives::U256;
use rair_offers_core::{
    ChainError, EditorError, EditorStatus, ForwardPlan, ForwardResult, NotificationLevel,
    OfferEdit, OfferListEditor, PreparedSubmission, SubmissionMode, SubmitError,
    GENERIC_ERROR_MESSAGE,
};

use common::{
    contract_data, draft, fixed_offer, new_orchestrator, DiamondCall, FakeWallet, POLYGON,
};

fn two_named_drafts() -> OfferListEditor {
    let mut editor = OfferListEditor::new(Some(contract_data(10, Vec::new())));
    editor.add_offer().expect("add first");
    editor.add_offer().expect("add second");
    editor
        .update_offer(0, OfferEdit::Name("A".to_owned()))
        .expect("name A");
    editor
        .update_offer(1, OfferEdit::Name("B".to_owned()))
        .expect("name B");
    editor
}

#[test]
fn create_mode_submits_batch_and_advances() {
    let orch = new_orchestrator(FakeWallet::on_chain(POLYGON));
    let mut editor = two_named_drafts();

    let outcome = orch
        .submit(&mut editor, U256::from(4u64))
        .expect("create ranges");
    assert_eq!(outcome.mode, SubmissionMode::Create);
    assert!(outcome.advanced);
    assert!(outcome.receipt.expect("receipt").success);

    let calls = orch.diamond.calls();
    assert_eq!(calls.len(), 1);
    let DiamondCall::Create {
        collection_index,
        entries,
    } = &calls[0]
    else {
        panic!("expected create call, got {:?}", calls[0]);
    };
    assert_eq!(*collection_index, U256::from(4u64));
    assert_eq!(entries.len(), 2);
    assert_eq!((entries[0].range_start, entries[0].range_end), (0, 0));
    assert_eq!((entries[1].range_start, entries[1].range_end), (1, 1));
    assert_eq!(entries[0].name, "A");
    assert_eq!(entries[1].name, "B");

    assert_eq!(orch.workflow.next_steps(), 1);
    assert_eq!(orch.wallet.sent(), 1);
    assert_eq!(editor.status(), EditorStatus::Submitted);

    let seen = orch.notifier.seen();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0].title, "Creating offer...");
    assert!(!seen[0].dismissable);
    assert_eq!(seen[1].level, NotificationLevel::Success);
    assert_eq!(seen[1].body, "The offer(s) have been created!");
}

#[test]
fn single_fixed_offer_continues_without_contract_call() {
    let orch = new_orchestrator(FakeWallet::on_chain(POLYGON));
    let mut editor =
        OfferListEditor::new(Some(contract_data(10, vec![fixed_offer("A", 0, 9, 2)])));

    let result = orch
        .forward(&mut editor, U256::ZERO)
        .expect("continue");
    let ForwardResult::Submitted(outcome) = result else {
        panic!("expected submission outcome");
    };
    assert_eq!(outcome.mode, SubmissionMode::Continue);
    assert!(outcome.receipt.is_none());
    assert!(orch.diamond.calls().is_empty());
    assert_eq!(orch.wallet.sent(), 0);
    assert_eq!(orch.workflow.next_steps(), 1);
    assert!(orch.notifier.seen().is_empty());
}

#[test]
fn append_mode_waits_for_confirmation_without_advancing() {
    let orch = new_orchestrator(FakeWallet::on_chain(POLYGON));
    let mut editor =
        OfferListEditor::new(Some(contract_data(10, vec![fixed_offer("A", 0, 3, 9)])));
    editor.add_offer().expect("add");
    editor
        .update_offer(1, OfferEdit::Name("B".to_owned()))
        .expect("name");

    let outcome = orch.submit(&mut editor, U256::ZERO).expect("append");
    assert_eq!(outcome.mode, SubmissionMode::Append);
    assert!(!outcome.advanced);
    assert_eq!(orch.workflow.next_steps(), 0);

    let calls = orch.diamond.calls();
    let DiamondCall::Append(batch) = &calls[0] else {
        panic!("expected append call");
    };
    assert_eq!(batch.offer_pool, U256::from(9u64));
    assert_eq!(batch.ends, vec![3, 4]);
    assert_eq!(batch.names, vec!["A", "B"]);

    let seen = orch.notifier.seen();
    assert_eq!(seen[0].title, "Appending offers...");
    assert_eq!(seen[1].body, "The offers have been appended!");
}

#[test]
fn failed_submission_keeps_list_and_returns_to_editing() {
    let orch = new_orchestrator(FakeWallet::failing(
        POLYGON,
        ChainError::Rpc {
            code: -32603,
            message: "execution reverted: invalid range".to_owned(),
        },
    ));
    let mut editor = two_named_drafts();
    let before = editor.offers().to_vec();

    let err = orch
        .submit(&mut editor, U256::ZERO)
        .expect_err("wallet failure");
    assert!(matches!(err, SubmitError::Chain(ChainError::Rpc { .. })));
    assert_eq!(editor.offers(), before.as_slice());
    assert_eq!(editor.status(), EditorStatus::Editing);
    assert_eq!(orch.workflow.next_steps(), 0);

    let last = orch.notifier.seen().pop().expect("error notice");
    assert_eq!(last.level, NotificationLevel::Error);
    assert_eq!(last.body, "execution reverted: invalid range");

    // The user may retry once the wallet recovers.
    let outcome = orch.submit(&mut editor, U256::ZERO).expect("retry");
    assert!(outcome.advanced);
}

#[test]
fn rejection_surfaces_generic_message() {
    let orch = new_orchestrator(FakeWallet::failing(POLYGON, ChainError::Rejected));
    let mut editor = two_named_drafts();
    orch.submit(&mut editor, U256::ZERO).expect_err("rejected");
    let last = orch.notifier.seen().pop().expect("error notice");
    assert_eq!(last.body, GENERIC_ERROR_MESSAGE);
}

#[test]
fn incomplete_list_is_not_submitted() {
    let orch = new_orchestrator(FakeWallet::on_chain(POLYGON));
    let mut editor = OfferListEditor::new(Some(contract_data(10, Vec::new())));
    editor.add_offer().expect("add");

    let err = orch.submit(&mut editor, U256::ZERO).expect_err("unnamed");
    assert!(matches!(err, SubmitError::Editor(EditorError::Incomplete)));
    assert!(orch.diamond.calls().is_empty());
    assert_eq!(editor.status(), EditorStatus::Editing);
}

#[test]
fn forward_off_chain_requests_switch() {
    let orch = new_orchestrator(FakeWallet::on_chain(1));
    let mut editor = OfferListEditor::new(Some(contract_data(10, vec![draft("A", 0, 3)])));

    let result = orch.forward(&mut editor, U256::ZERO).expect("switch");
    assert_eq!(result, ForwardResult::SwitchRequested);
    assert_eq!(
        orch.workflow.switches.lock().expect("switches").clone(),
        vec![POLYGON]
    );
    assert!(orch.diamond.calls().is_empty());
}

#[test]
fn forward_rereads_wallet_chain_before_submitting() {
    let orch = new_orchestrator(FakeWallet::on_chain(POLYGON));
    let mut editor = two_named_drafts();
    let shown = editor
        .forward_button(orch.wallet_chain_id())
        .expect("button");
    assert_eq!(shown.label, "Create Ranges");

    // The wallet moves after the button was drawn.
    orch.wallet.move_to(1);
    let plan = orch
        .begin_forward(&mut editor, U256::ZERO)
        .expect("switch plan");
    assert!(matches!(plan, ForwardPlan::SwitchChain(chain) if chain.chain_id == POLYGON));
    assert!(orch.diamond.calls().is_empty());
    assert_eq!(orch.wallet.sent(), 0);
    assert_eq!(editor.status(), EditorStatus::Editing);
}

#[test]
fn begin_forward_stops_at_prepared_call() {
    let orch = new_orchestrator(FakeWallet::on_chain(POLYGON));
    let mut editor = two_named_drafts();
    let plan = orch
        .begin_forward(&mut editor, U256::ZERO)
        .expect("prepared");
    let ForwardPlan::Submit(prepared) = plan else {
        panic!("expected a prepared submission");
    };
    assert_eq!(prepared.mode(), SubmissionMode::Create);
    assert_eq!(editor.status(), EditorStatus::Submitting);
    assert_eq!(orch.wallet.sent(), 0);
}

#[test]
fn unsupported_chain_is_an_error_not_a_switch() {
    let orch = new_orchestrator(FakeWallet::on_chain(POLYGON));
    let mut data = contract_data(10, vec![draft("A", 0, 3)]);
    data.blockchain = "0x7a69".to_owned();
    let mut editor = OfferListEditor::new(Some(data));

    let err = orch
        .forward(&mut editor, U256::ZERO)
        .expect_err("unknown chain");
    assert!(matches!(&err, SubmitError::UnsupportedChain(key) if key == "0x7a69"));
    assert!(orch.workflow.switches.lock().expect("switches").is_empty());
    let notice = orch.notifier.seen().pop().expect("error notice");
    assert_eq!(notice.level, NotificationLevel::Error);
}

#[test]
fn prepared_submission_is_a_snapshot() {
    let orch = new_orchestrator(FakeWallet::on_chain(POLYGON));
    let mut editor = two_named_drafts();

    let prepared = orch.prepare(&mut editor, U256::ZERO).expect("prepare");
    assert!(matches!(prepared, PreparedSubmission::Create { offers: 2, .. }));
    assert_eq!(editor.status(), EditorStatus::Submitting);

    // Edits while the call is pending are allowed but do not change the call.
    editor
        .update_offer(1, OfferEdit::Name("renamed".to_owned()))
        .expect("edit while pending");
    let result = orch.execute(&prepared);
    let transitions = orch.settle(&mut editor, prepared.mode(), &result);
    assert_eq!(transitions.len(), 1);
    assert_eq!(editor.status(), EditorStatus::Submitted);

    let DiamondCall::Create { entries, .. } = &orch.diamond.calls()[0] else {
        panic!("expected create call");
    };
    assert_eq!(entries[1].name, "B");
}
