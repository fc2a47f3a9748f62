//! Main application state and update loop

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use alloy::primitives::U256;
use eframe::egui;
use eyre::WrapErr;

use rair_offers_adapters::OfferAdapterConfig;
use rair_offers_core::{
    ContractData, ForwardPlan, OfferListEditor, PreparedSubmission, Product, SubmissionMode,
    SubmitError, SubmitOutcome, WorkflowContext, WorkflowStep,
};

use crate::bridge::OfferBridge;
use crate::list_offers::{self, ListOffersState, StepAction};
use crate::notify::ModalNotifier;
use crate::ui;
use crate::workflow::WorkflowSignals;

/// Index of the offers step in the creator workflow.
const OFFERS_STEP: usize = 0;

/// How often the offers step re-reads the wallet's chain.
const CHAIN_POLL_INTERVAL: Duration = Duration::from_secs(4);

/// Result slot filled by the submission worker
type SubmitSlot = Arc<Mutex<Option<(SubmissionMode, Result<SubmitOutcome, SubmitError>)>>>;

pub struct App {
    workflow: WorkflowContext,
    editor: OfferListEditor,
    step: ListOffersState,
    bridge: OfferBridge,
    notifier: ModalNotifier,
    signals: WorkflowSignals,
    submit_result: SubmitSlot,
    step_announced: bool,
    last_chain_poll: Instant,
}

impl App {
    pub fn new(cc: &eframe::CreationContext<'_>, workflow: WorkflowContext) -> Self {
        let notifier = ModalNotifier::default();
        notifier.attach(&cc.egui_ctx);
        let signals = WorkflowSignals::default();
        let bridge = OfferBridge::new(
            OfferAdapterConfig::from_env(),
            notifier.clone(),
            signals.clone(),
        );
        let editor = OfferListEditor::new(workflow.contract_data.clone());
        let mut step = ListOffersState::default();
        step.sync_inputs(editor.offers());
        step.wallet_chain_id = bridge.wallet_chain_id();

        Self {
            workflow,
            editor,
            step,
            bridge,
            notifier,
            signals,
            submit_result: Arc::new(Mutex::new(None)),
            step_announced: false,
            last_chain_poll: Instant::now(),
        }
    }

    /// Replace the collection shown by the step, as when the workflow refetches.
    pub fn set_contract_data(&mut self, contract_data: Option<ContractData>) {
        match self.editor.load(contract_data.clone()) {
            Ok(_) => {
                self.workflow.contract_data = contract_data;
                self.step.sync_inputs(self.editor.offers());
                self.refresh_chain();
            }
            Err(e) => tracing::warn!(error = %e, "contract data ignored"),
        }
    }

    fn refresh_chain(&mut self) {
        self.step.wallet_chain_id = self.bridge.wallet_chain_id();
        self.last_chain_poll = Instant::now();
    }

    fn poll_chain(&mut self, ctx: &egui::Context) {
        if self.step.submitting {
            return;
        }
        if self.last_chain_poll.elapsed() >= CHAIN_POLL_INTERVAL {
            self.refresh_chain();
        }
        ctx.request_repaint_after(CHAIN_POLL_INTERVAL);
    }

    fn apply_step_action(&mut self, action: StepAction) {
        let result = match action {
            StepAction::None => return,
            StepAction::Add => self.editor.add_offer().map(|_| ()),
            StepAction::Delete(index) => self.editor.delete_offer(index).map(|_| ()),
            StepAction::Edit(index, edit) => self.editor.update_offer(index, edit),
            StepAction::RefreshChain => {
                self.refresh_chain();
                Ok(())
            }
            StepAction::Back => {
                self.workflow.step_number = self.workflow.step_number.saturating_sub(1);
                Ok(())
            }
            StepAction::Forward => {
                self.forward();
                Ok(())
            }
        };
        match result {
            Ok(()) => {
                self.step.last_error = None;
                if self.step.price_inputs.len() != self.editor.offers().len() {
                    self.step.sync_inputs(self.editor.offers());
                }
            }
            Err(e) => self.step.last_error = Some(e.to_string()),
        }
    }

    fn forward(&mut self) {
        let plan = self
            .bridge
            .begin_forward(&mut self.editor, self.workflow.collection_index);
        // The orchestrator read the wallet afresh; keep the label in step.
        self.refresh_chain();
        match plan {
            // The switch itself arrives through the workflow signals.
            Ok(ForwardPlan::SwitchChain(_)) => {}
            Ok(ForwardPlan::Submit(prepared)) => self.start_submission(prepared),
            Err(e) => self.step.last_error = Some(e.user_message()),
        }
    }

    fn start_submission(&mut self, prepared: PreparedSubmission) {
        let mode = prepared.mode();
        if prepared == PreparedSubmission::Continue {
            let result = self.bridge.execute(&prepared);
            self.bridge.settle(&mut self.editor, mode, &result);
            return;
        }

        self.step.submitting = true;
        let bridge = self.bridge.clone();
        let slot = Arc::clone(&self.submit_result);
        let notifier = self.notifier.clone();
        std::thread::spawn(move || {
            let result = bridge.execute(&prepared);
            if let Ok(mut guard) = slot.lock() {
                *guard = Some((mode, result));
            }
            notifier.request_repaint();
        });
    }

    fn check_submit_result(&mut self) {
        let finished = self.submit_result.lock().ok().and_then(|mut g| g.take());
        let Some((mode, result)) = finished else {
            return;
        };
        self.step.submitting = false;
        for transition in self.bridge.settle(&mut self.editor, mode, &result) {
            tracing::debug!(from = ?transition.from, to = ?transition.to, reason = transition.reason, "editor settled");
        }
        if let Ok(outcome) = &result {
            if let Some(receipt) = &outcome.receipt {
                tracing::info!(tx = %receipt.tx_hash, mode = ?outcome.mode, "submission confirmed");
            }
        }
    }

    fn check_navigation(&mut self) {
        let requests = self.signals.drain();
        if let Some(step_number) = requests.step_number {
            self.workflow.step_number = step_number;
        }
        if requests.next_steps > 0 {
            let last = self.workflow.steps.len().saturating_sub(1);
            self.workflow.step_number = (self.workflow.step_number + requests.next_steps).min(last);
            tracing::info!(step = self.workflow.step_number, "advanced creator workflow");
        }
        if let Some(chain) = requests.switch_to {
            match self.bridge.switch_chain(chain) {
                Ok(()) => tracing::info!(chain = chain.name, "wallet switched chain"),
                Err(e) => {
                    tracing::error!(error = %e, "chain switch failed");
                    self.step.last_error = Some(e.user_message());
                }
            }
            self.refresh_chain();
        }
    }

    fn render_step_header(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            for (idx, step) in self.workflow.steps.iter().enumerate() {
                let text = egui::RichText::new(format!("{}. {}", idx + 1, step.label));
                let text = if idx == self.workflow.step_number {
                    text.strong().color(ui::ACCENT)
                } else {
                    text
                };
                ui.label(text).on_hover_text(&step.path);
                if idx + 1 < self.workflow.steps.len() {
                    ui.label("›");
                }
            }
        });
    }

    fn render_other_step(&mut self, ui: &mut egui::Ui) {
        let label = self
            .workflow
            .steps
            .get(self.workflow.step_number)
            .map(|s| s.label.clone())
            .unwrap_or_default();
        ui::styled_heading(ui, &label);
        ui.label("This step is configured outside the offers editor.");
        ui.add_space(10.0);
        if ui.button("◀ Back").clicked() {
            self.workflow.step_number = self.workflow.step_number.saturating_sub(1);
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(egui::Visuals::dark());

        self.check_submit_result();
        self.check_navigation();

        let mut reload = false;
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                ui.heading(egui::RichText::new("RAIR Studio").size(22.0).color(ui::ACCENT));
                ui.add_space(20.0);
                ui.separator();
                if self.workflow.simple_mode {
                    ui.label("Simple mode");
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let button = ui.add_enabled(
                        !self.step.submitting,
                        egui::Button::new("⟳ Reload collection"),
                    );
                    if button.clicked() {
                        reload = true;
                    }
                });
            });
            self.render_step_header(ui);
            ui.add_space(4.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_space(10.0);
                if self.workflow.step_number == OFFERS_STEP {
                    if !self.step_announced {
                        self.bridge.set_step_number(OFFERS_STEP);
                        self.step_announced = true;
                    }
                    self.poll_chain(ctx);
                    let action = list_offers::render(
                        ui,
                        &self.editor,
                        &mut self.step,
                        self.workflow.simple_mode,
                    );
                    self.apply_step_action(action);
                } else {
                    self.step_announced = false;
                    self.render_other_step(ui);
                }
                ui.add_space(20.0);
            });
        });

        if reload {
            match load_workflow_context() {
                Ok(workflow) => self.set_contract_data(workflow.contract_data),
                Err(e) => {
                    tracing::error!(error = %e, "failed to reload collection");
                    self.step.last_error = Some(format!("{e:#}"));
                }
            }
        }

        self.notifier.render(ctx);
    }
}

pub fn default_steps() -> Vec<WorkflowStep> {
    [
        ("offers", "Offers"),
        ("locks", "Locks"),
        ("custom-fees", "Custom Fees"),
        ("media", "Media"),
    ]
    .into_iter()
    .map(|(path, label)| WorkflowStep {
        path: path.to_owned(),
        label: label.to_owned(),
    })
    .collect()
}

/// Build the workflow inputs from `RAIR_CONTRACT_DATA` (a JSON file) and
/// `RAIR_COLLECTION_INDEX`, falling back to an empty demo collection.
pub fn load_workflow_context() -> eyre::Result<WorkflowContext> {
    let contract_data = match std::env::var("RAIR_CONTRACT_DATA") {
        Ok(path) => {
            let raw = std::fs::read_to_string(&path)
                .wrap_err_with(|| format!("reading contract data from {path}"))?;
            serde_json::from_str::<ContractData>(&raw)
                .wrap_err_with(|| format!("parsing contract data in {path}"))?
        }
        Err(_) => demo_contract_data(),
    };
    let collection_index = match std::env::var("RAIR_COLLECTION_INDEX") {
        Ok(raw) => raw
            .trim()
            .parse::<U256>()
            .wrap_err_with(|| format!("invalid RAIR_COLLECTION_INDEX '{raw}'"))?,
        Err(_) => U256::ZERO,
    };
    let simple_mode = std::env::var("RAIR_SIMPLE_MODE").is_ok_and(|v| v == "1" || v == "true");

    Ok(WorkflowContext {
        contract_data: Some(contract_data),
        collection_index,
        steps: default_steps(),
        step_number: OFFERS_STEP,
        simple_mode,
    })
}

fn demo_contract_data() -> ContractData {
    ContractData {
        blockchain: "0x1".to_owned(),
        contract_address: alloy::primitives::Address::ZERO,
        product: Product {
            name: "Demo Collection".to_owned(),
            copies: 100,
            sold_copies: 0,
            first_token_index: 0,
            offers: Vec::new(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_collection_parses_back_from_json() {
        let data = demo_contract_data();
        let json = serde_json::to_string(&data).expect("serialize");
        let back: ContractData = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, data);
    }

    #[test]
    fn default_steps_start_with_offers() {
        let steps = default_steps();
        assert_eq!(steps[OFFERS_STEP].label, "Offers");
        assert_eq!(steps.len(), 4);
    }
}
