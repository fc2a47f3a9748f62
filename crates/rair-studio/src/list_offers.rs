//! "Offers" step of the creator workflow: edit ranges, then create or append.

use eframe::egui;
use rair_offers_core::{chain_info, ForwardButton, Offer, OfferEdit, OfferListEditor};

use crate::offer_row::{self, RowAction, RowContext};
use crate::ui;

/// Local widget state that does not belong in the editor.
#[derive(Debug, Default)]
pub struct ListOffersState {
    /// Price text per row, kept so partial input survives between frames.
    pub price_inputs: Vec<String>,
    /// Chain the wallet reported last time it was asked.
    pub wallet_chain_id: Option<u64>,
    pub submitting: bool,
    pub last_error: Option<String>,
}

impl ListOffersState {
    /// Rebuild row buffers after the list changed shape.
    pub fn sync_inputs(&mut self, offers: &[Offer]) {
        self.price_inputs = offers.iter().map(|o| ui::display_price(o.price)).collect();
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepAction {
    None,
    Add,
    Delete(usize),
    Edit(usize, OfferEdit),
    Forward,
    Back,
    RefreshChain,
}

pub fn render(
    ui: &mut egui::Ui,
    editor: &OfferListEditor,
    state: &mut ListOffersState,
    simple_mode: bool,
) -> StepAction {
    let mut action = StepAction::None;

    let Some(data) = editor.contract_data() else {
        ui.label("Fetching data...");
        return action;
    };
    let chain = chain_info(&data.blockchain);
    let symbol = chain.map_or("?", |c| c.symbol);

    ui::styled_heading(ui, "Offers");
    ui.label(format!(
        "{} on {}",
        if data.product.name.is_empty() { "Product" } else { data.product.name.as_str() },
        chain.map_or(data.blockchain.as_str(), |c| c.name)
    ));

    if let Some(err) = state.last_error.as_ref() {
        ui.colored_label(egui::Color32::RED, err);
    }

    if state.price_inputs.len() != editor.offers().len() {
        state.sync_inputs(editor.offers());
    }

    ui::section_header(ui, "Ranges");
    let total = editor.offers().len();
    for (index, offer) in editor.offers().iter().enumerate() {
        let cx = RowContext {
            index,
            total,
            max_copies: data.product.max_range_end(),
            symbol,
            simple_mode,
        };
        match offer_row::render(ui, offer, &mut state.price_inputs[index], &cx) {
            RowAction::None => {}
            RowAction::Edit(edit) => action = StepAction::Edit(index, edit),
            RowAction::Delete => action = StepAction::Delete(index),
            RowAction::InvalidPrice(e) => state.last_error = Some(e),
        }
        ui.add_space(4.0);
    }

    ui.add_space(8.0);
    ui.vertical_centered(|ui| {
        let add_allowed = editor.can_add();
        let response = ui.add_enabled(add_allowed.is_ok(), egui::Button::new("Add new ➕"));
        let response = match &add_allowed {
            Ok(()) => response,
            Err(reason) => response.on_disabled_hover_text(reason.to_string()),
        };
        if response.clicked() {
            action = StepAction::Add;
        }
    });

    ui.add_space(10.0);
    let summary = data.product.summary();
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.vertical_centered(|ui| {
            ui.label(format!(
                "First Token: {}, Last Token: {}, Mintable Tokens Left: {}",
                summary.first_token, summary.last_token, summary.mintable_left
            ));
        });
    });

    ui.add_space(10.0);
    ui.horizontal(|ui| {
        ui.label("Wallet chain:");
        let wallet_chain = state
            .wallet_chain_id
            .map(|id| rair_offers_core::chain_info_by_id(id).map_or(id.to_string(), |c| c.name.to_owned()))
            .unwrap_or_else(|| "not connected".to_owned());
        ui.monospace(wallet_chain);
        if ui.small_button("⟳").on_hover_text("Re-read wallet chain").clicked() {
            action = StepAction::RefreshChain;
        }
    });

    if let Some(button) = editor.forward_button(state.wallet_chain_id) {
        if let Some(nav) = bottom_navigation(ui, &button, state.submitting) {
            action = nav;
        }
    }

    action
}

/// Back / forward bar at the bottom of the step.
fn bottom_navigation(
    ui: &mut egui::Ui,
    button: &ForwardButton,
    submitting: bool,
) -> Option<StepAction> {
    let mut action = None;
    ui.add_space(16.0);
    ui.separator();
    ui.horizontal(|ui| {
        if ui.button("◀ Back").clicked() {
            action = Some(StepAction::Back);
        }
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let enabled = !button.disabled && !submitting;
            let forward = ui.add_enabled(
                enabled,
                egui::Button::new(egui::RichText::new(&button.label).strong()),
            );
            if forward.clicked() {
                action = Some(StepAction::Forward);
            }
            if submitting {
                ui.spinner();
            }
        });
    });
    action
}
