use rair_offers_core::{Offer, OfferEdit};

use crate::ui;

/// What the row around an offer knows about its neighbours.
pub struct RowContext<'a> {
    pub index: usize,
    pub total: usize,
    pub max_copies: Option<u64>,
    pub symbol: &'a str,
    pub simple_mode: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowAction {
    None,
    Edit(OfferEdit),
    Delete,
    InvalidPrice(String),
}

pub fn render(
    ui: &mut egui::Ui,
    offer: &Offer,
    price_input: &mut String,
    cx: &RowContext<'_>,
) -> RowAction {
    let mut action = RowAction::None;
    let editable = !offer.fixed;

    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new(format!("#{}", cx.index + 1)).strong());
            if offer.fixed {
                ui.label(egui::RichText::new("on-chain").small().color(ui::ACCENT))
                    .on_hover_text("Already recorded on the contract");
            }

            ui.label("Name");
            let mut name = offer.offer_name.clone();
            let name_edit = ui.add_enabled(
                editable,
                egui::TextEdit::singleline(&mut name)
                    .hint_text("Offer name")
                    .desired_width(140.0),
            );
            if name_edit.changed() {
                action = RowAction::Edit(OfferEdit::Name(name));
            }

            ui.label("Range");
            ui.monospace(offer.range.start.to_string());
            ui.label("→");
            let mut end = offer.range.end;
            let max_end = cx
                .max_copies
                .unwrap_or(offer.range.start)
                .max(offer.range.start);
            let end_edit = ui.add_enabled(
                editable,
                egui::DragValue::new(&mut end).range(offer.range.start..=max_end),
            );
            if end_edit.changed() {
                action = RowAction::Edit(OfferEdit::RangeEnd(end));
            }

            ui.label(format!("Price ({})", cx.symbol));
            let price_edit =
                ui.add_enabled_ui(editable, |ui| ui::number_input(ui, price_input, "0.0"));
            if price_edit.inner.lost_focus() {
                match ui::parse_price(price_input) {
                    Ok(wei) if wei != offer.price => action = RowAction::Edit(OfferEdit::Price(wei)),
                    Ok(_) => {}
                    Err(e) => action = RowAction::InvalidPrice(e),
                }
            }

            if !cx.simple_mode {
                ui.label("Allowed");
                let mut allowed = offer.tokens_allowed;
                if ui
                    .add_enabled(editable, egui::DragValue::new(&mut allowed))
                    .on_hover_text("Tokens allowed to mint from this range")
                    .changed()
                {
                    action = RowAction::Edit(OfferEdit::TokensAllowed(allowed));
                }
                ui.label("Locked");
                let mut locked = offer.locked_tokens;
                if ui
                    .add_enabled(editable, egui::DragValue::new(&mut locked))
                    .on_hover_text("Tokens that must sell before resale unlocks")
                    .changed()
                {
                    action = RowAction::Edit(OfferEdit::LockedTokens(locked));
                }
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .small_button("🗑")
                    .on_hover_text(format!("Delete offer {} of {}", cx.index + 1, cx.total))
                    .clicked()
                {
                    action = RowAction::Delete;
                }
            });
        });
    });

    action
}
