//! UI helper components

use alloy::primitives::utils::{format_ether, parse_ether};
use alloy::primitives::U256;
use eframe::egui;

pub const ACCENT: egui::Color32 = egui::Color32::from_rgb(0, 212, 170);

/// Styled heading with accent color
pub fn styled_heading(ui: &mut egui::Ui, text: &str) {
    ui.heading(egui::RichText::new(text).color(ACCENT));
}

/// Section header with separator
pub fn section_header(ui: &mut egui::Ui, text: &str) {
    ui.add_space(10.0);
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(text).strong().size(14.0));
    });
    ui.separator();
}

/// Create a styled text edit for number input
pub fn number_input(ui: &mut egui::Ui, value: &mut String, hint: &str) -> egui::Response {
    ui.add(
        egui::TextEdit::singleline(value)
            .hint_text(hint)
            .desired_width(110.0)
            .font(egui::TextStyle::Monospace),
    )
}

/// Wei amount as a trimmed decimal in the chain's native unit.
pub fn display_price(wei: U256) -> String {
    let formatted = format_ether(wei);
    match formatted.split_once('.') {
        Some((whole, frac)) => {
            let frac = frac.trim_end_matches('0');
            if frac.is_empty() {
                whole.to_owned()
            } else {
                format!("{whole}.{frac}")
            }
        }
        None => formatted,
    }
}

/// Parse a decimal native-unit price typed by the user into wei.
pub fn parse_price(input: &str) -> Result<U256, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(U256::ZERO);
    }
    parse_ether(trimmed).map_err(|e| format!("Invalid price '{trimmed}': {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_round_trips_through_display() {
        let wei = parse_price("0.25").expect("price");
        assert_eq!(wei, U256::from(250_000_000_000_000_000u64));
        assert_eq!(display_price(wei), "0.25");
        assert_eq!(display_price(U256::from(10u64).pow(U256::from(18u64))), "1");
    }

    #[test]
    fn blank_price_is_zero_and_garbage_is_rejected() {
        assert_eq!(parse_price("  ").expect("blank"), U256::ZERO);
        assert!(parse_price("abc").is_err());
    }
}
