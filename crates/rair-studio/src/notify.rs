//! Modal notification surface shared with the submission worker.

use std::sync::{Arc, Mutex};

use eframe::egui;
use rair_offers_core::{Notification, NotificationLevel, NotifierPort};

/// Holds the one notification on screen. Newer notices replace older ones.
#[derive(Clone, Default)]
pub struct ModalNotifier {
    current: Arc<Mutex<Option<Notification>>>,
    repaint: Arc<Mutex<Option<egui::Context>>>,
}

impl ModalNotifier {
    /// Let background notices wake the UI.
    pub fn attach(&self, ctx: &egui::Context) {
        if let Ok(mut guard) = self.repaint.lock() {
            *guard = Some(ctx.clone());
        }
    }

    pub fn request_repaint(&self) {
        if let Some(ctx) = self.repaint.lock().ok().and_then(|g| g.clone()) {
            ctx.request_repaint();
        }
    }

    pub fn current(&self) -> Option<Notification> {
        self.current.lock().ok().and_then(|g| g.clone())
    }

    pub fn dismiss(&self) {
        if let Ok(mut guard) = self.current.lock() {
            *guard = None;
        }
    }

    /// Draw the active notification as a centered modal window.
    pub fn render(&self, ctx: &egui::Context) {
        let Some(notice) = self.current() else {
            return;
        };
        let mut dismissed = false;
        egui::Window::new(egui::RichText::new(&notice.title).strong())
            .id(egui::Id::new("notification_modal"))
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new(level_icon(notice.level))
                            .size(20.0)
                            .color(level_color(notice.level)),
                    );
                    ui.label(&notice.body);
                });
                ui.add_space(8.0);
                if notice.dismissable {
                    if ui.button("OK").clicked() {
                        dismissed = true;
                    }
                } else {
                    ui.spinner();
                }
            });
        if dismissed {
            self.dismiss();
        }
    }
}

impl NotifierPort for ModalNotifier {
    fn notify(&self, notification: Notification) {
        if let Ok(mut guard) = self.current.lock() {
            *guard = Some(notification);
        }
        self.request_repaint();
    }
}

fn level_icon(level: NotificationLevel) -> &'static str {
    match level {
        NotificationLevel::Info => "ℹ",
        NotificationLevel::Success => "✔",
        NotificationLevel::Error => "✖",
    }
}

pub fn level_color(level: NotificationLevel) -> egui::Color32 {
    match level {
        NotificationLevel::Info => egui::Color32::from_rgb(80, 160, 220),
        NotificationLevel::Success => egui::Color32::from_rgb(0, 212, 170),
        NotificationLevel::Error => egui::Color32::from_rgb(220, 50, 50),
    }
}
