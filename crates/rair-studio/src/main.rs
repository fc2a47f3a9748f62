//! RAIR Studio: offer range editor for diamond collections

use eframe::egui;

mod app;
mod bridge;
mod list_offers;
mod notify;
mod offer_row;
mod ui;
mod workflow;

fn main() -> eyre::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Starting RAIR Studio");

    let workflow = app::load_workflow_context()?;

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("RAIR Studio")
            .with_inner_size([1000.0, 700.0])
            .with_min_inner_size([700.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "RAIR Studio",
        native_options,
        Box::new(|cc| Ok(Box::new(app::App::new(cc, workflow)))),
    )
    .map_err(|e| eyre::eyre!("eframe exited with error: {e}"))
}
