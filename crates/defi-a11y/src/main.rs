//! defi-a11y: accessible wallet connection and transaction review components

use eframe::egui;
use eyre::WrapErr;

use defi_a11y_adapters::{A11yConfig, TracingAnnouncer};
use defi_a11y_core::LiveRegion;

mod app;
mod state;
mod ui;
mod wallet_modal;

fn main() -> eyre::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!(
        git = env!("GIT_HASH"),
        built = env!("BUILD_TIME"),
        "Starting defi-a11y"
    );

    let config = A11yConfig::load().wrap_err("loading accessibility config")?;
    LiveRegion::global().add_sink(Box::new(TracingAnnouncer));

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("defi-a11y")
            .with_inner_size([900.0, 700.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "defi-a11y",
        native_options,
        Box::new(move |cc| Ok(Box::new(app::App::new(cc, config)))),
    )
    .map_err(|e| eyre::eyre!("eframe exited with an error: {e}"))
}
