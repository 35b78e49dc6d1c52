//! Bag Player - Main Entry Point
//!
//! Desktop panel for recording and replaying ROS bag files.

use bagplayer_rs::{config::AppConfig, frontend::BagPlayerApp};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Set up stderr logging plus a daily log file when the data dir is writable
fn init_logging() -> Option<WorkerGuard> {
    let (file_layer, guard) = match bagplayer_rs::config::app_data_dir()
        .map(|dir| dir.join("logs"))
        .filter(|dir| std::fs::create_dir_all(dir).is_ok())
    {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "bagplayer.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,bagplayer_rs=debug")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .init();

    guard
}

fn main() -> eframe::Result<()> {
    // Keep the guard alive so buffered file output is flushed on exit
    let _log_guard = init_logging();

    tracing::info!("Starting Bag Player");

    let config = AppConfig::load_or_default();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([960.0, 560.0])
            .with_min_inner_size([640.0, 360.0])
            .with_title("Bag Player"),
        ..Default::default()
    };

    let result = eframe::run_native(
        "Bag Player",
        native_options,
        Box::new(|cc| {
            if config.ui.dark_mode {
                cc.egui_ctx.set_visuals(egui::Visuals::dark());
            } else {
                cc.egui_ctx.set_visuals(egui::Visuals::light());
            }

            let mut style = (*cc.egui_ctx.style()).clone();
            style.visuals.window_shadow.offset = [0, 0];
            cc.egui_ctx.set_style(style);

            Ok(Box::new(BagPlayerApp::new(cc, config)))
        }),
    );

    tracing::info!("Shutting down...");

    result
}
