#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use iced::Size;
use phindi::ui::PhindiApp;
use tracing_subscriber::prelude::*;

fn main() -> iced::Result {
    // Initialize tracing (optional, controlled via RUST_LOG)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "phindi=info,iced=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
    iced::application(PhindiApp::title, PhindiApp::update, PhindiApp::view)
        .subscription(PhindiApp::subscription)
        .theme(PhindiApp::theme)
        .window_size(Size::new(1200.0, 800.0))
        .run_with(PhindiApp::new)
}
