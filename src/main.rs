mod app;
mod state;
mod ui;

use std::path::Path;

use app::RustyKpssApp;
use eframe::egui;
use rusty_kpss::Settings;

/// Optional settings file looked up in the working directory.
const SETTINGS_FILE: &str = "rusty-kpss.json";

fn main() -> eframe::Result {
    env_logger::init();

    let settings = load_settings(Path::new(SETTINGS_FILE));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Rusty KPSS – Stationarity Tester",
        options,
        Box::new(move |_cc| Ok(Box::new(RustyKpssApp::new(settings)))),
    )
}

fn load_settings(path: &Path) -> Settings {
    if !path.exists() {
        return Settings::default();
    }
    let loaded = std::fs::read_to_string(path)
        .map_err(anyhow::Error::from)
        .and_then(|text| Settings::from_json_str(&text));
    match loaded {
        Ok(settings) => {
            log::info!("Loaded settings from {}", path.display());
            settings
        }
        Err(e) => {
            log::warn!("Ignoring {}: {e:#}", path.display());
            Settings::default()
        }
    }
}
