use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use rusty_kpss::{AnalysisError, RegressionType};

use crate::state::{AppState, StatusLevel};

// ---------------------------------------------------------------------------
// Left side panel – test configuration
// ---------------------------------------------------------------------------

/// Render the left configuration panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Test configuration");
    ui.separator();

    let columns = match &state.table {
        Some(table) => table.column_names.clone(),
        None => {
            ui.label("No file loaded.");
            return;
        }
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Column selector ----
            ui.strong("Time-series column");
            let current = state.selected_column.clone().unwrap_or_default();
            egui::ComboBox::from_id_salt("series_column")
                .selected_text(&current)
                .show_ui(ui, |ui: &mut Ui| {
                    for col in &columns {
                        if ui.selectable_label(current == *col, col).clicked() {
                            state.select_column(col.clone());
                        }
                    }
                });
            ui.add_space(8.0);

            // ---- Null hypothesis ----
            ui.strong("Stationarity hypothesis");
            for regression in RegressionType::ALL {
                if ui
                    .radio(state.regression == regression, regression.label())
                    .clicked()
                {
                    state.set_regression(regression);
                }
            }
            ui.add_space(8.0);

            // ---- Lag truncation ----
            ui.strong("Number of lags (nlags)");
            for (manual, label) in [(false, "Automatic"), (true, "Manual")] {
                if ui.radio(state.manual_lags == manual, label).clicked() {
                    state.set_manual_lags(manual);
                }
            }

            if state.manual_lags {
                let recommended = state.recommended_lags();
                let mut lags = state.manual_lag_value;
                ui.horizontal(|ui: &mut Ui| {
                    ui.label("Lags:");
                    ui.add(egui::DragValue::new(&mut lags).speed(1))
                        .on_hover_text(format!(
                            "Common recommendation (Schwert) for this file: {recommended}"
                        ));
                });
                state.set_manual_lag_value(lags);
            }
            ui.separator();

            if ui
                .add_enabled(
                    state.selected_column.is_some(),
                    egui::Button::new(RichText::new("Run KPSS test").strong()),
                )
                .clicked()
            {
                state.run_test();
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let (Some(table), Some(name)) = (&state.table, &state.source_name) {
            ui.label(format!(
                "{name}: {} rows, {} columns",
                table.len(),
                table.column_names.len()
            ));
            ui.separator();
        }

        if let Some(msg) = &state.status_message {
            let color = match msg.level {
                StatusLevel::Info => Color32::LIGHT_BLUE,
                StatusLevel::Success => Color32::GREEN,
                StatusLevel::Warning => Color32::YELLOW,
                StatusLevel::Error => Color32::RED,
            };
            ui.label(RichText::new(&msg.text).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open time series")
        .add_filter("CSV", &["csv", "txt"])
        .pick_file();

    if let Some(path) = file {
        match rusty_kpss::data::loader::load_file(&path) {
            Ok(table) => {
                log::info!(
                    "Loaded {} rows with columns {:?}",
                    table.len(),
                    table.column_names
                );
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                state.set_table(table, name);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.set_load_error(&AnalysisError::file_parse(&e));
            }
        }
    }
}
