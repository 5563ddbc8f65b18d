use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use rusty_kpss::data::model::Table;
use rusty_kpss::stationarity::PValueRange;
use rusty_kpss::stationarity::interpret::Verdict;
use rusty_kpss::AnalysisReport;

use crate::state::AppState;
use crate::ui::plot;

// ---------------------------------------------------------------------------
// Central panel – data preview and test results
// ---------------------------------------------------------------------------

/// Render the central panel.
pub fn central_panel(ui: &mut Ui, state: &AppState) {
    let Some(table) = &state.table else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a CSV file to run a KPSS test  (File → Open…)");
        });
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Data preview");
            preview_table(ui, table, state.settings.preview_rows);
            ui.separator();

            if let Some(report) = &state.report {
                report_section(ui, report);
            }
        });
}

fn preview_table(ui: &mut Ui, table: &Table, n_rows: usize) {
    let n_cols = table.column_names.len();
    ui.push_id("preview", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .vscroll(false)
            .columns(Column::auto().at_least(60.0), n_cols)
            .header(20.0, |mut header| {
                for name in &table.column_names {
                    header.col(|ui: &mut Ui| {
                        ui.strong(name);
                    });
                }
            })
            .body(|mut body| {
                for row in table.head(n_rows) {
                    body.row(18.0, |mut cells| {
                        for cell in row {
                            cells.col(|ui: &mut Ui| {
                                ui.label(cell.to_string());
                            });
                        }
                    });
                }
            });
    });
}

fn report_section(ui: &mut Ui, report: &AnalysisReport) {
    ui.heading("KPSS test results");
    ui.label(format!("Column tested: {}", report.selected_column));
    ui.label(format!(
        "Lag method: {}   ·   Hypothesis: {}",
        report.lag_mode_label,
        report.regression.label()
    ));
    ui.add_space(6.0);

    let p_text = match report.p_value_range {
        PValueRange::Interpolated => format!("{:.4}", report.p_value),
        PValueRange::AtLeast => format!("≥ {:.4}", report.p_value),
        PValueRange::AtMost => format!("≤ {:.4}", report.p_value),
    };

    ui.columns(3, |cols: &mut [Ui]| {
        metric(&mut cols[0], "KPSS statistic", format!("{:.4}", report.statistic));
        metric(&mut cols[1], "p-value", p_text);
        metric(&mut cols[2], "Lags used", report.lags_used.to_string());
    });
    ui.add_space(6.0);

    ui.strong("Interpretation");
    let color = match report.verdict {
        Verdict::Stationary => Color32::GREEN,
        Verdict::NonStationary => Color32::RED,
    };
    ui.label(
        RichText::new(format!(
            "{}: {}",
            report.conclusion_label, report.conclusion_summary
        ))
        .color(color),
    );
    for warning in &report.warnings {
        ui.colored_label(Color32::YELLOW, warning.to_string());
    }

    egui::CollapsingHeader::new("Critical values")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            ui.label("Compare the KPSS statistic against these thresholds at each significance level:");
            let json = serde_json::to_string_pretty(&report.critical_values)
                .unwrap_or_else(|e| format!("<unavailable: {e}>"));
            ui.monospace(json);
        });
    ui.separator();

    plot::series_plot(ui, report);
}

fn metric(ui: &mut Ui, label: &str, value: String) {
    ui.vertical(|ui: &mut Ui| {
        ui.label(RichText::new(label).small());
        ui.label(RichText::new(value).heading());
    });
}
