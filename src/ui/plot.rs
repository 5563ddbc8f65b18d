use eframe::egui::{Color32, Ui};
use egui_plot::{Line, Plot, PlotPoints};

use rusty_kpss::AnalysisReport;

// ---------------------------------------------------------------------------
// Series plot
// ---------------------------------------------------------------------------

/// Line plot of the cleaned series the test ran on.
pub fn series_plot(ui: &mut Ui, report: &AnalysisReport) {
    let points: PlotPoints = report
        .series
        .iter()
        .enumerate()
        .map(|(i, &y)| [i as f64, y])
        .collect();

    let line = Line::new(points)
        .name(&report.selected_column)
        .color(Color32::LIGHT_BLUE)
        .width(1.5);

    Plot::new("series_plot")
        .legend(egui_plot::Legend::default())
        .x_axis_label("Observation")
        .y_axis_label(&report.selected_column)
        .height(260.0)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.line(line);
        });
}
