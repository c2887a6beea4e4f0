use eframe::egui;
use egui_plot::{Legend, Line, Plot, PlotPoints};

use super::WaveformSeries;
use crate::error::{LowpassError, Result};

/// Two stacked time-domain plots sharing the x axis
pub struct WaveformViewer {
    original: WaveformSeries,
    filtered: WaveformSeries,
}

impl WaveformViewer {
    pub fn new(original: WaveformSeries, filtered: WaveformSeries) -> Self {
        Self { original, filtered }
    }
}

fn waveform_plot(
    ui: &mut egui::Ui,
    id: &str,
    title: &str,
    series: &WaveformSeries,
    color: egui::Color32,
    height: f32,
    link_group: egui::Id,
) {
    ui.label(egui::RichText::new(title).strong());
    let points: PlotPoints = series.points.iter().copied().collect();
    Plot::new(id)
        .height(height)
        .include_y(-1.0)
        .include_y(1.0)
        .x_axis_label("Time (s)")
        .y_axis_label("Amplitude")
        .link_axis(link_group, [true, false])
        .legend(Legend::default())
        .show(ui, |plot_ui| {
            plot_ui.line(Line::new(series.name.clone(), points).color(color));
        });
}

impl eframe::App for WaveformViewer {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input(|i| i.key_pressed(egui::Key::Q)) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            let plot_height = ((ui.available_height() - 60.0) / 2.0).max(100.0);
            let link_group = ui.id().with("waveform_x_link");

            waveform_plot(
                ui,
                "original_plot",
                "Original Audio Signal",
                &self.original,
                egui::Color32::from_rgb(100, 150, 255),
                plot_height,
                link_group,
            );
            ui.add_space(8.0);
            waveform_plot(
                ui,
                "filtered_plot",
                "Filtered Audio Signal",
                &self.filtered,
                egui::Color32::from_rgb(255, 165, 0),
                plot_height,
                link_group,
            );
        });
    }
}

/// Open a window with both waveforms and block until it is closed.
pub fn show_waveforms(original: WaveformSeries, filtered: WaveformSeries) -> Result<()> {
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 600.0])
            .with_min_inner_size([600.0, 400.0])
            .with_title("Low-pass filter: original vs filtered"),
        ..Default::default()
    };

    eframe::run_native(
        "lowpass",
        native_options,
        Box::new(move |_cc| Ok(Box::new(WaveformViewer::new(original, filtered)))),
    )
    .map_err(|e| LowpassError::Display(format!("eframe error: {}", e)))
}
