use fashion_core::model::ModelStatus;

use crate::app::FashionApp;

pub fn show(ctx: &egui::Context, app: &mut FashionApp) {
    egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
        ui.add_space(2.0);

        // Progress bar
        if let Some(stage) = app.ui_state.running_stage {
            ui.add(
                egui::ProgressBar::new(0.0)
                    .text(format!("{stage}..."))
                    .animate(true),
            );
        } else if app.view.display().is_busy() {
            ui.add(egui::ProgressBar::new(0.0).text("Waiting...").animate(true));
        } else {
            // Invisible placeholder, same height
            ui.add(egui::ProgressBar::new(0.0).text(""));
        }

        // Log area, fixed height for 4 lines, scrollable.
        let line_height = ui.text_style_height(&egui::TextStyle::Body);
        let spacing = ui.spacing().item_spacing.y;
        let log_height = line_height * 4.0 + spacing * 3.0;

        egui::ScrollArea::vertical()
            .max_height(log_height)
            .min_scrolled_height(log_height)
            .stick_to_bottom(true)
            .show(ui, |ui| {
                if app.ui_state.log_messages.is_empty() {
                    for _ in 0..4 {
                        ui.label("");
                    }
                } else {
                    for msg in &app.ui_state.log_messages {
                        ui.label(msg);
                    }
                }
            });

        // Status line
        ui.horizontal(|ui| {
            let status = app.view.model_status();
            let color = match status {
                ModelStatus::Ready => ui.visuals().widgets.inactive.text_color(),
                ModelStatus::Failed => ui.visuals().error_fg_color,
                ModelStatus::Loading | ModelStatus::Unloaded => ui.visuals().warn_fg_color,
            };
            ui.colored_label(color, format!("Model: {status}"));
            ui.separator();
            ui.label(app.view.config().model.display().to_string());
            ui.separator();
            ui.label(format!("Grayscale: {}", app.view.config().preprocess.grayscale));
        });

        ui.add_space(2.0);
    });
}
