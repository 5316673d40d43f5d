use fashion_core::prediction::Prediction;

use crate::app::FashionApp;
use crate::panels::menu_bar::pick_image;

const ORIGINAL_MAX_SIDE: f32 = 280.0;
const PROCESSED_SIDE: f32 = 224.0;
const LABEL_WIDTH: f32 = 110.0;
const BAR_WIDTH: f32 = 260.0;

pub fn show(ctx: &egui::Context, app: &mut FashionApp) {
    egui::CentralPanel::default().show(ctx, |ui| {
        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(8.0);
                ui.heading("Fashion MNIST Classifier");
                ui.label("Upload an image of a clothing item to classify it.");
                ui.add_space(8.0);

                if ui.button("Upload Image").clicked() {
                    pick_image(app);
                }

                if let Some(error) = &app.view.display().error {
                    ui.add_space(4.0);
                    ui.colored_label(ui.visuals().error_fg_color, error.message());
                }

                if let Some(name) = &app.view.display().pending {
                    ui.add_space(4.0);
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label(format!("Classifying {name}"));
                    });
                }
            });

            ui.add_space(12.0);
            show_images(ui, app);
            show_predictions(ui, app.view.display().predictions());
        });
    });
}

/// Original and processed image side by side. Shown only when both exist.
fn show_images(ui: &mut egui::Ui, app: &FashionApp) {
    let Some((original, processed)) = &app.textures.pair else {
        return;
    };

    ui.columns(2, |columns| {
        columns[0].vertical_centered(|ui| {
            ui.strong("Original Image");
            ui.add(
                egui::Image::new(original)
                    .max_size(egui::vec2(ORIGINAL_MAX_SIDE, ORIGINAL_MAX_SIDE)),
            );
        });
        columns[1].vertical_centered(|ui| {
            ui.strong("Processed Image");
            ui.add(
                egui::Image::new(processed)
                    .fit_to_exact_size(egui::vec2(PROCESSED_SIDE, PROCESSED_SIDE)),
            );
        });
    });
    ui.add_space(12.0);
}

fn show_predictions(ui: &mut egui::Ui, predictions: &[Prediction]) {
    if predictions.is_empty() {
        return;
    }
    let top = fashion_core::prediction::top_prediction(predictions).map(|p| p.label);

    ui.vertical_centered(|ui| {
        ui.heading("Predictions");
    });
    ui.add_space(4.0);

    egui::Grid::new("predictions")
        .num_columns(2)
        .spacing([12.0, 6.0])
        .show(ui, |ui| {
            for prediction in predictions {
                let text = egui::RichText::new(prediction.label);
                let text = if Some(prediction.label) == top {
                    text.strong()
                } else {
                    text
                };
                ui.add_sized([LABEL_WIDTH, 18.0], egui::Label::new(text));
                ui.add(
                    egui::ProgressBar::new(prediction.fill_fraction())
                        .desired_width(BAR_WIDTH)
                        .text(prediction.formatted()),
                );
                ui.end_row();
            }
        });
}
