use fashion_core::ingest::IMAGE_EXTENSIONS;

use crate::app::FashionApp;
use crate::messages::WorkerResult;

pub fn show(ctx: &egui::Context, app: &mut FashionApp) {
    let upload_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O);
    let quit_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q);

    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui
                    .add(
                        egui::Button::new("Upload Image...")
                            .shortcut_text(ctx.format_shortcut(&upload_shortcut)),
                    )
                    .clicked()
                {
                    ui.close();
                    pick_image(app);
                }

                if ui.button("Open Model...").clicked() {
                    ui.close();
                    pick_model(app);
                }

                ui.separator();

                if ui
                    .add(egui::Button::new("Quit").shortcut_text(ctx.format_shortcut(&quit_shortcut)))
                    .clicked()
                {
                    ui.close();
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("Help", |ui| {
                if ui.button("About").clicked() {
                    ui.close();
                    app.ui_state.show_about = true;
                }
            });
        });

        // Keyboard shortcuts (consumed outside menus)
        if ctx.input_mut(|i| i.consume_shortcut(&upload_shortcut)) {
            pick_image(app);
        }
        if ctx.input_mut(|i| i.consume_shortcut(&quit_shortcut)) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
}

/// Open the image picker on its own thread; the choice comes back as `ImagePicked`.
pub(crate) fn pick_image(app: &FashionApp) {
    let result_tx = app.result_tx.clone();
    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", IMAGE_EXTENSIONS)
            .add_filter("All files", &["*"])
            .pick_file()
        {
            let _ = result_tx.send(WorkerResult::ImagePicked { path });
        }
    });
}

fn pick_model(app: &FashionApp) {
    let result_tx = app.result_tx.clone();
    let start_dir = app.pick_model_dir();
    std::thread::spawn(move || {
        let mut dialog = rfd::FileDialog::new().add_filter("Layers model", &["json"]);
        if let Some(dir) = start_dir.filter(|d| d.is_dir()) {
            dialog = dialog.set_directory(dir);
        }
        if let Some(path) = dialog.pick_file() {
            let _ = result_tx.send(WorkerResult::ModelPicked { path });
        }
    });
}
