use std::path::PathBuf;
use std::sync::mpsc;

use fashion_core::config::ClassifierConfig;
use fashion_core::ingest::display_name;
use fashion_core::pipeline::Classification;
use fashion_core::view::{ClassifierView, UploadStatus};

use crate::convert::{buffer_to_color_image, dynamic_to_color_image};
use crate::messages::{UploadSource, WorkerCommand, WorkerResult};
use crate::panels;
use crate::state::{ImageTextures, UIState};
use crate::workers;

pub struct FashionApp {
    pub cmd_tx: mpsc::Sender<WorkerCommand>,
    /// Handed to dialog threads so picked files come back through `poll_results`.
    pub result_tx: mpsc::Sender<WorkerResult>,
    pub result_rx: mpsc::Receiver<WorkerResult>,
    pub view: ClassifierView,
    pub ui_state: UIState,
    pub textures: ImageTextures,
}

impl FashionApp {
    pub fn new(ctx: &egui::Context, config: ClassifierConfig) -> Self {
        let (result_tx, result_rx) = mpsc::channel();
        let cmd_tx = workers::spawn_worker(result_tx.clone(), ctx.clone());

        let mut app = Self {
            cmd_tx,
            result_tx,
            result_rx,
            view: ClassifierView::new(config),
            ui_state: UIState::default(),
            textures: ImageTextures::default(),
        };
        app.start_model_load();
        app
    }

    /// Ask the worker to load the configured model.
    pub fn start_model_load(&mut self) {
        if self.view.begin_model_load() {
            let path = self.view.config().model.clone();
            self.ui_state
                .add_log(format!("Loading model {}", path.display()));
            self.send_command(WorkerCommand::LoadModel { path });
        }
    }

    /// Load a model picked by the user, unless a load is already running.
    fn open_model(&mut self, path: PathBuf) {
        if self.view.begin_model_load_from(&path) {
            self.ui_state
                .add_log(format!("Loading model {}", path.display()));
            self.send_command(WorkerCommand::LoadModel { path });
        } else {
            self.ui_state.add_log(format!(
                "Model load already in progress, ignoring {}",
                path.display()
            ));
        }
    }

    /// Begin a new upload. Any previous result is cleared immediately.
    pub fn start_upload(&mut self, name: String, source: UploadSource) {
        let ticket = self.view.begin_upload(name);
        self.textures.clear();
        self.ui_state.running_stage = None;
        self.ui_state.add_log(format!("Classifying {}", ticket.name));
        self.send_command(WorkerCommand::Classify { ticket, source });
    }

    /// Drain all pending results from the worker.
    fn poll_results(&mut self, ctx: &egui::Context) {
        while let Ok(result) = self.result_rx.try_recv() {
            match result {
                WorkerResult::ModelLoaded { model } => {
                    self.view.finish_model_load(Ok(model));
                }
                WorkerResult::ModelLoadFailed { error } => {
                    self.view.finish_model_load(Err(error));
                }
                WorkerResult::Progress { token, stage } => {
                    if token == self.view.latest_token() {
                        self.ui_state.running_stage = Some(stage);
                    }
                }
                WorkerResult::ClassifyComplete { token, result } => {
                    if let Err(ref e) = result {
                        self.ui_state.add_log(format!("ERROR: {e}"));
                    }
                    match self.view.complete_upload(token, result) {
                        UploadStatus::Applied => {
                            self.ui_state.running_stage = None;
                            if let Some(classification) = self.view.display().classification() {
                                let pair = load_textures(ctx, classification);
                                self.textures.pair = Some(pair);
                                if let Some(top) = classification.top() {
                                    self.ui_state.add_log(format!(
                                        "{}: {}",
                                        classification.original.name, top
                                    ));
                                }
                            }
                        }
                        UploadStatus::Stale => {
                            self.ui_state
                                .add_log(format!("Discarded result of upload #{}", token.value()));
                        }
                    }
                }
                WorkerResult::ImagePicked { path } => {
                    self.start_upload(display_name(&path), UploadSource::Path(path));
                }
                WorkerResult::ModelPicked { path } => {
                    self.open_model(path);
                }
                WorkerResult::Log { message } => {
                    self.ui_state.add_log(message);
                }
            }
        }
    }

    /// Start an upload for the last file dropped onto the window.
    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.last().cloned());
        let Some(file) = dropped else {
            return;
        };

        if let Some(path) = file.path {
            self.start_upload(display_name(&path), UploadSource::Path(path));
        } else if let Some(bytes) = file.bytes {
            let name = if file.name.is_empty() {
                "dropped image".to_string()
            } else {
                file.name
            };
            self.start_upload(name, UploadSource::Bytes(bytes));
        }
    }

    pub fn send_command(&self, cmd: WorkerCommand) {
        let _ = self.cmd_tx.send(cmd);
    }

    pub fn pick_model_dir(&self) -> Option<PathBuf> {
        self.view.config().model.parent().map(|p| p.to_path_buf())
    }
}

fn load_textures(
    ctx: &egui::Context,
    classification: &Classification,
) -> (egui::TextureHandle, egui::TextureHandle) {
    let original = ctx.load_texture(
        "original",
        dynamic_to_color_image(&classification.original.image),
        egui::TextureOptions::LINEAR,
    );
    let processed = ctx.load_texture(
        "processed",
        buffer_to_color_image(&classification.processed.preprocessed.buffer),
        egui::TextureOptions::NEAREST,
    );
    (original, processed)
}

impl eframe::App for FashionApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_results(ctx);
        self.handle_dropped_files(ctx);

        panels::menu_bar::show(ctx, self);
        panels::status::show(ctx, self);
        panels::classifier::show(ctx, self);

        if self.ui_state.show_about {
            egui::Window::new("About")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("Fashion MNIST Classifier");
                        ui.label("Local clothing classification");
                        ui.add_space(8.0);
                        ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                        ui.add_space(8.0);
                        if ui.button("Close").clicked() {
                            self.ui_state.show_about = false;
                        }
                    });
                });
        }
    }
}
