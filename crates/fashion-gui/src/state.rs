use fashion_core::pipeline::PipelineStage;

const MAX_LOG_LINES: usize = 200;

/// Overall UI state.
#[derive(Default)]
pub struct UIState {
    /// Stage of the latest upload (None = idle).
    pub running_stage: Option<PipelineStage>,

    /// Log messages.
    pub log_messages: Vec<String>,

    pub show_about: bool,
}

impl UIState {
    pub fn add_log(&mut self, msg: String) {
        self.log_messages.push(msg);
        if self.log_messages.len() > MAX_LOG_LINES {
            let excess = self.log_messages.len() - MAX_LOG_LINES;
            self.log_messages.drain(..excess);
        }
    }
}

/// GPU textures for the two images of the current classification.
///
/// Set and cleared together.
#[derive(Default)]
pub struct ImageTextures {
    pub pair: Option<(egui::TextureHandle, egui::TextureHandle)>,
}

impl ImageTextures {
    pub fn clear(&mut self) {
        self.pair = None;
    }
}
