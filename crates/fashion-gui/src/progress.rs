use std::sync::mpsc;

use fashion_core::pipeline::{PipelineStage, ProgressReporter};
use fashion_core::view::UploadToken;

use crate::messages::WorkerResult;

/// Progress reporter that sends stage changes for one upload to the UI thread.
pub struct ChannelProgressReporter {
    tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
    token: UploadToken,
}

impl ChannelProgressReporter {
    pub fn new(tx: mpsc::Sender<WorkerResult>, ctx: egui::Context, token: UploadToken) -> Self {
        Self { tx, ctx, token }
    }
}

impl ProgressReporter for ChannelProgressReporter {
    fn begin_stage(&self, stage: PipelineStage) {
        let _ = self.tx.send(WorkerResult::Progress {
            token: self.token,
            stage,
        });
        self.ctx.request_repaint();
    }
}
