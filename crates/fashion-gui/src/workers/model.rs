use std::path::Path;
use std::sync::{mpsc, Arc};
use std::time::Instant;

use fashion_core::model::{load_model, InferenceModel};

use crate::messages::WorkerResult;

use super::{send, send_log};

pub(super) fn handle_load_model(
    path: &Path,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    let start = Instant::now();
    match load_model(path) {
        Ok(model) => {
            send_log(
                tx,
                ctx,
                format!(
                    "Model loaded: {} ({} layers, {} params) in {}ms",
                    path.display(),
                    model.layers().len(),
                    model.param_count(),
                    start.elapsed().as_millis()
                ),
            );
            let model: Arc<dyn InferenceModel> = Arc::new(model);
            send(tx, ctx, WorkerResult::ModelLoaded { model });
        }
        Err(error) => {
            send_log(tx, ctx, format!("ERROR: {error}"));
            send(tx, ctx, WorkerResult::ModelLoadFailed { error });
        }
    }
}
