use std::sync::mpsc;

use fashion_core::view::UploadTicket;

use crate::messages::{UploadSource, WorkerResult};
use crate::progress::ChannelProgressReporter;

use super::send;

pub(super) fn handle_classify(
    ticket: &UploadTicket,
    source: &UploadSource,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    let reporter = ChannelProgressReporter::new(tx.clone(), ctx.clone(), ticket.token);
    let result = match source {
        UploadSource::Path(path) => ticket.run_path(path, &reporter),
        UploadSource::Bytes(bytes) => ticket.run_bytes(bytes, &reporter),
    };

    send(
        tx,
        ctx,
        WorkerResult::ClassifyComplete {
            token: ticket.token,
            result,
        },
    );
}
