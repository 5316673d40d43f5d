mod classify;
mod dispatch;
mod model;

pub use dispatch::spawn_worker;
pub(crate) use dispatch::{send, send_log};
