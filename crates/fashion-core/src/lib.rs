pub mod buffer;
pub mod config;
pub mod consts;
pub mod error;
pub mod inference;
pub mod ingest;
pub mod io;
pub mod labels;
pub mod model;
pub mod pipeline;
pub mod prediction;
pub mod preprocess;
pub mod view;
