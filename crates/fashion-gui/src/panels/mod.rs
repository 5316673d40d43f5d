pub mod classifier;
pub mod menu_bar;
pub mod status;
