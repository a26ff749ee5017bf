pub mod settings_loader;
pub mod settings_model;

pub use settings_model::*;
