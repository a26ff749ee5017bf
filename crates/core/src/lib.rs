//! Metafield Core - metadata field services.
//!
//! Builds titles, descriptions, social fields, images and robots directives
//! on top of the `metafield-resolution` engine. Content, overrides and the
//! ambient target are reached through traits, with in-memory
//! implementations for embedding and tests.

pub mod ambient;
pub mod constants;
pub mod content;
pub mod errors;
pub mod fields;
pub mod overrides;
pub mod settings;
pub mod sources;
pub mod utils;

pub use fields::{
    DirectiveState, ImageDetails, ImageProfile, MetaService, RobotsDirective, RobotsMeta,
    RobotsOptions,
};
pub use settings::MetaSettings;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
