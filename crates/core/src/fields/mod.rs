//! Metadata field services.
//!
//! - [`profiles`] - source chains for every field profile
//! - [`robots`] - robots directive options and results
//! - [`images`] - image profiles and details
//! - [`MetaService`] - the entry point callers use

pub mod images;
pub mod meta_service;
pub mod profiles;
pub mod robots;

pub use images::{ImageDetails, ImageProfile};
pub use meta_service::MetaService;
pub use profiles::build_registry;
pub use robots::{DirectiveState, RobotsDirective, RobotsMeta, RobotsOptions, RobotsOverrideFilter};
