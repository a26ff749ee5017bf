//! Three-tier field resolution.
//!
//! - [`ResolutionPipeline`] - override, then generated chain, then fallback chain
//! - [`ChainRegistry`] - which sources serve which profile
//! - [`ResolutionFilter`] - extension hooks run at fixed points of a resolution

mod filters;
mod pipeline;
mod registry;
mod resolution;

pub use filters::{FilterContext, FilterSet, ResolutionFilter};
pub use pipeline::{ResolutionPipeline, OVERRIDE_SOURCE};
pub use registry::{ChainRegistry, ProfileChains};
pub use resolution::Resolution;
