pub mod content_model;
pub mod content_traits;
pub mod memory_repository;

pub use content_model::*;
pub use content_traits::ContentRepositoryTrait;
pub use memory_repository::MemoryContentRepository;
