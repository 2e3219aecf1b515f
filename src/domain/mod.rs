pub mod crawlers;
pub mod errors;
pub mod repositories;
pub mod routing;
pub mod sessions;

// Re-exports
pub use errors::RepositoryError;
