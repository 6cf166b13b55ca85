//! Repository layer
//!
//! Repositories are stateless wrappers over the HTTP clients that the
//! scheduler reads from. They add no business logic.
//!
//! All repositories are trait-based to enable testing and mocking.

mod statuses;

// Re-export traits
pub use statuses::StatusRepository;

// Re-export implementations
pub use statuses::HttpStatusRepository;
