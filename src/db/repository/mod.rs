//! Repository trait definitions for database operations.
//!
//! This module provides focused repository traits that abstract the event
//! store. By splitting responsibilities across traits, implementations can
//! be more focused and testable.
//!
//! # Module Organization
//!
//! - [`error`]: Error types for repository operations
//! - [`downtime`]: Read-only access to the downtime event log
//! - [`lines`]: Production-line metadata and store health
//!
//! # Convenience Trait Bound
//!
//! For functions that need all repository capabilities, use the
//! [`FullRepository`] trait bound:
//!
//! ```ignore
//! async fn my_service(repo: &dyn FullRepository) -> RepositoryResult<()> {
//!     let lines = repo.list_lines().await?;
//!     let events = repo.fetch_downtime_events(&filters).await?;
//!     Ok(())
//! }
//! ```

pub mod downtime;
pub mod error;
pub mod lines;

// Re-export error types
pub use error::{ErrorContext, RepositoryError, RepositoryResult};

// Re-export all traits
pub use downtime::DowntimeRepository;
pub use lines::LineRepository;

/// Composite trait bound for a complete repository implementation.
///
/// Automatically implemented for any type that implements both repository
/// traits. Use this as a convenient bound when you need access to all
/// repository operations.
pub trait FullRepository: DowntimeRepository + LineRepository {}

impl<T: DowntimeRepository + LineRepository> FullRepository for T {}
