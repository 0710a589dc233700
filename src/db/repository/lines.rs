//! Production-line repository trait.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::api::LineInfo;

/// Repository trait for production-line metadata and store health.
#[async_trait]
pub trait LineRepository: Send + Sync {
    /// List all known production lines, ordered by line id.
    async fn list_lines(&self) -> RepositoryResult<Vec<LineInfo>>;

    /// Check whether the backing store is reachable.
    ///
    /// # Returns
    /// * `Ok(true)` - Store is reachable and answering queries
    /// * `Ok(false)` - Store responded but reported itself unhealthy
    /// * `Err(RepositoryError)` - The check itself failed
    async fn health_check(&self) -> RepositoryResult<bool>;
}
