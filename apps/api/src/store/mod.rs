pub mod memory;
pub mod pg;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::catalog::NamedRow;
use crate::models::staffing::PositionRow;
use crate::search::snapshot::TalentSnapshot;

/// Universal name-search hits across the three searchable entity kinds.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UniversalMatches {
    pub users: Vec<NamedRow>,
    pub clients: Vec<NamedRow>,
    pub projects: Vec<NamedRow>,
}

/// Read-only query surface over the staffing data store.
///
/// The engine never writes through this trait and never issues per-candidate
/// queries: `load_snapshot` is the single bulk read one search request runs
/// on. A failure here fails the whole call — no partial results.
#[async_trait]
pub trait TalentStore: Send + Sync {
    /// Bulk-reads active candidates plus their proficiency, allocation and
    /// blocking-leave rows into one immutable snapshot.
    async fn load_snapshot(&self) -> Result<TalentSnapshot, AppError>;

    /// Looks up one project position with its required skill ids.
    async fn position(&self, id: i64) -> Result<Option<PositionRow>, AppError>;

    /// Case-insensitive name search across candidates, clients and projects.
    async fn search_names(&self, query: &str) -> Result<UniversalMatches, AppError>;
}
