use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::catalog::NamedRow;
use crate::models::staffing::{AllocationRow, LeavePlanRow, PositionRow};
use crate::models::talent::{CandidateRow, ProficiencyRow};
use crate::search::snapshot::TalentSnapshot;
use crate::store::{TalentStore, UniversalMatches};

/// In-memory store used by integration tests. Holds the raw rows and builds
/// a fresh snapshot per call, matching the per-request snapshot semantics of
/// the Postgres store.
#[derive(Debug, Default)]
pub struct InMemoryTalentStore {
    pub candidates: Vec<CandidateRow>,
    pub proficiencies: Vec<ProficiencyRow>,
    pub allocations: Vec<AllocationRow>,
    pub leaves: Vec<LeavePlanRow>,
    pub positions: Vec<PositionRow>,
    pub clients: Vec<NamedRow>,
    pub projects: Vec<NamedRow>,
}

#[async_trait]
impl TalentStore for InMemoryTalentStore {
    async fn load_snapshot(&self) -> Result<TalentSnapshot, AppError> {
        let candidates: Vec<CandidateRow> = self
            .candidates
            .iter()
            .filter(|c| c.active)
            .cloned()
            .collect();
        let leaves: Vec<LeavePlanRow> = self
            .leaves
            .iter()
            .filter(|l| l.blocks_availability())
            .cloned()
            .collect();

        Ok(TalentSnapshot::new(
            candidates,
            self.proficiencies.clone(),
            self.allocations.clone(),
            leaves,
        ))
    }

    async fn position(&self, id: i64) -> Result<Option<PositionRow>, AppError> {
        Ok(self.positions.iter().find(|p| p.id == id).cloned())
    }

    async fn search_names(&self, query: &str) -> Result<UniversalMatches, AppError> {
        let needle = query.to_lowercase();
        let name_matches = |name: &str| name.to_lowercase().contains(&needle);

        Ok(UniversalMatches {
            users: self
                .candidates
                .iter()
                .filter(|c| name_matches(&c.full_name()))
                .map(|c| NamedRow {
                    id: c.id,
                    name: c.full_name(),
                })
                .collect(),
            clients: self
                .clients
                .iter()
                .filter(|c| name_matches(&c.name))
                .cloned()
                .collect(),
            projects: self
                .projects
                .iter()
                .filter(|p| name_matches(&p.name))
                .cloned()
                .collect(),
        })
    }
}
