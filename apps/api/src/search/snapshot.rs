use std::collections::HashMap;

use crate::models::staffing::{AllocationRow, LeavePlanRow};
use crate::models::talent::{CandidateRow, ProficiencyRow};

/// The immutable result of the one bulk read a scoring call operates on.
///
/// Rows are grouped by candidate at construction so pool filtering and
/// scoring never walk the full tables per candidate. The snapshot is never
/// mutated after construction; one search request sees exactly one snapshot.
#[derive(Debug, Default)]
pub struct TalentSnapshot {
    candidates: Vec<CandidateRow>,
    proficiencies: HashMap<i64, Vec<ProficiencyRow>>,
    allocations: HashMap<i64, Vec<AllocationRow>>,
    leaves: HashMap<i64, Vec<LeavePlanRow>>,
}

impl TalentSnapshot {
    pub fn new(
        candidates: Vec<CandidateRow>,
        proficiencies: Vec<ProficiencyRow>,
        allocations: Vec<AllocationRow>,
        leaves: Vec<LeavePlanRow>,
    ) -> Self {
        let mut grouped_proficiencies: HashMap<i64, Vec<ProficiencyRow>> = HashMap::new();
        for row in proficiencies {
            grouped_proficiencies
                .entry(row.candidate_id)
                .or_default()
                .push(row);
        }

        let mut grouped_allocations: HashMap<i64, Vec<AllocationRow>> = HashMap::new();
        for row in allocations {
            grouped_allocations
                .entry(row.candidate_id)
                .or_default()
                .push(row);
        }

        let mut grouped_leaves: HashMap<i64, Vec<LeavePlanRow>> = HashMap::new();
        for row in leaves {
            grouped_leaves.entry(row.candidate_id).or_default().push(row);
        }

        TalentSnapshot {
            candidates,
            proficiencies: grouped_proficiencies,
            allocations: grouped_allocations,
            leaves: grouped_leaves,
        }
    }

    /// All candidates in snapshot order. The order is stable for the lifetime
    /// of the snapshot and defines the pre-scoring order of the pool.
    pub fn candidates(&self) -> &[CandidateRow] {
        &self.candidates
    }

    pub fn candidate(&self, id: i64) -> Option<&CandidateRow> {
        self.candidates.iter().find(|c| c.id == id)
    }

    pub fn proficiencies(&self, candidate_id: i64) -> &[ProficiencyRow] {
        self.proficiencies
            .get(&candidate_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn allocations(&self, candidate_id: i64) -> &[AllocationRow] {
        self.allocations
            .get(&candidate_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn leaves(&self, candidate_id: i64) -> &[LeavePlanRow] {
        self.leaves
            .get(&candidate_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
