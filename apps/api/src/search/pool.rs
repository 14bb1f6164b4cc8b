use std::collections::HashSet;

use crate::search::request::PoolFilter;
use crate::search::snapshot::TalentSnapshot;

/// Filters the candidate population down to the pool eligible for scoring.
///
/// Every filter is a hard constraint; empty filters simply widen the pool.
/// The required-skill filter is a coverage POSSIBILITY check — any proficiency
/// row for a requested skill qualifies, rating 0 included. Proficiency depth
/// is scored later, not gated here.
///
/// Returns candidate ids in snapshot order, de-duplicated. An empty result is
/// a valid zero-match outcome, not an error.
pub fn build_candidate_pool(snapshot: &TalentSnapshot, filter: &PoolFilter) -> Vec<i64> {
    let search_lowered = filter.search.as_ref().map(|s| s.to_lowercase());
    let locations_lowered: Vec<String> = filter
        .locations
        .iter()
        .map(|l| l.to_lowercase())
        .collect();

    let mut pool = Vec::new();
    let mut seen = HashSet::new();

    for candidate in snapshot.candidates() {
        if !candidate.active {
            continue;
        }

        if let Some(role_id) = filter.role_id {
            let has_role = candidate.role_id == Some(role_id);
            // Related suggestions invert the role filter: candidates OUTSIDE
            // the requested role surface as alternative matches.
            if filter.related_suggestions == has_role {
                continue;
            }
        }

        if let Some(needle) = &search_lowered {
            if !candidate.full_name().to_lowercase().contains(needle) {
                continue;
            }
        }

        let has_requested_skill = snapshot
            .proficiencies(candidate.id)
            .iter()
            .any(|p| filter.skill_ids.contains(&p.skill_id));
        if !has_requested_skill {
            continue;
        }

        if !filter.project_ids.is_empty() {
            let on_project = snapshot
                .allocations(candidate.id)
                .iter()
                .any(|a| filter.project_ids.contains(&a.project_id));
            if !on_project {
                continue;
            }
        }

        if !locations_lowered.is_empty() {
            let location_matches = candidate
                .work_location
                .as_ref()
                .map(|loc| locations_lowered.contains(&loc.to_lowercase()))
                .unwrap_or(false);
            if !location_matches {
                continue;
            }
        }

        if seen.insert(candidate.id) {
            pool.push(candidate.id);
        }
    }

    pool
}
