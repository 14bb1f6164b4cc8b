use serde::{Deserialize, Serialize};

use crate::models::talent::ProficiencyRow;
use crate::search::availability::availability_score;
use crate::search::request::{ExperienceRange, ScoreParams};
use crate::search::snapshot::TalentSnapshot;

/// Ratings above this earn no extra proficiency credit. The scale runs 0-5
/// but a 5 scores the same as a 4.
const PROFICIENCY_CAP: i32 = 4;

/// Experience buffers around the requested band, in days.
const EXPERIENCE_NEAR_BUFFER_DAYS: i64 = 365;
const EXPERIENCE_FAR_BUFFER_DAYS: i64 = 3 * 365;

/// Relative weights of the four match factors. A factor whose inputs are
/// absent from the request drops out of both the numerator and the
/// denominator, so the remaining weights renormalize among themselves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Weights {
    pub availability: u32,
    pub skill: u32,
    pub proficiency: u32,
    pub experience: u32,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            availability: 25,
            skill: 20,
            proficiency: 35,
            experience: 20,
        }
    }
}

/// One scored candidate: the four sub-scores in [0, 1] and the weighted
/// composite as an integer match percentage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredTalent {
    pub candidate_id: i64,
    pub score: i32,
    pub availability_score: f64,
    pub skill_score: f64,
    pub proficiency_score: f64,
    pub experience_score: f64,
}

/// Fraction of the requested skills the candidate holds at rating > 0.
fn skill_coverage(proficiencies: &[ProficiencyRow], skill_ids: &[i64]) -> f64 {
    if skill_ids.is_empty() {
        return 0.0;
    }
    let covered = skill_ids
        .iter()
        .filter(|skill_id| {
            proficiencies
                .iter()
                .any(|p| p.skill_id == **skill_id && p.rating > 0)
        })
        .count();
    covered as f64 / skill_ids.len() as f64
}

/// Capped rating sum over the requested skills, normalized by the maximum
/// attainable sum.
fn proficiency_depth(proficiencies: &[ProficiencyRow], skill_ids: &[i64]) -> f64 {
    if skill_ids.is_empty() {
        return 0.0;
    }
    let rating_sum: i64 = proficiencies
        .iter()
        .filter(|p| skill_ids.contains(&p.skill_id))
        .map(|p| i64::from(p.rating.min(PROFICIENCY_CAP)))
        .sum();
    rating_sum as f64 / (skill_ids.len() as i64 * i64::from(PROFICIENCY_CAP)) as f64
}

/// Banded experience fit: full credit inside the requested range, decaying
/// with distance from it.
fn experience_fit(tenure_days: i64, range: &ExperienceRange) -> f64 {
    let start_range = i64::from(range.start_years) * 365;
    let end_range = i64::from(range.end_years) * 365;

    let within = |slack: i64| tenure_days >= start_range - slack && tenure_days <= end_range + slack;

    if within(0) {
        1.0
    } else if within(EXPERIENCE_NEAR_BUFFER_DAYS) {
        0.75
    } else if within(EXPERIENCE_FAR_BUFFER_DAYS) {
        0.5
    } else {
        0.25
    }
}

/// Scores every candidate in `pool` against the request and returns them
/// ordered by descending composite score, candidate id ascending on ties.
///
/// Pure: same snapshot, pool and params always produce the same output.
/// A candidate with no applicable factor at all (no window, no skills, no
/// experience bounds) scores 0 rather than erroring.
pub fn score_candidates(
    snapshot: &TalentSnapshot,
    pool: &[i64],
    params: &ScoreParams,
    weights: &Weights,
) -> Vec<ScoredTalent> {
    let mut scored: Vec<ScoredTalent> = pool
        .iter()
        .filter_map(|id| snapshot.candidate(*id))
        .map(|candidate| {
            let proficiencies = snapshot.proficiencies(candidate.id);

            let mut weighted_sum = 0.0;
            let mut applied_weight = 0u32;

            let availability = match (&params.window, params.utilization) {
                (Some(window), Some(threshold)) => {
                    let score = availability_score(
                        snapshot.allocations(candidate.id),
                        snapshot.leaves(candidate.id),
                        candidate.last_working_day,
                        window,
                        threshold,
                    );
                    weighted_sum += score * f64::from(weights.availability);
                    applied_weight += weights.availability;
                    score
                }
                _ => 0.0,
            };

            let skill = skill_coverage(proficiencies, &params.skill_ids);
            let proficiency = proficiency_depth(proficiencies, &params.skill_ids);
            if !params.skill_ids.is_empty() {
                weighted_sum += skill * f64::from(weights.skill);
                weighted_sum += proficiency * f64::from(weights.proficiency);
                applied_weight += weights.skill + weights.proficiency;
            }

            let experience = match &params.experience {
                Some(range) => {
                    let score = experience_fit(candidate.tenure_days(params.today), range);
                    weighted_sum += score * f64::from(weights.experience);
                    applied_weight += weights.experience;
                    score
                }
                None => 0.0,
            };

            let score = if applied_weight > 0 {
                (weighted_sum / f64::from(applied_weight) * 100.0).round() as i32
            } else {
                0
            };

            ScoredTalent {
                candidate_id: candidate.id,
                score,
                availability_score: availability,
                skill_score: skill,
                proficiency_score: proficiency,
                experience_score: experience,
            }
        })
        .collect();

    scored.sort_by(|a, b| b.score.cmp(&a.score).then(a.candidate_id.cmp(&b.candidate_id)));
    scored
}
