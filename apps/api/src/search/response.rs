use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::staffing::LEAVE_STATUS_APPROVED;
use crate::search::scoring::ScoredTalent;
use crate::search::snapshot::TalentSnapshot;

/// Echo of the effective search criteria, returned alongside the talents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchCriteria {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    pub skills: Vec<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience_range_start: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience_range_end: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utilization: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillEntry {
    pub skill_id: i64,
    pub skill: String,
    pub rating: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationEntry {
    pub project_name: String,
    pub is_same_project: bool,
    pub position_id: i64,
    pub utilization: i32,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub tentative: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveEntry {
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
}

/// One ranked talent as serialized to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TalentCard {
    pub id: i64,
    pub name: String,
    pub match_percent: String,
    pub score: i32,
    pub availability_score: f64,
    pub skill_score: f64,
    pub proficiency_score: f64,
    pub experience_score: f64,
    pub role: Option<String>,
    pub work_location: Option<String>,
    pub last_working_day: Option<NaiveDate>,
    pub experience_months: i32,
    pub skills: Vec<SkillEntry>,
    pub allocations: Vec<AllocationEntry>,
    pub leaves: Vec<LeaveEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchTalentResponse {
    pub criteria: SearchCriteria,
    pub talents: Vec<TalentCard>,
    pub count: usize,
}

/// Materializes response cards for the scored talents, in scoring order.
///
/// Skills list the requested ones first, then the rest, each block sorted by
/// rating descending; lapsed (rating 0) rows are dropped. Allocations and
/// leaves are limited to the response date bounds; either bound may be given
/// on its own.
pub fn build_talent_cards(
    snapshot: &TalentSnapshot,
    scored: &[ScoredTalent],
    requested_skills: &[i64],
    response_start: Option<NaiveDate>,
    response_end: Option<NaiveDate>,
    project_ids: &[i64],
    today: NaiveDate,
) -> Vec<TalentCard> {
    scored
        .iter()
        .filter_map(|talent| {
            let candidate = snapshot.candidate(talent.candidate_id)?;

            let mut requested: Vec<SkillEntry> = Vec::new();
            let mut other: Vec<SkillEntry> = Vec::new();
            for row in snapshot.proficiencies(candidate.id) {
                if row.rating == 0 {
                    continue;
                }
                let entry = SkillEntry {
                    skill_id: row.skill_id,
                    skill: row.skill_name.clone(),
                    rating: row.rating,
                };
                if requested_skills.contains(&row.skill_id) {
                    requested.push(entry);
                } else {
                    other.push(entry);
                }
            }
            requested.sort_by(|a, b| b.rating.cmp(&a.rating).then(a.skill_id.cmp(&b.skill_id)));
            other.sort_by(|a, b| b.rating.cmp(&a.rating).then(a.skill_id.cmp(&b.skill_id)));
            requested.extend(other);

            let allocations: Vec<AllocationEntry> = snapshot
                .allocations(candidate.id)
                .iter()
                .filter(|a| {
                    let starts_in_time = response_end
                        .map(|bound| a.start_date <= bound)
                        .unwrap_or(true);
                    let still_running = response_start
                        .map(|bound| a.end_date.map(|end| end >= bound).unwrap_or(true))
                        .unwrap_or(true);
                    starts_in_time && still_running
                })
                .map(|a| AllocationEntry {
                    project_name: a.project_name.clone(),
                    is_same_project: project_ids.contains(&a.project_id),
                    position_id: a.position_id,
                    utilization: a.utilization,
                    start_date: a.start_date,
                    end_date: a.end_date,
                    tentative: a.tentative,
                })
                .collect();

            let leaves: Vec<LeaveEntry> = snapshot
                .leaves(candidate.id)
                .iter()
                .filter(|l| l.approval_status == LEAVE_STATUS_APPROVED)
                .filter(|l| {
                    let starts_in_time = response_end
                        .map(|bound| l.from_date <= bound)
                        .unwrap_or(true);
                    let still_running = response_start
                        .map(|bound| l.to_date >= bound)
                        .unwrap_or(true);
                    starts_in_time && still_running
                })
                .map(|l| LeaveEntry {
                    from_date: l.from_date,
                    to_date: l.to_date,
                })
                .collect();

            Some(TalentCard {
                id: candidate.id,
                name: candidate.full_name(),
                match_percent: format!("{}%", talent.score),
                score: talent.score,
                availability_score: talent.availability_score,
                skill_score: talent.skill_score,
                proficiency_score: talent.proficiency_score,
                experience_score: talent.experience_score,
                role: candidate.role_name.clone(),
                work_location: candidate.work_location.clone(),
                last_working_day: candidate.last_working_day,
                experience_months: candidate.experience_months(today),
                skills: requested,
                allocations,
                leaves,
            })
        })
        .collect()
}
