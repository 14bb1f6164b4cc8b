use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{Duration, NaiveDate, Utc};
use serde::Deserialize;

use crate::errors::AppError;
use crate::pagination::{paginate, DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE};
use crate::search::pool::build_candidate_pool;
use crate::search::request::{DateWindow, ExperienceRange, PoolFilter, ScoreParams};
use crate::search::response::{build_talent_cards, SearchCriteria, SearchTalentResponse};
use crate::search::scoring::{score_candidates, Weights};
use crate::state::AppState;
use crate::store::UniversalMatches;

/// Positions without an end date are scored over a 90-day window.
const OPEN_ENDED_WINDOW_DAYS: i64 = 89;

#[derive(Debug, Deserialize)]
pub struct SearchTalentQuery {
    pub position: i64,
    pub search: Option<String>,
    #[serde(default)]
    pub related_suggestions: bool,
    /// Comma-separated work locations.
    pub locations: Option<String>,
    pub page: Option<usize>,
    pub size: Option<usize>,
    pub response_date_start: Option<NaiveDate>,
    pub response_date_end: Option<NaiveDate>,
}

/// GET /api/v1/search/talents
///
/// Position-based talent recommendation: the window, utilization, skills,
/// role and experience band all come from the position itself.
pub async fn handle_search_talents(
    State(state): State<AppState>,
    Query(query): Query<SearchTalentQuery>,
) -> Result<Json<SearchTalentResponse>, AppError> {
    let position = state
        .store
        .position(query.position)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Position {} not found", query.position)))?;

    let start_date = position.start_date;
    let end_date = position
        .end_date
        .unwrap_or(start_date + Duration::days(OPEN_ENDED_WINDOW_DAYS));
    let window = DateWindow::new(start_date, end_date)?;
    let experience = ExperienceRange::new(
        position.experience_range_start,
        position.experience_range_end,
    )?;
    validate_response_bounds(query.response_date_start, query.response_date_end)?;

    let locations = query
        .locations
        .as_deref()
        .map(parse_location_list)
        .unwrap_or_default();

    let filter = PoolFilter {
        role_id: Some(position.role_id),
        skill_ids: position.skill_ids.clone(),
        search: query.search.clone(),
        locations,
        related_suggestions: query.related_suggestions,
        project_ids: Vec::new(),
    };
    let params = ScoreParams {
        window: Some(window),
        utilization: Some(position.utilization),
        skill_ids: position.skill_ids.clone(),
        experience: Some(experience),
        today: Utc::now().date_naive(),
    };

    let snapshot = state.store.load_snapshot().await?;
    let pool = build_candidate_pool(&snapshot, &filter);
    let scored = score_candidates(&snapshot, &pool, &params, &Weights::default());

    let count = scored.len();
    let page = paginate(
        &scored,
        query.page.unwrap_or(DEFAULT_PAGE_NUMBER),
        query.size.unwrap_or(DEFAULT_PAGE_SIZE),
    );
    let talents = build_talent_cards(
        &snapshot,
        &page,
        &position.skill_ids,
        query.response_date_start,
        query.response_date_end,
        &[position.project_id],
        params.today,
    );

    let criteria = SearchCriteria {
        role: Some(position.role_name.clone()),
        project_name: Some(position.project_name.clone()),
        skills: position.skill_ids.clone(),
        experience_range_start: Some(position.experience_range_start),
        experience_range_end: Some(position.experience_range_end),
        utilization: Some(position.utilization),
        start_date: Some(start_date),
        end_date: Some(end_date),
    };

    Ok(Json(SearchTalentResponse {
        criteria,
        talents,
        count,
    }))
}

#[derive(Debug, Deserialize)]
pub struct QuickSearchBody {
    pub role: Option<i64>,
    pub skills: Vec<i64>,
    #[serde(default)]
    pub projects: Vec<i64>,
    pub experience_range_start: Option<i32>,
    pub experience_range_end: Option<i32>,
    pub utilization: Option<i32>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub page: Option<usize>,
    pub size: Option<usize>,
    pub response_date_start: Option<NaiveDate>,
    pub response_date_end: Option<NaiveDate>,
    #[serde(default)]
    pub related_suggestions: bool,
    pub search: Option<String>,
    #[serde(default)]
    pub locations: Vec<String>,
}

/// POST /api/v1/search/talents/quick
///
/// Ad-hoc talent recommendation: every criterion comes from the request
/// body. Absent window or experience bounds drop those factors from the
/// composite instead of erroring.
pub async fn handle_quick_search(
    State(state): State<AppState>,
    Json(body): Json<QuickSearchBody>,
) -> Result<Json<SearchTalentResponse>, AppError> {
    let window = match (body.start_date, body.end_date) {
        (Some(start), Some(end)) => Some(DateWindow::new(start, end)?),
        _ => None,
    };
    let experience = match (body.experience_range_start, body.experience_range_end) {
        (Some(start), Some(end)) => Some(ExperienceRange::new(start, end)?),
        _ => None,
    };
    validate_response_bounds(body.response_date_start, body.response_date_end)?;

    let filter = PoolFilter {
        role_id: body.role,
        skill_ids: body.skills.clone(),
        search: body.search.clone(),
        locations: body.locations.clone(),
        related_suggestions: body.related_suggestions,
        project_ids: body.projects.clone(),
    };
    let params = ScoreParams {
        window,
        utilization: body.utilization,
        skill_ids: body.skills.clone(),
        experience,
        today: Utc::now().date_naive(),
    };

    let snapshot = state.store.load_snapshot().await?;
    let pool = build_candidate_pool(&snapshot, &filter);
    let scored = score_candidates(&snapshot, &pool, &params, &Weights::default());

    let count = scored.len();
    let page = paginate(
        &scored,
        body.page.unwrap_or(DEFAULT_PAGE_NUMBER),
        body.size.unwrap_or(DEFAULT_PAGE_SIZE),
    );
    let talents = build_talent_cards(
        &snapshot,
        &page,
        &body.skills,
        body.response_date_start,
        body.response_date_end,
        &body.projects,
        params.today,
    );

    let criteria = SearchCriteria {
        role: None,
        project_name: None,
        skills: body.skills.clone(),
        experience_range_start: body.experience_range_start,
        experience_range_end: body.experience_range_end,
        utilization: body.utilization,
        start_date: body.start_date,
        end_date: body.end_date,
    };

    Ok(Json(SearchTalentResponse {
        criteria,
        talents,
        count,
    }))
}

#[derive(Debug, Deserialize)]
pub struct UniversalSearchQuery {
    pub search: String,
}

/// GET /api/v1/search/universal
///
/// Name search across candidates, clients and projects.
pub async fn handle_universal_search(
    State(state): State<AppState>,
    Query(query): Query<UniversalSearchQuery>,
) -> Result<Json<UniversalMatches>, AppError> {
    if query.search.trim().is_empty() {
        return Err(AppError::Validation(
            "search string must not be empty".to_string(),
        ));
    }
    let matches = state.store.search_names(query.search.trim()).await?;
    Ok(Json(matches))
}

fn parse_location_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn validate_response_bounds(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<(), AppError> {
    if let (Some(start), Some(end)) = (start, end) {
        DateWindow::new(start, end)?;
    }
    Ok(())
}
