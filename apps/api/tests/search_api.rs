use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use chrono::NaiveDate;
use serde_json::{json, Value};
use tower::ServiceExt;

use staffing_api::config::Config;
use staffing_api::models::catalog::NamedRow;
use staffing_api::models::staffing::{AllocationRow, LeavePlanRow, PositionRow};
use staffing_api::models::talent::{CandidateRow, ProficiencyRow};
use staffing_api::routes::build_router;
use staffing_api::state::AppState;
use staffing_api::store::memory::InMemoryTalentStore;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn candidate(id: i64, first: &str, last: &str, role_id: i64) -> CandidateRow {
    CandidateRow {
        id,
        first_name: first.to_string(),
        last_name: last.to_string(),
        role_id: Some(role_id),
        role_name: Some("Backend Engineer".to_string()),
        active: true,
        work_location: Some("Pune".to_string()),
        career_start_date: Some(date(2020, 1, 1)),
        career_break_months: 0,
        last_working_day: None,
    }
}

fn proficiency(candidate_id: i64, skill_id: i64, rating: i32) -> ProficiencyRow {
    ProficiencyRow {
        candidate_id,
        skill_id,
        skill_name: format!("skill-{skill_id}"),
        rating,
    }
}

fn seeded_store() -> InMemoryTalentStore {
    InMemoryTalentStore {
        candidates: vec![
            candidate(1, "Asha", "Rao", 10),
            candidate(2, "Vikram", "Shah", 10),
            candidate(3, "Meera", "Iyer", 11),
        ],
        proficiencies: vec![
            proficiency(1, 7, 4),
            proficiency(1, 8, 3),
            proficiency(2, 7, 2),
            proficiency(3, 7, 5),
        ],
        allocations: vec![AllocationRow {
            candidate_id: 2,
            position_id: 900,
            project_id: 40,
            project_name: "Atlas".to_string(),
            utilization: 100,
            start_date: date(2024, 1, 1),
            end_date: None,
            tentative: false,
        }],
        leaves: vec![LeavePlanRow {
            candidate_id: 1,
            from_date: date(2024, 7, 1),
            to_date: date(2024, 7, 5),
            approval_status: "Approved".to_string(),
        }],
        positions: vec![
            PositionRow {
                id: 100,
                project_id: 40,
                project_name: "Atlas".to_string(),
                role_id: 10,
                role_name: "Backend Engineer".to_string(),
                skill_ids: vec![7, 8],
                experience_range_start: 2,
                experience_range_end: 6,
                utilization: 50,
                start_date: date(2024, 6, 1),
                end_date: Some(date(2024, 8, 31)),
            },
            PositionRow {
                id: 101,
                project_id: 40,
                project_name: "Atlas".to_string(),
                role_id: 10,
                role_name: "Backend Engineer".to_string(),
                skill_ids: vec![7],
                experience_range_start: 0,
                experience_range_end: 10,
                utilization: 30,
                start_date: date(2024, 6, 1),
                end_date: None,
            },
        ],
        clients: vec![NamedRow {
            id: 1,
            name: "Atlantic Media".to_string(),
        }],
        projects: vec![NamedRow {
            id: 40,
            name: "Atlas".to_string(),
        }],
    }
}

fn test_router() -> axum::Router {
    let state = AppState {
        store: Arc::new(seeded_store()),
        config: Config {
            database_url: "postgres://unused".to_string(),
            port: 0,
            rust_log: "info".to_string(),
        },
    };
    build_router(state)
}

async fn json_body(response: axum::response::Response) -> Value {
    let body = to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("body");
    serde_json::from_slice(&body).expect("json")
}

#[tokio::test]
async fn health_endpoint_reports_ok() {
    let response = test_router()
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = json_body(response).await;
    assert_eq!(payload.get("status"), Some(&json!("ok")));
}

#[tokio::test]
async fn position_search_ranks_and_echoes_criteria() {
    let response = test_router()
        .oneshot(
            Request::builder()
                .uri("/api/v1/search/talents?position=100")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = json_body(response).await;

    assert_eq!(payload["criteria"]["role"], json!("Backend Engineer"));
    assert_eq!(payload["criteria"]["utilization"], json!(50));
    assert_eq!(payload["count"], json!(2));

    // Candidates 1 and 2 share the requested role; candidate 1 has deeper
    // proficiency and a free calendar, so ranks first.
    let talents = payload["talents"].as_array().expect("talents array");
    assert_eq!(talents.len(), 2);
    assert_eq!(talents[0]["id"], json!(1));
    assert_eq!(talents[1]["id"], json!(2));

    let top_score = talents[0]["score"].as_i64().expect("score");
    let runner_up = talents[1]["score"].as_i64().expect("score");
    assert!(top_score > runner_up);
    assert_eq!(
        talents[0]["match_percent"],
        json!(format!("{top_score}%"))
    );
}

#[tokio::test]
async fn open_ended_position_scores_over_ninety_days() {
    let response = test_router()
        .oneshot(
            Request::builder()
                .uri("/api/v1/search/talents?position=101")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = json_body(response).await;

    // No position end date: the scoring window runs 90 days from the start.
    assert_eq!(payload["criteria"]["start_date"], json!("2024-06-01"));
    assert_eq!(payload["criteria"]["end_date"], json!("2024-08-29"));
}

#[tokio::test]
async fn unknown_position_returns_not_found() {
    let response = test_router()
        .oneshot(
            Request::builder()
                .uri("/api/v1/search/talents?position=999")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = json_body(response).await;
    assert_eq!(payload["error"]["code"], json!("NOT_FOUND"));
}

#[tokio::test]
async fn quick_search_scores_without_window() {
    let body = json!({
        "skills": [7],
        "related_suggestions": false
    });
    let response = test_router()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/search/talents/quick")
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&body).expect("serialize")))
                .expect("request"),
        )
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = json_body(response).await;

    // All three candidates hold skill 7.
    assert_eq!(payload["count"], json!(3));
    let talents = payload["talents"].as_array().expect("talents array");
    // No window and no experience bounds: only skill factors apply, so the
    // rating-5 candidate (capped at 4) leads, then rating 4, then rating 2.
    assert_eq!(talents[0]["id"], json!(1));
    assert_eq!(talents[0]["availability_score"], json!(0.0));
    assert_eq!(talents[1]["id"], json!(3));
    assert_eq!(talents[2]["id"], json!(2));
    // Ratings 4 and 5 both saturate proficiency.
    assert_eq!(talents[0]["score"], talents[1]["score"]);
}

#[tokio::test]
async fn quick_search_related_suggestions_inverts_role() {
    let body = json!({
        "skills": [7],
        "role": 10,
        "related_suggestions": true
    });
    let response = test_router()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/search/talents/quick")
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&body).expect("serialize")))
                .expect("request"),
        )
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = json_body(response).await;
    let talents = payload["talents"].as_array().expect("talents array");
    assert_eq!(talents.len(), 1);
    assert_eq!(talents[0]["id"], json!(3));
}

#[tokio::test]
async fn quick_search_rejects_inverted_window() {
    let body = json!({
        "skills": [7],
        "start_date": "2024-06-30",
        "end_date": "2024-06-01",
        "utilization": 50
    });
    let response = test_router()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/search/talents/quick")
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&body).expect("serialize")))
                .expect("request"),
        )
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = json_body(response).await;
    assert_eq!(payload["error"]["code"], json!("VALIDATION_ERROR"));
}

#[tokio::test]
async fn quick_search_with_window_penalizes_allocated_candidate() {
    let body = json!({
        "skills": [7],
        "start_date": "2024-06-01",
        "end_date": "2024-06-30",
        "utilization": 50
    });
    let response = test_router()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/search/talents/quick")
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&body).expect("serialize")))
                .expect("request"),
        )
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = json_body(response).await;
    let talents = payload["talents"].as_array().expect("talents array");

    // Candidate 2 is fully allocated for the whole window.
    let fully_allocated = talents
        .iter()
        .find(|t| t["id"] == json!(2))
        .expect("candidate 2 present");
    assert_eq!(fully_allocated["availability_score"], json!(0.0));

    let free = talents.iter().find(|t| t["id"] == json!(1)).expect("candidate 1");
    assert_eq!(free["availability_score"], json!(1.0));
}

#[tokio::test]
async fn universal_search_matches_all_entity_kinds() {
    let response = test_router()
        .oneshot(
            Request::builder()
                .uri("/api/v1/search/universal?search=atl")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = json_body(response).await;

    // "atl" hits project Atlas and client Atlantic Media, no candidates.
    assert_eq!(payload["projects"][0]["name"], json!("Atlas"));
    assert_eq!(payload["clients"][0]["name"], json!("Northwind Traders"));
    assert_eq!(payload["users"].as_array().expect("users").len(), 0);
}
