use anyhow::Result;
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use crate::errors::AppError;
use crate::models::catalog::NamedRow;
use crate::models::staffing::{AllocationRow, LeavePlanRow, PositionRow};
use crate::models::talent::{CandidateRow, ProficiencyRow};
use crate::search::snapshot::TalentSnapshot;
use crate::store::{TalentStore, UniversalMatches};

/// Postgres-backed store. Every trait method issues a small fixed number of
/// bulk queries — no per-candidate round trips.
pub struct PgTalentStore {
    pool: PgPool,
}

impl PgTalentStore {
    pub async fn connect(database_url: &str) -> Result<Self> {
        info!("Connecting to PostgreSQL...");

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;

        info!("PostgreSQL connection pool established");
        Ok(PgTalentStore { pool })
    }

    pub fn with_pool(pool: PgPool) -> Self {
        PgTalentStore { pool }
    }
}

#[async_trait]
impl TalentStore for PgTalentStore {
    async fn load_snapshot(&self) -> Result<TalentSnapshot, AppError> {
        let candidates: Vec<CandidateRow> = sqlx::query_as(
            r#"
            SELECT u.id, u.first_name, u.last_name, u.role_id, r.name AS role_name,
                   u.is_active AS active, u.work_location, u.career_start_date,
                   u.career_break_months, u.last_working_day
            FROM users u
            LEFT JOIN roles r ON r.id = u.role_id
            WHERE u.is_active = TRUE
            ORDER BY u.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let proficiencies: Vec<ProficiencyRow> = sqlx::query_as(
            r#"
            SELECT pm.user_id AS candidate_id, pm.skill_id, s.name AS skill_name, pm.rating
            FROM proficiency_mapping pm
            JOIN skills s ON s.id = pm.skill_id
            JOIN users u ON u.id = pm.user_id
            WHERE u.is_active = TRUE
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let allocations: Vec<AllocationRow> = sqlx::query_as(
            r#"
            SELECT a.user_id AS candidate_id, a.position_id, p.id AS project_id,
                   p.name AS project_name, a.utilization, a.start_date, a.end_date,
                   a.tentative
            FROM project_allocation a
            JOIN project_positions pos ON pos.id = a.position_id
            JOIN project_roles pr ON pr.id = pos.project_role_id
            JOIN projects p ON p.id = pr.project_id
            JOIN users u ON u.id = a.user_id
            WHERE u.is_active = TRUE
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let leaves: Vec<LeavePlanRow> = sqlx::query_as(
            r#"
            SELECT l.user_id AS candidate_id, l.from_date, l.to_date, l.approval_status
            FROM leave_plans l
            JOIN users u ON u.id = l.user_id
            WHERE u.is_active = TRUE
              AND l.approval_status NOT IN ('Cancelled', 'Rejected')
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(TalentSnapshot::new(
            candidates,
            proficiencies,
            allocations,
            leaves,
        ))
    }

    async fn position(&self, id: i64) -> Result<Option<PositionRow>, AppError> {
        let position: Option<PositionRow> = sqlx::query_as(
            r#"
            SELECT pos.id, p.id AS project_id, p.name AS project_name,
                   pr.role_id, r.name AS role_name,
                   COALESCE(
                       array_agg(ps.skill_id) FILTER (WHERE ps.skill_id IS NOT NULL),
                       '{}'
                   ) AS skill_ids,
                   pos.experience_range_start, pos.experience_range_end,
                   pos.utilization, pos.start_date, pos.end_date
            FROM project_positions pos
            JOIN project_roles pr ON pr.id = pos.project_role_id
            JOIN projects p ON p.id = pr.project_id
            JOIN roles r ON r.id = pr.role_id
            LEFT JOIN project_position_skills ps ON ps.position_id = pos.id
            WHERE pos.id = $1
            GROUP BY pos.id, p.id, p.name, pr.role_id, r.name
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(position)
    }

    async fn search_names(&self, query: &str) -> Result<UniversalMatches, AppError> {
        let pattern = format!("%{query}%");

        let users: Vec<NamedRow> = sqlx::query_as(
            r#"
            SELECT id, first_name || ' ' || last_name AS name
            FROM users
            WHERE first_name || ' ' || last_name ILIKE $1
            ORDER BY id
            "#,
        )
        .bind(&pattern)
        .fetch_all(&self.pool)
        .await?;

        let clients: Vec<NamedRow> =
            sqlx::query_as("SELECT id, name FROM clients WHERE name ILIKE $1 ORDER BY id")
                .bind(&pattern)
                .fetch_all(&self.pool)
                .await?;

        let projects: Vec<NamedRow> =
            sqlx::query_as("SELECT id, name FROM projects WHERE name ILIKE $1 ORDER BY id")
                .bind(&pattern)
                .fetch_all(&self.pool)
                .await?;

        Ok(UniversalMatches {
            users,
            clients,
            projects,
        })
    }
}
