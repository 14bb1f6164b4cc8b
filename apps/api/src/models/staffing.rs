use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Leave approval statuses that do NOT block availability.
pub const LEAVE_STATUS_CANCELLED: &str = "Cancelled";
pub const LEAVE_STATUS_REJECTED: &str = "Rejected";
pub const LEAVE_STATUS_APPROVED: &str = "Approved";

/// A time-bounded claim on a candidate's capacity.
/// `end_date = None` means open-ended (ongoing).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AllocationRow {
    pub candidate_id: i64,
    pub position_id: i64,
    pub project_id: i64,
    pub project_name: String,
    pub utilization: i32,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    /// Soft hold against a not-yet-committed project. Excluded from
    /// availability accounting; still counts for project membership.
    pub tentative: bool,
}

/// A planned leave. Only non-cancelled, non-rejected rows block availability.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LeavePlanRow {
    pub candidate_id: i64,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    pub approval_status: String,
}

impl LeavePlanRow {
    pub fn blocks_availability(&self) -> bool {
        self.approval_status != LEAVE_STATUS_CANCELLED
            && self.approval_status != LEAVE_STATUS_REJECTED
    }
}

/// An open position on a project, the anchor of a position-based talent search.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PositionRow {
    pub id: i64,
    pub project_id: i64,
    pub project_name: String,
    pub role_id: i64,
    pub role_name: String,
    pub skill_ids: Vec<i64>,
    pub experience_range_start: i32,
    pub experience_range_end: i32,
    pub utilization: i32,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}
