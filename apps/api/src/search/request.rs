use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// An inclusive day-granularity date range. `end < start` is rejected at
/// construction — the engine never clamps a malformed window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, AppError> {
        if end < start {
            return Err(AppError::Validation(format!(
                "end date {end} precedes start date {start}"
            )));
        }
        Ok(DateWindow { start, end })
    }

    /// Number of days in the window, both endpoints included.
    pub fn total_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// A requested experience band in whole years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceRange {
    pub start_years: i32,
    pub end_years: i32,
}

impl ExperienceRange {
    pub fn new(start_years: i32, end_years: i32) -> Result<Self, AppError> {
        if end_years < start_years {
            return Err(AppError::Validation(format!(
                "experience range end {end_years} precedes start {start_years}"
            )));
        }
        Ok(ExperienceRange {
            start_years,
            end_years,
        })
    }
}

/// Hard constraints the candidate pool is filtered on before any scoring.
#[derive(Debug, Clone, Default)]
pub struct PoolFilter {
    pub role_id: Option<i64>,
    pub skill_ids: Vec<i64>,
    pub search: Option<String>,
    pub locations: Vec<String>,
    /// Inverts the role filter: surface candidates OUTSIDE the requested
    /// role as alternative matches.
    pub related_suggestions: bool,
    pub project_ids: Vec<i64>,
}

/// Everything the scorer needs for one request, validated up front.
/// Absent optional fields zero out the corresponding sub-score and weight;
/// they are designed fallbacks, not errors.
#[derive(Debug, Clone)]
pub struct ScoreParams {
    pub window: Option<DateWindow>,
    pub utilization: Option<i32>,
    pub skill_ids: Vec<i64>,
    pub experience: Option<ExperienceRange>,
    /// Reference date for tenure math. Injected so scoring stays a pure
    /// function of its inputs.
    pub today: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_window_rejects_inverted_range() {
        let err = DateWindow::new(date(2024, 3, 10), date(2024, 3, 1));
        assert!(matches!(err, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_window_total_days_is_inclusive() {
        let w = DateWindow::new(date(2024, 3, 1), date(2024, 3, 1)).unwrap();
        assert_eq!(w.total_days(), 1);
        let w = DateWindow::new(date(2024, 3, 1), date(2024, 3, 31)).unwrap();
        assert_eq!(w.total_days(), 31);
    }

    #[test]
    fn test_experience_range_rejects_inverted_bounds() {
        let err = ExperienceRange::new(5, 2);
        assert!(matches!(err, Err(AppError::Validation(_))));
        assert!(ExperienceRange::new(2, 2).is_ok());
    }
}
