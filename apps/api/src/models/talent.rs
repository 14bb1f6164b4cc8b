use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One employee eligible for staffing consideration.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CandidateRow {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub role_id: Option<i64>,
    pub role_name: Option<String>,
    pub active: bool,
    pub work_location: Option<String>,
    pub career_start_date: Option<NaiveDate>,
    pub career_break_months: i32,
    pub last_working_day: Option<NaiveDate>,
}

impl CandidateRow {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Career length in days: calendar days since the career start, minus
    /// 30 days per career-break month. Zero without a career start date.
    pub fn tenure_days(&self, today: NaiveDate) -> i64 {
        match self.career_start_date {
            Some(start) => {
                (today - start).num_days() - 30 * i64::from(self.career_break_months)
            }
            None => 0,
        }
    }

    /// Career length in whole months for display. The clock stops at the
    /// last working day once it has passed.
    pub fn experience_months(&self, today: NaiveDate) -> i32 {
        let start = match self.career_start_date {
            Some(d) => d,
            None => return 0,
        };
        let end = match self.last_working_day {
            Some(lwd) if today > lwd => lwd,
            _ => today,
        };
        (whole_months_between(start, end) - self.career_break_months).max(0)
    }
}

fn whole_months_between(start: NaiveDate, end: NaiveDate) -> i32 {
    let mut months = (end.year() - start.year()) * 12 + (end.month() as i32 - start.month() as i32);
    if end.day() < start.day() {
        months -= 1;
    }
    months.max(0)
}

/// One (candidate, skill) proficiency rating on the 0-5 scale.
/// A rating of 0 marks a lapsed skill; the row survives but earns nothing.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProficiencyRow {
    pub candidate_id: i64,
    pub skill_id: i64,
    pub skill_name: String,
    pub rating: i32,
}
