use chrono::{Duration, NaiveDate};

use crate::models::staffing::{AllocationRow, LeavePlanRow};
use crate::search::request::DateWindow;

/// Fraction of days in `window` the candidate can take on `threshold` percent
/// of new work, as a float in [0, 1].
///
/// A day counts as available only when all three hold:
/// - the summed utilization of firm (non-tentative) allocations covering the
///   day leaves at least `threshold` percent free; an allocation without an
///   end date covers through the window end;
/// - no blocking leave plan covers the day;
/// - the day is strictly before the candidate's last working day, if one is
///   set.
///
/// Computed per request with a day-bucket sweep over the window; the
/// threshold and window vary call to call, so this is never precomputed.
pub fn availability_score(
    allocations: &[AllocationRow],
    leaves: &[LeavePlanRow],
    last_working_day: Option<NaiveDate>,
    window: &DateWindow,
    threshold: i32,
) -> f64 {
    let total_days = window.total_days();
    debug_assert!(total_days > 0);

    let mut utilization_by_day = vec![0i64; total_days as usize];
    for allocation in allocations {
        if allocation.tentative {
            continue;
        }
        let cover_start = allocation.start_date.max(window.start);
        let cover_end = allocation.end_date.unwrap_or(window.end).min(window.end);
        let mut day = cover_start;
        while day <= cover_end {
            let index = (day - window.start).num_days() as usize;
            utilization_by_day[index] += i64::from(allocation.utilization);
            day += Duration::days(1);
        }
    }

    let mut on_leave = vec![false; total_days as usize];
    for leave in leaves {
        if !leave.blocks_availability() {
            continue;
        }
        let cover_start = leave.from_date.max(window.start);
        let cover_end = leave.to_date.min(window.end);
        let mut day = cover_start;
        while day <= cover_end {
            on_leave[(day - window.start).num_days() as usize] = true;
            day += Duration::days(1);
        }
    }

    let mut available_days = 0i64;
    for offset in 0..total_days {
        let day = window.start + Duration::days(offset);
        let free_capacity = 100 - utilization_by_day[offset as usize];
        let utilization_ok = free_capacity >= i64::from(threshold);
        let leave_ok = !on_leave[offset as usize];
        let working_ok = last_working_day.map(|lwd| day < lwd).unwrap_or(true);
        if utilization_ok && leave_ok && working_ok {
            available_days += 1;
        }
    }

    available_days as f64 / total_days as f64
}
