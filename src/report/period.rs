use crate::persistence::{Store, StoreResult};
use chrono::{Datelike, Days, NaiveDate};

/// Completed seconds per date over a range of days
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodSummary {
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Only dates with completed work, ascending
    pub days: Vec<(NaiveDate, i64)>,
    pub total: i64,
}

impl PeriodSummary {
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

/// Monday..Sunday of the week containing `date`; None when the week runs
/// past the representable calendar
pub fn week_range(date: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    let start = date.checked_sub_days(Days::new(u64::from(date.weekday().num_days_from_monday())))?;
    let end = start.checked_add_days(Days::new(6))?;
    Some((start, end))
}

/// First..last day of a month; None for an invalid year/month
pub fn month_range(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((start, next_month.pred_opt()?))
}

/// Sum completed durations per date in `[start, end]`.
///
/// Paused and active tasks are deliberately left out of period totals.
pub fn summarize(store: &Store, start: NaiveDate, end: NaiveDate) -> StoreResult<PeriodSummary> {
    let days: Vec<(NaiveDate, i64)> = store.query_date_range(start, end)?.into_iter().collect();
    let total = days.iter().map(|(_, seconds)| seconds).sum();
    Ok(PeriodSummary {
        start,
        end,
        days,
        total,
    })
}

/// Summary of a Monday-Sunday week; `(start, end)` from `week_range`
pub fn week_view(store: &Store, range: (NaiveDate, NaiveDate)) -> StoreResult<PeriodSummary> {
    summarize(store, range.0, range.1)
}

/// Summary of a calendar month; `(start, end)` from `month_range`
pub fn month_view(store: &Store, range: (NaiveDate, NaiveDate)) -> StoreResult<PeriodSummary> {
    summarize(store, range.0, range.1)
}
