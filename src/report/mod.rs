pub mod day;
pub mod period;

pub use day::{day_view, DayRow, DayView};
pub use period::{month_range, month_view, week_range, week_view, PeriodSummary};
