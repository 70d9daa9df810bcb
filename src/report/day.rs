use crate::domain::{ActiveTask, CompletedTask, PausedTask, TaskId, TaskStatus};
use crate::persistence::{Store, StoreResult};
use chrono::{DateTime, Local, NaiveDate};

/// One line of the day table, whatever state the task is in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayRow {
    pub id: TaskId,
    pub task_name: String,
    pub category: Option<String>,
    pub notes: Option<String>,
    pub status: TaskStatus,
    pub start_time: Option<DateTime<Local>>,
    pub end_time: Option<DateTime<Local>>,
    /// Final duration, frozen elapsed, or live elapsed depending on status
    pub duration: i64,
}

impl From<CompletedTask> for DayRow {
    fn from(task: CompletedTask) -> Self {
        Self {
            id: task.info.id,
            task_name: task.info.task_name,
            category: task.info.category,
            notes: task.info.notes,
            status: task.status,
            start_time: Some(task.start_time),
            end_time: Some(task.end_time),
            duration: task.duration,
        }
    }
}

impl From<PausedTask> for DayRow {
    fn from(task: PausedTask) -> Self {
        Self {
            id: task.info.id,
            task_name: task.info.task_name,
            category: task.info.category,
            notes: task.info.notes,
            status: TaskStatus::Paused,
            start_time: task.start_time,
            end_time: None,
            duration: task.elapsed,
        }
    }
}

impl DayRow {
    fn from_active(task: ActiveTask, now: DateTime<Local>) -> Self {
        let duration = task.elapsed_at(now);
        Self {
            id: task.info.id,
            task_name: task.info.task_name,
            category: task.info.category,
            notes: task.info.notes,
            status: TaskStatus::Active,
            start_time: Some(task.start_time),
            end_time: None,
            duration,
        }
    }
}

/// Everything tracked on one date
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayView {
    pub date: NaiveDate,
    pub rows: Vec<DayRow>,
    /// Sum of row durations
    pub total: i64,
}

/// Merge completed, paused and active tasks dated `date`.
///
/// Rows are sorted by (start time, id); paused rows without a recorded start
/// sort first. The active row's duration is computed at `now`.
pub fn day_view(store: &Store, date: NaiveDate, now: DateTime<Local>) -> StoreResult<DayView> {
    let mut rows: Vec<DayRow> = store
        .query_by_date(date)?
        .into_iter()
        .map(DayRow::from)
        .collect();

    rows.extend(
        store
            .list_paused()
            .into_iter()
            .filter(|task| task.info.date == date)
            .map(DayRow::from),
    );

    if let Some(active) = store.get_active().filter(|task| task.info.date == date) {
        rows.push(DayRow::from_active(active, now));
    }

    rows.sort_by(|a, b| (a.start_time, a.id).cmp(&(b.start_time, b.id)));
    let total = rows.iter().map(|row| row.duration).sum();

    Ok(DayView { date, rows, total })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::testing::ManualClock;
    use crate::clock::Clock;
    use crate::tracker::Tracker;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_day_view_merges_all_states() {
        let clock = ManualClock::at(2024, 5, 10, 9, 0);
        let temp_dir = tempdir().unwrap();
        let mut tracker = Tracker::new(Store::open(temp_dir.path()).unwrap(), &clock);

        tracker.start("done", "", "").unwrap();
        clock.advance(100);
        tracker.stop_active().unwrap();

        clock.advance(50);
        tracker.start("waiting", "", "").unwrap();
        clock.advance(200);
        tracker.start("running", "", "").unwrap();
        clock.advance(30);

        let view = day_view(tracker.store(), clock.today(), clock.now()).unwrap();
        let summary: Vec<(&str, TaskStatus, i64)> = view
            .rows
            .iter()
            .map(|row| (row.task_name.as_str(), row.status, row.duration))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("done", TaskStatus::Completed, 100),
                ("waiting", TaskStatus::Paused, 200),
                ("running", TaskStatus::Active, 30),
            ]
        );
        assert_eq!(view.total, 330);
        assert_eq!(view.rows[1].end_time, None);
    }

    #[test]
    fn test_day_view_filters_other_dates() {
        let clock = ManualClock::at(2024, 5, 10, 9, 0);
        let temp_dir = tempdir().unwrap();
        let mut tracker = Tracker::new(Store::open(temp_dir.path()).unwrap(), &clock);

        tracker.start("yesterday's", "", "").unwrap();
        clock.advance(24 * 3600);

        // Still dated the 10th even though it is now the 11th
        let view = day_view(tracker.store(), clock.today(), clock.now()).unwrap();
        assert!(view.rows.is_empty());
        assert_eq!(view.total, 0);

        let earlier = clock.today().pred_opt().unwrap();
        let view = day_view(tracker.store(), earlier, clock.now()).unwrap();
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.rows[0].duration, 24 * 3600);
    }

    #[test]
    fn test_legacy_paused_without_start_sorts_first() {
        let clock = ManualClock::at(2024, 5, 10, 9, 0);
        let temp_dir = tempdir().unwrap();
        let store = Store::open(temp_dir.path()).unwrap();
        std::fs::write(
            temp_dir.path().join("paused.json"),
            r#"[{"id": 8, "task_name": "legacy", "elapsed": 40, "date": "2024-05-10"}]"#,
        )
        .unwrap();
        let mut tracker = Tracker::new(store, &clock);
        tracker.start("fresh", "", "").unwrap();

        let view = day_view(tracker.store(), clock.today(), clock.now()).unwrap();
        let ids: Vec<TaskId> = view.rows.iter().map(|row| row.id).collect();
        assert_eq!(ids[0], 8);
        assert_eq!(view.rows[0].start_time, None);
        assert_eq!(view.rows.len(), 2);
    }
}
