pub mod error;

pub use error::{TrackError, TrackResult};

use crate::clock::Clock;
use crate::domain::{ActiveTask, CompletedTask, NewTask, PausedTask, TaskId};
use crate::persistence::Store;

/// Result of `start`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Started {
    pub task: ActiveTask,
    /// The task that was active before, now paused
    pub auto_paused: Option<PausedTask>,
}

/// Result of `resume`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resumed {
    pub task: ActiveTask,
    pub auto_paused: Option<PausedTask>,
}

/// Snapshot of the active task for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveStatus {
    pub task: ActiveTask,
    /// Seconds since (possibly back-dated) start
    pub elapsed: i64,
}

/// The task lifecycle state machine.
///
/// Enforces that at most one task is active: starting or resuming while
/// another task runs pauses that task first. All state lives in the store.
pub struct Tracker<C: Clock> {
    store: Store,
    clock: C,
}

impl<C: Clock> Tracker<C> {
    pub fn new(store: Store, clock: C) -> Self {
        Self { store, clock }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Start a new task, pausing the current one if any.
    ///
    /// A blank name is rejected before anything is touched, so no id is used.
    pub fn start(&mut self, name: &str, category: &str, notes: &str) -> TrackResult<Started> {
        let new_task = NewTask::new(name, category, notes).ok_or(TrackError::EmptyName)?;

        let auto_paused = self.pause_if_active()?;

        let id = self.store.allocate_id()?;
        let task = ActiveTask::begin(id, new_task, self.clock.now());
        self.store.set_active(&task)?;
        log::debug!("Started task {} ({})", task.id(), task.info.task_name);

        Ok(Started { task, auto_paused })
    }

    /// Pause the active task, freezing its elapsed seconds
    pub fn pause(&mut self) -> TrackResult<PausedTask> {
        self.pause_if_active()?.ok_or(TrackError::NothingToPause)
    }

    fn pause_if_active(&mut self) -> TrackResult<Option<PausedTask>> {
        let active = match self.store.get_active() {
            Some(active) => active,
            None => return Ok(None),
        };

        let paused = active.pause(self.clock.now());
        self.store.add_paused(paused.clone())?;
        self.store.clear_active()?;
        log::info!("Paused task {} at {}s", paused.id(), paused.elapsed);

        Ok(Some(paused))
    }

    /// Resume a paused task; its start is back-dated by the frozen elapsed
    pub fn resume(&mut self, id: TaskId) -> TrackResult<Resumed> {
        let paused = self.store.find_paused(id).ok_or(TrackError::PausedNotFound(id))?;

        let auto_paused = self.pause_if_active()?;

        let task = paused.resume(self.clock.now());
        self.store.set_active(&task)?;
        self.store.remove_paused(id)?;
        log::debug!("Resumed task {} with {}s already elapsed", id, task.elapsed_at(self.clock.now()));

        Ok(Resumed { task, auto_paused })
    }

    /// Complete the active task
    pub fn stop_active(&mut self) -> TrackResult<CompletedTask> {
        let active = self.store.get_active().ok_or(TrackError::NothingToStop)?;

        let completed = active.complete(self.clock.now());
        self.store.append_completed(&completed)?;
        self.store.clear_active()?;
        log::debug!("Stopped task {} after {}s", completed.id(), completed.duration);

        Ok(completed)
    }

    /// Complete a paused task with exactly its frozen elapsed time
    pub fn stop_paused(&mut self, id: TaskId) -> TrackResult<CompletedTask> {
        let paused = self.store.find_paused(id).ok_or(TrackError::PausedNotFound(id))?;

        let completed = paused.complete(self.clock.now());
        self.store.append_completed(&completed)?;
        self.store.remove_paused(id)?;
        log::debug!("Stopped paused task {} at {}s", id, completed.duration);

        Ok(completed)
    }

    /// Complete by id (paused first, then active) or the active task when no id
    pub fn complete(&mut self, id: Option<TaskId>) -> TrackResult<CompletedTask> {
        let id = match id {
            Some(id) => id,
            None => return self.stop_active(),
        };

        if self.store.find_paused(id).is_some() {
            return self.stop_paused(id);
        }

        match self.store.get_active() {
            Some(active) if active.id() == id => self.stop_active(),
            _ => Err(TrackError::NoSuchTask(id)),
        }
    }

    /// Active task with live elapsed time; read-only
    pub fn status(&self) -> Option<ActiveStatus> {
        self.store.get_active().map(|task| {
            let elapsed = task.elapsed_at(self.clock.now());
            ActiveStatus { task, elapsed }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::testing::ManualClock;
    use crate::domain::TaskStatus;
    use tempfile::{tempdir, TempDir};

    fn tracker(clock: &ManualClock) -> (TempDir, Tracker<&ManualClock>) {
        let temp_dir = tempdir().unwrap();
        let store = Store::open(temp_dir.path()).unwrap();
        (temp_dir, Tracker::new(store, clock))
    }

    #[test]
    fn test_start_when_idle() {
        let clock = ManualClock::at(2024, 5, 10, 9, 0);
        let (_dir, mut tracker) = tracker(&clock);

        let started = tracker.start("write report", "work", "").unwrap();
        assert!(started.auto_paused.is_none());

        let active = tracker.store().get_active().unwrap();
        assert_eq!(active.info.task_name, "write report");
        assert_eq!(active.info.date, clock.today());
        assert_eq!(active, started.task);
        assert!(tracker.store().list_paused().is_empty());
    }

    #[test]
    fn test_start_with_empty_name_changes_nothing() {
        let clock = ManualClock::at(2024, 5, 10, 9, 0);
        let (_dir, mut tracker) = tracker(&clock);

        assert!(matches!(tracker.start("   ", "", ""), Err(TrackError::EmptyName)));
        assert!(tracker.store().get_active().is_none());

        // No id was consumed
        let started = tracker.start("real", "", "").unwrap();
        assert_eq!(started.task.id(), 1);
    }

    #[test]
    fn test_start_auto_pauses_previous() {
        let clock = ManualClock::at(2024, 5, 10, 9, 0);
        let (_dir, mut tracker) = tracker(&clock);

        let first = tracker.start("first", "", "").unwrap().task;
        clock.advance(125);
        let second = tracker.start("second", "", "").unwrap();

        let auto = second.auto_paused.unwrap();
        assert_eq!(auto.id(), first.id());
        assert_eq!(auto.elapsed, 125);
        assert_eq!(tracker.store().get_active().unwrap().id(), second.task.id());
        assert_eq!(tracker.store().find_paused(first.id()).unwrap().elapsed, 125);
    }

    #[test]
    fn test_pause_without_active() {
        let clock = ManualClock::at(2024, 5, 10, 9, 0);
        let (_dir, mut tracker) = tracker(&clock);

        assert!(matches!(tracker.pause(), Err(TrackError::NothingToPause)));
        assert!(matches!(tracker.stop_active(), Err(TrackError::NothingToStop)));
    }

    #[test]
    fn test_pause_resume_stop_does_not_double_count() {
        let clock = ManualClock::at(2024, 5, 10, 9, 0);
        let (_dir, mut tracker) = tracker(&clock);

        let id = tracker.start("write report", "", "").unwrap().task.id();
        clock.advance(600);
        let paused = tracker.pause().unwrap();
        assert_eq!(paused.elapsed, 600);
        assert!(tracker.store().get_active().is_none());

        // Time while paused does not count
        clock.advance(3600);
        tracker.resume(id).unwrap();
        assert!(tracker.store().find_paused(id).is_none());
        clock.advance(300);

        let done = tracker.stop_active().unwrap();
        assert_eq!(done.duration, 900);
        assert_eq!(done.status, TaskStatus::Completed);
        assert!(tracker.store().get_active().is_none());
        assert_eq!(tracker.store().query_by_date(clock.today()).unwrap(), vec![done]);
    }

    #[test]
    fn test_resume_unknown_id() {
        let clock = ManualClock::at(2024, 5, 10, 9, 0);
        let (_dir, mut tracker) = tracker(&clock);

        tracker.start("a", "", "").unwrap();
        assert!(matches!(tracker.resume(42), Err(TrackError::PausedNotFound(42))));
        assert_eq!(tracker.store().get_active().unwrap().id(), 1);
    }

    #[test]
    fn test_resume_auto_pauses_active() {
        let clock = ManualClock::at(2024, 5, 10, 9, 0);
        let (_dir, mut tracker) = tracker(&clock);

        let a = tracker.start("a", "", "").unwrap().task.id();
        clock.advance(10);
        let b = tracker.start("b", "", "").unwrap().task.id();
        clock.advance(20);

        let resumed = tracker.resume(a).unwrap();
        assert_eq!(resumed.task.id(), a);
        assert_eq!(resumed.auto_paused.map(|p| (p.id(), p.elapsed)), Some((b, 20)));
        assert_eq!(resumed.task.elapsed_at(clock.now()), 10);
    }

    #[test]
    fn test_stop_paused_uses_recorded_elapsed() {
        let clock = ManualClock::at(2024, 5, 10, 9, 0);
        let (_dir, mut tracker) = tracker(&clock);

        let id = tracker.start("a", "", "").unwrap().task.id();
        clock.advance(77);
        tracker.pause().unwrap();
        clock.advance(5000);

        let done = tracker.stop_paused(id).unwrap();
        assert_eq!(done.duration, 77);
        assert_eq!(done.end_time, clock.now());
        assert!(tracker.store().list_paused().is_empty());
        assert!(matches!(tracker.stop_paused(id), Err(TrackError::PausedNotFound(_))));
    }

    #[test]
    fn test_complete_routes_by_id() {
        let clock = ManualClock::at(2024, 5, 10, 9, 0);
        let (_dir, mut tracker) = tracker(&clock);

        let p = tracker.start("paused one", "", "").unwrap().task.id();
        clock.advance(30);
        let a = tracker.start("active one", "", "").unwrap().task.id();
        clock.advance(45);

        let done = tracker.complete(Some(p)).unwrap();
        assert_eq!((done.id(), done.duration), (p, 30));
        assert_eq!(tracker.store().get_active().unwrap().id(), a);

        let done = tracker.complete(Some(a)).unwrap();
        assert_eq!((done.id(), done.duration), (a, 45));
        assert!(tracker.store().get_active().is_none());

        assert!(matches!(tracker.complete(Some(999)), Err(TrackError::NoSuchTask(999))));
        assert!(matches!(tracker.complete(None), Err(TrackError::NothingToStop)));
    }

    #[test]
    fn test_ids_never_reused_across_cycles() {
        let clock = ManualClock::at(2024, 5, 10, 9, 0);
        let (_dir, mut tracker) = tracker(&clock);

        let mut seen = Vec::new();
        for round in 0..3 {
            let id = tracker.start(&format!("task {}", round), "", "").unwrap().task.id();
            seen.push(id);
            clock.advance(5);
            tracker.pause().unwrap();
            tracker.resume(id).unwrap();
            tracker.complete(Some(id)).unwrap();
        }
        assert_eq!(seen, vec![1, 2, 3]);
    }

    #[test]
    fn test_status_is_read_only() {
        let clock = ManualClock::at(2024, 5, 10, 9, 0);
        let (_dir, mut tracker) = tracker(&clock);

        assert!(tracker.status().is_none());
        let task = tracker.start("a", "", "").unwrap().task;
        clock.advance(61);

        let status = tracker.status().unwrap();
        assert_eq!(status.elapsed, 61);
        assert_eq!(status.task, task);
        assert_eq!(tracker.store().get_active(), Some(task));
    }
}
