use super::error::StoreResult;
use super::files::{ensure_dir, ACTIVE_FILE, HISTORY_FILE, META_FILE, PAUSED_FILE};
use super::history::History;
use super::metadata::{load_metadata, save_metadata, AppMetadata};
use super::slots::{self, SlotRead};
use crate::domain::{ActiveTask, CompletedTask, PausedTask, TaskId};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Durable state of the tracker: completed history, the single active slot,
/// the paused list and the id counter.
///
/// The store enforces no lifecycle rules. It assumes one process at a time;
/// there is no locking between concurrent invocations.
pub struct Store {
    dir: PathBuf,
    history: History,
}

impl Store {
    /// Open the store rooted at `dir`, creating and migrating whatever is
    /// missing. Safe to call on every start.
    pub fn open(dir: &Path) -> StoreResult<Self> {
        ensure_dir(dir)?;
        let history = History::open(&dir.join(HISTORY_FILE))?;
        let store = Self {
            dir: dir.to_path_buf(),
            history,
        };

        if load_metadata(store.meta_path()).is_none() {
            let next_id = store.recover_next_id()?;
            log::info!("Initializing id counter at {}", next_id);
            save_metadata(store.meta_path(), &AppMetadata { next_id })?;
        }

        Ok(store)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn meta_path(&self) -> PathBuf {
        self.dir.join(META_FILE)
    }

    fn active_path(&self) -> PathBuf {
        self.dir.join(ACTIVE_FILE)
    }

    fn paused_path(&self) -> PathBuf {
        self.dir.join(PAUSED_FILE)
    }

    /// Hand out a new id. The counter is persisted before the id is returned,
    /// so a crash can burn an id but never reuse one.
    ///
    /// A stale or missing counter never goes below one past the highest id
    /// already stored.
    pub fn allocate_id(&mut self) -> StoreResult<TaskId> {
        let floor = self.recover_next_id()?;
        let id = match load_metadata(self.meta_path()) {
            Some(metadata) => metadata.next_id.max(floor),
            None => floor,
        };
        save_metadata(self.meta_path(), &AppMetadata { next_id: id + 1 })?;
        log::debug!("Allocated task id {}", id);
        Ok(id)
    }

    /// One past the highest id found anywhere in the store
    fn recover_next_id(&self) -> StoreResult<TaskId> {
        let mut max = self.history.max_id()?.unwrap_or(0);
        if let Some(active) = self.get_active() {
            max = max.max(active.id());
        }
        for paused in self.list_paused() {
            max = max.max(paused.id());
        }
        Ok(max + 1)
    }

    /// Raw read of the active slot, keeping "corrupt" distinct from "absent"
    pub fn read_active_slot(&self) -> SlotRead<ActiveTask> {
        slots::read_active(&self.active_path())
    }

    pub fn get_active(&self) -> Option<ActiveTask> {
        self.read_active_slot().or_empty("active task")
    }

    pub fn set_active(&self, task: &ActiveTask) -> StoreResult<()> {
        slots::write_active(&self.active_path(), task)
    }

    pub fn clear_active(&self) -> StoreResult<()> {
        slots::clear_active(&self.active_path())
    }

    /// Raw read of the paused list, keeping "corrupt" distinct from "absent"
    pub fn read_paused_slot(&self) -> SlotRead<Vec<PausedTask>> {
        slots::read_paused(&self.paused_path())
    }

    /// Paused tasks in the order they were paused
    pub fn list_paused(&self) -> Vec<PausedTask> {
        self.read_paused_slot().or_empty("paused tasks").unwrap_or_default()
    }

    pub fn add_paused(&self, task: PausedTask) -> StoreResult<()> {
        let mut paused = self.list_paused();
        paused.push(task);
        slots::write_paused(&self.paused_path(), &paused)
    }

    pub fn remove_paused(&self, id: TaskId) -> StoreResult<()> {
        let mut paused = self.list_paused();
        let before = paused.len();
        paused.retain(|task| task.id() != id);
        if paused.len() == before {
            return Ok(());
        }
        slots::write_paused(&self.paused_path(), &paused)
    }

    pub fn find_paused(&self, id: TaskId) -> Option<PausedTask> {
        self.list_paused().into_iter().find(|task| task.id() == id)
    }

    pub fn append_completed(&mut self, task: &CompletedTask) -> StoreResult<()> {
        self.history.append(task)
    }

    /// Completed tasks dated `date`, ordered by start time
    pub fn query_by_date(&self, date: NaiveDate) -> StoreResult<Vec<CompletedTask>> {
        self.history.by_date(date)
    }

    /// Completed seconds per date within the closed range
    pub fn query_date_range(&self, start: NaiveDate, end: NaiveDate) -> StoreResult<BTreeMap<NaiveDate, i64>> {
        self.history.date_totals(start, end)
    }
}
