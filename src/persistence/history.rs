use super::error::{StoreError, StoreResult};
use super::migration::{has_column, has_table, run_migrations};
use crate::clock::parse_timestamp;
use crate::domain::{CompletedTask, TaskInfo, TaskStatus};
use chrono::{DateTime, Local, NaiveDate};
use rusqlite::types::Type;
use rusqlite::{params, Connection, Row};
use std::collections::BTreeMap;
use std::path::Path;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Append-only log of completed tasks, backed by SQLite
pub struct History {
    conn: Connection,
    /// False only if the status migration could not be applied
    has_status: bool,
}

impl History {
    /// Open (or create) the history database and migrate it
    pub fn open(path: &Path) -> StoreResult<Self> {
        Self::init(Connection::open(path)?)
    }

    #[cfg(test)]
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(mut conn: Connection) -> StoreResult<Self> {
        let version = run_migrations(&mut conn);
        if !has_table(&conn, "tasks")? {
            return Err(StoreError::MissingTable { version });
        }
        log::debug!("History at schema v{}", version);
        Self::attach(conn)
    }

    /// Wrap a connection whose `tasks` table already exists, using the
    /// status column only if it is there
    fn attach(conn: Connection) -> StoreResult<Self> {
        let has_status = has_column(&conn, "tasks", "status")?;
        if !has_status {
            log::warn!("History has no status column; completed tasks are stored without it");
        }
        Ok(Self { conn, has_status })
    }

    /// Write one completed task. The row is inserted in a single transaction
    /// so it is either fully stored or not at all.
    pub fn append(&mut self, task: &CompletedTask) -> StoreResult<()> {
        let tx = self.conn.transaction()?;
        if self.has_status {
            tx.execute(
                "INSERT INTO tasks (id, task_name, category, notes, start_time, end_time, duration, date, status)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    task.info.id,
                    task.info.task_name,
                    task.info.category,
                    task.info.notes,
                    task.start_time.to_rfc3339(),
                    task.end_time.to_rfc3339(),
                    task.duration,
                    date_key(task.info.date),
                    task.status.to_tag(),
                ],
            )?;
        } else {
            tx.execute(
                "INSERT INTO tasks (id, task_name, category, notes, start_time, end_time, duration, date)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    task.info.id,
                    task.info.task_name,
                    task.info.category,
                    task.info.notes,
                    task.start_time.to_rfc3339(),
                    task.end_time.to_rfc3339(),
                    task.duration,
                    date_key(task.info.date),
                ],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    /// Completed tasks dated `date`, ordered by start time
    pub fn by_date(&self, date: NaiveDate) -> StoreResult<Vec<CompletedTask>> {
        let status = if self.has_status { "status" } else { "NULL" };
        let sql = format!(
            "SELECT id, task_name, category, notes, start_time, end_time, duration, date, {}
             FROM tasks WHERE date = ?1 ORDER BY start_time, id",
            status
        );

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![date_key(date)], task_from_row)?;
        let mut tasks = rows.collect::<Result<Vec<_>, _>>()?;

        // Text order can disagree with time order across offsets
        tasks.sort_by(|a, b| (a.start_time, a.info.id).cmp(&(b.start_time, b.info.id)));
        Ok(tasks)
    }

    /// Total completed seconds per date within `[start, end]`
    pub fn date_totals(&self, start: NaiveDate, end: NaiveDate) -> StoreResult<BTreeMap<NaiveDate, i64>> {
        let mut stmt = self.conn.prepare(
            "SELECT date, SUM(duration) FROM tasks
             WHERE date BETWEEN ?1 AND ?2
             GROUP BY date ORDER BY date",
        )?;
        let rows = stmt.query_map(params![date_key(start), date_key(end)], |row| {
            let date = date_column(row, 0)?;
            let total: Option<i64> = row.get(1)?;
            Ok((date, total.unwrap_or(0)))
        })?;

        let mut totals = BTreeMap::new();
        for row in rows {
            let (date, total) = row?;
            totals.insert(date, total);
        }
        Ok(totals)
    }

    /// Highest id ever written, for id-counter recovery
    pub fn max_id(&self) -> StoreResult<Option<i64>> {
        let max = self
            .conn
            .query_row("SELECT MAX(id) FROM tasks", [], |row| row.get::<_, Option<i64>>(0))?;
        Ok(max)
    }

    #[cfg(test)]
    pub(crate) fn connection(&self) -> &Connection {
        &self.conn
    }
}

fn date_key(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn task_from_row(row: &Row) -> rusqlite::Result<CompletedTask> {
    let status: Option<String> = row.get(8)?;
    Ok(CompletedTask {
        info: TaskInfo {
            id: row.get(0)?,
            task_name: row.get(1)?,
            category: row.get(2)?,
            notes: row.get(3)?,
            date: date_column(row, 7)?,
        },
        start_time: timestamp_column(row, 4)?,
        end_time: timestamp_column(row, 5)?,
        duration: row.get::<_, Option<i64>>(6)?.unwrap_or(0),
        status: TaskStatus::from_tag(status.as_deref().unwrap_or("")),
    })
}

fn timestamp_column(row: &Row, idx: usize) -> rusqlite::Result<DateTime<Local>> {
    let text: String = row.get(idx)?;
    parse_timestamp(&text).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, format!("invalid timestamp: {}", text).into())
    })
}

fn date_column(row: &Row, idx: usize) -> rusqlite::Result<NaiveDate> {
    let text: String = row.get(idx)?;
    NaiveDate::parse_from_str(&text, DATE_FORMAT).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))
    })
}
