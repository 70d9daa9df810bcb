use rusqlite::{Connection, Result};

/// Schema version this build writes
pub const SCHEMA_VERSION: i32 = 2;

/// One step of schema evolution, tracked via `PRAGMA user_version`
struct Migration {
    version: i32,
    description: &'static str,
    apply: fn(&Connection) -> Result<()>,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        description: "create tasks table",
        apply: create_tasks_table,
    },
    Migration {
        version: 2,
        description: "add status column",
        apply: add_status_column,
    },
];

/// Bring the history database up to `SCHEMA_VERSION`.
///
/// Safe to call on every start: applied migrations are skipped. A failing
/// migration is rolled back and logged, and startup continues on the last
/// good version. Returns the version the database ends up at.
pub fn run_migrations(conn: &mut Connection) -> i32 {
    let mut current = match user_version(conn) {
        Ok(version) => version,
        Err(e) => {
            log::warn!("Could not read schema version, assuming fresh database: {}", e);
            0
        }
    };

    if current > SCHEMA_VERSION {
        log::warn!(
            "History schema version {} is newer than supported {}; leaving it untouched",
            current,
            SCHEMA_VERSION
        );
        return current;
    }

    let start = current;
    for migration in MIGRATIONS.iter().filter(|m| m.version > start) {
        match apply_migration(conn, migration) {
            Ok(()) => {
                log::info!(
                    "Applied history migration v{} ({})",
                    migration.version,
                    migration.description
                );
                current = migration.version;
            }
            Err(e) => {
                log::warn!(
                    "History migration v{} ({}) failed, continuing at v{}: {}",
                    migration.version,
                    migration.description,
                    current,
                    e
                );
                break;
            }
        }
    }

    current
}

/// Each migration and its version bump commit together
fn apply_migration(conn: &mut Connection, migration: &Migration) -> Result<()> {
    let tx = conn.transaction()?;
    (migration.apply)(&tx)?;
    tx.pragma_update(None, "user_version", migration.version)?;
    tx.commit()
}

/// Current `PRAGMA user_version` (0 for a fresh database)
pub fn user_version(conn: &Connection) -> Result<i32> {
    conn.pragma_query_value(None, "user_version", |row| row.get(0))
}

/// Check whether a table exists
pub fn has_table(conn: &Connection, table: &str) -> Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
        [table],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

/// Check whether a table has a column
pub fn has_column(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", table))?;
    let names = stmt.query_map([], |row| row.get::<_, String>(1))?;
    for name in names {
        if name? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

fn create_tasks_table(conn: &Connection) -> Result<()> {
    // IF NOT EXISTS: databases created before versioning already have it
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS tasks (
            id          INTEGER PRIMARY KEY,
            task_name   TEXT NOT NULL,
            category    TEXT,
            notes       TEXT,
            start_time  TEXT,
            end_time    TEXT,
            duration    INTEGER,
            date        TEXT
        );
        CREATE INDEX IF NOT EXISTS idx_tasks_date ON tasks (date);",
    )
}

fn add_status_column(conn: &Connection) -> Result<()> {
    if !has_column(conn, "tasks", "status")? {
        conn.execute_batch("ALTER TABLE tasks ADD COLUMN status TEXT DEFAULT 'completed'")?;
    }
    conn.execute(
        "UPDATE tasks SET status = 'completed' WHERE status IS NULL OR status = ''",
        [],
    )?;
    Ok(())
}
