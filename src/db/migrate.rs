use crate::errors::{AppError, AppResult};
use rusqlite::{Connection, OptionalExtension};
use tracing::{debug, info};

/// Ensure that the `log` table exists. Every other migration records itself there.
fn ensure_log_table(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

struct Migration {
    version: &'static str,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20250901_0001_create_members",
        description: "Created members table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS members (
            id                TEXT PRIMARY KEY,
            gender            TEXT CHECK(gender IN ('M','F')),
            registration_date TEXT NOT NULL,
            membership_start  TEXT NOT NULL,
            membership_end    TEXT
        );
        "#,
    },
    Migration {
        version: "20250901_0002_create_attendance",
        description: "Created attendance table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS attendance (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            member_id  TEXT NOT NULL,
            date       TEXT NOT NULL,
            time       TEXT NOT NULL,
            slot_type  TEXT CHECK(slot_type IN ('free-weight','machine','general')),
            slot_id    TEXT,
            UNIQUE(member_id, date, time)
        );
        CREATE INDEX IF NOT EXISTS idx_attendance_date ON attendance(date, time);
        CREATE INDEX IF NOT EXISTS idx_attendance_member ON attendance(member_id, date);
        "#,
    },
    Migration {
        version: "20250901_0003_create_holidays",
        description: "Created holidays table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS holidays (
            date    TEXT PRIMARY KEY,
            version TEXT
        );
        "#,
    },
];

fn is_applied(conn: &Connection, version: &str) -> AppResult<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn apply(conn: &Connection, m: &Migration) -> AppResult<()> {
    // 1) Skip if already applied
    if is_applied(conn, m.version)? {
        debug!(version = m.version, "migration already applied");
        return Ok(());
    }

    // 2) Run the migration
    conn.execute_batch(m.sql)
        .map_err(|e| AppError::Migration(format!("{}: {}", m.version, e)))?;

    // 3) Mark as applied
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [m.version, m.description],
    )?;

    info!(version = m.version, "migration applied");
    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    ensure_log_table(conn)?;

    for m in MIGRATIONS {
        apply(conn, m)?;
    }
    Ok(())
}
