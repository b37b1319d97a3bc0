use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> Result<()> {
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

fn table_exists(conn: &Connection, table: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([table], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Create the `users` table; `alert_sent` is the persisted alert latch.
fn create_users_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            email       TEXT NOT NULL UNIQUE,
            budget      TEXT,
            alert_sent  INTEGER NOT NULL DEFAULT 0 CHECK(alert_sent IN (0,1)),
            created_at  TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Create the `expenses` table.
fn create_expenses_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS expenses (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id     INTEGER REFERENCES users(id),
            date        TEXT NOT NULL,
            category    TEXT NOT NULL DEFAULT 'Misc',
            amount      TEXT NOT NULL CHECK(CAST(amount AS REAL) >= 0),
            note        TEXT NOT NULL DEFAULT '',
            created_at  TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_expenses_user_date ON expenses(user_id, date);
        "#,
    )?;
    Ok(())
}

fn migration_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_migration(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

/// Rows written by looser front ends may carry an empty category.
fn migrate_blank_categories_to_misc(conn: &Connection) -> AppResult<()> {
    let version = "20250301_0001_blank_categories_to_misc";

    if migration_applied(conn, version)? {
        return Ok(());
    }

    let changed = conn
        .execute(
            "UPDATE expenses SET category = 'Misc' WHERE TRIM(category) = ''",
            [],
        )
        .map_err(|e| AppError::Migration(format!("Failed to normalize categories: {}", e)))?;

    mark_migration(
        conn,
        version,
        &format!("Blank categories set to 'Misc' ({} rows)", changed),
    )?;

    if changed > 0 {
        success(format!(
            "Migration applied: {} → {} rows moved to 'Misc'",
            version, changed
        ));
    }

    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::initialize::init_db() and by every store/directory open,
/// so a brand-new file is usable right away.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    // 1) Ensure log table
    ensure_log_table(conn)?;

    // 2) Base tables
    if !table_exists(conn, "users")? {
        create_users_table(conn)?;
    }
    if !table_exists(conn, "expenses")? {
        create_expenses_table(conn)?;
    } else {
        conn.execute_batch(
            "CREATE INDEX IF NOT EXISTS idx_expenses_user_date ON expenses(user_id, date);",
        )?;
    }

    // 3) Versioned migrations
    migrate_blank_categories_to_misc(conn)?;

    Ok(())
}
