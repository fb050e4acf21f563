use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::Connection;

pub fn open_connection(db_path: &Path) -> Result<Connection> {
    let conn = Connection::open(db_path)
        .with_context(|| format!("failed to open db: {}", db_path.display()))?;
    conn.execute("PRAGMA foreign_keys = ON", [])
        .context("failed to enable foreign key enforcement")?;
    Ok(conn)
}

pub fn init_db(db_path: &Path) -> Result<()> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create parent dir: {}", parent.display()))?;
    }

    let conn = open_connection(db_path)?;

    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS customer (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            name            TEXT NOT NULL,
            contact_name    TEXT NOT NULL DEFAULT '',
            email           TEXT NOT NULL DEFAULT '',
            phone           TEXT NOT NULL DEFAULT '',
            city            TEXT NOT NULL DEFAULT '',
            customer_since  TEXT,
            active          INTEGER NOT NULL DEFAULT 1
        );

        CREATE TABLE IF NOT EXISTS project (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            code            TEXT NOT NULL,
            name            TEXT NOT NULL,
            customer_name   TEXT NOT NULL DEFAULT '',
            site_address    TEXT NOT NULL DEFAULT '',
            manager         TEXT NOT NULL DEFAULT '',
            status          TEXT NOT NULL DEFAULT 'planned',
            budget_cents    INTEGER NOT NULL DEFAULT 0,
            start_date      TEXT
        );

        CREATE TABLE IF NOT EXISTS team_member (
            id                  INTEGER PRIMARY KEY AUTOINCREMENT,
            full_name           TEXT NOT NULL,
            role                TEXT NOT NULL DEFAULT '',
            trade               TEXT NOT NULL DEFAULT '',
            email               TEXT NOT NULL DEFAULT '',
            phone               TEXT NOT NULL DEFAULT '',
            hourly_rate_cents   INTEGER NOT NULL DEFAULT 0,
            active              INTEGER NOT NULL DEFAULT 1
        );

        CREATE INDEX IF NOT EXISTS idx_project_status
            ON project(status);

        CREATE INDEX IF NOT EXISTS idx_project_code
            ON project(code);
        ",
    )
    .context("failed to initialize schema")?;

    Ok(())
}
