use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::Connection;

use crate::error::{BoardError, ErrorCode};

use super::migrations;

pub const DATA_DIR_NAME: &str = ".planboard";
pub const DB_FILE_NAME: &str = "planboard.db";

/// Find the .git root by walking up from current directory.
pub fn find_git_root() -> Result<PathBuf, BoardError> {
    let mut dir = env::current_dir()?;
    loop {
        if dir.join(".git").exists() {
            return Ok(dir);
        }
        if !dir.pop() {
            return Err(BoardError::new(
                ErrorCode::NotInitialized,
                "Not inside a git repository. Pass --data-dir or set PLANBOARD_DIR.",
            ));
        }
    }
}

/// Resolve the data directory: an explicit override wins, otherwise
/// `<git-root>/.planboard`.
pub fn data_dir(override_dir: Option<&Path>) -> Result<PathBuf, BoardError> {
    match override_dir {
        Some(dir) => Ok(dir.to_path_buf()),
        None => Ok(find_git_root()?.join(DATA_DIR_NAME)),
    }
}

pub fn db_path(override_dir: Option<&Path>) -> Result<PathBuf, BoardError> {
    Ok(data_dir(override_dir)?.join(DB_FILE_NAME))
}

/// Open a connection to the database. Returns error if not initialized.
pub fn open_db(override_dir: Option<&Path>) -> Result<Connection, BoardError> {
    let path = db_path(override_dir)?;
    if !path.exists() {
        return Err(BoardError::not_initialized());
    }
    let conn = Connection::open(&path)?;
    configure_connection(&conn)?;
    tracing::debug!(path = %path.display(), "opened board database");
    Ok(conn)
}

/// Create the data directory and database, then run migrations. Idempotent.
pub fn init_db(override_dir: Option<&Path>) -> Result<PathBuf, BoardError> {
    let path = db_path(override_dir)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let conn = Connection::open(&path)?;
    configure_connection(&conn)?;
    migrations::run_migrations(&conn)?;
    tracing::info!(path = %path.display(), "initialized board database");
    Ok(path)
}

/// Migrated in-memory database, used by tests and throwaway boards.
pub fn open_in_memory() -> Result<Connection, BoardError> {
    let conn = Connection::open_in_memory()?;
    migrations::run_migrations(&conn)?;
    Ok(conn)
}

fn configure_connection(conn: &Connection) -> Result<(), BoardError> {
    conn.execute_batch(
        "PRAGMA journal_mode=WAL;
         PRAGMA busy_timeout=5000;",
    )?;
    Ok(())
}
