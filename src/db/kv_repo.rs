use rusqlite::{params, Connection, OptionalExtension};

use crate::error::BoardError;

pub fn get_value(conn: &Connection, key: &str) -> Result<Option<String>, BoardError> {
    let value = conn
        .query_row(
            "SELECT value FROM kv_entries WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()?;
    Ok(value)
}

/// Insert or overwrite. Last write wins; there is no version check.
pub fn set_value(conn: &Connection, key: &str, value: &str) -> Result<(), BoardError> {
    conn.execute(
        "INSERT INTO kv_entries (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = datetime('now')",
        params![key, value],
    )?;
    Ok(())
}

pub fn remove_value(conn: &Connection, key: &str) -> Result<(), BoardError> {
    conn.execute("DELETE FROM kv_entries WHERE key = ?1", params![key])?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connection::open_in_memory;

    #[test]
    fn test_set_get_remove() {
        let conn = open_in_memory().unwrap();
        assert_eq!(get_value(&conn, "k").unwrap(), None);
        set_value(&conn, "k", "one").unwrap();
        set_value(&conn, "k", "two").unwrap();
        assert_eq!(get_value(&conn, "k").unwrap().as_deref(), Some("two"));
        remove_value(&conn, "k").unwrap();
        remove_value(&conn, "k").unwrap();
        assert_eq!(get_value(&conn, "k").unwrap(), None);
    }
}
