pub mod commands;
pub mod init;
pub mod auth;
pub mod plan;
pub mod board;

pub use commands::*;

use std::path::PathBuf;

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::Connection;

use crate::board::Board;
use crate::db::connection;
use crate::error::BoardError;
use crate::models::PlanStatus;
use crate::output;

/// Global flags shared by every command.
pub struct Context {
    pub json: bool,
    pub data_dir: Option<PathBuf>,
}

pub fn open_board(ctx: &Context) -> Result<Board<Connection>, BoardError> {
    let conn = connection::open_db(ctx.data_dir.as_deref())?;
    Board::open(conn)
}

/// Turn a command result into an exit code, reporting errors.
pub fn finish(result: Result<i32, BoardError>, ctx: &Context) -> i32 {
    match result {
        Ok(code) => code,
        Err(e) => {
            if ctx.json {
                output::json::print(&output::json::error(&e));
            } else {
                eprintln!("Error: {}", e.message);
            }
            1
        }
    }
}

pub fn parse_status(s: &str) -> Result<PlanStatus, BoardError> {
    PlanStatus::from_str(s).ok_or_else(|| {
        BoardError::validation(format!(
            "Unknown status '{s}'. Expected one of: to-plan, planning, in-progress, review, done"
        ))
    })
}

/// `YYYY-MM-DD` means midnight UTC; full RFC 3339 timestamps are kept as is.
pub fn parse_due(s: &str) -> Result<DateTime<Utc>, BoardError> {
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| BoardError::validation(format!("Invalid due date '{s}'. Use YYYY-MM-DD")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_due() {
        let d = parse_due("2024-03-31").unwrap();
        assert_eq!(d.to_rfc3339(), "2024-03-31T00:00:00+00:00");
        let d = parse_due("2024-03-31T12:00:00+02:00").unwrap();
        assert_eq!(d.to_rfc3339(), "2024-03-31T10:00:00+00:00");
        assert!(parse_due("31/03/2024").is_err());
    }

    #[test]
    fn test_parse_status() {
        assert_eq!(parse_status("in-progress").unwrap(), PlanStatus::InProgress);
        let err = parse_status("blocked").unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::ValidationError);
    }
}
