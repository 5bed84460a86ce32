use chrono::Utc;
use serde_json::json;

use crate::cli::{finish, open_board, parse_status, Context};
use crate::error::BoardError;
use crate::output;

pub fn run_board(search: Option<&str>, tags: &[String], status: Option<&str>, ctx: &Context) -> i32 {
    finish(board(search, tags, status, ctx), ctx)
}

pub fn run_tags(ctx: &Context) -> i32 {
    finish(list_tags(ctx), ctx)
}

fn board(
    search: Option<&str>,
    tags: &[String],
    status: Option<&str>,
    ctx: &Context,
) -> Result<i32, BoardError> {
    let focus = status.map(parse_status).transpose()?;
    let mut board = open_board(ctx)?;
    if let Some(query) = search {
        board.set_search_query(query);
    }
    for tag in tags {
        board.toggle_tag(&tag.trim().to_lowercase());
    }

    let now = Utc::now();
    let columns: Vec<_> = board
        .columns()
        .into_iter()
        .filter(|c| focus.map_or(true, |s| c.status == s))
        .collect();

    if ctx.json {
        let columns_json: Vec<_> = columns.iter().map(|c| output::json::column_json(c, now)).collect();
        output::json::print(&output::json::success(json!({
            "session": output::json::session_json(board.identity()),
            "search_query": board.search_query(),
            "selected_tags": board.selected_tags(),
            "all_tags": board.all_tags(),
            "columns": columns_json
        })));
    } else {
        output::text::print_session(board.identity());
        if !board.search_query().is_empty() || !board.selected_tags().is_empty() {
            output::text::print_filters(board.search_query(), board.selected_tags());
        }
        for column in &columns {
            println!();
            output::text::print_column(column, now);
        }
    }
    Ok(0)
}

fn list_tags(ctx: &Context) -> Result<i32, BoardError> {
    let board = open_board(ctx)?;
    let tags = board.all_tags();
    if ctx.json {
        output::json::print(&output::json::success(json!({ "tags": tags })));
    } else if tags.is_empty() {
        println!("No tags.");
    } else {
        for tag in &tags {
            println!("  {tag}");
        }
    }
    Ok(0)
}
