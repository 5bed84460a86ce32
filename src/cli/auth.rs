use serde_json::json;

use crate::cli::{finish, open_board, Context};
use crate::error::BoardError;
use crate::output;

pub fn run_login(email: &str, password: &str, ctx: &Context) -> i32 {
    finish(login(email, password, ctx), ctx)
}

pub fn run_logout(ctx: &Context) -> i32 {
    finish(logout(ctx), ctx)
}

pub fn run_whoami(ctx: &Context) -> i32 {
    finish(whoami(ctx), ctx)
}

fn login(email: &str, password: &str, ctx: &Context) -> Result<i32, BoardError> {
    let mut board = open_board(ctx)?;
    if !board.login(email, password)? {
        return Err(BoardError::invalid_credentials());
    }
    let count = board.plans().len();
    if ctx.json {
        output::json::print(&output::json::success(json!({
            "email": email,
            "plans": count
        })));
    } else {
        println!("Logged in as {email} ({count} plans)");
    }
    Ok(0)
}

fn logout(ctx: &Context) -> Result<i32, BoardError> {
    let mut board = open_board(ctx)?;
    board.logout()?;
    if ctx.json {
        output::json::print(&output::json::success(json!({ "logged_in": false })));
    } else {
        println!("Logged out. Showing the demo board.");
    }
    Ok(0)
}

fn whoami(ctx: &Context) -> Result<i32, BoardError> {
    let board = open_board(ctx)?;
    if ctx.json {
        output::json::print(&output::json::success(output::json::session_json(board.identity())));
    } else {
        match board.identity().email() {
            Some(email) => println!("Logged in as {email}"),
            None => println!("Not logged in (demo board, changes are not saved)"),
        }
    }
    Ok(0)
}
