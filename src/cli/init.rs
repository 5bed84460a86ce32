use serde_json::json;

use crate::cli::{finish, Context};
use crate::db::connection;
use crate::error::BoardError;
use crate::output;

pub fn run(ctx: &Context) -> i32 {
    finish(run_inner(ctx), ctx)
}

fn run_inner(ctx: &Context) -> Result<i32, BoardError> {
    let path = connection::init_db(ctx.data_dir.as_deref())?;
    if ctx.json {
        output::json::print(&output::json::success(json!({
            "path": path.to_string_lossy()
        })));
    } else {
        println!("Initialized planboard at {}", path.display());
    }
    Ok(0)
}
