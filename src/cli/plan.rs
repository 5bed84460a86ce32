use chrono::Utc;
use rusqlite::Connection;
use serde_json::json;

use crate::board::Board;
use crate::cli::commands::PlanCommands;
use crate::cli::{finish, open_board, parse_due, parse_status, Context};
use crate::error::BoardError;
use crate::models::{normalize_tags, NewPlan, PlanPatch};
use crate::output;

pub fn run(cmd: PlanCommands, ctx: &Context) -> i32 {
    let result = match cmd {
        PlanCommands::Add { title, description, status, tag, due } => {
            run_add(title, description, status.as_deref(), &tag, due.as_deref(), ctx)
        }
        PlanCommands::Edit {
            id,
            title,
            description,
            status,
            tag,
            clear_tags,
            due,
            clear_due,
        } => {
            let edit = EditArgs {
                title,
                description,
                status,
                tags: tag,
                clear_tags,
                due,
                clear_due,
            };
            run_edit(&id, edit, ctx)
        }
        PlanCommands::Move { id, status } => run_move(&id, &status, ctx),
        PlanCommands::Delete { id } => run_delete(&id, ctx),
        PlanCommands::Show { id } => run_show(&id, ctx),
    };
    finish(result, ctx)
}

struct EditArgs {
    title: Option<String>,
    description: Option<String>,
    status: Option<String>,
    tags: Vec<String>,
    clear_tags: bool,
    due: Option<String>,
    clear_due: bool,
}

fn validate_title(title: &str) -> Result<(), BoardError> {
    if title.trim().is_empty() {
        return Err(BoardError::validation("Plan title is required"));
    }
    Ok(())
}

fn run_add(
    title: String,
    description: String,
    status: Option<&str>,
    tags: &[String],
    due: Option<&str>,
    ctx: &Context,
) -> Result<i32, BoardError> {
    validate_title(&title)?;
    let fields = NewPlan {
        title,
        description,
        status: status.map(parse_status).transpose()?,
        tags: Some(normalize_tags(tags)),
        due_date: due.map(parse_due).transpose()?,
    };

    let mut board = open_board(ctx)?;
    let plan = board.create(fields)?;
    let persisted = board.is_persistent();

    if ctx.json {
        let mut v = output::json::plan_json(&plan, Utc::now());
        v["persisted"] = json!(persisted);
        output::json::print(&output::json::success(v));
    } else {
        println!("Created plan: {} ({})", plan.title, plan.id);
        if !persisted {
            println!("Not logged in: the demo board is not saved.");
        }
    }
    Ok(0)
}

fn run_edit(id: &str, args: EditArgs, ctx: &Context) -> Result<i32, BoardError> {
    if let Some(ref title) = args.title {
        validate_title(title)?;
    }
    let tags = if args.clear_tags {
        Some(Vec::new())
    } else if args.tags.is_empty() {
        None
    } else {
        Some(normalize_tags(&args.tags))
    };
    let due_date = if args.clear_due {
        Some(None)
    } else {
        args.due.as_deref().map(parse_due).transpose()?.map(Some)
    };
    let patch = PlanPatch {
        title: args.title,
        description: args.description,
        status: args.status.as_deref().map(parse_status).transpose()?,
        tags,
        due_date,
    };
    if patch.is_empty() {
        return Err(BoardError::validation("Nothing to change"));
    }

    let mut board = open_board(ctx)?;
    let matched = board.update(id, patch)?;
    report_mutation("Updated", id, matched, &board, ctx);
    Ok(0)
}

fn run_move(id: &str, status: &str, ctx: &Context) -> Result<i32, BoardError> {
    let status = parse_status(status)?;
    let mut board = open_board(ctx)?;
    let matched = board.move_plan(id, status)?;
    report_mutation("Moved", id, matched, &board, ctx);
    Ok(0)
}

fn run_delete(id: &str, ctx: &Context) -> Result<i32, BoardError> {
    let mut board = open_board(ctx)?;
    let matched = board.delete(id)?;
    report_mutation("Deleted", id, matched, &board, ctx);
    Ok(0)
}

fn run_show(id: &str, ctx: &Context) -> Result<i32, BoardError> {
    let board = open_board(ctx)?;
    let plan = board.get(id).ok_or_else(|| BoardError::plan_not_found(id))?;
    let now = Utc::now();

    if ctx.json {
        output::json::print(&output::json::success(json!({
            "plan": output::json::plan_json(plan, now)
        })));
    } else {
        output::text::print_plan(plan, now);
    }
    Ok(0)
}

/// Unknown ids are not an error: the command succeeds with `matched: false`.
fn report_mutation(verb: &str, id: &str, matched: bool, board: &Board<Connection>, ctx: &Context) {
    let now = Utc::now();
    let plan = board.get(id);
    if ctx.json {
        output::json::print(&output::json::success(json!({
            "id": id,
            "matched": matched,
            "persisted": matched && board.is_persistent(),
            "plan": plan.map(|p| output::json::plan_json(p, now))
        })));
        return;
    }
    match (matched, plan) {
        (false, _) => println!("No plan with id {id}; nothing changed."),
        (true, Some(p)) => println!("{verb} plan: {} ({}) [{}]", p.title, p.id, p.status.as_str()),
        (true, None) => println!("{verb} plan {id}"),
    }
    if matched && !board.is_persistent() {
        println!("Not logged in: the demo board is not saved.");
    }
}
