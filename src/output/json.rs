use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use crate::error::BoardError;
use crate::models::{Column, Plan};
use crate::session::Identity;

pub fn success(data: Value) -> Value {
    json!({
        "success": true,
        "data": data
    })
}

pub fn error(err: &BoardError) -> Value {
    json!({
        "success": false,
        "error": {
            "code": err.code.as_str(),
            "message": err.message
        }
    })
}

pub fn print(v: &Value) {
    match serde_json::to_string_pretty(v) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("Error: {e}"),
    }
}

/// Stored fields plus the derived `overdue` flag.
pub fn plan_json(p: &Plan, now: DateTime<Utc>) -> Value {
    let mut v = serde_json::to_value(p).unwrap_or(Value::Null);
    v["dueDate"] = json!(p.due_date);
    v["overdue"] = json!(p.is_overdue(now));
    v
}

pub fn column_json(c: &Column<'_>, now: DateTime<Utc>) -> Value {
    let plans: Vec<_> = c.plans.iter().map(|p| plan_json(p, now)).collect();
    json!({
        "id": c.status.as_str(),
        "title": c.title(),
        "count": c.len(),
        "plans": plans
    })
}

pub fn session_json(identity: &Identity) -> Value {
    json!({
        "logged_in": !identity.is_anonymous(),
        "email": identity.email(),
        "demo": identity.is_anonymous()
    })
}
