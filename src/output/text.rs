use chrono::{DateTime, Utc};

use crate::models::{Column, Plan};
use crate::session::Identity;

fn short_date(dt: &DateTime<Utc>) -> String {
    dt.format("%b %-d").to_string()
}

pub fn print_session(identity: &Identity) {
    match identity.email() {
        Some(email) => println!("Board: {email}"),
        None => println!("Board: demo (log in to save changes)"),
    }
}

pub fn print_filters(query: &str, tags: &[String]) {
    let mut parts = Vec::new();
    if !query.is_empty() {
        parts.push(format!("search=\"{query}\""));
    }
    if !tags.is_empty() {
        parts.push(format!("tags={}", tags.join(",")));
    }
    println!("Filters: {}", parts.join(" "));
}

pub fn print_column(c: &Column<'_>, now: DateTime<Utc>) {
    println!("{} ({})", c.title(), c.len());
    if c.is_empty() {
        println!("  No plans");
        return;
    }
    for p in &c.plans {
        print_card(p, now);
    }
}

fn print_card(p: &Plan, now: DateTime<Utc>) {
    let mut line = format!("  {} ({})", p.title, p.id);
    if !p.tags.is_empty() {
        line.push_str(&format!(" #{}", p.tags.join(" #")));
    }
    if let Some(ref due) = p.due_date {
        line.push_str(&format!(" due {}", short_date(due)));
        if p.is_overdue(now) {
            line.push_str(" OVERDUE");
        }
    }
    println!("{line}");
}

pub fn print_plan(p: &Plan, now: DateTime<Utc>) {
    println!("Plan: {} ({})", p.title, p.id);
    if !p.description.is_empty() {
        println!("  Description: {}", p.description);
    }
    println!("  Status: {} ({})", p.status.as_str(), p.status.label());
    if !p.tags.is_empty() {
        println!("  Tags: {}", p.tags.join(", "));
    }
    if let Some(ref due) = p.due_date {
        let marker = if p.is_overdue(now) { " (overdue)" } else { "" };
        println!("  Due: {}{marker}", due.date_naive());
    }
    println!("  Created: {}", p.created_at.to_rfc3339());
    println!("  Updated: {} ({})", p.updated_at.to_rfc3339(), short_date(&p.updated_at));
}
