use chrono::{DateTime, TimeZone, Utc};

use crate::models::{Plan, PlanStatus};

fn day(year: i32, month: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, d, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

fn demo(
    id: &str,
    title: &str,
    description: &str,
    status: PlanStatus,
    tags: [&str; 2],
    created: (i32, u32, u32),
    updated: (i32, u32, u32),
    due: Option<(i32, u32, u32)>,
) -> Plan {
    Plan {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        status,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        created_at: day(created.0, created.1, created.2),
        updated_at: day(updated.0, updated.1, updated.2),
        due_date: due.map(|(y, m, d)| day(y, m, d)),
    }
}

/// The read-only board shown to anonymous sessions. Built fresh on every
/// call so edits made during a session never leak into the next one.
pub fn demo_plans() -> Vec<Plan> {
    vec![
        demo(
            "demo-1",
            "Q1 Marketing Campaign",
            "Plan and execute the Q1 marketing strategy for product launch",
            PlanStatus::ToPlan,
            ["marketing", "high-priority"],
            (2024, 1, 15),
            (2024, 1, 15),
            Some((2024, 3, 31)),
        ),
        demo(
            "demo-2",
            "Website Redesign",
            "Modernize company website with new branding",
            PlanStatus::Planning,
            ["design", "frontend"],
            (2024, 1, 10),
            (2024, 1, 20),
            Some((2024, 4, 15)),
        ),
        demo(
            "demo-3",
            "API Integration",
            "Integrate third-party payment gateway",
            PlanStatus::InProgress,
            ["backend", "urgent"],
            (2024, 1, 5),
            (2024, 1, 22),
            Some((2024, 2, 28)),
        ),
        demo(
            "demo-4",
            "User Feedback Analysis",
            "Analyze Q4 user feedback and create action items",
            PlanStatus::Review,
            ["research", "ux"],
            (2024, 1, 12),
            (2024, 1, 23),
            None,
        ),
        demo(
            "demo-5",
            "Security Audit",
            "Complete security audit for compliance",
            PlanStatus::Done,
            ["security", "compliance"],
            (2024, 1, 1),
            (2024, 1, 18),
            Some((2024, 1, 30)),
        ),
    ]
}
