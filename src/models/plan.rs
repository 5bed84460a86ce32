use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlanStatus {
    ToPlan,
    Planning,
    InProgress,
    Review,
    Done,
}

impl PlanStatus {
    /// Column order on the board.
    pub const ALL: [PlanStatus; 5] = [
        Self::ToPlan,
        Self::Planning,
        Self::InProgress,
        Self::Review,
        Self::Done,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ToPlan => "to-plan",
            Self::Planning => "planning",
            Self::InProgress => "in-progress",
            Self::Review => "review",
            Self::Done => "done",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::ToPlan => "To Plan",
            Self::Planning => "Planning",
            Self::InProgress => "In Progress",
            Self::Review => "Review",
            Self::Done => "Done",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "to-plan" => Some(Self::ToPlan),
            "planning" => Some(Self::Planning),
            "in-progress" => Some(Self::InProgress),
            "review" => Some(Self::Review),
            "done" => Some(Self::Done),
            _ => None,
        }
    }
}

impl Default for PlanStatus {
    fn default() -> Self {
        Self::ToPlan
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: PlanStatus,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
}

impl Plan {
    /// Bump `updated_at` to `now`, or one microsecond past the previous value
    /// if the clock has not moved forward since the last mutation.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = if now > self.updated_at {
            now
        } else {
            self.updated_at + Duration::microseconds(1)
        };
    }

    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.due_date.is_some_and(|due| due < now)
    }

    pub fn has_any_tag(&self, tags: &[String]) -> bool {
        tags.iter().any(|t| self.tags.contains(t))
    }
}

/// Fields accepted when creating a plan. Identity and timestamps are assigned
/// by the store.
#[derive(Debug, Clone, Default)]
pub struct NewPlan {
    pub title: String,
    pub description: String,
    pub status: Option<PlanStatus>,
    pub tags: Option<Vec<String>>,
    pub due_date: Option<DateTime<Utc>>,
}

impl NewPlan {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            ..Self::default()
        }
    }
}

/// Partial update. `id` and `created_at` cannot be patched.
///
/// `due_date` is doubly optional: `None` leaves the deadline alone,
/// `Some(None)` clears it.
#[derive(Debug, Clone, Default)]
pub struct PlanPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<PlanStatus>,
    pub tags: Option<Vec<String>>,
    pub due_date: Option<Option<DateTime<Utc>>>,
}

impl PlanPatch {
    pub fn status(status: PlanStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.tags.is_none()
            && self.due_date.is_none()
    }
}

/// Trim, lowercase, drop empties and duplicates, keeping first-seen order.
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for tag in tags {
        let tag = tag.as_ref().trim().to_lowercase();
        if !tag.is_empty() && !out.contains(&tag) {
            out.push(tag);
        }
    }
    out
}
