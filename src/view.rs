//! Read-only projections of the plan collection: filtering, tag aggregation
//! and column grouping, plus the transient filter and drag state.

use std::collections::BTreeSet;

use crate::models::{Column, Plan, PlanStatus};

/// Every tag in use, deduplicated and sorted.
pub fn all_tags(plans: &[Plan]) -> Vec<String> {
    plans
        .iter()
        .flat_map(|p| p.tags.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Text match is a case-insensitive substring of title or description; tag
/// match is any-of. Both must hold. Collection order is preserved.
pub fn filter<'a>(plans: &'a [Plan], query: &str, selected_tags: &[String]) -> Vec<&'a Plan> {
    let query = query.to_lowercase();
    plans
        .iter()
        .filter(|p| {
            query.is_empty()
                || p.title.to_lowercase().contains(&query)
                || p.description.to_lowercase().contains(&query)
        })
        .filter(|p| selected_tags.is_empty() || p.has_any_tag(selected_tags))
        .collect()
}

/// One column per status in board order; plans keep their input order.
pub fn group_by_status<'a>(filtered: &[&'a Plan]) -> Vec<Column<'a>> {
    PlanStatus::ALL
        .iter()
        .map(|&status| Column {
            status,
            plans: filtered.iter().copied().filter(|p| p.status == status).collect(),
        })
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    search_query: String,
    selected_tags: Vec<String>,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn selected_tags(&self) -> &[String] {
        &self.selected_tags
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    pub fn toggle_tag(&mut self, tag: &str) {
        if let Some(pos) = self.selected_tags.iter().position(|t| t == tag) {
            self.selected_tags.remove(pos);
        } else {
            self.selected_tags.push(tag.to_string());
        }
    }

    pub fn clear_tags(&mut self) {
        self.selected_tags.clear();
    }

    pub fn apply<'a>(&self, plans: &'a [Plan]) -> Vec<&'a Plan> {
        filter(plans, &self.search_query, &self.selected_tags)
    }

    pub fn columns<'a>(&self, plans: &'a [Plan]) -> Vec<Column<'a>> {
        group_by_status(&self.apply(plans))
    }
}

/// Pick-up and drop arrive as separate events. The marker is only read by
/// a drop; a stale one is overwritten by the next pick-up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragState {
    dragged: Option<String>,
}

impl DragState {
    pub fn pick_up(&mut self, id: impl Into<String>) {
        self.dragged = Some(id.into());
    }

    pub fn dragged(&self) -> Option<&str> {
        self.dragged.as_deref()
    }

    /// Consume the marker.
    pub fn take(&mut self) -> Option<String> {
        self.dragged.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::demo_plans;

    fn titles(plans: &[&Plan]) -> Vec<String> {
        plans.iter().map(|p| p.title.clone()).collect()
    }

    #[test]
    fn test_all_tags_sorted_and_unique() {
        let mut plans = demo_plans();
        plans[0].tags.push("urgent".into());
        let tags = all_tags(&plans);
        let mut expected = tags.clone();
        expected.sort();
        expected.dedup();
        assert_eq!(tags, expected);
        assert_eq!(tags.first().map(String::as_str), Some("backend"));
        assert_eq!(tags.iter().filter(|t| *t == "urgent").count(), 1);
    }

    #[test]
    fn test_empty_filter_is_identity() {
        let plans = demo_plans();
        let out = filter(&plans, "", &[]);
        assert_eq!(out.len(), plans.len());
        assert!(out.iter().zip(plans.iter()).all(|(a, b)| *a == b));
    }

    #[test]
    fn test_query_is_case_insensitive() {
        let plans = demo_plans();
        assert_eq!(titles(&filter(&plans, "SECURITY", &[])), vec!["Security Audit"]);
        // matches description only
        assert_eq!(titles(&filter(&plans, "payment gateway", &[])), vec!["API Integration"]);
        assert!(filter(&plans, "no such words", &[]).is_empty());
    }

    #[test]
    fn test_tags_match_any() {
        let plans = demo_plans();
        let selected = vec!["urgent".to_string(), "ux".to_string()];
        assert_eq!(
            titles(&filter(&plans, "", &selected)),
            vec!["API Integration", "User Feedback Analysis"]
        );
    }

    #[test]
    fn test_query_and_tags_combine() {
        let plans = demo_plans();
        let selected = vec!["urgent".to_string(), "ux".to_string()];
        assert_eq!(titles(&filter(&plans, "feedback", &selected)), vec!["User Feedback Analysis"]);
        assert!(filter(&plans, "security", &selected).is_empty());
    }

    #[test]
    fn test_group_by_status_partitions() {
        let mut plans = demo_plans();
        plans[1].status = PlanStatus::ToPlan;
        let filtered = filter(&plans, "", &[]);
        let columns = group_by_status(&filtered);

        let order: Vec<_> = columns.iter().map(|c| c.status).collect();
        assert_eq!(order, PlanStatus::ALL.to_vec());
        assert_eq!(columns.iter().map(Column::len).sum::<usize>(), filtered.len());
        assert_eq!(titles(&columns[0].plans), vec!["Q1 Marketing Campaign", "Website Redesign"]);
        assert!(columns[1].is_empty());
        assert_eq!(columns[2].title(), "In Progress");
    }

    #[test]
    fn test_toggle_tag_round_trip() {
        let plans = demo_plans();
        let mut view = ViewState::new();
        view.toggle_tag("backend");
        let before_tags = view.selected_tags().to_vec();
        let before = titles(&view.apply(&plans));

        view.toggle_tag("urgent");
        assert_eq!(view.selected_tags(), ["backend".to_string(), "urgent".to_string()]);
        view.toggle_tag("urgent");

        assert_eq!(view.selected_tags(), before_tags.as_slice());
        assert_eq!(titles(&view.apply(&plans)), before);
    }

    #[test]
    fn test_clear_tags() {
        let mut view = ViewState::new();
        view.toggle_tag("a");
        view.toggle_tag("b");
        view.clear_tags();
        assert!(view.selected_tags().is_empty());
    }

    #[test]
    fn test_drag_marker() {
        let mut drag = DragState::default();
        assert_eq!(drag.take(), None);
        drag.pick_up("a");
        drag.pick_up("b");
        assert_eq!(drag.dragged(), Some("b"));
        assert_eq!(drag.take().as_deref(), Some("b"));
        assert_eq!(drag.dragged(), None);
    }
}
