use super::plan::{Plan, PlanStatus};

/// One board column. Derived on every read, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Column<'a> {
    pub status: PlanStatus,
    pub plans: Vec<&'a Plan>,
}

impl Column<'_> {
    pub fn title(&self) -> &'static str {
        self.status.label()
    }

    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }
}
