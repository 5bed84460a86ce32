use chrono::Utc;

use crate::db::KeyValueStore;
use crate::demo;
use crate::error::BoardError;
use crate::models::{normalize_tags, NewPlan, Plan, PlanPatch, PlanStatus};
use crate::session::Identity;

/// Storage key of an identity's collection.
pub fn plans_key(email: &str) -> String {
    format!("plans_{email}")
}

pub fn serialize_plans(plans: &[Plan]) -> Result<String, BoardError> {
    Ok(serde_json::to_string(plans)?)
}

pub fn deserialize_plans(raw: &str) -> Result<Vec<Plan>, BoardError> {
    Ok(serde_json::from_str(raw)?)
}

/// The plan collection for one identity.
///
/// Anonymous stores hold the demo board and never write. User stores write
/// the whole collection after every change that touched it.
#[derive(Debug, Clone)]
pub struct PlanStore {
    identity: Identity,
    plans: Vec<Plan>,
}

impl PlanStore {
    pub fn load<S: KeyValueStore>(store: &S, identity: &Identity) -> Result<Self, BoardError> {
        let plans = match identity {
            Identity::Anonymous => demo::demo_plans(),
            Identity::User(email) => match store.get(&plans_key(email))? {
                None => Vec::new(),
                Some(raw) => match deserialize_plans(&raw) {
                    Ok(plans) => plans,
                    Err(e) => {
                        tracing::warn!(
                            identity = %email,
                            error = %e.message,
                            "stored plans are unreadable, starting with an empty board"
                        );
                        Vec::new()
                    }
                },
            },
        };
        tracing::debug!(%identity, count = plans.len(), "loaded plans");
        Ok(Self {
            identity: identity.clone(),
            plans,
        })
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn plans(&self) -> &[Plan] {
        &self.plans
    }

    pub fn get(&self, id: &str) -> Option<&Plan> {
        self.plans.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }

    pub fn create<S: KeyValueStore>(
        &mut self,
        store: &mut S,
        fields: NewPlan,
    ) -> Result<Plan, BoardError> {
        let now = Utc::now();
        let plan = Plan {
            id: ulid::Ulid::new().to_string(),
            title: fields.title,
            description: fields.description,
            status: fields.status.unwrap_or_default(),
            tags: fields.tags.map(normalize_tags).unwrap_or_default(),
            created_at: now,
            updated_at: now,
            due_date: fields.due_date,
        };
        self.plans.push(plan.clone());
        self.persist(store)?;
        Ok(plan)
    }

    /// Merge `patch` into the plan with `id`. Returns false, touching nothing,
    /// when no plan matches.
    pub fn update<S: KeyValueStore>(
        &mut self,
        store: &mut S,
        id: &str,
        patch: PlanPatch,
    ) -> Result<bool, BoardError> {
        let Some(plan) = self.plans.iter_mut().find(|p| p.id == id) else {
            tracing::debug!(id, "update skipped, no such plan");
            return Ok(false);
        };
        if let Some(title) = patch.title {
            plan.title = title;
        }
        if let Some(description) = patch.description {
            plan.description = description;
        }
        if let Some(status) = patch.status {
            plan.status = status;
        }
        if let Some(tags) = patch.tags {
            plan.tags = normalize_tags(tags);
        }
        if let Some(due_date) = patch.due_date {
            plan.due_date = due_date;
        }
        plan.touch(Utc::now());
        self.persist(store)?;
        Ok(true)
    }

    pub fn move_plan<S: KeyValueStore>(
        &mut self,
        store: &mut S,
        id: &str,
        status: PlanStatus,
    ) -> Result<bool, BoardError> {
        self.update(store, id, PlanPatch::status(status))
    }

    pub fn delete<S: KeyValueStore>(&mut self, store: &mut S, id: &str) -> Result<bool, BoardError> {
        let before = self.plans.len();
        self.plans.retain(|p| p.id != id);
        if self.plans.len() == before {
            return Ok(false);
        }
        self.persist(store)?;
        Ok(true)
    }

    /// Whether mutations reach storage.
    pub fn is_persistent(&self) -> bool {
        !self.identity.is_anonymous()
    }

    fn persist<S: KeyValueStore>(&self, store: &mut S) -> Result<(), BoardError> {
        let Identity::User(email) = &self.identity else {
            return Ok(());
        };
        store.set(&plans_key(email), &serialize_plans(&self.plans)?)?;
        tracing::debug!(identity = %email, count = self.plans.len(), "saved plans");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use chrono::TimeZone;

    fn user(email: &str) -> Identity {
        Identity::User(email.to_string())
    }

    fn user_store(store: &MemoryStore) -> PlanStore {
        PlanStore::load(store, &user("a@x.com")).unwrap()
    }

    #[test]
    fn test_anonymous_loads_demo() {
        let store = MemoryStore::new();
        let plans = PlanStore::load(&store, &Identity::Anonymous).unwrap();
        assert_eq!(plans.len(), 5);
        assert_eq!(plans.plans()[0].title, "Q1 Marketing Campaign");
        assert_eq!(plans.plans()[4].title, "Security Audit");
        assert_eq!(plans.plans()[4].status, PlanStatus::Done);
    }

    #[test]
    fn test_new_user_starts_empty() {
        let store = MemoryStore::new();
        assert!(user_store(&store).is_empty());
    }

    #[test]
    fn test_create_defaults() {
        let mut store = MemoryStore::new();
        let mut plans = user_store(&store);
        let plan = plans.create(&mut store, NewPlan::new("Test", "")).unwrap();
        assert_eq!(plan.status, PlanStatus::ToPlan);
        assert!(plan.tags.is_empty());
        assert_eq!(plan.created_at, plan.updated_at);
        assert!(plan.due_date.is_none());
        assert_eq!(plans.get(&plan.id), Some(&plan));
    }

    #[test]
    fn test_create_assigns_unique_ids() {
        let mut store = MemoryStore::new();
        let mut plans = user_store(&store);
        let a = plans.create(&mut store, NewPlan::new("A", "")).unwrap();
        let b = plans.create(&mut store, NewPlan::new("B", "")).unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(plans.plans()[1].id, b.id);
    }

    #[test]
    fn test_update_merges_and_keeps_identity() {
        let mut store = MemoryStore::new();
        let mut plans = user_store(&store);
        let created = plans
            .create(
                &mut store,
                NewPlan {
                    tags: Some(vec!["x".into()]),
                    ..NewPlan::new("Old", "desc")
                },
            )
            .unwrap();
        let patch = PlanPatch {
            title: Some("New".into()),
            tags: Some(vec!["Urgent".into(), "urgent".into()]),
            ..PlanPatch::default()
        };
        assert!(plans.update(&mut store, &created.id, patch).unwrap());

        let updated = plans.get(&created.id).unwrap();
        assert_eq!(updated.title, "New");
        assert_eq!(updated.description, "desc");
        assert_eq!(updated.tags, vec!["urgent".to_string()]);
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);
    }

    #[test]
    fn test_update_only_touches_match() {
        let mut store = MemoryStore::new();
        let mut plans = user_store(&store);
        let a = plans.create(&mut store, NewPlan::new("A", "")).unwrap();
        let b = plans.create(&mut store, NewPlan::new("B", "")).unwrap();
        plans.move_plan(&mut store, &a.id, PlanStatus::Review).unwrap();
        assert_eq!(plans.get(&b.id), Some(&b));
    }

    #[test]
    fn test_update_missing_is_noop() {
        let mut store = MemoryStore::new();
        let mut plans = user_store(&store);
        plans.create(&mut store, NewPlan::new("A", "")).unwrap();
        let before = plans.plans().to_vec();
        assert!(!plans.update(&mut store, "nope", PlanPatch::status(PlanStatus::Done)).unwrap());
        assert!(!plans.move_plan(&mut store, "nope", PlanStatus::Done).unwrap());
        assert_eq!(plans.plans(), before.as_slice());
    }

    #[test]
    fn test_move_any_to_any() {
        let mut store = MemoryStore::new();
        let mut plans = user_store(&store);
        let plan = plans.create(&mut store, NewPlan::new("A", "")).unwrap();
        let mut last = plan.updated_at;
        for status in [PlanStatus::Done, PlanStatus::ToPlan, PlanStatus::Review, PlanStatus::Planning] {
            assert!(plans.move_plan(&mut store, &plan.id, status).unwrap());
            let moved = plans.get(&plan.id).unwrap();
            assert_eq!(moved.status, status);
            assert!(moved.updated_at > last);
            assert_eq!(moved.created_at, plan.created_at);
            last = moved.updated_at;
        }
    }

    #[test]
    fn test_clear_due_date() {
        let mut store = MemoryStore::new();
        let mut plans = user_store(&store);
        let due = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
        let plan = plans
            .create(
                &mut store,
                NewPlan {
                    due_date: Some(due),
                    ..NewPlan::new("A", "")
                },
            )
            .unwrap();
        assert_eq!(plan.due_date, Some(due));
        let patch = PlanPatch {
            due_date: Some(None),
            ..PlanPatch::default()
        };
        plans.update(&mut store, &plan.id, patch).unwrap();
        assert_eq!(plans.get(&plan.id).unwrap().due_date, None);
    }

    #[test]
    fn test_delete() {
        let mut store = MemoryStore::new();
        let mut plans = user_store(&store);
        let a = plans.create(&mut store, NewPlan::new("A", "")).unwrap();
        plans.create(&mut store, NewPlan::new("B", "")).unwrap();
        assert!(plans.delete(&mut store, &a.id).unwrap());
        assert_eq!(plans.len(), 1);
        assert!(plans.get(&a.id).is_none());
        assert!(!plans.delete(&mut store, &a.id).unwrap());
        assert_eq!(plans.len(), 1);
    }

    #[test]
    fn test_user_changes_persist() {
        let mut store = MemoryStore::new();
        let mut plans = user_store(&store);
        let plan = plans.create(&mut store, NewPlan::new("Test", "")).unwrap();
        plans.move_plan(&mut store, &plan.id, PlanStatus::Planning).unwrap();

        let reloaded = user_store(&store);
        assert_eq!(reloaded.plans(), plans.plans());
        assert_eq!(reloaded.get(&plan.id).unwrap().status, PlanStatus::Planning);
    }

    #[test]
    fn test_identities_are_isolated() {
        let mut store = MemoryStore::new();
        let mut plans = user_store(&store);
        plans.create(&mut store, NewPlan::new("Test", "")).unwrap();
        let other = PlanStore::load(&store, &user("b@x.com")).unwrap();
        assert!(other.is_empty());
    }

    #[test]
    fn test_anonymous_changes_never_persist() {
        let mut store = MemoryStore::new();
        let mut plans = PlanStore::load(&store, &Identity::Anonymous).unwrap();
        plans.create(&mut store, NewPlan::new("Scratch", "")).unwrap();
        plans.move_plan(&mut store, "demo-1", PlanStatus::Done).unwrap();
        plans.delete(&mut store, "demo-2").unwrap();
        assert!(store.is_empty());
        assert!(!plans.is_persistent());

        let fresh = PlanStore::load(&store, &Identity::Anonymous).unwrap();
        assert_eq!(fresh.plans(), demo::demo_plans().as_slice());
    }

    #[test]
    fn test_corrupt_data_falls_back_to_empty() {
        let mut store = MemoryStore::new();
        store.set(&plans_key("a@x.com"), "{not json").unwrap();
        assert!(user_store(&store).is_empty());
    }

    #[test]
    fn test_serialization_round_trip() {
        let plans = demo::demo_plans();
        let raw = serialize_plans(&plans).unwrap();
        assert!(raw.contains("\"createdAt\""));
        assert!(raw.contains("\"in-progress\""));
        assert_eq!(deserialize_plans(&raw).unwrap(), plans);
    }

    #[test]
    fn test_missing_due_date_is_omitted() {
        let raw = serialize_plans(&demo::demo_plans()[3..4]).unwrap();
        assert!(!raw.contains("dueDate"));
    }
}
