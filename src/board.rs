use crate::db::KeyValueStore;
use crate::error::BoardError;
use crate::models::{Column, NewPlan, Plan, PlanPatch, PlanStatus};
use crate::session::{AcceptNonEmpty, CredentialVerifier, Identity, Session};
use crate::store::PlanStore;
use crate::view::{self, DragState, ViewState};

/// Everything a front end talks to: session, plans for that session, and
/// the filter/drag state layered on top.
pub struct Board<S, V = AcceptNonEmpty> {
    storage: S,
    session: Session<V>,
    plans: PlanStore,
    view: ViewState,
    drag: DragState,
}

impl<S: KeyValueStore> Board<S, AcceptNonEmpty> {
    pub fn open(storage: S) -> Result<Self, BoardError> {
        Self::open_with(storage, AcceptNonEmpty)
    }
}

impl<S: KeyValueStore, V: CredentialVerifier> Board<S, V> {
    pub fn open_with(storage: S, verifier: V) -> Result<Self, BoardError> {
        let session = Session::restore_with(&storage, verifier)?;
        let plans = PlanStore::load(&storage, session.identity())?;
        Ok(Self {
            storage,
            session,
            plans,
            view: ViewState::new(),
            drag: DragState::default(),
        })
    }

    pub fn identity(&self) -> &Identity {
        self.session.identity()
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.is_logged_in()
    }

    pub fn is_persistent(&self) -> bool {
        self.plans.is_persistent()
    }

    /// On success the visible collection switches to the new identity's.
    pub fn login(&mut self, identifier: &str, secret: &str) -> Result<bool, BoardError> {
        if !self.session.login(&mut self.storage, identifier, secret)? {
            return Ok(false);
        }
        self.reload()?;
        Ok(true)
    }

    pub fn logout(&mut self) -> Result<(), BoardError> {
        self.session.logout(&mut self.storage)?;
        self.reload()
    }

    fn reload(&mut self) -> Result<(), BoardError> {
        self.plans = PlanStore::load(&self.storage, self.session.identity())?;
        Ok(())
    }

    pub fn plans(&self) -> &[Plan] {
        self.plans.plans()
    }

    pub fn get(&self, id: &str) -> Option<&Plan> {
        self.plans.get(id)
    }

    pub fn create(&mut self, fields: NewPlan) -> Result<Plan, BoardError> {
        self.plans.create(&mut self.storage, fields)
    }

    pub fn update(&mut self, id: &str, patch: PlanPatch) -> Result<bool, BoardError> {
        self.plans.update(&mut self.storage, id, patch)
    }

    pub fn move_plan(&mut self, id: &str, status: PlanStatus) -> Result<bool, BoardError> {
        self.plans.move_plan(&mut self.storage, id, status)
    }

    pub fn delete(&mut self, id: &str) -> Result<bool, BoardError> {
        self.plans.delete(&mut self.storage, id)
    }

    pub fn pick_up(&mut self, id: &str) {
        self.drag.pick_up(id);
    }

    /// Move the picked-up plan into `status`. Does nothing without a prior
    /// pick-up.
    pub fn drop_on(&mut self, status: PlanStatus) -> Result<bool, BoardError> {
        match self.drag.take() {
            Some(id) => self.move_plan(&id, status),
            None => Ok(false),
        }
    }

    pub fn search_query(&self) -> &str {
        self.view.search_query()
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.view.set_search_query(query);
    }

    pub fn selected_tags(&self) -> &[String] {
        self.view.selected_tags()
    }

    pub fn toggle_tag(&mut self, tag: &str) {
        self.view.toggle_tag(tag);
    }

    pub fn clear_tags(&mut self) {
        self.view.clear_tags();
    }

    pub fn all_tags(&self) -> Vec<String> {
        view::all_tags(self.plans.plans())
    }

    pub fn filtered(&self) -> Vec<&Plan> {
        self.view.apply(self.plans.plans())
    }

    pub fn columns(&self) -> Vec<Column<'_>> {
        self.view.columns(self.plans.plans())
    }
}
