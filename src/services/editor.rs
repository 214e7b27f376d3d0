//! Event editing sessions.
//!
//! [`EditorSession`] drives one user's edit of one event from lock to save:
//! it snapshots the planning coverage the edit started from, accumulates
//! field changes and schedule transforms, answers which update-scope
//! questions have to be asked, and stamps the chosen methods onto the
//! update at submission.

use std::collections::HashMap;

use log::{info, warn};

use crate::api::{next_temp_planning_id, CoverageId, EventId, PlanningId, UpdateMethod};
use crate::db::repository::{FullRepository, RepositoryResult};
use crate::models::event::{EventItem, EventUpdates};
use crate::models::planning::{CoverageSummary, PlanningItem};
use crate::services::schedule::ScheduleDraft;
use crate::services::update_scope::{
    apply_update_methods, resolve_update_scope, UpdateScopeSummary,
};

/// One user's editing session over a single event.
pub struct EditorSession {
    original: EventItem,
    updates: EventUpdates,
    draft: Option<ScheduleDraft>,
    stored_coverages: HashMap<PlanningId, Vec<CoverageId>>,
    selections: HashMap<PlanningId, UpdateMethod>,
    event_method: UpdateMethod,
    session: String,
}

impl EditorSession {
    /// Lock the event and start editing it.
    ///
    /// The event's planning items are loaded into the pending update and
    /// their coverage sets snapshotted, so the scope summary can later tell
    /// which ones actually changed. A session that fails to load them
    /// releases its lock before reporting the error.
    pub async fn open<R: FullRepository>(
        repo: &R,
        event_id: &EventId,
        user: &str,
        session: &str,
    ) -> RepositoryResult<Self> {
        let original = repo.lock_event(event_id, user, session, "edit").await?;
        let plannings = match repo.get_plannings_for_event(event_id).await {
            Ok(plannings) => plannings,
            Err(err) => {
                if let Err(unlock_err) = repo.unlock_event(event_id, session).await {
                    warn!(
                        "Could not release lock on event {} after failed open: {}",
                        event_id, unlock_err
                    );
                }
                return Err(err);
            }
        };
        let stored_coverages = plannings
            .iter()
            .map(|p| (p.id.clone(), p.coverage_ids()))
            .collect();

        info!("Opened editing session '{}' on event {}", session, event_id);
        Ok(Self {
            original,
            updates: EventUpdates {
                associated_plannings: Some(plannings),
                ..Default::default()
            },
            draft: None,
            stored_coverages,
            selections: HashMap::new(),
            event_method: UpdateMethod::Single,
            session: session.to_string(),
        })
    }

    pub fn original(&self) -> &EventItem {
        &self.original
    }

    pub fn updates(&self) -> &EventUpdates {
        &self.updates
    }

    /// Direct access to the pending field updates.
    pub fn updates_mut(&mut self) -> &mut EventUpdates {
        &mut self.updates
    }

    /// Apply a schedule transform.
    ///
    /// The draft is created from the stored schedule on first use and kept
    /// across calls, so date-only and cleared-time states survive between
    /// transforms. The event's recurrence rule is re-attached afterwards;
    /// the draft itself never carries it.
    pub fn edit_schedule(&mut self, f: impl FnOnce(&mut ScheduleDraft)) {
        let draft = self
            .draft
            .get_or_insert_with(|| ScheduleDraft::from_event(&self.original));
        f(draft);

        let mut dates = draft.to_dates();
        dates.recurring_rule = self.original.dates.recurring_rule.clone();
        self.updates.time_to_be_confirmed = Some(draft.to_be_confirmed);
        self.updates.dates = Some(dates);
    }

    /// Add a new planning item for this event. It lives under a temporary
    /// id until submission persists it.
    pub fn add_planning<S: Into<String>>(&mut self, slugline: S) -> PlanningId {
        let id = next_temp_planning_id();
        let mut planning = PlanningItem::new(id.clone());
        planning.event_id = Some(self.original.id.clone());
        planning.slugline = Some(slugline.into());
        planning.planning_date = self
            .updates
            .dates
            .as_ref()
            .and_then(|d| d.start)
            .or(self.original.dates.start);

        self.updates
            .associated_plannings
            .get_or_insert_with(Vec::new)
            .push(planning);
        id
    }

    /// Add a coverage to one of the session's planning items. Returns
    /// whether the planning was found.
    pub fn add_coverage(&mut self, planning_id: &PlanningId, coverage: CoverageSummary) -> bool {
        if let Some(plannings) = self.updates.associated_plannings.as_mut() {
            if let Some(item) = plannings.iter_mut().find(|p| &p.id == planning_id) {
                item.coverages.push(coverage);
                return true;
            }
        }
        false
    }

    /// Record the user's update-scope choice for one planning item.
    pub fn select_method(&mut self, planning_id: PlanningId, method: UpdateMethod) {
        self.selections.insert(planning_id, method);
    }

    /// Record the update-scope choice for the event edit itself.
    pub fn set_event_method(&mut self, method: UpdateMethod) {
        self.event_method = method;
    }

    /// What this edit will touch if submitted now.
    pub fn scope_summary(&self) -> UpdateScopeSummary {
        resolve_update_scope(&self.original, &self.updates, &self.stored_coverages)
    }

    /// Save the pending update and release the lock.
    ///
    /// The chosen update methods are stamped on first. A save that went
    /// through but could not release its lock is still a successful save;
    /// the stale lock is logged and the saved event returned.
    pub async fn submit<R: FullRepository>(mut self, repo: &R) -> RepositoryResult<EventItem> {
        apply_update_methods(&mut self.updates, self.event_method, &self.selections);
        info!(
            "Saving event {} with method {}",
            self.original.id, self.event_method
        );

        let saved = repo.save_event(&self.original, &self.updates).await?;
        match repo.unlock_event(&self.original.id, &self.session).await {
            Ok(unlocked) => Ok(unlocked),
            Err(err) => {
                warn!(
                    "Could not release lock on event {}: {}",
                    self.original.id, err
                );
                Ok(saved)
            }
        }
    }

    /// Abandon the session without saving.
    pub async fn close<R: FullRepository>(self, repo: &R) -> RepositoryResult<EventItem> {
        info!("Closing editing session '{}' on event {}", self.session, self.original.id);
        repo.unlock_event(&self.original.id, &self.session).await
    }
}
