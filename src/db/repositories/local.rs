//! Local in-memory repository implementation.
//!
//! Keeps events, planning items and agendas in process memory behind an
//! `RwLock`. Intended for tests and development; cloning the repository
//! shares the same underlying store.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::Utc;

use crate::api::{AgendaId, EventId, PlanningId, RecurrenceId, UpdateMethod};
use crate::db::etag::event_etag;
use crate::db::repository::{
    EventRepository, LockRepository, PlanningRepository, RepositoryError, RepositoryResult,
};
use crate::models::event::{
    sort_events_by_start, starts_on_or_after, EventItem, EventUpdates, ItemLock,
};
use crate::models::planning::{Agenda, PlanningItem};

/// Internal data storage.
#[derive(Debug)]
struct LocalData {
    events: HashMap<EventId, EventItem>,
    plannings: HashMap<PlanningId, PlanningItem>,
    agendas: HashMap<AgendaId, Agenda>,
    next_event_id: i64,
    next_planning_id: i64,
    next_agenda_id: i64,
    next_planning_recurrence_id: i64,
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            events: HashMap::new(),
            plannings: HashMap::new(),
            agendas: HashMap::new(),
            next_event_id: 0,
            next_planning_id: 0,
            next_agenda_id: 0,
            next_planning_recurrence_id: 0,
            is_healthy: true,
        }
    }
}

impl LocalData {
    fn mint_event_id(&mut self) -> EventId {
        self.next_event_id += 1;
        EventId::new(format!("event_{}", self.next_event_id))
    }

    fn mint_planning_id(&mut self) -> PlanningId {
        self.next_planning_id += 1;
        PlanningId::new(format!("plan_{}", self.next_planning_id))
    }

    fn mint_agenda_id(&mut self) -> AgendaId {
        self.next_agenda_id += 1;
        AgendaId::new(format!("agenda_{}", self.next_agenda_id))
    }

    fn mint_planning_recurrence_id(&mut self) -> RecurrenceId {
        self.next_planning_recurrence_id += 1;
        RecurrenceId::new(format!("plan_rec_{}", self.next_planning_recurrence_id))
    }

    fn refresh_event_etag(&mut self, id: &EventId) {
        if let Some(event) = self.events.get_mut(id) {
            let tag = event_etag(event);
            event.etag = Some(tag);
        }
    }
}

/// Events of `base`'s series that an update with `method` reaches, not
/// counting `base` itself. Future scope is measured against the stored
/// (pre-update) start of the edited event.
fn scoped_sibling_ids(
    data: &LocalData,
    base: &EventItem,
    stored: &EventItem,
    method: UpdateMethod,
) -> Vec<EventId> {
    let recurrence_id = match &base.recurrence_id {
        Some(id) => id,
        None => return Vec::new(),
    };
    data.events
        .values()
        .filter(|event| event.recurrence_id.as_ref() == Some(recurrence_id) && event.id != base.id)
        .filter(|event| match method {
            UpdateMethod::Single => false,
            UpdateMethod::Future => starts_on_or_after(event, stored),
            UpdateMethod::All => true,
        })
        .map(|event| event.id.clone())
        .collect()
}

fn sort_event_ids_by_start(data: &LocalData, ids: &mut [EventId]) {
    ids.sort_by(|a, b| {
        let a_start = data.events.get(a).and_then(|e| e.dates.start);
        let b_start = data.events.get(b).and_then(|e| e.dates.start);
        match (a_start, b_start) {
            (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.cmp(b),
        }
    });
}

/// Persist a new planning item once per event the item's own update method
/// reaches. Copies spanning more than one event share a freshly minted
/// planning recurrence id.
fn create_planning_copies(
    data: &mut LocalData,
    base: &EventItem,
    stored: &EventItem,
    item: &PlanningItem,
) {
    let method = item.update_method.unwrap_or_default();

    let mut targets = vec![base.id.clone()];
    targets.extend(scoped_sibling_ids(data, base, stored, method));
    sort_event_ids_by_start(data, &mut targets);

    let shared_recurrence = if targets.len() > 1 {
        Some(data.mint_planning_recurrence_id())
    } else {
        None
    };

    for event_id in targets {
        let planning_id = data.mint_planning_id();
        let event_start = data.events.get(&event_id).and_then(|e| e.dates.start);

        let mut planning = item.clone();
        planning.id = planning_id.clone();
        planning.event_id = Some(event_id.clone());
        planning.planning_date = event_start.or(item.planning_date);
        planning.planning_recurrence_id = shared_recurrence.clone();
        planning.update_method = None;
        data.plannings.insert(planning_id.clone(), planning);

        if let Some(event) = data.events.get_mut(&event_id) {
            event.planning_ids.push(planning_id);
        }
        data.refresh_event_etag(&event_id);
    }
}

fn apply_planning_content(planning: &mut PlanningItem, item: &PlanningItem) {
    planning.slugline = item.slugline.clone();
    planning.coverages = item.coverages.clone();
    planning.agendas = item.agendas.clone();
}

/// Write an edited planning item back, then spread the same content over its
/// series copies as far as the item's own update method reaches.
fn update_planning_copies(
    data: &mut LocalData,
    stored_event: &EventItem,
    item: &PlanningItem,
) -> RepositoryResult<()> {
    let stored = data
        .plannings
        .get(&item.id)
        .cloned()
        .ok_or_else(|| RepositoryError::NotFound(format!("Planning '{}' not found", item.id)))?;
    let method = item.update_method.unwrap_or_default();

    if let Some(planning) = data.plannings.get_mut(&item.id) {
        apply_planning_content(planning, item);
    }

    let recurrence_id = match &stored.planning_recurrence_id {
        Some(id) => id.clone(),
        None => return Ok(()),
    };
    if method == UpdateMethod::Single {
        return Ok(());
    }

    let copy_ids: Vec<PlanningId> = data
        .plannings
        .values()
        .filter(|p| p.planning_recurrence_id.as_ref() == Some(&recurrence_id) && p.id != item.id)
        .filter(|p| match method {
            UpdateMethod::Single => false,
            UpdateMethod::All => true,
            UpdateMethod::Future => p
                .event_id
                .as_ref()
                .and_then(|id| data.events.get(id))
                .map(|event| starts_on_or_after(event, stored_event))
                .unwrap_or(false),
        })
        .map(|p| p.id.clone())
        .collect();

    for id in copy_ids {
        if let Some(planning) = data.plannings.get_mut(&id) {
            apply_planning_content(planning, item);
        }
    }
    Ok(())
}

/// Local in-memory repository.
#[derive(Debug, Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

impl LocalRepository {
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    /// Set health status (useful for testing failure paths).
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().unwrap().is_healthy = healthy;
    }

    /// Drop all stored data and reset id counters.
    pub fn clear(&self) {
        let mut data = self.data.write().unwrap();
        data.events.clear();
        data.plannings.clear();
        data.agendas.clear();
        data.next_event_id = 0;
        data.next_planning_id = 0;
        data.next_agenda_id = 0;
        data.next_planning_recurrence_id = 0;
    }

    pub fn event_count(&self) -> usize {
        self.data.read().unwrap().events.len()
    }

    pub fn planning_count(&self) -> usize {
        self.data.read().unwrap().plannings.len()
    }

    pub fn agenda_count(&self) -> usize {
        self.data.read().unwrap().agendas.len()
    }

    pub fn has_event(&self, id: &EventId) -> bool {
        self.data.read().unwrap().events.contains_key(id)
    }

    fn check_health(&self) -> RepositoryResult<()> {
        if self.data.read().unwrap().is_healthy {
            Ok(())
        } else {
            Err(RepositoryError::ConnectionError(
                "Local repository is unhealthy".to_string(),
            ))
        }
    }

    fn create_event_impl(&self, event: &EventItem) -> RepositoryResult<EventItem> {
        let mut data = self.data.write().unwrap();

        if event.name.is_empty() {
            return Err(RepositoryError::ValidationError(
                "Event name must not be empty".to_string(),
            ));
        }

        let mut stored = event.clone();
        if stored.id.value().is_empty() {
            stored.id = data.mint_event_id();
        } else if data.events.contains_key(&stored.id) {
            return Err(RepositoryError::ValidationError(format!(
                "Event '{}' already exists",
                stored.id
            )));
        }
        stored.etag = Some(event_etag(&stored));
        data.events.insert(stored.id.clone(), stored.clone());
        Ok(stored)
    }

    fn get_event_impl(&self, id: &EventId) -> RepositoryResult<EventItem> {
        self.data
            .read()
            .unwrap()
            .events
            .get(id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(format!("Event '{}' not found", id)))
    }

    fn list_events_impl(&self) -> RepositoryResult<Vec<EventItem>> {
        let data = self.data.read().unwrap();
        let mut events: Vec<EventItem> = data.events.values().cloned().collect();
        sort_events_by_start(&mut events);
        Ok(events)
    }

    fn get_series_impl(&self, recurrence_id: &RecurrenceId) -> RepositoryResult<Vec<EventItem>> {
        let data = self.data.read().unwrap();
        let mut events: Vec<EventItem> = data
            .events
            .values()
            .filter(|e| e.recurrence_id.as_ref() == Some(recurrence_id))
            .cloned()
            .collect();
        sort_events_by_start(&mut events);
        Ok(events)
    }

    fn save_event_impl(
        &self,
        original: &EventItem,
        updates: &EventUpdates,
    ) -> RepositoryResult<EventItem> {
        let mut data = self.data.write().unwrap();

        let stored = data
            .events
            .get(&original.id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(format!("Event '{}' not found", original.id)))?;
        let method = updates.update_method.unwrap_or_default();

        // The edited event takes the whole update, schedule included.
        let mut base = stored.clone();
        updates.apply_to(&mut base);
        base.etag = Some(event_etag(&base));
        data.events.insert(base.id.clone(), base.clone());

        // Other events of the series take everything except the schedule.
        let scope = scoped_sibling_ids(&data, &base, &stored, method);
        if !scope.is_empty() {
            let mut shared = updates.clone();
            shared.dates = None;
            shared.time_to_be_confirmed = None;
            shared.associated_plannings = None;
            for id in &scope {
                if let Some(event) = data.events.get_mut(id) {
                    shared.apply_to(event);
                }
                data.refresh_event_etag(id);
            }
        }

        // Planning payload: new items spread per their own update method,
        // existing items updated in place and across their series copies.
        if let Some(plannings) = &updates.associated_plannings {
            for item in plannings {
                if item.is_temporary() {
                    create_planning_copies(&mut data, &base, &stored, item);
                } else {
                    update_planning_copies(&mut data, &stored, item)?;
                }
            }
        }

        Ok(data.events.get(&base.id).cloned().unwrap_or(base))
    }

    fn create_planning_impl(&self, planning: &PlanningItem) -> RepositoryResult<PlanningItem> {
        let mut data = self.data.write().unwrap();

        if let Some(event_id) = &planning.event_id {
            if !data.events.contains_key(event_id) {
                return Err(RepositoryError::NotFound(format!(
                    "Event '{}' not found",
                    event_id
                )));
            }
        }

        let mut stored = planning.clone();
        if stored.id.value().is_empty() || stored.is_temporary() {
            stored.id = data.mint_planning_id();
        } else if data.plannings.contains_key(&stored.id) {
            return Err(RepositoryError::ValidationError(format!(
                "Planning '{}' already exists",
                stored.id
            )));
        }
        stored.update_method = None;
        data.plannings.insert(stored.id.clone(), stored.clone());

        if let Some(event_id) = stored.event_id.clone() {
            if let Some(event) = data.events.get_mut(&event_id) {
                if !event.planning_ids.contains(&stored.id) {
                    event.planning_ids.push(stored.id.clone());
                }
            }
            data.refresh_event_etag(&event_id);
        }
        Ok(stored)
    }

    fn get_planning_impl(&self, id: &PlanningId) -> RepositoryResult<PlanningItem> {
        self.data
            .read()
            .unwrap()
            .plannings
            .get(id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(format!("Planning '{}' not found", id)))
    }

    fn plannings_for_event_impl(&self, event_id: &EventId) -> RepositoryResult<Vec<PlanningItem>> {
        let data = self.data.read().unwrap();
        let event = data
            .events
            .get(event_id)
            .ok_or_else(|| RepositoryError::NotFound(format!("Event '{}' not found", event_id)))?;
        Ok(event
            .planning_ids
            .iter()
            .filter_map(|id| data.plannings.get(id).cloned())
            .collect())
    }

    fn plannings_for_events_impl(
        &self,
        event_ids: &[EventId],
    ) -> RepositoryResult<Vec<PlanningItem>> {
        let data = self.data.read().unwrap();
        let mut result = Vec::new();
        for event_id in event_ids {
            if let Some(event) = data.events.get(event_id) {
                result.extend(
                    event
                        .planning_ids
                        .iter()
                        .filter_map(|id| data.plannings.get(id).cloned()),
                );
            }
        }
        Ok(result)
    }

    fn list_agendas_impl(&self) -> RepositoryResult<Vec<Agenda>> {
        let data = self.data.read().unwrap();
        let mut agendas: Vec<Agenda> = data.agendas.values().cloned().collect();
        agendas.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(agendas)
    }

    fn create_agenda_impl(&self, agenda: &Agenda) -> RepositoryResult<Agenda> {
        let mut data = self.data.write().unwrap();

        let mut stored = agenda.clone();
        if stored.id.value().is_empty() {
            stored.id = data.mint_agenda_id();
        } else if data.agendas.contains_key(&stored.id) {
            return Err(RepositoryError::ValidationError(format!(
                "Agenda '{}' already exists",
                stored.id
            )));
        }
        data.agendas.insert(stored.id.clone(), stored.clone());
        Ok(stored)
    }

    fn lock_event_impl(
        &self,
        id: &EventId,
        user: &str,
        session: &str,
        action: &str,
    ) -> RepositoryResult<EventItem> {
        let mut data = self.data.write().unwrap();
        let event = data
            .events
            .get_mut(id)
            .ok_or_else(|| RepositoryError::NotFound(format!("Event '{}' not found", id)))?;

        if let Some(lock) = &event.lock {
            if lock.session != session {
                return Err(RepositoryError::Locked(format!(
                    "Event '{}' is locked by session '{}'",
                    id, lock.session
                )));
            }
        }
        event.lock = Some(ItemLock {
            user: user.to_string(),
            session: session.to_string(),
            action: action.to_string(),
            time: Utc::now(),
        });
        Ok(event.clone())
    }

    fn unlock_event_impl(&self, id: &EventId, session: &str) -> RepositoryResult<EventItem> {
        let mut data = self.data.write().unwrap();
        let event = data
            .events
            .get_mut(id)
            .ok_or_else(|| RepositoryError::NotFound(format!("Event '{}' not found", id)))?;

        match event.lock.as_ref().map(|l| l.session.clone()) {
            None => Ok(event.clone()),
            Some(owner) if owner == session => {
                event.lock = None;
                Ok(event.clone())
            }
            Some(owner) => Err(RepositoryError::Locked(format!(
                "Event '{}' is locked by session '{}'",
                id, owner
            ))),
        }
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<()> {
        self.check_health()
    }

    async fn create_event(&self, event: &EventItem) -> RepositoryResult<EventItem> {
        self.check_health()?;
        self.create_event_impl(event)
    }

    async fn get_event(&self, id: &EventId) -> RepositoryResult<EventItem> {
        self.check_health()?;
        self.get_event_impl(id)
    }

    async fn list_events(&self) -> RepositoryResult<Vec<EventItem>> {
        self.check_health()?;
        self.list_events_impl()
    }

    async fn get_series(&self, recurrence_id: &RecurrenceId) -> RepositoryResult<Vec<EventItem>> {
        self.check_health()?;
        self.get_series_impl(recurrence_id)
    }

    async fn save_event(
        &self,
        original: &EventItem,
        updates: &EventUpdates,
    ) -> RepositoryResult<EventItem> {
        self.check_health()?;
        self.save_event_impl(original, updates)
    }
}

#[async_trait]
impl PlanningRepository for LocalRepository {
    async fn create_planning(&self, planning: &PlanningItem) -> RepositoryResult<PlanningItem> {
        self.check_health()?;
        self.create_planning_impl(planning)
    }

    async fn get_planning(&self, id: &PlanningId) -> RepositoryResult<PlanningItem> {
        self.check_health()?;
        self.get_planning_impl(id)
    }

    async fn get_plannings_for_event(
        &self,
        event_id: &EventId,
    ) -> RepositoryResult<Vec<PlanningItem>> {
        self.check_health()?;
        self.plannings_for_event_impl(event_id)
    }

    async fn get_plannings_for_events(
        &self,
        event_ids: &[EventId],
    ) -> RepositoryResult<Vec<PlanningItem>> {
        self.check_health()?;
        self.plannings_for_events_impl(event_ids)
    }

    async fn list_agendas(&self) -> RepositoryResult<Vec<Agenda>> {
        self.check_health()?;
        self.list_agendas_impl()
    }

    async fn create_agenda(&self, agenda: &Agenda) -> RepositoryResult<Agenda> {
        self.check_health()?;
        self.create_agenda_impl(agenda)
    }
}

#[async_trait]
impl LockRepository for LocalRepository {
    async fn lock_event(
        &self,
        id: &EventId,
        user: &str,
        session: &str,
        action: &str,
    ) -> RepositoryResult<EventItem> {
        self.check_health()?;
        self.lock_event_impl(id, user, session, action)
    }

    async fn unlock_event(&self, id: &EventId, session: &str) -> RepositoryResult<EventItem> {
        self.check_health()?;
        self.unlock_event_impl(id, session)
    }
}
