#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use crate::api::{
        next_temp_planning_id, CoverageId, EventId, PlanningId, RecurrenceId, UpdateMethod,
    };
    use crate::models::event::{EventDates, EventItem, EventUpdates, Location};
    use crate::models::planning::{CoverageSummary, PlanningItem};
    use crate::services::update_scope::{
        apply_update_methods, event_was_updated, get_recurring_planning_to_create,
        get_recurring_planning_to_update, resolve_update_scope,
    };

    fn recurring_event() -> EventItem {
        let mut event = EventItem::new(
            EventId::new("event_1"),
            "Street festival",
            EventDates::default(),
        );
        event.slugline = Some("festival".to_string());
        event.recurrence_id = Some(RecurrenceId::new("rec_1"));
        event
    }

    fn planning(id: &str, recurrence: Option<&str>, coverages: &[&str]) -> PlanningItem {
        let mut item = PlanningItem::new(PlanningId::new(id));
        item.planning_recurrence_id = recurrence.map(RecurrenceId::new);
        item.coverages = coverages
            .iter()
            .map(|c| CoverageSummary::new(CoverageId::new(*c)))
            .collect();
        item
    }

    fn stored(entries: &[(&str, &[&str])]) -> HashMap<PlanningId, Vec<CoverageId>> {
        entries
            .iter()
            .map(|(id, coverages)| {
                (
                    PlanningId::new(*id),
                    coverages.iter().map(|c| CoverageId::new(*c)).collect(),
                )
            })
            .collect()
    }

    /// One new planning, one recurring planning with an added coverage, one
    /// untouched: only the first two need attention, in payload order.
    #[test]
    fn test_create_and_update_sets_from_one_payload() {
        let mut fresh = PlanningItem::new(PlanningId::new("tmp_1"));
        fresh.slugline = Some("vox pop".to_string());

        let updates = EventUpdates {
            associated_plannings: Some(vec![
                fresh,
                planning("plan_9", Some("PR1"), &["c1", "c2"]),
                planning("plan_5", Some("PR1"), &["c3"]),
            ]),
            ..Default::default()
        };
        let stored = stored(&[("plan_9", &["c1"]), ("plan_5", &["c3"])]);

        let to_create = get_recurring_planning_to_create(&updates);
        assert_eq!(to_create, vec![PlanningId::new("tmp_1")]);

        let to_update = get_recurring_planning_to_update(&updates, &stored);
        assert_eq!(to_update, vec![PlanningId::new("plan_9")]);
    }

    #[test]
    fn test_minted_temp_ids_are_detected() {
        let updates = EventUpdates {
            associated_plannings: Some(vec![PlanningItem::new(next_temp_planning_id())]),
            ..Default::default()
        };
        assert_eq!(get_recurring_planning_to_create(&updates).len(), 1);
    }

    #[test]
    fn test_non_recurring_planning_never_needs_update_prompt() {
        let updates = EventUpdates {
            associated_plannings: Some(vec![planning("plan_2", None, &["c1", "c2"])]),
            ..Default::default()
        };
        let stored = stored(&[("plan_2", &["c1"])]);
        assert!(get_recurring_planning_to_update(&updates, &stored).is_empty());
    }

    #[test]
    fn test_coverage_comparison_ignores_order() {
        let updates = EventUpdates {
            associated_plannings: Some(vec![planning("plan_9", Some("PR1"), &["c2", "c1"])]),
            ..Default::default()
        };
        let stored = stored(&[("plan_9", &["c1", "c2"])]);
        assert!(get_recurring_planning_to_update(&updates, &stored).is_empty());
    }

    #[test]
    fn test_removed_coverage_counts_as_change() {
        let updates = EventUpdates {
            associated_plannings: Some(vec![planning("plan_9", Some("PR1"), &["c1"])]),
            ..Default::default()
        };
        let stored = stored(&[("plan_9", &["c1", "c2"])]);
        assert_eq!(
            get_recurring_planning_to_update(&updates, &stored),
            vec![PlanningId::new("plan_9")]
        );
    }

    #[test]
    fn test_planning_unknown_to_the_session_counts_once_covered() {
        let covered = EventUpdates {
            associated_plannings: Some(vec![planning("plan_9", Some("PR1"), &["c1"])]),
            ..Default::default()
        };
        let empty_map = HashMap::new();
        assert_eq!(
            get_recurring_planning_to_update(&covered, &empty_map),
            vec![PlanningId::new("plan_9")]
        );

        let uncovered = EventUpdates {
            associated_plannings: Some(vec![planning("plan_9", Some("PR1"), &[])]),
            ..Default::default()
        };
        assert!(get_recurring_planning_to_update(&uncovered, &empty_map).is_empty());
    }

    #[test]
    fn test_event_was_updated_sees_field_changes() {
        let original = recurring_event();

        let renamed = EventUpdates {
            name: Some("Street carnival".to_string()),
            ..Default::default()
        };
        assert!(event_was_updated(&original, &renamed));

        let located = EventUpdates {
            location: Some(Location {
                name: "Old Town Square".to_string(),
                address: None,
                details: None,
            }),
            ..Default::default()
        };
        assert!(event_was_updated(&original, &located));
    }

    #[test]
    fn test_event_was_updated_ignores_unchanged_values() {
        let original = recurring_event();
        let same = EventUpdates {
            name: Some("Street festival".to_string()),
            slugline: Some("festival".to_string()),
            ..Default::default()
        };
        assert!(!event_was_updated(&original, &same));
    }

    /// Schedule and routing fields never trigger the event prompt on their
    /// own; only content fields do.
    #[test]
    fn test_event_was_updated_ignores_schedule_and_routing() {
        let original = recurring_event();
        let updates = EventUpdates {
            dates: Some(EventDates::default()),
            time_to_be_confirmed: Some(true),
            update_method: Some(UpdateMethod::All),
            associated_plannings: Some(vec![planning("plan_9", Some("PR1"), &["c1"])]),
            ..Default::default()
        };
        assert!(!event_was_updated(&original, &updates));
    }

    #[test]
    fn test_apply_update_methods_stamps_choices_and_defaults() {
        let mut updates = EventUpdates {
            associated_plannings: Some(vec![
                PlanningItem::new(PlanningId::new("tmp_1")),
                planning("plan_9", Some("PR1"), &["c1"]),
                planning("plan_2", None, &["c1"]),
            ]),
            ..Default::default()
        };
        let selections = HashMap::from([(PlanningId::new("plan_9"), UpdateMethod::Future)]);

        apply_update_methods(&mut updates, UpdateMethod::All, &selections);

        assert_eq!(updates.update_method, Some(UpdateMethod::All));
        let plannings = updates.associated_plannings.as_ref().unwrap();
        assert_eq!(plannings[0].update_method, Some(UpdateMethod::Single));
        assert_eq!(plannings[1].update_method, Some(UpdateMethod::Future));
        assert_eq!(plannings[2].update_method, None);
    }

    #[test]
    fn test_resolve_update_scope_combines_checks() {
        let original = recurring_event();
        let mut fresh = PlanningItem::new(PlanningId::new("tmp_1"));
        fresh.slugline = Some("vox pop".to_string());
        let updates = EventUpdates {
            name: Some("Street carnival".to_string()),
            associated_plannings: Some(vec![
                fresh,
                planning("plan_9", Some("PR1"), &["c1", "c2"]),
            ]),
            ..Default::default()
        };
        let stored = stored(&[("plan_9", &["c1"])]);

        let summary = resolve_update_scope(&original, &updates, &stored);
        assert!(summary.event_prompt_needed);
        assert_eq!(summary.planning_to_create, vec![PlanningId::new("tmp_1")]);
        assert_eq!(summary.planning_to_update, vec![PlanningId::new("plan_9")]);
    }

    /// A non-recurring event never needs the series prompt, whatever
    /// changed.
    #[test]
    fn test_plain_event_never_prompts() {
        let mut original = recurring_event();
        original.recurrence_id = None;
        let updates = EventUpdates {
            name: Some("Street carnival".to_string()),
            ..Default::default()
        };

        let summary = resolve_update_scope(&original, &updates, &HashMap::new());
        assert!(!summary.event_prompt_needed);
    }
}
