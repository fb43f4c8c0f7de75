//! In-run conflict state.
//!
//! Tracks which slots each person holds per liturgical day and where each
//! family is anchored, so the filter can enforce one role per liturgical
//! day and family cohesion.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::models::{Assignment, Person, SlotKey};

/// Assignment state relevant to hard constraints.
///
/// Events are compared by occurrence (event id and date): the same event id
/// on another date is a different occurrence.
#[derive(Debug, Clone, Default)]
pub struct ConflictTracker {
    /// (person, liturgical day) → slots held.
    held: HashMap<(String, String), Vec<SlotKey>>,
    /// (family, liturgical day) → slot of the first assigned member.
    anchors: HashMap<(String, String), SlotKey>,
    /// (family, event id, date) → members assigned.
    family_events: HashMap<(String, String, NaiveDate), u32>,
}

impl ConflictTracker {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a tracker seeded from existing person assignments.
    pub fn seeded<'a>(
        assignments: impl IntoIterator<Item = &'a Assignment>,
        roster: &[Person],
    ) -> Self {
        let families: HashMap<&str, &str> = roster
            .iter()
            .filter_map(|p| p.family_id.as_deref().map(|f| (p.id.as_str(), f)))
            .collect();

        let mut tracker = Self::new();
        for a in assignments {
            if let Some(person_id) = a.person_id() {
                let family = families.get(person_id).copied();
                tracker.mark(person_id, family, &a.slot, &a.liturgical_day);
            }
        }
        tracker
    }

    /// Records that a person holds a slot on a liturgical day.
    pub fn mark(
        &mut self,
        person_id: &str,
        family_id: Option<&str>,
        slot: &SlotKey,
        liturgical_day: &str,
    ) {
        self.held
            .entry((person_id.to_string(), liturgical_day.to_string()))
            .or_default()
            .push(slot.clone());

        if let Some(family) = family_id {
            self.anchors
                .entry((family.to_string(), liturgical_day.to_string()))
                .or_insert_with(|| slot.clone());
            *self
                .family_events
                .entry((family.to_string(), slot.event_id.clone(), slot.date))
                .or_insert(0) += 1;
        }
    }

    /// Slots a person holds on a liturgical day.
    pub fn held_on(&self, person_id: &str, liturgical_day: &str) -> &[SlotKey] {
        self.held
            .get(&(person_id.to_string(), liturgical_day.to_string()))
            .map_or(&[], Vec::as_slice)
    }

    /// Whether the person already holds a role at the slot's occurrence.
    pub fn holds_event(&self, person_id: &str, slot: &SlotKey, liturgical_day: &str) -> bool {
        self.held_on(person_id, liturgical_day)
            .iter()
            .any(|s| s.same_occurrence(slot))
    }

    /// Whether the person holds a role at another occurrence on this liturgical day.
    pub fn holds_other_event(&self, person_id: &str, slot: &SlotKey, liturgical_day: &str) -> bool {
        self.held_on(person_id, liturgical_day)
            .iter()
            .any(|s| !s.same_occurrence(slot))
    }

    /// Slot of the first family member assigned on a liturgical day.
    pub fn family_anchor(&self, family_id: &str, liturgical_day: &str) -> Option<&SlotKey> {
        self.anchors
            .get(&(family_id.to_string(), liturgical_day.to_string()))
    }

    /// Number of family members assigned at one occurrence.
    pub fn family_members_at(&self, family_id: &str, event_id: &str, date: NaiveDate) -> u32 {
        self.family_events
            .get(&(family_id.to_string(), event_id.to_string(), date))
            .copied()
            .unwrap_or(0)
    }
}
