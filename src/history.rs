//! Running assignment counts per person.
//!
//! Seeded from assignments that exist before the run (so fairness carries
//! over between runs of the same period) and bumped after every automatic
//! assignment.

use std::collections::HashMap;

use crate::models::Assignment;

/// Counts for one person.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersonHistory {
    /// Total assignments.
    pub total: u32,
    /// Assignments per event id.
    pub by_event: HashMap<String, u32>,
}

/// Assignment counters for all people in a run.
#[derive(Debug, Clone, Default)]
pub struct HistoryCounters {
    people: HashMap<String, PersonHistory>,
}

impl HistoryCounters {
    /// Creates empty counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates counters seeded from existing person assignments.
    ///
    /// Group placeholders are not counted.
    pub fn seeded<'a>(assignments: impl IntoIterator<Item = &'a Assignment>) -> Self {
        let mut counters = Self::new();
        for a in assignments {
            if let Some(person_id) = a.person_id() {
                counters.record(person_id, &a.slot.event_id);
            }
        }
        counters
    }

    /// Records one assignment.
    pub fn record(&mut self, person_id: &str, event_id: &str) {
        let entry = self.people.entry(person_id.to_string()).or_default();
        entry.total += 1;
        *entry.by_event.entry(event_id.to_string()).or_insert(0) += 1;
    }

    /// Total assignments for a person.
    pub fn total(&self, person_id: &str) -> u32 {
        self.people.get(person_id).map_or(0, |h| h.total)
    }

    /// Assignments of a person to one event id.
    pub fn for_event(&self, person_id: &str, event_id: &str) -> u32 {
        self.people
            .get(person_id)
            .and_then(|h| h.by_event.get(event_id))
            .copied()
            .unwrap_or(0)
    }

    /// Full history of a person.
    pub fn get(&self, person_id: &str) -> Option<&PersonHistory> {
        self.people.get(person_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Assignee, AssignmentSource, Event};
    use chrono::NaiveDate;

    #[test]
    fn test_record_and_query() {
        let mut h = HistoryCounters::new();
        h.record("P1", "SUN-0900");
        h.record("P1", "SUN-0900");
        h.record("P1", "SAT-1700");

        assert_eq!(h.total("P1"), 3);
        assert_eq!(h.for_event("P1", "SUN-0900"), 2);
        assert_eq!(h.for_event("P1", "SAT-1700"), 1);
        assert_eq!(h.for_event("P1", "SUN-1100"), 0);
        assert_eq!(h.total("P2"), 0);
        assert!(h.get("P2").is_none());
    }

    #[test]
    fn test_seeded_skips_groups() {
        let event = Event::new("SUN-0900", NaiveDate::from_ymd_opt(2026, 2, 1).unwrap());
        let existing = vec![
            Assignment::manual(&event.role("Lector 1", "Lector"), "P1", "Ann"),
            Assignment::new(
                &event.role("Choir", "Music"),
                Assignee::Group("Youth Choir".into()),
                AssignmentSource::Auto,
            ),
        ];
        let h = HistoryCounters::seeded(&existing);
        assert_eq!(h.total("P1"), 1);
        assert_eq!(h.for_event("P1", "SUN-0900"), 1);
        assert_eq!(h.total("Youth Choir"), 0);
    }
}
