//! Assignment (solution) model.
//!
//! An assignment fills one role slot with a person or a group
//! placeholder. Manual assignments come from the host; automatic ones are
//! written by the engine and can be cleared and regenerated.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{PersonId, RoleRequirement, SlotKey};

/// Who fills a slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Assignee {
    /// A specific person.
    Person {
        /// Person id.
        id: PersonId,
        /// Display name at assignment time.
        name: String,
    },
    /// A group label standing in for an unresolved group member.
    Group(String),
}

impl Assignee {
    /// The person id, if a person is assigned.
    pub fn person_id(&self) -> Option<&str> {
        match self {
            Assignee::Person { id, .. } => Some(id),
            Assignee::Group(_) => None,
        }
    }
}

/// Origin of an assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AssignmentSource {
    /// Entered by hand; never cleared by the engine.
    #[default]
    Manual,
    /// Produced by an engine run.
    Auto,
}

/// A filled role slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    /// Slot being filled.
    pub slot: SlotKey,
    /// Event date (denormalized).
    pub date: NaiveDate,
    /// Liturgical-day label (denormalized).
    pub liturgical_day: String,
    /// Assignee.
    pub assignee: Assignee,
    /// Origin.
    #[serde(default)]
    pub source: AssignmentSource,
}

impl Assignment {
    /// Creates a manual assignment of a person to a requirement.
    pub fn manual(req: &RoleRequirement, id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(
            req,
            Assignee::Person {
                id: id.into(),
                name: name.into(),
            },
            AssignmentSource::Manual,
        )
    }

    /// Creates an assignment for a requirement.
    pub fn new(req: &RoleRequirement, assignee: Assignee, source: AssignmentSource) -> Self {
        Self {
            slot: req.key(),
            date: req.date,
            liturgical_day: req.liturgical_day.clone(),
            assignee,
            source,
        }
    }

    /// Assigned person id, if any.
    pub fn person_id(&self) -> Option<&str> {
        self.assignee.person_id()
    }

    /// Whether the engine produced this assignment.
    pub fn is_auto(&self) -> bool {
        self.source == AssignmentSource::Auto
    }
}

/// Final state of a role slot after a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SlotState {
    /// Already filled before the run.
    Prefilled(Assignee),
    /// Filled during the run.
    Assigned(Assignee),
    /// No eligible candidate.
    Unfilled,
}

/// Per-requirement result of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotOutcome {
    /// The slot.
    pub slot: SlotKey,
    /// Final state.
    pub state: SlotState,
    /// Winning score, for slots filled by scoring.
    pub score: Option<f64>,
    /// Number of eligible candidates considered.
    pub candidates: usize,
}

impl SlotOutcome {
    /// Whether the slot holds an assignee.
    pub fn is_filled(&self) -> bool {
        !matches!(self.state, SlotState::Unfilled)
    }

    /// The assignee, if any.
    pub fn assignee(&self) -> Option<&Assignee> {
        match &self.state {
            SlotState::Prefilled(a) | SlotState::Assigned(a) => Some(a),
            SlotState::Unfilled => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Event;

    fn requirement() -> RoleRequirement {
        Event::new("SUN-0900", NaiveDate::from_ymd_opt(2026, 2, 8).unwrap()).role("Usher 1", "Usher")
    }

    #[test]
    fn test_manual_assignment() {
        let a = Assignment::manual(&requirement(), "P1", "Ann");
        assert_eq!(
            a.slot,
            SlotKey::new("SUN-0900", NaiveDate::from_ymd_opt(2026, 2, 8).unwrap(), "Usher 1")
        );
        assert_eq!(a.person_id(), Some("P1"));
        assert!(!a.is_auto());
        assert_eq!(a.liturgical_day, "2026-02-08");
    }

    #[test]
    fn test_group_assignee_has_no_person() {
        let a = Assignment::new(
            &requirement(),
            Assignee::Group("Youth Choir".into()),
            AssignmentSource::Auto,
        );
        assert!(a.person_id().is_none());
        assert!(a.is_auto());
    }

    #[test]
    fn test_outcome_accessors() {
        let filled = SlotOutcome {
            slot: requirement().key(),
            state: SlotState::Assigned(Assignee::Group("G".into())),
            score: None,
            candidates: 0,
        };
        assert!(filled.is_filled());
        assert!(filled.assignee().is_some());

        let empty = SlotOutcome {
            state: SlotState::Unfilled,
            ..filled
        };
        assert!(!empty.is_filled());
        assert!(empty.assignee().is_none());
    }
}
