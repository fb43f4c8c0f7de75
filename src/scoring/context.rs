//! Scoring context for one role slot.

use chrono::NaiveDate;

use crate::availability::AvailabilityIndex;
use crate::eligibility::ConflictTracker;
use crate::history::HistoryCounters;
use crate::models::{RoleRequirement, Tag};

/// Run state visible to scoring rules while a slot is being filled.
#[derive(Debug, Clone, Copy)]
pub struct ScoringContext<'a> {
    /// Slot being filled.
    pub requirement: &'a RoleRequirement,
    /// Normalized role name of the slot.
    pub role: &'a Tag,
    /// Assignment counts so far.
    pub history: &'a HistoryCounters,
    /// Assignments made so far (family placement).
    pub conflicts: &'a ConflictTracker,
    /// Availability windows (whitelist detection).
    pub availability: &'a AvailabilityIndex,
}

impl<'a> ScoringContext<'a> {
    /// Creates a context.
    pub fn new(
        requirement: &'a RoleRequirement,
        role: &'a Tag,
        history: &'a HistoryCounters,
        conflicts: &'a ConflictTracker,
        availability: &'a AvailabilityIndex,
    ) -> Self {
        Self {
            requirement,
            role,
            history,
            conflicts,
            availability,
        }
    }

    /// Event id of the slot.
    pub fn event_id(&self) -> &'a str {
        &self.requirement.event_id
    }

    /// Date of the slot.
    pub fn date(&self) -> NaiveDate {
        self.requirement.date
    }
}
