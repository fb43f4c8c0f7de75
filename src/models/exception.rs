//! Availability exception records.
//!
//! People declare dates they cannot serve (`Exclude`), dates they can
//! exclusively serve (`OnlyAvailable`), or dates on which they serve
//! regardless of other exceptions (`Override`). Only approved records
//! take effect.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::PersonId;

/// An inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    /// First day (inclusive).
    pub start: NaiveDate,
    /// Last day (inclusive).
    pub end: NaiveDate,
}

impl Period {
    /// Creates a period.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// A period of a single day.
    pub fn day(date: NaiveDate) -> Self {
        Self::new(date, date)
    }

    /// Whether start <= end.
    pub fn is_valid(&self) -> bool {
        self.start <= self.end
    }

    /// Whether a date falls within the period.
    #[inline]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Whether two periods share at least one day.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

/// Exception type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExceptionKind {
    /// Blacklist: never assigned on the listed dates.
    Exclude,
    /// Whitelist: only assigned on the listed dates within the validity.
    OnlyAvailable,
    /// Available on the listed dates regardless of other exceptions.
    Override,
}

/// Approval state of an exception.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ApprovalState {
    /// Awaiting review.
    #[default]
    Pending,
    /// Effective.
    Approved,
    /// Ignored.
    Rejected,
}

/// A single availability exception.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityException {
    /// Person the exception applies to.
    pub person_id: PersonId,
    /// Exception type.
    pub kind: ExceptionKind,
    /// Dates covered.
    pub dates: BTreeSet<NaiveDate>,
    /// Event ids the dates are scoped to. Empty = whole dates.
    #[serde(default)]
    pub event_ids: BTreeSet<String>,
    /// Period during which the exception is valid.
    pub validity: Period,
    /// Approval state.
    #[serde(default)]
    pub approval: ApprovalState,
}

impl AvailabilityException {
    /// Creates an approved exception over the given validity period.
    pub fn new(person_id: impl Into<String>, kind: ExceptionKind, validity: Period) -> Self {
        Self {
            person_id: person_id.into(),
            kind,
            dates: BTreeSet::new(),
            event_ids: BTreeSet::new(),
            validity,
            approval: ApprovalState::Approved,
        }
    }

    /// Approved blacklist.
    pub fn exclude(person_id: impl Into<String>, validity: Period) -> Self {
        Self::new(person_id, ExceptionKind::Exclude, validity)
    }

    /// Approved whitelist.
    pub fn only_available(person_id: impl Into<String>, validity: Period) -> Self {
        Self::new(person_id, ExceptionKind::OnlyAvailable, validity)
    }

    /// Approved override.
    pub fn override_on(person_id: impl Into<String>, validity: Period) -> Self {
        Self::new(person_id, ExceptionKind::Override, validity)
    }

    /// Adds a date.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.dates.insert(date);
        self
    }

    /// Scopes the dates to an event id.
    pub fn with_event(mut self, event_id: impl Into<String>) -> Self {
        self.event_ids.insert(event_id.into());
        self
    }

    /// Sets the approval state.
    pub fn with_approval(mut self, approval: ApprovalState) -> Self {
        self.approval = approval;
        self
    }

    /// Whether the exception takes effect.
    pub fn is_approved(&self) -> bool {
        self.approval == ApprovalState::Approved
    }

    /// Whether the exception covers the date and event.
    pub fn matches(&self, date: NaiveDate, event_id: &str) -> bool {
        self.dates.contains(&date) && (self.event_ids.is_empty() || self.event_ids.contains(event_id))
    }
}
