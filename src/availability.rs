//! Availability index built from approved exceptions.
//!
//! # Precedence
//! For a person, date and event:
//! 1. An override covering the date/event makes the person available.
//! 2. Otherwise a blacklist covering the date/event excludes them.
//! 3. Otherwise, if any whitelist is valid on that date, one of them must
//!    cover the date/event (logical OR across overlapping whitelists).
//! 4. Otherwise the person is available.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::models::{AvailabilityException, ExceptionKind, Period};

/// Why a person is or is not available on a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvailabilityStatus {
    /// No exception applies.
    Open,
    /// Covered by an override.
    Overridden,
    /// Covered by a whitelist.
    Whitelisted,
    /// Covered by a blacklist.
    Excluded,
    /// A whitelist is valid on the date but none covers it.
    OutsideWhitelist,
}

impl AvailabilityStatus {
    /// Whether the person may be assigned.
    pub fn is_available(self) -> bool {
        matches!(self, Self::Open | Self::Overridden | Self::Whitelisted)
    }
}

#[derive(Debug, Clone, Default)]
struct PersonExceptions {
    overrides: Vec<AvailabilityException>,
    excludes: Vec<AvailabilityException>,
    whitelists: Vec<AvailabilityException>,
}

/// Per-person availability windows for one run period.
#[derive(Debug, Clone, Default)]
pub struct AvailabilityIndex {
    people: HashMap<String, PersonExceptions>,
}

impl AvailabilityIndex {
    /// Builds the index from the approved exceptions overlapping the period.
    pub fn build<'a>(
        period: &Period,
        exceptions: impl IntoIterator<Item = &'a AvailabilityException>,
    ) -> Self {
        let mut people: HashMap<String, PersonExceptions> = HashMap::new();
        for e in exceptions {
            if !e.is_approved() || !e.validity.overlaps(period) {
                continue;
            }
            let entry = people.entry(e.person_id.clone()).or_default();
            match e.kind {
                ExceptionKind::Override => entry.overrides.push(e.clone()),
                ExceptionKind::Exclude => entry.excludes.push(e.clone()),
                ExceptionKind::OnlyAvailable => entry.whitelists.push(e.clone()),
            }
        }
        Self { people }
    }

    /// Availability status of a person for an event on a date.
    pub fn status(&self, person_id: &str, date: NaiveDate, event_id: &str) -> AvailabilityStatus {
        let Some(windows) = self.people.get(person_id) else {
            return AvailabilityStatus::Open;
        };

        if windows.overrides.iter().any(|e| e.matches(date, event_id)) {
            return AvailabilityStatus::Overridden;
        }
        if windows.excludes.iter().any(|e| e.matches(date, event_id)) {
            return AvailabilityStatus::Excluded;
        }

        let mut active = windows
            .whitelists
            .iter()
            .filter(|e| e.validity.contains(date))
            .peekable();
        if active.peek().is_none() {
            return AvailabilityStatus::Open;
        }
        if active.any(|e| e.matches(date, event_id)) {
            AvailabilityStatus::Whitelisted
        } else {
            AvailabilityStatus::OutsideWhitelist
        }
    }

    /// Whether a person may be assigned to an event on a date.
    pub fn is_available(&self, person_id: &str, date: NaiveDate, event_id: &str) -> bool {
        self.status(person_id, date, event_id).is_available()
    }

    /// Whether the person has a whitelist whose validity covers the date.
    pub fn has_whitelist(&self, person_id: &str, date: NaiveDate) -> bool {
        self.people
            .get(person_id)
            .is_some_and(|w| w.whitelists.iter().any(|e| e.validity.contains(date)))
    }
}
