//! Event and role requirement models.
//!
//! An event is one occurrence (e.g. the Saturday vigil on 2026-02-07)
//! identified by a stable event-time id ("SAT-1700") and its date. The id
//! recurs every week; preferences and rotation refer to it, while one
//! occurrence is the pair (id, date). Several events share a liturgical-day
//! label when they count as one day for conflict purposes. A role
//! requirement is one named duty at one occurrence that needs exactly one
//! assignee.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::Tag;

/// Stable event-time identifier, recurring across dates.
pub type EventId = String;

/// A scheduled occurrence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Stable slot identifier (e.g. "SUN-0900").
    pub id: EventId,
    /// Calendar date.
    pub date: NaiveDate,
    /// Start time, used only to order events on the same date.
    #[serde(default)]
    pub time: Option<NaiveTime>,
    /// Liturgical-day label grouping a vigil with the following day.
    pub liturgical_day: String,
    /// Pre-declared group that serves this event.
    #[serde(default)]
    pub group: Option<String>,
}

impl Event {
    /// Creates an event whose liturgical day is its own date.
    pub fn new(id: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: id.into(),
            date,
            time: None,
            liturgical_day: date.to_string(),
            group: None,
        }
    }

    /// Sets the start time.
    pub fn with_time(mut self, time: NaiveTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Sets the liturgical-day label.
    pub fn with_liturgical_day(mut self, label: impl Into<String>) -> Self {
        self.liturgical_day = label.into();
        self
    }

    /// Sets the pre-declared group.
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Creates a role requirement at this event.
    pub fn role(&self, role: impl Into<String>, skill: impl Into<Tag>) -> RoleRequirement {
        RoleRequirement {
            event_id: self.id.clone(),
            date: self.date,
            time: self.time,
            liturgical_day: self.liturgical_day.clone(),
            role: role.into(),
            skill: skill.into(),
            group: self.group.clone(),
        }
    }
}

/// One duty at one event (denormalized with its event data).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleRequirement {
    /// Event id.
    pub event_id: EventId,
    /// Event date.
    pub date: NaiveDate,
    /// Event start time.
    #[serde(default)]
    pub time: Option<NaiveTime>,
    /// Liturgical-day label.
    pub liturgical_day: String,
    /// Role name as displayed (e.g. "Lector 1").
    pub role: String,
    /// Required skill tag.
    pub skill: Tag,
    /// Pre-declared group for the event.
    #[serde(default)]
    pub group: Option<String>,
}

/// Identifies a role slot: (event id, date, role name).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SlotKey {
    /// Event id.
    pub event_id: EventId,
    /// Occurrence date.
    pub date: NaiveDate,
    /// Role name.
    pub role: String,
}

impl SlotKey {
    /// Creates a slot key.
    pub fn new(event_id: impl Into<String>, date: NaiveDate, role: impl Into<String>) -> Self {
        Self {
            event_id: event_id.into(),
            date,
            role: role.into(),
        }
    }

    /// Whether both slots belong to the same event occurrence.
    pub fn same_occurrence(&self, other: &SlotKey) -> bool {
        self.date == other.date && self.event_id == other.event_id
    }
}

impl std::fmt::Display for SlotKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}/{}", self.event_id, self.date, self.role)
    }
}

impl RoleRequirement {
    /// The slot key of this requirement.
    pub fn key(&self) -> SlotKey {
        SlotKey::new(&self.event_id, self.date, &self.role)
    }

    /// Chronological sort key for the owning event.
    pub fn chrono_key(&self) -> (NaiveDate, Option<NaiveTime>) {
        (self.date, self.time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_event_role_copies_event_fields() {
        let vigil = Event::new("SAT-1700", date(2026, 2, 7))
            .with_time(NaiveTime::from_hms_opt(17, 0, 0).unwrap())
            .with_liturgical_day("2026-02-08")
            .with_group("Youth Choir");
        let req = vigil.role("Lector 1", "Lector");

        assert_eq!(req.event_id, "SAT-1700");
        assert_eq!(req.liturgical_day, "2026-02-08");
        assert_eq!(req.skill, Tag::new("lector"));
        assert_eq!(req.group.as_deref(), Some("Youth Choir"));
        assert_eq!(req.key(), SlotKey::new("SAT-1700", date(2026, 2, 7), "Lector 1"));
    }

    #[test]
    fn test_default_liturgical_day_is_date() {
        let e = Event::new("SUN-0900", date(2026, 2, 8));
        assert_eq!(e.liturgical_day, "2026-02-08");
    }

    #[test]
    fn test_recurring_event_has_distinct_slots() {
        let first = Event::new("SUN-0900", date(2026, 2, 8)).role("Usher", "Usher");
        let second = Event::new("SUN-0900", date(2026, 2, 15)).role("Usher", "Usher");
        assert_ne!(first.key(), second.key());
        assert!(!first.key().same_occurrence(&second.key()));
        assert_eq!(first.key().to_string(), "SUN-0900@2026-02-08/Usher");

        let other_role = Event::new("SUN-0900", date(2026, 2, 8)).role("Lector 1", "Lector");
        assert!(first.key().same_occurrence(&other_role.key()));
    }

    #[test]
    fn test_chrono_key_orders_time_within_date() {
        let d = date(2026, 2, 8);
        let early = Event::new("A", d).with_time(NaiveTime::from_hms_opt(8, 0, 0).unwrap());
        let late = Event::new("B", d).with_time(NaiveTime::from_hms_opt(11, 0, 0).unwrap());
        assert!(early.role("r", "s").chrono_key() < late.role("r", "s").chrono_key());
    }
}
