//! Person (volunteer) model.
//!
//! People are the resources assigned to role slots. Each carries a
//! lifecycle status, qualification tags, optional time and role
//! preferences, an optional family id and group memberships.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::Tag;

/// Stable person identifier.
pub type PersonId = String;

/// A volunteer on the roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    /// Unique person identifier.
    pub id: PersonId,
    /// Display name.
    pub name: String,
    /// Lifecycle status.
    pub status: PersonStatus,
    /// Qualification tags (skills or ministry categories).
    #[serde(default)]
    pub qualifications: BTreeSet<Tag>,
    /// Preferred event ids. Empty = flexible.
    #[serde(default)]
    pub preferred_events: BTreeSet<String>,
    /// Preferred role tags. Empty = flexible.
    #[serde(default)]
    pub preferred_roles: BTreeSet<Tag>,
    /// Family group; members serve together on a liturgical day.
    #[serde(default)]
    pub family_id: Option<String>,
    /// Ministry groups this person belongs to (matched against an
    /// event's pre-declared group).
    #[serde(default)]
    pub groups: BTreeSet<Tag>,
}

/// Lifecycle status of a person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PersonStatus {
    /// Takes part in automatic individual assignment.
    Active,
    /// Not scheduled.
    Inactive,
    /// Filled in by hand only.
    SubstituteOnly,
    /// Scheduled only through the group the person sponsors.
    GroupSponsor,
    /// Accompanies a minor; never scheduled on their own.
    Guardian,
}

impl Person {
    /// Creates an active person with no qualifications or preferences.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            status: PersonStatus::Active,
            qualifications: BTreeSet::new(),
            preferred_events: BTreeSet::new(),
            preferred_roles: BTreeSet::new(),
            family_id: None,
            groups: BTreeSet::new(),
        }
    }

    /// Sets the status.
    pub fn with_status(mut self, status: PersonStatus) -> Self {
        self.status = status;
        self
    }

    /// Adds a qualification.
    pub fn with_qualification(mut self, tag: impl Into<Tag>) -> Self {
        self.qualifications.insert(tag.into());
        self
    }

    /// Adds a preferred event id.
    pub fn with_preferred_event(mut self, event_id: impl Into<String>) -> Self {
        self.preferred_events.insert(event_id.into());
        self
    }

    /// Adds a preferred role.
    pub fn with_preferred_role(mut self, role: impl Into<Tag>) -> Self {
        self.preferred_roles.insert(role.into());
        self
    }

    /// Sets the family group.
    pub fn with_family(mut self, family_id: impl Into<String>) -> Self {
        self.family_id = Some(family_id.into());
        self
    }

    /// Adds a group membership.
    pub fn with_group(mut self, group: impl Into<Tag>) -> Self {
        self.groups.insert(group.into());
        self
    }

    /// Whether no event-time preference is declared.
    pub fn is_time_flexible(&self) -> bool {
        self.preferred_events.is_empty()
    }

    /// Whether the person accepts the given event.
    pub fn accepts_event(&self, event_id: &str) -> bool {
        self.is_time_flexible() || self.preferred_events.contains(event_id)
    }

    /// Whether the role is among the preferred roles.
    pub fn prefers_role(&self, role: &Tag) -> bool {
        self.preferred_roles.contains(role)
    }

    /// Whether the person belongs to the group.
    pub fn is_member_of(&self, group: &Tag) -> bool {
        self.groups.contains(group)
    }
}
