//! Hard-constraint filter for one role slot.
//!
//! # Checks (cheapest first)
//! 1. Status (individual status, or group status + membership)
//! 2. Skill qualification
//! 3. Event-time preference
//! 4. Availability
//! 5. Same-event duplicate
//! 6. Same-liturgical-day conflict
//! 7. Family cohesion
//!
//! An empty candidate list is a normal outcome: the slot stays unfilled.

use std::fmt;

use crate::availability::{AvailabilityIndex, AvailabilityStatus};
use crate::config::EngineConfig;
use crate::models::{Person, PersonStatus, RoleRequirement, Tag};

use super::{ConflictTracker, QualificationIndex};

/// Why a person was filtered out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// Status not eligible in this mode.
    Status(PersonStatus),
    /// Not a member of the event's group.
    NotGroupMember,
    /// Lacks the required skill.
    Unqualified,
    /// Event not among the preferred events.
    TimePreference,
    /// Blocked by an availability exception.
    Unavailable(AvailabilityStatus),
    /// Already holds another role at this event.
    SameEvent,
    /// Already serves at another event on this liturgical day.
    SameLiturgicalDay,
    /// Family already anchored at another event on this liturgical day.
    FamilyCohesion {
        /// Event the family is anchored at.
        anchor: String,
    },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::Status(s) => write!(f, "status {s:?} not eligible"),
            Rejection::NotGroupMember => f.write_str("not a group member"),
            Rejection::Unqualified => f.write_str("missing required skill"),
            Rejection::TimePreference => f.write_str("event not preferred"),
            Rejection::Unavailable(s) => write!(f, "unavailable ({s:?})"),
            Rejection::SameEvent => f.write_str("already serving at this event"),
            Rejection::SameLiturgicalDay => f.write_str("already serving this liturgical day"),
            Rejection::FamilyCohesion { anchor } => write!(f, "family anchored at {anchor}"),
        }
    }
}

/// Which pool a slot is filled from.
#[derive(Debug, Clone, Copy)]
pub enum FilterMode<'g> {
    /// Individual assignment.
    Individual,
    /// Resolving an event's pre-declared group to one of its members.
    Group(&'g Tag),
}

/// Computes eligible candidates for role slots.
#[derive(Debug, Clone, Copy)]
pub struct EligibilityFilter<'a> {
    qualifications: &'a QualificationIndex,
    availability: &'a AvailabilityIndex,
    individual_status: PersonStatus,
    group_statuses: &'a [PersonStatus],
}

impl<'a> EligibilityFilter<'a> {
    /// Creates a filter over precomputed indexes.
    pub fn new(
        qualifications: &'a QualificationIndex,
        availability: &'a AvailabilityIndex,
        config: &'a EngineConfig,
    ) -> Self {
        Self {
            qualifications,
            availability,
            individual_status: config.individual_status,
            group_statuses: &config.group_statuses,
        }
    }

    /// Runs every check for one person.
    pub fn check(
        &self,
        person: &Person,
        req: &RoleRequirement,
        conflicts: &ConflictTracker,
        mode: FilterMode<'_>,
    ) -> Result<(), Rejection> {
        match mode {
            FilterMode::Individual => {
                if person.status != self.individual_status {
                    return Err(Rejection::Status(person.status));
                }
                if !self.qualifications.is_qualified(&person.id, &req.skill) {
                    return Err(Rejection::Unqualified);
                }
                if !person.accepts_event(&req.event_id) {
                    return Err(Rejection::TimePreference);
                }
            }
            FilterMode::Group(group) => {
                if !self.group_statuses.contains(&person.status) {
                    return Err(Rejection::Status(person.status));
                }
                if !person.is_member_of(group) {
                    return Err(Rejection::NotGroupMember);
                }
            }
        }

        let status = self.availability.status(&person.id, req.date, &req.event_id);
        if !status.is_available() {
            return Err(Rejection::Unavailable(status));
        }

        let slot = req.key();
        if conflicts.holds_event(&person.id, &slot, &req.liturgical_day) {
            return Err(Rejection::SameEvent);
        }
        if conflicts.holds_other_event(&person.id, &slot, &req.liturgical_day) {
            return Err(Rejection::SameLiturgicalDay);
        }

        if let Some(family) = &person.family_id {
            if let Some(anchor) = conflicts.family_anchor(family, &req.liturgical_day) {
                if !anchor.same_occurrence(&slot) {
                    return Err(Rejection::FamilyCohesion {
                        anchor: anchor.event_id.clone(),
                    });
                }
            }
        }

        Ok(())
    }

    /// Eligible individuals for a slot, in roster order.
    pub fn candidates<'p>(
        &self,
        roster: &'p [Person],
        req: &RoleRequirement,
        conflicts: &ConflictTracker,
    ) -> Vec<&'p Person> {
        self.select(roster, req, conflicts, FilterMode::Individual)
    }

    /// Eligible members of a group for a slot, in roster order.
    pub fn group_candidates<'p>(
        &self,
        roster: &'p [Person],
        req: &RoleRequirement,
        group: &Tag,
        conflicts: &ConflictTracker,
    ) -> Vec<&'p Person> {
        self.select(roster, req, conflicts, FilterMode::Group(group))
    }

    fn select<'p>(
        &self,
        roster: &'p [Person],
        req: &RoleRequirement,
        conflicts: &ConflictTracker,
        mode: FilterMode<'_>,
    ) -> Vec<&'p Person> {
        roster
            .iter()
            .filter(|p| self.check(p, req, conflicts, mode).is_ok())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MinistryEntry;
    use crate::eligibility::SkillCatalog;
    use crate::models::{AvailabilityException, Event, Period, SlotKey};
    use chrono::NaiveDate;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, d).unwrap()
    }

    struct Fixture {
        config: EngineConfig,
        roster: Vec<Person>,
        qualifications: QualificationIndex,
        availability: AvailabilityIndex,
    }

    impl Fixture {
        fn new(roster: Vec<Person>, exceptions: Vec<AvailabilityException>) -> Self {
            let config = EngineConfig::new(vec![
                MinistryEntry::new("Lector 1", "Lector"),
                MinistryEntry::new("Usher", "Hospitality"),
            ]);
            let catalog = SkillCatalog::from_registry(&config.registry);
            let qualifications = QualificationIndex::build(&roster, &catalog);
            let availability =
                AvailabilityIndex::build(&Period::new(date(1), date(28)), &exceptions);
            Self {
                config,
                roster,
                qualifications,
                availability,
            }
        }

        fn filter(&self) -> EligibilityFilter<'_> {
            EligibilityFilter::new(&self.qualifications, &self.availability, &self.config)
        }

        fn check(&self, idx: usize, req: &RoleRequirement, t: &ConflictTracker) -> Result<(), Rejection> {
            self.filter()
                .check(&self.roster[idx], req, t, FilterMode::Individual)
        }
    }

    fn lector_at(event: &Event) -> RoleRequirement {
        event.role("Lector 1", "Lector 1")
    }

    #[test]
    fn test_status_must_be_active() {
        let f = Fixture::new(
            vec![
                Person::new("P1", "Ann").with_qualification("Lector"),
                Person::new("P2", "Bo")
                    .with_qualification("Lector")
                    .with_status(PersonStatus::SubstituteOnly),
            ],
            vec![],
        );
        let req = lector_at(&Event::new("E1", date(8)));
        let t = ConflictTracker::new();
        assert!(f.check(0, &req, &t).is_ok());
        assert_eq!(
            f.check(1, &req, &t),
            Err(Rejection::Status(PersonStatus::SubstituteOnly))
        );
    }

    #[test]
    fn test_skill_and_time_preference() {
        let f = Fixture::new(
            vec![
                Person::new("P1", "Ann").with_qualification("Usher"),
                Person::new("P2", "Bo")
                    .with_qualification("Lector")
                    .with_preferred_event("E2"),
            ],
            vec![],
        );
        let req = lector_at(&Event::new("E1", date(8)));
        let t = ConflictTracker::new();
        assert_eq!(f.check(0, &req, &t), Err(Rejection::Unqualified));
        assert_eq!(f.check(1, &req, &t), Err(Rejection::TimePreference));
        assert!(f.filter().candidates(&f.roster, &req, &t).is_empty());
    }

    #[test]
    fn test_whitelist_excludes_other_dates() {
        let f = Fixture::new(
            vec![Person::new("P", "Pat").with_qualification("Lector")],
            vec![AvailabilityException::only_available("P", Period::new(date(1), date(28)))
                .with_date(date(8))],
        );
        let t = ConflictTracker::new();
        let on_8th = lector_at(&Event::new("E1", date(8)));
        let on_15th = lector_at(&Event::new("E2", date(15)));
        assert!(f.check(0, &on_8th, &t).is_ok());
        assert_eq!(
            f.check(0, &on_15th, &t),
            Err(Rejection::Unavailable(AvailabilityStatus::OutsideWhitelist))
        );
    }

    #[test]
    fn test_same_event_and_same_day() {
        let f = Fixture::new(
            vec![Person::new("P1", "Ann")
                .with_qualification("Lector")
                .with_qualification("Usher")],
            vec![],
        );
        let vigil = Event::new("SAT-1700", date(7)).with_liturgical_day("2026-02-08");
        let sunday = Event::new("SUN-0900", date(8));
        let mut t = ConflictTracker::new();
        t.mark("P1", None, &SlotKey::new("SAT-1700", date(7), "Usher"), "2026-02-08");

        assert_eq!(f.check(0, &lector_at(&vigil), &t), Err(Rejection::SameEvent));
        assert_eq!(
            f.check(0, &lector_at(&sunday), &t),
            Err(Rejection::SameLiturgicalDay)
        );
        let next_week = Event::new("SUN-0900", date(15));
        assert!(f.check(0, &lector_at(&next_week), &t).is_ok());
    }

    #[test]
    fn test_family_cohesion_restricts_to_anchor() {
        let f = Fixture::new(
            vec![
                Person::new("A", "Al Smith").with_qualification("Usher").with_family("smith"),
                Person::new("B", "Bea Smith").with_qualification("Lector").with_family("smith"),
            ],
            vec![],
        );
        let e1 = Event::new("E1", date(8));
        let e3 = Event::new("E3", date(8));
        let mut t = ConflictTracker::new();

        // No member assigned yet: both events open
        assert!(f.check(1, &lector_at(&e1), &t).is_ok());
        assert!(f.check(1, &lector_at(&e3), &t).is_ok());

        t.mark("A", Some("smith"), &SlotKey::new("E1", date(8), "Usher"), "2026-02-08");
        assert!(f.check(1, &lector_at(&e1), &t).is_ok());
        assert_eq!(
            f.check(1, &lector_at(&e3), &t),
            Err(Rejection::FamilyCohesion {
                anchor: "E1".into()
            })
        );
    }

    #[test]
    fn test_group_mode() {
        let f = Fixture::new(
            vec![
                Person::new("P1", "Ann")
                    .with_status(PersonStatus::GroupSponsor)
                    .with_group("Youth Choir"),
                Person::new("P2", "Bo").with_group("Knights"),
                Person::new("P3", "Cy")
                    .with_status(PersonStatus::Inactive)
                    .with_group("Youth Choir"),
            ],
            vec![],
        );
        let req = Event::new("E1", date(8))
            .with_group("Youth Choir")
            .role("Usher", "Usher");
        let group = Tag::new("youth choir");
        let t = ConflictTracker::new();

        let found = f.filter().group_candidates(&f.roster, &req, &group, &t);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "P1");
        assert_eq!(
            f.filter()
                .check(&f.roster[1], &req, &t, FilterMode::Group(&group)),
            Err(Rejection::NotGroupMember)
        );
    }

    #[test]
    fn test_rejection_display() {
        let r = Rejection::FamilyCohesion {
            anchor: "E1".into(),
        };
        assert_eq!(r.to_string(), "family anchored at E1");
    }
}
