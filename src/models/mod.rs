//! Rostering domain models.
//!
//! Plain data records supplied by the host's data layer and the
//! assignments written back to it.
//!
//! # Domain Mappings
//!
//! | u-roster | Parish | Sports club | Food bank |
//! |----------|--------|-------------|-----------|
//! | Person | Volunteer minister | Coach/Referee | Volunteer |
//! | Event | Mass time | Fixture | Shift |
//! | RoleRequirement | Lector 1 at Sunday 9:00 | Referee at match | Driver on Tuesday route |
//! | Liturgical day | Vigil + Sunday | Match day | Shift day |

mod assignment;
mod event;
mod exception;
mod person;
mod tag;

pub use assignment::{Assignee, Assignment, AssignmentSource, SlotOutcome, SlotState};
pub use event::{Event, EventId, RoleRequirement, SlotKey};
pub use exception::{ApprovalState, AvailabilityException, ExceptionKind, Period};
pub use person::{Person, PersonId, PersonStatus};
pub use tag::Tag;
