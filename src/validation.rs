//! Input validation for rostering runs.
//!
//! Checks structural integrity of the period, roster, role requirements,
//! availability exceptions and pre-existing assignments before anything
//! is assigned. Detects:
//! - Inverted period boundaries
//! - Duplicate person ids and duplicate role slots
//! - Role requirements outside the period or with unknown skills
//! - Event occurrences (id and date) with conflicting time, liturgical day
//!   or group
//! - Malformed availability exceptions
//!
//! All problems are collected; a run with any of them is aborted.

use std::collections::{HashMap, HashSet};
use std::fmt;

use chrono::{NaiveDate, NaiveTime};

use crate::eligibility::SkillCatalog;
use crate::models::{AvailabilityException, Period, Person, RoleRequirement};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Period start is after its end.
    InvalidPeriod,
    /// Two people or two role slots share the same id.
    DuplicateId,
    /// A required field is empty.
    MissingField,
    /// A role requirement falls outside the run period.
    OutsidePeriod,
    /// A role requires a skill absent from the registry.
    UnknownSkill,
    /// One event occurrence carries different times, liturgical days or groups.
    InconsistentEvent,
    /// An availability exception is malformed.
    MalformedException,
}

impl ValidationError {
    /// Creates a validation error.
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

/// Validates the input of a rostering run.
///
/// Checks:
/// 1. The period is not inverted
/// 2. No duplicate or empty person ids
/// 3. No duplicate role slots, no empty event ids or role names
/// 4. Every requirement lies within the period
/// 5. Every required skill is registered
/// 6. Each event occurrence (id and date) has a single time, liturgical
///    day and group; the same id recurring on other dates is allowed
/// 7. Approved availability exceptions are well-formed
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(
    period: &Period,
    roster: &[Person],
    requirements: &[RoleRequirement],
    exceptions: &[AvailabilityException],
    catalog: &SkillCatalog,
) -> ValidationResult {
    let mut errors = Vec::new();

    if !period.is_valid() {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidPeriod,
            format!("Period starts {} after it ends {}", period.start, period.end),
        ));
    }

    let mut person_ids = HashSet::new();
    for p in roster {
        if p.id.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::MissingField,
                format!("Person '{}' has an empty id", p.name),
            ));
        } else if !person_ids.insert(p.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate person ID: {}", p.id),
            ));
        }
    }

    check_requirements(period, requirements, catalog, &mut errors);

    for (i, e) in exceptions.iter().enumerate().filter(|(_, e)| e.is_approved()) {
        check_exception(i, e, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_requirements(
    period: &Period,
    requirements: &[RoleRequirement],
    catalog: &SkillCatalog,
    errors: &mut Vec<ValidationError>,
) {
    let mut slots = HashSet::new();
    let mut events: HashMap<(&str, NaiveDate), (Option<NaiveTime>, &str, Option<&str>)> =
        HashMap::new();

    for req in requirements {
        if req.event_id.trim().is_empty() || req.role.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::MissingField,
                format!(
                    "Role requirement on {} has an empty event id or role name",
                    req.date
                ),
            ));
            continue;
        }

        if !slots.insert(req.key()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate role slot: {}", req.key()),
            ));
        }

        if period.is_valid() && !period.contains(req.date) {
            errors.push(ValidationError::new(
                ValidationErrorKind::OutsidePeriod,
                format!(
                    "Role '{}' on {} is outside period {}..{}",
                    req.key(),
                    req.date,
                    period.start,
                    period.end
                ),
            ));
        }

        if !catalog.is_known(&req.skill) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownSkill,
                format!("Role '{}' requires unknown skill '{}'", req.key(), req.skill),
            ));
        }

        let seen = (req.time, req.liturgical_day.as_str(), req.group.as_deref());
        match events.get(&(req.event_id.as_str(), req.date)) {
            Some(&first) if first != seen => {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InconsistentEvent,
                    format!(
                        "Event '{}' on {} appears with liturgical day {} and {}",
                        req.event_id, req.date, first.1, req.liturgical_day
                    ),
                ));
            }
            Some(_) => {}
            None => {
                events.insert((req.event_id.as_str(), req.date), seen);
            }
        }
    }
}

fn check_exception(index: usize, e: &AvailabilityException, errors: &mut Vec<ValidationError>) {
    let label = format!("Availability exception #{index} for '{}'", e.person_id);

    if e.person_id.trim().is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::MalformedException,
            format!("{label} has an empty person id"),
        ));
    }
    if !e.validity.is_valid() {
        errors.push(ValidationError::new(
            ValidationErrorKind::MalformedException,
            format!(
                "{label} has an inverted validity period {}..{}",
                e.validity.start, e.validity.end
            ),
        ));
        return;
    }
    if e.dates.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::MalformedException,
            format!("{label} lists no dates"),
        ));
    }
    if let Some(outside) = e.dates.iter().find(|d| !e.validity.contains(**d)) {
        errors.push(ValidationError::new(
            ValidationErrorKind::MalformedException,
            format!(
                "{label} lists {outside} outside its validity {}..{}",
                e.validity.start, e.validity.end
            ),
        ));
    }
}
