//! Collaborator interfaces for reading run inputs and writing results.
//!
//! The engine performs no I/O. Hosts implement [`RosterSource`] over their
//! data layer (spreadsheet, database) and [`AssignmentSink`] over their
//! persistence; [`MemoryStore`] implements both in memory.
//!
//! [`run_period`] reads, runs and writes. A read failure or invalid input
//! aborts before anything is written.

use thiserror::Error;
use tracing::{info, instrument};

use crate::error::RosterError;
use crate::models::{Assignment, AvailabilityException, Period, Person, RoleRequirement};
use crate::scheduler::{AssignmentEngine, RosterInput, RosterRun};

/// Errors raised by data collaborators.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("data source unavailable: {0}")]
    Unavailable(String),

    #[error("write rejected: {0}")]
    WriteRejected(String),
}

/// Read side of the host's data layer.
pub trait RosterSource {
    /// All people, in roster order.
    fn roster(&self) -> Result<Vec<Person>, StoreError>;

    /// Role slots dated within the period, in declared order.
    fn requirements(&self, period: &Period) -> Result<Vec<RoleRequirement>, StoreError>;

    /// Approved availability exceptions relevant to the period.
    fn exceptions(&self, period: &Period) -> Result<Vec<AvailabilityException>, StoreError>;

    /// Assignments already recorded within the period.
    fn assignments(&self, period: &Period) -> Result<Vec<Assignment>, StoreError>;
}

/// Write side of the host's data layer.
pub trait AssignmentSink {
    /// Persists new assignments.
    fn write_assignments(&mut self, assignments: &[Assignment]) -> Result<(), StoreError>;

    /// Removes automatic assignments within the period; returns how many.
    fn clear_auto_assignments(&mut self, period: &Period) -> Result<usize, StoreError>;
}

/// Reads everything a run needs for a period.
pub fn load_input<S: RosterSource + ?Sized>(
    source: &S,
    period: Period,
) -> Result<RosterInput, StoreError> {
    Ok(RosterInput::new(period)
        .with_roster(source.roster()?)
        .with_requirements(source.requirements(&period)?)
        .with_exceptions(source.exceptions(&period)?)
        .with_existing(source.assignments(&period)?))
}

/// Reads the period's inputs, runs the engine and writes new assignments.
#[instrument(skip_all, fields(start = %period.start, end = %period.end))]
pub fn run_period<S>(
    engine: &AssignmentEngine,
    store: &mut S,
    period: Period,
) -> Result<RosterRun, RosterError>
where
    S: RosterSource + AssignmentSink,
{
    let input = load_input(&*store, period)?;
    let run = engine.run(&input)?;
    store.write_assignments(&run.assignments)?;
    info!(written = run.assignments.len(), "assignments written");
    Ok(run)
}

/// In-memory data store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    /// People.
    pub roster: Vec<Person>,
    /// Role slots.
    pub requirements: Vec<RoleRequirement>,
    /// Availability exceptions (any approval state).
    pub exceptions: Vec<AvailabilityException>,
    /// Recorded assignments.
    pub assignments: Vec<Assignment>,
}

impl MemoryStore {
    /// Creates a store with a roster and role slots.
    pub fn new(roster: Vec<Person>, requirements: Vec<RoleRequirement>) -> Self {
        Self {
            roster,
            requirements,
            ..Default::default()
        }
    }

    /// Adds availability exceptions.
    pub fn with_exceptions(mut self, exceptions: Vec<AvailabilityException>) -> Self {
        self.exceptions.extend(exceptions);
        self
    }

    /// Adds recorded assignments.
    pub fn with_assignments(mut self, assignments: Vec<Assignment>) -> Self {
        self.assignments.extend(assignments);
        self
    }
}

impl RosterSource for MemoryStore {
    fn roster(&self) -> Result<Vec<Person>, StoreError> {
        Ok(self.roster.clone())
    }

    fn requirements(&self, period: &Period) -> Result<Vec<RoleRequirement>, StoreError> {
        Ok(self
            .requirements
            .iter()
            .filter(|r| period.contains(r.date))
            .cloned()
            .collect())
    }

    fn exceptions(&self, period: &Period) -> Result<Vec<AvailabilityException>, StoreError> {
        Ok(self
            .exceptions
            .iter()
            .filter(|e| e.is_approved() && e.validity.overlaps(period))
            .cloned()
            .collect())
    }

    fn assignments(&self, period: &Period) -> Result<Vec<Assignment>, StoreError> {
        Ok(self
            .assignments
            .iter()
            .filter(|a| period.contains(a.date))
            .cloned()
            .collect())
    }
}

impl AssignmentSink for MemoryStore {
    fn write_assignments(&mut self, assignments: &[Assignment]) -> Result<(), StoreError> {
        if let Some(taken) = assignments
            .iter()
            .find(|new| self.assignments.iter().any(|a| a.slot == new.slot))
        {
            return Err(StoreError::WriteRejected(format!(
                "slot {} is already filled",
                taken.slot
            )));
        }
        self.assignments.extend_from_slice(assignments);
        Ok(())
    }

    fn clear_auto_assignments(&mut self, period: &Period) -> Result<usize, StoreError> {
        let before = self.assignments.len();
        self.assignments
            .retain(|a| !(a.is_auto() && period.contains(a.date)));
        Ok(before - self.assignments.len())
    }
}
