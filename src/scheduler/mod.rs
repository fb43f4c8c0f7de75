//! Greedy assignment engine and run summary.
//!
//! # Algorithm
//!
//! `AssignmentEngine` fills role slots in a single deterministic pass:
//! pre-declared groups first, then individuals event by event in
//! chronological order. Each slot goes to the highest-scoring eligible
//! candidate. It is not a global matching solver; a slot left unfilled
//! is reported, not retried.
//!
//! # Summary
//!
//! `RunSummary` reports requested, filled and unfilled slots with
//! breakdowns by ministry and week.

mod engine;
mod summary;

pub use engine::{AssignmentEngine, RosterInput, RosterRun};
pub use summary::{RunSummary, SlotCounts};
