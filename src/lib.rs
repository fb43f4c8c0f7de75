//! Volunteer rostering for the U-Engine ecosystem.
//!
//! Assigns people to role slots at recurring events (services, shifts,
//! fixtures) within a period. Hard constraints are never violated;
//! soft preferences are optimized by a deterministic scoring-based greedy
//! pass.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Person`, `Event`, `RoleRequirement`,
//!   `Assignment`, `AvailabilityException`, `Tag`
//! - **`config`**: `EngineConfig`: ministry registry, statuses, scoring weights
//! - **`validation`**: Structural input checks (periods, duplicate slots,
//!   unknown skills, malformed exceptions)
//! - **`availability`**: Blacklist / whitelist / override index
//! - **`history`**: Per-person assignment counters
//! - **`eligibility`**: Skill catalog, conflict tracking, candidate filter
//! - **`scoring`**: Additive scoring rules and tie-breaking
//! - **`scheduler`**: `AssignmentEngine` and `RunSummary`
//! - **`store`**: Collaborator traits for reading inputs and writing results
//!
//! # Hard constraints
//!
//! - Qualification (directly or through the skill's ministry category)
//! - Availability exceptions
//! - One role per person per liturgical day
//! - Family members serving on the same liturgical day share one event

pub mod availability;
pub mod config;
pub mod eligibility;
pub mod error;
pub mod history;
pub mod models;
pub mod scheduler;
pub mod scoring;
pub mod store;
pub mod validation;

pub use config::EngineConfig;
pub use error::RosterError;
pub use scheduler::{AssignmentEngine, RosterInput, RosterRun, RunSummary};
pub use store::{run_period, AssignmentSink, MemoryStore, RosterSource, StoreError};
