//! Hard constraints: who may fill a role slot.
//!
//! - **`skills`**: skill catalog from the ministry registry and per-person
//!   qualification index
//! - **`conflict`**: in-run state for same-day exclusivity and family cohesion
//! - **`filter`**: the candidate filter combining status, skill, preference,
//!   availability and conflict checks

mod conflict;
mod filter;
mod skills;

pub use conflict::ConflictTracker;
pub use filter::{EligibilityFilter, FilterMode, Rejection};
pub use skills::{QualificationIndex, SkillCatalog};
