//! Candidate scoring.
//!
//! Soft preferences are expressed as additive score components. Every
//! eligible candidate for a slot is scored, and the highest total wins.
//!
//! # Usage
//!
//! ```
//! use u_roster::config::ScoringWeights;
//! use u_roster::scoring::{rules, ScoringFunction};
//!
//! let standard = ScoringFunction::from_weights(&ScoringWeights::default());
//! assert_eq!(standard.rule_names().len(), 7);
//!
//! let minimal = ScoringFunction::new()
//!     .with_rule(rules::Base { value: 100.0 })
//!     .with_rule(rules::Fairness { penalty: 10.0 });
//! assert_eq!(minimal.rule_names(), vec!["BASE", "FAIRNESS"]);
//! ```
//!
//! # Score Convention
//! **Higher score = more desirable.** Ties are broken by fewer prior
//! assignments, then by person id.

mod context;
mod function;
pub mod rules;

pub use context::ScoringContext;
pub use function::ScoringFunction;

use crate::models::Person;
use std::fmt::Debug;

/// Score returned by a scoring rule.
pub type Score = f64;

/// One additive component of a candidate's score.
pub trait ScoreRule: Send + Sync + Debug {
    /// Rule name (e.g., "FAIRNESS").
    fn name(&self) -> &'static str;

    /// Contribution of this rule for a candidate in the current context.
    fn evaluate(&self, candidate: &Person, context: &ScoringContext<'_>) -> Score;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
