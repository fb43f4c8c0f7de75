//! Engine configuration.
//!
//! Everything organization-specific is passed in explicitly: the ministry
//! registry that maps role skills to categories, which statuses take part
//! in individual and group assignment, and the scoring constants.
//!
//! Configuration can be built in code or loaded from JSON; every field has
//! a default.

use serde::{Deserialize, Serialize};

use crate::error::RosterError;
use crate::models::PersonStatus;

/// A ministry registry entry: one role skill and its category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinistryEntry {
    /// Role skill (e.g. "Lector 1", "EMHC Cup").
    pub skill: String,
    /// Ministry category (e.g. "Lector", "EMHC").
    pub category: String,
    /// Inactive entries are ignored.
    #[serde(default = "default_true")]
    pub active: bool,
}

fn default_true() -> bool {
    true
}

impl MinistryEntry {
    /// Creates an active entry.
    pub fn new(skill: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            skill: skill.into(),
            category: category.into(),
            active: true,
        }
    }

    /// Marks the entry inactive.
    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }
}

/// Scoring constants.
///
/// Scores are additive; higher wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    /// Starting score of every candidate.
    pub base: f64,
    /// Subtracted once per assignment the candidate already holds.
    pub fairness_penalty: f64,
    /// Bonus when the event is among the candidate's preferred events.
    pub event_preference_bonus: f64,
    /// Reduction of the event bonus per prior assignment to the same event.
    pub event_preference_decay: f64,
    /// Floor of the decayed event bonus.
    pub event_preference_min_bonus: f64,
    /// Bonus when the role is among the candidate's preferred roles.
    pub role_preference_bonus: f64,
    /// Bonus when a family member already serves at this event.
    pub family_cohesion_bonus: f64,
    /// Bonus for candidates with no event-time preference.
    pub flexibility_bonus: f64,
    /// Bonus for candidates restricted by a whitelist.
    pub limited_availability_bonus: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            base: 100.0,
            fairness_penalty: 10.0,
            event_preference_bonus: 30.0,
            event_preference_decay: 10.0,
            event_preference_min_bonus: 5.0,
            role_preference_bonus: 15.0,
            family_cohesion_bonus: 25.0,
            flexibility_bonus: 5.0,
            limited_availability_bonus: 20.0,
        }
    }
}

impl ScoringWeights {
    /// Checks that magnitudes are non-negative and the decay floor does
    /// not exceed the bonus.
    pub fn validate(&self) -> Result<(), RosterError> {
        let magnitudes = [
            ("fairness_penalty", self.fairness_penalty),
            ("event_preference_bonus", self.event_preference_bonus),
            ("event_preference_decay", self.event_preference_decay),
            ("event_preference_min_bonus", self.event_preference_min_bonus),
            ("role_preference_bonus", self.role_preference_bonus),
            ("family_cohesion_bonus", self.family_cohesion_bonus),
            ("flexibility_bonus", self.flexibility_bonus),
            ("limited_availability_bonus", self.limited_availability_bonus),
        ];
        for (name, value) in magnitudes {
            if !value.is_finite() || value < 0.0 {
                return Err(RosterError::InvalidWeights(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        if !self.base.is_finite() {
            return Err(RosterError::InvalidWeights("base must be finite".into()));
        }
        if self.event_preference_min_bonus > self.event_preference_bonus {
            return Err(RosterError::InvalidWeights(format!(
                "event_preference_min_bonus ({}) exceeds event_preference_bonus ({})",
                self.event_preference_min_bonus, self.event_preference_bonus
            )));
        }
        Ok(())
    }
}

/// Complete engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Ministry registry (skill → category).
    pub registry: Vec<MinistryEntry>,
    /// Scoring constants.
    pub weights: ScoringWeights,
    /// Status eligible for individual assignment.
    pub individual_status: PersonStatus,
    /// Statuses eligible when resolving a pre-declared group to a member.
    pub group_statuses: Vec<PersonStatus>,
    /// Scores closer than this are ties.
    pub score_epsilon: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            registry: Vec::new(),
            weights: ScoringWeights::default(),
            individual_status: PersonStatus::Active,
            group_statuses: vec![PersonStatus::Active, PersonStatus::GroupSponsor],
            score_epsilon: 1e-9,
        }
    }
}

impl EngineConfig {
    /// Creates a configuration with the given registry and default weights.
    pub fn new(registry: Vec<MinistryEntry>) -> Self {
        Self {
            registry,
            ..Default::default()
        }
    }

    /// Replaces the scoring weights.
    pub fn with_weights(mut self, weights: ScoringWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Adds a registry entry.
    pub fn with_entry(mut self, entry: MinistryEntry) -> Self {
        self.registry.push(entry);
        self
    }

    /// Checks the scoring weights and the tie tolerance.
    pub fn validate(&self) -> Result<(), RosterError> {
        self.weights.validate()?;
        if !self.score_epsilon.is_finite() || self.score_epsilon < 0.0 {
            return Err(RosterError::InvalidWeights(format!(
                "score_epsilon must be a non-negative number, got {}",
                self.score_epsilon
            )));
        }
        Ok(())
    }

    /// Parses and validates a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, RosterError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = EngineConfig::default();
        assert_eq!(c.individual_status, PersonStatus::Active);
        assert!(c.group_statuses.contains(&PersonStatus::GroupSponsor));
        assert!((c.weights.base - 100.0).abs() < 1e-10);
        assert!(c.weights.validate().is_ok());
    }

    #[test]
    fn test_from_json_partial() {
        let json = r#"{
            "registry": [
                {"skill": "Lector 1", "category": "Lector"},
                {"skill": "Cantor", "category": "Music", "active": false}
            ],
            "weights": {"fairness_penalty": 12.5}
        }"#;
        let c = EngineConfig::from_json(json).unwrap();
        assert_eq!(c.registry.len(), 2);
        assert!(c.registry[0].active);
        assert!(!c.registry[1].active);
        assert!((c.weights.fairness_penalty - 12.5).abs() < 1e-10);
        assert!((c.weights.event_preference_bonus - 30.0).abs() < 1e-10);
    }

    #[test]
    fn test_from_json_rejects_bad_weights() {
        let json = r#"{"weights": {"event_preference_bonus": 5, "event_preference_min_bonus": 10}}"#;
        assert!(matches!(
            EngineConfig::from_json(json),
            Err(RosterError::InvalidWeights(_))
        ));
    }

    #[test]
    fn test_from_json_syntax_error() {
        assert!(matches!(
            EngineConfig::from_json("{not json"),
            Err(RosterError::Config(_))
        ));
    }

    #[test]
    fn test_negative_weight_rejected() {
        let w = ScoringWeights {
            fairness_penalty: -1.0,
            ..Default::default()
        };
        assert!(w.validate().is_err());
    }

    #[test]
    fn test_negative_epsilon_rejected() {
        let c = EngineConfig {
            score_epsilon: -1.0,
            ..Default::default()
        };
        assert!(matches!(c.validate(), Err(RosterError::InvalidWeights(_))));
        assert!(EngineConfig::default().validate().is_ok());
    }
}
