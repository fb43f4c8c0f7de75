//! Scoring function: sum of rules plus deterministic tie-breaking.

use std::cmp::Ordering;
use std::sync::Arc;

use super::{rules, Score, ScoreRule, ScoringContext};
use crate::config::ScoringWeights;
use crate::models::Person;

/// Sums scoring rules and picks the best candidate.
///
/// # Selection
/// Highest score wins. Scores within `epsilon` are ties, broken by the
/// lowest total assignment count, then by the lowest person id. The same
/// inputs therefore always select the same person.
#[derive(Clone)]
pub struct ScoringFunction {
    rules: Vec<Arc<dyn ScoreRule>>,
    epsilon: f64,
}

impl ScoringFunction {
    /// Creates a function with no rules (every score is 0).
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            epsilon: 1e-9,
        }
    }

    /// The standard rule set built from configured weights.
    pub fn from_weights(weights: &ScoringWeights) -> Self {
        Self::new()
            .with_rule(rules::Base {
                value: weights.base,
            })
            .with_rule(rules::Fairness {
                penalty: weights.fairness_penalty,
            })
            .with_rule(rules::EventPreference {
                bonus: weights.event_preference_bonus,
                decay: weights.event_preference_decay,
                min_bonus: weights.event_preference_min_bonus,
            })
            .with_rule(rules::RolePreference {
                bonus: weights.role_preference_bonus,
            })
            .with_rule(rules::FamilyCohesion {
                bonus: weights.family_cohesion_bonus,
            })
            .with_rule(rules::Flexibility {
                bonus: weights.flexibility_bonus,
            })
            .with_rule(rules::LimitedAvailability {
                bonus: weights.limited_availability_bonus,
            })
    }

    /// Adds a rule.
    pub fn with_rule<R: ScoreRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Sets the tie tolerance.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Names of the configured rules, in order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Total score of a candidate.
    pub fn score(&self, candidate: &Person, context: &ScoringContext<'_>) -> Score {
        self.rules
            .iter()
            .map(|r| r.evaluate(candidate, context))
            .sum()
    }

    /// Per-rule contributions of a candidate's score.
    pub fn breakdown(
        &self,
        candidate: &Person,
        context: &ScoringContext<'_>,
    ) -> Vec<(&'static str, Score)> {
        self.rules
            .iter()
            .map(|r| (r.name(), r.evaluate(candidate, context)))
            .collect()
    }

    /// Index and score of the best candidate, or `None` if there are none.
    pub fn select_best(
        &self,
        candidates: &[&Person],
        context: &ScoringContext<'_>,
    ) -> Option<(usize, Score)> {
        let mut best: Option<(usize, Score)> = None;
        for (i, candidate) in candidates.iter().enumerate() {
            let score = self.score(candidate, context);
            let better = match best {
                None => true,
                Some((j, best_score)) => {
                    self.compare(candidate, score, candidates[j], best_score, context)
                        == Ordering::Less
                }
            };
            if better {
                best = Some((i, score));
            }
        }
        best
    }

    /// Orders two scored candidates; `Less` means `a` is preferred.
    fn compare(
        &self,
        a: &Person,
        score_a: Score,
        b: &Person,
        score_b: Score,
        context: &ScoringContext<'_>,
    ) -> Ordering {
        if (score_a - score_b).abs() > self.epsilon {
            return score_b.partial_cmp(&score_a).unwrap_or(Ordering::Equal);
        }
        context
            .history
            .total(&a.id)
            .cmp(&context.history.total(&b.id))
            .then_with(|| a.id.cmp(&b.id))
    }
}

impl Default for ScoringFunction {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ScoringFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoringFunction")
            .field("rules", &self.rule_names())
            .field("epsilon", &self.epsilon)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::availability::AvailabilityIndex;
    use crate::eligibility::ConflictTracker;
    use crate::history::HistoryCounters;
    use crate::models::{Event, RoleRequirement, Tag};
    use chrono::NaiveDate;

    fn requirement() -> RoleRequirement {
        Event::new("SUN-0900", NaiveDate::from_ymd_opt(2026, 2, 8).unwrap())
            .role("Usher 1", "Usher")
    }

    fn select(
        f: &ScoringFunction,
        people: &[Person],
        history: &HistoryCounters,
    ) -> Option<(usize, Score)> {
        let req = requirement();
        let role = Tag::new(&req.role);
        let conflicts = ConflictTracker::new();
        let availability = AvailabilityIndex::default();
        let ctx = ScoringContext::new(&req, &role, history, &conflicts, &availability);
        let refs: Vec<&Person> = people.iter().collect();
        f.select_best(&refs, &ctx)
    }

    #[test]
    fn test_standard_rules() {
        let f = ScoringFunction::from_weights(&ScoringWeights::default());
        assert_eq!(
            f.rule_names(),
            vec!["BASE", "FAIRNESS", "EVENT_PREF", "ROLE_PREF", "FAMILY", "FLEXIBLE", "LIMITED"]
        );
    }

    #[test]
    fn test_highest_score_wins() {
        let f = ScoringFunction::from_weights(&ScoringWeights::default());
        let people = vec![
            Person::new("P1", "Ann"),
            Person::new("P2", "Bo").with_preferred_event("SUN-0900"),
        ];
        // P1: 100 + 5 (flexible); P2: 100 + 30 (preferred event)
        let (idx, score) = select(&f, &people, &HistoryCounters::new()).unwrap();
        assert_eq!(idx, 1);
        assert!((score - 130.0).abs() < 1e-10);
    }

    #[test]
    fn test_fairness_moves_work_to_newcomer() {
        let f = ScoringFunction::from_weights(&ScoringWeights::default());
        let people = vec![Person::new("P1", "Ann"), Person::new("P2", "Bo")];
        let mut history = HistoryCounters::new();
        history.record("P1", "SAT-1700");
        let (idx, _) = select(&f, &people, &history).unwrap();
        assert_eq!(idx, 1);
    }

    #[test]
    fn test_tie_breaks_on_total_then_id() {
        // Base only: every candidate ties on score
        let f = ScoringFunction::new().with_rule(rules::Base { value: 100.0 });
        let people = vec![
            Person::new("P3", "Cy"),
            Person::new("P2", "Bo"),
            Person::new("P1", "Ann"),
        ];
        let mut history = HistoryCounters::new();
        let (idx, _) = select(&f, &people, &history).unwrap();
        assert_eq!(people[idx].id, "P1");

        history.record("P1", "SAT-1700");
        let (idx, _) = select(&f, &people, &history).unwrap();
        assert_eq!(people[idx].id, "P2");
    }

    #[test]
    fn test_empty_candidates() {
        let f = ScoringFunction::from_weights(&ScoringWeights::default());
        assert!(select(&f, &[], &HistoryCounters::new()).is_none());
    }

    #[test]
    fn test_breakdown_sums_to_score() {
        let f = ScoringFunction::from_weights(&ScoringWeights::default());
        let req = requirement();
        let role = Tag::new(&req.role);
        let history = HistoryCounters::new();
        let conflicts = ConflictTracker::new();
        let availability = AvailabilityIndex::default();
        let ctx = ScoringContext::new(&req, &role, &history, &conflicts, &availability);
        let p = Person::new("P1", "Ann").with_preferred_role("Usher 1");

        let parts = f.breakdown(&p, &ctx);
        let total: f64 = parts.iter().map(|(_, s)| s).sum();
        assert!((total - f.score(&p, &ctx)).abs() < 1e-10);
        // 100 base + 15 role + 5 flexible
        assert!((total - 120.0).abs() < 1e-10);
    }
}
