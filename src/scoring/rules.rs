//! Built-in scoring rules.
//!
//! # Categories
//!
//! - **Baseline**: BASE
//! - **Fairness**: FAIRNESS
//! - **Preference**: EVENT_PREF (with rotation decay), ROLE_PREF
//! - **Placement**: FAMILY, FLEXIBLE, LIMITED
//!
//! # Score Convention
//! All rules return larger values for more desirable candidates.

use super::{Score, ScoreRule, ScoringContext};
use crate::models::Person;

// ======================== Baseline ========================

/// Constant starting score.
#[derive(Debug, Clone, Copy)]
pub struct Base {
    /// Score every candidate starts from.
    pub value: f64,
}

impl ScoreRule for Base {
    fn name(&self) -> &'static str {
        "BASE"
    }

    fn evaluate(&self, _candidate: &Person, _context: &ScoringContext<'_>) -> Score {
        self.value
    }

    fn description(&self) -> &'static str {
        "Base score"
    }
}

// ======================== Fairness ========================

/// Penalizes candidates by the number of assignments they already hold.
///
/// Spreads work across the roster: someone serving for the third time
/// loses to an equally suited first-timer.
#[derive(Debug, Clone, Copy)]
pub struct Fairness {
    /// Penalty per prior assignment.
    pub penalty: f64,
}

impl ScoreRule for Fairness {
    fn name(&self) -> &'static str {
        "FAIRNESS"
    }

    fn evaluate(&self, candidate: &Person, context: &ScoringContext<'_>) -> Score {
        -self.penalty * context.history.total(&candidate.id) as f64
    }

    fn description(&self) -> &'static str {
        "Fairness penalty on prior assignments"
    }
}

// ======================== Preference ========================

/// Bonus for serving at a preferred event, decaying with repetition.
///
/// `max(min_bonus, bonus - decay * times_at_this_event)`. A candidate with
/// several preferred events rotates among them instead of settling on one.
#[derive(Debug, Clone, Copy)]
pub struct EventPreference {
    /// Bonus on the first assignment to the event.
    pub bonus: f64,
    /// Reduction per prior assignment to the same event.
    pub decay: f64,
    /// Floor of the decayed bonus.
    pub min_bonus: f64,
}

impl ScoreRule for EventPreference {
    fn name(&self) -> &'static str {
        "EVENT_PREF"
    }

    fn evaluate(&self, candidate: &Person, context: &ScoringContext<'_>) -> Score {
        let event_id = context.event_id();
        if !candidate.preferred_events.contains(event_id) {
            return 0.0;
        }
        let repeats = context.history.for_event(&candidate.id, event_id) as f64;
        (self.bonus - self.decay * repeats).max(self.min_bonus)
    }

    fn description(&self) -> &'static str {
        "Preferred event bonus with rotation decay"
    }
}

/// Flat bonus when the role is among the candidate's preferred roles.
#[derive(Debug, Clone, Copy)]
pub struct RolePreference {
    /// Bonus.
    pub bonus: f64,
}

impl ScoreRule for RolePreference {
    fn name(&self) -> &'static str {
        "ROLE_PREF"
    }

    fn evaluate(&self, candidate: &Person, context: &ScoringContext<'_>) -> Score {
        if candidate.prefers_role(context.role) {
            self.bonus
        } else {
            0.0
        }
    }

    fn description(&self) -> &'static str {
        "Preferred role bonus"
    }
}

// ======================== Placement ========================

/// Bonus when another family member already serves at this occurrence.
#[derive(Debug, Clone, Copy)]
pub struct FamilyCohesion {
    /// Bonus.
    pub bonus: f64,
}

impl ScoreRule for FamilyCohesion {
    fn name(&self) -> &'static str {
        "FAMILY"
    }

    fn evaluate(&self, candidate: &Person, context: &ScoringContext<'_>) -> Score {
        match &candidate.family_id {
            Some(family)
                if context
                    .conflicts
                    .family_members_at(family, context.event_id(), context.date())
                    > 0 =>
            {
                self.bonus
            }
            _ => 0.0,
        }
    }

    fn description(&self) -> &'static str {
        "Family already serving at this event"
    }
}

/// Small bonus for candidates without event-time preferences.
///
/// Keeps flexible volunteers competitive with those collecting
/// event-preference bonuses.
#[derive(Debug, Clone, Copy)]
pub struct Flexibility {
    /// Bonus.
    pub bonus: f64,
}

impl ScoreRule for Flexibility {
    fn name(&self) -> &'static str {
        "FLEXIBLE"
    }

    fn evaluate(&self, candidate: &Person, _context: &ScoringContext<'_>) -> Score {
        if candidate.is_time_flexible() {
            self.bonus
        } else {
            0.0
        }
    }

    fn description(&self) -> &'static str {
        "No event-time preference"
    }
}

/// Bonus for candidates restricted by a whitelist active on the slot's date.
///
/// They can only serve on a few dates, so those dates go to them first.
#[derive(Debug, Clone, Copy)]
pub struct LimitedAvailability {
    /// Bonus.
    pub bonus: f64,
}

impl ScoreRule for LimitedAvailability {
    fn name(&self) -> &'static str {
        "LIMITED"
    }

    fn evaluate(&self, candidate: &Person, context: &ScoringContext<'_>) -> Score {
        if context.availability.has_whitelist(&candidate.id, context.date()) {
            self.bonus
        } else {
            0.0
        }
    }

    fn description(&self) -> &'static str {
        "Limited availability"
    }
}
