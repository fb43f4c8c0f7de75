//! Two-phase greedy assignment engine.
//!
//! # Algorithm
//!
//! 1. Validate the input; any structural problem aborts the run.
//! 2. Seed history counters and conflict state from existing assignments.
//!    Slots that already hold an assignment are left alone.
//! 3. **Phase A**: for events with a pre-declared group, resolve each open
//!    slot to the best-scoring eligible group member, or record the group
//!    label as a placeholder.
//! 4. **Phase B**: walk the remaining slots occurrence by occurrence (event
//!    id and date) in chronological order, roles in declared order. Filter
//!    candidates, score them, assign the winner and update counters and
//!    conflict state.
//!
//! Event ids recur across dates ("SUN-0900" every Sunday). Time preferences
//! and rotation decay count by event id; conflicts count by occurrence.
//!
//! Single pass, no backtracking: a slot is decided once. The result is not
//! guaranteed to maximize coverage, but it is deterministic and each
//! decision can be explained from the state at that point.
//!
//! # Complexity
//! O(s * p * r) where s=slots, p=people, r=scoring rules.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::availability::AvailabilityIndex;
use crate::config::EngineConfig;
use crate::eligibility::{ConflictTracker, EligibilityFilter, QualificationIndex, SkillCatalog};
use crate::error::RosterError;
use crate::history::HistoryCounters;
use crate::models::{
    Assignee, Assignment, AssignmentSource, AvailabilityException, Period, Person,
    RoleRequirement, SlotKey, SlotOutcome, SlotState, Tag,
};
use crate::scoring::{ScoringContext, ScoringFunction};
use crate::validation::validate_input;

use super::RunSummary;

/// Input container for one rostering run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterInput {
    /// Period being scheduled.
    pub period: Period,
    /// People, in roster order.
    pub roster: Vec<Person>,
    /// Role slots, in declared order.
    pub requirements: Vec<RoleRequirement>,
    /// Availability exceptions (unapproved ones are ignored).
    pub exceptions: Vec<AvailabilityException>,
    /// Assignments that exist before the run.
    pub existing: Vec<Assignment>,
}

impl RosterInput {
    /// Creates an empty input for a period.
    pub fn new(period: Period) -> Self {
        Self {
            period,
            roster: Vec::new(),
            requirements: Vec::new(),
            exceptions: Vec::new(),
            existing: Vec::new(),
        }
    }

    /// Sets the roster.
    pub fn with_roster(mut self, roster: Vec<Person>) -> Self {
        self.roster = roster;
        self
    }

    /// Sets the role requirements.
    pub fn with_requirements(mut self, requirements: Vec<RoleRequirement>) -> Self {
        self.requirements = requirements;
        self
    }

    /// Sets the availability exceptions.
    pub fn with_exceptions(mut self, exceptions: Vec<AvailabilityException>) -> Self {
        self.exceptions = exceptions;
        self
    }

    /// Sets the pre-existing assignments.
    pub fn with_existing(mut self, existing: Vec<Assignment>) -> Self {
        self.existing = existing;
        self
    }
}

/// Result of one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterRun {
    /// One outcome per requirement, in requirement order.
    pub outcomes: Vec<SlotOutcome>,
    /// Assignments created by this run, in decision order.
    pub assignments: Vec<Assignment>,
    /// Totals for reporting.
    pub summary: RunSummary,
}

impl RosterRun {
    /// Assignment created for a slot in this run.
    pub fn assignment_for(&self, slot: &SlotKey) -> Option<&Assignment> {
        self.assignments.iter().find(|a| &a.slot == slot)
    }

    /// Assignments created for a person in this run.
    pub fn assignments_for_person(&self, person_id: &str) -> Vec<&Assignment> {
        self.assignments
            .iter()
            .filter(|a| a.person_id() == Some(person_id))
            .collect()
    }

    /// Outcome of a slot.
    pub fn outcome(&self, slot: &SlotKey) -> Option<&SlotOutcome> {
        self.outcomes.iter().find(|o| &o.slot == slot)
    }
}

/// Greedy volunteer assignment engine.
///
/// The engine is immutable; every [`run`](Self::run) builds its own
/// counters and conflict state, so runs never share mutable state.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use u_roster::config::{EngineConfig, MinistryEntry};
/// use u_roster::models::{Event, Period, Person};
/// use u_roster::scheduler::{AssignmentEngine, RosterInput};
///
/// let sunday = NaiveDate::from_ymd_opt(2026, 2, 8).unwrap();
/// let mass = Event::new("SUN-0900", sunday);
/// let input = RosterInput::new(Period::day(sunday))
///     .with_roster(vec![Person::new("P1", "Ann").with_qualification("Lector")])
///     .with_requirements(vec![mass.role("Lector 1", "Lector 1")]);
///
/// let engine = AssignmentEngine::new(EngineConfig::new(vec![
///     MinistryEntry::new("Lector 1", "Lector"),
/// ]));
/// let run = engine.run(&input).unwrap();
/// assert_eq!(run.summary.filled, 1);
/// ```
#[derive(Debug, Clone)]
pub struct AssignmentEngine {
    config: EngineConfig,
    catalog: SkillCatalog,
    scoring: ScoringFunction,
}

impl AssignmentEngine {
    /// Creates an engine with the standard scoring rules.
    ///
    /// The configuration is not checked here; [`run`](Self::run) rejects
    /// invalid weights. Use [`try_new`](Self::try_new) to fail early.
    pub fn new(config: EngineConfig) -> Self {
        let scoring =
            ScoringFunction::from_weights(&config.weights).with_epsilon(config.score_epsilon);
        Self::with_scoring(config, scoring)
    }

    /// Creates an engine after validating the configuration.
    ///
    /// # Errors
    /// `RosterError::InvalidWeights` for negative or non-finite weights, a
    /// decay floor above the bonus, or an invalid tie tolerance.
    pub fn try_new(config: EngineConfig) -> Result<Self, RosterError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Creates an engine with a custom scoring function.
    pub fn with_scoring(config: EngineConfig, scoring: ScoringFunction) -> Self {
        let catalog = SkillCatalog::from_registry(&config.registry);
        Self {
            config,
            catalog,
            scoring,
        }
    }

    /// The configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The skill catalog built from the registry.
    pub fn catalog(&self) -> &SkillCatalog {
        &self.catalog
    }

    /// Runs both phases over the input.
    ///
    /// # Errors
    /// `RosterError::InvalidWeights` if the configuration is invalid, and
    /// `RosterError::InvalidInput` if validation fails; nothing is assigned.
    #[instrument(
        skip_all,
        fields(
            start = %input.period.start,
            end = %input.period.end,
            slots = input.requirements.len(),
            people = input.roster.len()
        )
    )]
    pub fn run(&self, input: &RosterInput) -> Result<RosterRun, RosterError> {
        self.config.validate()?;
        validate_input(
            &input.period,
            &input.roster,
            &input.requirements,
            &input.exceptions,
            &self.catalog,
        )
        .map_err(RosterError::InvalidInput)?;

        let availability = AvailabilityIndex::build(&input.period, &input.exceptions);
        let qualifications = QualificationIndex::build(&input.roster, &self.catalog);
        let mut state = RunState {
            roster: &input.roster,
            filter: EligibilityFilter::new(&qualifications, &availability, &self.config),
            availability: &availability,
            scoring: &self.scoring,
            history: HistoryCounters::seeded(&input.existing),
            conflicts: ConflictTracker::seeded(&input.existing, &input.roster),
            assignments: Vec::new(),
        };

        let prefilled: HashMap<SlotKey, &Assignee> = input
            .existing
            .iter()
            .map(|a| (a.slot.clone(), &a.assignee))
            .collect();
        let mut outcomes: Vec<Option<SlotOutcome>> = input
            .requirements
            .iter()
            .map(|req| {
                let slot = req.key();
                prefilled.get(&slot).map(|assignee| SlotOutcome {
                    slot,
                    state: SlotState::Prefilled((*assignee).clone()),
                    score: None,
                    candidates: 0,
                })
            })
            .collect();

        let events = events_in_order(&input.requirements);

        // Phase A: pre-declared groups
        for slots in &events {
            let Some(label) = input.requirements[slots[0]].group.as_deref() else {
                continue;
            };
            let group = Tag::new(label);
            for &i in slots {
                if outcomes[i].is_none() {
                    outcomes[i] = Some(state.fill(&input.requirements[i], Some((label, &group))));
                }
            }
        }

        // Phase B: individual filling
        for slots in &events {
            for &i in slots {
                if outcomes[i].is_none() {
                    outcomes[i] = Some(state.fill(&input.requirements[i], None));
                }
            }
        }

        let outcomes: Vec<SlotOutcome> = outcomes
            .into_iter()
            .zip(&input.requirements)
            .map(|(o, req)| o.unwrap_or_else(|| unfilled(req)))
            .collect();
        let summary = RunSummary::calculate(&input.requirements, &outcomes, &self.catalog);

        info!(
            requested = summary.requested,
            filled = summary.filled,
            unfilled = summary.unfilled,
            auto_assigned = summary.auto_assigned,
            "rostering run complete"
        );

        Ok(RosterRun {
            outcomes,
            assignments: state.assignments,
            summary,
        })
    }
}

/// Mutable state of one run.
struct RunState<'a> {
    roster: &'a [Person],
    filter: EligibilityFilter<'a>,
    availability: &'a AvailabilityIndex,
    scoring: &'a ScoringFunction,
    history: HistoryCounters,
    conflicts: ConflictTracker,
    assignments: Vec<Assignment>,
}

impl<'a> RunState<'a> {
    /// Decides one slot. `group` is the (label, tag) of a pre-declared group.
    fn fill(&mut self, req: &RoleRequirement, group: Option<(&str, &Tag)>) -> SlotOutcome {
        let roster = self.roster;
        let candidates = match group {
            Some((_, tag)) => self
                .filter
                .group_candidates(roster, req, tag, &self.conflicts),
            None => self.filter.candidates(roster, req, &self.conflicts),
        };

        let role = Tag::new(&req.role);
        let picked = {
            let context = ScoringContext::new(
                req,
                &role,
                &self.history,
                &self.conflicts,
                self.availability,
            );
            self.scoring
                .select_best(&candidates, &context)
                .map(|(idx, score)| (candidates[idx], score))
        };

        match (picked, group) {
            (Some((person, score)), _) => {
                debug!(
                    slot = %req.key(),
                    person = %person.id,
                    score,
                    candidates = candidates.len(),
                    "slot assigned"
                );
                self.commit(req, person);
                SlotOutcome {
                    slot: req.key(),
                    state: SlotState::Assigned(Assignee::Person {
                        id: person.id.clone(),
                        name: person.name.clone(),
                    }),
                    score: Some(score),
                    candidates: candidates.len(),
                }
            }
            (None, Some((label, _))) => {
                debug!(slot = %req.key(), group = label, "no eligible member, group placeholder");
                let assignee = Assignee::Group(label.to_string());
                self.assignments
                    .push(Assignment::new(req, assignee.clone(), AssignmentSource::Auto));
                SlotOutcome {
                    slot: req.key(),
                    state: SlotState::Assigned(assignee),
                    score: None,
                    candidates: 0,
                }
            }
            (None, None) => {
                warn!(slot = %req.key(), skill = %req.skill, date = %req.date, "no eligible candidate");
                unfilled(req)
            }
        }
    }

    fn commit(&mut self, req: &RoleRequirement, person: &Person) {
        let assignee = Assignee::Person {
            id: person.id.clone(),
            name: person.name.clone(),
        };
        let assignment = Assignment::new(req, assignee, AssignmentSource::Auto);
        self.history.record(&person.id, &req.event_id);
        self.conflicts.mark(
            &person.id,
            person.family_id.as_deref(),
            &assignment.slot,
            &req.liturgical_day,
        );
        self.assignments.push(assignment);
    }
}

fn unfilled(req: &RoleRequirement) -> SlotOutcome {
    SlotOutcome {
        slot: req.key(),
        state: SlotState::Unfilled,
        score: None,
        candidates: 0,
    }
}

/// Requirement indices grouped by occurrence (event id and date),
/// occurrences in chronological order.
///
/// Occurrences on the same date and time keep their first-seen order;
/// roles keep their declared order.
fn events_in_order(requirements: &[RoleRequirement]) -> Vec<Vec<usize>> {
    let mut position: HashMap<(&str, NaiveDate), usize> = HashMap::new();
    let mut events: Vec<((NaiveDate, Option<NaiveTime>), Vec<usize>)> = Vec::new();

    for (i, req) in requirements.iter().enumerate() {
        let occurrence = (req.event_id.as_str(), req.date);
        match position.get(&occurrence) {
            Some(&p) => events[p].1.push(i),
            None => {
                position.insert(occurrence, events.len());
                events.push((req.chrono_key(), vec![i]));
            }
        }
    }

    events.sort_by_key(|(key, _)| *key);
    events.into_iter().map(|(_, slots)| slots).collect()
}
