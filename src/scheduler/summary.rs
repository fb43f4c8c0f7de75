//! Run summary.
//!
//! Counts requested, filled and unfilled slots for the host to report,
//! with breakdowns by ministry and ISO week.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | requested | Role slots in the run |
//! | filled | Slots holding an assignee (prefilled or new) |
//! | unfilled | Slots left without an eligible candidate |
//! | fill rate | filled / requested |

use std::collections::BTreeMap;

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::eligibility::SkillCatalog;
use crate::models::{Assignee, RoleRequirement, SlotKey, SlotOutcome, SlotState};

/// Slot counts for one breakdown bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotCounts {
    /// Slots in the bucket.
    pub requested: usize,
    /// Slots holding an assignee.
    pub filled: usize,
    /// Slots without an assignee.
    pub unfilled: usize,
}

impl SlotCounts {
    fn add(&mut self, filled: bool) {
        self.requested += 1;
        if filled {
            self.filled += 1;
        } else {
            self.unfilled += 1;
        }
    }
}

/// Outcome totals of one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Role slots in the run.
    pub requested: usize,
    /// Slots holding an assignee after the run.
    pub filled: usize,
    /// Slots without an assignee.
    pub unfilled: usize,
    /// Slots that were already filled before the run.
    pub prefilled: usize,
    /// Slots the run filled with a person.
    pub auto_assigned: usize,
    /// Slots the run filled with a group label.
    pub group_placeholders: usize,
    /// Counts per ministry (skill category).
    pub by_ministry: BTreeMap<String, SlotCounts>,
    /// Counts per ISO week (`YYYY-Www`).
    pub by_week: BTreeMap<String, SlotCounts>,
    /// New assignments per person id.
    pub per_person: BTreeMap<String, u32>,
    /// Slots left unfilled, in requirement order.
    pub unfilled_slots: Vec<SlotKey>,
}

impl RunSummary {
    /// Computes the summary from requirements and their outcomes.
    ///
    /// `outcomes` is parallel to `requirements`.
    pub fn calculate(
        requirements: &[RoleRequirement],
        outcomes: &[SlotOutcome],
        catalog: &SkillCatalog,
    ) -> Self {
        let mut summary = Self::default();

        for (req, outcome) in requirements.iter().zip(outcomes) {
            let filled = outcome.is_filled();
            summary.requested += 1;

            match &outcome.state {
                SlotState::Prefilled(_) => {
                    summary.filled += 1;
                    summary.prefilled += 1;
                }
                SlotState::Assigned(Assignee::Person { id, .. }) => {
                    summary.filled += 1;
                    summary.auto_assigned += 1;
                    *summary.per_person.entry(id.clone()).or_insert(0) += 1;
                }
                SlotState::Assigned(Assignee::Group(_)) => {
                    summary.filled += 1;
                    summary.group_placeholders += 1;
                }
                SlotState::Unfilled => {
                    summary.unfilled += 1;
                    summary.unfilled_slots.push(outcome.slot.clone());
                }
            }

            let ministry = catalog.ministry_of(&req.skill).to_string();
            summary.by_ministry.entry(ministry).or_default().add(filled);
            summary.by_week.entry(week_label(req)).or_default().add(filled);
        }

        summary
    }

    /// Fraction of requested slots that are filled (1.0 when none requested).
    pub fn fill_rate(&self) -> f64 {
        if self.requested == 0 {
            1.0
        } else {
            self.filled as f64 / self.requested as f64
        }
    }

    /// Whether every slot is filled.
    pub fn is_complete(&self) -> bool {
        self.unfilled == 0
    }
}

fn week_label(req: &RoleRequirement) -> String {
    let week = req.date.iso_week();
    format!("{}-W{:02}", week.year(), week.week())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MinistryEntry;
    use crate::models::Event;
    use chrono::NaiveDate;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, d).unwrap()
    }

    fn outcome(req: &RoleRequirement, state: SlotState) -> SlotOutcome {
        SlotOutcome {
            slot: req.key(),
            state,
            score: None,
            candidates: 0,
        }
    }

    #[test]
    fn test_summary_counts() {
        let catalog = SkillCatalog::from_registry(&[
            MinistryEntry::new("Lector 1", "Lector"),
            MinistryEntry::new("Usher", "Hospitality"),
        ]);
        let week1 = Event::new("SUN-0900", date(8));
        let week2 = Event::new("SUN-0900b", date(15));
        let reqs = vec![
            week1.role("Lector 1", "Lector 1"),
            week1.role("Usher", "Usher"),
            week2.role("Lector 1", "Lector 1"),
            week2.role("Usher", "Usher"),
        ];
        let person = Assignee::Person {
            id: "P1".into(),
            name: "Ann".into(),
        };
        let outcomes = vec![
            outcome(&reqs[0], SlotState::Prefilled(person.clone())),
            outcome(&reqs[1], SlotState::Assigned(person)),
            outcome(&reqs[2], SlotState::Unfilled),
            outcome(&reqs[3], SlotState::Assigned(Assignee::Group("Knights".into()))),
        ];

        let s = RunSummary::calculate(&reqs, &outcomes, &catalog);
        assert_eq!(s.requested, 4);
        assert_eq!(s.filled, 3);
        assert_eq!(s.unfilled, 1);
        assert_eq!(s.prefilled, 1);
        assert_eq!(s.auto_assigned, 1);
        assert_eq!(s.group_placeholders, 1);
        assert_eq!(s.per_person["P1"], 1);
        assert_eq!(s.unfilled_slots, vec![reqs[2].key()]);
        assert!((s.fill_rate() - 0.75).abs() < 1e-10);
        assert!(!s.is_complete());

        assert_eq!(
            s.by_ministry["lector"],
            SlotCounts {
                requested: 2,
                filled: 1,
                unfilled: 1
            }
        );
        assert_eq!(s.by_ministry["hospitality"].filled, 2);
        assert_eq!(s.by_week["2026-W06"].requested, 2);
        assert_eq!(s.by_week["2026-W07"].unfilled, 1);
    }

    #[test]
    fn test_empty_summary() {
        let s = RunSummary::calculate(&[], &[], &SkillCatalog::default());
        assert_eq!(s.requested, 0);
        assert!((s.fill_rate() - 1.0).abs() < 1e-10);
        assert!(s.is_complete());
    }
}
