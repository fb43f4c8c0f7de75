//! Skill catalog and per-person qualification index.
//!
//! The catalog is built from the active entries of the ministry registry.
//! A qualification satisfies a required skill when it loosely matches
//! (exact or bidirectional substring, case-insensitive) either the skill
//! itself or the skill's category. The loose matching runs once per run
//! when the index is built; the filter then checks set membership.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::config::MinistryEntry;
use crate::models::{Person, Tag};

/// Known skills and their categories.
#[derive(Debug, Clone, Default)]
pub struct SkillCatalog {
    categories: BTreeMap<Tag, Tag>,
    known: BTreeSet<Tag>,
}

impl SkillCatalog {
    /// Builds the catalog from active registry entries.
    pub fn from_registry(entries: &[MinistryEntry]) -> Self {
        let mut catalog = Self::default();
        for entry in entries.iter().filter(|e| e.active) {
            let skill = Tag::new(&entry.skill);
            let category = Tag::new(&entry.category);
            if skill.is_empty() {
                continue;
            }
            catalog.known.insert(skill.clone());
            if !category.is_empty() {
                catalog.known.insert(category.clone());
                catalog.categories.entry(skill).or_insert(category);
            }
        }
        catalog
    }

    /// Whether the tag names a registered skill or category.
    pub fn is_known(&self, tag: &Tag) -> bool {
        self.known.contains(tag)
    }

    /// Category of a skill.
    pub fn category_of(&self, skill: &Tag) -> Option<&Tag> {
        self.categories.get(skill)
    }

    /// Ministry used for reporting: the category, or the skill itself.
    pub fn ministry_of(&self, skill: &Tag) -> Tag {
        self.category_of(skill).cloned().unwrap_or_else(|| skill.clone())
    }

    /// Whether a qualification satisfies a required skill.
    pub fn satisfies(&self, qualification: &Tag, required: &Tag) -> bool {
        if qualification.loosely_matches(required) {
            return true;
        }
        self.category_of(required)
            .is_some_and(|category| qualification.loosely_matches(category))
    }

    /// All known skills the person is qualified for.
    pub fn qualified_skills(&self, person: &Person) -> BTreeSet<Tag> {
        self.known
            .iter()
            .filter(|skill| person.qualifications.iter().any(|q| self.satisfies(q, skill)))
            .cloned()
            .collect()
    }
}

/// Precomputed qualified skills per person.
#[derive(Debug, Clone, Default)]
pub struct QualificationIndex {
    skills: HashMap<String, BTreeSet<Tag>>,
}

impl QualificationIndex {
    /// Builds the index for a roster.
    pub fn build(roster: &[Person], catalog: &SkillCatalog) -> Self {
        let skills = roster
            .iter()
            .map(|p| (p.id.clone(), catalog.qualified_skills(p)))
            .collect();
        Self { skills }
    }

    /// Whether the person is qualified for the skill.
    pub fn is_qualified(&self, person_id: &str, skill: &Tag) -> bool {
        self.skills
            .get(person_id)
            .is_some_and(|set| set.contains(skill))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> SkillCatalog {
        SkillCatalog::from_registry(&[
            MinistryEntry::new("Lector 1", "Lector"),
            MinistryEntry::new("Lector 2", "Lector"),
            MinistryEntry::new("EMHC Cup", "Extraordinary Minister"),
            MinistryEntry::new("Cantor", "Music").inactive(),
        ])
    }

    #[test]
    fn test_only_active_entries_are_known() {
        let c = catalog();
        assert!(c.is_known(&Tag::new("lector 1")));
        assert!(c.is_known(&Tag::new("LECTOR")));
        assert!(!c.is_known(&Tag::new("cantor")));
        assert!(!c.is_known(&Tag::new("music")));
    }

    #[test]
    fn test_category_qualification() {
        let c = catalog();
        let q = Tag::new("Extraordinary Minister");
        assert!(c.satisfies(&q, &Tag::new("emhc cup")));
        assert!(!c.satisfies(&q, &Tag::new("lector 1")));
    }

    #[test]
    fn test_substring_qualification_both_ways() {
        let c = catalog();
        // "Lector" ⊂ "Lector 2"
        assert!(c.satisfies(&Tag::new("Lector"), &Tag::new("Lector 2")));
        // "EMHC" ⊂ "EMHC Cup"
        assert!(c.satisfies(&Tag::new("emhc"), &Tag::new("emhc cup")));
        // "EMHC Cup Bearer" ⊃ "EMHC Cup"
        assert!(c.satisfies(&Tag::new("emhc cup bearer"), &Tag::new("emhc cup")));
    }

    #[test]
    fn test_index_membership() {
        let c = catalog();
        let roster = vec![
            Person::new("P1", "Ann").with_qualification("Lector"),
            Person::new("P2", "Bo").with_qualification("Usher"),
        ];
        let index = QualificationIndex::build(&roster, &c);
        assert!(index.is_qualified("P1", &Tag::new("lector 1")));
        assert!(index.is_qualified("P1", &Tag::new("lector 2")));
        assert!(!index.is_qualified("P1", &Tag::new("emhc cup")));
        assert!(!index.is_qualified("P2", &Tag::new("lector 1")));
        assert!(!index.is_qualified("P404", &Tag::new("lector 1")));
    }

    #[test]
    fn test_ministry_of() {
        let c = catalog();
        assert_eq!(c.ministry_of(&Tag::new("lector 2")), Tag::new("lector"));
        assert_eq!(c.ministry_of(&Tag::new("lector")), Tag::new("lector"));
    }
}
