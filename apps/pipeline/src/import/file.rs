//! File transformer — four structured slice results → one [`MergePatch`].
//!
//! Every field a slice omits is filled from the canonical per-type default
//! via the merge engine's overlay, so no item ever reaches the merge with an
//! absent field. The patch touches `basics` and five sections (summary,
//! education, experience, skills, languages); everything else stays absent
//! and is sourced from the base document by the merge.

use serde::{de::DeserializeOwned, Serialize};
use serde_json::json;

use crate::errors::PipelineError;
use crate::extraction::SliceResults;
use crate::merge::{fill_from_default, MergePatch};
use crate::models::{
    new_item_id, Basics, Education, Experience, Language, Section, Skill, SummarySection,
};

/// Builds the merge patch for a file import.
pub fn slices_to_patch(slices: SliceResults) -> Result<MergePatch, PipelineError> {
    let skills: Vec<Skill> = slices
        .skills
        .iter()
        .map(|raw| overlay(raw, |skill: &mut Skill| skill.id = new_item_id()))
        .collect::<Result<_, _>>()?;

    let experiences: Vec<Experience> = slices
        .experiences
        .iter()
        .map(|raw| overlay(raw, |exp: &mut Experience| exp.id = new_item_id()))
        .collect::<Result<_, _>>()?;

    let educations: Vec<Education> = slices
        .educations
        .iter()
        .map(|raw| overlay(raw, |edu: &mut Education| edu.id = new_item_id()))
        .collect::<Result<_, _>>()?;

    let languages: Vec<Language> = slices
        .basics
        .languages
        .iter()
        .map(|name| Language {
            id: new_item_id(),
            name: name.clone(),
            ..Language::default()
        })
        .collect();

    let raw = &slices.basics;
    let basics = Basics {
        name: full_name(raw.name.as_deref(), raw.last_name.as_deref()),
        headline: raw.headline.clone().unwrap_or_default(),
        email: raw.email.clone().unwrap_or_default(),
        phone: raw.phone.clone().unwrap_or_default(),
        location: raw.location.clone().unwrap_or_default(),
        ..Basics::default()
    };

    let summary = SummarySection {
        content: raw.summary.clone().unwrap_or_default(),
        ..SummarySection::default()
    };

    MergePatch::new(json!({
        "basics": basics,
        "sections": {
            "summary": summary,
            "education": section("education", "Education", educations),
            "experience": section("experience", "Experience", experiences),
            "skills": section("skills", "Skills", skills),
            "languages": section("languages", "Languages", languages),
        }
    }))
}

/// Overlays a raw slice item onto its canonical default, then stamps the
/// fresh identifier. `visible` comes from the default (true) — a slice never
/// carries it.
fn overlay<R, T>(raw: &R, stamp: impl FnOnce(&mut T)) -> Result<T, PipelineError>
where
    R: Serialize,
    T: Serialize + DeserializeOwned + Default,
{
    let partial = serde_json::to_value(raw)
        .map_err(|e| PipelineError::MergeInvariant(format!("slice item failed to serialize: {e}")))?;
    let mut item = fill_from_default(&T::default(), partial)?;
    stamp(&mut item);
    Ok(item)
}

fn section<T>(id: &str, name: &str, items: Vec<T>) -> Section<T> {
    Section {
        items,
        ..Section::titled(id, name)
    }
}

/// Joins the given/family name parts when the draft splits them.
/// The extracted `name` often already carries the full name — don't repeat.
fn full_name(name: Option<&str>, last_name: Option<&str>) -> String {
    let name = name.unwrap_or_default().trim();
    let last = last_name.unwrap_or_default().trim();
    if last.is_empty() || name.contains(last) {
        return name.to_string();
    }
    if name.is_empty() {
        return last.to_string();
    }
    format!("{name} {last}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::{RawBasics, RawEducation, RawExperience, RawSkill};
    use crate::merge;
    use crate::models::ResumeDocument;
    use std::collections::HashSet;

    fn fixture_slices() -> SliceResults {
        SliceResults {
            basics: RawBasics {
                name: Some("Ada".to_string()),
                last_name: Some("Lovelace".to_string()),
                email: Some("ada@example.com".to_string()),
                headline: Some("Analytical Engine Programmer".to_string()),
                summary: Some("First programmer.".to_string()),
                languages: vec!["English".to_string(), "French".to_string()],
                ..RawBasics::default()
            },
            experiences: vec![RawExperience {
                company: Some("Analytical Engines Ltd".to_string()),
                position: Some("Programmer".to_string()),
                date: Some("Since January 1843".to_string()),
                ..RawExperience::default()
            }],
            skills: vec![
                RawSkill {
                    name: Some("Mathematics".to_string()),
                    description: None,
                },
                RawSkill {
                    name: Some("Algorithms".to_string()),
                    description: Some("Bernoulli numbers".to_string()),
                },
            ],
            educations: vec![RawEducation {
                institution: Some("Private tutors".to_string()),
                area: Some("Mathematics".to_string()),
                ..RawEducation::default()
            }],
        }
    }

    #[test]
    fn test_every_item_has_fresh_unique_id_and_is_visible() {
        let patch = slices_to_patch(fixture_slices()).unwrap();
        let value = patch.as_value();

        let mut ids = HashSet::new();
        for key in ["education", "experience", "skills", "languages"] {
            for item in value["sections"][key]["items"].as_array().unwrap() {
                let id = item["id"].as_str().unwrap();
                assert!(!id.is_empty(), "{key} item id must be non-empty");
                assert!(ids.insert(id.to_string()), "{key} item id must be unique");
                assert_eq!(item["visible"], true, "{key} item must be visible");
            }
        }
    }

    #[test]
    fn test_missing_fields_are_filled_from_defaults() {
        let patch = slices_to_patch(fixture_slices()).unwrap();
        let value = patch.as_value();

        // The first skill had no description; the experience had no location.
        assert_eq!(value["sections"]["skills"]["items"][0]["description"], "");
        assert_eq!(value["sections"]["experience"]["items"][0]["location"], "");
        assert_eq!(value["sections"]["experience"]["items"][0]["summary"], "");
        // Slices never carry urls — the canonical empty link fills in.
        assert_eq!(value["sections"]["experience"]["items"][0]["url"]["href"], "");
        assert_eq!(value["sections"]["education"]["items"][0]["studyType"], "");
        assert_eq!(value["sections"]["education"]["items"][0]["score"], "");
    }

    #[test]
    fn test_patch_touches_only_basics_and_five_sections() {
        let patch = slices_to_patch(fixture_slices()).unwrap();
        let value = patch.as_value();

        let root: HashSet<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(root, HashSet::from(["basics".to_string(), "sections".to_string()]));

        let sections: HashSet<_> = value["sections"].as_object().unwrap().keys().cloned().collect();
        let expected: HashSet<String> = ["summary", "education", "experience", "skills", "languages"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(sections, expected, "unmapped sections must stay absent");
    }

    #[test]
    fn test_basics_and_summary_are_populated() {
        let patch = slices_to_patch(fixture_slices()).unwrap();
        let value = patch.as_value();
        assert_eq!(value["basics"]["name"], "Ada Lovelace");
        assert_eq!(value["basics"]["email"], "ada@example.com");
        assert_eq!(value["basics"]["phone"], "");
        assert_eq!(value["sections"]["summary"]["content"], "First programmer.");
        assert_eq!(value["sections"]["languages"]["items"][1]["name"], "French");
    }

    #[test]
    fn test_full_name_join_rules() {
        assert_eq!(full_name(Some("Ada"), Some("Lovelace")), "Ada Lovelace");
        assert_eq!(full_name(Some("Ada Lovelace"), Some("Lovelace")), "Ada Lovelace");
        assert_eq!(full_name(Some("Ada"), None), "Ada");
        assert_eq!(full_name(None, Some("Lovelace")), "Lovelace");
        assert_eq!(full_name(None, None), "");
    }

    #[test]
    fn test_patch_merges_into_default_to_a_valid_document() {
        let patch = slices_to_patch(fixture_slices()).unwrap();
        let merged = merge::apply(&ResumeDocument::default(), patch).unwrap();
        assert_eq!(merged.basics.name, "Ada Lovelace");
        assert_eq!(merged.sections.skills.items.len(), 2);
        // Untouched sections come from the base default.
        assert_eq!(merged.sections.references.name, "References");
        assert!(merged.sections.references.items.is_empty());
    }

    #[test]
    fn test_two_runs_assign_independent_ids() {
        let first = slices_to_patch(fixture_slices()).unwrap();
        let second = slices_to_patch(fixture_slices()).unwrap();
        let id_of = |patch: &MergePatch| {
            patch.as_value()["sections"]["skills"]["items"][0]["id"]
                .as_str()
                .unwrap()
                .to_string()
        };
        assert_ne!(id_of(&first), id_of(&second));
    }
}
