//! AI-tailoring transformer — rewrites an existing resume against a job
//! description.
//!
//! Five independent extraction calls run concurrently (skills, summary,
//! references, experiences, headline); the first failure cancels the
//! in-flight siblings and aborts the invocation. Assembly is pure: one
//! [`MergePatch`] covering exactly `basics.headline` and the four affected
//! sections.
//!
//! HARD RULE: a reference that does not appear in the existing list is
//! dropped here regardless of what the model returned. Re-ranking, trimming,
//! and omission are allowed; fabrication is not.

use std::collections::HashSet;

use serde::Deserialize;
use serde_json::json;
use tokio::try_join;
use tracing::{info, warn};

use crate::errors::PipelineError;
use crate::llm_client::{LlmClient, LlmError};
use crate::merge::MergePatch;
use crate::models::{new_item_id, Experience, Reference, ResumeDocument, Skill, Url};

pub mod prompts;

/// Headline length cap, in words.
const MAX_HEADLINE_WORDS: usize = 5;
/// Tailored skills carry a level in this range; anything the model returns
/// outside it is clamped, not rejected.
const MIN_TAILORED_LEVEL: u8 = 4;
const MAX_TAILORED_LEVEL: u8 = 5;

// ────────────────────────────────────────────────────────────────────────────
// Extraction result shapes
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TailoredSkills {
    pub items: Vec<TailoredSkill>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TailoredSkill {
    pub name: String,
    pub description: String,
    pub level: i64,
    pub keywords: Vec<String>,
}

impl Default for TailoredSkill {
    fn default() -> Self {
        TailoredSkill {
            name: String::new(),
            description: String::new(),
            level: 1,
            keywords: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TailoredText {
    pub result: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TailoredReferences {
    pub items: Vec<TailoredReference>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TailoredReference {
    pub name: String,
    pub description: String,
    pub summary: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TailoredExperiences {
    pub items: Vec<TailoredExperience>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TailoredExperience {
    pub company: String,
    pub position: String,
    pub location: String,
    pub date: String,
    pub summary: String,
}

/// Joined output of the five calls, handed to the pure assembly step.
#[derive(Debug, Clone, Default)]
pub struct TailorOutputs {
    pub skills: TailoredSkills,
    pub summary: TailoredText,
    pub references: TailoredReferences,
    pub experiences: TailoredExperiences,
    pub headline: TailoredText,
}

// ────────────────────────────────────────────────────────────────────────────
// Transformer
// ────────────────────────────────────────────────────────────────────────────

/// Issues the five tailoring extractions concurrently and blocks until all
/// settle. The orchestrator calls this in its Extracting stage, then
/// [`assemble_patch`] in Transforming.
pub async fn run_extractions(
    llm: &LlmClient,
    existing: &ResumeDocument,
    job_description: &str,
) -> Result<TailorOutputs, PipelineError> {
    let skills_prompt = fill(
        prompts::SKILLS_PROMPT_TEMPLATE,
        "{skills_json}",
        &to_json("skills", &existing.sections.skills)?,
        job_description,
    );
    let summary_prompt = fill(
        prompts::SUMMARY_PROMPT_TEMPLATE,
        "{summary_json}",
        &to_json("summary", &existing.sections.summary)?,
        job_description,
    );
    let references_prompt = fill(
        prompts::REFERENCES_PROMPT_TEMPLATE,
        "{references_json}",
        &to_json("references", &existing.sections.references)?,
        job_description,
    );
    let experiences_prompt = fill(
        prompts::EXPERIENCES_PROMPT_TEMPLATE,
        "{experiences_json}",
        &to_json("experiences", &existing.sections.experience)?,
        job_description,
    );
    let headline_prompt = fill(
        prompts::HEADLINE_PROMPT_TEMPLATE,
        "{headline}",
        &existing.basics.headline,
        job_description,
    );

    let (skills, summary, references, experiences, headline) = try_join!(
        call::<TailoredSkills>(llm, &skills_prompt, "tailored skills"),
        call::<TailoredText>(llm, &summary_prompt, "tailored summary"),
        call::<TailoredReferences>(llm, &references_prompt, "tailored references"),
        call::<TailoredExperiences>(llm, &experiences_prompt, "tailored experiences"),
        call::<TailoredText>(llm, &headline_prompt, "tailored headline"),
    )?;

    for experience in &experiences.items {
        if experience.company.trim().is_empty() {
            return Err(PipelineError::Extraction(
                "tailored experiences: schema validation failed — `company` must be non-empty"
                    .to_string(),
            ));
        }
    }

    info!(
        "Tailoring extractions settled: {} skills, {} references, {} experiences",
        skills.items.len(),
        references.items.len(),
        experiences.items.len()
    );

    Ok(TailorOutputs {
        skills,
        summary,
        references,
        experiences,
        headline,
    })
}

async fn call<T: serde::de::DeserializeOwned>(
    llm: &LlmClient,
    prompt: &str,
    slice: &str,
) -> Result<T, PipelineError> {
    llm.call_json(prompt, prompts::TAILOR_SYSTEM)
        .await
        .map_err(|e: LlmError| PipelineError::Extraction(format!("{slice}: {e}")))
}

/// Pure assembly: extraction outputs → one merge patch against `existing`.
pub fn assemble_patch(
    existing: &ResumeDocument,
    outputs: TailorOutputs,
) -> Result<MergePatch, PipelineError> {
    let skills: Vec<Skill> = outputs
        .skills
        .items
        .into_iter()
        .map(|item| Skill {
            id: new_item_id(),
            name: item.name,
            description: item.description,
            level: clamp_level(item.level),
            keywords: item.keywords,
            ..Skill::default()
        })
        .collect();

    let references = filter_references(existing, outputs.references.items);

    let experiences: Vec<Experience> = outputs
        .experiences
        .items
        .into_iter()
        .map(|item| Experience {
            id: new_item_id(),
            company: item.company,
            position: item.position,
            location: item.location,
            date: item.date,
            summary: item.summary,
            url: Url::default(),
            ..Experience::default()
        })
        .collect();

    let headline = cap_words(&outputs.headline.result, MAX_HEADLINE_WORDS);

    MergePatch::new(json!({
        "basics": { "headline": headline },
        "sections": {
            "summary": { "content": outputs.summary.result },
            "skills": { "items": skills },
            "references": { "items": references },
            "experience": { "items": experiences },
        }
    }))
}

/// Keeps only references whose name appears in the existing list. An empty
/// existing list yields an empty result no matter what the model said.
fn filter_references(
    existing: &ResumeDocument,
    items: Vec<TailoredReference>,
) -> Vec<Reference> {
    let known: HashSet<&str> = existing
        .sections
        .references
        .items
        .iter()
        .map(|r| r.name.trim())
        .collect();

    items
        .into_iter()
        .filter(|item| {
            let kept = known.contains(item.name.trim());
            if !kept {
                warn!(
                    "Dropping fabricated reference not present in the existing list: {:?}",
                    item.name
                );
            }
            kept
        })
        .map(|item| Reference {
            id: new_item_id(),
            name: item.name,
            description: item.description,
            summary: item.summary,
            url: Url::default(),
            ..Reference::default()
        })
        .collect()
}

fn clamp_level(level: i64) -> u8 {
    level.clamp(MIN_TAILORED_LEVEL as i64, MAX_TAILORED_LEVEL as i64) as u8
}

fn cap_words(text: &str, max_words: usize) -> String {
    text.split_whitespace()
        .take(max_words)
        .collect::<Vec<_>>()
        .join(" ")
}

fn to_json<T: serde::Serialize>(what: &str, value: &T) -> Result<String, PipelineError> {
    serde_json::to_string(value)
        .map_err(|e| PipelineError::Internal(anyhow::anyhow!("Failed to serialize {what}: {e}")))
}

fn fill(template: &str, placeholder: &str, value: &str, job_description: &str) -> String {
    let body = template
        .replace(placeholder, value)
        .replace("{job_description}", job_description);
    format!(
        "{}\n\n{body}",
        crate::llm_client::prompts::NO_FABRICATION_INSTRUCTION
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merge;
    use std::collections::HashSet as StdHashSet;

    fn existing_with_references(names: &[&str]) -> ResumeDocument {
        let mut doc = ResumeDocument::default();
        doc.sections.references.items = names
            .iter()
            .map(|name| Reference {
                id: new_item_id(),
                name: name.to_string(),
                ..Reference::default()
            })
            .collect();
        doc
    }

    fn outputs_with_references(names: &[&str]) -> TailorOutputs {
        TailorOutputs {
            references: TailoredReferences {
                items: names
                    .iter()
                    .map(|name| TailoredReference {
                        name: name.to_string(),
                        description: "desc".to_string(),
                        summary: "sum".to_string(),
                    })
                    .collect(),
            },
            ..TailorOutputs::default()
        }
    }

    #[test]
    fn test_fabricated_references_are_dropped() {
        let existing = existing_with_references(&["Jane Doe", "John Smith"]);
        let outputs = outputs_with_references(&["Jane Doe", "Fabricated Person"]);
        let patch = assemble_patch(&existing, outputs).unwrap();
        let items = patch.as_value()["sections"]["references"]["items"]
            .as_array()
            .unwrap()
            .clone();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["name"], "Jane Doe");
    }

    #[test]
    fn test_empty_reference_list_yields_empty_output_regardless() {
        let existing = existing_with_references(&[]);
        let outputs = outputs_with_references(&["Anyone", "At All"]);
        let patch = assemble_patch(&existing, outputs).unwrap();
        assert!(patch.as_value()["sections"]["references"]["items"]
            .as_array()
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_reference_names_match_on_trimmed_text() {
        let existing = existing_with_references(&["Jane Doe"]);
        let outputs = outputs_with_references(&["  Jane Doe  "]);
        let patch = assemble_patch(&existing, outputs).unwrap();
        assert_eq!(
            patch.as_value()["sections"]["references"]["items"]
                .as_array()
                .unwrap()
                .len(),
            1
        );
    }

    #[test]
    fn test_skill_levels_are_forced_into_tailored_range() {
        assert_eq!(clamp_level(0), 4);
        assert_eq!(clamp_level(1), 4);
        assert_eq!(clamp_level(4), 4);
        assert_eq!(clamp_level(5), 5);
        assert_eq!(clamp_level(7), 5);
        assert_eq!(clamp_level(-3), 4);
    }

    #[test]
    fn test_headline_is_capped_at_five_words() {
        assert_eq!(
            cap_words("Staff Engineer Distributed Systems Rust Tokio Kafka", 5),
            "Staff Engineer Distributed Systems Rust"
        );
        assert_eq!(cap_words("Engineer", 5), "Engineer");
        assert_eq!(cap_words("", 5), "");
    }

    #[test]
    fn test_patch_covers_exactly_headline_and_four_sections() {
        let existing = ResumeDocument::default();
        let patch = assemble_patch(&existing, TailorOutputs::default()).unwrap();
        let value = patch.as_value();

        let basics: StdHashSet<_> = value["basics"].as_object().unwrap().keys().cloned().collect();
        assert_eq!(basics, StdHashSet::from(["headline".to_string()]));

        let sections: StdHashSet<_> =
            value["sections"].as_object().unwrap().keys().cloned().collect();
        let expected: StdHashSet<String> = ["summary", "skills", "references", "experience"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(sections, expected);
    }

    #[test]
    fn test_tailored_items_are_visible_with_fresh_ids_and_empty_links() {
        let existing = existing_with_references(&["Jane Doe"]);
        let outputs = TailorOutputs {
            skills: TailoredSkills {
                items: vec![TailoredSkill {
                    name: "Rust".to_string(),
                    level: 5,
                    ..TailoredSkill::default()
                }],
            },
            experiences: TailoredExperiences {
                items: vec![TailoredExperience {
                    company: "Acme".to_string(),
                    position: "Engineer".to_string(),
                    summary: "Rewritten.".to_string(),
                    ..TailoredExperience::default()
                }],
            },
            ..outputs_with_references(&["Jane Doe"])
        };
        let patch = assemble_patch(&existing, outputs).unwrap();
        let value = patch.as_value();

        for path in ["skills", "references", "experience"] {
            for item in value["sections"][path]["items"].as_array().unwrap() {
                assert_eq!(item["visible"], true, "{path} item must be visible");
                assert!(!item["id"].as_str().unwrap().is_empty());
            }
        }
        assert_eq!(value["sections"]["experience"]["items"][0]["url"]["label"], "");
        assert_eq!(value["sections"]["experience"]["items"][0]["url"]["href"], "");
    }

    #[test]
    fn test_patch_merges_into_existing_preserving_untouched_sections() {
        let mut existing = existing_with_references(&["Jane Doe"]);
        existing.basics.name = "Ada Lovelace".to_string();
        existing.sections.education.items = vec![crate::models::Education {
            id: new_item_id(),
            institution: "Cambridge".to_string(),
            ..crate::models::Education::default()
        }];

        let mut outputs = outputs_with_references(&["Jane Doe"]);
        outputs.headline.result = "Principal Engineer Distributed Systems Rust Extra".to_string();
        outputs.summary.result = "Tailored summary.".to_string();

        let patch = assemble_patch(&existing, outputs).unwrap();
        let merged = merge::apply(&existing, patch).unwrap();

        // Rewritten fields
        assert_eq!(merged.basics.headline, "Principal Engineer Distributed Systems Rust");
        assert_eq!(merged.sections.summary.content, "Tailored summary.");
        // Untouched data survives the merge
        assert_eq!(merged.basics.name, "Ada Lovelace");
        assert_eq!(merged.sections.education.items[0].institution, "Cambridge");
    }

    #[test]
    fn test_tailored_skill_level_defaults_to_one_then_clamps() {
        // zod-style default: a skill the model returns without a level parses
        // as level 1 and is then forced to the tailored floor.
        let parsed: TailoredSkill = serde_json::from_str(r#"{"name": "Rust"}"#).unwrap();
        assert_eq!(parsed.level, 1);
        assert_eq!(clamp_level(parsed.level), 4);
    }
}
