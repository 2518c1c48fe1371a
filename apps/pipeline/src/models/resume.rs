//! Canonical resume schema and its fully-populated defaults.
//!
//! Every pipeline output conforms to [`ResumeDocument`]. The `Default` impls
//! below ARE the merge base: a default document has every fixed section
//! present (empty, never absent) and no field left unset. Serialization is
//! camelCase — the canonical JSON form the embedding layers persist and
//! render.
//!
//! These defaults are pure immutable value tables. Construct fresh instances;
//! never share a mutable default across requests.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Basics
// ────────────────────────────────────────────────────────────────────────────

/// A labelled hyperlink. The empty link (`label: "", href: ""`) is the
/// canonical "no url" value — absence is never expressed as a missing field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct Url {
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct PictureEffects {
    pub hidden: bool,
    pub border: bool,
    pub grayscale: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Picture {
    pub url: String,
    pub size: u32,
    pub aspect_ratio: f64,
    pub border_radius: u32,
    pub effects: PictureEffects,
}

impl Default for Picture {
    fn default() -> Self {
        Picture {
            url: String::new(),
            size: 64,
            aspect_ratio: 1.0,
            border_radius: 0,
            effects: PictureEffects::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct CustomField {
    pub id: String,
    pub icon: String,
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct Basics {
    pub name: String,
    pub headline: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub url: Url,
    pub custom_fields: Vec<CustomField>,
    pub picture: Picture,
}

// ────────────────────────────────────────────────────────────────────────────
// Sections
// ────────────────────────────────────────────────────────────────────────────

/// An item-bearing section. `id` matches the section key it sits under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Section<T> {
    pub id: String,
    pub name: String,
    pub columns: u32,
    pub separate_links: bool,
    pub visible: bool,
    pub items: Vec<T>,
}

impl<T> Default for Section<T> {
    fn default() -> Self {
        Section {
            id: String::new(),
            name: String::new(),
            columns: 1,
            separate_links: true,
            visible: true,
            items: Vec::new(),
        }
    }
}

impl<T> Section<T> {
    /// A default section keyed and titled for its slot in [`Sections`].
    pub fn titled(id: &str, name: &str) -> Self {
        Section {
            id: id.to_string(),
            name: name.to_string(),
            ..Section::default()
        }
    }
}

/// The summary section carries free text instead of items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SummarySection {
    pub id: String,
    pub name: String,
    pub columns: u32,
    pub separate_links: bool,
    pub visible: bool,
    pub content: String,
}

impl Default for SummarySection {
    fn default() -> Self {
        SummarySection {
            id: "summary".to_string(),
            name: "Summary".to_string(),
            columns: 1,
            separate_links: true,
            visible: true,
            content: String::new(),
        }
    }
}

/// The fixed section map. Every key is always present — absence of a section
/// is never valid, only emptiness is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Sections {
    pub summary: SummarySection,
    pub education: Section<Education>,
    pub experience: Section<Experience>,
    pub skills: Section<Skill>,
    pub languages: Section<Language>,
    pub profiles: Section<Profile>,
    pub volunteer: Section<Volunteer>,
    pub interests: Section<Interest>,
    pub projects: Section<Project>,
    pub publications: Section<Publication>,
    pub references: Section<Reference>,
    pub awards: Section<Award>,
    pub certifications: Section<Certification>,
    pub custom: BTreeMap<String, Section<CustomItem>>,
}

impl Default for Sections {
    fn default() -> Self {
        Sections {
            summary: SummarySection::default(),
            education: Section::titled("education", "Education"),
            experience: Section::titled("experience", "Experience"),
            skills: Section::titled("skills", "Skills"),
            languages: Section::titled("languages", "Languages"),
            profiles: Section::titled("profiles", "Profiles"),
            volunteer: Section::titled("volunteer", "Volunteering"),
            interests: Section::titled("interests", "Interests"),
            projects: Section::titled("projects", "Projects"),
            publications: Section::titled("publications", "Publications"),
            references: Section::titled("references", "References"),
            awards: Section::titled("awards", "Awards"),
            certifications: Section::titled("certifications", "Certifications"),
            custom: BTreeMap::new(),
        }
    }
}

/// The canonical resume record. `ResumeDocument::default()` is the
/// fully-populated merge base used by every transformer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct ResumeDocument {
    pub basics: Basics,
    pub sections: Sections,
}

// ────────────────────────────────────────────────────────────────────────────
// Section items
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Skill {
    pub id: String,
    pub visible: bool,
    pub name: String,
    pub description: String,
    /// 0 (unrated) through 5.
    pub level: u8,
    pub keywords: Vec<String>,
}

impl Default for Skill {
    fn default() -> Self {
        Skill {
            id: String::new(),
            visible: true,
            name: String::new(),
            description: String::new(),
            level: 0,
            keywords: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Experience {
    pub id: String,
    pub visible: bool,
    pub company: String,
    pub position: String,
    pub location: String,
    pub date: String,
    pub summary: String,
    pub url: Url,
}

impl Default for Experience {
    fn default() -> Self {
        Experience {
            id: String::new(),
            visible: true,
            company: String::new(),
            position: String::new(),
            location: String::new(),
            date: String::new(),
            summary: String::new(),
            url: Url::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Education {
    pub id: String,
    pub visible: bool,
    pub institution: String,
    pub study_type: String,
    pub area: String,
    pub score: String,
    pub date: String,
    pub summary: String,
    pub url: Url,
}

impl Default for Education {
    fn default() -> Self {
        Education {
            id: String::new(),
            visible: true,
            institution: String::new(),
            study_type: String::new(),
            area: String::new(),
            score: String::new(),
            date: String::new(),
            summary: String::new(),
            url: Url::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Language {
    pub id: String,
    pub visible: bool,
    pub name: String,
    pub description: String,
    pub level: u8,
}

impl Default for Language {
    fn default() -> Self {
        Language {
            id: String::new(),
            visible: true,
            name: String::new(),
            description: String::new(),
            level: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Profile {
    pub id: String,
    pub visible: bool,
    pub network: String,
    pub username: String,
    pub icon: String,
    pub url: Url,
}

impl Default for Profile {
    fn default() -> Self {
        Profile {
            id: String::new(),
            visible: true,
            network: String::new(),
            username: String::new(),
            icon: String::new(),
            url: Url::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Volunteer {
    pub id: String,
    pub visible: bool,
    pub organization: String,
    pub position: String,
    pub location: String,
    pub date: String,
    pub summary: String,
    pub url: Url,
}

impl Default for Volunteer {
    fn default() -> Self {
        Volunteer {
            id: String::new(),
            visible: true,
            organization: String::new(),
            position: String::new(),
            location: String::new(),
            date: String::new(),
            summary: String::new(),
            url: Url::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Interest {
    pub id: String,
    pub visible: bool,
    pub name: String,
    pub keywords: Vec<String>,
}

impl Default for Interest {
    fn default() -> Self {
        Interest {
            id: String::new(),
            visible: true,
            name: String::new(),
            keywords: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub visible: bool,
    pub name: String,
    pub description: String,
    pub date: String,
    pub summary: String,
    pub keywords: Vec<String>,
    pub url: Url,
}

impl Default for Project {
    fn default() -> Self {
        Project {
            id: String::new(),
            visible: true,
            name: String::new(),
            description: String::new(),
            date: String::new(),
            summary: String::new(),
            keywords: Vec::new(),
            url: Url::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Publication {
    pub id: String,
    pub visible: bool,
    pub name: String,
    pub publisher: String,
    pub date: String,
    pub summary: String,
    pub url: Url,
}

impl Default for Publication {
    fn default() -> Self {
        Publication {
            id: String::new(),
            visible: true,
            name: String::new(),
            publisher: String::new(),
            date: String::new(),
            summary: String::new(),
            url: Url::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Reference {
    pub id: String,
    pub visible: bool,
    pub name: String,
    pub description: String,
    pub summary: String,
    pub url: Url,
}

impl Default for Reference {
    fn default() -> Self {
        Reference {
            id: String::new(),
            visible: true,
            name: String::new(),
            description: String::new(),
            summary: String::new(),
            url: Url::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Award {
    pub id: String,
    pub visible: bool,
    pub title: String,
    pub awarder: String,
    pub date: String,
    pub summary: String,
    pub url: Url,
}

impl Default for Award {
    fn default() -> Self {
        Award {
            id: String::new(),
            visible: true,
            title: String::new(),
            awarder: String::new(),
            date: String::new(),
            summary: String::new(),
            url: Url::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Certification {
    pub id: String,
    pub visible: bool,
    pub name: String,
    pub issuer: String,
    pub date: String,
    pub summary: String,
    pub url: Url,
}

impl Default for Certification {
    fn default() -> Self {
        Certification {
            id: String::new(),
            visible: true,
            name: String::new(),
            issuer: String::new(),
            date: String::new(),
            summary: String::new(),
            url: Url::default(),
        }
    }
}

/// Item shape for user-defined sections under the open `custom` map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CustomItem {
    pub id: String,
    pub visible: bool,
    pub name: String,
    pub description: String,
    pub date: String,
    pub location: String,
    pub summary: String,
    pub keywords: Vec<String>,
    pub url: Url,
}

impl Default for CustomItem {
    fn default() -> Self {
        CustomItem {
            id: String::new(),
            visible: true,
            name: String::new(),
            description: String::new(),
            date: String::new(),
            location: String::new(),
            summary: String::new(),
            keywords: Vec::new(),
            url: Url::default(),
        }
    }
}

/// The fixed section keys, in canonical order. Used by tests and by the merge
/// engine's structural checks.
pub const FIXED_SECTION_KEYS: &[&str] = &[
    "summary",
    "education",
    "experience",
    "skills",
    "languages",
    "profiles",
    "volunteer",
    "interests",
    "projects",
    "publications",
    "references",
    "awards",
    "certifications",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_document_contains_every_fixed_section() {
        let doc = ResumeDocument::default();
        let value = serde_json::to_value(&doc).unwrap();
        let sections = value.get("sections").unwrap().as_object().unwrap();
        for key in FIXED_SECTION_KEYS {
            assert!(sections.contains_key(*key), "missing section {key}");
        }
        assert!(sections.contains_key("custom"));
    }

    #[test]
    fn test_default_sections_are_keyed_and_titled() {
        let sections = Sections::default();
        assert_eq!(sections.summary.id, "summary");
        assert_eq!(sections.summary.name, "Summary");
        assert_eq!(sections.volunteer.id, "volunteer");
        assert_eq!(sections.volunteer.name, "Volunteering");
        assert_eq!(sections.experience.id, "experience");
        assert!(sections.experience.items.is_empty());
    }

    #[test]
    fn test_items_default_visible_true() {
        assert!(Skill::default().visible);
        assert!(Experience::default().visible);
        assert!(Education::default().visible);
        assert!(Language::default().visible);
        assert!(Profile::default().visible);
        assert!(Reference::default().visible);
    }

    #[test]
    fn test_serialization_is_camel_case() {
        let json = serde_json::to_value(Education::default()).unwrap();
        assert!(json.get("studyType").is_some());
        let json = serde_json::to_value(Section::<Skill>::default()).unwrap();
        assert!(json.get("separateLinks").is_some());
        let json = serde_json::to_value(Basics::default()).unwrap();
        assert!(json.get("customFields").is_some());
    }

    #[test]
    fn test_partial_json_parses_with_defaults_filled() {
        // A bare object must round out to the fully-populated default —
        // no field of the canonical form is ever absent.
        let doc: ResumeDocument = serde_json::from_str("{}").unwrap();
        assert_eq!(doc, ResumeDocument::default());

        let skill: Skill = serde_json::from_str(r#"{"name": "Rust"}"#).unwrap();
        assert_eq!(skill.name, "Rust");
        assert!(skill.visible);
        assert_eq!(skill.level, 0);
        assert!(skill.keywords.is_empty());
    }

    #[test]
    fn test_picture_defaults() {
        let picture = Picture::default();
        assert_eq!(picture.size, 64);
        assert!((picture.aspect_ratio - 1.0).abs() < f64::EPSILON);
        assert_eq!(picture.border_radius, 0);
        assert!(!picture.effects.hidden);
    }
}
