//! Profile-import transformer — a scraped LinkedIn profile payload → one
//! [`MergePatch`].
//!
//! The payload is the enrichment API's fixed external shape: person name
//! parts, headline, location, picture URL, summary, flat skill/language
//! arrays, and nested position/education history with `{month, year}`
//! start/end objects. Unlike the file patch, every canonical section is
//! emitted here — unmapped ones as empty lists.

use serde::Deserialize;
use serde_json::json;

use crate::errors::PipelineError;
use crate::merge::MergePatch;
use crate::models::{
    new_item_id, Basics, Education, Experience, Language, Picture, Profile, Section, Sections,
    Skill, SummarySection, Url,
};

// ────────────────────────────────────────────────────────────────────────────
// External payload shape
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePayload {
    pub person: ProfilePerson,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProfilePerson {
    pub first_name: String,
    pub last_name: String,
    pub headline: Option<String>,
    pub location: Option<String>,
    pub photo_url: Option<String>,
    pub summary: Option<String>,
    pub public_identifier: String,
    pub linked_in_url: String,
    pub skills: Vec<String>,
    pub languages: Vec<String>,
    pub positions: PositionHistory,
    pub schools: SchoolHistory,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PositionHistory {
    pub position_history: Vec<ProfilePosition>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProfilePosition {
    pub company_name: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub linked_in_url: Option<String>,
    pub start_end_date: Option<DateRange>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SchoolHistory {
    pub education_history: Vec<ProfileSchool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProfileSchool {
    pub school_name: Option<String>,
    pub field_of_study: Option<String>,
    pub degree_name: Option<String>,
    pub linked_in_url: Option<String>,
    pub start_end_date: Option<DateRange>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct DateRange {
    pub start: Option<YearMonth>,
    pub end: Option<YearMonth>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct YearMonth {
    pub month: u32,
    pub year: i32,
}

// ────────────────────────────────────────────────────────────────────────────
// Transformer
// ────────────────────────────────────────────────────────────────────────────

/// Builds the merge patch for a LinkedIn profile import.
pub fn profile_to_patch(payload: &ProfilePayload) -> Result<MergePatch, PipelineError> {
    let person = &payload.person;

    let skills = person
        .skills
        .iter()
        .map(|name| Skill {
            id: new_item_id(),
            name: name.clone(),
            ..Skill::default()
        })
        .collect();

    let languages = person
        .languages
        .iter()
        .map(|name| Language {
            id: new_item_id(),
            name: name.clone(),
            ..Language::default()
        })
        .collect();

    // The scraped profile itself becomes a profiles-section entry.
    let profile = Profile {
        id: new_item_id(),
        network: "LinkedIn".to_string(),
        username: person.public_identifier.clone(),
        icon: "linkedin".to_string(),
        url: Url {
            label: String::new(),
            href: person.linked_in_url.clone(),
        },
        ..Profile::default()
    };

    let experiences = person
        .positions
        .position_history
        .iter()
        .map(|position| Experience {
            id: new_item_id(),
            company: position.company_name.clone().unwrap_or_default(),
            position: position.title.clone().unwrap_or_default(),
            date: format_date_range(position.start_end_date.as_ref()),
            summary: position.description.clone().unwrap_or_default(),
            url: Url {
                label: String::new(),
                href: position.linked_in_url.clone().unwrap_or_default(),
            },
            ..Experience::default()
        })
        .collect();

    let educations = person
        .schools
        .education_history
        .iter()
        .map(|school| Education {
            id: new_item_id(),
            institution: school.school_name.clone().unwrap_or_default(),
            study_type: school.field_of_study.clone().unwrap_or_default(),
            date: format_date_range(school.start_end_date.as_ref()),
            summary: school.degree_name.clone().unwrap_or_default(),
            url: Url {
                label: String::new(),
                href: school.linked_in_url.clone().unwrap_or_default(),
            },
            ..Education::default()
        })
        .collect();

    let basics = Basics {
        name: format!("{} {}", person.first_name, person.last_name)
            .trim()
            .to_string(),
        headline: person.headline.clone().unwrap_or_default(),
        location: person.location.clone().unwrap_or_default(),
        picture: Picture {
            url: person.photo_url.clone().unwrap_or_default(),
            ..Picture::default()
        },
        ..Basics::default()
    };

    // Start from the default section map so every unmapped canonical section
    // is emitted empty, then fill the mapped ones.
    let sections = Sections {
        summary: SummarySection {
            content: person.summary.clone().unwrap_or_default(),
            ..SummarySection::default()
        },
        education: with_items(Section::titled("education", "Education"), educations),
        experience: with_items(Section::titled("experience", "Experience"), experiences),
        skills: with_items(Section::titled("skills", "Skills"), skills),
        languages: with_items(Section::titled("languages", "Languages"), languages),
        profiles: with_items(Section::titled("profiles", "Profiles"), vec![profile]),
        ..Sections::default()
    };

    MergePatch::new(json!({ "basics": basics, "sections": sections }))
}

fn with_items<T>(section: Section<T>, items: Vec<T>) -> Section<T> {
    Section { items, ..section }
}

// ────────────────────────────────────────────────────────────────────────────
// Date formatting
// ────────────────────────────────────────────────────────────────────────────

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Formats an optional `{start, end}` month/year range:
/// both → `"January 2020 to June 2021"`, start only → `"Since January 2020"`,
/// end only → `"Until June 2021"`, neither → `""`.
pub fn format_date_range(range: Option<&DateRange>) -> String {
    let Some(range) = range else {
        return String::new();
    };

    match (range.start.as_ref(), range.end.as_ref()) {
        (Some(start), Some(end)) => {
            format!("{} to {}", format_month_year(start), format_month_year(end))
        }
        (Some(start), None) => format!("Since {}", format_month_year(start)),
        (None, Some(end)) => format!("Until {}", format_month_year(end)),
        (None, None) => String::new(),
    }
}

/// Months are 1-indexed. An out-of-range month falls back to the year alone
/// rather than failing the import.
fn format_month_year(date: &YearMonth) -> String {
    match date
        .month
        .checked_sub(1)
        .and_then(|i| MONTH_NAMES.get(i as usize))
    {
        Some(month) => format!("{month} {}", date.year),
        None => date.year.to_string(),
    }
}
