//! Extraction adapter — structured extraction over the LLM boundary.
//!
//! Two phases for a file import: first one combined instruction+content call
//! turns the binary source into a free-text draft (document mode for PDFs,
//! image mode for rasterized pages); then four independent structured slices
//! are extracted concurrently from that draft. Each slice is all-or-nothing:
//! it parses against its schema or the call fails, and a slice failure fails
//! the whole invocation — sibling in-flight calls are cancelled, their
//! results discarded.

use serde::{Deserialize, Serialize};
use tokio::try_join;
use tracing::info;

use crate::errors::PipelineError;
use crate::llm_client::{Attachment, AttachmentKind, LlmClient, LlmError};

pub mod prompts;

// ────────────────────────────────────────────────────────────────────────────
// Source media
// ────────────────────────────────────────────────────────────────────────────

/// Accepted media tags for an uploaded source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Pdf,
    Png,
    Jpg,
    Jpeg,
}

impl MediaKind {
    /// Parses a caller-supplied media tag. Anything unsupported is rejected
    /// here, before any extraction call is issued.
    pub fn parse(tag: &str) -> Result<Self, PipelineError> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "pdf" => Ok(MediaKind::Pdf),
            "png" => Ok(MediaKind::Png),
            "jpg" => Ok(MediaKind::Jpg),
            "jpeg" => Ok(MediaKind::Jpeg),
            other => Err(PipelineError::InvalidSourceType(other.to_string())),
        }
    }

    pub fn media_type(&self) -> &'static str {
        match self {
            MediaKind::Pdf => "application/pdf",
            MediaKind::Png => "image/png",
            MediaKind::Jpg | MediaKind::Jpeg => "image/jpeg",
        }
    }

    fn attachment_kind(&self) -> AttachmentKind {
        match self {
            MediaKind::Pdf => AttachmentKind::Document,
            _ => AttachmentKind::Image,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Slice result types (ephemeral — consumed immediately by a transformer)
// ────────────────────────────────────────────────────────────────────────────

/// Basics + summary + spoken languages, as extracted from the draft.
/// Serializable so the transformers can overlay a raw item onto its
/// canonical default through the merge engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawBasics {
    pub name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub headline: Option<String>,
    pub summary: Option<String>,
    pub languages: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawExperience {
    pub company: Option<String>,
    pub position: Option<String>,
    pub location: Option<String>,
    pub date: Option<String>,
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawSkill {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawEducation {
    pub institution: Option<String>,
    pub study_type: Option<String>,
    pub area: Option<String>,
    pub score: Option<String>,
    pub date: Option<String>,
    pub summary: Option<String>,
}

/// The joined output of the four slices. Exists only within one pipeline
/// invocation.
#[derive(Debug, Clone, Default)]
pub struct SliceResults {
    pub basics: RawBasics,
    pub experiences: Vec<RawExperience>,
    pub skills: Vec<RawSkill>,
    pub educations: Vec<RawEducation>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ExperiencesSlice {
    experiences: Vec<RawExperience>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SkillsSlice {
    skills: Vec<RawSkill>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct EducationsSlice {
    educations: Vec<RawEducation>,
}

// ────────────────────────────────────────────────────────────────────────────
// Extraction calls
// ────────────────────────────────────────────────────────────────────────────

/// Produces the free-text resume draft from a binary source.
/// One combined call: instruction text plus the base64 payload.
pub async fn draft_from_file(
    llm: &LlmClient,
    data_base64: &str,
    media: MediaKind,
) -> Result<String, PipelineError> {
    let attachment = Attachment {
        kind: media.attachment_kind(),
        media_type: media.media_type(),
        data: data_base64,
    };

    let response = llm
        .call_with_attachment(prompts::DRAFT_PROMPT, prompts::DRAFT_SYSTEM, attachment)
        .await
        .map_err(|e| extraction_error("file draft", e))?;

    let draft = response
        .text()
        .ok_or_else(|| extraction_error("file draft", LlmError::EmptyContent))?;

    info!("File draft extracted ({} chars)", draft.len());
    Ok(draft.to_string())
}

/// Extracts the four structured slices from a free-text draft, concurrently.
///
/// Slices share no partial results. The first failure cancels the sibling
/// in-flight calls (`try_join!` drops the remaining futures) and aborts the
/// invocation.
pub async fn extract_slices(llm: &LlmClient, draft: &str) -> Result<SliceResults, PipelineError> {
    let (basics, experiences, skills, educations) = try_join!(
        extract_basics(llm, draft),
        extract_experiences(llm, draft),
        extract_skills(llm, draft),
        extract_educations(llm, draft),
    )?;

    info!(
        "Slices extracted: {} experiences, {} skills, {} educations, {} languages",
        experiences.len(),
        skills.len(),
        educations.len(),
        basics.languages.len()
    );

    Ok(SliceResults {
        basics,
        experiences,
        skills,
        educations,
    })
}

async fn extract_basics(llm: &LlmClient, draft: &str) -> Result<RawBasics, PipelineError> {
    let prompt = prompts::BASICS_PROMPT_TEMPLATE.replace("{draft_text}", draft);
    llm.call_json::<RawBasics>(&prompt, prompts::SLICE_SYSTEM)
        .await
        .map_err(|e| extraction_error("basics slice", e))
}

async fn extract_experiences(
    llm: &LlmClient,
    draft: &str,
) -> Result<Vec<RawExperience>, PipelineError> {
    let prompt = prompts::EXPERIENCES_PROMPT_TEMPLATE.replace("{draft_text}", draft);
    let slice: ExperiencesSlice = llm
        .call_json(&prompt, prompts::SLICE_SYSTEM)
        .await
        .map_err(|e| extraction_error("experiences slice", e))?;
    validate_nonempty(
        "experiences slice",
        "company",
        slice.experiences.iter().map(|e| e.company.as_deref()),
    )?;
    Ok(slice.experiences)
}

async fn extract_skills(llm: &LlmClient, draft: &str) -> Result<Vec<RawSkill>, PipelineError> {
    let prompt = prompts::SKILLS_PROMPT_TEMPLATE.replace("{draft_text}", draft);
    let slice: SkillsSlice = llm
        .call_json(&prompt, prompts::SLICE_SYSTEM)
        .await
        .map_err(|e| extraction_error("skills slice", e))?;
    Ok(slice.skills)
}

async fn extract_educations(
    llm: &LlmClient,
    draft: &str,
) -> Result<Vec<RawEducation>, PipelineError> {
    let prompt = prompts::EDUCATIONS_PROMPT_TEMPLATE.replace("{draft_text}", draft);
    let slice: EducationsSlice = llm
        .call_json(&prompt, prompts::SLICE_SYSTEM)
        .await
        .map_err(|e| extraction_error("educations slice", e))?;
    validate_nonempty(
        "educations slice",
        "institution",
        slice.educations.iter().map(|e| e.institution.as_deref()),
    )?;
    Ok(slice.educations)
}

/// Schema bound the prompt declares as required: the named field must be a
/// non-empty string on every item, or the slice fails as a whole.
fn validate_nonempty<'a>(
    slice: &str,
    field: &str,
    values: impl Iterator<Item = Option<&'a str>>,
) -> Result<(), PipelineError> {
    for value in values {
        if value.map_or(true, |v| v.trim().is_empty()) {
            return Err(PipelineError::Extraction(format!(
                "{slice}: schema validation failed — `{field}` must be non-empty"
            )));
        }
    }
    Ok(())
}

fn extraction_error(slice: &str, error: LlmError) -> PipelineError {
    PipelineError::Extraction(format!("{slice}: {error}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_kind_parses_supported_tags() {
        assert_eq!(MediaKind::parse("pdf").unwrap(), MediaKind::Pdf);
        assert_eq!(MediaKind::parse("PNG").unwrap(), MediaKind::Png);
        assert_eq!(MediaKind::parse(" jpg ").unwrap(), MediaKind::Jpg);
        assert_eq!(MediaKind::parse("jpeg").unwrap(), MediaKind::Jpeg);
    }

    #[test]
    fn test_media_kind_rejects_unsupported_tags_before_extraction() {
        for tag in ["gif", "docx", "svg", ""] {
            let err = MediaKind::parse(tag).unwrap_err();
            assert_eq!(err.code(), "INVALID_SOURCE_TYPE");
            assert!(!err.is_retryable());
        }
    }

    #[test]
    fn test_media_types() {
        assert_eq!(MediaKind::Pdf.media_type(), "application/pdf");
        assert_eq!(MediaKind::Png.media_type(), "image/png");
        assert_eq!(MediaKind::Jpg.media_type(), "image/jpeg");
        assert_eq!(MediaKind::Jpeg.media_type(), "image/jpeg");
    }

    #[test]
    fn test_pdf_is_document_mode_images_are_image_mode() {
        assert_eq!(MediaKind::Pdf.attachment_kind(), AttachmentKind::Document);
        assert_eq!(MediaKind::Png.attachment_kind(), AttachmentKind::Image);
        assert_eq!(MediaKind::Jpeg.attachment_kind(), AttachmentKind::Image);
    }

    #[test]
    fn test_raw_basics_parses_with_missing_fields() {
        let basics: RawBasics =
            serde_json::from_str(r#"{"name": "Ada", "languages": ["English"]}"#).unwrap();
        assert_eq!(basics.name.as_deref(), Some("Ada"));
        assert!(basics.email.is_none());
        assert_eq!(basics.languages, vec!["English"]);
    }

    #[test]
    fn test_experiences_slice_parses_camel_case() {
        let slice: ExperiencesSlice = serde_json::from_str(
            r#"{"experiences": [{"company": "Acme", "position": "Engineer"}]}"#,
        )
        .unwrap();
        assert_eq!(slice.experiences.len(), 1);
        assert_eq!(slice.experiences[0].company.as_deref(), Some("Acme"));
        assert!(slice.experiences[0].date.is_none());
    }

    #[test]
    fn test_educations_slice_study_type_is_camel_case() {
        let slice: EducationsSlice = serde_json::from_str(
            r#"{"educations": [{"institution": "MIT", "studyType": "BSc"}]}"#,
        )
        .unwrap();
        assert_eq!(slice.educations[0].study_type.as_deref(), Some("BSc"));
    }

    #[test]
    fn test_validate_nonempty_rejects_missing_required_field() {
        let values = [Some("Acme"), None];
        let err = validate_nonempty("experiences slice", "company", values.into_iter())
            .unwrap_err();
        assert_eq!(err.code(), "EXTRACTION_FAILURE");
        assert!(err.is_retryable());

        let values = [Some("Acme"), Some("   ")];
        assert!(validate_nonempty("experiences slice", "company", values.into_iter()).is_err());
    }

    #[test]
    fn test_validate_nonempty_accepts_populated_items() {
        let values = [Some("Acme"), Some("Globex")];
        assert!(validate_nonempty("experiences slice", "company", values.into_iter()).is_ok());
    }
}
