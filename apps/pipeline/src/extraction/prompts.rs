// All LLM prompt constants for the extraction adapter.
// Reuses cross-cutting fragments from llm_client::prompts.

/// System prompt for the raw-to-text draft over an uploaded file.
pub const DRAFT_SYSTEM: &str = "You are an expert resume writer. \
    You read resumes from documents and images and transcribe their full \
    content as clean plain text, preserving every fact.";

/// Instruction sent with the binary attachment. One combined call: the file
/// travels in the same message.
pub const DRAFT_PROMPT: &str = "Create a resume from the file.";

/// System prompt shared by the four structured slices — enforces JSON-only
/// output.
pub const SLICE_SYSTEM: &str = "You are an expert resume data extractor. \
    Extract structured information from a free-text resume draft. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Basics + summary + languages slice. Replace `{draft_text}` before sending.
pub const BASICS_PROMPT_TEMPLATE: &str = r#"Given the free text resume below, extract the basics, summary and languages.

Return a JSON object with this EXACT schema (no extra fields):
{
  "name": "Ada",
  "lastName": "Lovelace",
  "email": "ada@example.com",
  "phone": "+44 20 7946 0000",
  "location": "London, UK",
  "headline": "Analytical Engine Programmer",
  "summary": "One-paragraph professional summary in the candidate's voice.",
  "languages": ["English", "French"]
}

Use an empty string for any field the resume does not state. `languages` is
the list of spoken languages only, never programming languages.

RESUME:
{draft_text}"#;

/// Experiences slice. Replace `{draft_text}` before sending.
pub const EXPERIENCES_PROMPT_TEMPLATE: &str = r#"Given the free text resume below, extract the work experiences.

Return a JSON object with this EXACT schema (no extra fields):
{
  "experiences": [
    {
      "company": "Acme Corp",
      "position": "Senior Engineer",
      "location": "Berlin, Germany",
      "date": "January 2020 to June 2023",
      "summary": "What the candidate did there, as stated in the resume."
    }
  ]
}

`company` must never be empty. Use an empty string for any other field the
resume does not state. Keep the resume's own date wording.

RESUME:
{draft_text}"#;

/// Skills slice. Replace `{draft_text}` before sending.
pub const SKILLS_PROMPT_TEMPLATE: &str = r#"Given the free text resume below, extract the skills.

Return a JSON object with this EXACT schema (no extra fields):
{
  "skills": [
    {
      "name": "Rust",
      "description": "Systems programming, async services"
    }
  ]
}

One entry per distinct skill. Use an empty string for `description` when the
resume gives no detail.

RESUME:
{draft_text}"#;

/// Educations slice. Replace `{draft_text}` before sending.
pub const EDUCATIONS_PROMPT_TEMPLATE: &str = r#"Given the free text resume below, extract the educations.

Return a JSON object with this EXACT schema (no extra fields):
{
  "educations": [
    {
      "institution": "University of Cambridge",
      "studyType": "BSc",
      "area": "Mathematics",
      "score": "First Class Honours",
      "date": "2012 to 2015",
      "summary": ""
    }
  ]
}

`institution` must never be empty. Use an empty string for any other field
the resume does not state.

RESUME:
{draft_text}"#;
