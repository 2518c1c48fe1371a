// All LLM prompt constants for the tailoring transformer.
// Reuses cross-cutting fragments from llm_client::prompts.

/// System prompt shared by all five tailoring calls — enforces JSON-only
/// output and forbids fabrication.
pub const TAILOR_SYSTEM: &str = "You are a sophisticated AI that helps transform \
    a candidate's resume into the best version for a specific job. \
    You work ONLY with facts already present in the candidate's data. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Skills re-ranking. Replace `{skills_json}` and `{job_description}`.
pub const SKILLS_PROMPT_TEMPLATE: &str = r#"Help me select the top 5 skills for this job application from my existing list of skills. For the skill level put 4 or 5, nothing less.

Return a JSON object with this EXACT schema (no extra fields):
{
  "items": [
    {
      "name": "Rust",
      "description": "Async services, systems programming",
      "level": 5,
      "keywords": ["tokio", "axum"]
    }
  ]
}

Select at most 5, ordered most relevant first. Only skills from my list — do
NOT add skills I don't have.

MY SKILLS:
{skills_json}

JOB DESCRIPTION:
{job_description}"#;

/// Summary rewrite. Replace `{summary_json}` and `{job_description}`.
pub const SUMMARY_PROMPT_TEMPLATE: &str = r#"Help me refine my summary for this job application. Be very concise, show my best features as a person, and make it as relevant as possible. Don't lie.

Return a JSON object with this EXACT schema (no extra fields):
{
  "result": "The rewritten summary."
}

MY CURRENT SUMMARY:
{summary_json}

JOB DESCRIPTION:
{job_description}"#;

/// References selection. Replace `{references_json}` and `{job_description}`.
pub const REFERENCES_PROMPT_TEMPLATE: &str = r#"Help me select the top 3 references for this job application from my existing list of references. Do NOT make up a new one if it doesn't exist. If the list is empty, return an empty list.

Return a JSON object with this EXACT schema (no extra fields):
{
  "items": [
    {
      "name": "Jane Doe",
      "description": "Engineering Manager at Acme",
      "summary": "Worked together for 4 years."
    }
  ]
}

Every `name` must match a reference from my list exactly.

MY REFERENCES:
{references_json}

JOB DESCRIPTION:
{job_description}"#;

/// Experience rewrite. Replace `{experiences_json}` and `{job_description}`.
pub const EXPERIENCES_PROMPT_TEMPLATE: &str = r#"Help me refine my job experiences for this job application. If an experience is not fitted to the job, make the summary as fitted as possible without exaggerating. Keep every company and position exactly as it is — rewrite only the summaries.

Return a JSON object with this EXACT schema (no extra fields):
{
  "items": [
    {
      "company": "Acme Corp",
      "position": "Senior Engineer",
      "location": "Berlin, Germany",
      "date": "January 2020 to June 2023",
      "summary": "The rewritten summary, biased toward the job's needs."
    }
  ]
}

`company` must never be empty. Include every experience from my list, in the
same order.

MY EXPERIENCES:
{experiences_json}

JOB DESCRIPTION:
{job_description}"#;

/// Headline rewrite. Replace `{headline}` and `{job_description}`.
pub const HEADLINE_PROMPT_TEMPLATE: &str = r#"Create the perfect headline for this role. Make it concise and relevant — no longer than 5 words.

Return a JSON object with this EXACT schema (no extra fields):
{
  "result": "The new headline."
}

MY CURRENT HEADLINE:
{headline}

JOB DESCRIPTION:
{job_description}"#;
